use ::core::time::Duration;

use crate::info::{GenericTypeInfoCell, OptionalInfo, TypeInfo, Typed};
use crate::{Reflect, ReflectRef};

// -----------------------------------------------------------------------------
// Option<T>

impl<T: Reflect + Typed> Typed for Option<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::Optional(OptionalInfo::new::<T>()))
    }
}

impl<T: Reflect + Typed> Reflect for Option<T> {
    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Optional(self.as_ref().map(Reflect::as_reflect))
    }
}

// -----------------------------------------------------------------------------
// Duration

crate::impl_reflect_opaque!(Duration);
