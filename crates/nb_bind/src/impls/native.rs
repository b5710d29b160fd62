use ::alloc::boxed::Box;
use ::alloc::format;
use ::alloc::vec::Vec;

use crate::info::{ArrayInfo, GenericTypeInfoCell, NonGenericTypeInfoCell};
use crate::info::{ScalarInfo, ScalarKind, TypeInfo, Typed, take_value};
use crate::node::Number;
use crate::reflection::List;
use crate::{BindError, Reflect, ReflectRef};

// -----------------------------------------------------------------------------
// Scalars

macro_rules! impl_reflect_scalar {
    ($($ty:ty => $kind:ident, |$this:ident| $shape:expr;)*) => {
        $(
            impl Typed for $ty {
                fn type_info() -> &'static TypeInfo {
                    static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
                    CELL.get_or_init(|| TypeInfo::Scalar(ScalarInfo::new::<Self>(ScalarKind::$kind)))
                }
            }

            impl Reflect for $ty {
                #[inline]
                fn reflect_ref(&self) -> ReflectRef<'_> {
                    let $this = self;
                    $shape
                }
            }
        )*
    };
}

impl_reflect_scalar! {
    () => Unit, |_this| ReflectRef::Null;
    bool => Bool, |this| ReflectRef::Bool(*this);
    char => Char, |this| ReflectRef::Char(*this);
    i8 => I8, |this| ReflectRef::Number(Number::from(*this));
    i16 => I16, |this| ReflectRef::Number(Number::from(*this));
    i32 => I32, |this| ReflectRef::Number(Number::from(*this));
    i64 => I64, |this| ReflectRef::Number(Number::from(*this));
    isize => Isize, |this| ReflectRef::Number(Number::from(*this));
    u8 => U8, |this| ReflectRef::Number(Number::from(*this));
    u16 => U16, |this| ReflectRef::Number(Number::from(*this));
    u32 => U32, |this| ReflectRef::Number(Number::from(*this));
    u64 => U64, |this| ReflectRef::Number(Number::from(*this));
    usize => Usize, |this| ReflectRef::Number(Number::from(*this));
    f32 => F32, |this| ReflectRef::Number(Number::from(*this));
    f64 => F64, |this| ReflectRef::Number(Number::from(*this));
}

// -----------------------------------------------------------------------------
// [T; N]

fn build_array<T: Reflect + Typed, const N: usize>(
    items: Vec<Box<dyn Reflect>>,
) -> Result<Box<dyn Reflect>, BindError> {
    let items = items
        .into_iter()
        .map(take_value::<T>)
        .collect::<Result<Vec<T>, _>>()?;
    let array: [T; N] = items.try_into().map_err(|items: Vec<T>| {
        BindError::invalid(
            <[T; N]>::type_info().type_path(),
            format!("expected {N} elements, found {}", items.len()),
        )
    })?;
    Ok(Box::new(array))
}

impl<T: Reflect + Typed, const N: usize> Typed for [T; N] {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeInfo::Array(ArrayInfo::new::<Self, T>(Some(N), build_array::<T, N>))
        })
    }
}

impl<T: Reflect + Typed, const N: usize> Reflect for [T; N] {
    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::List(self)
    }
}

impl<T: Reflect + Typed, const N: usize> List for [T; N] {
    #[inline]
    fn len(&self) -> usize {
        N
    }

    #[inline]
    fn get(&self, index: usize) -> Option<&dyn Reflect> {
        <[T]>::get(self, index).map(Reflect::as_reflect)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &dyn Reflect> + '_> {
        Box::new(<[T]>::iter(self).map(Reflect::as_reflect))
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::vec;

    use crate::info::{ScalarKind, Typed};
    use crate::{BindError, Reflect, ReflectRef};

    #[test]
    fn scalar_kinds() {
        assert_eq!(i32::type_info().as_scalar().unwrap().kind(), ScalarKind::I32);
        assert_eq!(<()>::type_info().as_scalar().unwrap().kind(), ScalarKind::Unit);
        assert!(<()>::type_info().accepts_null());
        assert!(!u8::type_info().accepts_null());
        assert!(matches!(7_u8.reflect_ref(), ReflectRef::Number(_)));
    }

    #[test]
    fn fixed_array_checks_length() {
        let info = <[u8; 2]>::type_info().as_array().unwrap();
        assert_eq!(info.fixed_len(), Some(2));

        let ok = info
            .build(vec![Box::new(1_u8) as Box<dyn Reflect>, Box::new(2_u8)])
            .unwrap();
        assert_eq!(ok.take::<[u8; 2]>().ok(), Some([1, 2]));

        let err = info.build(vec![Box::new(1_u8) as Box<dyn Reflect>]).unwrap_err();
        assert!(matches!(err, BindError::InvalidValue { .. }));
    }
}
