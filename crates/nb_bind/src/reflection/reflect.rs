use alloc::boxed::Box;
use core::any::{Any, TypeId};
use core::fmt;

use crate::info::DynamicTyped;
use crate::reflection::ReflectRef;

// -----------------------------------------------------------------------------
// Reflect

/// A value the engines can inspect without knowing its concrete type.
///
/// The encoder classifies a value through [`reflect_ref`], a closed
/// enumeration of shapes. The decoder never needs this trait on the way in;
/// it builds values from [`TypeInfo`](crate::info::TypeInfo) and hands them
/// around as `Box<dyn Reflect>`.
///
/// Implementations are provided for scalars, standard containers and the
/// node model. User types use [`impl_reflect_pojo!`], [`impl_reflect_enum!`]
/// or [`impl_reflect_opaque!`].
///
/// # Type Identification
///
/// [`Any::type_id`] on `Box<dyn Reflect>` returns the id of the box. Use
/// [`Reflect::ty_id`] instead:
///
/// ```
/// use nb_bind::Reflect;
/// use core::any::TypeId;
///
/// let x: Box<dyn Reflect> = Box::new(32_i32);
/// assert_eq!(x.ty_id(), TypeId::of::<i32>());
/// assert_eq!(x.take::<i32>().ok(), Some(32));
/// ```
///
/// [`reflect_ref`]: Reflect::reflect_ref
/// [`impl_reflect_pojo!`]: crate::impl_reflect_pojo
/// [`impl_reflect_enum!`]: crate::impl_reflect_enum
/// [`impl_reflect_opaque!`]: crate::impl_reflect_opaque
pub trait Reflect: DynamicTyped + Send + Sync + Any {
    /// Returns the shape of this value for encoding.
    fn reflect_ref(&self) -> ReflectRef<'_>;

    #[inline(always)]
    fn as_reflect(&self) -> &dyn Reflect
    where
        Self: Sized,
    {
        self
    }

    #[inline(always)]
    fn as_reflect_mut(&mut self) -> &mut dyn Reflect
    where
        Self: Sized,
    {
        self
    }

    #[inline(always)]
    fn into_reflect(self: Box<Self>) -> Box<dyn Reflect>
    where
        Self: Sized,
    {
        self
    }

    #[inline(always)]
    fn into_boxed_reflect(self) -> Box<dyn Reflect>
    where
        Self: Sized,
    {
        Box::new(self)
    }

    /// Returns the [`TypeId`] of the underlying type.
    #[inline]
    fn ty_id(&self) -> TypeId {
        Any::type_id(self)
    }
}

impl dyn Reflect {
    /// Returns `true` if the underlying type is `T`.
    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        let any: &dyn Any = self;
        any.is::<T>()
    }

    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        <dyn Any>::downcast_ref(self)
    }

    #[inline]
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        <dyn Any>::downcast_mut(self)
    }

    /// Downcasts the box, handing it back unchanged on mismatch.
    #[inline]
    pub fn downcast<T: Any>(self: Box<dyn Reflect>) -> Result<Box<T>, Box<dyn Reflect>> {
        if self.is::<T>() {
            let any: Box<dyn Any> = self;
            any.downcast::<T>()
                .map_err(|_| unreachable!("type is already checked"))
        } else {
            Err(self)
        }
    }

    /// Unboxes the value, handing the box back unchanged on mismatch.
    #[inline]
    pub fn take<T: Any>(self: Box<dyn Reflect>) -> Result<T, Box<dyn Reflect>> {
        self.downcast::<T>().map(|value| *value)
    }
}

impl fmt::Debug for dyn Reflect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dyn Reflect({})", self.reflect_type_info().type_path())
    }
}
