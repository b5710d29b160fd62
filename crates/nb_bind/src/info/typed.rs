use core::any::{self, TypeId};
use core::fmt;

use crate::info::TypeInfo;

// -----------------------------------------------------------------------------
// Type

/// Identity of a Rust type: its [`TypeId`] and its type path.
#[derive(Clone, Copy)]
pub struct Type {
    id: TypeId,
    path: &'static str,
}

impl Type {
    #[inline]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            path: any::type_name::<T>(),
        }
    }

    #[inline(always)]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    /// The full path, e.g. `alloc::vec::Vec<u8>`.
    #[inline(always)]
    pub const fn path(&self) -> &'static str {
        self.path
    }

    #[inline]
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for Type {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Type {}

impl fmt::Debug for Type {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path)
    }
}

// -----------------------------------------------------------------------------
// Typed

/// Static access to the [`TypeInfo`] of a type.
///
/// Implementations memoize the result in a static cell:
///
/// ```
/// use nb_bind::info::{NonGenericTypeInfoCell, OpaqueInfo, TypeInfo, Typed};
///
/// struct Handle(u32);
///
/// impl Typed for Handle {
///     fn type_info() -> &'static TypeInfo {
///         static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
///         CELL.get_or_init(|| TypeInfo::Opaque(OpaqueInfo::new::<Self>()))
///     }
/// }
///
/// assert!(core::ptr::eq(Handle::type_info(), Handle::type_info()));
/// ```
pub trait Typed: 'static {
    fn type_info() -> &'static TypeInfo;
}

/// Object-safe access to [`Typed`], implemented for every `Typed` type.
pub trait DynamicTyped {
    fn reflect_type_info(&self) -> &'static TypeInfo;
}

impl<T: Typed> DynamicTyped for T {
    #[inline]
    fn reflect_type_info(&self) -> &'static TypeInfo {
        T::type_info()
    }
}
