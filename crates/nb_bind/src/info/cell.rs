//! Static storage of [`TypeInfo`].
//!
//! - [`NonGenericTypeInfoCell`]: a [`OnceLock`] for types without generics.
//! - [`GenericTypeInfoCell`]: the `static CELL` inside a generic function is
//!   shared by every instantiation, so it maps `TypeId`s to leaked infos.
//!
//! Two threads racing on first use may both compute an info; only one is
//! published and both observe the same reference afterwards.

use alloc::boxed::Box;
use core::any::{Any, TypeId};
use std::sync::{OnceLock, PoisonError, RwLock};

use nb_utils::TypeIdMap;

use crate::info::TypeInfo;

// -----------------------------------------------------------------------------
// NonGenericTypeInfoCell

/// Container for the [`TypeInfo`] of a non-generic type.
///
/// See [`Typed`](crate::info::Typed) for an example.
pub struct NonGenericTypeInfoCell(OnceLock<TypeInfo>);

impl NonGenericTypeInfoCell {
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Returns the stored info, computing it with `f` on first use.
    #[inline]
    pub fn get_or_init(&self, f: impl FnOnce() -> TypeInfo) -> &TypeInfo {
        self.0.get_or_init(f)
    }
}

// -----------------------------------------------------------------------------
// GenericTypeInfoCell

/// Container for the [`TypeInfo`]s of all instantiations of a generic type.
///
/// ```
/// use nb_bind::info::{GenericTypeInfoCell, OpaqueInfo, TypeInfo, Typed};
///
/// struct Tagged<T>(T);
///
/// impl<T: 'static> Typed for Tagged<T> {
///     fn type_info() -> &'static TypeInfo {
///         static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
///         CELL.get_or_insert::<Self>(|| TypeInfo::Opaque(OpaqueInfo::new::<Self>()))
///     }
/// }
///
/// assert_ne!(
///     Tagged::<u8>::type_info().type_id(),
///     Tagged::<u16>::type_info().type_id(),
/// );
/// ```
pub struct GenericTypeInfoCell(RwLock<TypeIdMap<&'static TypeInfo>>);

impl GenericTypeInfoCell {
    #[inline]
    pub const fn new() -> Self {
        Self(RwLock::new(TypeIdMap::new()))
    }

    /// Returns the info stored for `G`, computing it with `f` on first use.
    #[inline(always)]
    pub fn get_or_insert<G: Any + ?Sized>(&self, f: impl FnOnce() -> TypeInfo) -> &'static TypeInfo {
        self.get_or_insert_by_type_id(TypeId::of::<G>(), f)
    }

    // Separate to reduce code compilation times
    #[inline(never)]
    fn get_or_insert_by_type_id(
        &self,
        type_id: TypeId,
        f: impl FnOnce() -> TypeInfo,
    ) -> &'static TypeInfo {
        let found = self
            .0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .copied();
        if let Some(info) = found {
            return info;
        }

        // Computed outside the lock: `f` may ask for the infos of other
        // instantiations that live in this same cell.
        let info = f();
        let mut table = self.0.write().unwrap_or_else(PoisonError::into_inner);
        *table.get_or_insert(type_id, || Box::leak(Box::new(info)))
    }
}
