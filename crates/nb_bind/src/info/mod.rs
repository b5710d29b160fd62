//! Per-type binding metadata.
//!
//! Every bindable type implements [`Typed`], returning a `&'static` [`TypeInfo`]
//! computed once and cached in a [`NonGenericTypeInfoCell`] or
//! [`GenericTypeInfoCell`]. A `TypeInfo` is immutable after publication and
//! shared freely between threads.
//!
//! Element, field and argument types are referenced lazily through
//! `fn() -> &'static TypeInfo`, so recursive types never recurse during
//! initialization.

// -----------------------------------------------------------------------------
// Modules

mod cell;
mod container_info;
mod creator_info;
mod field_info;
mod pojo_info;
mod type_info;
mod typed;

// -----------------------------------------------------------------------------
// Exports

pub use cell::{GenericTypeInfoCell, NonGenericTypeInfoCell};
pub use container_info::{ArrayInfo, ContainerKind, ListInfo, MapInfo, SetInfo};
pub use creator_info::{ArgInfo, CreatorArgs, CreatorInfo};
pub use field_info::{FieldAccessor, FieldInfo};
pub use pojo_info::{HybridAccessor, HybridInfo, PojoBuilder, PojoInfo, Property};
pub use type_info::{DynamicInfo, DynamicKind, EnumInfo, OpaqueInfo, OptionalInfo};
pub use type_info::{ScalarInfo, ScalarKind, TypeInfo, TypeKindError};
pub use typed::{DynamicTyped, Type, Typed};

// -----------------------------------------------------------------------------
// Internal helpers

use alloc::boxed::Box;
use alloc::format;

use crate::{BindError, Reflect};

/// Unboxes a decoded value into the type a builder expects.
///
/// A mismatch means some `TypeInfo` was wired to the wrong Rust type.
pub(crate) fn take_value<T: Reflect + Typed>(value: Box<dyn Reflect>) -> Result<T, BindError> {
    value.take::<T>().map_err(|other| {
        BindError::type_error(
            T::type_info().type_path(),
            format!(
                "received a value of type `{}`",
                other.reflect_type_info().type_path()
            ),
        )
    })
}
