//! The shared store of binding metadata.
//!
//! ## Menu
//!
//! - [`TypeKind`]: how the engines treat a type, derived once per type.
//! - [`TypeMeta`]: a [`TypeInfo`] together with its cached [`TypeKind`].
//! - [`TypeRegistry`]: `TypeId`-keyed [`TypeMeta`]s and the value codecs.
//! - [`TypeRegistryArc`]: a registry shared between threads.
//!
//! [`TypeInfo`]: crate::info::TypeInfo

// -----------------------------------------------------------------------------
// Modules

mod type_meta;
mod type_registry;

// -----------------------------------------------------------------------------
// Exports

pub use type_meta::{TypeKind, TypeMeta};
pub use type_registry::{TypeRegistry, TypeRegistryArc};
