//! Reflection-driven binding between token streams and Rust values.
//!
//! A tokenizer adapter implements [`StreamingReader`](token::StreamingReader) or
//! [`StreamingWriter`](token::StreamingWriter). The [`DecodeDriver`](de::DecodeDriver)
//! and [`EncodeDriver`](ser::EncodeDriver) walk the stream against the
//! [`TypeInfo`](info::TypeInfo) of the target type, cached once per type and
//! classified by the [`TypeRegistry`](registry::TypeRegistry).
//!
//! Targets can be:
//!
//! - scalars, enums and `Option`s;
//! - ordered lists, sets, fixed arrays and string-keyed maps;
//! - the dynamic [`Node`](node::Node) model, which preserves key order;
//! - POJOs, i.e. structs described by a [`PojoInfo`](info::PojoInfo), including
//!   constructor-only structs whose arguments may arrive in any order, and
//!   hybrid structs which capture unknown keys into a side map;
//! - any type with a registered [`ValueCodec`](codec::ValueCodec).
//!
//! # Example
//!
//! ```
//! use nb_bind::{Binder, impl_reflect_pojo};
//! use nb_bind::info::{CreatorInfo, ArgInfo, FieldInfo, PojoInfo};
//!
//! #[derive(Debug, PartialEq)]
//! struct User {
//!     name: String,
//!     age: u32,
//! }
//!
//! impl_reflect_pojo!(User => PojoInfo::builder::<User>()
//!     .creator(CreatorInfo::with_args::<User>(
//!         vec![ArgInfo::new::<String>("name"), ArgInfo::new::<u32>("age")],
//!         |args| Ok(User { name: args.require(0)?, age: args.require(1)? }),
//!     ))
//!     .field(FieldInfo::new::<User, String>("name", |u| &u.name))
//!     .field(FieldInfo::new::<User, u32>("age", |u| &u.age))
//!     .build());
//!
//! let binder = Binder::new();
//! let user: User = binder.from_json(r#"{"age":30,"name":"Lily"}"#).unwrap();
//! assert_eq!(user, User { name: "Lily".into(), age: 30 });
//! assert_eq!(binder.to_json(&user).unwrap(), r#"{"name":"Lily","age":30}"#);
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// Extern Self

// Exported macros expand to `$crate` paths, but doc tests refer to `nb_bind`.
extern crate self as nb_bind;

// -----------------------------------------------------------------------------
// no_std support

extern crate alloc;
extern crate std;

// -----------------------------------------------------------------------------
// Modules

mod binder;
mod cfg;
mod config;
mod error;
mod impls;
mod reflection;

pub mod adapter;
pub mod codec;
pub mod de;
pub mod info;
pub mod node;
pub mod path;
pub mod registry;
pub mod ser;
pub mod token;

#[cfg(test)]
mod test_model;

// -----------------------------------------------------------------------------
// Top-Level exports

#[doc(hidden)]
pub mod __macro_exports;

pub use binder::Binder;
pub use config::{BindConfig, UnknownKeys};
pub use error::BindError;
pub use reflection::{List, Map, Reflect, ReflectRef, Set};
