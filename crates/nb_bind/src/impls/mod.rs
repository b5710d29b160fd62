//! Reflection for builtin types, and the macros user types go through.
//!
//! ## Implemented Menu
//!
//! - native:
//!     - `()`, `bool`, `char`
//!     - `i8`-`i64`, `u8`-`u64`, `isize`, `usize`, `f32`, `f64`
//!     - `[T; N]`
//! - alloc:
//!     - `String`, `Vec<T>`, `VecDeque<T>`, `Box<[T]>`
//!     - `BTreeMap<String, V>`, `BTreeSet<T>`
//! - core:
//!     - `Option<T>`, `core::time::Duration`
//! - std:
//!     - `HashMap<String, V, S>`, `HashSet<T, S>`
//!     - `PathBuf`, `IpAddr`, `SystemTime`
//! - nb_utils:
//!     - `hashbrown::HashMap<String, V, S>`, `hashbrown::HashSet<T, S>`
//! - node:
//!     - `Number`, `Node`, `JsonObject`, `JsonArray`
//!
//! `Duration`, `PathBuf`, `IpAddr` and `SystemTime` are opaque: they bind
//! only through the value codecs a default [`TypeRegistry`] registers.
//!
//! [`TypeRegistry`]: crate::registry::TypeRegistry

// -----------------------------------------------------------------------------
// Modules

mod alloc;
mod collections;
mod core;
mod macros;
mod native;
mod node;
mod std;
