//! Paths used by exported macros, kept stable for `$crate` expansion.

pub use alloc::boxed::Box;
pub use core::option::Option;
