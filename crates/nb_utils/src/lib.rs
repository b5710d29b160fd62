//! Small shared building blocks for the `nodebind` crates.
//!
//! - [`hash`]: deterministic hash states and the hash containers built on them.
//! - [`TypeIdMap`]: a map keyed by [`TypeId`](core::any::TypeId), used by
//!   type registries and per-type caches.
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// No STD Support

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod typeid_map;

pub mod hash;

// -----------------------------------------------------------------------------
// Top-level exports

pub use typeid_map::TypeIdMap;
