//! The encode engine: value → token stream.
//!
//! [`EncodeDriver`] classifies each value once through
//! [`Reflect::reflect_ref`](crate::Reflect::reflect_ref) and matches on the
//! shape. A registered value codec takes precedence: the value is converted
//! to its wire [`Node`](crate::node::Node) and only that is written.
//!
//! Separators are the driver's job. It calls `write_object_comma` or
//! `write_array_comma` before every sibling but the first.

// -----------------------------------------------------------------------------
// Modules

mod driver;
mod node;

// -----------------------------------------------------------------------------
// Exports

pub use driver::EncodeDriver;
pub use node::write_node;
