//! Ready-made [`StreamingReader`](crate::token::StreamingReader) and
//! [`StreamingWriter`](crate::token::StreamingWriter) implementations.
//!
//! - [`TokenTape`] is an in-memory token sequence, read by [`TapeReader`] and
//!   recorded by [`TapeWriter`]. It can hold streams no parser would produce.
//! - [`NodeReader`] walks a borrowed [`Node`](crate::node::Node) lazily;
//!   [`NodeWriter`] builds one.
//! - [`JsonWriter`] emits compact JSON text. With the `json` feature,
//!   [`from_json_str`] parses JSON text into a `Node` through `serde_json`.

// -----------------------------------------------------------------------------
// Modules

mod json;
mod node_reader;
mod node_writer;
mod tape;

// -----------------------------------------------------------------------------
// Exports

#[cfg(feature = "json")]
pub use json::from_json_str;
pub use json::JsonWriter;
pub use node_reader::NodeReader;
pub use node_writer::NodeWriter;
pub use tape::{TapeReader, TapeToken, TapeWriter, TokenTape};
