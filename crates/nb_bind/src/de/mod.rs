//! The decode engine: token stream + target type → value.
//!
//! [`DecodeDriver`] dispatches on the registry classification of the target
//! and on the current token:
//!
//! - dynamic nodes take whatever value arrives;
//! - types with a value codec read the codec's wire shape and convert it;
//! - scalars are read with the narrowest extractor of the target;
//! - sequences, sets and maps recurse per element;
//! - POJOs run the field/constructor protocol in [`pojo`].
//!
//! Every error leaving a nested step is tagged with that step's location
//! once, if path tracking is enabled.

// -----------------------------------------------------------------------------
// Modules

mod container;
mod driver;
mod node;
mod pojo;

// -----------------------------------------------------------------------------
// Exports

pub use driver::DecodeDriver;
