// -----------------------------------------------------------------------------
// Modules

mod reflect;
mod reflect_ref;

// -----------------------------------------------------------------------------
// Exports

pub use reflect::Reflect;
pub use reflect_ref::{List, Map, ReflectRef, Set};
