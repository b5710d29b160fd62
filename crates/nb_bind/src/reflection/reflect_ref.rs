use alloc::boxed::Box;

use crate::Reflect;
use crate::node::{JsonArray, JsonObject, Node, Number};

// -----------------------------------------------------------------------------
// Container traits

/// An ordered sequence: `Vec`, `VecDeque`, boxed slices and arrays.
pub trait List: Reflect {
    fn len(&self) -> usize;

    fn get(&self, index: usize) -> Option<&dyn Reflect>;

    /// Iterates elements in order.
    fn iter(&self) -> Box<dyn Iterator<Item = &dyn Reflect> + '_>;
}

/// A set; iteration order is the container's own.
pub trait Set: Reflect {
    fn len(&self) -> usize;

    fn iter(&self) -> Box<dyn Iterator<Item = &dyn Reflect> + '_>;
}

/// A map with string keys.
pub trait Map: Reflect {
    fn len(&self) -> usize;

    fn get(&self, key: &str) -> Option<&dyn Reflect>;

    /// Iterates entries in the container's own order.
    fn iter(&self) -> Box<dyn Iterator<Item = (&str, &dyn Reflect)> + '_>;
}

// -----------------------------------------------------------------------------
// ReflectRef

/// The shape of a value, as seen by the encoder.
///
/// One classification step per value followed by an exhaustive match keeps
/// the encode traversal reviewable.
#[derive(Clone, Copy)]
pub enum ReflectRef<'a> {
    Null,
    Bool(bool),
    Number(Number),
    Str(&'a str),
    Char(char),
    /// A unit variant, written by name.
    Enum(&'static str),
    Optional(Option<&'a dyn Reflect>),
    List(&'a dyn List),
    Set(&'a dyn Set),
    Map(&'a dyn Map),
    Node(&'a Node),
    Object(&'a JsonObject),
    Array(&'a JsonArray),
    /// A value described by a [`PojoInfo`](crate::info::PojoInfo).
    Pojo(&'a dyn Reflect),
    /// A value that can only be encoded through a value codec.
    Opaque(&'a dyn Reflect),
}

impl ReflectRef<'_> {
    /// A short name of the shape, for diagnostics.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Number(_) => "number",
            Self::Str(_) => "string",
            Self::Char(_) => "char",
            Self::Enum(_) => "enum",
            Self::Optional(_) => "optional",
            Self::List(_) => "list",
            Self::Set(_) => "set",
            Self::Map(_) => "map",
            Self::Node(_) => "node",
            Self::Object(_) => "object",
            Self::Array(_) => "array",
            Self::Pojo(_) => "pojo",
            Self::Opaque(_) => "opaque",
        }
    }
}
