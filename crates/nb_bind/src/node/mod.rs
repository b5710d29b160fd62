//! The dynamic node model.
//!
//! [`Node`] is the `Any` target of the decoder: whatever arrives is kept,
//! with object keys in arrival order. [`JsonObject`] also backs the side
//! map of hybrid POJOs.

// -----------------------------------------------------------------------------
// Modules

mod array;
mod number;
mod object;
mod serde;

// -----------------------------------------------------------------------------
// Exports

pub use array::JsonArray;
pub use number::Number;
pub use object::{Iter, JsonObject};

// -----------------------------------------------------------------------------
// Node

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::token::Token;

/// A dynamically typed value.
///
/// # Examples
///
/// ```
/// use nb_bind::node::{JsonObject, Node};
///
/// let mut obj = JsonObject::new();
/// obj.insert("name", "Bob");
/// obj.insert("tags", vec![Node::from(1), Node::Null]);
/// let node = Node::from(obj);
///
/// assert_eq!(node.get("name").and_then(Node::as_str), Some("Bob"));
/// assert_eq!(node.to_string(), r#"{"name":"Bob","tags":[1,null]}"#);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Node {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Object(JsonObject),
    Array(JsonArray),
}

impl Node {
    /// The token a reader positioned on this node would report.
    #[inline]
    pub const fn token(&self) -> Token {
        match self {
            Self::Null => Token::Null,
            Self::Bool(_) => Token::Boolean,
            Self::Number(_) => Token::Number,
            Self::String(_) => Token::String,
            Self::Object(_) => Token::StartObject,
            Self::Array(_) => Token::StartArray,
        }
    }

    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[inline]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_number(&self) -> Option<&Number> {
        match self {
            Self::Number(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_i64(&self) -> Option<i64> {
        self.as_number().and_then(Number::as_i64)
    }

    #[inline]
    pub fn as_u64(&self) -> Option<u64> {
        self.as_number().and_then(Number::as_u64)
    }

    #[inline]
    pub fn as_f64(&self) -> Option<f64> {
        self.as_number().and_then(Number::as_f64)
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v.as_str()),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_object(&self) -> Option<&JsonObject> {
        match self {
            Self::Object(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_object_mut(&mut self) -> Option<&mut JsonObject> {
        match self {
            Self::Object(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_array(&self) -> Option<&JsonArray> {
        match self {
            Self::Array(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_array_mut(&mut self) -> Option<&mut JsonArray> {
        match self {
            Self::Array(v) => Some(v),
            _ => None,
        }
    }

    /// Looks up `key` if this is an object.
    #[inline]
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.as_object().and_then(|obj| obj.get(key))
    }

    /// Looks up `index` if this is an array.
    #[inline]
    pub fn get_index(&self, index: usize) -> Option<&Node> {
        self.as_array().and_then(|arr| arr.get(index))
    }

    /// Replaces `self` with `Null`, returning the old value.
    #[inline]
    pub fn take(&mut self) -> Node {
        core::mem::take(self)
    }
}

impl fmt::Display for Node {
    /// Compact JSON text.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut writer = crate::adapter::JsonWriter::new();
        crate::ser::write_node(&mut writer, self).map_err(|_| fmt::Error)?;
        f.write_str(writer.as_str())
    }
}

// -----------------------------------------------------------------------------
// Conversions

impl From<bool> for Node {
    #[inline]
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Number> for Node {
    #[inline]
    fn from(value: Number) -> Self {
        Self::Number(value)
    }
}

macro_rules! from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Node {
                #[inline]
                fn from(value: $ty) -> Self {
                    Self::Number(Number::from(value))
                }
            }
        )*
    };
}

from_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl From<String> for Node {
    #[inline]
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for Node {
    #[inline]
    fn from(value: &str) -> Self {
        Self::String(String::from(value))
    }
}

impl From<JsonObject> for Node {
    #[inline]
    fn from(value: JsonObject) -> Self {
        Self::Object(value)
    }
}

impl From<JsonArray> for Node {
    #[inline]
    fn from(value: JsonArray) -> Self {
        Self::Array(value)
    }
}

impl From<Vec<Node>> for Node {
    #[inline]
    fn from(value: Vec<Node>) -> Self {
        Self::Array(JsonArray::from(value))
    }
}

impl<T: Into<Node>> From<Option<T>> for Node {
    #[inline]
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => Self::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;
    use alloc::vec;

    use super::{JsonObject, Node, Number};
    use crate::token::Token;

    #[test]
    fn accessors_follow_variant() {
        let node = Node::from(vec![Node::from(1), Node::from("x")]);
        assert_eq!(node.token(), Token::StartArray);
        assert_eq!(node.get_index(0).and_then(Node::as_i64), Some(1));
        assert_eq!(node.get_index(1).and_then(Node::as_str), Some("x"));
        assert!(node.get("x").is_none());
        assert_eq!(Node::from(None::<i32>), Node::Null);
        assert_eq!(Node::from(-2).as_number(), Some(&Number::NegInt(-2)));
    }

    #[test]
    fn displays_compact_json() {
        let mut obj = JsonObject::new();
        obj.insert("q", "say \"hi\"\n");
        obj.insert("n", Node::Null);
        obj.insert("f", 0.5);
        assert_eq!(
            Node::from(obj).to_string(),
            r#"{"q":"say \"hi\"\n","n":null,"f":0.5}"#
        );
    }
}
