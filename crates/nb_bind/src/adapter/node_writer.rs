use alloc::string::String;
use alloc::vec::Vec;

use crate::BindError;
use crate::node::{JsonArray, JsonObject, Node, Number};
use crate::token::StreamingWriter;

// -----------------------------------------------------------------------------
// NodeWriter

enum Open {
    Object { object: JsonObject, name: Option<String> },
    Array(JsonArray),
}

/// Builds a [`Node`] from write calls.
///
/// # Examples
///
/// ```
/// use nb_bind::adapter::NodeWriter;
/// use nb_bind::token::StreamingWriter;
///
/// let mut writer = NodeWriter::new();
/// writer.start_object().unwrap();
/// writer.write_name("ok").unwrap();
/// writer.write_bool(true).unwrap();
/// writer.end_object().unwrap();
///
/// let node = writer.into_node().unwrap();
/// assert_eq!(node.get("ok").and_then(|v| v.as_bool()), Some(true));
/// ```
#[derive(Default)]
pub struct NodeWriter {
    stack: Vec<Open>,
    root: Option<Node>,
}

impl NodeWriter {
    #[inline]
    pub const fn new() -> Self {
        Self {
            stack: Vec::new(),
            root: None,
        }
    }

    /// Returns the finished node.
    ///
    /// Fails if a container is still open or nothing was written.
    pub fn into_node(self) -> Result<Node, BindError> {
        if !self.stack.is_empty() {
            return Err(BindError::Syntax("unclosed container".into()));
        }
        self.root
            .ok_or_else(|| BindError::Syntax("no value was written".into()))
    }

    fn put(&mut self, value: Node) -> Result<(), BindError> {
        match self.stack.last_mut() {
            None if self.root.is_none() => {
                self.root = Some(value);
                Ok(())
            }
            None => Err(BindError::Syntax("more than one root value".into())),
            Some(Open::Array(array)) => {
                array.push(value);
                Ok(())
            }
            Some(Open::Object { object, name }) => match name.take() {
                Some(key) => {
                    object.insert(key, value);
                    Ok(())
                }
                None => Err(BindError::Syntax("object value without a name".into())),
            },
        }
    }
}

impl StreamingWriter for NodeWriter {
    fn start_object(&mut self) -> Result<(), BindError> {
        self.stack.push(Open::Object {
            object: JsonObject::new(),
            name: None,
        });
        Ok(())
    }

    fn end_object(&mut self) -> Result<(), BindError> {
        match self.stack.pop() {
            Some(Open::Object { object, name: None }) => self.put(Node::Object(object)),
            _ => Err(BindError::Syntax("unbalanced end of object".into())),
        }
    }

    fn start_array(&mut self) -> Result<(), BindError> {
        self.stack.push(Open::Array(JsonArray::new()));
        Ok(())
    }

    fn end_array(&mut self) -> Result<(), BindError> {
        match self.stack.pop() {
            Some(Open::Array(array)) => self.put(Node::Array(array)),
            _ => Err(BindError::Syntax("unbalanced end of array".into())),
        }
    }

    fn write_name(&mut self, key: &str) -> Result<(), BindError> {
        match self.stack.last_mut() {
            Some(Open::Object { name: name @ None, .. }) => {
                *name = Some(String::from(key));
                Ok(())
            }
            _ => Err(BindError::Syntax("name outside of an object".into())),
        }
    }

    fn write_string(&mut self, value: &str) -> Result<(), BindError> {
        self.put(Node::from(value))
    }

    fn write_number(&mut self, value: Number) -> Result<(), BindError> {
        self.put(Node::Number(value))
    }

    fn write_bool(&mut self, value: bool) -> Result<(), BindError> {
        self.put(Node::Bool(value))
    }

    fn write_null(&mut self) -> Result<(), BindError> {
        self.put(Node::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::NodeWriter;
    use crate::BindError;
    use crate::node::Node;
    use crate::token::StreamingWriter;

    #[test]
    fn builds_nested_values() {
        let mut writer = NodeWriter::new();
        writer.start_array().unwrap();
        writer.write_number(1_u8.into()).unwrap();
        writer.start_object().unwrap();
        writer.write_name("k").unwrap();
        writer.write_null().unwrap();
        writer.end_object().unwrap();
        writer.end_array().unwrap();

        let node = writer.into_node().unwrap();
        let array = node.as_array().unwrap();
        assert_eq!(array.len(), 2);
        assert_eq!(array[1].get("k"), Some(&Node::Null));
    }

    #[test]
    fn rejects_malformed_sequences() {
        let mut writer = NodeWriter::new();
        writer.start_object().unwrap();
        assert!(matches!(writer.write_bool(true), Err(BindError::Syntax(_))));
        assert!(writer.end_array().is_err());

        let mut writer = NodeWriter::new();
        writer.start_array().unwrap();
        assert!(writer.into_node().is_err());
    }
}
