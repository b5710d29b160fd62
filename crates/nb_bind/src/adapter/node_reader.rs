use alloc::string::String;
use alloc::vec::Vec;

use crate::BindError;
use crate::node::{Node, Number};
use crate::token::{StreamingReader, Token};

// -----------------------------------------------------------------------------
// NodeReader

#[derive(Debug, Clone, Copy)]
enum Cursor<'a> {
    Value(&'a Node),
    Name(&'a str, &'a Node),
    EndObject,
    EndArray,
    Done,
}

#[derive(Debug)]
enum Frame<'a> {
    Object { entries: &'a [(String, Node)], pos: usize },
    Array { items: &'a [Node], pos: usize },
}

/// Reads a borrowed [`Node`] as a token stream.
///
/// Nothing is copied up front: the reader keeps one frame per open container
/// and moves a cursor over the tree. Skipping a value is a single step
/// whatever its size.
///
/// # Examples
///
/// ```
/// use nb_bind::adapter::NodeReader;
/// use nb_bind::node::{JsonObject, Node};
/// use nb_bind::token::{StreamingReader, Token};
///
/// let mut object = JsonObject::new();
/// object.insert("big", vec![Node::from(1), Node::from(2)]);
/// object.insert("k", "v");
/// let node = Node::from(object);
///
/// let mut reader = NodeReader::new(&node);
/// reader.start_object().unwrap();
/// assert_eq!(reader.next_name().unwrap(), "big");
/// reader.next_skip().unwrap();
/// assert_eq!(reader.next_name().unwrap(), "k");
/// assert_eq!(reader.next_string().unwrap(), "v");
/// reader.end_object().unwrap();
/// assert_eq!(reader.peek().unwrap(), Token::EndOfStream);
/// ```
#[derive(Debug)]
pub struct NodeReader<'a> {
    cursor: Cursor<'a>,
    stack: Vec<Frame<'a>>,
}

impl<'a> NodeReader<'a> {
    #[inline]
    pub const fn new(node: &'a Node) -> Self {
        Self {
            cursor: Cursor::Value(node),
            stack: Vec::new(),
        }
    }

    /// Moves the cursor to whatever follows inside the innermost container.
    fn step(&mut self) {
        self.cursor = match self.stack.last_mut() {
            None => Cursor::Done,
            Some(Frame::Object { entries, pos }) => {
                let entries: &'a [(String, Node)] = *entries;
                match entries.get(*pos) {
                    Some((key, value)) => {
                        *pos += 1;
                        Cursor::Name(key, value)
                    }
                    None => Cursor::EndObject,
                }
            }
            Some(Frame::Array { items, pos }) => {
                let items: &'a [Node] = *items;
                match items.get(*pos) {
                    Some(item) => {
                        *pos += 1;
                        Cursor::Value(item)
                    }
                    None => Cursor::EndArray,
                }
            }
        };
    }

    #[inline]
    fn mismatch(&self, expected: Token) -> BindError {
        BindError::mismatch(expected.as_str(), self.token())
    }

    fn token(&self) -> Token {
        match self.cursor {
            Cursor::Value(node) => node.token(),
            Cursor::Name(..) => Token::Name,
            Cursor::EndObject => Token::EndObject,
            Cursor::EndArray => Token::EndArray,
            Cursor::Done => Token::EndOfStream,
        }
    }
}

impl StreamingReader for NodeReader<'_> {
    #[inline]
    fn peek(&mut self) -> Result<Token, BindError> {
        Ok(self.token())
    }

    fn start_object(&mut self) -> Result<(), BindError> {
        match self.cursor {
            Cursor::Value(Node::Object(object)) => {
                self.stack.push(Frame::Object {
                    entries: object.entries(),
                    pos: 0,
                });
                self.step();
                Ok(())
            }
            _ => Err(self.mismatch(Token::StartObject)),
        }
    }

    fn end_object(&mut self) -> Result<(), BindError> {
        match self.cursor {
            Cursor::EndObject => {
                self.stack.pop();
                self.step();
                Ok(())
            }
            _ => Err(self.mismatch(Token::EndObject)),
        }
    }

    fn start_array(&mut self) -> Result<(), BindError> {
        match self.cursor {
            Cursor::Value(Node::Array(array)) => {
                self.stack.push(Frame::Array {
                    items: array.as_slice(),
                    pos: 0,
                });
                self.step();
                Ok(())
            }
            _ => Err(self.mismatch(Token::StartArray)),
        }
    }

    fn end_array(&mut self) -> Result<(), BindError> {
        match self.cursor {
            Cursor::EndArray => {
                self.stack.pop();
                self.step();
                Ok(())
            }
            _ => Err(self.mismatch(Token::EndArray)),
        }
    }

    fn next_name(&mut self) -> Result<String, BindError> {
        match self.cursor {
            Cursor::Name(key, value) => {
                self.cursor = Cursor::Value(value);
                Ok(String::from(key))
            }
            _ => Err(self.mismatch(Token::Name)),
        }
    }

    fn next_string(&mut self) -> Result<String, BindError> {
        match self.cursor {
            Cursor::Value(Node::String(value)) => {
                let value = value.clone();
                self.step();
                Ok(value)
            }
            _ => Err(self.mismatch(Token::String)),
        }
    }

    fn next_number(&mut self) -> Result<Number, BindError> {
        match self.cursor {
            Cursor::Value(&Node::Number(value)) => {
                self.step();
                Ok(value)
            }
            _ => Err(self.mismatch(Token::Number)),
        }
    }

    fn next_bool(&mut self) -> Result<bool, BindError> {
        match self.cursor {
            Cursor::Value(&Node::Bool(value)) => {
                self.step();
                Ok(value)
            }
            _ => Err(self.mismatch(Token::Boolean)),
        }
    }

    fn next_null(&mut self) -> Result<(), BindError> {
        match self.cursor {
            Cursor::Value(Node::Null) => {
                self.step();
                Ok(())
            }
            _ => Err(self.mismatch(Token::Null)),
        }
    }

    fn next_skip(&mut self) -> Result<(), BindError> {
        match self.cursor {
            Cursor::Value(_) => {
                self.step();
                Ok(())
            }
            _ => Err(BindError::mismatch("a value", self.token())),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::NodeReader;
    use crate::BindError;
    use crate::node::{JsonObject, Node};
    use crate::token::{StreamingReader, Token};

    #[test]
    fn walks_nested_containers() {
        let mut inner = JsonObject::new();
        inner.insert("x", 1);
        let node = Node::from(vec![Node::from(inner), Node::Null]);

        let mut reader = NodeReader::new(&node);
        reader.start_array().unwrap();
        assert!(reader.has_next().unwrap());
        reader.start_object().unwrap();
        assert_eq!(reader.next_name().unwrap(), "x");
        assert_eq!(reader.next_u8().unwrap(), 1);
        assert!(!reader.has_next().unwrap());
        reader.end_object().unwrap();
        reader.next_null().unwrap();
        reader.end_array().unwrap();
        assert_eq!(reader.peek().unwrap(), Token::EndOfStream);
    }

    #[test]
    fn wrong_consumer_is_mismatch() {
        let node = Node::from("text");
        let mut reader = NodeReader::new(&node);
        let err = reader.start_object().unwrap_err();
        assert!(matches!(
            err,
            BindError::TokenMismatch { expected: "START_OBJECT", found: Token::String }
        ));
        assert_eq!(reader.next_string().unwrap(), "text");
    }

    #[test]
    fn name_must_come_before_value() {
        let mut object = JsonObject::new();
        object.insert("a", true);
        let node = Node::from(object);
        let mut reader = NodeReader::new(&node);
        reader.start_object().unwrap();
        assert!(reader.next_skip().is_err());
        assert_eq!(reader.peek().unwrap(), Token::Name);
    }
}
