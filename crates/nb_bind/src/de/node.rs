use alloc::boxed::Box;

use super::DecodeDriver;
use crate::info::{DynamicInfo, DynamicKind, Typed};
use crate::node::{JsonArray, JsonObject, Node};
use crate::path::PathSegment;
use crate::token::{StreamingReader, Token};
use crate::{BindError, Reflect};

impl DecodeDriver<'_> {
    /// Decodes into `Node`, `JsonObject` or `JsonArray`.
    pub(super) fn decode_dynamic<R: StreamingReader + ?Sized>(
        &self,
        reader: &mut R,
        info: &DynamicInfo,
        path: Option<&PathSegment<'_>>,
    ) -> Result<Box<dyn Reflect>, BindError> {
        Ok(match info.kind() {
            DynamicKind::Any => Box::new(self.decode_node(reader, path)?),
            DynamicKind::Object => Box::new(self.decode_object(reader, path)?),
            DynamicKind::Array => Box::new(self.decode_array(reader, path)?),
        })
    }

    /// Decodes whatever value comes next.
    pub(super) fn decode_node<R: StreamingReader + ?Sized>(
        &self,
        reader: &mut R,
        path: Option<&PathSegment<'_>>,
    ) -> Result<Node, BindError> {
        match reader.peek()? {
            Token::StartObject => self.decode_object(reader, path).map(Node::Object),
            Token::StartArray => self.decode_array(reader, path).map(Node::Array),
            Token::String => reader.next_string().map(Node::String),
            Token::Number => reader.next_number().map(Node::Number),
            Token::Boolean => reader.next_bool().map(Node::Bool),
            Token::Null => reader.next_null().map(|()| Node::Null),
            found => Err(BindError::mismatch("a value", found)),
        }
    }

    /// Decodes an object, keeping keys in arrival order.
    pub(super) fn decode_object<R: StreamingReader + ?Sized>(
        &self,
        reader: &mut R,
        path: Option<&PathSegment<'_>>,
    ) -> Result<JsonObject, BindError> {
        let owner = JsonObject::type_info().type_path();
        reader.start_object()?;
        let mut object = JsonObject::new();
        while reader.has_next()? {
            let key = reader.next_name()?;
            let child = PathSegment::with_name(path, owner, &key);
            let value = self
                .decode_node(reader, child.as_ref())
                .map_err(|err| err.at(child.as_ref()))?;
            object.insert(key, value);
        }
        reader.end_object()?;
        Ok(object)
    }

    pub(super) fn decode_array<R: StreamingReader + ?Sized>(
        &self,
        reader: &mut R,
        path: Option<&PathSegment<'_>>,
    ) -> Result<JsonArray, BindError> {
        let owner = JsonArray::type_info().type_path();
        reader.start_array()?;
        let mut array = JsonArray::new();
        while reader.has_next()? {
            let child = PathSegment::with_index(path, owner, array.len());
            let value = self
                .decode_node(reader, child.as_ref())
                .map_err(|err| err.at(child.as_ref()))?;
            array.push(value);
        }
        reader.end_array()?;
        Ok(array)
    }
}

#[cfg(test)]
mod tests {
    use crate::adapter::{TapeReader, TokenTape};
    use crate::de::DecodeDriver;
    use crate::node::{JsonObject, Node, Number};
    use crate::registry::TypeRegistry;
    use crate::token::Token;
    use crate::{BindConfig, BindError};

    #[test]
    fn object_keeps_arrival_order() {
        let tape = TokenTape::new()
            .start_object()
            .name("s1")
            .string("a")
            .name("i2")
            .number(2)
            .name("f3")
            .number(3.5)
            .end_object();
        let registry = TypeRegistry::new();
        let driver = DecodeDriver::new(&registry, BindConfig::new());
        let object: JsonObject = driver.decode(&mut TapeReader::new(&tape)).unwrap();

        let keys: alloc::vec::Vec<&str> = object.keys().collect();
        assert_eq!(keys, ["s1", "i2", "f3"]);
        assert_eq!(object["i2"], Node::Number(Number::PosInt(2)));
    }

    #[test]
    fn nested_node_error_has_path() {
        let tape = TokenTape::new()
            .start_object()
            .name("a")
            .start_array()
            .unknown()
            .end_array()
            .end_object();
        let registry = TypeRegistry::new();
        let driver = DecodeDriver::new(&registry, BindConfig::new());
        let err = driver.decode::<Node, _>(&mut TapeReader::new(&tape)).unwrap_err();
        assert_eq!(err.path(), Some("$.a[0]"));
        assert!(matches!(
            err.root_cause(),
            BindError::TokenMismatch { found: Token::Unknown, .. }
        ));
    }

    #[test]
    fn object_target_rejects_array() {
        let tape = TokenTape::new().start_array().end_array();
        let registry = TypeRegistry::new();
        let driver = DecodeDriver::new(&registry, BindConfig::new().with_path_tracking(false));
        let err = driver
            .decode::<JsonObject, _>(&mut TapeReader::new(&tape))
            .unwrap_err();
        assert!(err.path().is_none());
        assert!(matches!(err, BindError::TokenMismatch { expected: "START_OBJECT", .. }));
    }
}
