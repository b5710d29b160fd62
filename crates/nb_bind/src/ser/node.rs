use crate::BindError;
use crate::info::Typed;
use crate::node::{JsonArray, JsonObject, Node};
use crate::path::PathSegment;
use crate::token::StreamingWriter;

// -----------------------------------------------------------------------------
// Node encoding

/// Writes a node with the same separator discipline as the encoder.
///
/// # Examples
///
/// ```
/// use nb_bind::adapter::{JsonWriter, from_json_str};
/// use nb_bind::ser::write_node;
///
/// let node = from_json_str(r#"{"s1":"a","i2":2,"f3":[0.5,null]}"#).unwrap();
/// let mut writer = JsonWriter::new();
/// write_node(&mut writer, &node).unwrap();
/// assert_eq!(writer.as_str(), r#"{"s1":"a","i2":2,"f3":[0.5,null]}"#);
/// ```
#[inline]
pub fn write_node<W: StreamingWriter + ?Sized>(writer: &mut W, node: &Node) -> Result<(), BindError> {
    encode_node(writer, node, None)
}

pub(super) fn encode_node<W: StreamingWriter + ?Sized>(
    writer: &mut W,
    node: &Node,
    path: Option<&PathSegment<'_>>,
) -> Result<(), BindError> {
    match node {
        Node::Null => writer.write_null(),
        Node::Bool(v) => writer.write_bool(*v),
        Node::Number(v) => writer.write_number(*v),
        Node::String(v) => writer.write_string(v),
        Node::Object(object) => encode_object(writer, object, path),
        Node::Array(array) => encode_array(writer, array, path),
    }
}

pub(super) fn encode_object<W: StreamingWriter + ?Sized>(
    writer: &mut W,
    object: &JsonObject,
    path: Option<&PathSegment<'_>>,
) -> Result<(), BindError> {
    let owner = JsonObject::type_info().type_path();
    writer.start_object()?;
    for (index, (key, value)) in object.iter().enumerate() {
        if index > 0 {
            writer.write_object_comma()?;
        }
        writer.write_name(key)?;
        let child = PathSegment::with_name(path, owner, key);
        encode_node(writer, value, child.as_ref()).map_err(|err| err.at(child.as_ref()))?;
    }
    writer.end_object()
}

pub(super) fn encode_array<W: StreamingWriter + ?Sized>(
    writer: &mut W,
    array: &JsonArray,
    path: Option<&PathSegment<'_>>,
) -> Result<(), BindError> {
    let owner = JsonArray::type_info().type_path();
    writer.start_array()?;
    for (index, item) in array.iter().enumerate() {
        if index > 0 {
            writer.write_array_comma()?;
        }
        let child = PathSegment::with_index(path, owner, index);
        encode_node(writer, item, child.as_ref()).map_err(|err| err.at(child.as_ref()))?;
    }
    writer.end_array()
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::{encode_node, write_node};
    use crate::BindError;
    use crate::adapter::{TapeToken, TapeWriter};
    use crate::node::{JsonObject, Node, Number};
    use crate::path::PathSegment;

    #[test]
    fn commas_between_siblings_only() {
        let node = Node::from(vec![Node::from(1), Node::from(2)]);
        let mut writer = TapeWriter::new();
        write_node(&mut writer, &node).unwrap();
        assert_eq!(
            writer.tape().tokens(),
            [
                TapeToken::StartArray,
                TapeToken::Number(Number::PosInt(1)),
                TapeToken::ArrayComma,
                TapeToken::Number(Number::PosInt(2)),
                TapeToken::EndArray,
            ]
        );
    }

    #[test]
    fn nested_failure_has_path() {
        let mut inner = JsonObject::new();
        inner.insert("bad", f64::INFINITY);
        let node = Node::from(vec![Node::Null, Node::from(inner)]);

        let mut writer = crate::adapter::JsonWriter::new();
        let root = PathSegment::Root;
        let err = encode_node(&mut writer, &node, Some(&root)).unwrap_err();
        assert_eq!(err.path(), Some("$[1].bad"));
        assert!(matches!(err.root_cause(), BindError::InvalidValue { .. }));
    }
}
