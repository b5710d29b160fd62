use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use serde_core::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde_core::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::node::{JsonArray, JsonObject, Node, Number};

// -----------------------------------------------------------------------------
// Serialize

impl Serialize for Number {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            Number::PosInt(v) => serializer.serialize_u64(v),
            Number::NegInt(v) => serializer.serialize_i64(v),
            Number::Float(v) => serializer.serialize_f64(v),
        }
    }
}

impl Serialize for JsonObject {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl Serialize for JsonArray {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for item in self {
            seq.serialize_element(item)?;
        }
        seq.end()
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Node::Null => serializer.serialize_unit(),
            Node::Bool(v) => serializer.serialize_bool(*v),
            Node::Number(v) => v.serialize(serializer),
            Node::String(v) => serializer.serialize_str(v),
            Node::Object(v) => v.serialize(serializer),
            Node::Array(v) => v.serialize(serializer),
        }
    }
}

// -----------------------------------------------------------------------------
// Deserialize

struct NodeVisitor;

impl<'de> Visitor<'de> for NodeVisitor {
    type Value = Node;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any JSON-like value")
    }

    #[inline]
    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Node, E> {
        Ok(Node::Bool(v))
    }

    #[inline]
    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Node, E> {
        Ok(Node::from(v))
    }

    #[inline]
    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Node, E> {
        Ok(Node::from(v))
    }

    #[inline]
    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Node, E> {
        Ok(Node::from(v))
    }

    #[inline]
    fn visit_str<E: de::Error>(self, v: &str) -> Result<Node, E> {
        Ok(Node::from(v))
    }

    #[inline]
    fn visit_string<E: de::Error>(self, v: String) -> Result<Node, E> {
        Ok(Node::String(v))
    }

    #[inline]
    fn visit_unit<E: de::Error>(self) -> Result<Node, E> {
        Ok(Node::Null)
    }

    #[inline]
    fn visit_none<E: de::Error>(self) -> Result<Node, E> {
        Ok(Node::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Node, D::Error> {
        Node::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Node, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0).min(4096));
        while let Some(item) = seq.next_element::<Node>()? {
            items.push(item);
        }
        Ok(Node::from(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Node, A::Error> {
        let mut obj = JsonObject::with_capacity(map.size_hint().unwrap_or(0).min(4096));
        while let Some((key, value)) = map.next_entry::<String, Node>()? {
            obj.insert(key, value);
        }
        Ok(Node::Object(obj))
    }
}

impl<'de> Deserialize<'de> for Node {
    #[inline]
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(NodeVisitor)
    }
}

impl<'de> Deserialize<'de> for JsonObject {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Node::deserialize(deserializer)? {
            Node::Object(obj) => Ok(obj),
            other => Err(de::Error::invalid_type(unexpected(&other), &"an object")),
        }
    }
}

impl<'de> Deserialize<'de> for JsonArray {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Node::deserialize(deserializer)? {
            Node::Array(arr) => Ok(arr),
            other => Err(de::Error::invalid_type(unexpected(&other), &"an array")),
        }
    }
}

fn unexpected(node: &Node) -> de::Unexpected<'_> {
    match node {
        Node::Null => de::Unexpected::Unit,
        Node::Bool(v) => de::Unexpected::Bool(*v),
        Node::Number(Number::PosInt(v)) => de::Unexpected::Unsigned(*v),
        Node::Number(Number::NegInt(v)) => de::Unexpected::Signed(*v),
        Node::Number(Number::Float(v)) => de::Unexpected::Float(*v),
        Node::String(v) => de::Unexpected::Str(v),
        Node::Object(_) => de::Unexpected::Map,
        Node::Array(_) => de::Unexpected::Seq,
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use crate::node::{JsonObject, Node, Number};

    #[test]
    fn deserialize_keeps_key_order() {
        let node: Node = serde_json::from_str(r#"{"s1":"a","i2":2,"f3":3.5}"#).unwrap();
        let keys: Vec<&str> = node.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["s1", "i2", "f3"]);
        assert_eq!(node.get("i2"), Some(&Node::Number(Number::PosInt(2))));
    }

    #[test]
    fn serialize_matches_json() {
        let obj: JsonObject = [("b", Node::from(-1)), ("a", Node::Null)].into_iter().collect();
        let text = serde_json::to_string(&obj).unwrap();
        assert_eq!(text, r#"{"b":-1,"a":null}"#);
    }

    #[test]
    fn object_rejects_other_shapes() {
        assert!(serde_json::from_str::<JsonObject>("[1]").is_err());
    }
}
