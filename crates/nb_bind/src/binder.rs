use alloc::string::String;

use crate::adapter::{JsonWriter, NodeReader, NodeWriter};
use crate::codec::ValueCodec;
use crate::config::BindConfig;
use crate::de::DecodeDriver;
use crate::info::Typed;
use crate::node::Node;
use crate::registry::{TypeKind, TypeRegistry, TypeRegistryArc};
use crate::ser::EncodeDriver;
use crate::token::{StreamingReader, StreamingWriter};
use crate::{BindError, Reflect};

// -----------------------------------------------------------------------------
// Binder

/// Entry point bundling a shared registry with a configuration.
///
/// Cloning is cheap; clones share the registry.
///
/// # Examples
///
/// ```
/// use nb_bind::{BindConfig, Binder, BindError};
/// use nb_bind::node::Node;
///
/// let binder = Binder::new();
///
/// let node: Node = binder.from_json(r#"{"s1":"a","i2":2,"f3":3.5}"#).unwrap();
/// assert_eq!(binder.to_json(&node).unwrap(), r#"{"s1":"a","i2":2,"f3":3.5}"#);
///
/// let quiet = binder.clone().with_config(BindConfig::new().with_path_tracking(false));
/// let err = quiet.from_json::<Vec<u8>>("[1, 2, 300]").unwrap_err();
/// assert!(err.path().is_none());
/// assert!(matches!(err, BindError::InvalidValue { .. }));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Binder {
    registry: TypeRegistryArc,
    config: BindConfig,
}

impl Binder {
    /// A binder with the builtin codecs and the default configuration.
    #[inline]
    pub fn new() -> Self {
        Self::with_registry(TypeRegistry::new())
    }

    #[inline]
    pub fn with_registry(registry: TypeRegistry) -> Self {
        Self {
            registry: TypeRegistryArc::new(registry),
            config: BindConfig::new(),
        }
    }

    #[inline]
    pub fn with_config(mut self, config: BindConfig) -> Self {
        self.config = config;
        self
    }

    #[inline]
    pub const fn config(&self) -> &BindConfig {
        &self.config
    }

    #[inline]
    pub const fn registry(&self) -> &TypeRegistryArc {
        &self.registry
    }

    /// Registers `T` and its dependencies, returning its classification.
    pub fn register<T: Typed>(&self) -> TypeKind {
        self.registry.write().register::<T>().kind()
    }

    /// Registers or replaces the codec of `C::Value`.
    pub fn register_value_codec<C: ValueCodec>(&self, codec: C) {
        self.registry.write().register_value_codec(codec);
    }

    // -------------------------------------------------------------------------
    // Decode

    pub fn decode<T, R>(&self, reader: &mut R) -> Result<T, BindError>
    where
        T: Reflect + Typed,
        R: StreamingReader + ?Sized,
    {
        self.registry.ensure_registered::<T>();
        let registry = self.registry.read();
        DecodeDriver::new(&registry, self.config).decode(reader)
    }

    #[inline]
    pub fn from_node<T: Reflect + Typed>(&self, node: &Node) -> Result<T, BindError> {
        self.decode(&mut NodeReader::new(node))
    }

    /// Parses JSON text and decodes it into `T`.
    #[cfg(feature = "json")]
    pub fn from_json<T: Reflect + Typed>(&self, text: &str) -> Result<T, BindError> {
        let node = crate::adapter::from_json_str(text)?;
        self.from_node(&node)
    }

    // -------------------------------------------------------------------------
    // Encode

    pub fn encode<W: StreamingWriter + ?Sized>(
        &self,
        writer: &mut W,
        value: &dyn Reflect,
    ) -> Result<(), BindError> {
        let registry = self.registry.read();
        EncodeDriver::new(&registry, self.config).encode(writer, value)
    }

    pub fn to_node(&self, value: &dyn Reflect) -> Result<Node, BindError> {
        let mut writer = NodeWriter::new();
        self.encode(&mut writer, value)?;
        writer.into_node()
    }

    /// Encodes `value` as compact JSON text.
    pub fn to_json(&self, value: &dyn Reflect) -> Result<String, BindError> {
        let mut writer = JsonWriter::new();
        self.encode(&mut writer, value)?;
        Ok(writer.into_string())
    }
}

#[cfg(all(test, feature = "json"))]
mod tests {
    use alloc::collections::{BTreeMap, BTreeSet};
    use alloc::string::String;
    use alloc::vec::Vec;
    use core::time::Duration;
    use std::thread;

    use super::Binder;
    use crate::node::{JsonObject, Node, Number};
    use crate::registry::{TypeKind, TypeRegistry};
    use crate::test_model::{Baby, Family, Level, Person, Tagged};
    use crate::BindError;

    #[test]
    fn round_trip_nested_pojo() {
        let binder = Binder::new();
        let family = Family {
            surname: "Doe".into(),
            babies: Vec::from([
                Baby {
                    name: "A".into(),
                    age: 1,
                    level: Level::Low,
                },
                Baby {
                    name: "B".into(),
                    age: 2,
                    level: Level::High,
                },
            ]),
            tags: BTreeSet::from([String::from("x"), String::from("y")]),
            scores: BTreeMap::from([(String::from("math"), 90)]),
        };

        let json = binder.to_json(&family).unwrap();
        assert_eq!(binder.from_json::<Family>(&json).unwrap(), family);

        let node = binder.to_node(&family).unwrap();
        assert_eq!(binder.from_node::<Family>(&node).unwrap(), family);
    }

    #[test]
    fn node_keeps_key_order() {
        let binder = Binder::new();
        let text = r#"{"s1":"x","i2":2,"f3":3.5}"#;
        let node: JsonObject = binder.from_json(text).unwrap();
        let keys: Vec<&str> = node.keys().collect();
        assert_eq!(keys, ["s1", "i2", "f3"]);
        assert_eq!(binder.to_json(&node).unwrap(), text);
    }

    #[test]
    fn out_of_order_constructor() {
        let binder = Binder::new();
        let a: Person = binder.from_json(r#"{"age":30,"name":"Lily"}"#).unwrap();
        let b: Person = binder.from_json(r#"{"name":"Lily","age":30}"#).unwrap();
        assert_eq!(a, b);
        assert_eq!(binder.from_json::<Person>(&binder.to_json(&a).unwrap()).unwrap(), a);
    }

    #[test]
    fn alias_binds_argument() {
        let binder = Binder::new();
        for key in ["name", "user_name", "userName", "login"] {
            let text = alloc::format!(r#"{{"{key}":"Lily","age":1}}"#);
            let person: Person = binder.from_json(&text).unwrap();
            assert_eq!(person.name, "Lily");
        }
    }

    #[test]
    fn hybrid_round_trip() {
        let binder = Binder::new();
        let text = r#"{"name":"Bob","extra1":1,"extra2":2}"#;
        let tagged: Tagged = binder.from_json(text).unwrap();
        assert_eq!(tagged.name, "Bob");
        assert_eq!(tagged.extra.get("extra1"), Some(&Node::from(1)));
        assert_eq!(tagged.extra.len(), 2);
        assert_eq!(binder.to_json(&tagged).unwrap(), text);
    }

    #[test]
    fn skips_malformed_subtree_under_unknown_key() {
        let binder = Binder::new();
        // Every value below `junk` would fail if it were decoded as `Family`.
        let text = r#"{"junk":{"babies":[{"age":"x"}],"surname":[1]},"surname":"Doe"}"#;
        let family: Family = binder.from_json(text).unwrap();
        assert_eq!(family.surname, "Doe");
        assert!(family.babies.is_empty());
    }

    #[test]
    fn path_rendering() {
        let binder = Binder::new();
        let text = r#"{"a":{"b":[0,1,"two"]}}"#;
        let err = binder
            .from_json::<BTreeMap<String, BTreeMap<String, Vec<i32>>>>(text)
            .unwrap_err();
        assert_eq!(err.path(), Some("$.a.b[2]"));
        assert!(alloc::string::ToString::to_string(&err).starts_with("binding failed at $.a.b[2]"));
    }

    #[test]
    fn numeric_literal_into_node() {
        let binder = Binder::new();
        let node: Node = binder.from_json("9999999").unwrap();
        assert_eq!(node, Node::Number(Number::PosInt(9999999)));
        let node: Node = binder.from_json("-9999999.0").unwrap();
        assert_eq!(node, Node::Number(Number::Float(-9999999.0)));
    }

    #[test]
    fn out_of_range_float_is_rejected() {
        let binder = Binder::new();
        let err = binder.from_json::<i64>("9223372036854775808.0").unwrap_err();
        assert!(matches!(err.root_cause(), BindError::InvalidValue { .. }));
        let err = binder.from_json::<u64>("1.8446744073709551616e19").unwrap_err();
        assert!(matches!(err.root_cause(), BindError::InvalidValue { .. }));
        assert_eq!(binder.from_json::<i64>("-9.2e18").unwrap(), -9_200_000_000_000_000_000);
    }

    #[test]
    fn null_handling() {
        let binder = Binder::new();
        assert_eq!(binder.from_json::<Option<u8>>("null").unwrap(), None);
        let err = binder.from_json::<u8>("null").unwrap_err();
        assert!(matches!(err.root_cause(), BindError::TypeError { .. }));
        assert_eq!(
            binder.from_json::<Vec<Option<Level>>>(r#"["HIGH",null]"#).unwrap(),
            [Some(Level::High), None]
        );
    }

    #[test]
    fn enum_mismatch() {
        let err = Binder::new().from_json::<Level>(r#""MID""#).unwrap_err();
        assert!(matches!(
            err.root_cause(),
            BindError::EnumMismatch { value, .. } if value == "MID"
        ));
    }

    #[test]
    fn builtin_codecs() {
        let binder = Binder::new();
        let value: Duration = binder.from_json(r#""PT1H30M""#).unwrap();
        assert_eq!(value, Duration::from_secs(5400));
        assert_eq!(binder.to_json(&value).unwrap(), r#""PT1H30M""#);

        let err = binder.from_json::<Duration>("12").unwrap_err();
        assert!(matches!(err.root_cause(), BindError::TokenMismatch { .. }));

        let empty = Binder::with_registry(TypeRegistry::empty());
        let err = empty.from_json::<Duration>(r#""PT1S""#).unwrap_err();
        assert!(matches!(err.root_cause(), BindError::TypeError { .. }));
    }

    #[test]
    fn register_reports_kind() {
        let binder = Binder::new();
        assert_eq!(binder.register::<Tagged>(), TypeKind::Hybrid);
        assert_eq!(binder.register::<Person>(), TypeKind::Pojo);
        assert_eq!(binder.register::<Node>(), TypeKind::Dynamic);
    }

    #[test]
    fn concurrent_first_use() {
        let binder = Binder::with_registry(TypeRegistry::empty());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let binder = binder.clone();
                thread::spawn(move || {
                    let text = alloc::format!(r#"{{"surname":"S{i}","babies":[{{"name":"b"}}]}}"#);
                    binder.from_json::<Family>(&text).map(|f| f.surname)
                })
            })
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap().unwrap().starts_with('S'));
        }
        assert_eq!(binder.register::<Family>(), TypeKind::Pojo);
    }
}
