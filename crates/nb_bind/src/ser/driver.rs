use crate::config::BindConfig;
use crate::info::{PojoInfo, TypeInfo};
use crate::path::PathSegment;
use crate::registry::TypeRegistry;
use crate::token::StreamingWriter;
use crate::{BindError, Reflect, ReflectRef};

use super::node::{encode_array, encode_node, encode_object};

// -----------------------------------------------------------------------------
// EncodeDriver

/// Encodes values into a [`StreamingWriter`].
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
///
/// use nb_bind::BindConfig;
/// use nb_bind::adapter::JsonWriter;
/// use nb_bind::registry::TypeRegistry;
/// use nb_bind::ser::EncodeDriver;
///
/// let value = BTreeMap::from([("a".to_string(), vec![Some(1), None])]);
///
/// let registry = TypeRegistry::new();
/// let mut writer = JsonWriter::new();
/// EncodeDriver::new(&registry, BindConfig::new())
///     .encode(&mut writer, &value)
///     .unwrap();
///
/// assert_eq!(writer.as_str(), r#"{"a":[1,null]}"#);
/// ```
#[derive(Clone, Copy)]
pub struct EncodeDriver<'a> {
    registry: &'a TypeRegistry,
    config: BindConfig,
}

impl<'a> EncodeDriver<'a> {
    #[inline]
    pub const fn new(registry: &'a TypeRegistry, config: BindConfig) -> Self {
        Self { registry, config }
    }

    #[inline]
    pub const fn config(&self) -> &BindConfig {
        &self.config
    }

    /// Encodes one value.
    pub fn encode<W: StreamingWriter + ?Sized>(
        &self,
        writer: &mut W,
        value: &dyn Reflect,
    ) -> Result<(), BindError> {
        let root = PathSegment::root(self.config.path_tracking);
        self.encode_value(writer, value, root.as_ref())
    }

    /// Encodes one value at location `path`.
    ///
    /// Errors are tagged with `path` unless they already carry a location.
    #[inline]
    pub fn encode_value<W: StreamingWriter + ?Sized>(
        &self,
        writer: &mut W,
        value: &dyn Reflect,
        path: Option<&PathSegment<'_>>,
    ) -> Result<(), BindError> {
        self.encode_inner(writer, value, path)
            .map_err(|err| err.at(path))
    }

    fn encode_inner<W: StreamingWriter + ?Sized>(
        &self,
        writer: &mut W,
        value: &dyn Reflect,
        path: Option<&PathSegment<'_>>,
    ) -> Result<(), BindError> {
        let info = value.reflect_type_info();
        if !matches!(info, TypeInfo::Dynamic(_))
            && let Some(codec) = self.registry.value_codec(info.type_id())
        {
            let wire = codec.encode(value)?;
            return encode_node(writer, &wire, path);
        }

        let owner = info.type_path();
        match value.reflect_ref() {
            ReflectRef::Null => writer.write_null(),
            ReflectRef::Bool(v) => writer.write_bool(v),
            ReflectRef::Number(v) => writer.write_number(v),
            ReflectRef::Str(v) => writer.write_string(v),
            ReflectRef::Char(v) => writer.write_string(v.encode_utf8(&mut [0; 4])),
            ReflectRef::Enum(name) => writer.write_string(name),
            ReflectRef::Optional(None) => writer.write_null(),
            ReflectRef::Optional(Some(inner)) => self.encode_inner(writer, inner, path),
            ReflectRef::List(list) => {
                writer.start_array()?;
                for (index, item) in list.iter().enumerate() {
                    if index > 0 {
                        writer.write_array_comma()?;
                    }
                    let child = PathSegment::with_index(path, owner, index);
                    self.encode_value(writer, item, child.as_ref())?;
                }
                writer.end_array()
            }
            ReflectRef::Set(set) => {
                writer.start_array()?;
                for (index, item) in set.iter().enumerate() {
                    if index > 0 {
                        writer.write_array_comma()?;
                    }
                    let child = PathSegment::with_index(path, owner, index);
                    self.encode_value(writer, item, child.as_ref())?;
                }
                writer.end_array()
            }
            ReflectRef::Map(map) => {
                writer.start_object()?;
                for (index, (key, item)) in map.iter().enumerate() {
                    if index > 0 {
                        writer.write_object_comma()?;
                    }
                    writer.write_name(key)?;
                    let child = PathSegment::with_name(path, owner, key);
                    self.encode_value(writer, item, child.as_ref())?;
                }
                writer.end_object()
            }
            ReflectRef::Node(node) => encode_node(writer, node, path),
            ReflectRef::Object(object) => encode_object(writer, object, path),
            ReflectRef::Array(array) => encode_array(writer, array, path),
            ReflectRef::Pojo(pojo) => self.encode_pojo(writer, pojo, info.as_pojo()?, path),
            ReflectRef::Opaque(_) => Err(BindError::UnsupportedType { type_path: owner }),
        }
    }

    /// Writes declared fields in declaration order, then side map entries in
    /// arrival order. Side map keys shadowed by a field are left out.
    fn encode_pojo<W: StreamingWriter + ?Sized>(
        &self,
        writer: &mut W,
        value: &dyn Reflect,
        pojo: &PojoInfo,
        path: Option<&PathSegment<'_>>,
    ) -> Result<(), BindError> {
        let owner = pojo.type_path();
        writer.start_object()?;

        let mut first = true;
        for field in pojo.fields() {
            let item = field.get(value).ok_or_else(|| {
                BindError::type_error(owner, "field owner has another type")
            })?;
            if !first {
                writer.write_object_comma()?;
            }
            first = false;
            writer.write_name(field.name())?;
            let child = PathSegment::with_name(path, owner, field.name());
            self.encode_value(writer, item, child.as_ref())?;
        }

        let side_map = pojo.hybrid().and_then(|hybrid| hybrid.side_map(value));
        for (key, item) in side_map.into_iter().flatten() {
            if pojo.field_index(key).is_some() {
                continue;
            }
            if !first {
                writer.write_object_comma()?;
            }
            first = false;
            writer.write_name(key)?;
            let child = PathSegment::with_name(path, owner, key);
            encode_node(writer, item, child.as_ref()).map_err(|err| err.at(child.as_ref()))?;
        }

        writer.end_object()
    }
}

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeSet;
    use alloc::string::String;
    use alloc::vec;
    use core::time::Duration;
    use std::path::PathBuf;

    use super::EncodeDriver;
    use crate::adapter::{JsonWriter, TapeToken, TapeWriter};
    use crate::node::Number;
    use crate::registry::TypeRegistry;
    use crate::test_model::{Baby, Family, Level, Person, Tagged};
    use crate::{BindConfig, BindError, Reflect};

    fn to_json(registry: &TypeRegistry, value: &dyn Reflect) -> Result<String, BindError> {
        let mut writer = JsonWriter::new();
        EncodeDriver::new(registry, BindConfig::new()).encode(&mut writer, value)?;
        Ok(writer.into_string())
    }

    #[test]
    fn pojo_fields_in_declaration_order() {
        let person = Person {
            name: "Lily".into(),
            age: 30,
            nick: None,
        };
        let json = to_json(&TypeRegistry::new(), &person).unwrap();
        assert_eq!(json, r#"{"name":"Lily","age":30,"nick":null}"#);
    }

    #[test]
    fn nested_containers_and_enums() {
        let family = Family {
            surname: "Doe".into(),
            babies: vec![Baby {
                name: "A".into(),
                age: 1,
                level: Level::High,
            }],
            tags: BTreeSet::from(["x".into()]),
            ..Family::default()
        };
        let json = to_json(&TypeRegistry::new(), &family).unwrap();
        assert_eq!(
            json,
            r#"{"surname":"Doe","babies":[{"name":"A","age":1,"level":"HIGH"}],"tags":["x"],"scores":{}}"#
        );
    }

    #[test]
    fn hybrid_side_map_follows_fields() {
        let mut tagged = Tagged {
            name: "Bob".into(),
            ..Tagged::default()
        };
        tagged.extra.insert("extra2", 2);
        tagged.extra.insert("name", "shadowed");
        tagged.extra.insert("extra1", 1);

        let json = to_json(&TypeRegistry::new(), &tagged).unwrap();
        assert_eq!(json, r#"{"name":"Bob","extra2":2,"extra1":1}"#);
    }

    #[test]
    fn codec_output_replaces_value() {
        let registry = TypeRegistry::new();
        let mut writer = TapeWriter::new();
        EncodeDriver::new(&registry, BindConfig::new())
            .encode(&mut writer, &Duration::from_millis(1500))
            .unwrap();
        assert_eq!(writer.tape().tokens(), [TapeToken::String("PT1.5S".into())]);
    }

    #[test]
    fn char_is_a_string() {
        let mut writer = TapeWriter::new();
        EncodeDriver::new(&TypeRegistry::new(), BindConfig::new())
            .encode(&mut writer, &'é')
            .unwrap();
        assert_eq!(writer.tape().tokens(), [TapeToken::String("é".into())]);
    }

    #[test]
    fn opaque_without_codec_is_unsupported() {
        let registry = TypeRegistry::empty();
        let value = vec![PathBuf::from("/tmp")];
        let err = to_json(&registry, &value).unwrap_err();
        assert_eq!(err.path(), Some("$[0]"));
        assert!(matches!(err.root_cause(), BindError::UnsupportedType { .. }));
    }

    #[test]
    fn separators_are_emitted_by_the_driver() {
        let mut writer = TapeWriter::new();
        EncodeDriver::new(&TypeRegistry::new(), BindConfig::new())
            .encode(&mut writer, &[1_u8, 2, 3])
            .unwrap();
        let commas = writer
            .tape()
            .tokens()
            .iter()
            .filter(|t| **t == TapeToken::ArrayComma)
            .count();
        assert_eq!(commas, 2);
        assert_eq!(writer.tape().tokens()[1], TapeToken::Number(Number::PosInt(1)));
    }
}
