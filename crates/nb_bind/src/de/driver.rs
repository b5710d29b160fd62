use alloc::boxed::Box;

use crate::codec::ValueCodecInfo;
use crate::config::BindConfig;
use crate::info::{ScalarInfo, ScalarKind, TypeInfo, Typed, take_value};
use crate::path::PathSegment;
use crate::registry::{TypeKind, TypeRegistry};
use crate::token::{StreamingReader, Token};
use crate::{BindError, Reflect};

// -----------------------------------------------------------------------------
// DecodeDriver

/// Decodes values from a [`StreamingReader`].
///
/// The driver borrows the registry for the duration of a call and never
/// mutates it; targets need not be registered beforehand, an unregistered
/// type is classified on the fly.
///
/// # Examples
///
/// ```
/// use nb_bind::BindConfig;
/// use nb_bind::adapter::{TapeReader, TokenTape};
/// use nb_bind::de::DecodeDriver;
/// use nb_bind::registry::TypeRegistry;
///
/// let tape = TokenTape::new()
///     .start_array()
///     .number(1)
///     .number(2)
///     .end_array();
///
/// let registry = TypeRegistry::new();
/// let driver = DecodeDriver::new(&registry, BindConfig::new());
///
/// let value: Vec<i32> = driver.decode(&mut TapeReader::new(&tape)).unwrap();
/// assert_eq!(value, [1, 2]);
/// ```
#[derive(Clone, Copy)]
pub struct DecodeDriver<'a> {
    pub(super) registry: &'a TypeRegistry,
    pub(super) config: BindConfig,
}

impl<'a> DecodeDriver<'a> {
    #[inline]
    pub const fn new(registry: &'a TypeRegistry, config: BindConfig) -> Self {
        Self { registry, config }
    }

    #[inline]
    pub const fn config(&self) -> &BindConfig {
        &self.config
    }

    /// Decodes one value of type `T`.
    pub fn decode<T, R>(&self, reader: &mut R) -> Result<T, BindError>
    where
        T: Reflect + Typed,
        R: StreamingReader + ?Sized,
    {
        let root = PathSegment::root(self.config.path_tracking);
        let value = self.decode_info(reader, T::type_info(), root.as_ref())?;
        take_value::<T>(value)
    }

    /// Decodes one value described by `info` at location `path`.
    ///
    /// Errors are tagged with `path` unless they already carry a location.
    #[inline]
    pub fn decode_info<R: StreamingReader + ?Sized>(
        &self,
        reader: &mut R,
        info: &'static TypeInfo,
        path: Option<&PathSegment<'_>>,
    ) -> Result<Box<dyn Reflect>, BindError> {
        self.decode_value(reader, info, path)
            .map_err(|err| err.at(path))
    }

    fn decode_value<R: StreamingReader + ?Sized>(
        &self,
        reader: &mut R,
        info: &'static TypeInfo,
        path: Option<&PathSegment<'_>>,
    ) -> Result<Box<dyn Reflect>, BindError> {
        match self.registry.classify(info) {
            TypeKind::Dynamic => return self.decode_dynamic(reader, info.as_dynamic()?, path),
            TypeKind::ValueCodec => {
                if let Some(codec) = self.registry.value_codec(info.type_id()) {
                    return self.decode_codec(reader, codec, path);
                }
            }
            TypeKind::Unrecognized => return Err(unrecognized(info)),
            _ => {}
        }

        if reader.peek()? == Token::Null {
            return match info {
                TypeInfo::Optional(optional) => {
                    reader.next_null()?;
                    Ok(optional.none())
                }
                TypeInfo::Scalar(scalar) if scalar.kind() == ScalarKind::Unit => {
                    reader.next_null()?;
                    Ok(Box::new(()))
                }
                _ => Err(BindError::type_error(info.type_path(), "null is not accepted")),
            };
        }

        match info {
            TypeInfo::Scalar(scalar) => decode_scalar(reader, scalar, info.type_path()),
            TypeInfo::Enum(enum_info) => {
                let name = reader.next_string()?;
                enum_info
                    .from_name(&name)
                    .ok_or_else(|| BindError::EnumMismatch {
                        type_path: info.type_path(),
                        value: name,
                    })
            }
            TypeInfo::Optional(optional) => {
                let value = self.decode_value(reader, optional.some_info(), path)?;
                optional.wrap(value)
            }
            TypeInfo::List(list) => {
                let items = self.decode_items(reader, list.item_info(), info.type_path(), path)?;
                list.build(items)
            }
            TypeInfo::Array(array) => {
                let items = self.decode_items(reader, array.item_info(), info.type_path(), path)?;
                array.build(items)
            }
            TypeInfo::Set(set) => {
                let items = self.decode_items(reader, set.item_info(), info.type_path(), path)?;
                set.build(items)
            }
            TypeInfo::Map(map) => {
                let entries = self.decode_entries(reader, map.value_info(), info.type_path(), path)?;
                map.build(entries)
            }
            TypeInfo::Pojo(pojo) => self.decode_pojo(reader, pojo, path),
            TypeInfo::Dynamic(dynamic) => self.decode_dynamic(reader, dynamic, path),
            TypeInfo::Opaque(_) => Err(unrecognized(info)),
        }
    }

    /// Reads the codec's wire shape, then converts it.
    fn decode_codec<R: StreamingReader + ?Sized>(
        &self,
        reader: &mut R,
        codec: &ValueCodecInfo,
        path: Option<&PathSegment<'_>>,
    ) -> Result<Box<dyn Reflect>, BindError> {
        let token = reader.peek()?;
        if token == Token::Null {
            reader.next_null()?;
            return codec.decode_null();
        }

        let wire_kind = codec.wire_kind();
        if !wire_kind.accepts(token) {
            return Err(BindError::mismatch(wire_kind.expected(), token));
        }
        let wire = self.decode_node(reader, path)?;
        codec.decode(wire)
    }

    /// Consumes a `null` standing for an absent POJO property.
    ///
    /// Returns `false`, consuming nothing, if the current token is not `null`
    /// or if `info` gives `null` a meaning of its own.
    pub(super) fn skip_absent<R: StreamingReader + ?Sized>(
        &self,
        reader: &mut R,
        info: &'static TypeInfo,
    ) -> Result<bool, BindError> {
        if reader.peek()? != Token::Null
            || info.accepts_null()
            || self.registry.classify(info) == TypeKind::ValueCodec
        {
            return Ok(false);
        }
        reader.next_null()?;
        Ok(true)
    }
}

// -----------------------------------------------------------------------------
// Scalars

/// Reads a scalar with the extractor matching its exact width.
fn decode_scalar<R: StreamingReader + ?Sized>(
    reader: &mut R,
    info: &ScalarInfo,
    type_path: &'static str,
) -> Result<Box<dyn Reflect>, BindError> {
    Ok(match info.kind() {
        ScalarKind::Unit => {
            reader.next_null()?;
            Box::new(())
        }
        ScalarKind::Bool => Box::new(reader.next_bool()?),
        ScalarKind::I8 => Box::new(reader.next_i8()?),
        ScalarKind::I16 => Box::new(reader.next_i16()?),
        ScalarKind::I32 => Box::new(reader.next_i32()?),
        ScalarKind::I64 => Box::new(reader.next_i64()?),
        ScalarKind::Isize => Box::new(reader.next_isize()?),
        ScalarKind::U8 => Box::new(reader.next_u8()?),
        ScalarKind::U16 => Box::new(reader.next_u16()?),
        ScalarKind::U32 => Box::new(reader.next_u32()?),
        ScalarKind::U64 => Box::new(reader.next_u64()?),
        ScalarKind::Usize => Box::new(reader.next_usize()?),
        ScalarKind::F32 => Box::new(reader.next_f32()?),
        ScalarKind::F64 => Box::new(reader.next_f64()?),
        ScalarKind::Char => {
            let text = reader.next_string()?;
            let first = text.chars().next().ok_or_else(|| {
                BindError::invalid(type_path, "an empty string has no character")
            })?;
            Box::new(first)
        }
        ScalarKind::String => Box::new(reader.next_string()?),
        ScalarKind::Number => Box::new(reader.next_number()?),
    })
}

// -----------------------------------------------------------------------------
// Errors

/// Explains why `info` cannot be decoded.
fn unrecognized(info: &'static TypeInfo) -> BindError {
    match info {
        TypeInfo::Pojo(pojo) => match pojo.validate() {
            Err(err) => err,
            Ok(()) => BindError::type_error(info.type_path(), "unrecognized pojo"),
        },
        TypeInfo::Opaque(_) => BindError::type_error(info.type_path(), "no value codec registered"),
        _ => BindError::type_error(info.type_path(), "unrecognized type"),
    }
}
