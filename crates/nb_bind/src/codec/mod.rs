//! Value codecs: converters between a wire shape and a richer runtime type.
//!
//! A codec is the third classification tier of the registry. It is
//! consulted after the dynamic node types and before structural decoding,
//! so a codec registered for a type always wins over its [`TypeInfo`].
//!
//! [`TypeInfo`]: crate::info::TypeInfo

// -----------------------------------------------------------------------------
// Modules

mod builtin;

// -----------------------------------------------------------------------------
// Exports

pub use builtin::{DurationCodec, IpAddrCodec, PathBufCodec, SystemTimeCodec};

// -----------------------------------------------------------------------------
// WireKind

use alloc::boxed::Box;
use core::any::TypeId;
use core::fmt;

use crate::info::{Type, Typed, take_value};
use crate::node::Node;
use crate::token::Token;
use crate::{BindError, Reflect};

/// The wire shape a codec reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireKind {
    String,
    Number,
    Bool,
    Object,
    Array,
    /// Whatever value arrives.
    Any,
}

impl WireKind {
    /// Returns `true` if a value starting with `token` has this shape.
    ///
    /// `null` is not part of any shape; it goes to [`ValueCodec::decode_null`].
    pub const fn accepts(self, token: Token) -> bool {
        match self {
            Self::String => matches!(token, Token::String),
            Self::Number => matches!(token, Token::Number),
            Self::Bool => matches!(token, Token::Boolean),
            Self::Object => matches!(token, Token::StartObject),
            Self::Array => matches!(token, Token::StartArray),
            Self::Any => token.is_value(),
        }
    }

    /// The token name used in mismatch errors.
    pub const fn expected(self) -> &'static str {
        match self {
            Self::String => "STRING",
            Self::Number => "NUMBER",
            Self::Bool => "BOOLEAN",
            Self::Object => "START_OBJECT",
            Self::Array => "START_ARRAY",
            Self::Any => "a value",
        }
    }
}

// -----------------------------------------------------------------------------
// ValueCodec

/// A bidirectional converter between [`Node`] and `Self::Value`.
///
/// # Examples
///
/// ```
/// use nb_bind::{BindError, Binder, impl_reflect_opaque};
/// use nb_bind::codec::{ValueCodec, WireKind};
/// use nb_bind::node::Node;
///
/// #[derive(Debug, PartialEq)]
/// struct Celsius(f64);
/// impl_reflect_opaque!(Celsius);
///
/// struct CelsiusCodec;
///
/// impl ValueCodec for CelsiusCodec {
///     type Value = Celsius;
///
///     fn wire_kind(&self) -> WireKind {
///         WireKind::Number
///     }
///
///     fn encode(&self, value: &Celsius) -> Result<Node, BindError> {
///         Ok(Node::from(value.0))
///     }
///
///     fn decode(&self, wire: Node) -> Result<Celsius, BindError> {
///         Ok(Celsius(wire.as_f64().unwrap_or_default()))
///     }
/// }
///
/// let binder = Binder::new();
/// binder.register_value_codec(CelsiusCodec);
///
/// assert_eq!(binder.from_json::<Celsius>("21.5").unwrap(), Celsius(21.5));
/// assert_eq!(binder.to_json(&Celsius(-4.0)).unwrap(), "-4.0");
/// assert!(binder.from_json::<Celsius>(r#""warm""#).is_err());
/// ```
pub trait ValueCodec: Send + Sync + 'static {
    type Value: Reflect + Typed;

    /// The shape `decode` expects. Checked before `decode` is called.
    #[inline]
    fn wire_kind(&self) -> WireKind {
        WireKind::Any
    }

    fn encode(&self, value: &Self::Value) -> Result<Node, BindError>;

    fn decode(&self, wire: Node) -> Result<Self::Value, BindError>;

    /// Called for a `null` instead of [`decode`](ValueCodec::decode).
    #[inline]
    fn decode_null(&self) -> Result<Self::Value, BindError> {
        self.decode(Node::Null)
    }
}

// -----------------------------------------------------------------------------
// ValueCodecInfo

trait ErasedCodec: Send + Sync {
    fn wire_kind(&self) -> WireKind;

    fn encode(&self, value: &dyn Reflect) -> Result<Node, BindError>;

    fn decode(&self, wire: Node) -> Result<Box<dyn Reflect>, BindError>;

    fn decode_null(&self) -> Result<Box<dyn Reflect>, BindError>;
}

impl<C: ValueCodec> ErasedCodec for C {
    #[inline]
    fn wire_kind(&self) -> WireKind {
        ValueCodec::wire_kind(self)
    }

    fn encode(&self, value: &dyn Reflect) -> Result<Node, BindError> {
        match value.downcast_ref::<C::Value>() {
            Some(value) => ValueCodec::encode(self, value),
            None => Err(BindError::type_error(
                C::Value::type_info().type_path(),
                "codec received a value of another type",
            )),
        }
    }

    #[inline]
    fn decode(&self, wire: Node) -> Result<Box<dyn Reflect>, BindError> {
        ValueCodec::decode(self, wire).map(|value| Box::new(value) as Box<dyn Reflect>)
    }

    #[inline]
    fn decode_null(&self) -> Result<Box<dyn Reflect>, BindError> {
        ValueCodec::decode_null(self).map(|value| Box::new(value) as Box<dyn Reflect>)
    }
}

/// A registered codec with its value type erased.
pub struct ValueCodecInfo {
    ty: Type,
    codec: Box<dyn ErasedCodec>,
}

impl ValueCodecInfo {
    pub fn new<C: ValueCodec>(codec: C) -> Self {
        Self {
            ty: Type::of::<C::Value>(),
            codec: Box::new(codec),
        }
    }

    /// The value type.
    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    #[inline]
    pub const fn type_id(&self) -> TypeId {
        self.ty.id()
    }

    #[inline]
    pub const fn type_path(&self) -> &'static str {
        self.ty.path()
    }

    #[inline]
    pub fn wire_kind(&self) -> WireKind {
        self.codec.wire_kind()
    }

    /// Converts `value` into its wire shape.
    #[inline]
    pub fn encode(&self, value: &dyn Reflect) -> Result<Node, BindError> {
        self.codec.encode(value)
    }

    /// Converts a wire shape into a boxed value.
    #[inline]
    pub fn decode(&self, wire: Node) -> Result<Box<dyn Reflect>, BindError> {
        self.codec.decode(wire)
    }

    #[inline]
    pub fn decode_null(&self) -> Result<Box<dyn Reflect>, BindError> {
        self.codec.decode_null()
    }

    /// Decodes `wire` and unboxes the result.
    pub fn decode_as<T: Reflect + Typed>(&self, wire: Node) -> Result<T, BindError> {
        take_value::<T>(self.decode(wire)?)
    }
}

impl fmt::Debug for ValueCodecInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueCodecInfo")
            .field("ty", &self.ty)
            .field("wire_kind", &self.wire_kind())
            .finish()
    }
}
