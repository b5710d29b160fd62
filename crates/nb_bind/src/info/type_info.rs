use alloc::boxed::Box;
use alloc::vec::Vec;

use thiserror::Error;

use crate::info::{ArrayInfo, ListInfo, MapInfo, PojoInfo, SetInfo, Type, Typed, take_value};
use crate::{BindError, Reflect};

// -----------------------------------------------------------------------------
// TypeKindError

/// Returned by the `as_*` casts of [`TypeInfo`] on a kind mismatch.
#[derive(Debug, Error)]
#[error("`{type_path}` is {received}, not {expected}")]
pub struct TypeKindError {
    pub type_path: &'static str,
    pub expected: &'static str,
    pub received: &'static str,
}

impl From<TypeKindError> for BindError {
    #[inline]
    fn from(value: TypeKindError) -> Self {
        BindError::TypeError {
            type_path: value.type_path,
            reason: alloc::format!("expected {}, found {}", value.expected, value.received).into(),
        }
    }
}

// -----------------------------------------------------------------------------
// TypeInfo

/// Binding metadata of one type.
///
/// The variant selects the decode strategy; see
/// [`DecodeDriver`](crate::de::DecodeDriver).
#[derive(Debug)]
pub enum TypeInfo {
    Scalar(ScalarInfo),
    Enum(EnumInfo),
    Optional(OptionalInfo),
    /// Growable ordered sequences.
    List(ListInfo),
    /// Sequences whose exact size is only known at the closing token.
    Array(ArrayInfo),
    Set(SetInfo),
    /// String-keyed maps.
    Map(MapInfo),
    /// The node model: `Node`, `JsonObject` and `JsonArray`.
    Dynamic(DynamicInfo),
    Pojo(PojoInfo),
    /// Types bindable only through a registered value codec.
    Opaque(OpaqueInfo),
}

macro_rules! impl_cast_method {
    ($name:ident : $kind:ident => $info:ident, $expected:literal) => {
        #[doc = concat!("Returns the [`", stringify!($info), "`] or a [`TypeKindError`].")]
        #[inline]
        pub fn $name(&self) -> Result<&$info, TypeKindError> {
            match self {
                Self::$kind(info) => Ok(info),
                _ => Err(TypeKindError {
                    type_path: self.type_path(),
                    expected: $expected,
                    received: self.kind_name(),
                }),
            }
        }
    };
}

impl TypeInfo {
    #[inline]
    pub const fn ty(&self) -> &Type {
        match self {
            Self::Scalar(info) => &info.ty,
            Self::Enum(info) => &info.ty,
            Self::Optional(info) => &info.ty,
            Self::List(info) => info.ty(),
            Self::Array(info) => info.ty(),
            Self::Set(info) => info.ty(),
            Self::Map(info) => info.ty(),
            Self::Dynamic(info) => &info.ty,
            Self::Pojo(info) => info.ty(),
            Self::Opaque(info) => &info.ty,
        }
    }

    #[inline]
    pub const fn type_id(&self) -> core::any::TypeId {
        self.ty().id()
    }

    #[inline]
    pub const fn type_path(&self) -> &'static str {
        self.ty().path()
    }

    /// A short name of the variant, for diagnostics.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Scalar(_) => "a scalar",
            Self::Enum(_) => "an enum",
            Self::Optional(_) => "an option",
            Self::List(_) => "a list",
            Self::Array(_) => "an array",
            Self::Set(_) => "a set",
            Self::Map(_) => "a map",
            Self::Dynamic(_) => "a dynamic node",
            Self::Pojo(_) => "a pojo",
            Self::Opaque(_) => "opaque",
        }
    }

    /// Returns `true` if a JSON `null` decodes into this type without a codec.
    #[inline]
    pub const fn accepts_null(&self) -> bool {
        match self {
            Self::Optional(_) => true,
            Self::Scalar(info) => matches!(info.kind, ScalarKind::Unit),
            Self::Dynamic(info) => matches!(info.kind, DynamicKind::Any),
            _ => false,
        }
    }

    impl_cast_method!(as_scalar: Scalar => ScalarInfo, "a scalar");
    impl_cast_method!(as_enum: Enum => EnumInfo, "an enum");
    impl_cast_method!(as_optional: Optional => OptionalInfo, "an option");
    impl_cast_method!(as_list: List => ListInfo, "a list");
    impl_cast_method!(as_array: Array => ArrayInfo, "an array");
    impl_cast_method!(as_set: Set => SetInfo, "a set");
    impl_cast_method!(as_map: Map => MapInfo, "a map");
    impl_cast_method!(as_dynamic: Dynamic => DynamicInfo, "a dynamic node");
    impl_cast_method!(as_pojo: Pojo => PojoInfo, "a pojo");
    impl_cast_method!(as_opaque: Opaque => OpaqueInfo, "opaque");

    /// Collects the infos this type refers to directly.
    pub fn dependencies(&self) -> Vec<&'static TypeInfo> {
        match self {
            Self::Scalar(_) | Self::Enum(_) | Self::Dynamic(_) | Self::Opaque(_) => Vec::new(),
            Self::Optional(info) => alloc::vec![info.some_info()],
            Self::List(info) => alloc::vec![info.item_info()],
            Self::Array(info) => alloc::vec![info.item_info()],
            Self::Set(info) => alloc::vec![info.item_info()],
            Self::Map(info) => alloc::vec![info.value_info()],
            Self::Pojo(info) => {
                let mut deps: Vec<&'static TypeInfo> =
                    info.fields().iter().map(|f| f.type_info()).collect();
                if let Some(creator) = info.creator() {
                    deps.extend(creator.args().iter().map(|a| a.type_info()));
                }
                deps
            }
        }
    }
}

// -----------------------------------------------------------------------------
// ScalarInfo

/// Which extractor a scalar is read with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    /// `()`, bound to `null`.
    Unit,
    Bool,
    I8,
    I16,
    I32,
    I64,
    Isize,
    U8,
    U16,
    U32,
    U64,
    Usize,
    F32,
    F64,
    /// The first character of a string.
    Char,
    String,
    /// [`Number`](crate::node::Number), any numeric literal.
    Number,
}

#[derive(Debug)]
pub struct ScalarInfo {
    ty: Type,
    kind: ScalarKind,
}

impl ScalarInfo {
    #[inline]
    pub fn new<T: Reflect>(kind: ScalarKind) -> Self {
        Self {
            ty: Type::of::<T>(),
            kind,
        }
    }

    #[inline]
    pub const fn kind(&self) -> ScalarKind {
        self.kind
    }
}

// -----------------------------------------------------------------------------
// EnumInfo

/// A fieldless enum, bound to the names of its variants.
pub struct EnumInfo {
    ty: Type,
    variants: &'static [&'static str],
    from_name: fn(&str) -> Option<Box<dyn Reflect>>,
}

impl EnumInfo {
    /// `from_name` builds the variant named `name`, or returns `None`.
    #[inline]
    pub fn new<T: Reflect>(
        variants: &'static [&'static str],
        from_name: fn(&str) -> Option<Box<dyn Reflect>>,
    ) -> Self {
        Self {
            ty: Type::of::<T>(),
            variants,
            from_name,
        }
    }

    #[inline]
    pub const fn variants(&self) -> &'static [&'static str] {
        self.variants
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.variants.iter().any(|v| *v == name)
    }

    #[inline]
    pub fn from_name(&self, name: &str) -> Option<Box<dyn Reflect>> {
        (self.from_name)(name)
    }
}

impl core::fmt::Debug for EnumInfo {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EnumInfo")
            .field("ty", &self.ty)
            .field("variants", &self.variants)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// OptionalInfo

/// `Option<T>`: `null` becomes `None`, anything else is decoded as `T`.
pub struct OptionalInfo {
    ty: Type,
    some_info: fn() -> &'static TypeInfo,
    none: fn() -> Box<dyn Reflect>,
    wrap: fn(Box<dyn Reflect>) -> Result<Box<dyn Reflect>, BindError>,
}

fn none_of<T: Reflect + Typed>() -> Box<dyn Reflect> {
    Box::new(None::<T>)
}

fn wrap_some<T: Reflect + Typed>(value: Box<dyn Reflect>) -> Result<Box<dyn Reflect>, BindError> {
    take_value::<T>(value).map(|v| Box::new(Some(v)) as Box<dyn Reflect>)
}

impl OptionalInfo {
    #[inline]
    pub fn new<T: Reflect + Typed>() -> Self {
        Self {
            ty: Type::of::<Option<T>>(),
            some_info: T::type_info,
            none: none_of::<T>,
            wrap: wrap_some::<T>,
        }
    }

    #[inline]
    pub fn some_info(&self) -> &'static TypeInfo {
        (self.some_info)()
    }

    #[inline]
    pub fn none(&self) -> Box<dyn Reflect> {
        (self.none)()
    }

    /// Wraps a decoded `T` into `Some`.
    #[inline]
    pub fn wrap(&self, value: Box<dyn Reflect>) -> Result<Box<dyn Reflect>, BindError> {
        (self.wrap)(value)
    }
}

impl core::fmt::Debug for OptionalInfo {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("OptionalInfo").field("ty", &self.ty).finish()
    }
}

// -----------------------------------------------------------------------------
// DynamicInfo

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DynamicKind {
    /// [`Node`](crate::node::Node): whatever value arrives.
    Any,
    /// [`JsonObject`](crate::node::JsonObject)
    Object,
    /// [`JsonArray`](crate::node::JsonArray)
    Array,
}

#[derive(Debug)]
pub struct DynamicInfo {
    ty: Type,
    kind: DynamicKind,
}

impl DynamicInfo {
    #[inline]
    pub fn new<T: Reflect>(kind: DynamicKind) -> Self {
        Self {
            ty: Type::of::<T>(),
            kind,
        }
    }

    #[inline]
    pub const fn kind(&self) -> DynamicKind {
        self.kind
    }
}

// -----------------------------------------------------------------------------
// OpaqueInfo

#[derive(Debug)]
pub struct OpaqueInfo {
    ty: Type,
}

impl OpaqueInfo {
    #[inline]
    pub fn new<T: ?Sized + 'static>() -> Self {
        Self { ty: Type::of::<T>() }
    }
}
