use core::any::TypeId;

use crate::info::{Type, TypeInfo};

// -----------------------------------------------------------------------------
// TypeKind

/// Classification of a type, in priority order.
///
/// 1. The node model is always [`Dynamic`](TypeKind::Dynamic).
/// 2. A type with a registered codec is [`ValueCodec`](TypeKind::ValueCodec),
///    whatever its `TypeInfo` says.
/// 3. A POJO with a usable constructor is [`Pojo`](TypeKind::Pojo), or
///    [`Hybrid`](TypeKind::Hybrid) if it captures unknown keys.
/// 4. Options and collections are [`Container`](TypeKind::Container); scalars
///    and enums are [`Scalar`](TypeKind::Scalar).
///
/// Anything else is [`Unrecognized`](TypeKind::Unrecognized).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Dynamic,
    ValueCodec,
    Pojo,
    Hybrid,
    Container,
    Scalar,
    Unrecognized,
}

impl TypeKind {
    /// Classifies `info`; `has_codec` tells whether a codec is registered for it.
    pub fn classify(info: &TypeInfo, has_codec: bool) -> Self {
        match info {
            TypeInfo::Dynamic(_) => Self::Dynamic,
            _ if has_codec => Self::ValueCodec,
            TypeInfo::Pojo(pojo) => match pojo.validate() {
                Ok(()) if pojo.is_hybrid() => Self::Hybrid,
                Ok(()) => Self::Pojo,
                Err(_) => Self::Unrecognized,
            },
            TypeInfo::Optional(_)
            | TypeInfo::List(_)
            | TypeInfo::Array(_)
            | TypeInfo::Set(_)
            | TypeInfo::Map(_) => Self::Container,
            TypeInfo::Scalar(_) | TypeInfo::Enum(_) => Self::Scalar,
            TypeInfo::Opaque(_) => Self::Unrecognized,
        }
    }

    #[inline]
    pub const fn is_pojo(self) -> bool {
        matches!(self, Self::Pojo | Self::Hybrid)
    }
}

// -----------------------------------------------------------------------------
// TypeMeta

/// A registered type: its [`TypeInfo`] and its [`TypeKind`].
#[derive(Debug, Clone, Copy)]
pub struct TypeMeta {
    type_info: &'static TypeInfo,
    kind: TypeKind,
}

impl TypeMeta {
    #[inline]
    pub const fn new(type_info: &'static TypeInfo, kind: TypeKind) -> Self {
        Self { type_info, kind }
    }

    #[inline]
    pub const fn type_info(&self) -> &'static TypeInfo {
        self.type_info
    }

    #[inline]
    pub const fn ty(&self) -> &'static Type {
        self.type_info.ty()
    }

    #[inline]
    pub const fn type_id(&self) -> TypeId {
        self.type_info.type_id()
    }

    #[inline]
    pub const fn type_path(&self) -> &'static str {
        self.type_info.type_path()
    }

    #[inline]
    pub const fn kind(&self) -> TypeKind {
        self.kind
    }

    #[inline]
    pub(crate) const fn set_kind(&mut self, kind: TypeKind) {
        self.kind = kind;
    }
}
