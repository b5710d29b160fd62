use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::info::{DynamicKind, Type, TypeInfo, Typed};
use crate::{BindError, Reflect};

/// Turns decoded elements into the concrete sequence type.
pub type BuildSeqFn = fn(Vec<Box<dyn Reflect>>) -> Result<Box<dyn Reflect>, BindError>;

/// Turns decoded entries into the concrete map type.
pub type BuildMapFn = fn(Vec<(String, Box<dyn Reflect>)>) -> Result<Box<dyn Reflect>, BindError>;

// -----------------------------------------------------------------------------
// ContainerKind

/// Which container routine binds a field.
///
/// A coarse view of [`TypeInfo`] for code that inspects registered fields
/// through [`TypeRegistry::get_field_info`]. The engines match on
/// [`TypeInfo`] directly, which also tells arrays from lists.
///
/// [`TypeRegistry::get_field_info`]: crate::registry::TypeRegistry::get_field_info
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    Scalar,
    Map,
    List,
    Set,
}

impl ContainerKind {
    /// Derives the kind from a declared type.
    ///
    /// Dynamic objects and arrays count as maps and lists; everything
    /// else, POJOs included, is a scalar.
    pub const fn of(info: &TypeInfo) -> Self {
        match info {
            TypeInfo::List(_) | TypeInfo::Array(_) => Self::List,
            TypeInfo::Set(_) => Self::Set,
            TypeInfo::Map(_) => Self::Map,
            TypeInfo::Dynamic(info) => match info.kind() {
                DynamicKind::Object => Self::Map,
                DynamicKind::Array => Self::List,
                DynamicKind::Any => Self::Scalar,
            },
            _ => Self::Scalar,
        }
    }
}

// -----------------------------------------------------------------------------
// ListInfo

/// A growable ordered sequence such as `Vec<T>`.
pub struct ListInfo {
    ty: Type,
    item_info: fn() -> &'static TypeInfo,
    build: BuildSeqFn,
}

impl ListInfo {
    #[inline]
    pub fn new<L: Reflect, T: Typed>(build: BuildSeqFn) -> Self {
        Self {
            ty: Type::of::<L>(),
            item_info: T::type_info,
            build,
        }
    }

    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    #[inline]
    pub fn item_info(&self) -> &'static TypeInfo {
        (self.item_info)()
    }

    #[inline]
    pub fn build(&self, items: Vec<Box<dyn Reflect>>) -> Result<Box<dyn Reflect>, BindError> {
        (self.build)(items)
    }
}

// -----------------------------------------------------------------------------
// ArrayInfo

/// A sequence allocated at its exact size once the closing token is seen:
/// `Box<[T]>`, or `[T; N]` whose length is also checked.
pub struct ArrayInfo {
    ty: Type,
    item_info: fn() -> &'static TypeInfo,
    fixed_len: Option<usize>,
    build: BuildSeqFn,
}

impl ArrayInfo {
    #[inline]
    pub fn new<A: Reflect, T: Typed>(fixed_len: Option<usize>, build: BuildSeqFn) -> Self {
        Self {
            ty: Type::of::<A>(),
            item_info: T::type_info,
            fixed_len,
            build,
        }
    }

    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    #[inline]
    pub fn item_info(&self) -> &'static TypeInfo {
        (self.item_info)()
    }

    /// The required length, for `[T; N]`.
    #[inline]
    pub const fn fixed_len(&self) -> Option<usize> {
        self.fixed_len
    }

    #[inline]
    pub fn build(&self, items: Vec<Box<dyn Reflect>>) -> Result<Box<dyn Reflect>, BindError> {
        (self.build)(items)
    }
}

// -----------------------------------------------------------------------------
// SetInfo

/// A set; duplicate elements collapse when built.
pub struct SetInfo {
    ty: Type,
    item_info: fn() -> &'static TypeInfo,
    build: BuildSeqFn,
}

impl SetInfo {
    #[inline]
    pub fn new<S: Reflect, T: Typed>(build: BuildSeqFn) -> Self {
        Self {
            ty: Type::of::<S>(),
            item_info: T::type_info,
            build,
        }
    }

    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    #[inline]
    pub fn item_info(&self) -> &'static TypeInfo {
        (self.item_info)()
    }

    #[inline]
    pub fn build(&self, items: Vec<Box<dyn Reflect>>) -> Result<Box<dyn Reflect>, BindError> {
        (self.build)(items)
    }
}

// -----------------------------------------------------------------------------
// MapInfo

/// A map with string keys.
pub struct MapInfo {
    ty: Type,
    value_info: fn() -> &'static TypeInfo,
    build: BuildMapFn,
}

impl MapInfo {
    #[inline]
    pub fn new<M: Reflect, V: Typed>(build: BuildMapFn) -> Self {
        Self {
            ty: Type::of::<M>(),
            value_info: V::type_info,
            build,
        }
    }

    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    #[inline]
    pub fn value_info(&self) -> &'static TypeInfo {
        (self.value_info)()
    }

    #[inline]
    pub fn build(
        &self,
        entries: Vec<(String, Box<dyn Reflect>)>,
    ) -> Result<Box<dyn Reflect>, BindError> {
        (self.build)(entries)
    }
}

// -----------------------------------------------------------------------------
// Debug

macro_rules! impl_debug_by_ty {
    ($($info:ident),*) => {
        $(
            impl fmt::Debug for $info {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.debug_struct(stringify!($info)).field("ty", &self.ty).finish()
                }
            }
        )*
    };
}

impl_debug_by_ty!(ListInfo, ArrayInfo, SetInfo, MapInfo);
