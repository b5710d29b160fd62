use alloc::boxed::Box;
use core::fmt;

use crate::info::{ContainerKind, Type, TypeInfo, Typed, take_value};
use crate::{BindError, Reflect};

// -----------------------------------------------------------------------------
// FieldAccessor

/// Type-erased getter and optional setter of one field.
///
/// Resolved once when the [`PojoInfo`](crate::info::PojoInfo) is built and
/// never looked up again per call.
pub trait FieldAccessor: Send + Sync + 'static {
    /// Borrows the field of `owner`, or `None` if `owner` has the wrong type.
    fn get<'a>(&self, owner: &'a dyn Reflect) -> Option<&'a dyn Reflect>;

    /// Stores `value` into the field.
    ///
    /// Returns `Ok(false)` without touching `owner` if the field has no
    /// setter, i.e. it is constructor-only or read-only.
    fn set(&self, owner: &mut dyn Reflect, value: Box<dyn Reflect>) -> Result<bool, BindError>;

    fn has_setter(&self) -> bool;
}

struct FieldAccess<O, F> {
    get: fn(&O) -> &F,
    set: Option<fn(&mut O, F)>,
}

impl<O: Reflect + Typed, F: Reflect + Typed> FieldAccessor for FieldAccess<O, F> {
    #[inline]
    fn get<'a>(&self, owner: &'a dyn Reflect) -> Option<&'a dyn Reflect> {
        owner
            .downcast_ref::<O>()
            .map(|owner| (self.get)(owner) as &dyn Reflect)
    }

    fn set(&self, owner: &mut dyn Reflect, value: Box<dyn Reflect>) -> Result<bool, BindError> {
        let Some(set) = self.set else {
            return Ok(false);
        };
        let owner = owner.downcast_mut::<O>().ok_or_else(|| {
            BindError::type_error(O::type_info().type_path(), "field owner has another type")
        })?;
        set(owner, take_value::<F>(value)?);
        Ok(true)
    }

    #[inline]
    fn has_setter(&self) -> bool {
        self.set.is_some()
    }
}

// -----------------------------------------------------------------------------
// FieldInfo

/// A declared property of a POJO.
///
/// # Examples
///
/// ```
/// use nb_bind::info::{ContainerKind, FieldInfo};
///
/// struct User { tags: Vec<String> }
///
/// let field = FieldInfo::settable::<User, Vec<String>>("tags", |u| &u.tags, |u, v| u.tags = v)
///     .with_aliases(&["labels"]);
///
/// assert_eq!(field.name(), "tags");
/// assert_eq!(field.container_kind(), ContainerKind::List);
/// assert!(field.has_setter());
/// # impl nb_bind::info::Typed for User {
/// #     fn type_info() -> &'static nb_bind::info::TypeInfo { unimplemented!() }
/// # }
/// # impl nb_bind::Reflect for User {
/// #     fn reflect_ref(&self) -> nb_bind::ReflectRef<'_> { nb_bind::ReflectRef::Pojo(self) }
/// # }
/// ```
pub struct FieldInfo {
    name: &'static str,
    aliases: &'static [&'static str],
    ty: Type,
    type_info: fn() -> &'static TypeInfo,
    accessor: Box<dyn FieldAccessor>,
}

impl FieldInfo {
    /// A field with a getter only.
    ///
    /// Such a field is still encoded; on decode it is only reachable through
    /// a constructor argument of the same name.
    pub fn new<O: Reflect + Typed, F: Reflect + Typed>(name: &'static str, get: fn(&O) -> &F) -> Self {
        Self::from_access::<O, F>(name, FieldAccess { get, set: None })
    }

    /// A field with a getter and a setter.
    pub fn settable<O: Reflect + Typed, F: Reflect + Typed>(
        name: &'static str,
        get: fn(&O) -> &F,
        set: fn(&mut O, F),
    ) -> Self {
        Self::from_access::<O, F>(
            name,
            FieldAccess {
                get,
                set: Some(set),
            },
        )
    }

    fn from_access<O: Reflect + Typed, F: Reflect + Typed>(
        name: &'static str,
        access: FieldAccess<O, F>,
    ) -> Self {
        Self {
            name,
            aliases: &[],
            ty: Type::of::<F>(),
            type_info: F::type_info,
            accessor: Box::new(access),
        }
    }

    /// Alternative names accepted on decode.
    #[inline]
    pub fn with_aliases(mut self, aliases: &'static [&'static str]) -> Self {
        self.aliases = aliases;
        self
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub const fn aliases(&self) -> &'static [&'static str] {
        self.aliases
    }

    /// The declared type.
    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    #[inline]
    pub fn type_info(&self) -> &'static TypeInfo {
        (self.type_info)()
    }

    #[inline]
    pub fn container_kind(&self) -> ContainerKind {
        ContainerKind::of(self.type_info())
    }

    #[inline]
    pub fn has_setter(&self) -> bool {
        self.accessor.has_setter()
    }

    /// Reads the field of `owner`.
    #[inline]
    pub fn get<'a>(&self, owner: &'a dyn Reflect) -> Option<&'a dyn Reflect> {
        self.accessor.get(owner)
    }

    /// Writes the field of `owner`; see [`FieldAccessor::set`].
    #[inline]
    pub fn set(&self, owner: &mut dyn Reflect, value: Box<dyn Reflect>) -> Result<bool, BindError> {
        self.accessor.set(owner, value)
    }
}

impl fmt::Debug for FieldInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldInfo")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .field("ty", &self.ty)
            .field("setter", &self.has_setter())
            .finish()
    }
}
