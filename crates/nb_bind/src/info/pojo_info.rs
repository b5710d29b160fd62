use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use nb_utils::hash::HashMap;

use crate::info::{CreatorInfo, FieldInfo, Type, Typed};
use crate::node::{JsonObject, Node};
use crate::{BindError, Reflect};

// -----------------------------------------------------------------------------
// HybridInfo

/// Access to the side map of a hybrid POJO.
pub trait HybridAccessor: Send + Sync + 'static {
    /// Borrows the side map, or `None` if `owner` has the wrong type.
    fn side_map<'a>(&self, owner: &'a dyn Reflect) -> Option<&'a JsonObject>;

    /// Replaces the side map. The decoder calls this exactly once per object.
    fn install(&self, owner: &mut dyn Reflect, side_map: JsonObject) -> Result<(), BindError>;
}

struct HybridAccess<O> {
    get: fn(&O) -> &JsonObject,
    install: fn(&mut O, JsonObject),
}

impl<O: Reflect + Typed> HybridAccessor for HybridAccess<O> {
    #[inline]
    fn side_map<'a>(&self, owner: &'a dyn Reflect) -> Option<&'a JsonObject> {
        owner.downcast_ref::<O>().map(self.get)
    }

    fn install(&self, owner: &mut dyn Reflect, side_map: JsonObject) -> Result<(), BindError> {
        let owner = owner.downcast_mut::<O>().ok_or_else(|| {
            BindError::type_error(O::type_info().type_path(), "side map owner has another type")
        })?;
        (self.install)(owner, side_map);
        Ok(())
    }
}

/// Marks a POJO as hybrid: keys without a declared field are captured into
/// an ordered side map instead of being skipped.
pub struct HybridInfo {
    accessor: Box<dyn HybridAccessor>,
}

impl HybridInfo {
    pub fn new<O: Reflect + Typed>(
        get: fn(&O) -> &JsonObject,
        install: fn(&mut O, JsonObject),
    ) -> Self {
        Self {
            accessor: Box::new(HybridAccess { get, install }),
        }
    }

    #[inline]
    pub fn side_map<'a>(&self, owner: &'a dyn Reflect) -> Option<&'a JsonObject> {
        self.accessor.side_map(owner)
    }

    #[inline]
    pub fn install(&self, owner: &mut dyn Reflect, side_map: JsonObject) -> Result<(), BindError> {
        self.accessor.install(owner, side_map)
    }
}

// -----------------------------------------------------------------------------
// Property

/// A property found by [`PojoInfo::property`].
#[derive(Debug, Clone, Copy)]
pub enum Property<'a> {
    /// A declared field.
    Field(&'a dyn Reflect),
    /// An entry of the hybrid side map.
    Dynamic(&'a Node),
}

// -----------------------------------------------------------------------------
// PojoInfo

/// Binding metadata of a struct: fields in declaration order, how to
/// construct it, and whether it is hybrid.
///
/// Built once through [`PojoInfo::builder`] and immutable afterwards.
pub struct PojoInfo {
    ty: Type,
    fields: Box<[FieldInfo]>,
    field_index: HashMap<&'static str, usize>,
    alias_index: HashMap<&'static str, usize>,
    creator: Option<CreatorInfo>,
    hybrid: Option<HybridInfo>,
}

impl PojoInfo {
    #[inline]
    pub fn builder<O: Reflect>() -> PojoBuilder {
        PojoBuilder {
            ty: Type::of::<O>(),
            fields: Vec::new(),
            creator: None,
            hybrid: None,
        }
    }

    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    #[inline]
    pub const fn type_path(&self) -> &'static str {
        self.ty.path()
    }

    /// Fields in declaration order.
    #[inline]
    pub fn fields(&self) -> &[FieldInfo] {
        &self.fields
    }

    #[inline]
    pub fn field_at(&self, index: usize) -> Option<&FieldInfo> {
        self.fields.get(index)
    }

    /// Resolves `key` against field names first, then aliases.
    #[inline]
    pub fn field_index(&self, key: &str) -> Option<usize> {
        self.field_index
            .get(key)
            .or_else(|| self.alias_index.get(key))
            .copied()
    }

    #[inline]
    pub fn field(&self, key: &str) -> Option<&FieldInfo> {
        self.field_index(key).map(|index| &self.fields[index])
    }

    #[inline]
    pub const fn creator(&self) -> Option<&CreatorInfo> {
        self.creator.as_ref()
    }

    #[inline]
    pub const fn hybrid(&self) -> Option<&HybridInfo> {
        self.hybrid.as_ref()
    }

    #[inline]
    pub const fn is_hybrid(&self) -> bool {
        self.hybrid.is_some()
    }

    /// Looks a property up on `value`: declared fields first, then the side map.
    ///
    /// # Examples
    ///
    /// ```
    /// use nb_bind::Binder;
    /// use nb_bind::info::{Property, Typed};
    /// # use nb_bind::impl_reflect_pojo;
    /// # use nb_bind::info::{CreatorInfo, FieldInfo, HybridInfo, PojoInfo};
    /// # use nb_bind::node::JsonObject;
    /// # #[derive(Default)]
    /// # struct Tagged { name: String, extra: JsonObject }
    /// # impl_reflect_pojo!(Tagged => PojoInfo::builder::<Tagged>()
    /// #     .creator(CreatorInfo::default_of::<Tagged>())
    /// #     .field(FieldInfo::settable::<Tagged, String>("name", |t| &t.name, |t, v| t.name = v))
    /// #     .hybrid(HybridInfo::new::<Tagged>(|t| &t.extra, |t, m| t.extra = m))
    /// #     .build());
    ///
    /// let value: Tagged = Binder::new().from_json(r#"{"name":"Bob","extra1":1}"#).unwrap();
    /// let info = Tagged::type_info().as_pojo().unwrap();
    ///
    /// assert!(matches!(info.property(&value, "name"), Some(Property::Field(_))));
    /// assert!(matches!(info.property(&value, "extra1"), Some(Property::Dynamic(_))));
    /// assert!(info.property(&value, "other").is_none());
    /// ```
    pub fn property<'a>(&self, value: &'a dyn Reflect, key: &str) -> Option<Property<'a>> {
        if let Some(field) = self.field(key) {
            return field.get(value).map(Property::Field);
        }
        self.hybrid
            .as_ref()
            .and_then(|hybrid| hybrid.side_map(value))
            .and_then(|side_map| side_map.get(key))
            .map(Property::Dynamic)
    }

    /// Checks the POJO can be decoded at all.
    pub fn validate(&self) -> Result<(), BindError> {
        let Some(creator) = &self.creator else {
            return Err(BindError::type_error(self.type_path(), "no constructor"));
        };
        if !creator.has_args_ctor() && !creator.has_no_args() {
            return Err(BindError::type_error(self.type_path(), "no usable constructor"));
        }
        if self.fields.is_empty() && creator.arity() == 0 && self.hybrid.is_none() {
            return Err(BindError::type_error(self.type_path(), "no accessible fields"));
        }
        Ok(())
    }
}

impl fmt::Debug for PojoInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PojoInfo")
            .field("ty", &self.ty)
            .field("fields", &self.fields)
            .field("creator", &self.creator)
            .field("hybrid", &self.hybrid.is_some())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// PojoBuilder

/// Collects the parts of a [`PojoInfo`].
pub struct PojoBuilder {
    ty: Type,
    fields: Vec<FieldInfo>,
    creator: Option<CreatorInfo>,
    hybrid: Option<HybridInfo>,
}

impl PojoBuilder {
    /// Appends a field; declaration order is encode order.
    #[inline]
    pub fn field(mut self, field: FieldInfo) -> Self {
        self.fields.push(field);
        self
    }

    #[inline]
    pub fn creator(mut self, creator: CreatorInfo) -> Self {
        self.creator = Some(creator);
        self
    }

    #[inline]
    pub fn hybrid(mut self, hybrid: HybridInfo) -> Self {
        self.hybrid = Some(hybrid);
        self
    }

    pub fn build(self) -> PojoInfo {
        let fields = self.fields.into_boxed_slice();
        let mut field_index = HashMap::with_capacity_and_hasher(fields.len(), Default::default());
        let mut alias_index = HashMap::default();
        for (index, field) in fields.iter().enumerate() {
            field_index.insert(field.name(), index);
            for alias in field.aliases() {
                alias_index.insert(*alias, index);
            }
        }

        PojoInfo {
            ty: self.ty,
            fields,
            field_index,
            alias_index,
            creator: self.creator,
            hybrid: self.hybrid,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::info::{ContainerKind, Typed};
    use crate::test_model::{Family, Person};

    #[test]
    fn fields_keep_declaration_order() {
        let info = Person::type_info().as_pojo().unwrap();
        let names: alloc::vec::Vec<&str> = info.fields().iter().map(|f| f.name()).collect();
        assert_eq!(names, ["name", "age", "nick"]);
    }

    #[test]
    fn aliases_resolve_after_names() {
        let info = Person::type_info().as_pojo().unwrap();
        assert_eq!(info.field_index("name"), Some(0));
        assert_eq!(info.field_index("login"), Some(0));
        assert_eq!(info.field_index("user_name"), Some(0));
        assert_eq!(info.field_index("unknown"), None);
        info.validate().unwrap();
    }

    #[test]
    fn container_kind_follows_declared_type() {
        let info = Family::type_info().as_pojo().unwrap();
        assert_eq!(info.field("babies").unwrap().container_kind(), ContainerKind::List);
        assert_eq!(info.field("tags").unwrap().container_kind(), ContainerKind::Set);
        assert_eq!(info.field("scores").unwrap().container_kind(), ContainerKind::Map);
        assert_eq!(info.field("surname").unwrap().container_kind(), ContainerKind::Scalar);
    }
}
