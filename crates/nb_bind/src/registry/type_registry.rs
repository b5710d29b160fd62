use alloc::format;
use alloc::string::String;
use core::any::TypeId;

use nb_utils::TypeIdMap;
use nb_utils::hash::HashMap;

use crate::BindError;
use crate::codec::{DurationCodec, IpAddrCodec, PathBufCodec, SystemTimeCodec};
use crate::codec::{ValueCodec, ValueCodecInfo};
use crate::info::{FieldInfo, PojoInfo, TypeInfo, Typed};
use crate::node::{JsonArray, JsonObject, Node, Number};
use crate::registry::{TypeKind, TypeMeta};

// -----------------------------------------------------------------------------
// TypeRegistry

/// The central store of [`TypeMeta`]s and value codecs.
///
/// Registration is idempotent: a type is classified once, the first time it
/// is registered, and its dependencies (field, argument and element types)
/// are registered along with it.
///
/// # Examples
///
/// ```
/// use core::any::TypeId;
/// use nb_bind::registry::{TypeKind, TypeRegistry};
///
/// let mut registry = TypeRegistry::new();
/// registry.register::<Vec<Option<u8>>>();
///
/// assert_eq!(registry.get(TypeId::of::<Vec<Option<u8>>>()).unwrap().kind(), TypeKind::Container);
/// assert!(registry.contains(TypeId::of::<Option<u8>>()));
/// assert_eq!(registry.get_with_type_path("u8").unwrap().kind(), TypeKind::Scalar);
/// assert_eq!(
///     registry.get(TypeId::of::<std::time::Duration>()).unwrap().kind(),
///     TypeKind::ValueCodec,
/// );
/// ```
pub struct TypeRegistry {
    type_meta_table: TypeIdMap<TypeMeta>,
    type_path_to_id: HashMap<&'static str, TypeId>,
    value_codecs: TypeIdMap<ValueCodecInfo>,
}

impl Default for TypeRegistry {
    /// See [`TypeRegistry::new`].
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    /// Creates a registry without any registration or codec.
    #[inline]
    pub fn empty() -> Self {
        Self {
            type_meta_table: TypeIdMap::new(),
            type_path_to_id: HashMap::default(),
            value_codecs: TypeIdMap::new(),
        }
    }

    /// Creates a registry with the builtin codecs and scalars.
    ///
    /// - codecs: `PathBuf`, `IpAddr`, `Duration`, `SystemTime`
    /// - `()` `bool` `char` `String`
    /// - `i8 - i64` `isize` `u8 - u64` `usize` `f32` `f64`
    /// - `Number` `Node` `JsonObject` `JsonArray`
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register_value_codec(PathBufCodec);
        registry.register_value_codec(IpAddrCodec);
        registry.register_value_codec(DurationCodec);
        registry.register_value_codec(SystemTimeCodec);

        registry.register::<()>();
        registry.register::<bool>();
        registry.register::<char>();
        registry.register::<u8>();
        registry.register::<u16>();
        registry.register::<u32>();
        registry.register::<u64>();
        registry.register::<usize>();
        registry.register::<i8>();
        registry.register::<i16>();
        registry.register::<i32>();
        registry.register::<i64>();
        registry.register::<isize>();
        registry.register::<f32>();
        registry.register::<f64>();
        registry.register::<String>();
        registry.register::<Number>();
        registry.register::<Node>();
        registry.register::<JsonObject>();
        registry.register::<JsonArray>();
        registry.register::<std::path::PathBuf>();
        registry.register::<std::net::IpAddr>();
        registry.register::<core::time::Duration>();
        registry.register::<std::time::SystemTime>();
        registry
    }

    /// Classifies `info` without registering it.
    ///
    /// A registered type answers from its cached [`TypeMeta`].
    #[inline]
    pub fn classify(&self, info: &'static TypeInfo) -> TypeKind {
        match self.type_meta_table.get(&info.type_id()) {
            Some(meta) => meta.kind(),
            None => TypeKind::classify(info, self.value_codecs.contains(&info.type_id())),
        }
    }

    // Returns `false` if the type is already present.
    fn register_internal(&mut self, info: &'static TypeInfo) -> bool {
        let kind = self.classify(info);
        let inserted = self
            .type_meta_table
            .try_insert(info.type_id(), || TypeMeta::new(info, kind));
        if inserted {
            self.type_path_to_id.insert(info.type_path(), info.type_id());
            log::debug!("registered `{}` as {kind:?}", info.type_path());
        }
        inserted
    }

    /// Registers `info` and, transitively, the types it refers to.
    ///
    /// Already registered types are left untouched, dependencies included.
    pub fn register_type_info(&mut self, info: &'static TypeInfo) -> &TypeMeta {
        if self.register_internal(info) {
            let mut pending = info.dependencies();
            while let Some(dependency) = pending.pop() {
                if self.register_internal(dependency) {
                    pending.extend(dependency.dependencies());
                }
            }
        }

        let kind = self.classify(info);
        self.type_meta_table
            .get_or_insert(info.type_id(), || TypeMeta::new(info, kind))
    }

    /// Registers `T` and its dependencies; see [`register_type_info`].
    ///
    /// [`register_type_info`]: TypeRegistry::register_type_info
    #[inline]
    pub fn register<T: Typed>(&mut self) -> &TypeMeta {
        self.register_type_info(T::type_info())
    }

    /// Registers `T`, failing unless it is a usable POJO.
    ///
    /// # Examples
    ///
    /// ```
    /// use nb_bind::BindError;
    /// use nb_bind::registry::TypeRegistry;
    ///
    /// let mut registry = TypeRegistry::new();
    /// let err = registry.register_pojo_or_else_throw::<Vec<u8>>().unwrap_err();
    /// assert!(matches!(err, BindError::TypeError { .. }));
    /// ```
    pub fn register_pojo_or_else_throw<T: Typed>(&mut self) -> Result<&'static PojoInfo, BindError> {
        let meta = *self.register::<T>();
        let info = meta.type_info().as_pojo()?;
        info.validate()?;
        match meta.kind() {
            TypeKind::Pojo | TypeKind::Hybrid => Ok(info),
            other => Err(BindError::type_error(
                meta.type_path(),
                format!("classified as {other:?}, not as a pojo"),
            )),
        }
    }

    /// Registers a value codec, replacing any codec for the same type.
    ///
    /// A registered type is reclassified as [`TypeKind::ValueCodec`].
    pub fn register_value_codec<C: ValueCodec>(&mut self, codec: C) {
        let info = ValueCodecInfo::new(codec);
        let type_id = info.type_id();
        let type_path = info.type_path();
        if self.value_codecs.insert(type_id, info).is_some() {
            log::warn!("replaced the value codec of `{type_path}`");
        }
        if let Some(meta) = self.type_meta_table.get_mut(&type_id) {
            let kind = TypeKind::classify(meta.type_info(), true);
            meta.set_kind(kind);
        }
    }

    /// Returns the codec registered for the type, if any.
    #[inline]
    pub fn value_codec(&self, type_id: TypeId) -> Option<&ValueCodecInfo> {
        self.value_codecs.get(&type_id)
    }

    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.type_meta_table.contains(&type_id)
    }

    #[inline]
    pub fn get(&self, type_id: TypeId) -> Option<&TypeMeta> {
        self.type_meta_table.get(&type_id)
    }

    pub fn get_with_type_path(&self, type_path: &str) -> Option<&TypeMeta> {
        // Manual inline
        match self.type_path_to_id.get(type_path) {
            Some(id) => self.get(*id),
            None => None,
        }
    }

    /// Returns `true` if the type is registered as a POJO or hybrid.
    #[inline]
    pub fn has_pojo(&self, type_id: TypeId) -> bool {
        self.get(type_id).is_some_and(|meta| meta.kind().is_pojo())
    }

    /// Looks up a declared field of a registered POJO, by name or alias.
    pub fn get_field_info(&self, type_id: TypeId, name: &str) -> Option<&'static FieldInfo> {
        let meta = self.get(type_id)?;
        if !meta.kind().is_pojo() {
            return None;
        }
        meta.type_info().as_pojo().ok()?.field(name)
    }

    /// Returns an iterator over the registered [`TypeMeta`]s.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &TypeMeta> {
        self.type_meta_table.values()
    }
}

// -----------------------------------------------------------------------------
// TypeRegistryArc

use alloc::sync::Arc;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// A [`TypeRegistry`] shared between threads.
///
/// Decoding and encoding only take the read lock; registration takes the
/// write lock. A poisoned lock is recovered, the registry never holds a
/// half-applied registration.
#[derive(Clone, Default)]
pub struct TypeRegistryArc {
    /// The wrapped [`TypeRegistry`].
    pub internal: Arc<RwLock<TypeRegistry>>,
}

impl TypeRegistryArc {
    #[inline]
    pub fn new(registry: TypeRegistry) -> Self {
        Self {
            internal: Arc::new(RwLock::new(registry)),
        }
    }

    /// Takes a read lock on the underlying [`TypeRegistry`].
    pub fn read(&self) -> RwLockReadGuard<'_, TypeRegistry> {
        self.internal.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Takes a write lock on the underlying [`TypeRegistry`].
    pub fn write(&self) -> RwLockWriteGuard<'_, TypeRegistry> {
        self.internal
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers `T` unless it is already present.
    ///
    /// The common case only takes the read lock.
    pub fn ensure_registered<T: Typed>(&self) {
        let type_id = T::type_info().type_id();
        if !self.read().contains(type_id) {
            self.write().register::<T>();
        }
    }
}

impl core::fmt::Debug for TypeRegistryArc {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list()
            .entries(self.read().type_path_to_id.keys())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use core::any::TypeId;
    use std::time::Duration;

    use super::TypeRegistry;
    use crate::codec::DurationCodec;
    use crate::info::ContainerKind;
    use crate::registry::TypeKind;
    use crate::test_model::{Family, Person, Tagged};

    #[test]
    fn registers_dependencies_once() {
        let mut registry = TypeRegistry::empty();
        assert_eq!(registry.register::<Family>().kind(), TypeKind::Pojo);
        assert!(registry.contains(TypeId::of::<alloc::vec::Vec<crate::test_model::Baby>>()));
        assert!(registry.contains(TypeId::of::<crate::test_model::Baby>()));
        let count = registry.iter().len();
        registry.register::<Family>();
        assert_eq!(registry.iter().len(), count);
    }

    #[test]
    fn hybrid_and_field_lookup() {
        let mut registry = TypeRegistry::new();
        registry.register::<Tagged>();
        assert!(registry.has_pojo(TypeId::of::<Tagged>()));
        assert_eq!(registry.get(TypeId::of::<Tagged>()).unwrap().kind(), TypeKind::Hybrid);

        registry.register::<Person>();
        let field = registry.get_field_info(TypeId::of::<Person>(), "login").unwrap();
        assert_eq!(field.name(), "name");
        assert_eq!(field.container_kind(), ContainerKind::Scalar);
        assert!(registry.get_field_info(TypeId::of::<u8>(), "x").is_none());

        registry.register::<Family>();
        let field = registry.get_field_info(TypeId::of::<Family>(), "tags").unwrap();
        assert_eq!(field.container_kind(), ContainerKind::Set);
    }

    #[test]
    fn codec_reclassifies() {
        let mut registry = TypeRegistry::empty();
        assert_eq!(registry.register::<Duration>().kind(), TypeKind::Unrecognized);
        registry.register_value_codec(DurationCodec);
        assert_eq!(registry.get(TypeId::of::<Duration>()).unwrap().kind(), TypeKind::ValueCodec);
        assert!(registry.value_codec(TypeId::of::<Duration>()).is_some());
    }

    #[test]
    fn pojo_or_else_throw() {
        let mut registry = TypeRegistry::new();
        assert!(registry.register_pojo_or_else_throw::<Person>().is_ok());
        assert!(registry.register_pojo_or_else_throw::<Duration>().is_err());
    }
}
