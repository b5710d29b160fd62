use ::alloc::boxed::Box;
use ::alloc::string::String;
use ::core::hash::{BuildHasher, Hash};

use super::alloc::{collect_map, collect_seq};
use crate::info::{GenericTypeInfoCell, MapInfo, SetInfo, TypeInfo, Typed};
use crate::reflection::{Map, Set};
use crate::{Reflect, ReflectRef};

// -----------------------------------------------------------------------------
// Hash maps

macro_rules! impl_reflect_for_hashmap {
    ($($map:ident)::+) => {
        impl<V, S> Typed for $($map)::+<String, V, S>
        where
            V: Reflect + Typed,
            S: BuildHasher + Default + Send + Sync + 'static,
        {
            fn type_info() -> &'static TypeInfo {
                static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
                CELL.get_or_insert::<Self>(|| {
                    TypeInfo::Map(MapInfo::new::<Self, V>(collect_map::<V, Self>))
                })
            }
        }

        impl<V, S> Reflect for $($map)::+<String, V, S>
        where
            V: Reflect + Typed,
            S: BuildHasher + Default + Send + Sync + 'static,
        {
            #[inline]
            fn reflect_ref(&self) -> ReflectRef<'_> {
                ReflectRef::Map(self)
            }
        }

        impl<V, S> Map for $($map)::+<String, V, S>
        where
            V: Reflect + Typed,
            S: BuildHasher + Default + Send + Sync + 'static,
        {
            #[inline]
            fn len(&self) -> usize {
                Self::len(self)
            }

            #[inline]
            fn get(&self, key: &str) -> Option<&dyn Reflect> {
                Self::get(self, key).map(Reflect::as_reflect)
            }

            fn iter(&self) -> Box<dyn Iterator<Item = (&str, &dyn Reflect)> + '_> {
                Box::new(Self::iter(self).map(|(key, value)| (key.as_str(), value.as_reflect())))
            }
        }
    };
}

impl_reflect_for_hashmap!(std::collections::HashMap);
impl_reflect_for_hashmap!(nb_utils::hash::hashbrown::HashMap);

// -----------------------------------------------------------------------------
// Hash sets

macro_rules! impl_reflect_for_hashset {
    ($($set:ident)::+) => {
        impl<T, S> Typed for $($set)::+<T, S>
        where
            T: Reflect + Typed + Eq + Hash,
            S: BuildHasher + Default + Send + Sync + 'static,
        {
            fn type_info() -> &'static TypeInfo {
                static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
                CELL.get_or_insert::<Self>(|| {
                    TypeInfo::Set(SetInfo::new::<Self, T>(collect_seq::<T, Self>))
                })
            }
        }

        impl<T, S> Reflect for $($set)::+<T, S>
        where
            T: Reflect + Typed + Eq + Hash,
            S: BuildHasher + Default + Send + Sync + 'static,
        {
            #[inline]
            fn reflect_ref(&self) -> ReflectRef<'_> {
                ReflectRef::Set(self)
            }
        }

        impl<T, S> Set for $($set)::+<T, S>
        where
            T: Reflect + Typed + Eq + Hash,
            S: BuildHasher + Default + Send + Sync + 'static,
        {
            #[inline]
            fn len(&self) -> usize {
                Self::len(self)
            }

            fn iter(&self) -> Box<dyn Iterator<Item = &dyn Reflect> + '_> {
                Box::new(Self::iter(self).map(Reflect::as_reflect))
            }
        }
    };
}

impl_reflect_for_hashset!(std::collections::HashSet);
impl_reflect_for_hashset!(nb_utils::hash::hashbrown::HashSet);

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::string::String;
    use alloc::vec;
    use std::collections::HashSet;

    use nb_utils::hash::HashMap;

    use crate::Reflect;
    use crate::info::Typed;

    #[test]
    fn fixed_hash_map_builds_from_entries() {
        let info = HashMap::<String, u8>::type_info().as_map().unwrap();
        let entries = vec![
            (String::from("a"), Box::new(1_u8) as Box<dyn Reflect>),
            (String::from("b"), Box::new(2_u8)),
        ];
        let map = info.build(entries).unwrap().take::<HashMap<String, u8>>().unwrap();
        assert_eq!(map.get("b"), Some(&2));
    }

    #[test]
    fn std_set_is_a_set() {
        assert!(HashSet::<i64>::type_info().as_set().is_ok());
        assert!(HashSet::<i64>::type_info().as_list().is_err());
    }
}
