use ::alloc::boxed::Box;
use ::alloc::collections::{BTreeMap, BTreeSet, VecDeque};
use ::alloc::string::String;
use ::alloc::vec::Vec;

use crate::info::{ArrayInfo, GenericTypeInfoCell, ListInfo, MapInfo, NonGenericTypeInfoCell};
use crate::info::{ScalarInfo, ScalarKind, SetInfo, TypeInfo, Typed, take_value};
use crate::reflection::{List, Map, Set};
use crate::{BindError, Reflect, ReflectRef};

// -----------------------------------------------------------------------------
// Builders

/// Unboxes every element and collects them into `C`.
pub(super) fn collect_seq<T: Reflect + Typed, C: FromIterator<T> + Reflect>(
    items: Vec<Box<dyn Reflect>>,
) -> Result<Box<dyn Reflect>, BindError> {
    items
        .into_iter()
        .map(take_value::<T>)
        .collect::<Result<C, _>>()
        .map(|c| Box::new(c) as Box<dyn Reflect>)
}

/// Unboxes every value and collects the entries into `M`.
pub(super) fn collect_map<V: Reflect + Typed, M: FromIterator<(String, V)> + Reflect>(
    entries: Vec<(String, Box<dyn Reflect>)>,
) -> Result<Box<dyn Reflect>, BindError> {
    entries
        .into_iter()
        .map(|(key, value)| take_value::<V>(value).map(|value| (key, value)))
        .collect::<Result<M, _>>()
        .map(|m| Box::new(m) as Box<dyn Reflect>)
}

// -----------------------------------------------------------------------------
// String

impl Typed for String {
    fn type_info() -> &'static TypeInfo {
        static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
        CELL.get_or_init(|| TypeInfo::Scalar(ScalarInfo::new::<Self>(ScalarKind::String)))
    }
}

impl Reflect for String {
    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Str(self)
    }
}

// -----------------------------------------------------------------------------
// Vec<T>

impl<T: Reflect + Typed> Typed for Vec<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeInfo::List(ListInfo::new::<Self, T>(collect_seq::<T, Self>))
        })
    }
}

impl<T: Reflect + Typed> Reflect for Vec<T> {
    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::List(self)
    }
}

impl<T: Reflect + Typed> List for Vec<T> {
    #[inline]
    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    #[inline]
    fn get(&self, index: usize) -> Option<&dyn Reflect> {
        <[T]>::get(self, index).map(Reflect::as_reflect)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &dyn Reflect> + '_> {
        Box::new(<[T]>::iter(self).map(Reflect::as_reflect))
    }
}

// -----------------------------------------------------------------------------
// VecDeque<T>

impl<T: Reflect + Typed> Typed for VecDeque<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeInfo::List(ListInfo::new::<Self, T>(collect_seq::<T, Self>))
        })
    }
}

impl<T: Reflect + Typed> Reflect for VecDeque<T> {
    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::List(self)
    }
}

impl<T: Reflect + Typed> List for VecDeque<T> {
    #[inline]
    fn len(&self) -> usize {
        VecDeque::len(self)
    }

    #[inline]
    fn get(&self, index: usize) -> Option<&dyn Reflect> {
        VecDeque::get(self, index).map(Reflect::as_reflect)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &dyn Reflect> + '_> {
        Box::new(VecDeque::iter(self).map(Reflect::as_reflect))
    }
}

// -----------------------------------------------------------------------------
// Box<[T]>

impl<T: Reflect + Typed> Typed for Box<[T]> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeInfo::Array(ArrayInfo::new::<Self, T>(None, collect_seq::<T, Self>))
        })
    }
}

impl<T: Reflect + Typed> Reflect for Box<[T]> {
    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::List(self)
    }
}

impl<T: Reflect + Typed> List for Box<[T]> {
    #[inline]
    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    #[inline]
    fn get(&self, index: usize) -> Option<&dyn Reflect> {
        <[T]>::get(self, index).map(Reflect::as_reflect)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &dyn Reflect> + '_> {
        Box::new(<[T]>::iter(self).map(Reflect::as_reflect))
    }
}

// -----------------------------------------------------------------------------
// BTreeSet<T>

impl<T: Reflect + Typed + Ord> Typed for BTreeSet<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::Set(SetInfo::new::<Self, T>(collect_seq::<T, Self>)))
    }
}

impl<T: Reflect + Typed + Ord> Reflect for BTreeSet<T> {
    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Set(self)
    }
}

impl<T: Reflect + Typed + Ord> Set for BTreeSet<T> {
    #[inline]
    fn len(&self) -> usize {
        BTreeSet::len(self)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &dyn Reflect> + '_> {
        Box::new(BTreeSet::iter(self).map(Reflect::as_reflect))
    }
}

// -----------------------------------------------------------------------------
// BTreeMap<String, V>

impl<V: Reflect + Typed> Typed for BTreeMap<String, V> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::Map(MapInfo::new::<Self, V>(collect_map::<V, Self>)))
    }
}

impl<V: Reflect + Typed> Reflect for BTreeMap<String, V> {
    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Map(self)
    }
}

impl<V: Reflect + Typed> Map for BTreeMap<String, V> {
    #[inline]
    fn len(&self) -> usize {
        BTreeMap::len(self)
    }

    #[inline]
    fn get(&self, key: &str) -> Option<&dyn Reflect> {
        BTreeMap::get(self, key).map(Reflect::as_reflect)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = (&str, &dyn Reflect)> + '_> {
        Box::new(BTreeMap::iter(self).map(|(key, value)| (key.as_str(), value.as_reflect())))
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::collections::{BTreeSet, VecDeque};
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;

    use crate::info::{TypeInfo, Typed};
    use crate::{Reflect, ReflectRef};

    #[test]
    fn generic_infos_are_per_instantiation() {
        let a = Vec::<u8>::type_info();
        let b = Vec::<String>::type_info();
        assert!(!core::ptr::eq(a, b));
        assert!(core::ptr::eq(a, Vec::<u8>::type_info()));
        assert!(matches!(Box::<[u8]>::type_info(), TypeInfo::Array(_)));
        assert!(matches!(VecDeque::<u8>::type_info(), TypeInfo::List(_)));
    }

    #[test]
    fn set_collapses_duplicates() {
        let info = BTreeSet::<u32>::type_info().as_set().unwrap();
        let items: Vec<Box<dyn Reflect>> = vec![Box::new(2_u32), Box::new(1_u32), Box::new(2_u32)];
        let set = info.build(items).unwrap().take::<BTreeSet<u32>>().unwrap();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn list_shape_iterates_in_order() {
        let v = vec![3_u8, 1, 2];
        let ReflectRef::List(list) = v.reflect_ref() else {
            panic!("expected a list");
        };
        let seen: Vec<u8> = list
            .iter()
            .map(|item| *item.downcast_ref::<u8>().unwrap())
            .collect();
        assert_eq!(seen, [3, 1, 2]);
        assert_eq!(list.len(), 3);
    }
}
