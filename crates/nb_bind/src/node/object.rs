use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::mem;
use core::ops::Index;
use core::slice;

use nb_utils::hash::{HashTable, fixed_hash};

use crate::node::Node;

// -----------------------------------------------------------------------------
// JsonObject

/// An insertion-ordered `String -> Node` map.
///
/// Entries live in a vector in arrival order; a hash table of positions gives
/// constant time lookups. Re-inserting a key replaces the value in place, so
/// the key keeps its original position. [`JsonObject::remove`] shifts the
/// following entries and keeps their relative order.
///
/// This is both the fully dynamic object target and the side map of hybrid
/// POJOs.
///
/// # Examples
///
/// ```
/// use nb_bind::node::{JsonObject, Node};
///
/// let mut obj = JsonObject::new();
/// obj.insert("s1", "a");
/// obj.insert("i2", 2);
/// obj.insert("f3", 3.5);
/// obj.insert("s1", "b");
///
/// let keys: Vec<&str> = obj.keys().collect();
/// assert_eq!(keys, ["s1", "i2", "f3"]);
/// assert_eq!(obj.get("s1"), Some(&Node::from("b")));
/// ```
#[derive(Clone, Default)]
pub struct JsonObject {
    entries: Vec<(String, Node)>,
    index: HashTable<usize>,
}

impl JsonObject {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            index: HashTable::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    fn position(&self, key: &str) -> Option<usize> {
        let entries = &self.entries;
        self.index
            .find(fixed_hash(key), |&i| entries[i].0 == key)
            .copied()
    }

    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    pub fn get(&self, key: &str) -> Option<&Node> {
        self.position(key).map(|i| &self.entries[i].1)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Node> {
        self.position(key).map(|i| &mut self.entries[i].1)
    }

    /// Returns the entry at `index` in arrival order.
    #[inline]
    pub fn get_index(&self, index: usize) -> Option<(&str, &Node)> {
        self.entries.get(index).map(|(k, v)| (k.as_str(), v))
    }

    /// Inserts or replaces a value, returning the previous one.
    ///
    /// A new key goes to the end; an existing key keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Node>) -> Option<Node> {
        let key = key.into();
        let value = value.into();
        let hash = fixed_hash(key.as_str());

        let Self { entries, index } = self;
        if let Some(&i) = index.find(hash, |&i| entries[i].0 == key) {
            return Some(mem::replace(&mut entries[i].1, value));
        }

        let position = entries.len();
        index.insert_unique(hash, position, |&i| fixed_hash(entries[i].0.as_str()));
        entries.push((key, value));
        None
    }

    /// Removes a key, preserving the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<Node> {
        let Self { entries, index } = self;
        let slot = index
            .find_entry(fixed_hash(key), |&i| entries[i].0 == key)
            .ok()?;
        let (position, _) = slot.remove();

        let (_, value) = entries.remove(position);
        for i in index.iter_mut() {
            if *i > position {
                *i -= 1;
            }
        }
        Some(value)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }

    /// Iterates entries in arrival order.
    #[inline]
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.entries.iter(),
        }
    }

    #[inline]
    pub fn keys(&self) -> impl ExactSizeIterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    #[inline]
    pub fn values(&self) -> impl ExactSizeIterator<Item = &Node> {
        self.entries.iter().map(|(_, v)| v)
    }

    #[inline]
    pub(crate) fn entries(&self) -> &[(String, Node)] {
        &self.entries
    }
}

impl PartialEq for JsonObject {
    /// Order-sensitive: two objects with the same entries in a different
    /// order are different.
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl fmt::Debug for JsonObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(k, v)| (k, v)))
            .finish()
    }
}

impl Index<&str> for JsonObject {
    type Output = Node;

    /// Returns [`Node::Null`] for absent keys.
    #[inline]
    fn index(&self, key: &str) -> &Node {
        static NULL: Node = Node::Null;
        self.get(key).unwrap_or(&NULL)
    }
}

impl<K: Into<String>, V: Into<Node>> FromIterator<(K, V)> for JsonObject {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut obj = Self::new();
        obj.extend(iter);
        obj
    }
}

impl<K: Into<String>, V: Into<Node>> Extend<(K, V)> for JsonObject {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl IntoIterator for JsonObject {
    type Item = (String, Node);
    type IntoIter = alloc::vec::IntoIter<(String, Node)>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a JsonObject {
    type Item = (&'a str, &'a Node);
    type IntoIter = Iter<'a>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Borrowing iterator over a [`JsonObject`], in arrival order.
pub struct Iter<'a> {
    inner: slice::Iter<'a, (String, Node)>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a Node);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k.as_str(), v))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::JsonObject;
    use crate::node::Node;

    #[test]
    fn keeps_arrival_order() {
        let obj: JsonObject = [("z", 1), ("a", 2), ("m", 3)].into_iter().collect();
        let keys: Vec<&str> = obj.keys().collect();
        assert_eq!(keys, ["z", "a", "m"]);
    }

    #[test]
    fn replace_keeps_position() {
        let mut obj = JsonObject::new();
        obj.insert("a", 1);
        obj.insert("b", 2);
        assert_eq!(obj.insert("a", 10), Some(Node::from(1)));
        assert_eq!(obj.get_index(0), Some(("a", &Node::from(10))));
        assert_eq!(obj.len(), 2);
    }

    #[test]
    fn remove_reindexes() {
        let mut obj: JsonObject = [("a", 1), ("b", 2), ("c", 3), ("d", 4)]
            .into_iter()
            .collect();
        assert_eq!(obj.remove("b"), Some(Node::from(2)));
        assert_eq!(obj.remove("b"), None);

        let keys: Vec<&str> = obj.keys().collect();
        assert_eq!(keys, ["a", "c", "d"]);
        assert_eq!(obj.get("d"), Some(&Node::from(4)));
        assert_eq!(obj["c"], Node::from(3));
        assert!(obj["missing"].is_null());
    }

    #[test]
    fn equality_is_order_sensitive() {
        let ab: JsonObject = [("a", 1), ("b", 2)].into_iter().collect();
        let ba: JsonObject = [("b", 2), ("a", 1)].into_iter().collect();
        assert_ne!(ab, ba);
        assert_eq!(ab, ab.clone());
    }
}
