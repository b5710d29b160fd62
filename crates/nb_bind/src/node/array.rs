use alloc::vec::Vec;
use core::ops::{Index, IndexMut};
use core::slice;

use crate::node::Node;

// -----------------------------------------------------------------------------
// JsonArray

/// An ordered sequence of [`Node`]s.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JsonArray {
    items: Vec<Node>,
}

impl JsonArray {
    #[inline]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Node> {
        self.items.get(index)
    }

    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Node> {
        self.items.get_mut(index)
    }

    #[inline]
    pub fn push(&mut self, value: impl Into<Node>) {
        self.items.push(value.into());
    }

    /// Removes and returns the element at `index`, shifting the rest.
    #[inline]
    pub fn remove(&mut self, index: usize) -> Option<Node> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, Node> {
        self.items.iter()
    }

    #[inline]
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, Node> {
        self.items.iter_mut()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Node] {
        &self.items
    }

    #[inline]
    pub fn into_vec(self) -> Vec<Node> {
        self.items
    }
}

impl From<Vec<Node>> for JsonArray {
    #[inline]
    fn from(items: Vec<Node>) -> Self {
        Self { items }
    }
}

impl<T: Into<Node>> FromIterator<T> for JsonArray {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl IntoIterator for JsonArray {
    type Item = Node;
    type IntoIter = alloc::vec::IntoIter<Node>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a JsonArray {
    type Item = &'a Node;
    type IntoIter = slice::Iter<'a, Node>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl Index<usize> for JsonArray {
    type Output = Node;

    #[inline]
    fn index(&self, index: usize) -> &Node {
        &self.items[index]
    }
}

impl IndexMut<usize> for JsonArray {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Node {
        &mut self.items[index]
    }
}
