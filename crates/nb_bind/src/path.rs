//! Location tracking for diagnostics.
//!
//! A [`PathSegment`] chain lives on the stack of the recursive decode and
//! encode calls: every step borrows its parent and never mutates it. When
//! tracking is disabled the chain is `None` and [`PathSegment::with_name`] /
//! [`PathSegment::with_index`] return `None` without building anything.
//!
//! Rendering walks to the root and only happens when an error is built.

use alloc::string::String;
use core::fmt::{self, Write};

use smallvec::SmallVec;

// -----------------------------------------------------------------------------
// PathSegment

/// One step of a location chain.
///
/// # Examples
///
/// ```
/// use nb_bind::path::PathSegment;
///
/// let root = PathSegment::Root;
/// let a = PathSegment::with_name(Some(&root), "Doc", "a");
/// let b = PathSegment::with_name(a.as_ref(), "A", "b");
/// let third = PathSegment::with_index(b.as_ref(), "Vec<u8>", 2);
///
/// assert_eq!(third.unwrap().render(), "$.a.b[2]");
/// assert!(PathSegment::with_name(None, "Doc", "a").is_none());
/// ```
#[derive(Debug, Clone, Copy)]
pub enum PathSegment<'a> {
    Root,
    Name {
        parent: &'a PathSegment<'a>,
        /// Type path of the container owning the key.
        owner: &'static str,
        key: &'a str,
    },
    Index {
        parent: &'a PathSegment<'a>,
        /// Type path of the container owning the element.
        owner: &'static str,
        index: usize,
    },
}

impl<'a> PathSegment<'a> {
    /// Returns the root segment if tracking is enabled.
    #[inline]
    pub const fn root(enabled: bool) -> Option<Self> {
        if enabled { Some(Self::Root) } else { None }
    }

    /// Extends `parent` with an object key.
    #[inline(always)]
    pub fn with_name(
        parent: Option<&'a PathSegment<'a>>,
        owner: &'static str,
        key: &'a str,
    ) -> Option<Self> {
        match parent {
            Some(parent) => Some(Self::Name { parent, owner, key }),
            None => None,
        }
    }

    /// Extends `parent` with an array index.
    #[inline(always)]
    pub fn with_index(
        parent: Option<&'a PathSegment<'a>>,
        owner: &'static str,
        index: usize,
    ) -> Option<Self> {
        match parent {
            Some(parent) => Some(Self::Index {
                parent,
                owner,
                index,
            }),
            None => None,
        }
    }

    #[inline]
    pub const fn parent(&self) -> Option<&'a PathSegment<'a>> {
        match self {
            Self::Root => None,
            Self::Name { parent, .. } | Self::Index { parent, .. } => Some(*parent),
        }
    }

    /// Type path of the container this step points into.
    #[inline]
    pub const fn owner(&self) -> Option<&'static str> {
        match self {
            Self::Root => None,
            Self::Name { owner, .. } | Self::Index { owner, .. } => Some(*owner),
        }
    }

    /// Number of steps below the root.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut cursor = self.parent();
        while let Some(segment) = cursor {
            depth += 1;
            cursor = segment.parent();
        }
        depth
    }

    /// Renders the chain root-to-leaf, e.g. `$.babies[1].name`.
    ///
    /// Keys that are empty or contain anything but letters, digits and `_`
    /// use the bracket form `$['a key']`.
    pub fn render(&self) -> String {
        let mut out = String::new();
        // Writing into a `String` cannot fail.
        let _ = self.write_to(&mut out);
        out
    }

    fn write_to(&self, out: &mut impl Write) -> fmt::Result {
        let mut chain: SmallVec<[&PathSegment<'_>; 16]> = SmallVec::new();
        let mut cursor = Some(self);
        while let Some(segment) = cursor {
            chain.push(segment);
            cursor = segment.parent();
        }

        for segment in chain.iter().rev() {
            match segment {
                Self::Root => out.write_char('$')?,
                Self::Name { key, .. } if needs_brackets(key) => {
                    out.write_str("['")?;
                    for ch in key.chars() {
                        if ch == '\\' || ch == '\'' {
                            out.write_char('\\')?;
                        }
                        out.write_char(ch)?;
                    }
                    out.write_str("']")?;
                }
                Self::Name { key, .. } => {
                    out.write_char('.')?;
                    out.write_str(key)?;
                }
                Self::Index { index, .. } => write!(out, "[{index}]")?,
            }
        }
        Ok(())
    }
}

#[inline]
fn needs_brackets(key: &str) -> bool {
    key.is_empty() || !key.chars().all(|c| c.is_alphanumeric() || c == '_')
}

impl fmt::Display for PathSegment<'_> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_to(f)
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::PathSegment;

    #[test]
    fn renders_root_to_leaf() {
        let root = PathSegment::Root;
        let babies = PathSegment::with_name(Some(&root), "Family", "babies");
        let second = PathSegment::with_index(babies.as_ref(), "Vec<Baby>", 1);
        let name = PathSegment::with_name(second.as_ref(), "Baby", "name");

        let name = name.unwrap();
        assert_eq!(name.render(), "$.babies[1].name");
        assert_eq!(name.to_string(), "$.babies[1].name");
        assert_eq!(name.depth(), 3);
        assert_eq!(name.owner(), Some("Baby"));
    }

    #[test]
    fn quotes_unusual_keys() {
        let root = PathSegment::Root;
        let odd = PathSegment::with_name(Some(&root), "Map", "it's a-key").unwrap();
        assert_eq!(odd.render(), r"$['it\'s a-key']");

        let empty = PathSegment::with_name(Some(&root), "Map", "").unwrap();
        assert_eq!(empty.render(), "$['']");
    }

    #[test]
    fn disabled_chain_stays_empty() {
        let root = PathSegment::root(false);
        assert!(root.is_none());
        let child = PathSegment::with_name(root.as_ref(), "Doc", "a");
        assert!(PathSegment::with_index(child.as_ref(), "Doc", 0).is_none());
        assert_eq!(PathSegment::Root.render(), "$");
    }
}
