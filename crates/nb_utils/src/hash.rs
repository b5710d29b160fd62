//! Hash states and hash containers, re-exports *hashbrown* and *foldhash*.
//!
//! [`FixedHashState`] is built on `foldhash` with a fixed seed, so hash results
//! only depend on the input. This keeps key iteration of the containers below
//! reproducible between runs, which matters for deterministic diagnostics.
//!
//! [`NoOpHashState`] passes an already uniform `u64` through unchanged and is
//! meant for keys such as [`TypeId`](core::any::TypeId).

use core::hash::{BuildHasher, Hash, Hasher};

use foldhash::fast::{FixedState, FoldHasher};

pub use foldhash;
pub use hashbrown;

// -----------------------------------------------------------------------------
// FixedHashState

const FIXED_HASH_STATE: FixedState = FixedState::with_seed(0x95EE04C4F326B271);

/// The hasher produced by [`FixedHashState`].
pub type FixedHasher = FoldHasher<'static>;

/// Deterministic hash state based upon a random but fixed seed.
///
/// # Examples
///
/// ```
/// use core::hash::BuildHasher;
/// use nb_utils::hash::FixedHashState;
///
/// let a = FixedHashState.hash_one("name");
/// let b = FixedHashState.hash_one("name");
/// assert_eq!(a, b);
/// ```
#[derive(Copy, Clone, Default, Debug)]
pub struct FixedHashState;

impl BuildHasher for FixedHashState {
    type Hasher = FixedHasher;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        FIXED_HASH_STATE.build_hasher()
    }
}

/// Hash a single value with [`FixedHashState`].
///
/// Used by index tables that store positions instead of keys
/// (see [`HashTable`]), where the same hash must be recomputed on lookup.
#[inline]
pub fn fixed_hash<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = FixedHashState.build_hasher();
    value.hash(&mut hasher);
    hasher.finish()
}

// -----------------------------------------------------------------------------
// NoOpHashState

/// A hasher that stores the last written `u64` as the hash.
///
/// Other writes fold the bytes in, so `write_u32(7)` and `write_u64(7)`
/// agree when called once.
#[derive(Copy, Clone, Default, Debug)]
pub struct NoOpHasher {
    hash: u64,
}

impl Hasher for NoOpHasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.hash
    }

    fn write(&mut self, bytes: &[u8]) {
        for byte in bytes.iter().rev() {
            self.hash = self.hash.rotate_left(8).wrapping_add(*byte as u64);
        }
    }

    #[inline]
    fn write_u64(&mut self, i: u64) {
        self.hash = i;
    }
}

/// Hash state producing [`NoOpHasher`].
///
/// # Examples
///
/// ```
/// use core::hash::BuildHasher;
/// use nb_utils::hash::NoOpHashState;
///
/// assert_eq!(NoOpHashState.hash_one(3_u64), 3);
/// ```
#[derive(Copy, Clone, Default, Debug)]
pub struct NoOpHashState;

impl BuildHasher for NoOpHashState {
    type Hasher = NoOpHasher;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        NoOpHasher { hash: 0 }
    }
}

// -----------------------------------------------------------------------------
// Containers

/// A [`hashbrown::HashMap`] using [`FixedHashState`] by default.
pub type HashMap<K, V, S = FixedHashState> = hashbrown::HashMap<K, V, S>;

/// A [`hashbrown::HashSet`] using [`FixedHashState`] by default.
pub type HashSet<T, S = FixedHashState> = hashbrown::HashSet<T, S>;

/// A raw [`hashbrown::HashTable`]; callers supply hashes, usually from [`fixed_hash`].
pub type HashTable<T> = hashbrown::HashTable<T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_hash_is_stable() {
        assert_eq!(fixed_hash("key"), FixedHashState.hash_one("key"));
        assert_ne!(fixed_hash("key"), fixed_hash("other"));
    }

    #[test]
    fn noop_passes_through() {
        let mut hasher = NoOpHashState.build_hasher();
        hasher.write_u64(0xDEAD_BEEF);
        assert_eq!(hasher.finish(), 0xDEAD_BEEF);

        let mut bytes = NoOpHashState.build_hasher();
        bytes.write_u32(10);
        assert_eq!(bytes.finish(), 10);
    }

    #[test]
    fn map_alias_uses_fixed_state() {
        let mut map: HashMap<&str, i32> = HashMap::default();
        map.insert("a", 1);
        assert_eq!(map.get("a"), Some(&1));
    }
}
