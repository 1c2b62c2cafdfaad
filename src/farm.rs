//! Faster (but not DoS-resistant) hashmap
use farmhash;
use std::collections::{HashMap, HashSet};
use std::hash::{Hash, Hasher, BuildHasherDefault};

/// Act like a farmhash
///
/// Farmhash isn't a streaming hash, so each write is hashed seeded with the
/// previous state. Strings write their bytes and then a terminator, and both
/// have to count or every key lands in the same bucket.
pub struct FarmHashLie (u64);

impl Default for FarmHashLie {
    #[inline]
    fn default() -> FarmHashLie { FarmHashLie(0) }
}

impl Hasher for FarmHashLie {
    #[inline]
    fn finish(&self) -> u64 {
        self.0
    }
    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        self.0 = farmhash::hash64_with_seed(bytes, self.0);
    }
}

pub type Farm = BuildHasherDefault<FarmHashLie>;
pub type FarmMap<X, Y> = HashMap<X, Y, Farm>;
pub type FarmSet<X> = HashSet<X, Farm>;

pub fn new_farm<X: Hash+Eq, Y>() -> FarmMap<X, Y> {
    Default::default()
}

pub fn new_farm_set<X: Hash+Eq>() -> FarmSet<X> {
    Default::default()
}
