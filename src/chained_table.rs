use std::{
    borrow::Borrow,
    collections::hash_map::DefaultHasher,
    hash::{BuildHasher, BuildHasherDefault, Hash},
    iter, mem, slice,
};

use log::{debug, trace};

use crate::config::{ConfigError, DEFAULT_INITIAL_CAPACITY, DEFAULT_MAX_LOAD_FACTOR, TableConfig};

/// Clears the top bit of a hash so it reads as a non-negative magnitude
const SIGN_MASK: u64 = 0x7FFF_FFFF_FFFF_FFFF;

/// Hasher used when none is supplied. Unseeded, so routing is reproducible across tables.
pub type DefaultBuildHasher = BuildHasherDefault<DefaultHasher>;

/// A key-value pair stored in a bucket
#[derive(Debug, Clone, PartialEq)]
struct Entry<K, V> {
    /// The key in the key-value pair
    key: K,
    /// The value associated with the key
    value: V,
}

/// Chain of entries sharing one routed index
type Bucket<K, V> = Vec<Entry<K, V>>;

/// A hash table resolving collisions by separate chaining.
///
/// Every bucket is a chain of entries. Inserting checks the load factor first and
/// doubles the bucket array when the new entry would push `len / capacity` past
/// the configured maximum. Capacity never shrinks.
///
/// Duplicate keys are accepted: `insert` never overwrites. Lookups return the
/// oldest entry for a key, [`get_all`](Self::get_all) returns all of them.
///
/// Note: This implementation is not thread-safe. Wrap it in a lock for shared access.
#[derive(Debug, Clone)]
pub struct ChainedHashTable<K, V, S = DefaultBuildHasher> {
    /// The bucket array; its length is the capacity
    buckets: Vec<Bucket<K, V>>,
    /// Number of entries across all buckets
    len: usize,
    /// Threshold for `len / capacity` before doubling
    max_load_factor: f64,
    /// Supplies the hash function for keys
    hash_builder: S,
}

/// Allocates `capacity` empty buckets
fn empty_buckets<K, V>(capacity: usize) -> Vec<Bucket<K, V>> {
    iter::repeat_with(Vec::new).take(capacity).collect()
}

/// Reduces a hash to a bucket index in `[0, capacity)`
#[allow(clippy::cast_possible_truncation)]
fn bucket_index(hash: u64, capacity: usize) -> usize {
    let capacity = capacity.max(1) as u64;
    // The remainder is below `capacity`, which came from a usize.
    (hash & SIGN_MASK).checked_rem(capacity).unwrap_or(0) as usize
}

/// Whether holding `len` entries in `capacity` buckets goes over `max_load_factor`
#[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
fn exceeds_load(len: usize, capacity: usize, max_load_factor: f64) -> bool {
    len as f64 / capacity.max(1) as f64 > max_load_factor
}

impl<K, V> ChainedHashTable<K, V, DefaultBuildHasher> {
    /// Creates a table with `initial_capacity` buckets and a 0.75 load factor.
    ///
    /// A capacity of 0 is raised to 1.
    #[must_use]
    pub fn new(initial_capacity: usize) -> Self {
        Self::with_hasher(initial_capacity, DefaultBuildHasher::default())
    }

    /// Creates a table from a validated [`TableConfig`]
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] reported by [`TableConfig::validate`].
    pub fn with_config(config: TableConfig) -> Result<Self, ConfigError> {
        Self::with_config_and_hasher(config, DefaultBuildHasher::default())
    }
}

impl<K, V, S> ChainedHashTable<K, V, S> {
    /// Creates a table with `initial_capacity` buckets that hashes keys with `hash_builder`
    #[must_use]
    pub fn with_hasher(initial_capacity: usize, hash_builder: S) -> Self {
        Self {
            buckets: empty_buckets(initial_capacity.max(1)),
            len: 0,
            max_load_factor: DEFAULT_MAX_LOAD_FACTOR,
            hash_builder,
        }
    }

    /// Creates a table from a validated [`TableConfig`] and a custom hasher
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] reported by [`TableConfig::validate`].
    pub fn with_config_and_hasher(config: TableConfig, hash_builder: S) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            buckets: empty_buckets(config.initial_capacity),
            len: 0,
            max_load_factor: config.max_load_factor,
            hash_builder,
        })
    }

    /// Returns the number of entries in the table
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the table holds no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of buckets
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the threshold the table was built with
    #[must_use]
    pub fn max_load_factor(&self) -> f64 {
        self.max_load_factor
    }

    /// Returns the current ratio of entries to buckets
    #[must_use]
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.buckets.len() as f64
    }

    /// Returns the hasher used to route keys
    #[must_use]
    pub fn hasher(&self) -> &S {
        &self.hash_builder
    }

    /// Removes every entry. The bucket array keeps its size.
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
        self.len = 0;
    }

    /// Returns an iterator over all key-value pairs, bucket by bucket
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter { buckets: self.buckets.iter(), chain: slice::Iter::default() }
    }

    /// Returns the length of every chain, in bucket order
    pub fn chain_lengths(&self) -> impl Iterator<Item = usize> {
        self.buckets.iter().map(Vec::len)
    }

    /// Returns the number of entries in the fullest bucket
    #[must_use]
    pub fn longest_chain(&self) -> usize {
        self.chain_lengths().max().unwrap_or(0)
    }
}

impl<K, V, S> ChainedHashTable<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Maps a key to its bucket index under the current capacity
    #[must_use]
    pub fn route<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Hash + ?Sized,
    {
        self.route_with(key, self.buckets.len())
    }

    /// Maps a key to its bucket index for an arbitrary capacity
    fn route_with<Q: Hash + ?Sized>(&self, key: &Q, capacity: usize) -> usize {
        bucket_index(self.hash_builder.hash_one(key), capacity)
    }

    /// Returns the bucket a key routes to
    fn bucket<Q>(&self, key: &Q) -> Option<&Bucket<K, V>>
    where
        K: Borrow<Q>,
        Q: Hash + ?Sized,
    {
        self.buckets.get(self.route(key))
    }

    /// Returns the bucket a key routes to, mutably
    fn bucket_mut<Q>(&mut self, key: &Q) -> Option<&mut Bucket<K, V>>
    where
        K: Borrow<Q>,
        Q: Hash + ?Sized,
    {
        let index = self.route(key);
        self.buckets.get_mut(index)
    }

    /// Capacity that keeps `prospective_len` entries within the load factor.
    ///
    /// Doubles from the current capacity; stops early if doubling saturates.
    fn growth_target(&self, prospective_len: usize) -> usize {
        let mut capacity = self.buckets.len();
        while exceeds_load(prospective_len, capacity, self.max_load_factor) {
            let doubled = capacity.saturating_mul(2);
            if doubled == capacity {
                break;
            }
            capacity = doubled;
        }
        capacity
    }

    /// Appends a key-value pair to its bucket, growing the table first if needed.
    ///
    /// An existing entry with the same key is left in place; the new one is
    /// chained after it. Always returns `true`.
    pub fn insert(&mut self, key: K, value: V) -> bool {
        let target = self.growth_target(self.len.saturating_add(1));
        if target > self.buckets.len() {
            self.resize(target);
        }

        let Some(bucket) = self.bucket_mut(&key) else {
            return false;
        };
        bucket.push(Entry { key, value });
        self.len = self.len.saturating_add(1);
        true
    }

    /// Retrieve the value of the first entry for a given key
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.bucket(key)?.iter().find(|entry| entry.key.borrow() == key).map(|entry| &entry.value)
    }

    /// Get a mutable reference to the value of the first entry for a given key
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.bucket_mut(key)?
            .iter_mut()
            .find(|entry| entry.key.borrow() == key)
            .map(|entry| &mut entry.value)
    }

    /// Returns every value stored under `key`, oldest first
    pub fn get_all<Q>(&self, key: &Q) -> impl Iterator<Item = &V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.bucket(key)
            .into_iter()
            .flatten()
            .filter(move |entry| entry.key.borrow() == key)
            .map(|entry| &entry.value)
    }

    /// Returns true if at least one entry has the given key
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Removes the first entry whose key and value both match.
    ///
    /// Returns false, leaving the table untouched, when no such entry exists.
    /// An entry with the right key but a different value is not removed.
    pub fn remove<Q>(&mut self, key: &Q, value: &V) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: PartialEq,
    {
        let Some(bucket) = self.bucket_mut(key) else {
            return false;
        };
        let Some(position) =
            bucket.iter().position(|entry| entry.key.borrow() == key && entry.value == *value)
        else {
            return false;
        };

        bucket.remove(position);
        self.len = self.len.saturating_sub(1);
        true
    }

    /// Removes the first entry with the given key and returns its value
    pub fn remove_key<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let bucket = self.bucket_mut(key)?;
        let position = bucket.iter().position(|entry| entry.key.borrow() == key)?;
        let entry = bucket.remove(position);
        self.len = self.len.saturating_sub(1);
        Some(entry.value)
    }

    /// Moves every entry into a new array of `new_capacity` buckets.
    ///
    /// Requests that would not grow the table are ignored. Entries are moved,
    /// not re-looked-up, so duplicate keys keep all their values and their order.
    pub fn resize(&mut self, new_capacity: usize) {
        let old_capacity = self.buckets.len();
        if new_capacity <= old_capacity {
            trace!("ignoring resize to {new_capacity} buckets, table already has {old_capacity}");
            return;
        }

        let mut buckets = empty_buckets(new_capacity);
        for entry in mem::take(&mut self.buckets).into_iter().flatten() {
            let index = self.route_with(&entry.key, new_capacity);
            if let Some(bucket) = buckets.get_mut(index) {
                bucket.push(entry);
            }
        }
        self.buckets = buckets;

        debug!("rehashed {} entries from {old_capacity} to {new_capacity} buckets", self.len);
    }
}

impl<K, V, S> Default for ChainedHashTable<K, V, S>
where
    S: Default,
{
    fn default() -> Self {
        Self::with_hasher(DEFAULT_INITIAL_CAPACITY, S::default())
    }
}

impl<K, V, S> Extend<(K, V)> for ChainedHashTable<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K, V, S> FromIterator<(K, V)> for ChainedHashTable<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut table = Self::default();
        table.extend(iter);
        table
    }
}

/// Iterator over the key-value pairs of the table
#[derive(Debug, Clone)]
pub struct Iter<'a, K, V> {
    /// Buckets not yet visited
    buckets: slice::Iter<'a, Bucket<K, V>>,
    /// Remaining entries of the bucket being visited
    chain: slice::Iter<'a, Entry<K, V>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.chain.next() {
                return Some((&entry.key, &entry.value));
            }
            self.chain = self.buckets.next()?.iter();
        }
    }
}

impl<'a, K, V, S> IntoIterator for &'a ChainedHashTable<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
