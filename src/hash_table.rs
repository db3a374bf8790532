//! A separate-chaining hash table: a fixed row of [`LinkedList`] buckets,
//! with each key's pair living in the bucket its hash points at.

use std::{
    borrow::Borrow,
    collections::hash_map::RandomState,
    fmt,
    hash::{BuildHasher, Hash, Hasher},
    iter::FromIterator,
    mem, slice,
};

use log::{debug, trace};

use crate::{
    error::{Error, Result},
    linked_list::{self, LinkedList},
};

/// Number of buckets a table gets when none is asked for.
pub const DEFAULT_BUCKET_COUNT: usize = 8;

/// A chain of pairs which all hashed to the same bucket.
type Bucket<K, V> = LinkedList<(K, V)>;

/// An associative map which resolves collisions by chaining pairs together
/// in a linked list per bucket.
///
/// The number of buckets is fixed when the table is made and the table never
/// rehashes, however full it gets. Lookups, insertions, and removals only ever
/// walk the one bucket a key hashes to, so they are O(1) on average and
/// O(bucket length) at worst.
///
/// Iteration goes bucket by bucket in index order, and front to back within
/// each bucket. That order has nothing to do with insertion order.
///
/// This is not thread-safe. For shared access wrap it in a `SharedTable`.
pub struct HashTable<K, V> {
    buckets: Box<[Bucket<K, V>]>,
    // keys hash the same way for as long as this table lives
    hash_builder: RandomState,
}

impl<K, V> HashTable<K, V>
where
    K: Eq + Hash,
{
    /// Makes an empty table with [`DEFAULT_BUCKET_COUNT`] buckets.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_BUCKET_COUNT)
    }

    /// Makes an empty table with `bucket_count` buckets. A table always has
    /// at least one bucket, so zero is bumped up to one.
    pub fn with_capacity(bucket_count: usize) -> Self {
        let bucket_count = bucket_count.max(1);
        let buckets = (0..bucket_count)
            .map(|_| LinkedList::new())
            .collect::<Vec<_>>()
            .into_boxed_slice();

        debug!("allocated hash table with {} buckets", bucket_count);

        Self {
            buckets,
            hash_builder: RandomState::new(),
        }
    }

    /// The bucket `key` is (or would be) stored in.
    pub fn bucket_index<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut h = self.hash_builder.build_hasher();
        key.hash(&mut h);

        // the remainder is below the bucket count, so it fits back in a usize
        (h.finish() % self.buckets.len() as u64) as usize
    }

    /// Returns the value stored under `key`.
    pub fn get<Q>(&self, key: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.bucket(key)
            .find(|(k, _)| k.borrow() == key)
            .map(|(_, v)| v)
            .ok_or(Error::KeyNotFound)
    }

    /// Returns a mutable reference to the value stored under `key`.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Result<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.bucket_mut(key)
            .find_mut(|(k, _)| k.borrow() == key)
            .map(|(_, v)| v)
            .ok_or(Error::KeyNotFound)
    }

    /// Stores `value` under `key`. If the key was already present its value is
    /// overwritten where it sits in the chain and the old value is returned;
    /// the key stored first is kept. Otherwise the pair goes on the tail of
    /// its bucket.
    pub fn set(&mut self, key: K, value: V) -> Option<V> {
        let idx = self.bucket_index(&key);
        let bucket = &mut self.buckets[idx];

        if let Some(pair) = bucket.find_mut(|(k, _)| *k == key) {
            trace!("updating value in bucket {}", idx);
            return Some(mem::replace(&mut pair.1, value));
        }

        trace!("appending pair to bucket {} ({} chained)", idx, bucket.len());
        bucket.append((key, value));
        None
    }

    /// Removes `key` and returns the value that was stored under it.
    pub fn delete<Q>(&mut self, key: &Q) -> Result<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = self.bucket_index(key);

        // an empty bucket and a bucket without the key both mean the same
        // thing from out here
        let (_, value) = self.buckets[idx]
            .remove_first(|(k, _)| k.borrow() == key)
            .map_err(|_| Error::KeyNotFound)?;

        trace!("deleted pair from bucket {}", idx);
        Ok(value)
    }

    /// Whether `key` has a pair in the table. Only the key's own bucket is
    /// searched.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.bucket(key).iter().any(|(k, _)| k.borrow() == key)
    }

    fn bucket<Q>(&self, key: &Q) -> &Bucket<K, V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        &self.buckets[self.bucket_index(key)]
    }

    fn bucket_mut<Q>(&mut self, key: &Q) -> &mut Bucket<K, V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = self.bucket_index(key);
        &mut self.buckets[idx]
    }
}

impl<K, V> HashTable<K, V> {
    /// The number of pairs in the table. The total isn't cached anywhere, so
    /// this sums the length of every bucket.
    pub fn len(&self) -> usize {
        self.buckets.iter().map(LinkedList::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(LinkedList::is_empty)
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Pairs per bucket. Purely informational; nothing ever acts on it.
    pub fn load_factor(&self) -> f64 {
        self.len() as f64 / self.bucket_count() as f64
    }

    /// Drops every pair, keeping the buckets.
    pub fn clear(&mut self) {
        for bucket in self.buckets.iter_mut() {
            bucket.clear();
        }
    }

    /// Iterates over every key in the table.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.iter().map(|(k, _)| k)
    }

    /// Iterates over every value in the table, in the same order as
    /// [`keys`](Self::keys).
    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.iter().map(|(_, v)| v)
    }

    /// Iterates over every pair, bucket by bucket.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            buckets: self.buckets.iter(),
            chain: None,
        }
    }
}

impl<K, V> Default for HashTable<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Extend<(K, V)> for HashTable<K, V>
where
    K: Eq + Hash,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.set(k, v);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for HashTable<K, V>
where
    K: Eq + Hash,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut table = Self::new();
        table.extend(iter);
        table
    }
}

impl<'a, K, V> IntoIterator for &'a HashTable<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V> fmt::Display for HashTable<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HashTable({})", self.len())
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for HashTable<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Iterator over the pairs of a [`HashTable`].
pub struct Iter<'a, K, V> {
    buckets: slice::Iter<'a, Bucket<K, V>>,
    chain: Option<linked_list::Iter<'a, (K, V)>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((k, v)) = self.chain.as_mut().and_then(Iterator::next) {
                return Some((k, v));
            }

            // current chain ran dry, move on to the next bucket
            self.chain = Some(self.buckets.next()?.iter());
        }
    }
}
