use parking_lot::RwLock;
use std::{borrow::Borrow, hash::Hash, sync::Arc};

use crate::{error::Result, hash_table::HashTable};

/// Wrapper for a HashTable which is shareable across thread boundaries. The
/// whole table sits behind one reader-writer lock: lookups share it, anything
/// that changes the table takes it exclusively.
pub struct SharedTable<K, V>(Arc<RwLock<HashTable<K, V>>>)
where
    K: Eq + Hash,
    V: Clone;

impl<K, V> SharedTable<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    /// A shared table with the default number of buckets.
    pub fn new() -> Self {
        Self::from_table(HashTable::new())
    }

    /// A shared table with `bucket_count` buckets.
    pub fn with_capacity(bucket_count: usize) -> Self {
        Self::from_table(HashTable::with_capacity(bucket_count))
    }

    /// Wraps a table into a shared table accessor, making it safe to move
    /// across thread boundaries. Enforces an additional constraint of Clone on
    /// values.
    pub fn from_table(table: HashTable<K, V>) -> Self {
        Self(Arc::from(RwLock::from(table)))
    }

    /// Stores a value, returning whatever was there before.
    pub fn set(&self, k: K, v: V) -> Option<V> {
        self.0.write().set(k, v)
    }

    /// Get a value from the table. This clones it to minimize the lock time of
    /// the table.
    pub fn get<Q>(&self, k: &Q) -> Result<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.0.read().get(k).map(V::clone)
    }

    /// Remove a key from the table, returning its value.
    pub fn delete<Q>(&self, k: &Q) -> Result<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.0.write().delete(k)
    }

    pub fn contains<Q>(&self, k: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.0.read().contains(k)
    }

    /// Clears the table.
    pub fn clear(&self) {
        self.0.write().clear()
    }

    /// The number of pairs in the table at present.
    pub fn len(&self) -> usize {
        self.0.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.read().is_empty()
    }

    /// A snapshot of every key, in table iteration order.
    pub fn keys(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.0.read().keys().cloned().collect()
    }

    /// A snapshot of every value, in table iteration order.
    pub fn values(&self) -> Vec<V> {
        self.0.read().values().cloned().collect()
    }
}

impl<K, V> Default for SharedTable<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Clone for SharedTable<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    fn clone(&self) -> Self {
        SharedTable(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use crate::{Error, HashTable, SharedTable};

    #[test]
    fn readme_snippet() {
        let table: SharedTable<usize, usize> = SharedTable::new();
        table.set(1, 1);

        let thread_table = table.clone();
        let r = thread::spawn(move || thread_table.get(&1)).join();

        assert_eq!(Ok(1), r.unwrap());
    }

    #[test]
    fn concurrent_writers() {
        let table: SharedTable<String, usize> = SharedTable::with_capacity(16);

        let handles: Vec<_> = (0..4)
            .map(|t| {
                let table = table.clone();
                thread::spawn(move || {
                    for i in 0..100 {
                        table.set(format!("key-{}-{}", t, i), i);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        // one lock over the whole table, so nothing is lost
        assert_eq!(400, table.len());
        assert_eq!(Ok(42), table.get("key-3-42"));
        assert_eq!(table.keys().len(), table.values().len());
    }

    #[test]
    fn wraps_existing_table() {
        let mut inner = HashTable::new();
        inner.set("a", 1);

        let table = SharedTable::from_table(inner);
        assert!(table.contains("a"));
        assert_eq!(Ok(1), table.delete("a"));
        assert_eq!(Err(Error::KeyNotFound), table.delete("a"));
        assert!(table.is_empty());

        table.set("b", 2);
        table.clear();
        assert_eq!(0, table.len());
    }
}
