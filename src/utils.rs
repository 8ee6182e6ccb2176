//! Utility traits for `ChainedHashTable`

use crate::ChainedHashTable;
use std::{
    borrow::Borrow,
    hash::{BuildHasher, Hash},
};

/// Extension trait for map implementations that provides additional utility methods
pub trait TableExtensions<K, V> {
    /// Returns the keys of the table as a Vec, one per entry
    fn keys(&self) -> Vec<K>;

    /// Returns the values of the table as a Vec
    fn values(&self) -> Vec<V>;

    /// Returns how many entries share the given key
    fn occurrences<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized;
}

impl<K, V, S> TableExtensions<K, V> for ChainedHashTable<K, V, S>
where
    K: Eq + Hash + Clone,
    V: Clone,
    S: BuildHasher,
{
    fn keys(&self) -> Vec<K> {
        self.iter().map(|(k, _)| k.clone()).collect()
    }

    fn values(&self) -> Vec<V> {
        self.iter().map(|(_, v)| v.clone()).collect()
    }

    fn occurrences<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get_all(key).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_and_values() {
        let mut table = ChainedHashTable::new(4);
        table.insert("a".to_string(), 1);
        table.insert("b".to_string(), 2);
        table.insert("c".to_string(), 3);

        let mut keys = table.keys();
        keys.sort(); // Sort for predictable comparison

        let mut values = table.values();
        values.sort_unstable();

        assert_eq!(keys, vec!["a".to_string(), "b".to_string(), "c".to_string()]);
        assert_eq!(values, vec![1, 2, 3]);
    }

    #[test]
    fn test_occurrences() {
        let mut table = ChainedHashTable::new(4);
        table.insert("a".to_string(), 1);
        table.insert("a".to_string(), 2);
        table.insert("b".to_string(), 3);

        assert_eq!(table.occurrences("a"), 2);
        assert_eq!(table.occurrences("b"), 1);
        assert_eq!(table.occurrences("c"), 0);
        assert_eq!(table.keys().len(), 3);
    }
}
