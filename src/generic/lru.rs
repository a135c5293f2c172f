/*!
A bounded, associative least-recently-used cache.

Used to memoise the binary and unary operations over [zdd](crate::zdd) nodes
(clause multiplication, tautology removal, subsumed-clause removal, superset
removal). Each cache entry owns a clone of every [Node](crate::zdd::Node)
handle it stores, key and value alike — under reference counting this clone
*is* the protection an operation cache must hold over otherwise-unreferenced
diagram nodes, so eviction (a plain `remove`) is all that is required to
release it.
*/

use std::collections::HashMap;
use std::hash::Hash;

/// A fixed-capacity LRU map from `K` to `V`.
///
/// Recency is tracked via an explicit doubly-linked order vector rather than
/// an intrusive list, which keeps the implementation free of unsafe code at
/// the cost of an `O(n)` move on each touch. Caches used by this crate are
/// capped small (see [Config](crate::config::Config)) so this is not a
/// hot-path concern.
pub struct LruCache<K, V> {
    capacity: usize,
    map: HashMap<K, V>,
    /// Order of keys from least to most recently used.
    order: Vec<K>,
}

impl<K: Eq + Hash + Clone, V> LruCache<K, V> {
    /// Builds a cache capable of holding at most `capacity` entries.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero: a zero-capacity cache can never retain
    /// an entry and so is always a configuration mistake rather than a
    /// meaningful degenerate case.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "LruCache requires a nonzero capacity");
        Self {
            capacity,
            map: HashMap::with_capacity(capacity),
            order: Vec::with_capacity(capacity),
        }
    }

    fn touch(&mut self, key: &K) {
        if let Some(pos) = self.order.iter().position(|k| k == key) {
            let k = self.order.remove(pos);
            self.order.push(k);
        }
    }

    /// Looks up `key`, promoting it to most-recently-used on a hit.
    pub fn try_get(&mut self, key: &K) -> Option<&V> {
        if self.map.contains_key(key) {
            self.touch(key);
            self.map.get(key)
        } else {
            None
        }
    }

    /// Inserts or overwrites `key` with `value`.
    ///
    /// Returns the evicted `(key, value)` pair when:
    /// - the cache was at capacity and a fresh key displaced the
    ///   least-recently-used entry, or
    /// - `key` already held a (different) value, which is handed back so the
    ///   caller can release anything it was holding on the value's behalf.
    pub fn add(&mut self, key: K, value: V) -> Option<(K, V)> {
        if let Some(prev) = self.map.insert(key.clone(), value) {
            self.touch(&key);
            return Some((key, prev));
        }
        self.order.push(key.clone());

        if self.map.len() > self.capacity {
            let lru_key = self.order.remove(0);
            let lru_value = self.map.remove(&lru_key).expect("order/map desync");
            return Some((lru_key, lru_value));
        }
        None
    }

    /// Number of entries currently held.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn respects_capacity() {
        let mut cache: LruCache<u32, u32> = LruCache::new(2);
        assert!(cache.add(1, 10).is_none());
        assert!(cache.add(2, 20).is_none());
        let evicted = cache.add(3, 30);
        assert_eq!(evicted, Some((1, 10)));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn try_get_promotes_to_mru() {
        let mut cache: LruCache<u32, u32> = LruCache::new(2);
        cache.add(1, 10);
        cache.add(2, 20);
        // touch 1, so 2 becomes LRU
        assert_eq!(cache.try_get(&1), Some(&10));
        let evicted = cache.add(3, 30);
        assert_eq!(evicted, Some((2, 20)));
    }

    #[test]
    fn overwrite_returns_previous_value() {
        let mut cache: LruCache<u32, u32> = LruCache::new(4);
        cache.add(1, 10);
        let evicted = cache.add(1, 11);
        assert_eq!(evicted, Some((1, 10)));
        assert_eq!(cache.try_get(&1), Some(&11));
        assert_eq!(cache.len(), 1);
    }
}
