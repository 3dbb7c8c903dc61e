//! HashTable: separate chaining over `LinkedList` buckets.

use crate::error::{Error, Result};
use crate::linked_list::LinkedList;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::iter::Flatten;
use core::mem;
use hashbrown::hash_map::DefaultHashBuilder;

/// Bucket count of a table built with `new` or `with_hasher`.
pub const DEFAULT_CAPACITY: usize = 16;

/// The table doubles once `len > capacity * LOAD_FACTOR`.
pub const LOAD_FACTOR: f64 = 0.75;

#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
}

type Bucket<K, V> = LinkedList<Entry<K, V>>;

/// Non-negative reduction of the 32 low hash bits onto `capacity` buckets.
#[inline]
fn bucket_index<S, Q>(hasher: &S, q: &Q, capacity: usize) -> usize
where
    S: BuildHasher,
    Q: ?Sized + Hash,
{
    let hash = hasher.hash_one(q) as u32 & 0x7FFF_FFFF;
    hash as usize % capacity
}

fn empty_buckets<K, V>(capacity: usize) -> Vec<Bucket<K, V>> {
    (0..capacity).map(|_| LinkedList::new()).collect()
}

/// Chained hash table.
///
/// Each key lives in exactly one entry, in the bucket its hash selects
/// under the current capacity. New keys go to the head of their chain.
/// Capacity starts as a power of two and only ever doubles.
pub struct HashTable<K, V, S = DefaultHashBuilder> {
    hasher: S,
    buckets: Vec<Bucket<K, V>>,
    len: usize,
}

impl<K, V> HashTable<K, V>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        Self::with_hasher(Default::default())
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

impl<K, V, S> HashTable<K, V, S> {
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current number of buckets.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Iterate in bucket order, then chain order within each bucket.
    /// The order is not preserved across a resize.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            it: self.buckets.iter().flatten(),
            remaining: self.len,
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            it: self.buckets.iter_mut().flatten(),
            remaining: self.len,
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.iter().map(|(_, v)| v)
    }

    /// Apply `visit` to every pair, in `iter` order.
    pub fn for_each<F>(&self, mut visit: F)
    where
        F: FnMut(&K, &V),
    {
        for (k, v) in self.iter() {
            visit(k, v);
        }
    }

    /// Remove every entry. Capacity is kept.
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
        self.len = 0;
    }
}

impl<K, V, S> HashTable<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    pub fn with_hasher(hasher: S) -> Self {
        Self {
            hasher,
            buckets: empty_buckets(DEFAULT_CAPACITY),
            len: 0,
        }
    }

    /// Start with `capacity` buckets, which must be a non-zero power of two.
    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Result<Self> {
        if !capacity.is_power_of_two() {
            return Err(Error::InvalidArgument(
                "capacity must be a non-zero power of two",
            ));
        }
        Ok(Self {
            hasher,
            buckets: empty_buckets(capacity),
            len: 0,
        })
    }

    fn bucket_of<Q>(&self, q: &Q) -> usize
    where
        Q: ?Sized + Hash,
    {
        bucket_index(&self.hasher, q, self.buckets.len())
    }

    /// Insert or update. An existing entry keeps its key and chain
    /// position and has its value replaced; the old value is returned.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        let idx = self.bucket_of(&key);
        let bucket = &mut self.buckets[idx];
        if let Some(entry) = bucket.iter_mut().find(|e| e.key == key) {
            return Some(mem::replace(&mut entry.value, value));
        }
        bucket.push_front(Entry { key, value });
        self.len += 1;

        if self.len as f64 > self.buckets.len() as f64 * LOAD_FACTOR {
            self.resize();
        }
        None
    }

    pub fn get<Q>(&self, q: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.buckets[self.bucket_of(q)]
            .iter()
            .find(|e| e.key.borrow() == q)
            .map(|e| &e.value)
    }

    pub fn get_mut<Q>(&mut self, q: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let idx = self.bucket_of(q);
        self.buckets[idx]
            .iter_mut()
            .find(|e| e.key.borrow() == q)
            .map(|e| &mut e.value)
    }

    pub fn contains_key<Q>(&self, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.buckets[self.bucket_of(q)]
            .iter()
            .any(|e| e.key.borrow() == q)
    }

    pub fn remove<Q>(&mut self, q: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let idx = self.bucket_of(q);
        let entry = self.buckets[idx].remove_first_where(|e| e.key.borrow() == q)?;
        self.len -= 1;
        Some(entry.value)
    }

    /// Double the bucket count and rehash every entry.
    ///
    /// Old chains are drained front to back onto the heads of the new
    /// chains, so keys that share a bucket before and after come out in
    /// reverse relative order.
    fn resize(&mut self) {
        let new_capacity = self.buckets.len() * 2;
        tracing::debug!(
            from = self.buckets.len(),
            to = new_capacity,
            len = self.len,
            "resizing hash table"
        );
        let old = mem::replace(&mut self.buckets, empty_buckets(new_capacity));
        for bucket in old {
            for entry in bucket {
                let idx = bucket_index(&self.hasher, &entry.key, new_capacity);
                self.buckets[idx].push_front(entry);
            }
        }
    }
}

impl<K, V, S> fmt::Debug for HashTable<K, V, S>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, S> Extend<(K, V)> for HashTable<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.put(k, v);
        }
    }
}

impl<K, V, S> FromIterator<(K, V)> for HashTable<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::with_hasher(S::default());
        table.extend(iter);
        table
    }
}

/// Iterator over immutable entries in `HashTable`.
pub struct Iter<'a, K, V> {
    it: Flatten<core::slice::Iter<'a, Bucket<K, V>>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let e: &'a Entry<K, V> = self.it.next()?;
        self.remaining -= 1;
        Some((&e.key, &e.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

/// Iterator over mutable entries in `HashTable`. Keys stay immutable.
pub struct IterMut<'a, K, V> {
    it: Flatten<core::slice::IterMut<'a, Bucket<K, V>>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let e: &'a mut Entry<K, V> = self.it.next()?;
        self.remaining -= 1;
        Some((&e.key, &mut e.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}

impl<'a, K, V, S> IntoIterator for &'a HashTable<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;
    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[derive(Clone, Default)]
    struct ConstBuildHasher;
    struct ConstHasher;
    impl BuildHasher for ConstBuildHasher {
        type Hasher = ConstHasher;
        fn build_hasher(&self) -> Self::Hasher {
            ConstHasher
        }
    }
    impl core::hash::Hasher for ConstHasher {
        fn write(&mut self, _bytes: &[u8]) {}
        fn finish(&self) -> u64 {
            0
        } // every key lands in bucket 0
    }

    /// Invariant: `put` on an existing key replaces the value in place and
    /// does not change `len`.
    #[test]
    fn put_updates_existing_key() {
        let mut t: HashTable<&str, i32> = HashTable::new();
        assert_eq!(t.put("A", 1), None);
        assert_eq!(t.put("B", 2), None);
        assert_eq!(t.put("A", 3), Some(1));
        assert_eq!(t.get("A"), Some(&3));
        assert_eq!(t.len(), 2);
    }

    /// Invariant: the 13th insert into 16 buckets exceeds 0.75 and doubles
    /// capacity; every key stays reachable.
    #[test]
    fn resize_happens_past_load_factor() {
        let mut t: HashTable<u32, u32> = HashTable::new();
        for i in 0..12 {
            t.put(i, i * 10);
        }
        assert_eq!(t.capacity(), DEFAULT_CAPACITY);
        t.put(12, 120);
        assert_eq!(t.capacity(), 32);
        assert_eq!(t.len(), 13);
        for i in 0..13 {
            assert_eq!(t.get(&i), Some(&(i * 10)));
        }
    }

    /// Invariant: chains are head-inserted, and a resize drains each chain
    /// onto new chain heads, reversing the relative order.
    #[test]
    fn chain_order_reverses_across_resize() {
        let mut t: HashTable<u32, (), ConstBuildHasher> = HashTable::with_hasher(ConstBuildHasher);
        for i in 0..12 {
            t.put(i, ());
        }
        let before: Vec<u32> = t.keys().copied().collect();
        assert_eq!(before, (0..12).rev().collect::<Vec<_>>());

        t.put(12, ());
        assert_eq!(t.capacity(), 32);
        let after: Vec<u32> = t.keys().copied().collect();
        assert_eq!(after, (0..13).collect::<Vec<_>>());
    }

    #[test]
    fn capacity_must_be_power_of_two() {
        for bad in [0usize, 3, 12, 100] {
            let r: Result<HashTable<u8, u8, ConstBuildHasher>> =
                HashTable::with_capacity_and_hasher(bad, ConstBuildHasher);
            assert!(matches!(r, Err(Error::InvalidArgument(_))), "capacity {bad}");
        }
        let t: HashTable<u8, u8, ConstBuildHasher> =
            HashTable::with_capacity_and_hasher(4, ConstBuildHasher).unwrap();
        assert_eq!(t.capacity(), 4);
    }

    /// Invariant: removal returns the stored value once, then reports absence.
    #[test]
    fn remove_returns_value_then_none() {
        let mut t: HashTable<String, i32> = HashTable::new();
        t.put("k".to_string(), 7);
        assert!(t.contains_key("k"));
        assert_eq!(t.remove("k"), Some(7));
        assert_eq!(t.remove("k"), None);
        assert!(!t.contains_key("k"));
        assert!(t.is_empty());
    }

    /// Invariant: removal from the middle of a colliding chain keeps the rest.
    #[test]
    fn remove_inside_collision_chain() {
        let mut t: HashTable<&str, i32, ConstBuildHasher> = HashTable::with_hasher(ConstBuildHasher);
        t.put("a", 1);
        t.put("b", 2);
        t.put("c", 3);
        assert_eq!(t.remove(&"b"), Some(2));
        assert_eq!(t.get(&"a"), Some(&1));
        assert_eq!(t.get(&"c"), Some(&3));
        assert_eq!(t.keys().copied().collect::<Vec<_>>(), vec!["c", "a"]);
    }

    /// Invariant: removing the head, middle and tail of one chain leaves the
    /// other entries reachable and `len` exact.
    #[test]
    fn remove_each_chain_position() {
        let mut t: HashTable<u32, u32, ConstBuildHasher> = HashTable::with_hasher(ConstBuildHasher);
        for i in 0..5 {
            t.put(i, i * 2);
        }
        // chain order is 4, 3, 2, 1, 0
        assert_eq!(t.remove(&4), Some(8));
        assert_eq!(t.remove(&2), Some(4));
        assert_eq!(t.remove(&0), Some(0));
        assert_eq!(t.remove(&0), None);
        assert_eq!(t.len(), 2);
        assert_eq!(t.keys().copied().collect::<Vec<_>>(), vec![3, 1]);
        assert_eq!(t.get(&3), Some(&6));
        assert_eq!(t.get(&1), Some(&2));
    }

    #[test]
    fn get_mut_and_iter_mut_write_through() {
        let mut t: HashTable<&str, i32> = [("x", 1), ("y", 2)].into_iter().collect();
        *t.get_mut("x").unwrap() += 40;
        for (_, v) in t.iter_mut() {
            *v += 1;
        }
        assert_eq!(t.get("x"), Some(&42));
        assert_eq!(t.get("y"), Some(&3));
    }

    #[test]
    fn for_each_visits_every_pair_once() {
        let t: HashTable<u16, u16> = (0..40).map(|i| (i, i + 1)).collect();
        let mut seen = BTreeMap::new();
        t.for_each(|k, v| {
            assert!(seen.insert(*k, *v).is_none());
        });
        assert_eq!(seen.len(), 40);
        assert!(seen.iter().all(|(k, v)| *v == k + 1));
        assert_eq!(t.iter().len(), 40);
    }

    #[test]
    fn clear_keeps_capacity() {
        let mut t: HashTable<u32, u32> = (0..100).map(|i| (i, i)).collect();
        let cap = t.capacity();
        assert!(cap > DEFAULT_CAPACITY);
        t.clear();
        assert!(t.is_empty());
        assert_eq!(t.capacity(), cap);
        assert_eq!(t.get(&5), None);
    }
}
