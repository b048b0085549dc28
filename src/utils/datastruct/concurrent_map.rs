use std::collections::BTreeMap;
use std::fmt::Debug;
use std::ops::{Deref, DerefMut};

use num::PrimInt;
use parking_lot::{MappedMutexGuard, Mutex, MutexGuard};

use crate::config::DEFAULT_SHARD_COUNT;

/// ConcurrentMap
/// Ordered map split into independently locked shards.
/// A key lives in shard `key mod shard_count`, so writers touching keys in
/// different shards never contend.
///
/// Only integer keys are supported.
///
/// # Examples
/// ```
/// use search_server::ConcurrentMap;
/// let map: ConcurrentMap<i32, f64> = ConcurrentMap::new();
/// *map.access(3) += 0.5;
/// *map.access(3) += 0.25;
/// assert_eq!(map.build_ordinary_map().get(&3), Some(&0.75));
/// ```
#[derive(Debug)]
pub struct ConcurrentMap<K, V> {
    shards: Box<[Mutex<BTreeMap<K, V>>]>,
}

/// Scoped access to one value of a [`ConcurrentMap`].
/// The owning shard stays locked until this is dropped.
pub struct Access<'a, V> {
    value: MappedMutexGuard<'a, V>,
}

impl<V> Deref for Access<'_, V> {
    type Target = V;

    #[inline]
    fn deref(&self) -> &V {
        &self.value
    }
}

impl<V> DerefMut for Access<'_, V> {
    #[inline]
    fn deref_mut(&mut self) -> &mut V {
        &mut self.value
    }
}

impl<K, V> ConcurrentMap<K, V>
where
    K: PrimInt + Debug,
{
    /// Map with [`DEFAULT_SHARD_COUNT`] shards
    pub fn new() -> Self {
        Self::with_shard_count(DEFAULT_SHARD_COUNT)
    }

    /// Map with `shard_count` shards, at least one.
    pub fn with_shard_count(shard_count: usize) -> Self {
        let shards = (0..shard_count.max(1))
            .map(|_| Mutex::new(BTreeMap::new()))
            .collect::<Vec<_>>()
            .into_boxed_slice();
        Self { shards }
    }

    #[inline]
    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    /// Shard owning `key`.
    /// Negative keys wrap with euclidean remainder so every key has a shard.
    #[inline]
    fn shard_index(&self, key: K) -> usize {
        let count = self.shards.len() as i128;
        key.to_i128()
            .map_or(0, |k| k.rem_euclid(count) as usize)
    }

    /// Locks the shard owning `key` and hands out its value,
    /// inserting `V::default()` first when the key is absent.
    ///
    /// # Arguments
    /// * `key` - key to update
    ///
    /// # Returns
    /// * `Access<V>` - guard dereferencing to the value; the shard unlocks on drop
    #[inline]
    pub fn access(&self, key: K) -> Access<'_, V>
    where
        V: Default,
    {
        let guard = self.shards[self.shard_index(key)].lock();
        Access {
            value: MutexGuard::map(guard, |map| map.entry(key).or_default()),
        }
    }

    /// Removes `key`, returning its value if it was present.
    #[inline]
    pub fn erase(&self, key: K) -> Option<V> {
        self.shards[self.shard_index(key)].lock().remove(&key)
    }

    /// Number of entries across all shards.
    /// Shards are counted one after another, not under a single lock.
    pub fn len(&self) -> usize {
        self.shards.iter().map(|shard| shard.lock().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.shards.iter().all(|shard| shard.lock().is_empty())
    }

    /// Merges every shard into one ordered map.
    /// Each shard is locked in turn; the result is consistent only once all
    /// writers are done.
    pub fn build_ordinary_map(&self) -> BTreeMap<K, V>
    where
        V: Clone,
    {
        let mut result = BTreeMap::new();
        for shard in self.shards.iter() {
            let shard = shard.lock();
            result.extend(shard.iter().map(|(key, value)| (*key, value.clone())));
        }
        result
    }

    /// Consumes the map and merges the shards without cloning.
    pub fn into_ordinary_map(self) -> BTreeMap<K, V> {
        let mut result = BTreeMap::new();
        for shard in self.shards.into_vec() {
            result.append(&mut shard.into_inner());
        }
        result
    }
}

impl<K, V> Default for ConcurrentMap<K, V>
where
    K: PrimInt + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}
