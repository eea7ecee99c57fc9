//! Bounded cache of decoded blocks, keyed by block number.

use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;

pub const DEFAULT_CACHE_BLOCKS: usize = 8;

pub type BlockCache = LruCache<usize, Arc<[String]>>;

/// Creates a block cache holding at most `capacity` blocks (at least one).
pub fn block_cache(capacity: usize) -> BlockCache {
    let cap = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
    LruCache::new(cap)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(words: &[&str]) -> Arc<[String]> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_cache_hit_and_miss() {
        let mut cache = block_cache(2);
        assert!(cache.get(&0).is_none());
        cache.put(0, block(&["a", "b"]));
        assert_eq!(&**cache.get(&0).unwrap(), &["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_cache_evicts_least_recent() {
        let mut cache = block_cache(2);
        cache.put(0, block(&["a"]));
        cache.put(1, block(&["b"]));
        // touch 0 so that 1 becomes the eviction candidate
        assert!(cache.get(&0).is_some());
        cache.put(2, block(&["c"]));

        assert!(cache.get(&1).is_none());
        assert!(cache.get(&0).is_some());
        assert!(cache.get(&2).is_some());
    }

    #[test]
    fn test_cache_reinsert_replaces() {
        let mut cache = block_cache(1);
        cache.put(3, block(&["x"]));
        cache.put(3, block(&["y"]));
        assert_eq!(cache.get(&3).unwrap()[0], "y");
        cache.put(4, block(&["z"]));
        assert!(cache.get(&3).is_none());
    }

    #[test]
    fn test_zero_capacity_keeps_one_block() {
        let mut cache = block_cache(0);
        assert_eq!(cache.cap().get(), 1);
        cache.put(7, block(&["q"]));
        assert!(cache.get(&7).is_some());
    }
}
