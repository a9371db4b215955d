//! L1 in-memory cache using moka.
//!
//! TinyLFU admission policy with idle and absolute TTLs. Keys combine the
//! provider name with a blake3 hash of the text, so vectors from different
//! providers never mix.

use std::time::Duration;

use moka::sync::Cache;

/// L1 in-memory embedding cache.
pub struct L1MemoryCache {
    cache: Cache<String, Vec<f32>>,
}

impl L1MemoryCache {
    /// Create a new L1 cache with the given max entry count.
    pub fn new(max_entries: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_entries)
            .time_to_idle(Duration::from_secs(3600))
            .time_to_live(Duration::from_secs(86400))
            .build();

        Self { cache }
    }

    /// Cache key for `text` embedded by `provider`.
    pub fn key(provider: &str, text: &str) -> String {
        format!("{provider}:{}", blake3::hash(text.as_bytes()).to_hex())
    }

    pub fn get(&self, key: &str) -> Option<Vec<f32>> {
        self.cache.get(key)
    }

    pub fn insert(&self, key: String, embedding: Vec<f32>) {
        self.cache.insert(key, embedding);
    }

    /// Number of entries currently in the cache.
    pub fn len(&self) -> u64 {
        self.cache.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Invalidate all entries.
    pub fn clear(&self) {
        self.cache.invalidate_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_get() {
        let cache = L1MemoryCache::new(100);
        let key = L1MemoryCache::key("tfidf", "a poet from baghdad");
        cache.insert(key.clone(), vec![1.0, 2.0, 3.0]);
        assert_eq!(cache.get(&key), Some(vec![1.0, 2.0, 3.0]));
    }

    #[test]
    fn keys_differ_per_provider() {
        assert_ne!(
            L1MemoryCache::key("tfidf", "same text"),
            L1MemoryCache::key("all-minilm", "same text")
        );
    }

    #[test]
    fn clear_empties_cache() {
        let cache = L1MemoryCache::new(100);
        cache.insert("a".to_string(), vec![1.0]);
        cache.clear();
        // moka may not immediately reflect invalidation in entry_count,
        // but get should return None.
        assert_eq!(cache.get("a"), None);
    }
}
