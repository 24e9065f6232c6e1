//! Caption result cache
//!
//! Keeps finished extractions in memory so repeated requests for the same
//! video and language do not re-run the extraction tool. Entries expire
//! after a TTL and are evicted least-recently-used first when the memory
//! or entry limit is reached.

use dashmap::DashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::SystemTime;

use crate::config::CacheConfig;
use crate::extractor::Extraction;

/// Cache entry with metadata
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub extraction: Extraction,
    pub created_at: SystemTime,
    pub last_accessed: SystemTime,
    pub access_count: usize,
}

impl CacheEntry {
    pub fn new(extraction: Extraction) -> Self {
        let now = SystemTime::now();
        Self {
            extraction,
            created_at: now,
            last_accessed: now,
            access_count: 1,
        }
    }

    pub fn touch(&mut self) {
        self.last_accessed = SystemTime::now();
        self.access_count += 1;
    }

    pub fn age_secs(&self) -> u64 {
        self.created_at.elapsed().map(|d| d.as_secs()).unwrap_or(0)
    }

    pub fn is_expired(&self, ttl_secs: u64) -> bool {
        self.age_secs() > ttl_secs
    }

    /// Bytes this entry accounts for against the memory limit.
    fn size(&self) -> usize {
        self.extraction.srt_content.len()
    }
}

/// In-memory cache of finished extractions
pub struct CaptionCache {
    /// Cache entries (key -> entry)
    entries: DashMap<String, CacheEntry>,
    /// Current memory usage in bytes
    memory_bytes: AtomicUsize,
    /// Cache configuration
    config: CacheConfig,
}

impl CaptionCache {
    /// Create a new caption cache
    pub fn new(config: CacheConfig) -> Self {
        Self {
            entries: DashMap::new(),
            memory_bytes: AtomicUsize::new(0),
            config,
        }
    }

    /// Generate cache key from components
    pub fn make_key(video_id: &str, language: &str) -> String {
        format!("{}:{}", video_id, language)
    }

    /// Get a cached extraction
    pub fn get(&self, video_id: &str, language: &str) -> Option<Extraction> {
        let key = Self::make_key(video_id, language);

        if let Some(mut entry) = self.entries.get_mut(&key) {
            if entry.is_expired(self.config.ttl_secs) {
                return None;
            }
            entry.touch();
            Some(entry.extraction.clone())
        } else {
            None
        }
    }

    /// Check if an extraction is cached
    pub fn contains(&self, video_id: &str, language: &str) -> bool {
        let key = Self::make_key(video_id, language);
        self.entries.contains_key(&key)
    }

    /// Cache a finished extraction
    pub fn insert(&self, extraction: Extraction) {
        let key = Self::make_key(&extraction.video_id, &extraction.language);
        let entry = CacheEntry::new(extraction);
        let size = entry.size();

        // Check memory limit before inserting
        let current = self.memory_bytes.load(Ordering::Relaxed);
        if current + size > self.config.max_memory_bytes() {
            self.evict_if_needed(size);
        }

        // Check entry count limit
        if self.entries.len() >= self.config.max_entries {
            self.evict_if_needed(size);
        }

        if let Some(old) = self.entries.insert(key, entry) {
            self.memory_bytes.fetch_sub(old.size(), Ordering::Relaxed);
        }
        self.memory_bytes.fetch_add(size, Ordering::Relaxed);
    }

    /// Evict entries if needed to make room for new data
    fn evict_if_needed(&self, needed_size: usize) {
        let mut freed = 0;
        let target = self.config.max_memory_bytes() / 2;

        // First, remove expired entries
        self.entries.retain(|_, entry| {
            if entry.is_expired(self.config.ttl_secs) {
                freed += entry.size();
                false
            } else {
                true
            }
        });
        self.memory_bytes.fetch_sub(freed, Ordering::Relaxed);

        let over_memory = self.memory_bytes.load(Ordering::Relaxed) + needed_size
            > self.config.max_memory_bytes();
        let over_count = self.entries.len() >= self.config.max_entries;

        // If still over a limit, remove by LRU
        if over_memory || over_count {
            let mut entries: Vec<_> = self
                .entries
                .iter()
                .map(|e| (e.key().clone(), e.value().last_accessed, e.value().size()))
                .collect();
            entries.sort_by_key(|(_, last_accessed, _)| *last_accessed);

            let mut to_remove = Vec::new();
            freed = 0;

            for (key, _, size) in entries {
                let remaining = self.entries.len() - to_remove.len();
                let memory_ok = !over_memory || freed >= target;
                let count_ok = remaining < self.config.max_entries;
                if memory_ok && count_ok {
                    break;
                }
                to_remove.push(key);
                freed += size;
            }

            for key in to_remove {
                if let Some((_, entry)) = self.entries.remove(&key) {
                    self.memory_bytes.fetch_sub(entry.size(), Ordering::Relaxed);
                }
            }
        }
    }

    /// Clear all expired entries
    pub fn clear_expired(&self) {
        let mut freed = 0;
        self.entries.retain(|_, entry| {
            if entry.is_expired(self.config.ttl_secs) {
                freed += entry.size();
                false
            } else {
                true
            }
        });
        self.memory_bytes.fetch_sub(freed, Ordering::Relaxed);
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        let mut count = 0;
        let mut total_size = 0;
        let mut oldest_age = 0;

        for entry in self.entries.iter() {
            count += 1;
            total_size += entry.value().size();
            let age = entry.value().age_secs();
            if age > oldest_age {
                oldest_age = age;
            }
        }

        CacheStats {
            entry_count: count,
            total_size_bytes: total_size,
            memory_limit_bytes: self.config.max_memory_bytes(),
            oldest_entry_age_secs: oldest_age,
        }
    }

    /// Get the number of cached entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if cache is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get current memory usage in bytes
    pub fn memory_usage(&self) -> usize {
        self.memory_bytes.load(Ordering::Relaxed)
    }
}

/// Cache statistics
#[derive(Debug)]
pub struct CacheStats {
    pub entry_count: usize,
    pub total_size_bytes: usize,
    pub memory_limit_bytes: usize,
    pub oldest_entry_age_secs: u64,
}

impl Default for CaptionCache {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}
