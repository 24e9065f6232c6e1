//! Application state management
//!
//! This module defines the AppState structure that holds:
//! - The caption result cache
//! - Extraction counters for the debug endpoint
//! - Server configuration

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};

use crate::config::ServerConfig;
use crate::http::cache::{CacheStats, CaptionCache};

/// Counters kept since startup
pub struct ServerStats {
    started_at: DateTime<Utc>,
    extractions_succeeded: AtomicU64,
    extractions_failed: AtomicU64,
    cache_hits: AtomicU64,
}

impl ServerStats {
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            extractions_succeeded: AtomicU64::new(0),
            extractions_failed: AtomicU64::new(0),
            cache_hits: AtomicU64::new(0),
        }
    }

    pub fn record_success(&self) {
        self.extractions_succeeded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failure(&self) {
        self.extractions_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn uptime_secs(&self) -> i64 {
        (Utc::now() - self.started_at).num_seconds()
    }

    pub fn extractions_succeeded(&self) -> u64 {
        self.extractions_succeeded.load(Ordering::Relaxed)
    }

    pub fn extractions_failed(&self) -> u64 {
        self.extractions_failed.load(Ordering::Relaxed)
    }

    pub fn cache_hits(&self) -> u64 {
        self.cache_hits.load(Ordering::Relaxed)
    }
}

impl Default for ServerStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Application state shared across all handlers
pub struct AppState {
    /// Finished extraction cache (videoId:language -> entry)
    pub caption_cache: CaptionCache,

    /// Extraction counters
    pub stats: ServerStats,

    /// Server configuration
    pub config: ServerConfig,
}

impl AppState {
    /// Create a new AppState with the given configuration
    pub fn new(config: ServerConfig) -> Self {
        Self {
            caption_cache: CaptionCache::new(config.cache.clone()),
            stats: ServerStats::new(),
            config,
        }
    }

    /// Create AppState with default configuration
    pub fn with_defaults() -> Self {
        Self::new(ServerConfig::default())
    }

    /// Get cache statistics
    pub fn cache_stats(&self) -> CacheStats {
        self.caption_cache.stats()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_defaults()
    }
}
