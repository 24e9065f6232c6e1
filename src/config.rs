//! Server configuration

use serde::{Deserialize, Serialize};

/// Cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum memory usage for the caption cache in megabytes
    pub max_memory_mb: usize,

    /// Maximum number of extraction results to cache
    pub max_entries: usize,

    /// Time-to-live for cached results in seconds
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_memory_mb: 64,
            max_entries: 256,
            ttl_secs: 3600, // caption tracks change rarely
        }
    }
}

impl CacheConfig {
    /// Get maximum memory in bytes
    pub fn max_memory_bytes(&self) -> usize {
        self.max_memory_mb * 1024 * 1024
    }
}

/// Extraction tool configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Path to the yt-dlp executable
    pub bin_path: String,

    /// Timeout for a single tool invocation in seconds
    pub timeout_secs: u64,

    /// Language requested when the client does not specify one
    pub default_language: String,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            bin_path: "yt-dlp".to_string(),
            timeout_secs: 120,
            default_language: "en".to_string(),
        }
    }
}

/// Cross-origin policy configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Enable the CORS layer
    pub enabled: bool,

    /// Origins allowed to call the API
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
                "https://localhost:3000".to_string(),
                "https://127.0.0.1:3000".to_string(),
            ],
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Cache configuration
    pub cache: CacheConfig,

    /// Extraction tool configuration
    pub extractor: ExtractorConfig,

    /// Cross-origin policy
    pub cors: CorsConfig,

    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
            cache: CacheConfig::default(),
            extractor: ExtractorConfig::default(),
            cors: CorsConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

impl ServerConfig {
    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
