//! Configuration file support
//!
//! Loads server configuration from TOML files. Every section and every
//! field is optional; missing values fall back to the built-in defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::config::{CacheConfig, CorsConfig, ExtractorConfig, ServerConfig};

/// Configuration file format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Server settings
    pub server: Option<ServerSettings>,
    /// Extraction tool settings
    pub extractor: Option<ExtractorSettings>,
    /// Cache settings
    pub cache: Option<CacheSettings>,
    /// Cross-origin settings
    pub cors: Option<CorsSettings>,
    /// Logging settings
    pub logging: Option<LoggingSettings>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Host address to bind to
    pub host: Option<String>,
    /// Port to listen on
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorSettings {
    /// Path to the yt-dlp executable
    pub bin_path: Option<String>,
    /// Timeout for a single tool invocation in seconds
    pub timeout_secs: Option<u64>,
    /// Language used when a request does not specify one
    pub default_language: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheSettings {
    /// Maximum memory usage in MB
    pub max_memory_mb: Option<usize>,
    /// Maximum number of cached extraction results
    pub max_entries: Option<usize>,
    /// TTL for cached results in seconds
    pub ttl_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsSettings {
    /// Enable the CORS layer
    pub enabled: Option<bool>,
    /// Origins allowed to call the API
    pub allowed_origins: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log level (trace, debug, info, warn, error)
    pub level: Option<String>,
    /// Output format (json, pretty)
    pub format: Option<String>,
}

impl ConfigFile {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: ConfigFile = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), content)?;
        Ok(())
    }

    /// Generate default configuration file
    pub fn default_config() -> Self {
        let defaults = ServerConfig::default();
        Self {
            server: Some(ServerSettings {
                host: Some(defaults.host),
                port: Some(defaults.port),
            }),
            extractor: Some(ExtractorSettings {
                bin_path: Some(defaults.extractor.bin_path),
                timeout_secs: Some(defaults.extractor.timeout_secs),
                default_language: Some(defaults.extractor.default_language),
            }),
            cache: Some(CacheSettings {
                max_memory_mb: Some(defaults.cache.max_memory_mb),
                max_entries: Some(defaults.cache.max_entries),
                ttl_secs: Some(defaults.cache.ttl_secs),
            }),
            cors: Some(CorsSettings {
                enabled: Some(defaults.cors.enabled),
                allowed_origins: Some(defaults.cors.allowed_origins),
            }),
            logging: Some(LoggingSettings {
                level: Some(defaults.log_level),
                format: Some("pretty".to_string()),
            }),
        }
    }

    /// Convert to ServerConfig
    pub fn into_server_config(self) -> ServerConfig {
        let server_defaults = ServerConfig::default();
        let cache_defaults = CacheConfig::default();
        let extractor_defaults = ExtractorConfig::default();
        let cors_defaults = CorsConfig::default();
        ServerConfig {
            host: self
                .server
                .as_ref()
                .and_then(|s| s.host.clone())
                .unwrap_or(server_defaults.host),
            port: self
                .server
                .as_ref()
                .and_then(|s| s.port)
                .unwrap_or(server_defaults.port),
            cache: self
                .cache
                .map(|c| CacheConfig {
                    max_memory_mb: c.max_memory_mb.unwrap_or(cache_defaults.max_memory_mb),
                    max_entries: c.max_entries.unwrap_or(cache_defaults.max_entries),
                    ttl_secs: c.ttl_secs.unwrap_or(cache_defaults.ttl_secs),
                })
                .unwrap_or_default(),
            extractor: self
                .extractor
                .map(|e| ExtractorConfig {
                    bin_path: e.bin_path.unwrap_or(extractor_defaults.bin_path),
                    timeout_secs: e.timeout_secs.unwrap_or(extractor_defaults.timeout_secs),
                    default_language: e
                        .default_language
                        .unwrap_or(extractor_defaults.default_language),
                })
                .unwrap_or_default(),
            cors: self
                .cors
                .map(|c| CorsConfig {
                    enabled: c.enabled.unwrap_or(cors_defaults.enabled),
                    allowed_origins: c.allowed_origins.unwrap_or(cors_defaults.allowed_origins),
                })
                .unwrap_or_default(),
            log_level: self
                .logging
                .and_then(|l| l.level)
                .unwrap_or_else(|| "info".to_string()),
        }
    }
}

/// Generate default configuration file at the specified path
pub fn generate_default_config<P: AsRef<Path>>(path: P) -> Result<(), Box<dyn std::error::Error>> {
    let config = ConfigFile::default_config();
    config.to_file(path)?;
    Ok(())
}
