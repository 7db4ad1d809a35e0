//! Tidepool: a bounded, polite, single-site crawler
//!
//! This crate implements a web crawler that mirrors one site: starting from a
//! seed address it follows same-origin links, fetches pages with retry and
//! backoff, and writes the raw content to a local directory. It stops at a
//! configured page ceiling and honors the site's robots.txt root block.

pub mod config;
pub mod crawler;
pub mod robots;
pub mod session;
pub mod storage;
pub mod url;

use thiserror::Error;

/// Main error type for Tidepool operations
#[derive(Debug, Error)]
pub enum TidepoolError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Crawling of {origin} is forbidden by its exclusion policy")]
    ExclusionDenied { origin: String },

    #[error("Address error: {0}")]
    Address(#[from] AddressError),

    #[error("Storage error: {0}")]
    Store(#[from] storage::StoreError),

    #[error("HTTP client error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Address-specific errors
#[derive(Debug, Error)]
pub enum AddressError {
    #[error("Failed to parse address: {0}")]
    Parse(String),

    #[error("Unsupported scheme: {0}")]
    UnsupportedScheme(String),

    #[error("Missing host in address")]
    MissingHost,
}

/// Result type alias for Tidepool operations
pub type Result<T> = std::result::Result<T, TidepoolError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{CrawlOutcome, CrawlSummary, FetchOutcome};
pub use session::CrawlSession;
pub use url::{normalize_address, origin_label, same_origin};
