//! Configuration loading and validation
//!
//! Tidepool is configured through a single TOML file describing the target
//! site, the crawl limits, the user-agent identity, and the output location.
//! The file content is hashed at load time so runs can be tied to the exact
//! configuration that produced them.

mod parser;
mod types;
mod validation;

pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use types::{Config, CrawlerConfig, OutputConfig, SiteConfig, UserAgentConfig};
pub use validation::validate;
