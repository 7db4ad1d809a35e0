use serde::Deserialize;

/// Main configuration structure for Tidepool
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub site: SiteConfig,
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
}

/// Target site configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Absolute seed URL the crawl starts from; its origin bounds the crawl
    pub seed: String,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Ceiling on successfully saved pages; also bounds scheduled work
    #[serde(rename = "max-pages")]
    pub max_pages: usize,

    /// Fixed pause between successive page fetches (seconds)
    #[serde(rename = "request-delay-secs")]
    pub request_delay_secs: f64,

    /// Maximum fetch attempts per page
    #[serde(rename = "max-retries")]
    pub max_retries: u32,

    /// Base of the exponential inter-attempt backoff (seconds)
    #[serde(rename = "backoff-base")]
    pub backoff_base: u32,

    /// Skip the robots.txt check entirely. Only with site-owner permission.
    #[serde(rename = "ignore-robots", default)]
    pub ignore_robots: bool,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler; also the identity matched against robots.txt sections
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory the fetched pages are written into
    pub directory: String,
}
