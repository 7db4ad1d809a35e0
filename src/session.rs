//! Crawl session: configuration plus the shared HTTP transport
//!
//! A `CrawlSession` is built once at startup and passed by reference to every
//! component. It carries the validated configuration, the normalized seed
//! address, the composed user-agent string, the shared `reqwest::Client`, and
//! any credentials sourced from the environment. Nothing in the crawler
//! touches process-wide state.

use crate::config::Config;
use crate::url::normalize_address;
use crate::TidepoolError;
use reqwest::{redirect::Policy, Client, RequestBuilder};
use std::time::Duration;
use url::Url;

/// Environment variable holding the basic-auth user name
pub const ENV_AUTH_USER: &str = "TIDEPOOL_AUTH_USER";
/// Environment variable holding the basic-auth password
pub const ENV_AUTH_PASS: &str = "TIDEPOOL_AUTH_PASS";
/// Environment variable holding a bearer token
pub const ENV_BEARER_TOKEN: &str = "TIDEPOOL_BEARER_TOKEN";

/// Basic-auth credentials, sourced from the environment only
#[derive(Clone)]
pub struct BasicCredentials {
    pub user: String,
    pub pass: String,
}

impl std::fmt::Debug for BasicCredentials {
    // Never echo the password into logs
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicCredentials")
            .field("user", &self.user)
            .field("pass", &"<redacted>")
            .finish()
    }
}

/// Shared state for one crawl run
#[derive(Debug)]
pub struct CrawlSession {
    config: Config,
    seed: Url,
    client: Client,
    user_agent: String,
    credentials: Option<BasicCredentials>,
    bearer_token: Option<String>,
}

impl CrawlSession {
    /// Builds a session from a validated configuration
    ///
    /// Normalizes the seed, constructs the HTTP client with the composed
    /// user-agent string, and picks up optional credentials from the
    /// environment.
    pub fn new(config: Config) -> Result<Self, TidepoolError> {
        let seed = normalize_address(&config.site.seed)?;

        // Format: CrawlerName/Version (+ContactURL)
        let user_agent = format!(
            "{}/{} (+{})",
            config.user_agent.crawler_name,
            config.user_agent.crawler_version,
            config.user_agent.contact_url
        );

        let client = Client::builder()
            .user_agent(&user_agent)
            .timeout(Duration::from_secs(20))
            .connect_timeout(Duration::from_secs(10))
            .redirect(Policy::limited(10))
            .gzip(true)
            .brotli(true)
            .build()?;

        let credentials = match (
            std::env::var(ENV_AUTH_USER).ok(),
            std::env::var(ENV_AUTH_PASS).ok(),
        ) {
            (Some(user), Some(pass)) => {
                tracing::info!("Basic auth credentials loaded from environment");
                Some(BasicCredentials { user, pass })
            }
            _ => None,
        };

        let bearer_token = std::env::var(ENV_BEARER_TOKEN).ok();
        if bearer_token.is_some() {
            tracing::info!("Bearer token loaded from environment");
        }

        Ok(Self {
            config,
            seed,
            client,
            user_agent,
            credentials,
            bearer_token,
        })
    }

    /// Starts a GET request for the given address with auth headers applied
    ///
    /// The bearer token is applied last and wins over basic auth if both are
    /// present in the environment.
    pub fn request(&self, address: Url) -> RequestBuilder {
        let mut request = self.client.get(address);

        if let Some(creds) = &self.credentials {
            request = request.basic_auth(&creds.user, Some(&creds.pass));
        }

        if let Some(token) = &self.bearer_token {
            request = request.bearer_auth(token);
        }

        request
    }

    /// The normalized seed address
    pub fn seed(&self) -> &Url {
        &self.seed
    }

    /// The loaded configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The identity matched against robots.txt user-agent sections
    pub fn identity(&self) -> &str {
        &self.config.user_agent.crawler_name
    }

    /// The full user-agent string sent with every request
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}
