//! Exclusion-policy (robots.txt) handling
//!
//! The crawler asks one question of the target site before any page fetch:
//! may an automated agent crawl this origin at all? The answer is fail-open;
//! an absent or unreachable policy document means no restriction.

mod evaluator;

pub use evaluator::{ExclusionRule, ExclusionRuleSet};

use crate::session::CrawlSession;
use std::time::Duration;

/// Checks whether the session's seed origin permits crawling
///
/// Fetches `/robots.txt` from the seed's origin and evaluates it with
/// [`ExclusionRuleSet`]. Any failure along the way (unreachable host,
/// non-success status, unreadable body) is treated as permission: absence
/// of policy means no restriction.
pub async fn crawl_permitted(session: &CrawlSession) -> bool {
    let robots_url = match session.seed().join("/robots.txt") {
        Ok(url) => url,
        Err(e) => {
            tracing::warn!("Could not build robots.txt address: {} -> assuming allowed", e);
            return true;
        }
    };

    let response = match session
        .request(robots_url)
        .timeout(Duration::from_secs(10))
        .send()
        .await
    {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!("Failed to fetch robots.txt: {} -> assuming allowed", e);
            return true;
        }
    };

    if !response.status().is_success() {
        tracing::warn!(
            "robots.txt not available ({}) -> assuming allowed",
            response.status()
        );
        return true;
    }

    let document = match response.text().await {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!("Failed to read robots.txt body: {} -> assuming allowed", e);
            return true;
        }
    };

    let rules = ExclusionRuleSet::parse(&document, session.identity());
    if rules.blocks_root() {
        tracing::error!("robots.txt disallows the site root -> crawling is forbidden");
        false
    } else {
        tracing::info!(
            "robots.txt checked ({} applicable rule(s)) -> crawling allowed",
            rules.rules().len()
        );
        true
    }
}
