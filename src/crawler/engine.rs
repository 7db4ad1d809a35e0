//! Crawl engine - frontier, budget, and the main loop
//!
//! The engine owns the FIFO frontier and the visited set outright; no other
//! component touches them. Each iteration pops one address, fetches it,
//! persists the content, schedules newly discovered same-origin links, and
//! pauses for the politeness delay. The run ends when the frontier drains or
//! the page budget is reached; only an exclusion denial ends it with an
//! error.

use crate::crawler::extractor::extract_links;
use crate::crawler::fetcher::{fetch_page, FetchOutcome};
use crate::robots::crawl_permitted;
use crate::session::CrawlSession;
use crate::storage::PageStore;
use crate::url::origin_label;
use crate::TidepoolError;
use std::collections::{BTreeSet, HashSet, VecDeque};
use std::time::Duration;
use url::Url;

/// How a completed run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlOutcome {
    /// The frontier drained before the budget was spent
    Exhausted,

    /// The scraped-page ceiling was reached
    BudgetReached,
}

impl std::fmt::Display for CrawlOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CrawlOutcome::Exhausted => write!(f, "frontier exhausted"),
            CrawlOutcome::BudgetReached => write!(f, "page budget reached"),
        }
    }
}

/// Final counts reported by a run
#[derive(Debug)]
pub struct CrawlSummary {
    /// Pages fetched and successfully written to the store
    pub pages_scraped: usize,

    /// Pages dequeued and handed to the fetcher, whatever the outcome
    pub pages_attempted: usize,

    /// Which terminal state ended the run
    pub outcome: CrawlOutcome,
}

/// The crawl driver
pub struct CrawlEngine<'a> {
    session: &'a CrawlSession,
    store: PageStore,
    frontier: VecDeque<Url>,
    visited: HashSet<Url>,
    pages_scraped: usize,
    pages_attempted: usize,
}

impl<'a> CrawlEngine<'a> {
    /// Creates an engine with the seed address as the sole frontier entry
    pub fn new(session: &'a CrawlSession, store: PageStore) -> Self {
        let mut frontier = VecDeque::new();
        frontier.push_back(session.seed().clone());

        Self {
            session,
            store,
            frontier,
            visited: HashSet::new(),
            pages_scraped: 0,
            pages_attempted: 0,
        }
    }

    /// Runs the crawl to one of its terminal states
    ///
    /// Consults the exclusion policy once up front; a denial aborts the run
    /// before any page fetch. Per-page failures are logged and skipped, never
    /// fatal.
    pub async fn run(&mut self) -> Result<CrawlSummary, TidepoolError> {
        let config = &self.session.config().crawler;

        if config.ignore_robots {
            tracing::warn!(
                "Exclusion policy check DISABLED by operator configuration (ignore-robots = true)"
            );
        } else if !crawl_permitted(self.session).await {
            return Err(TidepoolError::ExclusionDenied {
                origin: origin_label(self.session.seed()),
            });
        }

        let ceiling = config.max_pages;
        tracing::info!(
            "Starting crawl of {} -> max {} pages",
            self.session.seed(),
            ceiling
        );

        let outcome = loop {
            if self.pages_scraped >= ceiling {
                break CrawlOutcome::BudgetReached;
            }

            let Some(address) = self.frontier.pop_front() else {
                break CrawlOutcome::Exhausted;
            };

            // Already dequeued once before; discard without delay.
            // insert doubles as the visited-set check and the marking.
            if !self.visited.insert(address.clone()) {
                continue;
            }

            self.pages_attempted += 1;
            tracing::info!(
                "Fetching [{}/{}] {}",
                self.pages_scraped + 1,
                ceiling,
                address
            );

            match fetch_page(self.session, &address).await {
                FetchOutcome::Content { body, status } => {
                    tracing::debug!("Fetched {} (HTTP {})", address, status);

                    match self.store.store(&address, &body) {
                        Ok(path) => {
                            self.pages_scraped += 1;
                            tracing::info!("Saved -> {}", path.display());
                        }
                        Err(e) => {
                            tracing::error!("Could not save {}: {}", address, e);
                        }
                    }

                    // Discovery runs relative to the seed, not the page we
                    // just fetched: the crawl never widens past the seed's
                    // origin, redirects included.
                    self.schedule(extract_links(self.session.seed(), &body));
                }

                FetchOutcome::PermanentFailure { status, reason } => {
                    tracing::warn!("Skipping {} (HTTP {}): {}", address, status, reason);
                }

                FetchOutcome::RetryableFailure { last_error } => {
                    tracing::warn!(
                        "Giving up on {} after {} attempt(s): {}",
                        address,
                        config.max_retries,
                        last_error
                    );
                }
            }

            // Politeness pause between iterations, skipped once a terminal
            // state is already certain
            if self.pages_scraped < ceiling && !self.frontier.is_empty() {
                tokio::time::sleep(Duration::from_secs_f64(config.request_delay_secs)).await;
            }
        };

        let summary = CrawlSummary {
            pages_scraped: self.pages_scraped,
            pages_attempted: self.pages_attempted,
            outcome,
        };

        tracing::info!(
            "Done ({}): scraped {} of {} attempted page(s) -> {}",
            summary.outcome,
            summary.pages_scraped,
            summary.pages_attempted,
            self.store.root().display()
        );

        Ok(summary)
    }

    /// Enqueues a discovered batch while the scheduling budget holds
    ///
    /// The ceiling bounds total scheduled work, not just completed work:
    /// frontier length plus already-scraped pages may never exceed it. The
    /// batch arrives sorted, so admission is lexical within each batch.
    fn schedule(&mut self, discovered: BTreeSet<Url>) {
        let ceiling = self.session.config().crawler.max_pages;

        for address in discovered {
            if self.frontier.len() + self.pages_scraped >= ceiling {
                break;
            }
            if self.visited.contains(&address) || self.frontier.contains(&address) {
                continue;
            }
            self.frontier.push_back(address);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, CrawlerConfig, OutputConfig, SiteConfig, UserAgentConfig};
    use tempfile::TempDir;

    fn test_session(max_pages: usize) -> CrawlSession {
        CrawlSession::new(Config {
            site: SiteConfig {
                seed: "https://example.com/".to_string(),
            },
            crawler: CrawlerConfig {
                max_pages,
                request_delay_secs: 0.0,
                max_retries: 3,
                backoff_base: 1,
                ignore_robots: false,
            },
            user_agent: UserAgentConfig {
                crawler_name: "tidepool".to_string(),
                crawler_version: "0.2.0".to_string(),
                contact_url: "https://example.org/bot".to_string(),
            },
            output: OutputConfig {
                directory: "./unused".to_string(),
            },
        })
        .unwrap()
    }

    fn test_engine<'a>(session: &'a CrawlSession, dir: &TempDir) -> CrawlEngine<'a> {
        let store = PageStore::new(dir.path(), "test").unwrap();
        CrawlEngine::new(session, store)
    }

    fn addresses(raw: &[&str]) -> BTreeSet<Url> {
        raw.iter().map(|s| Url::parse(s).unwrap()).collect()
    }

    #[test]
    fn test_new_seeds_frontier() {
        let session = test_session(3);
        let dir = TempDir::new().unwrap();
        let engine = test_engine(&session, &dir);

        assert_eq!(engine.frontier.len(), 1);
        assert_eq!(engine.frontier[0].as_str(), "https://example.com/");
    }

    #[test]
    fn test_schedule_respects_ceiling() {
        let session = test_session(3);
        let dir = TempDir::new().unwrap();
        let mut engine = test_engine(&session, &dir);

        engine.schedule(addresses(&[
            "https://example.com/a",
            "https://example.com/b",
            "https://example.com/c",
            "https://example.com/d",
        ]));

        // Seed already occupies one slot; only two more fit under ceiling 3
        assert_eq!(engine.frontier.len(), 3);
    }

    #[test]
    fn test_schedule_counts_scraped_pages_against_ceiling() {
        let session = test_session(3);
        let dir = TempDir::new().unwrap();
        let mut engine = test_engine(&session, &dir);
        engine.frontier.clear();
        engine.pages_scraped = 2;

        engine.schedule(addresses(&[
            "https://example.com/a",
            "https://example.com/b",
        ]));

        assert_eq!(engine.frontier.len(), 1);
    }

    #[test]
    fn test_schedule_skips_visited() {
        let session = test_session(10);
        let dir = TempDir::new().unwrap();
        let mut engine = test_engine(&session, &dir);
        engine
            .visited
            .insert(Url::parse("https://example.com/a").unwrap());

        engine.schedule(addresses(&[
            "https://example.com/a",
            "https://example.com/b",
        ]));

        assert_eq!(engine.frontier.len(), 2); // seed + /b
        assert!(!engine
            .frontier
            .contains(&Url::parse("https://example.com/a").unwrap()));
    }

    #[test]
    fn test_schedule_skips_frontier_members() {
        let session = test_session(10);
        let dir = TempDir::new().unwrap();
        let mut engine = test_engine(&session, &dir);

        engine.schedule(addresses(&["https://example.com/a"]));
        engine.schedule(addresses(&["https://example.com/a"]));

        assert_eq!(engine.frontier.len(), 2); // seed + /a, once
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(CrawlOutcome::Exhausted.to_string(), "frontier exhausted");
        assert_eq!(
            CrawlOutcome::BudgetReached.to_string(),
            "page budget reached"
        );
    }
}
