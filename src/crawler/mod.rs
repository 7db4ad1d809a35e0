//! Crawler module - fetching, link discovery, and the crawl engine
//!
//! The engine drives everything: it consults the exclusion policy once,
//! then loops fetch -> persist -> discover -> pause until the frontier
//! drains or the page budget is spent.

mod engine;
mod extractor;
mod fetcher;

pub use engine::{CrawlEngine, CrawlOutcome, CrawlSummary};
pub use extractor::extract_links;
pub use fetcher::{fetch_page, FetchOutcome};

use crate::session::CrawlSession;
use crate::storage::PageStore;
use crate::Result;
use std::path::Path;

/// Runs a complete crawl for the given session
///
/// Creates the page store under the configured output directory and drives
/// the engine to a terminal state. The only error a well-configured run can
/// return is an exclusion denial.
pub async fn crawl(session: &CrawlSession) -> Result<CrawlSummary> {
    let store = PageStore::new(
        Path::new(&session.config().output.directory),
        session.user_agent(),
    )?;

    let mut engine = CrawlEngine::new(session, store);
    engine.run().await
}
