//! Page persistence
//!
//! The crawl engine hands every successfully fetched body to a [`PageStore`],
//! which writes it under the configured output directory keyed by the
//! address's path. No crawl state lives here; a run starts from scratch.

mod page_store;

pub use page_store::{PageStore, StoreError};
