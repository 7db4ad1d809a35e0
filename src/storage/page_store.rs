use chrono::Utc;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use url::Url;

/// Errors from the page store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to create output directory {path}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("Failed to write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
}

/// Writes fetched pages under one output directory
///
/// Each page lands in a file whose name is derived from the address's path
/// alone, so the layout is deterministic across runs. Two addresses whose
/// paths collapse to the same key silently overwrite each other; that
/// behavior is inherited and kept.
#[derive(Debug)]
pub struct PageStore {
    root: PathBuf,
    label: String,
}

impl PageStore {
    /// Creates the output directory (and parents) if needed
    ///
    /// `label` identifies the crawler in each saved file's provenance header;
    /// the composed user-agent string is the usual choice.
    pub fn new(root: &Path, label: &str) -> Result<Self, StoreError> {
        std::fs::create_dir_all(root).map_err(|source| StoreError::CreateDir {
            path: root.to_path_buf(),
            source,
        })?;

        Ok(Self {
            root: root.to_path_buf(),
            label: label.to_string(),
        })
    }

    /// Persists one page, returning the path it was written to
    ///
    /// The content is prefixed with a one-line HTML comment recording the
    /// crawler label, the fetch time, and the source address.
    pub fn store(&self, address: &Url, body: &str) -> Result<PathBuf, StoreError> {
        let path = self.root.join(file_key(address));

        let header = format!(
            "<!-- saved by {} | {} | {} -->\n",
            self.label,
            Utc::now().to_rfc3339(),
            address
        );

        let mut content = String::with_capacity(header.len() + body.len());
        content.push_str(&header);
        content.push_str(body);

        std::fs::write(&path, content).map_err(|source| StoreError::Write {
            path: path.clone(),
            source,
        })?;

        Ok(path)
    }

    /// The directory pages are written into
    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Derives the file name for an address from its path component
///
/// Segments are joined with `_`, the root path maps to `index`, and `.html`
/// is appended. Query strings are ignored, so `/page?a=1` and `/page?a=2`
/// share a key.
fn file_key(address: &Url) -> String {
    let trimmed = address.path().trim_matches('/');
    let stem = if trimmed.is_empty() { "index" } else { trimmed };
    format!("{}.html", stem.replace('/', "_").trim_end_matches('_'))
}
