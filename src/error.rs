//! Errors raised while loading data documents

use std::path::PathBuf;
use thiserror::Error;

/// Failure to obtain or parse a JSON data document.
///
/// `Collection::load` recovers from all of these by logging and staying empty;
/// the typed error exists so callers that load documents directly can react.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to fetch {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("invalid JSON document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("document has no `{0}` array")]
    MissingKey(&'static str),
}
