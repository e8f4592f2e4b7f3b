//! Where data documents are read from

use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::Client;

use crate::config::SiteConfig;
use crate::error::LoadError;
use crate::helpers::join_url;

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// A local data directory or a remote base URL
#[derive(Debug, Clone)]
pub enum DataSource {
    Local(PathBuf),
    Remote { base_url: String, client: Client },
}

impl DataSource {
    /// Local directory source
    pub fn local<P: AsRef<Path>>(dir: P) -> Self {
        DataSource::Local(dir.as_ref().to_path_buf())
    }

    /// Remote source rooted at `base_url`
    pub fn remote(base_url: &str) -> Self {
        let client = Client::builder()
            .user_agent(concat!("folio-rs/", env!("CARGO_PKG_VERSION")))
            .timeout(FETCH_TIMEOUT)
            .build()
            .unwrap_or_else(|e| {
                tracing::error!("Failed to build HTTP client: {}. Using default client.", e);
                Client::new()
            });

        DataSource::Remote {
            base_url: base_url.to_string(),
            client,
        }
    }

    /// `data_url` when configured, otherwise `<base_dir>/<data_dir>`
    pub fn from_config(base_dir: &Path, config: &SiteConfig) -> Self {
        match config.data_url.as_deref().filter(|url| !url.is_empty()) {
            Some(url) => Self::remote(url),
            None => Self::local(base_dir.join(&config.data_dir)),
        }
    }

    /// Human-readable location of a document, for logs
    pub fn describe(&self, file: &str) -> String {
        match self {
            DataSource::Local(dir) => dir.join(file).display().to_string(),
            DataSource::Remote { base_url, .. } => join_url(base_url, file),
        }
    }

    /// Read a document's raw text
    pub async fn fetch(&self, file: &str) -> Result<String, LoadError> {
        match self {
            DataSource::Local(dir) => {
                let path = dir.join(file);
                tokio::fs::read_to_string(&path)
                    .await
                    .map_err(|source| LoadError::Io { path, source })
            }
            DataSource::Remote { base_url, client } => {
                let url = join_url(base_url, file);
                let fetched: Result<String, reqwest::Error> = async {
                    client
                        .get(&url)
                        .send()
                        .await?
                        .error_for_status()?
                        .text()
                        .await
                }
                .await;
                fetched.map_err(|source| LoadError::Http { url, source })
            }
        }
    }
}
