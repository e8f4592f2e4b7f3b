//! Site configuration (folio.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::collection::SortOrder;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub author: String,
    pub language: String,

    // URL
    pub url: String,
    pub root: String,
    /// Page that lists projects; tag links point at `<work_page>?tags=<tag>`
    pub work_page: String,

    // Data
    pub data_dir: String,
    /// When set, documents are fetched from `<data_url>/<file>` instead of `data_dir`
    pub data_url: Option<String>,
    pub blog_data: String,
    pub projects_data: String,

    // Output
    pub public_dir: String,

    // Display
    pub date_format: String,
    pub sort_order: SortOrder,

    #[serde(default)]
    pub gist: GistConfig,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Folio".to_string(),
            author: "John Doe".to_string(),
            language: "en".to_string(),

            url: "http://example.com".to_string(),
            root: "/".to_string(),
            work_page: "work.html".to_string(),

            data_dir: "data".to_string(),
            data_url: None,
            blog_data: "blog.json".to_string(),
            projects_data: "projects.json".to_string(),

            public_dir: "public".to_string(),

            date_format: "MMMM D, YYYY".to_string(),
            sort_order: SortOrder::Newest,

            gist: GistConfig::default(),
            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// Gist embedding configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GistConfig {
    /// Delay before the embedded frame is measured
    pub measure_delay_ms: u64,
    /// Frame height in pixels when measuring fails
    pub fallback_height: u32,
    /// Style sheet injected into every gist frame
    pub style_override: String,
}

impl Default for GistConfig {
    fn default() -> Self {
        Self {
            measure_delay_ms: 500,
            fallback_height: 400,
            style_override: concat!(
                "body{margin:0;padding:0;background:transparent;}",
                ".gist{font-size:13px;}",
                ".gist .gist-file{margin-bottom:0!important;border-radius:6px!important;}",
                ".gist .blob-wrapper{max-height:none!important;}",
                ".gist .gist-meta{display:none!important;}"
            )
            .to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.blog_data, "blog.json");
        assert_eq!(config.projects_data, "projects.json");
        assert_eq!(config.sort_order, SortOrder::Newest);
        assert_eq!(config.gist.measure_delay_ms, 500);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: My Portfolio
author: Test User
data_url: https://example.com/data
sort_order: oldest
gist:
  fallback_height: 250
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "My Portfolio");
        assert_eq!(config.author, "Test User");
        assert_eq!(config.data_url.as_deref(), Some("https://example.com/data"));
        assert_eq!(config.sort_order, SortOrder::Oldest);
        assert_eq!(config.gist.fallback_height, 250);
        assert_eq!(config.gist.measure_delay_ms, 500);
        assert_eq!(config.public_dir, "public");
    }
}
