//! folio-rs: render a blog and a project portfolio from static JSON
//!
//! Posts and projects are read from two JSON documents, normalized once into
//! typed content (tags, sections and blocks) and rendered into HTML fragments.
//! Gist embeds are staged as placeholders and loaded by a script appended to
//! each page.

pub mod collection;
pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod helpers;
pub mod render;
pub mod server;

use anyhow::Result;
use std::path::{Path, PathBuf};

use collection::{Collection, DataSource};
use content::EntityKind;

/// Name of the site configuration file
pub const CONFIG_FILE: &str = "folio.yml";

/// The main Folio application
#[derive(Clone)]
pub struct Folio {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
}

/// Both collections of a site
#[derive(Debug, Clone)]
pub struct Site {
    pub posts: Collection,
    pub projects: Collection,
}

impl Site {
    /// The collection of the given kind
    pub fn collection(&self, kind: EntityKind) -> &Collection {
        match kind {
            EntityKind::Post => &self.posts,
            EntityKind::Project => &self.projects,
        }
    }
}

impl Folio {
    /// Create a new Folio instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(CONFIG_FILE);

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let public_dir = base_dir.join(&config.public_dir);

        Ok(Self {
            config,
            base_dir,
            public_dir,
        })
    }

    /// Where the data documents are read from
    pub fn data_source(&self) -> DataSource {
        DataSource::from_config(&self.base_dir, &self.config)
    }

    /// Load posts and projects concurrently; a failed document yields an empty collection
    pub async fn load(&self) -> Site {
        let source = self.data_source();
        let mut posts = Collection::new(EntityKind::Post).with_sort_order(self.config.sort_order);
        let mut projects = Collection::new(EntityKind::Project);

        tokio::join!(
            posts.load(&source, &self.config.blog_data),
            projects.load(&source, &self.config.projects_data),
        );

        Site { posts, projects }
    }

    /// Render the site into the public directory
    pub async fn render(&self) -> Result<()> {
        commands::render::run(self).await
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}
