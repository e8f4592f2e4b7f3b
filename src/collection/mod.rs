//! In-memory collections of posts and projects
//!
//! A [`Collection`] starts out empty, is filled once by [`Collection::load`]
//! and afterwards only changes order. Filtering and lookup return borrowed
//! views; rendering goes through the views in [`crate::render`].

mod source;

pub use source::DataSource;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

use crate::config::SiteConfig;
use crate::content::{tags, Entity, EntityKind};
use crate::error::LoadError;
use crate::render::{self, Fragment};

/// Date order of a collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
}

impl SortOrder {
    /// The opposite order
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Newest => SortOrder::Oldest,
            SortOrder::Oldest => SortOrder::Newest,
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Newest => f.write_str("newest"),
            SortOrder::Oldest => f.write_str("oldest"),
        }
    }
}

/// Whether a collection has been loaded
#[derive(Debug, Clone, Default)]
pub enum CollectionState {
    #[default]
    Empty,
    Loaded(Vec<Entity>),
}

/// Posts or projects, as loaded from one data document
#[derive(Debug, Clone)]
pub struct Collection {
    kind: EntityKind,
    state: CollectionState,
    sort_order: SortOrder,
}

impl Collection {
    /// Create an empty collection
    pub fn new(kind: EntityKind) -> Self {
        Self {
            kind,
            state: CollectionState::Empty,
            sort_order: SortOrder::default(),
        }
    }

    /// Set the order applied to posts when they are loaded
    pub fn with_sort_order(mut self, order: SortOrder) -> Self {
        self.sort_order = order;
        self
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn state(&self) -> &CollectionState {
        &self.state
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.state, CollectionState::Loaded(_))
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    /// Entities in their current order; empty before loading
    pub fn entities(&self) -> &[Entity] {
        match &self.state {
            CollectionState::Empty => &[],
            CollectionState::Loaded(entities) => entities,
        }
    }

    pub fn len(&self) -> usize {
        self.entities().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities().is_empty()
    }

    /// Fetch and parse `file` from `source`.
    ///
    /// Failures are logged and leave the collection as it was; this never
    /// returns an error.
    pub async fn load(&mut self, source: &DataSource, file: &str) -> &[Entity] {
        let location = source.describe(file);
        tracing::debug!("Loading {}s from {}", self.kind, location);

        let parsed = match source.fetch(file).await {
            Ok(text) => parse_document(self.kind, &text),
            Err(e) => Err(e),
        };

        match parsed {
            Ok(entities) => {
                tracing::info!("Loaded {} {}s from {}", entities.len(), self.kind, location);
                self.set_entities(entities);
            }
            Err(e) => {
                tracing::error!("Failed to load {}s from {}: {}", self.kind, location, e);
            }
        }

        self.entities()
    }

    /// Replace the contents; posts are put in the configured date order
    pub fn set_entities(&mut self, entities: Vec<Entity>) {
        self.state = CollectionState::Loaded(entities);
        if self.kind == EntityKind::Post {
            self.sort(self.sort_order);
        }
    }

    /// Stable sort by date; entities with the same date keep their relative order
    pub fn sort(&mut self, order: SortOrder) {
        self.sort_order = order;
        if let CollectionState::Loaded(entities) = &mut self.state {
            match order {
                SortOrder::Newest => entities.sort_by(|a, b| b.date.cmp(&a.date)),
                SortOrder::Oldest => entities.sort_by(|a, b| a.date.cmp(&b.date)),
            }
        }
    }

    /// Flip between newest-first and oldest-first, returning the new order
    pub fn toggle_sort_order(&mut self) -> SortOrder {
        let order = self.sort_order.toggled();
        self.sort(order);
        order
    }

    /// Entities tagged with `tag` (case-insensitive); `all` keeps everything
    pub fn filter_by_tag(&self, tag: &str) -> Vec<&Entity> {
        self.entities()
            .iter()
            .filter(|entity| entity.tags.matches(tag))
            .collect()
    }

    /// First entity whose id or slug is `token`
    pub fn get(&self, token: &str) -> Option<&Entity> {
        self.entities()
            .iter()
            .find(|entity| entity.is_identified_by(token))
    }

    /// Entities flagged as featured
    pub fn featured(&self) -> Vec<&Entity> {
        self.entities().iter().filter(|e| e.featured).collect()
    }

    /// Every tag used in the collection, sorted
    pub fn all_tags(&self) -> Vec<String> {
        tags::collect_all(self.entities().iter().map(|e| &e.tags))
    }

    /// Category mapping merged over the collection
    pub fn tags_by_category(&self) -> BTreeMap<String, Vec<String>> {
        tags::collect_by_category(self.entities().iter().map(|e| &e.tags))
    }

    /// List view of the entities matching `tag`: full posts, or project cards
    pub fn render_list(&self, tag: &str, config: &SiteConfig) -> Fragment {
        let mut out = Fragment::new();
        for entity in self.filter_by_tag(tag) {
            let rendered = match self.kind {
                EntityKind::Post => render::render_post(entity, config),
                EntityKind::Project => render::render_project_card(entity),
            };
            out.append(rendered);
        }
        out
    }

    /// Detail view of one entity, looked up by id or slug
    pub fn render_detail(&self, token: &str, config: &SiteConfig) -> Option<Fragment> {
        let entity = self.get(token)?;
        Some(match self.kind {
            EntityKind::Post => render::render_post(entity, config),
            EntityKind::Project => render::render_project_page(entity, config),
        })
    }
}

/// Parse a `{"posts": [...]}` or `{"projects": [...]}` document.
///
/// Entries that do not deserialize are skipped with a warning.
pub fn parse_document(kind: EntityKind, json: &str) -> Result<Vec<Entity>, LoadError> {
    let mut document: Value = serde_json::from_str(json)?;
    let key = kind.document_key();

    let items = match document.get_mut(key).map(Value::take) {
        Some(Value::Array(items)) => items,
        _ => return Err(LoadError::MissingKey(key)),
    };

    let entities = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value::<Entity>(item) {
            Ok(entity) => Some(entity),
            Err(e) => {
                tracing::warn!("Skipping {} #{}: {}", kind, index, e);
                None
            }
        })
        .collect();

    Ok(entities)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLOG: &str = r#"{
        "posts": [
            {"id": 1, "title": "Middle", "date": "2024-02-01", "tags": ["Rust"], "content": "m"},
            {"id": 2, "slug": "newest-post", "title": "Newest", "date": "2024-03-01", "tags": {"Topics": ["CLI"]}},
            {"id": 3, "title": "Oldest", "date": "2023-12-01", "tags": ["rust", "Web"]},
            {"id": 4, "title": "Tie", "date": "2024-02-01"}
        ]
    }"#;

    fn posts() -> Collection {
        let mut collection = Collection::new(EntityKind::Post);
        collection.set_entities(parse_document(EntityKind::Post, BLOG).unwrap());
        collection
    }

    fn ids(entities: &[Entity]) -> Vec<&str> {
        entities.iter().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn test_posts_sorted_on_load() {
        let collection = posts();
        assert!(collection.is_loaded());
        assert_eq!(ids(collection.entities()), vec!["2", "1", "4", "3"]);
    }

    #[test]
    fn test_sort_extremes_and_ties() {
        let mut collection = posts();

        collection.sort(SortOrder::Newest);
        let newest = collection.entities().to_vec();

        collection.sort(SortOrder::Oldest);
        let oldest = ids(collection.entities());

        assert_eq!(newest[0].id, oldest[3]);
        assert_eq!(newest[3].id, oldest[0]);
        // Same date: 1 stays before 4 across both sorts
        assert_eq!(oldest, vec!["3", "1", "4", "2"]);
    }

    #[test]
    fn test_toggle_sort_order() {
        let mut collection = posts();
        assert_eq!(collection.toggle_sort_order(), SortOrder::Oldest);
        assert_eq!(collection.entities()[0].id, "3");
        assert_eq!(collection.toggle_sort_order(), SortOrder::Newest);
        assert_eq!(collection.entities()[0].id, "2");
    }

    #[test]
    fn test_projects_keep_document_order() {
        let json = r#"{"projects": [
            {"id": "a", "title": "A", "date": "2020-01-01"},
            {"id": "b", "title": "B", "date": "2024-01-01", "featured": true}
        ]}"#;
        let mut collection = Collection::new(EntityKind::Project);
        collection.set_entities(parse_document(EntityKind::Project, json).unwrap());

        assert_eq!(ids(collection.entities()), vec!["a", "b"]);
        let featured: Vec<&str> = collection.featured().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(featured, vec!["b"]);
    }

    #[test]
    fn test_filter_by_tag() {
        let collection = posts();
        let rust: Vec<&str> = collection.filter_by_tag("RUST").iter().map(|e| e.id.as_str()).collect();
        assert_eq!(rust, vec!["1", "3"]);
        assert_eq!(collection.filter_by_tag("all").len(), 4);
        assert!(collection.filter_by_tag("Go").is_empty());
        // a view, not a mutation
        assert_eq!(collection.len(), 4);
    }

    #[test]
    fn test_get_by_id_or_slug() {
        let collection = posts();
        assert_eq!(collection.get("2").map(|e| e.title.as_str()), Some("Newest"));
        assert_eq!(collection.get("newest-post").map(|e| e.title.as_str()), Some("Newest"));
        assert!(collection.get("nope").is_none());
    }

    #[test]
    fn test_tags_over_collection() {
        let collection = posts();
        assert_eq!(collection.all_tags(), vec!["CLI", "Rust", "Web", "rust"]);

        let categories = collection.tags_by_category();
        assert_eq!(categories.len(), 1);
        assert_eq!(categories["Topics"], vec!["CLI"]);
    }

    #[test]
    fn test_parse_document_skips_bad_entries() {
        let json = r#"{"posts": [
            {"id": 1, "title": "Good", "date": "2024-01-01"},
            {"id": 2, "title": "No date"},
            {"id": 3, "title": "Bad date", "date": "yesterday"}
        ]}"#;
        let entities = parse_document(EntityKind::Post, json).unwrap();
        assert_eq!(ids(&entities), vec!["1"]);
    }

    #[test]
    fn test_parse_document_errors() {
        assert!(matches!(
            parse_document(EntityKind::Post, r#"{"projects": []}"#),
            Err(LoadError::MissingKey("posts"))
        ));
        assert!(matches!(
            parse_document(EntityKind::Post, "not json"),
            Err(LoadError::Json(_))
        ));
    }

    #[test]
    fn test_render_views() {
        let config = SiteConfig::default();
        let collection = posts();

        let list = collection.render_list("Rust", &config);
        assert_eq!(list.html.matches("<article class=\"blog-post\"").count(), 2);

        let detail = collection.render_detail("newest-post", &config).unwrap();
        assert!(detail.html.contains(r#"data-post-id="2""#));
        assert!(collection.render_detail("missing", &config).is_none());
    }

    #[tokio::test]
    async fn test_load_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("blog.json"), BLOG).unwrap();
        let source = DataSource::local(dir.path());

        let mut collection = Collection::new(EntityKind::Post).with_sort_order(SortOrder::Oldest);
        let loaded = collection.load(&source, "blog.json").await;
        assert_eq!(loaded.len(), 4);
        assert_eq!(collection.entities()[0].id, "3");
    }

    #[tokio::test]
    async fn test_load_failure_stays_empty() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("broken.json"), "{\"posts\": ").unwrap();
        let source = DataSource::local(dir.path());

        let mut collection = Collection::new(EntityKind::Post);
        assert!(collection.load(&source, "missing.json").await.is_empty());
        assert!(collection.load(&source, "broken.json").await.is_empty());
        assert!(matches!(collection.state(), CollectionState::Empty));
    }
}
