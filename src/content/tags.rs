//! Tag normalization for both tag shapes found in the data documents
//!
//! Older entries carry a flat list (`"tags": ["Rust", "CLI"]`), newer ones a
//! mapping from category to list (`"tags": {"Languages": ["Rust"]}`). Both are
//! kept as-is in [`Tags`]; every consumer goes through the helpers here.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Reserved filter value meaning "no filter"
pub const ALL_TAGS: &str = "all";

/// The `tags` field of an entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Tags {
    /// Legacy flat list
    Flat(Vec<String>),
    /// Category name to tag list, in document order
    Categorized(IndexMap<String, Vec<String>>),
}

impl Default for Tags {
    fn default() -> Self {
        Tags::Flat(Vec::new())
    }
}

impl Tags {
    /// Whether these tags use the categorized shape
    pub fn is_categorized(&self) -> bool {
        matches!(self, Tags::Categorized(_))
    }

    /// Every tag value in document order, duplicates included
    fn values(&self) -> impl Iterator<Item = &String> + '_ {
        let (flat, categorized) = match self {
            Tags::Flat(list) => (Some(list), None),
            Tags::Categorized(map) => (None, Some(map)),
        };

        flat.into_iter()
            .flatten()
            .chain(categorized.into_iter().flat_map(|map| map.values().flatten()))
    }

    /// Flatten into a list without duplicates, keeping first-seen order and casing.
    ///
    /// Categorized tags are concatenated in category order before deduplication.
    pub fn flatten(&self) -> Vec<String> {
        let unique: IndexSet<&String> = self.values().collect();
        unique.into_iter().cloned().collect()
    }

    /// Per-category tag lists, each sorted and deduplicated.
    ///
    /// A flat list has no categories and yields an empty map.
    pub fn by_category(&self) -> BTreeMap<String, Vec<String>> {
        match self {
            Tags::Flat(_) => BTreeMap::new(),
            Tags::Categorized(map) => map
                .iter()
                .map(|(category, tags)| {
                    let sorted: BTreeSet<&String> = tags.iter().collect();
                    (category.clone(), sorted.into_iter().cloned().collect())
                })
                .collect(),
        }
    }

    /// Case-insensitive membership test; `all` matches everything
    pub fn matches(&self, query: &str) -> bool {
        if is_wildcard(query) {
            return true;
        }

        self.values().any(|tag| same_tag(tag, query))
    }
}

/// Tag equality ignoring case, Unicode-aware
pub fn same_tag(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Whether a filter value is the reserved "no filter" token
pub fn is_wildcard(query: &str) -> bool {
    query.eq_ignore_ascii_case(ALL_TAGS)
}

/// Union of all flattened tags, sorted lexicographically
pub fn collect_all<'a, I>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Tags>,
{
    let all: BTreeSet<&String> = tags.into_iter().flat_map(Tags::values).collect();
    all.into_iter().cloned().collect()
}

/// Merge the category mappings of all entries.
///
/// Entries that still use the flat list shape contribute nothing here.
pub fn collect_by_category<'a, I>(tags: I) -> BTreeMap<String, Vec<String>>
where
    I: IntoIterator<Item = &'a Tags>,
{
    let mut categories: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

    for entry in tags {
        if let Tags::Categorized(map) = entry {
            for (category, values) in map {
                categories
                    .entry(category.clone())
                    .or_default()
                    .extend(values.iter().cloned());
            }
        }
    }

    categories
        .into_iter()
        .map(|(category, values)| (category, values.into_iter().collect()))
        .collect()
}

/// Deserialize a tags field that may be missing or `null`
pub(crate) fn tags_or_empty<'de, D>(deserializer: D) -> Result<Tags, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Tags>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat(tags: &[&str]) -> Tags {
        Tags::Flat(tags.iter().map(|t| t.to_string()).collect())
    }

    fn categorized(json: &str) -> Tags {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_deserialize_both_shapes() {
        assert_eq!(categorized(r#"["Rust", "CLI"]"#), flat(&["Rust", "CLI"]));
        assert!(categorized(r#"{"Languages": ["Rust"]}"#).is_categorized());
    }

    #[test]
    fn test_flatten_flat_list() {
        let tags = flat(&["Rust", "rust", "CLI", "Rust"]);
        assert_eq!(tags.flatten(), vec!["Rust", "rust", "CLI"]);
    }

    #[test]
    fn test_flatten_categorized_keeps_category_order() {
        let tags = categorized(r#"{"Tools": ["Git", "Make"], "Languages": ["Rust", "Git"]}"#);
        assert_eq!(tags.flatten(), vec!["Git", "Make", "Rust"]);
    }

    #[test]
    fn test_by_category() {
        let tags = categorized(r#"{"Tools": ["Make", "Git", "Make"], "Languages": ["Rust"]}"#);
        let by_category = tags.by_category();

        assert_eq!(
            by_category.keys().collect::<Vec<_>>(),
            vec!["Languages", "Tools"]
        );
        assert_eq!(by_category["Tools"], vec!["Git", "Make"]);
        assert!(flat(&["Rust"]).by_category().is_empty());
    }

    #[test]
    fn test_matches_is_case_insensitive() {
        let tags = categorized(r#"{"Languages": ["Rust"]}"#);
        assert!(tags.matches("rust"));
        assert!(tags.matches("RUST"));
        assert!(!tags.matches("go"));
        assert!(flat(&["Web Dev"]).matches("web dev"));
        assert!(flat(&["École"]).matches("école"));
        assert!(same_tag("ÉCOLE", "école"));
    }

    #[test]
    fn test_all_matches_everything() {
        assert!(flat(&[]).matches("all"));
        assert!(categorized("{}").matches("all"));
        assert!(flat(&["Rust"]).matches("All"));
    }

    #[test]
    fn test_collect_all_sorted_case_sensitive() {
        let entries = [
            flat(&["rust", "CLI"]),
            categorized(r#"{"Languages": ["Rust", "rust"]}"#),
        ];
        assert_eq!(collect_all(&entries), vec!["CLI", "Rust", "rust"]);
    }

    #[test]
    fn test_collect_by_category_skips_flat_lists() {
        let entries = [
            flat(&["Orphan"]),
            categorized(r#"{"Languages": ["Rust", "C"]}"#),
            categorized(r#"{"Languages": ["Go", "C"], "Tools": ["Git"]}"#),
        ];
        let categories = collect_by_category(&entries);

        assert_eq!(categories.len(), 2);
        assert_eq!(categories["Languages"], vec!["C", "Go", "Rust"]);
        assert_eq!(categories["Tools"], vec!["Git"]);
        assert!(!categories.values().flatten().any(|t| t == "Orphan"));
    }
}
