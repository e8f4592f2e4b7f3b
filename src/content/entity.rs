//! Posts and projects as read from the data documents

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fmt;

use super::tags::tags_or_empty;
use super::{Content, LegacyImage, Tags};

/// Which document an entity comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Post,
    Project,
}

impl EntityKind {
    /// Top-level key of the JSON document holding the entities
    pub fn document_key(&self) -> &'static str {
        match self {
            EntityKind::Post => "posts",
            EntityKind::Project => "projects",
        }
    }

    /// Parse a CLI-style name (`post`, `posts`, `project`, ...)
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "post" | "posts" | "blog" => Some(EntityKind::Post),
            "project" | "projects" | "work" => Some(EntityKind::Project),
            _ => None,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Post => f.write_str("post"),
            EntityKind::Project => f.write_str("project"),
        }
    }
}

/// A blog post or a portfolio project
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    /// Identifier; numeric ids are kept as their decimal string
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,

    /// URL-friendly name, used for project pages
    pub slug: Option<String>,

    #[serde(default)]
    pub title: String,

    /// Publication date (calendar date only)
    #[serde(deserialize_with = "calendar_date")]
    pub date: NaiveDate,

    #[serde(default, deserialize_with = "tags_or_empty")]
    pub tags: Tags,

    #[serde(default)]
    pub content: Content,

    /// Images of entries written before structured content existed
    #[serde(default)]
    pub images: Vec<LegacyImage>,

    /// Text of the collapsible "Assignment Details" panel
    pub assignment_details: Option<String>,

    pub thumbnail: Option<String>,
    pub short_description: Option<String>,
    pub overview: Option<String>,

    #[serde(default)]
    pub featured: bool,

    /// Every other field, passed through untouched
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl Entity {
    /// Whether `token` is this entity's id or slug
    pub fn is_identified_by(&self, token: &str) -> bool {
        self.id == token || self.slug.as_deref() == Some(token)
    }

    /// File stem of the entity's own page
    pub fn page_name(&self) -> String {
        match &self.slug {
            Some(slug) if !slug.is_empty() => slug.clone(),
            _ if !self.title.is_empty() => slug::slugify(&self.title),
            _ => self.id.clone(),
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected a string or number id, found {}",
            other
        ))),
    }
}

/// Accepts `YYYY-MM-DD`, ignoring any time part after a `T`
fn calendar_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let date_part = raw.split('T').next().unwrap_or_default().trim();
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map_err(|e| serde::de::Error::custom(format!("invalid date {:?}: {}", raw, e)))
}
