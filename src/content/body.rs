//! The `content` field of an entity and its legacy shapes

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::Block;

/// Image entry of the legacy flat image list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyImage {
    pub src: String,
    pub caption: Option<String>,
}

/// Blocks grouped under an optional heading
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Section {
    pub heading: Option<String>,
    /// Short remark shown next to the heading
    pub note: Option<String>,
    #[serde(default)]
    pub blocks: Vec<Block>,
}

/// Element of a structured content list
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub enum ContentItem {
    Section(Section),
    Block(Block),
}

impl From<Value> for ContentItem {
    fn from(value: Value) -> Self {
        if value.get("type").and_then(Value::as_str) != Some("section") {
            return ContentItem::Block(Block::from(value));
        }

        match serde_json::from_value(value) {
            Ok(section) => ContentItem::Section(section),
            Err(e) => ContentItem::Block(Block::Invalid {
                kind: "section".to_string(),
                reason: e.to_string(),
            }),
        }
    }
}

/// Entity body, in whichever shape the document used
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Content {
    /// Missing or `null`
    #[default]
    Empty,
    /// Plain text with blank-line separated paragraphs
    Legacy(String),
    /// Array of `{src, caption}` objects without a `type`
    LegacyImages(Vec<LegacyImage>),
    /// Sections and bare blocks, in order
    Items(Vec<ContentItem>),
    /// Any other JSON value; holds the JSON type name
    Unrecognized(&'static str),
}

impl From<Value> for Content {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Content::Empty,
            Value::String(text) => Content::Legacy(text),
            Value::Array(items) if !items.is_empty() && items.iter().all(is_legacy_image) => {
                Content::LegacyImages(
                    items
                        .into_iter()
                        .filter_map(|item| serde_json::from_value(item).ok())
                        .collect(),
                )
            }
            Value::Array(items) => {
                Content::Items(items.into_iter().map(ContentItem::from).collect())
            }
            Value::Bool(_) => Content::Unrecognized("boolean"),
            Value::Number(_) => Content::Unrecognized("number"),
            Value::Object(_) => Content::Unrecognized("object"),
        }
    }
}

impl<'de> Deserialize<'de> for Content {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(Content::from)
    }
}

fn is_legacy_image(item: &Value) -> bool {
    item.get("type").is_none() && item.get("src").map(Value::is_string).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_content_shapes() {
        assert_eq!(Content::from(Value::Null), Content::Empty);
        assert_eq!(
            Content::from(json!("para one\n\npara two")),
            Content::Legacy("para one\n\npara two".to_string())
        );
        assert_eq!(Content::from(json!(42)), Content::Unrecognized("number"));
        assert_eq!(Content::from(json!([])), Content::Items(Vec::new()));
    }

    #[test]
    fn test_legacy_image_list() {
        let content = Content::from(json!([
            {"src": "one.png", "caption": "One"},
            {"src": "two.png"}
        ]));
        assert_eq!(
            content,
            Content::LegacyImages(vec![
                LegacyImage {
                    src: "one.png".to_string(),
                    caption: Some("One".to_string())
                },
                LegacyImage {
                    src: "two.png".to_string(),
                    caption: None
                },
            ])
        );
    }

    #[test]
    fn test_sections_and_bare_blocks() {
        let content = Content::from(json!([
            {"type": "section", "heading": "Intro", "blocks": [{"type": "text", "body": "Hi"}]},
            {"type": "link", "url": "https://example.com"},
            {"type": "image", "src": "typed.png"}
        ]));

        let Content::Items(items) = content else {
            panic!("expected items");
        };
        assert_eq!(items.len(), 3);
        match &items[0] {
            ContentItem::Section(section) => {
                assert_eq!(section.heading.as_deref(), Some("Intro"));
                assert_eq!(section.blocks.len(), 1);
            }
            other => panic!("expected section, got {:?}", other),
        }
        assert!(matches!(&items[1], ContentItem::Block(Block::Link(_))));
        assert!(matches!(&items[2], ContentItem::Block(Block::Image(_))));
    }

    #[test]
    fn test_deserialize_from_borrowed_input() {
        let json = String::from(r#"{"content": true, "other": "para"}"#);

        #[derive(Deserialize)]
        struct Holder {
            content: Content,
            other: Content,
        }

        let holder: Holder = serde_json::from_str(&json).unwrap();
        assert_eq!(holder.content, Content::Unrecognized("boolean"));
        assert_eq!(holder.other, Content::Legacy("para".to_string()));
    }

    #[test]
    fn test_malformed_section_is_invalid_block() {
        let content = Content::from(json!([{"type": "section", "blocks": "nope"}]));
        let Content::Items(items) = content else {
            panic!("expected items");
        };
        assert!(matches!(
            &items[0],
            ContentItem::Block(Block::Invalid { kind, .. }) if kind == "section"
        ));
    }
}
