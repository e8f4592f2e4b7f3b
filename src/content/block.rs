//! Content block model
//!
//! Blocks arrive as JSON objects tagged by `type`. They are resolved once, at
//! load time, into [`Block`]; anything that cannot be resolved is kept as
//! [`Block::Unknown`] or [`Block::Invalid`] so the renderer can drop it and
//! report why.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

/// Paragraph text
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TextBlock {
    pub body: String,
}

/// A single image with optional caption
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ImageBlock {
    pub src: String,
    pub caption: Option<String>,
    /// Size modifier, used verbatim as a `size-*` class
    pub size: Option<String>,
}

/// Arrangement of an image group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "String")]
pub enum Layout {
    #[default]
    Stack,
    SideBySide,
    Grid,
}

impl From<String> for Layout {
    fn from(value: String) -> Self {
        match value.as_str() {
            "side-by-side" => Layout::SideBySide,
            "grid" => Layout::Grid,
            _ => Layout::Stack,
        }
    }
}

impl Layout {
    /// Class suffix used in the group container
    pub fn as_class(&self) -> &'static str {
        match self {
            Layout::Stack => "stack",
            Layout::SideBySide => "side-by-side",
            Layout::Grid => "grid",
        }
    }
}

/// Several images sharing one container (`type: "images"`)
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ImageGroup {
    #[serde(default)]
    pub layout: Layout,
    pub size: Option<String>,
    #[serde(default)]
    pub images: Vec<ImageBlock>,
}

/// A hosted video or a YouTube embed
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoBlock {
    pub src: Option<String>,
    pub youtube_id: Option<String>,
    pub caption: Option<String>,
    pub size: Option<String>,
    #[serde(default)]
    pub muted: bool,
}

/// Item of a media row; anything other than an image or a video is unsupported
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub enum MediaItem {
    Image(ImageBlock),
    Video(VideoBlock),
    Unsupported(Block),
}

impl From<Value> for MediaItem {
    fn from(value: Value) -> Self {
        match Block::from(value) {
            Block::Image(image) => MediaItem::Image(image),
            Block::Video(video) => MediaItem::Video(video),
            other => MediaItem::Unsupported(other),
        }
    }
}

/// Images and videos rendered inline, side by side (`type: "media-row"`)
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MediaRow {
    pub size: Option<String>,
    #[serde(default)]
    pub items: Vec<MediaItem>,
}

/// Source listing; highlighting is left to the browser
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CodeBlock {
    pub language: Option<String>,
    pub body: String,
    pub caption: Option<String>,
}

/// Reference to a GitHub gist, embedded after the page is attached
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GistBlock {
    pub gist_id: String,
    pub caption: Option<String>,
    pub size: Option<String>,
}

/// External link
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LinkBlock {
    pub url: String,
    pub text: Option<String>,
}

/// Highlighted box (info, warning, success, note)
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CalloutBlock {
    #[serde(default = "default_callout_style")]
    pub style: String,
    pub title: Option<String>,
    pub body: String,
}

fn default_callout_style() -> String {
    "info".to_string()
}

/// A content block
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub enum Block {
    Text(TextBlock),
    Image(ImageBlock),
    Images(ImageGroup),
    Video(VideoBlock),
    MediaRow(MediaRow),
    Code(CodeBlock),
    Gist(GistBlock),
    Link(LinkBlock),
    Callout(CalloutBlock),
    /// A `type` this renderer does not know (empty when `type` was missing)
    Unknown { kind: String },
    /// A known `type` whose fields could not be read
    Invalid { kind: String, reason: String },
}

impl Block {
    /// The `type` tag this block was read from
    pub fn kind(&self) -> &str {
        match self {
            Block::Text(_) => "text",
            Block::Image(_) => "image",
            Block::Images(_) => "images",
            Block::Video(_) => "video",
            Block::MediaRow(_) => "media-row",
            Block::Code(_) => "code",
            Block::Gist(_) => "gist",
            Block::Link(_) => "link",
            Block::Callout(_) => "callout",
            Block::Unknown { kind } | Block::Invalid { kind, .. } => kind.as_str(),
        }
    }
}

impl From<Value> for Block {
    fn from(value: Value) -> Self {
        let kind = match value.get("type").and_then(Value::as_str) {
            Some(kind) => kind.to_string(),
            None => {
                return Block::Unknown {
                    kind: String::new(),
                }
            }
        };

        match kind.as_str() {
            "text" => parse_as(kind, value, Block::Text),
            "image" => parse_as(kind, value, Block::Image),
            "images" => parse_as(kind, value, Block::Images),
            "video" => parse_as(kind, value, Block::Video),
            "media-row" => parse_as(kind, value, Block::MediaRow),
            "code" => parse_as(kind, value, Block::Code),
            "gist" => parse_as(kind, value, Block::Gist),
            "link" => parse_as(kind, value, Block::Link),
            "callout" => parse_as(kind, value, Block::Callout),
            _ => Block::Unknown { kind },
        }
    }
}

fn parse_as<T: DeserializeOwned>(kind: String, value: Value, wrap: fn(T) -> Block) -> Block {
    match serde_json::from_value(value) {
        Ok(block) => wrap(block),
        Err(e) => Block::Invalid {
            kind,
            reason: e.to_string(),
        },
    }
}
