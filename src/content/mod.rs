//! Content module - entities, tags and the content block schema

mod block;
mod body;
mod entity;
pub mod tags;

pub use block::{
    Block, CalloutBlock, CodeBlock, GistBlock, ImageBlock, ImageGroup, Layout, LinkBlock,
    MediaItem, MediaRow, TextBlock, VideoBlock,
};
pub use body::{Content, ContentItem, LegacyImage, Section};
pub use entity::{Entity, EntityKind};
pub use tags::Tags;
