//! Top-level content renderer

use super::{render_block, render_section, Diagnostic, Fragment};
use crate::content::{Content, ContentItem, LegacyImage};
use crate::helpers::{paragraphs, Element};

/// Render an entity's `content` in whichever shape it was written.
pub fn render_content(content: &Content) -> Fragment {
    render_entity_content(content, "")
}

/// Like [`render_content`], with `title` as the alt text of uncaptioned
/// images in a legacy image list
pub fn render_entity_content(content: &Content, title: &str) -> Fragment {
    match content {
        Content::Empty => Fragment::new(),
        Content::Legacy(text) => Fragment::from_html(paragraphs(text)),
        Content::LegacyImages(images) => Fragment::from_html(render_legacy_images(images, title)),
        Content::Items(items) => {
            let mut out = Fragment::new();
            for item in items {
                let rendered = match item {
                    ContentItem::Section(section) => render_section(section),
                    ContentItem::Block(block) => render_block(block),
                };
                out.append(rendered);
            }
            out
        }
        Content::Unrecognized(shape) => {
            let mut out = Fragment::new();
            out.diagnose(Diagnostic::UnrecognizedContent { shape: *shape });
            out
        }
    }
}

/// Gallery of pre-block images; `fallback_alt` is used for images without a caption
pub fn render_legacy_images(images: &[LegacyImage], fallback_alt: &str) -> String {
    if images.is_empty() {
        return String::new();
    }

    let figures: String = images
        .iter()
        .map(|image| {
            let img = Element::void("img")
                .attr("src", image.src.as_str())
                .attr("alt", image.caption.as_deref().unwrap_or(fallback_alt));
            let caption = image
                .caption
                .as_deref()
                .filter(|c| !c.is_empty())
                .map(|c| Element::new("figcaption").child(c).render());

            Element::new("figure")
                .class("post-image")
                .child(img.render())
                .child_opt(caption)
                .render()
        })
        .collect();

    Element::new("div")
        .class("post-images")
        .child(figures)
        .render()
}
