//! Content block renderer

use std::path::Path;

use super::gist::render_gist;
use super::{Diagnostic, Fragment};
use crate::content::{
    Block, CalloutBlock, CodeBlock, ImageBlock, ImageGroup, LinkBlock, MediaItem, MediaRow,
    VideoBlock,
};
use crate::helpers::{escape_code, html_escape, paragraphs, Element};

/// Base URL of YouTube embeds
const YOUTUBE_EMBED: &str = "https://www.youtube.com/embed";

const YOUTUBE_ALLOW: &str =
    "accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture";

/// Render a single block.
///
/// Unknown or incomplete blocks render as nothing and leave a diagnostic.
pub fn render_block(block: &Block) -> Fragment {
    let mut out = Fragment::new();

    let html = match block {
        Block::Text(text) => paragraphs(&text.body),
        Block::Image(image) => render_image(image),
        Block::Images(group) => render_image_group(group),
        Block::Video(video) => render_video(video, &mut out),
        Block::MediaRow(row) => render_media_row(row, &mut out),
        Block::Code(code) => render_code(code),
        Block::Gist(gist) => render_gist(gist, &mut out),
        Block::Link(link) => render_link(link),
        Block::Callout(callout) => render_callout(callout),
        Block::Unknown { kind } => {
            tracing::debug!("Skipping unknown block type {:?}", kind);
            out.diagnose(Diagnostic::UnknownBlock { kind: kind.clone() });
            String::new()
        }
        Block::Invalid { kind, reason } => {
            out.diagnose(Diagnostic::InvalidBlock {
                kind: kind.clone(),
                reason: reason.clone(),
            });
            String::new()
        }
    };

    out.push_str(&html);
    out
}

/// `<figcaption>` for a non-empty caption
pub(super) fn caption(text: Option<&str>) -> Option<String> {
    text.filter(|t| !t.is_empty())
        .map(|t| Element::new("figcaption").child(t).render())
}

fn render_image(image: &ImageBlock) -> String {
    let img = Element::void("img")
        .attr("src", image.src.as_str())
        .attr("alt", image.caption.as_deref().unwrap_or(""))
        .attr("loading", "lazy");

    Element::new("figure")
        .class("content-image")
        .modifier("size", image.size.as_deref())
        .child(img.render())
        .child_opt(caption(image.caption.as_deref()))
        .render()
}

fn render_image_group(group: &ImageGroup) -> String {
    let images: String = group.images.iter().map(render_image).collect();

    Element::new("div")
        .class("content-images")
        .modifier("layout", Some(group.layout.as_class()))
        .modifier("size", group.size.as_deref())
        .child(images)
        .render()
}

fn render_video(video: &VideoBlock, out: &mut Fragment) -> String {
    let youtube_id = video.youtube_id.as_deref().filter(|id| !id.is_empty());
    let src = video.src.as_deref().filter(|src| !src.is_empty());

    let player = if let Some(id) = youtube_id {
        let iframe = Element::new("iframe")
            .attr("src", format!("{}/{}", YOUTUBE_EMBED, id))
            .attr("title", video.caption.as_deref().unwrap_or("YouTube video"))
            .attr("frameborder", "0")
            .attr("allow", YOUTUBE_ALLOW)
            .flag("allowfullscreen");
        Element::new("div")
            .class("video-embed")
            .child(iframe.render())
            .render()
    } else if let Some(src) = src {
        let source = Element::void("source")
            .attr("src", src)
            .attr("type", video_mime_type(src));
        let mut player = Element::new("video").flag("controls").flag("playsinline");
        if video.muted {
            player = player.flag("muted");
        }
        player
            .child(source.render())
            .child("Your browser does not support the video tag.")
            .render()
    } else {
        out.diagnose(Diagnostic::MissingField {
            kind: "video",
            field: "src or youtubeId",
        });
        return String::new();
    };

    Element::new("figure")
        .class("content-video")
        .modifier("size", video.size.as_deref())
        .child(player)
        .child_opt(caption(video.caption.as_deref()))
        .render()
}

fn video_mime_type(src: &str) -> &'static str {
    let path = src.split(&['?', '#'][..]).next().unwrap_or(src);
    let extension = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match extension.as_deref() {
        Some("webm") => "video/webm",
        Some("ogg") | Some("ogv") => "video/ogg",
        Some("mov") => "video/quicktime",
        _ => "video/mp4",
    }
}

fn render_media_row(row: &MediaRow, out: &mut Fragment) -> String {
    let mut items = String::new();

    for item in &row.items {
        let html = match item {
            MediaItem::Image(image) => render_image(image),
            MediaItem::Video(video) => render_video(video, out),
            MediaItem::Unsupported(block) => {
                out.diagnose(Diagnostic::UnsupportedMediaItem {
                    kind: block.kind().to_string(),
                });
                continue;
            }
        };

        if !html.is_empty() {
            items.push_str(&Element::new("div").class("media-row-item").child(html).render());
        }
    }

    Element::new("div")
        .class("content-media-row")
        .modifier("size", row.size.as_deref())
        .child(items)
        .render()
}

fn render_code(code: &CodeBlock) -> String {
    let language = code.language.as_deref().filter(|l| !l.is_empty());

    let label = language.map(|lang| {
        Element::new("div")
            .class("code-language")
            .child(html_escape(lang))
            .render()
    });
    let body = Element::new("code")
        .modifier("language", language)
        .child(escape_code(&code.body));

    Element::new("figure")
        .class("content-code")
        .child_opt(label)
        .child(Element::new("pre").child(body.render()).render())
        .child_opt(caption(code.caption.as_deref()))
        .render()
}

fn render_link(link: &LinkBlock) -> String {
    let text = match link.text.as_deref() {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => html_escape(&link.url),
    };

    let anchor = Element::new("a")
        .attr("href", link.url.as_str())
        .attr("target", "_blank")
        .attr("rel", "noopener noreferrer")
        .child(text);

    Element::new("p")
        .class("content-link")
        .child(anchor.render())
        .render()
}

fn render_callout(callout: &CalloutBlock) -> String {
    let title = callout
        .title
        .as_deref()
        .filter(|t| !t.is_empty())
        .map(|t| Element::new("strong").class("callout-title").child(t).render());

    Element::new("aside")
        .class("callout")
        .modifier("callout", Some(callout.style.as_str()))
        .child_opt(title)
        .child(
            Element::new("div")
                .class("callout-body")
                .child(paragraphs(&callout.body))
                .render(),
        )
        .render()
}
