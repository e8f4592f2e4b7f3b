//! Gist embeds
//!
//! Gists are loaded by a third-party script that writes into the document it
//! runs in, so they cannot be rendered inline. Rendering a gist block only
//! stages an empty container and records a [`GistEmbed`]. Once the fragment is
//! attached to a page, the page owner drains its [`GistQueue`] and appends the
//! loader from [`render_loader`], which fills each container with a sandboxed
//! frame that runs the script and sizes itself to its content.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use super::block::caption;
use super::{Diagnostic, Fragment};
use crate::config::GistConfig;
use crate::content::GistBlock;
use crate::helpers::{html_escape, Element};

/// Where gist scripts are served from
pub const GIST_SCRIPT_BASE: &str = "https://gist.github.com";

lazy_static! {
    static ref NON_IDENT: Regex = Regex::new(r"[^A-Za-z0-9_-]").unwrap();
}

/// A staged gist container waiting to be filled
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GistEmbed {
    /// `id` of the placeholder element
    pub container_id: String,
    pub gist_id: String,
}

impl GistEmbed {
    pub fn new(gist_id: &str) -> Self {
        Self {
            container_id: container_id(gist_id),
            gist_id: gist_id.to_string(),
        }
    }

    /// URL of the third-party embed script
    pub fn script_url(&self) -> String {
        format!(
            "{}/{}.js",
            GIST_SCRIPT_BASE,
            self.gist_id.trim_matches('/')
        )
    }
}

/// Element id for a gist container: `gist-` plus the id with every character
/// outside `[A-Za-z0-9_-]` replaced by `-`
pub fn container_id(gist_id: &str) -> String {
    format!("gist-{}", NON_IDENT.replace_all(gist_id, "-"))
}

/// Gist embeds waiting for their page to be attached
#[derive(Debug, Clone, Default)]
pub struct GistQueue {
    pending: Vec<GistEmbed>,
}

impl GistQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the embeds of a rendered fragment
    pub fn enqueue(&mut self, embeds: impl IntoIterator<Item = GistEmbed>) {
        self.pending.extend(embeds);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Take every pending embed, leaving the queue empty
    pub fn drain(&mut self) -> Vec<GistEmbed> {
        std::mem::take(&mut self.pending)
    }
}

/// Render the placeholder for a gist block and stage its embed
pub(crate) fn render_gist(gist: &GistBlock, out: &mut Fragment) -> String {
    if gist.gist_id.trim().is_empty() {
        out.diagnose(Diagnostic::MissingField {
            kind: "gist",
            field: "gistId",
        });
        return String::new();
    }

    let embed = GistEmbed::new(&gist.gist_id);
    let container = Element::new("div")
        .class("gist-container")
        .attr("id", embed.container_id.as_str())
        .attr("data-gist-id", gist.gist_id.as_str())
        .render();
    out.embeds.push(embed);

    Element::new("figure")
        .class("content-gist")
        .modifier("size", gist.size.as_deref())
        .child(container)
        .child_opt(caption(gist.caption.as_deref()))
        .render()
}

/// Document loaded inside the sandboxed frame of one gist
pub fn frame_document(embed: &GistEmbed, config: &GistConfig) -> String {
    format!(
        concat!(
            "<!DOCTYPE html><html><head><base target=\"_parent\">",
            "<style>{}</style></head>",
            "<body><script src=\"{}\"></script></body></html>"
        ),
        config.style_override,
        html_escape(&embed.script_url())
    )
}

/// Sandboxed frame for one gist.
///
/// After the configured delay the frame is resized to its content height;
/// when the content cannot be measured it falls back to a fixed height.
pub fn render_frame(embed: &GistEmbed, config: &GistConfig) -> String {
    let resize = format!(
        concat!(
            "var f=this;setTimeout(function(){{",
            "try{{f.style.height=f.contentWindow.document.documentElement.scrollHeight+'px';}}",
            "catch(e){{f.style.height='{fallback}px';}}",
            "}},{delay});"
        ),
        fallback = config.fallback_height,
        delay = config.measure_delay_ms
    );

    Element::new("iframe")
        .class("gist-frame")
        .attr("title", format!("Gist {}", embed.gist_id))
        .attr("sandbox", "allow-scripts allow-same-origin allow-popups")
        .attr(
            "style",
            format!("width:100%;border:0;height:{}px;", config.fallback_height),
        )
        .attr("srcdoc", frame_document(embed, config))
        .attr("onload", resize)
        .render()
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FrameEntry<'a> {
    container_id: &'a str,
    frame: String,
}

/// Loader script that fills the drained containers with their frames.
///
/// Returns an empty string when nothing was drained.
pub fn render_loader(embeds: &[GistEmbed], config: &GistConfig) -> serde_json::Result<String> {
    if embeds.is_empty() {
        return Ok(String::new());
    }

    let entries: Vec<FrameEntry> = embeds
        .iter()
        .map(|embed| FrameEntry {
            container_id: &embed.container_id,
            frame: render_frame(embed, config),
        })
        .collect();

    // `</` cannot appear inside an inline script
    let payload = serde_json::to_string(&entries)?.replace("</", "<\\/");

    Ok(format!(
        concat!(
            "<script>(function(){{",
            "var q={};",
            "q.forEach(function(e){{",
            "var c=document.getElementById(e.containerId);",
            "if(c){{c.innerHTML=e.frame;}}",
            "}});",
            "}})();</script>"
        ),
        payload
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gist(id: &str) -> GistBlock {
        GistBlock {
            gist_id: id.to_string(),
            caption: Some("Example".to_string()),
            size: None,
        }
    }

    #[test]
    fn test_container_id() {
        assert_eq!(container_id("0a1b2c"), "gist-0a1b2c");
        assert_eq!(container_id("octocat/0a1b.2c"), "gist-octocat-0a1b-2c");
        assert_eq!(container_id("a b"), container_id("a b"));
    }

    #[test]
    fn test_render_gist_stages_placeholder_only() {
        let mut out = Fragment::new();
        let html = render_gist(&gist("octocat/abc"), &mut out);

        assert!(html.contains(r#"<div class="gist-container" id="gist-octocat-abc" data-gist-id="octocat/abc"></div>"#));
        assert!(html.contains("<figcaption>Example</figcaption>"));
        assert!(!html.contains("<script"));
        assert_eq!(out.embeds, vec![GistEmbed::new("octocat/abc")]);
    }

    #[test]
    fn test_render_gist_empty_caption() {
        let mut block = gist("octocat/abc");
        block.caption = Some(String::new());
        let mut out = Fragment::new();
        let html = render_gist(&block, &mut out);

        assert!(html.contains("gist-container"));
        assert!(!html.contains("<figcaption"));
    }

    #[test]
    fn test_render_gist_without_id() {
        let mut out = Fragment::new();
        assert_eq!(render_gist(&gist("  "), &mut out), "");
        assert!(out.embeds.is_empty());
        assert_eq!(out.diagnostics.len(), 1);
    }

    #[test]
    fn test_queue_drain() {
        let mut queue = GistQueue::new();
        queue.enqueue(vec![GistEmbed::new("a"), GistEmbed::new("b")]);
        assert_eq!(queue.len(), 2);

        let drained = queue.drain();
        assert_eq!(drained.len(), 2);
        assert!(queue.is_empty());
        assert!(queue.drain().is_empty());
    }

    #[test]
    fn test_frame_uses_script_and_fallback() {
        let config = GistConfig::default();
        let embed = GistEmbed::new("octocat/abc");
        let frame = render_frame(&embed, &config);

        assert_eq!(embed.script_url(), "https://gist.github.com/octocat/abc.js");
        assert!(frame.contains(r#"sandbox="allow-scripts allow-same-origin allow-popups""#));
        assert!(frame.contains("https://gist.github.com/octocat/abc.js"));
        assert!(frame.contains("400px"));
        assert!(frame.contains("},500);"));
    }

    #[test]
    fn test_loader() {
        let config = GistConfig::default();
        assert_eq!(render_loader(&[], &config).unwrap(), "");

        let loader = render_loader(&[GistEmbed::new("abc")], &config).unwrap();
        assert!(loader.starts_with("<script>"));
        assert!(loader.contains(r#""containerId":"gist-abc""#));
        assert_eq!(loader.matches("</script>").count(), 1);
    }
}
