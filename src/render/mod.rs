//! Rendering of content into HTML fragments
//!
//! Every renderer returns a [`Fragment`]: the markup, the gist embeds it staged
//! and the diagnostics for anything it had to drop. Nothing here fails; a
//! block that cannot be rendered produces no markup and one diagnostic.

mod block;
mod content;
mod filters;
pub mod gist;
mod post;
mod project;
mod section;

use std::fmt;

pub use block::render_block;
pub use content::{render_content, render_entity_content, render_legacy_images};
pub use filters::render_tag_filters;
pub use gist::{GistEmbed, GistQueue};
pub use post::{render_assignment_details, render_post};
pub use project::{render_project_card, render_project_modal, render_project_page};
pub use section::render_section;

/// Rendered markup plus everything collected while producing it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fragment {
    pub html: String,
    /// Gist containers staged in `html`, in document order
    pub embeds: Vec<GistEmbed>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Fragment {
    /// Create an empty fragment
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a fragment holding only markup
    pub fn from_html(html: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            ..Self::default()
        }
    }

    /// Whether no markup was produced
    pub fn is_empty(&self) -> bool {
        self.html.is_empty()
    }

    pub fn push_str(&mut self, html: &str) {
        self.html.push_str(html);
    }

    /// Append another fragment's markup, embeds and diagnostics
    pub fn append(&mut self, other: Fragment) {
        let html = self.absorb(other);
        self.html.push_str(&html);
    }

    /// Take over another fragment's embeds and diagnostics and hand back its markup.
    ///
    /// Used when the child's markup has to be nested inside an element. A child
    /// gist container whose id is already taken is renamed to `<id>-<n>`, in
    /// the markup and in the embed, so every container id stays unique.
    pub fn absorb(&mut self, other: Fragment) -> String {
        let Fragment {
            mut html,
            embeds,
            diagnostics,
        } = other;

        for mut embed in embeds {
            if self.has_container(&embed.container_id) {
                let renamed = self.free_container_id(&embed.container_id, &html);
                html = html.replacen(
                    &id_attr(&embed.container_id),
                    &id_attr(&renamed),
                    1,
                );
                embed.container_id = renamed;
            }
            self.embeds.push(embed);
        }

        self.diagnostics.extend(diagnostics);
        html
    }

    fn has_container(&self, id: &str) -> bool {
        self.embeds.iter().any(|embed| embed.container_id == id)
    }

    /// First `<id>-<n>` (n >= 2) used neither here nor in `child_html`
    fn free_container_id(&self, id: &str, child_html: &str) -> String {
        (2..)
            .map(|n| format!("{}-{}", id, n))
            .find(|candidate| {
                !self.has_container(candidate) && !child_html.contains(&id_attr(candidate))
            })
            .unwrap_or_else(|| id.to_string())
    }

    pub fn diagnose(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Log collected diagnostics against the page or entity they belong to
    pub fn report(&self, context: &str) {
        for diagnostic in &self.diagnostics {
            tracing::warn!("{}: {}", context, diagnostic);
        }
    }
}

/// ` id="<id>"` as rendered by the element builder
fn id_attr(id: &str) -> String {
    format!(r#" id="{}""#, id)
}

/// A non-fatal problem found while rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// Block `type` with no renderer
    UnknownBlock { kind: String },
    /// Known block whose fields could not be read
    InvalidBlock { kind: String, reason: String },
    /// Block is readable but lacks what it needs to render
    MissingField {
        kind: &'static str,
        field: &'static str,
    },
    /// Media row item that is neither an image nor a video
    UnsupportedMediaItem { kind: String },
    /// `content` value of an unexpected JSON type
    UnrecognizedContent { shape: &'static str },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnknownBlock { kind } if kind.is_empty() => {
                write!(f, "block without a type dropped")
            }
            Diagnostic::UnknownBlock { kind } => write!(f, "unknown block type {:?} dropped", kind),
            Diagnostic::InvalidBlock { kind, reason } => {
                write!(f, "invalid {} block dropped: {}", kind, reason)
            }
            Diagnostic::MissingField { kind, field } => {
                write!(f, "{} block without {} dropped", kind, field)
            }
            Diagnostic::UnsupportedMediaItem { kind } => {
                write!(f, "media row item of type {:?} dropped", kind)
            }
            Diagnostic::UnrecognizedContent { shape } => {
                write!(f, "content of JSON type {} ignored", shape)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_merges_side_outputs() {
        let mut page = Fragment::from_html("<h1>Title</h1>");
        let mut child = Fragment::from_html("<p>Body</p>");
        child.embeds.push(GistEmbed::new("abc"));
        child.diagnose(Diagnostic::UnknownBlock {
            kind: "carousel".to_string(),
        });

        page.append(child);

        assert_eq!(page.html, "<h1>Title</h1><p>Body</p>");
        assert_eq!(page.embeds.len(), 1);
        assert_eq!(page.diagnostics.len(), 1);
    }

    #[test]
    fn test_append_renames_taken_container_ids() {
        let gist = |id: &str| {
            let embed = GistEmbed::new(id);
            let mut fragment = Fragment::from_html(format!(
                r#"<div class="gist-container" id="{}"></div>"#,
                embed.container_id
            ));
            fragment.embeds.push(embed);
            fragment
        };

        let mut page = Fragment::new();
        page.append(gist("octocat/abc"));
        page.append(gist("octocat.abc"));
        page.append(gist("octocat/abc"));

        let ids: Vec<&str> = page.embeds.iter().map(|e| e.container_id.as_str()).collect();
        assert_eq!(ids, vec!["gist-octocat-abc", "gist-octocat-abc-2", "gist-octocat-abc-3"]);
        for id in ids {
            assert_eq!(page.html.matches(&format!(r#" id="{}""#, id)).count(), 1);
        }
        assert_eq!(page.embeds[1].gist_id, "octocat.abc");
    }

    #[test]
    fn test_diagnostic_display() {
        let missing = Diagnostic::MissingField {
            kind: "video",
            field: "src or youtubeId",
        };
        assert_eq!(missing.to_string(), "video block without src or youtubeId dropped");
        let untyped = Diagnostic::UnknownBlock {
            kind: String::new(),
        };
        assert_eq!(untyped.to_string(), "block without a type dropped");
    }
}
