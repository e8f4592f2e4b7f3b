//! Blog post view

use super::{render_entity_content, render_legacy_images, Fragment};
use crate::config::SiteConfig;
use crate::content::Entity;
use crate::helpers::{line_breaks, time_tag, Element};

/// Render one post as an `<article>` with header, body, legacy images and
/// the assignment panel.
pub fn render_post(post: &Entity, config: &SiteConfig) -> Fragment {
    let mut out = Fragment::new();

    let tags: String = post
        .tags
        .flatten()
        .iter()
        .map(|tag| {
            Element::new("span")
                .class("tag")
                .class("tag-link")
                .attr("data-tag", tag.as_str())
                .child(tag)
                .render()
        })
        .collect();

    let meta = Element::new("div")
        .class("post-meta")
        .child(time_tag(&post.date, &config.date_format))
        .child(Element::new("div").class("tags").child(tags).render());

    let header = Element::new("header")
        .class("post-header")
        .child(Element::new("h2").child(&post.title).render())
        .child(meta.render());

    let body = out.absorb(render_entity_content(&post.content, &post.title));
    let content = Element::new("div")
        .class("post-content")
        .child(body)
        .child(render_legacy_images(&post.images, &post.title))
        .child(render_assignment_details(post.assignment_details.as_deref()));

    let article = Element::new("article")
        .class("blog-post")
        .attr("data-post-id", post.id.as_str())
        .child(header.render())
        .child(content.render());

    out.push_str(&article.render());
    out
}

/// Collapsible "Assignment Details" panel; empty when there are no details
pub fn render_assignment_details(details: Option<&str>) -> String {
    let details = match details {
        Some(details) if !details.is_empty() => details,
        _ => return String::new(),
    };

    let toggle = Element::new("button")
        .class("assignment-toggle")
        .attr("onclick", "this.parentElement.classList.toggle('open')")
        .child(r#"<span class="toggle-icon">▼</span> Assignment Details"#);

    let panel = Element::new("div")
        .class("assignment-content")
        .child(Element::new("p").child(line_breaks(details)).render());

    Element::new("div")
        .class("assignment-details")
        .child(toggle.render())
        .child(panel.render())
        .render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn post(value: serde_json::Value) -> Entity {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_render_post() {
        let config = SiteConfig::default();
        let out = render_post(
            &post(json!({
                "id": "first-post",
                "title": "First Post",
                "date": "2024-01-15",
                "tags": {"Languages": ["Rust"], "Topics": ["CLI", "Rust"]},
                "content": "para one\n\npara two"
            })),
            &config,
        );

        let html = &out.html;
        assert!(html.starts_with(r#"<article class="blog-post" data-post-id="first-post">"#));
        assert!(html.contains("<h2>First Post</h2>"));
        assert!(html.contains(r#"<time datetime="2024-01-15">January 15, 2024</time>"#));
        assert_eq!(html.matches(r#"data-tag="Rust""#).count(), 1);
        assert!(html.contains(r#"<span class="tag tag-link" data-tag="CLI">CLI</span>"#));
        assert!(html.contains(r#"<div class="post-content"><p>para one</p><p>para two</p></div>"#));
        assert!(!html.contains("assignment-details"));
    }

    #[test]
    fn test_legacy_images_and_assignment() {
        let config = SiteConfig::default();
        let out = render_post(
            &post(json!({
                "id": 3,
                "title": "Lab Report",
                "date": "2023-09-01",
                "tags": ["School"],
                "content": "Results",
                "images": [{"src": "chart.png"}],
                "assignmentDetails": "Line one\nLine two"
            })),
            &config,
        );

        let html = &out.html;
        assert!(html.contains(r#"<img src="chart.png" alt="Lab Report">"#));
        assert!(html.contains(r#"<div class="assignment-details"><button class="assignment-toggle""#));
        assert!(html.contains("<p>Line one<br>Line two</p>"));
        assert!(html.find("<p>Results</p>") < html.find("post-images"));
    }

    #[test]
    fn test_legacy_image_content_uses_title() {
        let config = SiteConfig::default();
        let out = render_post(
            &post(json!({
                "id": 4,
                "title": "Field Trip",
                "date": "2023-10-02",
                "content": [{"src": "one.png", "caption": "Bus"}, {"src": "two.png"}]
            })),
            &config,
        );

        assert!(out.html.contains(r#"<img src="one.png" alt="Bus">"#));
        assert!(out.html.contains(r#"<img src="two.png" alt="Field Trip">"#));
    }

    #[test]
    fn test_assignment_details_empty() {
        assert_eq!(render_assignment_details(None), "");
        assert_eq!(render_assignment_details(Some("")), "");
    }
}
