//! Portfolio project views: grid card, overview modal and full page

use super::{render_assignment_details, render_entity_content, render_legacy_images, Fragment};
use crate::config::SiteConfig;
use crate::content::Entity;
use crate::helpers::{iso_date, tag_filter_url, time_tag, url_for, Element};

/// Card shown in the project grid
pub fn render_project_card(project: &Entity) -> Fragment {
    let tags: String = project
        .tags
        .flatten()
        .iter()
        .map(|tag| {
            Element::new("span")
                .class("tag")
                .attr("data-tag", tag.as_str())
                .child(tag)
                .render()
        })
        .collect();

    let thumbnail = project.thumbnail.as_deref().map(|src| {
        Element::void("img")
            .attr("src", src)
            .attr("alt", project.title.as_str())
            .render()
    });

    let body = Element::new("div")
        .class("portfolio-content")
        .child(Element::new("h3").child(&project.title).render())
        .child_opt(
            project
                .short_description
                .as_deref()
                .map(|text| Element::new("p").child(text).render()),
        )
        .child(Element::new("div").class("tags").child(tags).render());

    Fragment::from_html(
        Element::new("article")
            .class("portfolio-item")
            .attr("data-project-id", project.id.as_str())
            .child_opt(thumbnail)
            .child(body.render())
            .render(),
    )
}

/// Tags as links to the project listing filtered by that tag
fn tag_links(project: &Entity, config: &SiteConfig) -> String {
    project
        .tags
        .flatten()
        .iter()
        .map(|tag| {
            Element::new("a")
                .attr("href", tag_filter_url(config, tag))
                .class("tag")
                .class("tag-link")
                .child(tag)
                .render()
        })
        .collect()
}

fn page_url(project: &Entity, config: &SiteConfig) -> String {
    url_for(config, &format!("{}.html", project.page_name()))
}

/// Overview modal opened from a project card
pub fn render_project_modal(project: &Entity, config: &SiteConfig) -> Fragment {
    let date = iso_date(&project.date);
    let meta = Element::new("div")
        .class("project-meta")
        .child(
            Element::new("time")
                .attr("datetime", date.as_str())
                .child(&date)
                .render(),
        )
        .child(
            Element::new("div")
                .class("tags")
                .child(tag_links(project, config))
                .render(),
        );

    let header = Element::new("header")
        .class("project-header")
        .child(Element::new("h1").child(&project.title).render())
        .child(meta.render());

    let overview = Element::new("section")
        .class("project-overview")
        .child("<h2>Overview</h2>")
        .child(
            Element::new("p")
                .child(project.overview.as_deref().unwrap_or_default())
                .render(),
        );

    let left = Element::new("div")
        .class("modal-left")
        .child(header.render())
        .child(overview.render());

    let right = project.thumbnail.as_deref().map(|src| {
        Element::new("div")
            .class("modal-right")
            .child(
                Element::void("img")
                    .attr("src", src)
                    .attr("alt", project.title.as_str())
                    .class("modal-preview-image")
                    .render(),
            )
            .render()
    });

    let content = Element::new("div")
        .class("modal-content")
        .child(
            Element::new("button")
                .class("modal-close")
                .attr("aria-label", "Close modal")
                .child("&times;")
                .render(),
        )
        .child(
            Element::new("div")
                .class("modal-split")
                .child(left.render())
                .child_opt(right)
                .render(),
        );

    let actions = Element::new("div").class("modal-actions").child(
        Element::new("a")
            .attr("href", page_url(project, config))
            .class("cta-button")
            .child("View Full Project Page")
            .render(),
    );

    let modal = Element::new("div")
        .class("project-modal")
        .attr("data-project-id", project.id.as_str())
        .child(content.render())
        .child(actions.render());

    Fragment::from_html(
        Element::new("div")
            .class("project-modal-overlay")
            .attr("id", "projectModal")
            .child(modal.render())
            .render(),
    )
}

/// Full project page: header, overview, content, legacy images and assignment panel
pub fn render_project_page(project: &Entity, config: &SiteConfig) -> Fragment {
    let mut out = Fragment::new();

    let meta = Element::new("div")
        .class("project-meta")
        .child(time_tag(&project.date, &config.date_format))
        .child(
            Element::new("div")
                .class("tags")
                .child(tag_links(project, config))
                .render(),
        );

    let header = Element::new("header")
        .class("project-header")
        .child(Element::new("h1").child(&project.title).render())
        .child(meta.render());

    let overview = project
        .overview
        .as_deref()
        .filter(|o| !o.is_empty())
        .map(|text| {
            Element::new("section")
                .class("project-overview")
                .child("<h2>Overview</h2>")
                .child(Element::new("p").child(text).render())
                .render()
        });

    let body = out.absorb(render_entity_content(&project.content, &project.title));
    let content = Element::new("div")
        .class("project-content")
        .child_opt(overview)
        .child(body)
        .child(render_legacy_images(&project.images, &project.title))
        .child(render_assignment_details(
            project.assignment_details.as_deref(),
        ));

    let article = Element::new("article")
        .class("project-page")
        .attr("data-project-id", project.id.as_str())
        .child(header.render())
        .child(content.render());

    out.push_str(&article.render());
    out
}
