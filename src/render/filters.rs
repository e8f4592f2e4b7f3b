//! Tag filter bar shown above a listing

use std::collections::{BTreeMap, BTreeSet};

use crate::content::tags::{is_wildcard, same_tag, ALL_TAGS};
use crate::helpers::Element;

const UNCATEGORIZED: &str = "Other";

fn filter_button(tag: &str, active: &str) -> String {
    let mut button = Element::new("button")
        .class("filter-tag")
        .attr("data-tag", tag);

    let is_active = if is_wildcard(tag) {
        is_wildcard(active)
    } else {
        same_tag(tag, active)
    };
    if is_active {
        button = button.class("active");
    }

    button.child(tag).render()
}

/// Generate the filter bar as HTML
///
/// The first button is always `all`. With no categories every tag gets a
/// button in a single row; otherwise buttons are grouped per category and
/// tags that appear in no category are gathered under "Other".
pub fn render_tag_filters(
    all_tags: &[String],
    by_category: &BTreeMap<String, Vec<String>>,
    active: &str,
) -> String {
    let mut bar = Element::new("div")
        .class("tag-filters")
        .child(filter_button(ALL_TAGS, active));

    if by_category.is_empty() {
        let buttons: String = all_tags.iter().map(|tag| filter_button(tag, active)).collect();
        return bar.child(buttons).render();
    }

    let categorized: BTreeSet<&String> = by_category.values().flatten().collect();
    let uncategorized: Vec<String> = all_tags
        .iter()
        .filter(|tag| !categorized.contains(tag))
        .cloned()
        .collect();

    let groups = by_category
        .iter()
        .map(|(category, tags)| (category.as_str(), tags))
        .chain((!uncategorized.is_empty()).then_some((UNCATEGORIZED, &uncategorized)));

    for (category, tags) in groups {
        let buttons: String = tags.iter().map(|tag| filter_button(tag, active)).collect();
        let group = Element::new("div")
            .class("filter-group")
            .attr("data-category", category)
            .child(Element::new("span").class("filter-category").child(category).render())
            .child(buttons);
        bar = bar.child(group.render());
    }

    bar.render()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_flat_filters() {
        let html = render_tag_filters(&strings(&["CLI", "Rust"]), &BTreeMap::new(), "rust");
        assert_eq!(
            html,
            concat!(
                r#"<div class="tag-filters">"#,
                r#"<button class="filter-tag" data-tag="all">all</button>"#,
                r#"<button class="filter-tag" data-tag="CLI">CLI</button>"#,
                r#"<button class="filter-tag active" data-tag="Rust">Rust</button>"#,
                "</div>"
            )
        );
    }

    #[test]
    fn test_active_ignores_non_ascii_case() {
        let html = render_tag_filters(&strings(&["École", "Rust"]), &BTreeMap::new(), "école");
        assert!(html.contains(r#"<button class="filter-tag active" data-tag="École">École</button>"#));
        assert!(html.contains(r#"<button class="filter-tag" data-tag="Rust">Rust</button>"#));
    }

    #[test]
    fn test_wildcard_active() {
        let html = render_tag_filters(&strings(&["Rust"]), &BTreeMap::new(), "ALL");
        assert!(html.contains(r#"<button class="filter-tag active" data-tag="all">all</button>"#));
        assert!(html.contains(r#"<button class="filter-tag" data-tag="Rust">"#));
    }

    #[test]
    fn test_grouped_with_other() {
        let mut categories = BTreeMap::new();
        categories.insert("Languages".to_string(), strings(&["Rust"]));
        categories.insert("Hardware".to_string(), strings(&["Arduino"]));

        let html = render_tag_filters(&strings(&["Arduino", "Legacy", "Rust"]), &categories, "all");

        let hardware = html.find(r#"data-category="Hardware""#).unwrap();
        let languages = html.find(r#"data-category="Languages""#).unwrap();
        let other = html.find(r#"data-category="Other""#).unwrap();
        assert!(hardware < languages && languages < other);
        assert!(html.contains(r#"<span class="filter-category">Other</span><button class="filter-tag" data-tag="Legacy">Legacy</button>"#));
    }

    #[test]
    fn test_no_other_group_when_all_categorized() {
        let mut categories = BTreeMap::new();
        categories.insert("Languages".to_string(), strings(&["Rust"]));

        let html = render_tag_filters(&strings(&["Rust"]), &categories, "all");
        assert!(!html.contains("Other"));
    }
}
