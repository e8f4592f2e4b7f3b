//! Section renderer

use super::{render_block, Fragment};
use crate::content::Section;
use crate::helpers::Element;

/// Render a section: optional heading with its note, then the blocks in order.
///
/// A section with neither a heading nor any rendered block produces nothing.
pub fn render_section(section: &Section) -> Fragment {
    let mut out = Fragment::new();

    let blocks: String = section
        .blocks
        .iter()
        .map(|block| out.absorb(render_block(block)))
        .collect();

    let heading = section.heading.as_deref().filter(|h| !h.is_empty());
    if heading.is_none() && blocks.is_empty() {
        return out;
    }

    let header = heading.map(|heading| {
        let note = section
            .note
            .as_deref()
            .filter(|n| !n.is_empty())
            .map(|n| Element::new("span").class("section-note").child(n).render());

        Element::new("div")
            .class("section-header")
            .child(Element::new("h2").child(heading).render())
            .child_opt(note)
            .render()
    });

    let html = Element::new("section")
        .class("content-section")
        .child_opt(header)
        .child(blocks)
        .render();
    out.push_str(&html);
    out
}
