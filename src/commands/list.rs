//! List site content

use anyhow::Result;
use std::collections::HashMap;

use crate::content::{Entity, EntityKind};
use crate::Folio;

/// List site content by type
pub async fn run(folio: &Folio, content_type: &str) -> Result<()> {
    if let Some(kind) = EntityKind::parse(content_type) {
        let site = folio.load().await;
        let collection = site.collection(kind);
        println!("{}s ({}):", capitalize(&kind.to_string()), collection.len());
        for entity in collection.entities() {
            println!("  {}", describe(entity));
        }
        return Ok(());
    }

    match content_type {
        "tag" | "tags" => {
            let site = folio.load().await;
            let mut counts: HashMap<&str, usize> = HashMap::new();
            let all = site.posts.entities().iter().chain(site.projects.entities());
            let flattened: Vec<Vec<String>> = all.map(|e| e.tags.flatten()).collect();
            for tag in flattened.iter().flatten() {
                *counts.entry(tag.as_str()).or_insert(0) += 1;
            }

            println!("Tags ({}):", counts.len());
            let mut counts: Vec<_> = counts.into_iter().collect();
            counts.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
            for (tag, count) in counts {
                println!("  {} ({})", tag, count);
            }
        }
        "category" | "categories" => {
            let site = folio.load().await;
            let mut categories = site.posts.tags_by_category();
            for (category, tags) in site.projects.tags_by_category() {
                let merged = categories.entry(category).or_default();
                merged.extend(tags);
                merged.sort();
                merged.dedup();
            }

            println!("Categories ({}):", categories.len());
            for (category, tags) in categories {
                println!("  {}: {}", category, tags.join(", "));
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, project, tag, category",
                content_type
            );
        }
    }

    Ok(())
}

fn describe(entity: &Entity) -> String {
    let mut line = format!("{} - {} [{}]", entity.date.format("%Y-%m-%d"), entity.title, entity.id);
    if entity.featured {
        line.push_str(" *");
    }
    line
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
