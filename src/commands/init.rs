//! Initialize a new Folio site

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::CONFIG_FILE;

const CONFIG_TEMPLATE: &str = r#"# Folio Configuration

# Site
title: My Portfolio
author: John Doe
language: en

# URL
url: http://example.com
root: /
work_page: work.html

# Data
data_dir: data
# data_url: https://example.com/data
blog_data: blog.json
projects_data: projects.json

# Output
public_dir: public

# Display
date_format: MMMM D, YYYY
sort_order: newest

# Gist embeds
gist:
  measure_delay_ms: 500
  fallback_height: 400
"#;

const BLOG_TEMPLATE: &str = r#"{
  "posts": [
    {
      "id": "hello-world",
      "title": "Hello World",
      "date": "2024-01-15",
      "tags": ["Welcome"],
      "content": "Welcome to your new blog.\n\nEdit data/blog.json and run `folio-rs render`."
    }
  ]
}
"#;

const PROJECTS_TEMPLATE: &str = r#"{
  "projects": [
    {
      "id": "sample-project",
      "slug": "sample-project",
      "title": "Sample Project",
      "date": "2024-01-20",
      "featured": true,
      "tags": {
        "Languages": ["Rust"],
        "Topics": ["CLI"]
      },
      "shortDescription": "A project to show the content blocks.",
      "overview": "Replace this project with your own work.",
      "content": [
        {
          "type": "section",
          "heading": "Overview",
          "blocks": [
            { "type": "text", "body": "Projects are built from sections and blocks." },
            { "type": "callout", "style": "info", "title": "Tip", "body": "Blocks of an unknown type are skipped." }
          ]
        }
      ]
    }
  ]
}
"#;

/// Initialize a new site in the given directory.
///
/// Existing files are left untouched.
pub fn init_site(target_dir: &Path) -> Result<()> {
    fs::create_dir_all(target_dir.join("data"))?;

    let files = [
        (target_dir.join(CONFIG_FILE), CONFIG_TEMPLATE),
        (target_dir.join("data/blog.json"), BLOG_TEMPLATE),
        (target_dir.join("data/projects.json"), PROJECTS_TEMPLATE),
    ];

    for (path, content) in files {
        if path.exists() {
            tracing::warn!("Keeping existing {:?}", path);
            continue;
        }
        fs::write(&path, content)?;
        tracing::debug!("Created: {:?}", path);
    }

    Ok(())
}
