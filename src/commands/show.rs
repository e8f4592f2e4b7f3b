//! Print the fragment of a single post or project

use anyhow::{Context, Result};

use crate::content::EntityKind;
use crate::render::gist::render_loader;
use crate::render::{render_project_modal, Fragment, GistQueue};
use crate::Folio;

/// Render one entity, looked up by id or slug, with its gist loader
pub async fn render(folio: &Folio, kind: &str, token: &str, modal: bool) -> Result<String> {
    let kind = EntityKind::parse(kind)
        .with_context(|| format!("Unknown type: {}. Available: post, project", kind))?;

    let site = folio.load().await;
    let collection = site.collection(kind);

    let rendered: Option<Fragment> = if modal && kind == EntityKind::Project {
        collection
            .get(token)
            .map(|project| render_project_modal(project, &folio.config))
    } else {
        collection.render_detail(token, &folio.config)
    };
    let fragment =
        rendered.with_context(|| format!("No {} with id or slug {:?}", kind, token))?;

    fragment.report(token);

    let mut queue = GistQueue::new();
    queue.enqueue(fragment.embeds);
    let loader = render_loader(&queue.drain(), &folio.config.gist)?;

    Ok(format!("{}{}", fragment.html, loader))
}

/// Print one entity's fragment to stdout
pub async fn run(folio: &Folio, kind: &str, token: &str, modal: bool) -> Result<()> {
    let html = render(folio, kind, token, modal).await?;
    println!("{}", html);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn folio() -> (tempfile::TempDir, Folio) {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("data")).unwrap();
        fs::write(
            dir.path().join("data/projects.json"),
            r#"{"projects": [{"id": "p1", "slug": "arm", "title": "Arm", "date": "2024-01-01",
                "content": [{"type": "gist", "gistId": "abc"}]}]}"#,
        )
        .unwrap();
        let folio = Folio::new(dir.path()).unwrap();
        (dir, folio)
    }

    #[tokio::test]
    async fn test_show_project() {
        let (_dir, folio) = folio();

        let page = render(&folio, "project", "arm", false).await.unwrap();
        assert!(page.contains(r#"<article class="project-page" data-project-id="p1">"#));
        assert!(page.ends_with("</script>"));

        let modal = render(&folio, "project", "p1", true).await.unwrap();
        assert!(modal.starts_with(r#"<div class="project-modal-overlay""#));
    }

    #[tokio::test]
    async fn test_show_missing() {
        let (_dir, folio) = folio();
        assert!(render(&folio, "project", "nope", false).await.is_err());
        assert!(render(&folio, "post", "p1", false).await.is_err());
        assert!(render(&folio, "page", "p1", false).await.is_err());
    }
}
