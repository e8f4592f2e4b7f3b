//! Render the site into the public directory
//!
//! Output layout:
//! - `blog.html`: tag filters and every post
//! - `posts/<id>.html`: one post
//! - `<work_page>`: tag filters and a card per project
//! - `<slug>.html`: full project page
//! - `modals/<id>.html`: project overview modal

use anyhow::Result;
use notify::Watcher;
use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

use crate::collection::DataSource;
use crate::config::SiteConfig;
use crate::content::tags::ALL_TAGS;
use crate::helpers::html_escape;
use crate::render::gist::render_loader;
use crate::render::{
    render_post, render_project_modal, render_project_page, render_tag_filters, Fragment,
    GistQueue,
};
use crate::{Folio, Site, CONFIG_FILE};

/// Load both documents and write every page
pub async fn run(folio: &Folio) -> Result<()> {
    let start = Instant::now();
    let site = folio.load().await;
    let pages = write_site(folio, &site)?;

    tracing::info!(
        "Rendered {} pages ({} posts, {} projects) in {:.2}s",
        pages,
        site.posts.len(),
        site.projects.len(),
        start.elapsed().as_secs_f64()
    );
    Ok(())
}

/// Write every page of a loaded site, returning the number of pages written
pub fn write_site(folio: &Folio, site: &Site) -> Result<usize> {
    let config = &folio.config;
    let mut writer = PageWriter::new(folio);

    let posts = &site.posts;
    let mut blog = Fragment::from_html(render_tag_filters(
        &posts.all_tags(),
        &posts.tags_by_category(),
        ALL_TAGS,
    ));
    blog.append(posts.render_list(ALL_TAGS, config));
    writer.write("blog.html", &config.title, blog)?;

    for post in posts.entities() {
        let path = format!("posts/{}.html", slug::slugify(&post.id));
        writer.write(&path, &post.title, render_post(post, config))?;
    }

    let projects = &site.projects;
    let mut work = Fragment::from_html(render_tag_filters(
        &projects.all_tags(),
        &projects.tags_by_category(),
        ALL_TAGS,
    ));
    work.append(projects.render_list(ALL_TAGS, config));
    writer.write(&config.work_page, &config.title, work)?;

    for project in projects.entities() {
        let page = format!("{}.html", project.page_name());
        writer.write(&page, &project.title, render_project_page(project, config))?;

        let modal = format!("modals/{}.html", slug::slugify(&project.id));
        writer.write(&modal, &project.title, render_project_modal(project, config))?;
    }

    Ok(writer.pages)
}

/// Writes fragments as standalone documents, loading their gists
struct PageWriter<'a> {
    public_dir: &'a Path,
    config: &'a SiteConfig,
    queue: GistQueue,
    pages: usize,
}

impl<'a> PageWriter<'a> {
    fn new(folio: &'a Folio) -> Self {
        Self {
            public_dir: &folio.public_dir,
            config: &folio.config,
            queue: GistQueue::new(),
            pages: 0,
        }
    }

    fn write(&mut self, path: &str, title: &str, fragment: Fragment) -> Result<()> {
        fragment.report(path);

        // Containers exist once the fragment is in the page; load them there.
        self.queue.enqueue(fragment.embeds);
        let loader = render_loader(&self.queue.drain(), &self.config.gist)?;

        let html = page_document(self.config, title, &fragment.html, &loader);
        let dest = self.public_dir.join(path);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&dest, html)?;

        tracing::debug!("Generated: {:?}", dest);
        self.pages += 1;
        Ok(())
    }
}

/// Minimal document around a fragment
fn page_document(config: &SiteConfig, title: &str, body: &str, loader: &str) -> String {
    let title = if title.is_empty() || title == config.title {
        html_escape(&config.title)
    } else {
        format!("{} | {}", html_escape(title), html_escape(&config.title))
    };

    format!(
        concat!(
            "<!DOCTYPE html>\n",
            "<html lang=\"{lang}\">\n",
            "<head>\n",
            "<meta charset=\"utf-8\">\n",
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n",
            "<meta name=\"author\" content=\"{author}\">\n",
            "<title>{title}</title>\n",
            "</head>\n",
            "<body>\n{body}\n{loader}</body>\n",
            "</html>\n"
        ),
        lang = html_escape(&config.language),
        author = html_escape(&config.author),
        title = title,
        body = body,
        loader = loader,
    )
}

/// Watch the data documents and the config file and re-render on change
pub async fn watch(folio: &Folio) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();

    let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
        if let Ok(event) = res {
            let _ = tx.send(event);
        }
    })?;

    let mut watched = 0;
    if let DataSource::Local(data_dir) = folio.data_source() {
        if data_dir.exists() {
            watcher.watch(&data_dir, notify::RecursiveMode::Recursive)?;
            watched += 1;
        }
    }

    let config_path = folio.base_dir.join(CONFIG_FILE);
    if config_path.exists() {
        watcher.watch(&config_path, notify::RecursiveMode::NonRecursive)?;
        watched += 1;
    }

    if watched == 0 {
        anyhow::bail!("Nothing to watch: no local data directory or {}", CONFIG_FILE);
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    let mut last_render = Instant::now();
    while let Some(_event) = rx.recv().await {
        // Debounce: editors emit several events per save
        if last_render.elapsed() <= Duration::from_millis(500) {
            continue;
        }

        tracing::info!("File changed, re-rendering...");
        match Folio::new(&folio.base_dir) {
            Ok(reloaded) => {
                if let Err(e) = run(&reloaded).await {
                    tracing::error!("Render failed: {}", e);
                }
            }
            Err(e) => tracing::error!("Failed to reload {}: {}", CONFIG_FILE, e),
        }
        last_render = Instant::now();
    }

    Ok(())
}
