//! Preview server
//!
//! Serves the public directory. Unless started in static mode it also watches
//! the data documents and the config file and re-renders on change.

use anyhow::Result;
use axum::{response::Redirect, routing::get, Router};
use notify_debouncer_mini::{new_debouncer, notify::RecursiveMode, DebounceEventResult};
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;
use tokio::sync::mpsc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::collection::DataSource;
use crate::helpers::url_for;
use crate::{Folio, CONFIG_FILE};

/// Build the router for a public directory; `/` redirects to the blog
pub fn router(folio: &Folio) -> Router {
    let home = url_for(&folio.config, "blog.html");

    Router::new()
        .route("/", get(move || async move { Redirect::temporary(&home) }))
        .fallback_service(ServeDir::new(&folio.public_dir).append_index_html_on_directories(true))
        .layer(TraceLayer::new_for_http())
}

/// Start the preview server
pub async fn start(folio: &Folio, ip: &str, port: u16, watch: bool) -> Result<()> {
    let app = router(folio);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    if watch {
        println!("Watching for changes...");
    }
    println!("Press Ctrl+C to stop.");

    if watch {
        let folio = folio.clone();
        tokio::spawn(async move {
            if let Err(e) = watch_and_render(folio).await {
                tracing::error!("File watcher error: {}", e);
            }
        });
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Whether a changed path should trigger a re-render
fn is_relevant(path: &Path) -> bool {
    let path_str = path.to_string_lossy();
    !path_str.contains(".git") && !path_str.contains(".DS_Store") && !path_str.ends_with('~')
}

/// Re-render whenever the data documents or the config file change
async fn watch_and_render(folio: Folio) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();

    // Debounce to avoid multiple rapid re-renders
    let mut debouncer = new_debouncer(Duration::from_millis(500), move |res: DebounceEventResult| {
        let _ = tx.send(res);
    })?;

    if let DataSource::Local(data_dir) = folio.data_source() {
        if data_dir.exists() {
            debouncer
                .watcher()
                .watch(&data_dir, RecursiveMode::Recursive)?;
            tracing::debug!("Watching: {:?}", data_dir);
        }
    }

    let config_path = folio.base_dir.join(CONFIG_FILE);
    if config_path.exists() {
        debouncer
            .watcher()
            .watch(&config_path, RecursiveMode::NonRecursive)?;
        tracing::debug!("Watching: {:?}", config_path);
    }

    while let Some(result) = rx.recv().await {
        let events = match result {
            Ok(events) => events,
            Err(e) => {
                tracing::error!("Watch error: {:?}", e);
                continue;
            }
        };

        let changed: Vec<_> = events.iter().filter(|e| is_relevant(&e.path)).collect();
        if changed.is_empty() {
            continue;
        }
        for event in &changed {
            tracing::info!("File changed: {}", event.path.display());
        }

        // The config may have changed too
        let current = match Folio::new(&folio.base_dir) {
            Ok(reloaded) => reloaded,
            Err(e) => {
                tracing::error!("Failed to reload {}: {}", CONFIG_FILE, e);
                continue;
            }
        };

        match current.render().await {
            Ok(()) => tracing::info!("Re-rendered successfully"),
            Err(e) => tracing::error!("Render failed: {}", e),
        }
    }

    Ok(())
}
