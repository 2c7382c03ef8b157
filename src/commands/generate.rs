//! Generate site data files

use anyhow::{Context, Result};
use indexmap::IndexMap;
use notify::RecursiveMode;
use notify_debouncer_mini::{new_debouncer, DebounceEventResult};
use serde::Serialize;
use std::fs;
use std::future::Future;
use std::path::Path;
use std::time::Duration;

use crate::config::{
    FooterConfig, HeadTag, NavItem, SearchConfig, SidebarGroup, SitemapConfig, SocialLink,
};
use crate::content::loader::ContentLoader;
use crate::content::sidebar::resolve_sidebar;
use crate::i18n::Locale;
use crate::{Site, CONFIG_FILE};

/// Posts data file, relative to the output directory
pub const POSTS_FILE: &str = "posts.json";

/// Site data file, relative to the output directory
pub const SITE_FILE: &str = "site.json";

/// Resolved site configuration handed to the renderer
#[derive(Debug, Serialize)]
pub struct SiteData<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub lang: Locale,
    pub base: &'a str,
    pub clean_urls: bool,
    pub last_updated: bool,
    pub ignore_dead_links: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sitemap: Option<&'a SitemapConfig>,
    pub head: &'a [HeadTag],
    pub theme_config: ThemeData<'a>,
}

#[derive(Debug, Serialize)]
pub struct ThemeData<'a> {
    pub nav: &'a [NavItem],
    pub sidebar: IndexMap<String, Vec<SidebarGroup>>,
    pub social_links: &'a [SocialLink],
    pub search: &'a SearchConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<&'a FooterConfig>,
}

impl<'a> SiteData<'a> {
    /// Resolve the site data, scanning automatic sidebar sections
    pub fn resolve(site: &'a Site) -> Result<Self> {
        let config = &site.config;
        let theme = &config.theme_config;

        Ok(Self {
            title: &config.title,
            description: &config.description,
            lang: config.lang,
            base: &config.base,
            clean_urls: config.clean_urls,
            last_updated: config.last_updated,
            ignore_dead_links: config.ignore_dead_links,
            sitemap: config.sitemap.as_ref(),
            head: &config.head,
            theme_config: ThemeData {
                nav: &theme.nav,
                sidebar: resolve_sidebar(config, &site.source_dir)?,
                social_links: &theme.social_links,
                search: &theme.search,
                footer: theme.footer.as_ref(),
            },
        })
    }
}

/// Generate the site data files
pub fn run(site: &Site) -> Result<()> {
    let start = std::time::Instant::now();

    let posts = ContentLoader::new(site).load_posts()?;
    tracing::info!("Loaded {} posts", posts.len());

    let data = SiteData::resolve(site)?;

    fs::create_dir_all(&site.out_dir)
        .with_context(|| format!("Failed to create {:?}", site.out_dir))?;

    let mut written = 0;
    if write_json(&site.out_dir.join(POSTS_FILE), &posts)? {
        written += 1;
    }
    if write_json(&site.out_dir.join(SITE_FILE), &data)? {
        written += 1;
    }

    let duration = start.elapsed();
    tracing::info!(
        "Generated in {:.2}s ({} of 2 files changed)",
        duration.as_secs_f64(),
        written
    );

    Ok(())
}

/// Write pretty JSON, leaving the file alone when its content is unchanged
///
/// Returns whether the file was written.
fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<bool> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');

    if fs::read_to_string(path).ok().as_deref() == Some(json.as_str()) {
        tracing::debug!("Unchanged: {:?}", path);
        return Ok(false);
    }

    fs::write(path, json).with_context(|| format!("Failed to write {:?}", path))?;
    tracing::debug!("Wrote: {:?}", path);
    Ok(true)
}

/// Watch for file changes and regenerate until Ctrl+C
pub async fn watch(site: &Site) -> Result<()> {
    watch_until(site, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Cannot listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    })
    .await
}

/// Watch for file changes and regenerate until `shutdown` completes
pub async fn watch_until<F: Future<Output = ()>>(site: &Site, shutdown: F) -> Result<()> {
    let (tx, mut rx) = tokio::sync::mpsc::channel::<DebounceEventResult>(16);

    let mut debouncer = new_debouncer(
        Duration::from_millis(500),
        move |res: DebounceEventResult| {
            let _ = tx.blocking_send(res);
        },
    )?;

    // Watch source directory
    if site.source_dir.exists() {
        debouncer
            .watcher()
            .watch(&site.source_dir, RecursiveMode::Recursive)?;
    }

    // Watch config file
    let config_path = site.base_dir.join(CONFIG_FILE);
    if config_path.exists() {
        debouncer
            .watcher()
            .watch(&config_path, RecursiveMode::NonRecursive)?;
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            Some(res) = rx.recv() => match res {
                Ok(events) => {
                    // Our own output may live under the source directory
                    let relevant = events
                        .iter()
                        .any(|e| !e.path.starts_with(&site.out_dir));
                    if !relevant {
                        continue;
                    }

                    tracing::info!("File changed, regenerating...");
                    let result = Site::new(&site.base_dir).and_then(|fresh| run(&fresh));
                    if let Err(e) = result {
                        tracing::error!("Generation failed: {:#}", e);
                    }
                }
                Err(e) => tracing::warn!("Watch error: {:?}", e),
            },
            _ = &mut shutdown => {
                tracing::info!("Stopping watcher");
                break;
            }
        }
    }

    Ok(())
}
