//! Sidebar resolution - expands `auto` sidebar sections from the notes tree

use anyhow::Result;
use indexmap::IndexMap;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use super::loader::document_url;
use super::FrontMatter;
use crate::config::{SidebarGroup, SidebarItem, SidebarSection, SiteConfig};

/// Resolve every sidebar section into explicit groups
pub fn resolve_sidebar(
    config: &SiteConfig,
    source_dir: &Path,
) -> Result<IndexMap<String, Vec<SidebarGroup>>> {
    let mut resolved = IndexMap::new();

    for (prefix, section) in &config.theme_config.sidebar {
        let groups = match section {
            SidebarSection::Groups(groups) => groups.clone(),
            SidebarSection::Auto { auto } => {
                let groups = scan_sidebar(source_dir, auto, config)?;
                tracing::debug!("Scanned {} sidebar groups for {}", groups.len(), prefix);
                groups
            }
        };
        resolved.insert(prefix.clone(), groups);
    }

    Ok(resolved)
}

/// Build sidebar groups from `<source_dir>/<dir>`
///
/// Each subdirectory becomes a group holding every markdown file below it,
/// nested folders included; files directly under `dir` form a leading group
/// named after `dir`. Entries are ordered by file name, and names starting
/// with `.` or `_` are skipped.
pub fn scan_sidebar(
    source_dir: &Path,
    dir: &str,
    config: &SiteConfig,
) -> Result<Vec<SidebarGroup>> {
    let root = source_dir.join(dir.trim_matches('/'));
    if !root.is_dir() {
        tracing::warn!("Sidebar directory {:?} does not exist", root);
        return Ok(Vec::new());
    }

    let root_name = root
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let mut loose = SidebarGroup {
        text: root_name,
        items: Vec::new(),
    };
    let mut groups: Vec<SidebarGroup> = Vec::new();

    let walker = WalkDir::new(&root)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            let name = e.file_name().to_string_lossy();
            !name.starts_with('.') && !name.starts_with('_')
        });

    for entry in walker {
        let entry = entry?;
        let path = entry.path();

        if entry.file_type().is_dir() {
            if entry.depth() == 1 {
                groups.push(SidebarGroup {
                    text: entry.file_name().to_string_lossy().to_string(),
                    items: Vec::new(),
                });
            }
            continue;
        }

        let is_markdown = path.extension().and_then(|e| e.to_str()) == Some("md");
        if !is_markdown || path.file_stem().and_then(|s| s.to_str()) == Some("index") {
            continue;
        }

        let item = sidebar_item(path, source_dir, config)?;
        if entry.depth() == 1 {
            loose.items.push(item);
            continue;
        }

        // Files below a subdirectory belong to the group of its top folder
        let top = path
            .strip_prefix(&root)
            .ok()
            .and_then(|rel| rel.components().next())
            .map(|c| c.as_os_str().to_string_lossy().to_string());
        match groups.iter_mut().rfind(|g| Some(&g.text) == top.as_ref()) {
            Some(group) => group.items.push(item),
            None => loose.items.push(item),
        }
    }

    if !loose.items.is_empty() {
        groups.insert(0, loose);
    }
    groups.retain(|g| !g.items.is_empty());

    Ok(groups)
}

fn sidebar_item(path: &Path, source_dir: &Path, config: &SiteConfig) -> Result<SidebarItem> {
    let relative = path.strip_prefix(source_dir).unwrap_or(path);
    let link = document_url(relative, &config.base, config.clean_urls);

    let content = fs::read_to_string(path)?;
    let title = match FrontMatter::parse(&content) {
        Ok((fm, _)) => fm.title,
        Err(e) => {
            tracing::warn!("Ignoring front-matter of {:?}: {}", path, e);
            None
        }
    };
    let text = title.unwrap_or_else(|| {
        path.file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default()
    });

    Ok(SidebarItem { text, link })
}
