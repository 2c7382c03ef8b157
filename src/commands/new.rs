//! Create a new post

use anyhow::Result;
use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};

use crate::helpers::format_date;
use crate::Site;

/// Create a new post (or draft) under the posts directory
///
/// Returns the path of the created file.
pub fn create_post(site: &Site, title: &str, draft: bool, path: Option<&str>) -> Result<PathBuf> {
    let config = &site.config;
    let now = Utc::now().with_timezone(&config.timezone);

    let target_dir = site.source_dir.join(posts_dir(&config.posts.pattern));
    fs::create_dir_all(&target_dir)?;

    // Generate filename
    let filename = match path {
        Some(p) => format!("{}.md", p.trim_end_matches(".md")),
        None => {
            let slug = slug::slugify(title);
            if slug.is_empty() {
                format!("{}.md", format_date(Some(&now), "YYYYMMDDHHmmss", config.lang))
            } else {
                format!("{}.md", slug)
            }
        }
    };
    let file_path = target_dir.join(&filename);

    // Load scaffold template
    let scaffold_path = site.base_dir.join("scaffolds").join("post.md");
    let scaffold_content = if scaffold_path.exists() {
        fs::read_to_string(&scaffold_path)?
    } else {
        // Default scaffold
        r#"---
title: {{ title }}
date: {{ date }}
description:
tags: []
categories: []
draft: {{ draft }}
---

<!-- more -->
"#
        .to_string()
    };

    // Replace template variables
    let content = scaffold_content
        .replace("{{ title }}", &yaml_scalar(title)?)
        .replace(
            "{{ date }}",
            &format_date(Some(&now), "YYYY-MM-DD HH:mm:ss", config.lang),
        )
        .replace("{{ draft }}", if draft { "true" } else { "false" });

    // Check if file already exists
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    fs::write(&file_path, content)?;
    tracing::info!("Created: {:?}", file_path);

    Ok(file_path)
}

/// Literal directory prefix of a glob, e.g. `posts` for `posts/*.md`
fn posts_dir(pattern: &str) -> PathBuf {
    Path::new(pattern.trim_start_matches('/'))
        .components()
        .take_while(|c| {
            let s = c.as_os_str().to_string_lossy();
            !s.contains(['*', '?', '[', '{'])
        })
        .filter(|c| !c.as_os_str().to_string_lossy().ends_with(".md"))
        .collect()
}

/// Render a title as a YAML scalar, quoted when plain YAML would misread it
fn yaml_scalar(s: &str) -> Result<String> {
    let yaml = serde_yaml::to_string(s)?;
    Ok(yaml.trim_end().to_string())
}
