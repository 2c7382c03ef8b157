//! Initialize a new notes site

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::CONFIG_FILE;

const DEFAULT_CONFIG: &str = r#"# Site
title: 瓶子笔记
description: 一个爱折腾的前端程序员的网络自留地
lang: zh-cn
timezone: Asia/Shanghai

# URL
base: /
clean_urls: true
last_updated: false
ignore_dead_links: true
sitemap:
  hostname: https://wjian.xyz

# Directory
source_dir: docs
out_dir: public

# Meta
head:
  - tag: meta
    attrs:
      name: author
      content: wungjyan

# Theme
theme_config:
  nav:
    - text: 笔记
      link: /notes
      active_match: /notes/.*
    - text: 关于
      link: /about
  sidebar:
    /notes/:
      auto: notes
  search:
    provider: local
  footer:
    message: 'Powered By <a href="https://vitepress.dev/">VitePress</a>'
    copyright: 'Copyright © 2022-present <a href="https://wjian.xyz">wjian.xyz</a>'

# Posts
posts:
  pattern: 'posts/*.md'
  excerpt: '<!-- more -->'
  date_format: YYYY-MM-DD
  strict: true
"#;

const SCAFFOLD_POST: &str = r#"---
title: {{ title }}
date: {{ date }}
description:
tags: []
categories: []
draft: {{ draft }}
---

<!-- more -->
"#;

const HELLO_POST: &str = r#"---
title: Hello World
date: 2024-01-01
description: 第一篇文章
tags:
  - notes
---

欢迎来到这里。

<!-- more -->

这是正文。
"#;

const ABOUT_PAGE: &str = "# 关于\n";

const NOTES_INDEX: &str = "# 笔记\n";

/// Initialize a new site in the given directory
///
/// Existing files are left untouched.
pub fn init_site(target_dir: &Path) -> Result<()> {
    // Create directory structure
    fs::create_dir_all(target_dir.join("docs/posts"))?;
    fs::create_dir_all(target_dir.join("docs/notes"))?;
    fs::create_dir_all(target_dir.join("scaffolds"))?;

    let files = [
        (CONFIG_FILE, DEFAULT_CONFIG),
        ("scaffolds/post.md", SCAFFOLD_POST),
        ("docs/posts/hello-world.md", HELLO_POST),
        ("docs/notes/index.md", NOTES_INDEX),
        ("docs/about.md", ABOUT_PAGE),
    ];

    for (rel, content) in files {
        let path = target_dir.join(rel);
        if path.exists() {
            tracing::warn!("Skipping existing file: {:?}", path);
            continue;
        }
        fs::write(&path, content)?;
        tracing::debug!("Created: {:?}", path);
    }

    Ok(())
}
