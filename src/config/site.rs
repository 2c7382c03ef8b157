//! Site configuration (_config.yml)

use anyhow::{Context, Result};
use chrono_tz::Tz;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::helpers::DEFAULT_DATE_FORMAT;
use crate::i18n::Locale;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub lang: Locale,
    pub timezone: Tz,

    // URL
    pub base: String,
    pub clean_urls: bool,
    pub last_updated: bool,
    pub ignore_dead_links: bool,
    pub sitemap: Option<SitemapConfig>,

    // Directory
    pub source_dir: String,
    pub out_dir: String,

    // Meta
    pub head: Vec<HeadTag>,

    // Theme
    pub theme_config: ThemeConfig,

    // Posts
    pub posts: PostsConfig,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "瓶子笔记".to_string(),
            description: String::new(),
            lang: Locale::ZhCn,
            timezone: Tz::UTC,

            base: "/".to_string(),
            clean_urls: true,
            last_updated: false,
            ignore_dead_links: false,
            sitemap: None,

            source_dir: "docs".to_string(),
            out_dir: "public".to_string(),

            head: Vec::new(),

            theme_config: ThemeConfig::default(),

            posts: PostsConfig::default(),

            extra: IndexMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {:?}", path))?;
        let mut config: SiteConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config {:?}", path))?;
        config.normalize();
        Ok(config)
    }

    /// Make `base` start and end with a slash
    pub fn normalize(&mut self) {
        let trimmed = self.base.trim().trim_matches('/');
        self.base = if trimmed.is_empty() {
            "/".to_string()
        } else {
            format!("/{}/", trimmed)
        };
    }
}

/// Sitemap configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SitemapConfig {
    pub hostname: String,
}

/// A tag injected into every page's `<head>`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HeadTag {
    pub tag: String,
    #[serde(default)]
    pub attrs: IndexMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// Theme configuration: navigation, sidebar, search and footer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub nav: Vec<NavItem>,
    /// Sidebar sections keyed by path prefix, e.g. `/notes/`
    pub sidebar: IndexMap<String, SidebarSection>,
    pub social_links: Vec<SocialLink>,
    pub search: SearchConfig,
    pub footer: Option<FooterConfig>,
}

/// A top navigation entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NavItem {
    pub text: String,
    pub link: String,
    /// Regex of paths for which this entry is highlighted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_match: Option<String>,
}

/// A sidebar section: explicit groups, or a directory to scan
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum SidebarSection {
    Groups(Vec<SidebarGroup>),
    Auto { auto: String },
}

/// A labelled group of sidebar links
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SidebarGroup {
    pub text: String,
    #[serde(default)]
    pub items: Vec<SidebarItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SidebarItem {
    pub text: String,
    pub link: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SocialLink {
    pub icon: String,
    pub link: String,
}

/// Search provider selection
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SearchProvider {
    #[default]
    Local,
    Algolia,
    None,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub provider: SearchProvider,
    /// Provider-specific options, passed through untouched
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub options: IndexMap<String, serde_yaml::Value>,
}

/// Footer markup
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FooterConfig {
    pub message: Option<String>,
    pub copyright: Option<String>,
}

/// Post loading configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PostsConfig {
    /// Glob, relative to the source directory
    pub pattern: String,
    /// Marker that ends the excerpt
    pub excerpt: String,
    pub date_format: String,
    /// Fail the build on a bad post instead of skipping it
    pub strict: bool,
}

impl Default for PostsConfig {
    fn default() -> Self {
        Self {
            pattern: "posts/*.md".to_string(),
            excerpt: "<!-- more -->".to_string(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            strict: true,
        }
    }
}
