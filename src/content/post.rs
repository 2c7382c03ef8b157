//! Post data structures

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::FrontMatter;

/// A markdown document as read from disk, before summarizing
#[derive(Debug, Clone, PartialEq)]
pub struct RawDocument {
    /// Site URL of the rendered page
    pub url: String,

    /// Parsed front-matter
    pub frontmatter: FrontMatter,

    /// Text before the excerpt marker
    pub excerpt: Option<String>,
}

impl RawDocument {
    pub fn new(url: impl Into<String>, frontmatter: FrontMatter) -> Self {
        Self {
            url: url.into(),
            frontmatter,
            excerpt: None,
        }
    }
}

/// Publication date in the three shapes listings need
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDate {
    pub date: DateTime<FixedOffset>,

    /// Milliseconds since the Unix epoch
    pub time: i64,

    /// Formatted with the site date format
    pub string: String,
}

/// Summary of a published post, as listed on index pages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostSummary {
    pub title: String,
    pub url: String,
    pub date: PostDate,
    pub description: String,
    pub tags: Vec<String>,
    pub categories: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    pub draft: bool,
}
