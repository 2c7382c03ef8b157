//! Content loader - loads posts from the source directory and summarizes them

use anyhow::{Context, Result};
use chrono::Offset;
use std::fs;
use std::path::{Path, PathBuf};

use super::frontmatter::split_excerpt;
use super::{ContentError, FrontMatter, PostDate, PostSummary, RawDocument};
use crate::config::SiteConfig;
use crate::helpers::Helpers;
use crate::Site;

/// Loads post documents matching the configured pattern
pub struct ContentLoader<'a> {
    site: &'a Site,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(site: &'a Site) -> Self {
        Self { site }
    }

    /// Load and summarize all published posts, newest first
    pub fn load_posts(&self) -> Result<Vec<PostSummary>> {
        let docs = self.load_documents()?;
        let posts = transform(&docs, &self.site.config)?;
        tracing::debug!(
            "Summarized {} posts ({} documents)",
            posts.len(),
            docs.len()
        );
        Ok(posts)
    }

    /// Read every markdown file matching `posts.pattern`, ordered by path
    pub fn load_documents(&self) -> Result<Vec<RawDocument>> {
        let mut docs = Vec::new();

        for path in self.matching_files()? {
            match self.load_document(&path) {
                Ok(doc) => docs.push(doc),
                Err(LoadError::Content(e)) if !self.site.config.posts.strict => {
                    tracing::warn!("Skipping {:?}: {}", path, e);
                }
                Err(LoadError::Content(e)) => return Err(e.into()),
                Err(LoadError::Io(e)) => {
                    return Err(e).with_context(|| format!("Failed to read {:?}", path))
                }
            }
        }

        Ok(docs)
    }

    fn matching_files(&self) -> Result<Vec<PathBuf>> {
        let source_dir = &self.site.source_dir;
        if !source_dir.exists() {
            tracing::debug!("Source directory {:?} does not exist", source_dir);
            return Ok(Vec::new());
        }

        let pattern = format!(
            "{}/{}",
            glob::Pattern::escape(&source_dir.to_string_lossy()),
            self.site.config.posts.pattern.trim_start_matches('/')
        );

        let mut files: Vec<PathBuf> = glob::glob(&pattern)
            .with_context(|| format!("Invalid posts pattern {:?}", pattern))?
            .filter_map(|entry| match entry {
                Ok(path) => Some(path),
                Err(e) => {
                    tracing::warn!("Cannot read {:?}: {}", e.path(), e.error());
                    None
                }
            })
            .filter(|p| p.is_file() && is_markdown_file(p))
            .collect();
        files.sort();

        Ok(files)
    }

    /// Load a single document from a file
    fn load_document(&self, path: &Path) -> Result<RawDocument, LoadError> {
        let content = fs::read_to_string(path).map_err(LoadError::Io)?;

        let relative = path.strip_prefix(&self.site.source_dir).unwrap_or(path);
        let config = &self.site.config;
        let url = document_url(relative, &config.base, config.clean_urls);

        let (frontmatter, body) = FrontMatter::parse(&content).map_err(|source| {
            LoadError::Content(ContentError::FrontMatter {
                url: url.clone(),
                source,
            })
        })?;
        let excerpt = split_excerpt(body, &config.posts.excerpt);

        Ok(RawDocument {
            url,
            frontmatter,
            excerpt,
        })
    }
}

enum LoadError {
    Io(std::io::Error),
    Content(ContentError),
}

/// Turn raw documents into published post summaries
///
/// Drafts are dropped before validation, so an unfinished draft never fails
/// the build. The result is sorted by date, newest first, with ties ordered
/// by URL.
pub fn transform(
    docs: &[RawDocument],
    config: &SiteConfig,
) -> Result<Vec<PostSummary>, ContentError> {
    let helpers = Helpers::new(config);
    let mut posts = Vec::with_capacity(docs.len());

    for doc in docs.iter().filter(|d| !d.frontmatter.draft) {
        match summarize(doc, &helpers) {
            Ok(post) => posts.push(post),
            Err(e) if !config.posts.strict => {
                tracing::warn!("Skipping post: {}", e);
            }
            Err(e) => return Err(e),
        }
    }

    posts.sort_by(|a, b| {
        b.date
            .time
            .cmp(&a.date.time)
            .then_with(|| a.url.cmp(&b.url))
    });

    Ok(posts)
}

/// Summarize a single document
pub fn summarize(doc: &RawDocument, helpers: &Helpers) -> Result<PostSummary, ContentError> {
    let fm = &doc.frontmatter;

    let title = fm
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ContentError::MissingTitle {
            url: doc.url.clone(),
        })?
        .to_string();

    let raw_date = fm.date.as_deref().ok_or_else(|| ContentError::MissingDate {
        url: doc.url.clone(),
    })?;
    let date = fm
        .parse_date(helpers.timezone())
        .ok_or_else(|| ContentError::InvalidDate {
            url: doc.url.clone(),
            value: raw_date.to_string(),
        })?;

    let description = fm
        .description_or_title()
        .map(str::to_string)
        .unwrap_or_else(|| title.clone());

    Ok(PostSummary {
        url: doc.url.clone(),
        date: PostDate {
            date: date.with_timezone(&date.offset().fix()),
            time: date.timestamp_millis(),
            string: helpers.date(Some(&date), None),
        },
        description,
        tags: fm.tags.clone(),
        categories: fm.categories.clone(),
        excerpt: doc.excerpt.clone(),
        draft: fm.draft,
        title,
    })
}

/// Site URL for a markdown file, given its path relative to the source directory
///
/// `posts/hello.md` becomes `/posts/hello` (or `/posts/hello.html` without
/// clean URLs); `notes/index.md` becomes `/notes/`.
pub fn document_url(relative: &Path, base: &str, clean_urls: bool) -> String {
    let mut parts: Vec<String> = relative
        .components()
        .filter_map(|c| match c {
            std::path::Component::Normal(s) => Some(s.to_string_lossy().to_string()),
            _ => None,
        })
        .collect();

    let file = parts.pop().unwrap_or_default();
    let stem = file
        .strip_suffix(".md")
        .or_else(|| file.strip_suffix(".markdown"))
        .unwrap_or(&file);

    let mut url = base.trim_end_matches('/').to_string();
    for part in &parts {
        url.push('/');
        url.push_str(part);
    }
    url.push('/');

    if stem != "index" && !stem.is_empty() {
        url.push_str(stem);
        if !clean_urls {
            url.push_str(".html");
        }
    }

    url
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::Tz;

    fn doc(url: &str, yaml: &str) -> RawDocument {
        let fm: FrontMatter = serde_yaml::from_str(yaml).unwrap();
        RawDocument::new(url, fm)
    }

    fn write_post(dir: &Path, name: &str, content: &str) {
        let posts = dir.join("docs/posts");
        fs::create_dir_all(&posts).unwrap();
        fs::write(posts.join(name), content).unwrap();
    }

    #[test]
    fn test_description_falls_back_to_title() {
        let docs = vec![doc("/posts/hello", "title: Hello\ndate: 2024-01-01")];
        let posts = transform(&docs, &SiteConfig::default()).unwrap();
        assert_eq!(posts[0].description, "Hello");
        assert_eq!(posts[0].date.string, "2024-01-01");
        assert_eq!(posts[0].date.time, 1_704_067_200_000);
    }

    #[test]
    fn test_padded_title_is_trimmed_everywhere() {
        let docs = vec![doc("/posts/hi", "title: \" Hi \"\ndate: 2024-01-01")];
        let posts = transform(&docs, &SiteConfig::default()).unwrap();
        assert_eq!(posts[0].title, "Hi");
        assert_eq!(posts[0].description, "Hi");
    }

    #[test]
    fn test_missing_lists_are_empty() {
        let docs = vec![doc("/posts/a", "title: A\ndate: 2024-01-01")];
        let posts = transform(&docs, &SiteConfig::default()).unwrap();
        assert!(posts[0].tags.is_empty());
        assert!(posts[0].categories.is_empty());
        assert_eq!(posts[0].excerpt, None);
    }

    #[test]
    fn test_drafts_are_excluded() {
        let docs = vec![
            doc("/posts/a", "title: A\ndate: 2024-01-01"),
            doc("/posts/b", "title: B\ndate: 2024-02-01\ndraft: true"),
            // drafts are not validated
            doc("/posts/c", "draft: true"),
        ];
        let posts = transform(&docs, &SiteConfig::default()).unwrap();
        assert_eq!(posts.len(), 1);
        assert!(posts.iter().all(|p| !p.draft));
    }

    #[test]
    fn test_sorted_newest_first_with_url_tiebreak() {
        let docs = vec![
            doc("/posts/old", "title: Old\ndate: 2023-05-01"),
            doc("/posts/z-same", "title: Z\ndate: 2024-01-01"),
            doc("/posts/new", "title: New\ndate: 2024-06-01 08:00"),
            doc("/posts/a-same", "title: A\ndate: 2024-01-01"),
        ];
        let posts = transform(&docs, &SiteConfig::default()).unwrap();
        let urls: Vec<_> = posts.iter().map(|p| p.url.as_str()).collect();
        assert_eq!(
            urls,
            vec!["/posts/new", "/posts/a-same", "/posts/z-same", "/posts/old"]
        );
        assert!(posts.windows(2).all(|w| w[0].date.time >= w[1].date.time));
    }

    #[test]
    fn test_transform_is_repeatable() {
        let docs = vec![
            doc("/posts/a", "title: A\ndate: 2024-01-01\ntags: [x]"),
            doc("/posts/b", "title: B\ndate: 2024-01-02"),
        ];
        let config = SiteConfig::default();
        let first = serde_json::to_string(&transform(&docs, &config).unwrap()).unwrap();
        let second = serde_json::to_string(&transform(&docs, &config).unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_strict_errors() {
        let config = SiteConfig::default();

        let err = transform(&[doc("/posts/x", "date: 2024-01-01")], &config).unwrap_err();
        assert!(matches!(err, ContentError::MissingTitle { .. }));
        assert_eq!(err.url(), "/posts/x");

        let err = transform(&[doc("/posts/x", "title: X")], &config).unwrap_err();
        assert!(matches!(err, ContentError::MissingDate { .. }));

        let err = transform(&[doc("/posts/x", "title: X\ndate: someday")], &config).unwrap_err();
        assert!(matches!(err, ContentError::InvalidDate { ref value, .. } if value == "someday"));
    }

    #[test]
    fn test_lenient_skips_bad_posts() {
        let mut config = SiteConfig::default();
        config.posts.strict = false;
        let docs = vec![
            doc("/posts/ok", "title: Ok\ndate: 2024-01-01"),
            doc("/posts/bad", "title: Bad\ndate: not a date"),
        ];
        let posts = transform(&docs, &config).unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].url, "/posts/ok");
    }

    #[test]
    fn test_dates_use_site_timezone() {
        let config = SiteConfig {
            timezone: Tz::Asia__Shanghai,
            ..SiteConfig::default()
        };
        let posts = transform(&[doc("/posts/a", "title: A\ndate: 2024-01-01")], &config).unwrap();
        assert_eq!(posts[0].date.time, 1_704_067_200_000 - 8 * 3600 * 1000);
        assert_eq!(posts[0].date.string, "2024-01-01");
        assert_eq!(posts[0].date.date.to_rfc3339(), "2024-01-01T00:00:00+08:00");
    }

    #[test]
    fn test_date_in_dst_gap_is_accepted() {
        let config = SiteConfig {
            timezone: Tz::America__Santiago,
            ..SiteConfig::default()
        };
        let posts = transform(&[doc("/posts/a", "title: A\ndate: 2024-09-08")], &config).unwrap();
        assert_eq!(posts[0].date.date.to_rfc3339(), "2024-09-08T01:00:00-03:00");
        assert_eq!(posts[0].date.string, "2024-09-08");
    }

    #[test]
    fn test_document_url() {
        assert_eq!(
            document_url(Path::new("posts/hello.md"), "/", true),
            "/posts/hello"
        );
        assert_eq!(
            document_url(Path::new("posts/hello.md"), "/", false),
            "/posts/hello.html"
        );
        assert_eq!(
            document_url(Path::new("notes/index.md"), "/blog/", true),
            "/blog/notes/"
        );
        assert_eq!(document_url(Path::new("index.md"), "/", true), "/");
    }

    #[test]
    fn test_load_posts_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        write_post(
            dir.path(),
            "first.md",
            "---\ntitle: First\ndate: 2024-01-01\ntags: rust\n---\nIntro text\n<!-- more -->\nRest\n",
        );
        write_post(
            dir.path(),
            "second.md",
            "---\ntitle: Second\ndate: 2024-02-01\ndescription: The second one\n---\nNo marker\n",
        );
        write_post(
            dir.path(),
            "wip.md",
            "---\ntitle: WIP\ndate: 2024-03-01\ndraft: true\n---\n",
        );
        write_post(dir.path(), "notes.txt", "not markdown");

        let site = Site::new(dir.path()).unwrap();
        let posts = ContentLoader::new(&site).load_posts().unwrap();

        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].url, "/posts/second");
        assert_eq!(posts[0].description, "The second one");
        assert_eq!(posts[0].excerpt, None);
        assert_eq!(posts[1].url, "/posts/first");
        assert_eq!(posts[1].tags, vec!["rust"]);
        assert_eq!(posts[1].excerpt.as_deref(), Some("Intro text"));
    }

    #[test]
    fn test_load_does_not_modify_sources() {
        let dir = tempfile::tempdir().unwrap();
        let content = "---\ntitle: Keep\ndate: 2024-01-01\n---\nBody\n";
        write_post(dir.path(), "keep.md", content);

        let site = Site::new(dir.path()).unwrap();
        let loader = ContentLoader::new(&site);
        let first = loader.load_posts().unwrap();
        let second = loader.load_posts().unwrap();

        assert_eq!(first, second);
        let on_disk = fs::read_to_string(dir.path().join("docs/posts/keep.md")).unwrap();
        assert_eq!(on_disk, content);
    }

    #[test]
    fn test_malformed_frontmatter_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        write_post(dir.path(), "bad.md", "---\ntitle: [oops\n---\n");
        write_post(dir.path(), "good.md", "---\ntitle: Good\ndate: 2024-01-01\n---\n");

        let site = Site::new(dir.path()).unwrap();
        assert!(ContentLoader::new(&site).load_posts().is_err());

        let mut lenient = site.clone();
        lenient.config.posts.strict = false;
        let posts = ContentLoader::new(&lenient).load_posts().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, "Good");
    }

    #[test]
    fn test_missing_source_dir() {
        let dir = tempfile::tempdir().unwrap();
        let site = Site::new(dir.path()).unwrap();
        assert!(ContentLoader::new(&site).load_posts().unwrap().is_empty());
    }
}
