//! Front-matter parsing

use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, Offset, TimeZone};
use chrono_tz::Tz;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

/// Custom deserializer that handles both a single string and a list of strings
fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value])
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<String>()? {
                vec.push(item);
            }
            Ok(vec)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// Scalars such as `date: 2024` or `title: 404` read as text
fn scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_yaml::Value>::deserialize(deserializer)?;
    match value {
        None | Some(serde_yaml::Value::Null) => Ok(None),
        Some(serde_yaml::Value::String(s)) => Ok(Some(s)),
        Some(serde_yaml::Value::Number(n)) => Ok(Some(n.to_string())),
        Some(serde_yaml::Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected a string, found {:?}",
            other
        ))),
    }
}

/// Front-matter data from a post
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    #[serde(deserialize_with = "scalar_string")]
    pub title: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub date: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub description: Option<String>,
    #[serde(deserialize_with = "string_or_vec")]
    pub tags: Vec<String>,
    #[serde(deserialize_with = "string_or_vec")]
    pub categories: Vec<String>,
    /// Drafts are left out of the published list
    pub draft: bool,

    /// Additional custom fields
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_yaml::Value>,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    ///
    /// A document without a leading `---` block has default front-matter.
    pub fn parse(content: &str) -> Result<(Self, &str), serde_yaml::Error> {
        let content = content.trim_start_matches('\u{feff}');

        let Some(rest) = content.strip_prefix("---") else {
            return Ok((FrontMatter::default(), content));
        };
        // The opening fence must be alone on its line
        let Some(rest) = rest
            .strip_prefix("\r\n")
            .or_else(|| rest.strip_prefix('\n'))
        else {
            return Ok((FrontMatter::default(), content));
        };

        let (yaml_content, remaining) = if let Some(body) = rest.strip_prefix("---") {
            ("", body)
        } else if let Some(end_pos) = rest.find("\n---") {
            (&rest[..end_pos], &rest[end_pos + 4..])
        } else {
            // No closing ---, treat as no front-matter
            return Ok((FrontMatter::default(), content));
        };
        let remaining = remaining.trim_start_matches(['\n', '\r']);

        if yaml_content.trim().is_empty() {
            return Ok((FrontMatter::default(), remaining));
        }

        let fm = serde_yaml::from_str::<FrontMatter>(yaml_content)?;
        Ok((fm, remaining))
    }

    /// Parse the date string in the given timezone
    pub fn parse_date(&self, tz: Tz) -> Option<DateTime<Tz>> {
        self.date.as_ref().and_then(|s| parse_date_string(s, tz))
    }

    /// Description, falling back to the title when missing or blank
    pub fn description_or_title(&self) -> Option<&str> {
        self.description
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .or(self.title.as_deref().map(str::trim))
    }
}

/// Parse a date string in various formats
///
/// Values carrying an offset keep their instant; the rest are read as local
/// time in `tz`.
pub fn parse_date_string(s: &str, tz: Tz) -> Option<DateTime<Tz>> {
    let s = s.trim();

    // Try RFC 3339 / ISO 8601
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&tz));
    }

    let offset_formats = ["%Y-%m-%d %H:%M:%S%z", "%Y-%m-%d %H:%M:%S %z"];
    for fmt in offset_formats {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt.with_timezone(&tz));
        }
    }

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M",
        "%Y/%m/%d %H:%M:%S",
        "%Y/%m/%d %H:%M",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return from_local(tz, &dt);
        }
    }

    let date_formats = ["%Y-%m-%d", "%Y/%m/%d"];
    for fmt in date_formats {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            let dt = d.and_hms_opt(0, 0, 0)?;
            return from_local(tz, &dt);
        }
    }

    None
}

/// Resolve a wall-clock time in `tz`
///
/// A time skipped by a DST transition is read with the offset in effect
/// before the gap, which moves it forward by the gap length.
fn from_local(tz: Tz, dt: &NaiveDateTime) -> Option<DateTime<Tz>> {
    match tz.from_local_datetime(dt) {
        LocalResult::Single(d) => Some(d),
        LocalResult::Ambiguous(earliest, _) => Some(earliest),
        LocalResult::None => {
            let before = tz
                .from_local_datetime(&(*dt - Duration::days(1)))
                .earliest()?
                .offset()
                .fix();
            let utc = *dt - Duration::seconds(i64::from(before.local_minus_utc()));
            Some(tz.from_utc_datetime(&utc))
        }
    }
}

/// Text before the first `marker`, trimmed; `None` when the marker is absent
pub fn split_excerpt(body: &str, marker: &str) -> Option<String> {
    if marker.is_empty() {
        return None;
    }
    body.find(marker).map(|pos| body[..pos].trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
title: Hello World
date: 2024-01-15 10:30:00
tags:
  - rust
  - notes
categories:
  - programming
---

This is the content.
"#;

        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, Some("Hello World".to_string()));
        assert_eq!(fm.date, Some("2024-01-15 10:30:00".to_string()));
        assert_eq!(fm.tags, vec!["rust", "notes"]);
        assert_eq!(fm.categories, vec!["programming"]);
        assert!(!fm.draft);
        assert!(remaining.starts_with("This is the content."));
    }

    #[test]
    fn test_parse_single_string_tags() {
        let content = r#"---
title: Single Tag Post
date: 2024-01-15
tags: Notes
categories: Blog
draft: true
---

Content here.
"#;

        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.tags, vec!["Notes"]);
        assert_eq!(fm.categories, vec!["Blog"]);
        assert!(fm.draft);
    }

    #[test]
    fn test_scalar_fields_and_extra() {
        let content = "---\ntitle: 404\ndate: 2024\nlayout: home\n---\nbody";
        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("404"));
        assert_eq!(fm.date.as_deref(), Some("2024"));
        assert_eq!(fm.extra["layout"], serde_yaml::Value::from("home"));
        assert_eq!(body, "body");
    }

    #[test]
    fn test_no_frontmatter() {
        let (fm, body) = FrontMatter::parse("# Just markdown\n").unwrap();
        assert_eq!(fm, FrontMatter::default());
        assert_eq!(body, "# Just markdown\n");

        let (fm, body) = FrontMatter::parse("---\nnever closed\n").unwrap();
        assert_eq!(fm.title, None);
        assert!(body.contains("never closed"));
    }

    #[test]
    fn test_empty_and_crlf_frontmatter() {
        let (fm, body) = FrontMatter::parse("---\n---\nText").unwrap();
        assert_eq!(fm, FrontMatter::default());
        assert_eq!(body, "Text");

        let (fm, body) = FrontMatter::parse("---\r\ntitle: Win\r\n---\r\nText").unwrap();
        assert_eq!(fm.title.as_deref(), Some("Win"));
        assert_eq!(body, "Text");
    }

    #[test]
    fn test_malformed_frontmatter() {
        assert!(FrontMatter::parse("---\ntitle: [unclosed\n---\n").is_err());
        assert!(FrontMatter::parse("---\ntitle:\n  nested: map\n---\n").is_err());
    }

    #[test]
    fn test_description_fallback() {
        let mut fm = FrontMatter {
            title: Some("Hello".to_string()),
            ..Default::default()
        };
        assert_eq!(fm.description_or_title(), Some("Hello"));

        fm.description = Some("  ".to_string());
        assert_eq!(fm.description_or_title(), Some("Hello"));

        fm.description = Some("About hello".to_string());
        assert_eq!(fm.description_or_title(), Some("About hello"));
    }

    #[test]
    fn test_parse_date() {
        let fm = FrontMatter {
            date: Some("2024-01-15 10:30:00".to_string()),
            ..Default::default()
        };

        let dt = fm.parse_date(Tz::UTC).unwrap();
        assert_eq!(dt.format("%Y-%m-%d %H:%M").to_string(), "2024-01-15 10:30");
    }

    #[test]
    fn test_parse_date_in_dst_gap() {
        // Santiago skips from 00:00 to 01:00 on 2024-09-08
        let santiago = chrono_tz::America::Santiago;

        let dt = parse_date_string("2024-09-08", santiago).unwrap();
        assert_eq!(dt.format("%Y-%m-%d %H:%M").to_string(), "2024-09-08 01:00");
        assert_eq!(dt.to_rfc3339(), "2024-09-08T01:00:00-03:00");

        let dt = parse_date_string("2024-09-08 00:30", santiago).unwrap();
        assert_eq!(dt.format("%H:%M").to_string(), "01:30");
    }

    #[test]
    fn test_parse_date_formats() {
        let shanghai = chrono_tz::Asia::Shanghai;
        let expect = |s: &str| {
            parse_date_string(s, shanghai)
                .map(|d| d.to_rfc3339())
                .unwrap_or_default()
        };
        assert_eq!(expect("2024-01-01"), "2024-01-01T00:00:00+08:00");
        assert_eq!(expect("2024/01/01"), "2024-01-01T00:00:00+08:00");
        assert_eq!(expect("2024-01-01T10:00:00.250"), "2024-01-01T10:00:00.250+08:00");
        assert_eq!(expect("2024-01-01T00:00:00Z"), "2024-01-01T08:00:00+08:00");
        assert_eq!(expect("2024-01-01 10:00"), "2024-01-01T10:00:00+08:00");
        assert!(parse_date_string("yesterday", shanghai).is_none());
        assert!(parse_date_string("2024-13-40", shanghai).is_none());
    }

    #[test]
    fn test_split_excerpt() {
        let body = "This is excerpt.\n<!-- more -->\nThis is more content.";
        assert_eq!(
            split_excerpt(body, "<!-- more -->"),
            Some("This is excerpt.".to_string())
        );
        assert_eq!(split_excerpt("No marker here", "<!-- more -->"), None);
        assert_eq!(split_excerpt(body, ""), None);
    }
}
