//! Errors raised while turning documents into post summaries

use thiserror::Error;

/// A post that cannot be summarized
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("{url}: missing required front-matter field `title`")]
    MissingTitle { url: String },

    #[error("{url}: missing required front-matter field `date`")]
    MissingDate { url: String },

    #[error("{url}: cannot parse date {value:?}")]
    InvalidDate { url: String, value: String },

    #[error("{url}: malformed front-matter: {source}")]
    FrontMatter {
        url: String,
        #[source]
        source: serde_yaml::Error,
    },
}

impl ContentError {
    /// URL of the offending document
    pub fn url(&self) -> &str {
        match self {
            ContentError::MissingTitle { url }
            | ContentError::MissingDate { url }
            | ContentError::InvalidDate { url, .. }
            | ContentError::FrontMatter { url, .. } => url,
        }
    }
}
