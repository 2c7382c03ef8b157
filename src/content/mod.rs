//! Content module - handles post documents, summaries and sidebars

mod error;
mod frontmatter;
pub mod loader;
mod post;
pub mod sidebar;

pub use error::ContentError;
pub use frontmatter::{parse_date_string, split_excerpt, FrontMatter};
pub use post::{PostDate, PostSummary, RawDocument};
