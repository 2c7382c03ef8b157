//! Helper functions for dates and values
//!
//! These are the small formatting utilities shared by the content loader
//! and the `list` command.

mod date;
mod number;

pub use date::*;
pub use number::*;

use chrono::{DateTime, TimeZone};
use chrono_tz::Tz;

use crate::config::SiteConfig;
use crate::i18n::Locale;

/// Date helpers bound to a site's locale, timezone and date format
#[derive(Debug, Clone)]
pub struct Helpers {
    locale: Locale,
    timezone: Tz,
    date_format: String,
}

impl Helpers {
    /// Create a new helpers instance
    pub fn new(config: &SiteConfig) -> Self {
        Self {
            locale: config.lang,
            timezone: config.timezone,
            date_format: config.posts.date_format.clone(),
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Format a date in the site timezone, with the site date format unless one is given
    pub fn date<Z: TimeZone>(&self, date: Option<&DateTime<Z>>, format: Option<&str>) -> String {
        let local = date.map(|d| d.with_timezone(&self.timezone));
        format_date(
            local.as_ref(),
            format.unwrap_or(&self.date_format),
            self.locale,
        )
    }

    /// Relative time from now in the site locale
    pub fn from_now<Z: TimeZone>(&self, date: &DateTime<Z>) -> String {
        from_now(date, self.locale)
    }
}
