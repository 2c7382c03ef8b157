//! Built-in locales for date formatting and relative time
//!
//! A [`Locale`] is passed explicitly to every helper that needs one; there is
//! no process-wide "current language".

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported locales
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "zh-cn", alias = "zh-CN", alias = "zh")]
    ZhCn,
    #[serde(rename = "en", alias = "en-US", alias = "en-us")]
    En,
}

/// Relative time wording, one entry per day.js threshold
pub(crate) struct RelativeTime {
    pub future: &'static str,
    pub past: &'static str,
    pub s: &'static str,
    pub m: &'static str,
    pub mm: &'static str,
    pub h: &'static str,
    pub hh: &'static str,
    pub d: &'static str,
    pub dd: &'static str,
    pub month: &'static str,
    pub months: &'static str,
    pub y: &'static str,
    pub yy: &'static str,
}

const ZH_CN_RELATIVE: RelativeTime = RelativeTime {
    future: "%s后",
    past: "%s前",
    s: "几秒",
    m: "1 分钟",
    mm: "%d 分钟",
    h: "1 小时",
    hh: "%d 小时",
    d: "1 天",
    dd: "%d 天",
    month: "1 个月",
    months: "%d 个月",
    y: "1 年",
    yy: "%d 年",
};

const EN_RELATIVE: RelativeTime = RelativeTime {
    future: "in %s",
    past: "%s ago",
    s: "a few seconds",
    m: "a minute",
    mm: "%d minutes",
    h: "an hour",
    hh: "%d hours",
    d: "a day",
    dd: "%d days",
    month: "a month",
    months: "%d months",
    y: "a year",
    yy: "%d years",
};

const ZH_CN_MONTHS: [&str; 12] = [
    "一月", "二月", "三月", "四月", "五月", "六月", "七月", "八月", "九月", "十月", "十一月",
    "十二月",
];
const ZH_CN_MONTHS_SHORT: [&str; 12] = [
    "1月", "2月", "3月", "4月", "5月", "6月", "7月", "8月", "9月", "10月", "11月", "12月",
];
const ZH_CN_WEEKDAYS: [&str; 7] = [
    "星期日", "星期一", "星期二", "星期三", "星期四", "星期五", "星期六",
];
const ZH_CN_WEEKDAYS_SHORT: [&str; 7] = ["周日", "周一", "周二", "周三", "周四", "周五", "周六"];
const ZH_CN_WEEKDAYS_MIN: [&str; 7] = ["日", "一", "二", "三", "四", "五", "六"];

const EN_MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];
const EN_MONTHS_SHORT: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
const EN_WEEKDAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];
const EN_WEEKDAYS_SHORT: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const EN_WEEKDAYS_MIN: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

impl Locale {
    /// Locale code as written in config files
    pub fn code(&self) -> &'static str {
        match self {
            Locale::ZhCn => "zh-cn",
            Locale::En => "en",
        }
    }

    /// Full month name, `month0` in 0..12
    pub fn month(&self, month0: usize) -> &'static str {
        match self {
            Locale::ZhCn => ZH_CN_MONTHS[month0 % 12],
            Locale::En => EN_MONTHS[month0 % 12],
        }
    }

    pub fn month_short(&self, month0: usize) -> &'static str {
        match self {
            Locale::ZhCn => ZH_CN_MONTHS_SHORT[month0 % 12],
            Locale::En => EN_MONTHS_SHORT[month0 % 12],
        }
    }

    /// Full weekday name, Sunday is 0
    pub fn weekday(&self, day: usize) -> &'static str {
        match self {
            Locale::ZhCn => ZH_CN_WEEKDAYS[day % 7],
            Locale::En => EN_WEEKDAYS[day % 7],
        }
    }

    pub fn weekday_short(&self, day: usize) -> &'static str {
        match self {
            Locale::ZhCn => ZH_CN_WEEKDAYS_SHORT[day % 7],
            Locale::En => EN_WEEKDAYS_SHORT[day % 7],
        }
    }

    pub fn weekday_min(&self, day: usize) -> &'static str {
        match self {
            Locale::ZhCn => ZH_CN_WEEKDAYS_MIN[day % 7],
            Locale::En => EN_WEEKDAYS_MIN[day % 7],
        }
    }

    /// Meridiem text for the `A` / `a` tokens
    pub fn meridiem(&self, hour: u32, minute: u32, lowercase: bool) -> &'static str {
        match self {
            Locale::ZhCn => {
                let hm = hour * 100 + minute;
                if hm < 600 {
                    "凌晨"
                } else if hm < 900 {
                    "早上"
                } else if hm < 1100 {
                    "上午"
                } else if hm < 1300 {
                    "中午"
                } else if hm < 1800 {
                    "下午"
                } else {
                    "晚上"
                }
            }
            Locale::En => match (hour < 12, lowercase) {
                (true, false) => "AM",
                (true, true) => "am",
                (false, false) => "PM",
                (false, true) => "pm",
            },
        }
    }

    pub(crate) fn relative_time(&self) -> &'static RelativeTime {
        match self {
            Locale::ZhCn => &ZH_CN_RELATIVE,
            Locale::En => &EN_RELATIVE,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "zh-cn" | "zh" | "zh_cn" => Ok(Locale::ZhCn),
            "en" | "en-us" | "en_us" => Ok(Locale::En),
            other => anyhow::bail!("Unknown locale: {}. Available: zh-cn, en", other),
        }
    }
}
