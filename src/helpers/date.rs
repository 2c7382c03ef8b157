//! Date helper functions

use chrono::{DateTime, Datelike, Offset, TimeZone, Timelike, Utc};

use crate::i18n::Locale;

/// Default pattern used for post dates
pub const DEFAULT_DATE_FORMAT: &str = "YYYY-MM-DD";

/// Format tokens, longest first so `MMMM` wins over `MM`
const TOKENS: [&str; 25] = [
    "YYYY", "YY", "MMMM", "MMM", "MM", "M", "DD", "D", "dddd", "ddd", "dd", "d", "HH", "H", "hh",
    "h", "mm", "m", "ss", "s", "SSS", "ZZ", "Z", "A", "a",
];

/// Format a date using a Day.js-compatible format string
///
/// Returns an empty string when there is no date. Text inside `[...]` is
/// copied verbatim.
///
/// # Examples
/// ```ignore
/// format_date(Some(&date), "YYYY-MM-DD", Locale::ZhCn) // -> "2024-01-15"
/// format_date(None::<&DateTime<Utc>>, "YYYY-MM-DD", Locale::ZhCn) // -> ""
/// ```
pub fn format_date<Tz: TimeZone>(
    date: Option<&DateTime<Tz>>,
    pattern: &str,
    locale: Locale,
) -> String {
    let Some(date) = date else {
        return String::new();
    };

    let mut out = String::with_capacity(pattern.len() + 8);
    let mut rest = pattern;

    while !rest.is_empty() {
        if let Some(escaped) = rest.strip_prefix('[') {
            if let Some(end) = escaped.find(']') {
                out.push_str(&escaped[..end]);
                rest = &escaped[end + 1..];
                continue;
            }
        }

        if let Some(token) = TOKENS.iter().find(|t| rest.starts_with(*t)) {
            render_token(&mut out, token, date, locale);
            rest = &rest[token.len()..];
            continue;
        }

        let mut chars = rest.chars();
        if let Some(c) = chars.next() {
            out.push(c);
        }
        rest = chars.as_str();
    }

    out
}

fn render_token<Tz: TimeZone>(out: &mut String, token: &str, date: &DateTime<Tz>, locale: Locale) {
    let month0 = date.month0() as usize;
    let weekday = date.weekday().num_days_from_sunday() as usize;
    let hour12 = match date.hour() % 12 {
        0 => 12,
        h => h,
    };

    let rendered = match token {
        "YYYY" => format!("{:04}", date.year()),
        "YY" => format!("{:02}", date.year().rem_euclid(100)),
        "MMMM" => locale.month(month0).to_string(),
        "MMM" => locale.month_short(month0).to_string(),
        "MM" => format!("{:02}", date.month()),
        "M" => date.month().to_string(),
        "DD" => format!("{:02}", date.day()),
        "D" => date.day().to_string(),
        "dddd" => locale.weekday(weekday).to_string(),
        "ddd" => locale.weekday_short(weekday).to_string(),
        "dd" => locale.weekday_min(weekday).to_string(),
        "d" => weekday.to_string(),
        "HH" => format!("{:02}", date.hour()),
        "H" => date.hour().to_string(),
        "hh" => format!("{:02}", hour12),
        "h" => hour12.to_string(),
        "mm" => format!("{:02}", date.minute()),
        "m" => date.minute().to_string(),
        "ss" => format!("{:02}", date.second()),
        "s" => date.second().to_string(),
        "SSS" => format!("{:03}", date.timestamp_subsec_millis().min(999)),
        "ZZ" => offset_string(date, ""),
        "Z" => offset_string(date, ":"),
        "A" => locale.meridiem(date.hour(), date.minute(), false).to_string(),
        "a" => locale.meridiem(date.hour(), date.minute(), true).to_string(),
        _ => token.to_string(),
    };

    out.push_str(&rendered);
}

fn offset_string<Tz: TimeZone>(date: &DateTime<Tz>, separator: &str) -> String {
    let seconds = date.offset().fix().local_minus_utc();
    let sign = if seconds < 0 { '-' } else { '+' };
    let minutes = seconds.abs() / 60;
    format!("{}{:02}{}{:02}", sign, minutes / 60, separator, minutes % 60)
}

/// Get relative time from now (like "3 天前" or "3 days ago")
pub fn from_now<Tz: TimeZone>(date: &DateTime<Tz>, locale: Locale) -> String {
    relative_to(date, &Utc::now(), locale)
}

/// Relative time of `date` as seen from `now`
///
/// Thresholds follow Day.js `relativeTime`: under 45 seconds is "a few
/// seconds", under 90 seconds "a minute", and so on up to years.
pub fn relative_to<Tz: TimeZone, Now: TimeZone>(
    date: &DateTime<Tz>,
    now: &DateTime<Now>,
    locale: Locale,
) -> String {
    let words = locale.relative_time();

    let seconds = (date.timestamp_millis() - now.timestamp_millis()) as f64 / 1000.0;
    let minutes = seconds / 60.0;
    let hours = minutes / 60.0;
    let days = hours / 24.0;
    let months = days / 30.436875;
    let years = months / 12.0;

    // (format, upper bound, diff in this unit); a missing diff reuses the previous one
    let table: [(&str, Option<f64>, Option<f64>); 11] = [
        (words.s, Some(44.0), Some(seconds)),
        (words.m, Some(89.0), None),
        (words.mm, Some(44.0), Some(minutes)),
        (words.h, Some(89.0), None),
        (words.hh, Some(21.0), Some(hours)),
        (words.d, Some(35.0), None),
        (words.dd, Some(25.0), Some(days)),
        (words.month, Some(45.0), None),
        (words.months, Some(10.0), Some(months)),
        (words.y, Some(17.0), None),
        (words.yy, None, Some(years)),
    ];

    let mut result = 0.0_f64;
    let mut phrase = String::new();
    for (i, (format, bound, diff)) in table.iter().enumerate() {
        if let Some(diff) = diff {
            result = *diff;
        }
        let abs = result.abs().round();
        let within = bound.map(|b| abs <= b).unwrap_or(true);
        if within {
            // "1 minutes" reads as "a minute"
            let format = if abs <= 1.0 && i > 0 {
                table[i - 1].0
            } else {
                *format
            };
            phrase = format.replace("%d", &format!("{}", abs as i64));
            break;
        }
    }

    let wrapper = if result > 0.0 { words.future } else { words.past };
    wrapper.replace("%s", &phrase)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, FixedOffset, TimeZone};

    #[test]
    fn test_format_date() {
        let date = Utc.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).unwrap();
        assert_eq!(format_date(Some(&date), DEFAULT_DATE_FORMAT, Locale::ZhCn), "2024-03-05");
        assert_eq!(format_date(Some(&date), "YYYY/M/D", Locale::ZhCn), "2024/3/5");
    }

    #[test]
    fn test_format_missing_date() {
        assert_eq!(format_date(None::<&DateTime<Utc>>, DEFAULT_DATE_FORMAT, Locale::ZhCn), "");
    }

    #[test]
    fn test_format_names() {
        let date = Utc.with_ymd_and_hms(2024, 1, 15, 14, 5, 9).unwrap();
        assert_eq!(
            format_date(Some(&date), "dddd, MMMM D YYYY h:mm A", Locale::En),
            "Monday, January 15 2024 2:05 PM"
        );
        assert_eq!(format_date(Some(&date), "MMM ddd", Locale::ZhCn), "1月 周一");
        assert_eq!(format_date(Some(&date), "A", Locale::ZhCn), "下午");
    }

    #[test]
    fn test_format_escape_and_offset() {
        let tz = FixedOffset::east_opt(8 * 3600).unwrap();
        let date = tz.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        assert_eq!(
            format_date(Some(&date), "[YYYY] YYYY Z ZZ", Locale::En),
            "YYYY 2024 +08:00 +0800"
        );
        assert_eq!(
            format_date(Some(&date), "YY-MM-DD HH:mm:ss.SSS", Locale::En),
            "24-01-15 10:30:00.000"
        );
    }

    #[test]
    fn test_relative_past() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();
        let cases = [
            (Duration::seconds(10), "几秒前"),
            (Duration::seconds(60), "1 分钟前"),
            (Duration::minutes(30), "30 分钟前"),
            (Duration::minutes(60), "1 小时前"),
            (Duration::hours(5), "5 小时前"),
            (Duration::hours(30), "1 天前"),
            (Duration::days(3), "3 天前"),
            (Duration::days(40), "1 个月前"),
            (Duration::days(120), "4 个月前"),
            (Duration::days(400), "1 年前"),
            (Duration::days(365 * 3), "3 年前"),
        ];
        for (ago, expected) in cases {
            assert_eq!(relative_to(&(now - ago), &now, Locale::ZhCn), expected, "{:?}", ago);
        }
    }

    #[test]
    fn test_relative_english() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();
        assert_eq!(relative_to(&(now - Duration::days(3)), &now, Locale::En), "3 days ago");
        assert_eq!(relative_to(&(now + Duration::hours(1)), &now, Locale::En), "in an hour");
        assert_eq!(relative_to(&now, &now, Locale::En), "a few seconds ago");
    }

    #[test]
    fn test_from_now_uses_clock() {
        let date = Utc::now() - Duration::days(2);
        assert_eq!(from_now(&date, Locale::En), "2 days ago");
    }
}
