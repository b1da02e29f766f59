//! Formatting helpers for dates, excerpts and share links.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use url::form_urlencoded::byte_serialize;

/// Parse a backend timestamp: RFC 3339, a naive date-time, or a bare date.
pub fn parse_timestamp(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(Utc.from_utc_datetime(&naive));
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Render a timestamp as e.g. "Apr 12, 2025".
///
/// Empty input gives "Unknown"; unparseable input is returned as is.
pub fn format_date(input: &str) -> String {
    if input.trim().is_empty() {
        return "Unknown".to_string();
    }
    match parse_timestamp(input) {
        Some(dt) => dt.format("%b %-d, %Y").to_string(),
        None => {
            log::debug!("Could not parse date {:?}", input);
            input.to_string()
        }
    }
}

/// Cut `text` to at most `max_chars` characters, appending "..." when cut.
pub fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

fn encode(value: &str) -> String {
    byte_serialize(value.as_bytes()).collect()
}

/// Social share URLs for a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareLinks {
    pub facebook: String,
    pub x: String,
    pub linkedin: String,
}

impl ShareLinks {
    pub fn new(page_url: &str, title: &str) -> Self {
        let url = encode(page_url);
        Self {
            facebook: format!("https://www.facebook.com/sharer/sharer.php?u={}", url),
            x: format!("https://x.com/intent/tweet?url={}&text={}", url, encode(title)),
            linkedin: format!("https://www.linkedin.com/sharing/share-offsite/?url={}", url),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_dates() {
        assert_eq!(format_date("2025-04-12T09:30:00Z"), "Apr 12, 2025");
        assert_eq!(format_date("2025-04-02T23:00:00.000+00:00"), "Apr 2, 2025");
        assert_eq!(format_date("2024-12-31"), "Dec 31, 2024");
        assert_eq!(format_date("2024-01-05T08:00:00.123456"), "Jan 5, 2024");
        assert_eq!(format_date(""), "Unknown");
        assert_eq!(format_date("last tuesday"), "last tuesday");
    }

    #[test]
    fn truncates_on_char_boundaries() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exactly", 7), "exactly");
        assert_eq!(truncate("abcdef", 3), "abc...");
        assert_eq!(truncate("₦₦₦₦", 2), "₦₦...");
    }

    #[test]
    fn share_links_are_encoded() {
        let links = ShareLinks::new("https://blacklistdb.example/blog/a b", "Scam & you");
        assert_eq!(
            links.facebook,
            "https://www.facebook.com/sharer/sharer.php?u=https%3A%2F%2Fblacklistdb.example%2Fblog%2Fa+b"
        );
        assert_eq!(
            links.x,
            "https://x.com/intent/tweet?url=https%3A%2F%2Fblacklistdb.example%2Fblog%2Fa+b&text=Scam+%26+you"
        );
        assert!(links.linkedin.starts_with("https://www.linkedin.com/sharing/share-offsite/?url=https%3A"));
    }
}
