use once_cell::sync::Lazy;
use regex::Regex;

/// Matches status URLs on twitter.com and x.com, capturing the tweet id.
static TWEET_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:twitter|x)\.com/\w+/status/(\d+)").unwrap());

/// Whether a URL points at a single tweet.
pub fn is_tweet_url(url: &str) -> bool {
    (url.contains("twitter.com/") || url.contains("x.com/")) && url.contains("status/")
}

/// Numeric id of the tweet a status URL points at.
pub fn extract_tweet_id(url: &str) -> Option<&str> {
    TWEET_REGEX
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
