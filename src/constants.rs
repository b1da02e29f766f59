//! Application-wide constants
//!
//! User-facing messages and display fallbacks shared by the stores and views.

/// Recorded when the reports collection cannot be fetched
pub const FETCH_REPORTS_FAILED: &str = "Failed to fetch scam reports";

/// Recorded when the bank reference list cannot be fetched
pub const FETCH_BANKS_FAILED: &str = "Failed to fetch banks";

/// Recorded when a report submission is rejected or fails in transit
pub const CREATE_REPORT_FAILED: &str = "Failed to create scam report";

/// Shown when an article fetch fails in a way we cannot describe
pub const CONTENT_FALLBACK_ERROR: &str = "We're experience some issues, try reloading the page.";

/// Author shown for articles without one
pub const DEFAULT_AUTHOR: &str = "BlacklistDB Team";

/// Excerpt shown for a featured article without one
pub const FEATURED_EXCERPT_FALLBACK: &str = "Read this featured article from BlacklistDB.";

/// Cover image used when an article has none
pub const PLACEHOLDER_COVER: &str = "/placeholder-1200x600.jpg";

/// Card excerpts longer than this many characters are cut and suffixed with "..."
pub const CARD_EXCERPT_LENGTH: usize = 150;

/// Content type of blog articles in the content backend
pub const POST_TYPE: &str = "post";
