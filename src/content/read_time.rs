/// Coarse reading-duration label for an article.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadTime {
    Short,
    Medium,
    Long,
    VeryLong,
}

/// Upper bounds (exclusive, in characters of body text) of each bucket, in order.
/// Anything at or past the last bound is [`ReadTime::VeryLong`].
pub const READ_TIME_BUCKETS: [(usize, ReadTime); 3] = [
    (2000, ReadTime::Short),
    (4000, ReadTime::Medium),
    (8000, ReadTime::Long),
];

impl ReadTime {
    /// Bucket for a body text of `chars` characters.
    pub fn from_length(chars: usize) -> Self {
        READ_TIME_BUCKETS
            .iter()
            .find(|(bound, _)| chars < *bound)
            .map(|(_, bucket)| *bucket)
            .unwrap_or(ReadTime::VeryLong)
    }

    /// Bucket for a plain-text body.
    pub fn for_text(text: &str) -> Self {
        Self::from_length(text.chars().count())
    }

    pub fn label(self) -> &'static str {
        match self {
            ReadTime::Short => "3 min read",
            ReadTime::Medium => "5 min read",
            ReadTime::Long => "8 min read",
            ReadTime::VeryLong => "10+ min read",
        }
    }

    /// Recognize a label produced by the backend.
    pub fn from_label(label: &str) -> Option<Self> {
        [
            ReadTime::Short,
            ReadTime::Medium,
            ReadTime::Long,
            ReadTime::VeryLong,
        ]
        .into_iter()
        .find(|bucket| bucket.label() == label.trim())
    }
}

impl std::fmt::Display for ReadTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries() {
        assert_eq!(ReadTime::from_length(0), ReadTime::Short);
        assert_eq!(ReadTime::from_length(1999), ReadTime::Short);
        assert_eq!(ReadTime::from_length(2000), ReadTime::Medium);
        assert_eq!(ReadTime::from_length(3999), ReadTime::Medium);
        assert_eq!(ReadTime::from_length(4000), ReadTime::Long);
        assert_eq!(ReadTime::from_length(7999), ReadTime::Long);
        assert_eq!(ReadTime::from_length(8000), ReadTime::VeryLong);
        assert_eq!(ReadTime::from_length(250_000), ReadTime::VeryLong);
    }

    #[test]
    fn test_labels() {
        assert_eq!(ReadTime::Short.to_string(), "3 min read");
        assert_eq!(ReadTime::VeryLong.to_string(), "10+ min read");
        for bucket in [ReadTime::Short, ReadTime::Medium, ReadTime::Long, ReadTime::VeryLong] {
            assert_eq!(bucket.to_string(), bucket.label());
            assert_eq!(ReadTime::from_label(bucket.label()), Some(bucket));
        }
        assert_eq!(ReadTime::from_label("12 min read"), None);
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        let naira = "₦".repeat(1999);
        assert!(naira.len() > 2000);
        assert_eq!(ReadTime::for_text(&naira), ReadTime::Short);
    }
}
