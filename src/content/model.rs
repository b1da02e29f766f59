//! Article types as projected by the content queries.

use super::read_time::ReadTime;
use crate::constants::{DEFAULT_AUTHOR, PLACEHOLDER_COVER};
use crate::de::null_as_default;
use crate::format::parse_timestamp;
use crate::rich_text::{plain_text, Block};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Slug {
    #[serde(default, deserialize_with = "null_as_default")]
    pub current: String,
}

/// Author biography: plain text or a rich-text array, depending on the schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Bio {
    Text(String),
    Blocks(Vec<Block>),
}

impl Bio {
    pub fn text(&self) -> String {
        match self {
            Bio::Text(text) => text.clone(),
            Bio::Blocks(blocks) => plain_text(blocks),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Author {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Resolved image URL (detail projection only)
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub bio: Option<Bio>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AssetUrl {
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MainImage {
    #[serde(default)]
    pub asset: Option<AssetUrl>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Category {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
}

/// A published blog article.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub slug: Slug,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub author: Option<Author>,
    #[serde(default)]
    pub main_image: Option<MainImage>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub body: Vec<Block>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub read_time: Option<String>,
    #[serde(default)]
    pub categories: Option<Vec<Category>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub featured: bool,
}

impl Article {
    pub fn slug(&self) -> &str {
        &self.slug.current
    }

    /// Plain text of the whole body.
    pub fn body_text(&self) -> String {
        plain_text(&self.body)
    }

    /// Excerpt from the backend, or the text of the first two body blocks.
    pub fn excerpt(&self) -> Option<String> {
        if let Some(excerpt) = self.excerpt.as_ref().filter(|e| !e.trim().is_empty()) {
            return Some(excerpt.clone());
        }
        let end = self.body.len().min(2);
        let derived = plain_text(&self.body[..end]);
        if derived.trim().is_empty() {
            None
        } else {
            Some(derived)
        }
    }

    /// Read-time label from the backend, or computed from the body.
    pub fn read_time(&self) -> String {
        match self.read_time.as_deref().map(str::trim) {
            Some(label) if !label.is_empty() => label.to_string(),
            _ => ReadTime::for_text(&self.body_text()).to_string(),
        }
    }

    pub fn author_name(&self) -> &str {
        self.author
            .as_ref()
            .map(|author| author.name.as_str())
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(DEFAULT_AUTHOR)
    }

    pub fn cover_url(&self) -> Option<&str> {
        self.main_image
            .as_ref()
            .and_then(|image| image.asset.as_ref())
            .and_then(|asset| asset.url.as_deref())
    }

    /// Cover URL, or the placeholder image.
    pub fn cover_url_or_placeholder(&self) -> &str {
        self.cover_url().unwrap_or(PLACEHOLDER_COVER)
    }

    pub fn published(&self) -> Option<DateTime<Utc>> {
        self.published_at.as_deref().and_then(parse_timestamp)
    }

    pub fn category_titles(&self) -> Vec<&str> {
        self.categories
            .iter()
            .flatten()
            .map(|category| category.title.as_str())
            .filter(|title| !title.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_list_projection_with_nulls() {
        let article: Article = serde_json::from_value(json!({
            "_id": "post-1",
            "title": "Romance scams",
            "slug": { "current": "romance-scams" },
            "excerpt": null,
            "author": null,
            "featured": null,
            "readTime": "3 min read",
            "body": null,
            "publishedAt": "2025-04-10T12:00:00Z",
            "mainImage": null
        }))
        .unwrap();

        assert_eq!(article.slug(), "romance-scams");
        assert!(!article.featured);
        assert!(article.body.is_empty());
        assert_eq!(article.excerpt(), None);
        assert_eq!(article.author_name(), DEFAULT_AUTHOR);
        assert_eq!(article.cover_url_or_placeholder(), PLACEHOLDER_COVER);
        assert_eq!(article.read_time(), "3 min read");
    }

    #[test]
    fn decodes_detail_projection() {
        let article: Article = serde_json::from_value(json!({
            "_id": "post-2",
            "title": "Fake loan apps",
            "slug": { "current": "fake-loan-apps" },
            "author": {
                "name": "Ngozi",
                "image": "https://cdn.example.com/ngozi.jpg",
                "bio": [{ "_type": "block", "children": [{ "text": "Fraud analyst." }] }]
            },
            "categories": [{ "title": "Loans" }, { "title": "Apps" }],
            "mainImage": { "asset": { "url": "https://cdn.example.com/cover.jpg" } },
            "publishedAt": "2025-04-11T08:00:00Z"
        }))
        .unwrap();

        let author = article.author.as_ref().unwrap();
        assert_eq!(author.bio.as_ref().unwrap().text(), "Fraud analyst.");
        assert_eq!(article.author_name(), "Ngozi");
        assert_eq!(article.category_titles(), vec!["Loans", "Apps"]);
        assert_eq!(article.cover_url(), Some("https://cdn.example.com/cover.jpg"));
        assert_eq!(
            article.published().unwrap().to_rfc3339(),
            "2025-04-11T08:00:00+00:00"
        );
    }

    #[test]
    fn derives_excerpt_and_read_time_locally() {
        let article: Article = serde_json::from_value(json!({
            "_id": "post-3",
            "body": [
                { "_type": "block", "children": [{ "text": "First." }] },
                { "_type": "block", "children": [{ "text": "Second." }] },
                { "_type": "block", "children": [{ "text": "x".repeat(2500) }] }
            ]
        }))
        .unwrap();

        assert_eq!(article.excerpt().as_deref(), Some("First.\n\nSecond."));
        assert_eq!(article.read_time(), "5 min read");
    }
}
