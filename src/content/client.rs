use super::model::Article;
use super::query::{excerpt_expr, read_time_expr, Direction, Projection, Query};
use crate::app_config::AppConfig;
use crate::constants::POST_TYPE;
use crate::error::ApiError;
use crate::http::{HttpTransport, Transport};
use crate::rich_text::ImageCdn;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Envelope around every query result.
#[derive(Deserialize)]
struct QueryResponse<T> {
    result: T,
}

/// Named query parameters, referenced as `$name` inside a query.
pub type Params = BTreeMap<String, Value>;

/// Fields fetched for article lists.
pub fn list_projection() -> Projection {
    Projection::new()
        .field("_id")
        .field("title")
        .field("slug")
        .computed("excerpt", excerpt_expr())
        .deref("author", "author", &Projection::new().field("name"))
        .field("featured")
        .computed("readTime", read_time_expr())
        .field("body")
        .field("publishedAt")
        .field("mainImage{asset->{url}}")
}

/// Fields fetched for a single article page.
pub fn detail_projection() -> Projection {
    let author = Projection::new()
        .field("name")
        .field("bio")
        .computed("image", "image.asset->url");
    Projection::new()
        .field("_id")
        .field("title")
        .field("slug")
        .computed("excerpt", excerpt_expr())
        .deref("author", "author", &author)
        .computed("readTime", read_time_expr())
        .field("body")
        .field("publishedAt")
        .deref("categories", "categories[]", &Projection::new().field("title"))
        .field("mainImage{asset->{url}}")
}

/// Read-only client for the content backend's query endpoint.
#[derive(Clone)]
pub struct ContentClient {
    api: Arc<dyn Transport>,
    query_path: String,
    image_cdn: Option<ImageCdn>,
}

impl ContentClient {
    pub fn new(api: Arc<dyn Transport>, query_path: impl Into<String>) -> Self {
        Self {
            api,
            query_path: query_path.into(),
            image_cdn: None,
        }
    }

    /// Build a client backed by the HTTP transport.
    pub fn from_config(config: &AppConfig) -> Result<Self, ApiError> {
        let content = &config.content_api;
        let transport = HttpTransport::new(&content.base_url(), &config.http)?;
        Ok(Self::new(Arc::new(transport), content.query_path())
            .with_image_cdn(ImageCdn::new(&content.project_id, &content.dataset)))
    }

    pub fn with_image_cdn(mut self, cdn: ImageCdn) -> Self {
        self.image_cdn = Some(cdn);
        self
    }

    /// CDN used to resolve image references in article bodies.
    pub fn image_cdn(&self) -> Option<&ImageCdn> {
        self.image_cdn.as_ref()
    }

    /// Run a query and decode its `result`.
    pub async fn fetch<T>(&self, query: &str, params: &Params) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let mut pairs: Vec<(&str, String)> = Vec::with_capacity(params.len() + 1);
        pairs.push(("query", query.to_string()));
        let names: Vec<String> = params.keys().map(|name| format!("${}", name)).collect();
        for (name, value) in names.iter().zip(params.values()) {
            pairs.push((name.as_str(), value.to_string()));
        }

        let body = self.api.get(&self.query_path, &pairs).await?;
        let response: QueryResponse<T> = serde_json::from_value(body)?;
        Ok(response.result)
    }

    /// Published posts, newest first, at most `limit` of them if given.
    pub async fn posts(&self, limit: Option<usize>) -> Result<Vec<Article>, ApiError> {
        let mut query =
            Query::of_type(POST_TYPE).order_by("publishedAt", Direction::Desc);
        if let Some(limit) = limit {
            query = query.limit(limit);
        }
        let query = query.project(list_projection());

        self.fetch::<Option<Vec<Article>>>(&query.to_string(), &Params::new())
            .await
            .map(Option::unwrap_or_default)
    }

    /// The post with this slug, or None if there is none.
    pub async fn post_by_slug(&self, slug: &str) -> Result<Option<Article>, ApiError> {
        let query = Query::of_type(POST_TYPE)
            .filter("slug.current == $slug")
            .first()
            .project(detail_projection());

        let mut params = Params::new();
        params.insert("slug".to_string(), Value::String(slug.to_string()));

        self.fetch(&query.to_string(), &params).await
    }
}
