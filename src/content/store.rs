use super::client::ContentClient;
use super::model::Article;
use super::view;
use crate::app_config::AppConfig;
use crate::constants::CONTENT_FALLBACK_ERROR;
use crate::error::ApiError;
use crate::resource::{Slot, Status, Subscribers};

/// Change notification from a [`ContentStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentEvent {
    Posts,
}

/// Client-side cache of published articles.
pub struct ContentStore {
    client: ContentClient,
    posts: Slot<Vec<Article>>,
    subscribers: Subscribers<ContentEvent>,
}

impl ContentStore {
    pub fn new(client: ContentClient) -> Self {
        Self {
            client,
            posts: Slot::new(Vec::new()),
            subscribers: Subscribers::default(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, ApiError> {
        Ok(Self::new(ContentClient::from_config(config)?))
    }

    pub fn client(&self) -> &ContentClient {
        &self.client
    }

    /// Replace the local posts with the newest published ones.
    ///
    /// A limit of zero is treated as no limit. The limit is applied again
    /// locally in case the backend returns more than asked for.
    pub async fn fetch_posts(&self, limit: Option<usize>) {
        let limit = limit.filter(|&n| n > 0);
        let ticket = self.posts.begin();
        self.subscribers.notify(ContentEvent::Posts);

        let applied = match self.client.posts(limit).await {
            Ok(mut posts) => {
                if let Some(limit) = limit {
                    posts.truncate(limit);
                }
                let count = posts.len();
                let applied = self.posts.update(|r| r.succeed(ticket, posts));
                if applied {
                    log::debug!("Loaded {} posts", count);
                }
                applied
            }
            Err(e) => {
                log::error!("Failed to fetch posts: {}", e);
                let message = if e.is_unrecognized() {
                    CONTENT_FALLBACK_ERROR.to_string()
                } else {
                    e.to_string()
                };
                self.posts.update(|r| r.fail(ticket, message))
            }
        };

        if applied {
            self.subscribers.notify(ContentEvent::Posts);
        } else {
            log::debug!("Discarded stale posts response");
        }
    }

    pub fn posts(&self) -> Vec<Article> {
        self.posts.get()
    }

    pub fn featured_post(&self) -> Option<Article> {
        self.posts.read(|r| view::featured(r.data()).cloned())
    }

    pub fn regular_posts(&self) -> Vec<Article> {
        self.posts
            .read(|r| view::regular(r.data()).into_iter().cloned().collect())
    }

    /// Regular posts matching `term` in title or excerpt.
    pub fn search_posts(&self, term: &str) -> Vec<Article> {
        self.posts
            .read(|r| view::search(r.data(), term).into_iter().cloned().collect())
    }

    pub fn status(&self) -> Status {
        self.posts.status()
    }

    pub fn is_loading(&self) -> bool {
        self.posts.is_loading()
    }

    pub fn error(&self) -> Option<String> {
        self.posts.error()
    }

    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn(ContentEvent) + Send + Sync + 'static,
    {
        self.subscribers.add(callback);
    }
}
