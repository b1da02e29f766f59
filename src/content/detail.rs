use super::client::ContentClient;
use super::model::Article;
use crate::resource::{Slot, Status};

/// What an article page shows.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailView {
    Loading,
    Found(Article),
    NotFound,
}

/// Loader for a single article page.
///
/// Lookup failures are logged and shown as not found.
pub struct ArticleDetail {
    client: ContentClient,
    state: Slot<Option<Article>>,
}

impl ArticleDetail {
    pub fn new(client: ContentClient) -> Self {
        Self {
            client,
            state: Slot::new(None),
        }
    }

    pub async fn load(&self, slug: &str) {
        let ticket = self.state.begin();
        let slug = slug.trim();
        if slug.is_empty() {
            self.state.update(|r| r.succeed(ticket, None));
            return;
        }

        let article = match self.client.post_by_slug(slug).await {
            Ok(found) => {
                if found.is_none() {
                    log::info!("No article with slug {}", slug);
                }
                found
            }
            Err(e) => {
                log::error!("Failed to fetch article {}: {}", slug, e);
                None
            }
        };

        if !self.state.update(|r| r.succeed(ticket, article)) {
            log::debug!("Discarded stale article response for {}", slug);
        }
    }

    pub fn view(&self) -> DetailView {
        self.state.read(|r| match r.status() {
            Status::Idle | Status::Loading => DetailView::Loading,
            Status::Success | Status::Error => match r.data() {
                Some(article) => DetailView::Found(article.clone()),
                None => DetailView::NotFound,
            },
        })
    }

    pub fn article(&self) -> Option<Article> {
        self.state.get()
    }
}
