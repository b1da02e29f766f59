//! Blog articles from the content backend.
//!
//! [`ContentClient`] builds and runs queries, [`ContentStore`] caches the
//! article list with its featured and search views, and [`ArticleDetail`]
//! loads a single article page.

mod client;
mod detail;
mod model;
mod query;
mod read_time;
mod store;
pub mod view;

pub use client::{detail_projection, list_projection, ContentClient, Params};
pub use detail::{ArticleDetail, DetailView};
pub use model::{Article, AssetUrl, Author, Bio, Category, MainImage, Slug};
pub use query::{excerpt_expr, read_time_expr, string_literal, Direction, Projection, Query, Slice};
pub use read_time::{ReadTime, READ_TIME_BUCKETS};
pub use store::{ContentEvent, ContentStore};
