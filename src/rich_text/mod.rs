//! Rich-text article bodies.
//!
//! Bodies arrive as a list of typed [`Block`]s. [`build`] turns them into a
//! [`Node`] tree (grouping list items, detecting tweets, resolving images) and
//! [`HtmlRenderer`] turns the tree into HTML. Nothing here touches the network.

mod block;
mod html;
mod image;
mod node;
mod tweet;

pub use block::{plain_text, Block, EmbedBlock, ImageAsset, ImageBlock, MarkDef, Span, TextBlock};
pub use html::HtmlRenderer;
pub use image::ImageCdn;
pub use node::{build, Inline, ListItem, ListKind, Node};
pub use tweet::{extract_tweet_id, is_tweet_url};
