//! Normalized document tree built from wire blocks.

use super::block::{Block, Span, TextBlock};
use super::image::ImageCdn;
use super::tweet::is_tweet_url;

/// Inline content of a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    Strong(Vec<Inline>),
    Emphasis(Vec<Inline>),
    Code(Vec<Inline>),
    Underline(Vec<Inline>),
    Strike(Vec<Inline>),
    Link { href: String, children: Vec<Inline> },
    /// A link that points at a tweet; rendered as an embed
    Embed { url: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Bullet,
    Number,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListItem {
    pub content: Vec<Inline>,
    /// Lists nested one level deeper under this item
    pub children: Vec<Node>,
}

/// Block-level node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Paragraph(Vec<Inline>),
    Heading { level: u8, content: Vec<Inline> },
    Blockquote(Vec<Inline>),
    List { kind: ListKind, items: Vec<ListItem> },
    Embed { url: String },
    Image {
        url: String,
        alt: Option<String>,
        caption: Option<String>,
    },
}

/// Flattened list block before nesting.
struct ListEntry {
    kind: ListKind,
    level: u32,
    content: Vec<Inline>,
}

/// Build the document tree for a body.
///
/// Consecutive list-item blocks are grouped into lists, nested by level.
/// Images whose URL cannot be resolved and unknown block types are dropped.
pub fn build(blocks: &[Block], cdn: Option<&ImageCdn>) -> Vec<Node> {
    let mut nodes = Vec::with_capacity(blocks.len());
    let mut pending: Vec<ListEntry> = Vec::new();

    for block in blocks {
        if let Block::Text(text) = block {
            if let Some(kind) = list_kind(text) {
                pending.push(ListEntry {
                    kind,
                    level: text.level.unwrap_or(1).max(1),
                    content: inlines(text),
                });
                continue;
            }
        }

        flush_lists(&mut pending, &mut nodes);

        match block {
            Block::Text(text) => nodes.push(text_node(text)),
            Block::Image(image) => {
                let asset = image.asset.as_ref();
                let url = asset.and_then(|a| a.url.clone()).or_else(|| {
                    asset
                        .and_then(|a| a.reference.as_deref())
                        .and_then(|r| cdn.and_then(|cdn| cdn.url_for(r)))
                });
                match url {
                    Some(url) => nodes.push(Node::Image {
                        url,
                        alt: image.alt.clone(),
                        caption: image.caption.clone(),
                    }),
                    None => log::warn!("Dropping image block without a resolvable asset"),
                }
            }
            Block::TwitterEmbed(embed) if !embed.url.is_empty() => nodes.push(Node::Embed {
                url: embed.url.clone(),
            }),
            Block::TwitterEmbed(_) => {}
            Block::Unknown => log::debug!("Skipping unsupported block type"),
        }
    }

    flush_lists(&mut pending, &mut nodes);
    nodes
}

fn list_kind(text: &TextBlock) -> Option<ListKind> {
    match text.list_item.as_deref()? {
        "number" => Some(ListKind::Number),
        _ => Some(ListKind::Bullet),
    }
}

fn text_node(text: &TextBlock) -> Node {
    let style = text.style.as_deref().unwrap_or("normal");

    // A paragraph that is nothing but a tweet URL becomes an embed.
    if style == "normal" && text.children.len() == 1 {
        let only = text.children[0].text.trim();
        if is_tweet_url(only) {
            return Node::Embed {
                url: only.to_string(),
            };
        }
    }

    let content = inlines(text);
    match style {
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => Node::Heading {
            level: style[1..].parse().unwrap_or(2),
            content,
        },
        "blockquote" => Node::Blockquote(content),
        _ => match content.as_slice() {
            [Inline::Embed { url }] => Node::Embed { url: url.clone() },
            _ => Node::Paragraph(content),
        },
    }
}

fn inlines(text: &TextBlock) -> Vec<Inline> {
    text.children
        .iter()
        .filter(|span| !span.text.is_empty())
        .map(|span| span_inline(text, span))
        .collect()
}

/// Wrap a span's text in its marks, first mark outermost.
fn span_inline(block: &TextBlock, span: &Span) -> Inline {
    let mut inline = Inline::Text(span.text.clone());

    for mark in span.marks.iter().rev() {
        inline = match mark.as_str() {
            "strong" => Inline::Strong(vec![inline]),
            "em" => Inline::Emphasis(vec![inline]),
            "code" => Inline::Code(vec![inline]),
            "underline" => Inline::Underline(vec![inline]),
            "strike-through" => Inline::Strike(vec![inline]),
            key => match block.mark_def(key) {
                Some(def) if def.kind == "link" => match def.href.as_deref() {
                    Some(href) if is_tweet_url(href) => Inline::Embed {
                        url: href.to_string(),
                    },
                    Some(href) => Inline::Link {
                        href: href.to_string(),
                        children: vec![inline],
                    },
                    None => inline,
                },
                _ => inline,
            },
        };
    }

    inline
}

fn flush_lists(pending: &mut Vec<ListEntry>, nodes: &mut Vec<Node>) {
    let mut i = 0;
    while i < pending.len() {
        let (list, next) = build_list(pending, i, pending[i].level);
        nodes.push(list);
        i = next;
    }
    pending.clear();
}

/// Build one list starting at `start`. Returns the list and the index of the
/// first entry not consumed.
///
/// Entries at a deeper level nest under the preceding item; a shallower entry
/// or a change of kind at this level ends the list.
fn build_list(entries: &[ListEntry], start: usize, level: u32) -> (Node, usize) {
    let kind = entries[start].kind;
    let mut items: Vec<ListItem> = Vec::new();
    let mut i = start;

    while i < entries.len() {
        let entry = &entries[i];
        if entry.level < level {
            break;
        }
        if entry.level > level {
            let (nested, next) = build_list(entries, i, entry.level);
            match items.last_mut() {
                Some(item) => item.children.push(nested),
                None => items.push(ListItem {
                    content: Vec::new(),
                    children: vec![nested],
                }),
            }
            i = next;
            continue;
        }
        if entry.kind != kind {
            break;
        }
        items.push(ListItem {
            content: entry.content.clone(),
            children: Vec::new(),
        });
        i += 1;
    }

    (Node::List { kind, items }, i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn blocks(value: serde_json::Value) -> Vec<Block> {
        serde_json::from_value(value).unwrap()
    }

    fn text(s: &str) -> Inline {
        Inline::Text(s.to_string())
    }

    #[test]
    fn styles_map_to_nodes() {
        let nodes = build(
            &blocks(json!([
                { "_type": "block", "style": "h3", "children": [{ "text": "Title" }] },
                { "_type": "block", "style": "blockquote", "children": [{ "text": "Quoted" }] },
                { "_type": "block", "style": "normal", "children": [{ "text": "Body" }] },
                { "_type": "block", "children": [{ "text": "No style" }] }
            ])),
            None,
        );

        assert_eq!(
            nodes,
            vec![
                Node::Heading {
                    level: 3,
                    content: vec![text("Title")]
                },
                Node::Blockquote(vec![text("Quoted")]),
                Node::Paragraph(vec![text("Body")]),
                Node::Paragraph(vec![text("No style")]),
            ]
        );
    }

    #[test]
    fn marks_and_links() {
        let nodes = build(
            &blocks(json!([{
                "_type": "block",
                "children": [
                    { "text": "Never ", "marks": [] },
                    { "text": "send", "marks": ["strong", "em"] },
                    { "text": " money to ", "marks": [] },
                    { "text": "strangers", "marks": ["lnk1"] }
                ],
                "markDefs": [{ "_key": "lnk1", "_type": "link", "href": "https://example.com/tips" }]
            }])),
            None,
        );

        assert_eq!(
            nodes,
            vec![Node::Paragraph(vec![
                text("Never "),
                Inline::Strong(vec![Inline::Emphasis(vec![text("send")])]),
                text(" money to "),
                Inline::Link {
                    href: "https://example.com/tips".to_string(),
                    children: vec![text("strangers")],
                },
            ])]
        );
    }

    #[test]
    fn tweets_become_embeds() {
        let nodes = build(
            &blocks(json!([
                { "_type": "block", "children": [{ "text": "https://x.com/someone/status/42" }] },
                {
                    "_type": "block",
                    "children": [{ "text": "see this", "marks": ["t"] }],
                    "markDefs": [{ "_key": "t", "_type": "link", "href": "https://twitter.com/a/status/7" }]
                },
                { "_type": "twitterEmbed", "url": "https://x.com/b/status/9" }
            ])),
            None,
        );

        assert_eq!(
            nodes,
            vec![
                Node::Embed {
                    url: "https://x.com/someone/status/42".to_string()
                },
                Node::Embed {
                    url: "https://twitter.com/a/status/7".to_string()
                },
                Node::Embed {
                    url: "https://x.com/b/status/9".to_string()
                },
            ]
        );
    }

    #[test]
    fn lists_group_and_nest() {
        let nodes = build(
            &blocks(json!([
                { "_type": "block", "listItem": "bullet", "level": 1, "children": [{ "text": "a" }] },
                { "_type": "block", "listItem": "bullet", "level": 2, "children": [{ "text": "a.1" }] },
                { "_type": "block", "listItem": "bullet", "level": 1, "children": [{ "text": "b" }] },
                { "_type": "block", "listItem": "number", "level": 1, "children": [{ "text": "one" }] },
                { "_type": "block", "children": [{ "text": "after" }] }
            ])),
            None,
        );

        assert_eq!(
            nodes,
            vec![
                Node::List {
                    kind: ListKind::Bullet,
                    items: vec![
                        ListItem {
                            content: vec![text("a")],
                            children: vec![Node::List {
                                kind: ListKind::Bullet,
                                items: vec![ListItem {
                                    content: vec![text("a.1")],
                                    children: vec![],
                                }],
                            }],
                        },
                        ListItem {
                            content: vec![text("b")],
                            children: vec![],
                        },
                    ],
                },
                Node::List {
                    kind: ListKind::Number,
                    items: vec![ListItem {
                        content: vec![text("one")],
                        children: vec![],
                    }],
                },
                Node::Paragraph(vec![text("after")]),
            ]
        );
    }

    #[test]
    fn list_starting_deep_still_terminates() {
        let nodes = build(
            &blocks(json!([
                { "_type": "block", "listItem": "bullet", "level": 2, "children": [{ "text": "deep" }] },
                { "_type": "block", "listItem": "bullet", "level": 1, "children": [{ "text": "shallow" }] }
            ])),
            None,
        );
        assert_eq!(nodes.len(), 2);
    }

    #[test]
    fn images_resolve_through_cdn_or_are_dropped() {
        let body = blocks(json!([
            { "_type": "image", "asset": { "_ref": "image-abc-10x20-png" }, "alt": "receipt" },
            { "_type": "image", "asset": { "url": "https://img.example.com/x.jpg" }, "caption": "cap" }
        ]));

        let without_cdn = build(&body, None);
        assert_eq!(without_cdn.len(), 1);

        let cdn = ImageCdn::new("proj", "prod");
        let with_cdn = build(&body, Some(&cdn));
        assert_eq!(
            with_cdn[0],
            Node::Image {
                url: "https://cdn.sanity.io/images/proj/prod/abc-10x20.png".to_string(),
                alt: Some("receipt".to_string()),
                caption: None,
            }
        );
        assert_eq!(
            with_cdn[1],
            Node::Image {
                url: "https://img.example.com/x.jpg".to_string(),
                alt: None,
                caption: Some("cap".to_string()),
            }
        );
    }
}
