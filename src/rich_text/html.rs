use super::block::Block;
use super::image::ImageCdn;
use super::node::{build, Inline, ListItem, ListKind, Node};
use super::tweet::extract_tweet_id;
use url::Url;

/// Converts a document tree into HTML.
pub struct HtmlRenderer {
    /// Resolves bare image asset references; None drops such images
    pub image_cdn: Option<ImageCdn>,
    /// When true, tweets render as embed blockquotes; otherwise as plain links
    pub embed_tweets: bool,
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self {
            image_cdn: None,
            embed_tweets: true,
        }
    }
}

impl HtmlRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_image_cdn(mut self, cdn: ImageCdn) -> Self {
        self.image_cdn = Some(cdn);
        self
    }

    /// Build and render a body in one step.
    pub fn render_blocks(&self, blocks: &[Block]) -> String {
        self.render(&build(blocks, self.image_cdn.as_ref()))
    }

    pub fn render(&self, nodes: &[Node]) -> String {
        let mut output = String::with_capacity(256);
        for node in nodes {
            self.node_into(node, &mut output);
        }
        output
    }

    fn node_into(&self, node: &Node, output: &mut String) {
        match node {
            Node::Paragraph(content) => self.wrapped("p", content, output),
            Node::Heading { level, content } => {
                let tag = format!("h{}", (*level).clamp(1, 6));
                self.wrapped(&tag, content, output);
            }
            Node::Blockquote(content) => self.wrapped("blockquote", content, output),
            Node::List { kind, items } => self.list_into(*kind, items, output),
            Node::Embed { url } => self.embed_into(url, output),
            Node::Image { url, alt, caption } => {
                if !is_safe_href(url) {
                    return;
                }
                output.push_str("<figure><img src=\"");
                output.push_str(&Self::sanitize(url));
                output.push_str("\" alt=\"");
                output.push_str(&Self::sanitize(alt.as_deref().unwrap_or("Blog image")));
                output.push_str("\" />");
                if let Some(caption) = caption {
                    output.push_str("<figcaption>");
                    output.push_str(&Self::sanitize(caption));
                    output.push_str("</figcaption>");
                }
                output.push_str("</figure>");
            }
        }
    }

    fn wrapped(&self, tag: &str, content: &[Inline], output: &mut String) {
        output.push('<');
        output.push_str(tag);
        output.push('>');
        self.inlines_into(content, output);
        output.push_str("</");
        output.push_str(tag);
        output.push('>');
    }

    fn list_into(&self, kind: ListKind, items: &[ListItem], output: &mut String) {
        let tag = match kind {
            ListKind::Bullet => "ul",
            ListKind::Number => "ol",
        };
        output.push('<');
        output.push_str(tag);
        output.push('>');
        for item in items {
            output.push_str("<li>");
            self.inlines_into(&item.content, output);
            for child in &item.children {
                self.node_into(child, output);
            }
            output.push_str("</li>");
        }
        output.push_str("</");
        output.push_str(tag);
        output.push('>');
    }

    fn embed_into(&self, url: &str, output: &mut String) {
        if !is_safe_href(url) {
            output.push_str(&Self::sanitize(url));
            return;
        }
        let href = Self::sanitize(url);
        if self.embed_tweets {
            output.push_str("<blockquote class=\"twitter-tweet\"");
            if let Some(id) = extract_tweet_id(url) {
                output.push_str(" data-tweet-id=\"");
                output.push_str(id);
                output.push('"');
            }
            output.push_str("><a href=\"");
            output.push_str(&href);
            output.push_str("\" rel=\"noreferrer noopener\">");
            output.push_str(&href);
            output.push_str("</a></blockquote>");
        } else {
            output.push_str("<a href=\"");
            output.push_str(&href);
            output.push_str("\" rel=\"noreferrer noopener\">");
            output.push_str(&href);
            output.push_str("</a>");
        }
    }

    fn inlines_into(&self, content: &[Inline], output: &mut String) {
        for inline in content {
            match inline {
                Inline::Text(text) => output.push_str(&Self::sanitize(text)),
                Inline::Strong(children) => self.wrapped("strong", children, output),
                Inline::Emphasis(children) => self.wrapped("em", children, output),
                Inline::Code(children) => self.wrapped("code", children, output),
                Inline::Underline(children) => self.wrapped("u", children, output),
                Inline::Strike(children) => self.wrapped("s", children, output),
                Inline::Link { href, children } => {
                    // Unsafe targets lose the link but keep the text.
                    if !is_safe_href(href) {
                        self.inlines_into(children, output);
                        continue;
                    }
                    output.push_str("<a href=\"");
                    output.push_str(&Self::sanitize(href));
                    output.push('"');
                    if !href.starts_with('/') {
                        output.push_str(" rel=\"noreferrer noopener\"");
                    }
                    output.push('>');
                    self.inlines_into(children, output);
                    output.push_str("</a>");
                }
                Inline::Embed { url } => self.embed_into(url, output),
            }
        }
    }

    /// Escapes text for use in HTML content and attribute values.
    pub fn sanitize(input: &str) -> String {
        let mut output = String::with_capacity(input.len());
        for c in input.chars() {
            match c {
                '&' => output.push_str("&amp;"),
                '<' => output.push_str("&lt;"),
                '>' => output.push_str("&gt;"),
                '"' => output.push_str("&quot;"),
                '\'' => output.push_str("&#x27;"),
                _ => output.push(c),
            }
        }
        output
    }
}

/// Relative paths, http(s) and mailto targets are allowed; everything else is not.
fn is_safe_href(href: &str) -> bool {
    if href.starts_with('/') && !href.starts_with("//") {
        return !href.contains("..");
    }
    match Url::parse(href) {
        Ok(url) => matches!(url.scheme(), "http" | "https" | "mailto"),
        Err(_) => false,
    }
}
