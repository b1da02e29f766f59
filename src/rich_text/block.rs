//! Wire format of rich-text bodies as stored by the content backend.

use crate::de::null_as_default;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One top-level body block, tagged by `_type`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "_type")]
pub enum Block {
    #[serde(rename = "block")]
    Text(TextBlock),
    #[serde(rename = "image")]
    Image(ImageBlock),
    #[serde(rename = "twitterEmbed")]
    TwitterEmbed(EmbedBlock),
    /// Any block type we do not render, or a block that failed to decode
    Unknown,
}

/// A block that is untyped or malformed decodes as [`Block::Unknown`] so the
/// rest of the body still loads.
impl<'de> Deserialize<'de> for Block {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let kind = match value.get("_type").and_then(Value::as_str) {
            Some(kind) => kind.to_string(),
            None => return Ok(Block::Unknown),
        };

        let decoded = match kind.as_str() {
            "block" => serde_json::from_value(value).map(Block::Text),
            "image" => serde_json::from_value(value).map(Block::Image),
            "twitterEmbed" => serde_json::from_value(value).map(Block::TwitterEmbed),
            _ => return Ok(Block::Unknown),
        };

        Ok(decoded.unwrap_or_else(|e| {
            log::warn!("Skipping malformed {} block: {}", kind, e);
            Block::Unknown
        }))
    }
}

/// A text block: a paragraph, heading, quote or list item.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextBlock {
    #[serde(default, deserialize_with = "null_as_default")]
    pub style: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub children: Vec<Span>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub mark_defs: Vec<MarkDef>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub list_item: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub level: Option<u32>,
}

impl TextBlock {
    /// Concatenated text of all spans.
    pub fn text(&self) -> String {
        self.children.iter().map(|span| span.text.as_str()).collect()
    }

    pub fn mark_def(&self, key: &str) -> Option<&MarkDef> {
        self.mark_defs.iter().find(|def| def.key == key)
    }
}

/// A run of text with the same marks.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Span {
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
    /// Decorator names (`strong`, `em`, `code`, ...) or keys into `markDefs`
    #[serde(default, deserialize_with = "null_as_default")]
    pub marks: Vec<String>,
}

/// An annotation referenced from span marks, e.g. a link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkDef {
    #[serde(rename = "_key")]
    pub key: String,
    #[serde(rename = "_type")]
    pub kind: String,
    #[serde(default)]
    pub href: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ImageBlock {
    #[serde(default)]
    pub asset: Option<ImageAsset>,
    #[serde(default)]
    pub alt: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
}

/// Either an expanded asset (`url`) or a bare reference (`_ref`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ImageAsset {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(rename = "_ref", default)]
    pub reference: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EmbedBlock {
    #[serde(default)]
    pub url: String,
}

/// Plain text of a body: span text concatenated, blocks separated by a blank line.
///
/// Non-text blocks contribute nothing.
pub fn plain_text(blocks: &[Block]) -> String {
    blocks
        .iter()
        .filter_map(|block| match block {
            Block::Text(text) => Some(text.text()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
