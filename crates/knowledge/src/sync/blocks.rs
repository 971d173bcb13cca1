//! Content blocks and plain-text extraction.

use serde::Deserialize;

/// Prefix written before every list item.
pub const LIST_ITEM_PREFIX: &str = "• ";

/// A fragment of styled text. Only the plain text is kept.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RichText {
    #[serde(default)]
    pub plain_text: String,
}

impl RichText {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            plain_text: text.into(),
        }
    }
}

/// Payload shared by every text-bearing block kind.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TextBlock {
    #[serde(default)]
    pub rich_text: Vec<RichText>,
}

impl TextBlock {
    pub fn new(runs: &[&str]) -> Self {
        Self {
            rich_text: runs.iter().map(|run| RichText::new(*run)).collect(),
        }
    }

    pub fn plain_text(&self) -> String {
        plain_text(&self.rich_text)
    }
}

/// One block of a page body, tagged by its `type` field.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum Block {
    #[serde(rename = "paragraph")]
    Paragraph { paragraph: TextBlock },

    #[serde(rename = "heading_1")]
    Heading1 { heading_1: TextBlock },

    #[serde(rename = "heading_2")]
    Heading2 { heading_2: TextBlock },

    #[serde(rename = "heading_3")]
    Heading3 { heading_3: TextBlock },

    #[serde(rename = "bulleted_list_item")]
    BulletedListItem { bulleted_list_item: TextBlock },

    #[serde(rename = "numbered_list_item")]
    NumberedListItem { numbered_list_item: TextBlock },

    /// Images, tables, dividers and anything else without extractable text
    #[serde(other)]
    Unsupported,
}

impl Block {
    /// Text this block contributes to its page.
    pub fn text(&self) -> String {
        match self {
            Block::Paragraph { paragraph: body }
            | Block::Heading1 { heading_1: body }
            | Block::Heading2 { heading_2: body }
            | Block::Heading3 { heading_3: body } => body.plain_text(),
            Block::BulletedListItem {
                bulleted_list_item: body,
            }
            | Block::NumberedListItem {
                numbered_list_item: body,
            } => format!("{}{}", LIST_ITEM_PREFIX, body.plain_text()),
            Block::Unsupported => String::new(),
        }
    }
}

/// Concatenate the plain text of a run list.
pub fn plain_text(runs: &[RichText]) -> String {
    runs.iter().map(|run| run.plain_text.as_str()).collect()
}

/// Page body text: one line per block, trimmed as a whole.
pub fn extract_text(blocks: &[Block]) -> String {
    blocks
        .iter()
        .map(Block::text)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}
