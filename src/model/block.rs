//! Block-level types.

use super::{Image, Paragraph, Table};
use serde::{Deserialize, Serialize};

/// A content block of the document, in reading order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// A heading rendered as a bold list item indented by level
    Heading {
        /// Heading level (1-6)
        level: u8,
        /// Full paragraph text
        text: String,
    },

    /// A plain paragraph
    Paragraph(Paragraph),

    /// An image extracted from an image-bearing paragraph
    Image(Image),

    /// A table
    Table(Table),
}

impl Block {
    /// Create a heading block. The level is clamped to 1-6.
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Block::Heading {
            level: level.clamp(1, 6),
            text: text.into(),
        }
    }

    /// Heading level, or `None` for non-heading blocks.
    pub fn heading_level(&self) -> Option<u8> {
        match self {
            Block::Heading { level, .. } => Some(*level),
            _ => None,
        }
    }

    /// Check if this is a heading.
    pub fn is_heading(&self) -> bool {
        matches!(self, Block::Heading { .. })
    }

    /// Check if this is a table.
    pub fn is_table(&self) -> bool {
        matches!(self, Block::Table(_))
    }

    /// Check if this is an image.
    pub fn is_image(&self) -> bool {
        matches!(self, Block::Image(_))
    }

    /// Plain text of the block; images have none.
    pub fn plain_text(&self) -> Option<String> {
        match self {
            Block::Heading { text, .. } => Some(text.clone()),
            Block::Paragraph(p) => Some(p.text.clone()),
            Block::Table(t) => Some(t.plain_text()),
            Block::Image(_) => None,
        }
    }
}
