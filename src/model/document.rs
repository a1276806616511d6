//! Document-level types.

use super::{Block, Image, Table};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A converted Word document: an ordered, append-only sequence of blocks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Source file name (e.g., "report.docx")
    pub filename: String,

    /// Document title (from core properties, may be empty)
    pub title: String,

    /// Document metadata (author, dates, etc.)
    pub metadata: Metadata,

    /// Blocks in document order
    blocks: Vec<Block>,
}

impl Document {
    /// Create a new empty document.
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            title: String::new(),
            metadata: Metadata::default(),
            blocks: Vec::new(),
        }
    }

    /// Append a block. Blocks are never removed or reordered.
    pub fn add_block(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Blocks in document order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Get the number of blocks.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Check if the document has any blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// All images, in document order.
    pub fn images(&self) -> impl Iterator<Item = &Image> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Image(image) => Some(image),
            _ => None,
        })
    }

    /// All tables, in document order.
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Table(table) => Some(table),
            _ => None,
        })
    }

    /// Number of heading blocks.
    pub fn heading_count(&self) -> usize {
        self.blocks.iter().filter(|b| b.is_heading()).count()
    }

    /// Get plain text content of the entire document.
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .filter_map(|block| block.plain_text())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("")
    }
}

/// Document metadata read from the package core properties.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metadata {
    /// Document title
    pub title: Option<String>,

    /// Document subject
    pub subject: Option<String>,

    /// Document author
    pub creator: Option<String>,

    /// Keywords
    pub keywords: Option<String>,

    /// Free-form description
    pub description: Option<String>,

    /// Last editor
    pub last_modified_by: Option<String>,

    /// Creation date
    pub created: Option<DateTime<Utc>>,

    /// Last modification date
    pub modified: Option<DateTime<Utc>>,
}

impl Metadata {
    /// Check whether any field is set.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.subject.is_none()
            && self.creator.is_none()
            && self.keywords.is_none()
            && self.description.is_none()
            && self.last_modified_by.is_none()
            && self.created.is_none()
            && self.modified.is_none()
    }

    /// Convert metadata to YAML frontmatter format.
    pub fn to_yaml_frontmatter(&self) -> String {
        let mut lines = vec!["---".to_string()];

        let fields = [
            ("title", &self.title),
            ("subject", &self.subject),
            ("author", &self.creator),
            ("keywords", &self.keywords),
            ("description", &self.description),
            ("last_modified_by", &self.last_modified_by),
        ];
        for (key, value) in fields {
            if let Some(ref value) = value {
                lines.push(format!("{}: \"{}\"", key, escape_yaml(value)));
            }
        }
        if let Some(ref created) = self.created {
            lines.push(format!("created: {}", created.to_rfc3339()));
        }
        if let Some(ref modified) = self.modified {
            lines.push(format!("modified: {}", modified.to_rfc3339()));
        }

        lines.push("---".to_string());
        lines.push(String::new());

        lines.join("\n")
    }
}

/// Escape special characters for YAML strings.
fn escape_yaml(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Paragraph;

    #[test]
    fn test_document_new() {
        let doc = Document::new("report.docx");
        assert!(doc.is_empty());
        assert_eq!(doc.filename, "report.docx");
        assert_eq!(doc.title, "");
    }

    #[test]
    fn test_blocks_keep_insertion_order() {
        let mut doc = Document::new("a.docx");
        doc.add_block(Block::heading(1, "Intro"));
        doc.add_block(Block::Paragraph(Paragraph::with_text("Body")));
        doc.add_block(Block::Table(Table::from_rows(vec![vec!["A".into()]])));

        assert_eq!(doc.block_count(), 3);
        assert!(doc.blocks()[0].is_heading());
        assert!(doc.blocks()[2].is_table());
        assert_eq!(doc.heading_count(), 1);
        assert_eq!(doc.tables().count(), 1);
        assert_eq!(doc.plain_text(), "Intro\n\nBody\n\nA");
    }

    #[test]
    fn test_metadata_frontmatter() {
        let metadata = Metadata {
            title: Some("Quarterly \"Report\"".to_string()),
            creator: Some("Jane Doe".to_string()),
            ..Default::default()
        };

        let yaml = metadata.to_yaml_frontmatter();
        assert!(yaml.starts_with("---\n"));
        assert!(yaml.contains("title: \"Quarterly \\\"Report\\\"\""));
        assert!(yaml.contains("author: \"Jane Doe\""));
        assert!(!yaml.contains("subject"));
    }

    #[test]
    fn test_metadata_is_empty() {
        assert!(Metadata::default().is_empty());
        let metadata = Metadata {
            keywords: Some("docx".into()),
            ..Default::default()
        };
        assert!(!metadata.is_empty());
    }
}
