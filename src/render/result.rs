//! Rendering result with image manifest and statistics.

use crate::model::Metadata;
use serde::Serialize;
use std::collections::BTreeMap;

/// Result of rendering a document: Markdown text plus the image files it links to.
#[derive(Debug, Clone, Serialize)]
pub struct RenderResult {
    /// The rendered Markdown
    pub markdown: String,

    /// Image manifest: generated file name to bytes
    #[serde(skip)]
    pub images: BTreeMap<String, Vec<u8>>,

    /// Media folder the Markdown links point into (e.g. "report_media")
    pub media_dir: String,

    /// Document metadata (copied from source document)
    pub metadata: Metadata,

    /// Extraction statistics
    pub stats: ExtractionStats,
}

impl RenderResult {
    /// Create a simple result with just Markdown.
    pub fn markdown_only(markdown: String, media_dir: impl Into<String>) -> Self {
        Self {
            markdown,
            images: BTreeMap::new(),
            media_dir: media_dir.into(),
            metadata: Metadata::default(),
            stats: ExtractionStats::default(),
        }
    }

    /// Get the Markdown length in bytes.
    pub fn content_len(&self) -> usize {
        self.markdown.len()
    }

    /// Number of images in the manifest.
    pub fn image_count(&self) -> usize {
        self.images.len()
    }

    /// Relative path of an image as linked from the Markdown.
    pub fn image_path(&self, file_name: &str) -> String {
        format!("{}/{}", self.media_dir, file_name)
    }
}

/// Statistics collected while rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractionStats {
    /// Number of headings
    pub heading_count: u32,

    /// Number of plain paragraphs
    pub paragraph_count: u32,

    /// Paragraphs whose content starts with a list marker
    pub list_item_count: u32,

    /// Number of tables
    pub table_count: u32,

    /// Number of images
    pub image_count: u32,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: u32,

    /// Character count (excluding whitespace)
    pub char_count: u32,
}

impl ExtractionStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment heading count.
    pub fn add_heading(&mut self) {
        self.heading_count += 1;
    }

    /// Increment paragraph count.
    pub fn add_paragraph(&mut self) {
        self.paragraph_count += 1;
    }

    /// Increment list item count.
    pub fn add_list_item(&mut self) {
        self.list_item_count += 1;
    }

    /// Increment table count.
    pub fn add_table(&mut self) {
        self.table_count += 1;
    }

    /// Increment image count.
    pub fn add_image(&mut self) {
        self.image_count += 1;
    }

    /// Add word and character counts from text.
    pub fn count_text(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count() as u32;
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count() as u32;
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &ExtractionStats) {
        self.heading_count += other.heading_count;
        self.paragraph_count += other.paragraph_count;
        self.list_item_count += other.list_item_count;
        self.table_count += other.table_count;
        self.image_count += other.image_count;
        self.word_count += other.word_count;
        self.char_count += other.char_count;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extraction_stats_count_text() {
        let mut stats = ExtractionStats::new();
        stats.count_text("Hello, world! This is a test.");

        assert_eq!(stats.word_count, 6);
        assert_eq!(stats.char_count, 24);
    }

    #[test]
    fn test_extraction_stats_merge() {
        let mut stats1 = ExtractionStats::new();
        stats1.paragraph_count = 5;
        stats1.table_count = 2;

        let stats2 = ExtractionStats {
            paragraph_count: 3,
            table_count: 1,
            image_count: 4,
            ..Default::default()
        };

        stats1.merge(&stats2);

        assert_eq!(stats1.paragraph_count, 8);
        assert_eq!(stats1.table_count, 3);
        assert_eq!(stats1.image_count, 4);
    }

    #[test]
    fn test_image_path() {
        let result = RenderResult::markdown_only(String::new(), "notes_media");
        assert_eq!(result.image_path("document.001.png"), "notes_media/document.001.png");
        assert_eq!(result.image_count(), 0);
    }
}
