//! Source document abstraction consumed by the structural extractor.
//!
//! A [`SourceDocument`] exposes the block structure of a word-processing
//! document (paragraphs with runs, style names and image references, and
//! tables of cell text) without tying the extractor to a container format.
//! [`crate::docx::DocxSource`] implements it over Word packages and
//! [`MemorySource`] over hand-built content.

use crate::error::{Error, Result};
use crate::model::Metadata;
use std::collections::HashMap;

/// Read access to a source document.
pub trait SourceDocument {
    /// Name of the source (usually its file name).
    fn name(&self) -> &str;

    /// Document metadata.
    fn metadata(&self) -> &Metadata;

    /// Top-level blocks in document order.
    fn blocks(&self) -> &[SourceBlock];

    /// Raw bytes of an embedded image.
    ///
    /// Fails with [`Error::ImageExtract`] when the bytes cannot be retrieved.
    fn image_content(&self, image: &ImageRef) -> Result<Vec<u8>>;

    /// Font size of a run in points, when the source records one.
    fn font_size_points(&self, run: &SourceRun) -> Option<f32> {
        run.font_size
    }
}

/// A top-level source block.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceBlock {
    /// A paragraph
    Paragraph(SourceParagraph),
    /// A table
    Table(SourceTable),
}

/// A source paragraph.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceParagraph {
    /// Paragraph style display name
    pub style_name: Option<String>,

    /// Runs in order
    pub runs: Vec<SourceRun>,

    /// Embedded image references in order
    pub images: Vec<ImageRef>,
}

impl SourceParagraph {
    /// Create an empty paragraph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the style name.
    pub fn with_style(mut self, style_name: impl Into<String>) -> Self {
        self.style_name = Some(style_name.into());
        self
    }

    /// Append a run.
    pub fn with_run(mut self, run: SourceRun) -> Self {
        self.runs.push(run);
        self
    }

    /// Append an image reference.
    pub fn with_image(mut self, image: ImageRef) -> Self {
        self.images.push(image);
        self
    }

    /// Paragraph text: the concatenation of its runs.
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

/// A source run with direct formatting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceRun {
    /// Run text
    pub text: String,
    /// Bold
    pub bold: bool,
    /// Italic
    pub italic: bool,
    /// Underline
    pub underline: bool,
    /// Strikethrough
    pub strike: bool,
    /// Font size in points
    pub font_size: Option<f32>,
}

impl SourceRun {
    /// Create an unformatted run.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Create a bold run.
    pub fn bold(text: impl Into<String>) -> Self {
        Self::new(text).with_bold(true)
    }

    /// Set bold.
    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    /// Set italic.
    pub fn with_italic(mut self, italic: bool) -> Self {
        self.italic = italic;
        self
    }

    /// Set underline.
    pub fn with_underline(mut self, underline: bool) -> Self {
        self.underline = underline;
        self
    }

    /// Set strikethrough.
    pub fn with_strike(mut self, strike: bool) -> Self {
        self.strike = strike;
        self
    }

    /// Set font size in points.
    pub fn with_font_size(mut self, points: f32) -> Self {
        self.font_size = Some(points);
        self
    }
}

/// Reference to an image embedded in a paragraph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageRef {
    /// Relationship id (e.g. "rId5")
    pub rel_id: String,

    /// Resolved package path of the image part, if known
    pub target: Option<String>,

    /// Descriptive text, if present
    pub alt_text: Option<String>,

    /// Display width in EMUs
    pub width_emu: Option<u64>,

    /// Display height in EMUs
    pub height_emu: Option<u64>,
}

impl ImageRef {
    /// Create a reference by relationship id.
    pub fn new(rel_id: impl Into<String>) -> Self {
        Self {
            rel_id: rel_id.into(),
            ..Default::default()
        }
    }

    /// Set alternative text.
    pub fn with_alt_text(mut self, alt_text: impl Into<String>) -> Self {
        self.alt_text = Some(alt_text.into());
        self
    }

    /// Set the package path.
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Path for diagnostics: target if resolved, else the relationship id.
    pub fn display_path(&self) -> &str {
        self.target.as_deref().unwrap_or(&self.rel_id)
    }
}

/// A source table: rows of cell text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceTable {
    /// Rows of cell text
    pub rows: Vec<Vec<String>>,
}

impl SourceTable {
    /// Create a table from rows.
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }
}

/// An in-memory source document.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    name: String,
    metadata: Metadata,
    blocks: Vec<SourceBlock>,
    images: HashMap<String, Vec<u8>>,
}

impl MemorySource {
    /// Create an empty source with a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set metadata.
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Append a paragraph.
    pub fn with_paragraph(mut self, paragraph: SourceParagraph) -> Self {
        self.blocks.push(SourceBlock::Paragraph(paragraph));
        self
    }

    /// Append a table.
    pub fn with_table(mut self, table: SourceTable) -> Self {
        self.blocks.push(SourceBlock::Table(table));
        self
    }

    /// Register image bytes under a relationship id.
    pub fn with_image_data(mut self, rel_id: impl Into<String>, data: Vec<u8>) -> Self {
        self.images.insert(rel_id.into(), data);
        self
    }
}

impl SourceDocument for MemorySource {
    fn name(&self) -> &str {
        &self.name
    }

    fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    fn blocks(&self) -> &[SourceBlock] {
        &self.blocks
    }

    fn image_content(&self, image: &ImageRef) -> Result<Vec<u8>> {
        self.images
            .get(&image.rel_id)
            .cloned()
            .ok_or_else(|| Error::ImageExtract(format!("no image data for {}", image.rel_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraph_text_concatenates_runs() {
        let p = SourceParagraph::new()
            .with_run(SourceRun::bold("Hello "))
            .with_run(SourceRun::new("world"));
        assert_eq!(p.text(), "Hello world");
    }

    #[test]
    fn test_memory_source_image_content() {
        let source = MemorySource::new("mem").with_image_data("rId1", vec![1, 2]);
        assert_eq!(source.image_content(&ImageRef::new("rId1")).unwrap(), vec![1, 2]);

        let err = source.image_content(&ImageRef::new("rId2")).unwrap_err();
        assert!(matches!(err, Error::ImageExtract(_)));
    }

    #[test]
    fn test_default_font_size() {
        let source = MemorySource::new("mem");
        let run = SourceRun::bold("T").with_font_size(18.0);
        assert_eq!(source.font_size_points(&run), Some(18.0));
        assert_eq!(source.font_size_points(&SourceRun::new("x")), None);
    }
}
