//! Structural extraction: source blocks to the document model.
//!
//! The [`Extractor`] walks a [`SourceDocument`] in order and classifies
//! each block as a heading, a plain paragraph, an image-bearing paragraph
//! or a table. Each extractor owns its image counter, so concurrent
//! conversions never share numbering.

mod heading;

pub use heading::{level_from_shape, HeadingDetector, HeadingInput, HeadingRule};

use crate::model::{Block, Document, Image, Paragraph, Run, RunStyle, Table};
use crate::source::{SourceBlock, SourceDocument, SourceParagraph, SourceRun, SourceTable};

/// How generated image file names get their extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageExtension {
    /// Always `.png`, whatever the content
    #[default]
    Png,
    /// Extension from the sniffed content type, `.png` when unknown
    Detected,
}

/// Options for structural extraction.
#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    /// Extension policy for image file names
    pub image_extension: ImageExtension,

    /// Heading rule cascade
    pub heading_detector: HeadingDetector,
}

impl ExtractOptions {
    /// Create new extract options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the image extension policy.
    pub fn with_image_extension(mut self, extension: ImageExtension) -> Self {
        self.image_extension = extension;
        self
    }

    /// Name images by their detected format.
    pub fn detect_image_format(mut self) -> Self {
        self.image_extension = ImageExtension::Detected;
        self
    }

    /// Set the heading detector.
    pub fn with_heading_detector(mut self, detector: HeadingDetector) -> Self {
        self.heading_detector = detector;
        self
    }

    /// Only detect headings from paragraph styles.
    pub fn style_headings_only(mut self) -> Self {
        self.heading_detector = HeadingDetector::style_only();
        self
    }
}

/// Builds one [`Document`] from a source document.
#[derive(Debug, Clone)]
pub struct Extractor {
    options: ExtractOptions,
    image_counter: u32,
}

impl Extractor {
    /// Create an extractor with default options.
    pub fn new() -> Self {
        Self::with_options(ExtractOptions::default())
    }

    /// Create an extractor with custom options.
    pub fn with_options(options: ExtractOptions) -> Self {
        Self {
            options,
            image_counter: 0,
        }
    }

    /// Number of images extracted by the last call to [`extract`](Self::extract).
    pub fn image_count(&self) -> u32 {
        self.image_counter
    }

    /// Extract the document model.
    ///
    /// Unreadable images are skipped; nothing here fails once the source
    /// has been opened.
    pub fn extract<S: SourceDocument + ?Sized>(&mut self, source: &S) -> Document {
        self.image_counter = 0;

        let mut document = Document::new(source.name());
        document.metadata = source.metadata().clone();
        document.title = document.metadata.title.clone().unwrap_or_default();

        for block in source.blocks() {
            match block {
                SourceBlock::Paragraph(paragraph) => {
                    self.extract_paragraph(source, paragraph, &mut document)
                }
                SourceBlock::Table(table) => document.add_block(Block::Table(table_block(table))),
            }
        }

        log::debug!(
            "Extracted {} blocks and {} images from {}",
            document.block_count(),
            self.image_counter,
            document.filename
        );
        document
    }

    fn extract_paragraph<S: SourceDocument + ?Sized>(
        &mut self,
        source: &S,
        paragraph: &SourceParagraph,
        document: &mut Document,
    ) {
        let text = paragraph.text();
        let image = self.first_image(source, paragraph);

        if text.trim().is_empty() && image.is_none() {
            return;
        }

        if !text.trim().is_empty() {
            let level = self
                .options
                .heading_detector
                .detect_paragraph(source, paragraph, &text);
            if level > 0 {
                document.add_block(Block::heading(level, text));
            } else {
                let runs = paragraph
                    .runs
                    .iter()
                    .filter(|run| !run.text.is_empty())
                    .map(model_run)
                    .collect();
                document.add_block(Block::Paragraph(Paragraph::new(text, runs)));
            }
        }

        if let Some(image) = image {
            document.add_block(Block::Image(image));
        }
    }

    /// The first image of the paragraph whose bytes can be read.
    fn first_image<S: SourceDocument + ?Sized>(
        &mut self,
        source: &S,
        paragraph: &SourceParagraph,
    ) -> Option<Image> {
        for image_ref in &paragraph.images {
            let content = match source.image_content(image_ref) {
                Ok(content) => content,
                Err(e) => {
                    log::warn!("Skipping image {}: {}", image_ref.display_path(), e);
                    continue;
                }
            };

            self.image_counter += 1;
            let extension = self.extension_for(&content);
            let file_name = format!("document.{:03}.{}", self.image_counter, extension);
            log::debug!("Image {} -> {}", image_ref.display_path(), file_name);

            let image = Image::new(image_ref.display_path(), content, file_name)
                .with_alt_text(image_ref.alt_text.clone().unwrap_or_default())
                .with_extent_emu(image_ref.width_emu, image_ref.height_emu);
            return Some(image);
        }
        None
    }

    fn extension_for(&self, content: &[u8]) -> &'static str {
        match self.options.image_extension {
            ImageExtension::Png => "png",
            ImageExtension::Detected => Image::detect_mime_type(content)
                .and_then(Image::extension_for)
                .unwrap_or("png"),
        }
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract a document with default options.
pub fn extract<S: SourceDocument + ?Sized>(source: &S) -> Document {
    Extractor::new().extract(source)
}

/// Extract a document with custom options.
pub fn extract_with_options<S: SourceDocument + ?Sized>(
    source: &S,
    options: ExtractOptions,
) -> Document {
    Extractor::with_options(options).extract(source)
}

fn model_run(run: &SourceRun) -> Run {
    let style = RunStyle::new()
        .with_bold(run.bold)
        .with_italic(run.italic)
        .with_underline(run.underline)
        .with_strike(run.strike);
    Run::styled(run.text.clone(), style)
}

fn table_block(source: &SourceTable) -> Table {
    Table::from_rows(source.rows.clone())
}
