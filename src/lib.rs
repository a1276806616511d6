//! # undocx
//!
//! Word document (DOCX) to Markdown conversion library for Rust.
//!
//! This library reads Word packages, recovers their structure (headings,
//! paragraphs with inline formatting, tables and embedded images) and
//! renders it as heading-indented Markdown with an image manifest.
//!
//! ## Quick Start
//!
//! ```no_run
//! use undocx::{parse_file, render};
//!
//! fn main() -> undocx::Result<()> {
//!     // Parse a Word document
//!     let doc = parse_file("report.docx")?;
//!
//!     // Convert to Markdown
//!     let options = render::RenderOptions::default().with_base_name("report");
//!     let markdown = render::to_markdown(&doc, &options)?;
//!     println!("{}", markdown);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Heading recovery**: paragraph styles, then bold/short-line heuristics
//! - **Inline formatting**: bold, italic, underline and strikethrough runs
//! - **Tables**: pipe tables with per-column alignment
//! - **Images**: sequentially named media files linked from the Markdown
//! - **Bundles**: Markdown plus media folder, optionally zipped
//! - **Parallel processing**: Uses Rayon for batch conversion

pub mod bundle;
pub mod convert;
pub mod detect;
pub mod docx;
pub mod error;
pub mod extract;
pub mod model;
pub mod render;
pub mod source;

// Re-export commonly used types
pub use bundle::Bundle;
pub use convert::{
    ConvertOptions, ConvertResult, ConverterRegistry, DocumentConverter, DocxConverter,
    OutputFormat,
};
pub use detect::{detect_format_from_bytes, detect_format_from_path, is_docx, DocxFormat};
pub use docx::{DocxSource, ErrorMode, ParseOptions};
pub use error::{Error, Result};
pub use extract::{ExtractOptions, Extractor, HeadingDetector, HeadingRule, ImageExtension};
pub use model::{Alignment, Block, Document, Image, Metadata, Paragraph, Run, RunStyle, Table};
pub use render::{ExtractionStats, JsonFormat, MarkdownRenderer, RenderOptions, RenderResult};
pub use source::{MemorySource, SourceDocument};

use std::io::{Read, Seek};
use std::path::{Path, PathBuf};

/// Parse a Word file and return a structured document.
///
/// # Arguments
///
/// * `path` - Path to the `.docx` file
///
/// # Example
///
/// ```no_run
/// use undocx::parse_file;
///
/// let doc = parse_file("report.docx").unwrap();
/// println!("Blocks: {}", doc.block_count());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    parse_file_with_options(path, ParseOptions::default())
}

/// Parse a Word file with custom reader options.
///
/// # Example
///
/// ```no_run
/// use undocx::{parse_file_with_options, ParseOptions};
///
/// let options = ParseOptions::new().strict().text_only();
/// let doc = parse_file_with_options("report.docx", options).unwrap();
/// ```
pub fn parse_file_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Document> {
    let source = DocxSource::open_with_options(path, options)?;
    Ok(extract::extract(&source))
}

/// Parse a Word document from bytes.
///
/// # Example
///
/// ```no_run
/// use undocx::parse_bytes;
///
/// let data = std::fs::read("report.docx").unwrap();
/// let doc = parse_bytes(&data).unwrap();
/// ```
pub fn parse_bytes(data: &[u8]) -> Result<Document> {
    parse_bytes_with_options(data, ParseOptions::default())
}

/// Parse a Word document from bytes with custom reader options.
pub fn parse_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Document> {
    let source = DocxSource::from_bytes_with_options(data, options)?;
    Ok(extract::extract(&source))
}

/// Parse a Word document from a seekable reader.
pub fn parse_reader<R: Read + Seek>(reader: R) -> Result<Document> {
    let source = DocxSource::from_reader(reader, ParseOptions::default())?;
    Ok(extract::extract(&source))
}

/// Extract plain text from a Word file.
pub fn extract_text<P: AsRef<Path>>(path: P) -> Result<String> {
    let doc = parse_file(path)?;
    Ok(doc.plain_text())
}

/// Convert a Word file to Markdown.
///
/// Image links point into `<stem>_media/`, where `<stem>` is the input
/// file name without its extension.
///
/// # Example
///
/// ```no_run
/// use undocx::to_markdown;
///
/// let markdown = to_markdown("report.docx").unwrap();
/// std::fs::write("report.md", markdown).unwrap();
/// ```
pub fn to_markdown<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    let doc = parse_file(path)?;
    let options = RenderOptions::default().with_base_name(file_stem(path));
    render::to_markdown(&doc, &options)
}

/// Convert a Word file to Markdown with custom render options.
///
/// Without a base name in `options`, image links point into `<stem>_media/`
/// as with [`to_markdown`].
pub fn to_markdown_with_options<P: AsRef<Path>>(
    path: P,
    options: &RenderOptions,
) -> Result<String> {
    let path = path.as_ref();
    let doc = parse_file(path)?;
    if options.base_name.is_some() {
        return render::to_markdown(&doc, options);
    }
    let options = options.clone().with_base_name(file_stem(path));
    render::to_markdown(&doc, &options)
}

/// Convert a Word file to JSON.
///
/// # Example
///
/// ```no_run
/// use undocx::{to_json, JsonFormat};
///
/// let json = to_json("report.docx", JsonFormat::Pretty).unwrap();
/// std::fs::write("report.json", json).unwrap();
/// ```
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let doc = parse_file(path)?;
    render::to_json(&doc, format)
}

/// Convert a Word file into a Markdown bundle and a ZIP archive of it.
///
/// Writes `<output_dir>/<stem>.md`, `<output_dir>/<stem>_media/*` and
/// `<output_dir>/<stem>.zip`, and returns the archive path.
///
/// # Example
///
/// ```no_run
/// use undocx::convert_to_zip;
///
/// let archive = convert_to_zip("report.docx", "out").unwrap();
/// println!("{}", archive.display());
/// ```
pub fn convert_to_zip<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output_dir: Q) -> Result<PathBuf> {
    let input = input.as_ref();
    let output_dir = output_dir.as_ref();
    let stem = file_stem(input);

    let result = Undocx::new().with_base_name(stem.clone()).parse(input)?.render()?;
    let bundle = Bundle::new(stem.clone(), &result);
    bundle.write_dir(output_dir)?;

    let archive_path = output_dir.join(format!("{}.zip", stem));
    bundle.write_zip_file(&archive_path)?;
    log::debug!("Wrote {}", archive_path.display());
    Ok(archive_path)
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| render::DEFAULT_BASE_NAME.to_string())
}

/// Builder for parsing and converting Word documents.
///
/// # Example
///
/// ```no_run
/// use undocx::Undocx;
///
/// let markdown = Undocx::new()
///     .with_base_name("report")
///     .with_frontmatter()
///     .style_headings_only()
///     .parse("report.docx")?
///     .to_markdown()?;
/// # Ok::<(), undocx::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Undocx {
    parse_options: ParseOptions,
    extract_options: ExtractOptions,
    render_options: RenderOptions,
}

impl Undocx {
    /// Create a new Undocx builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail on unparsable optional parts instead of skipping them.
    pub fn strict(mut self) -> Self {
        self.parse_options = self.parse_options.strict();
        self
    }

    /// Enable lenient parsing mode.
    pub fn lenient(mut self) -> Self {
        self.parse_options = self.parse_options.lenient();
        self
    }

    /// Extract text only (no images).
    pub fn text_only(mut self) -> Self {
        self.parse_options = self.parse_options.text_only();
        self
    }

    /// Enable or disable image extraction.
    pub fn with_images(mut self, extract: bool) -> Self {
        self.parse_options = self.parse_options.with_images(extract);
        self
    }

    /// Name image files by their detected format instead of `.png`.
    pub fn detect_image_format(mut self) -> Self {
        self.extract_options = self.extract_options.detect_image_format();
        self
    }

    /// Only detect headings from paragraph styles.
    pub fn style_headings_only(mut self) -> Self {
        self.extract_options = self.extract_options.style_headings_only();
        self
    }

    /// Set the output base name (and so the media folder name).
    pub fn with_base_name(mut self, base_name: impl Into<String>) -> Self {
        self.render_options = self.render_options.with_base_name(base_name);
        self
    }

    /// Enable frontmatter in output.
    pub fn with_frontmatter(mut self) -> Self {
        self.render_options = self.render_options.with_frontmatter(true);
        self
    }

    /// Parse a Word file and return a result wrapper.
    pub fn parse<P: AsRef<Path>>(self, path: P) -> Result<UndocxResult> {
        let source = DocxSource::open_with_options(path, self.parse_options)?;
        let document = Extractor::with_options(self.extract_options).extract(&source);
        Ok(UndocxResult {
            document,
            render_options: self.render_options,
        })
    }

    /// Parse a Word document from bytes.
    pub fn parse_bytes(self, data: &[u8]) -> Result<UndocxResult> {
        let source = DocxSource::from_bytes_with_options(data, self.parse_options)?;
        let document = Extractor::with_options(self.extract_options).extract(&source);
        Ok(UndocxResult {
            document,
            render_options: self.render_options,
        })
    }
}

/// Result of parsing a Word document.
#[derive(Debug, Clone)]
pub struct UndocxResult {
    /// The extracted document
    pub document: Document,
    /// Render options to use
    render_options: RenderOptions,
}

impl UndocxResult {
    /// Render Markdown together with the image manifest.
    pub fn render(&self) -> Result<RenderResult> {
        render::render_document(&self.document, &self.render_options)
    }

    /// Convert to Markdown.
    pub fn to_markdown(&self) -> Result<String> {
        render::to_markdown(&self.document, &self.render_options)
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, format)
    }

    /// Write the Markdown file and media folder into `dir`.
    pub fn write_bundle<P: AsRef<Path>>(&self, dir: P) -> Result<PathBuf> {
        let result = self.render()?;
        Bundle::new(self.render_options.base_name(), &result).write_dir(dir)
    }

    /// Get plain text.
    pub fn plain_text(&self) -> String {
        self.document.plain_text()
    }

    /// Get the document.
    pub fn document(&self) -> &Document {
        &self.document
    }
}
