//! Document converter module providing a plugin architecture for input formats.
//!
//! Converters are registered by file extension; the registry dispatches
//! conversions to them and can convert several files in parallel. Each
//! conversion builds its own extractor and renderer, so parallel runs
//! share no state.
//!
//! # Example
//!
//! ```no_run
//! use undocx::convert::{ConverterRegistry, ConvertOptions, DocxConverter};
//! use std::sync::Arc;
//! use std::path::Path;
//!
//! fn main() -> undocx::Result<()> {
//!     let mut registry = ConverterRegistry::new();
//!     registry.register(Arc::new(DocxConverter::new()));
//!
//!     let result = registry.convert(Path::new("report.docx"), &ConvertOptions::default())?;
//!     println!("{}", result.content);
//!     Ok(())
//! }
//! ```

mod docx;

pub use self::docx::DocxConverter;

use crate::bundle::Bundle;
use crate::docx::ParseOptions;
use crate::error::{Error, Result};
use crate::extract::ExtractOptions;
use crate::model::Metadata;
use crate::render::{ExtractionStats, RenderOptions};
use rayon::prelude::*;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Options for document conversion.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Reader options
    pub parse: ParseOptions,

    /// Structural extraction options
    pub extract: ExtractOptions,

    /// Rendering options
    pub render: RenderOptions,

    /// Output format
    pub output_format: OutputFormat,
}

impl ConvertOptions {
    /// Create new conversion options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set reader options.
    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parse = options;
        self
    }

    /// Set extraction options.
    pub fn with_extract_options(mut self, options: ExtractOptions) -> Self {
        self.extract = options;
        self
    }

    /// Set rendering options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render = options;
        self
    }

    /// Enable statistics collection.
    pub fn with_stats(mut self, collect: bool) -> Self {
        self.render.collect_stats = collect;
        self
    }

    /// Set output format.
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }
}

/// Output format for conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Markdown format
    #[default]
    Markdown,

    /// JSON structure
    Json,
}

/// Result of document conversion.
#[derive(Debug, Clone)]
pub struct ConvertResult {
    /// Converted content
    pub content: String,

    /// Source document metadata
    pub metadata: Metadata,

    /// Image manifest (Markdown output only)
    pub images: BTreeMap<String, Vec<u8>>,

    /// Media folder the Markdown links point into
    pub media_dir: Option<String>,

    /// Extraction statistics (if collected)
    pub stats: Option<ExtractionStats>,

    /// MIME type of the output
    pub mime_type: &'static str,
}

impl ConvertResult {
    /// Create a new conversion result.
    pub fn new(content: String, metadata: Metadata) -> Self {
        Self {
            content,
            metadata,
            images: BTreeMap::new(),
            media_dir: None,
            stats: None,
            mime_type: "text/markdown",
        }
    }

    /// Attach the image manifest and its media folder.
    pub fn with_images(
        mut self,
        images: BTreeMap<String, Vec<u8>>,
        media_dir: impl Into<String>,
    ) -> Self {
        self.images = images;
        self.media_dir = Some(media_dir.into());
        self
    }

    /// Set extraction statistics.
    pub fn with_stats(mut self, stats: ExtractionStats) -> Self {
        self.stats = Some(stats);
        self
    }

    /// Set MIME type.
    pub fn with_mime_type(mut self, mime_type: &'static str) -> Self {
        self.mime_type = mime_type;
        self
    }

    /// Get content length in bytes.
    pub fn content_len(&self) -> usize {
        self.content.len()
    }

    /// Output base name implied by the media folder (`<base>_media`).
    pub fn base_name(&self) -> Option<&str> {
        self.media_dir.as_deref().and_then(|dir| dir.strip_suffix("_media"))
    }

    /// Bundle the Markdown and its images under the given base name.
    pub fn bundle(&self, base_name: impl Into<String>) -> Bundle<'_> {
        Bundle::from_parts(base_name, &self.content, &self.images)
    }
}

/// Trait for document converters.
///
/// Implement this trait to add support for a new document format.
pub trait DocumentConverter: Send + Sync {
    /// Get the supported file extensions for this converter.
    ///
    /// Extensions should be lowercase without the leading dot (e.g., `["docx"]`).
    fn supported_extensions(&self) -> &[&str];

    /// Get the name of this converter.
    fn name(&self) -> &str;

    /// Convert a file at the given path.
    fn convert(&self, path: &Path, options: &ConvertOptions) -> Result<ConvertResult>;

    /// Convert from bytes.
    fn convert_bytes(&self, bytes: &[u8], options: &ConvertOptions) -> Result<ConvertResult>;

    /// Check if this converter supports the given extension.
    fn supports_extension(&self, ext: &str) -> bool {
        let ext_lower = ext.to_lowercase();
        self.supported_extensions().iter().any(|e| *e == ext_lower)
    }
}

/// Registry for document converters.
///
/// The registry maps file extensions to converters and provides
/// convenient methods for converting documents.
pub struct ConverterRegistry {
    converters: HashMap<String, Arc<dyn DocumentConverter>>,
    by_name: HashMap<String, Arc<dyn DocumentConverter>>,
}

impl ConverterRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            converters: HashMap::new(),
            by_name: HashMap::new(),
        }
    }

    /// Create a registry with default converters (Word).
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(DocxConverter::new()));
        registry
    }

    /// Register a converter.
    ///
    /// The converter will be registered for all its supported extensions.
    pub fn register(&mut self, converter: Arc<dyn DocumentConverter>) {
        for ext in converter.supported_extensions() {
            self.converters
                .insert(ext.to_lowercase(), converter.clone());
        }
        self.by_name
            .insert(converter.name().to_lowercase(), converter);
    }

    /// Get a converter by file extension.
    pub fn get_by_extension(&self, ext: &str) -> Option<Arc<dyn DocumentConverter>> {
        self.converters.get(&ext.to_lowercase()).cloned()
    }

    /// Get a converter by name.
    pub fn get_by_name(&self, name: &str) -> Option<Arc<dyn DocumentConverter>> {
        self.by_name.get(&name.to_lowercase()).cloned()
    }

    /// Check if an extension is supported.
    pub fn supports(&self, ext: &str) -> bool {
        self.converters.contains_key(&ext.to_lowercase())
    }

    /// Get all supported extensions, sorted.
    pub fn supported_extensions(&self) -> Vec<&str> {
        let mut extensions: Vec<&str> = self.converters.keys().map(|s| s.as_str()).collect();
        extensions.sort_unstable();
        extensions
    }

    /// Convert a file using the appropriate converter.
    pub fn convert(&self, path: &Path, options: &ConvertOptions) -> Result<ConvertResult> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| Error::Other("File has no extension".into()))?;

        let converter = self
            .get_by_extension(ext)
            .ok_or_else(|| Error::Other(format!("No converter for extension: {}", ext)))?;

        converter.convert(path, options)
    }

    /// Convert bytes using the specified extension to determine the converter.
    pub fn convert_bytes(
        &self,
        bytes: &[u8],
        ext: &str,
        options: &ConvertOptions,
    ) -> Result<ConvertResult> {
        let converter = self
            .get_by_extension(ext)
            .ok_or_else(|| Error::Other(format!("No converter for extension: {}", ext)))?;

        converter.convert_bytes(bytes, options)
    }

    /// Convert several files in parallel; results keep the input order.
    pub fn convert_many<P: AsRef<Path> + Sync>(
        &self,
        paths: &[P],
        options: &ConvertOptions,
    ) -> Vec<(PathBuf, Result<ConvertResult>)> {
        paths
            .par_iter()
            .map(|path| {
                let path = path.as_ref();
                (path.to_path_buf(), self.convert(path, options))
            })
            .collect()
    }
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
