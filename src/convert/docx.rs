//! Word document converter implementation.

use crate::docx::DocxSource;
use crate::error::Result;
use crate::extract::Extractor;
use crate::render::{render_document, to_json, JsonFormat};
use crate::source::SourceDocument;
use std::path::Path;

use super::{ConvertOptions, ConvertResult, DocumentConverter, OutputFormat};

/// Word document converter.
///
/// Converts Word packages to heading-indented Markdown (with an image
/// manifest) or to the JSON document model.
#[derive(Debug, Clone, Default)]
pub struct DocxConverter {
    _private: (),
}

impl DocxConverter {
    /// Create a new Word converter.
    pub fn new() -> Self {
        Self { _private: () }
    }

    fn convert_source<S: SourceDocument>(
        &self,
        source: &S,
        options: &ConvertOptions,
    ) -> Result<ConvertResult> {
        let doc = Extractor::with_options(options.extract.clone()).extract(source);
        let metadata = doc.metadata.clone();

        match options.output_format {
            OutputFormat::Markdown => {
                let rendered = render_document(&doc, &options.render)?;
                let mut result = ConvertResult::new(rendered.markdown, metadata)
                    .with_images(rendered.images, rendered.media_dir)
                    .with_mime_type("text/markdown");
                if options.render.collect_stats {
                    result = result.with_stats(rendered.stats);
                }
                Ok(result)
            }
            OutputFormat::Json => {
                let content = to_json(&doc, JsonFormat::Pretty)?;
                Ok(ConvertResult::new(content, metadata).with_mime_type("application/json"))
            }
        }
    }
}

impl DocumentConverter for DocxConverter {
    fn supported_extensions(&self) -> &[&str] {
        &["docx", "docm", "dotx", "dotm"]
    }

    fn name(&self) -> &str {
        "docx"
    }

    fn convert(&self, path: &Path, options: &ConvertOptions) -> Result<ConvertResult> {
        let source = DocxSource::open_with_options(path, options.parse.clone())?;

        // Media folder follows the output name, which defaults to the input stem
        let mut options = options.clone();
        if options.render.base_name.is_none() {
            options.render.base_name = path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned());
        }
        self.convert_source(&source, &options)
    }

    fn convert_bytes(&self, bytes: &[u8], options: &ConvertOptions) -> Result<ConvertResult> {
        let source = DocxSource::from_bytes_with_options(bytes, options.parse.clone())?;
        self.convert_source(&source, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_docx_converter_extensions() {
        let converter = DocxConverter::new();
        assert!(converter.supports_extension("docx"));
        assert!(converter.supports_extension("DOCM"));
        assert!(!converter.supports_extension("doc"));
    }

    #[test]
    fn test_convert_bytes_rejects_garbage() {
        let converter = DocxConverter::new();
        let err = converter
            .convert_bytes(b"not a zip", &ConvertOptions::default())
            .unwrap_err();
        assert!(err.is_malformed_source());
    }
}
