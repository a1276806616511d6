//! Integration tests for the converter module.

mod common;

use std::path::Path;
use std::sync::Arc;

use common::{drawing, paragraph, DocxFixture, PNG_BYTES};
use undocx::convert::{
    ConvertOptions, ConvertResult, ConverterRegistry, DocumentConverter, DocxConverter,
    OutputFormat,
};
use undocx::error::Result;
use undocx::render::ExtractionStats;

/// Mock converter for testing.
struct MockConverter {
    extensions: Vec<&'static str>,
    name: &'static str,
}

impl MockConverter {
    fn new(extensions: Vec<&'static str>, name: &'static str) -> Self {
        Self { extensions, name }
    }
}

impl DocumentConverter for MockConverter {
    fn supported_extensions(&self) -> &[&str] {
        &self.extensions
    }

    fn name(&self) -> &str {
        self.name
    }

    fn convert(&self, _path: &Path, _options: &ConvertOptions) -> Result<ConvertResult> {
        Ok(ConvertResult::new(
            format!("Converted by {}", self.name),
            Default::default(),
        ))
    }

    fn convert_bytes(&self, _bytes: &[u8], _options: &ConvertOptions) -> Result<ConvertResult> {
        Ok(ConvertResult::new(
            format!("Converted bytes by {}", self.name),
            Default::default(),
        ))
    }
}

#[test]
fn test_converter_registry_new() {
    let registry = ConverterRegistry::new();

    // Empty registry should support nothing
    assert!(!registry.supports("docx"));
    assert!(registry.supported_extensions().is_empty());
}

#[test]
fn test_converter_registry_register() {
    let mut registry = ConverterRegistry::new();
    registry.register(Arc::new(MockConverter::new(vec!["txt", "text"], "text")));

    assert!(registry.supports("txt"));
    assert!(registry.supports("text"));
    assert!(registry.supports("TXT")); // Case insensitive
}

#[test]
fn test_converter_registry_multiple_converters() {
    let mut registry = ConverterRegistry::new();

    registry.register(Arc::new(DocxConverter::new()));
    registry.register(Arc::new(MockConverter::new(vec!["odt"], "opendocument")));

    assert!(registry.supports("docx"));
    assert!(registry.supports("odt"));

    let converter = registry.get_by_name("opendocument");
    assert!(converter.is_some());
    assert!(converter.unwrap().supports_extension("ODT"));
}

#[test]
fn test_docx_converter_name() {
    let converter = DocxConverter::new();
    assert_eq!(converter.name(), "docx");
    assert_eq!(converter.supported_extensions(), &["docx", "docm", "dotx", "dotm"]);
}

#[test]
fn test_convert_result_methods() {
    let result = ConvertResult::new("- **Hello**".to_string(), Default::default());

    assert_eq!(result.content_len(), 11);
    assert!(result.stats.is_none());
    assert!(result.images.is_empty());
    assert_eq!(result.mime_type, "text/markdown");
}

#[test]
fn test_convert_result_with_stats() {
    let stats = ExtractionStats {
        heading_count: 2,
        paragraph_count: 20,
        ..Default::default()
    };

    let result = ConvertResult::new("content".to_string(), Default::default()).with_stats(stats);

    let stats = result.stats.unwrap();
    assert_eq!(stats.heading_count, 2);
    assert_eq!(stats.paragraph_count, 20);
}

#[test]
fn test_output_format_default() {
    assert_eq!(OutputFormat::default(), OutputFormat::Markdown);
}

#[test]
fn test_registry_convert_errors() {
    let registry = ConverterRegistry::with_defaults();
    let options = ConvertOptions::default();

    assert!(registry.convert(Path::new("noextension"), &options).is_err());
    assert!(registry.convert(Path::new("test.xyz"), &options).is_err());
    assert!(registry.convert_bytes(b"test", "xyz", &options).is_err());
}

#[test]
fn test_convert_bytes_markdown_with_stats() {
    let data = DocxFixture::new()
        .style("Heading1", "heading 1")
        .styled("Heading1", "Intro")
        .paragraph("Hello world")
        .image("rId5", "image1.png", PNG_BYTES)
        .xml(paragraph(None, &[drawing("rId5", "logo")]))
        .build();

    let registry = ConverterRegistry::with_defaults();
    let options = ConvertOptions::new().with_stats(true);
    let result = registry.convert_bytes(&data, "docx", &options).unwrap();

    assert_eq!(
        result.content,
        "- **Intro**\n\n\tHello world\n\n\t![logo](document_media/document.001.png)\n"
    );
    assert_eq!(result.media_dir.as_deref(), Some("document_media"));
    assert!(result.images.contains_key("document.001.png"));

    let stats = result.stats.unwrap();
    assert_eq!(stats.heading_count, 1);
    assert_eq!(stats.paragraph_count, 1);
    assert_eq!(stats.image_count, 1);
}

#[test]
fn test_convert_bytes_json() {
    let data = DocxFixture::new().paragraph("Hello").build();
    let options = ConvertOptions::new().with_format(OutputFormat::Json);
    let result = DocxConverter::new().convert_bytes(&data, &options).unwrap();

    assert_eq!(result.mime_type, "application/json");
    assert!(result.content.contains("\"paragraph\""));
    assert!(result.images.is_empty());
}

#[test]
fn test_convert_path_uses_file_stem() {
    let dir = tempfile::tempdir().unwrap();
    let path = DocxFixture::new()
        .image("rId5", "image1.png", PNG_BYTES)
        .xml(paragraph(None, &[drawing("rId5", "")]))
        .write_to(dir.path(), "minutes.docx");

    let result = ConverterRegistry::with_defaults()
        .convert(&path, &ConvertOptions::default())
        .unwrap();

    assert_eq!(result.content, "![image](minutes_media/document.001.png)\n");
    assert_eq!(result.base_name(), Some("minutes"));
}

#[test]
fn test_convert_many_keeps_order_and_isolates_failures() {
    let dir = tempfile::tempdir().unwrap();
    let mut paths = Vec::new();
    for i in 0..6 {
        let fixture = DocxFixture::new()
            .paragraph(&format!("Document {}", i))
            .image("rId5", "image1.png", PNG_BYTES)
            .xml(paragraph(None, &[drawing("rId5", "")]));
        paths.push(fixture.write_to(dir.path(), &format!("doc{}.docx", i)));
    }
    let broken = dir.path().join("broken.docx");
    std::fs::write(&broken, b"not a zip").unwrap();
    paths.insert(3, broken.clone());

    let results = ConverterRegistry::with_defaults().convert_many(&paths, &ConvertOptions::default());

    assert_eq!(results.len(), paths.len());
    for (i, (path, result)) in results.iter().enumerate() {
        assert_eq!(path, &paths[i]);
        if *path == broken {
            assert!(result.as_ref().unwrap_err().is_malformed_source());
            continue;
        }
        let result = result.as_ref().unwrap();
        // Each conversion numbers its own images from 001
        assert!(result.content.ends_with("_media/document.001.png)\n"));
        assert_eq!(result.images.len(), 1);
    }
}

#[test]
fn test_convert_result_bundle() {
    let dir = tempfile::tempdir().unwrap();
    let data = DocxFixture::new()
        .image("rId5", "image1.png", PNG_BYTES)
        .xml(paragraph(None, &[drawing("rId5", "")]))
        .build();
    let result = DocxConverter::new()
        .convert_bytes(&data, &ConvertOptions::default())
        .unwrap();

    let markdown_path = result.bundle("document").write_dir(dir.path()).unwrap();
    assert!(markdown_path.exists());
    assert!(dir.path().join("document_media/document.001.png").exists());
}
