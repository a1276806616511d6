//! Word package (DOCX) reader.
//!
//! Unpacks the ZIP container, resolves styles and relationships, and
//! streams `word/document.xml` into the block structure exposed through
//! [`SourceDocument`].

mod body;
mod core_props;
mod options;
mod package;
mod relationships;
mod styles;
mod xml;

pub use body::BodyParser;
pub use core_props::parse_core_properties;
pub use options::{ErrorMode, ParseOptions};
pub use package::{
    DocxPackage, CONTENT_TYPES_PART, CORE_PROPS_PART, DOCUMENT_PART, DOCUMENT_RELS_PART,
    STYLES_PART,
};
pub use relationships::{resolve_target, Relationship, Relationships, TYPE_IMAGE};
pub use styles::StyleSheet;

use std::io::{Read, Seek};
use std::path::Path;

use crate::error::{Error, Result};
use crate::model::Metadata;
use crate::source::{ImageRef, SourceBlock, SourceDocument};

/// Default name for documents read from memory.
const DEFAULT_NAME: &str = "document.docx";

/// A parsed Word document.
#[derive(Debug)]
pub struct DocxSource {
    name: String,
    package: DocxPackage,
    relationships: Relationships,
    metadata: Metadata,
    blocks: Vec<SourceBlock>,
}

impl DocxSource {
    /// Open a Word document from a file path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ParseOptions::default())
    }

    /// Open a Word document with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| DEFAULT_NAME.to_string());
        let package = DocxPackage::open(path)?;
        Self::from_package(package, name, &options)
    }

    /// Parse a Word document from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ParseOptions::default())
    }

    /// Parse a Word document from bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Self> {
        let package = DocxPackage::from_bytes(data)?;
        Self::from_package(package, DEFAULT_NAME, &options)
    }

    /// Parse a Word document from a seekable reader.
    pub fn from_reader<R: Read + Seek>(reader: R, options: ParseOptions) -> Result<Self> {
        let package = DocxPackage::from_reader(reader)?;
        Self::from_package(package, DEFAULT_NAME, &options)
    }

    /// Build the source from an unpacked package.
    pub fn from_package(
        package: DocxPackage,
        name: impl Into<String>,
        options: &ParseOptions,
    ) -> Result<Self> {
        let relationships = optional_part(&package, DOCUMENT_RELS_PART, options, |xml| {
            Relationships::parse(xml, "word")
        })?
        .unwrap_or_else(|| Relationships::empty("word"));

        let styles =
            optional_part(&package, STYLES_PART, options, StyleSheet::parse)?.unwrap_or_default();

        let metadata = optional_part(&package, CORE_PROPS_PART, options, parse_core_properties)?
            .unwrap_or_default();

        let blocks = BodyParser::new(&styles, &relationships)
            .with_images(options.extract_images)
            .parse(package.document_xml()?)?;

        Ok(Self {
            name: name.into(),
            package,
            relationships,
            metadata,
            blocks,
        })
    }

    /// Replace the document name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// The underlying package.
    pub fn package(&self) -> &DocxPackage {
        &self.package
    }

    /// Relationships of the main document part.
    pub fn relationships(&self) -> &Relationships {
        &self.relationships
    }
}

impl SourceDocument for DocxSource {
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
        let path = match image.target.clone() {
            Some(path) => path,
            None => self.relationships.resolve(&image.rel_id).ok_or_else(|| {
                Error::ImageExtract(format!("unresolved image relationship {}", image.rel_id))
            })?,
        };

        self.package
            .get(&path)
            .map(|bytes| bytes.to_vec())
            .ok_or_else(|| Error::ImageExtract(format!("missing image part {}", path)))
    }
}

/// Parse an optional part. In lenient mode an unreadable part is skipped.
fn optional_part<T>(
    package: &DocxPackage,
    part: &str,
    options: &ParseOptions,
    parse: impl FnOnce(&[u8]) -> Result<T>,
) -> Result<Option<T>> {
    let Some(bytes) = package.get(part) else {
        return Ok(None);
    };

    match parse(bytes) {
        Ok(value) => Ok(Some(value)),
        Err(e) if options.is_lenient() => {
            log::warn!("Skipping unreadable part {}: {}", part, e);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}
