//! Word package format detection and validation.

use crate::docx::CONTENT_TYPES_PART;
use crate::error::{Error, Result};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::fs::File;
use std::io::{Cursor, Read, Seek};
use std::path::Path;
use zip::ZipArchive;

/// ZIP local file header magic: PK\x03\x04
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

/// Main document part name as listed in `[Content_Types].xml`.
const MAIN_PART_NAME: &str = "/word/document.xml";

/// Kind of Word package.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocxFormat {
    /// Word document (.docx)
    Document,
    /// Word template (.dotx)
    Template,
    /// Macro-enabled document (.docm)
    MacroEnabledDocument,
    /// Macro-enabled template (.dotm)
    MacroEnabledTemplate,
}

impl DocxFormat {
    /// Classify a main document part content type.
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        match content_type {
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml" => {
                Some(DocxFormat::Document)
            }
            "application/vnd.openxmlformats-officedocument.wordprocessingml.template.main+xml" => {
                Some(DocxFormat::Template)
            }
            "application/vnd.ms-word.document.macroEnabled.main+xml" => {
                Some(DocxFormat::MacroEnabledDocument)
            }
            "application/vnd.ms-word.template.macroEnabledTemplate.main+xml" => {
                Some(DocxFormat::MacroEnabledTemplate)
            }
            _ => None,
        }
    }

    /// Conventional file extension.
    pub fn extension(&self) -> &'static str {
        match self {
            DocxFormat::Document => "docx",
            DocxFormat::Template => "dotx",
            DocxFormat::MacroEnabledDocument => "docm",
            DocxFormat::MacroEnabledTemplate => "dotm",
        }
    }
}

impl std::fmt::Display for DocxFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DocxFormat::Document => "Word document",
            DocxFormat::Template => "Word template",
            DocxFormat::MacroEnabledDocument => "Word macro-enabled document",
            DocxFormat::MacroEnabledTemplate => "Word macro-enabled template",
        };
        write!(f, "{} (.{})", name, self.extension())
    }
}

/// Detect the Word package format of a file.
///
/// # Example
/// ```no_run
/// use undocx::detect::detect_format_from_path;
///
/// let format = detect_format_from_path("report.docx").unwrap();
/// println!("{}", format);
/// ```
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<DocxFormat> {
    let file = File::open(path)?;
    detect_format_from_reader(file)
}

/// Detect the Word package format of in-memory bytes.
pub fn detect_format_from_bytes(data: &[u8]) -> Result<DocxFormat> {
    if !data.starts_with(ZIP_MAGIC) {
        return Err(Error::UnknownFormat);
    }
    detect_format_from_reader(Cursor::new(data))
}

fn detect_format_from_reader<R: Read + Seek>(reader: R) -> Result<DocxFormat> {
    let mut archive = ZipArchive::new(reader).map_err(|_| Error::UnknownFormat)?;
    let mut xml = Vec::new();
    archive
        .by_name(CONTENT_TYPES_PART)
        .map_err(|_| Error::UnknownFormat)?
        .read_to_end(&mut xml)?;

    main_part_content_type(&xml)?
        .as_deref()
        .and_then(DocxFormat::from_content_type)
        .ok_or(Error::UnknownFormat)
}

/// Content type declared for the main document part.
fn main_part_content_type(xml: &[u8]) -> Result<Option<String>> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                if e.local_name().as_ref() == b"Override" =>
            {
                let mut part_name = None;
                let mut content_type = None;
                for attr in e.attributes().filter_map(|a| a.ok()) {
                    let value = attr.unescape_value().ok().map(|v| v.into_owned());
                    match attr.key.as_ref() {
                        b"PartName" => part_name = value,
                        b"ContentType" => content_type = value,
                        _ => {}
                    }
                }
                if part_name.as_deref() == Some(MAIN_PART_NAME) {
                    return Ok(content_type);
                }
            }
            Ok(Event::Eof) => return Ok(None),
            Err(_) => return Err(Error::UnknownFormat),
            _ => {}
        }
        buf.clear();
    }
}

/// Check if a file is a Word package.
pub fn is_docx<P: AsRef<Path>>(path: P) -> bool {
    detect_format_from_path(path).is_ok()
}

/// Check if bytes are a Word package.
pub fn is_docx_bytes(data: &[u8]) -> bool {
    detect_format_from_bytes(data).is_ok()
}
