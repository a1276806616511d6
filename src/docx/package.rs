//! ZIP container access for Word packages.

use std::collections::HashMap;
use std::fs::File;
use std::io::{Cursor, Read, Seek};
use std::path::Path;

use zip::read::ZipArchive;

use crate::error::{Error, Result};

/// Main document part.
pub const DOCUMENT_PART: &str = "word/document.xml";
/// Style definitions part.
pub const STYLES_PART: &str = "word/styles.xml";
/// Main document relationships part.
pub const DOCUMENT_RELS_PART: &str = "word/_rels/document.xml.rels";
/// Core properties part.
pub const CORE_PROPS_PART: &str = "docProps/core.xml";
/// Content types part.
pub const CONTENT_TYPES_PART: &str = "[Content_Types].xml";

/// Upper bound on the buffer reserved from a part's declared size.
const MAX_PREALLOCATION: u64 = 1024 * 1024;

/// An unpacked Word package: every part keyed by its path.
#[derive(Debug, Default)]
pub struct DocxPackage {
    parts: HashMap<String, Vec<u8>>,
}

impl DocxPackage {
    /// Open and unpack a package from a file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Unpack a package from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_reader(Cursor::new(data))
    }

    /// Unpack a package from any seekable reader.
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        let mut archive = ZipArchive::new(reader)
            .map_err(|e| Error::MalformedSource(format!("not a ZIP container: {}", e)))?;
        let mut parts = HashMap::with_capacity(archive.len());

        for i in 0..archive.len() {
            let mut entry = archive
                .by_index(i)
                .map_err(|e| Error::MalformedSource(format!("unreadable ZIP entry: {}", e)))?;
            let name = entry.name().to_string();

            if name.ends_with('/') {
                continue;
            }

            let mut contents = Vec::with_capacity(initial_capacity(entry.size()));
            entry
                .read_to_end(&mut contents)
                .map_err(|e| Error::MalformedSource(format!("unreadable part {}: {}", name, e)))?;
            parts.insert(name, contents);
        }

        log::debug!("Unpacked {} package parts", parts.len());
        Ok(Self { parts })
    }

    /// Get a part's contents by path.
    pub fn get(&self, path: &str) -> Option<&[u8]> {
        self.parts.get(path).map(|v| v.as_slice())
    }

    /// Check if a part exists.
    pub fn contains(&self, path: &str) -> bool {
        self.parts.contains_key(path)
    }

    /// The main document part; its absence makes the package unusable.
    pub fn document_xml(&self) -> Result<&[u8]> {
        self.get(DOCUMENT_PART)
            .ok_or_else(|| Error::MalformedSource(format!("missing part {}", DOCUMENT_PART)))
    }

    /// Part paths in sorted order.
    pub fn part_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.parts.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Number of parts.
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Check if the package has no parts.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

/// Pre-allocation for a part; the declared size is untrusted.
fn initial_capacity(declared: u64) -> usize {
    declared.min(MAX_PREALLOCATION) as usize
}
