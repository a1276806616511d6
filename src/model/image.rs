//! Embedded image type.

use serde::{Deserialize, Serialize};

/// EMUs per pixel at 96 DPI.
const EMU_PER_PIXEL: u64 = 9525;

/// An image extracted from the source document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    /// Internal package path of the image part (informational)
    pub source_path: String,

    /// Raw binary data
    #[serde(skip_serializing, default)]
    pub content: Vec<u8>,

    /// Generated output file name, unique within the document
    pub file_name: String,

    /// Alternative text (may be empty)
    pub alt_text: String,

    /// MIME type sniffed from the content, if recognized
    pub mime_type: Option<String>,

    /// Display width in pixels
    pub width: Option<u32>,

    /// Display height in pixels
    pub height: Option<u32>,
}

impl Image {
    /// Create a new image.
    pub fn new(
        source_path: impl Into<String>,
        content: Vec<u8>,
        file_name: impl Into<String>,
    ) -> Self {
        let mime_type = Self::detect_mime_type(&content).map(str::to_string);
        Self {
            source_path: source_path.into(),
            content,
            file_name: file_name.into(),
            alt_text: String::new(),
            mime_type,
            width: None,
            height: None,
        }
    }

    /// Set alternative text.
    pub fn with_alt_text(mut self, alt_text: impl Into<String>) -> Self {
        self.alt_text = alt_text.into();
        self
    }

    /// Set display dimensions from EMUs.
    pub fn with_extent_emu(mut self, width: Option<u64>, height: Option<u64>) -> Self {
        self.width = width.map(emu_to_pixels);
        self.height = height.map(emu_to_pixels);
        self
    }

    /// Get the size of the image data in bytes.
    pub fn size(&self) -> usize {
        self.content.len()
    }

    /// Alt text for rendering: "image" when empty.
    pub fn display_alt(&self) -> &str {
        if self.alt_text.is_empty() {
            "image"
        } else {
            &self.alt_text
        }
    }

    /// File extension for a MIME type.
    pub fn extension_for(mime_type: &str) -> Option<&'static str> {
        match mime_type {
            "image/jpeg" => Some("jpg"),
            "image/png" => Some("png"),
            "image/gif" => Some("gif"),
            "image/tiff" => Some("tiff"),
            "image/bmp" => Some("bmp"),
            "image/webp" => Some("webp"),
            "image/x-emf" => Some("emf"),
            "image/x-wmf" => Some("wmf"),
            _ => None,
        }
    }

    /// Detect MIME type from data magic bytes.
    pub fn detect_mime_type(data: &[u8]) -> Option<&'static str> {
        if data.len() < 4 {
            return None;
        }

        // JPEG: FF D8 FF
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Some("image/jpeg");
        }

        // PNG: 89 50 4E 47 0D 0A 1A 0A
        if data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
            return Some("image/png");
        }

        if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
            return Some("image/gif");
        }

        if data.starts_with(&[0x49, 0x49, 0x2A, 0x00])
            || data.starts_with(&[0x4D, 0x4D, 0x00, 0x2A])
        {
            return Some("image/tiff");
        }

        if data.starts_with(b"BM") {
            return Some("image/bmp");
        }

        if data.len() >= 12 && data.starts_with(b"RIFF") && &data[8..12] == b"WEBP" {
            return Some("image/webp");
        }

        // EMF: record type 1, " EMF" signature at offset 40
        if data.len() >= 44 && data.starts_with(&[0x01, 0x00, 0x00, 0x00]) && &data[40..44] == b" EMF"
        {
            return Some("image/x-emf");
        }

        // Placeable WMF
        if data.starts_with(&[0xD7, 0xCD, 0xC6, 0x9A]) {
            return Some("image/x-wmf");
        }

        None
    }
}

fn emu_to_pixels(emu: u64) -> u32 {
    u32::try_from(emu / EMU_PER_PIXEL).unwrap_or(u32::MAX)
}
