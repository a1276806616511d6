//! JSON rendering of the document model.

use crate::error::{Error, Result};
use crate::model::Document;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a document to JSON. Image bytes are not included.
pub fn to_json(doc: &Document, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(doc),
        JsonFormat::Compact => serde_json::to_string(doc),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Block, Image, Paragraph};

    #[test]
    fn test_to_json_pretty() {
        let mut doc = Document::new("report.docx");
        doc.metadata.title = Some("Test".to_string());
        doc.add_block(Block::heading(1, "Intro"));
        doc.add_block(Block::Paragraph(Paragraph::with_text("Hello")));

        let json = to_json(&doc, JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"title\""));
        assert!(json.contains("\"heading\""));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_to_json_compact_skips_image_bytes() {
        let mut doc = Document::new("a.docx");
        doc.add_block(Block::Image(Image::new("word/media/image1.png", vec![7; 64], "document.001.png")));

        let json = to_json(&doc, JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));
        assert!(json.contains("document.001.png"));
        assert!(!json.contains("\"content\""));
    }
}
