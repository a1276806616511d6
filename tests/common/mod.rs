//! In-memory Word package fixtures shared by the integration tests.

#![allow(dead_code)]

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const R_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const IMAGE_REL: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";

/// Smallest valid PNG header, enough for type sniffing.
pub const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];
/// JPEG start-of-image marker.
pub const JPEG_BYTES: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0, 0x10];

/// Builds a `.docx` package from body XML snippets.
#[derive(Default)]
pub struct DocxFixture {
    body: Vec<String>,
    styles: Vec<(String, String)>,
    relationships: Vec<(String, String, bool)>,
    parts: Vec<(String, Vec<u8>)>,
    core: Option<String>,
    raw_styles: Option<String>,
}

impl DocxFixture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append raw body XML.
    pub fn xml(mut self, xml: impl Into<String>) -> Self {
        self.body.push(xml.into());
        self
    }

    /// Append a paragraph with one plain run.
    pub fn paragraph(self, text: &str) -> Self {
        self.xml(paragraph(None, &[run(text, "")]))
    }

    /// Append a styled paragraph with one plain run.
    pub fn styled(self, style_id: &str, text: &str) -> Self {
        self.xml(paragraph(Some(style_id), &[run(text, "")]))
    }

    /// Define a paragraph style.
    pub fn style(mut self, id: &str, name: &str) -> Self {
        self.styles.push((id.to_string(), name.to_string()));
        self
    }

    /// Replace `word/styles.xml` with raw content.
    pub fn raw_styles(mut self, xml: &str) -> Self {
        self.raw_styles = Some(xml.to_string());
        self
    }

    /// Add an image part with its relationship.
    pub fn image(mut self, rel_id: &str, name: &str, content: &[u8]) -> Self {
        self.relationships
            .push((rel_id.to_string(), format!("media/{}", name), false));
        self.parts
            .push((format!("word/media/{}", name), content.to_vec()));
        self
    }

    /// Add an image relationship without its part.
    pub fn dangling_image(mut self, rel_id: &str, name: &str) -> Self {
        self.relationships
            .push((rel_id.to_string(), format!("media/{}", name), false));
        self
    }

    /// Add an external image relationship.
    pub fn external_image(mut self, rel_id: &str, url: &str) -> Self {
        self.relationships
            .push((rel_id.to_string(), url.to_string(), true));
        self
    }

    /// Set `docProps/core.xml` from raw content.
    pub fn core(mut self, xml: &str) -> Self {
        self.core = Some(xml.to_string());
        self
    }

    /// Document XML as written into the package.
    pub fn document_xml(&self) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="{}" xmlns:r="{}" xmlns:wp="http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing" xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:pic="http://schemas.openxmlformats.org/drawingml/2006/picture" xmlns:mc="http://schemas.openxmlformats.org/markup-compatibility/2006" xmlns:v="urn:schemas-microsoft-com:vml"><w:body>{}<w:sectPr/></w:body></w:document>"#,
            W_NS,
            R_NS,
            self.body.concat()
        )
    }

    fn styles_xml(&self) -> String {
        if let Some(raw) = &self.raw_styles {
            return raw.clone();
        }
        let styles: String = self
            .styles
            .iter()
            .map(|(id, name)| {
                format!(
                    r#"<w:style w:type="paragraph" w:styleId="{}"><w:name w:val="{}"/></w:style>"#,
                    id, name
                )
            })
            .collect();
        format!(r#"<?xml version="1.0" encoding="UTF-8"?><w:styles xmlns:w="{}">{}</w:styles>"#, W_NS, styles)
    }

    fn rels_xml(&self) -> String {
        let rels: String = self
            .relationships
            .iter()
            .map(|(id, target, external)| {
                let mode = if *external { r#" TargetMode="External""# } else { "" };
                format!(
                    r#"<Relationship Id="{}" Type="{}" Target="{}"{}/>"#,
                    id, IMAGE_REL, target, mode
                )
            })
            .collect();
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{}</Relationships>"#,
            rels
        )
    }

    /// Package everything as `.docx` bytes.
    pub fn build(&self) -> Vec<u8> {
        let mut files: Vec<(String, Vec<u8>)> = vec![
            ("[Content_Types].xml".to_string(), content_types().into_bytes()),
            ("word/document.xml".to_string(), self.document_xml().into_bytes()),
            ("word/styles.xml".to_string(), self.styles_xml().into_bytes()),
            ("word/_rels/document.xml.rels".to_string(), self.rels_xml().into_bytes()),
        ];
        if let Some(core) = &self.core {
            files.push(("docProps/core.xml".to_string(), core.clone().into_bytes()));
        }
        files.extend(self.parts.iter().cloned());
        zip_bytes(&files)
    }

    /// Write the package to `<dir>/<name>` and return its path.
    pub fn write_to(&self, dir: &std::path::Path, name: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, self.build()).unwrap();
        path
    }
}

/// Zip arbitrary entries.
pub fn zip_bytes(files: &[(String, Vec<u8>)]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    for (name, content) in files {
        writer.start_file(name.as_str(), options).unwrap();
        writer.write_all(content).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

fn content_types() -> String {
    r#"<?xml version="1.0" encoding="UTF-8"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Default Extension="png" ContentType="image/png"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#
        .to_string()
}

/// `<w:p>` with an optional style and the given runs.
pub fn paragraph(style_id: Option<&str>, runs: &[String]) -> String {
    let props = style_id
        .map(|id| format!(r#"<w:pPr><w:pStyle w:val="{}"/></w:pPr>"#, id))
        .unwrap_or_default();
    format!("<w:p>{}{}</w:p>", props, runs.concat())
}

/// `<w:r>` with raw run properties (e.g. `<w:b/>`).
pub fn run(text: &str, props: &str) -> String {
    let props = if props.is_empty() {
        String::new()
    } else {
        format!("<w:rPr>{}</w:rPr>", props)
    };
    format!(r#"<w:r>{}<w:t xml:space="preserve">{}</w:t></w:r>"#, props, text)
}

/// Run holding an inline DrawingML picture.
pub fn drawing(rel_id: &str, descr: &str) -> String {
    format!(
        r#"<w:r><w:drawing><wp:inline><wp:extent cx="952500" cy="476250"/><wp:docPr id="1" name="Picture 1" descr="{}"/><a:graphic><a:graphicData><pic:pic><pic:blipFill><a:blip r:embed="{}"/></pic:blipFill></pic:pic></a:graphicData></a:graphic></wp:inline></w:drawing></w:r>"#,
        descr, rel_id
    )
}

/// `<w:tbl>` with one paragraph per cell.
pub fn table(rows: &[&[&str]]) -> String {
    let rows: String = rows
        .iter()
        .map(|row| {
            let cells: String = row
                .iter()
                .map(|cell| format!("<w:tc>{}</w:tc>", paragraph(None, &[run(cell, "")])))
                .collect();
            format!("<w:tr>{}</w:tr>", cells)
        })
        .collect();
    format!("<w:tbl><w:tblPr/>{}</w:tbl>", rows)
}

/// Minimal `docProps/core.xml`.
pub fn core_xml(title: &str, creator: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"><dc:title>{}</dc:title><dc:creator>{}</dc:creator><dcterms:created xsi:type="dcterms:W3CDTF">2024-03-01T09:30:00Z</dcterms:created></cp:coreProperties>"#,
        title, creator
    )
}
