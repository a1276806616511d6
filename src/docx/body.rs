//! Main document part (`word/document.xml`) to source blocks.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::relationships::Relationships;
use super::styles::StyleSheet;
use super::xml::{attr, qualified_attr, toggle_on};
use crate::error::Result;
use crate::source::{ImageRef, SourceBlock, SourceParagraph, SourceRun, SourceTable};

/// Elements whose content is never read: text boxes, the fallback
/// branch of alternate content and tracked property revisions.
const SKIPPED: &[&[u8]] = &[b"txbxContent", b"Fallback", b"rPrChange", b"pPrChange"];

/// Streaming reader for the document body.
pub struct BodyParser<'a> {
    styles: &'a StyleSheet,
    rels: &'a Relationships,
    extract_images: bool,

    blocks: Vec<SourceBlock>,
    in_body: bool,
    skip_depth: usize,
    paragraph: Option<SourceParagraph>,
    run: Option<SourceRun>,
    in_text: bool,
    drawing: Option<ImageRef>,
    table: Option<TableBuilder>,
    table_depth: usize,
}

#[derive(Debug, Default)]
struct TableBuilder {
    rows: Vec<Vec<String>>,
    row: Option<Vec<String>>,
    cell: Option<Vec<String>>,
}

impl<'a> BodyParser<'a> {
    /// Create a parser resolving styles and image relationships.
    pub fn new(styles: &'a StyleSheet, rels: &'a Relationships) -> Self {
        Self {
            styles,
            rels,
            extract_images: true,
            blocks: Vec::new(),
            in_body: false,
            skip_depth: 0,
            paragraph: None,
            run: None,
            in_text: false,
            drawing: None,
            table: None,
            table_depth: 0,
        }
    }

    /// Enable or disable collection of image references.
    pub fn with_images(mut self, extract: bool) -> Self {
        self.extract_images = extract;
        self
    }

    /// Parse the document part into top-level blocks.
    pub fn parse(mut self, xml: &[u8]) -> Result<Vec<SourceBlock>> {
        let mut reader = Reader::from_reader(xml);
        // Whitespace inside w:t is content
        reader.config_mut().trim_text(false);

        let mut buf = Vec::new();
        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(ref e) => self.open(e),
                Event::Empty(ref e) => {
                    self.open(e);
                    self.close(e.local_name().as_ref());
                }
                Event::End(ref e) => self.close(e.local_name().as_ref()),
                Event::Text(ref e) => {
                    if self.capturing_text() {
                        let text = e.unescape()?;
                        self.push_text(&text);
                    }
                }
                Event::CData(ref e) => {
                    if self.capturing_text() {
                        let text = String::from_utf8_lossy(e).into_owned();
                        self.push_text(&text);
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        log::debug!("Read {} top-level blocks", self.blocks.len());
        Ok(self.blocks)
    }

    fn capturing_text(&self) -> bool {
        self.in_text && self.skip_depth == 0
    }

    fn push_text(&mut self, text: &str) {
        if let Some(run) = self.run.as_mut() {
            run.text.push_str(text);
        }
    }

    fn in_plain_run(&self) -> bool {
        self.run.is_some() && self.drawing.is_none()
    }

    fn open(&mut self, e: &BytesStart) {
        let name = e.local_name();
        let name = name.as_ref();

        if is_skipped(name) {
            self.skip_depth += 1;
            return;
        }
        if self.skip_depth > 0 {
            return;
        }

        match name {
            b"body" => self.in_body = true,
            b"tbl" if self.in_body => {
                self.table_depth += 1;
                if self.table_depth == 1 {
                    self.table = Some(TableBuilder::default());
                }
            }
            b"tr" if self.table_depth == 1 => {
                if let Some(table) = self.table.as_mut() {
                    table.row = Some(Vec::new());
                }
            }
            b"tc" if self.table_depth == 1 => {
                if let Some(table) = self.table.as_mut() {
                    table.cell = Some(Vec::new());
                }
            }
            b"p" if self.in_body && self.paragraph.is_none() => {
                self.paragraph = Some(SourceParagraph::new());
            }
            b"pStyle" => {
                if let (Some(paragraph), Some(id)) = (self.paragraph.as_mut(), attr(e, b"val")) {
                    paragraph.style_name = Some(self.styles.display_name(&id));
                }
            }
            b"r" if self.paragraph.is_some() && self.run.is_none() => {
                self.run = Some(SourceRun::default());
            }
            b"t" if self.in_plain_run() => self.in_text = true,
            b"tab" if self.in_plain_run() => self.push_text("\t"),
            b"br" | b"cr" if self.in_plain_run() => self.push_text("\n"),
            b"b" | b"i" | b"u" | b"strike" | b"dstrike" | b"sz" if self.in_plain_run() => {
                if let Some(run) = self.run.as_mut() {
                    apply_run_property(run, name, e);
                }
            }
            b"drawing" if self.paragraph.is_some() => {
                self.drawing = Some(ImageRef::default());
            }
            b"extent" => {
                if let Some(image) = self.drawing.as_mut() {
                    if image.width_emu.is_none() {
                        image.width_emu = attr(e, b"cx").and_then(|v| v.parse().ok());
                        image.height_emu = attr(e, b"cy").and_then(|v| v.parse().ok());
                    }
                }
            }
            b"docPr" => {
                if let Some(image) = self.drawing.as_mut() {
                    image.alt_text = attr(e, b"descr");
                }
            }
            b"blip" => {
                if let Some(image) = self.drawing.as_mut() {
                    if image.rel_id.is_empty() {
                        image.rel_id = attr(e, b"embed").unwrap_or_default();
                    }
                }
            }
            b"imagedata" if self.paragraph.is_some() => {
                if let Some(rel_id) = qualified_attr(e, b"r:id").or_else(|| attr(e, b"id")) {
                    let mut image = ImageRef::new(rel_id);
                    image.alt_text = attr(e, b"title");
                    self.push_image(image);
                }
            }
            _ => {}
        }
    }

    fn close(&mut self, name: &[u8]) {
        if is_skipped(name) {
            self.skip_depth = self.skip_depth.saturating_sub(1);
            return;
        }
        if self.skip_depth > 0 {
            return;
        }

        match name {
            b"body" => self.in_body = false,
            b"t" => self.in_text = false,
            b"r" => {
                if let (Some(run), Some(paragraph)) = (self.run.take(), self.paragraph.as_mut()) {
                    paragraph.runs.push(run);
                }
            }
            b"drawing" => {
                if let Some(image) = self.drawing.take() {
                    if !image.rel_id.is_empty() {
                        self.push_image(image);
                    }
                }
            }
            b"p" => {
                if let Some(paragraph) = self.paragraph.take() {
                    self.finish_paragraph(paragraph);
                }
            }
            b"tc" if self.table_depth == 1 => {
                if let Some(table) = self.table.as_mut() {
                    if let (Some(cell), Some(row)) = (table.cell.take(), table.row.as_mut()) {
                        row.push(cell.join("\n"));
                    }
                }
            }
            b"tr" if self.table_depth == 1 => {
                if let Some(table) = self.table.as_mut() {
                    if let Some(row) = table.row.take() {
                        table.rows.push(row);
                    }
                }
            }
            b"tbl" if self.table_depth > 0 => {
                self.table_depth -= 1;
                if self.table_depth == 0 {
                    if let Some(table) = self.table.take() {
                        self.blocks
                            .push(SourceBlock::Table(SourceTable::new(table.rows)));
                    }
                }
            }
            _ => {}
        }
    }

    fn push_image(&mut self, mut image: ImageRef) {
        if !self.extract_images || self.table_depth > 0 {
            return;
        }
        image.target = self.rels.resolve(&image.rel_id);
        if image.target.is_none() {
            log::warn!("Image relationship {} does not resolve to a package part", image.rel_id);
        }
        if let Some(paragraph) = self.paragraph.as_mut() {
            paragraph.images.push(image);
        }
    }

    fn finish_paragraph(&mut self, paragraph: SourceParagraph) {
        if self.table_depth == 0 {
            self.blocks.push(SourceBlock::Paragraph(paragraph));
            return;
        }
        // Cell paragraphs, including those of nested tables, feed the open cell
        if let Some(cell) = self.table.as_mut().and_then(|t| t.cell.as_mut()) {
            cell.push(paragraph.text());
        }
    }
}

fn is_skipped(name: &[u8]) -> bool {
    SKIPPED.iter().any(|skipped| *skipped == name)
}

fn apply_run_property(run: &mut SourceRun, name: &[u8], e: &BytesStart) {
    match name {
        b"b" => run.bold = toggle_on(e),
        b"i" => run.italic = toggle_on(e),
        b"u" => run.underline = attr(e, b"val").as_deref() != Some("none"),
        b"strike" | b"dstrike" => run.strike |= toggle_on(e),
        b"sz" => {
            // Half-points
            run.font_size = attr(e, b"val")
                .and_then(|v| v.parse::<f32>().ok())
                .map(|half_points| half_points / 2.0);
        }
        _ => {}
    }
}
