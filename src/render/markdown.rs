//! Markdown rendering for converted documents.
//!
//! Headings become bold list items (`- **text**`) indented with one tab
//! per level below 1, and every other block is indented to the level of
//! the most recent heading.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::Result;
use crate::model::{Block, Document, Image, Paragraph, Run, RunStyle, Table};

use super::{ExtractionStats, RenderOptions, RenderResult};

/// Characters escaped in unformatted runs.
const MARKDOWN_SPECIAL: &[char] = &['*', '_', '#', '`', '[', ']', '(', ')'];

/// Convert a document to Markdown.
pub fn to_markdown(doc: &Document, options: &RenderOptions) -> Result<String> {
    let mut renderer = MarkdownRenderer::new(options.clone());
    Ok(renderer.render(doc)?.markdown)
}

/// Render a document to Markdown plus its image manifest.
pub fn render_document(doc: &Document, options: &RenderOptions) -> Result<RenderResult> {
    MarkdownRenderer::new(options.clone()).render(doc)
}

/// Convert a document to Markdown with statistics.
pub fn to_markdown_with_stats(doc: &Document, options: &RenderOptions) -> Result<RenderResult> {
    let options = options.clone().with_stats(true);
    MarkdownRenderer::new(options).render(doc)
}

/// Markdown renderer.
///
/// Holds the heading level that drives indentation; each call to
/// [`MarkdownRenderer::render`] starts again from level 0.
pub struct MarkdownRenderer {
    options: RenderOptions,
    current_heading_level: u8,
    stats: ExtractionStats,
}

impl MarkdownRenderer {
    /// Create a new Markdown renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            current_heading_level: 0,
            stats: ExtractionStats::new(),
        }
    }

    /// Render a document to Markdown and collect its images.
    pub fn render(&mut self, doc: &Document) -> Result<RenderResult> {
        self.current_heading_level = 0;
        self.stats = ExtractionStats::new();

        let media_dir = self.options.media_dir();
        let mut output = String::new();
        let mut images = BTreeMap::new();

        if self.options.include_frontmatter {
            output.push_str(&doc.metadata.to_yaml_frontmatter());
            output.push('\n');
        }

        for block in doc.blocks() {
            self.render_block(&mut output, &mut images, &media_dir, block);
        }

        let mut markdown = output.trim_end_matches('\n').to_string();
        if !markdown.is_empty() {
            markdown.push('\n');
        }

        if self.options.collect_stats {
            self.stats.count_text(&markdown);
        }

        Ok(RenderResult {
            markdown,
            images,
            media_dir,
            metadata: doc.metadata.clone(),
            stats: std::mem::take(&mut self.stats),
        })
    }

    /// Heading level the next block would be indented to.
    pub fn current_heading_level(&self) -> u8 {
        self.current_heading_level
    }

    fn indent(&self) -> String {
        "\t".repeat(self.current_heading_level as usize)
    }

    fn render_block(
        &mut self,
        output: &mut String,
        images: &mut BTreeMap<String, Vec<u8>>,
        media_dir: &str,
        block: &Block,
    ) {
        match block {
            Block::Heading { level, text } => self.render_heading(output, *level, text),
            Block::Paragraph(p) => self.render_paragraph(output, p),
            Block::Image(image) => {
                if self.options.collect_stats {
                    self.stats.add_image();
                }
                self.render_image(output, media_dir, image);
                images.insert(image.file_name.clone(), image.content.clone());
            }
            Block::Table(table) => {
                if table.is_empty() || table.num_cols() == 0 {
                    return;
                }
                if self.options.collect_stats {
                    self.stats.add_table();
                }
                self.render_table(output, table);
            }
        }
    }

    fn render_heading(&mut self, output: &mut String, level: u8, text: &str) {
        if self.options.collect_stats {
            self.stats.add_heading();
        }
        self.current_heading_level = level;
        let indent = "\t".repeat(level.saturating_sub(1) as usize);
        output.push_str(&format!("{}- **{}**\n\n", indent, text));
    }

    fn render_paragraph(&mut self, output: &mut String, para: &Paragraph) {
        let content = if para.has_runs() {
            format_runs(&para.runs)
        } else {
            para.text.clone()
        };

        if content.is_empty() {
            output.push('\n');
            return;
        }

        if self.options.collect_stats {
            if is_list_content(&content) {
                self.stats.add_list_item();
            } else {
                self.stats.add_paragraph();
            }
        }

        output.push_str(&indent_lines(&content, &self.indent()));
        output.push_str("\n\n");
    }

    fn render_image(&self, output: &mut String, media_dir: &str, image: &Image) {
        output.push_str(&format!(
            "{}![{}]({}/{})\n\n",
            self.indent(),
            image.display_alt(),
            media_dir,
            image.file_name
        ));
    }

    fn render_table(&self, output: &mut String, table: &Table) {
        let indent = self.indent();
        let num_cols = table.num_cols();
        let mut lines = Vec::with_capacity(table.num_rows() + 1);

        for (i, row) in table.rows().iter().enumerate() {
            let cells: Vec<String> = (0..num_cols)
                .map(|col| row.get(col).map(|c| table_cell(c)).unwrap_or_default())
                .collect();
            lines.push(format!("| {} |", cells.join(" | ")));

            if i == 0 {
                let separators: Vec<&str> =
                    (0..num_cols).map(|col| table.alignment(col).separator()).collect();
                lines.push(format!("| {} |", separators.join(" | ")));
            }
        }

        for line in lines {
            output.push_str(&indent);
            output.push_str(&line);
            output.push('\n');
        }
        output.push('\n');
    }
}

/// Render runs in order, formatting each one independently.
pub fn format_runs(runs: &[Run]) -> String {
    runs.iter().map(format_run).collect()
}

fn format_run(run: &Run) -> String {
    if !run.has_formatting() {
        return if run.text.contains(MARKDOWN_SPECIAL) {
            escape_markdown(&run.text)
        } else {
            run.text.clone()
        };
    }

    if run.text.contains('\n') {
        // Keep markers from straddling line breaks
        run.text
            .split('\n')
            .map(|line| {
                if line.is_empty() {
                    String::new()
                } else {
                    apply_text_style(line, &run.style)
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    } else {
        apply_text_style(&run.text, &run.style)
    }
}

/// Wrap text in style markers, strike innermost and bold outermost.
pub fn apply_text_style(text: &str, style: &RunStyle) -> String {
    let mut result = text.to_string();

    if style.strike {
        result = format!("~~{}~~", result);
    }
    if style.underline {
        result = format!("<u>{}</u>", result);
    }
    if style.italic {
        result = format!("*{}*", result);
    }
    if style.bold {
        result = format!("**{}**", result);
    }

    result
}

/// Escape Markdown-significant characters; backslashes first.
pub fn escape_markdown(text: &str) -> String {
    let mut result = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        if c == '\\' || MARKDOWN_SPECIAL.contains(&c) {
            result.push('\\');
        }
        result.push(c);
    }
    result
}

/// Prefix the content and each of its continuation lines with the indent.
fn indent_lines(content: &str, indent: &str) -> String {
    if indent.is_empty() {
        return content.to_string();
    }
    format!("{}{}", indent, content.replace('\n', &format!("\n{}", indent)))
}

fn table_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', "<br>")
}

fn is_list_content(content: &str) -> bool {
    static LIST_MARKER: OnceLock<Option<Regex>> = OnceLock::new();
    LIST_MARKER
        .get_or_init(|| Regex::new(r"^(- |\d+\. )").ok())
        .as_ref()
        .is_some_and(|re| re.is_match(content))
}
