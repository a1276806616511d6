//! Rendering module for converting documents to Markdown and JSON.

mod json;
mod markdown;
mod options;
mod result;

pub use json::{to_json, JsonFormat};
pub use markdown::{
    apply_text_style, escape_markdown, format_runs, render_document, to_markdown,
    to_markdown_with_stats, MarkdownRenderer,
};
pub use options::{RenderOptions, DEFAULT_BASE_NAME};
pub use result::{ExtractionStats, RenderResult};
