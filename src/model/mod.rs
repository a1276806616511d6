//! Document model types for converted Word content.
//!
//! This module defines the intermediate representation produced by the
//! structural extractor and consumed by the renderers: an ordered,
//! append-only sequence of headings, paragraphs, images and tables.

mod block;
mod document;
mod image;
mod paragraph;
mod table;

pub use block::Block;
pub use document::{Document, Metadata};
pub use image::Image;
pub use paragraph::{Paragraph, Run, RunStyle};
pub use table::{Alignment, Table};
