//! Style definitions (`word/styles.xml`): style id to display name.

use std::collections::HashMap;

use quick_xml::events::Event;
use quick_xml::Reader;

use super::xml::attr;
use crate::error::Result;

/// Style ids mapped to their display names.
#[derive(Debug, Clone, Default)]
pub struct StyleSheet {
    names: HashMap<String, String>,
}

impl StyleSheet {
    /// Create an empty style sheet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `word/styles.xml`.
    pub fn parse(xml: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(true);

        let mut names = HashMap::new();
        let mut current_id: Option<String> = None;
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(ref e) if e.local_name().as_ref() == b"style" => {
                    current_id = attr(e, b"styleId");
                }
                Event::Empty(ref e) if e.local_name().as_ref() == b"name" => {
                    if let (Some(id), Some(name)) = (current_id.as_ref(), attr(e, b"val")) {
                        names.insert(id.clone(), ui_name(&name));
                    }
                }
                Event::End(ref e) if e.local_name().as_ref() == b"style" => {
                    current_id = None;
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        log::debug!("Parsed {} style definitions", names.len());
        Ok(Self { names })
    }

    /// Register a style.
    pub fn insert(&mut self, id: impl Into<String>, name: impl Into<String>) {
        self.names.insert(id.into(), name.into());
    }

    /// Display name of a style id; an undefined id is its own name.
    pub fn display_name(&self, id: &str) -> String {
        self.names
            .get(id)
            .cloned()
            .unwrap_or_else(|| id.to_string())
    }

    /// Number of styles.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if the sheet is empty.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Built-in styles are stored lower-case ("heading 1"); Word shows them capitalized.
fn ui_name(name: &str) -> String {
    let builtin = name.starts_with("heading ")
        || matches!(name, "title" | "subtitle" | "normal" | "caption");
    if !builtin {
        return name.to_string();
    }
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
