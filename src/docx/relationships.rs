//! Relationship parts (`_rels/*.rels`): id to target mapping.

use std::collections::HashMap;

use quick_xml::events::Event;
use quick_xml::Reader;

use super::xml::attr;
use crate::error::Result;

/// Image relationship type.
pub const TYPE_IMAGE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";

/// A single relationship.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    /// Target as written in the part
    pub target: String,
    /// Relationship type URI
    pub rel_type: String,
    /// Whether the target lives outside the package
    pub external: bool,
}

/// Parsed relationships of one source part.
#[derive(Debug, Clone, Default)]
pub struct Relationships {
    base_dir: String,
    map: HashMap<String, Relationship>,
}

impl Relationships {
    /// Empty relationships for a part in `base_dir` (e.g. "word").
    pub fn empty(base_dir: impl Into<String>) -> Self {
        Self {
            base_dir: base_dir.into(),
            map: HashMap::new(),
        }
    }

    /// Parse a `.rels` part whose source part lives in `base_dir`.
    pub fn parse(xml: &[u8], base_dir: impl Into<String>) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(true);

        let mut rels = Self::empty(base_dir);
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Empty(ref e) | Event::Start(ref e)
                    if e.local_name().as_ref() == b"Relationship" =>
                {
                    if let (Some(id), Some(target)) = (attr(e, b"Id"), attr(e, b"Target")) {
                        let relationship = Relationship {
                            target,
                            rel_type: attr(e, b"Type").unwrap_or_default(),
                            external: attr(e, b"TargetMode").as_deref() == Some("External"),
                        };
                        rels.map.insert(id, relationship);
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Ok(rels)
    }

    /// Look up a relationship by id.
    pub fn get(&self, id: &str) -> Option<&Relationship> {
        self.map.get(id)
    }

    /// Package path of an internal target; `None` for unknown or external ids.
    pub fn resolve(&self, id: &str) -> Option<String> {
        let rel = self.map.get(id)?;
        if rel.external {
            return None;
        }
        Some(resolve_target(&self.base_dir, &rel.target))
    }

    /// Number of relationships.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check if there are no relationships.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Resolve a relative target against a base directory into a package path.
pub fn resolve_target(base_dir: &str, target: &str) -> String {
    if let Some(absolute) = target.strip_prefix('/') {
        return absolute.to_string();
    }

    let mut segments: Vec<&str> = base_dir.split('/').filter(|s| !s.is_empty()).collect();
    for segment in target.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    segments.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    const RELS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
  <Relationship Id="rId5" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="media/image1.png"/>
  <Relationship Id="rId6" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="../media/shared.jpeg"/>
  <Relationship Id="rId7" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="/word/media/abs.gif"/>
  <Relationship Id="rId8" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink" Target="https://example.com" TargetMode="External"/>
</Relationships>"#;

    #[test]
    fn test_parse_relationships() {
        let rels = Relationships::parse(RELS.as_bytes(), "word").unwrap();
        assert_eq!(rels.len(), 5);
        assert_eq!(rels.get("rId5").unwrap().rel_type, TYPE_IMAGE);
        assert!(rels.get("rId8").unwrap().external);
    }

    #[test]
    fn test_resolve() {
        let rels = Relationships::parse(RELS.as_bytes(), "word").unwrap();
        assert_eq!(rels.resolve("rId5").as_deref(), Some("word/media/image1.png"));
        assert_eq!(rels.resolve("rId6").as_deref(), Some("media/shared.jpeg"));
        assert_eq!(rels.resolve("rId7").as_deref(), Some("word/media/abs.gif"));
        assert_eq!(rels.resolve("rId8"), None);
        assert_eq!(rels.resolve("rId99"), None);
    }

    #[test]
    fn test_resolve_target_dot_segments() {
        assert_eq!(resolve_target("word", "./media/a.png"), "word/media/a.png");
        assert_eq!(resolve_target("", "word/document.xml"), "word/document.xml");
    }
}
