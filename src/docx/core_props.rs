//! Core properties (`docProps/core.xml`).

use chrono::{DateTime, Utc};
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::Result;
use crate::model::Metadata;

/// Parse core properties into document metadata.
pub fn parse_core_properties(xml: &[u8]) -> Result<Metadata> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);

    let mut metadata = Metadata::default();
    let mut current: Option<Vec<u8>> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) => {
                current = Some(e.local_name().as_ref().to_vec());
            }
            Event::Text(ref e) => {
                if let Some(ref field) = current {
                    let value = e.unescape()?.into_owned();
                    apply_field(&mut metadata, field, value);
                }
            }
            Event::End(_) => current = None,
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(metadata)
}

fn apply_field(metadata: &mut Metadata, field: &[u8], value: String) {
    if value.is_empty() {
        return;
    }
    match field {
        b"title" => metadata.title = Some(value),
        b"subject" => metadata.subject = Some(value),
        b"creator" => metadata.creator = Some(value),
        b"keywords" => metadata.keywords = Some(value),
        b"description" => metadata.description = Some(value),
        b"lastModifiedBy" => metadata.last_modified_by = Some(value),
        b"created" => metadata.created = parse_date(&value),
        b"modified" => metadata.modified = parse_date(&value),
        _ => {}
    }
}

fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    match DateTime::parse_from_rfc3339(value) {
        Ok(date) => Some(date.with_timezone(&Utc)),
        Err(e) => {
            log::warn!("Ignoring unparsable core property date {:?}: {}", value, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    const CORE: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
  <dc:title>Annual Report</dc:title>
  <dc:creator>Jane &amp; John</dc:creator>
  <cp:keywords>finance</cp:keywords>
  <cp:lastModifiedBy>Editor</cp:lastModifiedBy>
  <dcterms:created xsi:type="dcterms:W3CDTF">2023-04-05T10:20:30Z</dcterms:created>
  <dcterms:modified xsi:type="dcterms:W3CDTF">not a date</dcterms:modified>
</cp:coreProperties>"#;

    #[test]
    fn test_parse_core_properties() {
        let metadata = parse_core_properties(CORE.as_bytes()).unwrap();
        assert_eq!(metadata.title.as_deref(), Some("Annual Report"));
        assert_eq!(metadata.creator.as_deref(), Some("Jane & John"));
        assert_eq!(metadata.keywords.as_deref(), Some("finance"));
        assert_eq!(metadata.last_modified_by.as_deref(), Some("Editor"));
        assert_eq!(metadata.subject, None);
        assert_eq!(metadata.created.map(|d| d.year()), Some(2023));
        assert_eq!(metadata.modified, None);
    }
}
