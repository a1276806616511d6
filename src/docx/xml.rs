//! Small helpers shared by the package part parsers.

use quick_xml::events::BytesStart;

/// Value of the first attribute with the given local name, ignoring prefixes.
pub(crate) fn attr(e: &BytesStart, local: &[u8]) -> Option<String> {
    e.attributes()
        .filter_map(|a| a.ok())
        .find(|a| a.key.local_name().as_ref() == local)
        .and_then(|a| a.unescape_value().ok().map(|v| v.into_owned()))
}

/// Value of an attribute matched by its full qualified name (e.g. `r:id`).
pub(crate) fn qualified_attr(e: &BytesStart, name: &[u8]) -> Option<String> {
    e.attributes()
        .filter_map(|a| a.ok())
        .find(|a| a.key.as_ref() == name)
        .and_then(|a| a.unescape_value().ok().map(|v| v.into_owned()))
}

/// Whether an on/off property is switched on.
///
/// A missing `w:val` means on.
pub(crate) fn toggle_on(e: &BytesStart) -> bool {
    match attr(e, b"val") {
        Some(v) => !matches!(v.as_str(), "0" | "false" | "off"),
        None => true,
    }
}
