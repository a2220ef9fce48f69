//! Data structures and marker constants shared across the reader.

use std::collections::HashMap;

use serde::Serialize;

/// Byte sequence that opens every embedded fragment (the XML declaration).
pub const XML_DECLARATION: &[u8] = b"<?xml";

/// Root element name of a TEG 6s export document.
///
/// Every fragment ends with the close tag of this element. The close
/// marker is derived from this constant so a future root name lives in
/// exactly one place.
pub const ROOT_ELEMENT: &str = "Cartridge";

/// The byte sequence whose final byte marks the end of a fragment.
///
/// This is the root element name followed by `>`, which matches the tail
/// of `</Cartridge>`. It equally matches a bare `<Cartridge>` open tag;
/// real exports always put attributes on the root open tag, so in
/// practice only the close tag hits.
pub fn close_marker() -> Vec<u8> {
    let mut marker = Vec::with_capacity(ROOT_ELEMENT.len() + 1);
    marker.extend_from_slice(ROOT_ELEMENT.as_bytes());
    marker.push(b'>');
    marker
}

/// Half-open byte range delimiting one candidate fragment in a container.
///
/// `start` points at the first byte of the XML declaration and `end` one
/// past the last byte of the root close tag, so `buffer[start..end]` is
/// the whole fragment. A well-formed container yields
/// `start < end <= buffer.len()`; the scanner pairs markers without
/// verifying this, and slicing checks it instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FragmentRange {
    pub start: usize,
    pub end: usize,
}

impl FragmentRange {
    /// Length of the fragment in bytes (zero for an inverted range).
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One parsed XML document, or a piece of one.
///
/// The shape follows the usual XML-to-mapping convention: element and
/// attribute names are keys, attribute keys carry an `@` prefix,
/// character data next to attributes or children lands under `#text`,
/// and repeated sibling elements collapse into an ordered list.
///
/// Serializes untagged, so a document dumps as plain nested JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum XmlValue {
    /// Element with no attributes, children, or text.
    Null,
    /// Character data of a leaf element, an attribute, or a `#text` entry.
    Text(String),
    /// Repeated sibling elements of one name, in document order.
    List(Vec<XmlValue>),
    /// Element with attributes and/or child elements.
    Map(HashMap<String, XmlValue>),
}

impl XmlValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            XmlValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&HashMap<String, XmlValue>> {
        match self {
            XmlValue::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[XmlValue]> {
        match self {
            XmlValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Look up a key in a `Map` value; `None` for any other variant.
    pub fn get(&self, key: &str) -> Option<&XmlValue> {
        self.as_map().and_then(|m| m.get(key))
    }
}
