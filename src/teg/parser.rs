//! Conversion of a sliced XML fragment into a nested key/value document.
//!
//! The mapping follows the common XML-to-dictionary convention:
//! attributes become `@`-prefixed keys, repeated sibling elements of one
//! name collapse into an ordered list, and character data that shares an
//! element with attributes or children lands under `#text`. A leaf
//! element with only character data becomes that text directly; a fully
//! empty element becomes null.

use std::collections::HashMap;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::error::{Result, TegError};
use super::models::XmlValue;

/// Key for character data inside an element that also has attributes or
/// children.
const TEXT_KEY: &str = "#text";

/// Prefix distinguishing attribute keys from child element keys.
const ATTR_PREFIX: char = '@';

/// An element whose close tag has not been seen yet.
struct Frame {
    name: String,
    children: HashMap<String, XmlValue>,
    text: String,
}

impl Frame {
    fn open(start: &BytesStart) -> Result<Self> {
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let mut children = HashMap::new();
        for attr in start.attributes() {
            let attr = attr.map_err(|e| {
                TegError::InvalidDocument(format!("malformed attribute in <{}>: {}", name, e))
            })?;
            let key = format!("{}{}", ATTR_PREFIX, String::from_utf8_lossy(attr.key.as_ref()));
            let value = attr.unescape_value().map_err(|e| {
                TegError::InvalidDocument(format!("undecodable attribute in <{}>: {}", name, e))
            })?;
            children.insert(key, XmlValue::Text(value.into_owned()));
        }
        Ok(Frame {
            name,
            children,
            text: String::new(),
        })
    }

    /// Attach a finished child element, collapsing repeated names into a
    /// list. A list under a key always means merged siblings, since a
    /// single element never finishes as one.
    fn insert_child(&mut self, name: String, value: XmlValue) {
        match self.children.get_mut(&name) {
            Some(XmlValue::List(items)) => items.push(value),
            Some(existing) => {
                let first = std::mem::replace(existing, XmlValue::Null);
                *existing = XmlValue::List(vec![first, value]);
            }
            None => {
                self.children.insert(name, value);
            }
        }
    }

    fn finish(self) -> (String, XmlValue) {
        let Frame {
            name,
            mut children,
            text,
        } = self;
        let value = if children.is_empty() {
            if text.is_empty() {
                XmlValue::Null
            } else {
                XmlValue::Text(text)
            }
        } else {
            if !text.is_empty() {
                children.insert(TEXT_KEY.to_string(), XmlValue::Text(text));
            }
            XmlValue::Map(children)
        };
        (name, value)
    }
}

/// Parse one sliced fragment into its document mapping.
///
/// The result is a single-entry [`XmlValue::Map`] keyed by the root
/// element name. Content after the root close tag is ignored, which
/// makes the function tolerant of a range that overshoots slightly.
///
/// # Errors
/// Propagates the XML reader's own errors for malformed markup and
/// returns [`TegError::InvalidDocument`] when the input holds no root
/// element or ends before the root element closes.
pub fn parse_document(bytes: &[u8]) -> Result<XmlValue> {
    let mut reader = Reader::from_reader(bytes);
    let config = reader.config_mut();
    config.trim_text_start = true;
    config.trim_text_end = true;

    let mut stack: Vec<Frame> = Vec::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => stack.push(Frame::open(&e)?),
            Event::Empty(e) => {
                let (name, value) = Frame::open(&e)?.finish();
                match stack.last_mut() {
                    Some(parent) => parent.insert_child(name, value),
                    // A lone self-closing element is the whole document
                    None => return Ok(root_map(name, value)),
                }
            }
            Event::Text(e) => {
                if let Some(frame) = stack.last_mut() {
                    let text = e.unescape().map_err(|e| {
                        TegError::InvalidDocument(format!("undecodable character data: {}", e))
                    })?;
                    frame.text.push_str(&text);
                }
                // character data outside any element is container noise
            }
            Event::CData(e) => {
                if let Some(frame) = stack.last_mut() {
                    frame
                        .text
                        .push_str(&String::from_utf8_lossy(&e.into_inner()));
                }
            }
            Event::End(_) => {
                let frame = stack.pop().ok_or_else(|| {
                    TegError::InvalidDocument("close tag without a matching open tag".to_string())
                })?;
                let (name, value) = frame.finish();
                match stack.last_mut() {
                    Some(parent) => parent.insert_child(name, value),
                    None => return Ok(root_map(name, value)),
                }
            }
            Event::Eof => {
                return Err(match stack.last() {
                    Some(frame) => TegError::InvalidDocument(format!(
                        "input ended inside <{}>",
                        frame.name
                    )),
                    None => TegError::InvalidDocument("no root element found".to_string()),
                });
            }
            // declaration, comments, processing instructions, doctype
            _ => {}
        }
        buf.clear();
    }
}

fn root_map(name: String, value: XmlValue) -> XmlValue {
    let mut map = HashMap::with_capacity(1);
    map.insert(name, value);
    XmlValue::Map(map)
}
