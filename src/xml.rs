//! Response body decoding.
//!
//! Successful responses are XML documents. [`decode`] turns one into a
//! generic [`serde_json::Value`] and drops the outermost envelope element, so
//! callers see the payload directly.
//!
//! # Mapping
//!
//! - An element with only text becomes a string (`<A>1</A>` → `"1"`); an empty
//!   element becomes `""`.
//! - An element with child elements becomes an object keyed by tag name.
//! - A tag repeated under the same parent becomes an array, in document order.
//! - Attributes are grouped under `"$"`; namespace declarations are dropped.
//! - Text mixed with child elements is kept under `"_"`.
//! - CDATA sections are text. Surrounding whitespace is trimmed.
//!
//! # Example
//!
//! ```rust
//! use aws_dispatch::xml::decode;
//! use serde_json::json;
//!
//! let value = decode("<Response><Items><Item>1</Item><Item>2</Item></Items></Response>").unwrap();
//! assert_eq!(value, json!({"Items": {"Item": ["1", "2"]}}));
//! ```

use std::fmt;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde_json::{Map, Value};
use thiserror::Error;

/// Key under which element attributes are stored.
pub const ATTRIBUTES_KEY: &str = "$";
/// Key under which mixed-content text is stored.
pub const TEXT_KEY: &str = "_";

/// The body could not be decoded as a well-formed document.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The parser rejected the markup.
    #[error("Malformed XML: {0}")]
    Malformed(String),

    /// The document contains no element.
    #[error("XML document has no root element")]
    NoRoot,

    /// The document ended while an element was still open.
    #[error("XML document ended inside <{0}>")]
    UnclosedElement(String),

    /// An element or text follows the root element.
    #[error("Unexpected content after the root element")]
    TrailingContent,

    /// Non-whitespace text appears before the root element.
    #[error("Unexpected text outside the root element")]
    TextOutsideRoot,
}

fn malformed(err: impl fmt::Display) -> DecodeError {
    DecodeError::Malformed(err.to_string())
}

/// An element whose end tag has not been seen yet.
#[derive(Debug)]
struct OpenElement {
    name: String,
    attributes: Map<String, Value>,
    children: Map<String, Value>,
    text: String,
}

impl OpenElement {
    fn from_start(start: &BytesStart<'_>) -> Result<Self, DecodeError> {
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();

        let mut attributes = Map::new();
        for attr in start.attributes() {
            let attr = attr.map_err(malformed)?;
            let key = attr.key.as_ref();
            if key == b"xmlns" || key.starts_with(b"xmlns:") {
                continue;
            }
            let value = attr.unescape_value().map_err(malformed)?;
            attributes.insert(
                String::from_utf8_lossy(key).into_owned(),
                Value::String(value.into_owned()),
            );
        }

        Ok(Self {
            name,
            attributes,
            children: Map::new(),
            text: String::new(),
        })
    }

    fn push_child(&mut self, name: String, value: Value) {
        match self.children.get_mut(&name) {
            Some(Value::Array(items)) => items.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
            None => {
                self.children.insert(name, value);
            }
        }
    }

    fn into_value(self) -> (String, Value) {
        if self.children.is_empty() && self.attributes.is_empty() {
            return (self.name, Value::String(self.text));
        }

        let mut object = self.children;
        if !self.attributes.is_empty() {
            object.insert(ATTRIBUTES_KEY.to_string(), Value::Object(self.attributes));
        }
        if !self.text.is_empty() {
            object.insert(TEXT_KEY.to_string(), Value::String(self.text));
        }
        (self.name, Value::Object(object))
    }
}

/// Closes `element`, attaching it to its parent or making it the result.
fn close(element: OpenElement, stack: &mut [OpenElement], root: &mut Option<Value>) {
    let (name, value) = element.into_value();
    match stack.last_mut() {
        Some(parent) => parent.push_child(name, value),
        None => *root = Some(value),
    }
}

/// Decodes an XML document, collapsing its root element.
///
/// # Errors
///
/// Returns [`DecodeError`] if the document is not well formed or has no
/// single root element.
pub fn decode(body: &str) -> Result<Value, DecodeError> {
    let mut reader = Reader::from_str(body);
    reader.config_mut().trim_text_start = true;
    reader.config_mut().trim_text_end = true;

    let mut stack: Vec<OpenElement> = Vec::new();
    let mut root: Option<Value> = None;

    loop {
        match reader.read_event().map_err(malformed)? {
            Event::Start(e) => {
                if root.is_some() {
                    return Err(DecodeError::TrailingContent);
                }
                stack.push(OpenElement::from_start(&e)?);
            }
            Event::Empty(e) => {
                if root.is_some() {
                    return Err(DecodeError::TrailingContent);
                }
                let element = OpenElement::from_start(&e)?;
                close(element, &mut stack, &mut root);
            }
            Event::End(_) => {
                // quick-xml has already checked the end name matches
                let element = stack
                    .pop()
                    .ok_or_else(|| DecodeError::Malformed("unmatched end tag".to_string()))?;
                close(element, &mut stack, &mut root);
            }
            Event::Text(e) => {
                let text = e.unescape().map_err(malformed)?;
                push_text(&mut stack, root.is_some(), &text)?;
            }
            Event::CData(e) => {
                let text = String::from_utf8(e.into_inner().into_owned()).map_err(malformed)?;
                push_text(&mut stack, root.is_some(), &text)?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.pop() {
        return Err(DecodeError::UnclosedElement(open.name));
    }
    root.ok_or(DecodeError::NoRoot)
}

fn push_text(stack: &mut [OpenElement], closed: bool, text: &str) -> Result<(), DecodeError> {
    if text.is_empty() {
        return Ok(());
    }
    match stack.last_mut() {
        Some(element) => {
            element.text.push_str(text);
            Ok(())
        }
        None if closed => Err(DecodeError::TrailingContent),
        None => Err(DecodeError::TextOutsideRoot),
    }
}
