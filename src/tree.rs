//! Read-only labeled element tree built from `quick-xml` events.
//!
//! The road parser only needs named-child and named-attribute lookup with
//! lenient typed coercion, so the document is materialized once into a
//! flat arena and handed out through cheap [`Node`] handles.

use std::fs;
use std::path::Path;

use quick_xml::Reader;
use quick_xml::escape::{resolve_predefined_entity, unescape};
use quick_xml::events::{BytesStart, Event};

use crate::error::{Error, Result};

/// A fully parsed XML document.
#[derive(Debug, Clone, Default)]
pub struct Document {
    elements: Vec<Element>,
    root: Option<usize>,
}

#[derive(Debug, Clone)]
struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<usize>,
    text: String,
}

impl Document {
    /// Parse a document from a string.
    pub fn parse(content: &str) -> Result<Self> {
        let mut reader = Reader::from_str(content);

        let mut doc = Document::default();
        let mut stack: Vec<usize> = Vec::new();

        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    let index = doc.push_element(&e, stack.last().copied())?;
                    stack.push(index);
                }
                Event::Empty(e) => {
                    doc.push_element(&e, stack.last().copied())?;
                }
                // quick-xml rejects mismatched end tags itself.
                Event::End(_) => {
                    stack.pop();
                }
                Event::Text(e) => {
                    if let Some(&open) = stack.last() {
                        doc.elements[open]
                            .text
                            .push_str(&String::from_utf8_lossy(e.as_ref()));
                    }
                }
                Event::CData(e) => {
                    if let Some(&open) = stack.last() {
                        doc.elements[open]
                            .text
                            .push_str(&String::from_utf8_lossy(&e));
                    }
                }
                Event::GeneralRef(e) => {
                    if let Some(&open) = stack.last() {
                        let text = &mut doc.elements[open].text;
                        if let Some(c) = e.resolve_char_ref()? {
                            text.push(c);
                        } else if let Some(resolved) =
                            resolve_predefined_entity(&String::from_utf8_lossy(&e))
                        {
                            text.push_str(resolved);
                        }
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if let Some(&open) = stack.last() {
            return Err(Error::MalformedXml(format!(
                "unclosed element <{}>",
                doc.elements[open].name
            )));
        }

        Ok(doc)
    }

    /// Parse a document from raw bytes, stripping a UTF-8 BOM if present.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let content = String::from_utf8(strip_bom(bytes).to_vec())?;
        Self::parse(&content)
    }

    /// Read and parse a document from disk.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    /// The top-level element, if the document has one.
    pub fn root(&self) -> Option<Node<'_>> {
        self.root.map(|index| Node { doc: self, index })
    }

    /// The top-level element if it is named `name`.
    pub fn child(&self, name: &str) -> Option<Node<'_>> {
        self.root().filter(|root| root.name() == name)
    }

    fn push_element(&mut self, start: &BytesStart<'_>, parent: Option<usize>) -> Result<usize> {
        let name = start.name();
        let mut element = Element {
            name: String::from_utf8_lossy(local_name(name.as_ref())).into_owned(),
            attributes: Vec::new(),
            children: Vec::new(),
            text: String::new(),
        };

        for attr in start.attributes() {
            let attr = attr.map_err(quick_xml::Error::InvalidAttr)?;
            let key = String::from_utf8_lossy(local_name(attr.key.as_ref())).into_owned();
            let raw = String::from_utf8(attr.value.to_vec())?;
            let value = unescape(&raw)
                .map(|v| v.into_owned())
                .unwrap_or_else(|_| raw.clone());
            element.attributes.push((key, value));
        }

        let index = self.elements.len();
        self.elements.push(element);

        match parent {
            Some(parent) => self.elements[parent].children.push(index),
            None if self.root.is_none() => self.root = Some(index),
            None => {
                return Err(Error::MalformedXml(format!(
                    "second top-level element <{}>",
                    self.elements[index].name
                )));
            }
        }

        Ok(index)
    }
}

/// Handle to one element of a [`Document`].
#[derive(Debug, Clone, Copy)]
pub struct Node<'a> {
    doc: &'a Document,
    index: usize,
}

impl<'a> Node<'a> {
    fn element(&self) -> &'a Element {
        &self.doc.elements[self.index]
    }

    /// Local element name (namespace prefix stripped).
    pub fn name(&self) -> &'a str {
        &self.element().name
    }

    /// Text content directly under this element, trimmed.
    pub fn text(&self) -> &'a str {
        self.element().text.trim()
    }

    /// First child element named `name`.
    pub fn child(&self, name: &str) -> Option<Node<'a>> {
        self.children(name).next()
    }

    /// All child elements named `name`, in document order.
    pub fn children<'n>(self, name: &'n str) -> impl Iterator<Item = Node<'a>> + 'n
    where
        'a: 'n,
    {
        let doc = self.doc;
        self.element()
            .children
            .iter()
            .map(move |&index| Node { doc, index })
            .filter(move |node| node.name() == name)
    }

    pub fn attribute(&self, name: &str) -> Option<&'a str> {
        self.element()
            .attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    /// Integer attribute. Decimal text such as `"3.0"` is truncated.
    pub fn attr_i32(&self, name: &str) -> Option<i32> {
        self.attribute(name).and_then(parse_i32)
    }

    pub fn attr_f64(&self, name: &str) -> Option<f64> {
        self.attribute(name)
            .and_then(|value| value.trim().parse::<f64>().ok())
    }

    /// Boolean attribute: true when the value starts with `1`, `t`, `T`, `y` or `Y`.
    pub fn attr_bool(&self, name: &str) -> Option<bool> {
        self.attribute(name).map(|value| {
            matches!(
                value.trim_start().chars().next(),
                Some('1' | 't' | 'T' | 'y' | 'Y')
            )
        })
    }

    pub fn attr_i32_or(&self, name: &str, default: i32) -> i32 {
        self.attr_i32(name).unwrap_or(default)
    }

    pub fn attr_f64_or(&self, name: &str, default: f64) -> f64 {
        self.attr_f64(name).unwrap_or(default)
    }

    pub fn attr_bool_or(&self, name: &str, default: bool) -> bool {
        self.attr_bool(name).unwrap_or(default)
    }

    /// Text attribute, or `default` when absent.
    pub fn attr_str_or(&self, name: &str, default: &'a str) -> &'a str {
        self.attribute(name).unwrap_or(default)
    }
}

fn parse_i32(value: &str) -> Option<i32> {
    let value = value.trim();
    value.parse::<i32>().ok().or_else(|| {
        value
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite() && *f >= i32::MIN as f64 && *f <= i32::MAX as f64)
            .map(|f| f as i32)
    })
}

// ----------------------------------------------------------------------------
// Helpers
// ----------------------------------------------------------------------------

/// Strip UTF-8 BOM if present.
pub fn strip_bom(data: &[u8]) -> &[u8] {
    if data.starts_with(&[0xEF, 0xBB, 0xBF]) {
        &data[3..]
    } else {
        data
    }
}

/// Extract local name from namespaced XML name (e.g., "xodr:road" -> "road").
fn local_name(name: &[u8]) -> &[u8] {
    name.iter()
        .rposition(|&b| b == b':')
        .map(|i| &name[i + 1..])
        .unwrap_or(name)
}
