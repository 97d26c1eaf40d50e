//! Event-driven construction of [`XmlNode`] trees.

use super::{XmlNode, classify_name};
use crate::ooxml::error::{OoxmlError, Result};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// Parses whole parts into attributed trees.
///
/// Text is kept untrimmed because run text (`a:t`) is whitespace-significant;
/// whitespace-only runs between elements are dropped unless they sit directly inside
/// a text element.
#[derive(Debug, Clone, Default)]
pub struct MarkupParser {
    /// Keep whitespace-only text for every element, not just text elements
    keep_all_whitespace: bool,
}

/// Elements whose whitespace-only content is meaningful.
const TEXT_ELEMENTS: &[&str] = &["t", "v", "instrText"];

impl MarkupParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_keep_all_whitespace(mut self, keep: bool) -> Self {
        self.keep_all_whitespace = keep;
        self
    }

    /// Parse a part and return its root element.
    ///
    /// # Errors
    /// Malformed XML, an unclosed element, or a part without any root element.
    pub fn parse(&self, xml: &[u8]) -> Result<XmlNode> {
        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(false);

        let mut buf = Vec::new();
        let mut stack: Vec<XmlNode> = Vec::new();
        let mut root: Option<XmlNode> = None;

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(ref e) => {
                    stack.push(self.element(&reader, e)?);
                },
                Event::Empty(ref e) => {
                    let node = self.element(&reader, e)?;
                    attach(&mut stack, &mut root, node);
                },
                Event::End(_) => {
                    if let Some(node) = stack.pop() {
                        attach(&mut stack, &mut root, node);
                    }
                },
                Event::Text(ref e) => {
                    if let Some(top) = stack.last_mut() {
                        let text = e.decode()?;
                        self.push_text(top, &text);
                    }
                },
                Event::CData(ref e) => {
                    if let Some(top) = stack.last_mut() {
                        let text = std::str::from_utf8(e.as_ref())
                            .map_err(|e| OoxmlError::Xml(e.to_string()))?;
                        top.text.push_str(text);
                    }
                },
                Event::GeneralRef(ref e) => {
                    if let Some(top) = stack.last_mut() {
                        let name = e.decode()?;
                        let entity = format!("&{};", name);
                        match quick_xml::escape::unescape(&entity) {
                            Ok(resolved) => top.text.push_str(&resolved),
                            Err(_) => top.text.push_str(&entity),
                        }
                    }
                },
                Event::Eof => break,
                _ => {},
            }
            buf.clear();
        }

        if !stack.is_empty() {
            return Err(OoxmlError::Xml(format!(
                "unexpected end of document inside <{}>",
                stack.last().map(XmlNode::name).unwrap_or_default()
            )));
        }

        root.ok_or_else(|| OoxmlError::Xml("document has no root element".to_string()))
    }

    fn element(&self, reader: &Reader<&[u8]>, e: &BytesStart<'_>) -> Result<XmlNode> {
        let name = std::str::from_utf8(e.name().as_ref())
            .map_err(|err| OoxmlError::Xml(err.to_string()))?
            .to_string();
        let (key, rank) = classify_name(&name);
        let mut node = XmlNode {
            name,
            key,
            rank,
            ..Default::default()
        };

        for attr in e.attributes() {
            let attr = attr?;
            let key = attr.key.as_ref();
            // Namespace declarations carry no model data
            if key == b"xmlns" || key.starts_with(b"xmlns:") {
                continue;
            }
            let attr_name = std::str::from_utf8(key)
                .map_err(|err| OoxmlError::Xml(err.to_string()))?
                .to_string();
            let value = attr
                .decode_and_unescape_value(reader.decoder())?
                .into_owned();
            node.push_attr(attr_name, value);
        }

        Ok(node)
    }

    fn push_text(&self, node: &mut XmlNode, text: &str) {
        if text.is_empty() {
            return;
        }
        let significant = self.keep_all_whitespace
            || !text.trim().is_empty()
            || TEXT_ELEMENTS.contains(&node.key.as_str());
        if significant {
            node.text.push_str(text);
        }
    }
}

fn attach(stack: &mut [XmlNode], root: &mut Option<XmlNode>, node: XmlNode) {
    match stack.last_mut() {
        Some(parent) => parent.push_child(node),
        None => {
            if root.is_none() {
                *root = Some(node);
            }
        },
    }
}
