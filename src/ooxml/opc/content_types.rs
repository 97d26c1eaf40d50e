//! Content type table of an OPC package.
//!
//! `[Content_Types].xml` maps parts to MIME-like content types through two
//! mechanisms: `Default` entries keyed by file extension, and `Override` entries
//! keyed by part name. Overrides always win.

use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::{extension, member_name};
use quick_xml::Reader;
use quick_xml::events::Event;
use std::collections::HashMap;

/// Content type map for looking up content types by part name or extension.
#[derive(Debug, Clone, Default)]
pub struct ContentTypeMap {
    /// Maps lowercase file extensions to default content types
    defaults: HashMap<String, String>,

    /// Maps part names (no leading slash) to override content types
    overrides: HashMap<String, String>,
}

impl ContentTypeMap {
    /// Create a new empty content type map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse content types from `[Content_Types].xml`.
    ///
    /// Entries missing either of their two attributes are ignored.
    pub fn from_xml(xml: &[u8]) -> Result<Self> {
        let mut map = Self::new();
        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();
        let mut saw_root = false;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                    let (key_attr, is_default) = match e.local_name().as_ref() {
                        b"Types" => {
                            saw_root = true;
                            buf.clear();
                            continue;
                        },
                        b"Default" => (&b"Extension"[..], true),
                        b"Override" => (&b"PartName"[..], false),
                        _ => {
                            buf.clear();
                            continue;
                        },
                    };

                    let mut key = None;
                    let mut content_type = None;
                    for attr in e.attributes() {
                        let attr = attr?;
                        let name = attr.key.local_name();
                        if name.as_ref() == key_attr {
                            key = Some(attr.unescape_value()?.to_string());
                        } else if name.as_ref() == b"ContentType" {
                            content_type = Some(attr.unescape_value()?.to_string());
                        }
                    }

                    if let (Some(key), Some(ct)) = (key, content_type) {
                        if is_default {
                            map.add_default(&key, ct);
                        } else {
                            map.add_override(&key, ct);
                        }
                    }
                },
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(OpcError::XmlError(format!(
                        "Content types parse error: {}",
                        e
                    )));
                },
                _ => {},
            }
            buf.clear();
        }

        if !saw_root {
            return Err(OpcError::XmlError(
                "Content types part has no Types element".to_string(),
            ));
        }

        Ok(map)
    }

    /// Add a default content type mapping for a file extension.
    pub fn add_default(&mut self, extension: &str, content_type: String) {
        self.defaults
            .insert(extension.trim_start_matches('.').to_ascii_lowercase(), content_type);
    }

    /// Add an override content type mapping for a specific part name.
    pub fn add_override(&mut self, partname: &str, content_type: String) {
        self.overrides
            .insert(member_name(partname).to_string(), content_type);
    }

    /// Get the content type for a part.
    ///
    /// First checks for an override, then falls back to the default
    /// based on file extension.
    pub fn content_type(&self, part_path: &str) -> Option<&str> {
        let name = member_name(part_path);
        if let Some(ct) = self.overrides.get(name) {
            return Some(ct);
        }
        self.defaults.get(&extension(name)).map(String::as_str)
    }

    /// Part names overridden with exactly this content type, sorted.
    pub fn parts_of_type(&self, content_type: &str) -> Vec<&str> {
        let mut parts: Vec<&str> = self
            .overrides
            .iter()
            .filter(|(_, ct)| ct.as_str() == content_type)
            .map(|(name, _)| name.as_str())
            .collect();
        parts.sort_unstable();
        parts
    }

    /// Number of default plus override entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.defaults.len() + self.overrides.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.defaults.is_empty() && self.overrides.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::opc::constants::content_type as ct;

    const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="xml" ContentType="application/xml"/>
  <Default Extension="PNG" ContentType="image/png"/>
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Override PartName="/ppt/presentation.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"/>
  <Override PartName="/ppt/slides/slide2.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slide+xml"/>
  <Override PartName="/ppt/slides/slide1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slide+xml"/>
  <Override ContentType="application/xml"/>
</Types>"#;

    #[test]
    fn test_content_type_map() {
        let map = ContentTypeMap::from_xml(CONTENT_TYPES.as_bytes()).unwrap();

        assert_eq!(map.len(), 6);
        assert_eq!(
            map.content_type("ppt/presentation.xml"),
            Some(ct::PML_PRESENTATION_MAIN)
        );
        assert_eq!(map.content_type("/ppt/media/image1.png"), Some(ct::PNG));
        assert_eq!(map.content_type("ppt/other.xml"), Some(ct::XML));
        assert_eq!(map.content_type("ppt/media/movie.mp4"), None);
    }

    #[test]
    fn test_parts_of_type_sorted() {
        let map = ContentTypeMap::from_xml(CONTENT_TYPES.as_bytes()).unwrap();
        assert_eq!(
            map.parts_of_type(ct::PML_SLIDE),
            vec!["ppt/slides/slide1.xml", "ppt/slides/slide2.xml"]
        );
    }

    #[test]
    fn test_missing_root_is_an_error() {
        assert!(ContentTypeMap::from_xml(b"").is_err());
        assert!(ContentTypeMap::from_xml(b"<Types><Default").is_err());
    }
}
