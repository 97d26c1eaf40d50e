//! Relationship-related objects for OPC packages.
//!
//! This module parses a part's companion `.rels` file into an id → target mapping,
//! with internal targets already resolved against the owning part's directory.

use crate::ooxml::opc::constants::target_mode;
use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::resolve_path;
use quick_xml::Reader;
use quick_xml::events::Event;
use std::collections::HashMap;

/// A single relationship from a source part to a target.
///
/// Represents a connection between parts in an OPC package, identified by an rId
/// (relationship ID). Can be either internal (pointing to another part) or external
/// (pointing to an external URL).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    /// Relationship ID (e.g., "rId1", "rId2")
    r_id: String,

    /// Relationship type URI
    reltype: String,

    /// Resolved package path for internal targets, verbatim URL for external ones
    target: String,

    /// Target reference exactly as written in the `.rels` part
    target_ref: String,

    /// Whether this is an external relationship
    is_external: bool,
}

impl Relationship {
    /// Create a new relationship.
    ///
    /// # Arguments
    /// * `r_id` - Relationship ID (e.g., "rId1")
    /// * `reltype` - Relationship type URI
    /// * `target_ref` - Target reference as written in the `.rels` part
    /// * `source_path` - Path of the part owning the relationship
    /// * `is_external` - Whether this is an external relationship
    pub fn new(
        r_id: String,
        reltype: String,
        target_ref: String,
        source_path: &str,
        is_external: bool,
    ) -> Self {
        let target = if is_external {
            target_ref.clone()
        } else {
            resolve_path(source_path, &target_ref)
        };
        Self {
            r_id,
            reltype,
            target,
            target_ref,
            is_external,
        }
    }

    /// Get the relationship ID.
    #[inline]
    pub fn r_id(&self) -> &str {
        &self.r_id
    }

    /// Get the relationship type.
    #[inline]
    pub fn reltype(&self) -> &str {
        &self.reltype
    }

    /// Get the target.
    ///
    /// For internal relationships, this is the resolved package path.
    /// For external relationships, this is an absolute URL.
    #[inline]
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Get the unresolved target reference.
    #[inline]
    pub fn target_ref(&self) -> &str {
        &self.target_ref
    }

    /// Check if this is an external relationship.
    #[inline]
    pub fn is_external(&self) -> bool {
        self.is_external
    }
}

/// Collection of relationships from a single source part.
///
/// Uses a HashMap for O(1) lookup by relationship ID. Source order is kept separately
/// so that iteration is deterministic.
#[derive(Debug, Clone, Default)]
pub struct Relationships {
    /// Path of the part owning these relationships
    source_path: String,

    /// Map of relationship ID to Relationship
    rels: HashMap<String, Relationship>,

    /// Relationship IDs in `.rels` document order
    order: Vec<String>,
}

impl Relationships {
    /// Create a new empty relationships collection.
    ///
    /// # Arguments
    /// * `source_path` - Path of the part owning the relationships
    pub fn new(source_path: impl Into<String>) -> Self {
        Self {
            source_path: source_path.into(),
            rels: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Parse a `.rels` part for the part at `source_path`.
    ///
    /// Walks the `Relationships/Relationship` element list. Entries without an `Id`
    /// attribute are skipped silently; a later duplicate id replaces the earlier one.
    pub fn from_xml(xml: &[u8], source_path: &str) -> Result<Self> {
        let mut rels = Self::new(source_path);
        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(true);
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                    if e.local_name().as_ref() == b"Relationship" =>
                {
                    let mut r_id = None;
                    let mut reltype = String::new();
                    let mut target_ref = String::new();
                    let mut is_external = false;

                    for attr in e.attributes() {
                        let attr = attr?;
                        match attr.key.local_name().as_ref() {
                            b"Id" => r_id = Some(attr.unescape_value()?.to_string()),
                            b"Type" => reltype = attr.unescape_value()?.to_string(),
                            b"Target" => target_ref = attr.unescape_value()?.to_string(),
                            b"TargetMode" => {
                                is_external = attr.unescape_value()? == target_mode::EXTERNAL;
                            },
                            _ => {},
                        }
                    }

                    if let Some(r_id) = r_id {
                        rels.add_relationship(reltype, target_ref, r_id, is_external);
                    }
                },
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(OpcError::XmlError(format!(
                        "Relationships parse error in '{}': {}",
                        source_path, e
                    )));
                },
                _ => {},
            }
            buf.clear();
        }

        Ok(rels)
    }

    /// Add a relationship to the collection.
    ///
    /// # Returns
    /// Reference to the newly added relationship
    pub fn add_relationship(
        &mut self,
        reltype: String,
        target_ref: String,
        r_id: String,
        is_external: bool,
    ) -> &Relationship {
        let rel = Relationship::new(
            r_id.clone(),
            reltype,
            target_ref,
            &self.source_path,
            is_external,
        );
        if self.rels.insert(r_id.clone(), rel).is_none() {
            self.order.push(r_id.clone());
        }
        &self.rels[&r_id]
    }

    /// Path of the part owning these relationships.
    #[inline]
    pub fn source_path(&self) -> &str {
        &self.source_path
    }

    /// Get a relationship by its ID.
    #[inline]
    pub fn get(&self, r_id: &str) -> Option<&Relationship> {
        self.rels.get(r_id)
    }

    /// Resolved target for an internal relationship id.
    pub fn target_of(&self, r_id: &str) -> Option<&str> {
        self.rels
            .get(r_id)
            .filter(|rel| !rel.is_external())
            .map(Relationship::target)
    }

    /// First relationship of a given type, in document order.
    pub fn first_of_type(&self, reltype: &str) -> Option<&Relationship> {
        self.iter().find(|rel| rel.reltype() == reltype)
    }

    /// All relationships of a given type, in document order.
    pub fn by_type<'a>(&'a self, reltype: &'a str) -> impl Iterator<Item = &'a Relationship> {
        self.iter().filter(move |rel| rel.reltype() == reltype)
    }

    /// Iterate relationships in document order.
    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.order.iter().filter_map(|id| self.rels.get(id))
    }

    /// Get the number of relationships in the collection.
    #[inline]
    pub fn len(&self) -> usize {
        self.rels.len()
    }

    /// Check if the collection is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::opc::constants::relationship_type as rt;

    const SLIDE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="../media/image1.png"/>
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout" Target="../slideLayouts/slideLayout2.xml"/>
  <Relationship Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="../media/orphan.png"/>
  <Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink" Target="https://example.com/a?b=1&amp;c=2" TargetMode="External"/>
</Relationships>"#;

    #[test]
    fn test_parse_resolves_targets() {
        let rels = Relationships::from_xml(SLIDE_RELS.as_bytes(), "ppt/slides/slide1.xml").unwrap();

        assert_eq!(rels.len(), 3);
        assert_eq!(rels.target_of("rId2"), Some("ppt/media/image1.png"));
        assert_eq!(
            rels.target_of("rId1"),
            Some("ppt/slideLayouts/slideLayout2.xml")
        );
        assert_eq!(rels.get("rId2").unwrap().target_ref(), "../media/image1.png");
    }

    #[test]
    fn test_entries_without_id_are_skipped() {
        let rels = Relationships::from_xml(SLIDE_RELS.as_bytes(), "ppt/slides/slide1.xml").unwrap();
        assert!(rels.iter().all(|rel| !rel.target().ends_with("orphan.png")));
    }

    #[test]
    fn test_external_target_kept_verbatim() {
        let rels = Relationships::from_xml(SLIDE_RELS.as_bytes(), "ppt/slides/slide1.xml").unwrap();
        let link = rels.get("rId3").unwrap();

        assert!(link.is_external());
        assert_eq!(link.target(), "https://example.com/a?b=1&c=2");
        assert_eq!(rels.target_of("rId3"), None);
    }

    #[test]
    fn test_lookup_by_type_keeps_document_order() {
        let rels = Relationships::from_xml(SLIDE_RELS.as_bytes(), "ppt/slides/slide1.xml").unwrap();

        let first = rels.first_of_type(rt::IMAGE).unwrap();
        assert_eq!(first.r_id(), "rId2");
        assert_eq!(rels.by_type(rt::SLIDE_LAYOUT).count(), 1);

        let ids: Vec<&str> = rels.iter().map(Relationship::r_id).collect();
        assert_eq!(ids, vec!["rId2", "rId1", "rId3"]);
    }

    #[test]
    fn test_malformed_rels_is_an_error() {
        let result = Relationships::from_xml(b"<Relationships><Relationship Id=\"rId1\"", "a.xml");
        assert!(result.is_err());
    }
}
