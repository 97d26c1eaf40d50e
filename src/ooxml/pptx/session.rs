//! Parse configuration and per-parse state.
//!
//! A [`ParseSession`] lives for exactly one call to
//! [`PresentationParser::parse`](super::presentation::PresentationParser::parse). It
//! owns every cache the parse builds up (content types, relationship maps, themes),
//! so nothing leaks between two parses. Builders below the assembler never see the
//! session: they get a [`PartContext`] holding what one part needs, and perform no
//! I/O.

use crate::ooxml::error::Result;
use crate::ooxml::opc::constants::{part_path, relationship_type};
use crate::ooxml::opc::packuri::rels_path_for;
use crate::ooxml::opc::{ContentTypeMap, PartSource, Relationships};
use crate::ooxml::pptx::charts::{ChartData, chart_from_tree};
use crate::ooxml::pptx::diagnostics::{Diagnostics, IssueCode};
use crate::ooxml::pptx::smartart::{Diagram, diagram_from_tree};
use crate::ooxml::pptx::theme::{Theme, theme_from_tree};
use crate::ooxml::xml::{MarkupParser, XmlNode};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Options controlling what a parse produces.
///
/// # Examples
///
/// ```rust
/// use pptx_resolve::ParseOptions;
///
/// let options = ParseOptions::default()
///     .with_timing(false)
///     .with_parallel_slides(false);
/// assert!(options.include_notes);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParseOptions {
    /// Build the animation timing tree of each slide
    pub include_timing: bool,
    /// Build notes for slides that link a notes part
    pub include_notes: bool,
    /// Copy media, embeddings and fonts into the resource maps
    pub extract_resources: bool,
    /// Dispatch runs, shape tree children and timing children in one ordered
    /// pass instead of grouping them by element kind
    pub preserve_document_order: bool,
    /// Build slides on the rayon pool once their parts are loaded
    pub parallel_slides: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            include_timing: true,
            include_notes: true,
            extract_resources: true,
            preserve_document_order: false,
            parallel_slides: true,
        }
    }
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timing(mut self, include: bool) -> Self {
        self.include_timing = include;
        self
    }

    pub fn with_notes(mut self, include: bool) -> Self {
        self.include_notes = include;
        self
    }

    pub fn with_resources(mut self, extract: bool) -> Self {
        self.extract_resources = extract;
        self
    }

    pub fn with_document_order(mut self, preserve: bool) -> Self {
        self.preserve_document_order = preserve;
        self
    }

    pub fn with_parallel_slides(mut self, parallel: bool) -> Self {
        self.parallel_slides = parallel;
        self
    }
}

/// Chart and diagram parts linked from one slide-like part, keyed by package path.
#[derive(Debug, Clone, Default)]
pub struct LinkedParts {
    pub charts: HashMap<String, ChartData>,
    pub diagrams: HashMap<String, Diagram>,
}

/// What a builder needs to turn one part's markup into model values.
pub struct PartContext<'a> {
    /// Package path of the part being built
    pub part_path: &'a str,
    /// Relationships of that part
    pub rels: &'a Relationships,
    pub options: &'a ParseOptions,
    pub linked: &'a LinkedParts,
    pub diagnostics: Diagnostics,
}

impl<'a> PartContext<'a> {
    pub fn new(
        part_path: &'a str,
        rels: &'a Relationships,
        options: &'a ParseOptions,
        linked: &'a LinkedParts,
    ) -> Self {
        Self {
            part_path,
            rels,
            options,
            linked,
            diagnostics: Diagnostics::new(),
        }
    }

    /// Record a warning located at this part.
    pub fn warn(&mut self, code: IssueCode, message: impl Into<String>, element: Option<&str>) {
        self.diagnostics
            .warn(code, message, Some(self.part_path), element);
    }

    /// Target of a relationship id, or `None` with a `code` warning when the part
    /// has no such relationship. An empty id is not an error and yields `None`.
    pub fn resolve(&mut self, r_id: &str, code: IssueCode) -> Option<String> {
        if r_id.is_empty() {
            return None;
        }
        match self.rels.get(r_id) {
            Some(rel) => Some(rel.target().to_string()),
            None => {
                self.warn(
                    code,
                    format!("relationship {} has no target", r_id),
                    Some(r_id),
                );
                None
            },
        }
    }

    pub fn document_order(&self) -> bool {
        self.options.preserve_document_order
    }

    pub fn into_diagnostics(self) -> Diagnostics {
        self.diagnostics
    }
}

/// State of one parse: the part source, the markup parser, and every cache.
pub struct ParseSession<'s> {
    source: &'s dyn PartSource,
    options: &'s ParseOptions,
    parser: MarkupParser,
    content_types: ContentTypeMap,
    rels_cache: HashMap<String, Arc<Relationships>>,
    themes: BTreeMap<String, Theme>,
    diagnostics: Diagnostics,
}

impl<'s> ParseSession<'s> {
    pub fn new(source: &'s dyn PartSource, options: &'s ParseOptions) -> Self {
        Self {
            source,
            options,
            parser: MarkupParser::new(),
            content_types: ContentTypeMap::new(),
            rels_cache: HashMap::new(),
            themes: BTreeMap::new(),
            diagnostics: Diagnostics::new(),
        }
    }

    /// Load `[Content_Types].xml`. A missing or malformed table is fatal.
    pub fn load_content_types(&mut self) -> Result<()> {
        let bytes = self.source.read_part(part_path::CONTENT_TYPES)?;
        self.content_types = ContentTypeMap::from_xml(&bytes)?;
        log::debug!("content types: {} entries", self.content_types.len());
        Ok(())
    }

    pub fn source(&self) -> &'s dyn PartSource {
        self.source
    }

    pub fn options(&self) -> &'s ParseOptions {
        self.options
    }

    pub fn parser(&self) -> &MarkupParser {
        &self.parser
    }

    pub fn content_types(&self) -> &ContentTypeMap {
        &self.content_types
    }

    pub fn diagnostics_mut(&mut self) -> &mut Diagnostics {
        &mut self.diagnostics
    }

    /// Read and parse an XML part.
    ///
    /// # Errors
    /// Fails when the part is missing or is not well-formed XML; XML messages are
    /// prefixed with the part path.
    pub fn read_xml(&self, path: &str) -> Result<XmlNode> {
        let bytes = self.source.read_part(path)?;
        self.parser.parse(&bytes).map_err(|e| e.in_part(path))
    }

    /// Relationships of a part, cached for the rest of the session.
    ///
    /// A part without a relationships file has an empty map. A malformed one is
    /// reported and treated as empty.
    pub fn rels_for(&mut self, part: &str) -> Arc<Relationships> {
        if let Some(rels) = self.rels_cache.get(part) {
            return Arc::clone(rels);
        }

        let rels_path = rels_path_for(part);
        let rels = match self.source.read_optional(&rels_path) {
            Ok(Some(bytes)) => match Relationships::from_xml(&bytes, part) {
                Ok(rels) => rels,
                Err(e) => {
                    self.diagnostics.warn(
                        IssueCode::MalformedPart,
                        format!("relationships unreadable: {}", e),
                        Some(&rels_path),
                        None,
                    );
                    Relationships::new(part)
                },
            },
            Ok(None) => Relationships::new(part),
            Err(e) => {
                self.diagnostics.warn(
                    IssueCode::MissingPart,
                    format!("relationships unreadable: {}", e),
                    Some(&rels_path),
                    None,
                );
                Relationships::new(part)
            },
        };

        let rels = Arc::new(rels);
        self.rels_cache.insert(part.to_string(), Arc::clone(&rels));
        rels
    }

    /// Load a theme part, caching it by path.
    ///
    /// Returns `None` when the part is missing or malformed; the malformed case is
    /// reported here, the caller decides how to report a missing theme.
    pub fn theme(&mut self, path: &str) -> Option<Theme> {
        if let Some(theme) = self.themes.get(path) {
            return Some(theme.clone());
        }

        let root = match self.source.read_optional(path) {
            Ok(Some(bytes)) => match self.parser.parse(&bytes) {
                Ok(root) => root,
                Err(e) => {
                    self.diagnostics.warn(
                        IssueCode::MalformedPart,
                        format!("theme unreadable: {}", e),
                        Some(path),
                        None,
                    );
                    return None;
                },
            },
            Ok(None) => return None,
            Err(e) => {
                self.diagnostics.warn(
                    IssueCode::MissingPart,
                    format!("theme unreadable: {}", e),
                    Some(path),
                    None,
                );
                return None;
            },
        };

        let rels = self.rels_for(path);
        let theme = theme_from_tree(&root, &rels);
        log::debug!("theme {} loaded from {}", theme.name, path);
        self.themes.insert(path.to_string(), theme.clone());
        Some(theme)
    }

    /// Themes loaded so far, by path.
    pub fn themes(&self) -> &BTreeMap<String, Theme> {
        &self.themes
    }

    /// Load the chart and diagram data parts a part links to.
    ///
    /// Missing targets are left out; the shape builder reports them where the
    /// graphic frame refers to them.
    pub fn load_linked_parts(&mut self, rels: &Relationships) -> LinkedParts {
        let mut linked = LinkedParts::default();

        for rel in rels.iter().filter(|r| !r.is_external()) {
            let is_chart = rel.reltype() == relationship_type::CHART;
            let is_diagram = rel.reltype() == relationship_type::DIAGRAM_DATA;
            if !(is_chart || is_diagram) {
                continue;
            }
            let target = rel.target();
            if linked.charts.contains_key(target) || linked.diagrams.contains_key(target) {
                continue;
            }

            let root = match self.source.read_optional(target) {
                Ok(Some(bytes)) => self.parser.parse(&bytes),
                Ok(None) => continue,
                Err(e) => Err(e.into()),
            };
            match root {
                Ok(root) if is_chart => {
                    linked.charts.insert(target.to_string(), chart_from_tree(&root));
                },
                Ok(root) => {
                    linked
                        .diagrams
                        .insert(target.to_string(), diagram_from_tree(&root));
                },
                Err(e) => self.diagnostics.warn(
                    IssueCode::MalformedPart,
                    format!("linked part unreadable: {}", e),
                    Some(target),
                    None,
                ),
            }
        }

        linked
    }

    /// Finish the session, handing back the themes and the diagnostics.
    pub fn finish(self) -> (BTreeMap<String, Theme>, Diagnostics) {
        (self.themes, self.diagnostics)
    }
}
