//! Presentation assembly.
//!
//! [`PresentationParser`] walks the part graph of a package in dependency order
//! (presentation, masters with their themes and layouts, slides with their notes),
//! hands each loaded part to its builder, and collects the results into one
//! immutable [`Presentation`] together with the [`Diagnostics`] of the parse.
//!
//! Only a missing or malformed `[Content_Types].xml` or `ppt/presentation.xml`
//! fails the parse. Every other gap is recorded and the affected entity is either
//! defaulted or skipped.
//!
//! # Examples
//!
//! ```rust,no_run
//! use pptx_resolve::{ParseOptions, PresentationParser};
//! use pptx_resolve::ooxml::opc::ZipPartSource;
//!
//! let source = ZipPartSource::open("deck.pptx")?;
//! let output = PresentationParser::new(ParseOptions::default()).parse(&source)?;
//!
//! for slide in &output.presentation.slides {
//!     println!("{}: {}", slide.index, slide.title().unwrap_or_default());
//! }
//! for warning in &output.diagnostics.warnings {
//!     eprintln!("{}", warning);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::metadata::{Metadata, apply_app_properties, parse_core_properties};
use crate::ooxml::opc::constants::{part_path, relationship_type};
use crate::ooxml::opc::error::OpcError;
use crate::ooxml::opc::{PartSource, Relationships, ZipPartSource};
use crate::ooxml::pptx::backgrounds::{Background, first_background};
use crate::ooxml::pptx::diagnostics::{Diagnostics, IssueCode};
use crate::ooxml::pptx::media::is_image;
use crate::ooxml::pptx::session::{LinkedParts, ParseOptions, ParseSession, PartContext};
use crate::ooxml::pptx::slide::{
    Notes, Slide, SlideLayout, SlideMaster, TextStyles, build_layout, build_master, build_notes,
    build_slide,
};
use crate::ooxml::pptx::theme::Theme;
use crate::ooxml::xml::XmlNode;
use rayon::prelude::*;
use serde::{Serialize, Serializer};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Default slide size (10in x 7.5in).
const DEFAULT_SLIDE_WIDTH: i64 = 9_144_000;
const DEFAULT_SLIDE_HEIGHT: i64 = 6_858_000;

/// Presentation-wide properties from `ppt/presentation.xml`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Properties {
    /// `sldSz/@cx` in EMU
    pub slide_width: i64,
    /// `sldSz/@cy` in EMU
    pub slide_height: i64,
    /// `sldSz/@type` (`screen4x3`, `custom`...)
    pub slide_size_type: Option<String>,
    pub notes_width: i64,
    pub notes_height: i64,
    pub first_slide_number: u32,
    pub rtl: bool,
    pub save_subset_fonts: bool,
}

impl Default for Properties {
    fn default() -> Self {
        Self {
            slide_width: DEFAULT_SLIDE_WIDTH,
            slide_height: DEFAULT_SLIDE_HEIGHT,
            slide_size_type: None,
            notes_width: DEFAULT_SLIDE_HEIGHT,
            notes_height: DEFAULT_SLIDE_WIDTH,
            first_slide_number: 1,
            rtl: false,
            save_subset_fonts: false,
        }
    }
}

fn parse_properties(root: &XmlNode) -> Properties {
    let defaults = Properties::default();
    let sld_sz = root.child("sldSz");
    let notes_sz = root.child("notesSz");

    Properties {
        slide_width: sld_sz
            .and_then(|n| n.attr_i64("cx"))
            .unwrap_or(defaults.slide_width),
        slide_height: sld_sz
            .and_then(|n| n.attr_i64("cy"))
            .unwrap_or(defaults.slide_height),
        slide_size_type: sld_sz.and_then(|n| n.attr("type")).map(str::to_string),
        notes_width: notes_sz
            .and_then(|n| n.attr_i64("cx"))
            .unwrap_or(defaults.notes_width),
        notes_height: notes_sz
            .and_then(|n| n.attr_i64("cy"))
            .unwrap_or(defaults.notes_height),
        first_slide_number: root.attr_u32("firstSlideNum").unwrap_or(1),
        rtl: root.attr_bool("rtl").unwrap_or(false),
        save_subset_fonts: root.attr_bool("saveSubsetFonts").unwrap_or(false),
    }
}

fn byte_sizes<S: Serializer>(
    map: &BTreeMap<String, Vec<u8>>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_map(map.iter().map(|(path, bytes)| (path, bytes.len())))
}

/// Binary parts of the package, keyed by part path.
///
/// Byte maps serialize as part path to byte length.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Resources {
    /// Images under `ppt/media/`
    #[serde(serialize_with = "byte_sizes")]
    pub images: BTreeMap<String, Vec<u8>>,
    /// Audio and video under `ppt/media/`
    #[serde(serialize_with = "byte_sizes")]
    pub media: BTreeMap<String, Vec<u8>>,
    #[serde(serialize_with = "byte_sizes")]
    pub embeddings: BTreeMap<String, Vec<u8>>,
    #[serde(serialize_with = "byte_sizes")]
    pub fonts: BTreeMap<String, Vec<u8>>,
    /// Every theme loaded during the parse
    pub themes: BTreeMap<String, Theme>,
}

impl Resources {
    /// Bytes of a binary part from any of the byte maps.
    pub fn get(&self, path: &str) -> Option<&[u8]> {
        self.images
            .get(path)
            .or_else(|| self.media.get(path))
            .or_else(|| self.embeddings.get(path))
            .or_else(|| self.fonts.get(path))
            .map(Vec::as_slice)
    }
}

/// A resolved presentation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Presentation {
    pub properties: Properties,
    pub metadata: Metadata,
    pub masters: Vec<SlideMaster>,
    pub slides: Vec<Slide>,
    pub resources: Resources,
}

impl Presentation {
    /// Slide by 1-based index.
    pub fn slide(&self, index: usize) -> Option<&Slide> {
        self.slides.iter().find(|s| s.index == index)
    }

    pub fn master(&self, id: &str) -> Option<&SlideMaster> {
        self.masters.iter().find(|m| m.id == id)
    }

    pub fn layout(&self, id: &str) -> Option<&SlideLayout> {
        self.masters.iter().find_map(|m| m.layout(id))
    }

    /// Background of a slide after falling back to its layout, then its master.
    pub fn effective_background(&self, index: usize) -> Option<&Background> {
        let slide = self.slide(index)?;
        let layout = self.layout(&slide.layout_id);
        let master = self.master(&slide.master_id);
        first_background([
            slide.background.as_ref(),
            layout.and_then(|l| l.background.as_ref()),
            master.and_then(|m| m.background.as_ref()),
        ])
    }

    /// Master text styles governing a slide.
    pub fn effective_text_styles(&self, index: usize) -> Option<&TextStyles> {
        let slide = self.slide(index)?;
        self.master(&slide.master_id).map(|m| &m.text_styles)
    }

    /// Theme of the master governing a slide.
    pub fn theme_for_slide(&self, index: usize) -> Option<&Theme> {
        let slide = self.slide(index)?;
        self.master(&slide.master_id).map(|m| &m.theme)
    }
}

/// Result of a successful parse.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParseOutput {
    pub presentation: Presentation,
    pub diagnostics: Diagnostics,
}

/// Parses presentation packages into [`Presentation`] models.
///
/// The parser holds only options; every call to [`parse`](Self::parse) starts from
/// empty caches, so one parser can be reused and shared between threads.
#[derive(Debug, Clone, Default)]
pub struct PresentationParser {
    options: ParseOptions,
}

/// Everything a slide builder needs, loaded ahead of the build.
struct PreparedPart {
    path: String,
    root: XmlNode,
    rels: Arc<Relationships>,
    linked: LinkedParts,
}

struct PreparedSlide {
    index: usize,
    part: PreparedPart,
    layout_id: String,
    master_id: String,
    notes: Option<PreparedPart>,
}

impl PresentationParser {
    pub fn new(options: ParseOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parse the bytes of a `.pptx` archive.
    pub fn parse_bytes(&self, data: Vec<u8>) -> Result<ParseOutput> {
        let source = ZipPartSource::from_bytes(data)?;
        self.parse(&source)
    }

    /// Parse a presentation package.
    ///
    /// # Errors
    /// Fails only when `[Content_Types].xml` or the presentation part is missing
    /// or malformed. No partial model is returned in that case.
    pub fn parse(&self, source: &dyn PartSource) -> Result<ParseOutput> {
        let mut session = ParseSession::new(source, &self.options);
        session.load_content_types()?;

        let presentation_path = locate_presentation(&mut session);
        let root = session.read_xml(&presentation_path)?;
        if root.local_name() != "presentation" {
            return Err(OoxmlError::InvalidFormat(format!(
                "{} has root element {}",
                presentation_path,
                root.name()
            )));
        }
        log::debug!("parsing presentation {}", presentation_path);

        let properties = parse_properties(&root);
        let metadata = load_metadata(&mut session);
        let rels = session.rels_for(&presentation_path);

        let masters = load_masters(&mut session, &root, &rels);
        let layout_masters: HashMap<&str, &str> = masters
            .iter()
            .flat_map(|m| m.layouts.iter().map(move |l| (l.id.as_str(), m.id.as_str())))
            .collect();

        let prepared = prepare_slides(&mut session, &root, &rels, &layout_masters);
        let built: Vec<(Slide, Diagnostics)> = if self.options.parallel_slides {
            prepared
                .par_iter()
                .map(|p| build_prepared_slide(p, &self.options))
                .collect()
        } else {
            prepared
                .iter()
                .map(|p| build_prepared_slide(p, &self.options))
                .collect()
        };
        let mut slides = Vec::with_capacity(built.len());
        for (slide, diagnostics) in built {
            session.diagnostics_mut().merge(diagnostics);
            slides.push(slide);
        }

        let mut resources = if self.options.extract_resources {
            load_resources(&mut session)
        } else {
            Resources::default()
        };

        let (themes, diagnostics) = session.finish();
        resources.themes = themes;
        log::debug!(
            "parsed {} masters and {} slides with {} warnings",
            masters.len(),
            slides.len(),
            diagnostics.warnings.len()
        );

        Ok(ParseOutput {
            presentation: Presentation {
                properties,
                metadata,
                masters,
                slides,
                resources,
            },
            diagnostics,
        })
    }
}

/// Presentation part path from the package relationships, else the usual path.
fn locate_presentation(session: &mut ParseSession<'_>) -> String {
    let package_rels = session.rels_for("");
    package_rels
        .first_of_type(relationship_type::OFFICE_DOCUMENT)
        .filter(|r| !r.is_external())
        .map(|r| r.target().to_string())
        .unwrap_or_else(|| part_path::PRESENTATION.to_string())
}

/// Record a part that could not be loaded; the entity it backs is skipped.
fn report_unreadable(session: &mut ParseSession<'_>, path: &str, error: &OoxmlError) {
    let code = match error {
        OoxmlError::Opc(OpcError::PartNotFound(_)) | OoxmlError::PartNotFound(_) => {
            IssueCode::MissingPart
        },
        _ => IssueCode::MalformedPart,
    };
    session
        .diagnostics_mut()
        .error(code, format!("part unreadable: {}", error), Some(path));
}

/// Load a part with everything its builder needs, or report it and return `None`.
fn prepare_part(session: &mut ParseSession<'_>, path: &str) -> Option<PreparedPart> {
    let root = match session.read_xml(path) {
        Ok(root) => root,
        Err(e) => {
            report_unreadable(session, path, &e);
            return None;
        },
    };
    let rels = session.rels_for(path);
    let linked = session.load_linked_parts(&rels);
    Some(PreparedPart {
        path: path.to_string(),
        root,
        rels,
        linked,
    })
}

/// Targets of the `r:id` attributes under an id list (`p:sldIdLst`...), in order.
fn id_list_targets(
    session: &mut ParseSession<'_>,
    list: Option<&XmlNode>,
    entry: &str,
    rels: &Relationships,
) -> Vec<String> {
    let Some(list) = list else {
        return Vec::new();
    };
    list.children_named(entry)
        .into_iter()
        .filter_map(|node| {
            let r_id = node.attr_or("r:id", "");
            match rels.get(r_id) {
                Some(rel) => Some(rel.target().to_string()),
                None => {
                    session.diagnostics_mut().warn(
                        IssueCode::MissingRelationship,
                        format!("{} {} has no target", entry, r_id),
                        Some(rels.source_path()),
                        Some(r_id),
                    );
                    None
                },
            }
        })
        .collect()
}

fn load_metadata(session: &mut ParseSession<'_>) -> Metadata {
    let source = session.source();

    let mut metadata = match source.read_optional(part_path::CORE_PROPERTIES) {
        Ok(Some(bytes)) => match parse_core_properties(session.parser(), &bytes) {
            Ok(metadata) => metadata,
            Err(e) => {
                session.diagnostics_mut().warn(
                    IssueCode::MalformedPart,
                    format!("core properties unreadable: {}", e),
                    Some(part_path::CORE_PROPERTIES),
                    None,
                );
                Metadata::default()
            },
        },
        Ok(None) => Metadata::default(),
        Err(e) => {
            session.diagnostics_mut().warn(
                IssueCode::MissingPart,
                format!("core properties unreadable: {}", e),
                Some(part_path::CORE_PROPERTIES),
                None,
            );
            Metadata::default()
        },
    };

    if let Ok(Some(bytes)) = source.read_optional(part_path::APP_PROPERTIES)
        && let Err(e) = apply_app_properties(session.parser(), &bytes, &mut metadata)
    {
        session.diagnostics_mut().warn(
            IssueCode::MalformedPart,
            format!("extended properties unreadable: {}", e),
            Some(part_path::APP_PROPERTIES),
            None,
        );
    }

    metadata
}

/// Theme of a master; the default Office theme when it cannot be loaded.
fn master_theme(session: &mut ParseSession<'_>, master_path: &str, rels: &Relationships) -> (String, Theme) {
    let theme_path = rels
        .first_of_type(relationship_type::THEME)
        .map(|r| r.target().to_string());

    if let Some(path) = &theme_path
        && let Some(theme) = session.theme(path)
    {
        return (path.clone(), theme);
    }

    session.diagnostics_mut().warn(
        IssueCode::MissingTheme,
        match &theme_path {
            Some(path) => format!("theme {} not loaded, using the default theme", path),
            None => "master has no theme, using the default theme".to_string(),
        },
        Some(master_path),
        theme_path.as_deref(),
    );
    (theme_path.unwrap_or_default(), Theme::default())
}

fn load_masters(session: &mut ParseSession<'_>, root: &XmlNode, rels: &Relationships) -> Vec<SlideMaster> {
    let paths = id_list_targets(session, root.child("sldMasterIdLst"), "sldMasterId", rels);
    let options = session.options();
    let mut masters = Vec::with_capacity(paths.len());

    for path in paths {
        let Some(part) = prepare_part(session, &path) else {
            continue;
        };
        let (theme_path, theme) = master_theme(session, &path, &part.rels);

        let mut ctx = PartContext::new(&part.path, &part.rels, options, &part.linked);
        let mut master = build_master(&part.root, theme_path, theme, &mut ctx);
        session.diagnostics_mut().merge(ctx.into_diagnostics());

        let mut layout_paths = id_list_targets(
            session,
            part.root.child("sldLayoutIdLst"),
            "sldLayoutId",
            &part.rels,
        );
        if layout_paths.is_empty() {
            layout_paths = part
                .rels
                .by_type(relationship_type::SLIDE_LAYOUT)
                .map(|r| r.target().to_string())
                .collect();
        }

        for layout_path in layout_paths {
            let Some(layout_part) = prepare_part(session, &layout_path) else {
                continue;
            };
            let mut ctx = PartContext::new(
                &layout_part.path,
                &layout_part.rels,
                options,
                &layout_part.linked,
            );
            let layout = build_layout(&layout_part.root, path.clone(), &mut ctx);
            session.diagnostics_mut().merge(ctx.into_diagnostics());
            master.layouts.push(layout);
        }

        log::debug!("master {} has {} layouts", path, master.layouts.len());
        masters.push(master);
    }

    masters
}

fn prepare_slides(
    session: &mut ParseSession<'_>,
    root: &XmlNode,
    rels: &Relationships,
    layout_masters: &HashMap<&str, &str>,
) -> Vec<PreparedSlide> {
    let paths = id_list_targets(session, root.child("sldIdLst"), "sldId", rels);
    let include_notes = session.options().include_notes;
    let mut prepared = Vec::with_capacity(paths.len());

    for path in paths {
        let Some(part) = prepare_part(session, &path) else {
            continue;
        };

        let layout_target = part
            .rels
            .first_of_type(relationship_type::SLIDE_LAYOUT)
            .map(|r| r.target().to_string());
        let (layout_id, master_id) = match layout_target
            .as_deref()
            .and_then(|l| layout_masters.get(l).map(|m| (l, *m)))
        {
            Some((layout, master)) => (layout.to_string(), master.to_string()),
            None => {
                session.diagnostics_mut().warn(
                    IssueCode::MissingLayout,
                    match &layout_target {
                        Some(target) => format!("layout {} is not part of any master", target),
                        None => "slide has no layout relationship".to_string(),
                    },
                    Some(&path),
                    layout_target.as_deref(),
                );
                (String::new(), String::new())
            },
        };

        let notes = if include_notes {
            part.rels
                .first_of_type(relationship_type::NOTES_SLIDE)
                .map(|r| r.target().to_string())
                .and_then(|notes_path| prepare_part(session, &notes_path))
        } else {
            None
        };

        prepared.push(PreparedSlide {
            index: prepared.len() + 1,
            part,
            layout_id,
            master_id,
            notes,
        });
    }

    prepared
}

/// Build one slide and its notes from loaded parts. Performs no I/O.
fn build_prepared_slide(prepared: &PreparedSlide, options: &ParseOptions) -> (Slide, Diagnostics) {
    let part = &prepared.part;
    let mut ctx = PartContext::new(&part.path, &part.rels, options, &part.linked);
    let mut slide = build_slide(
        &part.root,
        prepared.index,
        prepared.layout_id.clone(),
        prepared.master_id.clone(),
        &mut ctx,
    );
    let mut diagnostics = ctx.into_diagnostics();

    slide.notes = prepared.notes.as_ref().map(|notes| {
        let mut ctx = PartContext::new(&notes.path, &notes.rels, options, &notes.linked);
        let built: Notes = build_notes(&notes.root, &mut ctx);
        diagnostics.merge(ctx.into_diagnostics());
        built
    });

    (slide, diagnostics)
}

fn load_resources(session: &mut ParseSession<'_>) -> Resources {
    let source = session.source();
    let mut resources = Resources::default();

    let dirs = [
        part_path::MEDIA_DIR,
        part_path::EMBEDDINGS_DIR,
        part_path::FONTS_DIR,
    ];
    for dir in dirs {
        for path in source.list_paths_matching(dir) {
            let bytes = match source.read_part(&path) {
                Ok(bytes) => bytes,
                Err(e) => {
                    session.diagnostics_mut().warn(
                        IssueCode::MissingPart,
                        format!("resource unreadable: {}", e),
                        Some(&path),
                        None,
                    );
                    continue;
                },
            };
            let target = match dir {
                part_path::MEDIA_DIR => {
                    if is_image(&path, session.content_types().content_type(&path)) {
                        &mut resources.images
                    } else {
                        &mut resources.media
                    }
                },
                part_path::EMBEDDINGS_DIR => &mut resources.embeddings,
                _ => &mut resources.fonts,
            };
            target.insert(path, bytes);
        }
    }

    log::debug!(
        "resources: {} images, {} media, {} embeddings, {} fonts",
        resources.images.len(),
        resources.media.len(),
        resources.embeddings.len(),
        resources.fonts.len()
    );
    resources
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::xml::MarkupParser;

    #[test]
    fn test_parse_properties() {
        let root = MarkupParser::new()
            .parse(br#"<p:presentation firstSlideNum="3" rtl="1"><p:sldSz cx="12192000" cy="6858000"/><p:notesSz cx="6858000" cy="9144000"/></p:presentation>"#)
            .unwrap();
        let props = parse_properties(&root);
        assert_eq!(props.slide_width, 12_192_000);
        assert_eq!(props.slide_height, 6_858_000);
        assert_eq!(props.notes_height, 9_144_000);
        assert_eq!(props.first_slide_number, 3);
        assert!(props.rtl);
        assert!(!props.save_subset_fonts);
        assert_eq!(props.slide_size_type, None);
    }

    #[test]
    fn test_properties_default() {
        let root = MarkupParser::new().parse(b"<p:presentation/>").unwrap();
        assert_eq!(parse_properties(&root), Properties::default());
    }

    #[test]
    fn test_resources_serialize_sizes() {
        let mut resources = Resources::default();
        resources
            .images
            .insert("ppt/media/image1.png".to_string(), vec![0; 4]);
        assert_eq!(resources.get("ppt/media/image1.png").map(<[u8]>::len), Some(4));
        let json = serde_json::to_value(&resources).unwrap();
        assert_eq!(json["images"]["ppt/media/image1.png"], 4);
    }
}
