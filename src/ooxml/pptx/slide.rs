/// Slides, slide layouts, slide masters and notes.
///
/// The builders here turn an already parsed part root into its model value. They
/// never read from the package: the assembler loads the part, its relationships
/// and its linked charts and diagrams first, then links the results together
/// (slide to layout to master) by part path.
use crate::ooxml::pptx::animations::{SlideTiming, parse_timing};
use crate::ooxml::pptx::backgrounds::{Background, parse_background};
use crate::ooxml::pptx::session::PartContext;
use crate::ooxml::pptx::shapes::{SlideElement, parse_shape_tree};
use crate::ooxml::pptx::text::{ListStyle, parse_list_style};
use crate::ooxml::pptx::theme::Theme;
use crate::ooxml::pptx::transitions::{SlideTransition, parse_transition};
use crate::ooxml::xml::XmlNode;
use serde::Serialize;
use std::collections::BTreeMap;

/// Color map entries in schema order, with their default targets.
const COLOR_MAP_DEFAULTS: [(&str, &str); 12] = [
    ("bg1", "lt1"),
    ("tx1", "dk1"),
    ("bg2", "lt2"),
    ("tx2", "dk2"),
    ("accent1", "accent1"),
    ("accent2", "accent2"),
    ("accent3", "accent3"),
    ("accent4", "accent4"),
    ("accent5", "accent5"),
    ("accent6", "accent6"),
    ("hlink", "hlink"),
    ("folHlink", "folHlink"),
];

/// Mapping of logical color names (`bg1`, `tx1`...) to theme slots (`p:clrMap`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorMap(pub BTreeMap<String, String>);

impl Default for ColorMap {
    fn default() -> Self {
        Self(
            COLOR_MAP_DEFAULTS
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }
}

impl ColorMap {
    /// Read the mapping attributes of a `p:clrMap` or `a:overrideClrMapping`;
    /// absent entries keep their default.
    pub fn from_node(node: &XmlNode) -> Self {
        let mut map = Self::default();
        for (name, _) in COLOR_MAP_DEFAULTS {
            if let Some(target) = node.attr(name) {
                map.0.insert(name.to_string(), target.to_string());
            }
        }
        map
    }

    /// Theme slot for a logical name; names that are not mapped pass through.
    pub fn map<'a>(&'a self, name: &'a str) -> &'a str {
        self.0.get(name).map(String::as_str).unwrap_or(name)
    }
}

/// Master text styles (`p:txStyles`).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyles {
    pub title: ListStyle,
    pub body: ListStyle,
    pub other: ListStyle,
}

/// Speaker notes of a slide.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notes {
    pub path: String,
    /// Text of the body placeholders, paragraphs joined with `\n`
    pub text: String,
    pub elements: Vec<SlideElement>,
}

/// A slide.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Slide {
    /// 1-based position in the presentation
    pub index: usize,
    pub path: String,
    pub name: Option<String>,
    /// `show="0"`
    pub hidden: bool,
    /// Part path of the layout; empty when the layout cannot be resolved
    pub layout_id: String,
    /// Part path of the master; empty when unknown
    pub master_id: String,
    /// `p:clrMapOvr/a:overrideClrMapping`; `None` follows the master
    pub color_map_override: Option<ColorMap>,
    pub elements: Vec<SlideElement>,
    pub background: Option<Background>,
    pub transition: Option<SlideTransition>,
    pub timing: Option<SlideTiming>,
    pub notes: Option<Notes>,
}

impl Slide {
    /// Text of the first title placeholder.
    pub fn title(&self) -> Option<String> {
        self.elements
            .iter()
            .find(|e| e.placeholder().is_some_and(|ph| ph.is_title()))
            .map(SlideElement::text)
    }

    /// Text of every element, one element per line.
    pub fn text(&self) -> String {
        self.elements
            .iter()
            .map(SlideElement::text)
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn has_layout(&self) -> bool {
        !self.layout_id.is_empty()
    }
}

/// A slide layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideLayout {
    /// Part path
    pub id: String,
    pub name: Option<String>,
    /// `type` (`title`, `obj`, `twoObj`... default `cust`)
    pub layout_type: String,
    pub preserve: bool,
    pub user_drawn: bool,
    pub master_id: String,
    /// `showMasterSp`
    pub show_master_shapes: bool,
    /// `showMasterPhAnim`
    pub show_master_placeholder_animations: bool,
    pub color_map_override: Option<ColorMap>,
    pub elements: Vec<SlideElement>,
    pub background: Option<Background>,
    pub transition: Option<SlideTransition>,
}

/// A slide master with its layouts.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideMaster {
    /// Part path
    pub id: String,
    pub name: Option<String>,
    /// Theme part path; empty when the master has no theme relationship
    pub theme_path: String,
    pub theme: Theme,
    pub color_map: ColorMap,
    pub text_styles: TextStyles,
    pub layouts: Vec<SlideLayout>,
    pub elements: Vec<SlideElement>,
    pub background: Option<Background>,
    pub transition: Option<SlideTransition>,
    pub preserve: bool,
}

impl SlideMaster {
    pub fn layout(&self, id: &str) -> Option<&SlideLayout> {
        self.layouts.iter().find(|l| l.id == id)
    }
}

/// Name, elements and background of a `p:cSld`.
struct CommonSlideData {
    name: Option<String>,
    elements: Vec<SlideElement>,
    background: Option<Background>,
}

fn parse_common_slide_data(root: &XmlNode, ctx: &mut PartContext<'_>) -> CommonSlideData {
    let Some(c_sld) = root.child("cSld") else {
        return CommonSlideData {
            name: None,
            elements: Vec::new(),
            background: None,
        };
    };

    CommonSlideData {
        name: c_sld
            .attr("name")
            .filter(|n| !n.is_empty())
            .map(str::to_string),
        elements: c_sld
            .child("spTree")
            .map(|tree| parse_shape_tree(tree, ctx))
            .unwrap_or_default(),
        background: parse_background(c_sld, ctx),
    }
}

fn parse_color_map_override(root: &XmlNode) -> Option<ColorMap> {
    root.child("clrMapOvr")
        .and_then(|ovr| ovr.child("overrideClrMapping"))
        .map(ColorMap::from_node)
}

/// Build a slide from its `p:sld` root. Notes are attached by the caller.
pub fn build_slide(
    root: &XmlNode,
    index: usize,
    layout_id: String,
    master_id: String,
    ctx: &mut PartContext<'_>,
) -> Slide {
    let data = parse_common_slide_data(root, ctx);
    let timing = if ctx.options.include_timing {
        root.child("timing")
            .map(|t| parse_timing(t, ctx))
            .filter(|t| !t.is_empty())
    } else {
        None
    };

    log::debug!(
        "built slide {} ({}) with {} elements",
        index,
        ctx.part_path,
        data.elements.len()
    );

    Slide {
        index,
        path: ctx.part_path.to_string(),
        name: data.name,
        hidden: !root.attr_bool("show").unwrap_or(true),
        layout_id,
        master_id,
        color_map_override: parse_color_map_override(root),
        elements: data.elements,
        background: data.background,
        transition: parse_transition(root, ctx),
        timing,
        notes: None,
    }
}

/// Build a layout from its `p:sldLayout` root.
pub fn build_layout(root: &XmlNode, master_id: String, ctx: &mut PartContext<'_>) -> SlideLayout {
    let data = parse_common_slide_data(root, ctx);
    log::debug!(
        "built layout {} with {} elements",
        ctx.part_path,
        data.elements.len()
    );

    SlideLayout {
        id: ctx.part_path.to_string(),
        name: data.name,
        layout_type: root.attr_or("type", "cust").to_string(),
        preserve: root.attr_bool("preserve").unwrap_or(false),
        user_drawn: root.attr_bool("userDrawn").unwrap_or(false),
        master_id,
        show_master_shapes: root.attr_bool("showMasterSp").unwrap_or(true),
        show_master_placeholder_animations: root.attr_bool("showMasterPhAnim").unwrap_or(true),
        color_map_override: parse_color_map_override(root),
        elements: data.elements,
        background: data.background,
        transition: parse_transition(root, ctx),
    }
}

/// Build a master from its `p:sldMaster` root. Layouts are attached by the caller.
pub fn build_master(
    root: &XmlNode,
    theme_path: String,
    theme: Theme,
    ctx: &mut PartContext<'_>,
) -> SlideMaster {
    let data = parse_common_slide_data(root, ctx);
    let tx_styles = root.child("txStyles");
    let mut style = |name: &str| {
        tx_styles
            .and_then(|s| s.child(name))
            .map(|n| parse_list_style(n, ctx))
            .unwrap_or_default()
    };
    let text_styles = TextStyles {
        title: style("titleStyle"),
        body: style("bodyStyle"),
        other: style("otherStyle"),
    };
    log::debug!(
        "built master {} with {} elements",
        ctx.part_path,
        data.elements.len()
    );

    SlideMaster {
        id: ctx.part_path.to_string(),
        name: data.name,
        theme_path,
        theme,
        color_map: root
            .child("clrMap")
            .map(ColorMap::from_node)
            .unwrap_or_default(),
        text_styles,
        layouts: Vec::new(),
        elements: data.elements,
        background: data.background,
        transition: parse_transition(root, ctx),
        preserve: root.attr_bool("preserve").unwrap_or(false),
    }
}

/// Build the notes of a slide from its `p:notes` root.
pub fn build_notes(root: &XmlNode, ctx: &mut PartContext<'_>) -> Notes {
    let data = parse_common_slide_data(root, ctx);
    let text = data
        .elements
        .iter()
        .flat_map(SlideElement::descendants)
        .filter(|e| e.placeholder().is_some_and(|ph| ph.ph_type == "body"))
        .map(SlideElement::text)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    Notes {
        path: ctx.part_path.to_string(),
        text,
        elements: data.elements,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::opc::Relationships;
    use crate::ooxml::pptx::session::{LinkedParts, ParseOptions};
    use crate::ooxml::xml::MarkupParser;

    fn with_ctx<T>(
        path: &str,
        xml: &str,
        options: ParseOptions,
        f: impl FnOnce(&XmlNode, &mut PartContext<'_>) -> T,
    ) -> T {
        let root = MarkupParser::new().parse(xml.as_bytes()).unwrap();
        let rels = Relationships::new(path);
        let linked = LinkedParts::default();
        let mut ctx = PartContext::new(path, &rels, &options, &linked);
        f(&root, &mut ctx)
    }

    const SLIDE: &str = r#"<p:sld show="0"><p:cSld name="Intro">
  <p:bg><p:bgRef idx="1001"><a:schemeClr val="bg1"/></p:bgRef></p:bg>
  <p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/>
    <p:sp><p:nvSpPr><p:cNvPr id="2" name="Title 1"/><p:cNvSpPr/><p:nvPr><p:ph type="title"/></p:nvPr></p:nvSpPr><p:spPr/>
      <p:txBody><a:bodyPr/><a:p><a:r><a:t>Quarterly review</a:t></a:r></a:p></p:txBody></p:sp>
    <p:sp><p:nvSpPr><p:cNvPr id="3" name="Content 2"/><p:cNvSpPr/><p:nvPr><p:ph idx="1"/></p:nvPr></p:nvSpPr><p:spPr/>
      <p:txBody><a:bodyPr/><a:p><a:r><a:t>Revenue</a:t></a:r></a:p><a:p><a:r><a:t>Costs</a:t></a:r></a:p></p:txBody></p:sp>
  </p:spTree></p:cSld>
  <p:clrMapOvr><a:overrideClrMapping bg1="dk1" tx1="lt1" bg2="dk2" tx2="lt2" accent1="accent1" accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/></p:clrMapOvr>
  <p:transition spd="med"><p:fade/></p:transition>
  <p:timing><p:tnLst><p:par><p:cTn id="1" dur="indefinite" nodeType="tmRoot"/></p:par></p:tnLst></p:timing>
</p:sld>"#;

    #[test]
    fn test_build_slide() {
        let slide = with_ctx("ppt/slides/slide1.xml", SLIDE, ParseOptions::default(), |root, ctx| {
            build_slide(root, 1, "ppt/slideLayouts/slideLayout2.xml".into(), "ppt/slideMasters/slideMaster1.xml".into(), ctx)
        });
        assert_eq!(slide.index, 1);
        assert_eq!(slide.name.as_deref(), Some("Intro"));
        assert!(slide.hidden);
        assert!(slide.has_layout());
        assert_eq!(slide.elements.len(), 2);
        assert_eq!(slide.title().as_deref(), Some("Quarterly review"));
        assert_eq!(slide.text(), "Quarterly review\nRevenue\nCosts");
        assert_eq!(slide.transition.as_ref().map(|t| t.kind.as_str()), Some("fade"));
        assert!(slide.timing.is_some());
        assert!(matches!(slide.background, Some(Background::Reference { idx: 1001, .. })));
        assert_eq!(slide.color_map_override.as_ref().map(|m| m.map("bg1")), Some("dk1"));
    }

    #[test]
    fn test_timing_can_be_disabled() {
        let slide = with_ctx(
            "ppt/slides/slide1.xml",
            SLIDE,
            ParseOptions::default().with_timing(false),
            |root, ctx| build_slide(root, 1, String::new(), String::new(), ctx),
        );
        assert!(slide.timing.is_none());
        assert!(!slide.has_layout());
    }

    #[test]
    fn test_build_layout_defaults() {
        let layout = with_ctx(
            "ppt/slideLayouts/slideLayout1.xml",
            r#"<p:sldLayout type="title" preserve="1"><p:cSld name="Title Slide"><p:spTree/></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sldLayout>"#,
            ParseOptions::default(),
            |root, ctx| build_layout(root, "ppt/slideMasters/slideMaster1.xml".into(), ctx),
        );
        assert_eq!(layout.id, "ppt/slideLayouts/slideLayout1.xml");
        assert_eq!(layout.layout_type, "title");
        assert!(layout.preserve);
        assert!(layout.show_master_shapes);
        assert!(layout.show_master_placeholder_animations);
        assert_eq!(layout.color_map_override, None);
        assert!(layout.transition.is_none());
    }

    #[test]
    fn test_build_master_text_styles() {
        let master = with_ctx(
            "ppt/slideMasters/slideMaster1.xml",
            r#"<p:sldMaster><p:cSld><p:spTree/></p:cSld>
                <p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/>
                <p:txStyles>
                  <p:titleStyle><a:lvl1pPr algn="l"><a:defRPr sz="4400"/></a:lvl1pPr></p:titleStyle>
                  <p:bodyStyle><a:lvl1pPr marL="228600" indent="-228600"><a:buChar char="•"/><a:defRPr sz="2800"/></a:lvl1pPr><a:lvl2pPr marL="685800"><a:defRPr sz="2400"/></a:lvl2pPr></p:bodyStyle>
                  <p:otherStyle><a:defPPr><a:defRPr lang="en-US"/></a:defPPr></p:otherStyle>
                </p:txStyles></p:sldMaster>"#,
            ParseOptions::default(),
            |root, ctx| build_master(root, "ppt/theme/theme1.xml".into(), Theme::default(), ctx),
        );
        assert_eq!(master.color_map, ColorMap::default());
        assert_eq!(master.color_map.map("tx1"), "dk1");
        assert_eq!(master.text_styles.body.levels.len(), 2);
        assert_eq!(master.text_styles.body.level(1).and_then(|p| p.margin_left), Some(685_800));
        assert!(master.text_styles.title.level(0).is_some());
        assert!(master.text_styles.other.default.is_some());
        assert!(master.layouts.is_empty());
    }

    #[test]
    fn test_build_notes_text() {
        let notes = with_ctx(
            "ppt/notesSlides/notesSlide1.xml",
            r#"<p:notes><p:cSld><p:spTree>
                <p:sp><p:nvSpPr><p:cNvPr id="2" name="Slide Image"/><p:cNvSpPr/><p:nvPr><p:ph type="sldImg"/></p:nvPr></p:nvSpPr><p:spPr/></p:sp>
                <p:sp><p:nvSpPr><p:cNvPr id="3" name="Notes"/><p:cNvSpPr/><p:nvPr><p:ph type="body" idx="1"/></p:nvPr></p:nvSpPr><p:spPr/>
                  <p:txBody><a:bodyPr/><a:p><a:r><a:t>Mention the </a:t></a:r><a:r><a:t>new hires</a:t></a:r></a:p><a:p><a:r><a:t>Ask for questions</a:t></a:r></a:p></p:txBody></p:sp>
                <p:sp><p:nvSpPr><p:cNvPr id="4" name="Slide Number"/><p:cNvSpPr/><p:nvPr><p:ph type="sldNum" idx="5"/></p:nvPr></p:nvSpPr><p:spPr/>
                  <p:txBody><a:bodyPr/><a:p><a:r><a:t>1</a:t></a:r></a:p></p:txBody></p:sp>
            </p:spTree></p:cSld></p:notes>"#,
            ParseOptions::default(),
            |root, ctx| build_notes(root, ctx),
        );
        assert_eq!(notes.text, "Mention the new hires\nAsk for questions");
        assert_eq!(notes.elements.len(), 3);
    }
}
