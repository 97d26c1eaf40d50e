//! Text bodies: `p:txBody`, `a:txBody` and list styles.
//!
//! Properties are returned exactly as declared on each node. Working out effective
//! formatting through paragraph defaults, list style levels and placeholder
//! inheritance is left to the consumer.
//!
//! Paragraph content is collected as runs (`a:r`), then breaks (`a:br`), then
//! fields (`a:fld`), each group in source order. With
//! [`ParseOptions::preserve_document_order`](super::session::ParseOptions) the
//! children are taken in a single pass instead.

use crate::common::unit::{DEFAULT_INSET_LR, DEFAULT_INSET_TB, angle_to_degrees};
use crate::ooxml::drawings::color::{Color, parse_color};
use crate::ooxml::drawings::fill::{Fill, PictureFill, parse_fill, parse_picture_fill};
use crate::ooxml::pptx::diagnostics::IssueCode;
use crate::ooxml::pptx::session::PartContext;
use crate::ooxml::xml::XmlNode;
use serde::Serialize;
use std::collections::BTreeMap;

/// Number of list style levels (`lvl1pPr`..`lvl9pPr`).
pub const LIST_LEVELS: u8 = 9;

/// A click or hover action (`a:hlinkClick`, `a:hlinkHover`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Hyperlink {
    pub r_id: Option<String>,
    /// External URL, or package path of an internal target such as a slide
    pub target: Option<String>,
    pub is_external: bool,
    /// `ppaction://...` verb, e.g. `ppaction://hlinksldjump`
    pub action: Option<String>,
    pub tooltip: Option<String>,
}

/// Parse a hyperlink element, resolving its relationship id.
pub fn parse_hyperlink(node: &XmlNode, ctx: &mut PartContext<'_>) -> Hyperlink {
    let rels = ctx.rels;
    let r_id = node.attr("id").filter(|id| !id.is_empty());
    let rel = r_id.and_then(|id| rels.get(id));
    if let (Some(id), None) = (r_id, rel) {
        ctx.warn(
            IssueCode::MissingRelationship,
            format!("hyperlink relationship {} has no target", id),
            Some(node.local_name()),
        );
    }

    Hyperlink {
        r_id: r_id.map(str::to_string),
        target: rel.map(|r| r.target().to_string()),
        is_external: rel.is_some_and(|r| r.is_external()),
        action: node.attr("action").map(str::to_string),
        tooltip: node.attr("tooltip").map(str::to_string),
    }
}

/// Text autofit mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Autofit {
    None,
    /// Shrink text on overflow
    #[serde(rename_all = "camelCase")]
    Normal {
        /// Font scale in 1,000ths of a percent
        font_scale: Option<i32>,
        line_spacing_reduction: Option<i32>,
    },
    /// Resize the shape to fit the text
    Shape,
}

/// Inner margins of a text body in EMU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Insets {
    pub left: i64,
    pub top: i64,
    pub right: i64,
    pub bottom: i64,
}

impl Default for Insets {
    fn default() -> Self {
        Self {
            left: DEFAULT_INSET_LR,
            top: DEFAULT_INSET_TB,
            right: DEFAULT_INSET_LR,
            bottom: DEFAULT_INSET_TB,
        }
    }
}

/// `a:bodyPr`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyProperties {
    /// `t`, `ctr`, `b`, `just`, `dist`
    pub anchor: Option<String>,
    pub anchor_center: bool,
    pub insets: Insets,
    /// `square` or `none`
    pub wrap: Option<String>,
    pub columns: u32,
    /// Column gap in EMU
    pub column_spacing: i64,
    /// `horz`, `vert`, `vert270`, `eaVert`...
    pub vertical: Option<String>,
    /// Text rotation in degrees
    pub rotation: Option<f64>,
    pub autofit: Option<Autofit>,
}

impl Default for BodyProperties {
    fn default() -> Self {
        Self {
            anchor: None,
            anchor_center: false,
            insets: Insets::default(),
            wrap: None,
            columns: 1,
            column_spacing: 0,
            vertical: None,
            rotation: None,
            autofit: None,
        }
    }
}

/// Line or paragraph spacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Spacing {
    /// 1,000ths of a percent of the line height
    Percent { value: i32 },
    /// 100ths of a point
    Points { value: i32 },
}

fn parse_spacing(node: Option<&XmlNode>) -> Option<Spacing> {
    let node = node?;
    if let Some(v) = node.child("spcPct").and_then(|n| n.attr_i32("val")) {
        return Some(Spacing::Percent { value: v });
    }
    node.child("spcPts")
        .and_then(|n| n.attr_i32("val"))
        .map(|value| Spacing::Points { value })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum BulletKind {
    None,
    Char {
        char: String,
    },
    #[serde(rename_all = "camelCase")]
    AutoNumber {
        /// `arabicPeriod`, `romanUcPeriod`, `alphaLcParenR`...
        scheme: String,
        start_at: u32,
    },
    Picture(PictureFill),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum BulletSize {
    /// 1,000ths of a percent of the text size
    Percent { value: i32 },
    /// 100ths of a point
    Points { value: i32 },
}

/// Bullet declaration of a paragraph. Font, color and size absent means they
/// follow the first run of the paragraph.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bullet {
    pub kind: BulletKind,
    pub font: Option<String>,
    pub color: Option<Color>,
    pub size: Option<BulletSize>,
}

const BULLET_ELEMENTS: &[&str] = &[
    "buNone", "buChar", "buAutoNum", "buBlip", "buFont", "buFontTx", "buClr", "buClrTx",
    "buSzPct", "buSzPts", "buSzTx",
];

fn parse_bullet(ppr: &XmlNode, ctx: &mut PartContext<'_>) -> Option<Bullet> {
    if !BULLET_ELEMENTS.iter().any(|name| ppr.has_child(name)) {
        return None;
    }

    let kind = if let Some(ch) = ppr.child("buChar") {
        BulletKind::Char {
            char: ch.attr_or("char", "\u{2022}").to_string(),
        }
    } else if let Some(auto) = ppr.child("buAutoNum") {
        BulletKind::AutoNumber {
            scheme: auto.attr_or("type", "arabicPeriod").to_string(),
            start_at: auto.attr_u32("startAt").unwrap_or(1),
        }
    } else if let Some(blip) = ppr.child("buBlip") {
        let picture = parse_picture_fill(blip, ctx.rels);
        if !picture.embed.is_empty() && !picture.is_resolved() {
            ctx.warn(
                IssueCode::UnresolvedImage,
                format!("bullet image {} has no target", picture.embed),
                Some("buBlip"),
            );
        }
        BulletKind::Picture(picture)
    } else {
        BulletKind::None
    };

    let size = ppr
        .child("buSzPct")
        .and_then(|n| n.attr_i32("val"))
        .map(|value| BulletSize::Percent { value })
        .or_else(|| {
            ppr.child("buSzPts")
                .and_then(|n| n.attr_i32("val"))
                .map(|value| BulletSize::Points { value })
        });

    Some(Bullet {
        kind,
        font: ppr
            .child("buFont")
            .and_then(|n| n.attr("typeface"))
            .map(str::to_string),
        color: ppr.child("buClr").and_then(parse_color),
        size,
    })
}

/// Character formatting (`a:rPr`, `a:defRPr`, `a:endParaRPr`).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunProperties {
    /// Font size in 100ths of a point
    pub size: Option<u32>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    /// `sng`, `dbl`, `none`...
    pub underline: Option<String>,
    /// `sngStrike`, `dblStrike`, `noStrike`
    pub strike: Option<String>,
    /// Superscript/subscript offset in 1,000ths of a percent
    pub baseline: Option<i32>,
    /// `all`, `small`, `none`
    pub cap: Option<String>,
    /// Character spacing in 100ths of a point
    pub spacing: Option<i32>,
    pub lang: Option<String>,
    pub fill: Option<Fill>,
    pub highlight: Option<Color>,
    pub latin: Option<String>,
    pub east_asian: Option<String>,
    pub complex_script: Option<String>,
    pub symbol: Option<String>,
    pub hyperlink: Option<Hyperlink>,
}

pub fn parse_run_properties(rpr: &XmlNode, ctx: &mut PartContext<'_>) -> RunProperties {
    let typeface = |name: &str| {
        rpr.child(name)
            .and_then(|n| n.attr("typeface"))
            .map(str::to_string)
    };

    RunProperties {
        size: rpr.attr_u32("sz"),
        bold: rpr.attr_bool("b"),
        italic: rpr.attr_bool("i"),
        underline: rpr.attr("u").map(str::to_string),
        strike: rpr.attr("strike").map(str::to_string),
        baseline: rpr.attr_i32("baseline"),
        cap: rpr.attr("cap").map(str::to_string),
        spacing: rpr.attr_i32("spc"),
        lang: rpr.attr("lang").map(str::to_string),
        fill: parse_fill(rpr, ctx.rels),
        highlight: rpr.child("highlight").and_then(parse_color),
        latin: typeface("latin"),
        east_asian: typeface("ea"),
        complex_script: typeface("cs"),
        symbol: typeface("sym"),
        hyperlink: rpr.child("hlinkClick").map(|h| parse_hyperlink(h, ctx)),
    }
}

/// Paragraph formatting (`a:pPr`, list style levels).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphProperties {
    /// `l`, `ctr`, `r`, `just`, `dist`
    pub alignment: Option<String>,
    /// Indent level, 0 to 8
    pub level: u8,
    pub margin_left: Option<i64>,
    pub margin_right: Option<i64>,
    pub indent: Option<i64>,
    pub rtl: Option<bool>,
    pub line_spacing: Option<Spacing>,
    pub space_before: Option<Spacing>,
    pub space_after: Option<Spacing>,
    pub bullet: Option<Bullet>,
    pub default_run_properties: Option<RunProperties>,
}

pub fn parse_paragraph_properties(
    ppr: &XmlNode,
    ctx: &mut PartContext<'_>,
) -> ParagraphProperties {
    ParagraphProperties {
        alignment: ppr.attr("algn").map(str::to_string),
        level: ppr
            .attr_i64("lvl")
            .unwrap_or(0)
            .clamp(0, LIST_LEVELS as i64 - 1) as u8,
        margin_left: ppr.attr_i64("marL"),
        margin_right: ppr.attr_i64("marR"),
        indent: ppr.attr_i64("indent"),
        rtl: ppr.attr_bool("rtl"),
        line_spacing: parse_spacing(ppr.child("lnSpc")),
        space_before: parse_spacing(ppr.child("spcBef")),
        space_after: parse_spacing(ppr.child("spcAft")),
        bullet: parse_bullet(ppr, ctx),
        default_run_properties: ppr
            .child("defRPr")
            .map(|n| parse_run_properties(n, ctx)),
    }
}

/// Paragraph content item.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TextRun {
    Text {
        text: String,
        properties: Option<RunProperties>,
    },
    Break {
        properties: Option<RunProperties>,
    },
    /// A field such as a slide number or date; `text` is the cached value
    #[serde(rename_all = "camelCase")]
    Field {
        id: String,
        field_type: Option<String>,
        text: String,
        properties: Option<RunProperties>,
    },
}

impl TextRun {
    /// Text contributed by this run; a break contributes a newline.
    pub fn text(&self) -> &str {
        match self {
            TextRun::Text { text, .. } | TextRun::Field { text, .. } => text.as_str(),
            TextRun::Break { .. } => "\n",
        }
    }

    pub fn properties(&self) -> Option<&RunProperties> {
        match self {
            TextRun::Text { properties, .. }
            | TextRun::Break { properties }
            | TextRun::Field { properties, .. } => properties.as_ref(),
        }
    }
}

fn parse_run(node: &XmlNode, ctx: &mut PartContext<'_>) -> Option<TextRun> {
    let properties = node.child("rPr").map(|n| parse_run_properties(n, ctx));
    let text = || node.child("t").map(|t| t.text().to_string()).unwrap_or_default();
    let run = match node.local_name() {
        "r" => TextRun::Text {
            text: text(),
            properties,
        },
        "br" => TextRun::Break { properties },
        "fld" => TextRun::Field {
            id: node.attr_or("id", "").to_string(),
            field_type: node.attr("type").map(str::to_string),
            text: text(),
            properties,
        },
        _ => return None,
    };
    Some(run)
}

/// `a:p`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Paragraph {
    pub properties: Option<ParagraphProperties>,
    pub runs: Vec<TextRun>,
    /// Formatting of the paragraph end mark, used for empty paragraphs
    pub end_properties: Option<RunProperties>,
}

impl Paragraph {
    pub fn level(&self) -> u8 {
        self.properties.as_ref().map(|p| p.level).unwrap_or(0)
    }

    pub fn text(&self) -> String {
        self.runs.iter().map(TextRun::text).collect()
    }
}

const RUN_KINDS: [&str; 3] = ["r", "br", "fld"];

fn parse_paragraph(p: &XmlNode, ctx: &mut PartContext<'_>) -> Paragraph {
    let mut runs = Vec::new();
    if ctx.document_order() {
        for child in p.children() {
            runs.extend(parse_run(child, ctx));
        }
    } else {
        for kind in RUN_KINDS {
            for child in p.children_named(kind) {
                runs.extend(parse_run(child, ctx));
            }
        }
    }

    Paragraph {
        properties: p.child("pPr").map(|n| parse_paragraph_properties(n, ctx)),
        runs,
        end_properties: p.child("endParaRPr").map(|n| parse_run_properties(n, ctx)),
    }
}

/// Default paragraph properties plus up to nine per-level overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListStyle {
    pub default: Option<ParagraphProperties>,
    /// Keyed by zero-based level (`lvl1pPr` is level 0)
    pub levels: BTreeMap<u8, ParagraphProperties>,
}

impl ListStyle {
    pub fn level(&self, level: u8) -> Option<&ParagraphProperties> {
        self.levels.get(&level)
    }

    pub fn is_empty(&self) -> bool {
        self.default.is_none() && self.levels.is_empty()
    }
}

/// Parse `a:lstStyle`, `p:titleStyle`, `p:bodyStyle` or `p:otherStyle`.
pub fn parse_list_style(node: &XmlNode, ctx: &mut PartContext<'_>) -> ListStyle {
    let mut style = ListStyle {
        default: node
            .child("defPPr")
            .map(|n| parse_paragraph_properties(n, ctx)),
        levels: BTreeMap::new(),
    };
    for level in 0..LIST_LEVELS {
        let name = format!("lvl{}pPr", level + 1);
        if let Some(ppr) = node.child(&name) {
            let mut props = parse_paragraph_properties(ppr, ctx);
            props.level = level;
            style.levels.insert(level, props);
        }
    }
    style
}

/// A text body.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextBody {
    pub body_properties: Option<BodyProperties>,
    pub list_style: Option<ListStyle>,
    pub paragraphs: Vec<Paragraph>,
}

impl TextBody {
    /// Plain text, paragraphs joined with `\n`.
    pub fn text(&self) -> String {
        self.paragraphs
            .iter()
            .map(Paragraph::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// True when no paragraph holds any text.
    pub fn is_blank(&self) -> bool {
        self.paragraphs
            .iter()
            .all(|p| p.runs.iter().all(|r| r.text().trim().is_empty()))
    }
}

fn parse_body_properties(node: &XmlNode) -> BodyProperties {
    let defaults = Insets::default();
    let autofit = if node.has_child("noAutofit") {
        Some(Autofit::None)
    } else if let Some(norm) = node.child("normAutofit") {
        Some(Autofit::Normal {
            font_scale: norm.attr_i32("fontScale"),
            line_spacing_reduction: norm.attr_i32("lnSpcReduction"),
        })
    } else if node.has_child("spAutoFit") {
        Some(Autofit::Shape)
    } else {
        None
    };

    BodyProperties {
        anchor: node.attr("anchor").map(str::to_string),
        anchor_center: node.attr_bool("anchorCtr").unwrap_or(false),
        insets: Insets {
            left: node.attr_i64("lIns").unwrap_or(defaults.left),
            top: node.attr_i64("tIns").unwrap_or(defaults.top),
            right: node.attr_i64("rIns").unwrap_or(defaults.right),
            bottom: node.attr_i64("bIns").unwrap_or(defaults.bottom),
        },
        wrap: node.attr("wrap").map(str::to_string),
        columns: node.attr_u32("numCol").unwrap_or(1).max(1),
        column_spacing: node.attr_i64("spcCol").unwrap_or(0),
        vertical: node.attr("vert").map(str::to_string),
        rotation: node
            .attr_i64("rot")
            .filter(|r| *r != 0)
            .map(angle_to_degrees),
        autofit,
    }
}

/// Parse a text body element (`p:txBody`, `a:txBody`, `dgm:t`...).
pub fn parse_text_body(tx_body: &XmlNode, ctx: &mut PartContext<'_>) -> TextBody {
    let list_style = tx_body
        .child("lstStyle")
        .map(|n| parse_list_style(n, ctx))
        .filter(|s| !s.is_empty());
    let paragraphs = tx_body
        .children_named("p")
        .into_iter()
        .map(|p| parse_paragraph(p, ctx))
        .collect();

    TextBody {
        body_properties: tx_body.child("bodyPr").map(parse_body_properties),
        list_style,
        paragraphs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::opc::Relationships;
    use crate::ooxml::pptx::session::{LinkedParts, ParseOptions};
    use crate::ooxml::xml::MarkupParser;

    const RELS: &str = r#"<Relationships>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink" Target="https://example.com/" TargetMode="External"/>
  <Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slide3.xml"/>
</Relationships>"#;

    fn build(xml: &str, options: &ParseOptions) -> (TextBody, usize) {
        let root = MarkupParser::new().parse(xml.as_bytes()).unwrap();
        let rels = Relationships::from_xml(RELS.as_bytes(), "ppt/slides/slide1.xml").unwrap();
        let linked = LinkedParts::default();
        let mut ctx = PartContext::new("ppt/slides/slide1.xml", &rels, options, &linked);
        let body = parse_text_body(&root, &mut ctx);
        (body, ctx.diagnostics.warnings.len())
    }

    const MIXED: &str = r#"<p:txBody><a:bodyPr/><a:p>
        <a:r><a:t>one</a:t></a:r>
        <a:br/>
        <a:r><a:t>two</a:t></a:r>
        <a:fld id="{A1}" type="slidenum"><a:t>4</a:t></a:fld>
    </a:p></p:txBody>"#;

    #[test]
    fn test_runs_grouped_by_kind() {
        let (body, _) = build(MIXED, &ParseOptions::default());
        let runs = &body.paragraphs[0].runs;
        assert_eq!(runs.len(), 4);
        assert_eq!(body.paragraphs[0].text(), "onetwo\n4");
        assert!(matches!(runs[2], TextRun::Break { .. }));
        match &runs[3] {
            TextRun::Field { field_type, text, .. } => {
                assert_eq!(field_type.as_deref(), Some("slidenum"));
                assert_eq!(text, "4");
            },
            other => panic!("unexpected run {:?}", other),
        }
    }

    #[test]
    fn test_runs_in_document_order() {
        let options = ParseOptions::default().with_document_order(true);
        let (body, _) = build(MIXED, &options);
        assert_eq!(body.paragraphs[0].text(), "one\ntwo4");
    }

    #[test]
    fn test_body_property_defaults() {
        let (body, _) = build(
            r#"<p:txBody><a:bodyPr anchor="ctr" lIns="0"><a:normAutofit fontScale="92500"/></a:bodyPr><a:p/></p:txBody>"#,
            &ParseOptions::default(),
        );
        let props = body.body_properties.unwrap();
        assert_eq!(props.anchor.as_deref(), Some("ctr"));
        assert_eq!(props.insets.left, 0);
        assert_eq!(props.insets.top, 45_720);
        assert_eq!(props.insets.right, 91_440);
        assert_eq!(props.columns, 1);
        assert_eq!(
            props.autofit,
            Some(Autofit::Normal {
                font_scale: Some(92_500),
                line_spacing_reduction: None
            })
        );
    }

    #[test]
    fn test_paragraph_properties() {
        let (body, _) = build(
            r#"<p:txBody><a:p><a:pPr lvl="12" algn="ctr" marL="342900" indent="-342900">
                <a:lnSpc><a:spcPct val="90000"/></a:lnSpc><a:spcBef><a:spcPts val="1000"/></a:spcBef>
                <a:buFont typeface="Arial"/><a:buChar char="-"/>
            </a:pPr><a:r><a:t>x</a:t></a:r></a:p>
            <a:p><a:pPr><a:buAutoNum type="romanUcPeriod" startAt="3"/></a:pPr></a:p>
            <a:p><a:endParaRPr sz="1800" lang="en-US"/></a:p></p:txBody>"#,
            &ParseOptions::default(),
        );
        let first = body.paragraphs[0].properties.as_ref().unwrap();
        assert_eq!(first.level, 8);
        assert_eq!(first.alignment.as_deref(), Some("ctr"));
        assert_eq!(first.indent, Some(-342_900));
        assert_eq!(first.line_spacing, Some(Spacing::Percent { value: 90_000 }));
        assert_eq!(first.space_before, Some(Spacing::Points { value: 1_000 }));
        let bullet = first.bullet.as_ref().unwrap();
        assert_eq!(bullet.kind, BulletKind::Char { char: "-".into() });
        assert_eq!(bullet.font.as_deref(), Some("Arial"));

        let second = body.paragraphs[1].properties.as_ref().unwrap();
        assert_eq!(
            second.bullet.as_ref().map(|b| &b.kind),
            Some(&BulletKind::AutoNumber {
                scheme: "romanUcPeriod".into(),
                start_at: 3
            })
        );

        let end = body.paragraphs[2].end_properties.as_ref().unwrap();
        assert_eq!(end.size, Some(1_800));
        assert!(body.paragraphs[2].runs.is_empty());
    }

    #[test]
    fn test_no_bullet_elements_means_no_bullet() {
        let (body, _) = build(
            r#"<p:txBody><a:p><a:pPr algn="l"/></a:p></p:txBody>"#,
            &ParseOptions::default(),
        );
        assert!(body.paragraphs[0].properties.as_ref().unwrap().bullet.is_none());
    }

    #[test]
    fn test_run_properties_and_hyperlinks() {
        let (body, warnings) = build(
            r#"<p:txBody><a:p>
                <a:r><a:rPr lang="en-US" sz="2400" b="1" u="sng"><a:solidFill><a:srgbClr val="FF0000"/></a:solidFill><a:latin typeface="Georgia"/><a:hlinkClick r:id="rId2" tooltip="site"/></a:rPr><a:t>web</a:t></a:r>
                <a:r><a:rPr><a:hlinkClick r:id="rId3" action="ppaction://hlinksldjump"/></a:rPr><a:t>jump</a:t></a:r>
                <a:r><a:rPr><a:hlinkClick r:id="rId9"/></a:rPr><a:t>dangling</a:t></a:r>
            </a:p></p:txBody>"#,
            &ParseOptions::default(),
        );
        let runs = &body.paragraphs[0].runs;

        let web = runs[0].properties().unwrap();
        assert_eq!(web.size, Some(2_400));
        assert_eq!(web.bold, Some(true));
        assert_eq!(web.underline.as_deref(), Some("sng"));
        assert_eq!(web.latin.as_deref(), Some("Georgia"));
        assert!(matches!(web.fill, Some(Fill::Solid { .. })));
        let link = web.hyperlink.as_ref().unwrap();
        assert!(link.is_external);
        assert_eq!(link.target.as_deref(), Some("https://example.com/"));
        assert_eq!(link.tooltip.as_deref(), Some("site"));

        let jump = runs[1].properties().unwrap().hyperlink.as_ref().unwrap();
        assert_eq!(jump.target.as_deref(), Some("ppt/slides/slide3.xml"));
        assert!(!jump.is_external);

        let dangling = runs[2].properties().unwrap().hyperlink.as_ref().unwrap();
        assert!(dangling.target.is_none());
        assert_eq!(warnings, 1);
    }

    #[test]
    fn test_list_style_levels() {
        let (body, _) = build(
            r#"<p:txBody><a:bodyPr/><a:lstStyle><a:defPPr algn="l"/><a:lvl1pPr marL="0"/><a:lvl3pPr marL="914400"/></a:lstStyle><a:p/></p:txBody>"#,
            &ParseOptions::default(),
        );
        let style = body.list_style.unwrap();
        assert_eq!(style.levels.len(), 2);
        assert_eq!(style.level(2).and_then(|p| p.margin_left), Some(914_400));
        assert_eq!(style.level(2).map(|p| p.level), Some(2));
        assert!(style.level(1).is_none());
        assert_eq!(
            style.default.and_then(|p| p.alignment).as_deref(),
            Some("l")
        );
    }
}
