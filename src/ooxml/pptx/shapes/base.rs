/// Identity shared by every slide element, plus plain shapes and connectors.
use crate::ooxml::drawings::color::{Color, parse_color};
use crate::ooxml::drawings::effects::{Effects, parse_effects};
use crate::ooxml::drawings::fill::{Fill, resolve_shape_fill};
use crate::ooxml::drawings::geometry::{Geometry, parse_geometry};
use crate::ooxml::drawings::line::{Line, resolve_shape_line};
use crate::ooxml::drawings::xfrm::{Transform, parse_transform};
use crate::ooxml::pptx::diagnostics::IssueCode;
use crate::ooxml::pptx::session::PartContext;
use crate::ooxml::pptx::text::{Hyperlink, TextBody, parse_hyperlink, parse_text_body};
use crate::ooxml::xml::XmlNode;
use serde::Serialize;

/// Placeholder role of a shape (`p:nvPr/p:ph`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Placeholder {
    /// `title`, `body`, `ctrTitle`, `subTitle`, `dt`, `ftr`, `sldNum`, `pic`...
    /// Defaults to `obj`.
    pub ph_type: String,
    pub idx: Option<u32>,
    /// `full`, `half`, `quarter`
    pub size: Option<String>,
    /// `horz` or `vert`
    pub orient: Option<String>,
    pub has_custom_prompt: bool,
}

impl Placeholder {
    fn from_node(ph: &XmlNode) -> Self {
        Self {
            ph_type: ph.attr_or("type", "obj").to_string(),
            idx: ph.attr_u32("idx"),
            size: ph.attr("sz").map(str::to_string),
            orient: ph.attr("orient").map(str::to_string),
            has_custom_prompt: ph.attr_bool("hasCustomPrompt").unwrap_or(false),
        }
    }

    /// True for title-like placeholders.
    pub fn is_title(&self) -> bool {
        matches!(self.ph_type.as_str(), "title" | "ctrTitle")
    }
}

/// Non-visual identity of an element (`cNvPr` and the placeholder role).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementInfo {
    pub id: u32,
    pub name: String,
    pub description: Option<String>,
    pub title: Option<String>,
    pub hidden: bool,
    /// Click action on the element itself
    pub hyperlink: Option<Hyperlink>,
    pub placeholder: Option<Placeholder>,
}

/// The `nv*Pr` child of a shape tree element (`nvSpPr`, `nvPicPr`...).
pub(crate) fn non_visual(node: &XmlNode) -> Option<&XmlNode> {
    node.children().iter().find(|c| {
        let name = c.local_name();
        name.starts_with("nv") && name.ends_with("Pr")
    })
}

/// `p:nvPr` of an element.
pub(crate) fn application_properties(node: &XmlNode) -> Option<&XmlNode> {
    non_visual(node).and_then(|nv| nv.child("nvPr"))
}

pub(crate) fn parse_element_info(node: &XmlNode, ctx: &mut PartContext<'_>) -> ElementInfo {
    let Some(nv) = non_visual(node) else {
        return ElementInfo::default();
    };
    let placeholder = nv
        .child("nvPr")
        .and_then(|pr| pr.child("ph"))
        .map(Placeholder::from_node);
    let Some(c_nv_pr) = nv.child("cNvPr") else {
        return ElementInfo {
            placeholder,
            ..Default::default()
        };
    };

    ElementInfo {
        id: c_nv_pr.attr_u32("id").unwrap_or(0),
        name: c_nv_pr.attr_or("name", "").to_string(),
        description: c_nv_pr.attr("descr").map(str::to_string),
        title: c_nv_pr.attr("title").map(str::to_string),
        hidden: c_nv_pr.attr_bool("hidden").unwrap_or(false),
        hyperlink: c_nv_pr
            .child("hlinkClick")
            .map(|h| parse_hyperlink(h, ctx)),
        placeholder,
    }
}

/// A shape style reference into the theme format scheme.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyleRef {
    pub idx: u32,
    pub color: Option<Color>,
}

/// Font reference (`a:fontRef`): `major`, `minor` or `none`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FontRef {
    pub idx: String,
    pub color: Option<Color>,
}

/// `p:style` of a shape or connector.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeStyle {
    pub line_ref: Option<StyleRef>,
    pub fill_ref: Option<StyleRef>,
    pub effect_ref: Option<StyleRef>,
    pub font_ref: Option<FontRef>,
}

pub(crate) fn parse_shape_style(style: &XmlNode) -> ShapeStyle {
    let style_ref = |name: &str| {
        style.child(name).map(|r| StyleRef {
            idx: r.attr_u32("idx").unwrap_or(0),
            color: parse_color(r),
        })
    };
    ShapeStyle {
        line_ref: style_ref("lnRef"),
        fill_ref: style_ref("fillRef"),
        effect_ref: style_ref("effectRef"),
        font_ref: style.child("fontRef").map(|r| FontRef {
            idx: r.attr_or("idx", "minor").to_string(),
            color: parse_color(r),
        }),
    }
}

/// Warn when a picture fill names an image the part does not link.
pub(crate) fn check_fill(fill: Option<&Fill>, ctx: &mut PartContext<'_>) {
    if let Some(Fill::Picture(picture)) = fill
        && !picture.embed.is_empty()
        && !picture.is_resolved()
    {
        ctx.warn(
            IssueCode::UnresolvedImage,
            format!("image {} has no target", picture.embed),
            Some("blipFill"),
        );
    }
}

/// A plain shape (`p:sp`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Shape {
    pub info: ElementInfo,
    pub transform: Transform,
    pub geometry: Option<Geometry>,
    pub fill: Option<Fill>,
    pub line: Option<Line>,
    pub effects: Option<Effects>,
    pub style: Option<ShapeStyle>,
    pub text: Option<TextBody>,
    /// `cNvSpPr/@txBox`
    pub is_text_box: bool,
}

pub(crate) fn parse_shape(node: &XmlNode, ctx: &mut PartContext<'_>) -> Shape {
    let sp_pr = node.child("spPr");
    let style = node.child("style");
    let fill = resolve_shape_fill(sp_pr, style, ctx.rels);
    check_fill(fill.as_ref(), ctx);

    Shape {
        info: parse_element_info(node, ctx),
        transform: parse_transform(sp_pr.and_then(|pr| pr.child("xfrm"))),
        geometry: parse_geometry(sp_pr),
        fill,
        line: resolve_shape_line(sp_pr, ctx.rels),
        effects: parse_effects(sp_pr),
        style: style.map(parse_shape_style),
        text: node.child("txBody").map(|tx| parse_text_body(tx, ctx)),
        is_text_box: non_visual(node)
            .and_then(|nv| nv.child("cNvSpPr"))
            .and_then(|pr| pr.attr_bool("txBox"))
            .unwrap_or(false),
    }
}

/// Connection site reference of a connector end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConnectionRef {
    /// Id of the connected shape
    pub id: u32,
    /// Connection site index on that shape
    pub idx: u32,
}

/// A connector (`p:cxnSp`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Connector {
    pub info: ElementInfo,
    pub transform: Transform,
    pub geometry: Option<Geometry>,
    pub line: Option<Line>,
    pub effects: Option<Effects>,
    pub style: Option<ShapeStyle>,
    pub start: Option<ConnectionRef>,
    pub end: Option<ConnectionRef>,
}

pub(crate) fn parse_connector(node: &XmlNode, ctx: &mut PartContext<'_>) -> Connector {
    let sp_pr = node.child("spPr");
    let locks = non_visual(node).and_then(|nv| nv.child("cNvCxnSpPr"));
    let connection = |name: &str| {
        locks.and_then(|l| l.child(name)).map(|c| ConnectionRef {
            id: c.attr_u32("id").unwrap_or(0),
            idx: c.attr_u32("idx").unwrap_or(0),
        })
    };

    Connector {
        info: parse_element_info(node, ctx),
        transform: parse_transform(sp_pr.and_then(|pr| pr.child("xfrm"))),
        geometry: parse_geometry(sp_pr),
        line: resolve_shape_line(sp_pr, ctx.rels),
        effects: parse_effects(sp_pr),
        style: node.child("style").map(parse_shape_style),
        start: connection("stCxn"),
        end: connection("endCxn"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::opc::Relationships;
    use crate::ooxml::pptx::session::{LinkedParts, ParseOptions};
    use crate::ooxml::xml::MarkupParser;

    fn with_ctx<T>(xml: &str, f: impl FnOnce(&XmlNode, &mut PartContext<'_>) -> T) -> (T, usize) {
        let node = MarkupParser::new().parse(xml.as_bytes()).unwrap();
        let rels = Relationships::new("ppt/slides/slide1.xml");
        let options = ParseOptions::default();
        let linked = LinkedParts::default();
        let mut ctx = PartContext::new("ppt/slides/slide1.xml", &rels, &options, &linked);
        let out = f(&node, &mut ctx);
        (out, ctx.diagnostics.warnings.len())
    }

    #[test]
    fn test_shape_with_placeholder_and_text() {
        let (shape, warnings) = with_ctx(
            r#"<p:sp>
                <p:nvSpPr><p:cNvPr id="2" name="Title 1" descr="heading"/><p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr><p:nvPr><p:ph type="title"/></p:nvPr></p:nvSpPr>
                <p:spPr><a:xfrm rot="5400000"><a:off x="838200" y="365125"/><a:ext cx="10515600" cy="1325563"/></a:xfrm><a:prstGeom prst="rect"><a:avLst/></a:prstGeom></p:spPr>
                <p:style><a:lnRef idx="2"><a:schemeClr val="accent1"><a:shade val="50000"/></a:schemeClr></a:lnRef><a:fillRef idx="1"><a:schemeClr val="accent1"/></a:fillRef><a:effectRef idx="0"/><a:fontRef idx="minor"><a:schemeClr val="lt1"/></a:fontRef></p:style>
                <p:txBody><a:bodyPr/><a:lstStyle/><a:p><a:r><a:t>Quarterly results</a:t></a:r></a:p></p:txBody>
            </p:sp>"#,
            parse_shape,
        );

        assert_eq!(warnings, 0);
        assert_eq!(shape.info.id, 2);
        assert_eq!(shape.info.name, "Title 1");
        assert_eq!(shape.info.description.as_deref(), Some("heading"));
        assert!(shape.info.placeholder.as_ref().is_some_and(Placeholder::is_title));
        assert_eq!(shape.transform.rotation, Some(90.0));
        assert_eq!(shape.transform.extent.cx, 10_515_600);
        assert_eq!(shape.geometry.as_ref().and_then(Geometry::preset_name), Some("rect"));
        assert!(matches!(shape.fill, Some(Fill::Solid { .. })));

        let style = shape.style.as_ref().unwrap();
        assert_eq!(style.line_ref.as_ref().map(|r| r.idx), Some(2));
        assert_eq!(
            style
                .line_ref
                .as_ref()
                .and_then(|r| r.color.as_ref())
                .and_then(|c| c.modifiers.shade),
            Some(50_000)
        );
        assert_eq!(style.font_ref.as_ref().map(|r| r.idx.as_str()), Some("minor"));
        assert_eq!(shape.text.as_ref().map(TextBody::text).as_deref(), Some("Quarterly results"));
    }

    #[test]
    fn test_default_placeholder_type_and_missing_xfrm() {
        let (shape, _) = with_ctx(
            r#"<p:sp><p:nvSpPr><p:cNvPr id="3" name="Content" hidden="1"/><p:cNvSpPr txBox="1"/><p:nvPr><p:ph idx="1"/></p:nvPr></p:nvSpPr><p:spPr/></p:sp>"#,
            parse_shape,
        );
        let ph = shape.info.placeholder.unwrap();
        assert_eq!(ph.ph_type, "obj");
        assert_eq!(ph.idx, Some(1));
        assert!(shape.info.hidden);
        assert!(shape.is_text_box);
        assert_eq!(shape.transform, Transform::default());
        assert!(shape.geometry.is_none());
        assert!(shape.text.is_none());
    }

    #[test]
    fn test_unresolved_blip_fill_warns() {
        let (shape, warnings) = with_ctx(
            r#"<p:sp><p:nvSpPr><p:cNvPr id="4" name="Pic"/><p:cNvSpPr/><p:nvPr/></p:nvSpPr><p:spPr><a:blipFill><a:blip r:embed="rId7"/><a:stretch/></a:blipFill></p:spPr></p:sp>"#,
            parse_shape,
        );
        match shape.fill {
            Some(Fill::Picture(picture)) => assert_eq!(picture.path, ""),
            other => panic!("unexpected fill {:?}", other),
        }
        assert_eq!(warnings, 1);
    }

    #[test]
    fn test_connector_ends() {
        let (cxn, _) = with_ctx(
            r#"<p:cxnSp><p:nvCxnSpPr><p:cNvPr id="7" name="Elbow"/><p:cNvCxnSpPr><a:stCxn id="2" idx="3"/><a:endCxn id="5" idx="1"/></p:cNvCxnSpPr><p:nvPr/></p:nvCxnSpPr>
                <p:spPr><a:xfrm flipV="1"><a:off x="1" y="2"/><a:ext cx="3" cy="4"/></a:xfrm><a:prstGeom prst="bentConnector3"/><a:ln w="19050"><a:tailEnd type="triangle"/></a:ln></p:spPr></p:cxnSp>"#,
            parse_connector,
        );
        assert_eq!(cxn.info.id, 7);
        assert_eq!(cxn.start, Some(ConnectionRef { id: 2, idx: 3 }));
        assert_eq!(cxn.end, Some(ConnectionRef { id: 5, idx: 1 }));
        assert!(cxn.transform.flip_v);
        let line = cxn.line.unwrap();
        assert_eq!(line.width, Some(19_050));
        assert_eq!(line.tail_end.map(|e| e.kind).as_deref(), Some("triangle"));
    }
}
