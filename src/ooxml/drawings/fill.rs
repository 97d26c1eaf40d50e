//! DrawingML fills.
//!
//! Fill properties appear under shape properties (`spPr`), backgrounds (`bgPr`),
//! table cells (`tcPr`), line properties (`ln`) and text runs (`rPr`). The element
//! that carries the fill is called the *fill host* here; exactly one fill child is
//! expected in it.

use crate::ooxml::drawings::color::{Color, parse_color};
use crate::ooxml::opc::rel::Relationships;
use crate::ooxml::xml::XmlNode;
use serde::Serialize;

/// Gradient shading mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum GradientKind {
    Linear,
    Radial,
}

/// One gradient stop.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradientStop {
    /// Position in 1,000ths of a percent (0..=100000)
    pub position: i32,
    pub color: Color,
}

/// Relative rectangle in 1,000ths of a percent, as used by `srcRect`/`fillRect`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RelativeRect {
    pub l: i32,
    pub t: i32,
    pub r: i32,
    pub b: i32,
}

impl RelativeRect {
    pub fn from_node(node: &XmlNode) -> Self {
        Self {
            l: node.attr_i32("l").unwrap_or(0),
            t: node.attr_i32("t").unwrap_or(0),
            r: node.attr_i32("r").unwrap_or(0),
            b: node.attr_i32("b").unwrap_or(0),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.l == 0 && self.t == 0 && self.r == 0 && self.b == 0
    }
}

/// Tiling parameters for picture fills.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TileInfo {
    pub tx: i64,
    pub ty: i64,
    /// Horizontal and vertical scale in 1,000ths of a percent
    pub sx: i32,
    pub sy: i32,
    pub flip: String,
    pub align: String,
}

/// Image fill referencing a package part.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PictureFill {
    /// Relationship id from `blip/@r:embed` (or `r:link`)
    pub embed: String,
    /// Resolved package path; empty when the id has no relationship
    pub path: String,
    pub stretch: bool,
    pub crop: Option<RelativeRect>,
    pub tile: Option<TileInfo>,
    pub rot_with_shape: bool,
}

impl PictureFill {
    /// Whether the image reference resolved to a package path.
    pub fn is_resolved(&self) -> bool {
        !self.path.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Fill {
    None,
    Solid {
        color: Color,
    },
    Gradient {
        stops: Vec<GradientStop>,
        /// Angle in degrees for linear gradients
        angle: Option<f64>,
        kind: GradientKind,
        /// `path/@path` for radial gradients (`circle`, `rect`, `shape`)
        path: Option<String>,
        rot_with_shape: bool,
    },
    Pattern {
        preset: String,
        foreground: Option<Color>,
        background: Option<Color>,
    },
    Picture(PictureFill),
    /// Inherit the fill of the containing group
    Group,
}

impl Fill {
    pub fn is_none(&self) -> bool {
        matches!(self, Fill::None)
    }
}

/// Parse the fill declared in a fill host.
///
/// Recognizes `noFill`, `solidFill`, `gradFill`, `pattFill`, `blipFill` and
/// `grpFill`, first present wins. Picture fills resolve their image through `rels`;
/// an unknown id yields an empty path.
pub fn parse_fill(host: &XmlNode, rels: &Relationships) -> Option<Fill> {
    host.children()
        .iter()
        .find_map(|child| parse_fill_element(child, rels))
}

/// Parse one fill element (`a:solidFill`, `a:gradFill`...) directly, as found in the
/// theme style lists.
pub fn parse_fill_element(el: &XmlNode, rels: &Relationships) -> Option<Fill> {
    match el.local_name() {
        "noFill" => Some(Fill::None),
        "solidFill" => parse_color(el).map(|color| Fill::Solid { color }),
        "gradFill" => Some(parse_gradient(el)),
        "pattFill" => Some(parse_pattern(el)),
        "blipFill" => Some(Fill::Picture(parse_picture_fill(el, rels))),
        "grpFill" => Some(Fill::Group),
        _ => None,
    }
}

fn parse_gradient(node: &XmlNode) -> Fill {
    let stops: Vec<GradientStop> = node
        .child("gsLst")
        .map(|lst| {
            lst.children_named("gs")
                .into_iter()
                .filter_map(|gs| {
                    Some(GradientStop {
                        position: gs.attr_i32("pos").unwrap_or(0),
                        color: parse_color(gs)?,
                    })
                })
                .collect()
        })
        .unwrap_or_default();

    let (kind, angle, path) = match node.child("path") {
        Some(path) => (
            GradientKind::Radial,
            None,
            Some(path.attr_or("path", "circle").to_string()),
        ),
        None => (
            GradientKind::Linear,
            Some(
                node.child("lin")
                    .and_then(|lin| lin.attr_i64("ang"))
                    .map(crate::common::unit::angle_to_degrees)
                    .unwrap_or(0.0),
            ),
            None,
        ),
    };

    Fill::Gradient {
        stops,
        angle,
        kind,
        path,
        rot_with_shape: node.attr_bool("rotWithShape").unwrap_or(true),
    }
}

fn parse_pattern(node: &XmlNode) -> Fill {
    Fill::Pattern {
        preset: node.attr_or("prst", "pct5").to_string(),
        foreground: node.child("fgClr").and_then(parse_color),
        background: node.child("bgClr").and_then(parse_color),
    }
}

/// Parse a `blipFill` element (shape fill or picture element body).
pub fn parse_picture_fill(node: &XmlNode, rels: &Relationships) -> PictureFill {
    let blip = node.child("blip");
    let embed = blip
        .and_then(|b| b.attr("r:embed").or_else(|| b.attr("r:link")))
        .unwrap_or_default()
        .to_string();
    let path = rels
        .get(&embed)
        .map(|rel| rel.target().to_string())
        .unwrap_or_default();

    let crop = node
        .child("srcRect")
        .map(RelativeRect::from_node)
        .filter(|rect| !rect.is_zero());

    let tile = node.child("tile").map(|tile| TileInfo {
        tx: tile.attr_i64("tx").unwrap_or(0),
        ty: tile.attr_i64("ty").unwrap_or(0),
        sx: tile.attr_i32("sx").unwrap_or(100_000),
        sy: tile.attr_i32("sy").unwrap_or(100_000),
        flip: tile.attr_or("flip", "none").to_string(),
        align: tile.attr_or("algn", "tl").to_string(),
    });

    PictureFill {
        embed,
        path,
        stretch: node.has_child("stretch"),
        crop,
        tile,
        rot_with_shape: node.attr_bool("rotWithShape").unwrap_or(true),
    }
}

/// Resolve a shape fill.
///
/// First match wins: an explicit fill in the shape properties (including `noFill`),
/// then the `fillRef` of the shape style. A style reference with index 0 means no
/// fill; any other index yields a solid fill in the reference's inline color, or in
/// `accent1` when the reference carries none.
pub fn resolve_shape_fill(
    sp_pr: Option<&XmlNode>,
    style: Option<&XmlNode>,
    rels: &Relationships,
) -> Option<Fill> {
    if let Some(fill) = sp_pr.and_then(|pr| parse_fill(pr, rels)) {
        return Some(fill);
    }

    let fill_ref = style?.child("fillRef")?;
    if fill_ref.attr_u32("idx").unwrap_or(0) == 0 {
        return Some(Fill::None);
    }
    let color = parse_color(fill_ref).unwrap_or_else(|| Color::scheme("accent1"));
    Some(Fill::Solid { color })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::drawings::color::ColorKind;
    use crate::ooxml::xml::MarkupParser;

    fn node(xml: &str) -> XmlNode {
        MarkupParser::new().parse(xml.as_bytes()).unwrap()
    }

    fn rels() -> Relationships {
        let xml = r#"<Relationships><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="../media/image3.jpeg"/></Relationships>"#;
        Relationships::from_xml(xml.as_bytes(), "ppt/slides/slide1.xml").unwrap()
    }

    #[test]
    fn test_no_fill_wins_over_style() {
        let sp_pr = node(r#"<p:spPr><a:noFill/></p:spPr>"#);
        let style = node(r#"<p:style><a:fillRef idx="1"><a:schemeClr val="accent2"/></a:fillRef></p:style>"#);

        assert_eq!(
            resolve_shape_fill(Some(&sp_pr), Some(&style), &rels()),
            Some(Fill::None)
        );
    }

    #[test]
    fn test_style_fill_ref_fallback() {
        let sp_pr = node(r#"<p:spPr><a:prstGeom prst="rect"/></p:spPr>"#);
        let style = node(r#"<p:style><a:fillRef idx="1"><a:schemeClr val="accent2"/></a:fillRef></p:style>"#);
        let bare = node(r#"<p:style><a:fillRef idx="3"/></p:style>"#);
        let zero = node(r#"<p:style><a:fillRef idx="0"/></p:style>"#);

        match resolve_shape_fill(Some(&sp_pr), Some(&style), &rels()) {
            Some(Fill::Solid { color }) => assert_eq!(color.scheme_name(), Some("accent2")),
            other => panic!("unexpected fill {:?}", other),
        }
        match resolve_shape_fill(Some(&sp_pr), Some(&bare), &rels()) {
            Some(Fill::Solid { color }) => assert_eq!(color.scheme_name(), Some("accent1")),
            other => panic!("unexpected fill {:?}", other),
        }
        assert_eq!(resolve_shape_fill(Some(&sp_pr), Some(&zero), &rels()), Some(Fill::None));
        assert_eq!(resolve_shape_fill(Some(&sp_pr), None, &rels()), None);
    }

    #[test]
    fn test_gradient() {
        let sp_pr = node(
            r#"<p:spPr><a:gradFill rotWithShape="1"><a:gsLst>
                <a:gs pos="0"><a:srgbClr val="FFFFFF"/></a:gs>
                <a:gs pos="100000"><a:schemeClr val="accent1"/></a:gs>
            </a:gsLst><a:lin ang="5400000" scaled="0"/></a:gradFill></p:spPr>"#,
        );

        match parse_fill(&sp_pr, &rels()) {
            Some(Fill::Gradient { stops, angle, kind, .. }) => {
                assert_eq!(stops.len(), 2);
                assert_eq!(stops[1].position, 100_000);
                assert_eq!(angle, Some(90.0));
                assert_eq!(kind, GradientKind::Linear);
            },
            other => panic!("unexpected fill {:?}", other),
        }
    }

    #[test]
    fn test_radial_gradient_and_pattern() {
        let radial = node(
            r#"<p:spPr><a:gradFill><a:gsLst><a:gs pos="0"><a:srgbClr val="000000"/></a:gs></a:gsLst><a:path path="circle"/></a:gradFill></p:spPr>"#,
        );
        assert!(matches!(
            parse_fill(&radial, &rels()),
            Some(Fill::Gradient { kind: GradientKind::Radial, angle: None, .. })
        ));

        let pattern = node(
            r#"<p:spPr><a:pattFill prst="dkDnDiag"><a:fgClr><a:srgbClr val="FF0000"/></a:fgClr><a:bgClr><a:prstClr val="white"/></a:bgClr></a:pattFill></p:spPr>"#,
        );
        match parse_fill(&pattern, &rels()) {
            Some(Fill::Pattern { preset, foreground, background }) => {
                assert_eq!(preset, "dkDnDiag");
                assert_eq!(foreground.unwrap().hex(), Some("FF0000"));
                assert_eq!(
                    background.unwrap().kind,
                    ColorKind::Preset { name: "white".into() }
                );
            },
            other => panic!("unexpected fill {:?}", other),
        }
    }

    #[test]
    fn test_picture_fill_resolution() {
        let sp_pr = node(
            r#"<p:spPr><a:blipFill><a:blip r:embed="rId2"/><a:srcRect l="10000" r="5000"/><a:stretch><a:fillRect/></a:stretch></a:blipFill></p:spPr>"#,
        );
        match parse_fill(&sp_pr, &rels()) {
            Some(Fill::Picture(pic)) => {
                assert_eq!(pic.path, "ppt/media/image3.jpeg");
                assert!(pic.stretch);
                assert_eq!(pic.crop.unwrap().l, 10_000);
            },
            other => panic!("unexpected fill {:?}", other),
        }

        let missing = node(r#"<p:spPr><a:blipFill><a:blip r:embed="rId9"/></a:blipFill></p:spPr>"#);
        match parse_fill(&missing, &rels()) {
            Some(Fill::Picture(pic)) => {
                assert_eq!(pic.embed, "rId9");
                assert!(!pic.is_resolved());
            },
            other => panic!("unexpected fill {:?}", other),
        }
    }
}
