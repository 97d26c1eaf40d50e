//! DrawingML line (outline) properties, `a:ln`.

use crate::ooxml::drawings::fill::{Fill, parse_fill};
use crate::ooxml::opc::rel::Relationships;
use crate::ooxml::xml::XmlNode;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LineJoin {
    Round,
    Bevel,
    /// Miter with optional limit in 1,000ths of a percent
    Miter(Option<i32>),
}

/// Arrowhead decoration at one end of a line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineEnd {
    /// `none`, `triangle`, `stealth`, `diamond`, `oval`, `arrow`
    pub kind: String,
    /// `sm`, `med`, `lg`
    pub width: String,
    pub length: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Line {
    /// Width in EMU
    pub width: Option<i64>,
    pub fill: Option<Fill>,
    /// Preset dash name (`solid`, `dash`, `sysDot`...)
    pub dash: Option<String>,
    /// `rnd`, `sq`, `flat`
    pub cap: Option<String>,
    pub join: Option<LineJoin>,
    /// `sng`, `dbl`, `thickThin`, `thinThick`, `tri`
    pub compound: Option<String>,
    pub head_end: Option<LineEnd>,
    pub tail_end: Option<LineEnd>,
}

impl Line {
    /// True when the line is explicitly switched off.
    pub fn is_hidden(&self) -> bool {
        matches!(self.fill, Some(Fill::None))
    }
}

fn parse_end(node: &XmlNode) -> LineEnd {
    LineEnd {
        kind: node.attr_or("type", "none").to_string(),
        width: node.attr_or("w", "med").to_string(),
        length: node.attr_or("len", "med").to_string(),
    }
}

/// Parse an `a:ln` element.
pub fn parse_line(ln: &XmlNode, rels: &Relationships) -> Line {
    let join = ln.children().iter().find_map(|c| match c.local_name() {
        "round" => Some(LineJoin::Round),
        "bevel" => Some(LineJoin::Bevel),
        "miter" => Some(LineJoin::Miter(c.attr_i32("lim"))),
        _ => None,
    });

    Line {
        width: ln.attr_i64("w"),
        fill: parse_fill(ln, rels),
        dash: ln
            .child("prstDash")
            .and_then(|d| d.attr("val"))
            .map(str::to_string)
            .or_else(|| ln.has_child("custDash").then(|| "custom".to_string())),
        cap: ln.attr("cap").map(str::to_string),
        join,
        compound: ln.attr("cmpd").map(str::to_string),
        head_end: ln.child("headEnd").map(parse_end),
        tail_end: ln.child("tailEnd").map(parse_end),
    }
}

/// Resolve a shape outline from its own `ln` element only.
pub fn resolve_shape_line(sp_pr: Option<&XmlNode>, rels: &Relationships) -> Option<Line> {
    sp_pr?.child("ln").map(|ln| parse_line(ln, rels))
}
