//! Shape geometry: preset shapes with adjustment values, and custom paths.
//!
//! Custom path coordinates may be literals or references to guide names; both are
//! kept as written. Arcs are carried as their raw `wR`/`hR`/`stAng`/`swAng` values
//! and are not converted to bezier segments.

use crate::ooxml::xml::{XmlNode, parse_i64};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;

/// `gd/@fmla` of an adjustment value: `val 50000`.
static VAL_FORMULA: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*val\s+(-?\d+)\s*$").expect("valid guide formula regex"));

/// A path coordinate: a literal EMU value or a guide name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum GuideValue {
    Literal(i64),
    Guide(String),
}

impl GuideValue {
    pub fn parse(raw: &str) -> Self {
        match parse_i64(raw) {
            Some(v) => GuideValue::Literal(v),
            None => GuideValue::Guide(raw.to_string()),
        }
    }

    fn from_attr(node: &XmlNode, name: &str) -> Self {
        Self::parse(node.attr_or(name, "0"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathPoint {
    pub x: GuideValue,
    pub y: GuideValue,
}

impl PathPoint {
    fn from_node(pt: &XmlNode) -> Self {
        Self {
            x: GuideValue::from_attr(pt, "x"),
            y: GuideValue::from_attr(pt, "y"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "cmd", rename_all = "camelCase")]
pub enum PathCommand {
    MoveTo {
        to: PathPoint,
    },
    LineTo {
        to: PathPoint,
    },
    CubicBezTo {
        points: Vec<PathPoint>,
    },
    QuadBezTo {
        points: Vec<PathPoint>,
    },
    #[serde(rename_all = "camelCase")]
    ArcTo {
        w_r: GuideValue,
        h_r: GuideValue,
        st_ang: GuideValue,
        sw_ang: GuideValue,
    },
    Close,
}

/// One `a:path` of a custom geometry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomPath {
    /// Path coordinate space width; 0 means the shape extent
    pub width: i64,
    pub height: i64,
    /// `norm`, `none`, `lighten`, `darken`...
    pub fill: String,
    pub stroke: bool,
    pub commands: Vec<PathCommand>,
}

/// A named guide (`gd name="..." fmla="..."`) of a custom geometry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Guide {
    pub name: String,
    pub formula: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Geometry {
    Preset {
        name: String,
        adjustments: BTreeMap<String, i64>,
    },
    Custom {
        guides: Vec<Guide>,
        paths: Vec<CustomPath>,
    },
}

impl Geometry {
    pub fn preset_name(&self) -> Option<&str> {
        match self {
            Geometry::Preset { name, .. } => Some(name),
            Geometry::Custom { .. } => None,
        }
    }
}

/// Extract `N` from a `val N` guide formula.
pub fn adjustment_value(formula: &str) -> Option<i64> {
    VAL_FORMULA
        .captures(formula)
        .and_then(|caps| caps.get(1))
        .and_then(|m| parse_i64(m.as_str()))
}

fn parse_guides(list: Option<&XmlNode>) -> Vec<Guide> {
    list.map(|lst| {
        lst.children_named("gd")
            .into_iter()
            .map(|gd| Guide {
                name: gd.attr_or("name", "").to_string(),
                formula: gd.attr_or("fmla", "").to_string(),
            })
            .collect()
    })
    .unwrap_or_default()
}

fn parse_preset(prst: &XmlNode) -> Geometry {
    let adjustments: BTreeMap<String, i64> = parse_guides(prst.child("avLst"))
        .into_iter()
        .filter_map(|g| adjustment_value(&g.formula).map(|v| (g.name, v)))
        .collect();
    Geometry::Preset {
        name: prst.attr_or("prst", "rect").to_string(),
        adjustments,
    }
}

fn parse_command(node: &XmlNode) -> Option<PathCommand> {
    let points = || node.children_named("pt").into_iter().map(PathPoint::from_node);
    let command = match node.local_name() {
        "moveTo" => PathCommand::MoveTo {
            to: points().next()?,
        },
        "lnTo" => PathCommand::LineTo {
            to: points().next()?,
        },
        "cubicBezTo" => PathCommand::CubicBezTo {
            points: points().collect(),
        },
        "quadBezTo" => PathCommand::QuadBezTo {
            points: points().collect(),
        },
        "arcTo" => PathCommand::ArcTo {
            w_r: GuideValue::from_attr(node, "wR"),
            h_r: GuideValue::from_attr(node, "hR"),
            st_ang: GuideValue::from_attr(node, "stAng"),
            sw_ang: GuideValue::from_attr(node, "swAng"),
        },
        "close" => PathCommand::Close,
        _ => return None,
    };
    Some(command)
}

fn parse_custom(cust: &XmlNode) -> Geometry {
    let paths: Vec<CustomPath> = cust
        .child("pathLst")
        .map(|lst| {
            lst.children_named("path")
                .into_iter()
                .map(|path| CustomPath {
                    width: path.attr_i64("w").unwrap_or(0),
                    height: path.attr_i64("h").unwrap_or(0),
                    fill: path.attr_or("fill", "norm").to_string(),
                    stroke: path.attr_bool("stroke").unwrap_or(true),
                    // Commands must stay in document order across kinds
                    commands: path.children().iter().filter_map(parse_command).collect(),
                })
                .collect()
        })
        .unwrap_or_default();

    Geometry::Custom {
        guides: parse_guides(cust.child("gdLst")),
        paths,
    }
}

/// Resolve geometry from shape properties: `prstGeom`, else `custGeom`, else none.
pub fn parse_geometry(sp_pr: Option<&XmlNode>) -> Option<Geometry> {
    let sp_pr = sp_pr?;
    if let Some(prst) = sp_pr.child("prstGeom") {
        return Some(parse_preset(prst));
    }
    sp_pr.child("custGeom").map(parse_custom)
}
