//! Two-dimensional transforms (`a:xfrm`, `p:xfrm`).

use crate::common::unit::angle_to_degrees;
use crate::ooxml::xml::XmlNode;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Size {
    pub cx: i64,
    pub cy: i64,
}

/// Offset, extent, rotation and flips of an element, all in EMU.
///
/// Extents are never negative. A missing `xfrm` gives the zero transform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transform {
    pub offset: Point,
    pub extent: Size,
    /// Clockwise rotation in degrees
    pub rotation: Option<f64>,
    pub flip_h: bool,
    pub flip_v: bool,
}

/// Coordinate space of a group's children (`chOff`/`chExt`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ChildTransform {
    pub offset: Point,
    pub extent: Size,
}

fn point(node: Option<&XmlNode>) -> Point {
    node.map(|n| Point {
        x: n.attr_i64("x").unwrap_or(0),
        y: n.attr_i64("y").unwrap_or(0),
    })
    .unwrap_or_default()
}

fn size(node: Option<&XmlNode>) -> Size {
    node.map(|n| Size {
        cx: n.attr_i64("cx").unwrap_or(0).max(0),
        cy: n.attr_i64("cy").unwrap_or(0).max(0),
    })
    .unwrap_or_default()
}

/// Parse an `xfrm` element; `None` yields the zero transform.
pub fn parse_transform(xfrm: Option<&XmlNode>) -> Transform {
    let Some(xfrm) = xfrm else {
        return Transform::default();
    };
    Transform {
        offset: point(xfrm.child("off")),
        extent: size(xfrm.child("ext")),
        rotation: xfrm
            .attr_i64("rot")
            .filter(|rot| *rot != 0)
            .map(angle_to_degrees),
        flip_h: xfrm.attr_bool("flipH").unwrap_or(false),
        flip_v: xfrm.attr_bool("flipV").unwrap_or(false),
    }
}

/// Child coordinate space of a group `xfrm`.
pub fn parse_child_transform(xfrm: Option<&XmlNode>) -> ChildTransform {
    match xfrm {
        Some(xfrm) => ChildTransform {
            offset: point(xfrm.child("chOff")),
            extent: size(xfrm.child("chExt")),
        },
        None => ChildTransform::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::xml::MarkupParser;

    #[test]
    fn test_parse_transform() {
        let xfrm = MarkupParser::new()
            .parse(
                br#"<a:xfrm rot="-5400000" flipH="1"><a:off x="914400" y="-100"/><a:ext cx="1828800" cy="-5"/><a:chOff x="1" y="2"/><a:chExt cx="3" cy="4"/></a:xfrm>"#,
            )
            .unwrap();

        let t = parse_transform(Some(&xfrm));
        assert_eq!(t.offset, Point { x: 914_400, y: -100 });
        assert_eq!(t.extent, Size { cx: 1_828_800, cy: 0 });
        assert_eq!(t.rotation, Some(-90.0));
        assert!(t.flip_h);
        assert!(!t.flip_v);

        let child = parse_child_transform(Some(&xfrm));
        assert_eq!(child.offset, Point { x: 1, y: 2 });
        assert_eq!(child.extent, Size { cx: 3, cy: 4 });
    }

    #[test]
    fn test_missing_transform_is_zero() {
        assert_eq!(parse_transform(None), Transform::default());
        assert_eq!(parse_child_transform(None), ChildTransform::default());
    }
}
