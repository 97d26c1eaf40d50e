//! DrawingML effect list (`a:effectLst`).

use crate::common::unit::angle_to_degrees;
use crate::ooxml::drawings::color::{Color, parse_color};
use crate::ooxml::xml::XmlNode;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Shadow {
    /// Blur radius in EMU
    pub blur_radius: i64,
    /// Offset distance in EMU
    pub distance: i64,
    /// Offset direction in degrees
    pub direction: f64,
    pub color: Option<Color>,
    /// Anchor alignment (`b`, `ctr`, `tl`...), outer shadows only
    pub align: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Glow {
    pub radius: i64,
    pub color: Option<Color>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Effects {
    pub outer_shadow: Option<Shadow>,
    pub inner_shadow: Option<Shadow>,
    pub glow: Option<Glow>,
    /// Soft edge radius in EMU
    pub soft_edge: Option<i64>,
    pub reflection: bool,
}

impl Effects {
    pub fn is_empty(&self) -> bool {
        self.outer_shadow.is_none()
            && self.inner_shadow.is_none()
            && self.glow.is_none()
            && self.soft_edge.is_none()
            && !self.reflection
    }
}

fn parse_shadow(node: &XmlNode) -> Shadow {
    Shadow {
        blur_radius: node.attr_i64("blurRad").unwrap_or(0),
        distance: node.attr_i64("dist").unwrap_or(0),
        direction: angle_to_degrees(node.attr_i64("dir").unwrap_or(0)),
        color: parse_color(node),
        align: node.attr("algn").map(str::to_string),
    }
}

/// Parse an `effectLst` element.
pub fn parse_effect_list(lst: &XmlNode) -> Effects {
    Effects {
        outer_shadow: lst.child("outerShdw").map(parse_shadow),
        inner_shadow: lst.child("innerShdw").map(parse_shadow),
        glow: lst.child("glow").map(|g| Glow {
            radius: g.attr_i64("rad").unwrap_or(0),
            color: parse_color(g),
        }),
        soft_edge: lst.child("softEdge").and_then(|s| s.attr_i64("rad")),
        reflection: lst.has_child("reflection"),
    }
}

/// Effects declared on shape properties; `None` when there is no effect list.
pub fn parse_effects(sp_pr: Option<&XmlNode>) -> Option<Effects> {
    sp_pr?.child("effectLst").map(parse_effect_list)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::xml::MarkupParser;

    #[test]
    fn test_parse_effects() {
        let sp_pr = MarkupParser::new()
            .parse(
                br#"<p:spPr><a:effectLst>
                    <a:outerShdw blurRad="40000" dist="23000" dir="5400000" algn="b" rotWithShape="0">
                        <a:srgbClr val="000000"><a:alpha val="35000"/></a:srgbClr>
                    </a:outerShdw>
                    <a:softEdge rad="63500"/>
                    <a:reflection blurRad="6350"/>
                </a:effectLst></p:spPr>"#,
            )
            .unwrap();

        let effects = parse_effects(Some(&sp_pr)).unwrap();
        let shadow = effects.outer_shadow.as_ref().unwrap();
        assert_eq!(shadow.blur_radius, 40_000);
        assert_eq!(shadow.direction, 90.0);
        assert_eq!(shadow.color.as_ref().unwrap().alpha, Some(35_000));
        assert_eq!(shadow.align.as_deref(), Some("b"));
        assert_eq!(effects.soft_edge, Some(63_500));
        assert!(effects.reflection);
        assert!(effects.glow.is_none());
        assert!(!effects.is_empty());
    }

    #[test]
    fn test_empty_effect_list() {
        let sp_pr = MarkupParser::new().parse(b"<p:spPr><a:effectLst/></p:spPr>").unwrap();
        assert!(parse_effects(Some(&sp_pr)).unwrap().is_empty());
    }
}
