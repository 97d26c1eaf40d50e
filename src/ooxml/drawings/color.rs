//! DrawingML color values.
//!
//! A color slot (`solidFill`, `fgClr`, `gs`, theme scheme entries...) holds exactly one
//! color element. The model keeps the color unevaluated: a theme reference stays a
//! reference and the modifiers stay raw 100,000ths integers, leaving RGB computation
//! to the renderer.

use crate::ooxml::xml::XmlNode;
use serde::Serialize;

/// The base color before modifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ColorKind {
    /// Literal RGB as uppercase hex without `#` (`srgbClr`, or `sysClr/@lastClr`)
    Rgb { hex: String },
    /// Reference into the theme color scheme (`accent1`, `tx1`, `phClr`...)
    Scheme { name: String },
    /// Hue in 60,000ths of a degree, saturation and luminance in 1,000ths of a percent
    Hsl { hue: i32, sat: i32, lum: i32 },
    /// Named preset color (`prstClr/@val`)
    Preset { name: String },
}

/// Color transforms carried unevaluated, as raw 100,000ths.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorModifiers {
    pub lum_mod: Option<i32>,
    pub lum_off: Option<i32>,
    pub sat_mod: Option<i32>,
    pub shade: Option<i32>,
    pub tint: Option<i32>,
}

impl ColorModifiers {
    pub fn is_empty(&self) -> bool {
        self.lum_mod.is_none()
            && self.lum_off.is_none()
            && self.sat_mod.is_none()
            && self.shade.is_none()
            && self.tint.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Color {
    pub kind: ColorKind,
    /// Opacity in 100,000ths (100000 = opaque)
    pub alpha: Option<i32>,
    pub modifiers: ColorModifiers,
}

impl Color {
    pub fn rgb(hex: &str) -> Self {
        Self::from_kind(ColorKind::Rgb {
            hex: hex.trim_start_matches('#').to_ascii_uppercase(),
        })
    }

    pub fn scheme(name: &str) -> Self {
        Self::from_kind(ColorKind::Scheme {
            name: name.to_string(),
        })
    }

    pub fn from_kind(kind: ColorKind) -> Self {
        Self {
            kind,
            alpha: None,
            modifiers: ColorModifiers::default(),
        }
    }

    /// Scheme slot name when this is a theme reference.
    pub fn scheme_name(&self) -> Option<&str> {
        match &self.kind {
            ColorKind::Scheme { name } => Some(name),
            _ => None,
        }
    }

    /// Hex value when this is a literal RGB color.
    pub fn hex(&self) -> Option<&str> {
        match &self.kind {
            ColorKind::Rgb { hex } => Some(hex),
            _ => None,
        }
    }
}

/// Color element names in the order they are probed.
const COLOR_ELEMENTS: [&str; 5] = ["srgbClr", "schemeClr", "prstClr", "hslClr", "sysClr"];

/// Parse the color held by a color slot element.
///
/// Probes `srgbClr`, `schemeClr`, `prstClr`, `hslClr`, `sysClr` in that order and
/// returns `None` when the slot holds none of them.
pub fn parse_color(slot: &XmlNode) -> Option<Color> {
    COLOR_ELEMENTS
        .iter()
        .find_map(|name| slot.child(name))
        .and_then(parse_color_element)
}

/// Parse one color element (`a:srgbClr`, `a:schemeClr`...) directly.
pub fn parse_color_element(el: &XmlNode) -> Option<Color> {
    let kind = match el.local_name() {
        "srgbClr" => ColorKind::Rgb {
            hex: el.attr("val")?.to_ascii_uppercase(),
        },
        "schemeClr" => ColorKind::Scheme {
            name: el.attr("val")?.to_string(),
        },
        "prstClr" => ColorKind::Preset {
            name: el.attr("val")?.to_string(),
        },
        "hslClr" => ColorKind::Hsl {
            hue: el.attr_i32("hue").unwrap_or(0),
            sat: el.attr_i32("sat").unwrap_or(0),
            lum: el.attr_i32("lum").unwrap_or(0),
        },
        "sysClr" => ColorKind::Rgb {
            hex: el
                .attr("lastClr")
                .map(str::to_ascii_uppercase)
                .unwrap_or_else(|| system_color_hex(el.attr_or("val", "windowText")).to_string()),
        },
        _ => return None,
    };

    let value = |name: &str| el.child(name).and_then(|m| m.attr_i32("val"));
    Some(Color {
        kind,
        alpha: value("alpha"),
        modifiers: ColorModifiers {
            lum_mod: value("lumMod"),
            lum_off: value("lumOff"),
            sat_mod: value("satMod"),
            shade: value("shade"),
            tint: value("tint"),
        },
    })
}

/// Fallback RGB for system colors written without `lastClr`.
fn system_color_hex(name: &str) -> &'static str {
    match name {
        "window" | "highlightText" | "btnHighlight" => "FFFFFF",
        "btnFace" | "menu" => "F0F0F0",
        "highlight" => "0078D7",
        "grayText" => "6D6D6D",
        _ => "000000",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::xml::MarkupParser;

    fn parse(xml: &str) -> Option<Color> {
        let node = MarkupParser::new().parse(xml.as_bytes()).unwrap();
        parse_color(&node)
    }

    #[test]
    fn test_modifiers_carried_raw() {
        let color = parse(
            r#"<a:solidFill><a:schemeClr val="accent1"><a:lumMod val="50000"/><a:lumOff val="10000"/></a:schemeClr></a:solidFill>"#,
        )
        .unwrap();

        assert_eq!(color.scheme_name(), Some("accent1"));
        assert_eq!(color.modifiers.lum_mod, Some(50000));
        assert_eq!(color.modifiers.lum_off, Some(10000));
        assert_eq!(color.modifiers.shade, None);
        assert_eq!(color.alpha, None);
    }

    #[test]
    fn test_rgb_with_alpha() {
        let color =
            parse(r#"<a:solidFill><a:srgbClr val="ff0000"><a:alpha val="40000"/></a:srgbClr></a:solidFill>"#)
                .unwrap();
        assert_eq!(color.hex(), Some("FF0000"));
        assert_eq!(color.alpha, Some(40000));
        assert!(color.modifiers.is_empty());
    }

    #[test]
    fn test_system_and_hsl_colors() {
        let sys = parse(r#"<a:dk1><a:sysClr val="windowText" lastClr="000000"/></a:dk1>"#).unwrap();
        assert_eq!(sys.hex(), Some("000000"));

        let sys = parse(r#"<a:lt1><a:sysClr val="window"/></a:lt1>"#).unwrap();
        assert_eq!(sys.hex(), Some("FFFFFF"));

        let hsl = parse(r#"<a:fgClr><a:hslClr hue="14400000" sat="100000" lum="50000"/></a:fgClr>"#)
            .unwrap();
        assert_eq!(
            hsl.kind,
            ColorKind::Hsl {
                hue: 14_400_000,
                sat: 100_000,
                lum: 50_000
            }
        );
    }

    #[test]
    fn test_preset_and_absent() {
        let prst = parse(r#"<a:solidFill><a:prstClr val="black"/></a:solidFill>"#).unwrap();
        assert_eq!(prst.kind, ColorKind::Preset { name: "black".into() });

        assert!(parse(r#"<a:solidFill/>"#).is_none());
    }
}
