//! Theme parts (`ppt/theme/themeN.xml`).
//!
//! A theme carries the color scheme that scheme colors refer to, the major/minor
//! font pairs, and the format scheme whose style lists are indexed by the `idx` of
//! shape style references. Every slot is populated: whatever a theme part leaves
//! out is taken from the default Office theme.

use crate::ooxml::drawings::color::{Color, parse_color};
use crate::ooxml::drawings::effects::{Effects, parse_effect_list};
use crate::ooxml::drawings::fill::{Fill, parse_fill_element};
use crate::ooxml::drawings::line::{Line, parse_line};
use crate::ooxml::error::Result;
use crate::ooxml::opc::rel::Relationships;
use crate::ooxml::xml::{MarkupParser, XmlNode};
use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::BTreeMap;

/// The twelve color scheme slots, in schema order.
pub const COLOR_SLOTS: [&str; 12] = [
    "dk1", "lt1", "dk2", "lt2", "accent1", "accent2", "accent3", "accent4", "accent5", "accent6",
    "hlink", "folHlink",
];

/// Default Office palette, parallel to [`COLOR_SLOTS`].
const DEFAULT_PALETTE: [&str; 12] = [
    "000000", "FFFFFF", "44546A", "E7E6E6", "4472C4", "ED7D31", "A5A5A5", "FFC000", "5B9BD5",
    "70AD47", "0563C1", "954F72",
];

const DEFAULT_MAJOR_LATIN: &str = "Calibri Light";
const DEFAULT_MINOR_LATIN: &str = "Calibri";

/// Theme color scheme (`a:clrScheme`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorScheme {
    pub name: String,
    pub dk1: Color,
    pub lt1: Color,
    pub dk2: Color,
    pub lt2: Color,
    pub accent1: Color,
    pub accent2: Color,
    pub accent3: Color,
    pub accent4: Color,
    pub accent5: Color,
    pub accent6: Color,
    pub hlink: Color,
    pub fol_hlink: Color,
}

impl Default for ColorScheme {
    fn default() -> Self {
        let c = |i: usize| Color::rgb(DEFAULT_PALETTE[i]);
        Self {
            name: "Office".to_string(),
            dk1: c(0),
            lt1: c(1),
            dk2: c(2),
            lt2: c(3),
            accent1: c(4),
            accent2: c(5),
            accent3: c(6),
            accent4: c(7),
            accent5: c(8),
            accent6: c(9),
            hlink: c(10),
            fol_hlink: c(11),
        }
    }
}

impl ColorScheme {
    /// Look up a slot by its schema name (`accent1`, `folHlink`...).
    ///
    /// The text/background aliases `tx1`, `bg1`, `tx2` and `bg2` map onto the dark
    /// and light slots the way the default color map does.
    pub fn get(&self, slot: &str) -> Option<&Color> {
        let color = match slot {
            "dk1" | "tx1" => &self.dk1,
            "lt1" | "bg1" => &self.lt1,
            "dk2" | "tx2" => &self.dk2,
            "lt2" | "bg2" => &self.lt2,
            "accent1" => &self.accent1,
            "accent2" => &self.accent2,
            "accent3" => &self.accent3,
            "accent4" => &self.accent4,
            "accent5" => &self.accent5,
            "accent6" => &self.accent6,
            "hlink" => &self.hlink,
            "folHlink" => &self.fol_hlink,
            _ => return None,
        };
        Some(color)
    }

    fn slot_mut(&mut self, slot: &str) -> Option<&mut Color> {
        let color = match slot {
            "dk1" => &mut self.dk1,
            "lt1" => &mut self.lt1,
            "dk2" => &mut self.dk2,
            "lt2" => &mut self.lt2,
            "accent1" => &mut self.accent1,
            "accent2" => &mut self.accent2,
            "accent3" => &mut self.accent3,
            "accent4" => &mut self.accent4,
            "accent5" => &mut self.accent5,
            "accent6" => &mut self.accent6,
            "hlink" => &mut self.hlink,
            "folHlink" => &mut self.fol_hlink,
            _ => return None,
        };
        Some(color)
    }

    /// Iterate `(slot name, color)` in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Color)> {
        COLOR_SLOTS
            .iter()
            .filter_map(move |slot| self.get(slot).map(|c| (*slot, c)))
    }
}

/// Typefaces for one font collection (major or minor).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FontCollection {
    pub latin: String,
    pub east_asian: String,
    pub complex_script: String,
    /// Per-script overrides (`a:font script="Jpan" typeface="..."`)
    pub scripts: BTreeMap<String, String>,
}

impl FontCollection {
    fn with_latin(latin: &str) -> Self {
        Self {
            latin: latin.to_string(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FontScheme {
    pub name: String,
    pub major: FontCollection,
    pub minor: FontCollection,
}

impl Default for FontScheme {
    fn default() -> Self {
        Self {
            name: "Office".to_string(),
            major: FontCollection::with_latin(DEFAULT_MAJOR_LATIN),
            minor: FontCollection::with_latin(DEFAULT_MINOR_LATIN),
        }
    }
}

/// Format scheme (`a:fmtScheme`): style lists addressed by style reference index.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatScheme {
    pub name: String,
    pub fill_styles: Vec<Fill>,
    pub line_styles: Vec<Line>,
    pub effect_styles: Vec<Effects>,
    pub bg_fill_styles: Vec<Fill>,
}

impl FormatScheme {
    /// Fill addressed by a `fillRef`/`bgRef` index.
    ///
    /// 0 means no fill, 1..=999 index the fill style list and 1001 and up index
    /// the background fill style list, both 1-based.
    pub fn fill_for_ref(&self, idx: u32) -> Option<&Fill> {
        match idx {
            0 => None,
            1..=999 => self.fill_styles.get(idx as usize - 1),
            1000 => None,
            _ => self.bg_fill_styles.get(idx as usize - 1001),
        }
    }

    /// Line addressed by a 1-based `lnRef` index.
    pub fn line_for_ref(&self, idx: u32) -> Option<&Line> {
        (idx as usize).checked_sub(1).and_then(|i| self.line_styles.get(i))
    }

    /// Effects addressed by a 1-based `effectRef` index.
    pub fn effect_for_ref(&self, idx: u32) -> Option<&Effects> {
        (idx as usize).checked_sub(1).and_then(|i| self.effect_styles.get(i))
    }
}

impl Default for FormatScheme {
    /// The Office format scheme: three styles in each list.
    fn default() -> Self {
        OFFICE_FORMAT_SCHEME.clone()
    }
}

const OFFICE_FORMAT_SCHEME_XML: &str = concat!(
    r#"<a:fmtScheme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" name="Office">"#,
    "<a:fillStyleLst>",
    r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#,
    r#"<a:gradFill rotWithShape="1"><a:gsLst><a:gs pos="0"><a:schemeClr val="phClr"><a:lumMod val="110000"/><a:satMod val="105000"/><a:tint val="67000"/></a:schemeClr></a:gs><a:gs pos="50000"><a:schemeClr val="phClr"><a:lumMod val="105000"/><a:satMod val="103000"/><a:tint val="73000"/></a:schemeClr></a:gs><a:gs pos="100000"><a:schemeClr val="phClr"><a:lumMod val="105000"/><a:satMod val="109000"/><a:tint val="81000"/></a:schemeClr></a:gs></a:gsLst><a:lin ang="5400000" scaled="0"/></a:gradFill>"#,
    r#"<a:gradFill rotWithShape="1"><a:gsLst><a:gs pos="0"><a:schemeClr val="phClr"><a:satMod val="103000"/><a:lumMod val="102000"/><a:tint val="94000"/></a:schemeClr></a:gs><a:gs pos="50000"><a:schemeClr val="phClr"><a:satMod val="110000"/><a:lumMod val="100000"/><a:shade val="100000"/></a:schemeClr></a:gs><a:gs pos="100000"><a:schemeClr val="phClr"><a:lumMod val="99000"/><a:satMod val="120000"/><a:shade val="78000"/></a:schemeClr></a:gs></a:gsLst><a:lin ang="5400000" scaled="0"/></a:gradFill>"#,
    "</a:fillStyleLst>",
    "<a:lnStyleLst>",
    r#"<a:ln w="6350" cap="flat" cmpd="sng" algn="ctr"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:prstDash val="solid"/><a:miter lim="800000"/></a:ln>"#,
    r#"<a:ln w="12700" cap="flat" cmpd="sng" algn="ctr"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:prstDash val="solid"/><a:miter lim="800000"/></a:ln>"#,
    r#"<a:ln w="19050" cap="flat" cmpd="sng" algn="ctr"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:prstDash val="solid"/><a:miter lim="800000"/></a:ln>"#,
    "</a:lnStyleLst>",
    "<a:effectStyleLst>",
    "<a:effectStyle><a:effectLst/></a:effectStyle>",
    "<a:effectStyle><a:effectLst/></a:effectStyle>",
    r#"<a:effectStyle><a:effectLst><a:outerShdw blurRad="57150" dist="19050" dir="5400000" algn="ctr" rotWithShape="0"><a:srgbClr val="000000"><a:alpha val="63000"/></a:srgbClr></a:outerShdw></a:effectLst></a:effectStyle>"#,
    "</a:effectStyleLst>",
    "<a:bgFillStyleLst>",
    r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#,
    r#"<a:solidFill><a:schemeClr val="phClr"><a:tint val="95000"/><a:satMod val="170000"/></a:schemeClr></a:solidFill>"#,
    r#"<a:gradFill rotWithShape="1"><a:gsLst><a:gs pos="0"><a:schemeClr val="phClr"><a:tint val="93000"/><a:satMod val="150000"/><a:shade val="98000"/><a:lumMod val="102000"/></a:schemeClr></a:gs><a:gs pos="50000"><a:schemeClr val="phClr"><a:tint val="98000"/><a:satMod val="130000"/><a:shade val="90000"/><a:lumMod val="103000"/></a:schemeClr></a:gs><a:gs pos="100000"><a:schemeClr val="phClr"><a:shade val="63000"/><a:satMod val="120000"/></a:schemeClr></a:gs></a:gsLst><a:lin ang="5400000" scaled="0"/></a:gradFill>"#,
    "</a:bgFillStyleLst>",
    "</a:fmtScheme>",
);

static OFFICE_FORMAT_SCHEME: Lazy<FormatScheme> = Lazy::new(|| {
    let rels = Relationships::default();
    MarkupParser::new()
        .parse(OFFICE_FORMAT_SCHEME_XML.as_bytes())
        .map(|node| read_format_scheme(&node, &rels))
        .unwrap_or_else(|_| FormatScheme {
            name: "Office".to_string(),
            fill_styles: Vec::new(),
            line_styles: Vec::new(),
            effect_styles: Vec::new(),
            bg_fill_styles: Vec::new(),
        })
});

/// A resolved theme.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub name: String,
    pub color_scheme: ColorScheme,
    pub font_scheme: FontScheme,
    pub format_scheme: FormatScheme,
}

impl Default for Theme {
    /// The default Office theme.
    fn default() -> Self {
        Self {
            name: "Office Theme".to_string(),
            color_scheme: ColorScheme::default(),
            font_scheme: FontScheme::default(),
            format_scheme: FormatScheme::default(),
        }
    }
}

fn parse_color_scheme(node: &XmlNode) -> ColorScheme {
    let mut scheme = ColorScheme {
        name: node.attr_or("name", "").to_string(),
        ..Default::default()
    };
    for slot in COLOR_SLOTS {
        if let Some(color) = node.child(slot).and_then(parse_color)
            && let Some(target) = scheme.slot_mut(slot)
        {
            *target = color;
        }
    }
    scheme
}

fn parse_font_collection(node: &XmlNode, default_latin: &str) -> FontCollection {
    let typeface = |name: &str| {
        node.child(name)
            .and_then(|n| n.attr("typeface"))
            .unwrap_or("")
            .to_string()
    };
    let latin = typeface("latin");

    FontCollection {
        latin: if latin.is_empty() {
            default_latin.to_string()
        } else {
            latin
        },
        east_asian: typeface("ea"),
        complex_script: typeface("cs"),
        scripts: node
            .children_named("font")
            .into_iter()
            .filter_map(|f| Some((f.attr("script")?.to_string(), f.attr("typeface")?.to_string())))
            .collect(),
    }
}

fn parse_font_scheme(node: &XmlNode) -> FontScheme {
    FontScheme {
        name: node.attr_or("name", "").to_string(),
        major: node
            .child("majorFont")
            .map(|n| parse_font_collection(n, DEFAULT_MAJOR_LATIN))
            .unwrap_or_else(|| FontCollection::with_latin(DEFAULT_MAJOR_LATIN)),
        minor: node
            .child("minorFont")
            .map(|n| parse_font_collection(n, DEFAULT_MINOR_LATIN))
            .unwrap_or_else(|| FontCollection::with_latin(DEFAULT_MINOR_LATIN)),
    }
}

fn parse_fill_list(list: Option<&XmlNode>, rels: &Relationships) -> Vec<Fill> {
    list.map(|lst| {
        lst.children()
            .iter()
            .filter_map(|el| parse_fill_element(el, rels))
            .collect()
    })
    .unwrap_or_default()
}

fn read_format_scheme(node: &XmlNode, rels: &Relationships) -> FormatScheme {
    FormatScheme {
        name: node.attr_or("name", "").to_string(),
        fill_styles: parse_fill_list(node.child("fillStyleLst"), rels),
        line_styles: node
            .child("lnStyleLst")
            .map(|lst| {
                lst.children_named("ln")
                    .into_iter()
                    .map(|ln| parse_line(ln, rels))
                    .collect()
            })
            .unwrap_or_default(),
        effect_styles: node
            .child("effectStyleLst")
            .map(|lst| {
                lst.children_named("effectStyle")
                    .into_iter()
                    .map(|style| {
                        style
                            .child("effectLst")
                            .map(parse_effect_list)
                            .unwrap_or_default()
                    })
                    .collect()
            })
            .unwrap_or_default(),
        bg_fill_styles: parse_fill_list(node.child("bgFillStyleLst"), rels),
    }
}

/// Read a format scheme; absent or empty style lists take the Office styles.
fn parse_format_scheme(node: &XmlNode, rels: &Relationships) -> FormatScheme {
    fn or_office<T: Clone>(list: Vec<T>, office: &[T]) -> Vec<T> {
        if list.is_empty() { office.to_vec() } else { list }
    }

    let scheme = read_format_scheme(node, rels);
    let office = &*OFFICE_FORMAT_SCHEME;
    FormatScheme {
        fill_styles: or_office(scheme.fill_styles, &office.fill_styles),
        line_styles: or_office(scheme.line_styles, &office.line_styles),
        effect_styles: or_office(scheme.effect_styles, &office.effect_styles),
        bg_fill_styles: or_office(scheme.bg_fill_styles, &office.bg_fill_styles),
        ..scheme
    }
}

/// Build a theme from a parsed `a:theme` root.
///
/// `rels` are the theme part's relationships, used by picture fills in the
/// format scheme.
pub fn theme_from_tree(root: &XmlNode, rels: &Relationships) -> Theme {
    let elements = root.child("themeElements");
    let name = root.attr_or("name", "");

    Theme {
        name: if name.is_empty() {
            Theme::default().name
        } else {
            name.to_string()
        },
        color_scheme: elements
            .and_then(|e| e.child("clrScheme"))
            .map(parse_color_scheme)
            .unwrap_or_default(),
        font_scheme: elements
            .and_then(|e| e.child("fontScheme"))
            .map(parse_font_scheme)
            .unwrap_or_default(),
        format_scheme: elements
            .and_then(|e| e.child("fmtScheme"))
            .map(|n| parse_format_scheme(n, rels))
            .unwrap_or_default(),
    }
}

/// Parse a theme part.
pub fn parse_theme(parser: &MarkupParser, xml: &[u8], rels: &Relationships) -> Result<Theme> {
    Ok(theme_from_tree(&parser.parse(xml)?, rels))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::drawings::color::ColorKind;

    const THEME: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" name="Facet">
  <a:themeElements>
    <a:clrScheme name="Facet">
      <a:dk1><a:sysClr val="windowText" lastClr="000000"/></a:dk1>
      <a:lt1><a:sysClr val="window" lastClr="FFFFFF"/></a:lt1>
      <a:dk2><a:srgbClr val="2C3C43"/></a:dk2>
      <a:lt2><a:srgbClr val="EBEBEB"/></a:lt2>
      <a:accent1><a:srgbClr val="90C226"/></a:accent1>
      <a:accent2><a:srgbClr val="54A021"/></a:accent2>
      <a:accent4><a:srgbClr val="D8B25C"/></a:accent4>
      <a:accent5><a:srgbClr val="A5C249"/></a:accent5>
      <a:accent6><a:srgbClr val="2E9B65"/></a:accent6>
      <a:hlink><a:srgbClr val="6BB76D"/></a:hlink>
      <a:folHlink><a:srgbClr val="A1D1A2"/></a:folHlink>
    </a:clrScheme>
    <a:fontScheme name="Facet">
      <a:majorFont><a:latin typeface="Trebuchet MS"/><a:ea typeface=""/><a:cs typeface=""/><a:font script="Jpan" typeface="Yu Gothic"/></a:majorFont>
      <a:minorFont><a:latin typeface="Trebuchet MS"/><a:ea typeface=""/><a:cs typeface=""/></a:minorFont>
    </a:fontScheme>
    <a:fmtScheme name="Facet">
      <a:fillStyleLst>
        <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
        <a:gradFill rotWithShape="1"><a:gsLst><a:gs pos="0"><a:schemeClr val="phClr"><a:tint val="67000"/></a:schemeClr></a:gs><a:gs pos="100000"><a:schemeClr val="phClr"/></a:gs></a:gsLst><a:lin ang="5400000" scaled="0"/></a:gradFill>
        <a:solidFill><a:schemeClr val="phClr"><a:shade val="95000"/></a:schemeClr></a:solidFill>
      </a:fillStyleLst>
      <a:lnStyleLst>
        <a:ln w="9525"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln>
        <a:ln w="25400"/>
        <a:ln w="34925"/>
      </a:lnStyleLst>
      <a:effectStyleLst>
        <a:effectStyle><a:effectLst/></a:effectStyle>
        <a:effectStyle><a:effectLst><a:outerShdw blurRad="57150" dist="19050" dir="5400000"><a:srgbClr val="000000"><a:alpha val="63000"/></a:srgbClr></a:outerShdw></a:effectLst></a:effectStyle>
      </a:effectStyleLst>
      <a:bgFillStyleLst>
        <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
        <a:solidFill><a:srgbClr val="FAFAFA"/></a:solidFill>
      </a:bgFillStyleLst>
    </a:fmtScheme>
  </a:themeElements>
</a:theme>"#;

    fn theme() -> Theme {
        let rels = Relationships::new("ppt/theme/theme1.xml");
        parse_theme(&MarkupParser::new(), THEME.as_bytes(), &rels).unwrap()
    }

    #[test]
    fn test_color_scheme() {
        let theme = theme();
        let scheme = &theme.color_scheme;

        assert_eq!(theme.name, "Facet");
        assert_eq!(scheme.name, "Facet");
        assert_eq!(scheme.dk1.hex(), Some("000000"));
        assert_eq!(scheme.accent1.hex(), Some("90C226"));
        assert_eq!(scheme.get("folHlink").and_then(Color::hex), Some("A1D1A2"));
        assert_eq!(scheme.get("tx2"), Some(&scheme.dk2));
        assert!(scheme.get("phClr").is_none());
    }

    #[test]
    fn test_missing_slot_uses_default_palette() {
        let scheme = theme().color_scheme;
        assert_eq!(scheme.accent3.hex(), Some("A5A5A5"));
        assert_eq!(scheme.iter().count(), 12);
        assert!(
            scheme
                .iter()
                .all(|(_, c)| matches!(c.kind, ColorKind::Rgb { .. }))
        );
    }

    #[test]
    fn test_font_scheme() {
        let fonts = theme().font_scheme;
        assert_eq!(fonts.major.latin, "Trebuchet MS");
        assert_eq!(fonts.major.east_asian, "");
        assert_eq!(fonts.major.scripts.get("Jpan").map(String::as_str), Some("Yu Gothic"));
        assert_eq!(fonts.minor.latin, "Trebuchet MS");
    }

    #[test]
    fn test_format_scheme_refs() {
        let fmt = theme().format_scheme;
        assert_eq!(fmt.fill_styles.len(), 3);
        assert_eq!(fmt.line_styles.len(), 3);
        assert_eq!(fmt.effect_styles.len(), 2);

        assert!(matches!(fmt.fill_for_ref(2), Some(Fill::Gradient { .. })));
        assert!(fmt.fill_for_ref(0).is_none());
        assert!(fmt.fill_for_ref(4).is_none());
        match fmt.fill_for_ref(1002) {
            Some(Fill::Solid { color }) => assert_eq!(color.hex(), Some("FAFAFA")),
            other => panic!("unexpected bg fill {:?}", other),
        }
        assert_eq!(fmt.line_for_ref(2).and_then(|l| l.width), Some(25_400));
        assert!(fmt.line_for_ref(0).is_none());
        assert!(fmt.effect_for_ref(1).is_some_and(Effects::is_empty));
        assert!(fmt.effect_for_ref(2).is_some_and(|e| e.outer_shadow.is_some()));
    }

    #[test]
    fn test_default_format_scheme_has_office_styles() {
        let fmt = FormatScheme::default();
        assert_eq!(fmt.name, "Office");
        assert_eq!(fmt.fill_styles.len(), 3);
        assert_eq!(fmt.line_styles.len(), 3);
        assert_eq!(fmt.effect_styles.len(), 3);
        assert_eq!(fmt.bg_fill_styles.len(), 3);

        assert!(matches!(fmt.fill_for_ref(1), Some(Fill::Solid { .. })));
        assert!(matches!(fmt.fill_for_ref(1003), Some(Fill::Gradient { .. })));
        assert_eq!(fmt.line_for_ref(1).and_then(|l| l.width), Some(6_350));
        assert!(fmt.effect_for_ref(3).is_some_and(|e| e.outer_shadow.is_some()));
    }

    #[test]
    fn test_missing_style_lists_take_office_styles() {
        let xml = r#"<a:theme name="Sparse"><a:themeElements><a:fmtScheme name="Sparse">
            <a:fillStyleLst><a:solidFill><a:srgbClr val="123456"/></a:solidFill></a:fillStyleLst>
            <a:bgFillStyleLst/>
        </a:fmtScheme></a:themeElements></a:theme>"#;
        let rels = Relationships::new("ppt/theme/theme1.xml");
        let fmt = parse_theme(&MarkupParser::new(), xml.as_bytes(), &rels)
            .unwrap()
            .format_scheme;

        assert_eq!(fmt.name, "Sparse");
        assert_eq!(fmt.fill_styles.len(), 1);
        match fmt.fill_for_ref(1) {
            Some(Fill::Solid { color }) => assert_eq!(color.hex(), Some("123456")),
            other => panic!("unexpected fill {:?}", other),
        }
        assert_eq!(fmt.line_styles, FormatScheme::default().line_styles);
        assert_eq!(fmt.bg_fill_styles.len(), 3);
        assert!(fmt.fill_for_ref(1001).is_some());
    }

    #[test]
    fn test_empty_theme_is_office_default() {
        let rels = Relationships::new("ppt/theme/theme1.xml");
        let theme = parse_theme(&MarkupParser::new(), b"<a:theme/>", &rels).unwrap();
        assert_eq!(theme, Theme::default());
        assert_eq!(theme.font_scheme.major.latin, "Calibri Light");
    }
}
