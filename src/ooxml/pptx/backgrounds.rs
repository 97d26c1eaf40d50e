//! Slide, layout and master backgrounds (`p:cSld/p:bg`).
//!
//! A background is either declared directly (`p:bgPr` holding a fill) or points
//! into the background fill styles of the theme (`p:bgRef`). References stay
//! references; [`Background::resolve`] looks them up on demand.

use crate::ooxml::drawings::color::{Color, parse_color};
use crate::ooxml::drawings::effects::{Effects, parse_effects};
use crate::ooxml::drawings::fill::{Fill, parse_fill};
use crate::ooxml::pptx::session::PartContext;
use crate::ooxml::pptx::shapes::base::check_fill;
use crate::ooxml::pptx::theme::FormatScheme;
use crate::ooxml::xml::XmlNode;
use serde::Serialize;

/// Background of a slide, layout or master.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Background {
    /// `p:bgPr`
    #[serde(rename_all = "camelCase")]
    Fill {
        fill: Fill,
        shade_to_title: bool,
        effects: Option<Effects>,
    },
    /// `p:bgRef`: index into the theme format scheme (1001 and up for the
    /// background fill list) plus the color substituted for `phClr`
    Reference { idx: u32, color: Option<Color> },
}

impl Background {
    /// The concrete fill of this background.
    ///
    /// Direct fills are returned as declared. References are looked up in the
    /// format scheme with `phClr` replaced by the reference color.
    pub fn resolve(&self, format: &FormatScheme) -> Option<Fill> {
        match self {
            Background::Fill { fill, .. } => Some(fill.clone()),
            Background::Reference { idx, color } => {
                let fill = format.fill_for_ref(*idx)?.clone();
                Some(match color {
                    Some(color) => substitute_placeholder(fill, color),
                    None => fill,
                })
            },
        }
    }
}

fn replace_placeholder_color(color: &mut Color, with: &Color) {
    if color.scheme_name() == Some("phClr") {
        color.kind = with.kind.clone();
        if color.alpha.is_none() {
            color.alpha = with.alpha;
        }
    }
}

/// Replace every `phClr` color of a style fill with a concrete color, keeping the
/// style's own modifiers.
fn substitute_placeholder(mut fill: Fill, with: &Color) -> Fill {
    match &mut fill {
        Fill::Solid { color } => replace_placeholder_color(color, with),
        Fill::Gradient { stops, .. } => {
            for stop in stops.iter_mut() {
                replace_placeholder_color(&mut stop.color, with);
            }
        },
        Fill::Pattern {
            foreground,
            background,
            ..
        } => {
            for color in [foreground, background].into_iter().flatten() {
                replace_placeholder_color(color, with);
            }
        },
        _ => {},
    }
    fill
}

/// Parse the background of a common slide data element (`p:cSld`).
///
/// `None` when no `p:bg` is declared or its properties hold no fill.
pub fn parse_background(c_sld: &XmlNode, ctx: &mut PartContext<'_>) -> Option<Background> {
    let bg = c_sld.child("bg")?;

    if let Some(bg_pr) = bg.child("bgPr") {
        let fill = parse_fill(bg_pr, ctx.rels);
        check_fill(fill.as_ref(), ctx);
        return fill.map(|fill| Background::Fill {
            fill,
            shade_to_title: bg_pr.attr_bool("shadeToTitle").unwrap_or(false),
            effects: parse_effects(Some(bg_pr)),
        });
    }

    let bg_ref = bg.child("bgRef")?;
    Some(Background::Reference {
        idx: bg_ref.attr_u32("idx").unwrap_or(0),
        color: parse_color(bg_ref),
    })
}

/// The first present background along an inheritance chain.
pub(crate) fn first_background<'a>(
    chain: impl IntoIterator<Item = Option<&'a Background>>,
) -> Option<&'a Background> {
    chain.into_iter().flatten().next()
}
