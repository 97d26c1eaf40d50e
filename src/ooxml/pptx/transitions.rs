//! Slide transition effects for PowerPoint presentations.
//!
//! A `p:transition` element carries the timing attributes and at most one effect
//! child (`p:fade`, `p:push`, `p14:vortex`...). Newer effects are usually wrapped
//! in `mc:AlternateContent` with a PowerPoint 2006 fallback; the `Choice` branch is
//! read first.

use crate::ooxml::pptx::diagnostics::IssueCode;
use crate::ooxml::pptx::session::PartContext;
use crate::ooxml::xml::XmlNode;
use phf::phf_set;
use serde::Serialize;
use std::collections::BTreeMap;

/// Effect element names recognized as transition kinds, without prefix.
static KNOWN_TRANSITIONS: phf::Set<&'static str> = phf_set! {
    // PresentationML 2006
    "blinds", "checker", "circle", "comb", "cover", "cut", "diamond", "dissolve",
    "fade", "newsflash", "plus", "pull", "push", "random", "randomBar", "split",
    "strips", "wedge", "wheel", "wipe", "zoom",
    // PowerPoint 2010 (p14)
    "conveyor", "doors", "ferris", "flash", "flip", "flythrough", "gallery",
    "glitter", "honeycomb", "pan", "prism", "reveal", "ripple", "shred", "switch",
    "vortex", "warp", "wheelReverse", "window",
    // PowerPoint 2013 (p15)
    "prstTrans",
};

/// Children of `p:transition` that are not the effect.
const NON_EFFECT_CHILDREN: &[&str] = &["sndAc", "extLst"];

/// Transition speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TransitionSpeed {
    /// Slow transition (1500ms)
    Slow,
    /// Medium transition (1000ms)
    Medium,
    /// Fast transition (500ms)
    Fast,
}

impl TransitionSpeed {
    /// Get the duration in milliseconds.
    pub fn duration_ms(&self) -> u32 {
        match self {
            TransitionSpeed::Slow => 1500,
            TransitionSpeed::Medium => 1000,
            TransitionSpeed::Fast => 500,
        }
    }

    /// Parse from OOXML speed value; the schema default is `fast`.
    pub(crate) fn from_xml_value(value: &str) -> Self {
        match value {
            "slow" => TransitionSpeed::Slow,
            "med" => TransitionSpeed::Medium,
            _ => TransitionSpeed::Fast,
        }
    }
}

/// Transition sound (`p:sndAc/p:stSnd`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionSound {
    /// Sound name as shown in the UI
    pub name: String,
    pub r_id: String,
    /// Resolved sound part; empty when the relationship is missing
    pub path: String,
    /// Whether to loop the sound until the next sound
    pub loop_sound: bool,
}

/// Complete slide transition.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideTransition {
    /// Effect element name without prefix (`fade`, `vortex`), or `none`
    pub kind: String,
    /// Raw attributes of the effect element (`dir`, `orient`, `thruBlk`...)
    pub attributes: BTreeMap<String, String>,
    pub speed: TransitionSpeed,
    /// Explicit duration in milliseconds (`p14:dur` or `dur`)
    pub duration_ms: Option<u32>,
    /// Whether to advance slide on mouse click
    pub advance_on_click: bool,
    /// Auto-advance after delay in milliseconds (None = no auto-advance)
    pub advance_after_ms: Option<u32>,
    pub sound: Option<TransitionSound>,
}

impl Default for SlideTransition {
    fn default() -> Self {
        Self {
            kind: "none".to_string(),
            attributes: BTreeMap::new(),
            speed: TransitionSpeed::Fast,
            duration_ms: None,
            advance_on_click: true,
            advance_after_ms: None,
            sound: None,
        }
    }
}

impl SlideTransition {
    /// Get the effective duration in milliseconds.
    pub fn effective_duration_ms(&self) -> u32 {
        self.duration_ms.unwrap_or_else(|| self.speed.duration_ms())
    }

    pub fn is_none(&self) -> bool {
        self.kind == "none"
    }

    /// Raw attribute of the effect element.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

/// Name without its namespace prefix.
fn unprefixed(name: &str) -> &str {
    name.rsplit(':').next().unwrap_or(name)
}

/// Locate the `p:transition` element of a slide, layout or master root.
fn find_transition(root: &XmlNode) -> Option<&XmlNode> {
    if let Some(transition) = root.child("transition") {
        return Some(transition);
    }
    root.children_named("AlternateContent")
        .into_iter()
        .find_map(|alternate| {
            alternate
                .children_named("Choice")
                .into_iter()
                .find_map(|choice| choice.child("transition"))
                .or_else(|| alternate.child("Fallback").and_then(|f| f.child("transition")))
        })
}

fn parse_sound(transition: &XmlNode, ctx: &mut PartContext<'_>) -> Option<TransitionSound> {
    let st_snd = transition.child("sndAc")?.child("stSnd")?;
    let snd = st_snd.child("snd")?;
    let r_id = snd.attr_or("r:embed", "").to_string();
    let path = ctx
        .resolve(&r_id, IssueCode::MissingRelationship)
        .unwrap_or_default();

    Some(TransitionSound {
        name: snd.attr_or("name", "").to_string(),
        r_id,
        path,
        loop_sound: st_snd.attr_bool("loop").unwrap_or(false),
    })
}

/// Parse the transition of a slide, layout or master part root.
///
/// `None` when the part declares no transition. An unrecognized effect element is
/// reported as [`IssueCode::UnknownTransition`] and yields kind `none`.
pub fn parse_transition(root: &XmlNode, ctx: &mut PartContext<'_>) -> Option<SlideTransition> {
    let transition = find_transition(root)?;

    let effect = transition
        .children()
        .iter()
        .find(|c| !NON_EFFECT_CHILDREN.contains(&c.local_name()));
    let (kind, attributes) = match effect {
        Some(el) => {
            let name = unprefixed(el.local_name());
            if KNOWN_TRANSITIONS.contains(name) {
                let attributes = el
                    .attributes()
                    .iter()
                    .map(|a| (a.local_name().to_string(), a.value.clone()))
                    .collect();
                (name.to_string(), attributes)
            } else {
                ctx.warn(
                    IssueCode::UnknownTransition,
                    format!("unknown transition effect {}", el.name()),
                    Some(el.name()),
                );
                ("none".to_string(), BTreeMap::new())
            }
        },
        None => ("none".to_string(), BTreeMap::new()),
    };

    let duration_ms = transition
        .attributes()
        .iter()
        .find(|a| a.name == "p14:dur")
        .and_then(|a| a.value.trim().parse::<u32>().ok())
        .or_else(|| transition.attr_u32("dur"));

    Some(SlideTransition {
        kind,
        attributes,
        speed: TransitionSpeed::from_xml_value(transition.attr_or("spd", "fast")),
        duration_ms,
        advance_on_click: transition.attr_bool("advClick").unwrap_or(true),
        advance_after_ms: transition.attr_u32("advTm"),
        sound: parse_sound(transition, ctx),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::opc::Relationships;
    use crate::ooxml::pptx::session::{LinkedParts, ParseOptions};
    use crate::ooxml::xml::MarkupParser;

    const RELS: &str = r#"<Relationships><Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/audio" Target="../media/audio1.wav"/></Relationships>"#;

    fn transition(xml: &str) -> (Option<SlideTransition>, Vec<IssueCode>) {
        let root = MarkupParser::new().parse(xml.as_bytes()).unwrap();
        let rels = Relationships::from_xml(RELS.as_bytes(), "ppt/slides/slide1.xml").unwrap();
        let options = ParseOptions::default();
        let linked = LinkedParts::default();
        let mut ctx = PartContext::new("ppt/slides/slide1.xml", &rels, &options, &linked);
        let t = parse_transition(&root, &mut ctx);
        let codes = ctx.diagnostics.warnings.iter().map(|w| w.code).collect();
        (t, codes)
    }

    #[test]
    fn test_transition_speed() {
        assert_eq!(TransitionSpeed::Fast.duration_ms(), 500);
        assert_eq!(TransitionSpeed::Medium.duration_ms(), 1000);
        assert_eq!(TransitionSpeed::Slow.duration_ms(), 1500);
        assert_eq!(TransitionSpeed::from_xml_value("med"), TransitionSpeed::Medium);
    }

    #[test]
    fn test_plain_transition() {
        let (t, codes) = transition(
            r#"<p:sld><p:cSld/><p:transition spd="slow" advClick="0" advTm="3000"><p:push dir="u"/></p:transition></p:sld>"#,
        );
        let t = t.unwrap();
        assert!(codes.is_empty());
        assert_eq!(t.kind, "push");
        assert_eq!(t.attribute("dir"), Some("u"));
        assert_eq!(t.speed, TransitionSpeed::Slow);
        assert_eq!(t.effective_duration_ms(), 1500);
        assert!(!t.advance_on_click);
        assert_eq!(t.advance_after_ms, Some(3000));
    }

    #[test]
    fn test_alternate_content_choice() {
        let (t, _) = transition(
            r#"<p:sld><p:cSld/><mc:AlternateContent>
                <mc:Choice Requires="p14"><p:transition spd="slow" p14:dur="2000"><p14:vortex dir="r"/></p:transition></mc:Choice>
                <mc:Fallback><p:transition spd="slow"><p:fade/></p:transition></mc:Fallback>
            </mc:AlternateContent></p:sld>"#,
        );
        let t = t.unwrap();
        assert_eq!(t.kind, "vortex");
        assert_eq!(t.duration_ms, Some(2000));
        assert_eq!(t.effective_duration_ms(), 2000);
    }

    #[test]
    fn test_unknown_effect_warns() {
        let (t, codes) = transition(
            r#"<p:sld><p:transition><p99:sparkle/></p:transition></p:sld>"#,
        );
        let t = t.unwrap();
        assert!(t.is_none());
        assert_eq!(codes, vec![IssueCode::UnknownTransition]);
    }

    #[test]
    fn test_sound_and_defaults() {
        let (t, codes) = transition(
            r#"<p:sld><p:transition><p:sndAc><p:stSnd loop="1"><p:snd r:embed="rId3" name="applause.wav"/></p:stSnd></p:sndAc></p:transition></p:sld>"#,
        );
        let t = t.unwrap();
        assert!(codes.is_empty());
        assert_eq!(t.kind, "none");
        assert_eq!(t.speed, TransitionSpeed::Fast);
        assert!(t.advance_on_click);
        let sound = t.sound.unwrap();
        assert_eq!(sound.name, "applause.wav");
        assert_eq!(sound.path, "ppt/media/audio1.wav");
        assert!(sound.loop_sound);

        assert_eq!(transition(r#"<p:sld><p:cSld/></p:sld>"#).0, None);
    }
}
