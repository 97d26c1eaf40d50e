//! Animation timing for PowerPoint slides.
//!
//! `p:timing` holds a tree of time nodes: containers (`p:par`, `p:seq`) and
//! behaviours (`p:set`, `p:anim`, `p:animEffect`...). The tree is kept as
//! [`AnimationNode`]s; [`flatten_steps`] turns a subtree into the click steps a
//! playback controller walks through.
//!
//! Children of a container are collected kind by kind in a fixed order unless
//! document order is requested through the parse options.

use crate::common::unit::{angle_to_degrees, percent_from_raw};
use crate::ooxml::drawings::color::{Color, parse_color};
use crate::ooxml::pptx::diagnostics::IssueCode;
use crate::ooxml::pptx::session::PartContext;
use crate::ooxml::xml::{XmlNode, parse_i64};
use serde::Serialize;

/// Time node kinds in draining order.
const NODE_KINDS: &[&str] = &[
    "seq",
    "par",
    "set",
    "anim",
    "animEffect",
    "animClr",
    "animMotion",
    "animRot",
    "animScale",
    "audio",
    "video",
];

/// A time value: milliseconds or `indefinite`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TimeValue {
    Ms(i64),
    Indefinite,
}

impl TimeValue {
    fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw == "indefinite" {
            return Some(TimeValue::Indefinite);
        }
        parse_i64(raw).map(TimeValue::Ms)
    }

    /// Milliseconds, with `indefinite` counted as zero.
    pub fn as_offset_ms(&self) -> i64 {
        match self {
            TimeValue::Ms(ms) => *ms,
            TimeValue::Indefinite => 0,
        }
    }
}

/// A start or end condition (`p:cond`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeCondition {
    /// Trigger event (`onBegin`, `onClick`, `onNext`...)
    pub event: Option<String>,
    pub delay: Option<TimeValue>,
    /// Shape whose event triggers the condition
    pub target_shape: Option<u32>,
    /// Time node referenced by `p:tn`
    pub time_node: Option<u32>,
    /// `p:rtn/@val` (`first`, `last`, `all`)
    pub runtime_node: Option<String>,
}

/// Timing attributes shared by every node (`p:cTn`).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommonTiming {
    pub id: u32,
    pub preset_id: Option<u32>,
    /// `entr`, `exit`, `emph`, `path`, `verb`, `mediacall`
    pub preset_class: Option<String>,
    pub preset_subtype: Option<u32>,
    /// `tmRoot`, `mainSeq`, `clickEffect`, `withEffect`, `afterEffect`...
    pub node_type: Option<String>,
    pub group_id: Option<u32>,
    /// Begin delay of the first start condition
    pub delay: Option<TimeValue>,
    pub start_conditions: Vec<TimeCondition>,
    pub end_conditions: Vec<TimeCondition>,
    pub duration: Option<TimeValue>,
    /// `remove`, `freeze`, `hold`, `transition`
    pub fill: Option<String>,
    /// Repeat count in 1000ths (1000 = once)
    pub repeat_count: Option<TimeValue>,
    pub repeat_duration: Option<TimeValue>,
    /// `always`, `whenNotActive`, `never`
    pub restart: Option<String>,
    /// Acceleration as a percentage 0–100
    pub accel: f64,
    /// Deceleration as a percentage 0–100
    pub decel: f64,
    pub auto_reverse: bool,
}

impl CommonTiming {
    /// Begin delay used for step offsets.
    pub fn offset_ms(&self) -> i64 {
        self.delay.map(|d| d.as_offset_ms()).unwrap_or(0)
    }
}

/// Range of text inside a target shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TextRange {
    Paragraphs { start: u32, end: u32 },
    Characters { start: u32, end: u32 },
}

/// Element a behaviour acts on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum AnimationTarget {
    /// `p:spTgt`
    #[serde(rename_all = "camelCase")]
    Shape {
        shape_id: u32,
        text_range: Option<TextRange>,
        /// Only the shape background (`p:bg`)
        background: bool,
        /// Sub-shape id (`p:subSp`)
        sub_shape: Option<String>,
    },
    /// `p:sldTgt`
    Slide,
    /// `p:sndTgt`: an embedded sound
    #[serde(rename_all = "camelCase")]
    Sound { r_id: String, name: String },
    /// `p:inkTgt`
    #[serde(rename_all = "camelCase")]
    Ink { shape_id: u32 },
}

impl AnimationTarget {
    pub fn shape_id(&self) -> Option<u32> {
        match self {
            AnimationTarget::Shape { shape_id, .. } | AnimationTarget::Ink { shape_id } => {
                Some(*shape_id)
            },
            _ => None,
        }
    }
}

/// Common behaviour data (`p:cBhvr`).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Behavior {
    pub timing: CommonTiming,
    pub target: Option<AnimationTarget>,
    /// Animated attribute names (`style.visibility`, `ppt_x`...)
    pub attribute_names: Vec<String>,
    /// `base`, `sum`, `replace`, `mult`, `none`
    pub additive: Option<String>,
    pub accumulate: Option<String>,
    pub transform_type: Option<String>,
}

/// A typed value (`p:strVal`, `p:intVal`...).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum AnimationValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Color(Color),
}

/// Keyframe of an `p:anim` (`p:tav`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeAnimatedValue {
    /// Position in 1000ths of a percent of the duration
    pub time: Option<TimeValue>,
    pub formula: Option<String>,
    pub value: Option<AnimationValue>,
}

/// Parallel container (`p:par`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParallelNode {
    pub timing: CommonTiming,
    pub children: Vec<AnimationNode>,
}

/// Sequence container (`p:seq`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SequenceNode {
    pub timing: CommonTiming,
    pub children: Vec<AnimationNode>,
    pub concurrent: bool,
    /// `none` or `seek`
    pub prev_action: Option<String>,
    pub next_action: Option<String>,
}

/// `p:animEffect`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectNode {
    pub behavior: Behavior,
    /// `in`, `out`, `none`
    pub transition: Option<String>,
    /// Filter description (`fade`, `wipe(down)`...)
    pub filter: Option<String>,
}

/// `p:set`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetNode {
    pub behavior: Behavior,
    pub to: Option<AnimationValue>,
}

/// `p:anim`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimateNode {
    pub behavior: Behavior,
    /// `discrete`, `lin`, `fmla`
    pub calc_mode: Option<String>,
    /// `str`, `num`, `clr`
    pub value_type: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub by: Option<String>,
    pub values: Vec<TimeAnimatedValue>,
}

/// Color change of an `p:animClr/p:by`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ColorOffset {
    /// Channel offsets in 1000ths of a percent
    Rgb { r: i32, g: i32, b: i32 },
    /// Hue in degrees, saturation and luminance in 1000ths of a percent
    Hsl { h: f64, s: i32, l: i32 },
}

/// `p:animClr`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimateColorNode {
    pub behavior: Behavior,
    /// `rgb` or `hsl`
    pub color_space: Option<String>,
    /// `cw` or `ccw`
    pub direction: Option<String>,
    pub by: Option<ColorOffset>,
    pub from: Option<Color>,
    pub to: Option<Color>,
}

/// `p:animMotion`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimateMotionNode {
    pub behavior: Behavior,
    /// Motion path in slide-relative units
    pub path: Option<String>,
    /// `parent` or `layout`
    pub origin: Option<String>,
    /// `relative` or `fixed`
    pub path_edit_mode: Option<String>,
    /// Rotation along the path in degrees
    pub rotation: Option<f64>,
}

/// `p:animRot`, all angles in degrees.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimateRotationNode {
    pub behavior: Behavior,
    pub by: Option<f64>,
    pub from: Option<f64>,
    pub to: Option<f64>,
}

/// Horizontal and vertical scale in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Scale {
    pub x: f64,
    pub y: f64,
}

/// `p:animScale`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimateScaleNode {
    pub behavior: Behavior,
    pub by: Option<Scale>,
    pub from: Option<Scale>,
    pub to: Option<Scale>,
    pub zoom_contents: bool,
}

/// `p:audio` or `p:video` (`p:cMediaNode`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaNode {
    pub timing: CommonTiming,
    pub target: Option<AnimationTarget>,
    /// Volume in 1000ths of a percent
    pub volume: Option<u32>,
    pub mute: bool,
    pub show_when_stopped: bool,
    /// Audio only
    pub is_narration: bool,
    /// Video only
    pub full_screen: bool,
}

/// A node of the timing tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum AnimationNode {
    Parallel(ParallelNode),
    Sequence(SequenceNode),
    Effect(EffectNode),
    Set(SetNode),
    Animate(AnimateNode),
    AnimateColor(AnimateColorNode),
    AnimateMotion(AnimateMotionNode),
    AnimateRotation(AnimateRotationNode),
    AnimateScale(AnimateScaleNode),
    Audio(MediaNode),
    Video(MediaNode),
}

impl AnimationNode {
    pub fn timing(&self) -> &CommonTiming {
        match self {
            AnimationNode::Parallel(n) => &n.timing,
            AnimationNode::Sequence(n) => &n.timing,
            AnimationNode::Effect(n) => &n.behavior.timing,
            AnimationNode::Set(n) => &n.behavior.timing,
            AnimationNode::Animate(n) => &n.behavior.timing,
            AnimationNode::AnimateColor(n) => &n.behavior.timing,
            AnimationNode::AnimateMotion(n) => &n.behavior.timing,
            AnimationNode::AnimateRotation(n) => &n.behavior.timing,
            AnimationNode::AnimateScale(n) => &n.behavior.timing,
            AnimationNode::Audio(n) | AnimationNode::Video(n) => &n.timing,
        }
    }

    /// Child nodes of a container; empty for leaves.
    pub fn children(&self) -> &[AnimationNode] {
        match self {
            AnimationNode::Parallel(n) => &n.children,
            AnimationNode::Sequence(n) => &n.children,
            _ => &[],
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(self, AnimationNode::Parallel(_) | AnimationNode::Sequence(_))
    }

    pub fn target(&self) -> Option<&AnimationTarget> {
        match self {
            AnimationNode::Parallel(_) | AnimationNode::Sequence(_) => None,
            AnimationNode::Effect(n) => n.behavior.target.as_ref(),
            AnimationNode::Set(n) => n.behavior.target.as_ref(),
            AnimationNode::Animate(n) => n.behavior.target.as_ref(),
            AnimationNode::AnimateColor(n) => n.behavior.target.as_ref(),
            AnimationNode::AnimateMotion(n) => n.behavior.target.as_ref(),
            AnimationNode::AnimateRotation(n) => n.behavior.target.as_ref(),
            AnimationNode::AnimateScale(n) => n.behavior.target.as_ref(),
            AnimationNode::Audio(n) | AnimationNode::Video(n) => n.target.as_ref(),
        }
    }

    /// Depth-first search including this node.
    pub fn find(&self, predicate: &dyn Fn(&AnimationNode) -> bool) -> Option<&AnimationNode> {
        if predicate(self) {
            return Some(self);
        }
        self.children().iter().find_map(|c| c.find(predicate))
    }
}

/// Build directive kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BuildKind {
    /// `p:bldP`: text built by paragraph
    Paragraph,
    /// `p:bldDgm`
    Diagram,
    /// `p:bldGraphic` (charts)
    Graphic,
    /// `p:bldOleChart`
    OleChart,
}

/// An entry of the build list (`p:bldLst`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationBuild {
    pub kind: BuildKind,
    pub shape_id: u32,
    pub group_id: u32,
    /// Build style (`whole`, `p`, `cust`, `sp`, `allAtOnce`, `series`...)
    pub build: Option<String>,
    pub ui_expand: bool,
    pub animate_background: bool,
    pub reverse: bool,
    /// Auto-advance time for paragraph builds
    pub advance_auto: Option<TimeValue>,
}

/// Timing of a slide.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideTiming {
    pub build_list: Vec<AnimationBuild>,
    /// Top-level time nodes of `p:tnLst`
    pub sequences: Vec<AnimationNode>,
}

impl SlideTiming {
    pub fn is_empty(&self) -> bool {
        self.build_list.is_empty() && self.sequences.is_empty()
    }

    /// The main click sequence (`nodeType="mainSeq"`).
    pub fn main_sequence(&self) -> Option<&AnimationNode> {
        self.sequences.iter().find_map(|root| {
            root.find(&|n| {
                matches!(n, AnimationNode::Sequence(_))
                    && n.timing().node_type.as_deref() == Some("mainSeq")
            })
        })
    }

    /// Playback steps of the main sequence, or of every top-level node in order
    /// when there is no main sequence.
    pub fn steps(&self) -> Vec<AnimationStep<'_>> {
        match self.main_sequence() {
            Some(main) => flatten_steps(main),
            None => self.sequences.iter().flat_map(flatten_steps).collect(),
        }
    }
}

/// A member of a playback step.
#[derive(Debug, Clone, PartialEq)]
pub struct StepMember<'a> {
    pub node: &'a AnimationNode,
    /// Sum of the begin delays of the member and its ancestors inside the step
    pub offset_ms: i64,
}

/// Nodes started together by one advance of the playback controller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnimationStep<'a> {
    pub members: Vec<StepMember<'a>>,
}

impl<'a> AnimationStep<'a> {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Leaf descendants of `node` with their accumulated offsets.
fn collect_leaves<'a>(node: &'a AnimationNode, base_ms: i64, out: &mut Vec<StepMember<'a>>) {
    let offset_ms = base_ms + node.timing().offset_ms();
    if node.is_container() {
        for child in node.children() {
            collect_leaves(child, offset_ms, out);
        }
    } else {
        out.push(StepMember { node, offset_ms });
    }
}

/// Flatten a timing subtree into playback steps.
///
/// A sequence yields the steps of each child in order; a parallel node yields one
/// step holding all of its leaf descendants; a leaf yields a step of its own.
pub fn flatten_steps(node: &AnimationNode) -> Vec<AnimationStep<'_>> {
    match node {
        AnimationNode::Sequence(seq) => seq.children.iter().flat_map(flatten_steps).collect(),
        AnimationNode::Parallel(_) => {
            let mut members = Vec::new();
            collect_leaves(node, 0, &mut members);
            vec![AnimationStep { members }]
        },
        _ => vec![AnimationStep {
            members: vec![StepMember {
                node,
                offset_ms: node.timing().offset_ms(),
            }],
        }],
    }
}

fn parse_condition(cond: &XmlNode) -> TimeCondition {
    let tgt_el = cond.child("tgtEl");
    TimeCondition {
        event: cond.attr("evt").map(str::to_string),
        delay: cond.attr("delay").and_then(TimeValue::parse),
        target_shape: tgt_el
            .and_then(|t| t.child("spTgt"))
            .and_then(|sp| sp.attr_u32("spid")),
        time_node: cond.child("tn").and_then(|tn| tn.attr_u32("val")),
        runtime_node: cond
            .child("rtn")
            .and_then(|rtn| rtn.attr("val"))
            .map(str::to_string),
    }
}

fn parse_conditions(list: Option<&XmlNode>) -> Vec<TimeCondition> {
    list.map(|lst| lst.children_named("cond").into_iter().map(parse_condition).collect())
        .unwrap_or_default()
}

fn parse_common_timing(c_tn: &XmlNode) -> CommonTiming {
    let start_conditions = parse_conditions(c_tn.child("stCondLst"));
    CommonTiming {
        id: c_tn.attr_u32("id").unwrap_or(0),
        preset_id: c_tn.attr_u32("presetID"),
        preset_class: c_tn.attr("presetClass").map(str::to_string),
        preset_subtype: c_tn.attr_u32("presetSubtype"),
        node_type: c_tn.attr("nodeType").map(str::to_string),
        group_id: c_tn.attr_u32("grpId"),
        delay: start_conditions.first().and_then(|c| c.delay),
        start_conditions,
        end_conditions: parse_conditions(c_tn.child("endCondLst")),
        duration: c_tn.attr("dur").and_then(TimeValue::parse),
        fill: c_tn.attr("fill").map(str::to_string),
        repeat_count: c_tn.attr("repeatCount").and_then(TimeValue::parse),
        repeat_duration: c_tn.attr("repeatDur").and_then(TimeValue::parse),
        restart: c_tn.attr("restart").map(str::to_string),
        accel: c_tn
            .attr_i64("accel")
            .map(percent_from_raw)
            .unwrap_or(0.0)
            .clamp(0.0, 100.0),
        decel: c_tn
            .attr_i64("decel")
            .map(percent_from_raw)
            .unwrap_or(0.0)
            .clamp(0.0, 100.0),
        auto_reverse: c_tn.attr_bool("autoRev").unwrap_or(false),
    }
}

fn parse_target(tgt_el: &XmlNode) -> Option<AnimationTarget> {
    if let Some(sp_tgt) = tgt_el.child("spTgt") {
        let text_range = sp_tgt.child("txEl").and_then(|tx| {
            if let Some(rg) = tx.child("pRg") {
                Some(TextRange::Paragraphs {
                    start: rg.attr_u32("st").unwrap_or(0),
                    end: rg.attr_u32("end").unwrap_or(0),
                })
            } else {
                tx.child("charRg").map(|rg| TextRange::Characters {
                    start: rg.attr_u32("st").unwrap_or(0),
                    end: rg.attr_u32("end").unwrap_or(0),
                })
            }
        });
        return Some(AnimationTarget::Shape {
            shape_id: sp_tgt.attr_u32("spid").unwrap_or(0),
            text_range,
            background: sp_tgt.has_child("bg"),
            sub_shape: sp_tgt
                .child("subSp")
                .and_then(|s| s.attr("spid"))
                .map(str::to_string),
        });
    }
    if tgt_el.has_child("sldTgt") {
        return Some(AnimationTarget::Slide);
    }
    if let Some(snd) = tgt_el.child("sndTgt") {
        return Some(AnimationTarget::Sound {
            r_id: snd.attr_or("r:embed", "").to_string(),
            name: snd.attr_or("name", "").to_string(),
        });
    }
    tgt_el.child("inkTgt").map(|ink| AnimationTarget::Ink {
        shape_id: ink.attr_u32("spid").unwrap_or(0),
    })
}

fn parse_behavior(node: &XmlNode) -> Behavior {
    let Some(c_bhvr) = node.child("cBhvr") else {
        return Behavior::default();
    };
    Behavior {
        timing: c_bhvr
            .child("cTn")
            .map(parse_common_timing)
            .unwrap_or_default(),
        target: c_bhvr.child("tgtEl").and_then(parse_target),
        attribute_names: c_bhvr
            .child("attrNameLst")
            .map(|lst| {
                lst.children_named("attrName")
                    .into_iter()
                    .map(|a| a.text().trim().to_string())
                    .collect()
            })
            .unwrap_or_default(),
        additive: c_bhvr.attr("additive").map(str::to_string),
        accumulate: c_bhvr.attr("accumulate").map(str::to_string),
        transform_type: c_bhvr.attr("xfrmType").map(str::to_string),
    }
}

fn parse_value(holder: &XmlNode) -> Option<AnimationValue> {
    let el = holder.children().first()?;
    match el.local_name() {
        "strVal" => Some(AnimationValue::String(el.attr_or("val", "").to_string())),
        "intVal" => el.attr_i64("val").map(AnimationValue::Int),
        "fltVal" => el.attr_f64("val").map(AnimationValue::Float),
        "boolVal" => el.attr_bool("val").map(AnimationValue::Bool),
        "clrVal" => parse_color(el).map(AnimationValue::Color),
        _ => None,
    }
}

fn parse_scale(node: Option<&XmlNode>) -> Option<Scale> {
    let node = node?;
    Some(Scale {
        x: node.attr_i64("x").map(percent_from_raw).unwrap_or(100.0),
        y: node.attr_i64("y").map(percent_from_raw).unwrap_or(100.0),
    })
}

fn parse_media(node: &XmlNode) -> MediaNode {
    let c_media = node.child("cMediaNode");
    MediaNode {
        timing: c_media
            .and_then(|m| m.child("cTn"))
            .map(parse_common_timing)
            .unwrap_or_default(),
        target: c_media
            .and_then(|m| m.child("tgtEl"))
            .and_then(parse_target),
        volume: c_media.and_then(|m| m.attr_u32("vol")),
        mute: c_media.and_then(|m| m.attr_bool("mute")).unwrap_or(false),
        show_when_stopped: c_media
            .and_then(|m| m.attr_bool("showWhenStopped"))
            .unwrap_or(true),
        is_narration: node.attr_bool("isNarration").unwrap_or(false),
        full_screen: node.attr_bool("fullScrn").unwrap_or(false),
    }
}

/// Build one time node; `None` for element kinds that are not time nodes.
fn parse_node(node: &XmlNode, ctx: &mut PartContext<'_>) -> Option<AnimationNode> {
    let built = match node.local_name() {
        "par" => {
            let (timing, children) = parse_container(node, ctx);
            AnimationNode::Parallel(ParallelNode { timing, children })
        },
        "seq" => {
            let (timing, children) = parse_container(node, ctx);
            AnimationNode::Sequence(SequenceNode {
                timing,
                children,
                concurrent: node.attr_bool("concurrent").unwrap_or(false),
                prev_action: node.attr("prevAc").map(str::to_string),
                next_action: node.attr("nextAc").map(str::to_string),
            })
        },
        "set" => AnimationNode::Set(SetNode {
            behavior: parse_behavior(node),
            to: node.child("to").and_then(parse_value),
        }),
        "anim" => AnimationNode::Animate(AnimateNode {
            behavior: parse_behavior(node),
            calc_mode: node.attr("calcmode").map(str::to_string),
            value_type: node.attr("valueType").map(str::to_string),
            from: node.attr("from").map(str::to_string),
            to: node.attr("to").map(str::to_string),
            by: node.attr("by").map(str::to_string),
            values: node
                .child("tavLst")
                .map(|lst| {
                    lst.children_named("tav")
                        .into_iter()
                        .map(|tav| TimeAnimatedValue {
                            time: tav.attr("tm").and_then(TimeValue::parse),
                            formula: tav.attr("fmla").map(str::to_string),
                            value: tav.child("val").and_then(parse_value),
                        })
                        .collect()
                })
                .unwrap_or_default(),
        }),
        "animEffect" => AnimationNode::Effect(EffectNode {
            behavior: parse_behavior(node),
            transition: node.attr("transition").map(str::to_string),
            filter: node.attr("filter").map(str::to_string),
        }),
        "animClr" => {
            let by = node.child("by").and_then(|by| {
                if let Some(rgb) = by.child("rgb") {
                    Some(ColorOffset::Rgb {
                        r: rgb.attr_i32("r").unwrap_or(0),
                        g: rgb.attr_i32("g").unwrap_or(0),
                        b: rgb.attr_i32("b").unwrap_or(0),
                    })
                } else {
                    by.child("hsl").map(|hsl| ColorOffset::Hsl {
                        h: hsl.attr_i64("h").map(angle_to_degrees).unwrap_or(0.0),
                        s: hsl.attr_i32("s").unwrap_or(0),
                        l: hsl.attr_i32("l").unwrap_or(0),
                    })
                }
            });
            AnimationNode::AnimateColor(AnimateColorNode {
                behavior: parse_behavior(node),
                color_space: node.attr("clrSpc").map(str::to_string),
                direction: node.attr("dir").map(str::to_string),
                by,
                from: node.child("from").and_then(parse_color),
                to: node.child("to").and_then(parse_color),
            })
        },
        "animMotion" => AnimationNode::AnimateMotion(AnimateMotionNode {
            behavior: parse_behavior(node),
            path: node.attr("path").map(str::to_string),
            origin: node.attr("origin").map(str::to_string),
            path_edit_mode: node.attr("pathEditMode").map(str::to_string),
            rotation: node.attr_i64("rAng").map(angle_to_degrees),
        }),
        "animRot" => AnimationNode::AnimateRotation(AnimateRotationNode {
            behavior: parse_behavior(node),
            by: node.attr_i64("by").map(angle_to_degrees),
            from: node.attr_i64("from").map(angle_to_degrees),
            to: node.attr_i64("to").map(angle_to_degrees),
        }),
        "animScale" => AnimationNode::AnimateScale(AnimateScaleNode {
            behavior: parse_behavior(node),
            by: parse_scale(node.child("by")),
            from: parse_scale(node.child("from")),
            to: parse_scale(node.child("to")),
            zoom_contents: node.attr_bool("zoomContents").unwrap_or(false),
        }),
        "audio" => AnimationNode::Audio(parse_media(node)),
        "video" => AnimationNode::Video(parse_media(node)),
        _ => {
            warn_unknown_node(node, ctx);
            return None;
        },
    };
    Some(built)
}

/// Timing and children of a `p:par`/`p:seq`.
fn parse_container(
    node: &XmlNode,
    ctx: &mut PartContext<'_>,
) -> (CommonTiming, Vec<AnimationNode>) {
    let Some(c_tn) = node.child("cTn") else {
        return (CommonTiming::default(), Vec::new());
    };
    let children = c_tn
        .child("childTnLst")
        .map(|lst| parse_time_node_list(lst, ctx))
        .unwrap_or_default();
    (parse_common_timing(c_tn), children)
}

/// Build the nodes of a `p:childTnLst`.
fn warn_unknown_node(node: &XmlNode, ctx: &mut PartContext<'_>) {
    ctx.warn(
        IssueCode::UnknownTimingNode,
        format!("unsupported time node {}", node.local_name()),
        Some(node.name()),
    );
}

fn parse_time_node_list(list: &XmlNode, ctx: &mut PartContext<'_>) -> Vec<AnimationNode> {
    if ctx.document_order() {
        return list
            .children()
            .iter()
            .filter_map(|child| parse_node(child, ctx))
            .collect();
    }

    let mut nodes = Vec::new();
    for kind in NODE_KINDS {
        for child in list.children_named(kind) {
            nodes.extend(parse_node(child, ctx));
        }
    }
    for child in list.children() {
        if !NODE_KINDS.contains(&child.local_name()) {
            warn_unknown_node(child, ctx);
        }
    }
    nodes
}

fn parse_build_list(bld_lst: &XmlNode) -> Vec<AnimationBuild> {
    bld_lst
        .children()
        .iter()
        .filter_map(|entry| {
            let kind = match entry.local_name() {
                "bldP" => BuildKind::Paragraph,
                "bldDgm" => BuildKind::Diagram,
                "bldGraphic" => BuildKind::Graphic,
                "bldOleChart" => BuildKind::OleChart,
                _ => return None,
            };
            let build = match kind {
                BuildKind::Graphic => entry
                    .child("bldSub")
                    .and_then(|sub| sub.children().first())
                    .and_then(|b| b.attr("bld"))
                    .or_else(|| entry.child("bldAsOne").map(|_| "whole")),
                _ => entry.attr("bld").or_else(|| entry.attr("build")),
            };
            Some(AnimationBuild {
                kind,
                shape_id: entry.attr_u32("spid").unwrap_or(0),
                group_id: entry.attr_u32("grpId").unwrap_or(0),
                build: build.map(str::to_string),
                ui_expand: entry.attr_bool("uiExpand").unwrap_or(false),
                animate_background: entry.attr_bool("animBg").unwrap_or(false),
                reverse: entry.attr_bool("rev").unwrap_or(false),
                advance_auto: entry.attr("advAuto").and_then(TimeValue::parse),
            })
        })
        .collect()
}

/// Parse a `p:timing` element.
pub fn parse_timing(timing: &XmlNode, ctx: &mut PartContext<'_>) -> SlideTiming {
    let sequences: Vec<AnimationNode> = timing
        .child("tnLst")
        .map(|lst| {
            lst.children_named("par")
                .into_iter()
                .filter_map(|par| parse_node(par, ctx))
                .collect()
        })
        .unwrap_or_default();

    SlideTiming {
        build_list: timing
            .child("bldLst")
            .map(parse_build_list)
            .unwrap_or_default(),
        sequences,
    }
}
