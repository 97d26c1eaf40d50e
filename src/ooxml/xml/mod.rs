//! Generic attributed XML tree used by every presentation part builder.
//!
//! Parts are parsed once into [`XmlNode`] trees by [`MarkupParser`]. Element names
//! are split at parse time into a known-prefix rank and a local name, so child
//! lookups compare local names only and never scan a prefix list per call.
//!
//! Known prefixes are `a`, `p`, `r`, `c`, `dgm`, `mc`, `w`, `wp` plus the unprefixed
//! form. An element with any other prefix (`p14:media`, `a14:imgProps`) keeps its
//! qualified name as its lookup name, so it is found by asking for `"p14:media"`.

mod parser;

pub use parser::MarkupParser;

use phf::{phf_map, phf_set};
use smallvec::SmallVec;

/// Lookup priority of each recognized namespace prefix, lowest first.
///
/// When siblings with the same local name exist under several prefixes, the
/// lookup returns the matches of the highest-priority prefix only.
pub(crate) static PREFIX_RANK: phf::Map<&'static str, u8> = phf_map! {
    "a" => 0,
    "p" => 1,
    "r" => 2,
    "c" => 3,
    "dgm" => 4,
    "mc" => 5,
    "w" => 6,
    "wp" => 7,
};

/// Rank of an unprefixed element.
pub(crate) const NO_PREFIX_RANK: u8 = 8;

/// Element names that are always reported as a sequence by [`XmlNode::get_child`],
/// even when a single occurrence is present.
pub static ALWAYS_SEQUENCE: phf::Set<&'static str> = phf_set! {
    "sp", "pic", "graphicFrame", "grpSp", "cxnSp", "contentPart",
    "p", "r", "br", "fld",
    "tr", "tc", "gridCol",
    "gs", "gd", "path", "moveTo", "lnTo", "cubicBezTo", "quadBezTo", "arcTo", "close", "pt",
    "sldId", "sldMasterId", "sldLayoutId", "notesMasterId",
    "Relationship", "Override", "Default",
    "par", "seq", "set", "anim", "animEffect", "animClr", "animMotion", "animRot", "animScale",
    "audio", "video", "cond", "tav", "attrName", "bldP", "bldDgm", "bldGraphic", "bldOleChart",
    "ser", "cxn",
};

/// An element that occurs once or several times under the same parent.
///
/// Returned at the tree boundary only; callers collapse it with
/// [`OneOrMany::into_vec`] or [`ensure_sequence`] right away.
#[derive(Debug, Clone, PartialEq)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    /// Collapse into a normalized sequence.
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(v) => vec![v],
            OneOrMany::Many(v) => v,
        }
    }

    /// Scalar view: the single value, or the first of several.
    pub fn first(&self) -> Option<&T> {
        match self {
            OneOrMany::One(v) => Some(v),
            OneOrMany::Many(v) => v.first(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            OneOrMany::One(_) => 1,
            OneOrMany::Many(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Wrap a possibly-absent value into a sequence: absence is empty, a scalar becomes
/// a one-element sequence, a sequence passes through.
pub fn ensure_sequence<T>(value: Option<OneOrMany<T>>) -> Vec<T> {
    value.map(OneOrMany::into_vec).unwrap_or_default()
}

/// A single attribute with its qualified name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlAttr {
    pub name: String,
    pub value: String,
}

impl XmlAttr {
    /// Name without its namespace prefix.
    #[inline]
    pub fn local_name(&self) -> &str {
        strip_prefix(&self.name)
    }
}

/// One element of a parsed part.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct XmlNode {
    /// Qualified name as written in the source (`p:sp`)
    pub(crate) name: String,
    /// Lookup name: the local part for known prefixes, the full name otherwise
    pub(crate) key: String,
    /// Prefix rank, `None` for unknown prefixes
    pub(crate) rank: Option<u8>,
    pub(crate) attributes: SmallVec<[XmlAttr; 4]>,
    pub(crate) children: Vec<XmlNode>,
    pub(crate) text: String,
}

#[inline]
fn strip_prefix(name: &str) -> &str {
    match name.find(':') {
        Some(pos) => &name[pos + 1..],
        None => name,
    }
}

/// Split a qualified element name into its lookup key and prefix rank.
pub(crate) fn classify_name(name: &str) -> (String, Option<u8>) {
    match name.find(':') {
        Some(pos) => match PREFIX_RANK.get(&name[..pos]) {
            Some(rank) => (name[pos + 1..].to_string(), Some(*rank)),
            None => (name.to_string(), None),
        },
        None => (name.to_string(), Some(NO_PREFIX_RANK)),
    }
}

impl XmlNode {
    /// Build a detached element, mainly for tests and synthesized defaults.
    pub fn new(name: &str) -> Self {
        let (key, rank) = classify_name(name);
        Self {
            name: name.to_string(),
            key,
            rank,
            ..Default::default()
        }
    }

    /// Qualified name as written in the source.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Lookup name: `sp` for `p:sp`, `p14:media` for `p14:media`.
    #[inline]
    pub fn local_name(&self) -> &str {
        &self.key
    }

    /// Check the lookup name.
    #[inline]
    pub fn is(&self, local_name: &str) -> bool {
        self.key == local_name
    }

    /// Concatenated direct text content.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// All child elements in document order.
    #[inline]
    pub fn children(&self) -> &[XmlNode] {
        &self.children
    }

    #[inline]
    pub fn attributes(&self) -> &[XmlAttr] {
        &self.attributes
    }

    /// Attribute value by name.
    ///
    /// The exact name is tried first, then the name without any prefix is compared
    /// with each attribute's local name. So `attr("embed")` finds `r:embed` and
    /// `attr("r:id")` finds `id` written without a prefix.
    pub fn attr(&self, name: &str) -> Option<&str> {
        if let Some(a) = self.attributes.iter().find(|a| a.name == name) {
            return Some(&a.value);
        }
        let local = strip_prefix(name);
        self.attributes
            .iter()
            .find(|a| a.local_name() == local)
            .map(|a| a.value.as_str())
    }

    /// Attribute value or a default.
    pub fn attr_or<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.attr(name).unwrap_or(default)
    }

    pub fn attr_i64(&self, name: &str) -> Option<i64> {
        self.attr(name).and_then(parse_i64)
    }

    pub fn attr_i32(&self, name: &str) -> Option<i32> {
        self.attr_i64(name)
            .map(|v| v.clamp(i32::MIN as i64, i32::MAX as i64) as i32)
    }

    pub fn attr_u32(&self, name: &str) -> Option<u32> {
        self.attr_i64(name)
            .and_then(|v| u32::try_from(v).ok())
    }

    pub fn attr_f64(&self, name: &str) -> Option<f64> {
        self.attr(name)
            .and_then(|v| fast_float2::parse::<f64, _>(v.trim()).ok())
    }

    /// Boolean attribute; accepts `1`/`true`/`on` and `0`/`false`/`off`.
    pub fn attr_bool(&self, name: &str) -> Option<bool> {
        self.attr(name).and_then(parse_bool)
    }

    /// Every child whose lookup name matches, restricted to the highest-priority
    /// prefix present. Unknown-prefix children only match their qualified name.
    fn matching_children(&self, local_name: &str) -> Vec<&XmlNode> {
        let best = self
            .children
            .iter()
            .filter(|c| c.key == local_name)
            .map(|c| c.rank)
            .min_by_key(|rank| rank.unwrap_or(u8::MAX));

        match best {
            Some(rank) => self
                .children
                .iter()
                .filter(|c| c.key == local_name && c.rank == rank)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Child lookup with sequence normalization.
    ///
    /// Returns `None` when absent. A single match is returned as [`OneOrMany::One`]
    /// unless the name is in [`ALWAYS_SEQUENCE`].
    pub fn get_child(&self, local_name: &str) -> Option<OneOrMany<&XmlNode>> {
        let mut matches = self.matching_children(local_name);
        match matches.len() {
            0 => None,
            1 if !ALWAYS_SEQUENCE.contains(local_name) => matches.pop().map(OneOrMany::One),
            _ => Some(OneOrMany::Many(matches)),
        }
    }

    /// First child with this lookup name.
    pub fn child(&self, local_name: &str) -> Option<&XmlNode> {
        self.matching_children(local_name).into_iter().next()
    }

    /// All children with this lookup name, in document order.
    pub fn children_named(&self, local_name: &str) -> Vec<&XmlNode> {
        ensure_sequence(self.get_child(local_name))
    }

    /// Check for a child with this lookup name.
    pub fn has_child(&self, local_name: &str) -> bool {
        self.child(local_name).is_some()
    }

    /// Walk a chain of child names, taking the first match at each step.
    pub fn descend(&self, path: &[&str]) -> Option<&XmlNode> {
        path.iter().try_fold(self, |node, name| node.child(name))
    }

    /// Text of all descendants in document order.
    pub fn deep_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        out.push_str(&self.text);
        for child in &self.children {
            child.collect_text(out);
        }
    }

    /// Depth-first search for the first descendant with this lookup name.
    pub fn find(&self, local_name: &str) -> Option<&XmlNode> {
        for child in &self.children {
            if child.key == local_name {
                return Some(child);
            }
            if let Some(found) = child.find(local_name) {
                return Some(found);
            }
        }
        None
    }

    pub(crate) fn push_attr(&mut self, name: String, value: String) {
        self.attributes.push(XmlAttr { name, value });
    }

    pub(crate) fn push_child(&mut self, child: XmlNode) {
        self.children.push(child);
    }

    /// Builder used by tests to assemble small trees.
    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.push_attr(name.to_string(), value.to_string());
        self
    }

    pub fn with_child(mut self, child: XmlNode) -> Self {
        self.push_child(child);
        self
    }
}

/// Parse a decimal integer attribute.
pub(crate) fn parse_i64(value: &str) -> Option<i64> {
    let trimmed = value.trim();
    let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let integral: Option<i64> = atoi_simd::parse::<_, false, false>(digits.as_bytes()).ok();
    integral.or_else(|| {
        // Some producers write integral attributes as decimals ("12700.0")
        fast_float2::parse::<f64, _>(digits)
            .ok()
            .filter(|v| v.is_finite())
            .map(|v| v.round() as i64)
    })
}

pub(crate) fn parse_bool(value: &str) -> Option<bool> {
    match value.trim() {
        "1" | "true" | "on" | "t" => Some(true),
        "0" | "false" | "off" | "f" => Some(false),
        _ => None,
    }
}
