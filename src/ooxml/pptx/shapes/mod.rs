/// Shape tree elements of slides, layouts and masters.
///
/// A `p:spTree` (or `p:grpSp`) holds five element kinds: `sp`, `pic`,
/// `graphicFrame`, `grpSp` and `cxnSp`. By default they are collected kind by
/// kind, each kind in source order, so the returned list is not the paint order
/// when kinds interleave. [`ParseOptions::preserve_document_order`] switches to a
/// single ordered pass.
///
/// [`ParseOptions::preserve_document_order`]: crate::ooxml::pptx::session::ParseOptions
pub mod base;
pub mod graphic_frame;
pub mod picture;
pub mod table;

pub use base::{
    ConnectionRef, Connector, ElementInfo, FontRef, Placeholder, Shape, ShapeStyle, StyleRef,
};
pub use graphic_frame::{Chart, DiagramElement, OleObject};
pub use picture::{Media, Picture};
pub use table::{CellBorders, Table, TableCell, TableRow};

use crate::ooxml::drawings::effects::{Effects, parse_effects};
use crate::ooxml::drawings::fill::{Fill, parse_fill};
use crate::ooxml::drawings::xfrm::{
    ChildTransform, Transform, parse_child_transform, parse_transform,
};
use crate::ooxml::pptx::session::PartContext;
use crate::ooxml::xml::XmlNode;
use serde::Serialize;

/// Shape tree child kinds in collection order.
const ELEMENT_KINDS: &[&str] = &["sp", "pic", "graphicFrame", "grpSp", "cxnSp"];

/// A group shape (`p:grpSp`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub info: ElementInfo,
    /// Placement of the group on its parent
    pub transform: Transform,
    /// Coordinate space the children's transforms are expressed in
    pub child_transform: ChildTransform,
    pub fill: Option<Fill>,
    pub effects: Option<Effects>,
    pub children: Vec<SlideElement>,
}

/// An element of a shape tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SlideElement {
    Shape(Shape),
    Picture(Picture),
    Table(Table),
    Chart(Chart),
    Group(Group),
    Connector(Connector),
    Diagram(DiagramElement),
    Media(Media),
    OleObject(OleObject),
}

impl SlideElement {
    pub fn info(&self) -> &ElementInfo {
        match self {
            SlideElement::Shape(s) => &s.info,
            SlideElement::Picture(p) => &p.info,
            SlideElement::Table(t) => &t.info,
            SlideElement::Chart(c) => &c.info,
            SlideElement::Group(g) => &g.info,
            SlideElement::Connector(c) => &c.info,
            SlideElement::Diagram(d) => &d.info,
            SlideElement::Media(m) => &m.info,
            SlideElement::OleObject(o) => &o.info,
        }
    }

    pub fn transform(&self) -> &Transform {
        match self {
            SlideElement::Shape(s) => &s.transform,
            SlideElement::Picture(p) => &p.transform,
            SlideElement::Table(t) => &t.transform,
            SlideElement::Chart(c) => &c.transform,
            SlideElement::Group(g) => &g.transform,
            SlideElement::Connector(c) => &c.transform,
            SlideElement::Diagram(d) => &d.transform,
            SlideElement::Media(m) => &m.transform,
            SlideElement::OleObject(o) => &o.transform,
        }
    }

    #[inline]
    pub fn id(&self) -> u32 {
        self.info().id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.info().name
    }

    #[inline]
    pub fn placeholder(&self) -> Option<&Placeholder> {
        self.info().placeholder.as_ref()
    }

    /// Element kind as serialized in the `type` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            SlideElement::Shape(_) => "shape",
            SlideElement::Picture(_) => "picture",
            SlideElement::Table(_) => "table",
            SlideElement::Chart(_) => "chart",
            SlideElement::Group(_) => "group",
            SlideElement::Connector(_) => "connector",
            SlideElement::Diagram(_) => "diagram",
            SlideElement::Media(_) => "media",
            SlideElement::OleObject(_) => "oleObject",
        }
    }

    /// Plain text carried by the element.
    ///
    /// Table cells are separated by tabs and rows by newlines; group children
    /// with text are joined by newlines.
    pub fn text(&self) -> String {
        match self {
            SlideElement::Shape(s) => s.text.as_ref().map(|t| t.text()).unwrap_or_default(),
            SlideElement::Table(t) => t
                .rows
                .iter()
                .map(|row| {
                    row.cells
                        .iter()
                        .map(TableCell::text)
                        .collect::<Vec<_>>()
                        .join("\t")
                })
                .collect::<Vec<_>>()
                .join("\n"),
            SlideElement::Group(g) => g
                .children
                .iter()
                .map(SlideElement::text)
                .filter(|t| !t.is_empty())
                .collect::<Vec<_>>()
                .join("\n"),
            SlideElement::Diagram(d) => d.diagram.as_ref().map(|d| d.text()).unwrap_or_default(),
            _ => String::new(),
        }
    }

    /// This element followed by every element nested in groups, depth first.
    pub fn descendants(&self) -> Vec<&SlideElement> {
        let mut out = vec![self];
        if let SlideElement::Group(g) = self {
            for child in &g.children {
                out.extend(child.descendants());
            }
        }
        out
    }
}

fn parse_group(node: &XmlNode, ctx: &mut PartContext<'_>) -> Group {
    let grp_sp_pr = node.child("grpSpPr");
    let xfrm = grp_sp_pr.and_then(|pr| pr.child("xfrm"));

    Group {
        info: base::parse_element_info(node, ctx),
        transform: parse_transform(xfrm),
        child_transform: parse_child_transform(xfrm),
        fill: grp_sp_pr.and_then(|pr| parse_fill(pr, ctx.rels)),
        effects: parse_effects(grp_sp_pr),
        children: parse_shape_tree(node, ctx),
    }
}

/// Build one shape tree child into `out`; unknown kinds are ignored.
fn parse_element(node: &XmlNode, ctx: &mut PartContext<'_>, out: &mut Vec<SlideElement>) {
    match node.local_name() {
        "sp" => out.push(SlideElement::Shape(base::parse_shape(node, ctx))),
        "pic" => out.push(picture::parse_picture(node, ctx)),
        "graphicFrame" => {
            if let Some(element) = graphic_frame::parse_graphic_frame(node, ctx) {
                out.push(element);
            }
        },
        "grpSp" => out.push(SlideElement::Group(parse_group(node, ctx))),
        "cxnSp" => out.push(SlideElement::Connector(base::parse_connector(node, ctx))),
        "AlternateContent" => out.extend(parse_alternate_content(node, ctx)),
        _ => {},
    }
}

/// `mc:AlternateContent`: the first `Choice` that yields elements, else `Fallback`.
fn parse_alternate_content(node: &XmlNode, ctx: &mut PartContext<'_>) -> Vec<SlideElement> {
    for choice in node.children_named("Choice") {
        let elements = parse_shape_tree(choice, ctx);
        if !elements.is_empty() {
            return elements;
        }
    }
    node.child("Fallback")
        .map(|fallback| parse_shape_tree(fallback, ctx))
        .unwrap_or_default()
}

/// Build the elements of a shape tree (`p:spTree`, `p:grpSp` or an
/// alternate-content branch).
pub fn parse_shape_tree(tree: &XmlNode, ctx: &mut PartContext<'_>) -> Vec<SlideElement> {
    let mut elements = Vec::new();

    if ctx.document_order() {
        for child in tree.children() {
            parse_element(child, ctx, &mut elements);
        }
        return elements;
    }

    for kind in ELEMENT_KINDS {
        for child in tree.children_named(kind) {
            parse_element(child, ctx, &mut elements);
        }
    }
    for alternate in tree.children_named("AlternateContent") {
        parse_element(alternate, ctx, &mut elements);
    }
    elements
}
