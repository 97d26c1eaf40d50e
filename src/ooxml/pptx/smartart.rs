//! SmartArt/Diagram support for PowerPoint presentations.
//!
//! SmartArt graphics are represented as diagrams in OOXML. Only the data model part
//! is read: its points become an opaque node tree linked by `parOf` connections.
//! Layout algorithms are not evaluated.

use crate::ooxml::error::Result;
use crate::ooxml::xml::{MarkupParser, XmlNode};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// SmartArt diagram type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DiagramType {
    /// List diagram
    List,
    /// Process diagram
    Process,
    /// Cycle diagram
    Cycle,
    /// Hierarchy diagram
    Hierarchy,
    /// Relationship diagram
    Relationship,
    /// Matrix diagram
    Matrix,
    /// Pyramid diagram
    Pyramid,
    /// Picture diagram
    Picture,
    /// Unknown diagram type
    Unknown,
}

impl DiagramType {
    /// Parse diagram type from layout type URI.
    pub fn from_layout_uri(uri: &str) -> Self {
        let uri_lower = uri.to_lowercase();
        if uri_lower.contains("list") {
            DiagramType::List
        } else if uri_lower.contains("process") {
            DiagramType::Process
        } else if uri_lower.contains("cycle") {
            DiagramType::Cycle
        } else if uri_lower.contains("hierarchy") || uri_lower.contains("orgchart") {
            DiagramType::Hierarchy
        } else if uri_lower.contains("relationship") || uri_lower.contains("venn") {
            DiagramType::Relationship
        } else if uri_lower.contains("matrix") {
            DiagramType::Matrix
        } else if uri_lower.contains("pyramid") {
            DiagramType::Pyramid
        } else if uri_lower.contains("picture") {
            DiagramType::Picture
        } else {
            DiagramType::Unknown
        }
    }
}

/// A SmartArt diagram node/item.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagramNode {
    /// Point model id (`dgm:pt/@modelId`)
    pub model_id: String,
    /// Point type: `doc`, `node`, `asst`...
    pub node_type: String,
    /// Node text content
    pub text: String,
    /// Node depth level (0 = root)
    pub depth: u32,
    /// Child nodes
    pub children: Vec<DiagramNode>,
}

impl DiagramNode {
    /// Get all text from this node and its children.
    pub fn all_text(&self) -> String {
        let mut result = self.text.clone();
        for child in &self.children {
            let text = child.all_text();
            if !result.is_empty() && !text.is_empty() {
                result.push('\n');
            }
            result.push_str(&text);
        }
        result
    }

    /// Number of nodes in this subtree.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(DiagramNode::node_count).sum::<usize>()
    }
}

/// SmartArt diagram information.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagram {
    /// Diagram type guessed from the layout id
    pub diagram_type: DiagramType,
    /// Layout type id (`prSet/@loTypeId` of the document point)
    pub layout_id: Option<String>,
    /// Root nodes of the diagram
    pub nodes: Vec<DiagramNode>,
}

impl Diagram {
    /// Get all text content from the diagram.
    pub fn text(&self) -> String {
        self.nodes
            .iter()
            .map(|n| n.all_text())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

struct Point<'a> {
    node_type: &'a str,
    text: String,
}

/// Point types that are not semantic content.
const STRUCTURAL_POINTS: &[&str] = &["parTrans", "sibTrans", "pres"];

/// Build the diagram tree from a parsed `dgm:dataModel` root.
pub fn diagram_from_tree(root: &XmlNode) -> Diagram {
    let pts = root
        .child("ptLst")
        .map(|lst| lst.children_named("pt"))
        .unwrap_or_default();

    let mut order: Vec<&str> = Vec::new();
    let mut points: HashMap<&str, Point<'_>> = HashMap::new();
    let mut layout_id = None;
    for pt in pts {
        let Some(id) = pt.attr("modelId") else {
            continue;
        };
        let node_type = pt.attr_or("type", "node");
        if node_type == "doc" && layout_id.is_none() {
            layout_id = pt
                .child("prSet")
                .and_then(|p| p.attr("loTypeId"))
                .map(str::to_string);
        }
        let text = pt
            .child("t")
            .map(|t| {
                t.children_named("p")
                    .iter()
                    .map(|p| p.deep_text())
                    .collect::<Vec<_>>()
                    .join("\n")
            })
            .unwrap_or_default();
        order.push(id);
        points.insert(id, Point { node_type, text });
    }

    // parent id -> [(srcOrd, child id)]
    let mut links: HashMap<&str, Vec<(u32, &str)>> = HashMap::new();
    let mut has_parent: HashSet<&str> = HashSet::new();
    let cxns = root
        .child("cxnLst")
        .map(|lst| lst.children_named("cxn"))
        .unwrap_or_default();
    for cxn in cxns {
        if cxn.attr_or("type", "parOf") != "parOf" {
            continue;
        }
        if let (Some(src), Some(dest)) = (cxn.attr("srcId"), cxn.attr("destId")) {
            links
                .entry(src)
                .or_default()
                .push((cxn.attr_u32("srcOrd").unwrap_or(0), dest));
            has_parent.insert(dest);
        }
    }
    for children in links.values_mut() {
        children.sort_by_key(|(ord, _)| *ord);
    }

    let mut roots: Vec<&str> = order
        .iter()
        .copied()
        .filter(|id| points.get(id).is_some_and(|p| p.node_type == "doc"))
        .collect();
    if roots.is_empty() {
        roots = order
            .iter()
            .copied()
            .filter(|id| !has_parent.contains(id))
            .filter(|id| {
                points
                    .get(id)
                    .is_some_and(|p| !STRUCTURAL_POINTS.contains(&p.node_type))
            })
            .collect();
    }

    let mut visited = HashSet::new();
    let nodes: Vec<DiagramNode> = roots
        .into_iter()
        .filter_map(|id| build_node(id, 0, &points, &links, &mut visited))
        .collect();

    Diagram {
        diagram_type: layout_id
            .as_deref()
            .map(DiagramType::from_layout_uri)
            .unwrap_or(DiagramType::Unknown),
        layout_id,
        nodes,
    }
}

fn build_node<'a>(
    id: &'a str,
    depth: u32,
    points: &HashMap<&'a str, Point<'a>>,
    links: &HashMap<&'a str, Vec<(u32, &'a str)>>,
    visited: &mut HashSet<&'a str>,
) -> Option<DiagramNode> {
    let point = points.get(id)?;
    if !visited.insert(id) {
        return None;
    }
    let children: Vec<DiagramNode> = links
        .get(id)
        .map(|kids| {
            kids.iter()
                .filter_map(|&(_, child)| build_node(child, depth + 1, points, links, visited))
                .collect()
        })
        .unwrap_or_default();

    Some(DiagramNode {
        model_id: id.to_string(),
        node_type: point.node_type.to_string(),
        text: point.text.clone(),
        depth,
        children,
    })
}

/// Parse a diagram data part.
pub fn parse_diagram(parser: &MarkupParser, xml: &[u8]) -> Result<Diagram> {
    Ok(diagram_from_tree(&parser.parse(xml)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATA: &str = r#"<dgm:dataModel xmlns:dgm="http://schemas.openxmlformats.org/drawingml/2006/diagram" xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main">
  <dgm:ptLst>
    <dgm:pt modelId="0" type="doc"><dgm:prSet loTypeId="urn:microsoft.com/office/officeart/2005/8/layout/hierarchy1"/><dgm:t><a:bodyPr/><a:p><a:endParaRPr/></a:p></dgm:t></dgm:pt>
    <dgm:pt modelId="1"><dgm:t><a:p><a:r><a:t>CEO</a:t></a:r></a:p></dgm:t></dgm:pt>
    <dgm:pt modelId="3"><dgm:t><a:p><a:r><a:t>CFO</a:t></a:r></a:p></dgm:t></dgm:pt>
    <dgm:pt modelId="2"><dgm:t><a:p><a:r><a:t>CTO</a:t></a:r></a:p></dgm:t></dgm:pt>
    <dgm:pt modelId="9" type="parTrans"/>
    <dgm:pt modelId="10" type="pres"/>
  </dgm:ptLst>
  <dgm:cxnLst>
    <dgm:cxn modelId="20" srcId="0" destId="1" srcOrd="0" destOrd="0"/>
    <dgm:cxn modelId="21" srcId="1" destId="3" srcOrd="1" destOrd="0"/>
    <dgm:cxn modelId="22" srcId="1" destId="2" srcOrd="0" destOrd="0"/>
    <dgm:cxn modelId="23" type="presOf" srcId="1" destId="10"/>
  </dgm:cxnLst>
</dgm:dataModel>"#;

    #[test]
    fn test_parse_diagram_tree() {
        let diagram = parse_diagram(&MarkupParser::new(), DATA.as_bytes()).unwrap();

        assert_eq!(diagram.diagram_type, DiagramType::Hierarchy);
        assert_eq!(diagram.nodes.len(), 1);

        let doc = &diagram.nodes[0];
        assert_eq!(doc.node_type, "doc");
        assert_eq!(doc.node_count(), 4);

        let ceo = &doc.children[0];
        assert_eq!(ceo.text, "CEO");
        assert_eq!(ceo.depth, 1);
        let names: Vec<&str> = ceo.children.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(names, vec!["CTO", "CFO"]);
        assert_eq!(diagram.text(), "CEO\nCTO\nCFO");
    }

    #[test]
    fn test_cycles_terminate() {
        let xml = r#"<dgm:dataModel><dgm:ptLst><dgm:pt modelId="a"/><dgm:pt modelId="b"/></dgm:ptLst>
            <dgm:cxnLst><dgm:cxn srcId="a" destId="b"/><dgm:cxn srcId="b" destId="a"/></dgm:cxnLst></dgm:dataModel>"#;
        let diagram = parse_diagram(&MarkupParser::new(), xml.as_bytes()).unwrap();
        assert!(diagram.nodes.is_empty());
        assert_eq!(diagram.diagram_type, DiagramType::Unknown);
    }

    #[test]
    fn test_layout_uri() {
        assert_eq!(DiagramType::from_layout_uri("urn:x/layout/cycle2"), DiagramType::Cycle);
        assert_eq!(DiagramType::from_layout_uri("urn:x/layout/basicPyramid1"), DiagramType::Pyramid);
    }
}
