//! Graphic frames (`p:graphicFrame`): tables, charts, diagrams and OLE objects.
//!
//! The payload is selected by `a:graphic/a:graphicData/@uri`. Chart and diagram
//! parts were loaded by the assembler before the slide is built; the frame only
//! looks them up by resolved path.

use crate::ooxml::drawings::fill::{PictureFill, parse_picture_fill};
use crate::ooxml::drawings::xfrm::{Transform, parse_transform};
use crate::ooxml::opc::constants::graphic_data_uri;
use crate::ooxml::pptx::charts::ChartData;
use crate::ooxml::pptx::diagnostics::IssueCode;
use crate::ooxml::pptx::session::PartContext;
use crate::ooxml::pptx::shapes::SlideElement;
use crate::ooxml::pptx::shapes::base::{ElementInfo, parse_element_info};
use crate::ooxml::pptx::shapes::table::parse_table;
use crate::ooxml::pptx::smartart::Diagram;
use crate::ooxml::xml::XmlNode;
use serde::Serialize;

/// A chart frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Chart {
    pub info: ElementInfo,
    pub transform: Transform,
    pub r_id: String,
    /// Chart part path; empty when the relationship is missing
    pub path: String,
    pub data: Option<ChartData>,
}

/// A SmartArt frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagramElement {
    pub info: ElementInfo,
    pub transform: Transform,
    /// Relationship id of the data model part (`dgm:relIds/@r:dm`)
    pub r_id: String,
    pub path: String,
    pub diagram: Option<Diagram>,
}

/// An embedded or linked OLE object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OleObject {
    pub info: ElementInfo,
    pub transform: Transform,
    pub prog_id: Option<String>,
    pub r_id: String,
    pub path: String,
    /// Preview image shown in place of the object
    pub preview: Option<PictureFill>,
}

fn parse_chart_frame(
    info: ElementInfo,
    transform: Transform,
    data: &XmlNode,
    ctx: &mut PartContext<'_>,
) -> SlideElement {
    let r_id = data
        .child("chart")
        .and_then(|c| c.attr("r:id"))
        .unwrap_or_default()
        .to_string();
    let path = ctx
        .resolve(&r_id, IssueCode::UnresolvedChart)
        .unwrap_or_default();
    let chart = ctx.linked.charts.get(&path).cloned();
    if chart.is_none() && !path.is_empty() {
        ctx.warn(
            IssueCode::UnresolvedChart,
            format!("chart part {} is missing", path),
            Some(&info.name),
        );
    }

    SlideElement::Chart(Chart {
        info,
        transform,
        r_id,
        path,
        data: chart,
    })
}

fn parse_diagram_frame(
    info: ElementInfo,
    transform: Transform,
    data: &XmlNode,
    ctx: &mut PartContext<'_>,
) -> SlideElement {
    let r_id = data
        .child("relIds")
        .and_then(|ids| ids.attr("r:dm"))
        .unwrap_or_default()
        .to_string();
    let path = ctx
        .resolve(&r_id, IssueCode::MissingRelationship)
        .unwrap_or_default();
    let diagram = ctx.linked.diagrams.get(&path).cloned();
    if diagram.is_none() && !path.is_empty() {
        ctx.warn(
            IssueCode::MissingPart,
            format!("diagram data part {} is missing", path),
            Some(&info.name),
        );
    }

    SlideElement::Diagram(DiagramElement {
        info,
        transform,
        r_id,
        path,
        diagram,
    })
}

fn parse_ole_frame(
    info: ElementInfo,
    transform: Transform,
    data: &XmlNode,
    ctx: &mut PartContext<'_>,
) -> SlideElement {
    // oleObj may sit inside mc:AlternateContent
    let ole = data.find("oleObj");
    let r_id = ole
        .and_then(|o| o.attr("r:id"))
        .unwrap_or_default()
        .to_string();
    let path = ctx
        .resolve(&r_id, IssueCode::MissingRelationship)
        .unwrap_or_default();
    let preview = ole
        .and_then(|o| o.find("blipFill"))
        .map(|b| parse_picture_fill(b, ctx.rels));

    SlideElement::OleObject(OleObject {
        info,
        transform,
        prog_id: ole.and_then(|o| o.attr("progId")).map(str::to_string),
        r_id,
        path,
        preview,
    })
}

/// Build the element held by a graphic frame; `None` for unsupported payloads.
pub(crate) fn parse_graphic_frame(
    node: &XmlNode,
    ctx: &mut PartContext<'_>,
) -> Option<SlideElement> {
    let info = parse_element_info(node, ctx);
    let transform = parse_transform(node.child("xfrm"));
    let Some(data) = node.descend(&["graphic", "graphicData"]) else {
        log::debug!("graphic frame {} has no graphic data", info.id);
        return None;
    };

    let element = match data.attr_or("uri", "") {
        graphic_data_uri::TABLE => {
            let tbl = data.child("tbl")?;
            SlideElement::Table(parse_table(info, transform, tbl, ctx))
        },
        graphic_data_uri::CHART => parse_chart_frame(info, transform, data, ctx),
        graphic_data_uri::DIAGRAM => parse_diagram_frame(info, transform, data, ctx),
        graphic_data_uri::OLE => parse_ole_frame(info, transform, data, ctx),
        other => {
            log::debug!("graphic frame {} with unsupported payload {}", info.id, other);
            return None;
        },
    };
    Some(element)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::opc::Relationships;
    use crate::ooxml::pptx::charts::ChartType;
    use crate::ooxml::pptx::session::{LinkedParts, ParseOptions};
    use crate::ooxml::pptx::smartart::DiagramType;
    use crate::ooxml::xml::MarkupParser;

    const RELS: &str = r#"<Relationships>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/chart" Target="../charts/chart1.xml"/>
  <Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/diagramData" Target="../diagrams/data1.xml"/>
  <Relationship Id="rId4" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/oleObject" Target="../embeddings/oleObject1.bin"/>
  <Relationship Id="rId5" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="../media/image1.emf"/>
  <Relationship Id="rId6" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/chart" Target="../charts/chart2.xml"/>
</Relationships>"#;

    fn linked() -> LinkedParts {
        let parser = MarkupParser::new();
        let mut linked = LinkedParts::default();
        let chart = parser
            .parse(b"<c:chartSpace><c:chart><c:plotArea><c:lineChart/></c:plotArea></c:chart></c:chartSpace>")
            .unwrap();
        linked.charts.insert(
            "ppt/charts/chart1.xml".to_string(),
            crate::ooxml::pptx::charts::chart_from_tree(&chart),
        );
        let data = parser
            .parse(br#"<dgm:dataModel><dgm:ptLst><dgm:pt modelId="0" type="doc"><dgm:prSet loTypeId="urn:x/layout/process1"/></dgm:pt></dgm:ptLst></dgm:dataModel>"#)
            .unwrap();
        linked.diagrams.insert(
            "ppt/diagrams/data1.xml".to_string(),
            crate::ooxml::pptx::smartart::diagram_from_tree(&data),
        );
        linked
    }

    fn frame(uri: &str, payload: &str) -> String {
        format!(
            r#"<p:graphicFrame><p:nvGraphicFramePr><p:cNvPr id="9" name="Frame"/><p:cNvGraphicFramePr/><p:nvPr/></p:nvGraphicFramePr>
<p:xfrm><a:off x="100" y="200"/><a:ext cx="3000" cy="4000"/></p:xfrm>
<a:graphic><a:graphicData uri="{}">{}</a:graphicData></a:graphic></p:graphicFrame>"#,
            uri, payload
        )
    }

    fn build(xml: &str) -> (Option<SlideElement>, Vec<IssueCode>) {
        let node = MarkupParser::new().parse(xml.as_bytes()).unwrap();
        let rels = Relationships::from_xml(RELS.as_bytes(), "ppt/slides/slide1.xml").unwrap();
        let options = ParseOptions::default();
        let linked = linked();
        let mut ctx = PartContext::new("ppt/slides/slide1.xml", &rels, &options, &linked);
        let element = parse_graphic_frame(&node, &mut ctx);
        let codes = ctx.diagnostics.warnings.iter().map(|w| w.code).collect();
        (element, codes)
    }

    #[test]
    fn test_chart_frame() {
        let (element, codes) = build(&frame(
            graphic_data_uri::CHART,
            r#"<c:chart r:id="rId2"/>"#,
        ));
        let Some(SlideElement::Chart(chart)) = element else {
            panic!("expected a chart");
        };
        assert!(codes.is_empty());
        assert_eq!(chart.path, "ppt/charts/chart1.xml");
        assert_eq!(chart.transform.offset.y, 200);
        assert_eq!(chart.data.map(|d| d.chart_type), Some(ChartType::Line));
    }

    #[test]
    fn test_unresolved_charts_warn() {
        let (element, codes) = build(&frame(graphic_data_uri::CHART, r#"<c:chart r:id="rId6"/>"#));
        assert!(matches!(element, Some(SlideElement::Chart(ref c)) if c.data.is_none()));
        assert_eq!(codes, vec![IssueCode::UnresolvedChart]);

        let (element, codes) = build(&frame(graphic_data_uri::CHART, r#"<c:chart r:id="rId77"/>"#));
        assert!(matches!(element, Some(SlideElement::Chart(ref c)) if c.path.is_empty()));
        assert_eq!(codes, vec![IssueCode::UnresolvedChart]);
    }

    #[test]
    fn test_diagram_frame() {
        let (element, _) = build(&frame(
            graphic_data_uri::DIAGRAM,
            r#"<dgm:relIds r:dm="rId3" r:lo="rId10" r:qs="rId11" r:cs="rId12"/>"#,
        ));
        let Some(SlideElement::Diagram(diagram)) = element else {
            panic!("expected a diagram");
        };
        assert_eq!(diagram.path, "ppt/diagrams/data1.xml");
        assert_eq!(
            diagram.diagram.map(|d| d.diagram_type),
            Some(DiagramType::Process)
        );
    }

    #[test]
    fn test_ole_frame_in_alternate_content() {
        let (element, _) = build(&frame(
            graphic_data_uri::OLE,
            r#"<mc:AlternateContent><mc:Choice Requires="v"><p:oleObj spid="_x0000_s1026" name="Worksheet" r:id="rId4" imgW="1" imgH="1" progId="Excel.Sheet.12"><p:embed/></p:oleObj></mc:Choice>
               <mc:Fallback><p:oleObj name="Worksheet" r:id="rId4" progId="Excel.Sheet.12"><p:embed/><p:pic><p:nvPicPr><p:cNvPr id="0" name=""/><p:cNvPicPr/><p:nvPr/></p:nvPicPr><p:blipFill><a:blip r:embed="rId5"/></p:blipFill><p:spPr/></p:pic></p:oleObj></mc:Fallback></mc:AlternateContent>"#,
        ));
        let Some(SlideElement::OleObject(ole)) = element else {
            panic!("expected an OLE object");
        };
        assert_eq!(ole.prog_id.as_deref(), Some("Excel.Sheet.12"));
        assert_eq!(ole.path, "ppt/embeddings/oleObject1.bin");
        assert!(ole.preview.is_none());
    }

    #[test]
    fn test_unknown_payload_is_skipped() {
        let (element, codes) = build(&frame("urn:example:ink", "<x/>"));
        assert!(element.is_none());
        assert!(codes.is_empty());
    }
}
