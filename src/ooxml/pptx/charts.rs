/// Chart parts referenced from graphic frames.
///
/// Chart series are modeled as data only: kind, title, and per-series name,
/// categories and values read from the cached values stored in the chart part.
use crate::ooxml::error::Result;
use crate::ooxml::xml::{MarkupParser, XmlNode};
use serde::Serialize;

/// Chart type enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartType {
    /// Bar or column chart
    Bar,
    /// Line chart
    Line,
    /// Pie chart
    Pie,
    /// Area chart
    Area,
    /// Scatter (XY) chart
    Scatter,
    /// Bubble chart
    Bubble,
    /// Doughnut chart
    Doughnut,
    /// Radar chart
    Radar,
    /// Surface chart
    Surface,
    /// Stock chart
    Stock,
    /// Unknown or unsupported chart type
    Unknown,
}

impl ChartType {
    fn from_plot_element(name: &str) -> Option<Self> {
        let kind = match name {
            "barChart" | "bar3DChart" => ChartType::Bar,
            "lineChart" | "line3DChart" => ChartType::Line,
            "pieChart" | "pie3DChart" | "ofPieChart" => ChartType::Pie,
            "areaChart" | "area3DChart" => ChartType::Area,
            "scatterChart" => ChartType::Scatter,
            "bubbleChart" => ChartType::Bubble,
            "doughnutChart" => ChartType::Doughnut,
            "radarChart" => ChartType::Radar,
            "surfaceChart" | "surface3DChart" => ChartType::Surface,
            "stockChart" => ChartType::Stock,
            _ => return None,
        };
        Some(kind)
    }
}

/// One data series.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartSeries {
    pub name: Option<String>,
    pub categories: Vec<String>,
    /// Cached values; points without a cached value are `None`
    pub values: Vec<Option<f64>>,
}

/// Data extracted from a chart part.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub chart_type: ChartType,
    /// Bar direction for bar charts (`bar` or `col`)
    pub bar_direction: Option<String>,
    pub title: Option<String>,
    pub has_legend: bool,
    pub series: Vec<ChartSeries>,
}

/// Cached point values of a `strRef`/`numRef`/literal data source, by point index.
fn cached_points(source: &XmlNode) -> Vec<Option<String>> {
    let cache = source
        .child("strRef")
        .and_then(|r| r.child("strCache"))
        .or_else(|| source.child("numRef").and_then(|r| r.child("numCache")))
        .or_else(|| source.child("strLit"))
        .or_else(|| source.child("numLit"))
        .or_else(|| {
            source
                .child("multiLvlStrRef")
                .and_then(|r| r.child("multiLvlStrCache"))
                .and_then(|c| c.child("lvl"))
        });
    let Some(cache) = cache else {
        return Vec::new();
    };

    let count = cache
        .child("ptCount")
        .and_then(|c| c.attr_u32("val"))
        .unwrap_or(0) as usize;
    let points = cache.children_named("pt");
    let len = points
        .iter()
        .filter_map(|pt| pt.attr_u32("idx"))
        .map(|idx| idx as usize + 1)
        .max()
        .unwrap_or(0)
        .max(count);

    let mut out = vec![None; len];
    for (pos, pt) in points.iter().enumerate() {
        let idx = pt.attr_u32("idx").map(|i| i as usize).unwrap_or(pos);
        if let (Some(slot), Some(v)) = (out.get_mut(idx), pt.child("v")) {
            *slot = Some(v.text().to_string());
        }
    }
    out
}

fn parse_series(ser: &XmlNode) -> ChartSeries {
    let name = ser.child("tx").and_then(|tx| {
        tx.child("v")
            .map(|v| v.text().to_string())
            .or_else(|| cached_points(tx).into_iter().flatten().next())
    });

    let categories: Vec<String> = ser
        .child("cat")
        .or_else(|| ser.child("xVal"))
        .map(|cat| cached_points(cat).into_iter().map(Option::unwrap_or_default).collect())
        .unwrap_or_default();

    let values: Vec<Option<f64>> = ser
        .child("val")
        .or_else(|| ser.child("yVal"))
        .map(|val| {
            cached_points(val)
                .into_iter()
                .map(|v| v.and_then(|s| fast_float2::parse::<f64, _>(s.trim()).ok()))
                .collect()
        })
        .unwrap_or_default();

    ChartSeries {
        name,
        categories,
        values,
    }
}

/// Build chart data from a parsed `c:chartSpace` root.
pub fn chart_from_tree(root: &XmlNode) -> ChartData {
    let chart = root.child("chart");
    let plot_area = chart.and_then(|c| c.child("plotArea"));

    let plots: Vec<(&XmlNode, ChartType)> = plot_area
        .map(|pa| {
            pa.children()
                .iter()
                .filter_map(|c| ChartType::from_plot_element(c.local_name()).map(|t| (c, t)))
                .collect()
        })
        .unwrap_or_default();

    let title = chart.and_then(|c| c.child("title")).and_then(|t| {
        let text = t
            .child("tx")
            .map(|tx| {
                tx.find("rich")
                    .map(|rich| {
                        rich.children_named("p")
                            .iter()
                            .map(|p| p.deep_text())
                            .collect::<Vec<_>>()
                            .join("\n")
                    })
                    .or_else(|| cached_points(tx).into_iter().flatten().next())
                    .unwrap_or_default()
            })
            .unwrap_or_default();
        (!text.is_empty()).then_some(text)
    });

    ChartData {
        chart_type: plots.first().map(|(_, t)| *t).unwrap_or(ChartType::Unknown),
        bar_direction: plots
            .first()
            .and_then(|(n, _)| n.child("barDir"))
            .and_then(|d| d.attr("val"))
            .map(str::to_string),
        title,
        has_legend: chart.is_some_and(|c| c.has_child("legend")),
        series: plots
            .iter()
            .flat_map(|(n, _)| n.children_named("ser"))
            .map(parse_series)
            .collect(),
    }
}

/// Parse a chart part.
pub fn parse_chart(parser: &MarkupParser, xml: &[u8]) -> Result<ChartData> {
    Ok(chart_from_tree(&parser.parse(xml)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHART: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<c:chartSpace xmlns:c="http://schemas.openxmlformats.org/drawingml/2006/chart" xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main">
  <c:chart>
    <c:title><c:tx><c:rich><a:bodyPr/><a:p><a:r><a:t>Sales</a:t></a:r></a:p></c:rich></c:tx></c:title>
    <c:plotArea>
      <c:layout/>
      <c:barChart>
        <c:barDir val="col"/>
        <c:ser>
          <c:idx val="0"/>
          <c:tx><c:strRef><c:f>Sheet1!$B$1</c:f><c:strCache><c:ptCount val="1"/><c:pt idx="0"><c:v>Q1</c:v></c:pt></c:strCache></c:strRef></c:tx>
          <c:cat><c:strRef><c:strCache><c:ptCount val="3"/>
            <c:pt idx="0"><c:v>North</c:v></c:pt><c:pt idx="1"><c:v>South</c:v></c:pt><c:pt idx="2"><c:v>West</c:v></c:pt>
          </c:strCache></c:strRef></c:cat>
          <c:val><c:numRef><c:numCache><c:formatCode>General</c:formatCode><c:ptCount val="3"/>
            <c:pt idx="0"><c:v>4.3</c:v></c:pt><c:pt idx="2"><c:v>2</c:v></c:pt>
          </c:numCache></c:numRef></c:val>
        </c:ser>
      </c:barChart>
    </c:plotArea>
    <c:legend><c:legendPos val="r"/></c:legend>
  </c:chart>
</c:chartSpace>"#;

    #[test]
    fn test_parse_chart() {
        let chart = parse_chart(&MarkupParser::new(), CHART.as_bytes()).unwrap();

        assert_eq!(chart.chart_type, ChartType::Bar);
        assert_eq!(chart.bar_direction.as_deref(), Some("col"));
        assert_eq!(chart.title.as_deref(), Some("Sales"));
        assert!(chart.has_legend);
        assert_eq!(chart.series.len(), 1);

        let series = &chart.series[0];
        assert_eq!(series.name.as_deref(), Some("Q1"));
        assert_eq!(series.categories, vec!["North", "South", "West"]);
        assert_eq!(series.values, vec![Some(4.3), None, Some(2.0)]);
    }

    #[test]
    fn test_unknown_chart() {
        let chart = parse_chart(
            &MarkupParser::new(),
            b"<c:chartSpace><c:chart><c:plotArea/></c:chart></c:chartSpace>",
        )
        .unwrap();
        assert_eq!(chart.chart_type, ChartType::Unknown);
        assert!(chart.series.is_empty());
        assert!(chart.title.is_none());
    }
}
