/// Table shape implementation for PowerPoint presentations.
///
/// Tables in PowerPoint are DrawingML tables (`a:tbl`) contained within graphic
/// frames. A cell covered by a horizontal merge (`hMerge`) is not emitted, so a
/// row holds one entry per visible cell rather than one per grid column. Cells
/// covered by a vertical merge are kept and flagged.
use crate::ooxml::drawings::fill::{Fill, parse_fill};
use crate::ooxml::drawings::line::{Line, parse_line};
use crate::ooxml::drawings::xfrm::Transform;
use crate::ooxml::pptx::session::PartContext;
use crate::ooxml::pptx::shapes::base::{ElementInfo, check_fill};
use crate::ooxml::pptx::text::{Insets, TextBody, parse_text_body};
use crate::ooxml::xml::XmlNode;
use serde::Serialize;

/// Cell border lines (`a:lnL`, `a:lnR`...).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellBorders {
    pub left: Option<Line>,
    pub right: Option<Line>,
    pub top: Option<Line>,
    pub bottom: Option<Line>,
    /// Diagonal from top-left to bottom-right
    pub tl_to_br: Option<Line>,
    pub bl_to_tr: Option<Line>,
}

/// A table cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableCell {
    pub text: Option<TextBody>,
    /// Number of grid columns this cell spans
    pub grid_span: u32,
    /// Number of rows this cell spans
    pub row_span: u32,
    /// Covered by the cell above
    pub v_merge: bool,
    pub fill: Option<Fill>,
    pub borders: CellBorders,
    pub margins: Insets,
    /// `t`, `ctr`, `b`
    pub anchor: Option<String>,
}

impl TableCell {
    pub fn text(&self) -> String {
        self.text.as_ref().map(TextBody::text).unwrap_or_default()
    }
}

/// A table row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    /// Row height in EMU
    pub height: i64,
    pub cells: Vec<TableCell>,
}

/// A table in a graphic frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub info: ElementInfo,
    pub transform: Transform,
    /// Table style GUID (`a:tableStyleId`)
    pub style_id: Option<String>,
    pub first_row: bool,
    pub last_row: bool,
    pub first_col: bool,
    pub last_col: bool,
    pub band_row: bool,
    pub band_col: bool,
    /// Grid column widths in EMU
    pub columns: Vec<i64>,
    pub rows: Vec<TableRow>,
}

impl Table {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Get a specific cell by row and visible-cell index.
    pub fn cell(&self, row: usize, col: usize) -> Option<&TableCell> {
        self.rows.get(row).and_then(|r| r.cells.get(col))
    }
}

fn parse_cell(tc: &XmlNode, ctx: &mut PartContext<'_>) -> TableCell {
    let tc_pr = tc.child("tcPr");
    let border = |name: &str| {
        tc_pr
            .and_then(|pr| pr.child(name))
            .map(|ln| parse_line(ln, ctx.rels))
    };
    let borders = CellBorders {
        left: border("lnL"),
        right: border("lnR"),
        top: border("lnT"),
        bottom: border("lnB"),
        tl_to_br: border("lnTlToBr"),
        bl_to_tr: border("lnBlToTr"),
    };

    let defaults = Insets::default();
    let margins = match tc_pr {
        Some(pr) => Insets {
            left: pr.attr_i64("marL").unwrap_or(defaults.left),
            top: pr.attr_i64("marT").unwrap_or(defaults.top),
            right: pr.attr_i64("marR").unwrap_or(defaults.right),
            bottom: pr.attr_i64("marB").unwrap_or(defaults.bottom),
        },
        None => defaults,
    };

    let fill = tc_pr.and_then(|pr| parse_fill(pr, ctx.rels));
    check_fill(fill.as_ref(), ctx);

    TableCell {
        text: tc.child("txBody").map(|tx| parse_text_body(tx, ctx)),
        grid_span: tc.attr_u32("gridSpan").unwrap_or(1).max(1),
        row_span: tc.attr_u32("rowSpan").unwrap_or(1).max(1),
        v_merge: tc.attr_bool("vMerge").unwrap_or(false),
        fill,
        borders,
        margins,
        anchor: tc_pr.and_then(|pr| pr.attr("anchor")).map(str::to_string),
    }
}

/// Build a table from the `a:tbl` of a graphic frame.
pub(crate) fn parse_table(
    info: ElementInfo,
    transform: Transform,
    tbl: &XmlNode,
    ctx: &mut PartContext<'_>,
) -> Table {
    let tbl_pr = tbl.child("tblPr");
    let flag = |name: &str| {
        tbl_pr
            .and_then(|pr| pr.attr_bool(name))
            .unwrap_or(false)
    };

    let columns: Vec<i64> = tbl
        .child("tblGrid")
        .map(|grid| {
            grid.children_named("gridCol")
                .into_iter()
                .map(|col| col.attr_i64("w").unwrap_or(0))
                .collect()
        })
        .unwrap_or_default();

    let mut rows = Vec::new();
    for tr in tbl.children_named("tr") {
        let mut cells = Vec::new();
        for tc in tr.children_named("tc") {
            if tc.attr_bool("hMerge").unwrap_or(false) {
                continue;
            }
            cells.push(parse_cell(tc, ctx));
        }
        rows.push(TableRow {
            height: tr.attr_i64("h").unwrap_or(0),
            cells,
        });
    }

    Table {
        info,
        transform,
        style_id: tbl_pr
            .and_then(|pr| pr.child("tableStyleId"))
            .map(|id| id.text().trim().to_string())
            .filter(|id| !id.is_empty()),
        first_row: flag("firstRow"),
        last_row: flag("lastRow"),
        first_col: flag("firstCol"),
        last_col: flag("lastCol"),
        band_row: flag("bandRow"),
        band_col: flag("bandCol"),
        columns,
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::opc::Relationships;
    use crate::ooxml::pptx::session::{LinkedParts, ParseOptions};
    use crate::ooxml::xml::MarkupParser;

    const TABLE: &str = r#"<a:tbl>
  <a:tblPr firstRow="1" bandRow="1"><a:tableStyleId>{5C22544A-7EE6-4342-B048-85BDC9FD1C3A}</a:tableStyleId></a:tblPr>
  <a:tblGrid><a:gridCol w="2000000"/><a:gridCol w="2000000"/><a:gridCol w="1500000"/></a:tblGrid>
  <a:tr h="370840">
    <a:tc gridSpan="2"><a:txBody><a:bodyPr/><a:p><a:r><a:t>Region</a:t></a:r></a:p></a:txBody><a:tcPr marL="0" anchor="ctr"><a:lnB w="12700"><a:solidFill><a:srgbClr val="000000"/></a:solidFill></a:lnB><a:solidFill><a:schemeClr val="accent1"/></a:solidFill></a:tcPr></a:tc>
    <a:tc hMerge="1"><a:txBody><a:bodyPr/><a:p/></a:txBody><a:tcPr/></a:tc>
    <a:tc rowSpan="2"><a:txBody><a:bodyPr/><a:p><a:r><a:t>Total</a:t></a:r></a:p></a:txBody><a:tcPr/></a:tc>
  </a:tr>
  <a:tr h="370840">
    <a:tc><a:txBody><a:bodyPr/><a:p><a:r><a:t>North</a:t></a:r></a:p></a:txBody><a:tcPr/></a:tc>
    <a:tc><a:txBody><a:bodyPr/><a:p><a:r><a:t>12</a:t></a:r></a:p></a:txBody><a:tcPr/></a:tc>
    <a:tc vMerge="1"><a:txBody><a:bodyPr/><a:p/></a:txBody><a:tcPr/></a:tc>
  </a:tr>
</a:tbl>"#;

    fn table() -> Table {
        let tbl = MarkupParser::new().parse(TABLE.as_bytes()).unwrap();
        let rels = Relationships::new("ppt/slides/slide1.xml");
        let options = ParseOptions::default();
        let linked = LinkedParts::default();
        let mut ctx = PartContext::new("ppt/slides/slide1.xml", &rels, &options, &linked);
        parse_table(ElementInfo::default(), Transform::default(), &tbl, &mut ctx)
    }

    #[test]
    fn test_h_merge_cells_are_excluded() {
        let table = table();
        assert_eq!(table.column_count(), 3);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.rows[0].cells.len(), 2);
        assert_eq!(table.rows[1].cells.len(), 3);

        let region = table.cell(0, 0).unwrap();
        assert_eq!(region.grid_span, 2);
        assert_eq!(region.text(), "Region");
        assert_eq!(table.cell(0, 1).map(TableCell::text).as_deref(), Some("Total"));
        assert_eq!(table.cell(0, 1).map(|c| c.row_span), Some(2));
    }

    #[test]
    fn test_v_merge_cells_are_kept() {
        let table = table();
        let covered = table.cell(1, 2).unwrap();
        assert!(covered.v_merge);
        assert_eq!(covered.text(), "");
    }

    #[test]
    fn test_cell_and_table_properties() {
        let table = table();
        assert!(table.first_row);
        assert!(table.band_row);
        assert!(!table.last_col);
        assert_eq!(
            table.style_id.as_deref(),
            Some("{5C22544A-7EE6-4342-B048-85BDC9FD1C3A}")
        );
        assert_eq!(table.rows[0].height, 370_840);

        let region = table.cell(0, 0).unwrap();
        assert_eq!(region.margins.left, 0);
        assert_eq!(region.margins.right, 91_440);
        assert_eq!(region.anchor.as_deref(), Some("ctr"));
        assert!(matches!(region.fill, Some(Fill::Solid { .. })));
        assert_eq!(region.borders.bottom.as_ref().and_then(|l| l.width), Some(12_700));
        assert!(region.borders.top.is_none());
    }
}
