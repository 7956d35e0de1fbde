use super::{parse_sheet, parse_workbook, Document, Layout};
use crate::error::Error;
use crate::fixtures::{shared_strings, write_xlsx, Package, STYLES};
use crate::normalize::normalize_document;
use crate::sheet::{Cell, CellValue, Sheet, TextRun};
use serde_json::json;

fn no_header() -> Layout {
    Layout {
        header_rows: 0,
        ..Layout::default()
    }
}

#[test]
fn test_three_row_sheet_without_marker() {
    let mut sheet = Sheet::new("s");
    sheet.set(1, 1, Cell::new("Division"));
    sheet.set(1, 2, Cell::new("1"));
    sheet.set(2, 1, Cell::new("Sub"));
    sheet.set(2, 2, Cell::new("101"));
    sheet.set(3, 1, Cell::new("Item"));
    sheet.set(3, 2, Cell::new("10101"));
    sheet.set(3, 3, Cell::new("25 years"));

    let parsed = parse_sheet(&sheet, &no_header());
    assert_eq!(parsed.marker_row, None);

    let value = parsed.document.to_json_value().unwrap();
    assert_eq!(
        value,
        json!({
            "normativeTerms": [{
                "description": {"value": "Division"},
                "code": "1",
                "children": [{
                    "description": {"value": "Sub"},
                    "code": "101",
                    "children": [{
                        "description": {"value": "Item"},
                        "code": "10101",
                        "term": {"value": "25 years"}
                    }]
                }]
            }],
            "notes": []
        })
    );
}

#[test]
fn test_header_rows_are_skipped() {
    let mut sheet = Sheet::new("s");
    sheet.set(1, 1, Cell::new("Нормативные сроки службы"));
    sheet.set(2, 2, Cell::new("3"));
    sheet.set(3, 1, Cell::new("Division"));
    sheet.set(3, 2, Cell::new("1"));

    let layout = Layout {
        header_rows: 2,
        ..Layout::default()
    };
    let parsed = parse_sheet(&sheet, &layout);
    assert_eq!(parsed.document.normative_terms.len(), 1);
    assert_eq!(
        parsed.document.normative_terms[0].description.value.as_deref(),
        Some("Division")
    );
}

#[test]
fn test_marker_splits_hierarchy_and_notes() {
    let mut sheet = Sheet::new("s");
    sheet.set(1, 1, Cell::new("Division"));
    sheet.set(1, 2, Cell::new(1_i64));
    sheet.set(2, 1, Cell::new("Примечание:"));
    sheet.set(3, 1, Cell::new("1 First note."));
    sheet.set(4, 1, Cell::new("continued line."));
    sheet.set(5, 1, Cell::new("2 Second note."));
    // Rows past the marker never reach the hierarchy, whatever they hold.
    sheet.set(5, 2, Cell::new("101"));

    let parsed = parse_sheet(&sheet, &no_header());
    assert_eq!(parsed.marker_row, Some(2));

    let value = parsed.document.to_json_value().unwrap();
    assert_eq!(
        value,
        json!({
            "normativeTerms": [{"description": {"value": "Division"}, "code": 1}],
            "notes": [
                {"key": "1", "note": "First note. continued line."},
                {"key": "2", "note": "Second note."}
            ]
        })
    );
}

#[test]
fn test_footnote_refs_and_whitespace_cleanup() {
    let mut sheet = Sheet::new("s");
    sheet.set(1, 1, Cell::new("Здания\u{a0}\u{a0}и  сооружения "));
    sheet.set(1, 2, Cell::new("1"));
    sheet.set(2, 1, Cell::new("Группа"));
    sheet.set(
        3,
        1,
        Cell::new(CellValue::Rich(vec![
            TextRun::normal("Кирпичные "),
            TextRun::superscript("1, 3"),
        ]))
        .with_indent(2),
    );
    sheet.set(
        3,
        3,
        Cell::new(CellValue::Rich(vec![
            TextRun::normal("50"),
            TextRun::superscript("2"),
        ])),
    );
    sheet.set(4, 1, Cell::new("Деревянные").with_indent(2));
    sheet.set(
        4,
        3,
        Cell::new(CellValue::Rich(vec![
            TextRun::plain("25"),
            TextRun::superscript("4"),
        ])),
    );

    let value = parse_sheet(&sheet, &no_header())
        .document
        .to_json_value()
        .unwrap();
    assert_eq!(
        value["normativeTerms"][0],
        json!({
            "description": {"value": "Здания и сооружения"},
            "code": "1",
            "children": [{
                "description": {"value": "Группа"},
                "children": [
                    {
                        "description": {"value": "Кирпичные", "notes": ["1", "3"]},
                        "term": {"value": "50", "notes": ["2"]}
                    },
                    {
                        "description": {"value": "Деревянные"},
                        "term": {"value": "25", "notes": ["4"]}
                    }
                ]
            }]
        })
    );
}

#[test]
fn test_normalised_output_is_stable() {
    let mut sheet = Sheet::new("s");
    sheet.set(1, 1, Cell::new("  a  b "));
    sheet.set(1, 2, Cell::new("1"));
    let doc = parse_sheet(&sheet, &no_header()).document;
    let once = doc.to_json_value().unwrap();
    assert_eq!(once["notes"], json!([]));
    let twice = normalize_document(once.clone());
    assert_eq!(once, twice);
}

#[test]
fn test_json_string_keeps_cyrillic_and_field_order() {
    let mut sheet = Sheet::new("s");
    sheet.set(1, 1, Cell::new("Здания"));
    sheet.set(1, 2, Cell::new("1"));
    sheet.set(2, 1, Cell::new("Крыши").with_indent(2));
    sheet.set(2, 3, Cell::new("15"));
    let text = parse_sheet(&sheet, &no_header())
        .document
        .to_json_string()
        .unwrap();

    assert!(text.contains("\"Здания\""), "Non-ASCII stays unescaped");
    let description = text.find("\"description\"").unwrap();
    let code = text.find("\"code\"").unwrap();
    let children = text.find("\"children\"").unwrap();
    assert!(description < code && code < children);
    assert!(text.contains("\n  \"normativeTerms\""));
}

#[test]
fn test_header_rows_at_max_skip_everything() {
    let mut sheet = Sheet::new("s");
    sheet.set(1, 1, Cell::new("Division"));
    sheet.set(1, 2, Cell::new("1"));
    let layout = Layout {
        header_rows: u32::MAX,
        ..Layout::default()
    };
    let parsed = parse_sheet(&sheet, &layout);
    assert!(parsed.document.normative_terms.is_empty());
    assert_eq!(parsed.report, crate::builder::BuildReport::default());
}

#[test]
fn test_empty_document() {
    let value = Document::default().to_json_value().unwrap();
    assert_eq!(value, json!({"normativeTerms": [], "notes": []}));
}

#[test]
fn test_parse_workbook_end_to_end() {
    let sst = shared_strings(&[
        "<si><t>Нормативные сроки службы</t></si>",
        "<si><t>Здания</t></si>",
        "<si><t>Жилые</t></si>",
        r#"<si><r><t>Фундаменты</t></r><r><rPr><vertAlign val="superscript"/></rPr><t>1</t></r></si>"#,
        "<si><t>Примечание</t></si>",
        "<si><t>1 Для зданий</t></si>",
        "<si><t>капитального типа.</t></si>",
    ]);
    let data = r#"
        <row r="1"><c r="A1" t="s"><v>0</v></c></row>
        <row r="9"><c r="A9" t="s"><v>1</v></c><c r="B9"><v>1</v></c></row>
        <row r="10"><c r="A10" t="s"><v>2</v></c><c r="B10" t="inlineStr"><is><t>101</t></is></c></row>
        <row r="11"><c r="A11" s="2" t="s"><v>3</v></c><c r="C11"><v>100</v></c></row>
        <row r="12"><c r="A12" s="1" t="inlineStr"><is><t>Потерянная строка</t></is></c><c r="C12"><v>5</v></c></row>
        <row r="14"><c r="A14" t="s"><v>4</v></c></row>
        <row r="15"><c r="A15" t="s"><v>5</v></c></row>
        <row r="16"><c r="A16" t="s"><v>6</v></c></row>
    "#;
    let file = write_xlsx(&Package {
        sheet_name: "Нормативные сроки",
        sheet_data: data,
        shared_strings: Some(&sst),
        styles: Some(STYLES),
    });

    let parsed = parse_workbook(file.path(), "Нормативные сроки", &Layout::default()).unwrap();
    assert_eq!(parsed.marker_row, Some(14));
    assert_eq!(parsed.report.unclassified, vec![12]);
    assert_eq!(parsed.report.skipped, 1, "Empty row 13 is skipped");

    let value = parsed.document.to_json_value().unwrap();
    assert_eq!(
        value,
        json!({
            "normativeTerms": [{
                "description": {"value": "Здания"},
                "code": 1,
                "children": [{
                    "description": {"value": "Жилые"},
                    "code": "101",
                    "children": [{
                        "description": {"value": "Фундаменты", "notes": ["1"]},
                        "term": {"value": "100"}
                    }]
                }]
            }],
            "notes": [{"key": "1", "note": "Для зданий капитального типа."}]
        })
    );
}

#[test]
fn test_parse_workbook_missing_sheet() {
    let file = write_xlsx(&Package {
        sheet_name: "Лист1",
        sheet_data: "",
        shared_strings: None,
        styles: None,
    });
    let result = parse_workbook(file.path(), "Нормативные сроки", &Layout::default());
    assert!(matches!(result, Err(Error::SheetNotFound(_))));
}
