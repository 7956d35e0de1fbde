//! In-memory workbook packages for tests.

use std::io::{Cursor, Write};
use tempfile::NamedTempFile;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

pub(crate) const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
  <cellStyleXfs count="1"><xf numFmtId="0" fontId="0"/></cellStyleXfs>
  <cellXfs count="4">
    <xf numFmtId="0" fontId="0" xfId="0"/>
    <xf numFmtId="0" fontId="0" xfId="0" applyAlignment="1"><alignment indent="1"/></xf>
    <xf numFmtId="0" fontId="0" xfId="0" applyAlignment="1"><alignment horizontal="left" indent="2"/></xf>
    <xf numFmtId="0" fontId="0" xfId="0" applyAlignment="1"><alignment wrapText="1"/></xf>
  </cellXfs>
</styleSheet>"#;

/// Parts of a single-sheet workbook.
pub(crate) struct Package<'a> {
    pub(crate) sheet_name: &'a str,
    pub(crate) sheet_data: &'a str,
    pub(crate) shared_strings: Option<&'a str>,
    pub(crate) styles: Option<&'a str>,
}

pub(crate) fn shared_strings(items: &[&str]) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="{0}" uniqueCount="{0}">{1}</sst>"#,
        items.len(),
        items.concat()
    )
}

pub(crate) fn build_xlsx(pkg: &Package<'_>) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let mut put = |name: &str, body: &str| {
        zip.start_file(name, SimpleFileOptions::default()).unwrap();
        zip.write_all(body.as_bytes()).unwrap();
    };

    put(
        "[Content_Types].xml",
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"/>"#,
    );
    put(
        "xl/workbook.xml",
        &format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
  <sheets>
    <sheet name="Обложка" sheetId="1" r:id="rId1"/>
    <sheet name="{}" sheetId="2" r:id="rId2"/>
  </sheets>
</workbook>"#,
            pkg.sheet_name
        ),
    );
    put(
        "xl/_rels/workbook.xml.rels",
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="/xl/worksheets/sheet2.xml"/>
</Relationships>"#,
    );
    put(
        "xl/worksheets/sheet1.xml",
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData/></worksheet>"#,
    );
    put(
        "xl/worksheets/sheet2.xml",
        &format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>{}</sheetData></worksheet>"#,
            pkg.sheet_data
        ),
    );
    if let Some(sst) = pkg.shared_strings {
        put("xl/sharedStrings.xml", sst);
    }
    if let Some(styles) = pkg.styles {
        put("xl/styles.xml", styles);
    }

    zip.finish().unwrap().into_inner()
}

pub(crate) fn write_xlsx(pkg: &Package<'_>) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
    file.write_all(&build_xlsx(pkg)).unwrap();
    file.flush().unwrap();
    file
}
