//! XLSX loading: just enough of the package to rebuild a sheet grid.
//!
//! Only the parts the parser consumes are read: the sheet list and its relationships, the shared
//! string table (with rich runs, so superscript footnote marks survive), the `cellXfs` alignment
//! indents, and the worksheet cells themselves. Everything is parsed with quick-xml straight out
//! of the zip archive.

mod shared_strings;
mod styles;
mod worksheet;
mod xml;

use crate::error::{Error, Result};
use crate::sheet::{CellValue, Sheet};
use quick_xml::events::Event;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;
use tracing::debug;
use worksheet::{parse_worksheet, SheetContext};
use xml::{attr_value, reader};
use zip::result::ZipError;
use zip::ZipArchive;

const WORKBOOK_PART: &str = "xl/workbook.xml";
const WORKBOOK_RELS_PART: &str = "xl/_rels/workbook.xml.rels";
const SHARED_STRINGS_PART: &str = "xl/sharedStrings.xml";
const STYLES_PART: &str = "xl/styles.xml";

#[derive(Clone, Debug)]
struct SheetEntry {
    name: String,
    part: String,
}

/// An opened workbook package.
pub struct Workbook<R> {
    archive: ZipArchive<R>,
    sheets: Vec<SheetEntry>,
    shared_strings: Vec<CellValue>,
    indents: Vec<u32>,
}

impl Workbook<BufReader<File>> {
    /// Open the workbook file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or is not a readable workbook.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }
}

impl<R: Read + Seek> Workbook<R> {
    /// Read the workbook-level parts from any seekable source.
    ///
    /// # Errors
    ///
    /// Returns an error if the archive or one of its parts is unreadable, or if the workbook
    /// part is missing.
    pub fn from_reader(reader: R) -> Result<Self> {
        let mut archive = ZipArchive::new(reader)?;

        let workbook_xml = read_part(&mut archive, WORKBOOK_PART)?
            .ok_or_else(|| Error::MissingPart(WORKBOOK_PART.to_string()))?;
        let rels = match read_part(&mut archive, WORKBOOK_RELS_PART)? {
            Some(xml) => parse_relationships(&xml)?,
            None => HashMap::new(),
        };
        let sheets = parse_sheet_list(&workbook_xml, &rels)?;

        let shared_strings = match read_part(&mut archive, SHARED_STRINGS_PART)? {
            Some(xml) => shared_strings::parse_shared_strings(&xml)?,
            None => Vec::new(),
        };
        let indents = match read_part(&mut archive, STYLES_PART)? {
            Some(xml) => styles::parse_cell_indents(&xml)?,
            None => Vec::new(),
        };
        debug!(
            sheets = sheets.len(),
            shared_strings = shared_strings.len(),
            cell_formats = indents.len(),
            "opened workbook"
        );

        Ok(Self {
            archive,
            sheets,
            shared_strings,
            indents,
        })
    }

    /// Sheet names in workbook order.
    #[must_use]
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }

    /// Load the sheet called `name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SheetNotFound`] for an unknown name, [`Error::MissingPart`] when the
    /// worksheet part is absent, or a parse error.
    pub fn sheet(&mut self, name: &str) -> Result<Sheet> {
        let entry = self
            .sheets
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| Error::SheetNotFound(name.to_string()))?;
        let xml = read_part(&mut self.archive, &entry.part)?
            .ok_or_else(|| Error::MissingPart(entry.part.clone()))?;
        let ctx = SheetContext {
            shared_strings: &self.shared_strings,
            indents: &self.indents,
        };
        let sheet = parse_worksheet(&xml, name, &ctx)?;
        debug!(sheet = name, max_row = sheet.max_row(), "loaded sheet");
        Ok(sheet)
    }
}

fn read_part<R: Read + Seek>(archive: &mut ZipArchive<R>, name: &str) -> Result<Option<String>> {
    let mut file = match archive.by_name(name) {
        Ok(file) => file,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;
    Ok(Some(contents))
}

/// Relationship id to target for `xl/_rels/workbook.xml.rels`.
fn parse_relationships(xml: &str) -> Result<HashMap<String, String>> {
    let mut reader = reader(xml);
    let mut buf = Vec::new();
    let mut rels = HashMap::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"Relationship" => {
                if let (Some(id), Some(target)) =
                    (attr_value(&e, b"Id")?, attr_value(&e, b"Target")?)
                {
                    rels.insert(id, target);
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(rels)
}

/// Sheets listed in `xl/workbook.xml`, each resolved to its worksheet part.
fn parse_sheet_list(xml: &str, rels: &HashMap<String, String>) -> Result<Vec<SheetEntry>> {
    let mut reader = reader(xml);
    let mut buf = Vec::new();
    let mut sheets = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"sheet" => {
                let name = attr_value(&e, b"name")?
                    .ok_or(Error::Malformed("sheet element without a name"))?;
                let part = attr_value(&e, b"id")?
                    .and_then(|id| rels.get(&id))
                    .map(String::as_str)
                    .map_or_else(
                        || format!("xl/worksheets/sheet{}.xml", sheets.len() + 1),
                        resolve_target,
                    );
                sheets.push(SheetEntry { name, part });
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(sheets)
}

/// Package path of a workbook relationship target.
fn resolve_target(target: &str) -> String {
    match target.strip_prefix('/') {
        Some(absolute) => absolute.to_string(),
        None => format!("xl/{target}"),
    }
}

#[cfg(test)]
#[path = "tests/workbook.rs"]
mod tests;
