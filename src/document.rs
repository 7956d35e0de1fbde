//! Document assembly: split the sheet into hierarchy and footnote regions and run both parsers.
//!
//! The header block is skipped, the footnote title row is located by its marker text, rows in
//! between feed the [`crate::builder`] state machine and rows after it feed [`crate::notes`].

use crate::builder::{build_hierarchy, BuildReport, Row, DESCRIPTION_COLUMN};
use crate::config::Config;
use crate::error::Result;
use crate::node::TreeNode;
use crate::normalize::normalize_document;
use crate::notes::{parse_sheet_footnotes, FootnoteEntry};
use crate::sheet::Sheet;
use crate::workbook::Workbook;
use serde::Serialize;
use serde_json::Value;
use std::path::Path;
use tracing::info;

#[derive(Clone, Debug, PartialEq, Eq)]
/// Where content lives on the sheet.
pub struct Layout {
    /// Rows at the top of the sheet that precede the hierarchy.
    pub header_rows: u32,
    /// Text whose first occurrence in column 1 titles the footnote section.
    pub notes_marker: String,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            header_rows: 8,
            notes_marker: "Примечание".to_string(),
        }
    }
}

impl From<&Config> for Layout {
    fn from(cfg: &Config) -> Self {
        Self {
            header_rows: cfg.header_rows,
            notes_marker: cfg.notes_marker.clone(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
/// The converted document.
pub struct Document {
    /// Root nodes of the regulation hierarchy.
    pub normative_terms: Vec<TreeNode>,
    /// Footnotes in sheet order.
    pub notes: Vec<FootnoteEntry>,
}

impl Document {
    /// JSON form with normalisation applied.
    ///
    /// Both top-level sections are always present, even when empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be represented as JSON.
    pub fn to_json_value(&self) -> Result<Value> {
        Ok(normalize_document(serde_json::to_value(self)?))
    }

    /// Pretty-printed, normalised JSON text with non-ASCII characters left unescaped.
    ///
    /// # Errors
    ///
    /// Returns an error if serialisation fails.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_json_value()?)?)
    }
}

#[derive(Clone, Debug)]
/// Result of parsing one sheet.
pub struct Parsed {
    /// The assembled document, not yet normalised.
    pub document: Document,
    /// Diagnostics from the hierarchy pass.
    pub report: BuildReport,
    /// Row holding the footnote section title, if one was found.
    pub marker_row: Option<u32>,
}

/// Parse a loaded sheet.
#[must_use]
pub fn parse_sheet(sheet: &Sheet, layout: &Layout) -> Parsed {
    let marker_row = sheet.find_row_containing(DESCRIPTION_COLUMN, &layout.notes_marker);
    let first = layout.header_rows.saturating_add(1);
    let last = marker_row.map_or(sheet.max_row(), |row| row.saturating_sub(1));

    let rows: Vec<Row> = (first..=last)
        .map(|number| Row::from_sheet(sheet, number))
        .collect();
    let (normative_terms, report) = build_hierarchy(&rows);

    let notes = marker_row
        .map(|row| parse_sheet_footnotes(sheet, row))
        .unwrap_or_default();

    info!(
        sheet = %sheet.name,
        roots = normative_terms.len(),
        nodes = report.nodes,
        skipped = report.skipped,
        unclassified = report.unclassified.len(),
        notes = notes.len(),
        "parsed sheet"
    );

    Parsed {
        document: Document {
            normative_terms,
            notes,
        },
        report,
        marker_row,
    }
}

/// Open the workbook at `path` and parse the sheet called `sheet_name`.
///
/// # Errors
///
/// Returns an error if the workbook cannot be read or has no such sheet.
pub fn parse_workbook(path: &Path, sheet_name: &str, layout: &Layout) -> Result<Parsed> {
    let mut workbook = Workbook::open(path)?;
    let sheet = workbook.sheet(sheet_name)?;
    Ok(parse_sheet(&sheet, layout))
}

#[cfg(test)]
#[path = "tests/document.rs"]
mod tests;
