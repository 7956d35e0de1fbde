//! In-memory worksheet grid.
//!
//! A sheet is read fully into memory before any row is classified. Coordinates are 1-based to
//! match spreadsheet addressing, and unpopulated coordinates read back as an empty cell.

use std::collections::BTreeMap;

#[derive(Clone, Debug, Default, PartialEq)]
/// Raw cell content as stored in the workbook.
pub enum CellValue {
    /// No value.
    #[default]
    Empty,
    /// A plain string.
    Text(String),
    /// A numeric value with no fractional part.
    Integer(i64),
    /// Any other numeric value.
    Float(f64),
    /// A boolean value.
    Bool(bool),
    /// A string composed of separately formatted runs.
    Rich(Vec<TextRun>),
}

#[derive(Clone, Debug, PartialEq)]
/// One formatted run of a rich-text cell.
pub struct TextRun {
    /// Literal run text.
    pub text: String,
    /// Explicit run formatting; `None` for runs without run properties.
    pub font: Option<RunFont>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// The subset of run formatting the parser cares about.
pub struct RunFont {
    /// Whether the run is raised as superscript (`vertAlign="superscript"`).
    pub superscript: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
/// A cell value together with its alignment indent.
pub struct Cell {
    /// Stored value.
    pub value: CellValue,
    /// Alignment indent level from the cell style (0 when unstyled).
    pub indent: u32,
}

static EMPTY_CELL: Cell = Cell {
    value: CellValue::Empty,
    indent: 0,
};

impl TextRun {
    /// A run without explicit formatting.
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font: None,
        }
    }

    /// A run with explicit formatting that is not superscript.
    #[must_use]
    pub fn normal(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font: Some(RunFont::default()),
        }
    }

    /// A superscript run.
    #[must_use]
    pub fn superscript(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font: Some(RunFont { superscript: true }),
        }
    }

    /// Whether this run is marked as superscript.
    #[must_use]
    pub fn is_superscript(&self) -> bool {
        self.font.as_ref().is_some_and(|f| f.superscript)
    }
}

impl CellValue {
    /// True for [`CellValue::Empty`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// True when the value reads as blank: empty, an empty string, zero, `false`, or no runs.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(s) => s.is_empty(),
            Self::Integer(n) => *n == 0,
            Self::Float(f) => f.abs() <= 0.0,
            Self::Bool(b) => !b,
            Self::Rich(runs) => runs.is_empty(),
        }
    }

    /// Plain string form of the value, with rich runs concatenated.
    ///
    /// Returns `None` only for empty cells; an empty string stays `Some("")`.
    #[must_use]
    pub fn display_text(&self) -> Option<String> {
        match self {
            Self::Empty => None,
            Self::Text(s) => Some(s.clone()),
            Self::Integer(n) => Some(n.to_string()),
            Self::Float(f) => Some(f.to_string()),
            Self::Bool(b) => Some(if *b { "TRUE" } else { "FALSE" }.to_string()),
            Self::Rich(runs) => Some(runs.iter().map(|r| r.text.as_str()).collect()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl Cell {
    /// A cell with no indent.
    #[must_use]
    pub fn new(value: impl Into<CellValue>) -> Self {
        Self {
            value: value.into(),
            indent: 0,
        }
    }

    /// Builder-style indent setter.
    #[must_use]
    pub fn with_indent(mut self, indent: u32) -> Self {
        self.indent = indent;
        self
    }
}

#[derive(Clone, Debug, Default)]
/// A named worksheet held as a sparse 1-based grid.
pub struct Sheet {
    /// Sheet tab name.
    pub name: String,
    rows: BTreeMap<u32, BTreeMap<u32, Cell>>,
}

impl Sheet {
    /// An empty sheet.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: BTreeMap::new(),
        }
    }

    /// Store a cell, replacing any previous content at that coordinate.
    pub fn set(&mut self, row: u32, col: u32, cell: Cell) {
        self.rows.entry(row).or_default().insert(col, cell);
    }

    /// Cell at `(row, col)`; the empty cell when nothing is stored there.
    #[must_use]
    pub fn cell(&self, row: u32, col: u32) -> &Cell {
        self.rows
            .get(&row)
            .and_then(|cols| cols.get(&col))
            .unwrap_or(&EMPTY_CELL)
    }

    /// Largest populated row index, or 0 for an empty sheet.
    #[must_use]
    pub fn max_row(&self) -> u32 {
        self.rows.keys().next_back().copied().unwrap_or(0)
    }

    /// First row whose cell in `col` has display text containing `needle`.
    #[must_use]
    pub fn find_row_containing(&self, col: u32, needle: &str) -> Option<u32> {
        self.rows.iter().find_map(|(&row, cols)| {
            cols.get(&col)
                .and_then(|cell| cell.value.display_text())
                .filter(|text| text.contains(needle))
                .map(|_| row)
        })
    }
}

#[cfg(test)]
#[path = "tests/sheet.rs"]
mod tests;
