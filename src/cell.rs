//! Cell decoding: plain display text plus superscript footnote references.
//!
//! Footnote markers are typed into description and term cells as superscript runs such as
//! `"2, 5"`. Decoding separates them from the visible text so each node can carry a `notes`
//! list next to its value.

use crate::sheet::{Cell, CellValue};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// Text and footnote keys recovered from one cell.
pub struct DecodedCell {
    /// Concatenated non-superscript text; `None` when the cell is empty or blank.
    pub text: Option<String>,
    /// Footnote keys from superscript runs, in left-to-right order, duplicates kept.
    pub footnote_refs: Vec<String>,
}

/// Decode a single cell.
///
/// Non-rich values pass through verbatim (numbers in their display form), while blank values
/// (an empty string, zero, `false`) are coerced to `None`. Rich values are split run by run: superscript runs feed the footnote
/// accumulator, everything else feeds the text. The footnote accumulator is split on commas,
/// trimmed, and empty pieces dropped.
#[must_use]
pub fn decode_cell(cell: &Cell) -> DecodedCell {
    let CellValue::Rich(runs) = &cell.value else {
        return DecodedCell {
            text: if cell.value.is_blank() {
                None
            } else {
                cell.value.display_text()
            },
            footnote_refs: Vec::new(),
        };
    };

    let mut text = String::new();
    let mut refs = String::new();
    for run in runs {
        if run.is_superscript() {
            refs.push_str(&run.text);
        } else {
            text.push_str(&run.text);
        }
    }

    DecodedCell {
        text: (!text.trim().is_empty()).then_some(text),
        footnote_refs: split_refs(&refs),
    }
}

fn split_refs(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
#[path = "tests/cell.rs"]
mod tests;
