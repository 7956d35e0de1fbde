//! Footnote section parsing.
//!
//! The section starts after a title row and holds one footnote per integer-led line. Lines that
//! do not start with digits continue the previous footnote.

use crate::builder::DESCRIPTION_COLUMN;
use crate::normalize::collapse_whitespace;
use crate::sheet::Sheet;
use serde::Serialize;
use tracing::debug;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// One footnote definition.
pub struct FootnoteEntry {
    /// Leading digit run of the defining line, kept as written.
    pub key: String,
    /// Remaining text, with continuation lines appended.
    pub note: String,
}

/// Parse footnote lines in order.
///
/// Each line is whitespace-normalised first; blank lines are ignored, as are continuation lines
/// seen before the first footnote.
#[must_use]
pub fn parse_footnotes<I, S>(lines: I) -> Vec<FootnoteEntry>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut entries: Vec<FootnoteEntry> = Vec::new();
    for line in lines {
        let text = collapse_whitespace(line.as_ref());
        if text.is_empty() {
            continue;
        }

        let digits = text.bytes().take_while(u8::is_ascii_digit).count();
        if digits > 0 {
            let (key, rest) = text.split_at(digits);
            entries.push(FootnoteEntry {
                key: key.to_string(),
                note: rest.trim().to_string(),
            });
        } else if let Some(current) = entries.last_mut() {
            current.note.push(' ');
            current.note.push_str(&text);
        } else {
            debug!(line = %text, "dropping text before the first footnote");
        }
    }
    entries
}

/// Parse the footnote section of `sheet`, whose title sits on `marker_row`.
///
/// Reads the first column from the row after the title to the last row of the sheet.
#[must_use]
pub fn parse_sheet_footnotes(sheet: &Sheet, marker_row: u32) -> Vec<FootnoteEntry> {
    let lines = (marker_row + 1..=sheet.max_row()).filter_map(|row| {
        sheet
            .cell(row, DESCRIPTION_COLUMN)
            .value
            .display_text()
    });
    parse_footnotes(lines)
}

#[cfg(test)]
#[path = "tests/notes.rs"]
mod tests;
