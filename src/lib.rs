//! normterms: turn a normative service-life spreadsheet into a nested JSON document.
//!
//! The sheet encodes a four-level hierarchy (divisions, subdivisions, groups, items) through
//! numeric codes, cell indentation and rich text, followed by a free-form footnote section.
//! [`document::parse_sheet`] rebuilds both and [`document::Document::to_json_value`] emits the
//! normalised output.

pub mod builder;
pub mod cell;
pub mod config;
pub mod document;
pub mod error;
pub mod node;
pub mod normalize;
pub mod notes;
pub mod sheet;
pub mod workbook;

pub use error::Error;

#[cfg(test)]
#[path = "tests/fixtures.rs"]
mod fixtures;
