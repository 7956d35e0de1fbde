//! Error type for workbook loading and output.
//!
//! Row classification never fails: rows that fit no rule are dropped and reported through
//! [`crate::builder::BuildReport`]. Everything here comes from the collaborator layer.

use thiserror::Error;

#[derive(Debug, Error)]
/// Failures while reading a workbook package or writing the result.
pub enum Error {
    /// Filesystem access failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// The package is not a readable zip archive.
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
    /// An XML part could not be parsed.
    #[error("xml parse error: {0}")]
    Xml(#[from] quick_xml::Error),
    /// An XML attribute could not be parsed.
    #[error("xml attribute error: {0}")]
    XmlAttr(#[from] quick_xml::events::attributes::AttrError),
    /// A part was not valid UTF-8.
    #[error("utf-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    /// Serialising the document failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    /// A required part is absent from the package.
    #[error("missing workbook part: {0}")]
    MissingPart(String),
    /// No worksheet with the requested name exists.
    #[error("sheet not found: {0}")]
    SheetNotFound(String),
    /// A part is present but structurally unusable.
    #[error("malformed workbook: {0}")]
    Malformed(&'static str),
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
