//! Configuration to acknowledge workbook layout preferences as well as set defaults.
//!
//! Specifically, we try to find a normterms.toml, and if present we load settings from there.
//! This provides the sheet name, header size, footnote marker, file names and log level.

use facet::Facet;
use std::fs;

/// File looked up in the working directory.
pub const CONFIG_FILE: &str = "normterms.toml";

#[derive(Facet, Clone, Debug)]
/// User preferences loaded from normterms.toml or falling back to defaults.
pub struct Config {
    #[facet(default = "Нормативные сроки".to_string())]
    /// Worksheet holding the regulation table.
    pub sheet_name: String,
    #[facet(default = 8)]
    /// Rows of title and column headings above the first content row.
    pub header_rows: u32,
    #[facet(default = "Примечание".to_string())]
    /// Text that marks the start of the footnote section in column 1.
    pub notes_marker: String,
    #[facet(default = "os.xlsx".to_string())]
    /// Workbook read when no input path is given.
    pub input: String,
    #[facet(default = "result.json".to_string())]
    /// JSON file written when no output path is given.
    pub output: String,
    #[facet(default = "warn".to_string())]
    /// Default log filter when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Config {
    #[must_use]
    /// Load configuration from normterms.toml if present.
    ///
    /// # Panics
    ///
    /// Panics if the default configuration cannot be parsed.
    pub fn load() -> Self {
        if let Ok(contents) = fs::read_to_string(CONFIG_FILE) {
            if let Some(config) = Self::from_toml(&contents) {
                return config;
            }
        }
        Self::from_toml("").unwrap()
    }

    /// Parse configuration text, filling unspecified fields with defaults.
    #[must_use]
    pub fn from_toml(contents: &str) -> Option<Self> {
        facet_toml::from_str::<Self>(contents).ok()
    }
}

#[cfg(test)]
#[path = "tests/config.rs"]
mod tests;
