//! Output model for the regulation hierarchy.
//!
//! A node represents one spreadsheet row: its description, the raw code cell and the service-life
//! term. Nesting lives in `children`, which is only present on nodes that admit children and only
//! while it holds at least one node.

use crate::cell::DecodedCell;
use crate::sheet::CellValue;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
/// Code cell value kept in its spreadsheet type.
pub enum Code {
    /// Code typed as text.
    Text(String),
    /// Code typed as a whole number.
    Integer(i64),
    /// Code typed as a fractional number.
    Float(f64),
}

impl Code {
    /// Code from a raw cell value; `None` for empty cells and empty strings.
    #[must_use]
    pub fn from_cell(value: &CellValue) -> Option<Self> {
        match value {
            CellValue::Empty => None,
            CellValue::Integer(n) => Some(Self::Integer(*n)),
            CellValue::Float(f) => Some(Self::Float(*f)),
            other => other
                .display_text()
                .filter(|s| !s.is_empty())
                .map(Self::Text),
        }
    }

    /// Whether the code counts as present for row classification.
    ///
    /// Numeric zero is treated like a blank cell.
    #[must_use]
    pub fn is_present(&self) -> bool {
        match self {
            Self::Text(s) => !s.is_empty(),
            Self::Integer(n) => *n != 0,
            Self::Float(f) => f.abs() > 0.0,
        }
    }

    /// Number of digits when the code is made only of ASCII decimal digits.
    #[must_use]
    pub fn digit_count(&self) -> Option<usize> {
        let digits = match self {
            Self::Text(s) => s.clone(),
            Self::Integer(n) => n.to_string(),
            Self::Float(_) => return None,
        };
        (!digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()))
            .then(|| digits.chars().count())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
/// A text value with the footnote keys attached to it.
pub struct Annotated {
    /// Display text; serialised as `null` until normalisation strips it.
    pub value: Option<String>,
    /// Footnote keys referenced from the cell.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

impl Annotated {
    /// Take over a decoded cell.
    #[must_use]
    pub fn from_decoded(decoded: DecodedCell) -> Self {
        Self {
            value: decoded.text,
            notes: decoded.footnote_refs,
        }
    }

    /// A value without notes.
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            notes: Vec::new(),
        }
    }

    /// True when there is neither a value nor any note.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.value.is_none() && self.notes.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
/// One entry of the regulation hierarchy.
pub struct TreeNode {
    /// Caption from the first column; always present.
    pub description: Annotated,
    /// Raw code cell; serialised as `null` when absent so normalisation strips it.
    pub code: Option<Code>,
    /// Service-life term, present only when the term cell yields text or notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub term: Option<Annotated>,
    /// Nested nodes in row order, on nodes that admit children.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<TreeNode>>,
}

impl TreeNode {
    /// A node without children.
    #[must_use]
    pub fn new(description: Annotated, code: Option<Code>, term: Option<Annotated>) -> Self {
        Self {
            description,
            code,
            term: term.filter(|t| !t.is_empty()),
            children: None,
        }
    }

    /// Drop every `children` list that ended up empty, deepest nodes first.
    pub fn prune_empty_children(&mut self) {
        if let Some(children) = self.children.as_mut() {
            for child in children.iter_mut() {
                child.prune_empty_children();
            }
        }
        if self.children.as_ref().is_some_and(Vec::is_empty) {
            self.children = None;
        }
    }

    /// Number of nodes in this subtree, including `self`.
    #[must_use]
    pub fn subtree_len(&self) -> usize {
        1 + self
            .children
            .iter()
            .flatten()
            .map(TreeNode::subtree_len)
            .sum::<usize>()
    }
}

#[cfg(test)]
#[path = "tests/node.rs"]
mod tests;
