//! The hierarchy builder: a row-classification state machine.
//!
//! Rows carry no parent pointers. Each row is first classified from the shape of its code, the
//! indent of its caption cell, and which of its cells are filled. The class then decides which of
//! the four "last seen" registers the new node hangs under:
//!
//! ```text
//! Division      (code of 1 digit)             -> root
//! Subdivision   (code of 3 digits)            -> level1 | root
//! GroupCodeItem (code of 5 digits, indent 0)  -> level2 | level1 | root
//! GroupHeader   (caption only)                -> level2 | level1 | root
//! LeafItem      (indent >= 2)                 -> group | level3 | level2 | level1 | root
//! ```
//!
//! Nodes live in an arena while the pass runs, addressed by [`NodeId`], so that a register can
//! keep pointing at a node after it has been attached to its parent. [`HierarchyBuilder::finish`]
//! turns the arena into the nested [`TreeNode`] forest.

use crate::cell::{decode_cell, DecodedCell};
use crate::node::{Annotated, Code, TreeNode};
use crate::sheet::{Cell, Sheet};
use tracing::{debug, warn};

/// Sheet column holding the description caption.
pub const DESCRIPTION_COLUMN: u32 = 1;
/// Sheet column holding the numeric code.
pub const CODE_COLUMN: u32 = 2;
/// Sheet column holding the service-life term.
pub const TERM_COLUMN: u32 = 3;

#[derive(Clone, Debug, Default, PartialEq)]
/// The three cells of one hierarchy row.
pub struct Row {
    /// 1-based sheet row number, used for diagnostics.
    pub number: u32,
    /// Caption cell; its indent drives leaf detection.
    pub description: Cell,
    /// Code cell.
    pub code: Cell,
    /// Term cell.
    pub term: Cell,
}

impl Row {
    /// Read row `number` from the sheet's description, code and term columns.
    #[must_use]
    pub fn from_sheet(sheet: &Sheet, number: u32) -> Self {
        Self {
            number,
            description: sheet.cell(number, DESCRIPTION_COLUMN).clone(),
            code: sheet.cell(number, CODE_COLUMN).clone(),
            term: sheet.cell(number, TERM_COLUMN).clone(),
        }
    }

    /// Alignment indent of the caption cell.
    #[must_use]
    pub fn indent(&self) -> u32 {
        self.description.indent
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// Structural class of a row; the first matching rule wins.
pub enum RowClass {
    /// Nothing in caption, code or term; produces no node.
    Skip,
    /// Level 1, a one-digit code.
    Division,
    /// Level 2, a three-digit code.
    Subdivision,
    /// Level 3, a five-digit code without indent.
    GroupCodeItem,
    /// Level 3 title with neither code nor term.
    GroupHeader,
    /// Deepest level, recognised by an indent of 2 or more.
    LeafItem,
    /// Matches no rule; the row is dropped and reported.
    Unclassified,
}

/// Decoded view of a row, as seen by the classification rules.
#[derive(Clone, Debug)]
pub struct RowFacts {
    /// Decoded caption cell.
    pub caption: DecodedCell,
    /// Code in its cell type, if the cell holds one.
    pub code: Option<Code>,
    /// Decoded term cell.
    pub term: DecodedCell,
    /// Whether the raw term cell is blank before decoding.
    pub term_blank: bool,
    /// Caption indent.
    pub indent: u32,
}

impl RowFacts {
    /// Decode the cells of `row`.
    #[must_use]
    pub fn from_row(row: &Row) -> Self {
        Self {
            caption: decode_cell(&row.description),
            code: Code::from_cell(&row.code.value),
            term: decode_cell(&row.term),
            term_blank: row.term.value.is_blank(),
            indent: row.indent(),
        }
    }

    fn has_code(&self) -> bool {
        self.code.as_ref().is_some_and(Code::is_present)
    }

    fn has_caption(&self) -> bool {
        self.caption.text.is_some()
    }

    fn code_digits(&self) -> Option<usize> {
        self.code
            .as_ref()
            .filter(|code| code.is_present())
            .and_then(Code::digit_count)
    }
}

type Rule = (RowClass, fn(&RowFacts) -> bool);

/// Classification rules in priority order.
const RULES: [Rule; 6] = [
    (RowClass::Skip, is_empty_row),
    (RowClass::Division, is_division),
    (RowClass::Subdivision, is_subdivision),
    (RowClass::GroupCodeItem, is_group_code_item),
    (RowClass::GroupHeader, is_group_header),
    (RowClass::LeafItem, is_leaf_item),
];

fn is_empty_row(f: &RowFacts) -> bool {
    !f.has_caption() && !f.has_code() && f.term_blank
}

fn is_division(f: &RowFacts) -> bool {
    f.code_digits() == Some(1)
}

fn is_subdivision(f: &RowFacts) -> bool {
    f.code_digits() == Some(3)
}

fn is_group_code_item(f: &RowFacts) -> bool {
    f.code_digits() == Some(5) && f.indent == 0
}

// The term test looks at decoded text: a term cell holding only footnote marks does not count.
fn is_group_header(f: &RowFacts) -> bool {
    !f.has_code() && f.term.text.is_none() && f.has_caption()
}

fn is_leaf_item(f: &RowFacts) -> bool {
    f.indent >= 2
}

/// Classify a row by the first rule it satisfies.
#[must_use]
pub fn classify(facts: &RowFacts) -> RowClass {
    RULES
        .iter()
        .find(|(_, rule)| rule(facts))
        .map_or(RowClass::Unclassified, |(class, _)| *class)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// Index of a node in the builder arena.
pub struct NodeId(usize);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// The "most recent node at each rank" registers.
pub struct BuilderState {
    /// Last division.
    pub level1: Option<NodeId>,
    /// Last subdivision.
    pub level2: Option<NodeId>,
    /// Last group-code item.
    pub level3: Option<NodeId>,
    /// Last group header.
    pub group: Option<NodeId>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// What the pass did with rows that produced no node.
pub struct BuildReport {
    /// Rows that produced a node.
    pub nodes: usize,
    /// Empty rows passed over.
    pub skipped: usize,
    /// Row numbers that matched no rule and were dropped.
    pub unclassified: Vec<u32>,
}

struct Slot {
    node: TreeNode,
    children: Option<Vec<NodeId>>,
}

#[derive(Default)]
/// Single-pass builder; feed rows in sheet order, then call [`HierarchyBuilder::finish`].
pub struct HierarchyBuilder {
    slots: Vec<Slot>,
    roots: Vec<NodeId>,
    state: BuilderState,
    report: BuildReport,
}

impl HierarchyBuilder {
    /// A builder with empty registers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current register values.
    #[must_use]
    pub fn state(&self) -> BuilderState {
        self.state
    }

    /// Classify one row and attach its node.
    pub fn push_row(&mut self, row: &Row) -> RowClass {
        let facts = RowFacts::from_row(row);
        let class = classify(&facts);
        debug!(row = row.number, indent = facts.indent, ?class, "classified row");

        let parent = match class {
            RowClass::Skip => {
                self.report.skipped += 1;
                return class;
            }
            RowClass::Unclassified => {
                warn!(
                    row = row.number,
                    indent = facts.indent,
                    "row matches no classification rule, dropping it"
                );
                self.report.unclassified.push(row.number);
                return class;
            }
            RowClass::Division => None,
            RowClass::Subdivision => self.state.level1,
            RowClass::GroupCodeItem | RowClass::GroupHeader => {
                self.state.level2.or(self.state.level1)
            }
            RowClass::LeafItem => self
                .state
                .group
                .or(self.state.level3)
                .or(self.state.level2)
                .or(self.state.level1),
        };

        let admits_children = matches!(
            class,
            RowClass::Division | RowClass::Subdivision | RowClass::GroupHeader
        );
        let id = self.insert(facts, admits_children);
        self.attach(parent, id);

        match class {
            RowClass::Division => {
                self.state = BuilderState {
                    level1: Some(id),
                    ..BuilderState::default()
                };
            }
            RowClass::Subdivision => {
                self.state.level2 = Some(id);
                self.state.level3 = None;
                self.state.group = None;
            }
            RowClass::GroupCodeItem => {
                self.state.level3 = Some(id);
                self.state.group = None;
            }
            RowClass::GroupHeader => self.state.group = Some(id),
            _ => {}
        }
        self.report.nodes += 1;
        class
    }

    fn insert(&mut self, facts: RowFacts, admits_children: bool) -> NodeId {
        let node = TreeNode::new(
            Annotated::from_decoded(facts.caption),
            facts.code,
            Some(Annotated::from_decoded(facts.term)),
        );
        self.slots.push(Slot {
            node,
            children: admits_children.then(Vec::new),
        });
        NodeId(self.slots.len() - 1)
    }

    fn attach(&mut self, parent: Option<NodeId>, child: NodeId) {
        match parent {
            Some(NodeId(idx)) => self.slots[idx]
                .children
                .get_or_insert_with(Vec::new)
                .push(child),
            None => self.roots.push(child),
        }
    }

    /// Assemble the forest, drop empty `children` lists, and return it with the report.
    #[must_use]
    pub fn finish(self) -> (Vec<TreeNode>, BuildReport) {
        // Children are always created after their parent, so walking the arena backwards
        // finalises every child before the node that owns it.
        let mut built: Vec<Option<TreeNode>> = std::iter::repeat_with(|| None)
            .take(self.slots.len())
            .collect();
        for (idx, slot) in self.slots.into_iter().enumerate().rev() {
            let mut node = slot.node;
            node.children = slot.children.map(|ids| {
                ids.iter()
                    .filter_map(|NodeId(child)| built[*child].take())
                    .collect()
            });
            built[idx] = Some(node);
        }

        let mut forest: Vec<TreeNode> = self
            .roots
            .iter()
            .filter_map(|NodeId(root)| built[*root].take())
            .collect();
        for node in &mut forest {
            node.prune_empty_children();
        }
        (forest, self.report)
    }
}

/// Run the builder over `rows` in order.
#[must_use]
pub fn build_hierarchy<'a, I>(rows: I) -> (Vec<TreeNode>, BuildReport)
where
    I: IntoIterator<Item = &'a Row>,
{
    let mut builder = HierarchyBuilder::new();
    for row in rows {
        builder.push_row(row);
    }
    builder.finish()
}

#[cfg(test)]
#[path = "tests/builder.rs"]
mod tests;
