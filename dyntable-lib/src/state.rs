//! Table display state and the sort/page state resolver.
//!
//! All state lives in one serializable [`TableState`]. Interactions are
//! applied with [`TableState::reduce`], which never mutates in place, and the
//! state shown for an update is produced by [`TableState::resolve`].

use std::collections::BTreeSet;

use serde::Deserialize;
use serde::Serialize;

use crate::column::Column;
use crate::options::{Controlled, TableOptions, resolve_page_size};

/// Page size used when none is configured.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Row identity: the row's index path in the input data (`"3"`, `"3.0"`).
pub type RowId = String;

/// Single-column sort specification.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortSpec {
    /// Column id.
    pub id: String,
    /// Descending order.
    #[serde(default)]
    pub desc: bool,
}

impl SortSpec {
    /// Ascending sort on a column.
    pub fn asc(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            desc: false,
        }
    }

    /// Descending sort on a column.
    pub fn desc(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            desc: true,
        }
    }
}

/// Everything the table tracks between updates.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TableState {
    /// Zero or one sort specs.
    pub sort_by: Vec<SortSpec>,
    /// Zero-based page index.
    pub page_index: usize,
    /// Rows per page.
    pub page_size: usize,
    /// Column ids in display order.
    pub column_order: Vec<String>,
    /// Rows whose sub-rows are shown.
    pub expanded: BTreeSet<RowId>,
}

/// A state transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableAction {
    /// Advance the sort cycle of a column.
    ToggleSort { column_id: String },
    /// Navigate to a page, ignored when out of range.
    GotoPage { index: usize, page_count: usize },
    /// Change the page size, keeping the first visible row on the page.
    SetPageSize(usize),
    /// Replace the column order.
    SetColumnOrder(Vec<String>),
    /// Show or hide a row's sub-rows.
    ToggleRowExpanded(RowId),
    /// Return to the first page.
    ResetPage,
    /// Collapse every row.
    ResetExpanded,
}

impl TableState {
    /// Builds the initial state from the options' defaults.
    pub fn initial(options: &TableOptions, columns: &[Column]) -> Self {
        Self {
            sort_by: options.default_sort_by.iter().cloned().collect(),
            page_index: options.default_page,
            page_size: resolve_page_size(options.rows_per_page),
            column_order: options
                .default_column_order
                .clone()
                .unwrap_or_else(|| columns.iter().map(|c| c.id.clone()).collect()),
            expanded: BTreeSet::new(),
        }
    }

    /// Applies an action and returns the next state.
    pub fn reduce(&self, action: &TableAction) -> Self {
        let mut next = self.clone();
        match action {
            TableAction::ToggleSort { column_id } => {
                next.sort_by = next_sort(&self.sort_by, column_id);
            }
            TableAction::GotoPage { index, page_count } => {
                if *index < *page_count {
                    next.page_index = *index;
                } else {
                    log::debug!("ignoring navigation to page {} of {}", index, page_count);
                }
            }
            TableAction::SetPageSize(size) => {
                if *size > 0 {
                    let top_row = self.page_size.saturating_mul(self.page_index);
                    next.page_size = *size;
                    next.page_index = top_row / *size;
                }
            }
            TableAction::SetColumnOrder(order) => {
                next.column_order = order.clone();
            }
            TableAction::ToggleRowExpanded(id) => {
                if !next.expanded.remove(id) {
                    next.expanded.insert(id.clone());
                }
            }
            TableAction::ResetPage => {
                next.page_index = 0;
            }
            TableAction::ResetExpanded => {
                next.expanded.clear();
            }
        }
        next
    }

    /// Produces the authoritative state for one update.
    ///
    /// An external page index replaces the tracked one unconditionally and is
    /// not clamped. A table-owned index is clamped to the available pages.
    pub fn resolve(&self, page: Controlled<usize>, page_count: usize) -> Self {
        let mut resolved = self.clone();
        resolved.page_index = match page {
            Controlled::External(index) => index,
            Controlled::Owned(_) => self.page_index.min(page_count.saturating_sub(1)),
        };
        resolved
    }

    /// Returns the active sort, if any.
    pub fn sort(&self) -> Option<&SortSpec> {
        self.sort_by.first()
    }
}

/// Advances the single-column sort cycle: unsorted, ascending, descending.
pub fn next_sort(current: &[SortSpec], column_id: &str) -> Vec<SortSpec> {
    match current.first() {
        Some(spec) if spec.id == column_id && !spec.desc => vec![SortSpec::desc(column_id)],
        Some(spec) if spec.id == column_id => Vec::new(),
        _ => vec![SortSpec::asc(column_id)],
    }
}

/// Number of pages for a row count.
///
/// An explicit count wins. Manual pagination without one yields zero pages.
pub fn page_count(row_count: usize, page_size: usize, explicit: Option<usize>, manual: bool) -> usize {
    match explicit {
        Some(count) => count,
        None if manual => 0,
        None if page_size == 0 => 0,
        None => row_count.div_ceil(page_size),
    }
}
