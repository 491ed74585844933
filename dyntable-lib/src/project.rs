//! Row projector: sorting, sub-rows, pagination and layout.

use std::collections::BTreeSet;
use std::ops::Range;

use crate::column::{Column, ordered_columns};
use crate::model::Row;
use crate::options::{ColumnDirection, SubRowsFn, TableOptions};
use crate::state::{RowId, SortSpec, TableState, page_count};

/// A data row with its identity, nesting depth and derived sub-rows.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRow {
    /// Index path in the input data.
    pub id: RowId,
    /// Position among its siblings in the input data.
    pub index: usize,
    /// Nesting depth, zero for top-level rows.
    pub depth: usize,
    /// The caller's record.
    pub original: Row,
    /// Child rows, empty when the row cannot expand.
    pub sub_rows: Vec<PreparedRow>,
}

impl PreparedRow {
    /// Returns `true` if the row has sub-rows to show.
    pub fn can_expand(&self) -> bool {
        !self.sub_rows.is_empty()
    }
}

/// A row as it appears in the vertical body.
#[derive(Debug, Clone, Copy)]
pub struct VisibleRow<'a> {
    pub row: &'a PreparedRow,
    pub is_expanded: bool,
}

/// One rendered cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayCell {
    pub column_id: String,
    pub row_id: RowId,
    pub text: String,
    pub is_numeric: bool,
}

/// One rendered body row: a record (vertical) or a column (horizontal).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow {
    /// Row id in vertical layout, column id in horizontal layout.
    pub key: String,
    pub depth: usize,
    pub can_expand: bool,
    pub is_expanded: bool,
    pub cells: Vec<DisplayCell>,
}

/// Wraps input rows, deriving sub-rows with the accessor when given.
pub fn prepare_rows(data: &[Row], get_sub_rows: Option<&SubRowsFn>) -> Vec<PreparedRow> {
    prepare_level(data, get_sub_rows, None, 0)
}

fn prepare_level(
    rows: &[Row],
    get_sub_rows: Option<&SubRowsFn>,
    parent: Option<&str>,
    depth: usize,
) -> Vec<PreparedRow> {
    rows.iter()
        .enumerate()
        .map(|(index, row)| {
            let id = match parent {
                Some(parent) => format!("{}.{}", parent, index),
                None => index.to_string(),
            };
            let sub_rows = match get_sub_rows.and_then(|f| f(row)) {
                Some(children) if !children.is_empty() => {
                    prepare_level(&children, get_sub_rows, Some(&id), depth + 1)
                }
                _ => Vec::new(),
            };
            PreparedRow {
                id,
                index,
                depth,
                original: row.clone(),
                sub_rows,
            }
        })
        .collect()
}

/// Stable-sorts rows (and their sub-rows) by the active sort.
///
/// Rows with equal values keep their relative order.
pub fn sort_rows(rows: &mut [PreparedRow], columns: &[Column], sort_by: &[SortSpec]) {
    let Some(spec) = sort_by.first() else {
        return;
    };
    let Some(column) = columns.iter().find(|c| c.id == spec.id) else {
        log::debug!("sort column '{}' not found, keeping input order", spec.id);
        return;
    };
    sort_level(rows, column, spec.desc);
}

fn sort_level(rows: &mut [PreparedRow], column: &Column, desc: bool) {
    rows.sort_by(|a, b| {
        let ord = column.value(&a.original).compare(&column.value(&b.original));
        if desc { ord.reverse() } else { ord }
    });
    for row in rows.iter_mut() {
        sort_level(&mut row.sub_rows, column, desc);
    }
}

/// Slice of top-level rows on the current page.
pub fn page_range(row_count: usize, page_index: usize, page_size: usize, manual: bool) -> Range<usize> {
    if manual {
        return 0..row_count;
    }
    let start = page_index.saturating_mul(page_size).min(row_count);
    let end = start.saturating_add(page_size).min(row_count);
    start..end
}

/// Flattens page rows, inserting the sub-rows of expanded rows after their parent.
pub fn expand_rows<'a>(page: &'a [PreparedRow], expanded: &BTreeSet<RowId>) -> Vec<VisibleRow<'a>> {
    let mut visible = Vec::with_capacity(page.len());
    for row in page {
        push_visible(row, expanded, &mut visible);
    }
    visible
}

fn push_visible<'a>(row: &'a PreparedRow, expanded: &BTreeSet<RowId>, out: &mut Vec<VisibleRow<'a>>) {
    let is_expanded = row.can_expand() && expanded.contains(&row.id);
    out.push(VisibleRow { row, is_expanded });
    if is_expanded {
        for sub in &row.sub_rows {
            push_visible(sub, expanded, out);
        }
    }
}

/// Row-major body: one row per visible record, cells in column order.
pub fn project_vertical(columns: &[&Column], visible: &[VisibleRow<'_>]) -> Vec<DisplayRow> {
    visible
        .iter()
        .map(|v| DisplayRow {
            key: v.row.id.clone(),
            depth: v.row.depth,
            can_expand: v.row.can_expand(),
            is_expanded: v.is_expanded,
            cells: columns
                .iter()
                .map(|column| DisplayCell {
                    column_id: column.id.clone(),
                    row_id: v.row.id.clone(),
                    text: column.display(&v.row.original),
                    is_numeric: column.is_numeric,
                })
                .collect(),
        })
        .collect()
}

/// Column-major body: one row per column in declaration order, one cell per
/// page row. Sub-rows are not shown.
pub fn project_horizontal(columns: &[Column], page: &[PreparedRow]) -> Vec<DisplayRow> {
    columns
        .iter()
        .map(|column| DisplayRow {
            key: column.id.clone(),
            depth: 0,
            can_expand: false,
            is_expanded: false,
            cells: page
                .iter()
                .map(|row| DisplayCell {
                    column_id: column.id.clone(),
                    row_id: row.id.clone(),
                    text: column.display(&row.original),
                    is_numeric: column.is_numeric,
                })
                .collect(),
        })
        .collect()
}

/// The result of projecting data through one resolved state.
#[derive(Debug, Clone)]
pub struct Projection {
    /// The resolved state this projection was computed with.
    pub state: TableState,
    /// All top-level rows in display order.
    pub rows: Vec<PreparedRow>,
    /// Number of pages.
    pub page_count: usize,
    page: Range<usize>,
}

impl Projection {
    /// Sorts, resolves and paginates `data` for the tracked `state`.
    pub fn new(data: &[Row], columns: &[Column], options: &TableOptions, state: &TableState) -> Self {
        let mut rows = prepare_rows(data, options.get_sub_rows.as_ref());
        if !options.manual_sort_by {
            sort_rows(&mut rows, columns, &state.sort_by);
        }

        let page_count = page_count(
            rows.len(),
            state.page_size,
            options.page_count,
            options.manual_pagination,
        );
        let state = state.resolve(options.page_control(), page_count);
        let page = page_range(
            rows.len(),
            state.page_index,
            state.page_size,
            options.manual_pagination,
        );

        Self {
            state,
            rows,
            page_count,
            page,
        }
    }

    /// Top-level rows on the current page.
    pub fn page_rows(&self) -> &[PreparedRow] {
        &self.rows[self.page.clone()]
    }

    /// Page rows with expanded sub-rows inserted.
    pub fn visible_rows(&self) -> Vec<VisibleRow<'_>> {
        expand_rows(self.page_rows(), &self.state.expanded)
    }

    /// Body rows for the layout direction.
    pub fn body(&self, columns: &[Column], direction: ColumnDirection) -> Vec<DisplayRow> {
        match direction {
            ColumnDirection::Vertical => {
                let ordered = ordered_columns(columns, &self.state.column_order);
                project_vertical(&ordered, &self.visible_rows())
            }
            ColumnDirection::Horizontal => project_horizontal(columns, self.page_rows()),
        }
    }

    /// Finds a row at any depth by id.
    pub fn find(&self, id: &str) -> Option<&PreparedRow> {
        find_in(&self.rows, id)
    }
}

fn find_in<'a>(rows: &'a [PreparedRow], id: &str) -> Option<&'a PreparedRow> {
    rows.iter().find_map(|row| {
        if row.id == id {
            Some(row)
        } else {
            find_in(&row.sub_rows, id)
        }
    })
}
