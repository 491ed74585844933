//! The table component.

use std::time::Instant;

use crate::column::{Column, ordered_columns, normalize_columns};
use crate::model::Row;
use crate::options::{ColumnDirection, TableOptions};
use crate::project::Projection;
use crate::reorder::DragState;
use crate::state::{RowId, SortSpec, TableAction, TableState};
use crate::total::{DecimalOps, RustDecimal, page_totals};
use crate::view::{TableView, ViewContext};

/// A data table with sorting, pagination, sub-rows, page totals and column
/// reordering.
///
/// The table owns its [`TableState`] and applies every interaction through
/// [`TableState::reduce`]. Change notifications configured in
/// [`TableOptions`] are invoked synchronously from the interaction methods.
///
/// While [`TableOptions::is_loading`] is set every interaction is ignored
/// and returns `false` (or `None`).
///
/// # Example
///
/// ```
/// use dyntable_lib::column::ColumnSpec;
/// use dyntable_lib::model::Row;
/// use dyntable_lib::options::TableOptions;
/// use dyntable_lib::table::DynamicTable;
///
/// let options = TableOptions::new(vec![
///     ColumnSpec::field("name").header("Name").sortable(),
/// ])
/// .with_rows_per_page(2);
/// let data = vec![
///     Row::new().set("name", "b"),
///     Row::new().set("name", "a"),
///     Row::new().set("name", "c"),
/// ];
///
/// let mut table = DynamicTable::new(options, data);
/// assert_eq!(table.page_count(), 2);
///
/// table.toggle_sort("name");
/// assert_eq!(table.view().body_texts(), vec![vec!["a"], vec!["b"]]);
/// ```
pub struct DynamicTable<D: DecimalOps = RustDecimal> {
    options: TableOptions,
    columns: Vec<Column>,
    data: Vec<Row>,
    state: TableState,
    drag: DragState,
    decimal: D,
}

impl DynamicTable<RustDecimal> {
    /// Creates a table over `data`.
    pub fn new(options: TableOptions, data: Vec<Row>) -> Self {
        Self::with_decimal_ops(options, data, RustDecimal)
    }
}

impl<D: DecimalOps> DynamicTable<D> {
    /// Creates a table that sums totals with the given decimal arithmetic.
    pub fn with_decimal_ops(options: TableOptions, data: Vec<Row>, decimal: D) -> Self {
        warn_on_misconfiguration(&options);
        let columns = normalize_columns(&options.columns);
        let state = TableState::initial(&options, &columns);
        let table = Self {
            options,
            columns,
            data,
            state,
            drag: DragState::new(),
            decimal,
        };
        table.notify_sort();
        table
    }

    /// The current options.
    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    /// Normalized columns in declaration order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// The rows as given.
    pub fn data(&self) -> &[Row] {
        &self.data
    }

    /// Replaces the rows.
    ///
    /// Expanded rows are collapsed. The page index returns to 0 unless
    /// `auto_reset_page` is off or pagination is manual.
    pub fn set_data(&mut self, data: Vec<Row>) {
        self.data = data;
        let reset = self.options.auto_reset_page && !self.options.manual_pagination;
        if reset {
            self.state = self.state.reduce(&TableAction::ResetPage);
        }
        self.state = self.state.reduce(&TableAction::ResetExpanded);
        log::debug!("data replaced with {} rows, page reset: {}", self.data.len(), reset);
    }

    /// Replaces the options, keeping the tracked state.
    ///
    /// Column order is rebuilt when the set of column ids changes.
    pub fn set_options(&mut self, options: TableOptions) {
        warn_on_misconfiguration(&options);
        self.options = options;
        self.columns = normalize_columns(&self.options.columns);
        self.reconcile_column_order();
    }

    /// Sets or clears the caller-driven page index.
    pub fn set_page(&mut self, page: Option<usize>) {
        self.options.page = page;
    }

    /// Sets the loading flag.
    pub fn set_loading(&mut self, loading: bool) {
        self.options.is_loading = loading;
        if loading {
            self.drag.cancel();
        }
    }

    /// Sorts, paginates and resolves the current state.
    pub fn projection(&self) -> Projection {
        Projection::new(&self.data, &self.columns, &self.options, &self.state)
    }

    /// The resolved state for the current update.
    pub fn state(&self) -> TableState {
        self.projection().state
    }

    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.projection().page_count
    }

    /// The active sort, if any.
    pub fn sort(&self) -> Option<&SortSpec> {
        self.state.sort()
    }

    /// Zero-based index of the displayed page.
    pub fn page_index(&self) -> usize {
        self.state().page_index
    }

    /// Advances the sort cycle of a sortable column.
    ///
    /// Returns `false` for unknown or unsortable columns.
    pub fn toggle_sort(&mut self, column_id: &str) -> bool {
        if self.is_busy() {
            return false;
        }
        if !self.columns.iter().any(|c| c.id == column_id && c.can_sort) {
            log::debug!("column '{}' is not sortable", column_id);
            return false;
        }
        self.state = self.state.reduce(&TableAction::ToggleSort {
            column_id: column_id.to_string(),
        });
        if self.options.auto_reset_page && !self.options.manual_pagination {
            self.state = self.state.reduce(&TableAction::ResetPage);
        }
        log::debug!("sort changed to {:?}", self.state.sort_by);
        self.notify_sort();
        true
    }

    /// Navigates to a zero-based page.
    ///
    /// `on_page_set` receives `index` before the state changes. Indices past
    /// the last page are ignored.
    pub fn goto_page(&mut self, index: usize) -> bool {
        if self.is_busy() {
            return false;
        }
        let page_count = self.page_count();
        if index >= page_count {
            log::debug!("page {} out of range ({} pages)", index, page_count);
            return false;
        }
        if let Some(on_page_set) = &self.options.on_page_set {
            on_page_set(index);
        }
        self.state = self.state.reduce(&TableAction::GotoPage { index, page_count });
        log::debug!("page changed to {}", index);
        true
    }

    /// Navigates to the page whose 1-based button label is `label`.
    pub fn goto_page_label(&mut self, label: usize) -> bool {
        match label.checked_sub(1) {
            Some(index) => self.goto_page(index),
            None => false,
        }
    }

    /// Moves one page forward. No-op on the last page.
    pub fn next_page(&mut self) -> bool {
        match self.page_index().checked_add(1) {
            Some(index) => self.goto_page(index),
            None => false,
        }
    }

    /// Moves one page back. No-op on the first page.
    pub fn previous_page(&mut self) -> bool {
        match self.page_index().checked_sub(1) {
            Some(index) => self.goto_page(index),
            None => false,
        }
    }

    /// Changes the page size from the rows-per-page menu.
    pub fn select_rows_per_page(&mut self, size: usize) -> bool {
        if self.is_busy() || size == 0 {
            return false;
        }
        if let Some(on_rows_per_page_set) = &self.options.on_rows_per_page_set {
            on_rows_per_page_set(size);
        }
        // Start from the displayed page so its top row stays visible.
        let resolved = self.state();
        self.state.page_index = resolved.page_index;
        self.state = self.state.reduce(&TableAction::SetPageSize(size));
        log::debug!("page size changed to {}, page {}", size, self.state.page_index);
        true
    }

    /// Shows or hides the sub-rows of a row.
    ///
    /// Returns `false` for rows without sub-rows and in horizontal layout.
    pub fn toggle_row_expanded(&mut self, row_id: &str) -> bool {
        if self.is_busy() || self.is_horizontal() {
            return false;
        }
        let expandable = self
            .projection()
            .find(row_id)
            .is_some_and(|row| row.can_expand());
        if !expandable {
            return false;
        }
        self.state = self.state.reduce(&TableAction::ToggleRowExpanded(RowId::from(row_id)));
        log::debug!(
            "row '{}' {}",
            row_id,
            if self.state.expanded.contains(row_id) { "expanded" } else { "collapsed" }
        );
        true
    }

    /// Begins dragging a header.
    pub fn start_drag(&mut self, column_id: &str) -> bool {
        if !self.accepts_drag(column_id) {
            return false;
        }
        self.drag.start(column_id);
        true
    }

    /// Reports that the drag is over a header.
    pub fn hover_column(&mut self, column_id: &str, now: Instant) -> bool {
        if !self.accepts_drag(column_id) || self.drag.dragging().is_none() {
            return false;
        }
        self.drag.hover(column_id, now);
        true
    }

    /// Drops the dragged header onto `target`, returning the new order.
    ///
    /// `on_column_order_set` receives the order before it is applied.
    pub fn drop_column(&mut self, target: &str) -> Option<Vec<String>> {
        if !self.accepts_drag(target) {
            self.drag.cancel();
            return None;
        }
        let order = self.drag.drop_on(target, &self.state.column_order)?;
        if let Some(on_column_order_set) = &self.options.on_column_order_set {
            on_column_order_set(order.clone());
        }
        self.state = self.state.reduce(&TableAction::SetColumnOrder(order.clone()));
        log::debug!("column order changed to {:?}", order);
        Some(order)
    }

    /// Abandons a drag in progress.
    pub fn cancel_drag(&mut self) {
        self.drag.cancel();
    }

    /// The header being dragged.
    pub fn dragging(&self) -> Option<&str> {
        self.drag.dragging()
    }

    /// Page totals for every column in display order; `None` where the
    /// column shows no total.
    pub fn totals(&self) -> Vec<Option<String>> {
        let projection = self.projection();
        let columns = self.display_columns(&projection.state);
        page_totals(&self.decimal, &columns, projection.page_rows())
    }

    /// Builds the render model.
    pub fn view(&self) -> TableView {
        self.view_at(Instant::now())
    }

    /// Builds the render model as of `now`, for drop-target highlighting.
    pub fn view_at(&self, now: Instant) -> TableView {
        let projection = self.projection();
        TableView::build(ViewContext {
            options: &self.options,
            columns: &self.columns,
            projection: &projection,
            drag: &self.drag,
            decimal: &self.decimal,
            now,
        })
    }

    fn display_columns(&self, state: &TableState) -> Vec<&Column> {
        match self.options.column_direction {
            ColumnDirection::Vertical => ordered_columns(&self.columns, &state.column_order),
            ColumnDirection::Horizontal => self.columns.iter().collect(),
        }
    }

    fn notify_sort(&self) {
        if let Some(on_sort) = &self.options.on_sort {
            on_sort(self.state.sort_by.clone());
        }
    }

    fn is_busy(&self) -> bool {
        if self.options.is_loading {
            log::debug!("ignoring interaction while loading");
        }
        self.options.is_loading
    }

    fn is_horizontal(&self) -> bool {
        self.options.column_direction == ColumnDirection::Horizontal
    }

    fn accepts_drag(&self, column_id: &str) -> bool {
        !self.is_busy() && !self.is_horizontal() && self.columns.iter().any(|c| c.id == column_id)
    }

    fn reconcile_column_order(&mut self) {
        let mut current: Vec<&str> = self.state.column_order.iter().map(String::as_str).collect();
        let mut ids: Vec<&str> = self.columns.iter().map(|c| c.id.as_str()).collect();
        current.sort_unstable();
        ids.sort_unstable();
        if current != ids {
            log::debug!("columns changed, resetting column order");
            self.state.column_order = TableState::initial(&self.options, &self.columns).column_order;
        }
    }
}

impl<D: DecimalOps> std::fmt::Debug for DynamicTable<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynamicTable")
            .field("options", &self.options)
            .field("rows", &self.data.len())
            .field("state", &self.state)
            .field("drag", &self.drag)
            .finish_non_exhaustive()
    }
}

fn warn_on_misconfiguration(options: &TableOptions) {
    if options.manual_pagination && options.page_count.is_none() {
        log::warn!("page_count is required when manual_pagination is true");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::ColumnSpec;
    use std::sync::{Arc, Mutex};

    fn rows(names: &[&str]) -> Vec<Row> {
        names.iter().map(|n| Row::new().set("name", *n)).collect()
    }

    fn options() -> TableOptions {
        TableOptions::new(vec![
            ColumnSpec::field("name").header("Name").sortable(),
            ColumnSpec::field("note").header("Note"),
        ])
    }

    #[test]
    fn test_on_sort_fires_at_construction() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let seen = calls.clone();
        let options = options()
            .with_default_sort_by(SortSpec::desc("name"))
            .with_on_sort(move |sort| seen.lock().unwrap().push(sort));
        let _table = DynamicTable::new(options, rows(&["a"]));
        assert_eq!(*calls.lock().unwrap(), vec![vec![SortSpec::desc("name")]]);
    }

    #[test]
    fn test_unsortable_column_is_ignored() {
        let mut table = DynamicTable::new(options(), rows(&["b", "a"]));
        assert!(!table.toggle_sort("note"));
        assert!(!table.toggle_sort("missing"));
        assert!(table.sort().is_none());
    }

    #[test]
    fn test_sort_resets_page() {
        let mut table = DynamicTable::new(options().with_rows_per_page(1), rows(&["b", "a", "c"]));
        assert!(table.goto_page(2));
        assert!(table.toggle_sort("name"));
        assert_eq!(table.page_index(), 0);
    }

    #[test]
    fn test_loading_blocks_interactions() {
        let mut table = DynamicTable::new(
            options().with_rows_per_page(1).with_loading(true),
            rows(&["b", "a"]),
        );
        assert!(!table.toggle_sort("name"));
        assert!(!table.goto_page(1));
        assert!(!table.select_rows_per_page(5));
        assert!(!table.start_drag("name"));
        assert!(table.view().loading.is_some());
        assert!(table.view().body.is_some());
    }

    #[test]
    fn test_set_options_reconciles_column_order() {
        let mut table = DynamicTable::new(options(), rows(&["a"]));
        table.start_drag("note");
        table.drop_column("name");
        assert_eq!(table.state().column_order, vec!["note", "name"]);

        table.set_options(options().with_rows_per_page(5));
        assert_eq!(table.state().column_order, vec!["note", "name"]);

        table.set_options(TableOptions::new(vec![ColumnSpec::field("other")]));
        assert_eq!(table.state().column_order, vec!["other"]);
    }

    #[test]
    fn test_horizontal_ignores_drag_and_expansion() {
        let mut table = DynamicTable::new(
            options().with_column_direction(ColumnDirection::Horizontal),
            rows(&["a"]),
        );
        assert!(!table.start_drag("name"));
        assert!(table.drop_column("note").is_none());
        assert!(!table.toggle_row_expanded("0"));
    }
}
