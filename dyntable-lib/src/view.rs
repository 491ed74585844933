//! The render model handed to a presentation layer.
//!
//! A [`TableView`] describes exactly what to paint for one update: which
//! sections exist, the text of every cell and the automation identifier of
//! every interactive element. It holds no references into the table.

use std::time::Instant;

use crate::column::{Column, ordered_columns};
use crate::options::{ColumnDirection, TableOptions, Variant};
use crate::pagination::{PaginationModel, RowsPerPageMenu};
use crate::project::{DisplayRow, Projection};
use crate::reorder::DragState;
use crate::test_id::{self, TestIds};
use crate::total::{DecimalOps, TOTAL_LABEL, page_totals};

/// One direction icon of a sort indicator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortIcon {
    /// Accessible name.
    pub aria_label: &'static str,
    /// Whether the column is sorted in this direction.
    pub active: bool,
    /// Automation identifier.
    pub test_id: String,
}

/// Sort direction icons on a sortable header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortIndicator {
    /// Automation identifier of the indicator.
    pub test_id: String,
    /// Ascending icon.
    pub asc: SortIcon,
    /// Descending icon.
    pub desc: SortIcon,
}

/// A header tooltip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tooltip {
    /// Tooltip content.
    pub text: String,
    /// Automation identifier of the tooltip.
    pub test_id: String,
    /// Automation identifier of the icon that opens it.
    pub icon_test_id: String,
}

/// One header cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    /// Id of the column this header belongs to.
    pub column_id: String,
    /// Header text.
    pub header: String,
    /// Right-align the header.
    pub is_numeric: bool,
    /// Automation identifier, by display position.
    pub test_id: String,
    /// Automation identifier of the drag handle.
    pub drag_handle_test_id: String,
    pub tooltip: Option<Tooltip>,
    /// Present only for sortable columns.
    pub sort: Option<SortIndicator>,
    /// This column is being dragged.
    pub is_dragging: bool,
    /// A drag hovered this column within the debounce window.
    pub is_drop_target: bool,
}

/// The header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadView {
    /// Automation identifier of the header row.
    pub test_id: String,
    /// Header cells in display order.
    pub cells: Vec<HeaderCell>,
}

/// Expand affordance on the first cell of an expandable row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expander {
    /// Sub-rows hidden.
    Collapsed,
    /// Sub-rows shown below the row.
    Expanded,
}

/// One body cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyCell {
    /// Display text.
    pub text: String,
    /// Right-align the cell.
    pub is_numeric: bool,
    /// Automation identifier, by position within the row.
    ///
    /// In horizontal layout the position is the record's position on the
    /// page, so every cell of a column row has its own id rather than all
    /// sharing `--body--cell-0`.
    pub test_id: String,
}

/// One body row: a record in vertical layout, a column in horizontal layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyRow {
    /// Row id (vertical) or column id (horizontal).
    pub key: String,
    /// Nesting depth, zero for top-level rows.
    pub depth: usize,
    /// Expand affordance, present only on rows with sub-rows.
    pub expander: Option<Expander>,
    /// Cells in display order.
    pub cells: Vec<BodyCell>,
}

/// The table body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyView {
    /// Automation identifier of the body.
    pub test_id: String,
    /// Rows in display order, sub-rows after their parent.
    pub rows: Vec<BodyRow>,
}

/// One footer cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterCell {
    /// The `Total` label in the first cell, a page total or empty text elsewhere.
    pub text: String,
    /// Right-align the cell.
    pub is_numeric: bool,
    /// Automation identifier, by display position.
    pub test_id: String,
}

/// The totals footer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterView {
    /// Automation identifier of the footer.
    pub test_id: String,
    /// Cells in display order.
    pub cells: Vec<FooterCell>,
}

/// Placeholder shown instead of the body when there are no rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyView {
    /// Automation identifier of the placeholder.
    pub test_id: String,
    /// Placeholder content.
    pub content: String,
}

/// Page navigation and the optional rows-per-page menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationBar {
    /// Page buttons and navigators.
    pub pagination: PaginationModel,
    /// Rows-per-page menu, when sizes are configured.
    pub rows_per_page: Option<RowsPerPageMenu>,
}

/// Cosmetic flags resolved from the variant list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VariantFlags {
    /// Draw an outer border.
    pub bordered: bool,
    /// Reduce cell padding.
    pub condensed: bool,
    /// Highlight rows on hover.
    pub highlighted: bool,
}

impl VariantFlags {
    fn from_options(options: &TableOptions) -> Self {
        Self {
            bordered: !options.has_variant(Variant::Borderless),
            condensed: options.has_variant(Variant::Condensed),
            highlighted: options.has_variant(Variant::Highlighted),
        }
    }
}

/// Everything to render for one update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    /// Automation identifier of the table.
    pub test_id: String,
    /// Accessible name.
    pub label: Option<String>,
    /// Layout direction of the body.
    pub direction: ColumnDirection,
    /// Cosmetic flags.
    pub variant: VariantFlags,
    /// Test id of the loading overlay while loading.
    pub loading: Option<String>,
    /// Header row, if shown.
    pub head: Option<HeadView>,
    /// Body, absent when the page has no rows.
    pub body: Option<BodyView>,
    /// Totals footer, if shown.
    pub footer: Option<FooterView>,
    /// Empty placeholder, if shown.
    pub empty: Option<EmptyView>,
    /// Pagination bar, shown with more than one page.
    pub pagination: Option<PaginationBar>,
}

/// Inputs for building a [`TableView`].
pub struct ViewContext<'a, D: DecimalOps> {
    /// Current options.
    pub options: &'a TableOptions,
    /// Normalized columns in declaration order.
    pub columns: &'a [Column],
    /// Projection for this update.
    pub projection: &'a Projection,
    /// Drag gesture state.
    pub drag: &'a DragState,
    /// Decimal arithmetic for totals.
    pub decimal: &'a D,
    /// Time used for the drop-target highlight.
    pub now: Instant,
}

impl TableView {
    /// Builds the view for one projection.
    pub fn build<D: DecimalOps>(cx: ViewContext<'_, D>) -> Self {
        let options = cx.options;
        let ids = TestIds::new(options.test_id.clone());
        let mut view = TableView {
            test_id: ids.table(),
            label: options.label.clone(),
            direction: options.column_direction,
            variant: VariantFlags::from_options(options),
            loading: options.is_loading.then(|| ids.loading()),
            head: None,
            body: None,
            footer: None,
            empty: None,
            pagination: None,
        };

        if cx.columns.is_empty() {
            return view;
        }

        let projection = cx.projection;
        let page_rows = projection.page_rows();
        let rows_exist = !page_rows.is_empty();
        let columns: Vec<&Column> = match options.column_direction {
            ColumnDirection::Vertical => ordered_columns(cx.columns, &projection.state.column_order),
            ColumnDirection::Horizontal => cx.columns.iter().collect(),
        };

        let has_header = cx.columns.iter().any(|c| !c.header.is_empty());
        if has_header && (rows_exist || options.empty_view.is_some()) {
            view.head = Some(build_head(&ids, &columns, &cx));
        }

        if rows_exist {
            let body = projection.body(cx.columns, options.column_direction);
            view.body = Some(build_body(&ids, body));
        } else if let Some(content) = &options.empty_view {
            view.empty = Some(EmptyView {
                test_id: ids.empty_body(),
                content: content.clone(),
            });
        }

        if rows_exist && cx.columns.iter().any(|c| c.show_total) {
            let totals = page_totals(cx.decimal, &columns, page_rows);
            view.footer = Some(FooterView {
                test_id: ids.footer(),
                cells: columns
                    .iter()
                    .zip(totals)
                    .enumerate()
                    .map(|(i, (column, total))| FooterCell {
                        text: if i == 0 {
                            TOTAL_LABEL.to_string()
                        } else {
                            total.unwrap_or_default()
                        },
                        is_numeric: column.is_numeric,
                        test_id: ids.footer_cell(i),
                    })
                    .collect(),
            });
        }

        if projection.page_count > 1 {
            view.pagination = Some(PaginationBar {
                pagination: PaginationModel::new(
                    projection.state.page_index,
                    projection.page_count,
                    options.show_pages,
                ),
                rows_per_page: options.rows_per_page_select.as_ref().map(|sizes| {
                    RowsPerPageMenu::new(ids.rows_per_page_selector(), sizes, projection.state.page_size)
                }),
            });
        }

        view
    }

    /// Returns `true` if anything besides the loading overlay is rendered.
    pub fn is_rendered(&self) -> bool {
        self.head.is_some() || self.body.is_some() || self.empty.is_some()
    }

    /// Header texts in display order.
    pub fn header_texts(&self) -> Vec<String> {
        self.head
            .as_ref()
            .map(|head| head.cells.iter().map(|c| c.header.clone()).collect())
            .unwrap_or_default()
    }

    /// Body cell texts, one inner vector per body row.
    pub fn body_texts(&self) -> Vec<Vec<String>> {
        self.body
            .as_ref()
            .map(|body| {
                body.rows
                    .iter()
                    .map(|row| row.cells.iter().map(|c| c.text.clone()).collect())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Footer cell texts.
    pub fn footer_texts(&self) -> Vec<String> {
        self.footer
            .as_ref()
            .map(|footer| footer.cells.iter().map(|c| c.text.clone()).collect())
            .unwrap_or_default()
    }

    /// Every automation identifier present in the view.
    pub fn test_ids(&self) -> Vec<String> {
        let mut ids = vec![self.test_id.clone()];
        ids.extend(self.loading.clone());
        if let Some(head) = &self.head {
            ids.push(head.test_id.clone());
            for cell in &head.cells {
                ids.push(cell.test_id.clone());
                ids.push(cell.drag_handle_test_id.clone());
                if let Some(tooltip) = &cell.tooltip {
                    ids.push(tooltip.test_id.clone());
                    ids.push(tooltip.icon_test_id.clone());
                }
                if let Some(sort) = &cell.sort {
                    ids.push(sort.test_id.clone());
                    ids.push(sort.asc.test_id.clone());
                    ids.push(sort.desc.test_id.clone());
                }
            }
        }
        if let Some(body) = &self.body {
            ids.push(body.test_id.clone());
            ids.extend(body.rows.iter().flat_map(|r| r.cells.iter().map(|c| c.test_id.clone())));
        }
        if let Some(footer) = &self.footer {
            ids.push(footer.test_id.clone());
            ids.extend(footer.cells.iter().map(|c| c.test_id.clone()));
        }
        if let Some(empty) = &self.empty {
            ids.push(empty.test_id.clone());
        }
        if let Some(bar) = &self.pagination {
            let p = &bar.pagination;
            ids.push(p.test_id.clone());
            ids.push(p.previous.test_id.clone());
            ids.extend(p.pages.iter().map(|b| b.test_id.clone()));
            ids.push(p.next.test_id.clone());
            if let Some(menu) = &bar.rows_per_page {
                ids.push(menu.test_id.clone());
                ids.extend(menu.items.iter().map(|i| i.test_id.clone()));
            }
        }
        ids
    }

    /// Returns `true` if an element with this identifier is present.
    pub fn has_test_id(&self, id: &str) -> bool {
        self.test_ids().iter().any(|t| t == id)
    }
}

fn build_head<D: DecimalOps>(ids: &TestIds, columns: &[&Column], cx: &ViewContext<'_, D>) -> HeadView {
    let sort = cx.projection.state.sort();
    HeadView {
        test_id: ids.head(),
        cells: columns
            .iter()
            .enumerate()
            .map(|(i, column)| {
                let sorted_desc = sort.filter(|s| s.id == column.id).map(|s| s.desc);
                HeaderCell {
                    column_id: column.id.clone(),
                    header: column.header.clone(),
                    is_numeric: column.is_numeric && cx.options.column_direction == ColumnDirection::Vertical,
                    test_id: ids.head_cell(i),
                    drag_handle_test_id: test_id::drag_icon(&column.id),
                    tooltip: column.tooltip.as_ref().map(|text| Tooltip {
                        text: text.clone(),
                        test_id: ids.tooltip(i),
                        icon_test_id: ids.tooltip_icon(i),
                    }),
                    sort: column.can_sort.then(|| SortIndicator {
                        test_id: ids.sorting(),
                        asc: SortIcon {
                            aria_label: "sorted ascending",
                            active: sorted_desc == Some(false),
                            test_id: ids.sorting_icon_asc(),
                        },
                        desc: SortIcon {
                            aria_label: "sorted descending",
                            active: sorted_desc == Some(true),
                            test_id: ids.sorting_icon_desc(),
                        },
                    }),
                    is_dragging: cx.drag.is_dragging(&column.id),
                    is_drop_target: cx.drag.is_drop_target(&column.id, cx.now),
                }
            })
            .collect(),
    }
}

fn build_body(ids: &TestIds, rows: Vec<DisplayRow>) -> BodyView {
    BodyView {
        test_id: ids.body(),
        rows: rows
            .into_iter()
            .map(|row| BodyRow {
                expander: row.can_expand.then_some(if row.is_expanded {
                    Expander::Expanded
                } else {
                    Expander::Collapsed
                }),
                key: row.key,
                depth: row.depth,
                cells: row
                    .cells
                    .into_iter()
                    .enumerate()
                    .map(|(i, cell)| BodyCell {
                        text: cell.text,
                        is_numeric: cell.is_numeric,
                        test_id: ids.body_cell(i),
                    })
                    .collect(),
            })
            .collect(),
    }
}
