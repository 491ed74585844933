//! Automation identifiers.
//!
//! Every interactive element carries an identifier derived from the table's
//! `test_id` prefix. Consumers look elements up by these strings, so the
//! formats here are part of the public contract.

/// Test id of the pagination control. Not prefixed.
pub const PAGINATION: &str = "pagination";

/// Builds identifiers from a table prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestIds {
    prefix: String,
}

impl TestIds {
    /// Creates identifiers for the given prefix.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Appends a suffix to the prefix.
    pub fn with_suffix(&self, suffix: &str) -> String {
        format!("{}{}", self.prefix, suffix)
    }

    /// The table root.
    pub fn table(&self) -> String {
        self.prefix.clone()
    }

    /// The header row.
    pub fn head(&self) -> String {
        self.with_suffix("--head")
    }

    /// A header cell, by display position.
    pub fn head_cell(&self, index: usize) -> String {
        self.with_suffix(&format!("--head--cell-{}", index))
    }

    /// The sort indicator of a sortable header.
    pub fn sorting(&self) -> String {
        self.with_suffix("--head--sorting")
    }

    /// The ascending sort icon.
    pub fn sorting_icon_asc(&self) -> String {
        self.with_suffix("--head--sorting-icon--asc")
    }

    /// The descending sort icon.
    pub fn sorting_icon_desc(&self) -> String {
        self.with_suffix("--head--sorting-icon--desc")
    }

    /// A header tooltip, by display position.
    pub fn tooltip(&self, index: usize) -> String {
        self.with_suffix(&format!("--head--tooltip-{}", index))
    }

    /// The icon that opens a header tooltip.
    pub fn tooltip_icon(&self, index: usize) -> String {
        self.with_suffix(&format!("--head--tooltip-icon-{}", index))
    }

    /// The table body.
    pub fn body(&self) -> String {
        self.with_suffix("--body")
    }

    /// A body cell, by position within its row.
    pub fn body_cell(&self, index: usize) -> String {
        self.with_suffix(&format!("--body--cell-{}", index))
    }

    /// The totals footer.
    pub fn footer(&self) -> String {
        self.with_suffix("--footer")
    }

    /// A footer cell, by display position.
    pub fn footer_cell(&self, index: usize) -> String {
        self.with_suffix(&format!("--footer--cell-{}", index))
    }

    /// The placeholder shown when there are no rows.
    pub fn empty_body(&self) -> String {
        self.with_suffix("--empty-body")
    }

    /// The loading overlay.
    pub fn loading(&self) -> String {
        self.with_suffix("--loading")
    }

    /// The rows-per-page menu button.
    pub fn rows_per_page_selector(&self) -> String {
        self.with_suffix("--rows-per-page-selector")
    }
}

/// Drag handle id for a column. Not prefixed by the table id.
pub fn drag_icon(column_id: &str) -> String {
    format!("--head--drag-icon-{}", column_id)
}

/// Id of a page button, by zero-based index.
pub fn page_button(index: usize, selected: bool) -> String {
    if selected {
        format!("{}--current-page-{}", PAGINATION, index)
    } else {
        format!("{}--page-{}", PAGINATION, index)
    }
}

/// The previous-page navigator.
pub fn left_navigator() -> String {
    format!("{}--left-navigator", PAGINATION)
}

/// The next-page navigator.
pub fn right_navigator() -> String {
    format!("{}--right-navigator", PAGINATION)
}

/// Id of an item in a menu with the given id.
pub fn menu_item(menu: &str, index: usize) -> String {
    format!("{}--item-{}", menu, index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixed_ids() {
        let ids = TestIds::new("dynamic-table");
        assert_eq!(ids.table(), "dynamic-table");
        assert_eq!(ids.head_cell(1), "dynamic-table--head--cell-1");
        assert_eq!(ids.sorting_icon_desc(), "dynamic-table--head--sorting-icon--desc");
        assert_eq!(ids.rows_per_page_selector(), "dynamic-table--rows-per-page-selector");
    }

    #[test]
    fn test_unprefixed_ids() {
        assert_eq!(drag_icon("desc"), "--head--drag-icon-desc");
        assert_eq!(page_button(1, false), "pagination--page-1");
        assert_eq!(page_button(0, true), "pagination--current-page-0");
        assert_eq!(menu_item("t--rows-per-page-selector", 1), "t--rows-per-page-selector--item-1");
    }
}
