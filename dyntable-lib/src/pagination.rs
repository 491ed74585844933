//! Pagination control and rows-per-page menu models.

use crate::test_id::{self, PAGINATION};

/// A numbered page button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageButton {
    /// Zero-based page index.
    pub index: usize,
    /// One-based label.
    pub label: usize,
    /// Whether this is the current page.
    pub selected: bool,
    /// Automation identifier.
    pub test_id: String,
}

/// A previous/next navigator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    /// Accessible name.
    pub aria_label: &'static str,
    /// Whether there is a page in this direction.
    pub enabled: bool,
    /// Automation identifier.
    pub test_id: String,
}

/// The page navigation control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationModel {
    /// Automation identifier of the control.
    pub test_id: String,
    /// Zero-based current page.
    pub current: usize,
    /// Numbered buttons; empty when page buttons are hidden.
    pub pages: Vec<PageButton>,
    /// Moves one page back.
    pub previous: Navigator,
    /// Moves one page forward.
    pub next: Navigator,
}

impl PaginationModel {
    /// Builds the control for `page_count` pages.
    pub fn new(current: usize, page_count: usize, show_pages: bool) -> Self {
        let pages = if show_pages {
            (0..page_count)
                .map(|index| PageButton {
                    index,
                    label: index + 1,
                    selected: index == current,
                    test_id: test_id::page_button(index, index == current),
                })
                .collect()
        } else {
            Vec::new()
        };

        Self {
            test_id: PAGINATION.to_string(),
            current,
            pages,
            previous: Navigator {
                aria_label: "previous",
                enabled: current > 0,
                test_id: test_id::left_navigator(),
            },
            next: Navigator {
                aria_label: "next",
                enabled: current < page_count.saturating_sub(1),
                test_id: test_id::right_navigator(),
            },
        }
    }

    /// The selected page button, if page buttons are shown.
    pub fn current_button(&self) -> Option<&PageButton> {
        self.pages.iter().find(|p| p.selected)
    }
}

/// An option in the rows-per-page menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    /// Page size this item selects.
    pub value: usize,
    /// Display text, such as `10 rows`.
    pub label: String,
    /// Whether this is the current page size.
    pub selected: bool,
    /// Automation identifier.
    pub test_id: String,
}

/// The rows-per-page selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowsPerPageMenu {
    /// Automation identifier of the menu button.
    pub test_id: String,
    /// Current page size.
    pub selected: usize,
    /// Selectable sizes in the configured order.
    pub items: Vec<MenuItem>,
}

impl RowsPerPageMenu {
    /// Builds the menu for the given sizes with `selected` marked.
    pub fn new(id: String, sizes: &[usize], selected: usize) -> Self {
        let items = sizes
            .iter()
            .enumerate()
            .map(|(i, &value)| MenuItem {
                value,
                label: format!("{} rows", value),
                selected: value == selected,
                test_id: test_id::menu_item(&id, i),
            })
            .collect();
        Self {
            test_id: id,
            selected,
            items,
        }
    }

    /// The label shown on the closed menu button.
    pub fn button_label(&self) -> String {
        format!("{} rows", self.selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_page_has_distinct_id() {
        let model = PaginationModel::new(1, 3, true);
        let ids: Vec<&str> = model.pages.iter().map(|p| p.test_id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["pagination--page-0", "pagination--current-page-1", "pagination--page-2"]
        );
        assert_eq!(model.current_button().map(|p| p.label), Some(2));
    }

    #[test]
    fn test_navigators_disabled_at_ends() {
        let first = PaginationModel::new(0, 3, true);
        assert!(!first.previous.enabled);
        assert!(first.next.enabled);
        let last = PaginationModel::new(2, 3, true);
        assert!(last.previous.enabled);
        assert!(!last.next.enabled);
    }

    #[test]
    fn test_page_past_the_end_disables_next() {
        let model = PaginationModel::new(usize::MAX, 3, true);
        assert!(model.previous.enabled);
        assert!(!model.next.enabled);
        assert!(model.current_button().is_none());
    }

    #[test]
    fn test_hidden_pages_keep_navigators() {
        let model = PaginationModel::new(0, 3, false);
        assert!(model.pages.is_empty());
        assert_eq!(model.next.test_id, "pagination--right-navigator");
    }

    #[test]
    fn test_rows_per_page_menu() {
        let menu = RowsPerPageMenu::new("t--rows-per-page-selector".into(), &[3, 5], 3);
        assert_eq!(menu.button_label(), "3 rows");
        assert!(menu.items[0].selected);
        assert_eq!(menu.items[1].label, "5 rows");
        assert_eq!(menu.items[1].test_id, "t--rows-per-page-selector--item-1");
    }
}
