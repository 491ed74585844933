//! Integration tests for automation identifiers and section visibility.

use dyntable_lib::column::ColumnSpec;
use dyntable_lib::model::Row;
use dyntable_lib::options::{ColumnDirection, TableOptions, Variant};
use dyntable_lib::table::DynamicTable;
use rstest::rstest;

fn options() -> TableOptions {
    TableOptions::new(vec![
        ColumnSpec::field("clientName")
            .header("Client Name")
            .sortable()
            .tooltip("Legal name"),
        ColumnSpec::field("currentBalance")
            .header("Current Balance")
            .numeric()
            .show_total(),
    ])
    .with_test_id("clients")
    .with_rows_per_page(2)
    .with_rows_per_page_select(vec![2, 10])
}

fn data() -> Vec<Row> {
    (1..=3)
        .map(|i| {
            Row::new()
                .set("clientName", format!("Client {}", i))
                .set("currentBalance", i)
        })
        .collect()
}

#[rstest]
#[case("clients")]
#[case("clients--head")]
#[case("clients--head--cell-0")]
#[case("clients--head--cell-1")]
#[case("clients--head--sorting")]
#[case("clients--head--sorting-icon--asc")]
#[case("clients--head--sorting-icon--desc")]
#[case("clients--head--tooltip-0")]
#[case("clients--head--tooltip-icon-0")]
#[case("--head--drag-icon-clientName")]
#[case("clients--body")]
#[case("clients--body--cell-1")]
#[case("clients--footer")]
#[case("clients--footer--cell-1")]
#[case("clients--rows-per-page-selector")]
#[case("clients--rows-per-page-selector--item-1")]
#[case("pagination")]
#[case("pagination--left-navigator")]
#[case("pagination--right-navigator")]
#[case("pagination--current-page-0")]
#[case("pagination--page-1")]
fn test_view_exposes_identifier(#[case] id: &str) {
    let table = DynamicTable::new(options(), data());
    assert!(table.view().has_test_id(id), "missing {}", id);
}

#[test]
fn test_current_page_identifier_follows_navigation() {
    let mut table = DynamicTable::new(options(), data());
    table.goto_page(1);
    let view = table.view();
    assert!(view.has_test_id("pagination--page-0"));
    assert!(view.has_test_id("pagination--current-page-1"));
    assert!(!view.has_test_id("pagination--current-page-0"));
}

#[test]
fn test_default_prefix_is_table() {
    let table = DynamicTable::new(TableOptions::new(vec![ColumnSpec::field("a").header("A")]), data());
    let view = table.view();
    assert_eq!(view.test_id, "table");
    assert!(view.has_test_id("table--head--cell-0"));
}

#[test]
fn test_loading_overlay() {
    let mut table = DynamicTable::new(options().with_loading(true), data());
    assert!(table.view().has_test_id("clients--loading"));
    table.set_loading(false);
    assert!(!table.view().has_test_id("clients--loading"));
}

#[test]
fn test_empty_view_renders_under_header() {
    let table = DynamicTable::new(options().with_empty_view("No clients"), Vec::new());
    let view = table.view();
    assert!(view.head.is_some());
    assert!(view.body.is_none());
    assert_eq!(view.empty.unwrap().content, "No clients");
}

#[test]
fn test_zero_rows_without_empty_view_renders_nothing() {
    let table = DynamicTable::new(options(), Vec::new());
    assert!(!table.view().is_rendered());
}

#[test]
fn test_zero_columns_renders_nothing() {
    let table = DynamicTable::new(TableOptions::new(Vec::new()).with_empty_view("none"), data());
    let view = table.view();
    assert!(!view.is_rendered());
    assert!(view.pagination.is_none());
}

#[test]
fn test_header_hidden_without_header_text() {
    let table = DynamicTable::new(TableOptions::new(vec![ColumnSpec::field("clientName")]), data());
    let view = table.view();
    assert!(view.head.is_none());
    assert_eq!(view.body_texts().len(), 3);
}

#[test]
fn test_horizontal_layout_uses_row_positions() {
    let table = DynamicTable::new(
        options().with_column_direction(ColumnDirection::Horizontal),
        data(),
    );
    let view = table.view();
    let body = view.body.as_ref().unwrap();
    assert_eq!(body.rows.len(), 2);
    assert_eq!(body.rows[0].key, "clientName");
    assert_eq!(body.rows[0].cells[1].test_id, "clients--body--cell-1");
    assert_eq!(view.body_texts()[0], ["Client 1", "Client 2"]);
}

#[test]
fn test_variant_flags() {
    let table = DynamicTable::new(
        options().with_variant(vec![Variant::Condensed, Variant::Highlighted]),
        data(),
    );
    let variant = table.view().variant;
    assert!(variant.bordered);
    assert!(variant.condensed);
    assert!(variant.highlighted);

    let default = DynamicTable::new(options(), data()).view().variant;
    assert!(!default.bordered);
}
