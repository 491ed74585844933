//! Integration tests for expandable sub-rows.

use std::collections::BTreeMap;

use dyntable_lib::column::ColumnSpec;
use dyntable_lib::model::{Row, Value};
use dyntable_lib::options::{TableConfig, TableOptions};
use dyntable_lib::table::DynamicTable;
use dyntable_lib::view::Expander;

fn child(name: &str) -> Value {
    Value::from(BTreeMap::from([("name".to_string(), Value::from(name))]))
}

fn accounts() -> Vec<Row> {
    vec![
        Row::new()
            .set("name", "Parent A")
            .set("children", vec![child("Child A1"), child("Child A2")]),
        Row::new().set("name", "Parent B"),
        Row::new().set("name", "Parent C"),
    ]
}

fn options() -> TableOptions {
    TableOptions::new(vec![ColumnSpec::field("name").header("Name").sortable()])
        .with_sub_rows(|row| row.children("children"))
}

fn names(table: &DynamicTable) -> Vec<String> {
    table.view().body_texts().into_iter().flatten().collect()
}

#[test]
fn test_toggle_shows_and_hides_children() {
    let mut table = DynamicTable::new(options(), accounts());
    assert_eq!(names(&table), ["Parent A", "Parent B", "Parent C"]);

    assert!(table.toggle_row_expanded("0"));
    assert_eq!(
        names(&table),
        ["Parent A", "Child A1", "Child A2", "Parent B", "Parent C"]
    );

    assert!(table.toggle_row_expanded("0"));
    assert_eq!(names(&table), ["Parent A", "Parent B", "Parent C"]);
}

#[test]
fn test_row_without_children_is_not_expandable() {
    let mut table = DynamicTable::new(options(), accounts());
    assert!(!table.toggle_row_expanded("1"));
    assert!(!table.toggle_row_expanded("42"));
    assert!(table.state().expanded.is_empty());
}

#[test]
fn test_sub_rows_do_not_count_toward_page_size() {
    let mut table = DynamicTable::new(options().with_rows_per_page(2), accounts());
    table.toggle_row_expanded("0");
    assert_eq!(names(&table), ["Parent A", "Child A1", "Child A2", "Parent B"]);
    assert_eq!(table.page_count(), 2);
}

#[test]
fn test_expander_and_depth_in_view() {
    let mut table = DynamicTable::new(options(), accounts());
    let view = table.view();
    let rows = &view.body.as_ref().unwrap().rows;
    assert_eq!(rows[0].expander, Some(Expander::Collapsed));
    assert_eq!(rows[1].expander, None);

    table.toggle_row_expanded("0");
    let view = table.view();
    let rows = &view.body.as_ref().unwrap().rows;
    assert_eq!(rows[0].expander, Some(Expander::Expanded));
    assert_eq!(rows[1].key, "0.0");
    assert_eq!(rows[1].depth, 1);
}

#[test]
fn test_data_change_collapses_rows() {
    let mut table = DynamicTable::new(options(), accounts());
    table.toggle_row_expanded("0");
    table.set_data(accounts());
    assert!(table.state().expanded.is_empty());
}

#[test]
fn test_sub_rows_field_from_config() {
    let config = TableConfig::from_json_str(
        r#"{
            "columns": [{ "header": "Name", "accessor": "name" }],
            "sub_rows_field": "children"
        }"#,
    )
    .unwrap();
    let mut table = DynamicTable::new(config.into_options(), accounts());
    assert!(table.toggle_row_expanded("0"));
    assert_eq!(names(&table).len(), 5);
}
