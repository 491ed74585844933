//! Integration tests for uncontrolled pagination.

use std::sync::{Arc, Mutex};

use dyntable_lib::column::ColumnSpec;
use dyntable_lib::model::Row;
use dyntable_lib::options::TableOptions;
use dyntable_lib::table::DynamicTable;
use rstest::rstest;

fn clients(names: &[&str]) -> Vec<Row> {
    names.iter().map(|n| Row::new().set("clientName", *n)).collect()
}

fn seven_clients() -> Vec<Row> {
    clients(&[
        "Client 3", "Client 1", "Client 2", "Client 4", "Client 5", "Client 6", "Client 7",
    ])
}

fn options() -> TableOptions {
    TableOptions::new(vec![
        ColumnSpec::field("clientName").header("Client Name").sortable(),
    ])
}

fn names(table: &DynamicTable) -> Vec<String> {
    table.view().body_texts().into_iter().flatten().collect()
}

#[test]
fn test_seven_clients_three_per_page() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let seen = calls.clone();
    let options = options()
        .with_rows_per_page(3)
        .with_on_page_set(move |page| seen.lock().unwrap().push(page));
    let mut table = DynamicTable::new(options, seven_clients());

    assert_eq!(table.page_count(), 3);
    assert_eq!(names(&table), ["Client 3", "Client 1", "Client 2"]);

    assert!(table.goto_page_label(2));
    assert_eq!(*calls.lock().unwrap(), vec![1]);
    assert_eq!(table.page_index(), 1);
    assert_eq!(names(&table), ["Client 4", "Client 5", "Client 6"]);

    assert!(table.goto_page(2));
    assert_eq!(names(&table), ["Client 7"]);
}

#[rstest]
#[case(1, 7)]
#[case(2, 4)]
#[case(3, 3)]
#[case(7, 1)]
#[case(10, 1)]
fn test_pages_partition_sorted_rows(#[case] page_size: usize, #[case] expected_pages: usize) {
    let mut table = DynamicTable::new(options().with_rows_per_page(page_size), seven_clients());
    table.toggle_sort("clientName");
    assert_eq!(table.page_count(), expected_pages);

    let mut all = Vec::new();
    for page in 0..table.page_count() {
        assert!(table.goto_page(page));
        all.extend(names(&table));
    }
    let expected: Vec<String> = (1..=7).map(|i| format!("Client {}", i)).collect();
    assert_eq!(all, expected);
}

#[test]
fn test_default_page_size_is_ten() {
    let data: Vec<Row> = (0..25).map(|i| Row::new().set("clientName", i)).collect();
    let table = DynamicTable::new(options(), data);
    assert_eq!(table.state().page_size, 10);
    assert_eq!(table.page_count(), 3);
}

#[test]
fn test_out_of_range_navigation_is_ignored() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let seen = calls.clone();
    let options = options()
        .with_rows_per_page(3)
        .with_on_page_set(move |page| seen.lock().unwrap().push(page));
    let mut table = DynamicTable::new(options, seven_clients());

    assert!(!table.goto_page(3));
    assert!(!table.goto_page_label(0));
    assert!(!table.previous_page());
    assert_eq!(table.page_index(), 0);
    assert!(calls.lock().unwrap().is_empty());

    assert!(table.next_page());
    assert!(table.next_page());
    assert!(!table.next_page());
    assert_eq!(table.page_index(), 2);
    assert_eq!(*calls.lock().unwrap(), vec![1, 2]);
}

#[test]
fn test_data_change_resets_page() {
    let mut table = DynamicTable::new(options().with_rows_per_page(3), seven_clients());
    table.goto_page(2);
    table.set_data(seven_clients());
    assert_eq!(table.page_index(), 0);
}

#[test]
fn test_data_change_keeps_page_without_auto_reset() {
    let mut table = DynamicTable::new(
        options().with_rows_per_page(3).with_auto_reset_page(false),
        seven_clients(),
    );
    table.goto_page(2);
    table.set_data(seven_clients());
    assert_eq!(table.page_index(), 2);
}

#[test]
fn test_shrinking_data_clamps_page() {
    let mut table = DynamicTable::new(
        options().with_rows_per_page(3).with_auto_reset_page(false),
        seven_clients(),
    );
    table.goto_page(2);
    table.set_data(clients(&["Client 1", "Client 2"]));
    assert_eq!(table.page_index(), 0);
    assert_eq!(names(&table), ["Client 1", "Client 2"]);
}

#[test]
fn test_rows_per_page_keeps_top_row_visible() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let seen = calls.clone();
    let options = options()
        .with_rows_per_page(2)
        .with_rows_per_page_select(vec![2, 5])
        .with_on_rows_per_page_set(move |size| seen.lock().unwrap().push(size));
    let mut table = DynamicTable::new(options, seven_clients());
    table.goto_page(3);
    assert_eq!(names(&table), ["Client 7"]);

    assert!(table.select_rows_per_page(5));
    assert_eq!(*calls.lock().unwrap(), vec![5]);
    assert_eq!(table.page_index(), 1);
    assert_eq!(names(&table), ["Client 6", "Client 7"]);

    let view = table.view();
    let menu = view.pagination.unwrap().rows_per_page.unwrap();
    assert_eq!(menu.selected, 5);
    assert_eq!(menu.items[1].label, "5 rows");
    assert!(menu.items[1].selected);
}

#[test]
fn test_pagination_bar_only_with_several_pages() {
    let single = DynamicTable::new(options().with_rows_per_page(10), seven_clients());
    assert!(single.view().pagination.is_none());

    let paged = DynamicTable::new(options().with_rows_per_page(3), seven_clients());
    let bar = paged.view().pagination.unwrap().pagination;
    assert_eq!(bar.pages.len(), 3);
    assert!(bar.pages[0].selected);
    assert!(!bar.previous.enabled);
    assert!(bar.next.enabled);
}

#[test]
fn test_hidden_page_buttons_keep_navigators() {
    let table = DynamicTable::new(
        options().with_rows_per_page(3).with_show_pages(false),
        seven_clients(),
    );
    let bar = table.view().pagination.unwrap().pagination;
    assert!(bar.pages.is_empty());
    assert!(bar.next.enabled);
}
