//! Plain-text rendering of a table view.

use dyntable_lib::options::ColumnDirection;
use dyntable_lib::view::{Expander, PaginationBar, TableView};
use unicode_width::UnicodeWidthStr;

const INDENT: &str = "  ";

/// Renders the view as an aligned grid followed by the pagination bar.
pub fn render(view: &TableView) -> String {
    let mut out = String::new();
    if let Some(label) = &view.label {
        out.push_str(label);
        out.push('\n');
    }
    if view.loading.is_some() {
        out.push_str("(loading)\n");
    }

    match view.direction {
        ColumnDirection::Vertical => push_vertical(&mut out, view),
        ColumnDirection::Horizontal => push_horizontal(&mut out, view),
    }
    if let Some(empty) = &view.empty {
        out.push_str(&empty.content);
        out.push('\n');
    }
    if let Some(bar) = &view.pagination {
        out.push('\n');
        out.push_str(&render_pagination(bar));
        out.push('\n');
    }
    out
}

/// One line per record under a header line, totals on the last line.
fn push_vertical(out: &mut String, view: &TableView) {
    let header = view.head.as_ref().map(|head| {
        head.cells
            .iter()
            .map(|cell| Cell::new(cell.header.clone() + &sort_marker(cell), cell.is_numeric))
            .collect::<Vec<_>>()
    });
    let body: Vec<Vec<Cell>> = view
        .body
        .iter()
        .flat_map(|body| body.rows.iter())
        .map(|row| {
            row.cells
                .iter()
                .enumerate()
                .map(|(i, cell)| {
                    let text = if i == 0 {
                        format!("{}{}{}", INDENT.repeat(row.depth), expander_marker(row.expander), cell.text)
                    } else {
                        cell.text.clone()
                    };
                    Cell::new(text, cell.is_numeric)
                })
                .collect()
        })
        .collect();
    let footer = view.footer.as_ref().map(|footer| {
        footer
            .cells
            .iter()
            .map(|cell| Cell::new(cell.text.clone(), cell.is_numeric))
            .collect::<Vec<_>>()
    });

    let widths = column_widths(header.iter().chain(body.iter()).chain(footer.iter()));
    let rule = widths
        .iter()
        .map(|w| "-".repeat(*w))
        .collect::<Vec<_>>()
        .join("-+-");
    let bordered = view.variant.bordered;

    if let Some(header) = &header {
        push_line(out, header, &widths);
        out.push_str(&rule);
        out.push('\n');
    }
    for (i, row) in body.iter().enumerate() {
        if bordered && i > 0 && !view.variant.condensed {
            out.push_str(&rule);
            out.push('\n');
        }
        push_line(out, row, &widths);
    }
    if let Some(footer) = &footer {
        out.push_str(&rule);
        out.push('\n');
        push_line(out, footer, &widths);
    }
}

/// One line per column, labelled with its header, with the column's total
/// (or the `Total` label on the first line) at the end.
fn push_horizontal(out: &mut String, view: &TableView) {
    let Some(body) = &view.body else {
        return;
    };
    let rows: Vec<Vec<Cell>> = body
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let mut cells = Vec::with_capacity(row.cells.len() + 2);
            if let Some(head) = &view.head {
                let label = head.cells.get(i).map(|c| c.header.clone()).unwrap_or_default();
                cells.push(Cell::new(label, false));
            }
            cells.extend(row.cells.iter().map(|c| Cell::new(c.text.clone(), c.is_numeric)));
            if let Some(total) = view.footer.as_ref().and_then(|f| f.cells.get(i)) {
                cells.push(Cell::new(total.text.clone(), total.is_numeric));
            }
            cells
        })
        .collect();

    let widths = column_widths(rows.iter());
    for row in &rows {
        push_line(out, row, &widths);
    }
}

/// Renders the page navigator and rows-per-page menu on one line.
pub fn render_pagination(bar: &PaginationBar) -> String {
    let p = &bar.pagination;
    let mut parts = vec![if p.previous.enabled { "<" } else { " " }.to_string()];
    parts.extend(p.pages.iter().map(|page| {
        if page.selected {
            format!("[{}]", page.label)
        } else {
            page.label.to_string()
        }
    }));
    parts.push(if p.next.enabled { ">" } else { " " }.to_string());

    let mut line = parts.join(" ");
    if let Some(menu) = &bar.rows_per_page {
        line.push_str(&format!("  ({})", menu.button_label()));
    }
    line
}

struct Cell {
    text: String,
    right: bool,
}

impl Cell {
    fn new(text: String, right: bool) -> Self {
        Self { text, right }
    }
}

fn column_widths<'a>(rows: impl Iterator<Item = &'a Vec<Cell>>) -> Vec<usize> {
    let mut widths: Vec<usize> = Vec::new();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            let width = cell.text.width();
            match widths.get_mut(i) {
                Some(w) => *w = (*w).max(width),
                None => widths.push(width),
            }
        }
    }
    widths
}

fn push_line(out: &mut String, row: &[Cell], widths: &[usize]) {
    let line = row
        .iter()
        .zip(widths)
        .map(|(cell, width)| pad(&cell.text, *width, cell.right))
        .collect::<Vec<_>>()
        .join(" | ");
    out.push_str(line.trim_end());
    out.push('\n');
}

fn pad(text: &str, width: usize, right: bool) -> String {
    let fill = " ".repeat(width.saturating_sub(text.width()));
    if right {
        format!("{}{}", fill, text)
    } else {
        format!("{}{}", text, fill)
    }
}

fn sort_marker(cell: &dyntable_lib::view::HeaderCell) -> String {
    match &cell.sort {
        Some(sort) if sort.asc.active => " ^".to_string(),
        Some(sort) if sort.desc.active => " v".to_string(),
        _ => String::new(),
    }
}

fn expander_marker(expander: Option<Expander>) -> &'static str {
    match expander {
        Some(Expander::Collapsed) => "+ ",
        Some(Expander::Expanded) => "- ",
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dyntable_lib::column::ColumnSpec;
    use dyntable_lib::model::Row;
    use dyntable_lib::options::TableOptions;
    use dyntable_lib::table::DynamicTable;

    fn table() -> DynamicTable {
        table_with(ColumnDirection::Vertical)
    }

    fn table_with(direction: ColumnDirection) -> DynamicTable {
        let options = TableOptions::new(vec![
            ColumnSpec::field("name").header("Name").sortable(),
            ColumnSpec::field("balance").header("Balance").numeric().show_total(),
        ])
        .with_rows_per_page(2)
        .with_column_direction(direction);
        let data = vec![
            Row::new().set("name", "Zoë").set("balance", "1.5"),
            Row::new().set("name", "Al").set("balance", "10"),
            Row::new().set("name", "Bo").set("balance", "2"),
        ];
        DynamicTable::new(options, data)
    }

    #[test]
    fn test_render_aligns_columns() {
        let out = render(&table().view());
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Name  | Balance");
        assert_eq!(lines[2], "Zoë   |     1.5");
        assert_eq!(lines[3], "Al    |      10");
        assert_eq!(lines[5], "Total |   11.50");
    }

    #[test]
    fn test_render_horizontal_labels_each_column_row() {
        let out = render(&table_with(ColumnDirection::Horizontal).view());
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Name    | Zoë | Al  | Total");
        assert_eq!(lines[1], "Balance | 1.5 |  10 | 11.50");
        assert_eq!(lines[2], "");
    }

    #[test]
    fn test_render_pagination_marks_current_page() {
        let mut table = table();
        table.next_page();
        let bar = table.view().pagination.unwrap();
        assert_eq!(render_pagination(&bar), "< 1 [2]  ");
    }

    #[test]
    fn test_sort_marker_in_header() {
        let mut table = table();
        table.toggle_sort("name");
        let out = render(&table.view());
        assert!(out.starts_with("Name ^"));
    }
}
