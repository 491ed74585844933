//! Column specifications and the column normalizer.

use std::collections::HashSet;
use std::sync::Arc;

use crate::model::{Row, Value};

/// Computes a cell value from a row.
pub type AccessorFn = Arc<dyn Fn(&Row) -> Value + Send + Sync>;

/// Renders a cell's display text from its value and row.
pub type CellRenderer = Arc<dyn Fn(&Value, &Row) -> String + Send + Sync>;

/// Formats a page total (already rendered with two decimals) for display.
pub type TotalFormatter = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// How a column reads its value from a row.
#[derive(Clone)]
pub enum Accessor {
    /// Dotted field path into the row.
    Field(String),
    /// Pure function of the row.
    Computed(AccessorFn),
}

impl Accessor {
    /// Returns the field path, if this accessor reads a field.
    pub fn field_name(&self) -> Option<&str> {
        match self {
            Accessor::Field(path) => Some(path),
            Accessor::Computed(_) => None,
        }
    }

    /// Resolves the accessor against a row.
    pub fn resolve(&self, row: &Row) -> Value {
        match self {
            Accessor::Field(path) => row.get_path(path).cloned().unwrap_or_default(),
            Accessor::Computed(f) => f(row),
        }
    }
}

impl std::fmt::Debug for Accessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Accessor::Field(path) => f.debug_tuple("Field").field(path).finish(),
            Accessor::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

/// A caller-supplied column definition.
///
/// Column identity is `id`, or the accessor's field path when no id is
/// given. Identity must be stable across renders since ordering and drag and
/// drop are keyed on it.
///
/// # Examples
///
/// ```
/// use dyntable_lib::column::ColumnSpec;
///
/// let columns = vec![
///     ColumnSpec::field("clientName").header("Client Name").sortable(),
///     ColumnSpec::field("currentBalance")
///         .header("Current Balance")
///         .numeric()
///         .show_total(),
/// ];
/// ```
#[derive(Clone, Default)]
pub struct ColumnSpec {
    /// Explicit column identifier.
    pub id: Option<String>,
    /// Header text.
    pub header: String,
    /// Value accessor.
    pub accessor: Option<Accessor>,
    /// Whether clicking the header sorts by this column.
    pub is_sortable: bool,
    /// Whether cells are right-aligned numbers.
    pub is_numeric: bool,
    /// Whether the footer shows a page total for this column.
    pub show_total: bool,
    /// Header tooltip text.
    pub tooltip: Option<String>,
    /// Custom cell renderer.
    pub cell: Option<CellRenderer>,
    /// Custom total formatter.
    pub total_format: Option<TotalFormatter>,
}

impl ColumnSpec {
    /// Creates a column reading the given field path.
    pub fn field(path: impl Into<String>) -> Self {
        Self {
            accessor: Some(Accessor::Field(path.into())),
            ..Self::default()
        }
    }

    /// Creates a column with an explicit id and a computed value.
    pub fn computed(
        id: impl Into<String>,
        accessor: impl Fn(&Row) -> Value + Send + Sync + 'static,
    ) -> Self {
        Self {
            id: Some(id.into()),
            accessor: Some(Accessor::Computed(Arc::new(accessor))),
            ..Self::default()
        }
    }

    /// Sets the column id.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the header text.
    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.header = header.into();
        self
    }

    /// Makes the column sortable.
    pub fn sortable(mut self) -> Self {
        self.is_sortable = true;
        self
    }

    /// Marks the column as numeric.
    pub fn numeric(mut self) -> Self {
        self.is_numeric = true;
        self
    }

    /// Shows a page total in the footer for this column.
    pub fn show_total(mut self) -> Self {
        self.show_total = true;
        self
    }

    /// Sets the header tooltip.
    pub fn tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }

    /// Sets a custom cell renderer.
    pub fn cell(mut self, render: impl Fn(&Value, &Row) -> String + Send + Sync + 'static) -> Self {
        self.cell = Some(Arc::new(render));
        self
    }

    /// Sets a custom total formatter.
    pub fn total_format(mut self, format: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        self.total_format = Some(Arc::new(format));
        self
    }
}

impl std::fmt::Debug for ColumnSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColumnSpec")
            .field("id", &self.id)
            .field("header", &self.header)
            .field("accessor", &self.accessor)
            .field("is_sortable", &self.is_sortable)
            .field("is_numeric", &self.is_numeric)
            .field("show_total", &self.show_total)
            .field("tooltip", &self.tooltip)
            .finish_non_exhaustive()
    }
}

/// A normalized column: concrete id and derived sortability.
#[derive(Clone)]
pub struct Column {
    /// Unique identifier.
    pub id: String,
    /// Header text.
    pub header: String,
    /// Value accessor.
    pub accessor: Option<Accessor>,
    /// Whether sorting is enabled for this column.
    pub can_sort: bool,
    /// Whether cells are numeric.
    pub is_numeric: bool,
    /// Whether the footer shows a page total.
    pub show_total: bool,
    /// Header tooltip text.
    pub tooltip: Option<String>,
    cell: Option<CellRenderer>,
    total_format: Option<TotalFormatter>,
}

impl Column {
    /// Resolves this column's value for a row.
    pub fn value(&self, row: &Row) -> Value {
        self.accessor
            .as_ref()
            .map(|accessor| accessor.resolve(row))
            .unwrap_or_default()
    }

    /// Renders this column's cell text for a row.
    pub fn display(&self, row: &Row) -> String {
        let value = self.value(row);
        match &self.cell {
            Some(render) => render(&value, row),
            None => value.to_string(),
        }
    }

    /// Applies the total formatter, if any.
    pub fn format_total(&self, total: &str) -> String {
        match &self.total_format {
            Some(format) => format(total),
            None => total.to_string(),
        }
    }
}

impl std::fmt::Debug for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Column")
            .field("id", &self.id)
            .field("header", &self.header)
            .field("can_sort", &self.can_sort)
            .field("is_numeric", &self.is_numeric)
            .field("show_total", &self.show_total)
            .finish_non_exhaustive()
    }
}

/// Converts column specs into normalized columns.
///
/// Ids come from `id`, then the accessor's field path, then the column
/// position. Duplicate ids are logged; the table keys on the first one.
pub fn normalize_columns(specs: &[ColumnSpec]) -> Vec<Column> {
    let mut seen = HashSet::new();
    specs
        .iter()
        .enumerate()
        .map(|(index, spec)| {
            let id = spec
                .id
                .clone()
                .or_else(|| {
                    spec.accessor
                        .as_ref()
                        .and_then(|a| a.field_name())
                        .map(str::to_string)
                })
                .unwrap_or_else(|| {
                    log::warn!(
                        "column '{}' has neither an id nor a field accessor, using position",
                        spec.header
                    );
                    format!("column-{}", index)
                });
            if !seen.insert(id.clone()) {
                log::warn!("duplicate column id '{}'", id);
            }
            Column {
                id,
                header: spec.header.clone(),
                accessor: spec.accessor.clone(),
                can_sort: spec.is_sortable,
                is_numeric: spec.is_numeric,
                show_total: spec.show_total,
                tooltip: spec.tooltip.clone(),
                cell: spec.cell.clone(),
                total_format: spec.total_format.clone(),
            }
        })
        .collect()
}

/// Orders columns by `order`; columns missing from `order` follow in
/// declaration order, and unknown ids are ignored.
pub fn ordered_columns<'a>(columns: &'a [Column], order: &[String]) -> Vec<&'a Column> {
    let mut result: Vec<&Column> = order
        .iter()
        .filter_map(|id| columns.iter().find(|c| &c.id == id))
        .collect();
    for column in columns {
        if !result.iter().any(|c| c.id == column.id) {
            result.push(column);
        }
    }
    result
}
