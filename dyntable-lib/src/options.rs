//! Table options: the component's configuration surface.

use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;

use crate::column::ColumnSpec;
use crate::error::ConfigError;
use crate::model::Row;
use crate::state::{DEFAULT_PAGE_SIZE, SortSpec};

/// Change notification callback.
pub type Callback<A> = Arc<dyn Fn(A) + Send + Sync>;

/// Returns the child rows of a row, if it has any.
pub type SubRowsFn = Arc<dyn Fn(&Row) -> Option<Vec<Row>> + Send + Sync>;

/// Ownership of a stateful field.
///
/// `Owned` state starts at the default and is mutated by the table.
/// `External` state is supplied by the caller on every update and overrides
/// whatever the table tracks internally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Controlled<T> {
    /// Table-owned, starting from this default.
    Owned(T),
    /// Caller-driven value.
    External(T),
}

impl<T: Copy> Controlled<T> {
    /// Returns the wrapped value.
    pub fn value(&self) -> T {
        match self {
            Controlled::Owned(v) | Controlled::External(v) => *v,
        }
    }

    /// Returns `true` for caller-driven state.
    pub fn is_external(&self) -> bool {
        matches!(self, Controlled::External(_))
    }
}

/// Layout direction of the table body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnDirection {
    /// One display row per record.
    #[default]
    Vertical,
    /// One display row per column, one cell per record.
    Horizontal,
}

impl FromStr for ColumnDirection {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vertical" => Ok(ColumnDirection::Vertical),
            "horizontal" => Ok(ColumnDirection::Horizontal),
            other => Err(ConfigError::invalid_column_direction(other)),
        }
    }
}

/// Cosmetic table variant flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// No outer border.
    Borderless,
    /// Reduced cell padding.
    Condensed,
    /// Highlight rows on hover.
    Highlighted,
}

impl FromStr for Variant {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "borderless" => Ok(Variant::Borderless),
            "condensed" => Ok(Variant::Condensed),
            "highlighted" => Ok(Variant::Highlighted),
            other => Err(ConfigError::unknown_variant(other)),
        }
    }
}

/// Options for a [`DynamicTable`](crate::table::DynamicTable).
///
/// # Example
///
/// ```
/// use dyntable_lib::column::ColumnSpec;
/// use dyntable_lib::options::TableOptions;
/// use dyntable_lib::state::SortSpec;
///
/// let options = TableOptions::new(vec![
///     ColumnSpec::field("clientName").header("Client Name").sortable(),
/// ])
/// .with_rows_per_page(3)
/// .with_default_sort_by(SortSpec::desc("clientName"))
/// .with_test_id("clients-table");
/// ```
#[derive(Clone)]
pub struct TableOptions {
    /// Column specifications.
    pub columns: Vec<ColumnSpec>,
    /// Initial sort.
    pub default_sort_by: Option<SortSpec>,
    /// Called with the sort state initially and after every change.
    pub on_sort: Option<Callback<Vec<SortSpec>>>,
    /// Leaves row order to the caller.
    pub manual_sort_by: bool,
    /// Page size. `None` or zero means the default of 10.
    pub rows_per_page: Option<usize>,
    /// Selectable page sizes.
    pub rows_per_page_select: Option<Vec<usize>>,
    /// Called with the new page size.
    pub on_rows_per_page_set: Option<Callback<usize>>,
    /// Caller-driven zero-based page index.
    pub page: Option<usize>,
    /// Initial zero-based page index.
    pub default_page: usize,
    /// Called with the zero-based target page index.
    pub on_page_set: Option<Callback<usize>>,
    /// The caller supplies one page of data and the page count.
    pub manual_pagination: bool,
    /// Explicit page count.
    pub page_count: Option<usize>,
    /// Reset the page index when data or sort change.
    pub auto_reset_page: bool,
    /// Initial column order.
    pub default_column_order: Option<Vec<String>>,
    /// Called with the new column order before it is applied.
    pub on_column_order_set: Option<Callback<Vec<String>>>,
    /// Sub-row accessor.
    pub get_sub_rows: Option<SubRowsFn>,
    /// Placeholder text when there are no rows.
    pub empty_view: Option<String>,
    /// Shows the loading overlay and suppresses interaction.
    pub is_loading: bool,
    /// Shows the numbered page buttons.
    pub show_pages: bool,
    /// Body layout direction.
    pub column_direction: ColumnDirection,
    /// Cosmetic flags.
    pub variant: Vec<Variant>,
    /// Accessible name.
    pub label: Option<String>,
    /// Prefix for automation identifiers.
    pub test_id: String,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            columns: Vec::new(),
            default_sort_by: None,
            on_sort: None,
            manual_sort_by: false,
            rows_per_page: None,
            rows_per_page_select: None,
            on_rows_per_page_set: None,
            page: None,
            default_page: 0,
            on_page_set: None,
            manual_pagination: false,
            page_count: None,
            auto_reset_page: true,
            default_column_order: None,
            on_column_order_set: None,
            get_sub_rows: None,
            empty_view: None,
            is_loading: false,
            show_pages: true,
            column_direction: ColumnDirection::Vertical,
            variant: vec![Variant::Borderless],
            label: None,
            test_id: "table".to_string(),
        }
    }
}

impl TableOptions {
    /// Creates options for the given columns with default values.
    pub fn new(columns: Vec<ColumnSpec>) -> Self {
        Self {
            columns,
            ..Self::default()
        }
    }

    /// Sets the initial sort.
    pub fn with_default_sort_by(mut self, sort: SortSpec) -> Self {
        self.default_sort_by = Some(sort);
        self
    }

    /// Sets the sort notification.
    pub fn with_on_sort(mut self, f: impl Fn(Vec<SortSpec>) + Send + Sync + 'static) -> Self {
        self.on_sort = Some(Arc::new(f));
        self
    }

    /// Leaves row order to the caller.
    pub fn with_manual_sort_by(mut self, manual: bool) -> Self {
        self.manual_sort_by = manual;
        self
    }

    /// Sets the page size.
    pub fn with_rows_per_page(mut self, rows: usize) -> Self {
        self.rows_per_page = Some(rows);
        self
    }

    /// Sets the selectable page sizes.
    pub fn with_rows_per_page_select(mut self, sizes: Vec<usize>) -> Self {
        self.rows_per_page_select = Some(sizes);
        self
    }

    /// Sets the page size notification.
    pub fn with_on_rows_per_page_set(mut self, f: impl Fn(usize) + Send + Sync + 'static) -> Self {
        self.on_rows_per_page_set = Some(Arc::new(f));
        self
    }

    /// Drives the page index from the caller.
    pub fn with_page(mut self, page: usize) -> Self {
        self.page = Some(page);
        self
    }

    /// Sets the initial page index.
    pub fn with_default_page(mut self, page: usize) -> Self {
        self.default_page = page;
        self
    }

    /// Sets the page notification.
    pub fn with_on_page_set(mut self, f: impl Fn(usize) + Send + Sync + 'static) -> Self {
        self.on_page_set = Some(Arc::new(f));
        self
    }

    /// Enables caller-side pagination.
    pub fn with_manual_pagination(mut self, manual: bool) -> Self {
        self.manual_pagination = manual;
        self
    }

    /// Sets the explicit page count.
    pub fn with_page_count(mut self, count: usize) -> Self {
        self.page_count = Some(count);
        self
    }

    /// Enables or disables the page reset on data change.
    pub fn with_auto_reset_page(mut self, reset: bool) -> Self {
        self.auto_reset_page = reset;
        self
    }

    /// Sets the initial column order.
    pub fn with_default_column_order(mut self, order: Vec<String>) -> Self {
        self.default_column_order = Some(order);
        self
    }

    /// Sets the column order notification.
    pub fn with_on_column_order_set(
        mut self,
        f: impl Fn(Vec<String>) + Send + Sync + 'static,
    ) -> Self {
        self.on_column_order_set = Some(Arc::new(f));
        self
    }

    /// Sets the sub-row accessor.
    pub fn with_sub_rows(
        mut self,
        f: impl Fn(&Row) -> Option<Vec<Row>> + Send + Sync + 'static,
    ) -> Self {
        self.get_sub_rows = Some(Arc::new(f));
        self
    }

    /// Sets the empty placeholder.
    pub fn with_empty_view(mut self, content: impl Into<String>) -> Self {
        self.empty_view = Some(content.into());
        self
    }

    /// Sets the loading flag.
    pub fn with_loading(mut self, loading: bool) -> Self {
        self.is_loading = loading;
        self
    }

    /// Shows or hides the numbered page buttons.
    pub fn with_show_pages(mut self, show: bool) -> Self {
        self.show_pages = show;
        self
    }

    /// Sets the body layout direction.
    pub fn with_column_direction(mut self, direction: ColumnDirection) -> Self {
        self.column_direction = direction;
        self
    }

    /// Sets the cosmetic flags.
    pub fn with_variant(mut self, variant: Vec<Variant>) -> Self {
        self.variant = variant;
        self
    }

    /// Sets the accessible name.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets the automation identifier prefix.
    pub fn with_test_id(mut self, test_id: impl Into<String>) -> Self {
        self.test_id = test_id.into();
        self
    }

    /// Resolves page index ownership for this update.
    pub fn page_control(&self) -> Controlled<usize> {
        match self.page {
            Some(page) => Controlled::External(page),
            None => Controlled::Owned(self.default_page),
        }
    }

    /// Returns `true` if the variant flag is set.
    pub fn has_variant(&self, variant: Variant) -> bool {
        self.variant.contains(&variant)
    }
}

impl std::fmt::Debug for TableOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableOptions")
            .field("columns", &self.columns)
            .field("default_sort_by", &self.default_sort_by)
            .field("manual_sort_by", &self.manual_sort_by)
            .field("rows_per_page", &self.rows_per_page)
            .field("page", &self.page)
            .field("default_page", &self.default_page)
            .field("manual_pagination", &self.manual_pagination)
            .field("page_count", &self.page_count)
            .field("auto_reset_page", &self.auto_reset_page)
            .field("column_direction", &self.column_direction)
            .field("test_id", &self.test_id)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Serializable configuration
// =============================================================================

/// A column as written in a configuration file. Field accessors only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnConfig {
    pub id: Option<String>,
    pub header: String,
    pub accessor: Option<String>,
    pub sortable: bool,
    pub numeric: bool,
    pub show_total: bool,
    pub tooltip: Option<String>,
}

impl From<ColumnConfig> for ColumnSpec {
    fn from(config: ColumnConfig) -> Self {
        let mut spec = match config.accessor {
            Some(path) => ColumnSpec::field(path),
            None => ColumnSpec::default(),
        };
        spec.id = config.id;
        spec.header = config.header;
        spec.is_sortable = config.sortable;
        spec.is_numeric = config.numeric;
        spec.show_total = config.show_total;
        spec.tooltip = config.tooltip;
        spec
    }
}

/// The data-only subset of [`TableOptions`], loadable from JSON.
///
/// # Example
///
/// ```
/// use dyntable_lib::options::TableConfig;
///
/// let config = TableConfig::from_json_str(r#"{
///     "columns": [{ "header": "Client Name", "accessor": "clientName", "sortable": true }],
///     "rows_per_page": 3,
///     "variant": ["condensed"]
/// }"#).unwrap();
/// let options = config.into_options();
/// assert_eq!(options.rows_per_page, Some(3));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    pub columns: Vec<ColumnConfig>,
    pub default_sort_by: Option<SortSpec>,
    pub manual_sort_by: bool,
    pub rows_per_page: Option<usize>,
    pub rows_per_page_select: Option<Vec<usize>>,
    pub page: Option<usize>,
    pub default_page: Option<usize>,
    pub manual_pagination: bool,
    pub page_count: Option<usize>,
    pub auto_reset_page: Option<bool>,
    pub default_column_order: Option<Vec<String>>,
    /// Field holding a list of child records, used as the sub-row accessor.
    pub sub_rows_field: Option<String>,
    pub empty_view: Option<String>,
    pub is_loading: bool,
    pub show_pages: Option<bool>,
    pub column_direction: Option<ColumnDirection>,
    pub variant: Option<Vec<Variant>>,
    pub label: Option<String>,
    pub test_id: Option<String>,
}

impl TableConfig {
    /// Parses a configuration from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Converts the configuration into table options without callbacks.
    pub fn into_options(self) -> TableOptions {
        let defaults = TableOptions::default();
        let get_sub_rows: Option<SubRowsFn> = self.sub_rows_field.map(|field| {
            let f: SubRowsFn = Arc::new(move |row: &Row| row.children(&field));
            f
        });

        TableOptions {
            columns: self.columns.into_iter().map(ColumnSpec::from).collect(),
            default_sort_by: self.default_sort_by,
            manual_sort_by: self.manual_sort_by,
            rows_per_page: self.rows_per_page,
            rows_per_page_select: self.rows_per_page_select,
            page: self.page,
            default_page: self.default_page.unwrap_or(defaults.default_page),
            manual_pagination: self.manual_pagination,
            page_count: self.page_count,
            auto_reset_page: self.auto_reset_page.unwrap_or(defaults.auto_reset_page),
            default_column_order: self.default_column_order,
            get_sub_rows,
            empty_view: self.empty_view,
            is_loading: self.is_loading,
            show_pages: self.show_pages.unwrap_or(defaults.show_pages),
            column_direction: self.column_direction.unwrap_or_default(),
            variant: self.variant.unwrap_or(defaults.variant),
            label: self.label,
            test_id: self.test_id.unwrap_or(defaults.test_id),
            ..TableOptions::default()
        }
    }
}

/// Returns the page size to use for an optional setting.
pub fn resolve_page_size(rows_per_page: Option<usize>) -> usize {
    match rows_per_page {
        Some(rows) if rows > 0 => rows,
        _ => DEFAULT_PAGE_SIZE,
    }
}
