//! Dynamic data table library
//!
//! Display state for a data table: sorting, pagination, expandable sub-rows,
//! page totals over exact decimals and drag-and-drop column ordering. The
//! library renders nothing itself; [`DynamicTable::view`] produces a
//! [`TableView`] for a presentation layer to paint.

pub mod column;
pub mod error;
pub mod model;
pub mod options;
pub mod pagination;
pub mod project;
pub mod reorder;
pub mod state;
pub mod table;
pub mod test_id;
pub mod total;
pub mod view;

pub use column::ColumnSpec;
pub use model::Row;
pub use model::Value;
pub use options::TableConfig;
pub use options::TableOptions;
pub use state::SortSpec;
pub use state::TableState;
pub use table::DynamicTable;
pub use view::TableView;
