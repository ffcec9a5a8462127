pub mod column;
pub mod data_table;
pub mod engine;
pub mod number_format;
pub mod sortable_header_cell;

pub use column::{Align, CellValue, ColumnDescriptor, ColumnSet, TableError, TableRow};
pub use data_table::DataTable;
pub use engine::{PaginationState, SortDirection, SortState, TableView};
pub use number_format::*;
pub use sortable_header_cell::SortableHeaderCell;
