//! Spreadsheet side of the conversion
//!
//! - Cell addresses and ranges in A1 notation
//! - Cell value extraction (raw vs. formatted)
//! - Workbook/sheet access through calamine

mod address;
mod cell;
mod workbook;

pub use address::{column_index_to_letters, letters_to_column_index, CellRange, CellRef};
pub use cell::{Cell, CellFormatError};
pub use workbook::{Row, Sheet, SheetSource, Workbook};
