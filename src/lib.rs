//! excel2csv - spreadsheet sheet to delimited text
//!
//! Reads one sheet (or every sheet with a given name) of a workbook and
//! writes each row as a delimited record, optionally limited to a cell
//! range such as `A1:C10`.
//!
//! # Features
//!
//! - xlsx, xlsm, xlsb, xls and ods input (via calamine)
//! - Any single-byte delimiter, tab by default
//! - Formatted values (dates, booleans) for whole-sheet exports
//! - Raw stored values for ranged exports
//!
//! # Example
//!
//! ```no_run
//! use excel2csv::excel::{CellRange, Workbook};
//! use excel2csv::export::{EncoderOptions, Exporter, RecordEncoder};
//!
//! let mut workbook = Workbook::open("report.xlsx")?;
//! let range = CellRange::parse("A1:C10")?;
//! let mut encoder = RecordEncoder::new(std::io::stdout(), &EncoderOptions::default());
//!
//! let summary = Exporter::default().export(&mut workbook, "Data", Some(&range), &mut encoder)?;
//! eprintln!("{} records", summary.records_written);
//! # Ok::<(), excel2csv::error::ConvertError>(())
//! ```

pub mod cli;
pub mod error;
pub mod excel;
pub mod export;

// Re-export commonly used types
pub use error::{ConvertError, ConvertResult};
pub use excel::{CellRange, CellRef, Sheet, SheetSource, Workbook};
pub use export::{ExportSummary, Exporter, RecordEncoder};
