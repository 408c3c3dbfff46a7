//! Sheet → delimited records
//!
//! Two walks over a sheet, picked once per sheet:
//! - whole sheet: one record per row slot, formatted cell values
//! - ranged: only rows and columns inside the range, raw cell values

use crate::error::{ConvertError, ConvertResult};
use crate::excel::{CellRange, CellRef, Sheet, SheetSource};
use crate::export::encoder::RecordEncoder;
use std::io::Write;
use tracing::{debug, error, warn};

/// What the whole-sheet walk writes for an absent row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AbsentRowPolicy {
    /// An empty record
    #[default]
    Empty,
    /// The previous record again (empty if there is none)
    RepeatPrevious,
}

#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    pub absent_rows: AbsentRowPolicy,
}

/// Counters for one export run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportSummary {
    /// Sheets selected by the selector
    pub sheets_matched: usize,
    /// Sheets written to the encoder
    pub sheets_exported: usize,
    /// Sheets that failed to load and were skipped
    pub sheets_failed: usize,
    pub records_written: usize,
    /// Cells whose formatted value failed and were written as error text
    pub cell_errors: usize,
}

/// Writes selected sheets of a workbook through a `RecordEncoder`
pub struct Exporter {
    options: ExportOptions,
}

impl Exporter {
    pub fn new(options: ExportOptions) -> Self {
        Self { options }
    }

    /// Export the sheets picked by `selector`
    ///
    /// An empty selector picks the first sheet. Any other selector, even one
    /// that is only whitespace, is a name: every sheet whose trimmed name
    /// equals the trimmed selector is exported, in workbook
    /// order; no match is not an error. A sheet that fails to load is
    /// logged and skipped. Write errors abort.
    pub fn export<S, W>(
        &self,
        source: &mut S,
        selector: &str,
        range: Option<&CellRange>,
        encoder: &mut RecordEncoder<W>,
    ) -> ConvertResult<ExportSummary>
    where
        S: SheetSource + ?Sized,
        W: Write,
    {
        let names = source.sheet_names();

        let targets: Vec<usize> = if selector.is_empty() {
            if names.is_empty() {
                return Err(ConvertError::NoSheets);
            }
            vec![0]
        } else {
            let wanted = selector.trim();
            names
                .iter()
                .enumerate()
                .filter(|(_, name)| name.trim() == wanted)
                .map(|(index, _)| index)
                .collect()
        };

        if targets.is_empty() {
            debug!(selector, "no sheet matches, nothing to export");
        }

        let mut summary = ExportSummary {
            sheets_matched: targets.len(),
            ..Default::default()
        };

        for index in targets {
            let sheet = match source.load_sheet(index) {
                Ok(sheet) => sheet,
                Err(e) => {
                    error!(sheet = %names[index], error = %e, "skipping sheet");
                    summary.sheets_failed += 1;
                    continue;
                }
            };

            let (records, cell_errors) = self.export_sheet(&sheet, range, encoder)?;
            summary.sheets_exported += 1;
            summary.records_written += records;
            summary.cell_errors += cell_errors;
        }

        Ok(summary)
    }

    /// Write one sheet and flush the encoder
    ///
    /// Returns `(records written, cells written as error text)`.
    pub fn export_sheet<W: Write>(
        &self,
        sheet: &Sheet,
        range: Option<&CellRange>,
        encoder: &mut RecordEncoder<W>,
    ) -> ConvertResult<(usize, usize)> {
        let before = encoder.records_written();

        let cell_errors = match range {
            Some(range) => {
                debug!(sheet = sheet.name(), %range, "exporting range");
                self.write_range(sheet, range, encoder)?;
                0
            }
            None => {
                debug!(sheet = sheet.name(), rows = sheet.row_count(), "exporting sheet");
                self.write_all_rows(sheet, encoder)?
            }
        };

        encoder.flush()?;
        Ok((encoder.records_written() - before, cell_errors))
    }

    /// One record per row slot, formatted values
    ///
    /// A cell whose formatted value fails is written as the error message
    /// instead of failing the export.
    fn write_all_rows<W: Write>(
        &self,
        sheet: &Sheet,
        encoder: &mut RecordEncoder<W>,
    ) -> ConvertResult<usize> {
        let mut fields: Vec<String> = Vec::new();
        let mut cell_errors = 0;

        for (row_index, slot) in sheet.rows().iter().enumerate() {
            match slot {
                Some(row) => {
                    fields.clear();
                    for (col_index, cell) in row.cells().iter().enumerate() {
                        match cell.formatted_value() {
                            Ok(text) => fields.push(text),
                            Err(e) => {
                                warn!(
                                    sheet = sheet.name(),
                                    cell = %CellRef::new(col_index as u32, row_index as u32),
                                    error = %e,
                                    "writing format error as cell text"
                                );
                                cell_errors += 1;
                                fields.push(e.to_string());
                            }
                        }
                    }
                }
                None => {
                    if self.options.absent_rows == AbsentRowPolicy::Empty {
                        fields.clear();
                    }
                }
            }
            encoder.write_record(&fields)?;
        }

        Ok(cell_errors)
    }

    /// Rows and columns inside `range` only, raw values; absent rows are skipped
    fn write_range<W: Write>(
        &self,
        sheet: &Sheet,
        range: &CellRange,
        encoder: &mut RecordEncoder<W>,
    ) -> ConvertResult<()> {
        let rows = sheet
            .rows()
            .iter()
            .enumerate()
            .skip(range.start.row as usize)
            .take_while(|(row_index, _)| range.contains_row(*row_index));

        for (_, slot) in rows {
            let Some(row) = slot else { continue };

            let fields: Vec<String> = row
                .cells()
                .iter()
                .enumerate()
                .filter(|(col_index, _)| range.contains_col(*col_index))
                .map(|(_, cell)| cell.raw_value())
                .collect();
            encoder.write_record(&fields)?;
        }

        Ok(())
    }
}

impl Default for Exporter {
    fn default() -> Self {
        Self::new(ExportOptions::default())
    }
}
