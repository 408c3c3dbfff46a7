//! Workbook access: sheet names and row-major sheet contents

use crate::error::{ConvertError, ConvertResult};
use crate::excel::cell::Cell;
use calamine::{open_workbook_auto, Data, Range, Reader, Sheets};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// An ordered collection of named sheets that can be loaded one at a time
pub trait SheetSource {
    /// Sheet names in workbook order
    fn sheet_names(&self) -> Vec<String>;

    /// Load the sheet at `index` (position in `sheet_names()`)
    fn load_sheet(&mut self, index: usize) -> ConvertResult<Sheet>;
}

/// A row of cells in column order; index 0 is column A
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    cells: Vec<Cell>,
}

impl Row {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

impl<C: Into<Cell>> FromIterator<C> for Row {
    fn from_iter<I: IntoIterator<Item = C>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

/// A named grid of rows
///
/// Row slots are indexed by absolute sheet row. A `None` slot is an absent
/// row: the sheet stores nothing there.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    name: String,
    rows: Vec<Option<Row>>,
}

impl Sheet {
    pub fn new(name: impl Into<String>, rows: Vec<Option<Row>>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    /// Build a sheet from a decoded calamine range
    ///
    /// Rows above the used area and rows with no non-empty cell become
    /// absent slots. Columns left of the used area are padded with empty
    /// cells so column indices stay absolute.
    pub fn from_range(name: impl Into<String>, range: &Range<Data>) -> Self {
        let Some((start_row, start_col)) = range.start() else {
            return Self::new(name, Vec::new());
        };

        let mut rows: Vec<Option<Row>> = vec![None; start_row as usize];
        for cells in range.rows() {
            if cells.iter().all(|cell| matches!(cell, Data::Empty)) {
                rows.push(None);
                continue;
            }

            let mut row = Vec::with_capacity(start_col as usize + cells.len());
            row.extend((0..start_col).map(|_| Cell::new(Data::Empty)));
            row.extend(cells.iter().cloned().map(Cell::new));
            rows.push(Some(Row::new(row)));
        }

        Self::new(name, rows)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rows(&self) -> &[Option<Row>] {
        &self.rows
    }

    /// Number of row slots, absent rows included
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// A workbook file opened through calamine
///
/// The format (xlsx, xlsm, xlsb, xls, ods) is picked from the extension.
pub struct Workbook {
    path: PathBuf,
    sheets: Sheets<BufReader<File>>,
}

impl Workbook {
    pub fn open<P: AsRef<Path>>(path: P) -> ConvertResult<Self> {
        let path = path.as_ref().to_path_buf();
        let sheets = open_workbook_auto(&path).map_err(|e| {
            ConvertError::Workbook(format!("Failed to open {}: {}", path.display(), e))
        })?;

        Ok(Self { path, sheets })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SheetSource for Workbook {
    fn sheet_names(&self) -> Vec<String> {
        self.sheets.sheet_names()
    }

    fn load_sheet(&mut self, index: usize) -> ConvertResult<Sheet> {
        let name = self
            .sheet_names()
            .get(index)
            .cloned()
            .ok_or_else(|| ConvertError::Workbook(format!("No sheet at index {}", index)))?;

        let range = self.sheets.worksheet_range(&name).map_err(|e| {
            ConvertError::Workbook(format!("Failed to read sheet '{}': {}", name, e))
        })?;

        Ok(Sheet::from_range(name, &range))
    }
}

impl SheetSource for Vec<Sheet> {
    fn sheet_names(&self) -> Vec<String> {
        self.iter().map(|sheet| sheet.name().to_string()).collect()
    }

    fn load_sheet(&mut self, index: usize) -> ConvertResult<Sheet> {
        self.get(index)
            .cloned()
            .ok_or_else(|| ConvertError::Workbook(format!("No sheet at index {}", index)))
    }
}
