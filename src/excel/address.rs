//! Spreadsheet cell addresses ("B7", "$AA$10") and inclusive ranges ("A1:C10")
//!
//! Coordinates are 0-based internally: "A1" is column 0, row 0.

use crate::error::{ConvertError, ConvertResult};
use regex::Regex;
use std::fmt;
use std::str::FromStr;

/// A single cell coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRef {
    /// Column index (A = 0, B = 1, ..., AA = 26)
    pub col: u32,
    /// Row index (0-based, "1" in A1 notation is row 0)
    pub row: u32,
}

impl CellRef {
    pub fn new(col: u32, row: u32) -> Self {
        Self { col, row }
    }

    /// Parse an A1-style address, with optional `$` absolute markers
    ///
    /// Column letters are case-insensitive. The row number must be >= 1.
    pub fn parse(address: &str) -> ConvertResult<Self> {
        let address = address.trim();
        if address.is_empty() {
            return Err(ConvertError::InvalidAddress("empty address".to_string()));
        }

        let pattern = Regex::new(r"^\$?([A-Za-z]+)\$?([0-9]*)$")
            .map_err(|e| ConvertError::InvalidAddress(format!("Regex error: {}", e)))?;

        let captures = pattern.captures(address).ok_or_else(|| {
            ConvertError::InvalidAddress(format!("'{}' is not an A1-style address", address))
        })?;

        let letters = &captures[1];
        let digits = &captures[2];
        if digits.is_empty() {
            return Err(ConvertError::InvalidAddress(format!(
                "no row number in '{}'",
                address
            )));
        }

        let col = letters_to_column_index(letters).ok_or_else(|| {
            ConvertError::InvalidAddress(format!("column out of range in '{}'", address))
        })?;

        let row: u32 = digits.parse().map_err(|_| {
            ConvertError::InvalidAddress(format!("row out of range in '{}'", address))
        })?;
        if row == 0 {
            return Err(ConvertError::InvalidAddress(format!(
                "row number must be >= 1 in '{}'",
                address
            )));
        }

        Ok(Self { col, row: row - 1 })
    }
}

impl FromStr for CellRef {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            column_index_to_letters(self.col as usize),
            u64::from(self.row) + 1
        )
    }
}

/// An inclusive rectangle of cells
///
/// No ordering is enforced between `start` and `end`: a reversed range is
/// accepted and simply contains nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRange {
    pub start: CellRef,
    pub end: CellRef,
}

impl CellRange {
    pub fn new(start: CellRef, end: CellRef) -> Self {
        Self { start, end }
    }

    /// Parse "A1:C10" into a range; both endpoints must be valid addresses
    pub fn parse(range: &str) -> ConvertResult<Self> {
        let (start, end) = range.trim().split_once(':').ok_or_else(|| {
            ConvertError::InvalidRange(format!(
                "'{}' must be two cell addresses separated by ':'",
                range
            ))
        })?;

        if end.contains(':') {
            return Err(ConvertError::InvalidRange(format!(
                "'{}' has more than two cell addresses",
                range
            )));
        }

        Ok(Self {
            start: CellRef::parse(start)?,
            end: CellRef::parse(end)?,
        })
    }

    pub fn contains_row(&self, row: usize) -> bool {
        row >= self.start.row as usize && row <= self.end.row as usize
    }

    pub fn contains_col(&self, col: usize) -> bool {
        col >= self.start.col as usize && col <= self.end.col as usize
    }
}

impl FromStr for CellRange {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start, self.end)
    }
}

/// Convert a column index to letters
///
/// Examples:
/// - 0 → A
/// - 25 → Z
/// - 26 → AA
pub fn column_index_to_letters(index: usize) -> String {
    let mut result = String::new();
    let mut idx = index;

    loop {
        let remainder = idx % 26;
        result.insert(0, (b'A' + remainder as u8) as char);
        if idx < 26 {
            break;
        }
        idx = idx / 26 - 1;
    }

    result
}

/// Convert column letters to an index, `None` on overflow or non-letters
pub fn letters_to_column_index(letters: &str) -> Option<u32> {
    if letters.is_empty() {
        return None;
    }

    let mut value: u32 = 0;
    for ch in letters.chars() {
        if !ch.is_ascii_alphabetic() {
            return None;
        }
        let digit = (ch.to_ascii_uppercase() as u8 - b'A') as u32 + 1;
        value = value.checked_mul(26)?.checked_add(digit)?;
    }

    Some(value - 1)
}
