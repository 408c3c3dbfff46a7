//! Cell value extraction: raw stored text vs. formatted display text

use calamine::{Data, ExcelDateTime};
use chrono::Timelike;
use thiserror::Error;

/// Last serial day Excel can display (9999-12-31)
const MAX_DATE_SERIAL: f64 = 2_958_466.0;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Failure to render a cell's formatted value
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CellFormatError {
    #[error("date serial {0} is outside the representable date range")]
    DateOutOfRange(f64),

    #[error("duration {0} is not a finite number of days")]
    InvalidDuration(f64),
}

/// One decoded cell
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    value: Data,
}

impl Cell {
    pub fn new(value: Data) -> Self {
        Self { value }
    }

    /// The value as stored in the workbook, with no number format applied
    ///
    /// Date-times come out as their serial day number and booleans as
    /// `1`/`0`. Never fails.
    pub fn raw_value(&self) -> String {
        match &self.value {
            Data::Empty => String::new(),
            Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
            Data::Int(i) => i.to_string(),
            Data::Float(f) => f.to_string(),
            Data::Bool(b) => (if *b { "1" } else { "0" }).to_string(),
            Data::DateTime(dt) => dt.as_f64().to_string(),
            Data::Error(e) => e.to_string(),
        }
    }

    /// The value as a spreadsheet would display it
    ///
    /// Dates render as `YYYY-MM-DD` (with ` HH:MM:SS` when there is a time
    /// part), durations as `[h]:mm:ss`, booleans as `TRUE`/`FALSE`.
    pub fn formatted_value(&self) -> Result<String, CellFormatError> {
        match &self.value {
            Data::Bool(b) => Ok(if *b { "TRUE" } else { "FALSE" }.to_string()),
            Data::DateTime(dt) if dt.is_duration() => format_duration(dt.as_f64()),
            Data::DateTime(dt) => format_datetime(dt),
            _ => Ok(self.raw_value()),
        }
    }
}

impl From<Data> for Cell {
    fn from(value: Data) -> Self {
        Self::new(value)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        if value.is_empty() {
            Self::new(Data::Empty)
        } else {
            Self::new(Data::String(value.to_string()))
        }
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Self::new(Data::Float(value))
    }
}

fn format_datetime(dt: &ExcelDateTime) -> Result<String, CellFormatError> {
    let serial = dt.as_f64();
    if !serial.is_finite() || !(0.0..MAX_DATE_SERIAL).contains(&serial) {
        return Err(CellFormatError::DateOutOfRange(serial));
    }

    let datetime = dt
        .as_datetime()
        .ok_or(CellFormatError::DateOutOfRange(serial))?;

    if datetime.hour() == 0 && datetime.minute() == 0 && datetime.second() == 0 {
        Ok(datetime.format("%Y-%m-%d").to_string())
    } else {
        Ok(datetime.format("%Y-%m-%d %H:%M:%S").to_string())
    }
}

fn format_duration(days: f64) -> Result<String, CellFormatError> {
    let seconds = (days * SECONDS_PER_DAY).round();
    if !seconds.is_finite() || seconds.abs() > i64::MAX as f64 {
        return Err(CellFormatError::InvalidDuration(days));
    }

    let total = seconds.abs() as i64;
    let sign = if seconds < 0.0 { "-" } else { "" };
    Ok(format!(
        "{}{}:{:02}:{:02}",
        sign,
        total / 3600,
        (total / 60) % 60,
        total % 60
    ))
}
