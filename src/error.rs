use thiserror::Error;

pub type ConvertResult<T> = Result<T, ConvertError>;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Workbook error: {0}")]
    Workbook(String),

    #[error("Invalid cell address: {0}")]
    InvalidAddress(String),

    #[error("Invalid cell range: {0}")]
    InvalidRange(String),

    #[error("Invalid delimiter: {0}")]
    InvalidDelimiter(String),

    #[error("Workbook has no sheets")]
    NoSheets,
}
