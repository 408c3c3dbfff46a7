//! Text side of the conversion: sheet walks and record encoding

mod encoder;
mod exporter;

pub use encoder::{parse_delimiter, EncoderOptions, LineEnding, QuoteMode, RecordEncoder};
pub use exporter::{AbsentRowPolicy, ExportOptions, ExportSummary, Exporter};
