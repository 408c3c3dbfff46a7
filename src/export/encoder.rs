//! Delimited-text record encoder on top of the `csv` crate

use crate::error::{ConvertError, ConvertResult};
use std::io::{self, Write};

/// Record terminator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    /// Unix-style (LF)
    #[default]
    Lf,
    /// Windows-style (CRLF)
    CrLf,
}

/// When fields get wrapped in quotes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuoteMode {
    /// Only fields containing the delimiter, a quote or a line break
    #[default]
    Necessary,
    /// Every field
    Always,
}

/// Options for writing records
#[derive(Debug, Clone)]
pub struct EncoderOptions {
    /// Field delimiter (default: tab)
    pub delimiter: u8,
    pub line_ending: LineEnding,
    pub quote_mode: QuoteMode,
}

impl Default for EncoderOptions {
    fn default() -> Self {
        Self {
            delimiter: b'\t',
            line_ending: LineEnding::Lf,
            quote_mode: QuoteMode::Necessary,
        }
    }
}

/// Parse a delimiter argument: its first character is the delimiter
///
/// The character must be ASCII and cannot be a quote or a line break.
pub fn parse_delimiter(arg: &str) -> ConvertResult<u8> {
    let ch = arg
        .chars()
        .next()
        .ok_or_else(|| ConvertError::InvalidDelimiter("delimiter is empty".to_string()))?;

    if !ch.is_ascii() {
        return Err(ConvertError::InvalidDelimiter(format!(
            "'{}' is not a single-byte character",
            ch
        )));
    }
    if matches!(ch, '"' | '\r' | '\n') {
        return Err(ConvertError::InvalidDelimiter(format!(
            "{:?} cannot be used as a delimiter",
            ch
        )));
    }

    Ok(ch as u8)
}

/// Writes one record per call, fields in the order given
///
/// Records may have different field counts. A record with no fields is a
/// bare line terminator (a blank line), not the `""` csv would write.
pub struct RecordEncoder<W: Write> {
    builder: csv::WriterBuilder,
    terminator: &'static [u8],
    /// `None` only after a blank line failed to reach the underlying writer
    writer: Option<csv::Writer<W>>,
    records_written: usize,
}

impl<W: Write> RecordEncoder<W> {
    pub fn new(writer: W, options: &EncoderOptions) -> Self {
        let (terminator, line_end) = match options.line_ending {
            LineEnding::Lf => (csv::Terminator::Any(b'\n'), &b"\n"[..]),
            LineEnding::CrLf => (csv::Terminator::CRLF, &b"\r\n"[..]),
        };
        let quote_style = match options.quote_mode {
            QuoteMode::Necessary => csv::QuoteStyle::Necessary,
            QuoteMode::Always => csv::QuoteStyle::Always,
        };

        let mut builder = csv::WriterBuilder::new();
        builder
            .delimiter(options.delimiter)
            .terminator(terminator)
            .quote_style(quote_style)
            .has_headers(false)
            .flexible(true);
        let writer = builder.from_writer(writer);

        Self {
            builder,
            terminator: line_end,
            writer: Some(writer),
            records_written: 0,
        }
    }

    pub fn write_record<T: AsRef<[u8]>>(&mut self, fields: &[T]) -> ConvertResult<()> {
        if fields.is_empty() {
            self.write_blank_line()?;
        } else {
            self.csv_writer()?.write_record(fields)?;
        }
        self.records_written += 1;
        Ok(())
    }

    /// Push buffered records to the underlying writer
    pub fn flush(&mut self) -> ConvertResult<()> {
        self.csv_writer()?.flush()?;
        Ok(())
    }

    pub fn records_written(&self) -> usize {
        self.records_written
    }

    /// Flush and hand back the underlying writer
    pub fn into_inner(mut self) -> ConvertResult<W> {
        let writer = self.csv_writer_owned()?;
        writer
            .into_inner()
            .map_err(|e| ConvertError::Io(e.into_error()))
    }

    /// csv has no way to emit a zero-field record as an empty line, so the
    /// terminator goes straight to the underlying writer.
    fn write_blank_line(&mut self) -> ConvertResult<()> {
        let writer = self.csv_writer_owned()?;
        let mut inner = writer
            .into_inner()
            .map_err(|e| ConvertError::Io(e.into_error()))?;
        inner.write_all(self.terminator)?;
        self.writer = Some(self.builder.from_writer(inner));
        Ok(())
    }

    fn csv_writer(&mut self) -> ConvertResult<&mut csv::Writer<W>> {
        self.writer.as_mut().ok_or_else(closed)
    }

    fn csv_writer_owned(&mut self) -> ConvertResult<csv::Writer<W>> {
        self.writer.take().ok_or_else(closed)
    }
}

fn closed() -> ConvertError {
    ConvertError::Io(io::Error::new(
        io::ErrorKind::BrokenPipe,
        "encoder output was lost after a failed write",
    ))
}
