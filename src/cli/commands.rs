use crate::error::ConvertResult;
use crate::excel::{CellRange, Workbook};
use crate::export::{
    parse_delimiter, AbsentRowPolicy, EncoderOptions, ExportOptions, ExportSummary, Exporter,
    LineEnding, QuoteMode, RecordEncoder,
};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing::{debug, info};

/// Everything the convert command needs, as given on the command line
#[derive(Debug, Clone)]
pub struct ConvertArgs {
    /// Workbook to read
    pub input: PathBuf,
    /// Output path; "-" or empty means stdout
    pub output: String,
    /// Sheet name; empty means the first sheet
    pub sheet: String,
    /// Inclusive cell range such as "A1:C10"
    pub range: Option<String>,
    /// Delimiter argument; only its first character is used
    pub delimiter: String,
    pub crlf: bool,
    pub quote_all: bool,
    pub repeat_absent_rows: bool,
}

impl Default for ConvertArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::new(),
            output: "-".to_string(),
            sheet: String::new(),
            range: None,
            delimiter: "\t".to_string(),
            crlf: false,
            quote_all: false,
            repeat_absent_rows: false,
        }
    }
}

impl ConvertArgs {
    pub fn writes_to_stdout(&self) -> bool {
        self.output.is_empty() || self.output == "-"
    }

    fn encoder_options(&self) -> ConvertResult<EncoderOptions> {
        Ok(EncoderOptions {
            delimiter: parse_delimiter(&self.delimiter)?,
            line_ending: if self.crlf {
                LineEnding::CrLf
            } else {
                LineEnding::Lf
            },
            quote_mode: if self.quote_all {
                QuoteMode::Always
            } else {
                QuoteMode::Necessary
            },
        })
    }

    fn export_options(&self) -> ExportOptions {
        ExportOptions {
            absent_rows: if self.repeat_absent_rows {
                AbsentRowPolicy::RepeatPrevious
            } else {
                AbsentRowPolicy::Empty
            },
        }
    }
}

/// Execute the convert command, writing to the destination in `args.output`
///
/// The output file is only created once the range, delimiter and workbook
/// are known to be good.
pub fn convert(args: &ConvertArgs) -> ConvertResult<ExportSummary> {
    let prepared = prepare(args)?;

    let destination: Box<dyn Write> = if args.writes_to_stdout() {
        Box::new(io::stdout().lock())
    } else {
        debug!(path = %args.output, "creating output file");
        Box::new(File::create(&args.output)?)
    };

    run(args, prepared, BufWriter::new(destination))
}

/// Execute the convert command into an arbitrary writer
pub fn convert_to_writer<W: Write>(args: &ConvertArgs, writer: W) -> ConvertResult<ExportSummary> {
    let prepared = prepare(args)?;
    run(args, prepared, writer)
}

struct Prepared {
    range: Option<CellRange>,
    encoder_options: EncoderOptions,
    workbook: Workbook,
}

fn prepare(args: &ConvertArgs) -> ConvertResult<Prepared> {
    let range = args.range.as_deref().map(CellRange::parse).transpose()?;
    let encoder_options = args.encoder_options()?;

    debug!(input = %args.input.display(), "opening workbook");
    let workbook = Workbook::open(&args.input)?;

    Ok(Prepared {
        range,
        encoder_options,
        workbook,
    })
}

fn run<W: Write>(args: &ConvertArgs, prepared: Prepared, writer: W) -> ConvertResult<ExportSummary> {
    let Prepared {
        range,
        encoder_options,
        mut workbook,
    } = prepared;

    let mut encoder = RecordEncoder::new(writer, &encoder_options);
    let exporter = Exporter::new(args.export_options());
    let summary = exporter.export(&mut workbook, &args.sheet, range.as_ref(), &mut encoder)?;

    let mut writer = encoder.into_inner()?;
    writer.flush()?;

    info!(
        input = %workbook.path().display(),
        sheets = summary.sheets_exported,
        records = summary.records_written,
        cell_errors = summary.cell_errors,
        "conversion complete"
    );

    Ok(summary)
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
