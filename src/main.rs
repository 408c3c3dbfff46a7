use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use excel2csv::cli::{self, ConvertArgs};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "excel2csv")]
#[command(version)]
#[command(author = "RoyalBit Inc. <admin@royalbit.ca>")]
#[command(about = "Convert a spreadsheet sheet into delimiter-separated text")]
#[command(long_about = "Convert one sheet of a workbook (xlsx, xlsm, xlsb, xls, ods) into
delimiter-separated text, optionally restricted to an inclusive cell range.

VALUES:
  Whole sheet  - display values (dates as YYYY-MM-DD, booleans as TRUE/FALSE)
  With --range - raw stored values (dates as serial numbers)

EXAMPLES:
  excel2csv report.xlsx                        # First sheet, tab-separated, stdout
  excel2csv report.xlsx -s Sales -o sales.tsv  # Named sheet to a file
  excel2csv report.xlsx -d A1:C10 -r ,         # Cell range, comma-separated")]
struct Cli {
    /// Workbook to convert
    input: PathBuf,

    /// Output file ("-" for stdout)
    #[arg(short, long, default_value = "-")]
    output: String,

    /// Sheet to export (default: first sheet)
    #[arg(short, long)]
    sheet: Option<String>,

    /// Inclusive cell range, e.g. A1:C10 (default: whole sheet)
    #[arg(short = 'd', long = "range", value_name = "A1:B2")]
    range: Option<String>,

    /// Field delimiter; the first character is used (default: tab)
    #[arg(
        short = 'r',
        long,
        default_value = "\t",
        hide_default_value = true,
        env = "EXCEL2CSV_DELIMITER"
    )]
    delimiter: String,

    /// Terminate records with CRLF instead of LF
    #[arg(long)]
    crlf: bool,

    /// Quote every field
    #[arg(long)]
    quote_all: bool,

    /// Repeat the previous record for absent rows instead of writing an empty one
    #[arg(long)]
    repeat_absent_rows: bool,

    /// Show debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

impl From<Cli> for ConvertArgs {
    fn from(cli: Cli) -> Self {
        ConvertArgs {
            input: cli.input,
            output: cli.output,
            sheet: cli.sheet.unwrap_or_default(),
            range: cli.range,
            delimiter: cli.delimiter,
            crlf: cli.crlf,
            quote_all: cli.quote_all,
            repeat_absent_rows: cli.repeat_absent_rows,
        }
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "excel2csv=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(args: ConvertArgs) -> anyhow::Result<()> {
    let input = args.input.clone();
    cli::convert(&args).with_context(|| format!("cannot convert {}", input.display()))?;
    Ok(())
}

fn main() -> ExitCode {
    // Usage errors exit with 1, not clap's default 2
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    init_logging(cli.verbose);

    match run(cli.into()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".bold().red(), e);
            ExitCode::FAILURE
        }
    }
}
