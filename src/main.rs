//! CMED price table converter CLI.

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{ArgAction, Parser};
use cmedjson::logging::{init_logging, LogConfig};
use cmedjson::{ConverterBuilder, OutputFormat, SheetSelector};
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Parser, Debug)]
#[command(
    name = "cmedjson",
    version,
    about = "Convert the CMED drug price spreadsheet (.xlsx) into JSON",
    long_about = "Convert the CMED drug price spreadsheet (.xlsx) into JSON.\n\n\
                  The output is written next to the input file, with the extension\n\
                  replaced by .json (or .zip with --zip)."
)]
struct Cli {
    /// Path to the CMED spreadsheet.
    #[arg(value_name = "ARQUIVO.xlsx")]
    input: PathBuf,

    /// Reference date of the price table, as YYYY-MM-DD (default: today).
    #[arg(long = "data", value_name = "AAAA-MM-DD", value_parser = parse_date)]
    reference_date: Option<NaiveDate>,

    /// Update date of the price table, as YYYY-MM-DD (default: the reference date).
    #[arg(long = "data-atualizacao", value_name = "AAAA-MM-DD", value_parser = parse_date)]
    update_date: Option<NaiveDate>,

    /// Package the JSON inside a ZIP archive.
    #[arg(long)]
    zip: bool,

    /// Read the sheet at this position (0-based) instead of the first one.
    #[arg(long = "sheet-index", value_name = "N", conflicts_with = "sheet_name")]
    sheet_index: Option<usize>,

    /// Read the sheet with this name instead of the first one.
    #[arg(long = "sheet-name", value_name = "NAME")]
    sheet_name: Option<String>,

    /// Fail when the header row is missing or does not match the known layout.
    #[arg(long)]
    strict: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Only log errors.
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "verbose")]
    quiet: u8,
}

fn main() {
    let cli = Cli::parse();

    let verbosity =
        i8::try_from(cli.verbose).unwrap_or(i8::MAX) - i8::try_from(cli.quiet).unwrap_or(i8::MAX);
    let log_config = LogConfig {
        with_ansi: io::stderr().is_terminal(),
        ..LogConfig::from_verbosity(verbosity)
    };
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }

    match run(&cli) {
        Ok(output) => println!("Arquivo {} criado!", output.display()),
        Err(error) => {
            eprintln!("error: {error:#}");
            std::process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> Result<PathBuf> {
    check_extension(&cli.input)?;

    let selector = match (cli.sheet_index, &cli.sheet_name) {
        (Some(index), _) => SheetSelector::Index(index),
        (None, Some(name)) => SheetSelector::Name(name.clone()),
        (None, None) => SheetSelector::First,
    };

    let mut builder = ConverterBuilder::new()
        .with_sheet_selector(selector)
        .with_output_format(if cli.zip {
            OutputFormat::Zip
        } else {
            OutputFormat::Json
        })
        .require_header(cli.strict)
        .validate_header(cli.strict);
    if let Some(date) = cli.reference_date {
        builder = builder.with_reference_date(date);
    }
    if let Some(date) = cli.update_date {
        builder = builder.with_update_date(date);
    }

    let converter = builder.build().context("invalid options")?;
    debug!(
        reference_date = %converter.reference_date(),
        update_date = %converter.update_date(),
        "converter ready"
    );

    converter
        .convert_file(&cli.input)
        .with_context(|| format!("failed to convert {}", cli.input.display()))
}

/// Accept only `.xlsx` inputs.
fn check_extension(path: &Path) -> Result<()> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("xlsx") => Ok(()),
        _ => bail!("input file must be .xlsx: {}", path.display()),
    }
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| format!("invalid date '{value}', expected YYYY-MM-DD (AAAA-MM-DD)"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_args() {
        let cli = Cli::try_parse_from([
            "cmedjson",
            "--data",
            "2024-03-01",
            "--data-atualizacao",
            "2024-03-15",
            "--zip",
            "cmed.xlsx",
        ])
        .unwrap();

        assert_eq!(cli.input, PathBuf::from("cmed.xlsx"));
        assert_eq!(cli.reference_date, NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(cli.update_date, NaiveDate::from_ymd_opt(2024, 3, 15));
        assert!(cli.zip);
    }

    #[test]
    fn test_parse_args_requires_single_input() {
        assert!(Cli::try_parse_from(["cmedjson"]).is_err());
        assert!(Cli::try_parse_from(["cmedjson", "a.xlsx", "b.xlsx"]).is_err());
    }

    #[test]
    fn test_help_states_date_format() {
        let help = Cli::command().render_help().to_string();
        assert!(help.contains("Reference date of the price table, as YYYY-MM-DD"));
        assert!(help.contains("Update date of the price table, as YYYY-MM-DD"));
    }

    #[test]
    fn test_update_date_before_reference_is_accepted() {
        let cli = Cli::try_parse_from([
            "cmedjson",
            "--data",
            "2024-03-15",
            "--data-atualizacao",
            "2024-03-01",
            "cmed.xlsx",
        ])
        .unwrap();
        assert_eq!(cli.update_date, NaiveDate::from_ymd_opt(2024, 3, 1));
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2024-03-01"), Ok(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()));
        assert!(parse_date("01/03/2024").is_err());
        assert!(parse_date("2024-13-01").is_err());
    }

    #[test]
    fn test_check_extension() {
        assert!(check_extension(Path::new("dados/cmed.xlsx")).is_ok());
        assert!(check_extension(Path::new("cmed.xls")).is_err());
        assert!(check_extension(Path::new("cmed")).is_err());
    }
}
