use clap::{CommandFactory, Parser};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use cleancsv::{CleanCsvError, ConverterBuilder};

mod logging;

#[derive(Parser)]
#[command(name = "cleancsv")]
#[command(about = "Convert the first sheet of a workbook into a cleaned CSV in the current directory")]
#[command(version)]
struct Cli {
    /// Workbook to convert (.xlsx, .xlsm, .xlsb, .xls, .ods)
    workbook: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let Some(workbook) = cli.workbook else {
        println!("{}", Cli::command().render_usage());
        return ExitCode::FAILURE;
    };

    logging::init_logging(cli.verbose);

    match run(&workbook) {
        Ok(output_path) => {
            println!("✅ Clean CSV saved to: {}", output_path.display());
            ExitCode::SUCCESS
        }
        Err(CleanCsvError::InputNotFound(path)) => {
            eprintln!("Error: File '{}' not found.", path.display());
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(workbook: &Path) -> Result<PathBuf, CleanCsvError> {
    let converter = ConverterBuilder::new().build()?;
    converter.convert(workbook)
}
