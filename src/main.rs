//! aixsuma - Main entry point
//!
//! Runs one SUMA action and prints the JSON run report on stdout. The exit
//! status is nonzero when the report is marked failed.

use std::process::ExitCode;

use aixsuma::cli::Cli;
use aixsuma::logging;
use aixsuma::{run_action, ModuleContext, RunReport, SumaError, SumaParams, SystemRunner};
use tracing::{debug, warn};

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    // Logging first; stdout is reserved for the report.
    let log_file = match logging::init_file_logging(&cli.log_dir) {
        Ok(path) => path,
        Err(e) => {
            logging::init_stderr_logging();
            warn!("Debug log unavailable, logging to stderr: {:#}", e);
            logging::log_file_path(&cli.log_dir)
        }
    };

    let report = match load_params(&cli) {
        Ok(params) => {
            debug!("module parameters: {:?}", params);
            run_action(&ModuleContext::new(&SystemRunner, &params, log_file))
        }
        Err(e) => RunReport::new().fail(&SumaError::config(format!("{:#}", e))),
    };

    match report.to_json() {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Failed to serialize run report: {}", e);
            return ExitCode::FAILURE;
        }
    }

    if report.failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn load_params(cli: &Cli) -> anyhow::Result<SumaParams> {
    match (&cli.args_file, &cli.command) {
        (Some(path), _) => SumaParams::load_from_file(path),
        (None, Some(command)) => Ok(command.to_params()),
        (None, None) => anyhow::bail!("an arguments file or a subcommand is required"),
    }
}
