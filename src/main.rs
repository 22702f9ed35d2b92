//! style-report CLI entry point

use clap::Parser;
use clap::error::ErrorKind;
use std::process;
use style_report::cli::common::{EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE};
use style_report::cli::{CheckOptions, Cli, run_check};

/// Initialize logger based on verbose flag; RUST_LOG takes precedence
fn init_logger(verbose: bool) {
    let mut log_builder = env_logger::Builder::new();
    if verbose {
        log_builder.filter_level(log::LevelFilter::Debug);
    } else {
        log_builder.filter_level(log::LevelFilter::Warn);
    }
    log_builder
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => EXIT_SUCCESS,
                _ => EXIT_USAGE,
            };
            // Printing can only fail if the terminal is gone.
            let _ = e.print();
            process::exit(code);
        }
    };

    init_logger(cli.verbose);

    let exit_code = match CheckOptions::from_cli(cli) {
        Ok(options) => run_check(&options),
        Err(e) => {
            log::error!("{}", e);
            EXIT_ERROR
        }
    };

    process::exit(exit_code);
}
