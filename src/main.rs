//! CLI entry point for the density-map photo mosaic generator

use std::process::ExitCode;

use env_logger::Env;
use mapcollage::io::cli::{Cli, MosaicProcessor};

// Allow print for reporting fatal errors to the user
#[allow(clippy::print_stderr)]
fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let result = Cli::parse_args(std::env::args_os())
        .and_then(|cli| MosaicProcessor::new(cli).process());

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{error}");
            ExitCode::FAILURE
        }
    }
}
