//! Time-on-air calculator.
//!
//! Reads transmission settings as JSON and prints how long the frame stays
//! on air.
//!
//! # Usage
//!
//! ```bash
//! toa <payload-size> [settings.json | -]
//! toa --batch [requests.json | -]
//! ```
//!
//! Input is read from stdin when the path is `-` or omitted.
//!
//! Environment:
//! - `TOA_FORMAT`: `human` (default) or `json`
//! - `TOA_LOG`: default log filter (`warn`); `RUST_LOG` overrides it
//!
//! Exit status is 0 on success, 1 when a computation fails and 2 on usage
//! or input errors.

use log::debug;
use lorawan_toa::cli::{self, CliError};
use lorawan_toa::config::Config;
use std::io;
use std::process::exit;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let result = try_main(&args);
    if let Err(e) = &result {
        debug!("{:?}", e);
        eprintln!("Error: {}", e);
        if matches!(e, CliError::Usage(_)) {
            eprintln!();
            eprint!("{}", cli::usage(cli::program_name(&args)));
        }
    }
    exit(cli::exit_code(&result));
}

fn try_main(args: &[String]) -> Result<bool, CliError> {
    let config = Config::from_env()?;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_filter.as_str()),
    )
    .init();

    let mode = cli::parse_args(args)?;
    cli::run(
        &mode,
        config.format,
        &mut io::stdin().lock(),
        &mut io::stdout().lock(),
    )
}
