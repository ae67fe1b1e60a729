//! Command-line front end of the `toa` tool.
//!
//! Argument parsing, input reading and the evaluate-and-print loop live here
//! so the binary only wires up the environment, logging and process exit.
//!
//! ```text
//! toa <payload-size> [settings.json | -]
//! toa --batch [requests.json | -]
//! ```

use crate::batch::{self, Outcome, Request};
use crate::config::{ConfigError, OutputFormat};
use crate::toa::TxSettings;
use log::debug;
use std::fmt;
use std::io::{self, Read, Write};
use std::path::PathBuf;

/// Exit status when every computation succeeded.
pub const EXIT_OK: i32 = 0;

/// Exit status when at least one computation failed.
pub const EXIT_FAILED: i32 = 1;

/// Exit status for usage, configuration and input errors.
pub const EXIT_USAGE: i32 = 2;

/// Where a JSON document is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Stdin,
    File(PathBuf),
}

impl Input {
    fn from_arg(arg: Option<&String>) -> Self {
        match arg.map(String::as_str) {
            None | Some("-") => Self::Stdin,
            Some(path) => Self::File(PathBuf::from(path)),
        }
    }
}

/// What the command line asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// One settings record and a payload size.
    Single { payload_size: usize, input: Input },
    /// A JSON array of requests.
    Batch { input: Input },
    Help,
}

#[derive(Debug)]
pub enum CliError {
    Usage(String),
    Io(io::Error),
    Json(serde_json::Error),
    Config(ConfigError),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Usage(msg) => write!(f, "{}", msg),
            Self::Io(e) => write!(f, "I/O error: {}", e),
            Self::Json(e) => write!(f, "invalid JSON input: {}", e),
            Self::Config(e) => write!(f, "invalid configuration: {}", e),
        }
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Parse the full argument vector, program name included.
pub fn parse_args(args: &[String]) -> Result<Mode, CliError> {
    let rest = args.get(1..).unwrap_or_default();

    match rest {
        [] => Err(CliError::Usage("missing payload size".into())),
        [flag, ..] if flag == "--help" || flag == "-h" => Ok(Mode::Help),
        [flag, tail @ ..] if flag == "--batch" || flag == "-b" => match tail {
            [] | [_] => Ok(Mode::Batch {
                input: Input::from_arg(tail.first()),
            }),
            _ => Err(CliError::Usage("too many arguments".into())),
        },
        [size, tail @ ..] => {
            let payload_size = size
                .parse()
                .map_err(|_| CliError::Usage(format!("invalid payload size: {:?}", size)))?;
            match tail {
                [] | [_] => Ok(Mode::Single {
                    payload_size,
                    input: Input::from_arg(tail.first()),
                }),
                _ => Err(CliError::Usage("too many arguments".into())),
            }
        }
    }
}

/// Read the whole document, taking `stdin` for [`Input::Stdin`].
pub fn read_input(input: &Input, stdin: &mut impl Read) -> Result<String, CliError> {
    match input {
        Input::Stdin => {
            let mut buf = String::new();
            stdin.read_to_string(&mut buf)?;
            Ok(buf)
        }
        Input::File(path) => {
            debug!("Reading {}", path.display());
            Ok(std::fs::read_to_string(path)?)
        }
    }
}

/// Evaluate `mode` and write one line per result to `out`.
///
/// Returns whether every computation succeeded. [`Mode::Help`] writes the
/// usage text.
pub fn run(
    mode: &Mode,
    format: OutputFormat,
    stdin: &mut impl Read,
    out: &mut impl Write,
) -> Result<bool, CliError> {
    let outcomes = match mode {
        Mode::Help => {
            write!(out, "{}", usage("toa"))?;
            return Ok(true);
        }
        Mode::Single {
            payload_size,
            input,
        } => {
            let settings: TxSettings = serde_json::from_str(&read_input(input, stdin)?)?;
            vec![batch::evaluate(&Request {
                payload_size: *payload_size,
                settings,
            })]
        }
        Mode::Batch { input } => {
            let requests = batch::parse_requests(&read_input(input, stdin)?)?;
            debug!("Evaluating {} requests", requests.len());
            batch::evaluate_all(&requests)
        }
    };

    for outcome in &outcomes {
        match format {
            OutputFormat::Human => writeln!(out, "{}", outcome)?,
            OutputFormat::Json => writeln!(out, "{}", outcome.to_json())?,
        }
    }

    Ok(outcomes.iter().all(Outcome::is_ok))
}

/// Process exit status for the result of [`run`].
pub fn exit_code(result: &Result<bool, CliError>) -> i32 {
    match result {
        Ok(true) => EXIT_OK,
        Ok(false) => EXIT_FAILED,
        Err(_) => EXIT_USAGE,
    }
}

/// Base name of the program from `argv[0]`.
pub fn program_name(args: &[String]) -> &str {
    args.first()
        .and_then(|s| s.split('/').next_back())
        .unwrap_or("toa")
}

pub fn usage(program: &str) -> String {
    format!(
        "LoRaWAN time-on-air calculator

Usage:
  {program} <payload-size> [settings.json | -]
  {program} --batch [requests.json | -]

Options:
  --batch, -b   Read a JSON array of {{payload_size, settings}} requests
  --help, -h    Show this help

Environment:
  TOA_FORMAT    Output format: human (default) or json
  TOA_LOG       Default log filter (warn); RUST_LOG overrides it
"
    )
}
