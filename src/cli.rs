//! Command line: `corner-debugger <SERIAL> [DOWNSCALE]`.

use crate::types::Downscale;
use clap::Parser;
use std::io::{self, Write};

/// Live view of the corner and hint points a device logs under JNIpart.
#[derive(Parser, Debug)]
#[command(name = "corner-debugger", version, about)]
pub struct Cli {
    /// Device serial, as listed by `adb devices`
    pub serial: String,

    /// Divide device pixel coordinates (1080x1920) by this factor
    #[arg(default_value = "4", value_parser = parse_downscale)]
    pub downscale: Downscale,
}

fn parse_downscale(s: &str) -> Result<Downscale, String> {
    let factor: i32 = s
        .trim()
        .parse()
        .map_err(|_| format!("'{s}' is not a valid downscale argument. Must be an integer."))?;
    Downscale::new(factor)
        .ok_or_else(|| format!("'{s}' is not a valid downscale argument. Must be at least 1."))
}

/// Exit status for a failed parse: 0 for --help/--version, 1 otherwise.
pub fn exit_code(err: &clap::Error) -> i32 {
    if err.use_stderr() { 1 } else { 0 }
}

/// Write a parse failure (message plus usage) to `out`; returns the exit status.
pub fn report(err: &clap::Error, out: &mut impl Write) -> i32 {
    if let Err(e) = write!(out, "{}", err.render()).and_then(|()| out.flush()) {
        log::warn!("could not print argument error: {e}");
    }
    exit_code(err)
}

/// Parse the process arguments. On failure, report to stdout and exit.
pub fn parse_or_exit() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => std::process::exit(report(&err, &mut io::stdout().lock())),
    }
}
