//! djangify CLI - convert HTML files into Django templates.
//!
//! Rewrites `src`, `href` and inline `url(...)` references to local files
//! into `{% static '...' %}` tags and writes the results to an output
//! directory (`Modified_files/` by default).

mod commands;
mod error;
mod output;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use commands::ConvertArgs;
use output::Output;

/// Converts specified HTML files, or all HTML files within a directory,
/// into Django templates.
#[derive(Parser)]
#[command(name = "djangify", version, about)]
struct Cli {
    #[command(flatten)]
    convert: ConvertArgs,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.convert.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.convert.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output.error(&format!("Error: {err}"));
            ExitCode::FAILURE
        }
    }
}
