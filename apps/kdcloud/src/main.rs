//! kdcloud binary
//!
//! Usage: `kdcloud <input_file>` where the input is a surface cloud of
//! points in legacy VTK format. See `kdcloud --help` for query options.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use kdcloud_cli::{run, AppError, Cli, RunSummary};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match execute(&cli) {
        Ok(summary) => {
            tracing::info!(
                "Found {} of {} points, written to {}",
                summary.found,
                summary.cloud_size,
                summary.output.display()
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("[-] ERROR! {}", err);
            ExitCode::FAILURE
        }
    }
}

fn execute(cli: &Cli) -> Result<RunSummary, AppError> {
    let config = cli.resolve_config()?;
    let stdout = io::stdout();
    run(&config, &cli.input, &mut stdout.lock())
}

/// Log to stderr; `RUST_LOG` wins over the `--verbose` default
fn init_logging(verbose: bool) {
    let default = if verbose {
        "kdcloud=debug,kdcloud_cli=debug,kdcloud_core=debug,kdcloud_io=debug"
    } else {
        "kdcloud=info,kdcloud_cli=info,kdcloud_core=info,kdcloud_io=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
