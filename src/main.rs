use std::env;
use std::process::ExitCode;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

mod analyze;
mod args;
mod error;
mod report;
mod rms;
mod scan;
mod wav;

use args::{Config, USAGE};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let argv: Vec<String> = env::args().collect();
    if args::wants_help(&argv) {
        println!("{USAGE}");
        return ExitCode::SUCCESS;
    }

    let result = Config::from_args(&argv).and_then(|config| analyze::run(&config));
    match result {
        Ok(summary) => {
            if summary.skipped > 0 {
                warn!(
                    "{} of {} files could not be decoded and are missing from the report",
                    summary.skipped,
                    summary.analyzed + summary.skipped
                );
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{}", err);
            ExitCode::from(err.exit_code())
        }
    }
}
