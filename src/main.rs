// folio entry point.
// Parses arguments, initializes logging, and runs the selected command.

mod app;
mod cache;
mod cli;
mod clock;
mod error;
mod github;
mod page;
mod portfolio;
mod projects;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::Cli;

/// Initialize the tracing subscriber.
///
/// `--debug` forces `folio=debug`; otherwise `RUST_LOG` applies, defaulting
/// to `folio=info`. Logs go to stderr so `folio fetch` output stays clean.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("folio=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("folio=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("folio starting with args: {:?}", cli);

    match app::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}
