//! Portage - encrypt and decrypt data through a remote transit service.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use portage::cli::output;
use portage::cli::{execute, Cli};

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env("PORTAGE_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("portage=debug")
        } else {
            EnvFilter::new("portage=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).without_time())
        .init();

    if let Err(e) = execute(cli.command) {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}
