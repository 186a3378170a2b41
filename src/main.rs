use std::{io, process::ExitCode};

use clap::Parser;
use colored::Colorize;
use lending_tracker::{BookRegistry, Session};
use tracing_subscriber::EnvFilter;

/// Command-line arguments for the lending desk
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable debug logging on stderr
    #[arg(short, long)]
    verbose: bool,

    /// Start with an empty catalog instead of the four starter books
    #[arg(long)]
    no_seed: bool,

    /// Render "Display All Books" as JSON
    #[arg(long)]
    json: bool,
}

/// Install the stderr log subscriber; `RUST_LOG` wins over `--verbose`
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut registry = BookRegistry::new();
    registry.register_standard_observers();
    if !args.no_seed {
        registry.seed_default_catalog();
    }
    tracing::debug!(books = registry.len(), "catalog ready");

    let stdin = io::stdin();
    let mut session =
        Session::new(registry, stdin.lock(), io::stdout()).with_json_listing(args.json);

    match session.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "session aborted");
            eprintln!("{}", e.to_string().red());
            ExitCode::FAILURE
        }
    }
}
