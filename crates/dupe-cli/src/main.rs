//! Dupe CLI - flag duplicate GitHub issues with an LLM similarity oracle.

use clap::Parser;
use dupe_cli::Cli;
use tracing_subscriber::EnvFilter;

fn main() {
    // Initialize tracing (log to stderr, stdout is for outputs)
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> dupe_cli::Result<()> {
    let cli = Cli::parse();
    dupe_cli::execute(cli)?;
    Ok(())
}
