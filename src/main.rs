use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use jira_provision::cli::{self, Cli};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over --verbose
    let default_filter = if cli.verbose {
        "jira_provision=debug"
    } else {
        "jira_provision=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    cli::run(&cli).await
}
