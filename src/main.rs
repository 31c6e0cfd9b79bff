//! Entry point for the `corpus` binary.

use clap::Parser;

use corpus_downloader::cli::{Cli, run_command};
use corpus_downloader::config::Config;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.debug);

    let config = Config::from_env()?;
    run_command(cli.command, &config).await
}

fn init_tracing(verbose: bool, debug: bool) {
    let default_filter = if debug {
        "corpus_downloader=debug"
    } else if verbose {
        "corpus_downloader=info"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
