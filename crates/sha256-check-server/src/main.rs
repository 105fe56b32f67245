use clap::Parser;
use sha256_check_core::logging;

mod cli;

use crate::cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging as early as possible.
    if let Err(err) = logging::init_logging(cli.trace_file.as_deref()) {
        logging::init_logging_stderr();
        tracing::warn!("falling back to stderr logging: {:#}", err);
    }

    if let Err(err) = cli.run().await {
        eprintln!("sha256-check error: {:#}", err);
        std::process::exit(1);
    }
}
