use anyhow::Result;
use clap::{Parser, Subcommand};
use sha256_check_core::config;
use std::net::SocketAddr;
use std::path::PathBuf;

mod commands;

/// Top-level CLI for the sha256-check service.
#[derive(Debug, Parser)]
#[command(name = "sha256-check")]
#[command(
    about = "Report the SHA-256 of the newest managed config file over HTTP",
    long_about = None
)]
pub struct Cli {
    /// Configuration file (default: XDG config dir, else built-in profiles).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Write tracing output to this file instead of stderr.
    #[arg(long, global = true)]
    pub trace_file: Option<PathBuf>,

    /// Defaults to `serve`.
    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Run the HTTP service.
    Serve {
        /// Address to bind, e.g. 0.0.0.0:3119.
        #[arg(long)]
        listen: Option<SocketAddr>,

        /// Error log receiving details of server-side failures.
        #[arg(long)]
        log_file: Option<PathBuf>,
    },

    /// Hash the newest file for a profile locally and print it.
    Check {
        /// Profile name, e.g. gateway.
        profile: String,

        /// Logical file name, e.g. pf.conf.
        #[arg(required_unless_present = "id", conflicts_with = "id")]
        file: Option<String>,

        /// Container id instead of a file name.
        #[arg(long)]
        id: Option<String>,
    },

    /// List configured profiles and their routes.
    Profiles,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let mut cfg = config::load(self.config.as_deref())?;
        tracing::debug!("loaded config: {:?}", cfg);

        match self.command.unwrap_or(CliCommand::Serve {
            listen: None,
            log_file: None,
        }) {
            CliCommand::Serve { listen, log_file } => {
                if let Some(listen) = listen {
                    cfg.listen = listen;
                }
                if let Some(log_file) = log_file {
                    cfg.error_log = log_file;
                }
                commands::run_serve(&cfg).await?;
            }
            CliCommand::Check { profile, file, id } => {
                commands::run_check(&cfg, &profile, file.as_deref(), id.as_deref())?;
            }
            CliCommand::Profiles => {
                commands::run_profiles(&cfg);
            }
        }

        Ok(())
    }
}
