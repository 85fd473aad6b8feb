//! Command line tool to run threshold key ceremonies in process.
//!
//! # Configuration
//!
//! Key generation reads a configuration file (`ceremony.toml`):
//!
//! ```toml
//! suite = "ed25519"
//!
//! [parameters]
//! parties = 3
//! threshold = 1
//!
//! [output]
//! directory = "shares"
//! ```
//!
//! # Key generation
//!
//! ```no_run
//! ceremony keygen ceremony.toml
//! ```
//!
//! # Refresh
//!
//! ```no_run
//! ceremony refresh --output refreshed shares/party-1.pem shares/party-2.pem shares/party-3.pem
//! ```
//!
//! Leaving a share out of the refresh removes it from the group.
//!
//! # Sign
//!
//! ```no_run
//! ceremony sign --message "hello" shares/party-1.pem shares/party-3.pem
//! ```
#![forbid(unsafe_code)]

mod commands;
mod config;

#[doc(hidden)]
mod cli {
    use anyhow::Result;
    use clap::{Parser, Subcommand};
    use std::path::PathBuf;

    use super::commands;

    #[derive(Parser, Debug)]
    #[clap(author, version, about, long_about = None)]
    pub struct Ceremony {
        #[clap(subcommand)]
        cmd: Command,
    }

    #[derive(Debug, Subcommand)]
    pub enum Command {
        /// Generate key shares for every party.
        Keygen {
            /// Give every party its own task.
            #[clap(short, long)]
            concurrent: bool,

            /// Force overwrite of existing key shares.
            #[clap(short, long)]
            force: bool,

            /// Override the output directory.
            #[clap(short, long)]
            output: Option<PathBuf>,

            /// Override the round timeout in seconds.
            #[clap(long)]
            round_timeout: Option<u64>,

            /// Configuration file.
            config: PathBuf,
        },

        /// Refresh the key shares of a group.
        ///
        /// Party numbers are assigned in argument order. Shares
        /// not given are removed from the refreshed group, at
        /// least the signing threshold of shares must be given.
        Refresh {
            /// Force overwrite of existing key shares.
            #[clap(short, long)]
            force: bool,

            /// Directory for the refreshed key shares.
            #[clap(short, long)]
            output: PathBuf,

            /// Key share files.
            #[clap(required = true)]
            shares: Vec<PathBuf>,
        },

        /// Sign a message and print the signature as JSON.
        Sign {
            /// Message to sign.
            #[clap(short, long)]
            message: String,

            /// Signer that aggregates the signature shares.
            #[clap(short, long, default_value = "1")]
            aggregator: u16,

            /// Key share files of the signers.
            #[clap(required = true)]
            shares: Vec<PathBuf>,
        },
    }

    pub async fn run() -> Result<()> {
        let args = Ceremony::parse();
        match args.cmd {
            Command::Keygen {
                concurrent,
                force,
                output,
                round_timeout,
                config,
            } => {
                commands::keygen::run(
                    config,
                    commands::keygen::Options {
                        concurrent,
                        force,
                        output,
                        round_timeout,
                    },
                )
                .await?;
            }
            Command::Refresh {
                force,
                output,
                shares,
            } => commands::refresh::run(shares, output, force).await?,
            Command::Sign {
                message,
                aggregator,
                shares,
            } => commands::sign::run(shares, message, aggregator).await?,
        }
        Ok(())
    }
}

#[doc(hidden)]
#[tokio::main]
pub async fn main() -> anyhow::Result<()> {
    use tracing_subscriber::{
        layer::SubscriberExt, util::SubscriberInitExt,
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| {
                "ceremony=info,ceremony_driver=info".into()
            }),
        ))
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    if let Err(e) = cli::run().await {
        tracing::error!("{}", e);
        std::process::exit(1);
    }

    Ok(())
}
