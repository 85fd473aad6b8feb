use anyhow::Result;
use ceremony_driver::ConcurrentDriver;
use std::{path::PathBuf, time::Duration};

use super::{check_overwrite, share_files, write_shares};
use crate::config::{CeremonyConfig, Suite};

/// Flags that override the configuration file.
pub struct Options {
    pub concurrent: bool,
    pub force: bool,
    pub output: Option<PathBuf>,
    pub round_timeout: Option<u64>,
}

macro_rules! generate {
    ($suite:ident, $config:expr, $concurrent:expr) => {{
        use ceremony_driver::frost::$suite::{keygen, KeyGenerator};
        let parameters = $config.parameters;
        let key_shares = if $concurrent {
            ConcurrentDriver::initialize(parameters.parties, |party| {
                KeyGenerator::new(party, parameters)
            })?
            .with_round_timeout(Duration::from_secs(
                $config.driver.round_timeout,
            ))
            .run()
            .await?
        } else {
            keygen(parameters)?
        };
        key_shares
            .iter()
            .map(ceremony_driver::KeyShare::try_from)
            .collect::<std::result::Result<Vec<_>, _>>()?
    }};
}

/// Generate key shares and write one file per party.
pub async fn run(config: PathBuf, options: Options) -> Result<()> {
    let mut config = CeremonyConfig::load(config).await?;
    if let Some(output) = options.output {
        config.output.directory = output;
    }
    if let Some(round_timeout) = options.round_timeout {
        config.driver.round_timeout = round_timeout;
    }
    config.validate()?;

    let files = share_files(
        &config.output.directory,
        config.parameters.parties as usize,
    );
    check_overwrite(&files, options.force).await?;

    tracing::info!(
        suite = ?config.suite,
        parties = config.parameters.parties,
        threshold = config.parameters.threshold,
        concurrent = options.concurrent,
        "keygen::start"
    );

    let key_shares = match config.suite {
        Suite::Ed25519 => generate!(ed25519, config, options.concurrent),
        Suite::Secp256k1Tr => {
            generate!(secp256k1_tr, config, options.concurrent)
        }
    };
    write_shares(&files, key_shares).await
}
