//! Ceremony configuration.
use anyhow::{bail, Result};
use ceremony_driver::{protocol::Parameters, ROUND_TIMEOUT};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Ciphersuite of a ceremony.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Suite {
    /// FROST over Ed25519.
    #[default]
    Ed25519,
    /// FROST over secp256k1 with taproot tweaks.
    Secp256k1Tr,
}

/// Configuration for key generation.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CeremonyConfig {
    /// Ciphersuite of the generated key.
    pub suite: Suite,

    /// Number of parties and threshold.
    pub parameters: Parameters,

    /// Where key shares are written.
    pub output: OutputConfig,

    /// Settings for the ceremony driver.
    pub driver: DriverConfig,
}

/// Location of generated key shares.
#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory for the key share files.
    ///
    /// Relative paths are resolved against the directory
    /// of the configuration file.
    pub directory: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
        }
    }
}

/// Settings for the ceremony driver.
#[derive(Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct DriverConfig {
    /// Seconds to wait for every party to finish a round
    /// when parties run concurrently.
    ///
    /// Default is 30 seconds.
    pub round_timeout: u64,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            round_timeout: ROUND_TIMEOUT.as_secs(),
        }
    }
}

impl CeremonyConfig {
    /// Load a ceremony config from a file path.
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        if !fs::try_exists(path.as_ref()).await? {
            bail!("file {} does not exist", path.as_ref().display());
        }

        let contents = fs::read_to_string(path.as_ref()).await?;
        let mut config: CeremonyConfig = toml::from_str(&contents)?;
        config.validate()?;

        let dir = Self::directory(path.as_ref())?;
        if config.output.directory.is_relative() {
            config.output.directory = dir.join(&config.output.directory);
        }

        Ok(config)
    }

    /// Check the values of the config.
    pub fn validate(&self) -> Result<()> {
        self.parameters.validate()?;
        if self.driver.round_timeout == 0 {
            bail!("round-timeout must be greater than zero");
        }
        Ok(())
    }

    /// Parent directory of the configuration file.
    fn directory(file: impl AsRef<Path>) -> Result<PathBuf> {
        match file.as_ref().parent() {
            Some(dir) => Ok(dir.to_path_buf()),
            None => bail!("configuration file has no parent directory"),
        }
    }
}
