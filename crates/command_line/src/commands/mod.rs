//! Subcommands of the command line tool.
use anyhow::{bail, Result};
use ceremony_driver::{
    frost::{ed25519, secp256k1_tr},
    protocol::pem,
    KeyShare,
};
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::config::Suite;

pub mod keygen;
pub mod refresh;
pub mod sign;

impl Suite {
    /// Determine the ciphersuite from the tag of a PEM document.
    fn detect(contents: &str) -> Result<Self> {
        let document = pem::parse(contents)?;
        match document.tag() {
            ed25519::TAG => Ok(Suite::Ed25519),
            secp256k1_tr::TAG => Ok(Suite::Secp256k1Tr),
            tag => bail!("unknown key share type '{}'", tag),
        }
    }

    fn version(&self) -> u16 {
        match self {
            Suite::Ed25519 => ed25519::PEM_VERSION,
            Suite::Secp256k1Tr => secp256k1_tr::PEM_VERSION,
        }
    }
}

/// Key share files for the parties in `1..=parties`.
fn share_files(dir: &Path, parties: usize) -> Vec<PathBuf> {
    (1..=parties)
        .map(|party| dir.join(format!("party-{}.pem", party)))
        .collect()
}

/// Fail if a file exists and overwriting was not requested.
async fn check_overwrite(files: &[PathBuf], force: bool) -> Result<()> {
    for file in files {
        if fs::try_exists(file).await? && !force {
            bail!(
                "file {} already exists, use --force to overwrite",
                file.display()
            );
        }
    }
    Ok(())
}

/// Read key share files which must all belong to one ciphersuite.
async fn read_shares(files: &[PathBuf]) -> Result<(Suite, Vec<KeyShare>)> {
    let mut suite = None;
    let mut key_shares = Vec::with_capacity(files.len());
    for file in files {
        let contents = fs::read_to_string(file).await?;
        let detected = Suite::detect(&contents)?;
        match suite {
            None => suite = Some(detected),
            Some(expected) if expected != detected => {
                bail!(
                    "key share {} is not a {:?} key share",
                    file.display(),
                    expected
                );
            }
            _ => {}
        }
        key_shares.push(KeyShare {
            version: detected.version(),
            contents,
        });
    }

    match suite {
        Some(suite) => Ok((suite, key_shares)),
        None => bail!("no key shares given"),
    }
}

/// Write key shares to the files in party order.
async fn write_shares(files: &[PathBuf], key_shares: Vec<KeyShare>) -> Result<()> {
    if files.len() != key_shares.len() {
        bail!(
            "expected {} key shares, got {}",
            files.len(),
            key_shares.len()
        );
    }
    for (file, key_share) in files.iter().zip(key_shares) {
        if let Some(dir) = file.parent() {
            fs::create_dir_all(dir).await?;
        }
        fs::write(file, key_share.contents.as_bytes()).await?;
        tracing::info!(file = %file.display(), "key_share::write");
    }
    Ok(())
}
