use anyhow::Result;
use std::path::PathBuf;

use super::{check_overwrite, read_shares, share_files, write_shares};
use crate::config::Suite;

macro_rules! refresh_shares {
    ($suite:ident, $encoded:expr) => {{
        use ceremony_driver::frost::$suite::{refresh, KeyRefreshItem, KeyShare};
        let mut items = Vec::with_capacity($encoded.len());
        for encoded in &$encoded {
            let key_share: KeyShare = encoded.try_into()?;
            items.push(KeyRefreshItem::from(key_share));
        }
        refresh(items)?
            .iter()
            .map(ceremony_driver::KeyShare::try_from)
            .collect::<std::result::Result<Vec<_>, _>>()?
    }};
}

/// Refresh the given key shares into `output`.
pub async fn run(
    shares: Vec<PathBuf>,
    output: PathBuf,
    force: bool,
) -> Result<()> {
    let files = share_files(&output, shares.len());
    check_overwrite(&files, force).await?;

    let (suite, encoded) = read_shares(&shares).await?;
    tracing::info!(suite = ?suite, parties = shares.len(), "refresh::start");

    let refreshed = match suite {
        Suite::Ed25519 => refresh_shares!(ed25519, encoded),
        Suite::Secp256k1Tr => refresh_shares!(secp256k1_tr, encoded),
    };
    write_shares(&files, refreshed).await
}
