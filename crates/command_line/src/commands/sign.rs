use anyhow::{anyhow, Result};
use ceremony_driver::protocol::{party_number, PartyNumber};
use std::path::PathBuf;

use super::read_shares;
use crate::config::Suite;

macro_rules! sign_message {
    ($suite:ident, $encoded:expr, $message:expr, $aggregator:expr) => {{
        use ceremony_driver::frost::$suite::{
            sign, signature_artifact, KeyShare,
        };
        let mut key_shares: Vec<KeyShare> =
            Vec::with_capacity($encoded.len());
        for encoded in &$encoded {
            key_shares.push(encoded.try_into()?);
        }
        let participants = (0..key_shares.len())
            .map(party_number)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        let signature =
            sign(&key_shares, &participants, $message, $aggregator)?;
        let verifying_key = key_shares
            .first()
            .map(|key_share| *key_share.1.verifying_key())
            .ok_or_else(|| anyhow!("no key shares given"))?;
        signature_artifact(&signature, &verifying_key, $message)?
    }};
}

/// Sign a message with the given key shares and print the
/// signature as JSON.
pub async fn run(
    shares: Vec<PathBuf>,
    message: String,
    aggregator: u16,
) -> Result<()> {
    let aggregator = PartyNumber::new(aggregator)
        .ok_or_else(|| anyhow!("aggregator must be greater than zero"))?;
    let (suite, encoded) = read_shares(&shares).await?;
    tracing::info!(
        suite = ?suite,
        signers = shares.len(),
        aggregator = aggregator.get(),
        "sign::start"
    );

    let payload = message.as_bytes();
    let artifact = match suite {
        Suite::Ed25519 => {
            sign_message!(ed25519, encoded, payload, aggregator)
        }
        Suite::Secp256k1Tr => {
            sign_message!(secp256k1_tr, encoded, payload, aggregator)
        }
    };
    println!("{}", serde_json::to_string_pretty(&artifact)?);
    Ok(())
}
