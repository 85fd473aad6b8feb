//! FROST threshold Schnorr ceremonies.
//!
//! Each ciphersuite module exposes handles for distributed key
//! generation, proactive key refresh and signing together with
//! helpers that simulate a whole ceremony in process.
use ceremony_protocol::RoundNumber;
use serde::{Deserialize, Serialize};

mod error;

pub(crate) mod core;

#[cfg(feature = "frost-ed25519")]
pub mod ed25519;

#[cfg(feature = "frost-secp256k1-tr")]
pub mod secp256k1_tr;

pub use error::Error;

/// Result type for the FROST protocol.
pub type Result<T> = std::result::Result<T, Error>;

const fn round(number: u16) -> RoundNumber {
    match RoundNumber::new(number) {
        Some(round) => round,
        None => panic!("round numbers start at one"),
    }
}

pub(crate) const ROUND_1: RoundNumber = round(1);
pub(crate) const ROUND_2: RoundNumber = round(2);
pub(crate) const ROUND_3: RoundNumber = round(3);

/// Signature produced by a signing ceremony.
///
/// All fields are hex encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureArtifact {
    /// Serialized signature.
    pub signature: String,
    /// Serialized group verifying key.
    pub verifying_key: String,
    /// Signed message.
    pub message: String,
}
