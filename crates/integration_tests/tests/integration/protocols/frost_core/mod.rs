use anyhow::Result;
use ceremony_protocol::hex;

pub mod keygen;
pub mod refresh;
pub mod sign;

/// SHA-256 digest of `abc`.
const SIGNING_DIGEST: &str =
    "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad";

/// Payload signed by the signing tests.
pub fn make_signing_message() -> Result<Vec<u8>> {
    Ok(hex::decode(SIGNING_DIGEST)?)
}
