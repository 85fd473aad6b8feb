use serde::{Deserialize, Serialize};

/// Encoded key share.
///
/// The contents are a PEM document whose tag names the
/// ciphersuite of the share.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyShare {
    /// Version of the encoding.
    pub version: u16,
    /// PEM encoded key share.
    pub contents: String,
}
