//! FROST secp256k1 ceremonies producing BIP-340 (taproot)
//! signatures.
use ceremony_protocol::{
    check_assignment, hex, Parameters, PartyNumber, RoundMessage,
    RoundNumber,
};
use frost::keys::{KeyPackage, PublicKeyPackage};
use frost_secp256k1_tr as frost;
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{
    core::{
        check_complete, check_round, identifiers, party_of,
        sender_identifier,
    },
    Error, Result, SignatureArtifact, ROUND_1, ROUND_2, ROUND_3,
};
use crate::{ParticipantHandle, PartialSigner, RoundDriver};

/// Key share for this ciphersuite.
pub type KeyShare = (KeyPackage, PublicKeyPackage);

/// Signature for this ciphersuite.
pub type Signature = frost::Signature;

/// Identifier for this ciphersuite.
pub type Identifier = frost::Identifier;

/// Group verifying key for this ciphersuite.
pub type VerifyingKey = frost::VerifyingKey;

/// PEM tag for key shares of this ciphersuite.
pub const TAG: &str = "FROST SECP256K1 TR KEY SHARE";
/// Version of the key share encoding.
pub const PEM_VERSION: u16 = 1;

super::core::key_share_pem!();
super::core::dkg::frost_dkg_impl!();
super::core::refresh::frost_refresh_impl!();
super::core::sign::frost_sign_impl!();
super::core::simulate::frost_simulate_impl!();
