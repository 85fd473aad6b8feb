use anyhow::Result;
use ceremony_driver::frost::secp256k1_tr::{
    keygen, presign, sign, signature_artifact, verify_artifact,
};
use ceremony_protocol::Parameters;

use crate::{
    protocols::frost_core::{make_signing_message, sign::frost_sign},
    test_utils::{init_tracing, numbers},
};

frost_sign!();
