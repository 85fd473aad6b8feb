use anyhow::Result;
use ceremony_driver::{
    frost::secp256k1_tr::{keygen, sign, KeyGenerator, KeyShare, TAG},
    ConcurrentDriver, RoundDriver,
};
use ceremony_protocol::{pem, Error as ProtocolError, Parameters};
use std::collections::BTreeSet;

use crate::{
    protocols::frost_core::{keygen::frost_keygen, make_signing_message},
    test_utils::{init_tracing, numbers},
};

frost_keygen!();
