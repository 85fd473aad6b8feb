use anyhow::Result;
use ceremony_driver::{
    frost::ed25519::{keygen, sign, KeyGenerator, KeyShare, TAG},
    ConcurrentDriver, RoundDriver,
};
use ceremony_protocol::{pem, Error as ProtocolError, Parameters};
use std::collections::BTreeSet;

use crate::{
    protocols::frost_core::{keygen::frost_keygen, make_signing_message},
    test_utils::{init_tracing, numbers},
};

frost_keygen!();
