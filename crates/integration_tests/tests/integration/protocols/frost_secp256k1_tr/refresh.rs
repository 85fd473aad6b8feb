use anyhow::Result;
use ceremony_driver::{
    frost::secp256k1_tr::{keygen, refresh, sign, KeyRefreshItem, KeyRefresher},
    ConcurrentDriver,
};
use ceremony_protocol::Parameters;
use std::collections::BTreeMap;

use crate::{
    protocols::frost_core::{make_signing_message, refresh::frost_refresh},
    test_utils::{init_tracing, numbers},
};

frost_refresh!();
