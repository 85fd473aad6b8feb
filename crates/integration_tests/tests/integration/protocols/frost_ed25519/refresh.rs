use anyhow::Result;
use ceremony_driver::{
    frost::ed25519::{keygen, refresh, sign, KeyRefreshItem, KeyRefresher},
    ConcurrentDriver,
};
use ceremony_protocol::Parameters;
use std::collections::BTreeMap;

use crate::{
    protocols::frost_core::{make_signing_message, refresh::frost_refresh},
    test_utils::{init_tracing, numbers},
};

frost_refresh!();
