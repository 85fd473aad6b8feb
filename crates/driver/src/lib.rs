//! Drivers that run round-based multi-party computation
//! ceremonies to completion.
//!
//! The driver knows nothing about the cryptography of a ceremony.
//! Each party is a [ParticipantHandle]; the driver calls `proceed`
//! on every handle, routes the outgoing messages by receiver and
//! repeats until a round in which no handle produced a message.
//!
//! [RoundDriver] runs every handle in the calling thread, while
//! [ConcurrentDriver] gives each handle its own task and
//! synchronizes rounds with an explicit barrier.
#![deny(missing_docs)]
#![forbid(unsafe_code)]
#![cfg_attr(all(doc, CHANNEL_NIGHTLY), feature(doc_auto_cfg))]

mod concurrent;
mod error;
mod handle;
mod key_share;
mod round;
mod routing;

#[cfg(test)]
pub(crate) mod mock;

#[cfg(feature = "frost")]
pub mod frost;

pub use concurrent::{ConcurrentDriver, ROUND_TIMEOUT};
pub use error::{Error, Violation};
pub use handle::{ParticipantHandle, PartialSigner};
pub use key_share::KeyShare;
pub use round::{CeremonyState, RoundDriver, RoundSummary};

pub use ceremony_protocol as protocol;

#[cfg(feature = "frost-ed25519")]
pub use frost_ed25519;

#[cfg(feature = "frost-secp256k1-tr")]
pub use frost_secp256k1_tr;

/// Result type for the driver library.
pub type Result<T> = std::result::Result<T, Error>;
