//! Types shared by every participant in a round-based ceremony.
//!
//! A ceremony is a fixed set of parties numbered `1..=n` that
//! exchange [RoundMessage]s until no party has anything left to
//! send. Messages without a receiver are broadcast to every party
//! except the sender.
#![deny(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod message;
mod parameters;

pub use error::Error;
pub use message::RoundMessage;
pub use parameters::{check_assignment, Parameters};

pub use hex;
pub use pem;
pub use uuid;

use std::num::NonZeroU16;

/// Result type for the protocol library.
pub type Result<T> = std::result::Result<T, Error>;

/// Number of a party in a ceremony, starting at one.
pub type PartyNumber = NonZeroU16;

/// Number of a protocol round, starting at one.
pub type RoundNumber = NonZeroU16;

/// Identifier for a single ceremony run.
pub type CeremonyId = uuid::Uuid;

/// Convert a zero-based slot index into a party number.
pub fn party_number(index: usize) -> Result<PartyNumber> {
    let value: u16 = (index + 1)
        .try_into()
        .map_err(|_| Error::PartyIndexOverflow(index))?;
    PartyNumber::new(value).ok_or(Error::ZeroNumber)
}
