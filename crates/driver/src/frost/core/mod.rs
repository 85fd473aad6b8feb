//! Macros and helpers shared by the FROST ciphersuites.
use ceremony_protocol::{party_number, PartyNumber, RoundNumber};

use super::{Error, Result};

pub(crate) mod dkg;
pub(crate) mod refresh;
pub(crate) mod sign;
pub(crate) mod simulate;

/// Identifiers for party numbers `1..=parties`.
pub(crate) fn identifiers<I>(parties: u16) -> Result<Vec<I>>
where
    I: TryFrom<u16>,
    Error: From<I::Error>,
{
    (1..=parties)
        .map(|number| Ok(I::try_from(number)?))
        .collect()
}

/// Identifier of the party that sent a message.
pub(crate) fn sender_identifier<I: Copy>(
    identifiers: &[I],
    sender: PartyNumber,
) -> Result<I> {
    identifiers
        .get(sender.get() as usize - 1)
        .copied()
        .ok_or(Error::UnknownSender(sender.get()))
}

/// Party number of the slot holding an identifier.
pub(crate) fn party_of<I: PartialEq>(
    identifiers: &[I],
    id: &I,
) -> Result<PartyNumber> {
    let index = identifiers
        .iter()
        .position(|i| i == id)
        .ok_or(Error::UnknownIdentifier)?;
    Ok(party_number(index)?)
}

/// Ensure a message belongs to the round the handle last
/// proceeded to.
pub(crate) fn check_round(
    current: Option<RoundNumber>,
    message: RoundNumber,
) -> Result<()> {
    match current {
        Some(round) if round == message => Ok(()),
        _ => Err(Error::OutOfSequence {
            expected: current.map(|round| round.get()).unwrap_or(0),
            received: message.get(),
        }),
    }
}

/// Ensure every other party delivered a message for a round.
pub(crate) fn check_complete(
    round: RoundNumber,
    expected: usize,
    received: usize,
) -> Result<()> {
    if expected != received {
        return Err(Error::MissingMessages {
            round: round.get(),
            expected,
            received,
        });
    }
    Ok(())
}

macro_rules! key_share_pem {
    () => {
        impl TryFrom<&KeyShare> for crate::KeyShare {
            type Error = ceremony_protocol::Error;

            fn try_from(
                value: &KeyShare,
            ) -> std::result::Result<Self, Self::Error> {
                let key_share = serde_json::to_vec(value)?;
                let key_share = ceremony_protocol::pem::Pem::new(TAG, key_share);
                let key_share = ceremony_protocol::pem::encode(&key_share);
                Ok(Self {
                    version: PEM_VERSION,
                    contents: key_share,
                })
            }
        }

        impl TryFrom<&crate::KeyShare> for KeyShare {
            type Error = ceremony_protocol::Error;

            fn try_from(
                value: &crate::KeyShare,
            ) -> std::result::Result<Self, Self::Error> {
                let key_share = ceremony_protocol::pem::parse(&value.contents)?;
                if key_share.tag() != TAG {
                    return Err(ceremony_protocol::Error::PemTag(
                        TAG.to_string(),
                        key_share.tag().to_string(),
                    ));
                }
                let key_share: KeyShare =
                    serde_json::from_slice(key_share.contents())?;
                Ok(key_share)
            }
        }
    };
}

pub(crate) use key_share_pem;
