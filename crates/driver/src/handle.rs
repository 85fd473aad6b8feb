//! Capabilities a protocol engine exposes to the drivers.
use ceremony_protocol::{
    party_number, Error as ProtocolError, PartyNumber, RoundMessage,
    RoundNumber,
};

use crate::{Error, Result};

/// One party's local view of a ceremony.
///
/// Implementations wrap a cryptographic engine; the drivers
/// only move messages between handles and never inspect
/// message bodies.
pub trait ParticipantHandle {
    /// Error type for results.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Message payload exchanged between parties.
    type Message: std::fmt::Debug + Clone;

    /// Output when the protocol is completed.
    type Output;

    /// Party number of this handle.
    fn party_number(&self) -> PartyNumber;

    /// Handle an incoming message.
    fn handle_incoming(
        &mut self,
        message: RoundMessage<Self::Message>,
    ) -> std::result::Result<(), Self::Error>;

    /// Proceed to the next round.
    ///
    /// Returns the round number and the messages to send;
    /// an empty batch from every party ends the ceremony.
    #[allow(clippy::type_complexity)]
    fn proceed(
        &mut self,
    ) -> std::result::Result<
        (RoundNumber, Vec<RoundMessage<Self::Message>>),
        Self::Error,
    >;

    /// Produce the output once the ceremony has converged.
    fn create(&mut self) -> std::result::Result<Self::Output, Self::Error>;
}

/// Signing handles produce detached partial signatures
/// which one aggregator merges before calling `create`.
pub trait PartialSigner: ParticipantHandle {
    /// Partial signature contributed by one or more parties.
    type Partial: std::fmt::Debug + Clone;

    /// Compute this party's partial signature for a payload.
    fn partial(
        &mut self,
        payload: &[u8],
    ) -> std::result::Result<Self::Partial, Self::Error>;

    /// Merge partial signatures from other parties and
    /// return the combined partial.
    fn add(
        &mut self,
        partials: Vec<Self::Partial>,
    ) -> std::result::Result<Self::Partial, Self::Error>;
}

/// Call `factory` once for each party number in `1..=parties`.
pub(crate) fn create_handles<H, F>(parties: u16, mut factory: F) -> Result<Vec<H>>
where
    H: ParticipantHandle,
    F: FnMut(PartyNumber) -> std::result::Result<H, H::Error>,
{
    if parties < 2 {
        return Err(ProtocolError::TooFewParties(parties).into());
    }
    let mut handles = Vec::with_capacity(parties as usize);
    for index in 0..parties as usize {
        let party = party_number(index)?;
        let handle = factory(party).map_err(|e| Error::Initialize {
            party: party.get(),
            source: Box::new(e),
        })?;
        handles.push(handle);
    }
    Ok(handles)
}

/// Ensure there are at least two handles and that each
/// handle sits in the slot of its party number.
pub(crate) fn check_slots<H: ParticipantHandle>(handles: &[H]) -> Result<u16> {
    let parties: u16 = handles
        .len()
        .try_into()
        .map_err(|_| ProtocolError::PartyIndexOverflow(handles.len()))?;
    if parties < 2 {
        return Err(ProtocolError::TooFewParties(parties).into());
    }
    for (index, handle) in handles.iter().enumerate() {
        let slot = party_number(index)?;
        if handle.party_number() != slot {
            return Err(Error::SlotMismatch {
                slot: slot.get(),
                party: handle.party_number().get(),
            });
        }
    }
    Ok(parties)
}
