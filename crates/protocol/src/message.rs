use serde::{Deserialize, Serialize};

use crate::{PartyNumber, RoundNumber};

/// Round message with additional meta data.
///
/// The body is opaque to everything except the participant
/// that consumes it; routing only looks at the sender
/// and the optional receiver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundMessage<Body> {
    round: RoundNumber,
    sender: PartyNumber,
    receiver: Option<PartyNumber>,
    body: Body,
}

impl<Body> RoundMessage<Body> {
    /// Message addressed to a single party.
    pub fn unicast(
        round: RoundNumber,
        sender: PartyNumber,
        receiver: PartyNumber,
        body: Body,
    ) -> Self {
        Self {
            round,
            sender,
            receiver: Some(receiver),
            body,
        }
    }

    /// Message delivered to every party except the sender.
    pub fn broadcast(
        round: RoundNumber,
        sender: PartyNumber,
        body: Body,
    ) -> Self {
        Self {
            round,
            sender,
            receiver: None,
            body,
        }
    }

    /// Round that produced this message.
    pub fn round(&self) -> RoundNumber {
        self.round
    }

    /// Party that produced this message.
    pub fn sender(&self) -> PartyNumber {
        self.sender
    }

    /// Receiver of this message, `None` for a broadcast.
    pub fn receiver(&self) -> Option<PartyNumber> {
        self.receiver
    }

    /// Whether this message is delivered to all other parties.
    pub fn is_broadcast(&self) -> bool {
        self.receiver.is_none()
    }

    /// Message payload.
    pub fn body(&self) -> &Body {
        &self.body
    }

    /// Consume this message into the sender and body.
    pub fn into_body(self) -> (Body, PartyNumber) {
        (self.body, self.sender)
    }
}
