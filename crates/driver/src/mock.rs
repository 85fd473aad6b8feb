//! Scripted participant handle for driver tests.
use ceremony_protocol::{PartyNumber, RoundMessage, RoundNumber};
use std::time::Duration;
use thiserror::Error;

use crate::{ParticipantHandle, PartialSigner};

#[derive(Debug, Error)]
pub enum MockError {
    #[error("rejected message from party {0}")]
    Rejected(u16),
    #[error("failed in round {0}")]
    Round(u16),
    #[error("not ready")]
    NotReady,
}

/// What a party sends in one round.
#[derive(Debug, Clone, Copy)]
pub enum Pattern {
    /// One message without a receiver.
    Broadcast,
    /// One message to every other party.
    UnicastAll,
    /// One message to the given receiver.
    UnicastTo(u16),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockOutput {
    pub party: u16,
    pub received: Vec<(u16, u16)>,
    pub contributions: Vec<u16>,
}

pub struct MockHandle {
    party: PartyNumber,
    parties: u16,
    script: Vec<Vec<Pattern>>,
    round: u16,
    pub proceeds: usize,
    pub received: Vec<(u16, u16)>,
    fail_incoming_from: Option<u16>,
    fail_round: Option<u16>,
    delay: Option<(u16, Duration)>,
    signing: bool,
    contributions: Vec<u16>,
}

impl MockHandle {
    pub fn new(party: u16, parties: u16, script: Vec<Vec<Pattern>>) -> Self {
        Self {
            party: PartyNumber::new(party).unwrap(),
            parties,
            script,
            round: 0,
            proceeds: 0,
            received: Vec::new(),
            fail_incoming_from: None,
            fail_round: None,
            delay: None,
            signing: false,
            contributions: Vec::new(),
        }
    }

    /// Same script for every party.
    pub fn uniform(parties: u16, script: Vec<Vec<Pattern>>) -> Vec<Self> {
        (1..=parties)
            .map(|party| Self::new(party, parties, script.clone()))
            .collect()
    }

    pub fn rejecting(mut self, sender: u16) -> Self {
        self.fail_incoming_from = Some(sender);
        self
    }

    pub fn failing_in_round(mut self, round: u16) -> Self {
        self.fail_round = Some(round);
        self
    }

    /// Block the calling thread when proceeding to `round`.
    pub fn stalling_in_round(mut self, round: u16, delay: Duration) -> Self {
        self.delay = Some((round, delay));
        self
    }
}

impl ParticipantHandle for MockHandle {
    type Error = MockError;
    type Message = String;
    type Output = MockOutput;

    fn party_number(&self) -> PartyNumber {
        self.party
    }

    fn handle_incoming(
        &mut self,
        message: RoundMessage<Self::Message>,
    ) -> Result<(), Self::Error> {
        let sender = message.sender().get();
        if self.fail_incoming_from == Some(sender) {
            return Err(MockError::Rejected(sender));
        }
        self.received.push((message.round().get(), sender));
        Ok(())
    }

    fn proceed(
        &mut self,
    ) -> Result<(RoundNumber, Vec<RoundMessage<Self::Message>>), Self::Error>
    {
        self.round += 1;
        self.proceeds += 1;
        if self.fail_round == Some(self.round) {
            return Err(MockError::Round(self.round));
        }
        if let Some((round, delay)) = self.delay {
            if round == self.round {
                std::thread::sleep(delay);
            }
        }

        let round = RoundNumber::new(self.round).unwrap();
        let sends = self
            .script
            .get(self.round as usize - 1)
            .cloned()
            .unwrap_or_default();

        let mut messages = Vec::new();
        for send in sends {
            let body = format!("{}:{}", self.round, self.party);
            match send {
                Pattern::Broadcast => messages
                    .push(RoundMessage::broadcast(round, self.party, body)),
                Pattern::UnicastAll => {
                    for receiver in 1..=self.parties {
                        if receiver != self.party.get() {
                            messages.push(RoundMessage::unicast(
                                round,
                                self.party,
                                PartyNumber::new(receiver).unwrap(),
                                body.clone(),
                            ));
                        }
                    }
                }
                Pattern::UnicastTo(receiver) => {
                    messages.push(RoundMessage::unicast(
                        round,
                        self.party,
                        PartyNumber::new(receiver).unwrap(),
                        body,
                    ));
                }
            }
        }
        Ok((round, messages))
    }

    fn create(&mut self) -> Result<Self::Output, Self::Error> {
        if self.proceeds == 0 {
            return Err(MockError::NotReady);
        }
        if self.signing && self.contributions.len() != self.parties as usize
        {
            return Err(MockError::NotReady);
        }
        Ok(MockOutput {
            party: self.party.get(),
            received: self.received.clone(),
            contributions: self.contributions.clone(),
        })
    }
}

impl PartialSigner for MockHandle {
    type Partial = Vec<u16>;

    fn partial(&mut self, _payload: &[u8]) -> Result<Vec<u16>, MockError> {
        self.signing = true;
        self.contributions = vec![self.party.get()];
        Ok(self.contributions.clone())
    }

    fn add(
        &mut self,
        partials: Vec<Vec<u16>>,
    ) -> Result<Vec<u16>, MockError> {
        for partial in partials {
            for party in partial {
                if !self.contributions.contains(&party) {
                    self.contributions.push(party);
                }
            }
        }
        self.contributions.sort();
        Ok(self.contributions.clone())
    }
}
