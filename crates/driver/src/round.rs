//! Synchronous driver that advances every party in the
//! calling thread.
use ceremony_protocol::{CeremonyId, PartyNumber, RoundMessage, RoundNumber};

use crate::{
    handle::{check_slots, create_handles},
    routing::{route, validate_batch},
    Error, ParticipantHandle, PartialSigner, Result, Violation,
};

/// Lifecycle of a ceremony.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CeremonyState {
    /// Handles are ready and no round has been driven.
    Created,
    /// Messages from the previous round are being delivered.
    HandlingIncoming,
    /// Handles are advancing to the next round.
    Proceeding,
    /// Every handle produced an empty batch in the same round.
    Converged,
    /// Outputs have been created and the handles consumed.
    Finalized,
    /// A failure stopped the ceremony.
    Aborted,
}

/// Record of one driven round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundSummary {
    /// Messages delivered before the handles proceeded.
    pub delivered: usize,
    /// Round number reported by each party.
    pub rounds: Vec<RoundNumber>,
    /// Number of messages produced by each party.
    pub batch_sizes: Vec<usize>,
}

impl RoundSummary {
    /// Whether no party produced a message.
    pub fn is_terminal(&self) -> bool {
        self.batch_sizes.iter().all(|size| *size == 0)
    }
}

/// Drives a set of participant handles through a ceremony.
///
/// In every step the messages produced in the previous step are
/// delivered and then each handle proceeds in party order. The
/// ceremony converges once all parties produce an empty batch
/// in the same step.
pub struct RoundDriver<H: ParticipantHandle> {
    id: CeremonyId,
    handles: Vec<H>,
    pending: Vec<Vec<RoundMessage<H::Message>>>,
    state: CeremonyState,
    history: Vec<RoundSummary>,
}

impl<H: ParticipantHandle> RoundDriver<H> {
    /// Create a driver from handles ordered by party number.
    pub fn new(handles: Vec<H>) -> Result<Self> {
        let parties = check_slots(&handles)?;
        let id = CeremonyId::new_v4();
        tracing::debug!(id = %id, parties = parties, "ceremony::created");

        Ok(Self {
            id,
            handles,
            pending: Vec::new(),
            state: CeremonyState::Created,
            history: Vec::new(),
        })
    }

    /// Create a driver by calling `factory` once for each
    /// party number in `1..=parties`.
    pub fn initialize<F>(parties: u16, factory: F) -> Result<Self>
    where
        F: FnMut(PartyNumber) -> std::result::Result<H, H::Error>,
    {
        Self::new(create_handles(parties, factory)?)
    }

    /// Ceremony identifier used in log output.
    pub fn id(&self) -> &CeremonyId {
        &self.id
    }

    /// Current state.
    pub fn state(&self) -> CeremonyState {
        self.state
    }

    /// Handles in party order.
    ///
    /// Empty once the outputs have been created.
    pub fn handles(&self) -> &[H] {
        &self.handles
    }

    /// Rounds driven so far.
    pub fn history(&self) -> &[RoundSummary] {
        &self.history
    }

    /// Drive a single round.
    ///
    /// Returns `true` while more rounds are needed.
    pub fn step(&mut self) -> Result<bool> {
        match self.state {
            CeremonyState::Converged => return Ok(false),
            CeremonyState::Finalized => return Err(Error::Finalized),
            CeremonyState::Aborted => return Err(Error::Aborted),
            _ => {}
        }

        let span = tracing::debug_span!(
            "ceremony",
            id = %self.id,
            step = self.history.len() + 1
        );
        let _enter = span.enter();

        match self.advance() {
            Ok(more) => Ok(more),
            Err(e) => {
                tracing::warn!(error = %e, "ceremony::aborted");
                self.state = CeremonyState::Aborted;
                self.pending.clear();
                Err(e)
            }
        }
    }

    /// Drive rounds until the ceremony converges.
    ///
    /// Calling this again after convergence does nothing.
    pub fn run(&mut self) -> Result<()> {
        while self.step()? {}
        Ok(())
    }

    /// Consume the handles and create their outputs in
    /// party order.
    pub fn finalize(&mut self) -> Result<Vec<H::Output>> {
        self.ensure_converged()?;
        let mut outputs = Vec::with_capacity(self.handles.len());
        for mut handle in std::mem::take(&mut self.handles) {
            let party = handle.party_number().get();
            match handle.create() {
                Ok(output) => outputs.push(output),
                Err(e) => {
                    self.state = CeremonyState::Aborted;
                    return Err(Error::Finalize {
                        party,
                        source: Box::new(e),
                    });
                }
            }
        }
        self.state = CeremonyState::Finalized;
        tracing::info!(id = %self.id, outputs = outputs.len(), "ceremony::finalized");
        Ok(outputs)
    }

    fn ensure_converged(&self) -> Result<()> {
        match self.state {
            CeremonyState::Converged => Ok(()),
            CeremonyState::Finalized => Err(Error::Finalized),
            CeremonyState::Aborted => Err(Error::Aborted),
            _ => Err(Error::NotReady),
        }
    }

    fn parties(&self) -> u16 {
        self.handles.len() as u16
    }

    fn advance(&mut self) -> Result<bool> {
        self.state = CeremonyState::HandlingIncoming;
        let inboxes = route(std::mem::take(&mut self.pending));
        let mut delivered = 0;
        for (handle, inbox) in self.handles.iter_mut().zip(inboxes) {
            for message in inbox {
                let round = message.round().get();
                let sender = message.sender().get();
                handle.handle_incoming(message).map_err(|e| {
                    Error::ProtocolViolation {
                        round,
                        party: handle.party_number().get(),
                        violation: Violation::Incoming {
                            sender,
                            source: Box::new(e),
                        },
                    }
                })?;
                delivered += 1;
            }
        }

        self.state = CeremonyState::Proceeding;
        let parties = self.parties();
        let step = (self.history.len() + 1) as u16;
        let mut rounds = Vec::with_capacity(self.handles.len());
        let mut batches = Vec::with_capacity(self.handles.len());
        for handle in self.handles.iter_mut() {
            let party = handle.party_number();
            let (round, batch) =
                handle.proceed().map_err(|e| Error::ProtocolViolation {
                    round: step,
                    party: party.get(),
                    violation: Violation::Proceed(Box::new(e)),
                })?;
            validate_batch(party, parties, round, &batch)?;
            rounds.push(round);
            batches.push(batch);
        }

        let summary = RoundSummary {
            delivered,
            rounds,
            batch_sizes: batches.iter().map(Vec::len).collect(),
        };
        tracing::debug!(
            delivered = summary.delivered,
            batch_sizes = ?summary.batch_sizes,
            "ceremony::round"
        );

        let terminal = summary.is_terminal();
        self.history.push(summary);
        if terminal {
            self.state = CeremonyState::Converged;
            tracing::info!(
                rounds = self.history.len(),
                "ceremony::converged"
            );
            Ok(false)
        } else {
            self.pending = batches;
            Ok(true)
        }
    }
}

impl<H: PartialSigner> RoundDriver<H> {
    /// Sign a payload once a presign ceremony has converged.
    ///
    /// Every party computes its partial signature, the
    /// `aggregator` merges the partials of the other parties
    /// and creates the final signature. The handles are
    /// consumed.
    pub fn sign(
        &mut self,
        payload: &[u8],
        aggregator: PartyNumber,
    ) -> Result<H::Output> {
        self.ensure_converged()?;
        let index = aggregator.get() as usize - 1;
        if index >= self.handles.len() {
            return Err(Error::Aggregator(aggregator.get()));
        }

        let result = self.aggregate(payload, index);
        self.handles.clear();
        self.state = if result.is_ok() {
            CeremonyState::Finalized
        } else {
            CeremonyState::Aborted
        };
        result
    }

    fn aggregate(
        &mut self,
        payload: &[u8],
        aggregator: usize,
    ) -> Result<H::Output> {
        let mut partials = Vec::with_capacity(self.handles.len() - 1);
        for (index, handle) in self.handles.iter_mut().enumerate() {
            let party = handle.party_number().get();
            let partial =
                handle.partial(payload).map_err(|e| Error::Finalize {
                    party,
                    source: Box::new(e),
                })?;
            if index != aggregator {
                partials.push(partial);
            }
        }

        let handle = &mut self.handles[aggregator];
        let party = handle.party_number().get();
        let finalize = |e: H::Error| Error::Finalize {
            party,
            source: Box::new(e),
        };
        handle.add(partials).map_err(finalize)?;
        let output = handle.create().map_err(finalize)?;
        tracing::info!(id = %self.id, aggregator = party, "ceremony::signed");
        Ok(output)
    }
}
