//! Driver that runs each participant on its own task.
use std::time::Duration;

use ceremony_protocol::{
    party_number, CeremonyId, PartyNumber, RoundMessage, RoundNumber,
};
use futures::future::try_join_all;
use tokio::{
    sync::mpsc,
    task::JoinHandle,
    time::{sleep_until, Instant},
};
use tracing::Instrument;

use crate::{
    handle::{check_slots, create_handles},
    routing::{route, validate_batch},
    Error, ParticipantHandle, Result, Violation,
};

/// Default time to wait for every party to finish a round.
pub const ROUND_TIMEOUT: Duration = Duration::from_secs(30);

/// Sent from a participant task to the relay.
enum Report<M> {
    Proceeded {
        slot: usize,
        round: RoundNumber,
        batch: Vec<RoundMessage<M>>,
    },
    Failed(Error),
}

/// Sent from the relay to a participant task.
enum Instruction<M> {
    Deliver(Vec<RoundMessage<M>>),
    Converged,
}

/// Drives a ceremony with one task per participant.
///
/// Participants report the batch produced by `proceed` to a
/// relay which waits for every party before validating and
/// routing the round. A round that is not complete within the
/// round timeout aborts the ceremony.
///
/// Calls into the handles run on the blocking pool, so a slow
/// handle cannot stall the timeout even on a current thread
/// runtime.
pub struct ConcurrentDriver<H: ParticipantHandle> {
    id: CeremonyId,
    handles: Vec<H>,
    round_timeout: Duration,
}

impl<H> ConcurrentDriver<H>
where
    H: ParticipantHandle + Send + 'static,
    H::Message: Send + 'static,
    H::Output: Send + 'static,
{
    /// Create a driver from handles ordered by party number.
    pub fn new(handles: Vec<H>) -> Result<Self> {
        check_slots(&handles)?;
        Ok(Self {
            id: CeremonyId::new_v4(),
            handles,
            round_timeout: ROUND_TIMEOUT,
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

    /// Set the time to wait for every party to finish a round.
    pub fn with_round_timeout(mut self, round_timeout: Duration) -> Self {
        self.round_timeout = round_timeout;
        self
    }

    /// Ceremony identifier used in log output.
    pub fn id(&self) -> &CeremonyId {
        &self.id
    }

    /// Drive the ceremony until it converges and return the
    /// handles in party order.
    pub async fn converge(self) -> Result<Vec<H>> {
        let span = tracing::info_span!("ceremony", id = %self.id);
        let parties = self.handles.len() as u16;

        let (reports_tx, mut reports) = mpsc::unbounded_channel();
        let mut instructions = Vec::with_capacity(self.handles.len());
        let mut tasks: Vec<JoinHandle<Result<H>>> =
            Vec::with_capacity(self.handles.len());
        for (slot, handle) in self.handles.into_iter().enumerate() {
            let (tx, rx) = mpsc::channel(1);
            instructions.push(tx);
            let task_span = tracing::debug_span!(
                parent: &span,
                "participant",
                party = slot + 1
            );
            tasks.push(tokio::spawn(
                participant(slot, handle, reports_tx.clone(), rx)
                    .instrument(task_span),
            ));
        }
        drop(reports_tx);

        let result = relay(
            parties,
            &mut reports,
            &instructions,
            self.round_timeout,
        )
        .instrument(span.clone())
        .await;

        match result {
            Ok(rounds) => {
                let handles = try_join_all(tasks)
                    .await?
                    .into_iter()
                    .collect::<Result<Vec<_>>>()?;
                span.in_scope(|| {
                    tracing::info!(rounds = rounds, "ceremony::converged")
                });
                Ok(handles)
            }
            Err(e) => {
                for task in &tasks {
                    task.abort();
                }
                span.in_scope(|| {
                    tracing::warn!(error = %e, "ceremony::aborted")
                });
                Err(e)
            }
        }
    }

    /// Drive the ceremony and create the outputs in party order.
    pub async fn run(self) -> Result<Vec<H::Output>> {
        let handles = self.converge().await?;
        let mut outputs = Vec::with_capacity(handles.len());
        for mut handle in handles {
            let party = handle.party_number().get();
            let output = handle.create().map_err(|e| Error::Finalize {
                party,
                source: Box::new(e),
            })?;
            outputs.push(output);
        }
        Ok(outputs)
    }
}

async fn participant<H>(
    slot: usize,
    mut handle: H,
    reports: mpsc::UnboundedSender<Report<H::Message>>,
    mut instructions: mpsc::Receiver<Instruction<H::Message>>,
) -> Result<H>
where
    H: ParticipantHandle + Send + 'static,
    H::Message: Send + 'static,
{
    let party = handle.party_number().get();
    let mut step: u16 = 0;
    loop {
        step += 1;
        let (next, proceeded) =
            match blocking(handle, |handle| handle.proceed()).await {
                Ok(result) => result,
                Err(e) => {
                    let _ = reports.send(Report::Failed(e));
                    return Err(Error::Aborted);
                }
            };
        handle = next;

        let report = match proceeded {
            Ok((round, batch)) => Report::Proceeded { slot, round, batch },
            Err(e) => Report::Failed(Error::ProtocolViolation {
                round: step,
                party,
                violation: Violation::Proceed(Box::new(e)),
            }),
        };
        let failed = matches!(report, Report::Failed(_));
        if reports.send(report).is_err() || failed {
            return Ok(handle);
        }

        match instructions.recv().await {
            Some(Instruction::Deliver(inbox)) => {
                tracing::trace!(messages = inbox.len(), "participant::deliver");
                let (next, delivered) =
                    match blocking(handle, move |handle| deliver(handle, inbox))
                        .await
                    {
                        Ok(result) => result,
                        Err(e) => {
                            let _ = reports.send(Report::Failed(e));
                            return Err(Error::Aborted);
                        }
                    };
                handle = next;

                if let Err((round, sender, e)) = delivered {
                    let _ = reports.send(Report::Failed(
                        Error::ProtocolViolation {
                            round,
                            party,
                            violation: Violation::Incoming {
                                sender,
                                source: Box::new(e),
                            },
                        },
                    ));
                    return Ok(handle);
                }
            }
            Some(Instruction::Converged) | None => return Ok(handle),
        }
    }
}

/// Run a synchronous call on the handle on the blocking pool
/// so a slow party does not hold up the relay.
async fn blocking<H, T, F>(mut handle: H, call: F) -> Result<(H, T)>
where
    H: Send + 'static,
    T: Send + 'static,
    F: FnOnce(&mut H) -> T + Send + 'static,
{
    Ok(tokio::task::spawn_blocking(move || {
        let value = call(&mut handle);
        (handle, value)
    })
    .await?)
}

/// Hand an inbox to the handle, stopping at the first
/// rejected message.
fn deliver<H: ParticipantHandle>(
    handle: &mut H,
    inbox: Vec<RoundMessage<H::Message>>,
) -> std::result::Result<(), (u16, u16, H::Error)> {
    for message in inbox {
        let round = message.round().get();
        let sender = message.sender().get();
        handle
            .handle_incoming(message)
            .map_err(|e| (round, sender, e))?;
    }
    Ok(())
}

/// Collect one report per party for every round, validate and
/// route the batches until a round produces no messages.
///
/// Returns the number of rounds driven.
async fn relay<M: Clone>(
    parties: u16,
    reports: &mut mpsc::UnboundedReceiver<Report<M>>,
    instructions: &[mpsc::Sender<Instruction<M>>],
    round_timeout: Duration,
) -> Result<u16> {
    let mut step: u16 = 0;
    loop {
        step += 1;
        let deadline = Instant::now() + round_timeout;
        let mut received: Vec<Option<(RoundNumber, Vec<RoundMessage<M>>)>> =
            (0..parties).map(|_| None).collect();
        let mut pending = parties as usize;

        while pending > 0 {
            tokio::select! {
                report = reports.recv() => {
                    match report {
                        Some(Report::Proceeded { slot, round, batch }) => {
                            if received[slot].replace((round, batch)).is_none() {
                                pending -= 1;
                            }
                        }
                        Some(Report::Failed(e)) => return Err(e),
                        None => return Err(Error::Aborted),
                    }
                }
                _ = sleep_until(deadline) => {
                    let missing = received
                        .iter()
                        .enumerate()
                        .filter(|(_, report)| report.is_none())
                        .map(|(slot, _)| slot as u16 + 1)
                        .collect();
                    return Err(Error::Timeout {
                        round: step,
                        parties: missing,
                    });
                }
            }
        }

        let mut batches = Vec::with_capacity(parties as usize);
        for (slot, report) in received.into_iter().enumerate() {
            let (round, batch) = report.ok_or(Error::Aborted)?;
            validate_batch(party_number(slot)?, parties, round, &batch)?;
            batches.push(batch);
        }

        let batch_sizes: Vec<usize> = batches.iter().map(Vec::len).collect();
        tracing::debug!(step = step, batch_sizes = ?batch_sizes, "ceremony::round");

        if batch_sizes.iter().all(|size| *size == 0) {
            for tx in instructions {
                let _ = tx.send(Instruction::Converged).await;
            }
            return Ok(step);
        }

        for (tx, inbox) in instructions.iter().zip(route(batches)) {
            tx.send(Instruction::Deliver(inbox))
                .await
                .map_err(|_| Error::Aborted)?;
        }
    }
}
