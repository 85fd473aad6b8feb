//! Message routing shared by the drivers.
use ceremony_protocol::{PartyNumber, RoundMessage, RoundNumber};

use crate::{Error, Result, Violation};

/// Check a batch produced by `party` before anything in the
/// round is delivered.
pub(crate) fn validate_batch<M>(
    party: PartyNumber,
    parties: u16,
    round: RoundNumber,
    batch: &[RoundMessage<M>],
) -> Result<()> {
    let violation = |violation| Error::ProtocolViolation {
        round: round.get(),
        party: party.get(),
        violation,
    };

    for message in batch {
        if message.sender() != party {
            return Err(violation(Violation::SenderMismatch(
                message.sender().get(),
            )));
        }
        if let Some(receiver) = message.receiver() {
            if receiver.get() > parties {
                return Err(violation(Violation::ReceiverRange {
                    receiver: receiver.get(),
                    parties,
                }));
            }
            if receiver == party {
                return Err(violation(Violation::SelfAddressed));
            }
        }
    }
    Ok(())
}

/// Distribute validated batches into one inbox per party.
///
/// Batches are visited in party order and messages in batch
/// order so every inbox receives its messages in a
/// deterministic order.
pub(crate) fn route<M: Clone>(
    batches: Vec<Vec<RoundMessage<M>>>,
) -> Vec<Vec<RoundMessage<M>>> {
    let mut inboxes: Vec<Vec<RoundMessage<M>>> =
        batches.iter().map(|_| Vec::new()).collect();

    for batch in batches {
        for message in batch {
            match message.receiver() {
                Some(receiver) => {
                    inboxes[receiver.get() as usize - 1].push(message);
                }
                None => {
                    let sender = message.sender().get() as usize - 1;
                    for (index, inbox) in inboxes.iter_mut().enumerate() {
                        if index != sender {
                            inbox.push(message.clone());
                        }
                    }
                }
            }
        }
    }

    inboxes
}
