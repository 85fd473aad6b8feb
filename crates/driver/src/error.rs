use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors generated by the drivers.
///
/// Every error aborts the whole ceremony; participant state is
/// entangled through the exchanged messages so there is no
/// way to recover a subset of the parties.
#[derive(Debug, Error)]
pub enum Error {
    /// Error generated by invalid ceremony configuration.
    #[error(transparent)]
    Configuration(#[from] ceremony_protocol::Error),

    /// Error generated when a handle could not be created.
    #[error("failed to create the handle for party {party}: {source}")]
    Initialize {
        /// Party number of the handle.
        party: u16,
        /// Error returned by the factory.
        #[source]
        source: BoxError,
    },

    /// Error generated when a handle was placed in the wrong slot.
    #[error("handle in slot {slot} reports party number {party}")]
    SlotMismatch {
        /// Expected party number.
        slot: u16,
        /// Party number reported by the handle.
        party: u16,
    },

    /// Error generated when a party breaks the protocol.
    #[error("protocol violation in round {round} at party {party}: {violation}")]
    ProtocolViolation {
        /// Round in which the violation was detected.
        round: u16,
        /// Party at fault.
        party: u16,
        /// What went wrong.
        #[source]
        violation: Violation,
    },

    /// Error generated when outputs are requested before
    /// the ceremony has converged.
    #[error("ceremony has not converged")]
    NotReady,

    /// Error generated when outputs have already been taken.
    #[error("ceremony outputs were already created")]
    Finalized,

    /// Error generated when driving a ceremony that was
    /// aborted by an earlier failure.
    #[error("ceremony was aborted")]
    Aborted,

    /// Error generated when a converged handle fails
    /// to create its output.
    #[error("party {party} failed to create its output: {source}")]
    Finalize {
        /// Party number of the handle.
        party: u16,
        /// Error returned by the handle.
        #[source]
        source: BoxError,
    },

    /// Error generated when the aggregator is not a party.
    #[error("aggregator {0} is not a party in the ceremony")]
    Aggregator(u16),

    /// Error generated when parties miss the round barrier.
    #[error("round {round} timed out waiting for parties {parties:?}")]
    Timeout {
        /// Round that timed out.
        round: u16,
        /// Parties that did not report.
        parties: Vec<u16>,
    },

    /// Error generated when a participant task fails to join.
    #[error(transparent)]
    Join(#[from] tokio::task::JoinError),
}

impl Error {
    /// Whether this error is a protocol violation.
    pub fn is_protocol_violation(&self) -> bool {
        matches!(self, Error::ProtocolViolation { .. })
    }
}

/// Protocol violations detected by a driver.
#[derive(Debug, Error)]
pub enum Violation {
    /// Handle failed while advancing a round.
    #[error("proceed failed: {0}")]
    Proceed(#[source] BoxError),

    /// Handle rejected an incoming message.
    #[error("rejected message from party {sender}: {source}")]
    Incoming {
        /// Sender of the rejected message.
        sender: u16,
        /// Error returned by the handle.
        #[source]
        source: BoxError,
    },

    /// Message addressed outside the ceremony.
    #[error("receiver {receiver} is outside the range 1..={parties}")]
    ReceiverRange {
        /// Receiver on the message.
        receiver: u16,
        /// Number of parties.
        parties: u16,
    },

    /// Message addressed to its own sender.
    #[error("message addressed to its sender")]
    SelfAddressed,

    /// Message claims a different sender than the party
    /// that produced it.
    #[error("message claims sender {0}")]
    SenderMismatch(u16),
}
