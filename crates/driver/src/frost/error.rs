use thiserror::Error;

/// Errors generated by the FROST handles.
#[derive(Debug, Error)]
pub enum Error {
    /// Error generated when a party number has no identifier.
    #[error("party number {0} has no identifier")]
    IndexIdentifier(u16),

    /// Error generated when a message body does not belong
    /// to the round it was sent in.
    #[error("unexpected payload for round {0}")]
    RoundPayload(u16),

    /// Error generated when proceeding past the last round.
    #[error("invalid round {0}")]
    InvalidRound(u16),

    /// Error generated when a message arrives for a round the
    /// handle is not in.
    #[error("message for round {received} received in round {expected}")]
    OutOfSequence {
        /// Round the handle expects messages for.
        expected: u16,
        /// Round of the message.
        received: u16,
    },

    /// Error generated when a party sends twice in a round.
    #[error("duplicate message from party {sender} in round {round}")]
    DuplicateMessage {
        /// Round of the message.
        round: u16,
        /// Sender of the message.
        sender: u16,
    },

    /// Error generated when proceeding before every expected
    /// message of the previous round was received.
    #[error("round {round} expected {expected} messages, received {received}")]
    MissingMessages {
        /// Round that is incomplete.
        round: u16,
        /// Number of messages expected.
        expected: usize,
        /// Number of messages received.
        received: usize,
    },

    /// Error generated when a message names a sender that is
    /// not part of the ceremony.
    #[error("message from unknown party {0}")]
    UnknownSender(u16),

    /// Error generated when the output is requested before
    /// the ceremony is complete.
    #[error("ceremony output is not ready")]
    NotReady,

    /// Error generated when signing with fewer participants
    /// than the key requires.
    #[error("at least {required} signers are required, got {signers}")]
    TooFewSigners {
        /// Minimum number of signers.
        required: u16,
        /// Number of participants.
        signers: usize,
    },

    /// Error generated when an identifier produced by the
    /// engine is not part of the ceremony.
    #[error("identifier is not part of the ceremony")]
    UnknownIdentifier,

    /// Error generated when a participant appears twice.
    #[error("participant in slot {0} appears more than once")]
    DuplicateSigner(u16),

    /// Error generated when a participant does not hold a
    /// share of the group key.
    #[error("participant in slot {0} is not a member of the group")]
    UnknownSigner(u16),

    /// Error generated when fewer parties than the signing
    /// threshold take part in a refresh.
    #[error("refresh requires at least {required} parties, got {parties}")]
    TooFewRefreshers {
        /// Minimum number of signers of the group.
        required: u16,
        /// Number of parties in the refresh.
        parties: usize,
    },

    /// Error generated when a refresh names a share that is
    /// not a member of the group.
    #[error("party {0} does not hold a share of the group")]
    UnknownRefresher(u16),

    /// Error generated when the local key share does not
    /// belong to the slot of the handle.
    #[error("key share does not belong to party {0}")]
    SlotMismatch(u16),

    /// Error generated when parties disagree on the group key.
    #[error("group verifying key does not match")]
    GroupKeyMismatch,

    /// Error generated by the protocol library.
    #[error(transparent)]
    Protocol(#[from] ceremony_protocol::Error),

    /// Error generated driving a simulated ceremony.
    #[error(transparent)]
    Driver(#[from] crate::Error),

    /// Error generated decoding hex.
    #[error(transparent)]
    Hex(#[from] ceremony_protocol::hex::FromHexError),

    /// Error generated by the Ed25519 ciphersuite.
    #[cfg(feature = "frost-ed25519")]
    #[error(transparent)]
    Ed25519(#[from] frost_ed25519::Error),

    /// Error generated by the secp256k1 taproot ciphersuite.
    #[cfg(feature = "frost-secp256k1-tr")]
    #[error(transparent)]
    Secp256k1Tr(#[from] frost_secp256k1_tr::Error),
}
