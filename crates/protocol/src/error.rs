use thiserror::Error;

/// Errors generated by the protocol library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error generated when a ceremony has fewer than two parties.
    #[error("ceremony requires at least two parties, got {0}")]
    TooFewParties(u16),

    /// Error generated when the threshold is not in `1..parties`.
    #[error("threshold {threshold} must be at least one and less than the number of parties {parties}")]
    ThresholdRange {
        /// Requested threshold.
        threshold: u16,
        /// Number of parties.
        parties: u16,
    },

    /// Error generated when a party number is outside `1..=parties`.
    #[error("party number {0} is outside the range 1..={1}")]
    PartyNumberRange(u16, u16),

    /// Error generated when a party number appears twice.
    #[error("party number {0} was assigned more than once")]
    DuplicatePartyNumber(u16),

    /// Error generated when a slot index does not fit a party number.
    #[error("slot index {0} does not fit in a party number")]
    PartyIndexOverflow(usize),

    /// Error generated when a party or round number is zero.
    #[error("party and round numbers start at one")]
    ZeroNumber,

    /// Error generated when a PEM tag did not match.
    #[error("bad PEM tag, expected {0}, got {1}")]
    PemTag(String, String),

    /// Error generated by the PEM library.
    #[error(transparent)]
    Pem(#[from] pem::PemError),

    /// Error generated by the JSON library.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
