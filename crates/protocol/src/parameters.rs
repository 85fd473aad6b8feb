use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Parameters used during key generation.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    /// Number of parties `n`.
    pub parties: u16,
    /// Threshold for signing `t`.
    ///
    /// The threshold must be crossed (`t + 1`) for signing
    /// to commence.
    pub threshold: u16,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            parties: 3,
            threshold: 1,
        }
    }
}

impl Parameters {
    /// Create parameters and validate them.
    pub fn new(parties: u16, threshold: u16) -> Result<Self> {
        let params = Self { parties, threshold };
        params.validate()?;
        Ok(params)
    }

    /// Ensure there are at least two parties and the threshold
    /// lies in `1..parties`.
    pub fn validate(&self) -> Result<()> {
        if self.parties < 2 {
            return Err(Error::TooFewParties(self.parties));
        }
        if self.threshold == 0 || self.threshold >= self.parties {
            return Err(Error::ThresholdRange {
                threshold: self.threshold,
                parties: self.parties,
            });
        }
        Ok(())
    }

    /// Number of parties that must take part in signing.
    pub fn signers(&self) -> u16 {
        self.threshold + 1
    }

    /// Ensure a party number belongs to a ceremony
    /// with these parameters.
    pub fn check_party(&self, party: u16) -> Result<()> {
        if party == 0 || party > self.parties {
            return Err(Error::PartyNumberRange(party, self.parties));
        }
        Ok(())
    }
}

/// Ensure a list of party numbers assigns every number
/// in `1..=numbers.len()` exactly once.
pub fn check_assignment(numbers: &[u16]) -> Result<()> {
    let parties: u16 = numbers
        .len()
        .try_into()
        .map_err(|_| Error::PartyIndexOverflow(numbers.len()))?;
    let mut seen = vec![false; numbers.len()];
    for number in numbers {
        if *number == 0 || *number > parties {
            return Err(Error::PartyNumberRange(*number, parties));
        }
        let slot = &mut seen[*number as usize - 1];
        if *slot {
            return Err(Error::DuplicatePartyNumber(*number));
        }
        *slot = true;
    }
    Ok(())
}
