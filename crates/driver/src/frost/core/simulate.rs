//! Macro to generate helpers that run whole ceremonies in process.
macro_rules! frost_simulate_impl {
    () => {
        /// Existing key share taking part in a refresh.
        #[derive(Debug, Clone)]
        pub struct KeyRefreshItem {
            /// Key share to refresh.
            pub key_share: KeyShare,
            /// Party number in the refresh ceremony.
            ///
            /// Defaults to the position of the item.
            pub party_number: Option<PartyNumber>,
        }

        impl From<KeyShare> for KeyRefreshItem {
            fn from(key_share: KeyShare) -> Self {
                Self {
                    key_share,
                    party_number: None,
                }
            }
        }

        /// Run key generation for every party.
        ///
        /// Key shares are returned in party number order.
        pub fn keygen(parameters: Parameters) -> Result<Vec<KeyShare>> {
            parameters.validate()?;
            let mut driver =
                RoundDriver::initialize(parameters.parties, |party| {
                    KeyGenerator::new(party, parameters)
                })?;
            driver.run()?;
            Ok(driver.finalize()?)
        }

        /// Refresh the shares of a group.
        ///
        /// Shares not given in `items` are removed from the
        /// refreshed group; at least the signing threshold of
        /// shares must take part. Refreshed shares are returned in
        /// the party number order of the refresh ceremony.
        pub fn refresh(items: Vec<KeyRefreshItem>) -> Result<Vec<KeyShare>> {
            let parties = u16::try_from(items.len()).map_err(|_| {
                ceremony_protocol::Error::PartyIndexOverflow(items.len())
            })?;

            let mut old_to_new = BTreeMap::new();
            let mut slots: Vec<Option<KeyShare>> = vec![None; items.len()];
            for (index, item) in items.into_iter().enumerate() {
                let party = match item.party_number {
                    Some(party) => party,
                    None => ceremony_protocol::party_number(index)?,
                };
                let slot = slots.get_mut(party.get() as usize - 1).ok_or(
                    ceremony_protocol::Error::PartyNumberRange(
                        party.get(),
                        parties,
                    ),
                )?;
                if slot.is_some() {
                    return Err(ceremony_protocol::Error::DuplicatePartyNumber(
                        party.get(),
                    )
                    .into());
                }
                old_to_new.insert(*item.key_share.0.identifier(), party);
                *slot = Some(item.key_share);
            }

            let mut driver = RoundDriver::initialize(parties, |party| {
                let key_share = slots
                    .get_mut(party.get() as usize - 1)
                    .and_then(Option::take)
                    .ok_or(Error::IndexIdentifier(party.get()))?;
                KeyRefresher::new(party, key_share, &old_to_new)
            })?;
            driver.run()?;
            Ok(driver.finalize()?)
        }

        /// Run the pre-signing ceremony for a subset of key shares.
        ///
        /// Each participant is the party number of a key share in
        /// `key_shares`; signers are numbered in the order given.
        pub fn presign(
            key_shares: &[KeyShare],
            participants: &[PartyNumber],
        ) -> Result<RoundDriver<Signer>> {
            let parties = u16::try_from(key_shares.len()).map_err(|_| {
                ceremony_protocol::Error::PartyIndexOverflow(key_shares.len())
            })?;
            let signers = u16::try_from(participants.len()).map_err(|_| {
                ceremony_protocol::Error::PartyIndexOverflow(participants.len())
            })?;

            let mut selected = Vec::with_capacity(participants.len());
            for party in participants {
                let key_share = key_shares
                    .get(party.get() as usize - 1)
                    .ok_or(ceremony_protocol::Error::PartyNumberRange(
                        party.get(),
                        parties,
                    ))?;
                selected.push(key_share.clone());
            }
            let identifiers: Vec<Identifier> = selected
                .iter()
                .map(|key_share| *key_share.0.identifier())
                .collect();

            let mut driver = RoundDriver::initialize(signers, |party| {
                let key_share = selected
                    .get(party.get() as usize - 1)
                    .cloned()
                    .ok_or(Error::IndexIdentifier(party.get()))?;
                Signer::new(party, identifiers.clone(), key_share)
            })?;
            driver.run()?;
            Ok(driver)
        }

        /// Sign a message with a subset of key shares.
        ///
        /// The `aggregator` is the signer number, not the party
        /// number of its key share.
        pub fn sign(
            key_shares: &[KeyShare],
            participants: &[PartyNumber],
            message: &[u8],
            aggregator: PartyNumber,
        ) -> Result<Signature> {
            let mut driver = presign(key_shares, participants)?;
            Ok(driver.sign(message, aggregator)?)
        }

        /// Encode a signature with its group key and message.
        pub fn signature_artifact(
            signature: &Signature,
            verifying_key: &VerifyingKey,
            message: &[u8],
        ) -> Result<SignatureArtifact> {
            Ok(SignatureArtifact {
                signature: hex::encode(signature.serialize()?),
                verifying_key: hex::encode(verifying_key.serialize()?),
                message: hex::encode(message),
            })
        }

        /// Verify an encoded signature.
        pub fn verify_artifact(artifact: &SignatureArtifact) -> Result<()> {
            let signature =
                Signature::deserialize(&hex::decode(&artifact.signature)?)?;
            let verifying_key =
                VerifyingKey::deserialize(&hex::decode(&artifact.verifying_key)?)?;
            let message = hex::decode(&artifact.message)?;
            verifying_key.verify(&message, &signature)?;
            Ok(())
        }
    };
}

pub(crate) use frost_simulate_impl;
