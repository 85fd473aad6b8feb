//! Macro to generate the signing handle.
macro_rules! frost_sign_impl {
    () => {
        /// Message exchanged while pre-signing.
        #[derive(Debug, Clone, Serialize, Deserialize)]
        pub enum SignPackage {
            /// Nonce commitments of the sender.
            Commitments(frost::round1::SigningCommitments),
        }

        /// Signature shares keyed by signer.
        pub type PartialSignature =
            BTreeMap<Identifier, frost::round2::SignatureShare>;

        /// Signing handle for one participant.
        ///
        /// The ceremony only exchanges nonce commitments; the
        /// payload is supplied afterwards with `partial` and the
        /// nonces are consumed by the first call.
        pub struct Signer {
            party_number: PartyNumber,
            identifiers: Vec<Identifier>,
            id: Identifier,
            round: Option<RoundNumber>,
            key_share: KeyShare,
            nonces: Option<frost::round1::SigningNonces>,
            commitments:
                BTreeMap<Identifier, frost::round1::SigningCommitments>,
            signing_package: Option<frost::SigningPackage>,
            signature_shares: PartialSignature,
        }

        impl Signer {
            /// Create a signer.
            ///
            /// The `participants` are the key share identifiers of
            /// every signer in party number order.
            pub fn new(
                party_number: PartyNumber,
                participants: Vec<Identifier>,
                key_share: KeyShare,
            ) -> Result<Self> {
                let required = *key_share.0.min_signers();
                if participants.len() < required as usize {
                    return Err(Error::TooFewSigners {
                        required,
                        signers: participants.len(),
                    });
                }

                let group = key_share.1.verifying_shares();
                for (index, id) in participants.iter().enumerate() {
                    let slot = party_number_of(index)?;
                    if participants[..index].contains(id) {
                        return Err(Error::DuplicateSigner(slot));
                    }
                    if !group.contains_key(id) {
                        return Err(Error::UnknownSigner(slot));
                    }
                }

                let id = *participants
                    .get(party_number.get() as usize - 1)
                    .ok_or(Error::IndexIdentifier(party_number.get()))?;
                if key_share.0.identifier() != &id {
                    return Err(Error::SlotMismatch(party_number.get()));
                }

                Ok(Self {
                    party_number,
                    identifiers: participants,
                    id,
                    round: None,
                    key_share,
                    nonces: None,
                    commitments: BTreeMap::new(),
                    signing_package: None,
                    signature_shares: BTreeMap::new(),
                })
            }

            /// Group verifying key of the signers.
            pub fn verifying_key(&self) -> &frost::VerifyingKey {
                self.key_share.1.verifying_key()
            }
        }

        fn party_number_of(index: usize) -> Result<u16> {
            Ok(ceremony_protocol::party_number(index)?.get())
        }

        impl ParticipantHandle for Signer {
            type Error = Error;
            type Message = SignPackage;
            type Output = Signature;

            fn party_number(&self) -> PartyNumber {
                self.party_number
            }

            fn handle_incoming(
                &mut self,
                message: RoundMessage<Self::Message>,
            ) -> Result<()> {
                let round = message.round();
                check_round(self.round, round)?;
                let (body, sender) = message.into_body();
                let id = sender_identifier(&self.identifiers, sender)?;
                if id == self.id {
                    return Err(Error::UnknownSender(sender.get()));
                }

                match body {
                    SignPackage::Commitments(commitments) if round == ROUND_1 => {
                        if self.commitments.insert(id, commitments).is_some() {
                            return Err(Error::DuplicateMessage {
                                round: round.get(),
                                sender: sender.get(),
                            });
                        }
                        Ok(())
                    }
                    _ => Err(Error::RoundPayload(round.get())),
                }
            }

            fn proceed(
                &mut self,
            ) -> Result<(RoundNumber, Vec<RoundMessage<Self::Message>>)>
            {
                match self.round.map(|round| round.get()).unwrap_or(0) {
                    0 => {
                        let (nonces, commitments) = frost::round1::commit(
                            self.key_share.0.signing_share(),
                            &mut OsRng,
                        );
                        self.nonces = Some(nonces);
                        self.commitments.insert(self.id, commitments.clone());
                        self.round = Some(ROUND_1);

                        let message = RoundMessage::broadcast(
                            ROUND_1,
                            self.party_number,
                            SignPackage::Commitments(commitments),
                        );
                        Ok((ROUND_1, vec![message]))
                    }
                    1 => {
                        check_complete(
                            ROUND_1,
                            self.identifiers.len(),
                            self.commitments.len(),
                        )?;
                        self.round = Some(ROUND_2);
                        Ok((ROUND_2, Vec::new()))
                    }
                    round => Err(Error::InvalidRound(round + 1)),
                }
            }

            fn create(&mut self) -> Result<Self::Output> {
                let signing_package =
                    self.signing_package.as_ref().ok_or(Error::NotReady)?;
                if self.signature_shares.len() != self.identifiers.len() {
                    return Err(Error::NotReady);
                }

                let signature = frost::aggregate(
                    signing_package,
                    &self.signature_shares,
                    &self.key_share.1,
                )?;
                self.key_share
                    .1
                    .verifying_key()
                    .verify(signing_package.message(), &signature)?;
                Ok(signature)
            }
        }

        impl PartialSigner for Signer {
            type Partial = PartialSignature;

            fn partial(&mut self, payload: &[u8]) -> Result<Self::Partial> {
                if self.round != Some(ROUND_2) {
                    return Err(Error::NotReady);
                }
                let nonces = self.nonces.take().ok_or(Error::NotReady)?;

                let signing_package =
                    frost::SigningPackage::new(self.commitments.clone(), payload);
                let signature_share = frost::round2::sign(
                    &signing_package,
                    &nonces,
                    &self.key_share.0,
                )?;

                self.signing_package = Some(signing_package);
                self.signature_shares
                    .insert(self.id, signature_share.clone());

                let mut partial = BTreeMap::new();
                partial.insert(self.id, signature_share);
                Ok(partial)
            }

            fn add(
                &mut self,
                partials: Vec<Self::Partial>,
            ) -> Result<Self::Partial> {
                for partial in partials {
                    for (id, signature_share) in partial {
                        let sender = party_of(&self.identifiers, &id)?;
                        if self.signature_shares.insert(id, signature_share).is_some()
                        {
                            return Err(Error::DuplicateMessage {
                                round: ROUND_2.get(),
                                sender: sender.get(),
                            });
                        }
                    }
                }
                Ok(self.signature_shares.clone())
            }
        }
    };
}

pub(crate) use frost_sign_impl;
