//! Macro to generate the proactive key refresh handle.
macro_rules! frost_refresh_impl {
    () => {
        /// Message exchanged during key refresh.
        #[derive(Debug, Clone, Serialize, Deserialize)]
        pub enum RefreshPackage {
            /// Commitment to the sender's sharing of zero.
            Round1(frost::keys::dkg::round1::Package),
            /// Zero share for a single party.
            Round2(frost::keys::dkg::round2::Package),
        }

        /// Proactive refresh of one party's key share.
        ///
        /// Every refreshing party commits to a sharing of zero and
        /// deals one share to each other party. Received shares are
        /// verified against the commitments and added to the
        /// signing share, so the group key is preserved while every
        /// share changes. Verifying shares of the refreshed group
        /// are derived from the commitments.
        ///
        /// Shares left out of the refresh are removed from the
        /// group.
        pub struct KeyRefresher {
            party_number: PartyNumber,
            identifiers: Vec<Identifier>,
            id: Identifier,
            round: Option<RoundNumber>,
            key_share: KeyShare,

            round1_secret: Option<frost::keys::dkg::round1::SecretPackage>,
            round1_packages:
                BTreeMap<Identifier, frost::keys::dkg::round1::Package>,

            round2_secret: Option<frost::keys::dkg::round2::SecretPackage>,
            round2_packages:
                BTreeMap<Identifier, frost::keys::dkg::round2::Package>,

            output: Option<KeyShare>,
        }

        impl KeyRefresher {
            /// Create a key refresher.
            ///
            /// The `old_to_new` map assigns every refreshing share,
            /// keyed by its identifier, a party number in the
            /// refresh ceremony. It must name at least as many
            /// shares as are required to sign.
            pub fn new(
                party_number: PartyNumber,
                key_share: KeyShare,
                old_to_new: &BTreeMap<Identifier, PartyNumber>,
            ) -> Result<Self> {
                let required = *key_share.0.min_signers();
                if old_to_new.len() < required as usize {
                    return Err(Error::TooFewRefreshers {
                        required,
                        parties: old_to_new.len(),
                    });
                }

                let numbers: Vec<u16> =
                    old_to_new.values().map(|number| number.get()).collect();
                check_assignment(&numbers)?;

                let group = key_share.1.verifying_shares();
                if let Some((_, number)) =
                    old_to_new.iter().find(|(id, _)| !group.contains_key(id))
                {
                    return Err(Error::UnknownRefresher(number.get()));
                }

                let mut slots: Vec<(PartyNumber, Identifier)> = old_to_new
                    .iter()
                    .map(|(id, number)| (*number, *id))
                    .collect();
                slots.sort_by_key(|(number, _)| *number);
                let identifiers: Vec<Identifier> =
                    slots.into_iter().map(|(_, id)| id).collect();

                let id = *key_share.0.identifier();
                if identifiers.get(party_number.get() as usize - 1) != Some(&id)
                {
                    return Err(Error::SlotMismatch(party_number.get()));
                }

                Ok(Self {
                    party_number,
                    identifiers,
                    id,
                    round: None,
                    key_share,

                    round1_secret: None,
                    round1_packages: BTreeMap::new(),

                    round2_secret: None,
                    round2_packages: BTreeMap::new(),

                    output: None,
                })
            }

            fn others(&self) -> usize {
                self.identifiers.len() - 1
            }
        }

        impl ParticipantHandle for KeyRefresher {
            type Error = Error;
            type Message = RefreshPackage;
            type Output = KeyShare;

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

                let duplicate = match body {
                    RefreshPackage::Round1(package) if round == ROUND_1 => {
                        self.round1_packages.insert(id, package).is_some()
                    }
                    RefreshPackage::Round2(package) if round == ROUND_2 => {
                        self.round2_packages.insert(id, package).is_some()
                    }
                    _ => return Err(Error::RoundPayload(round.get())),
                };

                if duplicate {
                    return Err(Error::DuplicateMessage {
                        round: round.get(),
                        sender: sender.get(),
                    });
                }
                Ok(())
            }

            fn proceed(
                &mut self,
            ) -> Result<(RoundNumber, Vec<RoundMessage<Self::Message>>)>
            {
                match self.round.map(|round| round.get()).unwrap_or(0) {
                    // commit to a sharing of zero
                    0 => {
                        let (secret, package) =
                            frost::keys::refresh::refresh_dkg_part1(
                                self.id,
                                self.identifiers.len() as u16,
                                *self.key_share.0.min_signers(),
                                &mut OsRng,
                            )?;
                        self.round1_secret = Some(secret);
                        self.round = Some(ROUND_1);

                        let message = RoundMessage::broadcast(
                            ROUND_1,
                            self.party_number,
                            RefreshPackage::Round1(package),
                        );
                        Ok((ROUND_1, vec![message]))
                    }
                    // deal one zero share to each party
                    1 => {
                        check_complete(
                            ROUND_1,
                            self.others(),
                            self.round1_packages.len(),
                        )?;
                        let secret = self
                            .round1_secret
                            .take()
                            .ok_or(Error::InvalidRound(ROUND_2.get()))?;

                        let (secret, packages) =
                            frost::keys::refresh::refresh_dkg_part2(
                                secret,
                                &self.round1_packages,
                            )?;
                        self.round2_secret = Some(secret);

                        let mut messages = Vec::with_capacity(packages.len());
                        for (id, package) in packages {
                            let receiver = party_of(&self.identifiers, &id)?;
                            messages.push(RoundMessage::unicast(
                                ROUND_2,
                                self.party_number,
                                receiver,
                                RefreshPackage::Round2(package),
                            ));
                        }

                        self.round = Some(ROUND_2);
                        Ok((ROUND_2, messages))
                    }
                    // verify the zero shares and apply them
                    2 => {
                        check_complete(
                            ROUND_2,
                            self.others(),
                            self.round2_packages.len(),
                        )?;
                        let secret = self
                            .round2_secret
                            .take()
                            .ok_or(Error::InvalidRound(ROUND_3.get()))?;

                        let (key_package, public_key_package) =
                            frost::keys::refresh::refresh_dkg_shares(
                                &secret,
                                &self.round1_packages,
                                &self.round2_packages,
                                self.key_share.1.clone(),
                                self.key_share.0.clone(),
                            )?;
                        if public_key_package.verifying_key()
                            != self.key_share.1.verifying_key()
                        {
                            return Err(Error::GroupKeyMismatch);
                        }
                        tracing::debug!(
                            party = self.party_number.get(),
                            parties = self.identifiers.len(),
                            "refresh::key_share"
                        );
                        self.output = Some((key_package, public_key_package));

                        self.round = Some(ROUND_3);
                        Ok((ROUND_3, Vec::new()))
                    }
                    round => Err(Error::InvalidRound(round + 1)),
                }
            }

            fn create(&mut self) -> Result<Self::Output> {
                self.output.take().ok_or(Error::NotReady)
            }
        }
    };
}

pub(crate) use frost_refresh_impl;
