//! Macro to generate the distributed key generation handle.
macro_rules! frost_dkg_impl {
    () => {
        /// Message exchanged during key generation.
        #[derive(Debug, Clone, Serialize, Deserialize)]
        pub enum DkgPackage {
            /// Commitment broadcast to every party.
            Round1(frost::keys::dkg::round1::Package),
            /// Secret share for a single party.
            Round2(frost::keys::dkg::round2::Package),
        }

        /// Distributed key generation for one party.
        pub struct KeyGenerator {
            party_number: PartyNumber,
            parameters: Parameters,
            identifiers: Vec<Identifier>,
            id: Identifier,
            round: Option<RoundNumber>,

            round1_secret: Option<frost::keys::dkg::round1::SecretPackage>,
            round1_packages:
                BTreeMap<Identifier, frost::keys::dkg::round1::Package>,

            round2_secret: Option<frost::keys::dkg::round2::SecretPackage>,
            round2_packages:
                BTreeMap<Identifier, frost::keys::dkg::round2::Package>,

            key_share: Option<KeyShare>,
        }

        impl KeyGenerator {
            /// Create a key generator.
            pub fn new(
                party_number: PartyNumber,
                parameters: Parameters,
            ) -> Result<Self> {
                parameters.validate()?;
                parameters.check_party(party_number.get())?;

                let identifiers: Vec<Identifier> =
                    identifiers(parameters.parties)?;
                let id = *identifiers
                    .get(party_number.get() as usize - 1)
                    .ok_or(Error::IndexIdentifier(party_number.get()))?;

                Ok(Self {
                    party_number,
                    parameters,
                    identifiers,
                    id,
                    round: None,

                    round1_secret: None,
                    round1_packages: BTreeMap::new(),

                    round2_secret: None,
                    round2_packages: BTreeMap::new(),

                    key_share: None,
                })
            }

            fn others(&self) -> usize {
                self.identifiers.len() - 1
            }
        }

        impl ParticipantHandle for KeyGenerator {
            type Error = Error;
            type Message = DkgPackage;
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
                    DkgPackage::Round1(package) if round == ROUND_1 => {
                        self.round1_packages.insert(id, package).is_some()
                    }
                    DkgPackage::Round2(package) if round == ROUND_2 => {
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
                    // broadcast the commitment to every other party
                    0 => {
                        let (secret, package) = frost::keys::dkg::part1(
                            self.id,
                            self.parameters.parties,
                            self.parameters.signers(),
                            &mut OsRng,
                        )?;
                        self.round1_secret = Some(secret);
                        self.round = Some(ROUND_1);

                        let message = RoundMessage::broadcast(
                            ROUND_1,
                            self.party_number,
                            DkgPackage::Round1(package),
                        );
                        Ok((ROUND_1, vec![message]))
                    }
                    // different secret package for each party
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

                        let (secret, packages) = frost::keys::dkg::part2(
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
                                DkgPackage::Round2(package),
                            ));
                        }

                        self.round = Some(ROUND_2);
                        Ok((ROUND_2, messages))
                    }
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

                        let key_share = frost::keys::dkg::part3(
                            &secret,
                            &self.round1_packages,
                            &self.round2_packages,
                        )?;
                        tracing::debug!(
                            party = self.party_number.get(),
                            "dkg::key_share"
                        );
                        self.key_share = Some(key_share);

                        self.round = Some(ROUND_3);
                        Ok((ROUND_3, Vec::new()))
                    }
                    round => Err(Error::InvalidRound(round + 1)),
                }
            }

            fn create(&mut self) -> Result<Self::Output> {
                self.key_share.take().ok_or(Error::NotReady)
            }
        }
    };
}

pub(crate) use frost_dkg_impl;
