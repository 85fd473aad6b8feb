macro_rules! frost_keygen {
    () => {
        #[test]
        fn keygen_three_parties() -> Result<()> {
            init_tracing();
            let parameters = Parameters::new(3, 1)?;
            let mut driver =
                RoundDriver::initialize(parameters.parties, |party| {
                    KeyGenerator::new(party, parameters)
                })?;
            driver.run()?;

            let history = driver.history();
            let (last, rounds) = history.split_last().unwrap();
            assert!(last.is_terminal());
            assert!(rounds.iter().all(|round| !round.is_terminal()));

            let key_shares = driver.finalize()?;
            assert_eq!(3, key_shares.len());
            let verifying_key = key_shares[0].1.verifying_key();
            for key_share in &key_shares {
                assert_eq!(verifying_key, key_share.1.verifying_key());
                assert_eq!(2, *key_share.0.min_signers());
            }
            Ok(())
        }

        #[test]
        fn keygen_party_counts() -> Result<()> {
            for parties in 2..=5 {
                for threshold in 1..parties {
                    let key_shares =
                        keygen(Parameters::new(parties, threshold)?)?;
                    assert_eq!(parties as usize, key_shares.len());

                    let identifiers: BTreeSet<_> = key_shares
                        .iter()
                        .map(|key_share| *key_share.0.identifier())
                        .collect();
                    assert_eq!(parties as usize, identifiers.len());
                }
            }
            Ok(())
        }

        #[tokio::test]
        async fn keygen_concurrent() -> Result<()> {
            init_tracing();
            let parameters = Parameters::new(4, 2)?;
            let key_shares =
                ConcurrentDriver::initialize(parameters.parties, |party| {
                    KeyGenerator::new(party, parameters)
                })?
                .run()
                .await?;
            assert_eq!(4, key_shares.len());

            let verifying_key = *key_shares[0].1.verifying_key();
            for key_share in &key_shares {
                assert_eq!(&verifying_key, key_share.1.verifying_key());
            }

            let message = make_signing_message()?;
            let signature = sign(
                &key_shares,
                &numbers(&[1, 2, 4]),
                &message,
                numbers(&[1])[0],
            )?;
            verifying_key.verify(&message, &signature)?;
            Ok(())
        }

        #[test]
        fn key_share_pem() -> Result<()> {
            let key_shares = keygen(Parameters::default())?;
            let encoded: ceremony_driver::KeyShare =
                (&key_shares[0]).try_into()?;
            let decoded: KeyShare = (&encoded).try_into()?;
            assert_eq!(key_shares[0].0, decoded.0);
            assert_eq!(key_shares[0].1, decoded.1);

            let document = pem::parse(&encoded.contents)?;
            assert_eq!(TAG, document.tag());
            let retagged = ceremony_driver::KeyShare {
                version: encoded.version,
                contents: pem::encode(&pem::Pem::new(
                    "OTHER KEY SHARE",
                    document.contents().to_vec(),
                )),
            };
            let err = KeyShare::try_from(&retagged).unwrap_err();
            assert!(matches!(err, ProtocolError::PemTag(_, _)));
            Ok(())
        }
    };
}

pub(crate) use frost_keygen;
