macro_rules! frost_sign {
    () => {
        #[test]
        fn sign_two_of_three() -> Result<()> {
            init_tracing();
            let key_shares = keygen(Parameters::new(3, 1)?)?;
            let verifying_key = *key_shares[0].1.verifying_key();
            let message = make_signing_message()?;

            let mut driver = presign(&key_shares, &numbers(&[1, 3]))?;
            assert_eq!(2, driver.history().len());
            let signature = driver.sign(&message, numbers(&[2])[0])?;
            verifying_key.verify(&message, &signature)?;
            assert!(driver.handles().is_empty());

            let artifact =
                signature_artifact(&signature, &verifying_key, &message)?;
            verify_artifact(&artifact)?;
            let json = serde_json::to_value(&artifact)?;
            assert!(json.get("verifyingKey").is_some());

            let mut tampered = artifact.clone();
            tampered.message = ceremony_protocol::hex::encode(b"tampered");
            assert!(verify_artifact(&tampered).is_err());
            Ok(())
        }

        #[test]
        fn sign_with_every_party() -> Result<()> {
            let key_shares = keygen(Parameters::new(3, 2)?)?;
            let message = make_signing_message()?;
            let signature = sign(
                &key_shares,
                &numbers(&[1, 2, 3]),
                &message,
                numbers(&[3])[0],
            )?;
            key_shares[0].1.verifying_key().verify(&message, &signature)?;
            Ok(())
        }

        #[test]
        fn sign_requires_threshold() -> Result<()> {
            let key_shares = keygen(Parameters::new(3, 2)?)?;
            let message = make_signing_message()?;
            assert!(sign(
                &key_shares,
                &numbers(&[1, 2]),
                &message,
                numbers(&[1])[0],
            )
            .is_err());
            Ok(())
        }

        #[test]
        fn sign_rejects_unknown_aggregator() -> Result<()> {
            let key_shares = keygen(Parameters::new(3, 1)?)?;
            let message = make_signing_message()?;
            let mut driver = presign(&key_shares, &numbers(&[1, 2]))?;
            let err = driver.sign(&message, numbers(&[3])[0]).unwrap_err();
            assert!(matches!(err, ceremony_driver::Error::Aggregator(3)));
            Ok(())
        }
    };
}

pub(crate) use frost_sign;
