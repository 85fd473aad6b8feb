macro_rules! frost_refresh {
    () => {
        #[test]
        fn refresh_keeps_group_key() -> Result<()> {
            init_tracing();
            let key_shares = keygen(Parameters::new(3, 1)?)?;
            let verifying_key = *key_shares[0].1.verifying_key();

            let refreshed = refresh(
                key_shares.iter().cloned().map(KeyRefreshItem::from).collect(),
            )?;
            assert_eq!(3, refreshed.len());
            for (old, new) in key_shares.iter().zip(refreshed.iter()) {
                assert_eq!(old.0.identifier(), new.0.identifier());
                assert_eq!(&verifying_key, new.1.verifying_key());
                assert_ne!(old.0.signing_share(), new.0.signing_share());
            }

            let message = make_signing_message()?;
            let signature = sign(
                &refreshed,
                &numbers(&[1, 3]),
                &message,
                numbers(&[2])[0],
            )?;
            verifying_key.verify(&message, &signature)?;
            Ok(())
        }

        #[test]
        fn refresh_remaps_party_numbers() -> Result<()> {
            let key_shares = keygen(Parameters::new(3, 1)?)?;
            let verifying_key = *key_shares[0].1.verifying_key();

            let items = key_shares
                .iter()
                .cloned()
                .zip(numbers(&[3, 1, 2]))
                .map(|(key_share, party_number)| KeyRefreshItem {
                    key_share,
                    party_number: Some(party_number),
                })
                .collect();
            let refreshed = refresh(items)?;
            assert_eq!(key_shares[1].0.identifier(), refreshed[0].0.identifier());
            assert_eq!(key_shares[2].0.identifier(), refreshed[1].0.identifier());
            assert_eq!(key_shares[0].0.identifier(), refreshed[2].0.identifier());

            let message = make_signing_message()?;
            let signature = sign(
                &refreshed,
                &numbers(&[2, 3]),
                &message,
                numbers(&[1])[0],
            )?;
            verifying_key.verify(&message, &signature)?;
            Ok(())
        }

        #[test]
        fn refresh_drops_absent_share() -> Result<()> {
            let key_shares = keygen(Parameters::new(3, 1)?)?;
            let verifying_key = *key_shares[0].1.verifying_key();
            let items = vec![
                KeyRefreshItem::from(key_shares[0].clone()),
                KeyRefreshItem::from(key_shares[2].clone()),
            ];
            let refreshed = refresh(items)?;
            assert_eq!(2, refreshed.len());
            assert_eq!(key_shares[2].0.identifier(), refreshed[1].0.identifier());
            assert!(!refreshed[0]
                .1
                .verifying_shares()
                .contains_key(key_shares[1].0.identifier()));

            let message = make_signing_message()?;
            let signature = sign(
                &refreshed,
                &numbers(&[1, 2]),
                &message,
                numbers(&[2])[0],
            )?;
            verifying_key.verify(&message, &signature)?;

            // the dropped share no longer signs with the group
            let mixed = vec![refreshed[0].clone(), key_shares[1].clone()];
            assert!(sign(
                &mixed,
                &numbers(&[1, 2]),
                &message,
                numbers(&[1])[0],
            )
            .is_err());
            Ok(())
        }

        #[test]
        fn refresh_requires_threshold() -> Result<()> {
            let key_shares = keygen(Parameters::new(3, 2)?)?;
            let items = key_shares[..2]
                .iter()
                .cloned()
                .map(KeyRefreshItem::from)
                .collect();
            assert!(refresh(items).is_err());
            Ok(())
        }

        #[test]
        fn stale_share_cannot_sign() -> Result<()> {
            let key_shares = keygen(Parameters::new(3, 1)?)?;
            let refreshed = refresh(
                key_shares.iter().cloned().map(KeyRefreshItem::from).collect(),
            )?;

            let mixed = vec![key_shares[0].clone(), refreshed[1].clone()];
            let message = make_signing_message()?;
            assert!(sign(
                &mixed,
                &numbers(&[1, 2]),
                &message,
                numbers(&[2])[0],
            )
            .is_err());
            Ok(())
        }

        #[tokio::test]
        async fn refresh_concurrent() -> Result<()> {
            init_tracing();
            let key_shares = keygen(Parameters::new(4, 2)?)?;
            let verifying_key = *key_shares[0].1.verifying_key();

            let old_to_new: BTreeMap<_, _> = key_shares
                .iter()
                .zip(numbers(&[1, 2, 3, 4]))
                .map(|(key_share, party)| (*key_share.0.identifier(), party))
                .collect();
            let refreshed = ConcurrentDriver::initialize(4, |party| {
                KeyRefresher::new(
                    party,
                    key_shares[party.get() as usize - 1].clone(),
                    &old_to_new,
                )
            })?
            .run()
            .await?;

            let message = make_signing_message()?;
            let signature = sign(
                &refreshed,
                &numbers(&[2, 3, 4]),
                &message,
                numbers(&[3])[0],
            )?;
            verifying_key.verify(&message, &signature)?;
            Ok(())
        }
    };
}

pub(crate) use frost_refresh;
