use anyhow::Result;
use ceremony_driver::{ConcurrentDriver, Error, RoundDriver};
use std::time::Duration;

use crate::test_utils::{init_tracing, Gossip};

#[tokio::test]
async fn concurrent_gossip_matches_round_driver() -> Result<()> {
    init_tracing();
    let parties = 4;
    let rounds = 3;

    let concurrent = ConcurrentDriver::initialize(parties, |party| {
        Ok(Gossip::new(party, rounds))
    })?
    .run()
    .await?;

    let mut driver =
        RoundDriver::initialize(parties, |party| Ok(Gossip::new(party, rounds)))?;
    driver.run()?;
    assert_eq!(rounds as usize + 1, driver.history().len());
    let sequential = driver.finalize()?;

    assert_eq!(parties as usize, concurrent.len());
    for (left, right) in concurrent.iter().zip(sequential.iter()) {
        assert_eq!((rounds * (parties - 1)) as usize, left.len());
        assert_eq!(left, right);
    }
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_gossip_times_out() -> Result<()> {
    init_tracing();
    let driver = ConcurrentDriver::initialize(3, |party| {
        let handle = Gossip::new(party, 3);
        Ok(if party.get() == 2 {
            handle.stalling(2, Duration::from_millis(500))
        } else {
            handle
        })
    })?
    .with_round_timeout(Duration::from_millis(50));

    let err = driver.run().await.unwrap_err();
    assert!(matches!(
        err,
        Error::Timeout { round: 2, ref parties } if parties == &vec![2]
    ));
    Ok(())
}
