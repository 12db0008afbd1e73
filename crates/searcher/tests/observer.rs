use alloy::primitives::B256;
use oval_searcher::{ChainSnapshot, InclusionObserver};
use oval_test_utils::{chain::MockChain, TEST_CONTRACTS, TEST_USERS};
use std::time::Duration;

#[tokio::test]
async fn snapshot_reads_block_and_nonce() {
    let chain = MockChain::new(1_234, Some(5)).with_nonce(TEST_USERS[0], 17);

    let snapshot = ChainSnapshot::take(&chain, TEST_USERS[0]).await.unwrap();

    assert_eq!(snapshot, ChainSnapshot { block: 1_234, base_fee: Some(5), nonce: 17 });
    assert_eq!(snapshot.fees().unwrap().max_fee_per_gas, 10);
}

#[tokio::test]
async fn snapshot_fails_without_block() {
    assert!(ChainSnapshot::take(&MockChain::default(), TEST_USERS[0]).await.is_err());
}

#[tokio::test(start_paused = true)]
async fn one_failure_does_not_affect_others() {
    let [unlock, liquidate, pay] = [1u8, 2, 3].map(B256::repeat_byte);
    let chain = MockChain::new(10, Some(1))
        .with_mined(unlock, TEST_CONTRACTS.oval, 11)
        .with_failure(liquidate)
        .with_mined(pay, TEST_CONTRACTS.pay_builder, 11)
        .with_receipt_delay(Duration::from_secs(3));
    let observer = InclusionObserver::new(chain.clone(), TEST_CONTRACTS);

    let observations = observer.observe([unlock, liquidate, pay]).await;

    assert_eq!(observations.len(), 3);
    assert_eq!(
        observations.iter().map(|obs| obs.hash).collect::<Vec<_>>(),
        vec![unlock, liquidate, pay]
    );

    assert!(observations[0].is_mined());
    assert_eq!(observations[0].label, "Price unlock");
    assert!(!observations[1].is_mined());
    assert_eq!(observations[1].label, "Unknown");
    assert!(observations[2].is_mined());
    assert_eq!(observations[2].label, "Pay builder");
    assert_eq!(observations[2].result.as_ref().unwrap().block_number, Some(11));

    let mut queried = chain.receipt_queries();
    queried.sort();
    assert_eq!(queried, vec![unlock, liquidate, pay]);
}

#[tokio::test]
async fn panicked_task_keeps_its_slot() {
    let [unlock, liquidate, pay] = [1u8, 2, 3].map(B256::repeat_byte);
    let chain = MockChain::new(10, Some(1))
        .with_mined(unlock, TEST_CONTRACTS.oval, 11)
        .with_panic(liquidate)
        .with_mined(pay, TEST_CONTRACTS.pay_builder, 11);
    let observer = InclusionObserver::new(chain, TEST_CONTRACTS);

    let observations = observer.observe([unlock, liquidate, pay]).await;

    assert_eq!(
        observations.iter().map(|obs| obs.hash).collect::<Vec<_>>(),
        vec![unlock, liquidate, pay]
    );
    assert!(observations[0].is_mined());
    assert_eq!(observations[1].result, Err("task failed".to_owned()));
    assert_eq!(observations[1].label, "Unknown");
    assert!(observations[2].is_mined());
}

#[tokio::test]
async fn no_hashes_no_observations() {
    let observer = InclusionObserver::new(MockChain::new(1, Some(1)), TEST_CONTRACTS);
    assert!(observer.observe([]).await.is_empty());
}
