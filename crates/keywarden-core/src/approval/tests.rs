use super::*;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn test_create_returns_distinct_ids() {
    let registry = ApprovalRegistry::new();

    let mut ids = HashSet::new();
    for _ in 0..100 {
        let (id, _rx) = registry.create().await;
        ids.insert(id);
    }

    assert_eq!(ids.len(), 100);
    assert_eq!(registry.pending_count().await, 100);
}

#[tokio::test]
async fn test_approved_decision_unblocks_waiter() {
    let registry = Arc::new(ApprovalRegistry::new());

    let (id, rx) = registry.create().await;

    let resolver = registry.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(resolver.resolve(id, true).await);
    });

    let outcome = registry.wait(id, rx, Duration::from_secs(5)).await;
    assert_eq!(outcome, ApprovalOutcome::Approved);
    assert!(outcome.is_approved());
    assert_eq!(registry.pending_count().await, 0);
}

#[tokio::test]
async fn test_denied_decision_unblocks_waiter() {
    let registry = Arc::new(ApprovalRegistry::new());

    let (id, rx) = registry.create().await;

    let resolver = registry.clone();
    tokio::spawn(async move {
        assert!(resolver.resolve(id, false).await);
    });

    let outcome = registry.wait(id, rx, Duration::from_secs(5)).await;
    assert_eq!(outcome, ApprovalOutcome::Denied);
    assert_eq!(registry.pending_count().await, 0);
}

#[tokio::test]
async fn test_resolve_unknown_id() {
    let registry = ApprovalRegistry::new();

    assert!(!registry.resolve(uuid::Uuid::new_v4(), true).await);
    assert_eq!(registry.pending_count().await, 0);
}

#[tokio::test]
async fn test_resolve_is_idempotent() {
    let registry = ApprovalRegistry::new();

    let (id, _rx) = registry.create().await;

    assert!(registry.resolve(id, true).await);
    assert!(!registry.resolve(id, true).await);
    assert!(!registry.resolve(id, false).await);
}

#[tokio::test]
async fn test_wait_timeout_reclaims_entry() {
    let registry = ApprovalRegistry::new();

    let (id, rx) = registry.create().await;

    let outcome = registry.wait(id, rx, Duration::from_millis(10)).await;
    assert_eq!(outcome, ApprovalOutcome::TimedOut);

    // The timeout path must have removed the entry; a late resolver
    // observes not-found and performs no further work.
    assert_eq!(registry.pending_count().await, 0);
    assert!(!registry.resolve(id, true).await);
}

#[tokio::test]
async fn test_at_most_once_delivery() {
    let registry = Arc::new(ApprovalRegistry::new());

    let (id, _rx) = registry.create().await;

    let mut handles = Vec::new();
    for _ in 0..8 {
        let resolver = registry.clone();
        handles.push(tokio::spawn(
            async move { resolver.resolve(id, true).await },
        ));
    }

    let mut delivered = 0;
    for handle in handles {
        if handle.await.unwrap() {
            delivered += 1;
        }
    }

    assert_eq!(delivered, 1);
    assert_eq!(registry.pending_count().await, 0);
}

#[tokio::test]
async fn test_decision_racing_timeout_leaves_no_entry() {
    let registry = Arc::new(ApprovalRegistry::new());

    let (id, rx) = registry.create().await;

    let resolver = registry.clone();
    let resolve_handle = tokio::spawn(async move { resolver.resolve(id, true).await });

    // Zero-length wait races the resolver; whichever side removes the
    // entry first wins, and the loser must see not-found.
    let outcome = registry.wait(id, rx, Duration::from_millis(0)).await;
    let resolved = resolve_handle.await.unwrap();

    match outcome {
        ApprovalOutcome::Approved => assert!(resolved),
        ApprovalOutcome::TimedOut => {}
        ApprovalOutcome::Denied => panic!("nobody denied this request"),
    }
    assert_eq!(registry.pending_count().await, 0);
}

#[tokio::test]
async fn test_concurrent_create_resolve_pairs() {
    let registry = Arc::new(ApprovalRegistry::new());

    let mut handles = Vec::new();
    for _ in 0..100 {
        let reg = registry.clone();
        handles.push(tokio::spawn(async move {
            let (id, rx) = reg.create().await;

            let resolver = reg.clone();
            tokio::spawn(async move { resolver.resolve(id, true).await });

            reg.wait(id, rx, Duration::from_millis(500)).await
        }));
    }

    for handle in handles {
        assert_eq!(handle.await.unwrap(), ApprovalOutcome::Approved);
    }

    assert_eq!(registry.pending_count().await, 0);
}
