//! Store-backed lock tests

use kvc_domain::constants::LOCK_MARKER_VALUE;
use kvc_domain::error::Error;
use kvc_domain::ports::{KeyValueStore, LockProvider};
use kvc_infrastructure::config::LockReleaseMode;
use kvc_infrastructure::lock::StoreLockProvider;
use kvc_providers::store::InMemoryStore;
use std::sync::Arc;
use std::time::Duration;

const TTL: Duration = Duration::from_secs(10);

fn lock_with(mode: LockReleaseMode) -> (Arc<InMemoryStore>, StoreLockProvider) {
    let store = Arc::new(InMemoryStore::new());
    (store.clone(), StoreLockProvider::with_mode(store, mode))
}

#[tokio::test]
async fn test_acquire_and_release() {
    let (store, lock) = lock_with(LockReleaseMode::Token);

    let guard = lock.try_acquire("lock:k", TTL).await.unwrap().unwrap();
    assert_eq!(guard.key, "lock:k");
    assert_eq!(
        store.get("lock:k").await.unwrap().as_deref(),
        Some(guard.token.as_str())
    );
    assert!(lock.try_acquire("lock:k", TTL).await.unwrap().is_none());

    assert!(lock.release(&guard).await.unwrap());
    assert!(lock.try_acquire("lock:k", TTL).await.unwrap().is_some());
}

#[tokio::test]
async fn test_tokens_are_unique() {
    let (_store, lock) = lock_with(LockReleaseMode::Token);

    let a = lock.try_acquire("lock:a", TTL).await.unwrap().unwrap();
    let b = lock.try_acquire("lock:b", TTL).await.unwrap().unwrap();

    assert_ne!(a.token, b.token);
}

#[tokio::test]
async fn test_unconditional_mode_writes_marker() {
    let (store, lock) = lock_with(LockReleaseMode::Unconditional);

    let guard = lock.try_acquire("lock:k", TTL).await.unwrap().unwrap();

    assert_eq!(guard.token, LOCK_MARKER_VALUE);
    assert_eq!(
        store.get("lock:k").await.unwrap().as_deref(),
        Some(LOCK_MARKER_VALUE)
    );
}

#[tokio::test]
async fn test_zero_ttl_rejected() {
    let (_store, lock) = lock_with(LockReleaseMode::Token);

    let err = lock.try_acquire("lock:k", Duration::ZERO).await.unwrap_err();

    assert!(matches!(err, Error::InvalidArgument { .. }));
}

#[tokio::test(start_paused = true)]
async fn test_expired_lock_can_be_reacquired() {
    let (_store, lock) = lock_with(LockReleaseMode::Token);

    let _stale = lock.try_acquire("lock:k", TTL).await.unwrap().unwrap();
    tokio::time::advance(TTL).await;

    assert!(lock.try_acquire("lock:k", TTL).await.unwrap().is_some());
}

#[tokio::test(start_paused = true)]
async fn test_token_release_spares_new_holder() {
    let (store, lock) = lock_with(LockReleaseMode::Token);

    let stale = lock.try_acquire("lock:k", TTL).await.unwrap().unwrap();
    tokio::time::advance(TTL).await;
    let current = lock.try_acquire("lock:k", TTL).await.unwrap().unwrap();

    assert!(!lock.release(&stale).await.unwrap());
    assert_eq!(
        store.get("lock:k").await.unwrap().as_deref(),
        Some(current.token.as_str())
    );
}

#[tokio::test(start_paused = true)]
async fn test_unconditional_release_frees_new_holder() {
    let (store, lock) = lock_with(LockReleaseMode::Unconditional);

    let stale = lock.try_acquire("lock:k", TTL).await.unwrap().unwrap();
    tokio::time::advance(TTL).await;
    let _current = lock.try_acquire("lock:k", TTL).await.unwrap().unwrap();

    assert!(lock.release(&stale).await.unwrap());
    assert_eq!(store.get("lock:k").await.unwrap(), None);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_mutual_exclusion() {
    let store = Arc::new(InMemoryStore::new());
    let lock = Arc::new(StoreLockProvider::new(store));

    let contenders: Vec<_> = (0..2)
        .map(|_| {
            let lock = lock.clone();
            tokio::spawn(async move { lock.try_acquire("lock:shared", TTL).await.unwrap() })
        })
        .collect();

    let mut acquired = 0;
    for contender in contenders {
        if contender.await.unwrap().is_some() {
            acquired += 1;
        }
    }
    assert_eq!(acquired, 1);
}
