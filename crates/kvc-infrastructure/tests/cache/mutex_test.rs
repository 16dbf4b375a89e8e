//! Mutex-guarded pass-through strategy

use crate::test_utils::*;
use kvc_domain::error::Error;
use kvc_domain::ports::{KeyValueStore, LockProvider};
use kvc_infrastructure::cache::CacheClient;
use kvc_infrastructure::config::LockConfig;
use kvc_infrastructure::executor::InlineExecutor;
use kvc_infrastructure::lock::StoreLockProvider;
use std::sync::Arc;
use std::time::Duration;

const TTL: Duration = Duration::from_secs(30 * 60);

fn fast_retry(max_attempts: u32) -> LockConfig {
    LockConfig {
        retry_interval_ms: 5,
        max_attempts,
        ..LockConfig::default()
    }
}

#[tokio::test]
async fn test_miss_loads_under_lock_and_releases_it() {
    let (store, client) = memory_client(Arc::new(InlineExecutor::new()));
    let loader = CountingLoader::with_shops([Shop::new(1, "Tea House")]);

    let shop = client
        .fetch_or_load_with_mutex(SHOP_PREFIX, 1, TTL, &loader)
        .await
        .unwrap();

    assert_eq!(shop, Some(Shop::new(1, "Tea House")));
    assert_eq!(loader.calls(), 1);
    assert_eq!(
        store.get(&client.lock_key("cache:shop:1")).await.unwrap(),
        None
    );
}

#[tokio::test]
async fn test_absent_record_cached_as_null_marker() {
    let (_store, client) = memory_client(Arc::new(InlineExecutor::new()));
    let loader = CountingLoader::empty();

    for _ in 0..3 {
        let shop: Option<Shop> = client
            .fetch_or_load_with_mutex(SHOP_PREFIX, 2, TTL, &loader)
            .await
            .unwrap();
        assert_eq!(shop, None);
    }

    assert_eq!(loader.calls(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_misses_load_once() {
    let (_store, client) =
        memory_client_with_lock(Arc::new(InlineExecutor::new()), &fast_retry(1_000));
    let loader = Arc::new(
        CountingLoader::with_shops([Shop::new(1, "Tea House")])
            .with_delay(Duration::from_millis(50)),
    );

    let tasks: Vec<_> = (0..10)
        .map(|_| {
            let client = client.clone();
            let loader = loader.clone();
            tokio::spawn(async move {
                client
                    .fetch_or_load_with_mutex(SHOP_PREFIX, 1, TTL, loader.as_ref())
                    .await
            })
        })
        .collect();

    for task in tasks {
        assert_eq!(
            task.await.unwrap().unwrap(),
            Some(Shop::new(1, "Tea House"))
        );
    }
    assert_eq!(loader.calls(), 1);
}

#[tokio::test]
async fn test_gives_up_after_max_attempts() {
    let (store, client) =
        memory_client_with_lock(Arc::new(InlineExecutor::new()), &fast_retry(3));
    let loader = CountingLoader::with_shops([Shop::new(1, "Tea House")]);
    let lock_key = client.lock_key("cache:shop:1");
    store
        .set(&lock_key, "stuck-holder", Some(Duration::from_secs(60)))
        .await
        .unwrap();

    let err = client
        .fetch_or_load_with_mutex::<_, Shop, _>(SHOP_PREFIX, 1, TTL, &loader)
        .await
        .unwrap_err();

    match err {
        Error::LockTimeout { key, attempts } => {
            assert_eq!(key, lock_key);
            assert_eq!(attempts, 3);
        }
        other => panic!("expected lock timeout, got {other:?}"),
    }
    assert_eq!(loader.calls(), 0);
    assert_eq!(client.stats().lock_contentions, 3);
}

#[tokio::test]
async fn test_zero_attempts_still_serves_cached_value() {
    let (_store, client) =
        memory_client_with_lock(Arc::new(InlineExecutor::new()), &fast_retry(0));
    let loader = CountingLoader::with_shops([Shop::new(9, "Dumpling Stand")]);
    client
        .store("cache:shop:9", &Shop::new(9, "Dumpling Stand"), TTL)
        .await
        .unwrap();

    let shop = client
        .fetch_or_load_with_mutex(SHOP_PREFIX, 9, TTL, &loader)
        .await
        .unwrap();

    assert_eq!(shop, Some(Shop::new(9, "Dumpling Stand")));
    assert_eq!(loader.calls(), 0);
}

#[tokio::test]
async fn test_zero_attempts_still_loads_on_free_lock() {
    let (_store, client) =
        memory_client_with_lock(Arc::new(InlineExecutor::new()), &fast_retry(0));
    let loader = CountingLoader::with_shops([Shop::new(10, "Juice Bar")]);

    let shop = client
        .fetch_or_load_with_mutex(SHOP_PREFIX, 10, TTL, &loader)
        .await
        .unwrap();

    assert_eq!(shop, Some(Shop::new(10, "Juice Bar")));
    assert_eq!(loader.calls(), 1);
}

#[tokio::test]
async fn test_waiter_picks_up_value_written_by_holder() {
    let (store, client) =
        memory_client_with_lock(Arc::new(InlineExecutor::new()), &fast_retry(100));
    let loader = CountingLoader::with_shops([Shop::new(1, "Tea House")]);
    let lock = StoreLockProvider::new(store.clone());
    let guard = lock
        .try_acquire(&client.lock_key("cache:shop:1"), Duration::from_secs(10))
        .await
        .unwrap()
        .unwrap();

    let holder = {
        let client = client.clone();
        async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            client
                .store("cache:shop:1", &Shop::new(1, "Written by holder"), TTL)
                .await
                .unwrap();
            lock.release(&guard).await.unwrap();
        }
    };
    let (shop, ()) = tokio::join!(
        client.fetch_or_load_with_mutex(SHOP_PREFIX, 1, TTL, &loader),
        holder
    );

    assert_eq!(shop.unwrap(), Some(Shop::new(1, "Written by holder")));
    assert_eq!(loader.calls(), 0);
}

#[tokio::test]
async fn test_loader_error_releases_lock() {
    let (store, client) = memory_client(Arc::new(InlineExecutor::new()));
    let loader = CountingLoader::failing();

    let err = client
        .fetch_or_load_with_mutex::<_, Shop, _>(SHOP_PREFIX, 1, TTL, &loader)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Loader { .. }));
    assert_eq!(
        store.get(&client.lock_key("cache:shop:1")).await.unwrap(),
        None
    );
}

#[tokio::test]
async fn test_store_failure_propagates() {
    let store: Arc<dyn KeyValueStore> = Arc::new(FailingStore);
    let lock = Arc::new(StoreLockProvider::new(store.clone()));
    let client = CacheClient::new(store, lock, Arc::new(InlineExecutor::new()));

    let err = client
        .fetch_or_load_with_mutex::<_, Shop, _>(
            SHOP_PREFIX,
            1,
            TTL,
            &CountingLoader::empty(),
        )
        .await
        .unwrap_err();

    assert!(err.is_store_unavailable());
}
