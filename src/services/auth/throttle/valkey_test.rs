use super::*;
use crate::services::cache::client::CacheResult;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// In-memory CacheClient for exercising the store without a live backend.
#[derive(Clone, Default)]
struct MemoryCache {
    keys: Arc<Mutex<HashMap<String, String>>>,
}

#[async_trait]
impl CacheClient for MemoryCache {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn set_if_absent_with_ttl(
        &self,
        key: &str,
        value: &str,
        _ttl: Duration,
    ) -> CacheResult<bool> {
        let mut keys = self.keys.lock().unwrap();
        if keys.contains_key(key) {
            return Ok(false);
        }
        keys.insert(key.to_owned(), value.to_owned());
        Ok(true)
    }
}

#[tokio::test]
async fn first_acquire_opens_the_window() {
    let store = ValkeyThrottleStore::new_with_cache(Arc::new(MemoryCache::default()), "otp:test");
    assert!(store.try_acquire("a@example.com:login", 60).await.unwrap());
}

#[tokio::test]
async fn second_acquire_within_window_is_rejected() {
    let store = ValkeyThrottleStore::new_with_cache(Arc::new(MemoryCache::default()), "otp:test");
    assert!(store.try_acquire("a@example.com:login", 60).await.unwrap());
    assert!(!store.try_acquire("a@example.com:login", 60).await.unwrap());
}

#[tokio::test]
async fn windows_are_scoped_per_key() {
    let store = ValkeyThrottleStore::new_with_cache(Arc::new(MemoryCache::default()), "otp:test");
    assert!(store.try_acquire("a@example.com:login", 60).await.unwrap());
    assert!(store.try_acquire("b@example.com:login", 60).await.unwrap());
    assert!(store.try_acquire("a@example.com:signup", 60).await.unwrap());
}

#[test]
fn keys_carry_the_prefix() {
    let store = ValkeyThrottleStore::new_with_cache(Arc::new(MemoryCache::default()), "otp:test");
    assert_eq!(store.key("a@example.com:login"), "otp:test:a@example.com:login");
}
