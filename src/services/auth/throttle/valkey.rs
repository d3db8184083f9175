use std::{future::Future, pin::Pin, sync::Arc, time::Duration};

use crate::services::{
    auth::throttle::store::{ThrottleError, ThrottleStore},
    cache::{CacheClient, ValkeyClient},
};

/// Valkey-backed cooldown store (Redis protocol).
///
/// Used to rate-limit OTP delivery per (email, purpose). Backend errors are
/// surfaced as `Err`; the caller chooses fail-open there.
#[derive(Clone)]
pub struct ValkeyThrottleStore<C: CacheClient> {
    cache: Arc<C>,
    // Key prefix to avoid collisions across environments
    prefix: String,
}

impl ValkeyThrottleStore<ValkeyClient> {
    pub async fn new(valkey_url: &str) -> Result<Self, ThrottleError> {
        Self::new_with_prefix(valkey_url, "otp:cooldown").await
    }

    pub async fn new_with_prefix(
        valkey_url: &str,
        prefix: impl Into<String>,
    ) -> Result<Self, ThrottleError> {
        let client = ValkeyClient::new(valkey_url).await?;

        Ok(Self {
            cache: Arc::new(client),
            prefix: prefix.into(),
        })
    }
}

impl<C: CacheClient> ValkeyThrottleStore<C> {
    pub fn new_with_cache(cache: Arc<C>, prefix: impl Into<String>) -> Self {
        Self {
            cache,
            prefix: prefix.into(),
        }
    }

    pub fn key(&self, raw: &str) -> String {
        format!("{}:{}", self.prefix, raw)
    }
}

impl<C: CacheClient> ThrottleStore for ValkeyThrottleStore<C> {
    fn try_acquire<'a>(
        &'a self,
        key: &'a str,
        ttl_secs: u64,
    ) -> Pin<Box<dyn Future<Output = Result<bool, ThrottleError>> + Send + 'a>> {
        Box::pin(async move {
            let full_key = self.key(key);

            // SET <key> "1" NX EX <ttl>
            // - true when the key is newly set (window opened)
            // - false when the key already exists (still cooling down)
            let res = self
                .cache
                .set_if_absent_with_ttl(&full_key, "1", Duration::from_secs(ttl_secs))
                .await
                .map_err(ThrottleError::Cache)?;

            Ok(res)
        })
    }
}

#[cfg(test)]
#[path = "valkey_test.rs"]
mod tests;
