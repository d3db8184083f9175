use std::{future::Future, pin::Pin};

use crate::services::cache::CacheError;

/// Cooldown check result:
/// - `Ok(true)`: window acquired (request allowed, next one blocked for TTL)
/// - `Ok(false)`: still inside an earlier cooldown window
/// - `Err(_)`: store failure (caller decides; the OTP request path fails open)
pub trait ThrottleStore: Send + Sync {
    // Atomically open the cooldown window for `key` unless one is already open.
    //
    // Returns:
    // - Ok(true)  => window opened (allowed)
    // - Ok(false) => window already open (reject)
    // - Err(_)    => backend failure
    fn try_acquire<'a>(
        &'a self,
        key: &'a str,
        ttl_secs: u64,
    ) -> Pin<Box<dyn Future<Output = Result<bool, ThrottleError>> + Send + 'a>>;
}

#[derive(Debug, thiserror::Error)]
pub enum ThrottleError {
    #[error(transparent)]
    Cache(#[from] CacheError),
}
