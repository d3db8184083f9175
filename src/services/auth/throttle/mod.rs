pub mod store;
pub mod valkey;

pub use store::{ThrottleError, ThrottleStore};
pub use valkey::ValkeyThrottleStore;
