pub mod jwt;
pub mod otp;
pub mod roles;
pub mod throttle;

pub use roles::AppRole;
