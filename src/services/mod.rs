pub mod auth;
pub mod cache;
pub mod invites;
pub mod mailer;
