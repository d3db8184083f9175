pub mod academies;
pub mod auth;
pub mod invites;
pub mod users;
