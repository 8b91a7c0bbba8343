//! Request handlers for the accounts API

pub mod invites;
pub mod passwords;
pub mod register;
pub mod sessions;
pub mod teams;
