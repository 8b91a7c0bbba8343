//! HTTP API layer: state, routes, and handlers

pub mod handlers;
pub mod middleware;
pub mod routes;

pub use middleware::AccountsState;
