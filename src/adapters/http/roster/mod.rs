//! Roster HTTP module: members, payments, dashboard.

pub mod dto;
pub mod handlers;
mod routes;

pub use routes::routes;
