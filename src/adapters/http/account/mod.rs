//! Account HTTP module: sign-up/sign-in, billing status, subscription
//! confirmation.

pub mod dto;
pub mod handlers;
mod routes;

pub use routes::routes;
