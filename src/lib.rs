//! FitDesk - Multi-tenant gym membership administration backend
//!
//! Gym owners sign up for a 14-day trial, manage their member roster,
//! record payments, and send expiry reminders; a verified checkout
//! confirmation upgrades the trial to a paid subscription.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
