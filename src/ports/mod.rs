//! Ports: trait contracts the application layer depends on.
//!
//! Adapters (PostgreSQL, Twilio, EmailJS, in-memory test doubles) implement
//! these traits; handlers only ever see the trait objects.

mod account_store;
mod member_repository;
mod notification_gateway;
mod payment_repository;

pub use account_store::{AccountStore, Session};
pub use member_repository::MemberRepository;
pub use notification_gateway::{GatewayError, NotificationGateway};
pub use payment_repository::PaymentRepository;
