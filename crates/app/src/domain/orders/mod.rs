//! Orders
//!
//! Checkout converts a cart into an immutable order inside one transaction;
//! afterwards only the order's status moves, through the lifecycle rules in
//! [`status`].

pub mod errors;
pub mod models;
pub(crate) mod repository;
pub mod service;
pub mod status;

pub use errors::OrdersServiceError;
pub use service::*;
pub use status::OrderStatus;
