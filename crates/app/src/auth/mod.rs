//! Identity resolution.
//!
//! Issuing tokens and registering users happens outside this service; this
//! module only resolves an already-issued bearer token to a [`Principal`].

pub mod errors;
pub mod models;
mod repository;
pub mod service;

pub use errors::IdentityServiceError;
pub use models::{Principal, UserUuid};
pub use service::*;
