//! Storefront domain and persistence modules.
//!
//! The HTTP surface lives in the `storefront-json` crate; everything here is
//! transport-agnostic: identity resolution, the product catalog, per-user
//! carts, and the checkout/order lifecycle, all backed by Postgres.

pub mod auth;
pub mod context;
pub mod database;
pub mod domain;

#[cfg(test)]
mod test;

pub mod uuids;
