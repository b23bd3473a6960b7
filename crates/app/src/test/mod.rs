//! Shared infrastructure for database-backed service tests.

pub(crate) mod context;

pub(crate) use context::TestContext;
