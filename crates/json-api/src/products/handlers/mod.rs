//! Product Handlers

pub(crate) mod activate;
pub(crate) mod active;
pub(crate) mod archive;
pub(crate) mod create;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod search_by_name;
pub(crate) mod search_by_price;
pub(crate) mod update;
