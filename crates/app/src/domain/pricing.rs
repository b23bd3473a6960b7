//! Pricing Snapshot Resolver
//!
//! Turns a catalog product and a quantity into a line quote at the moment of
//! the call. Cart mutations and checkout both resolve through here, so a
//! price change or archival is picked up on the very next touch of the line.
//! All arithmetic is integer cents with overflow checks; there is no
//! floating point in the money path.

use thiserror::Error;

use crate::domain::catalog::models::{Product, ProductUuid};

/// A resolved line: the unit price in effect and the resulting subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineQuote {
    pub unit_price: u64,
    pub subtotal: u64,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    /// The product id does not exist in the catalog. Produced by callers
    /// when the lookup itself misses; [`quote`] only sees products that were
    /// found.
    #[error("product {0} not found")]
    ProductNotFound(ProductUuid),

    /// The product exists but is archived and not purchasable.
    #[error("product {0} is inactive")]
    ProductInactive(ProductUuid),

    /// `unit_price * quantity` does not fit in integer cents.
    #[error("line amount overflow")]
    AmountOverflow,
}

/// Resolve a line quote for `quantity` units of `product`.
///
/// # Errors
///
/// Fails when the product is inactive or the subtotal overflows.
pub fn quote(product: &Product, quantity: u32) -> Result<LineQuote, PricingError> {
    if !product.is_active {
        return Err(PricingError::ProductInactive(product.uuid));
    }

    let subtotal = product
        .price
        .checked_mul(u64::from(quantity))
        .ok_or(PricingError::AmountOverflow)?;

    Ok(LineQuote {
        unit_price: product.price,
        subtotal,
    })
}
