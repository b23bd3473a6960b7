//! Cart Models
//!
//! The mutation methods on [`Cart`] are pure: the service layer loads the
//! aggregate, applies one of them, and writes the result back inside a single
//! transaction. Every mutation ends with a full recomputation of the total,
//! never incremental subtraction, so the total always equals the sum of the
//! line subtotals.

use jiff::Timestamp;

use crate::{
    auth::models::UserUuid,
    domain::{carts::errors::CartsServiceError, catalog::models::ProductUuid},
    uuids::TypedUuid,
};

/// Cart UUID
pub type CartUuid = TypedUuid<Cart>;

/// One product-and-quantity line within a cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItem {
    pub product: ProductUuid,
    pub quantity: u32,
    /// `quantity * unit price` as resolved at the last mutation that touched
    /// this line.
    pub subtotal: u64,
}

/// Cart Model
///
/// At most one cart exists per user; it is created lazily on the first add
/// and emptied, not deleted, on checkout.
#[derive(Debug, Clone)]
pub struct Cart {
    pub uuid: CartUuid,
    pub owner: UserUuid,
    pub items: Vec<CartItem>,
    pub total: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Cart {
    /// Add `quantity` units of `product`, or increment the existing line.
    ///
    /// The whole line's subtotal is recomputed from `unit_price`, the price
    /// in effect *now*, so a stale price stored at first add never
    /// survives a touch of the line.
    pub fn upsert_item(
        &mut self,
        product: ProductUuid,
        quantity: u32,
        unit_price: u64,
    ) -> Result<(), CartsServiceError> {
        match self.items.iter_mut().find(|item| item.product == product) {
            Some(item) => {
                item.quantity = item
                    .quantity
                    .checked_add(quantity)
                    .ok_or(CartsServiceError::AmountOverflow)?;
                item.subtotal = line_subtotal(unit_price, item.quantity)?;
            }
            None => {
                let subtotal = line_subtotal(unit_price, quantity)?;

                self.items.push(CartItem {
                    product,
                    quantity,
                    subtotal,
                });
            }
        }

        self.recompute_total()
    }

    /// Set the line for `product` to exactly `quantity` units; zero removes
    /// the line entirely rather than leaving a placeholder.
    pub fn set_item_quantity(
        &mut self,
        product: ProductUuid,
        quantity: u32,
        unit_price: u64,
    ) -> Result<(), CartsServiceError> {
        let index = self
            .items
            .iter()
            .position(|item| item.product == product)
            .ok_or(CartsServiceError::ItemNotFound)?;

        if quantity == 0 {
            self.items.remove(index);
        } else if let Some(item) = self.items.get_mut(index) {
            item.quantity = quantity;
            item.subtotal = line_subtotal(unit_price, quantity)?;
        }

        self.recompute_total()
    }

    /// Delete the line for `product`.
    pub fn remove_item(&mut self, product: ProductUuid) -> Result<(), CartsServiceError> {
        let index = self
            .items
            .iter()
            .position(|item| item.product == product)
            .ok_or(CartsServiceError::ItemNotFound)?;

        self.items.remove(index);

        self.recompute_total()
    }

    /// Empty the cart and zero its total.
    pub fn clear_items(&mut self) {
        self.items.clear();
        self.total = 0;
    }

    fn recompute_total(&mut self) -> Result<(), CartsServiceError> {
        self.total = self
            .items
            .iter()
            .try_fold(0_u64, |acc, item| acc.checked_add(item.subtotal))
            .ok_or(CartsServiceError::AmountOverflow)?;

        Ok(())
    }
}

fn line_subtotal(unit_price: u64, quantity: u32) -> Result<u64, CartsServiceError> {
    unit_price
        .checked_mul(u64::from(quantity))
        .ok_or(CartsServiceError::AmountOverflow)
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    fn empty_cart() -> Cart {
        Cart {
            uuid: CartUuid::new(),
            owner: UserUuid::from_uuid(Uuid::nil()),
            items: vec![],
            total: 0,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    fn assert_total_consistent(cart: &Cart) {
        let sum: u64 = cart.items.iter().map(|item| item.subtotal).sum();

        assert_eq!(cart.total, sum, "total must equal the sum of subtotals");
    }

    #[test]
    fn upsert_appends_a_new_line() {
        let mut cart = empty_cart();
        let product = ProductUuid::new();

        cart.upsert_item(product, 2, 10_00).unwrap();

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.total, 20_00);
        assert_total_consistent(&cart);
    }

    #[test]
    fn upsert_increments_an_existing_line() {
        let mut cart = empty_cart();
        let product = ProductUuid::new();

        cart.upsert_item(product, 2, 10_00).unwrap();
        cart.upsert_item(product, 3, 10_00).unwrap();

        assert_eq!(cart.items.len(), 1, "same product must stay on one line");
        assert_eq!(cart.items[0].quantity, 5);
        assert_eq!(cart.total, 50_00);
        assert_total_consistent(&cart);
    }

    #[test]
    fn upsert_refreshes_the_price_for_the_whole_line() {
        let mut cart = empty_cart();
        let product = ProductUuid::new();

        cart.upsert_item(product, 2, 10_00).unwrap();

        // Price changed in the catalog between the two adds; the whole line
        // is repriced, not just the increment.
        cart.upsert_item(product, 1, 12_00).unwrap();

        assert_eq!(cart.items[0].subtotal, 36_00);
        assert_eq!(cart.total, 36_00);
        assert_total_consistent(&cart);
    }

    #[test]
    fn distinct_products_keep_distinct_lines() {
        let mut cart = empty_cart();

        cart.upsert_item(ProductUuid::new(), 2, 10_00).unwrap();
        cart.upsert_item(ProductUuid::new(), 1, 5_00).unwrap();

        assert_eq!(cart.items.len(), 2);
        assert_eq!(cart.total, 25_00);
        assert_total_consistent(&cart);
    }

    #[test]
    fn set_quantity_zero_removes_the_line() {
        let mut cart = empty_cart();
        let keep = ProductUuid::new();
        let dropped = ProductUuid::new();

        cart.upsert_item(keep, 1, 5_00).unwrap();
        cart.upsert_item(dropped, 2, 10_00).unwrap();

        cart.set_item_quantity(dropped, 0, 10_00).unwrap();

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].product, keep);
        assert_eq!(cart.total, 5_00);
        assert_total_consistent(&cart);
    }

    #[test]
    fn set_quantity_zero_matches_remove_for_totals() {
        let product = ProductUuid::new();

        let mut via_zero = empty_cart();
        via_zero.upsert_item(product, 2, 10_00).unwrap();
        via_zero.set_item_quantity(product, 0, 10_00).unwrap();

        let mut via_remove = empty_cart();
        via_remove.upsert_item(product, 2, 10_00).unwrap();
        via_remove.remove_item(product).unwrap();

        assert_eq!(via_zero.total, via_remove.total);
        assert_eq!(via_zero.items.len(), via_remove.items.len());
    }

    #[test]
    fn set_quantity_reprices_the_line() {
        let mut cart = empty_cart();
        let product = ProductUuid::new();

        cart.upsert_item(product, 2, 10_00).unwrap();
        cart.set_item_quantity(product, 4, 9_00).unwrap();

        assert_eq!(cart.items[0].subtotal, 36_00);
        assert_eq!(cart.total, 36_00);
        assert_total_consistent(&cart);
    }

    #[test]
    fn set_quantity_on_missing_line_fails() {
        let mut cart = empty_cart();

        let result = cart.set_item_quantity(ProductUuid::new(), 1, 10_00);

        assert!(matches!(result, Err(CartsServiceError::ItemNotFound)));
    }

    #[test]
    fn remove_missing_line_fails_and_leaves_cart_unchanged() {
        let mut cart = empty_cart();

        cart.upsert_item(ProductUuid::new(), 1, 10_00).unwrap();

        let result = cart.remove_item(ProductUuid::new());

        assert!(matches!(result, Err(CartsServiceError::ItemNotFound)));
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.total, 10_00);
    }

    #[test]
    fn clear_empties_items_and_zeroes_total() {
        let mut cart = empty_cart();

        cart.upsert_item(ProductUuid::new(), 3, 7_50).unwrap();
        cart.clear_items();

        assert!(cart.items.is_empty());
        assert_eq!(cart.total, 0);
    }

    #[test]
    fn overflowing_line_is_rejected_without_mutating_total() {
        let mut cart = empty_cart();
        let product = ProductUuid::new();

        cart.upsert_item(product, 1, 10_00).unwrap();

        let result = cart.upsert_item(ProductUuid::new(), 2, u64::MAX);

        assert!(matches!(result, Err(CartsServiceError::AmountOverflow)));
        assert_eq!(cart.total, 10_00, "total must keep its last valid value");
    }

    #[test]
    fn total_stays_consistent_across_a_mutation_sequence() {
        let mut cart = empty_cart();
        let p1 = ProductUuid::new();
        let p2 = ProductUuid::new();
        let p3 = ProductUuid::new();

        cart.upsert_item(p1, 2, 10_00).unwrap();
        cart.upsert_item(p2, 1, 5_00).unwrap();
        cart.upsert_item(p3, 4, 2_25).unwrap();
        cart.set_item_quantity(p1, 1, 11_00).unwrap();
        cart.remove_item(p2).unwrap();
        cart.upsert_item(p2, 2, 5_50).unwrap();
        cart.set_item_quantity(p3, 0, 2_25).unwrap();

        assert_total_consistent(&cart);
        assert_eq!(cart.total, 11_00 + 11_00);
    }
}
