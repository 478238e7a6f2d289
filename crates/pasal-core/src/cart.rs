//! # Cart
//!
//! One customer's cart session. The storefront client keeps the cart; the
//! server rebuilds one from the submitted lines to price it.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Customer Action          Method                 Cart Change            │
//! │  ───────────────          ──────                 ───────────            │
//! │                                                                         │
//! │  "Add to cart" ──────────► add_item() ──────────► push or merge qty    │
//! │                                                                         │
//! │  +/- buttons ────────────► update_quantity() ───► qty = n (0 removes)  │
//! │                                                                         │
//! │  Trash icon ─────────────► remove_item() ───────► line removed         │
//! │                                                                         │
//! │  Order placed ───────────► clear() ─────────────► empty                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::pricing::CartLineItem;
use crate::validation::validate_quantity;
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY};

/// The shopping cart.
///
/// ## Invariants
/// - Lines are unique by `product_id` (adding the same product merges)
/// - Every line has quantity 1..=999 and a unit price within `MAX_UNIT_PRICE`
/// - At most 100 lines
/// - A line's unit price is frozen when it is first added
///
/// Built only through [`Cart::add_item`] so the invariants always hold.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    items: Vec<CartLineItem>,
}

impl Cart {
    pub fn new() -> Self {
        Cart::default()
    }

    /// Rebuilds a cart from submitted lines, merging duplicates.
    pub fn from_line_items<I>(lines: I) -> CoreResult<Self>
    where
        I: IntoIterator<Item = CartLineItem>,
    {
        let mut cart = Cart::new();
        for line in lines {
            cart.add_item(line.product_id, line.unit_price, line.quantity)?;
        }
        Ok(cart)
    }

    /// Adds a product or increases its quantity if already present.
    ///
    /// When the product is already in the cart, the price it was first added
    /// at is kept and `unit_price` is ignored.
    pub fn add_item(
        &mut self,
        product_id: impl Into<String>,
        unit_price: Money,
        quantity: u32,
    ) -> CoreResult<()> {
        let line = CartLineItem::new(product_id, unit_price, quantity);
        line.validate()?;
        validate_quantity(quantity)?;

        if let Some(existing) = self.find_mut(&line.product_id) {
            let merged = existing.quantity.saturating_add(quantity);
            if merged > MAX_ITEM_QUANTITY {
                return Err(CoreError::QuantityTooLarge {
                    requested: merged,
                    max: MAX_ITEM_QUANTITY,
                });
            }
            existing.quantity = merged;
            return Ok(());
        }

        if self.items.len() >= MAX_CART_ITEMS {
            return Err(CoreError::CartTooLarge { max: MAX_CART_ITEMS });
        }

        self.items.push(line);
        Ok(())
    }

    /// Sets a line's quantity. Zero removes the line.
    pub fn update_quantity(&mut self, product_id: &str, quantity: u32) -> CoreResult<()> {
        if quantity == 0 {
            return self.remove_item(product_id);
        }

        if quantity > MAX_ITEM_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: quantity,
                max: MAX_ITEM_QUANTITY,
            });
        }

        match self.find_mut(product_id) {
            Some(line) => {
                line.quantity = quantity;
                Ok(())
            }
            None => Err(CoreError::ItemNotInCart(product_id.to_string())),
        }
    }

    pub fn remove_item(&mut self, product_id: &str) -> CoreResult<()> {
        let before = self.items.len();
        self.items.retain(|i| i.product_id != product_id);

        if self.items.len() == before {
            Err(CoreError::ItemNotInCart(product_id.to_string()))
        } else {
            Ok(())
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Lines in the order they were first added.
    pub fn line_items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Total units across all lines (the badge on the cart icon).
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Number of distinct products.
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    pub fn subtotal(&self) -> Money {
        self.items.iter().map(CartLineItem::line_total).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn find_mut(&mut self, product_id: &str) -> Option<&mut CartLineItem> {
        self.items.iter_mut().find(|i| i.product_id == product_id)
    }
}
