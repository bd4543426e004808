/// The diner's cart: one line per distinct menu item.
///
/// # Actor Framework
/// Carts are managed by the cart actor, see [`crate::cart_actor`]. Menu lookups
/// happen there; the methods below operate on items already resolved.
use crate::model::pricing::{self, CartTotals, Price, PricingRules};
use crate::model::{MenuItem, MenuItemId};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for carts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CartId(pub u32);

impl From<u32> for CartId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for CartId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "cart_{}", self.0)
    }
}

/// A menu item together with how many of it were ordered. Quantity is at least 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub item: MenuItem,
    pub quantity: u32,
}

impl CartLine {
    pub fn line_total(&self) -> Price {
        self.item.price * Price::from(self.quantity)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    pub id: CartId,
    /// Lines in the order their items were first added.
    pub lines: Vec<CartLine>,
}

/// Payload for creating a cart. Carts always start empty.
#[derive(Debug, Clone, Default)]
pub struct CartCreate;

impl Cart {
    pub fn new(id: CartId) -> Self {
        Self {
            id,
            lines: Vec::new(),
        }
    }

    /// Adds `quantity` of `item`, merging into an existing line for the same item.
    ///
    /// A quantity of 0 counts as 1. Returns the line's new quantity, or `None`
    /// (leaving the line untouched) if the merged quantity would overflow.
    pub fn add(&mut self, item: MenuItem, quantity: u32) -> Option<u32> {
        let quantity = quantity.max(1);
        match self.lines.iter_mut().find(|line| line.item.id == item.id) {
            Some(line) => {
                line.quantity = line.quantity.checked_add(quantity)?;
                Some(line.quantity)
            }
            None => {
                self.lines.push(CartLine { item, quantity });
                Some(quantity)
            }
        }
    }

    /// Sets the quantity of an existing line, clamped to at least 1.
    ///
    /// Returns `None` (and changes nothing) when the item is not in the cart.
    pub fn update_quantity(&mut self, item_id: MenuItemId, quantity: u32) -> Option<u32> {
        let line = self.lines.iter_mut().find(|line| line.item.id == item_id)?;
        line.quantity = quantity.max(1);
        Some(line.quantity)
    }

    /// Removes the line for `item_id`. Returns whether a line was removed.
    pub fn remove(&mut self, item_id: MenuItemId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.item.id != item_id);
        self.lines.len() != before
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn line(&self, item_id: MenuItemId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.item.id == item_id)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of quantities, shown on the cart badge.
    pub fn total_items(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    pub fn subtotal(&self) -> Price {
        pricing::subtotal(&self.lines)
    }

    pub fn totals(&self, rules: &PricingRules) -> CartTotals {
        rules.cart_totals(self.subtotal())
    }

    /// Checkout can only be opened from a cart with something in it.
    pub fn can_checkout(&self) -> bool {
        !self.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu_actor::catalog::dummy_items;

    fn item(id: u32) -> MenuItem {
        dummy_items()
            .into_iter()
            .find(|item| item.id == MenuItemId(id))
            .unwrap()
    }

    #[test]
    fn test_add_merges_lines_for_same_item() {
        let mut cart = Cart::new(CartId(1));
        assert_eq!(cart.add(item(1), 1), Some(1));
        assert_eq!(cart.add(item(3), 1), Some(1));
        assert_eq!(cart.add(item(1), 2), Some(3));

        assert_eq!(cart.lines.len(), 2);
        assert_eq!(cart.lines[0].item.id, MenuItemId(1));
        assert_eq!(cart.lines[0].quantity, 3);
        assert_eq!(cart.total_items(), 4);
    }

    #[test]
    fn test_add_zero_counts_as_one() {
        let mut cart = Cart::new(CartId(1));
        assert_eq!(cart.add(item(4), 0), Some(1));
    }

    #[test]
    fn test_add_past_max_quantity_leaves_line_unchanged() {
        let mut cart = Cart::new(CartId(1));
        assert_eq!(cart.add(item(1), u32::MAX), Some(u32::MAX));

        assert_eq!(cart.add(item(1), 1), None);
        assert_eq!(cart.lines.len(), 1);
        assert_eq!(cart.lines[0].quantity, u32::MAX);

        cart.add(item(2), u32::MAX);
        assert_eq!(cart.total_items(), 2 * u64::from(u32::MAX));
    }

    #[test]
    fn test_update_quantity_clamps_to_one() {
        let mut cart = Cart::new(CartId(1));
        cart.add(item(2), 4);

        assert_eq!(cart.update_quantity(MenuItemId(2), 0), Some(1));
        assert_eq!(cart.line(MenuItemId(2)).unwrap().quantity, 1);
        assert_eq!(cart.update_quantity(MenuItemId(2), 7), Some(7));
    }

    #[test]
    fn test_update_quantity_of_missing_item_is_noop() {
        let mut cart = Cart::new(CartId(1));
        cart.add(item(2), 1);

        assert_eq!(cart.update_quantity(MenuItemId(5), 3), None);
        assert_eq!(cart.lines.len(), 1);
    }

    #[test]
    fn test_remove_then_add_starts_fresh_line() {
        let mut cart = Cart::new(CartId(1));
        cart.add(item(1), 5);
        cart.add(item(4), 1);

        assert!(cart.remove(MenuItemId(1)));
        assert!(!cart.remove(MenuItemId(1)));

        assert_eq!(cart.add(item(1), 1), Some(1));
        // re-added items go to the end
        assert_eq!(cart.lines[1].item.id, MenuItemId(1));
    }

    #[test]
    fn test_clear_empties_cart() {
        let mut cart = Cart::new(CartId(1));
        cart.add(item(1), 1);
        assert!(cart.can_checkout());

        cart.clear();
        assert!(cart.is_empty());
        assert!(!cart.can_checkout());
        assert_eq!(cart.subtotal(), 0);
    }

    #[test]
    fn test_totals_for_sample_order() {
        // 2 × Nasi Goreng Spesial + 1 × Sate Ayam
        let mut cart = Cart::new(CartId(1));
        cart.add(item(1), 2);
        cart.add(item(3), 1);

        assert_eq!(cart.subtotal(), 95_000);
        let totals = cart.totals(&PricingRules::default());
        assert_eq!(totals.delivery_fee, 10_000);
        assert_eq!(totals.tax, 9_500);
        assert_eq!(totals.total, 114_500);
    }
}
