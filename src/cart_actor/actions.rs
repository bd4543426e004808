//! Custom actions for the cart actor.
//!
//! These are handled by [`ActorEntity::handle_action`](crate::framework::ActorEntity::handle_action)
//! in [`super::entity`].

use crate::model::{CartTotals, MenuItemId};

/// Operations on a single cart.
#[derive(Debug, Clone)]
pub enum CartAction {
    /// Adds `quantity` of a menu item (0 counts as 1), merging with an existing line.
    ///
    /// # Errors
    /// Fails with [`CartError::UnknownMenuItem`](super::CartError::UnknownMenuItem)
    /// if the item is not on the menu.
    AddItem { item_id: MenuItemId, quantity: u32 },
    /// Sets a line's quantity, clamped to at least 1. No effect if the item is absent.
    UpdateQuantity { item_id: MenuItemId, quantity: u32 },
    RemoveItem(MenuItemId),
    Clear,
    /// Cart panel totals (delivery fee and tax).
    Totals,
}

/// Results from CartActions - variants match 1:1 with CartAction
#[derive(Debug, Clone, PartialEq)]
pub enum CartActionResult {
    /// The line's quantity after the add.
    AddItem(u32),
    /// The new quantity, or `None` if the item was not in the cart.
    UpdateQuantity(Option<u32>),
    /// Whether a line was removed.
    RemoveItem(bool),
    Clear(()),
    Totals(CartTotals),
}
