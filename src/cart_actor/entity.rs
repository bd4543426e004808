//! [`ActorEntity`] implementation for [`Cart`].
//!
//! The cart resolves menu items through the [`MenuClient`] in its context, so a
//! line always carries the catalog's name and price at the time it was added.

use super::actions::{CartAction, CartActionResult};
use super::error::CartError;
use crate::clients::{ActorClient, MenuClient};
use crate::framework::ActorEntity;
use crate::model::{Cart, CartCreate, CartId, PricingRules};
use async_trait::async_trait;
use std::convert::Infallible;
use tracing::debug;

#[async_trait]
impl ActorEntity for Cart {
    type Id = CartId;
    type Create = CartCreate;
    type Update = Infallible;
    type Action = CartAction;
    type ActionResult = CartActionResult;
    /// Menu lookups and the surcharge rates for the cart panel.
    type Context = (MenuClient, PricingRules);
    type Error = CartError;

    fn from_create_params(id: CartId, _params: CartCreate) -> Result<Self, CartError> {
        Ok(Cart::new(id))
    }

    async fn on_update(&mut self, update: Infallible, _ctx: &Self::Context) -> Result<(), CartError> {
        match update {}
    }

    async fn handle_action(
        &mut self,
        action: CartAction,
        ctx: &Self::Context,
    ) -> Result<CartActionResult, CartError> {
        let (menu, pricing) = ctx;
        match action {
            CartAction::AddItem { item_id, quantity } => {
                let item = menu
                    .get(item_id)
                    .await?
                    .ok_or(CartError::UnknownMenuItem(item_id))?;
                let name = item.name.clone();
                let quantity = self
                    .add(item, quantity)
                    .ok_or(CartError::QuantityOverflow(item_id))?;
                debug!(cart = %self.id, item = %name, quantity, "Line updated");
                Ok(CartActionResult::AddItem(quantity))
            }
            CartAction::UpdateQuantity { item_id, quantity } => Ok(
                CartActionResult::UpdateQuantity(self.update_quantity(item_id, quantity)),
            ),
            CartAction::RemoveItem(item_id) => Ok(CartActionResult::RemoveItem(self.remove(item_id))),
            CartAction::Clear => {
                self.clear();
                Ok(CartActionResult::Clear(()))
            }
            CartAction::Totals => Ok(CartActionResult::Totals(self.totals(pricing))),
        }
    }
}
