//! # Cart Client
//!
//! Provides a high‑level API for interacting with the `Cart` actor.
//! It wraps a `ResourceClient<Cart>` and exposes one method per cart action.
use crate::cart_actor::{CartAction, CartActionResult, CartError};
use crate::clients::actor_client::{recover_entity_error, ActorClient};
use crate::framework::{FrameworkError, ResourceClient};
use crate::model::{Cart, CartCreate, CartId, CartTotals, MenuItemId};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Cart actor.
#[derive(Clone)]
pub struct CartClient {
    inner: ResourceClient<Cart>,
}

impl CartClient {
    pub fn new(inner: ResourceClient<Cart>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Cart> for CartClient {
    type Error = CartError;

    fn inner(&self) -> &ResourceClient<Cart> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        recover_entity_error(e, CartError::NotFound)
    }
}

fn unexpected(result: CartActionResult) -> CartError {
    CartError::ActorCommunicationError(format!("Unexpected response: {result:?}"))
}

impl CartClient {
    /// Opens a new, empty cart.
    #[instrument(skip(self))]
    pub async fn create_cart(&self) -> Result<CartId, CartError> {
        debug!("Sending request");
        self.inner.create(CartCreate).await.map_err(Self::map_error)
    }

    /// Adds `quantity` of a menu item. Returns the line's new quantity.
    #[instrument(skip(self))]
    pub async fn add_item(
        &self,
        id: CartId,
        item_id: MenuItemId,
        quantity: u32,
    ) -> Result<u32, CartError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(id, CartAction::AddItem { item_id, quantity })
            .await
        {
            Ok(CartActionResult::AddItem(quantity)) => Ok(quantity),
            Ok(other) => Err(unexpected(other)),
            Err(e) => Err(Self::map_error(e)),
        }
    }

    /// Sets a line's quantity (minimum 1). `None` if the item is not in the cart.
    #[instrument(skip(self))]
    pub async fn update_quantity(
        &self,
        id: CartId,
        item_id: MenuItemId,
        quantity: u32,
    ) -> Result<Option<u32>, CartError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(id, CartAction::UpdateQuantity { item_id, quantity })
            .await
        {
            Ok(CartActionResult::UpdateQuantity(quantity)) => Ok(quantity),
            Ok(other) => Err(unexpected(other)),
            Err(e) => Err(Self::map_error(e)),
        }
    }

    /// Removes a line. Returns whether the item was in the cart.
    #[instrument(skip(self))]
    pub async fn remove_item(&self, id: CartId, item_id: MenuItemId) -> Result<bool, CartError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(id, CartAction::RemoveItem(item_id))
            .await
        {
            Ok(CartActionResult::RemoveItem(removed)) => Ok(removed),
            Ok(other) => Err(unexpected(other)),
            Err(e) => Err(Self::map_error(e)),
        }
    }

    #[instrument(skip(self))]
    pub async fn clear(&self, id: CartId) -> Result<(), CartError> {
        debug!("Sending request");
        match self.inner.perform_action(id, CartAction::Clear).await {
            Ok(CartActionResult::Clear(())) => Ok(()),
            Ok(other) => Err(unexpected(other)),
            Err(e) => Err(Self::map_error(e)),
        }
    }

    /// Cart panel totals: subtotal, delivery fee, tax.
    #[instrument(skip(self))]
    pub async fn totals(&self, id: CartId) -> Result<CartTotals, CartError> {
        debug!("Sending request");
        match self.inner.perform_action(id, CartAction::Totals).await {
            Ok(CartActionResult::Totals(totals)) => Ok(totals),
            Ok(other) => Err(unexpected(other)),
            Err(e) => Err(Self::map_error(e)),
        }
    }
}
