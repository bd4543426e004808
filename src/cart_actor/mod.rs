//! # Cart Actor
//!
//! Holds diners' carts. Each cart is one entity; lines are merged per menu item
//! and quantities never drop below 1 (removal is explicit).
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](crate::framework::ActorEntity) implementation for [`Cart`]
//! - [`error`] - [`CartError`] type
//! - [`actions`] - [`CartAction`] and [`CartActionResult`]
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Dependencies
//!
//! The actor's context is `(MenuClient, PricingRules)`: items are looked up in
//! the catalog when added, and the rates feed the cart panel totals.
//!
//! ```rust,ignore
//! let (actor, carts) = cart_actor::new(32);
//! tokio::spawn(actor.run((menu_client.clone(), PricingRules::default())));
//!
//! let cart = carts.create_cart().await?;
//! carts.add_item(cart, MenuItemId(1), 2).await?;
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::CartClient;
use crate::framework::ResourceActor;
use crate::model::Cart;

/// Creates a new Cart actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Cart>, CartClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, CartClient::new(generic_client))
}
