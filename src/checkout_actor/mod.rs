//! # Checkout Actor
//!
//! Runs checkout sessions: the order form, the QRIS payment countdown, the
//! post-payment hand-off and order tracking.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](crate::framework::ActorEntity) implementation for
//!   [`CheckoutSession`], including the stage machine
//! - [`error`] - [`CheckoutError`] type
//! - [`actions`] - [`CheckoutAction`] and [`CheckoutActionResult`]
//! - [`timer`] - Countdown, hand-off and tracking tasks
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Self-reference
//!
//! Timers need to send actions back to this actor. The context therefore holds
//! a [`WeakResourceClient`] to the actor itself, created from the client after
//! [`new()`] returns and injected through `run()`:
//!
//! ```rust,ignore
//! let (actor, checkouts) = checkout_actor::new(32);
//! tokio::spawn(actor.run(CheckoutContext {
//!     cart: cart_client.clone(),
//!     sessions: checkouts.downgrade(),
//!     config: config.clone(),
//! }));
//! ```
//!
//! Because the handle is weak, dropping every [`CheckoutClient`] still shuts
//! the actor down, and shutdown aborts the timers of the remaining sessions.

pub mod actions;
pub mod entity;
pub mod error;
pub mod timer;

pub use actions::*;
pub use error::*;

use crate::clients::CartClient;
use crate::clients::CheckoutClient;
use crate::framework::{ResourceActor, WeakResourceClient};
use crate::lifecycle::OrderingConfig;
use crate::model::CheckoutSession;

/// Dependencies injected into every checkout hook.
pub struct CheckoutContext {
    /// Source of the line snapshot, and cleared once an order is placed.
    pub cart: CartClient,
    /// Handle the session timers use to reach this actor.
    pub sessions: WeakResourceClient<CheckoutSession>,
    pub config: OrderingConfig,
}

/// Creates a new Checkout actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<CheckoutSession>, CheckoutClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, CheckoutClient::new(generic_client))
}
