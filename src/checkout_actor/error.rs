//! Error types for the checkout actor.

use crate::cart_actor::CartError;
use crate::model::{CartId, CheckoutStage};
use thiserror::Error;

/// Errors that can occur during checkout.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CheckoutError {
    /// The requested checkout session was not found.
    #[error("Checkout not found: {0}")]
    NotFound(String),

    /// The cart a checkout was opened from does not exist.
    #[error("Cart not found: {0}")]
    CartNotFound(CartId),

    /// Nothing to order.
    #[error("Order has no items")]
    EmptyOrder,

    /// The order form has no table number.
    #[error("Table number is required")]
    MissingTableNumber,

    /// The operation is not allowed in the session's current stage.
    #[error("Cannot {action} while {stage}")]
    InvalidStage {
        stage: CheckoutStage,
        action: &'static str,
    },

    /// A cart operation failed.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for CheckoutError {
    fn from(msg: String) -> Self {
        CheckoutError::ActorCommunicationError(msg)
    }
}
