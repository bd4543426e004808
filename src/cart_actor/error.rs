//! Error types for the cart actor.

use crate::menu_actor::MenuError;
use crate::model::MenuItemId;
use thiserror::Error;

/// Errors that can occur during cart operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    /// The requested cart was not found.
    #[error("Cart not found: {0}")]
    NotFound(String),

    /// The item being added is not on the menu.
    #[error("Unknown menu item: {0}")]
    UnknownMenuItem(MenuItemId),

    /// Adding would push the line's quantity past `u32::MAX`.
    #[error("Quantity overflow for {0}")]
    QuantityOverflow(MenuItemId),

    /// The menu lookup failed.
    #[error(transparent)]
    Menu(#[from] MenuError),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for CartError {
    fn from(msg: String) -> Self {
        CartError::ActorCommunicationError(msg)
    }
}
