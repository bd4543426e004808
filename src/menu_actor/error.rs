//! Error types for the menu catalog actor.

use thiserror::Error;

/// Errors that can occur while browsing the menu.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MenuError {
    /// The requested menu item does not exist.
    #[error("Menu item not found: {0}")]
    NotFound(String),

    /// A catalog entry failed validation while seeding.
    #[error("Invalid menu item: {0}")]
    InvalidItem(String),

    /// The catalog is fixed once the system has started.
    #[error("Menu catalog is read-only")]
    ReadOnlyCatalog,

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for MenuError {
    fn from(msg: String) -> Self {
        MenuError::ActorCommunicationError(msg)
    }
}
