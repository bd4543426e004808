//! # Menu Actor
//!
//! Serves the read-only restaurant catalog.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](crate::framework::ActorEntity) implementation for [`MenuItem`]
//! - [`error`] - [`MenuError`] type
//! - [`catalog`] - The items seeded at startup
//! - [`new()`] - Factory function that seeds the actor and wraps its client
//!
//! Browsing (search, category tabs, popular picks) is done by
//! [`MenuClient`] on top of a `List` request, so the actor itself only ever
//! answers `Get` and `List`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let (actor, menu) = menu_actor::new(32)?;
//! tokio::spawn(actor.run(()));
//!
//! let drinks = menu
//!     .browse(MenuFilter::new("", CategoryFilter::from_label("Beverages")))
//!     .await?;
//! ```

pub mod catalog;
pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::MenuClient;
use crate::framework::ResourceActor;
use crate::model::MenuItem;

/// Creates the catalog actor, seeded with [`catalog::seed`], and its client.
pub fn new(buffer_size: usize) -> Result<(ResourceActor<MenuItem>, MenuClient), MenuError> {
    let (actor, generic_client) = ResourceActor::seeded(buffer_size, catalog::seed())?;
    Ok((actor, MenuClient::new(generic_client)))
}
