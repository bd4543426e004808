//! [`ActorEntity`] implementation for [`MenuItem`].
//!
//! The catalog is seeded once through [`ResourceActor::seeded`](crate::framework::ResourceActor::seeded),
//! which bypasses `on_create`. Every mutating hook refuses, so the menu cannot
//! change while diners are ordering from it.

use super::error::MenuError;
use crate::framework::ActorEntity;
use crate::model::{MenuItem, MenuItemCreate, MenuItemId};
use async_trait::async_trait;
use std::convert::Infallible;

#[async_trait]
impl ActorEntity for MenuItem {
    type Id = MenuItemId;
    type Create = MenuItemCreate;
    type Update = Infallible;
    type Action = Infallible;
    type ActionResult = ();
    type Context = ();
    type Error = MenuError;

    fn from_create_params(id: MenuItemId, params: MenuItemCreate) -> Result<Self, MenuError> {
        if params.name.trim().is_empty() {
            return Err(MenuError::InvalidItem(format!("{id} has no name")));
        }
        if params.price == 0 {
            return Err(MenuError::InvalidItem(format!("{} has no price", params.name)));
        }
        Ok(MenuItem::from_create(id, params))
    }

    /// Runtime creates are rejected; only the startup seed populates the catalog.
    async fn on_create(&mut self, _ctx: &()) -> Result<(), MenuError> {
        Err(MenuError::ReadOnlyCatalog)
    }

    async fn on_update(&mut self, update: Infallible, _ctx: &()) -> Result<(), MenuError> {
        match update {}
    }

    async fn on_delete(&self, _ctx: &()) -> Result<(), MenuError> {
        Err(MenuError::ReadOnlyCatalog)
    }

    async fn handle_action(&mut self, action: Infallible, _ctx: &()) -> Result<(), MenuError> {
        match action {}
    }
}
