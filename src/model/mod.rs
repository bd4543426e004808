//! Data structures implementing the [`ActorEntity`](crate::framework::ActorEntity) trait,
//! plus the pricing arithmetic and menu filters that work on them.
//!
//! Everything here is plain data except [`TimerSlot`], which holds the abort
//! handle of a checkout session's running timer task.

pub mod cart;
pub mod checkout;
pub mod menu;
pub mod pricing;
pub mod timer;

pub use cart::*;
pub use checkout::*;
pub use menu::*;
pub use pricing::*;
pub use timer::*;
