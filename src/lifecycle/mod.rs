//! # Lifecycle
//!
//! Starts, wires and stops the actors.
//!
//! - [`OrderingSystem`] creates the menu, cart and checkout actors and injects
//!   each one's context through `run()` (late binding), so a client can be
//!   handed to an actor that was created before it.
//! - [`OrderingConfig`] holds the pricing rules, timer settings and channel size.
//! - [`setup_tracing`] installs the log subscriber.
//!
//! ## Dependency Injection
//!
//! ```rust,ignore
//! impl ActorEntity for Cart {
//!     type Context = (MenuClient, PricingRules);
//! }
//! impl ActorEntity for CheckoutSession {
//!     type Context = CheckoutContext; // cart client + weak self + config
//! }
//! ```
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop all clients** - Closes the sender side of channels
//! 2. **Actors detect closure** - `receiver.recv()` returns `None`
//! 3. **Actors clean up** - Remaining sessions abort their timers
//! 4. **Await completion** - Wait for all actor tasks to finish
//!
//! Timers only hold weak handles, so a pending countdown never delays shutdown.

pub mod config;
pub mod ordering_system;
pub mod tracing;

pub use config::*;
pub use ordering_system::*;
pub use self::tracing::*;
