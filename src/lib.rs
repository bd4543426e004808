#![doc(html_logo_url = "https://www.rust-lang.org/logos/rust-logo-128x128.png")]
#![doc(html_favicon_url = "https://www.rust-lang.org/favicon.ico")]
//! # Nusantara Order
//!
//! > **Table-side ordering for a restaurant, built from resource-oriented actors.**
//!
//! Diners browse the menu, fill a cart, and check out either by scanning a QRIS
//! code within a 15 minute window or by paying at the counter. After payment the
//! cart is cleared and the order's progress is tracked until it is ready.
//!
//! ## 🏗️ Design
//!
//! Each resource (menu items, carts, checkout sessions) lives in its own actor.
//! An actor owns its entities outright and handles one message at a time, so no
//! state is shared and nothing is locked. Actors talk to each other only through
//! typed clients.
//!
//! ### Generics: one loop, three resources
//! `ResourceActor<T: ActorEntity>` is written once. A resource supplies its
//! payload types and lifecycle hooks by implementing
//! [`ActorEntity`](framework::ActorEntity); the loop does the rest.
//!
//! ### Timers as actors' guests
//! The payment countdown, the post-payment hand-off and order tracking are Tokio
//! tasks holding a *weak* client to the checkout actor. They change state only
//! by sending actions, and the session aborts them when it moves on.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! The generic actor, its client, and the [`mock`](framework::mock) helpers
//! for tests.
//!
//! ### 2. The Data ([`model`])
//! Menu items and filters, carts, pricing rules and totals, checkout sessions.
//! Plain data plus the arithmetic that needs no actor.
//!
//! ### 3. The Actors ([`menu_actor`], [`cart_actor`], [`checkout_actor`])
//! `ActorEntity` implementations, actions and per-actor error types.
//!
//! ### 4. The Interface ([`clients`])
//! [`MenuClient`](clients::MenuClient), [`CartClient`](clients::CartClient) and
//! [`CheckoutClient`](clients::CheckoutClient) hide the message passing.
//!
//! ### 5. The Orchestrator ([`lifecycle`])
//! [`OrderingSystem`](lifecycle::OrderingSystem) wires and stops the actors;
//! [`OrderingConfig`](lifecycle::OrderingConfig) holds the tunables.
//!
//! ## 👩‍💻 Architecture Notes
//!
//! ### 1. Type-Safe Error Handling
//! Each actor has its own error enum (`MenuError`, `CartError`, `CheckoutError`).
//! Errors raised inside an actor are boxed for transport and unboxed again by
//! the client, so callers can match on `CheckoutError::MissingTableNumber`.
//!
//! ### 2. Async Context Injection
//! Dependencies are injected through `run(context)`, after every actor and
//! client exists. This is how the checkout actor receives a handle to itself.
//!
//! ### 3. Two Kinds of Totals
//! The cart panel adds a delivery fee and tax; the checkout page adds a service
//! charge and tax. They are separate types on purpose and are never merged.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! RUST_LOG=info cargo run
//! cargo test
//! ```

pub mod cart_actor;
pub mod checkout_actor;
pub mod clients;
pub mod framework;
pub mod lifecycle;
pub mod menu_actor;
pub mod model;
