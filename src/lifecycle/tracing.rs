//! # Observability & Tracing
//!
//! [`setup_tracing`] installs the `tracing` subscriber for the demo binary.
//!
//! ## Configuration
//!
//! Log levels come from `RUST_LOG`; without it only this crate's `info` events
//! are shown. The format is compact and hides the module path
//! (`with_target(false)`): the actor loop tags every event with `entity_type`
//! instead.
//!
//! ```bash
//! RUST_LOG=info cargo run                              # lifecycle and transitions
//! RUST_LOG=debug cargo run                             # every request and payload
//! RUST_LOG=nusantara_order::checkout_actor=debug cargo run
//! ```
//!
//! ## What Gets Traced
//!
//! - **Actor lifecycle**: `Actor started` / `Shutdown` with the store size
//! - **Entity operations**: Create, Get, List, Update, Delete and Actions, keyed by ID
//! - **Checkout flow**: opened, submitted, payment confirmed, window expired,
//!   cart cleared, tracking started
//! - **Client calls**: `#[instrument]` spans named after the client method
//!
//! A QRIS checkout at `info` level reads roughly:
//!
//! ```text
//! INFO checkout: Checkout opened checkout=checkout_1 cart=cart_1 order=TRX48213 lines=2
//! INFO checkout: Order submitted checkout=checkout_1 order=TRX48213 method=QRIS table=A12 stage=awaiting payment
//! INFO payment: Payment confirmed checkout=checkout_1 order=TRX48213
//! INFO Cart cleared after payment checkout=checkout_1 cart=cart_1
//! INFO Order tracking started checkout=checkout_1 estimated_minutes=22
//! ```
//!
//! Timer-driven events carry no span: they run on their own tasks.

use tracing_subscriber::EnvFilter;

pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("nusantara_order=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
