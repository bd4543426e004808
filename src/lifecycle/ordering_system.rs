use crate::checkout_actor::CheckoutContext;
use crate::clients::{CartClient, CheckoutClient, MenuClient};
use crate::lifecycle::OrderingConfig;
use crate::menu_actor::MenuError;
use tracing::{error, info};

/// The runtime orchestrator for the restaurant ordering system.
///
/// `OrderingSystem` starts the three actors, wires their dependencies, and
/// stops them again.
///
/// # Architecture
///
/// - **Menu Actor**: the read-only catalog, no dependencies
/// - **Cart Actor**: diners' carts; looks items up through the [`MenuClient`]
/// - **Checkout Actor**: checkout sessions; snapshots and clears carts through
///   the [`CartClient`], and reaches itself through a weak handle for its timers
///
/// The dependency graph is acyclic (checkout → cart → menu) and the self
/// reference is weak, so dropping the clients shuts everything down.
///
/// # Example
///
/// ```ignore
/// let system = OrderingSystem::new()?;
///
/// let cart = system.cart_client.create_cart().await?;
/// system.cart_client.add_item(cart, MenuItemId(1), 2).await?;
/// let checkout = system.checkout_client.open(cart).await?;
///
/// system.shutdown().await?;
/// ```
pub struct OrderingSystem {
    /// Client for browsing the menu
    pub menu_client: MenuClient,

    /// Client for interacting with the Cart actor
    pub cart_client: CartClient,

    /// Client for interacting with the Checkout actor
    pub checkout_client: CheckoutClient,

    config: OrderingConfig,

    /// Task handles for all running actors (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl OrderingSystem {
    /// Starts the system with the default [`OrderingConfig`].
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new() -> Result<Self, MenuError> {
        Self::with_config(OrderingConfig::default())
    }

    /// Starts the system with `config`.
    ///
    /// Fails only if the seeded catalog is invalid.
    pub fn with_config(config: OrderingConfig) -> Result<Self, MenuError> {
        let buffer = config.channel_buffer.max(1);

        // 1. Create actors; the catalog is seeded here
        let (menu_actor, menu_client) = crate::menu_actor::new(buffer)?;
        let (cart_actor, cart_client) = crate::cart_actor::new(buffer);
        let (checkout_actor, checkout_client) = crate::checkout_actor::new(buffer);

        // 2. Start actors with injected context
        let menu_handle = tokio::spawn(menu_actor.run(()));
        let cart_handle = tokio::spawn(cart_actor.run((menu_client.clone(), config.pricing)));
        let checkout_handle = tokio::spawn(checkout_actor.run(CheckoutContext {
            cart: cart_client.clone(),
            sessions: checkout_client.downgrade(),
            config: config.clone(),
        }));

        info!(
            payment_window_secs = config.payment_window_secs,
            order_prefix = %config.order_prefix,
            "Ordering system started"
        );

        Ok(Self {
            menu_client,
            cart_client,
            checkout_client,
            config,
            // checkout first: its context holds the last cart client
            handles: vec![checkout_handle, cart_handle, menu_handle],
        })
    }

    pub fn config(&self) -> &OrderingConfig {
        &self.config
    }

    /// Gracefully shuts down the entire system.
    ///
    /// Dropping the clients closes the channels; each actor drains its queue,
    /// aborts the timers of its remaining entities and exits. The checkout actor
    /// releases the cart client it holds, which lets the cart actor stop, which
    /// in turn releases the menu client.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if all actors shut down cleanly
    /// - `Err(String)` if any actor task failed or panicked
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down ordering system...");

        drop(self.checkout_client);
        drop(self.cart_client);
        drop(self.menu_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("Ordering system shutdown complete.");
        Ok(())
    }
}
