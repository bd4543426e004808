//! # Nusantara Order demo
//!
//! Walks one diner through the whole flow:
//! 1. Browse the menu and fill a cart.
//! 2. Open checkout, enter a table number, pay by QRIS.
//! 3. Wait for the hand-off that clears the cart, then watch the order progress.

use nusantara_order::clients::ActorClient;
use nusantara_order::lifecycle::{setup_tracing, OrderingConfig, OrderingSystem};
use nusantara_order::model::{
    format_rupiah, CategoryFilter, CheckoutUpdate, MenuFilter, MenuItemId, PaymentMethod,
};
use std::time::Duration;
use tracing::{info, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    // a missing .env is fine
    let _ = dotenvy::dotenv();
    setup_tracing();

    let config = OrderingConfig::from_env();
    let handoff_wait = config.completion_delay() + config.tracking_step() * 2 + Duration::from_millis(200);
    let system = OrderingSystem::with_config(config).map_err(|e| e.to_string())?;

    let span = tracing::info_span!("browse");
    let cart_id = async {
        let categories = system.menu_client.categories().await.map_err(|e| e.to_string())?;
        info!(?categories, "Menu loaded");

        let goreng = system
            .menu_client
            .browse(MenuFilter::new("goreng", CategoryFilter::All))
            .await
            .map_err(|e| e.to_string())?;
        for item in &goreng {
            info!(item = %item.name, price = %format_rupiah(item.price), "Search hit");
        }

        let cart_id = system.cart_client.create_cart().await.map_err(|e| e.to_string())?;
        system
            .cart_client
            .add_item(cart_id, MenuItemId(1), 2)
            .await
            .map_err(|e| e.to_string())?;
        system
            .cart_client
            .add_item(cart_id, MenuItemId(3), 1)
            .await
            .map_err(|e| e.to_string())?;

        let totals = system.cart_client.totals(cart_id).await.map_err(|e| e.to_string())?;
        info!(
            subtotal = %format_rupiah(totals.subtotal),
            delivery = %format_rupiah(totals.delivery_fee),
            tax = %format_rupiah(totals.tax),
            total = %format_rupiah(totals.total),
            "Cart ready"
        );
        Ok::<_, String>(cart_id)
    }
    .instrument(span)
    .await?;

    let span = tracing::info_span!("checkout");
    let checkout_id = async {
        let checkout_id = system.checkout_client.open(cart_id).await.map_err(|e| e.to_string())?;

        // submitting without a table number is refused
        if let Err(e) = system.checkout_client.submit(checkout_id).await {
            warn!(error = %e, "Submit refused");
        }

        system
            .checkout_client
            .fill(
                checkout_id,
                CheckoutUpdate {
                    table_number: Some("A12".to_string()),
                    party_size: Some(2),
                    payment_method: Some(PaymentMethod::Qris),
                    ..Default::default()
                },
            )
            .await
            .map_err(|e| e.to_string())?;

        let totals = system
            .checkout_client
            .totals(checkout_id)
            .await
            .map_err(|e| e.to_string())?;
        info!(
            service = %format_rupiah(totals.service_charge),
            tax = %format_rupiah(totals.tax),
            total = %format_rupiah(totals.total),
            "Checkout totals"
        );

        system.checkout_client.submit(checkout_id).await.map_err(|e| e.to_string())?;
        Ok::<_, String>(checkout_id)
    }
    .instrument(span)
    .await?;

    let span = tracing::info_span!("payment");
    async {
        tokio::time::sleep(Duration::from_secs(2)).await;
        if let Ok(Some(session)) = system.checkout_client.get(checkout_id).await {
            info!(remaining = %session.countdown, order = %session.order_number, "Waiting for QRIS payment");
        }
        system
            .checkout_client
            .confirm_payment(checkout_id)
            .await
            .map_err(|e| e.to_string())
    }
    .instrument(span)
    .await?;

    tokio::time::sleep(handoff_wait).await;

    match system.checkout_client.get(checkout_id).await {
        Ok(Some(session)) => {
            let cart_lines = system
                .cart_client
                .get(cart_id)
                .await
                .ok()
                .flatten()
                .map(|cart| cart.lines.len());
            info!(
                order = %session.order_number,
                cart_cleared = session.cart_cleared,
                ?cart_lines,
                tracking = ?session.tracking,
                "Order placed"
            );
        }
        Ok(None) => warn!(checkout = %checkout_id, "Checkout disappeared"),
        Err(e) => warn!(error = %e, "Could not read checkout"),
    }

    system
        .checkout_client
        .close(checkout_id)
        .await
        .map_err(|e| e.to_string())?;
    system.shutdown().await?;

    info!("Demo completed successfully");
    Ok(())
}
