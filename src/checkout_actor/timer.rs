//! Background timers that drive a checkout session.
//!
//! Each timer is a Tokio task holding a [`WeakResourceClient`] back to the
//! checkout actor, so a running timer never keeps the actor alive. The task
//! talks to its session through ordinary actions ([`CheckoutAction::Tick`],
//! [`CheckoutAction::Finalize`], [`CheckoutAction::AdvanceTracking`]), which
//! keeps every state change inside the actor's message loop.
//!
//! The session stores the task's [`AbortHandle`] in its
//! [`TimerSlot`](crate::model::TimerSlot); starting a new timer aborts the
//! previous one. Countdown ticks carry the slot's generation so a tick sent
//! just before an abort is recognised as stale.

use super::actions::CheckoutAction;
use crate::framework::WeakResourceClient;
use crate::model::{CheckoutId, CheckoutSession};
use std::time::Duration;
use tokio::task::AbortHandle;
use tokio::time::{self, Instant};
use tracing::{debug, warn};

/// Sends `action` every `period` until the session says to stop, the session is
/// gone, or the actor has shut down. The first send happens one period after
/// the call.
pub(crate) fn spawn_repeating(
    sessions: WeakResourceClient<CheckoutSession>,
    id: CheckoutId,
    period: Duration,
    action: CheckoutAction,
) -> AbortHandle {
    let task = tokio::spawn(async move {
        let mut ticker = time::interval_at(Instant::now() + period, period);
        loop {
            ticker.tick().await;
            let Some(client) = sessions.upgrade() else {
                debug!(%id, "Checkout actor gone, timer stopped");
                break;
            };
            match client.perform_action(id, action.clone()).await {
                Ok(result) if result.keeps_timer_running() => {}
                Ok(_) => break,
                Err(e) => {
                    debug!(%id, error = %e, "Timer stopped");
                    break;
                }
            }
        }
    });
    task.abort_handle()
}

/// Sends `action` once after `delay`.
pub(crate) fn spawn_delayed(
    sessions: WeakResourceClient<CheckoutSession>,
    id: CheckoutId,
    delay: Duration,
    action: CheckoutAction,
) -> AbortHandle {
    let task = tokio::spawn(async move {
        time::sleep(delay).await;
        let Some(client) = sessions.upgrade() else {
            return;
        };
        if let Err(e) = client.perform_action(id, action).await {
            warn!(%id, error = %e, "Delayed action failed");
        }
    });
    task.abort_handle()
}
