//! Custom actions for the checkout actor.
//!
//! The first group is driven by the diner through
//! [`CheckoutClient`](crate::clients::CheckoutClient). The second group is sent
//! by the session's own timers (see [`super::timer`]).

use crate::model::{CheckoutStage, CheckoutTotals, Countdown, TrackingStep};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutAction {
    /// Place the order with the selected payment method.
    ///
    /// # Errors
    /// `EmptyOrder` or `MissingTableNumber` when the form is incomplete,
    /// `InvalidStage` outside of Filling.
    Submit,
    /// Simulated QRIS confirmation. Allowed after the countdown has expired.
    ConfirmPayment,
    /// Restore the full payment window.
    ResetTimer,
    /// Close the QR sheet and return to the form, keeping the remaining time.
    DismissPayment,
    /// Checkout page totals (service charge and tax).
    Totals,

    /// One countdown period elapsed. Carries the generation of the countdown
    /// that sent it; ticks from an earlier countdown are ignored.
    Tick { generation: u64 },
    /// The post-payment hand-off: clear the cart and start tracking.
    Finalize,
    /// Move order tracking one step forward.
    AdvanceTracking,
}

/// Results from CheckoutActions - variants match 1:1 with CheckoutAction
#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutActionResult {
    /// The stage entered by the submit.
    Submit(CheckoutStage),
    ConfirmPayment(()),
    ResetTimer(Countdown),
    DismissPayment(()),
    Totals(CheckoutTotals),
    Tick { countdown: Countdown, running: bool },
    Finalize(()),
    AdvanceTracking { step: TrackingStep, running: bool },
}

impl CheckoutActionResult {
    /// Whether a repeating timer that produced this result should keep going.
    pub fn keeps_timer_running(&self) -> bool {
        match self {
            CheckoutActionResult::Tick { running, .. }
            | CheckoutActionResult::AdvanceTracking { running, .. } => *running,
            _ => false,
        }
    }
}
