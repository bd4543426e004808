//! Checkout sessions: the order form, the payment stage machine and the
//! post-payment progress tracker.
//!
//! # Actor Framework
//! Sessions are managed by the checkout actor, see [`crate::checkout_actor`],
//! which owns the stage transitions and the timers. This module holds the data
//! and the arithmetic that does not need the actor.

use crate::model::pricing::{self, CheckoutTotals, Price, PricingRules};
use crate::model::timer::{TimerKind, TimerSlot};
use crate::model::{CartId, CartLine};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Length of the QRIS payment window.
pub const DEFAULT_PAYMENT_WINDOW_SECS: u32 = 15 * 60;

/// Type-safe identifier for checkout sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CheckoutId(pub u32);

impl From<u32> for CheckoutId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for CheckoutId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "checkout_{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Scan-to-pay. Requires confirmation within the payment window.
    #[default]
    Qris,
    /// Pay at the counter. The order is placed immediately.
    Counter,
}

impl Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentMethod::Qris => write!(f, "QRIS"),
            PaymentMethod::Counter => write!(f, "counter"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckoutStage {
    Filling,
    AwaitingPayment,
    Completed,
}

impl Display for CheckoutStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckoutStage::Filling => write!(f, "filling"),
            CheckoutStage::AwaitingPayment => write!(f, "awaiting payment"),
            CheckoutStage::Completed => write!(f, "completed"),
        }
    }
}

/// Order reference shown to the diner, e.g. `TRX48213`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderNumber(String);

impl OrderNumber {
    /// `prefix` followed by a random number in `10000..=99999`.
    pub fn generate(prefix: &str, rng: &mut impl Rng) -> Self {
        Self(format!("{prefix}{}", rng.gen_range(10_000..=99_999)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for OrderNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whole seconds left to pay. Displays as `MM:SS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    remaining_secs: u32,
    window_secs: u32,
}

impl Countdown {
    pub fn new(window_secs: u32) -> Self {
        Self {
            remaining_secs: window_secs,
            window_secs,
        }
    }

    /// One second elapses. Never goes below zero.
    ///
    /// Returns `true` while time is left after the tick.
    pub fn tick(&mut self) -> bool {
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        !self.is_expired()
    }

    /// Back to the full window.
    pub fn reset(&mut self) {
        self.remaining_secs = self.window_secs;
    }

    pub fn is_expired(&self) -> bool {
        self.remaining_secs == 0
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn window_secs(&self) -> u32 {
        self.window_secs
    }

    pub fn minutes(&self) -> u32 {
        self.remaining_secs / 60
    }

    pub fn seconds(&self) -> u32 {
        self.remaining_secs % 60
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new(DEFAULT_PAYMENT_WINDOW_SECS)
    }
}

impl Display for Countdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.minutes(), self.seconds())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TrackingStep {
    Received,
    Preparing,
    Ready,
}

impl TrackingStep {
    pub fn next(self) -> Option<Self> {
        match self {
            TrackingStep::Received => Some(TrackingStep::Preparing),
            TrackingStep::Preparing => Some(TrackingStep::Ready),
            TrackingStep::Ready => None,
        }
    }
}

impl Display for TrackingStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrackingStep::Received => write!(f, "order received"),
            TrackingStep::Preparing => write!(f, "preparing"),
            TrackingStep::Ready => write!(f, "ready to serve"),
        }
    }
}

/// Progress shown on the success screen after an order is placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderTracking {
    pub step: TrackingStep,
    /// Between 15 and 29 minutes.
    pub estimated_minutes: u32,
}

impl OrderTracking {
    pub fn start(rng: &mut impl Rng) -> Self {
        Self {
            step: TrackingStep::Received,
            estimated_minutes: rng.gen_range(15..30),
        }
    }

    /// Moves to the next step. Returns `false` once ready.
    pub fn advance(&mut self) -> bool {
        match self.step.next() {
            Some(next) => {
                self.step = next;
                true
            }
            None => false,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.step == TrackingStep::Ready
    }
}

/// What the diner typed into the order form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDetails {
    pub table_number: String,
    /// At least 1.
    pub party_size: u32,
    pub notes: String,
    pub payment_method: PaymentMethod,
}

impl Default for OrderDetails {
    fn default() -> Self {
        Self {
            table_number: String::new(),
            party_size: 1,
            notes: String::new(),
            payment_method: PaymentMethod::default(),
        }
    }
}

/// Partial edit of the order form. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutUpdate {
    pub table_number: Option<String>,
    pub party_size: Option<u32>,
    pub notes: Option<String>,
    pub payment_method: Option<PaymentMethod>,
}

impl OrderDetails {
    pub fn apply(&mut self, update: CheckoutUpdate) {
        if let Some(table_number) = update.table_number {
            self.table_number = table_number;
        }
        if let Some(party_size) = update.party_size {
            self.party_size = party_size.max(1);
        }
        if let Some(notes) = update.notes {
            self.notes = notes;
        }
        if let Some(payment_method) = update.payment_method {
            self.payment_method = payment_method;
        }
    }
}

/// Payload for opening a checkout from a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutCreate {
    pub cart_id: CartId,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckoutSession {
    pub id: CheckoutId,
    pub cart_id: CartId,
    /// Snapshot of the cart taken when the session was opened.
    pub lines: Vec<CartLine>,
    pub order_number: OrderNumber,
    pub details: OrderDetails,
    pub stage: CheckoutStage,
    pub countdown: Countdown,
    /// Set once the source cart has been emptied after a completed order.
    pub cart_cleared: bool,
    pub tracking: Option<OrderTracking>,
    #[serde(skip)]
    pub(crate) timer: TimerSlot,
}

impl CheckoutSession {
    pub fn new(id: CheckoutId, cart_id: CartId) -> Self {
        Self {
            id,
            cart_id,
            lines: Vec::new(),
            order_number: OrderNumber::default(),
            details: OrderDetails::default(),
            stage: CheckoutStage::Filling,
            countdown: Countdown::default(),
            cart_cleared: false,
            tracking: None,
            timer: TimerSlot::default(),
        }
    }

    pub fn subtotal(&self) -> Price {
        pricing::subtotal(&self.lines)
    }

    pub fn totals(&self, rules: &PricingRules) -> CheckoutTotals {
        rules.checkout_totals(self.subtotal())
    }

    /// The submit button is enabled once a table number has been entered,
    /// provided there is something to order.
    pub fn can_submit(&self) -> bool {
        !self.lines.is_empty() && !self.details.table_number.is_empty()
    }

    /// Which background timer is driving this session, if any.
    pub fn active_timer(&self) -> Option<TimerKind> {
        self.timer.kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu_actor::catalog::dummy_items;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_countdown_formats_minutes_and_seconds() {
        let mut countdown = Countdown::default();
        assert_eq!(countdown.to_string(), "15:00");

        for _ in 0..61 {
            countdown.tick();
        }
        assert_eq!(countdown.to_string(), "13:59");
        assert_eq!(countdown.remaining_secs(), 839);
    }

    #[test]
    fn test_countdown_stops_at_zero() {
        let mut countdown = Countdown::new(2);
        assert!(countdown.tick());
        assert!(!countdown.tick());
        assert!(!countdown.tick());
        assert!(countdown.is_expired());
        assert_eq!(countdown.to_string(), "00:00");

        countdown.reset();
        assert_eq!(countdown.remaining_secs(), 2);
    }

    #[test]
    fn test_order_number_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let number = OrderNumber::generate("TRX", &mut rng);
            let digits = number.as_str().strip_prefix("TRX").unwrap();
            let value: u32 = digits.parse().unwrap();
            assert!((10_000..=99_999).contains(&value));
        }
    }

    #[test]
    fn test_tracking_advances_to_ready_and_stops() {
        let mut tracking = OrderTracking::start(&mut StdRng::seed_from_u64(1));
        assert!((15..=29).contains(&tracking.estimated_minutes));
        assert_eq!(tracking.step, TrackingStep::Received);

        assert!(tracking.advance());
        assert!(tracking.advance());
        assert!(tracking.is_ready());
        assert!(!tracking.advance());
        assert_eq!(tracking.step, TrackingStep::Ready);
    }

    #[test]
    fn test_details_update_clamps_party_size() {
        let mut details = OrderDetails::default();
        details.apply(CheckoutUpdate {
            table_number: Some("A12".into()),
            party_size: Some(0),
            ..Default::default()
        });
        assert_eq!(details.table_number, "A12");
        assert_eq!(details.party_size, 1);
        assert_eq!(details.payment_method, PaymentMethod::Qris);

        details.apply(CheckoutUpdate {
            party_size: Some(4),
            payment_method: Some(PaymentMethod::Counter),
            ..Default::default()
        });
        assert_eq!(details.table_number, "A12");
        assert_eq!(details.party_size, 4);
        assert_eq!(details.payment_method, PaymentMethod::Counter);
    }

    #[test]
    fn test_submit_needs_lines_and_table_number() {
        let mut session = CheckoutSession::new(CheckoutId(1), CartId(1));
        session.details.table_number = "7".into();
        assert!(!session.can_submit());

        session.lines.push(CartLine {
            item: dummy_items().remove(3),
            quantity: 1,
        });
        session.details.table_number.clear();
        assert!(!session.can_submit());

        // only the empty string counts as missing
        session.details.table_number = " ".into();
        assert!(session.can_submit());
        assert_eq!(session.subtotal(), 8_000);
    }

    #[test]
    fn test_payment_method_serde_names() {
        assert_eq!(serde_json::to_string(&PaymentMethod::Qris).unwrap(), "\"qris\"");
        assert_eq!(
            serde_json::from_str::<PaymentMethod>("\"counter\"").unwrap(),
            PaymentMethod::Counter
        );
    }
}
