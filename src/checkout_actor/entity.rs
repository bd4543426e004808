//! [`ActorEntity`] implementation for [`CheckoutSession`]: the checkout stage
//! machine.
//!
//! ```text
//!            submit (QRIS)               confirm_payment
//!  Filling ─────────────────▶ AwaitingPayment ─────────────▶ Completed
//!     ▲                              │                           │
//!     └──────── dismiss_payment ─────┘                           │ after completion_delay:
//!                                                                │ clear cart, start tracking
//!  Filling ──────────── submit (counter) ───────────────────▶ Completed
//! ```
//!
//! Every transition that changes which timer should run goes through the
//! session's [`TimerSlot`](crate::model::TimerSlot), so at most one timer task
//! exists per session.

use super::actions::{CheckoutAction, CheckoutActionResult};
use super::error::CheckoutError;
use super::timer;
use super::CheckoutContext;
use crate::clients::ActorClient;
use crate::framework::ActorEntity;
use crate::model::{
    CheckoutCreate, CheckoutId, CheckoutSession, CheckoutStage, CheckoutUpdate, Countdown,
    OrderNumber, OrderTracking, PaymentMethod, TimerKind,
};
use async_trait::async_trait;
use tracing::info;

#[async_trait]
impl ActorEntity for CheckoutSession {
    type Id = CheckoutId;
    type Create = CheckoutCreate;
    type Update = CheckoutUpdate;
    type Action = CheckoutAction;
    type ActionResult = CheckoutActionResult;
    type Context = CheckoutContext;
    type Error = CheckoutError;

    fn from_create_params(id: CheckoutId, params: CheckoutCreate) -> Result<Self, CheckoutError> {
        Ok(CheckoutSession::new(id, params.cart_id))
    }

    /// Snapshots the cart and issues the order number.
    async fn on_create(&mut self, ctx: &CheckoutContext) -> Result<(), CheckoutError> {
        let cart = ctx
            .cart
            .get(self.cart_id)
            .await?
            .ok_or(CheckoutError::CartNotFound(self.cart_id))?;
        self.lines = cart.lines;
        self.countdown = Countdown::new(ctx.config.payment_window_secs);
        self.order_number = OrderNumber::generate(&ctx.config.order_prefix, &mut rand::thread_rng());
        info!(
            checkout = %self.id,
            cart = %self.cart_id,
            order = %self.order_number,
            lines = self.lines.len(),
            "Checkout opened"
        );
        Ok(())
    }

    /// Form edits are only accepted while filling.
    async fn on_update(
        &mut self,
        update: CheckoutUpdate,
        _ctx: &CheckoutContext,
    ) -> Result<(), CheckoutError> {
        self.require_stage(CheckoutStage::Filling, "edit the order form")?;
        self.details.apply(update);
        Ok(())
    }

    async fn on_delete(&self, _ctx: &CheckoutContext) -> Result<(), CheckoutError> {
        self.timer.abort();
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: CheckoutAction,
        ctx: &CheckoutContext,
    ) -> Result<CheckoutActionResult, CheckoutError> {
        match action {
            CheckoutAction::Submit => self.submit(ctx).await.map(CheckoutActionResult::Submit),
            CheckoutAction::ConfirmPayment => {
                self.confirm_payment(ctx)?;
                Ok(CheckoutActionResult::ConfirmPayment(()))
            }
            CheckoutAction::ResetTimer => self.reset_timer(ctx).map(CheckoutActionResult::ResetTimer),
            CheckoutAction::DismissPayment => {
                self.dismiss_payment()?;
                Ok(CheckoutActionResult::DismissPayment(()))
            }
            CheckoutAction::Totals => Ok(CheckoutActionResult::Totals(
                self.totals(&ctx.config.pricing),
            )),
            CheckoutAction::Tick { generation } => Ok(self.tick(generation)),
            CheckoutAction::Finalize => {
                self.finalize(ctx).await?;
                Ok(CheckoutActionResult::Finalize(()))
            }
            CheckoutAction::AdvanceTracking => self.advance_tracking(),
        }
    }

    fn on_shutdown(&mut self) {
        self.timer.cancel();
    }
}

impl CheckoutSession {
    /// Why the order cannot be submitted yet, if anything.
    pub fn check_submittable(&self) -> Result<(), CheckoutError> {
        if self.lines.is_empty() {
            return Err(CheckoutError::EmptyOrder);
        }
        if self.details.table_number.is_empty() {
            return Err(CheckoutError::MissingTableNumber);
        }
        Ok(())
    }

    fn require_stage(&self, expected: CheckoutStage, action: &'static str) -> Result<(), CheckoutError> {
        if self.stage == expected {
            Ok(())
        } else {
            Err(CheckoutError::InvalidStage {
                stage: self.stage,
                action,
            })
        }
    }

    async fn submit(&mut self, ctx: &CheckoutContext) -> Result<CheckoutStage, CheckoutError> {
        self.require_stage(CheckoutStage::Filling, "submit")?;
        self.check_submittable()?;

        match self.details.payment_method {
            PaymentMethod::Qris => {
                self.stage = CheckoutStage::AwaitingPayment;
                // resumes from whatever a dismissed sheet left on the clock
                if !self.countdown.is_expired() {
                    self.start_countdown(ctx);
                }
            }
            PaymentMethod::Counter => {
                ctx.cart.clear(self.cart_id).await?;
                self.stage = CheckoutStage::Completed;
                self.cart_cleared = true;
                self.start_tracking(ctx);
            }
        }

        info!(
            checkout = %self.id,
            order = %self.order_number,
            method = %self.details.payment_method,
            table = %self.details.table_number,
            stage = %self.stage,
            "Order submitted"
        );
        Ok(self.stage)
    }

    fn confirm_payment(&mut self, ctx: &CheckoutContext) -> Result<(), CheckoutError> {
        self.require_stage(CheckoutStage::AwaitingPayment, "confirm payment")?;
        self.stage = CheckoutStage::Completed;
        let (sessions, id) = (ctx.sessions.clone(), self.id);
        self.timer.start(TimerKind::Handoff, |_| {
            timer::spawn_delayed(sessions, id, ctx.config.completion_delay(), CheckoutAction::Finalize)
        });
        info!(checkout = %self.id, order = %self.order_number, "Payment confirmed");
        Ok(())
    }

    fn dismiss_payment(&mut self) -> Result<(), CheckoutError> {
        self.require_stage(CheckoutStage::AwaitingPayment, "dismiss payment")?;
        self.timer.cancel();
        self.stage = CheckoutStage::Filling;
        Ok(())
    }

    fn reset_timer(&mut self, ctx: &CheckoutContext) -> Result<Countdown, CheckoutError> {
        self.require_stage(CheckoutStage::AwaitingPayment, "reset the timer")?;
        self.countdown.reset();
        if self.timer.kind() != Some(TimerKind::Countdown) {
            self.start_countdown(ctx);
        }
        Ok(self.countdown)
    }

    fn tick(&mut self, generation: u64) -> CheckoutActionResult {
        // late ticks from a cancelled or replaced countdown are ignored
        if self.stage != CheckoutStage::AwaitingPayment
            || !self.timer.is_current(TimerKind::Countdown, generation)
        {
            return CheckoutActionResult::Tick {
                countdown: self.countdown,
                running: false,
            };
        }

        let running = self.countdown.tick();
        if !running {
            self.timer.finish();
            info!(checkout = %self.id, order = %self.order_number, "Payment window expired");
        }
        CheckoutActionResult::Tick {
            countdown: self.countdown,
            running,
        }
    }

    async fn finalize(&mut self, ctx: &CheckoutContext) -> Result<(), CheckoutError> {
        self.require_stage(CheckoutStage::Completed, "hand off the order")?;
        if self.cart_cleared {
            return Ok(());
        }
        self.timer.finish();
        ctx.cart.clear(self.cart_id).await?;
        self.cart_cleared = true;
        self.start_tracking(ctx);
        info!(checkout = %self.id, cart = %self.cart_id, "Cart cleared after payment");
        Ok(())
    }

    fn advance_tracking(&mut self) -> Result<CheckoutActionResult, CheckoutError> {
        let Some(tracking) = self.tracking.as_mut() else {
            return Err(CheckoutError::InvalidStage {
                stage: self.stage,
                action: "advance tracking",
            });
        };
        tracking.advance();
        let running = !tracking.is_ready();
        let step = tracking.step;
        if !running {
            self.timer.finish();
        }
        Ok(CheckoutActionResult::AdvanceTracking { step, running })
    }

    fn start_countdown(&mut self, ctx: &CheckoutContext) {
        let (sessions, id) = (ctx.sessions.clone(), self.id);
        self.timer.start(TimerKind::Countdown, |generation| {
            timer::spawn_repeating(
                sessions,
                id,
                ctx.config.countdown_tick(),
                CheckoutAction::Tick { generation },
            )
        });
    }

    fn start_tracking(&mut self, ctx: &CheckoutContext) {
        let tracking = OrderTracking::start(&mut rand::thread_rng());
        info!(
            checkout = %self.id,
            estimated_minutes = tracking.estimated_minutes,
            "Order tracking started"
        );
        self.tracking = Some(tracking);
        let (sessions, id) = (ctx.sessions.clone(), self.id);
        self.timer.start(TimerKind::Tracking, |_| {
            timer::spawn_repeating(
                sessions,
                id,
                ctx.config.tracking_step(),
                CheckoutAction::AdvanceTracking,
            )
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::CartClient;
    use crate::framework::mock::MockClient;
    use crate::framework::ResourceActor;
    use crate::lifecycle::OrderingConfig;
    use crate::menu_actor::catalog::dummy_items;
    use crate::model::{Cart, CartId, CartLine, TrackingStep};

    /// Context whose timers find the checkout actor already gone.
    fn context(cart: &MockClient<Cart>) -> CheckoutContext {
        let (_actor, sessions) = ResourceActor::<CheckoutSession>::new(1);
        CheckoutContext {
            cart: CartClient::new(cart.client()),
            sessions: sessions.downgrade(),
            config: OrderingConfig::default(),
        }
    }

    /// A tick from the session's current countdown.
    async fn tick(session: &mut CheckoutSession, ctx: &CheckoutContext) -> CheckoutActionResult {
        let generation = session.timer.generation();
        session
            .handle_action(CheckoutAction::Tick { generation }, ctx)
            .await
            .unwrap()
    }

    fn ready_session() -> CheckoutSession {
        let mut session = CheckoutSession::new(CheckoutId(1), CartId(1));
        session.lines.push(CartLine {
            item: dummy_items().remove(0),
            quantity: 2,
        });
        session.details.table_number = "12".into();
        session
    }

    #[tokio::test]
    async fn test_submit_rejected_without_table_number() {
        let cart = MockClient::<Cart>::new();
        let mut session = ready_session();
        session.details.table_number.clear();

        let result = session.handle_action(CheckoutAction::Submit, &context(&cart)).await;

        assert_eq!(result, Err(CheckoutError::MissingTableNumber));
        assert_eq!(session.stage, CheckoutStage::Filling);
        assert_eq!(session.active_timer(), None);
    }

    #[tokio::test]
    async fn test_submit_rejected_for_empty_order() {
        let cart = MockClient::<Cart>::new();
        let mut session = ready_session();
        session.lines.clear();

        let result = session.handle_action(CheckoutAction::Submit, &context(&cart)).await;
        assert_eq!(result, Err(CheckoutError::EmptyOrder));
    }

    #[tokio::test]
    async fn test_qris_submit_starts_countdown() {
        let cart = MockClient::<Cart>::new();
        let mut session = ready_session();

        let result = session
            .handle_action(CheckoutAction::Submit, &context(&cart))
            .await
            .unwrap();

        assert_eq!(result, CheckoutActionResult::Submit(CheckoutStage::AwaitingPayment));
        assert_eq!(session.active_timer(), Some(TimerKind::Countdown));
        cart.verify();
    }

    #[tokio::test]
    async fn test_form_is_locked_outside_filling() {
        let cart = MockClient::<Cart>::new();
        let ctx = context(&cart);
        let mut session = ready_session();
        session.handle_action(CheckoutAction::Submit, &ctx).await.unwrap();

        let update = CheckoutUpdate {
            table_number: Some("99".into()),
            ..Default::default()
        };
        let result = session.on_update(update, &ctx).await;

        assert_eq!(
            result,
            Err(CheckoutError::InvalidStage {
                stage: CheckoutStage::AwaitingPayment,
                action: "edit the order form",
            })
        );
        assert_eq!(session.details.table_number, "12");
    }

    #[tokio::test]
    async fn test_dismiss_keeps_remaining_time() {
        let cart = MockClient::<Cart>::new();
        let ctx = context(&cart);
        let mut session = ready_session();
        session.handle_action(CheckoutAction::Submit, &ctx).await.unwrap();
        tick(&mut session, &ctx).await;
        tick(&mut session, &ctx).await;

        session.handle_action(CheckoutAction::DismissPayment, &ctx).await.unwrap();

        assert_eq!(session.stage, CheckoutStage::Filling);
        assert_eq!(session.active_timer(), None);
        assert_eq!(session.countdown.to_string(), "14:58");

        // a tick that was already queued changes nothing
        let late = tick(&mut session, &ctx).await;
        assert!(!late.keeps_timer_running());
        assert_eq!(session.countdown.to_string(), "14:58");
    }

    #[tokio::test]
    async fn test_tick_from_replaced_countdown_is_ignored() {
        let cart = MockClient::<Cart>::new();
        let ctx = context(&cart);
        let mut session = ready_session();
        session.handle_action(CheckoutAction::Submit, &ctx).await.unwrap();
        let old_generation = session.timer.generation();

        // dismiss and resubmit before the old ticker's last tick is handled
        session.handle_action(CheckoutAction::DismissPayment, &ctx).await.unwrap();
        session.handle_action(CheckoutAction::Submit, &ctx).await.unwrap();
        assert_eq!(session.active_timer(), Some(TimerKind::Countdown));

        let stale = session
            .handle_action(CheckoutAction::Tick { generation: old_generation }, &ctx)
            .await
            .unwrap();
        assert!(!stale.keeps_timer_running());
        assert_eq!(session.countdown.to_string(), "15:00");

        let current = tick(&mut session, &ctx).await;
        assert!(current.keeps_timer_running());
        assert_eq!(session.countdown.to_string(), "14:59");
    }

    #[tokio::test]
    async fn test_reset_restarts_expired_countdown() {
        let cart = MockClient::<Cart>::new();
        let ctx = context(&cart);
        let mut session = ready_session();
        session.countdown = Countdown::new(1);
        session.handle_action(CheckoutAction::Submit, &ctx).await.unwrap();

        let expired = tick(&mut session, &ctx).await;
        assert!(!expired.keeps_timer_running());
        assert_eq!(session.active_timer(), None);

        let result = session.handle_action(CheckoutAction::ResetTimer, &ctx).await.unwrap();
        assert_eq!(result, CheckoutActionResult::ResetTimer(Countdown::new(1)));
        assert_eq!(session.active_timer(), Some(TimerKind::Countdown));
    }

    #[tokio::test]
    async fn test_confirm_after_expiry_schedules_handoff() {
        let cart = MockClient::<Cart>::new();
        let ctx = context(&cart);
        let mut session = ready_session();
        session.countdown = Countdown::new(1);
        session.handle_action(CheckoutAction::Submit, &ctx).await.unwrap();
        tick(&mut session, &ctx).await;

        session.handle_action(CheckoutAction::ConfirmPayment, &ctx).await.unwrap();

        assert_eq!(session.stage, CheckoutStage::Completed);
        assert_eq!(session.active_timer(), Some(TimerKind::Handoff));
        assert!(!session.cart_cleared);
    }

    #[tokio::test]
    async fn test_finalize_clears_cart_once() {
        let mut cart = MockClient::<Cart>::new();
        cart.expect_action(CartId(1))
            .return_ok(crate::cart_actor::CartActionResult::Clear(()));
        let ctx = context(&cart);
        let mut session = ready_session();
        session.stage = CheckoutStage::Completed;

        session.handle_action(CheckoutAction::Finalize, &ctx).await.unwrap();
        session.handle_action(CheckoutAction::Finalize, &ctx).await.unwrap();

        assert!(session.cart_cleared);
        assert_eq!(session.active_timer(), Some(TimerKind::Tracking));
        assert_eq!(session.tracking.map(|t| t.step), Some(TrackingStep::Received));
        cart.verify();
    }

    #[tokio::test]
    async fn test_counter_submit_completes_immediately() {
        let mut cart = MockClient::<Cart>::new();
        cart.expect_action(CartId(1))
            .return_ok(crate::cart_actor::CartActionResult::Clear(()));
        let ctx = context(&cart);
        let mut session = ready_session();
        session.details.payment_method = PaymentMethod::Counter;

        let result = session.handle_action(CheckoutAction::Submit, &ctx).await.unwrap();

        assert_eq!(result, CheckoutActionResult::Submit(CheckoutStage::Completed));
        assert!(session.cart_cleared);
        assert_eq!(session.countdown.to_string(), "15:00");
        assert_eq!(session.active_timer(), Some(TimerKind::Tracking));
        cart.verify();
    }

    #[tokio::test]
    async fn test_tracking_stops_when_ready() {
        let cart = MockClient::<Cart>::new();
        let ctx = context(&cart);
        let mut session = ready_session();

        let result = session.handle_action(CheckoutAction::AdvanceTracking, &ctx).await;
        assert!(matches!(result, Err(CheckoutError::InvalidStage { .. })));

        session.tracking = Some(OrderTracking {
            step: TrackingStep::Received,
            estimated_minutes: 20,
        });
        let first = session.handle_action(CheckoutAction::AdvanceTracking, &ctx).await.unwrap();
        assert_eq!(
            first,
            CheckoutActionResult::AdvanceTracking {
                step: TrackingStep::Preparing,
                running: true,
            }
        );
        let second = session.handle_action(CheckoutAction::AdvanceTracking, &ctx).await.unwrap();
        assert!(!second.keeps_timer_running());
    }

    #[tokio::test]
    async fn test_checkout_totals_from_config() {
        let cart = MockClient::<Cart>::new();
        let mut session = ready_session();
        session.lines.push(CartLine {
            item: dummy_items().remove(2),
            quantity: 1,
        });

        let result = session
            .handle_action(CheckoutAction::Totals, &context(&cart))
            .await
            .unwrap();

        let CheckoutActionResult::Totals(totals) = result else {
            panic!("expected totals, got {result:?}");
        };
        assert_eq!(totals.total, 109_250);
    }
}
