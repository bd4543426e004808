//! # Checkout Client
//!
//! Provides a high‑level API for the checkout flow: open a session from a cart,
//! fill in the form, submit, and drive the payment sheet.
use crate::checkout_actor::{CheckoutAction, CheckoutActionResult, CheckoutError};
use crate::clients::actor_client::{recover_entity_error, ActorClient};
use crate::framework::{FrameworkError, ResourceClient, WeakResourceClient};
use crate::model::{
    CartId, CheckoutCreate, CheckoutId, CheckoutSession, CheckoutStage, CheckoutTotals,
    CheckoutUpdate, Countdown,
};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Checkout actor.
#[derive(Clone)]
pub struct CheckoutClient {
    inner: ResourceClient<CheckoutSession>,
}

impl CheckoutClient {
    pub fn new(inner: ResourceClient<CheckoutSession>) -> Self {
        Self { inner }
    }

    /// A handle for the actor's own timers; it does not keep the actor alive.
    pub fn downgrade(&self) -> WeakResourceClient<CheckoutSession> {
        self.inner.downgrade()
    }
}

#[async_trait]
impl ActorClient<CheckoutSession> for CheckoutClient {
    type Error = CheckoutError;

    fn inner(&self) -> &ResourceClient<CheckoutSession> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        recover_entity_error(e, CheckoutError::NotFound)
    }
}

impl CheckoutClient {
    /// Opens a checkout for `cart_id`, snapshotting its lines.
    #[instrument(skip(self))]
    pub async fn open(&self, cart_id: CartId) -> Result<CheckoutId, CheckoutError> {
        debug!("Sending request");
        self.inner
            .create(CheckoutCreate { cart_id })
            .await
            .map_err(Self::map_error)
    }

    /// Edits the order form. Only allowed before submitting.
    #[instrument(skip(self))]
    pub async fn fill(
        &self,
        id: CheckoutId,
        update: CheckoutUpdate,
    ) -> Result<CheckoutSession, CheckoutError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// Whether the submit button is enabled.
    #[instrument(skip(self))]
    pub async fn can_submit(&self, id: CheckoutId) -> Result<bool, CheckoutError> {
        match self.get(id).await? {
            Some(session) => Ok(session.can_submit()),
            None => Err(CheckoutError::NotFound(id.to_string())),
        }
    }

    /// Places the order. Returns the stage entered: `AwaitingPayment` for
    /// QRIS, `Completed` for counter payment.
    #[instrument(skip(self))]
    pub async fn submit(&self, id: CheckoutId) -> Result<CheckoutStage, CheckoutError> {
        match self.action(id, CheckoutAction::Submit).await? {
            CheckoutActionResult::Submit(stage) => Ok(stage),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn confirm_payment(&self, id: CheckoutId) -> Result<(), CheckoutError> {
        match self.action(id, CheckoutAction::ConfirmPayment).await? {
            CheckoutActionResult::ConfirmPayment(()) => Ok(()),
            other => Err(unexpected(other)),
        }
    }

    /// Restores the full payment window.
    #[instrument(skip(self))]
    pub async fn reset_timer(&self, id: CheckoutId) -> Result<Countdown, CheckoutError> {
        match self.action(id, CheckoutAction::ResetTimer).await? {
            CheckoutActionResult::ResetTimer(countdown) => Ok(countdown),
            other => Err(unexpected(other)),
        }
    }

    /// Closes the QR sheet and returns to the form.
    #[instrument(skip(self))]
    pub async fn dismiss_payment(&self, id: CheckoutId) -> Result<(), CheckoutError> {
        match self.action(id, CheckoutAction::DismissPayment).await? {
            CheckoutActionResult::DismissPayment(()) => Ok(()),
            other => Err(unexpected(other)),
        }
    }

    /// Checkout page totals: subtotal, service charge, tax.
    #[instrument(skip(self))]
    pub async fn totals(&self, id: CheckoutId) -> Result<CheckoutTotals, CheckoutError> {
        match self.action(id, CheckoutAction::Totals).await? {
            CheckoutActionResult::Totals(totals) => Ok(totals),
            other => Err(unexpected(other)),
        }
    }

    /// Tears the session down, aborting its timers.
    #[instrument(skip(self))]
    pub async fn close(&self, id: CheckoutId) -> Result<(), CheckoutError> {
        self.delete(id).await
    }

    async fn action(
        &self,
        id: CheckoutId,
        action: CheckoutAction,
    ) -> Result<CheckoutActionResult, CheckoutError> {
        debug!(?action, "Sending request");
        self.inner
            .perform_action(id, action)
            .await
            .map_err(Self::map_error)
    }
}

fn unexpected(result: CheckoutActionResult) -> CheckoutError {
    CheckoutError::ActorCommunicationError(format!("Unexpected response: {result:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::{create_mock_client, expect_delete, MockClient};

    #[tokio::test]
    async fn test_submit_returns_stage() {
        let mut mock = MockClient::<CheckoutSession>::new();
        mock.expect_action(CheckoutId(1))
            .return_ok(CheckoutActionResult::Submit(CheckoutStage::AwaitingPayment));

        let stage = CheckoutClient::new(mock.client()).submit(CheckoutId(1)).await.unwrap();

        assert_eq!(stage, CheckoutStage::AwaitingPayment);
        mock.verify();
    }

    #[tokio::test]
    async fn test_rejected_submit_keeps_error_type() {
        let mut mock = MockClient::<CheckoutSession>::new();
        mock.expect_action(CheckoutId(1))
            .return_err(FrameworkError::EntityError(Box::new(
                CheckoutError::MissingTableNumber,
            )));

        let result = CheckoutClient::new(mock.client()).submit(CheckoutId(1)).await;

        assert_eq!(result, Err(CheckoutError::MissingTableNumber));
        mock.verify();
    }

    #[tokio::test]
    async fn test_can_submit_of_unknown_session() {
        let mut mock = MockClient::<CheckoutSession>::new();
        mock.expect_get(CheckoutId(5)).return_ok(None);

        let result = CheckoutClient::new(mock.client()).can_submit(CheckoutId(5)).await;

        assert_eq!(result, Err(CheckoutError::NotFound("checkout_5".into())));
        mock.verify();
    }

    #[tokio::test]
    async fn test_close_deletes_session() {
        let (client, mut receiver) = create_mock_client::<CheckoutSession>(4);
        let checkout = CheckoutClient::new(client);

        let task = tokio::spawn(async move { checkout.close(CheckoutId(2)).await });

        let (id, responder) = expect_delete(&mut receiver).await.expect("Expected Delete request");
        assert_eq!(id, CheckoutId(2));
        responder.send(Ok(())).unwrap();

        assert!(task.await.unwrap().is_ok());
    }
}
