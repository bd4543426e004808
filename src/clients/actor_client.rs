use crate::framework::{ActorEntity, FrameworkError, ResourceClient};
use async_trait::async_trait;

/// Trait for resource-specific clients to inherit standard operations.
///
/// This trait reduces boilerplate by providing default implementations for
/// `get`, `list` and `delete`.
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The resource-specific error type.
    type Error: From<String> + Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map framework errors to the specific resource error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Fetch every entity, in ID order.
    #[tracing::instrument(skip(self))]
    async fn list(&self) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().list().await.map_err(Self::map_error)
    }

    /// Delete an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }
}

/// Turns a [`FrameworkError`] back into the actor's own error type.
///
/// Errors raised by entity hooks travel boxed inside
/// [`FrameworkError::EntityError`]; they are unboxed here so callers can match
/// on them. Missing entities go through `not_found`, anything else becomes the
/// error's `From<String>` (communication) variant.
pub fn recover_entity_error<E>(e: FrameworkError, not_found: impl FnOnce(String) -> E) -> E
where
    E: std::error::Error + Clone + From<String> + 'static,
{
    match e {
        FrameworkError::NotFound(id) => not_found(id),
        other => match other.entity_error::<E>() {
            Some(inner) => inner.clone(),
            None => E::from(other.to_string()),
        },
    }
}
