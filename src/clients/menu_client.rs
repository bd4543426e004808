//! # Menu Client
//!
//! Browsing API over the catalog actor. Filtering runs client-side on a `List`
//! response using the pure functions in [`crate::model::menu`].
use crate::clients::actor_client::{recover_entity_error, ActorClient};
use crate::framework::{FrameworkError, ResourceClient};
use crate::menu_actor::MenuError;
use crate::model::{self, MenuFilter, MenuItem};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Menu actor.
#[derive(Clone)]
pub struct MenuClient {
    inner: ResourceClient<MenuItem>,
}

impl MenuClient {
    pub fn new(inner: ResourceClient<MenuItem>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<MenuItem> for MenuClient {
    type Error = MenuError;

    fn inner(&self) -> &ResourceClient<MenuItem> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        recover_entity_error(e, MenuError::NotFound)
    }
}

impl MenuClient {
    /// Items matching the search text and category tab, in catalog order.
    #[instrument(skip(self))]
    pub async fn browse(&self, filter: MenuFilter) -> Result<Vec<MenuItem>, MenuError> {
        let items = self.list().await?;
        let matches: Vec<MenuItem> = model::filter_items(&items, &filter)
            .into_iter()
            .cloned()
            .collect();
        debug!(matches = matches.len(), "Filtered menu");
        Ok(matches)
    }

    /// Category tab labels, starting with "All".
    #[instrument(skip(self))]
    pub async fn categories(&self) -> Result<Vec<String>, MenuError> {
        let items = self.list().await?;
        Ok(model::categories(&items))
    }

    /// The "popular" section shown above the full menu.
    #[instrument(skip(self))]
    pub async fn popular(&self) -> Result<Vec<MenuItem>, MenuError> {
        let items = self.list().await?;
        Ok(model::popular(&items).into_iter().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::{create_mock_client, expect_list, MockClient};
    use crate::menu_actor::catalog::dummy_items;
    use crate::model::{CategoryFilter, MenuItemId};

    #[tokio::test]
    async fn test_browse_applies_filter() {
        let (client, mut receiver) = create_mock_client::<MenuItem>(4);
        let menu = MenuClient::new(client);

        let task = tokio::spawn(async move {
            menu.browse(MenuFilter::new("", CategoryFilter::from_label("Beverages")))
                .await
        });

        let responder = expect_list(&mut receiver).await.expect("Expected List request");
        responder.send(Ok(dummy_items())).unwrap();

        let drinks = task.await.unwrap().unwrap();
        let names: Vec<_> = drinks.iter().map(|item| item.name.as_str()).collect();
        assert_eq!(names, vec!["Es Teh Manis", "Jus Alpukat"]);
    }

    #[tokio::test]
    async fn test_categories_and_popular() {
        let mut mock = MockClient::<MenuItem>::new();
        mock.expect_list().return_ok(dummy_items());
        mock.expect_list().return_ok(dummy_items());

        let menu = MenuClient::new(mock.client());
        assert_eq!(
            menu.categories().await.unwrap(),
            vec!["All", "Main Course", "Appetizer", "Beverages"]
        );
        let popular: Vec<_> = menu.popular().await.unwrap().into_iter().map(|i| i.id).collect();
        assert_eq!(popular, vec![MenuItemId(1), MenuItemId(3), MenuItemId(5)]);

        mock.verify();
    }
}
