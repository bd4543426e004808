//! Menu items and the browse filter.
//!
//! # Actor Framework
//! Items are managed by the read-only catalog actor, see [`crate::menu_actor`].
//! They are seeded at startup and never change afterwards.

use crate::model::Price;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Label of the pseudo-category that matches every item.
pub const ALL_CATEGORIES: &str = "All";

/// Type-safe identifier for menu items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MenuItemId(pub u32);

impl From<u32> for MenuItemId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for MenuItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "menu_{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutritionInfo {
    pub calories: u32,
    pub protein: u32,
    pub carbs: u32,
    pub fat: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: MenuItemId,
    pub name: String,
    pub category: String,
    pub price: Price,
    pub description: String,
    pub image: String,
    pub popular: bool,
    pub ingredients: Option<Vec<String>>,
    pub nutrition: Option<NutritionInfo>,
}

/// Payload for adding an item to the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItemCreate {
    pub name: String,
    pub category: String,
    pub price: Price,
    pub description: String,
    pub image: String,
    pub popular: bool,
    pub ingredients: Option<Vec<String>>,
    pub nutrition: Option<NutritionInfo>,
}

impl MenuItem {
    pub fn from_create(id: MenuItemId, params: MenuItemCreate) -> Self {
        Self {
            id,
            name: params.name,
            category: params.category,
            price: params.price,
            description: params.description,
            image: params.image,
            popular: params.popular,
            ingredients: params.ingredients,
            nutrition: params.nutrition,
        }
    }

    /// Whether this item passes `filter`.
    pub fn matches(&self, filter: &MenuFilter) -> bool {
        filter.category.accepts(&self.category) && filter.matches_search(self)
    }
}

/// Category selection in the menu tabs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    /// Maps a tab label back to a filter; `"All"` selects everything.
    pub fn from_label(label: &str) -> Self {
        if label == ALL_CATEGORIES {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(label.to_string())
        }
    }

    pub fn accepts(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => wanted == category,
        }
    }
}

/// Search box text plus the selected category tab.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuFilter {
    pub search: String,
    pub category: CategoryFilter,
}

impl MenuFilter {
    pub fn new(search: impl Into<String>, category: CategoryFilter) -> Self {
        Self {
            search: search.into(),
            category,
        }
    }

    fn matches_search(&self, item: &MenuItem) -> bool {
        let needle = self.search.to_lowercase();
        item.name.to_lowercase().contains(&needle)
            || item.description.to_lowercase().contains(&needle)
    }
}

/// Items matching `filter`, in catalog order.
pub fn filter_items<'a>(items: &'a [MenuItem], filter: &MenuFilter) -> Vec<&'a MenuItem> {
    items.iter().filter(|item| item.matches(filter)).collect()
}

/// Tab labels: `"All"` followed by each distinct category in first-seen order.
pub fn categories(items: &[MenuItem]) -> Vec<String> {
    let mut labels = vec![ALL_CATEGORIES.to_string()];
    for item in items {
        if !labels[1..].contains(&item.category) {
            labels.push(item.category.clone());
        }
    }
    labels
}

/// Items flagged as popular, in catalog order.
pub fn popular(items: &[MenuItem]) -> Vec<&MenuItem> {
    items.iter().filter(|item| item.popular).collect()
}
