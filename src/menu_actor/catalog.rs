//! The house menu loaded at startup.

use crate::model::{MenuItem, MenuItemCreate, MenuItemId, NutritionInfo, Price};

const PLACEHOLDER_IMAGE: &str = "/placeholder.jpg";

struct Dish {
    name: &'static str,
    category: &'static str,
    price: Price,
    description: &'static str,
    popular: bool,
    ingredients: &'static [&'static str],
    nutrition: (u32, u32, u32, u32),
}

const DISHES: &[Dish] = &[
    Dish {
        name: "Nasi Goreng Spesial",
        category: "Main Course",
        price: 35_000,
        description: "Nasi goreng dengan telur, ayam, dan sayuran segar",
        popular: true,
        ingredients: &["Nasi", "Telur", "Ayam", "Sayuran", "Bumbu rahasia"],
        nutrition: (450, 15, 65, 12),
    },
    Dish {
        name: "Mie Goreng",
        category: "Main Course",
        price: 30_000,
        description: "Mie goreng dengan bumbu khas dan sayuran",
        popular: false,
        ingredients: &["Mie", "Telur", "Sayuran", "Bumbu khas"],
        nutrition: (410, 12, 60, 14),
    },
    Dish {
        name: "Sate Ayam",
        category: "Appetizer",
        price: 25_000,
        description: "Sate ayam dengan bumbu kacang",
        popular: true,
        ingredients: &["Ayam", "Bumbu marinasi", "Saus kacang", "Lontong"],
        nutrition: (320, 25, 20, 15),
    },
    Dish {
        name: "Es Teh Manis",
        category: "Beverages",
        price: 8_000,
        description: "Teh manis dingin segar",
        popular: false,
        ingredients: &["Teh", "Gula", "Es batu"],
        nutrition: (120, 0, 30, 0),
    },
    Dish {
        name: "Jus Alpukat",
        category: "Beverages",
        price: 15_000,
        description: "Jus alpukat segar dengan susu",
        popular: true,
        ingredients: &["Alpukat", "Susu", "Gula", "Es batu"],
        nutrition: (240, 4, 22, 15),
    },
    Dish {
        name: "Ayam Goreng",
        category: "Main Course",
        price: 28_000,
        description: "Ayam goreng renyah dengan sambal",
        popular: false,
        ingredients: &["Ayam", "Bumbu rempah", "Sambal", "Lalapan"],
        nutrition: (380, 28, 15, 22),
    },
];

/// Creation payloads for the catalog, in display order.
pub fn seed() -> Vec<MenuItemCreate> {
    DISHES
        .iter()
        .map(|dish| {
            let (calories, protein, carbs, fat) = dish.nutrition;
            MenuItemCreate {
                name: dish.name.to_string(),
                category: dish.category.to_string(),
                price: dish.price,
                description: dish.description.to_string(),
                image: PLACEHOLDER_IMAGE.to_string(),
                popular: dish.popular,
                ingredients: Some(dish.ingredients.iter().map(|s| s.to_string()).collect()),
                nutrition: Some(NutritionInfo {
                    calories,
                    protein,
                    carbs,
                    fat,
                }),
            }
        })
        .collect()
}

/// The seeded catalog with the IDs the actor assigns (1, 2, ...).
pub fn dummy_items() -> Vec<MenuItem> {
    seed()
        .into_iter()
        .zip(1..)
        .map(|(params, id)| MenuItem::from_create(MenuItemId(id), params))
        .collect()
}
