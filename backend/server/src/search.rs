//! # Search
//!
//! Linear scans over the loaded collection.
//!
//! - `q` matches title or ingredients, case-insensitive substring
//! - `category` matches exactly, case-sensitive
//!
//! Result order follows collection order.
use crate::models::Recipe;

pub fn search(recipes: Vec<Recipe>, query: &str) -> Vec<Recipe> {
    let query = query.to_lowercase();

    recipes
        .into_iter()
        .filter(|recipe| {
            recipe.title.to_lowercase().contains(&query)
                || recipe.ingredients.joined().to_lowercase().contains(&query)
        })
        .collect()
}

pub fn filter_by_category(recipes: Vec<Recipe>, category: Option<&str>) -> Vec<Recipe> {
    let Some(category) = category else {
        return Vec::new();
    };

    recipes
        .into_iter()
        .filter(|recipe| recipe.category == category)
        .collect()
}
