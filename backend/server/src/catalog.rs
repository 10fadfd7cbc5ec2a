use crate::{error::StorageError, models::Recipe};

/// Max existing id plus one, or 1 for an empty collection. Ids freed by deleting the maximum are reused.
pub fn next_id(recipes: &[Recipe]) -> Result<u64, StorageError> {
    match recipes.iter().map(|r| r.id).max() {
        None => Ok(1),
        Some(max) => max.checked_add(1).ok_or(StorageError::IdsExhausted),
    }
}

pub fn find(recipes: &[Recipe], id: u64) -> Option<&Recipe> {
    recipes.iter().find(|r| r.id == id)
}

/// Swaps in `recipe` for the record with `id`, forcing its id to `id`.
pub fn replace(recipes: &mut [Recipe], id: u64, mut recipe: Recipe) -> Option<Recipe> {
    let slot = recipes.iter_mut().find(|r| r.id == id)?;
    recipe.id = id;
    *slot = recipe.clone();

    Some(recipe)
}

/// Drops every record with `id`. Returns `None` if nothing was removed.
pub fn remove(recipes: Vec<Recipe>, id: u64) -> Option<Vec<Recipe>> {
    let before = recipes.len();
    let kept: Vec<Recipe> = recipes.into_iter().filter(|r| r.id != id).collect();

    (kept.len() != before).then_some(kept)
}
