use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::{Multipart, Path, Query, State as AxumState, multipart::MultipartRejection},
    http::StatusCode,
    response::{Html, IntoResponse},
};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use crate::{
    catalog::{find, next_id, remove, replace},
    error::AppError,
    images::allowed_file,
    models::{Ingredients, Recipe},
    search::{filter_by_category, search},
    state::State,
    utils::{ImagePart, multipart_status, parse_id, parse_recipe, read_form},
};

const INDEX_HTML: &str = include_str!("../static/index.html");

#[derive(Deserialize)]
pub struct SearchParams {
    q: Option<String>,
}

#[derive(Deserialize)]
pub struct FilterParams {
    category: Option<String>,
}

pub async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn list_handler(
    AxumState(state): AxumState<Arc<State>>,
) -> Result<Json<Vec<Recipe>>, AppError> {
    Ok(Json(state.store.load().await?))
}

pub async fn get_handler(
    AxumState(state): AxumState<Arc<State>>,
    Path(raw_id): Path<String>,
) -> Result<Json<Recipe>, AppError> {
    let id = parse_id(&raw_id)?;
    let recipes = state.store.load().await?;

    find(&recipes, id).cloned().map(Json).ok_or(AppError::NotFound)
}

pub async fn create_handler(
    AxumState(state): AxumState<Arc<State>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, AppError> {
    let multipart = multipart.map_err(|e| multipart_status(e.status()))?;
    let form = read_form(multipart).await?;

    let _guard = state.store.lock().await;
    let mut recipes = state.store.load().await?;

    let mut recipe = Recipe {
        id: next_id(&recipes)?,
        title: form.title,
        ingredients: Ingredients::Text(form.ingredients),
        instructions: form.instructions,
        category: form.category,
        image: None,
        original_image: None,
    };

    let (file_name, bytes) = match form.image {
        ImagePart::Missing => return Err(AppError::MissingImagePart),
        ImagePart::Empty => return Err(AppError::NoFileSelected),
        ImagePart::File { file_name, bytes } => (file_name, bytes),
    };

    if allowed_file(&file_name) {
        let stored = state.images.save(&file_name, &bytes).await?;
        recipe.image = Some(stored);
        recipe.original_image = Some(file_name);
    } else {
        warn!("Discarding upload {file_name:?} for recipe {}: extension not allowed", recipe.id);
    }

    recipes.push(recipe.clone());
    state.store.save(&recipes).await?;

    info!("Created recipe {}", recipe.id);
    Ok((StatusCode::CREATED, Json(recipe)))
}

pub async fn update_handler(
    AxumState(state): AxumState<Arc<State>>,
    Path(raw_id): Path<String>,
    body: Bytes,
) -> Result<Json<Recipe>, AppError> {
    let id = parse_id(&raw_id)?;
    let updated = parse_recipe(&body)?;

    let _guard = state.store.lock().await;
    let mut recipes = state.store.load().await?;

    let stored = replace(&mut recipes, id, updated.into_recipe(id)).ok_or(AppError::NotFound)?;
    state.store.save(&recipes).await?;

    info!("Updated recipe {id}");
    Ok(Json(stored))
}

pub async fn delete_handler(
    AxumState(state): AxumState<Arc<State>>,
    Path(raw_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&raw_id)?;

    let _guard = state.store.lock().await;
    let recipes = state.store.load().await?;

    let kept = remove(recipes, id).ok_or(AppError::NotFound)?;
    state.store.save(&kept).await?;

    info!("Deleted recipe {id}");
    Ok((StatusCode::OK, Json(json!({ "success": "Recipe deleted" }))))
}

pub async fn search_handler(
    AxumState(state): AxumState<Arc<State>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Recipe>>, AppError> {
    let query = params.q.ok_or(AppError::MissingField("q"))?;
    let recipes = state.store.load().await?;

    Ok(Json(search(recipes, &query)))
}

pub async fn filter_handler(
    AxumState(state): AxumState<Arc<State>>,
    Query(params): Query<FilterParams>,
) -> Result<Json<Vec<Recipe>>, AppError> {
    let recipes = state.store.load().await?;

    Ok(Json(filter_by_category(recipes, params.category.as_deref())))
}
