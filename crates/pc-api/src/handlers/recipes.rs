use actix_web::{web, HttpResponse};
use pc_core::error::AppError;
use pc_core::schemas::{validate_payload, Pagination, RecipeCreate, RecipeUpdate};

use super::AppState;
use crate::error::ApiError;

const ENTITY: &str = "Recipe";

pub async fn list_recipes(
    data: web::Data<AppState>,
    page: web::Query<Pagination>,
) -> Result<HttpResponse, ApiError> {
    let page = page.into_inner();
    validate_payload(&page)?;

    let recipes = data.repo.list_recipes(page.skip, page.limit).await?;
    Ok(HttpResponse::Ok().json(recipes))
}

/// Orchestrates the creation of a recipe with its ingredient line items.
///
/// Every referenced ingredient is checked in order before anything is
/// written; the first missing one aborts the request.
pub async fn create_recipe(
    data: web::Data<AppState>,
    payload: web::Json<RecipeCreate>,
) -> Result<HttpResponse, ApiError> {
    let payload = payload.into_inner();
    validate_payload(&payload)?;

    for item in &payload.ingredients {
        if data.repo.get_ingredient(item.ingredient_id).await?.is_none() {
            return Err(AppError::InvalidReference {
                entity: "Ingredient",
                id: item.ingredient_id,
            }
            .into());
        }
    }

    let recipe = data.repo.create_recipe(payload).await?;
    log::info!(
        "created recipe {} '{}' with {} ingredient(s)",
        recipe.recipe.id,
        recipe.recipe.title,
        recipe.ingredients.len()
    );
    Ok(HttpResponse::Created().json(recipe))
}

pub async fn get_recipe(
    data: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    match data.repo.get_recipe(id).await? {
        Some(recipe) => Ok(HttpResponse::Ok().json(recipe)),
        None => Err(AppError::not_found(ENTITY, id).into()),
    }
}

pub async fn update_recipe(
    data: web::Data<AppState>,
    path: web::Path<i64>,
    patch: web::Json<RecipeUpdate>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let patch = patch.into_inner();
    validate_payload(&patch)?;

    match data.repo.update_recipe(id, patch).await? {
        Some(recipe) => {
            log::debug!("updated recipe {}", id);
            Ok(HttpResponse::Ok().json(recipe))
        }
        None => Err(AppError::not_found(ENTITY, id).into()),
    }
}

/// Line items and ratings go with the recipe.
pub async fn delete_recipe(
    data: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    if !data.repo.delete_recipe(id).await? {
        return Err(AppError::not_found(ENTITY, id).into());
    }

    log::info!("deleted recipe {}", id);
    Ok(HttpResponse::NoContent().finish())
}
