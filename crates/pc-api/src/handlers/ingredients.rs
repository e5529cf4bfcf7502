use actix_web::{web, HttpResponse};
use pc_core::error::AppError;
use pc_core::schemas::{validate_payload, IngredientCreate, IngredientUpdate, Pagination};

use super::AppState;
use crate::error::ApiError;

const ENTITY: &str = "Ingredient";

pub async fn list_ingredients(
    data: web::Data<AppState>,
    page: web::Query<Pagination>,
) -> Result<HttpResponse, ApiError> {
    let page = page.into_inner();
    validate_payload(&page)?;

    let ingredients = data.repo.list_ingredients(page.skip, page.limit).await?;
    Ok(HttpResponse::Ok().json(ingredients))
}

/// Rejects duplicate names before writing anything.
pub async fn create_ingredient(
    data: web::Data<AppState>,
    payload: web::Json<IngredientCreate>,
) -> Result<HttpResponse, ApiError> {
    let payload = payload.into_inner();
    validate_payload(&payload)?;

    if data.repo.get_ingredient_by_name(&payload.name).await?.is_some() {
        return Err(AppError::Conflict(format!(
            "Ingredient with name '{}' already exists",
            payload.name
        ))
        .into());
    }

    let ingredient = data.repo.create_ingredient(payload).await?;
    log::info!("created ingredient {} '{}'", ingredient.id, ingredient.name);
    Ok(HttpResponse::Created().json(ingredient))
}

pub async fn get_ingredient(
    data: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    match data.repo.get_ingredient(id).await? {
        Some(ingredient) => Ok(HttpResponse::Ok().json(ingredient)),
        None => Err(AppError::not_found(ENTITY, id).into()),
    }
}

pub async fn update_ingredient(
    data: web::Data<AppState>,
    path: web::Path<i64>,
    patch: web::Json<IngredientUpdate>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let patch = patch.into_inner();
    validate_payload(&patch)?;

    // Renaming onto another ingredient's name would trip the unique index.
    if let Some(name) = &patch.name {
        if let Some(existing) = data.repo.get_ingredient_by_name(name).await? {
            if existing.id != id {
                return Err(AppError::Conflict(format!(
                    "Ingredient with name '{}' already exists",
                    name
                ))
                .into());
            }
        }
    }

    match data.repo.update_ingredient(id, patch).await? {
        Some(ingredient) => {
            log::debug!("updated ingredient {}", id);
            Ok(HttpResponse::Ok().json(ingredient))
        }
        None => Err(AppError::not_found(ENTITY, id).into()),
    }
}

/// Ingredients still used by a recipe are kept.
pub async fn delete_ingredient(
    data: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    if data.repo.is_ingredient_referenced(id).await? {
        return Err(AppError::Conflict(format!(
            "Ingredient {} is used by one or more recipes",
            id
        ))
        .into());
    }

    if !data.repo.delete_ingredient(id).await? {
        return Err(AppError::not_found(ENTITY, id).into());
    }

    log::info!("deleted ingredient {}", id);
    Ok(HttpResponse::NoContent().finish())
}
