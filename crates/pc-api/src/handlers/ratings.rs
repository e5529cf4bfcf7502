use actix_web::{web, HttpResponse};
use pc_core::error::AppError;
use pc_core::schemas::{validate_payload, RatingCreate};

use super::AppState;
use crate::error::ApiError;

async fn ensure_recipe(data: &AppState, recipe_id: i64) -> Result<(), ApiError> {
    if data.repo.recipe_exists(recipe_id).await? {
        Ok(())
    } else {
        Err(AppError::not_found("Recipe", recipe_id).into())
    }
}

pub async fn list_recipe_ratings(
    data: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let recipe_id = path.into_inner();
    ensure_recipe(&data, recipe_id).await?;

    let ratings = data.repo.list_ratings_for_recipe(recipe_id).await?;
    Ok(HttpResponse::Ok().json(ratings))
}

pub async fn create_recipe_rating(
    data: web::Data<AppState>,
    path: web::Path<i64>,
    payload: web::Json<RatingCreate>,
) -> Result<HttpResponse, ApiError> {
    let recipe_id = path.into_inner();
    let payload = payload.into_inner();
    validate_payload(&payload)?;
    ensure_recipe(&data, recipe_id).await?;

    let rating = data.repo.create_rating(recipe_id, payload).await?;
    log::info!("recipe {} rated {} (rating {})", recipe_id, rating.rating, rating.id);
    Ok(HttpResponse::Created().json(rating))
}

pub async fn get_rating(
    data: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    match data.repo.get_rating(id).await? {
        Some(rating) => Ok(HttpResponse::Ok().json(rating)),
        None => Err(AppError::not_found("Rating", id).into()),
    }
}
