//! # pc-api
//!
//! The web routing and orchestration layer for PickChef.

pub mod error;
pub mod handlers;
pub mod middleware;

use actix_web::web;

use handlers::{ingredients, ratings, recipes};

/// Configures the routes and extractor settings for the API.
///
/// # Developer Note
/// Collection routes are registered with and without a trailing slash, since
/// clients call both `/api/recipes` and `/api/recipes/`.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(error::json_config())
        .app_data(error::query_config())
        .app_data(error::path_config())
        .route("/", web::get().to(handlers::index))
        .route("/health", web::get().to(handlers::health))
        .service(
            web::scope("/api")
                // Ingredients
                .service(
                    web::resource(["/ingredients", "/ingredients/"])
                        .route(web::get().to(ingredients::list_ingredients))
                        .route(web::post().to(ingredients::create_ingredient)),
                )
                .service(
                    web::resource("/ingredients/{ingredient_id}")
                        .route(web::get().to(ingredients::get_ingredient))
                        .route(web::put().to(ingredients::update_ingredient))
                        .route(web::delete().to(ingredients::delete_ingredient)),
                )
                // Recipes
                .service(
                    web::resource(["/recipes", "/recipes/"])
                        .route(web::get().to(recipes::list_recipes))
                        .route(web::post().to(recipes::create_recipe)),
                )
                .service(
                    web::resource("/recipes/{recipe_id}")
                        .route(web::get().to(recipes::get_recipe))
                        .route(web::put().to(recipes::update_recipe))
                        .route(web::delete().to(recipes::delete_recipe)),
                )
                // Ratings
                .service(
                    web::resource(["/recipes/{recipe_id}/ratings", "/recipes/{recipe_id}/ratings/"])
                        .route(web::get().to(ratings::list_recipe_ratings))
                        .route(web::post().to(ratings::create_recipe_rating)),
                )
                .service(
                    web::resource("/ratings/{rating_id}")
                        .route(web::get().to(ratings::get_rating)),
                ),
        );
}
