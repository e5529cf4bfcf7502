//! # pc-api Handlers
//!
//! This module coordinates the flow between HTTP requests and the Core repo.
//! Payloads are bound by actix extractors, checked against their schema, and
//! only then handed to the repo.

pub mod ingredients;
pub mod ratings;
pub mod recipes;

use actix_web::{web, HttpResponse, Responder};
use pc_core::traits::RecipeRepo;
use serde_json::json;

/// State shared across all Actix-web workers.
pub struct AppState {
    pub repo: Box<dyn RecipeRepo>,
}

/// Landing payload for "/"
pub async fn index() -> impl Responder {
    HttpResponse::Ok().json(json!({ "message": "Welcome to PickChef API" }))
}

/// Process liveness only; never touches the store.
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({ "status": "healthy" }))
}

/// Shorthand for handing state to handler tests and the binary.
pub fn state(repo: impl RecipeRepo + 'static) -> web::Data<AppState> {
    web::Data::new(AppState { repo: Box::new(repo) })
}
