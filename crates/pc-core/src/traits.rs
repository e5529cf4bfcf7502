//! # Core Traits (Ports)
//!
//! Any persistence plugin must implement these traits to be used by the binary.

use async_trait::async_trait;

use crate::models::{Ingredient, Rating, RecipeDetail};
use crate::schemas::{IngredientCreate, IngredientUpdate, RatingCreate, RecipeCreate, RecipeUpdate};

/// Data persistence contract for ingredients, recipes, and ratings.
///
/// Implementations issue the store calls and hand back plain records. They do
/// not translate store failures; those surface as `anyhow::Error`.
#[async_trait]
pub trait RecipeRepo: Send + Sync {
    // Ingredient Operations
    async fn get_ingredient(&self, id: i64) -> anyhow::Result<Option<Ingredient>>;
    async fn get_ingredient_by_name(&self, name: &str) -> anyhow::Result<Option<Ingredient>>;
    async fn list_ingredients(&self, skip: i64, limit: i64) -> anyhow::Result<Vec<Ingredient>>;
    /// Inserts and returns the row as read back from the store.
    async fn create_ingredient(&self, data: IngredientCreate) -> anyhow::Result<Ingredient>;
    /// Applies only the fields present in `patch`. An empty patch writes nothing.
    async fn update_ingredient(
        &self,
        id: i64,
        patch: IngredientUpdate,
    ) -> anyhow::Result<Option<Ingredient>>;
    /// Returns whether a row was actually removed.
    async fn delete_ingredient(&self, id: i64) -> anyhow::Result<bool>;
    /// Whether any recipe line item points at this ingredient.
    async fn is_ingredient_referenced(&self, id: i64) -> anyhow::Result<bool>;

    // Recipe Operations
    async fn get_recipe(&self, id: i64) -> anyhow::Result<Option<RecipeDetail>>;
    async fn recipe_exists(&self, id: i64) -> anyhow::Result<bool>;
    async fn list_recipes(&self, skip: i64, limit: i64) -> anyhow::Result<Vec<RecipeDetail>>;
    /// Inserts the recipe and all of its line items atomically.
    async fn create_recipe(&self, data: RecipeCreate) -> anyhow::Result<RecipeDetail>;
    async fn update_recipe(
        &self,
        id: i64,
        patch: RecipeUpdate,
    ) -> anyhow::Result<Option<RecipeDetail>>;
    /// Removes the recipe together with its line items and ratings.
    async fn delete_recipe(&self, id: i64) -> anyhow::Result<bool>;

    // Rating Operations
    async fn list_ratings_for_recipe(&self, recipe_id: i64) -> anyhow::Result<Vec<Rating>>;
    async fn create_rating(&self, recipe_id: i64, data: RatingCreate) -> anyhow::Result<Rating>;
    async fn get_rating(&self, id: i64) -> anyhow::Result<Option<Rating>>;
}
