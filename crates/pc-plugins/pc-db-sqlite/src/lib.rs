//! # pc-db-sqlite Implementation
//!
//! This crate implements the `RecipeRepo` port on SQLite using raw,
//! parameterized queries. Rows are mapped to pc-core records in `rows`.
//!
//! Every trait method acquires one pooled connection (or one transaction) for
//! its whole duration; the connection goes back to the pool when dropped.

mod ingredients;
mod ratings;
mod recipes;
mod rows;
mod schema;

use std::str::FromStr;

use async_trait::async_trait;
use pc_core::models::{Ingredient, Rating, RecipeDetail};
use pc_core::schemas::{
    IngredientCreate, IngredientUpdate, RatingCreate, RecipeCreate, RecipeUpdate,
};
use pc_core::traits::RecipeRepo;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

/// Upper bound on ids bound into one `IN (...)` list; SQLite caps bind parameters.
pub(crate) const CHUNK_SIZE: usize = 500;

pub struct SqliteRecipeRepo {
    pool: SqlitePool,
}

impl SqliteRecipeRepo {
    /// Connects to `url` (e.g. `sqlite:pickchef.db`), creating the file if needed,
    /// and makes sure the tables exist.
    pub async fn new(url: &str, max_connections: u32) -> anyhow::Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        let repo = Self { pool };
        repo.init_schema().await?;
        Ok(repo)
    }

    /// A private in-memory database. Pinned to a single connection that never
    /// expires, since each SQLite memory connection is its own database.
    pub async fn in_memory() -> anyhow::Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        let repo = Self { pool };
        repo.init_schema().await?;
        Ok(repo)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Creates the four tables (and their indexes) if they are missing.
    pub async fn init_schema(&self) -> anyhow::Result<()> {
        for statement in schema::CREATE_TABLES {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        log::debug!("database schema ready");
        Ok(())
    }
}

#[async_trait]
impl RecipeRepo for SqliteRecipeRepo {
    async fn get_ingredient(&self, id: i64) -> anyhow::Result<Option<Ingredient>> {
        let mut conn = self.pool.acquire().await?;
        Ok(ingredients::get(&mut conn, id).await?)
    }

    async fn get_ingredient_by_name(&self, name: &str) -> anyhow::Result<Option<Ingredient>> {
        let mut conn = self.pool.acquire().await?;
        Ok(ingredients::get_by_name(&mut conn, name).await?)
    }

    async fn list_ingredients(&self, skip: i64, limit: i64) -> anyhow::Result<Vec<Ingredient>> {
        let mut conn = self.pool.acquire().await?;
        Ok(ingredients::list(&mut conn, skip, limit).await?)
    }

    async fn create_ingredient(&self, data: IngredientCreate) -> anyhow::Result<Ingredient> {
        // Insert and rowid read-back must share this connection.
        let mut conn = self.pool.acquire().await?;
        Ok(ingredients::create(&mut conn, &data).await?)
    }

    async fn update_ingredient(
        &self,
        id: i64,
        patch: IngredientUpdate,
    ) -> anyhow::Result<Option<Ingredient>> {
        let mut conn = self.pool.acquire().await?;
        Ok(ingredients::update(&mut conn, id, patch).await?)
    }

    async fn delete_ingredient(&self, id: i64) -> anyhow::Result<bool> {
        let mut conn = self.pool.acquire().await?;
        Ok(ingredients::delete(&mut conn, id).await?)
    }

    async fn is_ingredient_referenced(&self, id: i64) -> anyhow::Result<bool> {
        let mut conn = self.pool.acquire().await?;
        Ok(ingredients::is_referenced(&mut conn, id).await?)
    }

    async fn get_recipe(&self, id: i64) -> anyhow::Result<Option<RecipeDetail>> {
        let mut conn = self.pool.acquire().await?;
        Ok(recipes::get_detail(&mut conn, id).await?)
    }

    async fn recipe_exists(&self, id: i64) -> anyhow::Result<bool> {
        let mut conn = self.pool.acquire().await?;
        Ok(recipes::exists(&mut conn, id).await?)
    }

    async fn list_recipes(&self, skip: i64, limit: i64) -> anyhow::Result<Vec<RecipeDetail>> {
        let mut conn = self.pool.acquire().await?;
        Ok(recipes::list_details(&mut conn, skip, limit).await?)
    }

    /// Atomic operation to create a recipe and its line items.
    ///
    /// # Developer Note
    /// Using a Transaction (tx) ensures we don't end up with a recipe that is
    /// missing some of its ingredients if a later insert fails.
    async fn create_recipe(&self, data: RecipeCreate) -> anyhow::Result<RecipeDetail> {
        let mut tx = self.pool.begin().await?;

        let id = recipes::create(&mut tx, &data).await?;
        let detail = recipes::get_detail(&mut tx, id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;

        tx.commit().await?;
        log::debug!("recipe {} stored with {} line item(s)", id, detail.ingredients.len());
        Ok(detail)
    }

    async fn update_recipe(
        &self,
        id: i64,
        patch: RecipeUpdate,
    ) -> anyhow::Result<Option<RecipeDetail>> {
        let mut conn = self.pool.acquire().await?;
        Ok(recipes::update(&mut conn, id, patch).await?)
    }

    async fn delete_recipe(&self, id: i64) -> anyhow::Result<bool> {
        let mut tx = self.pool.begin().await?;
        let deleted = recipes::delete(&mut tx, id).await?;
        tx.commit().await?;
        Ok(deleted)
    }

    async fn list_ratings_for_recipe(&self, recipe_id: i64) -> anyhow::Result<Vec<Rating>> {
        let mut conn = self.pool.acquire().await?;
        Ok(ratings::list_for_recipe(&mut conn, recipe_id).await?)
    }

    async fn create_rating(&self, recipe_id: i64, data: RatingCreate) -> anyhow::Result<Rating> {
        let mut conn = self.pool.acquire().await?;
        Ok(ratings::create(&mut conn, recipe_id, &data).await?)
    }

    async fn get_rating(&self, id: i64) -> anyhow::Result<Option<Rating>> {
        let mut conn = self.pool.acquire().await?;
        Ok(ratings::get(&mut conn, id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pc_core::models::Difficulty;
    use pc_core::schemas::RecipeIngredientCreate;

    fn flour() -> IngredientCreate {
        IngredientCreate {
            name: "Flour".into(),
            category: "Baking".into(),
            unit: "grams".into(),
        }
    }

    fn ingredient(name: &str) -> IngredientCreate {
        IngredientCreate {
            name: name.into(),
            category: "Pantry".into(),
            unit: "pcs".into(),
        }
    }

    fn recipe_with(items: Vec<RecipeIngredientCreate>) -> RecipeCreate {
        RecipeCreate {
            title: "Bread".into(),
            description: Some("Simple loaf".into()),
            instructions: "Knead and bake.".into(),
            cooking_time: Some(45),
            difficulty: Difficulty::Hard,
            servings: 2,
            image_url: None,
            ingredients: items,
        }
    }

    async fn count(repo: &SqliteRecipeRepo, table: &str) -> i64 {
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(repo.pool())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_and_get_ingredient() {
        let repo = SqliteRecipeRepo::in_memory().await.unwrap();

        let created = repo.create_ingredient(flour()).await.unwrap();
        let fetched = repo.get_ingredient(created.id).await.unwrap();

        assert_eq!(fetched, Some(created.clone()));
        assert_eq!(created.name, "Flour");
        assert_eq!(
            repo.get_ingredient_by_name("Flour").await.unwrap().map(|i| i.id),
            Some(created.id)
        );
        assert!(repo.get_ingredient_by_name("flour").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_name_is_rejected_by_store() {
        let repo = SqliteRecipeRepo::in_memory().await.unwrap();
        repo.create_ingredient(flour()).await.unwrap();

        assert!(repo.create_ingredient(flour()).await.is_err());
        assert_eq!(count(&repo, "ingredients").await, 1);
    }

    #[tokio::test]
    async fn test_list_ingredients_paginates_by_id() {
        let repo = SqliteRecipeRepo::in_memory().await.unwrap();
        for name in ["a", "b", "c", "d", "e"] {
            repo.create_ingredient(ingredient(name)).await.unwrap();
        }

        let first = repo.list_ingredients(0, 2).await.unwrap();
        assert_eq!(first.iter().map(|i| i.name.as_str()).collect::<Vec<_>>(), ["a", "b"]);

        let last = repo.list_ingredients(4, 2).await.unwrap();
        assert_eq!(last.len(), 1);
        assert_eq!(last[0].name, "e");
    }

    #[tokio::test]
    async fn test_update_ingredient_patches_only_given_fields() {
        let repo = SqliteRecipeRepo::in_memory().await.unwrap();
        let created = repo.create_ingredient(flour()).await.unwrap();

        let unchanged = repo
            .update_ingredient(created.id, IngredientUpdate::default())
            .await
            .unwrap();
        assert_eq!(unchanged, Some(created.clone()));

        let patch = IngredientUpdate {
            category: Some("Staples".into()),
            ..Default::default()
        };
        let updated = repo.update_ingredient(created.id, patch).await.unwrap().unwrap();
        assert_eq!(updated.category, "Staples");
        assert_eq!(updated.name, created.name);
        assert_eq!(updated.unit, created.unit);
        assert_eq!(updated.created_at, created.created_at);

        let missing = repo
            .update_ingredient(999, IngredientUpdate { unit: Some("kg".into()), ..Default::default() })
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_delete_ingredient_reports_removal() {
        let repo = SqliteRecipeRepo::in_memory().await.unwrap();
        let created = repo.create_ingredient(flour()).await.unwrap();

        assert!(!repo.delete_ingredient(999).await.unwrap());
        assert_eq!(count(&repo, "ingredients").await, 1);

        assert!(repo.delete_ingredient(created.id).await.unwrap());
        assert!(repo.get_ingredient(created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_recipe_with_line_items() {
        let repo = SqliteRecipeRepo::in_memory().await.unwrap();
        let flour = repo.create_ingredient(flour()).await.unwrap();

        let detail = repo
            .create_recipe(recipe_with(vec![RecipeIngredientCreate {
                ingredient_id: flour.id,
                quantity: 2.5,
                unit: "cups".into(),
            }]))
            .await
            .unwrap();

        assert_eq!(detail.recipe.title, "Bread");
        assert_eq!(detail.recipe.difficulty, Difficulty::Hard);
        assert_eq!(detail.average_rating, 0.0);
        assert_eq!(detail.ingredients.len(), 1);
        assert_eq!(detail.ingredients[0].unit, "cups");
        assert_eq!(detail.ingredients[0].ingredient.as_ref(), Some(&flour));
        assert!(repo.is_ingredient_referenced(flour.id).await.unwrap());

        let fetched = repo.get_recipe(detail.recipe.id).await.unwrap();
        assert_eq!(fetched, Some(detail));
    }

    #[tokio::test]
    async fn test_failed_line_item_rolls_back_recipe() {
        let repo = SqliteRecipeRepo::in_memory().await.unwrap();

        // Foreign key violation on the line item aborts the whole transaction.
        let result = repo
            .create_recipe(recipe_with(vec![RecipeIngredientCreate {
                ingredient_id: 42,
                quantity: 1.0,
                unit: "cups".into(),
            }]))
            .await;

        assert!(result.is_err());
        assert_eq!(count(&repo, "recipes").await, 0);
        assert_eq!(count(&repo, "recipe_ingredients").await, 0);
    }

    #[tokio::test]
    async fn test_average_rating_and_rating_reads() {
        let repo = SqliteRecipeRepo::in_memory().await.unwrap();
        let recipe = repo.create_recipe(recipe_with(vec![])).await.unwrap();
        let id = recipe.recipe.id;

        let mut created = Vec::new();
        for score in [3, 4, 5] {
            let rating = repo
                .create_rating(id, RatingCreate { rating: score, comment: Some("ok".into()) })
                .await
                .unwrap();
            assert_eq!(repo.get_rating(rating.id).await.unwrap(), Some(rating.clone()));
            created.push(rating);
        }

        assert_eq!(repo.list_ratings_for_recipe(id).await.unwrap(), created);
        assert_eq!(repo.get_recipe(id).await.unwrap().unwrap().average_rating, 4.0);
        assert_eq!(repo.list_recipes(0, 10).await.unwrap()[0].average_rating, 4.0);
    }

    #[tokio::test]
    async fn test_update_recipe_clears_nullable_fields() {
        let repo = SqliteRecipeRepo::in_memory().await.unwrap();
        let created = repo.create_recipe(recipe_with(vec![])).await.unwrap();

        let patch = RecipeUpdate {
            description: Some(None),
            servings: Some(6),
            ..Default::default()
        };
        let updated = repo
            .update_recipe(created.recipe.id, patch)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.recipe.description, None);
        assert_eq!(updated.recipe.servings, 6);
        assert_eq!(updated.recipe.cooking_time, Some(45));
        assert_eq!(updated.recipe.title, created.recipe.title);
    }

    #[tokio::test]
    async fn test_delete_recipe_removes_children() {
        let repo = SqliteRecipeRepo::in_memory().await.unwrap();
        let flour = repo.create_ingredient(flour()).await.unwrap();
        let recipe = repo
            .create_recipe(recipe_with(vec![RecipeIngredientCreate {
                ingredient_id: flour.id,
                quantity: 1.0,
                unit: "cups".into(),
            }]))
            .await
            .unwrap();
        repo.create_rating(recipe.recipe.id, RatingCreate { rating: 5, comment: None })
            .await
            .unwrap();

        assert!(repo.delete_recipe(recipe.recipe.id).await.unwrap());
        assert!(!repo.recipe_exists(recipe.recipe.id).await.unwrap());
        assert_eq!(count(&repo, "recipe_ingredients").await, 0);
        assert_eq!(count(&repo, "ratings").await, 0);
        assert!(!repo.is_ingredient_referenced(flour.id).await.unwrap());
        assert!(!repo.delete_recipe(recipe.recipe.id).await.unwrap());
    }
}
