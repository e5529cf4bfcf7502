//! # Payload Schemas
//!
//! Accepted shapes of inbound payloads. Every rule is checked before any store
//! access and all failing fields are reported together.
//!
//! Update shapes are patches: `None` means "leave untouched". Columns that are
//! nullable in the store use `Option<Option<T>>` so that an explicit JSON
//! `null` (clear the value) can be told apart from an absent key.

use garde::Validate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{AppError, Result};
use crate::models::Difficulty;

pub const DEFAULT_PAGE_LIMIT: i64 = 100;

/// Runs the declared rules and converts a failed report into `AppError::Validation`.
pub fn validate_payload<T>(payload: &T) -> Result<()>
where
    T: Validate,
    T::Context: Default,
{
    payload.validate().map_err(AppError::from)
}

/// Maps a present key to `Some`, so a `null` value becomes `Some(None)`.
/// Paired with `#[serde(default)]`, an absent key stays `None`.
fn present<'de, T, D>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

fn positive(value: &f64, _ctx: &()) -> garde::Result {
    if *value > 0.0 {
        Ok(())
    } else {
        Err(garde::Error::new("must be greater than 0"))
    }
}

fn positive_if_set(value: &Option<Option<i64>>, _ctx: &()) -> garde::Result {
    match value {
        Some(Some(v)) if *v <= 0 => Err(garde::Error::new("must be greater than 0")),
        _ => Ok(()),
    }
}

fn image_url_if_set(value: &Option<Option<String>>, _ctx: &()) -> garde::Result {
    match value {
        Some(Some(url)) if url.chars().count() > 500 => {
            Err(garde::Error::new("length is greater than 500"))
        }
        _ => Ok(()),
    }
}

/// `?skip=&limit=` query parameters of list endpoints.
#[derive(Debug, Clone, Copy, Deserialize, Validate)]
pub struct Pagination {
    #[serde(default)]
    #[garde(range(min = 0))]
    pub skip: i64,
    #[serde(default = "default_limit")]
    #[garde(range(min = 0))]
    pub limit: i64,
}

fn default_limit() -> i64 {
    DEFAULT_PAGE_LIMIT
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

// Ingredients

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct IngredientCreate {
    #[garde(length(chars, min = 1, max = 100))]
    pub name: String,
    #[garde(length(chars, min = 1, max = 50))]
    pub category: String,
    #[garde(length(chars, min = 1, max = 20))]
    pub unit: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct IngredientUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[garde(length(chars, min = 1, max = 100))]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[garde(length(chars, min = 1, max = 50))]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[garde(length(chars, min = 1, max = 20))]
    pub unit: Option<String>,
}

impl IngredientUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.category.is_none() && self.unit.is_none()
    }
}

// Recipes

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecipeIngredientCreate {
    #[garde(range(min = 1))]
    pub ingredient_id: i64,
    #[garde(custom(positive))]
    pub quantity: f64,
    #[garde(length(chars, min = 1, max = 20))]
    pub unit: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecipeCreate {
    #[garde(length(chars, min = 1, max = 200))]
    pub title: String,
    #[serde(default)]
    #[garde(skip)]
    pub description: Option<String>,
    #[garde(length(chars, min = 1))]
    pub instructions: String,
    #[serde(default)]
    #[garde(range(min = 1))]
    pub cooking_time: Option<i64>,
    #[serde(default)]
    #[garde(skip)]
    pub difficulty: Difficulty,
    #[serde(default = "default_servings")]
    #[garde(range(min = 1))]
    pub servings: i64,
    #[serde(default)]
    #[garde(length(chars, max = 500))]
    pub image_url: Option<String>,
    #[serde(default)]
    #[garde(dive)]
    pub ingredients: Vec<RecipeIngredientCreate>,
}

fn default_servings() -> i64 {
    1
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct RecipeUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[garde(length(chars, min = 1, max = 200))]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    #[garde(skip)]
    pub description: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[garde(length(chars, min = 1))]
    pub instructions: Option<String>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    #[garde(custom(positive_if_set))]
    pub cooking_time: Option<Option<i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[garde(skip)]
    pub difficulty: Option<Difficulty>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[garde(range(min = 1))]
    pub servings: Option<i64>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    #[garde(custom(image_url_if_set))]
    pub image_url: Option<Option<String>>,
}

impl RecipeUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.instructions.is_none()
            && self.cooking_time.is_none()
            && self.difficulty.is_none()
            && self.servings.is_none()
            && self.image_url.is_none()
    }
}

// Ratings

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RatingCreate {
    #[garde(range(min = 1, max = 5))]
    pub rating: i64,
    #[serde(default)]
    #[garde(skip)]
    pub comment: Option<String>,
}
