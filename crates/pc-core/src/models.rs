//! # Domain Models
//!
//! These structs represent the stored entities of PickChef and the shapes
//! returned to API clients. Identifiers are store-assigned integers.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How hard a recipe is to cook. Stored as lowercase text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown difficulty '{0}'")]
pub struct UnknownDifficulty(pub String);

impl FromStr for Difficulty {
    type Err = UnknownDifficulty;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(UnknownDifficulty(other.to_string())),
        }
    }
}

/// A pantry item that recipes can reference (e.g. "Flour", measured in grams).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: i64,
    /// Unique across the store
    pub name: String,
    pub category: String,
    /// Canonical unit for this ingredient
    pub unit: String,
    pub created_at: DateTime<Utc>,
}

/// A stored recipe row without its line items or ratings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub instructions: String,
    /// Minutes
    pub cooking_time: Option<i64>,
    pub difficulty: Difficulty,
    pub servings: i64,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// One line of a recipe's ingredient list.
///
/// `unit` may differ from the ingredient's own unit (cups vs grams).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeIngredient {
    pub id: i64,
    pub recipe_id: i64,
    pub ingredient_id: i64,
    pub quantity: f64,
    pub unit: String,
}

/// A user's score for a recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub id: i64,
    pub recipe_id: i64,
    /// 1 to 5 inclusive
    pub rating: i64,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A line item as returned to clients, carrying the joined ingredient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeIngredientDetail {
    pub id: i64,
    pub ingredient_id: i64,
    pub quantity: f64,
    pub unit: String,
    pub ingredient: Option<Ingredient>,
}

impl RecipeIngredientDetail {
    pub fn new(item: RecipeIngredient, ingredient: Option<Ingredient>) -> Self {
        Self {
            id: item.id,
            ingredient_id: item.ingredient_id,
            quantity: item.quantity,
            unit: item.unit,
            ingredient,
        }
    }
}

/// The full recipe response: stored fields, line items and the derived
/// `average_rating`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeDetail {
    #[serde(flatten)]
    pub recipe: Recipe,
    pub ingredients: Vec<RecipeIngredientDetail>,
    pub average_rating: f64,
}

impl RecipeDetail {
    /// Assembles the response shape. The average is computed here and never stored.
    pub fn assemble(
        recipe: Recipe,
        ingredients: Vec<RecipeIngredientDetail>,
        ratings: &[i64],
    ) -> Self {
        Self {
            recipe,
            ingredients,
            average_rating: average_rating(ratings),
        }
    }
}

/// Arithmetic mean of the scores, or `0.0` when there are none.
pub fn average_rating(scores: &[i64]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    scores.iter().sum::<i64>() as f64 / scores.len() as f64
}
