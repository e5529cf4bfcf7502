//! Row-to-record mapping.
//!
//! Pure functions from a generic `SqliteRow` to the pc-core records. Nothing
//! here issues queries, so the store can be swapped without touching callers.

use pc_core::models::{Difficulty, Ingredient, Rating, Recipe, RecipeIngredient};
use sqlx::{sqlite::SqliteRow, Row};

pub(crate) const SELECT_INGREDIENT: &str =
    "SELECT id, name, category, unit, created_at FROM ingredients";

pub(crate) const SELECT_RECIPE: &str = r#"
    SELECT id, title, description, instructions, cooking_time, difficulty,
           servings, image_url, created_at
    FROM recipes
"#;

pub(crate) const SELECT_RATING: &str =
    "SELECT id, recipe_id, rating, comment, created_at FROM ratings";

/// Line items with their ingredient joined under an `i_` prefix.
pub(crate) const SELECT_LINE_ITEM: &str = r#"
    SELECT ri.id, ri.recipe_id, ri.ingredient_id, ri.quantity, ri.unit,
           i.id AS i_id, i.name AS i_name, i.category AS i_category,
           i.unit AS i_unit, i.created_at AS i_created_at
    FROM recipe_ingredients ri
    LEFT JOIN ingredients i ON i.id = ri.ingredient_id
"#;

pub(crate) fn ingredient(row: &SqliteRow) -> Result<Ingredient, sqlx::Error> {
    Ok(Ingredient {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        category: row.try_get("category")?,
        unit: row.try_get("unit")?,
        created_at: row.try_get("created_at")?,
    })
}

pub(crate) fn recipe(row: &SqliteRow) -> Result<Recipe, sqlx::Error> {
    let difficulty: String = row.try_get("difficulty")?;
    let difficulty = difficulty
        .parse::<Difficulty>()
        .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;

    Ok(Recipe {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        instructions: row.try_get("instructions")?,
        cooking_time: row.try_get("cooking_time")?,
        difficulty,
        servings: row.try_get("servings")?,
        image_url: row.try_get("image_url")?,
        created_at: row.try_get("created_at")?,
    })
}

pub(crate) fn rating(row: &SqliteRow) -> Result<Rating, sqlx::Error> {
    Ok(Rating {
        id: row.try_get("id")?,
        recipe_id: row.try_get("recipe_id")?,
        rating: row.try_get("rating")?,
        comment: row.try_get("comment")?,
        created_at: row.try_get("created_at")?,
    })
}

/// Maps a `SELECT_LINE_ITEM` row. The ingredient is `None` if the join found nothing.
pub(crate) fn line_item(
    row: &SqliteRow,
) -> Result<(RecipeIngredient, Option<Ingredient>), sqlx::Error> {
    let item = RecipeIngredient {
        id: row.try_get("id")?,
        recipe_id: row.try_get("recipe_id")?,
        ingredient_id: row.try_get("ingredient_id")?,
        quantity: row.try_get("quantity")?,
        unit: row.try_get("unit")?,
    };

    let joined = match row.try_get::<Option<i64>, _>("i_id")? {
        Some(id) => Some(Ingredient {
            id,
            name: row.try_get("i_name")?,
            category: row.try_get("i_category")?,
            unit: row.try_get("i_unit")?,
            created_at: row.try_get("i_created_at")?,
        }),
        None => None,
    };

    Ok((item, joined))
}
