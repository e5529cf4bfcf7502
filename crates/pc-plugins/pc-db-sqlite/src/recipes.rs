use std::collections::HashMap;

use chrono::Utc;
use pc_core::models::{Recipe, RecipeDetail, RecipeIngredientDetail};
use pc_core::schemas::{RecipeCreate, RecipeUpdate};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection};

use crate::rows::{self, SELECT_LINE_ITEM, SELECT_RECIPE};
use crate::{ratings, CHUNK_SIZE};

async fn get(conn: &mut SqliteConnection, id: i64) -> Result<Option<Recipe>, sqlx::Error> {
    let query = format!("{SELECT_RECIPE} WHERE id = ?");
    let row = sqlx::query(&query)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

    row.as_ref().map(rows::recipe).transpose()
}

pub(crate) async fn exists(conn: &mut SqliteConnection, id: i64) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM recipes WHERE id = ?)")
        .bind(id)
        .fetch_one(&mut *conn)
        .await
}

/// Line items (with joined ingredient) grouped by recipe id.
async fn line_items_for(
    conn: &mut SqliteConnection,
    recipe_ids: &[i64],
) -> Result<HashMap<i64, Vec<RecipeIngredientDetail>>, sqlx::Error> {
    let mut grouped: HashMap<i64, Vec<RecipeIngredientDetail>> = HashMap::new();

    for chunk in recipe_ids.chunks(CHUNK_SIZE) {
        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(SELECT_LINE_ITEM);
        builder.push(" WHERE ri.recipe_id IN (");
        {
            let mut ids = builder.separated(", ");
            for id in chunk {
                ids.push_bind(*id);
            }
        }
        builder.push(") ORDER BY ri.id ASC");

        for row in builder.build().fetch_all(&mut *conn).await? {
            let (item, ingredient) = rows::line_item(&row)?;
            grouped
                .entry(item.recipe_id)
                .or_default()
                .push(RecipeIngredientDetail::new(item, ingredient));
        }
    }

    Ok(grouped)
}

/// Loads line items and rating scores for `recipes` and assembles the responses.
async fn assemble(
    conn: &mut SqliteConnection,
    recipes: Vec<Recipe>,
) -> Result<Vec<RecipeDetail>, sqlx::Error> {
    let ids: Vec<i64> = recipes.iter().map(|r| r.id).collect();
    let mut items = line_items_for(conn, &ids).await?;
    let scores = ratings::scores_for(conn, &ids).await?;

    Ok(recipes
        .into_iter()
        .map(|recipe| {
            let ingredients = items.remove(&recipe.id).unwrap_or_default();
            let recipe_scores = scores.get(&recipe.id).map(Vec::as_slice).unwrap_or(&[]);
            RecipeDetail::assemble(recipe, ingredients, recipe_scores)
        })
        .collect())
}

pub(crate) async fn get_detail(
    conn: &mut SqliteConnection,
    id: i64,
) -> Result<Option<RecipeDetail>, sqlx::Error> {
    let Some(recipe) = get(conn, id).await? else {
        return Ok(None);
    };
    Ok(assemble(conn, vec![recipe]).await?.pop())
}

pub(crate) async fn list_details(
    conn: &mut SqliteConnection,
    skip: i64,
    limit: i64,
) -> Result<Vec<RecipeDetail>, sqlx::Error> {
    let query = format!("{SELECT_RECIPE} ORDER BY id ASC LIMIT ? OFFSET ?");
    let recipes = sqlx::query(&query)
        .bind(limit)
        .bind(skip)
        .fetch_all(&mut *conn)
        .await?
        .iter()
        .map(rows::recipe)
        .collect::<Result<Vec<_>, _>>()?;

    assemble(conn, recipes).await
}

/// Inserts the recipe row and its line items, returning the new recipe id.
///
/// Callers pass a transaction so that a failing line item leaves no recipe behind.
pub(crate) async fn create(
    conn: &mut SqliteConnection,
    data: &RecipeCreate,
) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO recipes (title, description, instructions, cooking_time, difficulty,
                             servings, image_url, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&data.title)
    .bind(&data.description)
    .bind(&data.instructions)
    .bind(data.cooking_time)
    .bind(data.difficulty.as_str())
    .bind(data.servings)
    .bind(&data.image_url)
    .bind(Utc::now())
    .execute(&mut *conn)
    .await?;

    let recipe_id = result.last_insert_rowid();

    for item in &data.ingredients {
        sqlx::query(
            "INSERT INTO recipe_ingredients (recipe_id, ingredient_id, quantity, unit) VALUES (?, ?, ?, ?)",
        )
        .bind(recipe_id)
        .bind(item.ingredient_id)
        .bind(item.quantity)
        .bind(&item.unit)
        .execute(&mut *conn)
        .await?;
    }

    Ok(recipe_id)
}

pub(crate) async fn update(
    conn: &mut SqliteConnection,
    id: i64,
    patch: RecipeUpdate,
) -> Result<Option<RecipeDetail>, sqlx::Error> {
    if patch.is_empty() {
        return get_detail(conn, id).await;
    }

    let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE recipes SET ");
    {
        let mut set = builder.separated(", ");
        if let Some(title) = patch.title {
            set.push("title = ").push_bind_unseparated(title);
        }
        if let Some(description) = patch.description {
            set.push("description = ").push_bind_unseparated(description);
        }
        if let Some(instructions) = patch.instructions {
            set.push("instructions = ").push_bind_unseparated(instructions);
        }
        if let Some(cooking_time) = patch.cooking_time {
            set.push("cooking_time = ").push_bind_unseparated(cooking_time);
        }
        if let Some(difficulty) = patch.difficulty {
            set.push("difficulty = ").push_bind_unseparated(difficulty.as_str());
        }
        if let Some(servings) = patch.servings {
            set.push("servings = ").push_bind_unseparated(servings);
        }
        if let Some(image_url) = patch.image_url {
            set.push("image_url = ").push_bind_unseparated(image_url);
        }
    }
    builder.push(" WHERE id = ").push_bind(id);
    builder.build().execute(&mut *conn).await?;

    get_detail(conn, id).await
}

/// Removes line items, ratings and the recipe row. Run inside a transaction.
pub(crate) async fn delete(conn: &mut SqliteConnection, id: i64) -> Result<bool, sqlx::Error> {
    sqlx::query("DELETE FROM recipe_ingredients WHERE recipe_id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    sqlx::query("DELETE FROM ratings WHERE recipe_id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    let result = sqlx::query("DELETE FROM recipes WHERE id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    Ok(result.rows_affected() > 0)
}
