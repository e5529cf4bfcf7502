use chrono::Utc;
use pc_core::models::Ingredient;
use pc_core::schemas::{IngredientCreate, IngredientUpdate};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection};

use crate::rows::{self, SELECT_INGREDIENT};

pub(crate) async fn get(
    conn: &mut SqliteConnection,
    id: i64,
) -> Result<Option<Ingredient>, sqlx::Error> {
    let query = format!("{SELECT_INGREDIENT} WHERE id = ?");
    let row = sqlx::query(&query)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

    row.as_ref().map(rows::ingredient).transpose()
}

pub(crate) async fn get_by_name(
    conn: &mut SqliteConnection,
    name: &str,
) -> Result<Option<Ingredient>, sqlx::Error> {
    let query = format!("{SELECT_INGREDIENT} WHERE name = ?");
    let row = sqlx::query(&query)
        .bind(name)
        .fetch_optional(&mut *conn)
        .await?;

    row.as_ref().map(rows::ingredient).transpose()
}

pub(crate) async fn list(
    conn: &mut SqliteConnection,
    skip: i64,
    limit: i64,
) -> Result<Vec<Ingredient>, sqlx::Error> {
    let query = format!("{SELECT_INGREDIENT} ORDER BY id ASC LIMIT ? OFFSET ?");
    let found = sqlx::query(&query)
        .bind(limit)
        .bind(skip)
        .fetch_all(&mut *conn)
        .await?;

    found.iter().map(rows::ingredient).collect()
}

/// Inserts, then reads the row back through `last_insert_rowid()`.
///
/// The rowid belongs to `conn`, so both steps must use the same connection.
pub(crate) async fn create(
    conn: &mut SqliteConnection,
    data: &IngredientCreate,
) -> Result<Ingredient, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO ingredients (name, category, unit, created_at) VALUES (?, ?, ?, ?)",
    )
    .bind(&data.name)
    .bind(&data.category)
    .bind(&data.unit)
    .bind(Utc::now())
    .execute(&mut *conn)
    .await?;

    get(conn, result.last_insert_rowid())
        .await?
        .ok_or(sqlx::Error::RowNotFound)
}

/// Writes only the fields present in `patch`; an empty patch is a plain read.
pub(crate) async fn update(
    conn: &mut SqliteConnection,
    id: i64,
    patch: IngredientUpdate,
) -> Result<Option<Ingredient>, sqlx::Error> {
    if patch.is_empty() {
        return get(conn, id).await;
    }

    let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE ingredients SET ");
    {
        let mut set = builder.separated(", ");
        if let Some(name) = patch.name {
            set.push("name = ").push_bind_unseparated(name);
        }
        if let Some(category) = patch.category {
            set.push("category = ").push_bind_unseparated(category);
        }
        if let Some(unit) = patch.unit {
            set.push("unit = ").push_bind_unseparated(unit);
        }
    }
    builder.push(" WHERE id = ").push_bind(id);
    builder.build().execute(&mut *conn).await?;

    get(conn, id).await
}

pub(crate) async fn delete(conn: &mut SqliteConnection, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM ingredients WHERE id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub(crate) async fn is_referenced(
    conn: &mut SqliteConnection,
    id: i64,
) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM recipe_ingredients WHERE ingredient_id = ?)")
        .bind(id)
        .fetch_one(&mut *conn)
        .await
}
