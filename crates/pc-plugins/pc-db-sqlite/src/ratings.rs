use std::collections::HashMap;

use chrono::Utc;
use pc_core::models::Rating;
use pc_core::schemas::RatingCreate;
use sqlx::{QueryBuilder, Row, Sqlite, SqliteConnection};

use crate::rows::{self, SELECT_RATING};
use crate::CHUNK_SIZE;

pub(crate) async fn get(conn: &mut SqliteConnection, id: i64) -> Result<Option<Rating>, sqlx::Error> {
    let query = format!("{SELECT_RATING} WHERE id = ?");
    let row = sqlx::query(&query)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

    row.as_ref().map(rows::rating).transpose()
}

pub(crate) async fn list_for_recipe(
    conn: &mut SqliteConnection,
    recipe_id: i64,
) -> Result<Vec<Rating>, sqlx::Error> {
    let query = format!("{SELECT_RATING} WHERE recipe_id = ? ORDER BY id ASC");
    let found = sqlx::query(&query)
        .bind(recipe_id)
        .fetch_all(&mut *conn)
        .await?;

    found.iter().map(rows::rating).collect()
}

/// Same insert-then-read-back pattern as ingredients, on a single connection.
pub(crate) async fn create(
    conn: &mut SqliteConnection,
    recipe_id: i64,
    data: &RatingCreate,
) -> Result<Rating, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO ratings (recipe_id, rating, comment, created_at) VALUES (?, ?, ?, ?)",
    )
    .bind(recipe_id)
    .bind(data.rating)
    .bind(&data.comment)
    .bind(Utc::now())
    .execute(&mut *conn)
    .await?;

    get(conn, result.last_insert_rowid())
        .await?
        .ok_or(sqlx::Error::RowNotFound)
}

/// Rating scores grouped by recipe, for computing averages of a whole page.
pub(crate) async fn scores_for(
    conn: &mut SqliteConnection,
    recipe_ids: &[i64],
) -> Result<HashMap<i64, Vec<i64>>, sqlx::Error> {
    let mut grouped: HashMap<i64, Vec<i64>> = HashMap::new();

    for chunk in recipe_ids.chunks(CHUNK_SIZE) {
        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new("SELECT recipe_id, rating FROM ratings WHERE recipe_id IN (");
        {
            let mut ids = builder.separated(", ");
            for id in chunk {
                ids.push_bind(*id);
            }
        }
        builder.push(")");

        for row in builder.build().fetch_all(&mut *conn).await? {
            let recipe_id: i64 = row.try_get("recipe_id")?;
            grouped
                .entry(recipe_id)
                .or_default()
                .push(row.try_get("rating")?);
        }
    }

    Ok(grouped)
}
