use crate::models;
use sqlx::PgPool;
use tracing::Instrument;

pub async fn fetch(pool: &PgPool, id: i32) -> Result<Option<models::Category>, String> {
    let query_span = tracing::info_span!("Fetch category by id.");
    sqlx::query_as::<_, models::Category>("SELECT * FROM category WHERE id = $1 LIMIT 1")
        .bind(id)
        .fetch_optional(pool)
        .instrument(query_span)
        .await
        .map_err(|err| {
            tracing::error!("Failed to fetch category, error: {:?}", err);
            "Could not fetch data".to_string()
        })
}

pub async fn fetch_all(pool: &PgPool) -> Result<Vec<models::Category>, String> {
    let query_span = tracing::info_span!("Fetch all categories.");
    sqlx::query_as::<_, models::Category>("SELECT * FROM category ORDER BY name")
        .fetch_all(pool)
        .instrument(query_span)
        .await
        .map_err(|err| {
            tracing::error!("Failed to fetch categories, error: {:?}", err);
            "Could not fetch data".to_string()
        })
}

pub async fn fetch_by_name(pool: &PgPool, name: &str) -> Result<Option<models::Category>, String> {
    let query_span = tracing::info_span!("Fetch category by name.");
    sqlx::query_as::<_, models::Category>("SELECT * FROM category WHERE name = $1 LIMIT 1")
        .bind(name)
        .fetch_optional(pool)
        .instrument(query_span)
        .await
        .map_err(|err| {
            tracing::error!("Failed to fetch category, error: {:?}", err);
            "Could not fetch data".to_string()
        })
}

pub async fn insert(pool: &PgPool, name: &str) -> Result<models::Category, String> {
    let query_span = tracing::info_span!("Saving new category into the database");
    sqlx::query_as::<_, models::Category>(
        "INSERT INTO category (name, created_at, updated_at) VALUES ($1, NOW(), NOW()) \
         RETURNING *",
    )
    .bind(name)
    .fetch_one(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to execute query: {:?}", err);
        "Failed to insert".to_string()
    })
}

pub async fn update(
    pool: &PgPool,
    id: i32,
    name: &str,
) -> Result<Option<models::Category>, String> {
    let query_span = tracing::info_span!("Updating category");
    sqlx::query_as::<_, models::Category>(
        "UPDATE category SET name = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(name)
    .fetch_optional(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to execute query: {:?}", err);
        "Failed to update".to_string()
    })
}

pub async fn delete(pool: &PgPool, id: i32) -> Result<bool, String> {
    let query_span = tracing::info_span!("Delete category.");
    sqlx::query("DELETE FROM category WHERE id = $1")
        .bind(id)
        .execute(pool)
        .instrument(query_span)
        .await
        .map(|result| result.rows_affected() > 0)
        .map_err(|err| {
            tracing::error!("Failed to execute query: {:?}", err);
            "Failed to delete".to_string()
        })
}
