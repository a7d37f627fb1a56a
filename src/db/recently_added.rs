use crate::models;
use sqlx::PgPool;
use tracing::Instrument;

/// Most entries the feed retains.
pub const FEED_CAPACITY: i64 = 20;
/// Entries older than this are considered expired.
pub const FEED_TTL_SECONDS: i64 = 300;

/// Appends a feed entry, then evicts whatever the bounds no longer admit:
/// entries past the age horizon and entries beyond the newest
/// `FEED_CAPACITY`, whichever trips first. Eviction lives here so callers
/// never have to think about the feed's bounds.
pub async fn insert(pool: &PgPool, product_id: i32) -> Result<models::RecentlyAdded, String> {
    let query_span = tracing::info_span!("Appending recently-added feed entry");
    let entry = sqlx::query_as::<_, models::RecentlyAdded>(
        "INSERT INTO recently_added (product_id, created_at) VALUES ($1, NOW()) RETURNING *",
    )
    .bind(product_id)
    .fetch_one(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to execute query: {:?}", err);
        "Failed to insert".to_string()
    })?;

    evict(pool).await?;

    Ok(entry)
}

async fn evict(pool: &PgPool) -> Result<(), String> {
    let query_span = tracing::info_span!("Evicting expired feed entries");
    sqlx::query(
        r#"
        DELETE FROM recently_added
        WHERE created_at < NOW() - $1 * INTERVAL '1 second'
           OR id NOT IN (
                SELECT id FROM recently_added
                ORDER BY created_at DESC, id DESC
                LIMIT $2
           )
        "#,
    )
    .bind(FEED_TTL_SECONDS as f64)
    .bind(FEED_CAPACITY)
    .execute(pool)
    .instrument(query_span)
    .await
    .map(|_| ())
    .map_err(|err| {
        tracing::error!("Failed to evict feed entries: {:?}", err);
        "Failed to delete".to_string()
    })
}

/// The feed resolved to full product documents, newest insertion first.
/// Entries past the age horizon are filtered out at read time; they may
/// still be awaiting eviction.
pub async fn fetch_feed(pool: &PgPool) -> Result<Vec<models::Product>, String> {
    let query_span = tracing::info_span!("Fetch recently-added feed.");
    sqlx::query_as::<_, models::Product>(
        r#"
        SELECT p.*
        FROM recently_added r
        JOIN product p ON p.id = r.product_id
        WHERE r.created_at > NOW() - $1 * INTERVAL '1 second'
        ORDER BY r.created_at DESC, r.id DESC
        "#,
    )
    .bind(FEED_TTL_SECONDS as f64)
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch feed, error: {:?}", err);
        "Could not fetch data".to_string()
    })
}
