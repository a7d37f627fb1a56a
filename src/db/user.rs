use crate::models;
use sqlx::PgPool;
use tracing::Instrument;

pub async fn fetch(pool: &PgPool, id: i32) -> Result<Option<models::User>, String> {
    let query_span = tracing::info_span!("Fetch user by id.");
    sqlx::query_as::<_, models::User>("SELECT * FROM users WHERE id = $1 LIMIT 1")
        .bind(id)
        .fetch_optional(pool)
        .instrument(query_span)
        .await
        .map_err(|err| {
            tracing::error!("Failed to fetch user, error: {:?}", err);
            "Could not fetch data".to_string()
        })
}

pub async fn fetch_by_email(pool: &PgPool, email: &str) -> Result<Option<models::User>, String> {
    let query_span = tracing::info_span!("Fetch user by email.");
    sqlx::query_as::<_, models::User>("SELECT * FROM users WHERE email = $1 LIMIT 1")
        .bind(email)
        .fetch_optional(pool)
        .instrument(query_span)
        .await
        .map_err(|err| {
            tracing::error!("Failed to fetch user, error: {:?}", err);
            "Could not fetch data".to_string()
        })
}

pub async fn fetch_by_verification_token(
    pool: &PgPool,
    token: &str,
) -> Result<Option<models::User>, String> {
    let query_span = tracing::info_span!("Fetch user by verification token.");
    sqlx::query_as::<_, models::User>(
        "SELECT * FROM users WHERE verification_token = $1 LIMIT 1",
    )
    .bind(token)
    .fetch_optional(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch user, error: {:?}", err);
        "Could not fetch data".to_string()
    })
}

pub async fn fetch_all(pool: &PgPool) -> Result<Vec<models::User>, String> {
    let query_span = tracing::info_span!("Fetch all users.");
    sqlx::query_as::<_, models::User>("SELECT * FROM users ORDER BY id")
        .fetch_all(pool)
        .instrument(query_span)
        .await
        .map_err(|err| {
            tracing::error!("Failed to fetch users, error: {:?}", err);
            "Could not fetch data".to_string()
        })
}

pub async fn count_admins(pool: &PgPool) -> Result<i64, String> {
    let query_span = tracing::info_span!("Count administrator accounts.");
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE is_admin = TRUE")
        .fetch_one(pool)
        .instrument(query_span)
        .await
        .map_err(|err| {
            tracing::error!("Failed to count admins, error: {:?}", err);
            "Could not fetch data".to_string()
        })
}

pub async fn insert(pool: &PgPool, user: models::User) -> Result<models::User, String> {
    let query_span = tracing::info_span!("Saving new user into the database");
    sqlx::query_as::<_, models::User>(
        r#"
        INSERT INTO users (name, email, password_hash, is_admin, is_verified,
            verification_token, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, NOW(), NOW())
        RETURNING *
        "#,
    )
    .bind(&user.name)
    .bind(&user.email)
    .bind(&user.password_hash)
    .bind(user.is_admin)
    .bind(user.is_verified)
    .bind(&user.verification_token)
    .fetch_one(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to execute query: {:?}", err);
        "Failed to insert".to_string()
    })
}

pub async fn update(pool: &PgPool, user: &models::User) -> Result<models::User, String> {
    let query_span = tracing::info_span!("Updating user");
    sqlx::query_as::<_, models::User>(
        r#"
        UPDATE users
        SET
            name = $2,
            email = $3,
            password_hash = $4,
            is_admin = $5,
            is_verified = $6,
            verification_token = $7,
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(user.id)
    .bind(&user.name)
    .bind(&user.email)
    .bind(&user.password_hash)
    .bind(user.is_admin)
    .bind(user.is_verified)
    .bind(&user.verification_token)
    .fetch_one(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to execute query: {:?}", err);
        "Failed to update".to_string()
    })
}

pub async fn delete(pool: &PgPool, id: i32) -> Result<bool, String> {
    let query_span = tracing::info_span!("Delete user.");
    sqlx::query("DELETE FROM users WHERE id = $1")
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
