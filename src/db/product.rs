use crate::models;
use crate::views;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::Instrument;

/// Promotional price when the promotion is active, list price otherwise.
/// Price filters and price sorting both run against this expression.
const EFFECTIVE_PRICE: &str = "CASE WHEN p.is_promotional AND p.promotional_price IS NOT NULL \
     THEN p.promotional_price ELSE p.price END";

/// Select list + join resolving the product's category; left join so a
/// dangling category reference never drops the product.
const WITH_CATEGORY: &str = "p.*, \
     c.id AS category_detail_id, \
     c.name AS category_detail_name, \
     c.created_at AS category_detail_created_at, \
     c.updated_at AS category_detail_updated_at \
 FROM product p LEFT JOIN category c ON c.id = p.category_id";

#[derive(Debug, Default)]
pub struct SearchParams {
    pub keyword: Option<String>,
    pub category_id: Option<i32>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub sort: Option<String>,
}

/// Maps a `field_dir` sort key onto an ORDER BY fragment. Identifiers
/// cannot be bound as parameters, so only whitelisted fields sort; anything
/// else falls back to newest-first.
fn sort_clause(sort: Option<&str>) -> String {
    let Some(sort) = sort else {
        return "p.created_at DESC".to_string();
    };

    let mut parts = sort.splitn(2, '_');
    let field = parts.next().unwrap_or_default();
    let direction = match parts.next() {
        Some("asc") => "ASC",
        _ => "DESC",
    };

    let column = match field {
        "price" => EFFECTIVE_PRICE,
        "name" => "p.name",
        "rating" => "p.rating",
        "createdAt" => "p.created_at",
        _ => return "p.created_at DESC".to_string(),
    };

    format!("{} {}", column, direction)
}

pub async fn search(
    pool: &PgPool,
    params: SearchParams,
) -> Result<Vec<views::product::WithCategory>, String> {
    let query_span = tracing::info_span!("Searching the product listing.");

    let mut query = QueryBuilder::<Postgres>::new("SELECT ");
    query.push(WITH_CATEGORY);
    query.push(" WHERE TRUE");

    if let Some(keyword) = &params.keyword {
        query.push(" AND to_tsvector('simple', p.searchable_text) @@ plainto_tsquery('simple', ");
        query.push_bind(keyword.clone());
        query.push(")");
    }
    if let Some(category_id) = params.category_id {
        query.push(" AND p.category_id = ");
        query.push_bind(category_id);
    }
    if let Some(min_price) = params.min_price {
        query.push(format!(" AND {} >= ", EFFECTIVE_PRICE));
        query.push_bind(min_price);
    }
    if let Some(max_price) = params.max_price {
        query.push(format!(" AND {} <= ", EFFECTIVE_PRICE));
        query.push_bind(max_price);
    }

    query.push(" ORDER BY ");
    if let Some(keyword) = &params.keyword {
        // text relevance ranks first, the requested sort breaks ties
        query.push("ts_rank(to_tsvector('simple', p.searchable_text), plainto_tsquery('simple', ");
        query.push_bind(keyword.clone());
        query.push(")) DESC, ");
    }
    query.push(sort_clause(params.sort.as_deref()));

    query
        .build_query_as::<views::product::WithCategory>()
        .fetch_all(pool)
        .instrument(query_span)
        .await
        .map_err(|err| {
            tracing::error!("Failed to execute search query: {:?}", err);
            "Could not fetch data".to_string()
        })
}

pub async fn fetch(pool: &PgPool, id: i32) -> Result<Option<models::Product>, String> {
    let query_span = tracing::info_span!("Fetch product by id.");
    sqlx::query_as::<_, models::Product>("SELECT * FROM product WHERE id = $1 LIMIT 1")
        .bind(id)
        .fetch_optional(pool)
        .instrument(query_span)
        .await
        .map_err(|err| {
            tracing::error!("Failed to fetch product, error: {:?}", err);
            "Could not fetch data".to_string()
        })
}

pub async fn fetch_with_category(
    pool: &PgPool,
    id: i32,
) -> Result<Option<views::product::WithCategory>, String> {
    let query_span = tracing::info_span!("Fetch product with category details.");
    let query = format!("SELECT {} WHERE p.id = $1 LIMIT 1", WITH_CATEGORY);
    sqlx::query_as::<_, views::product::WithCategory>(&query)
        .bind(id)
        .fetch_optional(pool)
        .instrument(query_span)
        .await
        .map_err(|err| {
            tracing::error!("Failed to fetch product, error: {:?}", err);
            "Could not fetch data".to_string()
        })
}

pub async fn fetch_all_with_category(
    pool: &PgPool,
) -> Result<Vec<views::product::WithCategory>, String> {
    let query_span = tracing::info_span!("Fetch the full product list.");
    let query = format!("SELECT {} ORDER BY p.created_at DESC", WITH_CATEGORY);
    sqlx::query_as::<_, views::product::WithCategory>(&query)
        .fetch_all(pool)
        .instrument(query_span)
        .await
        .map_err(|err| {
            tracing::error!("Failed to fetch products, error: {:?}", err);
            "Could not fetch data".to_string()
        })
}

pub async fn fetch_promotional(pool: &PgPool) -> Result<Vec<models::Product>, String> {
    let query_span = tracing::info_span!("Fetch promotional products.");
    sqlx::query_as::<_, models::Product>(
        "SELECT * FROM product WHERE is_promotional = TRUE ORDER BY created_at DESC",
    )
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch promotional products, error: {:?}", err);
        "Could not fetch data".to_string()
    })
}

pub async fn fetch_recommendations(
    pool: &PgPool,
    category_id: i32,
    exclude_id: i32,
    limit: i64,
) -> Result<Vec<models::Product>, String> {
    let query_span = tracing::info_span!("Fetch recommendations by category.");
    sqlx::query_as::<_, models::Product>(
        "SELECT * FROM product WHERE category_id = $1 AND id <> $2 LIMIT $3",
    )
    .bind(category_id)
    .bind(exclude_id)
    .bind(limit)
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch recommendations, error: {:?}", err);
        "Could not fetch data".to_string()
    })
}

pub async fn count_by_category(pool: &PgPool, category_id: i32) -> Result<i64, String> {
    let query_span = tracing::info_span!("Count products referencing a category.");
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM product WHERE category_id = $1")
        .bind(category_id)
        .fetch_one(pool)
        .instrument(query_span)
        .await
        .map_err(|err| {
            tracing::error!("Failed to count products, error: {:?}", err);
            "Could not fetch data".to_string()
        })
}

pub async fn insert(pool: &PgPool, product: models::Product) -> Result<models::Product, String> {
    let query_span = tracing::info_span!("Saving new product into the database");
    sqlx::query_as::<_, models::Product>(
        r#"
        INSERT INTO product (name, description, image_url, price, is_promotional,
            promotional_price, category_id, details, searchable_text, reviews,
            rating, num_reviews, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, NOW(), NOW())
        RETURNING *
        "#,
    )
    .bind(&product.name)
    .bind(&product.description)
    .bind(&product.image_url)
    .bind(product.price)
    .bind(product.is_promotional)
    .bind(product.promotional_price)
    .bind(product.category_id)
    .bind(&product.details)
    .bind(&product.searchable_text)
    .bind(&product.reviews)
    .bind(product.rating)
    .bind(product.num_reviews)
    .fetch_one(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to execute query: {:?}", err);
        "Failed to insert".to_string()
    })
}

pub async fn update(pool: &PgPool, product: &models::Product) -> Result<models::Product, String> {
    let query_span = tracing::info_span!("Updating product");
    sqlx::query_as::<_, models::Product>(
        r#"
        UPDATE product
        SET
            name = $2,
            description = $3,
            image_url = $4,
            price = $5,
            is_promotional = $6,
            promotional_price = $7,
            category_id = $8,
            details = $9,
            searchable_text = $10,
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(product.id)
    .bind(&product.name)
    .bind(&product.description)
    .bind(&product.image_url)
    .bind(product.price)
    .bind(product.is_promotional)
    .bind(product.promotional_price)
    .bind(product.category_id)
    .bind(&product.details)
    .bind(&product.searchable_text)
    .fetch_one(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to execute query: {:?}", err);
        "Failed to update".to_string()
    })
}

/// Persists the embedded review list together with the recomputed
/// aggregates; the three columns always change as one unit.
pub async fn save_reviews(pool: &PgPool, product: &models::Product) -> Result<(), String> {
    let query_span = tracing::info_span!("Saving product reviews");
    sqlx::query(
        "UPDATE product SET reviews = $2, rating = $3, num_reviews = $4, updated_at = NOW() \
         WHERE id = $1",
    )
    .bind(product.id)
    .bind(&product.reviews)
    .bind(product.rating)
    .bind(product.num_reviews)
    .execute(pool)
    .instrument(query_span)
    .await
    .map(|_| ())
    .map_err(|err| {
        tracing::error!("Failed to execute query: {:?}", err);
        "Failed to update".to_string()
    })
}

/// Removes the product and its recently-added feed entries in one
/// transaction, so the feed never holds a dangling reference.
#[tracing::instrument(name = "Delete product.", skip(pool))]
pub async fn delete(pool: &PgPool, id: i32) -> Result<bool, String> {
    let mut tx = pool.begin().await.map_err(|err| {
        tracing::error!("Failed to begin transaction: {:?}", err);
        "Failed to delete".to_string()
    })?;

    sqlx::query("DELETE FROM recently_added WHERE product_id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(|err| {
            tracing::error!("Failed to clear feed entries: {:?}", err);
            "Failed to delete".to_string()
        })?;

    let result = sqlx::query("DELETE FROM product WHERE id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(|err| {
            tracing::error!("Failed to execute query: {:?}", err);
            "Failed to delete".to_string()
        })?;

    tx.commit().await.map_err(|err| {
        tracing::error!("Failed to commit transaction: {:?}", err);
        "Failed to delete".to_string()
    })?;

    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_sort_maps_to_effective_price() {
        let clause = sort_clause(Some("price_asc"));
        assert!(clause.contains("promotional_price"));
        assert!(clause.ends_with("ASC"));
    }

    #[test]
    fn unknown_direction_defaults_to_descending() {
        assert_eq!(sort_clause(Some("name_down")), "p.name DESC");
        assert_eq!(sort_clause(Some("name")), "p.name DESC");
    }

    #[test]
    fn unknown_field_falls_back_to_newest_first() {
        assert_eq!(sort_clause(Some("searchable_text_asc")), "p.created_at DESC");
        assert_eq!(sort_clause(None), "p.created_at DESC");
    }

    #[test]
    fn created_at_sort_uses_snake_case_column() {
        assert_eq!(sort_clause(Some("createdAt_asc")), "p.created_at ASC");
    }
}
