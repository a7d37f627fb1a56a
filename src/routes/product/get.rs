use crate::db;
use crate::forms;
use crate::helpers::JsonResponse;
use crate::middleware::authentication::AdminUser;
use crate::models;
use crate::views;
use actix_web::{get, web, Responder, Result};
use sqlx::PgPool;

#[tracing::instrument(name = "Search products.")]
#[get("")]
pub async fn list_handler(
    query: web::Query<forms::SearchQuery>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let params = db::product::SearchParams {
        keyword: query.keyword().map(str::to_string),
        category_id: query.category_id(),
        min_price: query.min_price(),
        max_price: query.max_price(),
        sort: query.sort.clone(),
    };

    db::product::search(pg_pool.get_ref(), params)
        .await
        .map(|products| JsonResponse::build().set_list(products).ok("OK"))
        .map_err(|err| {
            JsonResponse::<views::product::WithCategory>::build().internal_server_error(err)
        })
}

#[tracing::instrument(name = "Admin get the full product list.")]
#[get("/admin")]
pub async fn admin_list_handler(
    _admin: AdminUser,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    db::product::fetch_all_with_category(pg_pool.get_ref())
        .await
        .map(|products| JsonResponse::build().set_list(products).ok("OK"))
        .map_err(|err| {
            JsonResponse::<views::product::WithCategory>::build().internal_server_error(err)
        })
}

#[tracing::instrument(name = "Get promotional products.")]
#[get("/promotional")]
pub async fn promotional_handler(pg_pool: web::Data<PgPool>) -> Result<impl Responder> {
    db::product::fetch_promotional(pg_pool.get_ref())
        .await
        .map(|products| JsonResponse::build().set_list(products).ok("OK"))
        .map_err(|err| JsonResponse::<models::Product>::build().internal_server_error(err))
}

#[tracing::instrument(name = "Get recommendations.")]
#[get("/recommendations/{id}")]
pub async fn recommendations_handler(
    path: web::Path<(i32,)>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let (id,) = path.into_inner();

    let product = db::product::fetch(pg_pool.get_ref(), id)
        .await
        .map_err(|err| JsonResponse::<models::Product>::build().internal_server_error(err))?
        .ok_or_else(|| JsonResponse::<models::Product>::build().not_found("Product not found"))?;

    let recommendations = match product.category_id {
        Some(category_id) => {
            db::product::fetch_recommendations(pg_pool.get_ref(), category_id, id, 5)
                .await
                .map_err(|err| {
                    JsonResponse::<models::Product>::build().internal_server_error(err)
                })?
        }
        None => Vec::new(),
    };

    Ok(JsonResponse::build().set_list(recommendations).ok("OK"))
}

#[tracing::instrument(name = "Get product.")]
#[get("/{id}")]
pub async fn item_handler(
    path: web::Path<(i32,)>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let (id,) = path.into_inner();

    db::product::fetch_with_category(pg_pool.get_ref(), id)
        .await
        .map_err(|err| {
            JsonResponse::<views::product::WithCategory>::build().internal_server_error(err)
        })
        .and_then(|product| match product {
            Some(product) => Ok(JsonResponse::build().set_item(product).ok("OK")),
            None => Err(JsonResponse::<views::product::WithCategory>::build()
                .not_found("Product not found")),
        })
}
