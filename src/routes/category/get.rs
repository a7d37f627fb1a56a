use crate::db;
use crate::helpers::JsonResponse;
use crate::models;
use actix_web::{get, web, Responder, Result};
use sqlx::PgPool;

#[tracing::instrument(name = "Get all categories.")]
#[get("")]
pub async fn list_handler(pg_pool: web::Data<PgPool>) -> Result<impl Responder> {
    db::category::fetch_all(pg_pool.get_ref())
        .await
        .map(|categories| JsonResponse::build().set_list(categories).ok("OK"))
        .map_err(|err| JsonResponse::<models::Category>::build().internal_server_error(err))
}

#[tracing::instrument(name = "Get category.")]
#[get("/{id}")]
pub async fn item_handler(
    path: web::Path<(i32,)>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let (id,) = path.into_inner();

    db::category::fetch(pg_pool.get_ref(), id)
        .await
        .map_err(|err| JsonResponse::<models::Category>::build().internal_server_error(err))
        .and_then(|category| match category {
            Some(category) => Ok(JsonResponse::build().set_item(category).ok("OK")),
            None => Err(JsonResponse::<models::Category>::build().not_found("Category not found")),
        })
}
