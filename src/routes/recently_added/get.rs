use crate::db;
use crate::helpers::JsonResponse;
use crate::models;
use actix_web::{get, web, Responder, Result};
use sqlx::PgPool;

#[tracing::instrument(name = "Get recently-added feed.")]
#[get("")]
pub async fn list_handler(pg_pool: web::Data<PgPool>) -> Result<impl Responder> {
    db::recently_added::fetch_feed(pg_pool.get_ref())
        .await
        .map(|products| JsonResponse::build().set_list(products).ok("OK"))
        .map_err(|err| JsonResponse::<models::Product>::build().internal_server_error(err))
}
