use crate::db;
use crate::helpers::JsonResponse;
use crate::middleware::authentication::AdminUser;
use crate::models;
use actix_web::{delete, web, Responder, Result};
use sqlx::PgPool;

#[tracing::instrument(name = "Delete product.")]
#[delete("/{id}")]
pub async fn delete_handler(
    path: web::Path<(i32,)>,
    _admin: AdminUser,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let (id,) = path.into_inner();

    db::product::delete(pg_pool.get_ref(), id)
        .await
        .map_err(|err| JsonResponse::<models::Product>::build().internal_server_error(err))
        .and_then(|deleted| {
            if deleted {
                Ok(JsonResponse::<models::Product>::build().ok("Product removed"))
            } else {
                Err(JsonResponse::<models::Product>::build().not_found("Product not found"))
            }
        })
}
