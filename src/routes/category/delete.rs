use crate::db;
use crate::helpers::JsonResponse;
use crate::middleware::authentication::AdminUser;
use crate::models;
use actix_web::{delete, web, Responder, Result};
use sqlx::PgPool;

#[tracing::instrument(name = "Delete category.")]
#[delete("/{id}")]
pub async fn delete_handler(
    path: web::Path<(i32,)>,
    _admin: AdminUser,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let (id,) = path.into_inner();

    // referential integrity is enforced here, not by the schema
    let products = db::product::count_by_category(pg_pool.get_ref(), id)
        .await
        .map_err(|err| JsonResponse::<models::Category>::build().internal_server_error(err))?;
    if products > 0 {
        return Err(JsonResponse::<models::Category>::build()
            .bad_request("Cannot delete category. It is used by existing products."));
    }

    db::category::delete(pg_pool.get_ref(), id)
        .await
        .map_err(|err| JsonResponse::<models::Category>::build().internal_server_error(err))
        .and_then(|deleted| {
            if deleted {
                Ok(JsonResponse::<models::Category>::build().ok("Category removed"))
            } else {
                Err(JsonResponse::<models::Category>::build().not_found("Category not found"))
            }
        })
}
