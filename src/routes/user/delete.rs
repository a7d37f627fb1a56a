use crate::db;
use crate::helpers::JsonResponse;
use crate::middleware::authentication::AdminUser;
use crate::views;
use actix_web::{delete, web, Responder, Result};
use sqlx::PgPool;

#[tracing::instrument(name = "Admin delete user.")]
#[delete("/{id}")]
pub async fn delete_handler(
    path: web::Path<(i32,)>,
    _admin: AdminUser,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let (id,) = path.into_inner();

    let user = db::user::fetch(pg_pool.get_ref(), id)
        .await
        .map_err(|err| JsonResponse::<views::user::Profile>::build().internal_server_error(err))?
        .ok_or_else(|| JsonResponse::<views::user::Profile>::build().not_found("User not found"))?;

    // the catalog must never end up without an administrator
    if user.is_admin {
        let admins = db::user::count_admins(pg_pool.get_ref())
            .await
            .map_err(|err| {
                JsonResponse::<views::user::Profile>::build().internal_server_error(err)
            })?;
        if admins <= 1 {
            return Err(JsonResponse::<views::user::Profile>::build()
                .bad_request("Cannot delete the last administrator."));
        }
    }

    db::user::delete(pg_pool.get_ref(), id)
        .await
        .map_err(|err| JsonResponse::<views::user::Profile>::build().internal_server_error(err))
        .and_then(|deleted| {
            if deleted {
                Ok(JsonResponse::<views::user::Profile>::build().ok("User removed"))
            } else {
                Err(JsonResponse::<views::user::Profile>::build().not_found("User not found"))
            }
        })
}
