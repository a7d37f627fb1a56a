use crate::db;
use crate::helpers::JsonResponse;
use crate::middleware::authentication::AdminUser;
use crate::views;
use actix_web::{get, web, Responder, Result};
use sqlx::PgPool;

#[tracing::instrument(name = "Admin get all users.")]
#[get("")]
pub async fn list_handler(_admin: AdminUser, pg_pool: web::Data<PgPool>) -> Result<impl Responder> {
    db::user::fetch_all(pg_pool.get_ref())
        .await
        .map(|users| {
            let users = users
                .into_iter()
                .map(Into::into)
                .collect::<Vec<views::user::Profile>>();

            JsonResponse::build().set_list(users).ok("OK")
        })
        .map_err(|err| JsonResponse::<views::user::Profile>::build().internal_server_error(err))
}

#[tracing::instrument(name = "Admin get user.")]
#[get("/{id}")]
pub async fn item_handler(
    path: web::Path<(i32,)>,
    _admin: AdminUser,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let (id,) = path.into_inner();

    db::user::fetch(pg_pool.get_ref(), id)
        .await
        .map_err(|err| JsonResponse::<views::user::Profile>::build().internal_server_error(err))
        .and_then(|user| match user {
            Some(user) => Ok(JsonResponse::build()
                .set_item(views::user::Profile::from(user))
                .ok("OK")),
            None => Err(JsonResponse::<views::user::Profile>::build().not_found("User not found")),
        })
}
