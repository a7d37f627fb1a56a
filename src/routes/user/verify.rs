use crate::db;
use crate::helpers::JsonResponse;
use crate::views;
use actix_web::{get, web, Responder, Result};
use sqlx::PgPool;

#[tracing::instrument(name = "Verify email.", skip(path))]
#[get("/verify/{token}")]
pub async fn verify_handler(
    path: web::Path<(String,)>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let (token,) = path.into_inner();

    let mut user = db::user::fetch_by_verification_token(pg_pool.get_ref(), &token)
        .await
        .map_err(|err| JsonResponse::<views::user::Profile>::build().internal_server_error(err))?
        .ok_or_else(|| {
            JsonResponse::<views::user::Profile>::build().bad_request("Invalid verification token.")
        })?;

    user.is_verified = true;
    user.verification_token = None;

    db::user::update(pg_pool.get_ref(), &user)
        .await
        .map(|_| JsonResponse::<views::user::Profile>::build().ok("Email verified successfully."))
        .map_err(|err| JsonResponse::<views::user::Profile>::build().internal_server_error(err))
}
