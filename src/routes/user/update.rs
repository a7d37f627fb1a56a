use crate::db;
use crate::forms;
use crate::helpers::JsonResponse;
use crate::middleware::authentication::AdminUser;
use crate::views;
use actix_web::{put, web, Responder, Result};
use serde_valid::Validate;
use sqlx::PgPool;

#[tracing::instrument(name = "Admin update user.", skip(form))]
#[put("/{id}")]
pub async fn update_handler(
    path: web::Path<(i32,)>,
    form: web::Json<forms::user::AdminUpdate>,
    _admin: AdminUser,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let (id,) = path.into_inner();
    let form = form.into_inner();
    form.validate().map_err(|errors| {
        JsonResponse::<views::user::Profile>::build().bad_request(errors.to_string())
    })?;

    let mut user = db::user::fetch(pg_pool.get_ref(), id)
        .await
        .map_err(|err| JsonResponse::<views::user::Profile>::build().internal_server_error(err))?
        .ok_or_else(|| JsonResponse::<views::user::Profile>::build().not_found("User not found"))?;

    // the catalog must never end up without an administrator
    if form.is_admin == Some(false) && user.is_admin {
        let admins = db::user::count_admins(pg_pool.get_ref())
            .await
            .map_err(|err| {
                JsonResponse::<views::user::Profile>::build().internal_server_error(err)
            })?;
        if admins <= 1 {
            return Err(JsonResponse::<views::user::Profile>::build()
                .bad_request("Cannot remove admin status from the last administrator."));
        }
    }

    if let Some(email) = &form.email {
        if email != &user.email {
            let existing = db::user::fetch_by_email(pg_pool.get_ref(), email)
                .await
                .map_err(|err| {
                    JsonResponse::<views::user::Profile>::build().internal_server_error(err)
                })?;
            if existing.is_some() {
                return Err(JsonResponse::<views::user::Profile>::build()
                    .bad_request("User with this email already exists"));
            }
        }
    }

    if let Some(name) = form.name {
        user.name = name;
    }
    if let Some(email) = form.email {
        user.email = email;
    }
    if let Some(is_admin) = form.is_admin {
        user.is_admin = is_admin;
    }

    db::user::update(pg_pool.get_ref(), &user)
        .await
        .map(|user| {
            JsonResponse::build()
                .set_item(views::user::Profile::from(user))
                .ok("OK")
        })
        .map_err(|err| JsonResponse::<views::user::Profile>::build().internal_server_error(err))
}
