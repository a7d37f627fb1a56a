use crate::db;
use crate::forms;
use crate::helpers;
use crate::helpers::JsonResponse;
use crate::middleware::authentication::AdminUser;
use crate::models;
use crate::views;
use actix_web::{post, web, Responder, Result};
use serde_valid::Validate;
use sqlx::PgPool;

#[tracing::instrument(name = "Admin create user.", skip(form))]
#[post("/admin")]
pub async fn admin_add_handler(
    form: web::Json<forms::user::AdminCreate>,
    _admin: AdminUser,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let form = form.into_inner();
    form.validate().map_err(|errors| {
        JsonResponse::<views::user::Profile>::build().bad_request(errors.to_string())
    })?;

    let existing = db::user::fetch_by_email(pg_pool.get_ref(), &form.email)
        .await
        .map_err(|err| JsonResponse::<views::user::Profile>::build().internal_server_error(err))?;
    if existing.is_some() {
        return Err(JsonResponse::<views::user::Profile>::build()
            .bad_request("User with this email already exists"));
    }

    let password_hash = helpers::password::hash(&form.password)
        .map_err(|err| JsonResponse::<views::user::Profile>::build().internal_server_error(err))?;

    let mut user = models::User::new(form.name, form.email, password_hash);
    user.is_admin = form.is_admin.unwrap_or(false);
    user.is_verified = true;

    db::user::insert(pg_pool.get_ref(), user)
        .await
        .map(|user| {
            JsonResponse::build()
                .set_id(user.id)
                .set_item(views::user::Profile::from(user))
                .created("User created")
        })
        .map_err(|err| JsonResponse::<views::user::Profile>::build().internal_server_error(err))
}
