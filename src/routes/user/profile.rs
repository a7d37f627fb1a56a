use crate::configuration::Settings;
use crate::db;
use crate::forms;
use crate::helpers;
use crate::helpers::JsonResponse;
use crate::middleware::authentication::AuthenticatedUser;
use crate::views;
use actix_web::{put, web, Responder, Result};
use serde_valid::Validate;
use sqlx::PgPool;

#[tracing::instrument(name = "Update own profile.", skip(form, settings))]
#[put("/profile")]
pub async fn profile_handler(
    user: AuthenticatedUser,
    form: web::Json<forms::user::UpdateProfile>,
    pg_pool: web::Data<PgPool>,
    settings: web::Data<Settings>,
) -> Result<impl Responder> {
    let form = form.into_inner();
    form.validate().map_err(|errors| {
        JsonResponse::<views::user::Session>::build().bad_request(errors.to_string())
    })?;

    let mut user = user.0.as_ref().clone();

    if let Some(email) = &form.email {
        if email != &user.email {
            let existing = db::user::fetch_by_email(pg_pool.get_ref(), email)
                .await
                .map_err(|err| {
                    JsonResponse::<views::user::Session>::build().internal_server_error(err)
                })?;
            if existing.is_some() {
                return Err(JsonResponse::<views::user::Session>::build()
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
    if let Some(password) = form.password {
        user.password_hash = helpers::password::hash(&password).map_err(|err| {
            JsonResponse::<views::user::Session>::build().internal_server_error(err)
        })?;
    }

    let user = db::user::update(pg_pool.get_ref(), &user)
        .await
        .map_err(|err| JsonResponse::<views::user::Session>::build().internal_server_error(err))?;

    let token = helpers::jwt::generate_token(
        user.id,
        &settings.auth.jwt_secret,
        settings.auth.jwt_expiration_hours,
    )
    .map_err(|err| JsonResponse::<views::user::Session>::build().internal_server_error(err))?;

    Ok(JsonResponse::build()
        .set_item(views::user::Session::new(&user, token))
        .ok("OK"))
}
