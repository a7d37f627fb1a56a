use crate::configuration::Settings;
use crate::db;
use crate::forms;
use crate::helpers;
use crate::helpers::JsonResponse;
use crate::views;
use actix_web::{post, web, Responder, Result};
use serde_valid::Validate;
use sqlx::PgPool;

#[tracing::instrument(name = "Login user.", skip(form, settings))]
#[post("/login")]
pub async fn login_handler(
    form: web::Json<forms::user::Login>,
    pg_pool: web::Data<PgPool>,
    settings: web::Data<Settings>,
) -> Result<impl Responder> {
    let form = form.into_inner();
    form.validate().map_err(|errors| {
        JsonResponse::<views::user::Session>::build().bad_request(errors.to_string())
    })?;

    let user = db::user::fetch_by_email(pg_pool.get_ref(), &form.email)
        .await
        .map_err(|err| JsonResponse::<views::user::Session>::build().internal_server_error(err))?;

    let user = match user {
        Some(user) if helpers::password::verify(&form.password, &user.password_hash) => user,
        _ => {
            return Err(JsonResponse::<views::user::Session>::build()
                .unauthorized("Invalid email or password"))
        }
    };

    // an unverified account never gets a usable session
    if !user.is_verified {
        return Err(JsonResponse::<views::user::Session>::build()
            .unauthorized("Please verify your email first."));
    }

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
