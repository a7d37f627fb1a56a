use crate::db;
use crate::forms;
use crate::helpers;
use crate::helpers::JsonResponse;
use crate::models;
use crate::services::EmailService;
use crate::views;
use actix_web::{post, web, Responder, Result};
use serde_valid::Validate;
use sqlx::PgPool;

#[tracing::instrument(name = "Register user.", skip(form, email_service))]
#[post("/register")]
pub async fn register_handler(
    form: web::Json<forms::user::Register>,
    pg_pool: web::Data<PgPool>,
    email_service: web::Data<EmailService>,
) -> Result<impl Responder> {
    let form = form.into_inner();
    form.validate().map_err(|errors| {
        JsonResponse::<views::user::Profile>::build().bad_request(errors.to_string())
    })?;

    let existing = db::user::fetch_by_email(pg_pool.get_ref(), &form.email)
        .await
        .map_err(|err| JsonResponse::<views::user::Profile>::build().internal_server_error(err))?;
    if existing.is_some() {
        return Err(JsonResponse::<views::user::Profile>::build().bad_request("User already exists"));
    }

    let password_hash = helpers::password::hash(&form.password)
        .map_err(|err| JsonResponse::<views::user::Profile>::build().internal_server_error(err))?;

    let mut user = models::User::new(form.name, form.email, password_hash);
    user.verification_token = Some(helpers::secret::random_hex(64));

    let user = db::user::insert(pg_pool.get_ref(), user)
        .await
        .map_err(|err| JsonResponse::<views::user::Profile>::build().internal_server_error(err))?;

    // delivery problems never fail the registration itself
    if let Some(token) = &user.verification_token {
        if let Err(err) = email_service.send_verification(&user.email, token).await {
            tracing::warn!("Failed to send verification email: {}", err);
        }
    }

    Ok(JsonResponse::<views::user::Profile>::build()
        .set_id(user.id)
        .created("User registered. Please check your email for verification link."))
}
