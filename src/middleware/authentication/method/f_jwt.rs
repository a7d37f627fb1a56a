use crate::configuration::Settings;
use crate::db;
use crate::helpers;
use crate::middleware::authentication::get_header;
use actix_web::dev::ServiceRequest;
use actix_web::{web, HttpMessage};
use sqlx::PgPool;
use std::sync::Arc;

// Any failure mode (bad signature, expired token, deleted user) reads the
// same to the caller.
const NOT_AUTHORIZED: &str = "not authorized";

#[tracing::instrument(name = "Authenticate with bearer JWT", skip(req))]
pub async fn try_jwt(req: &mut ServiceRequest) -> Result<bool, String> {
    let authorization = get_header::<String>(req, "authorization")?;
    let Some(authorization) = authorization else {
        return Ok(false);
    };

    let token = authorization
        .strip_prefix("Bearer ")
        .ok_or_else(|| NOT_AUTHORIZED.to_string())?;

    let settings = req
        .app_data::<web::Data<Settings>>()
        .ok_or_else(|| NOT_AUTHORIZED.to_string())?;
    let claims = helpers::jwt::decode_token(token, &settings.auth.jwt_secret)
        .map_err(|_| NOT_AUTHORIZED.to_string())?;
    let user_id = claims.user_id().map_err(|_| NOT_AUTHORIZED.to_string())?;

    let pg_pool = req
        .app_data::<web::Data<PgPool>>()
        .ok_or_else(|| NOT_AUTHORIZED.to_string())?
        .clone();
    let user = db::user::fetch(pg_pool.get_ref(), user_id)
        .await
        .map_err(|_| NOT_AUTHORIZED.to_string())?
        .ok_or_else(|| NOT_AUTHORIZED.to_string())?;

    if req.extensions_mut().insert(Arc::new(user)).is_some() {
        tracing::error!("authentication middleware called twice");
        return Err(NOT_AUTHORIZED.to_string());
    }

    Ok(true)
}
