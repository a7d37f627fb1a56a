use crate::helpers::JsonResponse;
use actix_web::{get, Responder, Result};

#[tracing::instrument(name = "Health check.")]
#[get("")]
pub async fn health_check() -> Result<impl Responder> {
    Ok(JsonResponse::<()>::build().ok("alive"))
}
