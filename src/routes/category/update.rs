use crate::db;
use crate::forms;
use crate::helpers::JsonResponse;
use crate::middleware::authentication::AdminUser;
use crate::models;
use actix_web::{put, web, Responder, Result};
use serde_valid::Validate;
use sqlx::PgPool;

#[tracing::instrument(name = "Update category.")]
#[put("/{id}")]
pub async fn update_handler(
    path: web::Path<(i32,)>,
    form: web::Json<forms::CategoryForm>,
    _admin: AdminUser,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let (id,) = path.into_inner();
    let form = form.into_inner();
    form.validate()
        .map_err(|errors| JsonResponse::<models::Category>::build().bad_request(errors.to_string()))?;

    let existing = db::category::fetch_by_name(pg_pool.get_ref(), &form.name)
        .await
        .map_err(|err| JsonResponse::<models::Category>::build().internal_server_error(err))?;
    if existing.map(|category| category.id != id).unwrap_or(false) {
        return Err(JsonResponse::<models::Category>::build().bad_request("Category already exists"));
    }

    db::category::update(pg_pool.get_ref(), id, &form.name)
        .await
        .map_err(|err| JsonResponse::<models::Category>::build().internal_server_error(err))
        .and_then(|category| match category {
            Some(category) => Ok(JsonResponse::build().set_item(category).ok("OK")),
            None => Err(JsonResponse::<models::Category>::build().not_found("Category not found")),
        })
}
