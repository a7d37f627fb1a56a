use crate::db;
use crate::forms;
use crate::helpers::JsonResponse;
use crate::middleware::authentication::AdminUser;
use crate::models;
use actix_web::{post, web, Responder, Result};
use serde_valid::Validate;
use sqlx::PgPool;

#[tracing::instrument(name = "Add category.")]
#[post("")]
pub async fn add_handler(
    form: web::Json<forms::CategoryForm>,
    _admin: AdminUser,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let form = form.into_inner();
    form.validate()
        .map_err(|errors| JsonResponse::<models::Category>::build().bad_request(errors.to_string()))?;

    let existing = db::category::fetch_by_name(pg_pool.get_ref(), &form.name)
        .await
        .map_err(|err| JsonResponse::<models::Category>::build().internal_server_error(err))?;
    if existing.is_some() {
        return Err(JsonResponse::<models::Category>::build().bad_request("Category already exists"));
    }

    db::category::insert(pg_pool.get_ref(), &form.name)
        .await
        .map(|category| {
            JsonResponse::build()
                .set_id(category.id)
                .set_item(category)
                .created("Category created")
        })
        .map_err(|err| JsonResponse::<models::Category>::build().internal_server_error(err))
}
