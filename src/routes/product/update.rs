use crate::db;
use crate::forms;
use crate::helpers::JsonResponse;
use crate::middleware::authentication::AdminUser;
use crate::models;
use crate::routes::product::add::body_into_form;
use actix_web::{patch, put, web, web::Bytes, Responder, Result};
use serde_valid::Validate;
use sqlx::PgPool;

#[tracing::instrument(name = "Update product.", skip(body))]
#[put("/{id}")]
pub async fn update_handler(
    path: web::Path<(i32,)>,
    body: Bytes,
    _admin: AdminUser,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let (id,) = path.into_inner();
    let form = body_into_form(body).await?;

    let mut product = db::product::fetch(pg_pool.get_ref(), id)
        .await
        .map_err(|err| JsonResponse::<models::Product>::build().internal_server_error(err))?
        .ok_or_else(|| JsonResponse::<models::Product>::build().not_found("Product not found"))?;

    form.apply(&mut product);

    db::product::update(pg_pool.get_ref(), &product)
        .await
        .map(|product| JsonResponse::build().set_item(product).ok("OK"))
        .map_err(|err| JsonResponse::<models::Product>::build().internal_server_error(err))
}

#[tracing::instrument(name = "Patch product fields.")]
#[patch("/{id}")]
pub async fn patch_handler(
    path: web::Path<(i32,)>,
    form: web::Json<forms::PatchProduct>,
    _admin: AdminUser,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let (id,) = path.into_inner();
    let form = form.into_inner();
    form.validate()
        .map_err(|errors| JsonResponse::<models::Product>::build().bad_request(errors.to_string()))?;

    let mut product = db::product::fetch(pg_pool.get_ref(), id)
        .await
        .map_err(|err| JsonResponse::<models::Product>::build().internal_server_error(err))?
        .ok_or_else(|| JsonResponse::<models::Product>::build().not_found("Product not found"))?;

    form.apply(&mut product);

    db::product::update(pg_pool.get_ref(), &product)
        .await
        .map(|product| JsonResponse::build().set_item(product).ok("OK"))
        .map_err(|err| JsonResponse::<models::Product>::build().internal_server_error(err))
}
