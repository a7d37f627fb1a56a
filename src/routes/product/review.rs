use crate::db;
use crate::forms;
use crate::helpers::JsonResponse;
use crate::middleware::authentication::{AdminUser, AuthenticatedUser};
use crate::models;
use actix_web::{delete, post, web, Responder, Result};
use serde_valid::Validate;
use sqlx::PgPool;
use uuid::Uuid;

#[tracing::instrument(name = "Add review.")]
#[post("/{id}/reviews")]
pub async fn add_review_handler(
    path: web::Path<(i32,)>,
    form: web::Json<forms::AddReview>,
    user: AuthenticatedUser,
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

    // one review per user per product; admins are exempt
    if !user.is_admin && product.has_review_by(user.id) {
        return Err(JsonResponse::<models::Product>::build().bad_request("Product already reviewed"));
    }

    let mut reviews = product.reviews.0.clone();
    reviews.push(models::Review::new(
        user.id,
        user.name.clone(),
        form.rating,
        form.comment,
    ));
    product.set_reviews(reviews);

    db::product::save_reviews(pg_pool.get_ref(), &product)
        .await
        .map(|_| JsonResponse::<models::Product>::build().created("Review added"))
        .map_err(|err| JsonResponse::<models::Product>::build().internal_server_error(err))
}

#[tracing::instrument(name = "Delete review.")]
#[delete("/{id}/reviews/{review_id}")]
pub async fn delete_review_handler(
    path: web::Path<(i32, Uuid)>,
    _admin: AdminUser,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let (id, review_id) = path.into_inner();

    let mut product = db::product::fetch(pg_pool.get_ref(), id)
        .await
        .map_err(|err| JsonResponse::<models::Product>::build().internal_server_error(err))?
        .ok_or_else(|| JsonResponse::<models::Product>::build().not_found("Product not found"))?;

    let reviews = product
        .reviews
        .0
        .iter()
        .filter(|review| review.id != review_id)
        .cloned()
        .collect();
    product.set_reviews(reviews);

    db::product::save_reviews(pg_pool.get_ref(), &product)
        .await
        .map(|_| JsonResponse::<models::Product>::build().ok("Review removed"))
        .map_err(|err| JsonResponse::<models::Product>::build().internal_server_error(err))
}

#[tracing::instrument(name = "Delete all reviews.")]
#[delete("/{id}/reviews")]
pub async fn delete_all_reviews_handler(
    path: web::Path<(i32,)>,
    _admin: AdminUser,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let (id,) = path.into_inner();

    let mut product = db::product::fetch(pg_pool.get_ref(), id)
        .await
        .map_err(|err| JsonResponse::<models::Product>::build().internal_server_error(err))?
        .ok_or_else(|| JsonResponse::<models::Product>::build().not_found("Product not found"))?;

    product.set_reviews(Vec::new());

    db::product::save_reviews(pg_pool.get_ref(), &product)
        .await
        .map(|_| JsonResponse::<models::Product>::build().ok("All reviews removed"))
        .map_err(|err| JsonResponse::<models::Product>::build().internal_server_error(err))
}
