use crate::db;
use crate::forms;
use crate::helpers::JsonResponse;
use crate::middleware::authentication::AdminUser;
use crate::models;
use crate::views;
use actix_web::{
    post,
    web::{Bytes, Data},
    Responder, Result,
};
use serde_valid::Validate;
use sqlx::PgPool;
use std::str;

#[tracing::instrument(name = "Add product.", skip(body))]
#[post("")]
pub async fn add_handler(
    body: Bytes,
    _admin: AdminUser,
    pg_pool: Data<PgPool>,
) -> Result<impl Responder> {
    let form = body_into_form(body).await?;

    let category = match form.category {
        Some(category_id) => db::category::fetch(pg_pool.get_ref(), category_id)
            .await
            .map_err(|err| JsonResponse::<models::Product>::build().internal_server_error(err))?,
        None => None,
    };

    let mut product = form.into_product();
    if product.image_url.is_none() {
        let category_name = category
            .as_ref()
            .map(|category| category.name.as_str())
            .unwrap_or("");
        product.image_url = Some(placeholder_image_url(category_name, &product.name));
    }

    let product = db::product::insert(pg_pool.get_ref(), product)
        .await
        .map_err(|err| JsonResponse::<models::Product>::build().internal_server_error(err))?;

    db::recently_added::insert(pg_pool.get_ref(), product.id)
        .await
        .map_err(|err| JsonResponse::<models::Product>::build().internal_server_error(err))?;

    db::product::fetch_with_category(pg_pool.get_ref(), product.id)
        .await
        .map_err(|err| {
            JsonResponse::<views::product::WithCategory>::build().internal_server_error(err)
        })
        .and_then(|created| match created {
            Some(created) => Ok(JsonResponse::build()
                .set_id(created.product.id)
                .set_item(created)
                .created("Product created")),
            None => Err(JsonResponse::<views::product::WithCategory>::build()
                .not_found("Product not found")),
        })
}

/// Stand-in artwork for products submitted without an image, derived from
/// the category label and the leading word of the product name.
fn placeholder_image_url(category_name: &str, product_name: &str) -> String {
    let brand = product_name.split_whitespace().next().unwrap_or("");
    let label = singular_category_label(category_name);
    format!("https://placehold.co/400x300/EFEFEF/333333?text={label}+{brand}")
}

fn singular_category_label(name: &str) -> &str {
    match name {
        "Smartphones" => "Smartphone",
        "TVs" => "TV",
        "Laptops" => "Laptop",
        "Tablets" => "Tablet",
        "Smartwatches" => "Smartwatch",
        "Headphones" => "Headphone",
        "Smart Home Devices" => "Smart Home",
        other => other,
    }
}

pub(super) async fn body_into_form(body: Bytes) -> Result<forms::ProductForm, actix_web::Error> {
    let body_str = str::from_utf8(&body).map_err(|err| {
        JsonResponse::<forms::ProductForm>::build().internal_server_error(err.to_string())
    })?;

    let deserializer = &mut serde_json::Deserializer::from_str(body_str);
    serde_path_to_error::deserialize(deserializer)
        .map_err(|err| {
            let msg = format!("{}:{:?}", err.path(), err);
            JsonResponse::<forms::ProductForm>::build().bad_request(msg)
        })
        .and_then(|form: forms::ProductForm| {
            form.validate().map_err(|errors| {
                let msg = format!("Invalid data received {:?}", errors.to_string());
                JsonResponse::<forms::ProductForm>::build().bad_request(msg)
            })?;
            Ok(form)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_url_singularizes_known_categories() {
        let url = placeholder_image_url("Smartphones", "Pixel 9 Pro");
        assert_eq!(
            url,
            "https://placehold.co/400x300/EFEFEF/333333?text=Smartphone+Pixel"
        );
    }

    #[test]
    fn placeholder_url_keeps_unknown_categories_verbatim() {
        let url = placeholder_image_url("Consoles", "Steam Deck");
        assert!(url.ends_with("text=Consoles+Steam"));
    }
}
