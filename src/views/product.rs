use crate::models;
use serde::Serialize;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, Row};

/// Product annotated with its resolved category. A dangling or absent
/// category reference serializes as `categoryDetails: null`; it never
/// excludes the product from a listing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WithCategory {
    #[serde(flatten)]
    pub product: models::Product,
    pub category_details: Option<models::Category>,
}

impl FromRow<'_, PgRow> for WithCategory {
    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        let product = models::Product::from_row(row)?;
        let category_details = match row.try_get::<Option<i32>, _>("category_detail_id")? {
            Some(id) => Some(models::Category {
                id,
                name: row.try_get("category_detail_name")?,
                created_at: row.try_get("category_detail_created_at")?,
                updated_at: row.try_get("category_detail_updated_at")?,
            }),
            None => None,
        };

        Ok(Self {
            product,
            category_details,
        })
    }
}
