use crate::models::Review;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use sqlx::types::Json;

/// Rating reported while a product has no reviews.
pub const EMPTY_RATING: f64 = 0.0;

#[derive(Debug, Serialize, Clone, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub price: f64,
    pub is_promotional: bool,
    pub promotional_price: Option<f64>,
    pub category_id: Option<i32>,
    /// Open key/value attribute map, intentionally schemaless.
    pub details: Value,
    #[serde(skip_serializing)]
    pub searchable_text: String,
    pub reviews: Json<Vec<Review>>,
    pub rating: f64,
    pub num_reviews: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub fn new(name: String, price: f64) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            name,
            description: None,
            image_url: None,
            price,
            is_promotional: false,
            promotional_price: None,
            category_id: None,
            details: Value::Object(Default::default()),
            searchable_text: String::new(),
            reviews: Json(Vec::new()),
            rating: EMPTY_RATING,
            num_reviews: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Promotional price when the promotion is active, list price otherwise.
    pub fn effective_price(&self) -> f64 {
        match (self.is_promotional, self.promotional_price) {
            (true, Some(promotional)) => promotional,
            _ => self.price,
        }
    }

    pub fn has_review_by(&self, user_id: i32) -> bool {
        self.reviews.0.iter().any(|review| review.user_id == user_id)
    }

    /// Replaces the embedded review list and recomputes the aggregates
    /// from the full list. Invariant: `rating` is the arithmetic mean of
    /// the embedded ratings (EMPTY_RATING for an empty list) and
    /// `num_reviews` equals the list length.
    pub fn set_reviews(&mut self, reviews: Vec<Review>) {
        self.num_reviews = reviews.len() as i32;
        self.rating = if reviews.is_empty() {
            EMPTY_RATING
        } else {
            reviews.iter().map(|review| review.rating as f64).sum::<f64>() / reviews.len() as f64
        };
        self.reviews = Json(reviews);
    }

    /// Rebuilds the denormalized text the full-text index searches over:
    /// name, description and every value of the attribute map.
    pub fn refresh_searchable_text(&mut self) {
        let mut parts: Vec<String> = vec![self.name.clone()];
        if let Some(description) = &self.description {
            parts.push(description.clone());
        }
        if let Value::Object(map) = &self.details {
            for value in map.values() {
                match value {
                    Value::String(text) => parts.push(text.clone()),
                    other => parts.push(other.to_string()),
                }
            }
        }
        self.searchable_text = parts.join(" ");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn review(user_id: i32, rating: i32) -> Review {
        Review::new(user_id, format!("user-{}", user_id), rating, "ok".into())
    }

    #[test]
    fn set_reviews_recomputes_aggregates_from_full_list() {
        let mut product = Product::new("TV".into(), 100.0);
        product.set_reviews(vec![review(1, 5), review(2, 4), review(3, 3)]);
        assert_eq!(product.num_reviews, 3);
        assert!((product.rating - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn emptied_review_list_resets_rating_to_default() {
        let mut product = Product::new("TV".into(), 100.0);
        product.set_reviews(vec![review(1, 5)]);
        product.set_reviews(Vec::new());
        assert_eq!(product.num_reviews, 0);
        assert_eq!(product.rating, EMPTY_RATING);
    }

    #[test]
    fn effective_price_prefers_active_promotion() {
        let mut product = Product::new("TV".into(), 100.0);
        product.is_promotional = true;
        product.promotional_price = Some(50.0);
        assert_eq!(product.effective_price(), 50.0);
    }

    #[test]
    fn effective_price_ignores_promotion_without_price() {
        let mut product = Product::new("TV".into(), 100.0);
        product.is_promotional = true;
        assert_eq!(product.effective_price(), 100.0);

        product.is_promotional = false;
        product.promotional_price = Some(50.0);
        assert_eq!(product.effective_price(), 100.0);
    }

    #[test]
    fn has_review_by_matches_owner_only() {
        let mut product = Product::new("TV".into(), 100.0);
        product.set_reviews(vec![review(7, 4)]);
        assert!(product.has_review_by(7));
        assert!(!product.has_review_by(8));
    }

    #[test]
    fn searchable_text_collects_name_description_and_details() {
        let mut product = Product::new("Pixel 9".into(), 100.0);
        product.description = Some("flagship phone".into());
        product.details = json!({"color": "obsidian", "storage": 256});
        product.refresh_searchable_text();
        assert!(product.searchable_text.contains("Pixel 9"));
        assert!(product.searchable_text.contains("flagship phone"));
        assert!(product.searchable_text.contains("obsidian"));
        assert!(product.searchable_text.contains("256"));
    }
}
