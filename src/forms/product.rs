use crate::models;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_valid::Validate;

#[derive(Debug, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductForm {
    #[validate(min_length = 1)]
    #[validate(max_length = 255)]
    pub name: String,
    #[validate(minimum = 0.0)]
    pub price: f64,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub category: Option<i32>,
    pub details: Option<Value>,
    pub is_promotional: Option<bool>,
    #[validate(minimum = 0.0)]
    pub promotional_price: Option<f64>,
}

impl ProductForm {
    /// Applies the full form onto a product, the way a PUT replaces the
    /// resource. The promotional price survives only while the flag is set.
    pub fn apply(self, product: &mut models::Product) {
        product.name = self.name;
        product.price = self.price;
        product.description = self.description;
        product.image_url = self.image_url;
        product.category_id = self.category;
        product.details = self
            .details
            .unwrap_or_else(|| Value::Object(Default::default()));
        let is_promotional = self.is_promotional.unwrap_or(false);
        product.is_promotional = is_promotional;
        product.promotional_price = if is_promotional {
            self.promotional_price
        } else {
            None
        };
        product.refresh_searchable_text();
    }

    pub fn into_product(self) -> models::Product {
        let mut product = models::Product::new(String::new(), 0.0);
        self.apply(&mut product);
        product
    }
}

/// Partial update; fields absent from the body are left untouched.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PatchProduct {
    #[validate(min_length = 1)]
    #[validate(max_length = 255)]
    pub name: Option<String>,
    #[validate(minimum = 0.0)]
    pub price: Option<f64>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub category: Option<i32>,
    pub details: Option<Value>,
    pub is_promotional: Option<bool>,
    #[validate(minimum = 0.0)]
    pub promotional_price: Option<f64>,
}

impl PatchProduct {
    pub fn apply(self, product: &mut models::Product) {
        if let Some(name) = self.name {
            product.name = name;
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(description) = self.description {
            product.description = Some(description);
        }
        if let Some(image_url) = self.image_url {
            product.image_url = Some(image_url);
        }
        if let Some(category) = self.category {
            product.category_id = Some(category);
        }
        if let Some(details) = self.details {
            product.details = details;
        }
        if let Some(is_promotional) = self.is_promotional {
            product.is_promotional = is_promotional;
            if !is_promotional {
                product.promotional_price = None;
            }
        }
        if let Some(promotional_price) = self.promotional_price {
            product.promotional_price = Some(promotional_price);
        }
        product.refresh_searchable_text();
    }
}

/// Listing/search query string. Bounds and the category filter are parsed
/// leniently: a malformed value drops that one constraint instead of
/// failing the request.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub keyword: Option<String>,
    pub category: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub sort: Option<String>,
}

impl SearchQuery {
    pub fn keyword(&self) -> Option<&str> {
        self.keyword.as_deref().filter(|kw| !kw.trim().is_empty())
    }

    pub fn category_id(&self) -> Option<i32> {
        let raw = self.category.as_deref()?;
        match raw.parse::<i32>() {
            Ok(id) => Some(id),
            Err(_) => {
                tracing::warn!("Invalid category ID received: {}", raw);
                None
            }
        }
    }

    pub fn min_price(&self) -> Option<f64> {
        self.min_price.as_deref().and_then(|raw| raw.parse().ok())
    }

    pub fn max_price(&self) -> Option<f64> {
        self.max_price.as_deref().and_then(|raw| raw.parse().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use serde_valid::Validate;

    #[test]
    fn malformed_category_filter_is_dropped() {
        let query = SearchQuery {
            category: Some("not-an-id".into()),
            ..Default::default()
        };
        assert_eq!(query.category_id(), None);

        let query = SearchQuery {
            category: Some("17".into()),
            ..Default::default()
        };
        assert_eq!(query.category_id(), Some(17));
    }

    #[test]
    fn price_bounds_are_ignored_individually() {
        let query = SearchQuery {
            min_price: Some("abc".into()),
            max_price: Some("250".into()),
            ..Default::default()
        };
        assert_eq!(query.min_price(), None);
        assert_eq!(query.max_price(), Some(250.0));
    }

    #[test]
    fn blank_keyword_is_no_keyword() {
        let query = SearchQuery {
            keyword: Some("   ".into()),
            ..Default::default()
        };
        assert_eq!(query.keyword(), None);
    }

    #[test]
    fn put_clears_promotional_price_when_flag_unset() {
        let mut product = models::Product::new("TV".into(), 100.0);
        product.is_promotional = true;
        product.promotional_price = Some(50.0);

        let form = ProductForm {
            name: "TV".into(),
            price: 100.0,
            promotional_price: Some(50.0),
            ..Default::default()
        };
        form.apply(&mut product);
        assert!(!product.is_promotional);
        assert_eq!(product.promotional_price, None);
    }

    #[test]
    fn patch_touches_only_present_fields() {
        let mut product = models::Product::new("TV".into(), 100.0);
        product.details = json!({"panel": "oled"});

        let patch = PatchProduct {
            price: Some(89.99),
            ..Default::default()
        };
        patch.apply(&mut product);

        assert_eq!(product.name, "TV");
        assert_eq!(product.price, 89.99);
        assert_eq!(product.details, json!({"panel": "oled"}));
    }

    #[test]
    fn negative_price_fails_validation() {
        let form = ProductForm {
            name: "TV".into(),
            price: -1.0,
            ..Default::default()
        };
        assert!(form.validate().is_err());
    }
}
