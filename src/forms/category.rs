use serde::{Deserialize, Serialize};
use serde_valid::Validate;

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CategoryForm {
    #[validate(min_length = 1)]
    #[validate(max_length = 120)]
    pub name: String,
}
