use serde::{Deserialize, Serialize};
use serde_valid::Validate;

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct AddReview {
    #[validate(minimum = 1)]
    #[validate(maximum = 5)]
    pub rating: i32,
    #[validate(max_length = 1000)]
    pub comment: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_must_stay_in_range() {
        let form = AddReview {
            rating: 0,
            comment: "meh".into(),
        };
        assert!(form.validate().is_err());

        let form = AddReview {
            rating: 6,
            comment: "great".into(),
        };
        assert!(form.validate().is_err());

        let form = AddReview {
            rating: 5,
            comment: "great".into(),
        };
        assert!(form.validate().is_ok());
    }
}
