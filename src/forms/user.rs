use serde::{Deserialize, Serialize};
use serde_valid::Validate;

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct Register {
    #[validate(min_length = 1)]
    #[validate(max_length = 255)]
    pub name: String,
    #[validate(pattern = r"^[^@\s]+@[^@\s]+\.[^@\s]+$")]
    pub email: String,
    #[validate(min_length = 6)]
    #[validate(max_length = 128)]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct Login {
    #[validate(min_length = 1)]
    pub email: String,
    #[validate(min_length = 1)]
    pub password: String,
}

/// Admin-created accounts skip the email verification round-trip.
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AdminCreate {
    #[validate(min_length = 1)]
    #[validate(max_length = 255)]
    pub name: String,
    #[validate(pattern = r"^[^@\s]+@[^@\s]+\.[^@\s]+$")]
    pub email: String,
    #[validate(min_length = 6)]
    #[validate(max_length = 128)]
    pub password: String,
    pub is_admin: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AdminUpdate {
    #[validate(min_length = 1)]
    #[validate(max_length = 255)]
    pub name: Option<String>,
    #[validate(pattern = r"^[^@\s]+@[^@\s]+\.[^@\s]+$")]
    pub email: Option<String>,
    pub is_admin: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct UpdateProfile {
    #[validate(min_length = 1)]
    #[validate(max_length = 255)]
    pub name: Option<String>,
    #[validate(pattern = r"^[^@\s]+@[^@\s]+\.[^@\s]+$")]
    pub email: Option<String>,
    #[validate(min_length = 6)]
    #[validate(max_length = 128)]
    pub password: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_rejects_malformed_email() {
        let form = Register {
            name: "Ann".into(),
            email: "not-an-email".into(),
            password: "secret1".into(),
        };
        assert!(form.validate().is_err());
    }

    #[test]
    fn register_rejects_short_password() {
        let form = Register {
            name: "Ann".into(),
            email: "ann@example.com".into(),
            password: "abc".into(),
        };
        assert!(form.validate().is_err());
    }

    #[test]
    fn register_accepts_valid_input() {
        let form = Register {
            name: "Ann".into(),
            email: "ann@example.com".into(),
            password: "secret1".into(),
        };
        assert!(form.validate().is_ok());
    }
}
