use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: Uuid,
    pub name: String, // author display name, denormalized from the user
    pub rating: i32,
    pub comment: String,
    pub user_id: i32,
    pub created_at: DateTime<Utc>,
}

impl Review {
    pub fn new(user_id: i32, name: String, rating: i32, comment: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            rating,
            comment,
            user_id,
            created_at: Utc::now(),
        }
    }
}
