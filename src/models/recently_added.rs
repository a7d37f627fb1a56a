use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Serialize, Clone, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct RecentlyAdded {
    pub id: i32,
    pub product_id: i32,
    pub created_at: DateTime<Utc>,
}
