use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database row for a category.
#[derive(Debug, Clone, FromRow)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub image: Option<String>,
    pub description: Option<String>,
    pub state: Option<i32>,
    pub deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}
