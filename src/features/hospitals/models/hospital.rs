use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database row for a hospital.
#[derive(Debug, Clone, FromRow)]
pub struct Hospital {
    pub id: i64,
    pub name: String,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}
