use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database row for a doctor.
///
/// `experience` is stored as the raw string the client sent; it is decoded
/// into a JSON array when the row is serialized out.
#[derive(Debug, Clone, FromRow)]
pub struct Doctor {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub imagen: Option<String>,
    pub category_id: i64,
    pub hospital_id: i64,
    pub phone_number: Option<String>,
    pub favorite: bool,
    pub email: String,
    pub about_me: Option<String>,
    pub experience: Option<String>,
    pub hospital_experience: Option<String>,
    pub deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}
