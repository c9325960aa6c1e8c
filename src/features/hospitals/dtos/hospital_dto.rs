use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use crate::features::hospitals::models::Hospital;

/// Response DTO for a hospital
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HospitalResponseDto {
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

impl From<Hospital> for HospitalResponseDto {
    fn from(h: Hospital) -> Self {
        Self {
            id: h.id,
            name: h.name,
            address: h.address,
            phone_number: h.phone_number,
            email: h.email,
            deleted: h.deleted,
            created_at: h.created_at,
            updated_at: h.updated_at,
            deleted_at: h.deleted_at,
        }
    }
}

/// Create payload. No field constraints are declared; a missing name simply
/// surfaces as the database's NOT NULL violation.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateHospitalDto {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
}

/// Distinguishes an absent JSON key (outer None) from an explicit null
/// (Some(None)): update replaces exactly the provided fields.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

/// Update payload: provided fields are written as-is, null included; absent
/// fields keep their stored values.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateHospitalDto {
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub address: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub phone_number: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub email: Option<Option<String>>,
}

impl UpdateHospitalDto {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.address.is_none()
            && self.phone_number.is_none()
            && self.email.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_dto_distinguishes_absent_from_null() {
        let dto: UpdateHospitalDto =
            serde_json::from_str(r#"{"name":"Hospital General","email":null}"#).unwrap();

        assert_eq!(dto.name, Some(Some("Hospital General".to_string())));
        assert_eq!(dto.email, Some(None));
        assert_eq!(dto.address, None);
        assert_eq!(dto.phone_number, None);
        assert!(!dto.is_empty());
    }

    #[test]
    fn empty_update_dto() {
        let dto: UpdateHospitalDto = serde_json::from_str("{}").unwrap();
        assert!(dto.is_empty());
    }

    #[test]
    fn create_dto_is_permissive() {
        let dto: CreateHospitalDto = serde_json::from_str("{}").unwrap();
        assert!(dto.name.is_none());
        assert!(dto.email.is_none());
    }
}
