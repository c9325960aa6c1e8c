use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::categories::dtos::CategoryResponseDto;
use crate::features::doctors::models::Doctor;
use crate::features::hospitals::dtos::HospitalResponseDto;
use crate::modules::storage::UploadedImage;

/// Response DTO for a doctor
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DoctorResponseDto {
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
    /// Decoded from the stored string; invalid JSON reads as null.
    pub experience: Option<serde_json::Value>,
    pub hospital_experience: Option<String>,
    pub deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl From<Doctor> for DoctorResponseDto {
    fn from(d: Doctor) -> Self {
        let experience = d
            .experience
            .as_deref()
            .and_then(|raw| serde_json::from_str(raw).ok());

        Self {
            id: d.id,
            first_name: d.first_name,
            last_name: d.last_name,
            imagen: d.imagen,
            category_id: d.category_id,
            hospital_id: d.hospital_id,
            phone_number: d.phone_number,
            favorite: d.favorite,
            email: d.email,
            about_me: d.about_me,
            experience,
            hospital_experience: d.hospital_experience,
            deleted: d.deleted,
            created_at: d.created_at,
            updated_at: d.updated_at,
            deleted_at: d.deleted_at,
        }
    }
}

/// Doctor with its category and hospital nested (list and data endpoints).
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DoctorDetailDto {
    #[serde(flatten)]
    pub doctor: DoctorResponseDto,
    pub category: Option<CategoryResponseDto>,
    pub hospital: Option<HospitalResponseDto>,
}

/// Multipart form for doctor create/update. Every field is optional at
/// parse time; required-ness is checked per operation.
#[derive(Debug, Default, Validate)]
pub struct DoctorForm {
    #[validate(length(max = 100, message = "first_name must be at most 100 characters"))]
    pub first_name: Option<String>,
    #[validate(length(max = 100, message = "last_name must be at most 100 characters"))]
    pub last_name: Option<String>,
    pub imagen: Option<UploadedImage>,
    pub category_id: Option<i64>,
    pub hospital_id: Option<i64>,
    #[validate(length(max = 20, message = "phone_number must be at most 20 characters"))]
    pub phone_number: Option<String>,
    pub favorite: Option<bool>,
    #[validate(email(message = "email must be a valid email address"))]
    pub email: Option<String>,
    pub about_me: Option<String>,
    pub experience: Option<String>,
    pub hospital_experience: Option<String>,
}

/// Validated create payload with the required fields made mandatory.
#[derive(Debug)]
pub struct NewDoctor {
    pub first_name: String,
    pub last_name: String,
    pub imagen: Option<UploadedImage>,
    pub category_id: i64,
    pub hospital_id: i64,
    pub phone_number: Option<String>,
    pub favorite: bool,
    pub email: String,
    pub about_me: Option<String>,
    pub experience: Option<String>,
    pub hospital_experience: Option<String>,
}

impl DoctorForm {
    /// Create rules: first/last name, category_id, hospital_id and email are
    /// required; the image is optional but must be a valid image file.
    pub fn into_new_doctor(self) -> Result<NewDoctor> {
        self.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        if let Some(imagen) = &self.imagen {
            imagen.validate()?;
        }

        let first_name = self
            .first_name
            .ok_or_else(|| AppError::Validation("first_name is required".to_string()))?;
        let last_name = self
            .last_name
            .ok_or_else(|| AppError::Validation("last_name is required".to_string()))?;
        let category_id = self
            .category_id
            .ok_or_else(|| AppError::Validation("category_id is required".to_string()))?;
        let hospital_id = self
            .hospital_id
            .ok_or_else(|| AppError::Validation("hospital_id is required".to_string()))?;
        let email = self
            .email
            .ok_or_else(|| AppError::Validation("email is required".to_string()))?;

        Ok(NewDoctor {
            first_name,
            last_name,
            imagen: self.imagen,
            category_id,
            hospital_id,
            phone_number: self.phone_number,
            favorite: self.favorite.unwrap_or(false),
            email,
            about_me: self.about_me,
            experience: self.experience,
            hospital_experience: self.hospital_experience,
        })
    }

    /// Update rules: everything optional, same field constraints.
    pub fn validate_update(&self) -> Result<()> {
        self.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        if let Some(imagen) = &self.imagen {
            imagen.validate()?;
        }

        Ok(())
    }
}

/// Multipart request body for doctor create/update.
/// Documentation only; the handlers consume axum's Multipart directly.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct DoctorFormDto {
    #[schema(example = "María")]
    pub first_name: Option<String>,
    #[schema(example = "García")]
    pub last_name: Option<String>,
    /// Image file (jpeg/png/jpg/gif, max 2048 KB)
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub imagen: Option<String>,
    pub category_id: Option<i64>,
    pub hospital_id: Option<i64>,
    pub phone_number: Option<String>,
    pub favorite: Option<bool>,
    #[schema(example = "maria.garcia@example.com")]
    pub email: Option<String>,
    pub about_me: Option<String>,
    /// JSON-encoded list of achievement labels, stored as sent
    #[schema(example = r#"["Jefa de cardiología", "20 años de experiencia"]"#)]
    pub experience: Option<String>,
    pub hospital_experience: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use fake::faker::internet::en::SafeEmail;
    use fake::faker::name::en::{FirstName, LastName};
    use fake::Fake;

    fn doctor_row(experience: Option<&str>) -> Doctor {
        let at = chrono::Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap();
        Doctor {
            id: 1,
            first_name: FirstName().fake(),
            last_name: LastName().fake(),
            imagen: Some("imagen_doctor/a1B2c3_perfil.jpg".to_string()),
            category_id: 2,
            hospital_id: 3,
            phone_number: None,
            favorite: false,
            email: SafeEmail().fake(),
            about_me: None,
            experience: experience.map(str::to_string),
            hospital_experience: None,
            deleted: false,
            created_at: at,
            updated_at: at,
            deleted_at: None,
        }
    }

    fn valid_form() -> DoctorForm {
        DoctorForm {
            first_name: Some(FirstName().fake()),
            last_name: Some(LastName().fake()),
            category_id: Some(1),
            hospital_id: Some(1),
            email: Some(SafeEmail().fake()),
            ..Default::default()
        }
    }

    #[test]
    fn experience_decodes_to_a_json_array() {
        let dto = DoctorResponseDto::from(doctor_row(Some(r#"["a", "b"]"#)));
        assert_eq!(dto.experience, Some(serde_json::json!(["a", "b"])));
    }

    #[test]
    fn invalid_experience_reads_as_null() {
        let dto = DoctorResponseDto::from(doctor_row(Some("veinte años")));
        assert_eq!(dto.experience, None);

        let dto = DoctorResponseDto::from(doctor_row(None));
        assert_eq!(dto.experience, None);
    }

    #[test]
    fn detail_dto_flattens_doctor_fields() {
        let detail = DoctorDetailDto {
            doctor: doctor_row(None).into(),
            category: None,
            hospital: None,
        };
        let body = serde_json::to_value(&detail).unwrap();
        assert_eq!(body["id"], 1);
        assert_eq!(body["category_id"], 2);
        assert!(body.get("doctor").is_none());
        assert!(body["category"].is_null());
        assert!(body["hospital"].is_null());
    }

    #[test]
    fn create_requires_email() {
        let mut form = valid_form();
        form.email = None;
        let err = form.into_new_doctor().unwrap_err();
        assert_eq!(err.to_string(), "email is required");
    }

    #[test]
    fn create_rejects_malformed_email() {
        let mut form = valid_form();
        form.email = Some("no-es-un-correo".to_string());
        assert!(form.into_new_doctor().is_err());
    }

    #[test]
    fn create_requires_parent_ids() {
        let mut form = valid_form();
        form.category_id = None;
        let err = form.into_new_doctor().unwrap_err();
        assert_eq!(err.to_string(), "category_id is required");

        let mut form = valid_form();
        form.hospital_id = None;
        let err = form.into_new_doctor().unwrap_err();
        assert_eq!(err.to_string(), "hospital_id is required");
    }

    #[test]
    fn favorite_defaults_to_false() {
        let new = valid_form().into_new_doctor().unwrap();
        assert!(!new.favorite);
    }

    #[test]
    fn update_accepts_partial_form() {
        let form = DoctorForm {
            phone_number: Some("555-1234".to_string()),
            ..Default::default()
        };
        assert!(form.validate_update().is_ok());
    }

    #[test]
    fn update_still_checks_field_constraints() {
        let form = DoctorForm {
            phone_number: Some("x".repeat(21)),
            ..Default::default()
        };
        assert!(form.validate_update().is_err());
    }
}
