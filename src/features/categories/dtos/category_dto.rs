use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::core::error::{AppError, Result};
use crate::features::categories::models::Category;
use crate::features::doctors::dtos::DoctorResponseDto;
use crate::modules::storage::UploadedImage;

/// Response DTO for a category
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponseDto {
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

impl From<Category> for CategoryResponseDto {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
            image: c.image,
            description: c.description,
            state: c.state,
            deleted: c.deleted,
            created_at: c.created_at,
            updated_at: c.updated_at,
            deleted_at: c.deleted_at,
        }
    }
}

/// Category with its non-deleted doctors nested (bydoctor endpoint).
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CategoryWithDoctorsDto {
    #[serde(flatten)]
    pub category: CategoryResponseDto,
    pub doctors: Vec<DoctorResponseDto>,
}

/// Multipart form for category create/update. Every field is optional at
/// parse time; required-ness is checked per operation.
#[derive(Debug, Default)]
pub struct CategoryForm {
    pub name: Option<String>,
    pub description: Option<String>,
    pub state: Option<i32>,
    pub image: Option<UploadedImage>,
}

/// Validated create payload: name and image are mandatory.
#[derive(Debug)]
pub struct NewCategory {
    pub name: String,
    pub description: Option<String>,
    pub state: Option<i32>,
    pub image: UploadedImage,
}

impl CategoryForm {
    /// Create rules: name required (max 100), image required and a valid
    /// image file.
    pub fn into_new_category(self) -> Result<NewCategory> {
        let name = self
            .name
            .ok_or_else(|| AppError::Validation("name is required".to_string()))?;
        if name.chars().count() > 100 {
            return Err(AppError::Validation(
                "name must be at most 100 characters".to_string(),
            ));
        }

        let image = self
            .image
            .ok_or_else(|| AppError::Validation("image is required".to_string()))?;
        image.validate()?;

        Ok(NewCategory {
            name,
            description: self.description,
            state: self.state,
            image,
        })
    }

    /// Update rules: everything optional, name capped at 200 (the shipped
    /// API accepts longer names on update than on create).
    pub fn validate_update(&self) -> Result<()> {
        if let Some(name) = &self.name {
            if name.chars().count() > 200 {
                return Err(AppError::Validation(
                    "name must be at most 200 characters".to_string(),
                ));
            }
        }

        if let Some(image) = &self.image {
            image.validate()?;
        }

        Ok(())
    }
}

/// Multipart request body for category create/update.
/// Documentation only; the handlers consume axum's Multipart directly.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct CategoryFormDto {
    /// Category name
    #[schema(example = "Cardiología")]
    pub name: Option<String>,
    /// Image file (jpeg/png/jpg/gif, max 2048 KB)
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub image: Option<String>,
    /// Category description
    pub description: Option<String>,
    /// Category state (1 active, 0 inactive)
    pub state: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image() -> UploadedImage {
        UploadedImage {
            file_name: "foto.png".to_string(),
            content_type: "image/png".to_string(),
            data: vec![0u8; 64],
        }
    }

    #[test]
    fn create_requires_name() {
        let form = CategoryForm {
            image: Some(image()),
            ..Default::default()
        };
        let err = form.into_new_category().unwrap_err();
        assert_eq!(err.to_string(), "name is required");
    }

    #[test]
    fn create_requires_image() {
        let form = CategoryForm {
            name: Some("Cardiología".to_string()),
            ..Default::default()
        };
        let err = form.into_new_category().unwrap_err();
        assert_eq!(err.to_string(), "image is required");
    }

    #[test]
    fn create_caps_name_at_100() {
        let form = CategoryForm {
            name: Some("x".repeat(101)),
            image: Some(image()),
            ..Default::default()
        };
        assert!(form.into_new_category().is_err());
    }

    #[test]
    fn update_allows_names_up_to_200() {
        let form = CategoryForm {
            name: Some("x".repeat(150)),
            ..Default::default()
        };
        assert!(form.validate_update().is_ok());

        let form = CategoryForm {
            name: Some("x".repeat(201)),
            ..Default::default()
        };
        assert!(form.validate_update().is_err());
    }

    #[test]
    fn update_accepts_empty_form() {
        assert!(CategoryForm::default().validate_update().is_ok());
    }
}
