use sqlx::PgPool;
use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::categories::dtos::{
    CategoryForm, CategoryResponseDto, CategoryWithDoctorsDto, NewCategory,
};
use crate::features::categories::models::Category;
use crate::features::doctors::models::Doctor;
use crate::modules::storage::{image_store, ImageStore};
use crate::shared::constants::CATEGORY_IMAGE_DIR;

/// Service for category operations
pub struct CategoryService {
    pool: PgPool,
    images: Arc<ImageStore>,
}

impl CategoryService {
    pub fn new(pool: PgPool, images: Arc<ImageStore>) -> Self {
        Self { pool, images }
    }

    /// List all non-deleted categories
    pub async fn list(&self) -> Result<Vec<CategoryResponseDto>> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT * FROM categories WHERE deleted = FALSE",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list categories: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(categories.into_iter().map(Into::into).collect())
    }

    /// One non-deleted category with its non-deleted doctors nested.
    pub async fn get_with_doctors(&self, id: i64) -> Result<CategoryWithDoctorsDto> {
        let category = sqlx::query_as::<_, Category>(
            "SELECT * FROM categories WHERE id = $1 AND deleted = FALSE",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?
        .ok_or_else(|| AppError::NotFound("Categoría no encontrada".to_string()))?;

        let doctors = sqlx::query_as::<_, Doctor>(
            "SELECT * FROM doctors WHERE category_id = $1 AND deleted = FALSE",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(CategoryWithDoctorsDto {
            category: category.into(),
            doctors: doctors.into_iter().map(Into::into).collect(),
        })
    }

    /// Store the image and insert the row.
    pub async fn create(&self, new: NewCategory) -> Result<CategoryResponseDto> {
        let file_name = image_store::unique_name(4, &new.image);
        let image_path = self
            .images
            .store(CATEGORY_IMAGE_DIR, &file_name, &new.image.data)
            .await?;

        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (name, image, description, state, deleted)
            VALUES ($1, $2, $3, $4, FALSE)
            RETURNING *
            "#,
        )
        .bind(&new.name)
        .bind(&image_path)
        .bind(&new.description)
        .bind(new.state)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert category: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!("Category created: id={}", category.id);

        Ok(category.into())
    }

    /// Partial update: only provided fields are applied. The lookup does not
    /// filter on `deleted` and runs before field validation, so a missing id
    /// wins over an invalid payload.
    pub async fn update(&self, id: i64, form: CategoryForm) -> Result<CategoryResponseDto> {
        let found = sqlx::query_scalar::<_, i64>("SELECT id FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?;
        if found.is_none() {
            return Err(AppError::NotFound(format!(
                "no matching record found for id {} in categories",
                id
            )));
        }

        form.validate_update()?;

        // A replaced image leaves the previous file on disk; only the doctor
        // update removes old files.
        let mut image_path: Option<String> = None;
        if let Some(image) = &form.image {
            let file_name = image_store::unique_name(10, image);
            image_path = Some(
                self.images
                    .store(CATEGORY_IMAGE_DIR, &file_name, &image.data)
                    .await?,
            );
        }

        let category = sqlx::query_as::<_, Category>(
            r#"
            UPDATE categories
            SET name        = COALESCE($1, name),
                description = COALESCE($2, description),
                state       = COALESCE($3, state),
                image       = COALESCE($4, image),
                updated_at  = NOW()
            WHERE id = $5
            RETURNING *
            "#,
        )
        .bind(&form.name)
        .bind(&form.description)
        .bind(form.state)
        .bind(&image_path)
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update category {}: {:?}", id, e);
            AppError::Database(e)
        })?;

        Ok(category.into())
    }

    /// Soft delete. The image file stays on disk and the lookup does not
    /// filter on `deleted`, so deleting twice succeeds.
    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query(
            "UPDATE categories SET deleted = TRUE, deleted_at = NOW(), updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "no matching record found for id {} in categories",
                id
            )));
        }

        tracing::info!("Category soft deleted: id={}", id);

        Ok(())
    }
}
