use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::categories::models::Category;
use crate::features::doctors::dtos::{DoctorDetailDto, DoctorForm, DoctorResponseDto, NewDoctor};
use crate::features::doctors::models::Doctor;
use crate::features::hospitals::models::Hospital;
use crate::modules::storage::{image_store, ImageStore};
use crate::shared::constants::DOCTOR_IMAGE_DIR;

/// Convert a database error into a caller-friendly AppError. Unique
/// violations on the email column become a Conflict.
fn handle_db_error(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.code() == Some(std::borrow::Cow::Borrowed("23505")) {
            return AppError::Conflict("email already in use".to_string());
        }
    }
    AppError::Database(e)
}

/// Service for doctor operations
pub struct DoctorService {
    pool: PgPool,
    images: Arc<ImageStore>,
}

impl DoctorService {
    pub fn new(pool: PgPool, images: Arc<ImageStore>) -> Self {
        Self { pool, images }
    }

    /// All non-deleted doctors with their category and hospital nested.
    pub async fn list(&self) -> Result<Vec<DoctorDetailDto>> {
        let doctors = sqlx::query_as::<_, Doctor>("SELECT * FROM doctors WHERE deleted = FALSE")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list doctors: {:?}", e);
                AppError::Database(e)
            })?;

        self.load_relations(doctors).await
    }

    /// One non-deleted doctor by id, as a list of zero or one elements.
    pub async fn get(&self, id: i64) -> Result<Vec<DoctorDetailDto>> {
        let doctors = sqlx::query_as::<_, Doctor>(
            "SELECT * FROM doctors WHERE deleted = FALSE AND id = $1",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        self.load_relations(doctors).await
    }

    /// Batched association loading: one query per parent table, keyed by
    /// foreign id. Parents are not filtered on `deleted`.
    async fn load_relations(&self, doctors: Vec<Doctor>) -> Result<Vec<DoctorDetailDto>> {
        if doctors.is_empty() {
            return Ok(Vec::new());
        }

        let category_ids: Vec<i64> = doctors.iter().map(|d| d.category_id).collect();
        let hospital_ids: Vec<i64> = doctors.iter().map(|d| d.hospital_id).collect();

        let categories: HashMap<i64, Category> =
            sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE id = ANY($1)")
                .bind(&category_ids)
                .fetch_all(&self.pool)
                .await
                .map_err(AppError::Database)?
                .into_iter()
                .map(|c| (c.id, c))
                .collect();

        let hospitals: HashMap<i64, Hospital> =
            sqlx::query_as::<_, Hospital>("SELECT * FROM hospitals WHERE id = ANY($1)")
                .bind(&hospital_ids)
                .fetch_all(&self.pool)
                .await
                .map_err(AppError::Database)?
                .into_iter()
                .map(|h| (h.id, h))
                .collect();

        Ok(doctors
            .into_iter()
            .map(|d| {
                let category = categories.get(&d.category_id).cloned().map(Into::into);
                let hospital = hospitals.get(&d.hospital_id).cloned().map(Into::into);
                DoctorDetailDto {
                    doctor: d.into(),
                    category,
                    hospital,
                }
            })
            .collect())
    }

    async fn category_exists(&self, id: i64) -> Result<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM categories WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn hospital_exists(&self, id: i64) -> Result<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM hospitals WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    /// Email uniqueness spans deleted and non-deleted rows alike.
    async fn email_in_use(&self, email: &str, exclude_id: Option<i64>) -> Result<bool> {
        let query = match exclude_id {
            Some(_) => "SELECT EXISTS(SELECT 1 FROM doctors WHERE email = $1 AND id <> $2)",
            None => "SELECT EXISTS(SELECT 1 FROM doctors WHERE email = $1)",
        };

        let mut q = sqlx::query_scalar::<_, bool>(query).bind(email);
        if let Some(id) = exclude_id {
            q = q.bind(id);
        }

        q.fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    /// Referential checks, optional image write, insert.
    pub async fn create(&self, new: NewDoctor) -> Result<DoctorResponseDto> {
        // A soft-deleted parent still satisfies existence
        if !self.category_exists(new.category_id).await? {
            return Err(AppError::Validation(format!(
                "category_id {} does not reference an existing category",
                new.category_id
            )));
        }
        if !self.hospital_exists(new.hospital_id).await? {
            return Err(AppError::Validation(format!(
                "hospital_id {} does not reference an existing hospital",
                new.hospital_id
            )));
        }
        if self.email_in_use(&new.email, None).await? {
            return Err(AppError::Conflict("email already in use".to_string()));
        }

        let mut image_path: Option<String> = None;
        if let Some(imagen) = &new.imagen {
            let file_name = image_store::unique_name(6, imagen);
            image_path = Some(
                self.images
                    .store(DOCTOR_IMAGE_DIR, &file_name, &imagen.data)
                    .await?,
            );
        }

        let doctor = sqlx::query_as::<_, Doctor>(
            r#"
            INSERT INTO doctors (
                first_name, last_name, imagen, category_id, hospital_id,
                phone_number, favorite, email, about_me, experience,
                hospital_experience, deleted
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, FALSE)
            RETURNING *
            "#,
        )
        .bind(&new.first_name)
        .bind(&new.last_name)
        .bind(&image_path)
        .bind(new.category_id)
        .bind(new.hospital_id)
        .bind(&new.phone_number)
        .bind(new.favorite)
        .bind(&new.email)
        .bind(&new.about_me)
        .bind(&new.experience)
        .bind(&new.hospital_experience)
        .fetch_one(&self.pool)
        .await
        .map_err(handle_db_error)?;

        tracing::info!("Doctor created: id={}", doctor.id);

        Ok(doctor.into())
    }

    /// Partial update. The lookup runs first and does not filter on
    /// `deleted`; a missing id wins over an invalid payload.
    pub async fn update(&self, id: i64, form: DoctorForm) -> Result<DoctorResponseDto> {
        let doctor = sqlx::query_as::<_, Doctor>("SELECT * FROM doctors WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?
            .ok_or_else(|| AppError::NotFound("Doctor no encontrado.".to_string()))?;

        form.validate_update()?;

        if let Some(category_id) = form.category_id {
            if !self.category_exists(category_id).await? {
                return Err(AppError::Validation(format!(
                    "category_id {} does not reference an existing category",
                    category_id
                )));
            }
        }
        if let Some(hospital_id) = form.hospital_id {
            if !self.hospital_exists(hospital_id).await? {
                return Err(AppError::Validation(format!(
                    "hospital_id {} does not reference an existing hospital",
                    hospital_id
                )));
            }
        }
        if let Some(email) = &form.email {
            if self.email_in_use(email, Some(id)).await? {
                return Err(AppError::Conflict("email already in use".to_string()));
            }
        }

        let mut image_path: Option<String> = None;
        if let Some(imagen) = &form.imagen {
            // Unlike category updates, the replaced file is removed from disk
            if let Some(old) = &doctor.imagen {
                self.images.remove_if_exists(old).await?;
            }

            // The stored name keeps the shipped `<token>.<stem>_<ext>` order
            let token = image_store::random_token(6);
            let ext = imagen.extension();
            let file_name = if ext.is_empty() {
                format!("{}.{}", token, imagen.stem())
            } else {
                format!("{}.{}_{}", token, imagen.stem(), ext)
            };

            image_path = Some(
                self.images
                    .store(DOCTOR_IMAGE_DIR, &file_name, &imagen.data)
                    .await?,
            );
        }

        let doctor = sqlx::query_as::<_, Doctor>(
            r#"
            UPDATE doctors
            SET first_name          = COALESCE($1, first_name),
                last_name           = COALESCE($2, last_name),
                imagen              = COALESCE($3, imagen),
                category_id         = COALESCE($4, category_id),
                hospital_id         = COALESCE($5, hospital_id),
                phone_number        = COALESCE($6, phone_number),
                favorite            = COALESCE($7, favorite),
                email               = COALESCE($8, email),
                about_me            = COALESCE($9, about_me),
                experience          = COALESCE($10, experience),
                hospital_experience = COALESCE($11, hospital_experience),
                updated_at          = NOW()
            WHERE id = $12
            RETURNING *
            "#,
        )
        .bind(&form.first_name)
        .bind(&form.last_name)
        .bind(&image_path)
        .bind(form.category_id)
        .bind(form.hospital_id)
        .bind(&form.phone_number)
        .bind(form.favorite)
        .bind(&form.email)
        .bind(&form.about_me)
        .bind(&form.experience)
        .bind(&form.hospital_experience)
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(handle_db_error)?;

        Ok(doctor.into())
    }

    /// Soft delete; the lookup does not filter on `deleted`, so deleting
    /// twice succeeds.
    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query(
            "UPDATE doctors SET deleted = TRUE, deleted_at = NOW(), updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "no matching record found for id {} in doctors",
                id
            )));
        }

        tracing::info!("Doctor soft deleted: id={}", id);

        Ok(())
    }
}
