use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::core::error::{AppError, Result};
use crate::features::hospitals::dtos::{
    CreateHospitalDto, HospitalResponseDto, UpdateHospitalDto,
};
use crate::features::hospitals::models::Hospital;

/// Service for hospital operations
pub struct HospitalService {
    pool: PgPool,
}

impl HospitalService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List all non-deleted hospitals
    pub async fn list(&self) -> Result<Vec<HospitalResponseDto>> {
        let hospitals =
            sqlx::query_as::<_, Hospital>("SELECT * FROM hospitals WHERE deleted = FALSE")
                .fetch_all(&self.pool)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to list hospitals: {:?}", e);
                    AppError::Database(e)
                })?;

        Ok(hospitals.into_iter().map(Into::into).collect())
    }

    /// Permissive insert of whatever the caller sent.
    pub async fn create(&self, dto: CreateHospitalDto) -> Result<HospitalResponseDto> {
        let hospital = sqlx::query_as::<_, Hospital>(
            r#"
            INSERT INTO hospitals (name, address, phone_number, email, deleted)
            VALUES ($1, $2, $3, $4, FALSE)
            RETURNING *
            "#,
        )
        .bind(&dto.name)
        .bind(&dto.address)
        .bind(&dto.phone_number)
        .bind(&dto.email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert hospital: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!("Hospital created: id={}", hospital.id);

        Ok(hospital.into())
    }

    /// Write exactly the provided fields (explicit null overwrites); the
    /// lookup does not filter on `deleted`.
    pub async fn update(&self, id: i64, dto: UpdateHospitalDto) -> Result<HospitalResponseDto> {
        let hospital = sqlx::query_as::<_, Hospital>("SELECT * FROM hospitals WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "no matching record found for id {} in hospitals",
                    id
                ))
            })?;

        if dto.is_empty() {
            return Ok(hospital.into());
        }

        let mut query = QueryBuilder::<Postgres>::new("UPDATE hospitals SET updated_at = NOW()");
        if let Some(name) = dto.name {
            query.push(", name = ").push_bind(name);
        }
        if let Some(address) = dto.address {
            query.push(", address = ").push_bind(address);
        }
        if let Some(phone_number) = dto.phone_number {
            query.push(", phone_number = ").push_bind(phone_number);
        }
        if let Some(email) = dto.email {
            query.push(", email = ").push_bind(email);
        }
        query.push(" WHERE id = ").push_bind(id);
        query.push(" RETURNING *");

        let hospital = query
            .build_query_as::<Hospital>()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update hospital {}: {:?}", id, e);
                AppError::Database(e)
            })?;

        Ok(hospital.into())
    }

    /// Soft delete; deleting an already-deleted hospital still succeeds.
    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query(
            "UPDATE hospitals SET deleted = TRUE, deleted_at = NOW(), updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "no matching record found for id {} in hospitals",
                id
            )));
        }

        tracing::info!("Hospital soft deleted: id={}", id);

        Ok(())
    }
}
