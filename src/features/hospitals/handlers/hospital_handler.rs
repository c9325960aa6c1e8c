use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::core::extractor::AppJson;
use crate::features::hospitals::dtos::{
    CreateHospitalDto, HospitalResponseDto, UpdateHospitalDto,
};
use crate::features::hospitals::services::HospitalService;
use crate::shared::types::ApiResponse;

/// List all non-deleted hospitals
#[utoipa::path(
    get,
    path = "/api/hospital",
    responses(
        (status = 200, description = "List of hospitals", body = ApiResponse<Vec<HospitalResponseDto>>),
        (status = 500, description = "Server error")
    ),
    tag = "hospitals"
)]
pub async fn list_hospitals(
    State(service): State<Arc<HospitalService>>,
) -> (StatusCode, Json<ApiResponse<Vec<HospitalResponseDto>>>) {
    match service.list().await {
        Ok(hospitals) => (StatusCode::OK, Json(ApiResponse::success(hospitals))),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::failure(e.to_string())),
        ),
    }
}

/// Create a hospital
///
/// Permissive passthrough of name, address, phone_number and email; any
/// failure, a missing name included, answers HTTP 500 with the raw message.
#[utoipa::path(
    post,
    path = "/api/hospital",
    request_body = CreateHospitalDto,
    responses(
        (status = 201, description = "Hospital created", body = ApiResponse<HospitalResponseDto>),
        (status = 500, description = "Server error")
    ),
    tag = "hospitals"
)]
pub async fn create_hospital(
    State(service): State<Arc<HospitalService>>,
    AppJson(dto): AppJson<CreateHospitalDto>,
) -> (StatusCode, Json<ApiResponse<HospitalResponseDto>>) {
    match service.create(dto).await {
        Ok(hospital) => (StatusCode::CREATED, Json(ApiResponse::success(hospital))),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::failure(e.to_string())),
        ),
    }
}

/// Update a hospital
///
/// Full replace of the provided fields (explicit null overwrites). An
/// unknown id also answers HTTP 500 (shipped behavior).
#[utoipa::path(
    put,
    path = "/api/hospital/{id}",
    params(
        ("id" = i64, Path, description = "Hospital ID")
    ),
    request_body = UpdateHospitalDto,
    responses(
        (status = 200, description = "Hospital updated", body = ApiResponse<HospitalResponseDto>),
        (status = 500, description = "Unknown id or server error")
    ),
    tag = "hospitals"
)]
pub async fn update_hospital(
    State(service): State<Arc<HospitalService>>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<UpdateHospitalDto>,
) -> (StatusCode, Json<ApiResponse<HospitalResponseDto>>) {
    match service.update(id, dto).await {
        Ok(hospital) => (StatusCode::OK, Json(ApiResponse::success(hospital))),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::failure(e.to_string())),
        ),
    }
}

/// Soft delete a hospital
#[utoipa::path(
    delete,
    path = "/api/hospital/{id}",
    params(
        ("id" = i64, Path, description = "Hospital ID")
    ),
    responses(
        (status = 200, description = "Hospital soft deleted", body = ApiResponse<HospitalResponseDto>),
        (status = 500, description = "Unknown id or server error")
    ),
    tag = "hospitals"
)]
pub async fn delete_hospital(
    State(service): State<Arc<HospitalService>>,
    Path(id): Path<i64>,
) -> (StatusCode, Json<ApiResponse<HospitalResponseDto>>) {
    match service.delete(id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse::message_only("Se eliminó correctamente.")),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::failure(e.to_string())),
        ),
    }
}
