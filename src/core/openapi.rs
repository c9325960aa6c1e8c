use utoipa::{Modify, OpenApi};

use crate::features::categories::{dtos as categories_dtos, handlers as categories_handlers};
use crate::features::doctors::{dtos as doctors_dtos, handlers as doctors_handlers};
use crate::features::hospitals::{dtos as hospitals_dtos, handlers as hospitals_handlers};
use crate::shared::types::ApiResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        // Categories
        categories_handlers::list_categories,
        categories_handlers::list_category_doctors,
        categories_handlers::create_category,
        categories_handlers::update_category,
        categories_handlers::delete_category,
        // Doctors
        doctors_handlers::list_doctors,
        doctors_handlers::get_doctor,
        doctors_handlers::create_doctor,
        doctors_handlers::update_doctor,
        doctors_handlers::delete_doctor,
        // Hospitals
        hospitals_handlers::list_hospitals,
        hospitals_handlers::create_hospital,
        hospitals_handlers::update_hospital,
        hospitals_handlers::delete_hospital,
    ),
    components(
        schemas(
            // Categories
            categories_dtos::CategoryResponseDto,
            categories_dtos::CategoryWithDoctorsDto,
            categories_dtos::CategoryFormDto,
            ApiResponse<categories_dtos::CategoryResponseDto>,
            ApiResponse<Vec<categories_dtos::CategoryResponseDto>>,
            ApiResponse<categories_dtos::CategoryWithDoctorsDto>,
            // Doctors
            doctors_dtos::DoctorResponseDto,
            doctors_dtos::DoctorDetailDto,
            doctors_dtos::DoctorFormDto,
            ApiResponse<doctors_dtos::DoctorResponseDto>,
            ApiResponse<Vec<doctors_dtos::DoctorDetailDto>>,
            // Hospitals
            hospitals_dtos::HospitalResponseDto,
            hospitals_dtos::CreateHospitalDto,
            hospitals_dtos::UpdateHospitalDto,
            ApiResponse<hospitals_dtos::HospitalResponseDto>,
            ApiResponse<Vec<hospitals_dtos::HospitalResponseDto>>,
        )
    ),
    tags(
        (name = "categories", description = "Category directory (public)"),
        (name = "doctors", description = "Doctor directory with category and hospital associations"),
        (name = "hospitals", description = "Hospital directory"),
    ),
    info(
        title = "Medidir API",
        version = "0.1.0",
        description = "API para gestionar categorías, doctores y hospitales",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
