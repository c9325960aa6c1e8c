pub mod hospital_dto;

pub use hospital_dto::{CreateHospitalDto, HospitalResponseDto, UpdateHospitalDto};
