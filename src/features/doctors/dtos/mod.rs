pub mod doctor_dto;

pub use doctor_dto::{DoctorDetailDto, DoctorForm, DoctorFormDto, DoctorResponseDto, NewDoctor};
