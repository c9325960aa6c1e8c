pub mod hospital_service;

pub use hospital_service::HospitalService;
