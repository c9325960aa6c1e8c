pub mod hospital_handler;

pub use hospital_handler::*;
