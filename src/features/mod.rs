pub mod categories;
pub mod doctors;
pub mod hospitals;
