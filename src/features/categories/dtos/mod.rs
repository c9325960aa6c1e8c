pub mod category_dto;

pub use category_dto::{
    CategoryForm, CategoryFormDto, CategoryResponseDto, CategoryWithDoctorsDto, NewCategory,
};
