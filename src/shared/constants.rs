/// Directory for category images, relative to the public root.
pub const CATEGORY_IMAGE_DIR: &str = "images_categorias";

/// Directory for doctor images, relative to the public root.
pub const DOCTOR_IMAGE_DIR: &str = "imagen_doctor";
