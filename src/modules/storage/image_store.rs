use rand::distributions::Alphanumeric;
use rand::Rng;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::core::error::{AppError, Result};
use crate::shared::validation::sanitize_file_name;

/// Content types accepted for uploaded images.
pub const ALLOWED_IMAGE_TYPES: &[&str] =
    &["image/jpeg", "image/jpg", "image/png", "image/gif"];

/// Maximum accepted image size (2048 KB).
pub const MAX_IMAGE_SIZE: usize = 2 * 1024 * 1024;

/// An image file collected from a multipart form field.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

impl UploadedImage {
    /// Check the content type against the allow-list and the 2048 KB size
    /// cap. Runs before anything touches the disk.
    pub fn validate(&self) -> Result<()> {
        if !ALLOWED_IMAGE_TYPES.contains(&self.content_type.as_str()) {
            return Err(AppError::Validation(format!(
                "image type '{}' is not allowed, allowed types: jpeg, png, jpg, gif",
                self.content_type
            )));
        }

        if self.data.len() > MAX_IMAGE_SIZE {
            return Err(AppError::Validation(
                "image exceeds the maximum size of 2048 KB".to_string(),
            ));
        }

        Ok(())
    }

    /// Sanitized base name of the original upload, without the extension.
    pub fn stem(&self) -> String {
        let stem = Path::new(&self.file_name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("imagen");
        sanitize_file_name(stem)
    }

    /// Sanitized extension of the original upload ("" if it has none).
    pub fn extension(&self) -> String {
        let ext = Path::new(&self.file_name)
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or("");
        sanitize_file_name(ext)
    }
}

/// Random alphanumeric token for stored file names. Collision avoidance
/// only, no security property.
pub fn random_token(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Standard stored name: `<token>_<original-stem>.<ext>`.
pub fn unique_name(token_len: usize, image: &UploadedImage) -> String {
    let token = random_token(token_len);
    let ext = image.extension();
    if ext.is_empty() {
        format!("{}_{}", token, image.stem())
    } else {
        format!("{}_{}.{}", token, image.stem(), ext)
    }
}

/// Writes uploaded images under a public root directory and hands back the
/// relative path stored on the entity.
#[derive(Debug, Clone)]
pub struct ImageStore {
    root: PathBuf,
}

impl ImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Write `data` to `<root>/<dir>/<file_name>`, creating the directory if
    /// needed, and return the relative `<dir>/<file_name>` path.
    pub async fn store(&self, dir: &str, file_name: &str, data: &[u8]) -> Result<String> {
        let target_dir = self.root.join(dir);
        fs::create_dir_all(&target_dir).await.map_err(|e| {
            AppError::Storage(format!("failed to create directory {}: {}", dir, e))
        })?;

        let path = target_dir.join(file_name);
        fs::write(&path, data).await.map_err(|e| {
            AppError::Storage(format!("failed to write {}: {}", path.display(), e))
        })?;

        tracing::debug!("Image stored: {}/{}", dir, file_name);

        Ok(format!("{}/{}", dir, file_name))
    }

    /// Remove a previously stored image if it is still on disk. Missing
    /// files are not an error.
    pub async fn remove_if_exists(&self, rel_path: &str) -> Result<()> {
        let path = self.root.join(rel_path);
        if fs::try_exists(&path).await.unwrap_or(false) {
            fs::remove_file(&path).await.map_err(|e| {
                AppError::Storage(format!("failed to remove {}: {}", path.display(), e))
            })?;
            tracing::debug!("Image removed: {}", rel_path);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn jpeg(name: &str, size: usize) -> UploadedImage {
        UploadedImage {
            file_name: name.to_string(),
            content_type: "image/jpeg".to_string(),
            data: vec![0u8; size],
        }
    }

    #[test]
    fn random_token_is_alphanumeric_of_requested_length() {
        for len in [4, 6, 10] {
            let token = random_token(len);
            assert_eq!(token.len(), len);
            assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn unique_name_keeps_stem_and_extension() {
        let name = unique_name(4, &jpeg("cardiology.jpg", 10));
        assert!(name.ends_with("_cardiology.jpg"), "got {}", name);
        assert_eq!(name.len(), "_cardiology.jpg".len() + 4);
    }

    #[test]
    fn unique_name_without_extension_has_no_trailing_dot() {
        let name = unique_name(6, &jpeg("portada", 10));
        assert!(name.ends_with("_portada"), "got {}", name);
        assert!(!name.contains('.'));
    }

    #[test]
    fn validate_rejects_oversize_image() {
        let err = jpeg("big.jpg", MAX_IMAGE_SIZE + 1).validate().unwrap_err();
        assert!(err.to_string().contains("2048 KB"));
    }

    #[test]
    fn validate_rejects_non_image_type() {
        let image = UploadedImage {
            file_name: "nota.pdf".to_string(),
            content_type: "application/pdf".to_string(),
            data: vec![0u8; 10],
        };
        let err = image.validate().unwrap_err();
        assert!(err.to_string().contains("not allowed"));
    }

    #[test]
    fn validate_accepts_small_gif() {
        let image = UploadedImage {
            file_name: "icono.gif".to_string(),
            content_type: "image/gif".to_string(),
            data: vec![0u8; 512],
        };
        assert!(image.validate().is_ok());
    }

    #[tokio::test]
    async fn store_and_remove_roundtrip() {
        let root = std::env::temp_dir().join(format!("medidir-test-{}", Uuid::new_v4()));
        let store = ImageStore::new(&root);

        let rel = store
            .store("images_categorias", "AB12_foto.jpg", b"bytes")
            .await
            .unwrap();
        assert_eq!(rel, "images_categorias/AB12_foto.jpg");
        assert!(root.join(&rel).exists());

        store.remove_if_exists(&rel).await.unwrap();
        assert!(!root.join(&rel).exists());

        // a second removal of the same path is a no-op
        store.remove_if_exists(&rel).await.unwrap();

        tokio::fs::remove_dir_all(&root).await.unwrap();
    }
}
