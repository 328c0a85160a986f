use std::sync::Arc;

use chrono::Utc;
use rand::Rng;
use tracing::{debug, info};

use crate::core::error::{AppError, Result};
use crate::features::files::dtos::{get_extension_from_content_type, ImageUploadResponseDto};
use crate::modules::storage::MinIOClient;

/// Service for image uploads to object storage.
///
/// No metadata is persisted: the public URL is the handle the catalog
/// stores on products, banners and ready PCs.
pub struct FileService {
    storage: Arc<MinIOClient>,
}

impl FileService {
    pub fn new(storage: Arc<MinIOClient>) -> Self {
        Self { storage }
    }

    /// Object names are unique by construction: upload timestamp plus a
    /// short random suffix, keeping the original extension.
    fn generate_object_name(original_filename: &str, content_type: &str) -> String {
        let extension = get_extension_from_content_type(content_type)
            .unwrap_or_else(|| original_filename.rsplit('.').next().unwrap_or("bin"));

        let suffix: String = rand::thread_rng()
            .sample_iter(&rand::distributions::Alphanumeric)
            .take(6)
            .map(|c| (c as char).to_ascii_lowercase())
            .collect();

        format!("{}-{}.{}", Utc::now().timestamp_millis(), suffix, extension)
    }

    /// Upload an image and return its public URL
    pub async fn upload_image(
        &self,
        data: Vec<u8>,
        original_filename: &str,
        content_type: &str,
        folder: &str,
    ) -> Result<ImageUploadResponseDto> {
        let key = format!(
            "{}/{}",
            folder,
            Self::generate_object_name(original_filename, content_type)
        );

        self.storage.upload(&key, data, content_type).await?;
        debug!("Image uploaded: {}", key);

        let url = self.storage.get_public_url(&key);
        info!("Image available at {}", url);

        Ok(ImageUploadResponseDto { url })
    }

    /// Delete an image by its public URL
    pub async fn delete_by_url(&self, url: &str) -> Result<()> {
        let key = self
            .storage
            .extract_key_from_url(url)
            .ok_or_else(|| AppError::NotFound("Image not found".to_string()))?;

        self.storage.delete(&key).await?;
        info!("Image deleted: {}", key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_name_keeps_extension_and_is_unique() {
        let a = FileService::generate_object_name("gabinete.PNG", "image/png");
        let b = FileService::generate_object_name("gabinete.PNG", "image/png");

        assert!(a.ends_with(".png"));
        assert_ne!(a, b);
    }

    #[test]
    fn test_object_name_falls_back_to_filename_extension() {
        let name = FileService::generate_object_name("foto.jfif", "image/unknown");
        assert!(name.ends_with(".jfif"));
    }
}
