use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Upload request DTO for OpenAPI documentation.
/// Note: This struct is for Swagger UI documentation only.
/// The actual handler uses axum's Multipart extractor directly.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadImageDto {
    /// The image to upload
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub file: String,
    /// Optional destination folder (defaults to "products")
    #[schema(example = "banners")]
    pub folder: Option<String>,
}

/// Response DTO for image uploads
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ImageUploadResponseDto {
    /// Public URL of the uploaded image
    pub url: String,
}

/// Request DTO for deleting an image by URL
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct DeleteImageByUrlDto {
    /// The URL of the image to delete
    #[validate(url(message = "Invalid URL format"))]
    #[validate(length(min = 1, message = "url is required"))]
    pub url: String,
}

/// Response DTO for delete operations
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteImageResponseDto {
    /// Confirmation that the image was deleted
    pub deleted: bool,
}

/// Allowed MIME types for image uploads
pub const ALLOWED_MIME_TYPES: &[&str] = &[
    "image/jpeg",
    "image/png",
    "image/gif",
    "image/webp",
];

/// Maximum upload size in bytes (5MB)
pub const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

/// Check if a MIME type is allowed
pub fn is_mime_type_allowed(content_type: &str) -> bool {
    ALLOWED_MIME_TYPES.contains(&content_type)
}

/// Get file extension from content type
pub fn get_extension_from_content_type(content_type: &str) -> Option<&'static str> {
    match content_type {
        "image/jpeg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/gif" => Some("gif"),
        "image/webp" => Some("webp"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_image_types_allowed() {
        assert!(is_mime_type_allowed("image/png"));
        assert!(is_mime_type_allowed("image/webp"));
        assert!(!is_mime_type_allowed("application/pdf"));
        assert!(!is_mime_type_allowed("text/html"));
    }

    #[test]
    fn test_extension_mapping() {
        assert_eq!(get_extension_from_content_type("image/jpeg"), Some("jpg"));
        assert_eq!(get_extension_from_content_type("video/mp4"), None);
    }
}
