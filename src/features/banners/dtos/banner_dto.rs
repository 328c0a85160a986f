use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::banners::models::Banner;

/// Response DTO for banner
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BannerResponseDto {
    pub id: Uuid,
    pub title: String,
    pub image_url: String,
    pub link_url: Option<String>,
    pub is_active: bool,
    pub order_position: i32,
}

impl From<Banner> for BannerResponseDto {
    fn from(b: Banner) -> Self {
        Self {
            id: b.id,
            title: b.title,
            image_url: b.image_url,
            link_url: b.link_url,
            is_active: b.is_active,
            order_position: b.order_position,
        }
    }
}

/// Request DTO for creating a banner
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateBannerDto {
    #[validate(length(min = 1, max = 200, message = "Título é obrigatório"))]
    pub title: String,

    #[validate(url(message = "URL da imagem inválida"))]
    pub image_url: String,

    pub link_url: Option<String>,

    #[serde(default = "default_active")]
    pub is_active: bool,

    #[serde(default)]
    pub order_position: i32,
}

fn default_active() -> bool {
    true
}

/// Request DTO for updating a banner. Absent fields keep their value.
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateBannerDto {
    #[validate(length(min = 1, max = 200, message = "Título é obrigatório"))]
    pub title: Option<String>,

    #[validate(url(message = "URL da imagem inválida"))]
    pub image_url: Option<String>,

    pub link_url: Option<String>,

    pub is_active: Option<bool>,

    pub order_position: Option<i32>,
}
