use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::products::dtos::ProductResponseDto;

/// Featured slot joined to its product
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FeaturedProductDto {
    pub id: Uuid,
    pub position: i32,
    pub product: ProductResponseDto,
}

/// Bare featured slot (admin create/update responses)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FeaturedSlotDto {
    pub id: Uuid,
    pub product_id: Uuid,
    pub position: i32,
}

impl From<crate::features::featured::models::FeaturedProduct> for FeaturedSlotDto {
    fn from(f: crate::features::featured::models::FeaturedProduct) -> Self {
        Self {
            id: f.id,
            product_id: f.product_id,
            position: f.position,
        }
    }
}

/// Request DTO for featuring a product
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateFeaturedDto {
    pub product_id: Uuid,
    #[serde(default)]
    pub position: i32,
}

/// Request DTO for moving a featured slot
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateFeaturedDto {
    pub position: i32,
}
