use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::products::models::Product;

/// Response DTO for product
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductResponseDto {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price_varejo: Decimal,
    pub price_revenda: Decimal,
    pub image_url: Option<String>,
    pub category_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl From<Product> for ProductResponseDto {
    fn from(p: Product) -> Self {
        Self {
            id: p.id,
            name: p.name,
            description: p.description,
            price_varejo: p.price_varejo,
            price_revenda: p.price_revenda,
            image_url: p.image_url,
            category_id: p.category_id,
            created_at: p.created_at,
        }
    }
}

/// Request DTO for creating a product
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateProductDto {
    #[validate(length(min = 1, max = 200, message = "Nome do produto é obrigatório"))]
    pub name: String,

    pub description: Option<String>,

    /// Retail price
    pub price_varejo: Decimal,

    /// Wholesale price
    pub price_revenda: Decimal,

    pub image_url: Option<String>,

    pub category_id: Option<Uuid>,
}

/// Request DTO for updating a product. Absent fields keep their value.
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateProductDto {
    #[validate(length(min = 1, max = 200, message = "Nome do produto é obrigatório"))]
    pub name: Option<String>,

    pub description: Option<String>,

    pub price_varejo: Option<Decimal>,

    pub price_revenda: Option<Decimal>,

    pub image_url: Option<String>,

    pub category_id: Option<Uuid>,
}
