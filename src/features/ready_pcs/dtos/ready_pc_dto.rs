use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::products::dtos::ProductResponseDto;
use crate::features::ready_pcs::models::ReadyPc;

/// One component entry of a ready PC, enriched with its product when the
/// product row still exists
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReadyPcComponentDto {
    pub id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub product: Option<ProductResponseDto>,
}

/// Response DTO for a ready-built PC with its component list
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReadyPcResponseDto {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub image_url: Option<String>,
    pub game_image_url: Option<String>,
    pub price_varejo: Decimal,
    pub price_revenda: Decimal,
    pub specs: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub components: Vec<ReadyPcComponentDto>,
}

impl ReadyPcResponseDto {
    pub fn from_parts(pc: ReadyPc, components: Vec<ReadyPcComponentDto>) -> Self {
        Self {
            id: pc.id,
            name: pc.name,
            description: pc.description,
            image_url: pc.image_url,
            game_image_url: pc.game_image_url,
            price_varejo: pc.price_varejo,
            price_revenda: pc.price_revenda,
            specs: pc.specs,
            is_active: pc.is_active,
            created_at: pc.created_at,
            components,
        }
    }
}

/// Component selection sent by the admin screen
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ComponentInputDto {
    pub product_id: Uuid,
    #[serde(default = "default_quantity")]
    pub quantity: i32,
}

fn default_quantity() -> i32 {
    1
}

/// Request DTO for creating a ready PC.
///
/// When `price_varejo` is absent the retail price defaults to the sum of
/// the selected components' retail prices.
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateReadyPcDto {
    #[validate(length(min = 1, max = 200, message = "Nome é obrigatório"))]
    pub name: String,

    #[serde(default)]
    pub description: String,

    pub image_url: Option<String>,
    pub game_image_url: Option<String>,

    pub price_varejo: Option<Decimal>,

    #[serde(default)]
    pub price_revenda: Decimal,

    #[serde(default)]
    pub specs: String,

    #[serde(default = "default_active")]
    pub is_active: bool,

    #[validate(length(min = 1, message = "Selecione pelo menos um componente"))]
    pub components: Vec<ComponentInputDto>,
}

fn default_active() -> bool {
    true
}

/// Request DTO for updating a ready PC. Absent scalar fields keep their
/// value; a present `components` list replaces the component set.
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateReadyPcDto {
    #[validate(length(min = 1, max = 200, message = "Nome é obrigatório"))]
    pub name: Option<String>,

    pub description: Option<String>,
    pub image_url: Option<String>,
    pub game_image_url: Option<String>,
    pub price_varejo: Option<Decimal>,
    pub price_revenda: Option<Decimal>,
    pub specs: Option<String>,
    pub is_active: Option<bool>,

    #[validate(length(min = 1, message = "Selecione pelo menos um componente"))]
    pub components: Option<Vec<ComponentInputDto>>,
}
