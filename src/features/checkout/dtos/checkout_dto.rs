use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::profiles::models::Sector;

/// One selected slot of the build-your-own-PC composer
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BuildQuoteItemDto {
    /// Slot label ("Processador", "Placa Mãe", ...)
    pub label: String,
    /// Name of the selected product
    pub product_name: String,
}

/// Request DTO for a build-your-own-PC quote hand-off
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct BuildQuoteRequestDto {
    #[validate(length(min = 1, message = "Selecione pelo menos um componente"))]
    pub items: Vec<BuildQuoteItemDto>,

    /// Visitor sector driving phone routing (defaults to retail)
    #[serde(default)]
    pub sector: Sector,
}

/// Request DTO for a ready-PC interest hand-off
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReadyPcInterestDto {
    pub ready_pc_id: Uuid,

    /// Visitor sector driving phone routing and the quoted price tier
    #[serde(default)]
    pub sector: Sector,
}

/// Response DTO carrying the WhatsApp deep link
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct WhatsAppLinkDto {
    /// Deep link: https://wa.me/<phone>?text=<url-encoded message>
    pub url: String,
    /// Phone the visitor will be routed to
    pub phone: String,
}
