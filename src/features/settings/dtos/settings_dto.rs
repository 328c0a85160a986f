use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::settings::models::StoreSettings;

/// Response DTO for store contact settings
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StoreSettingsDto {
    /// Retail WhatsApp number (digits only, with country code)
    pub whatsapp_varejo: String,
    /// Wholesale WhatsApp number
    pub whatsapp_revenda: String,
    pub instagram_url: Option<String>,
    pub facebook_url: Option<String>,
}

impl From<StoreSettings> for StoreSettingsDto {
    fn from(s: StoreSettings) -> Self {
        Self {
            whatsapp_varejo: s.whatsapp_varejo,
            whatsapp_revenda: s.whatsapp_revenda,
            instagram_url: s.instagram_url,
            facebook_url: s.facebook_url,
        }
    }
}

/// Request DTO for updating store settings. Absent fields keep their value.
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateStoreSettingsDto {
    #[validate(length(min = 8, max = 20, message = "Número de WhatsApp inválido"))]
    pub whatsapp_varejo: Option<String>,

    #[validate(length(min = 8, max = 20, message = "Número de WhatsApp inválido"))]
    pub whatsapp_revenda: Option<String>,

    #[validate(url(message = "URL inválida"))]
    pub instagram_url: Option<String>,

    #[validate(url(message = "URL inválida"))]
    pub facebook_url: Option<String>,
}
