use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::features::profiles::models::Sector;

/// Database model for the single store settings row
#[derive(Debug, Clone, FromRow)]
pub struct StoreSettings {
    pub id: Uuid,
    pub whatsapp_varejo: String,
    pub whatsapp_revenda: String,
    pub instagram_url: Option<String>,
    pub facebook_url: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl StoreSettings {
    /// WhatsApp number routing for the given customer sector
    pub fn whatsapp_for(&self, sector: Sector) -> &str {
        match sector {
            Sector::Varejo => &self.whatsapp_varejo,
            Sector::Revenda => &self.whatsapp_revenda,
        }
    }
}
