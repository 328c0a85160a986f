use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::settings::dtos::UpdateStoreSettingsDto;
use crate::features::settings::models::StoreSettings;
use crate::shared::constants::{DEFAULT_WHATSAPP_REVENDA, DEFAULT_WHATSAPP_VAREJO};

const SELECT_COLUMNS: &str =
    "id, whatsapp_varejo, whatsapp_revenda, instagram_url, facebook_url, updated_at";

/// Service for the store's contact settings (single row)
pub struct SettingsService {
    pool: PgPool,
}

impl SettingsService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Current settings; the shipped store numbers act as the fallback row
    /// until an admin saves one.
    pub async fn get(&self) -> Result<StoreSettings> {
        let settings = sqlx::query_as::<_, StoreSettings>(&format!(
            "SELECT {} FROM store_settings ORDER BY updated_at DESC LIMIT 1",
            SELECT_COLUMNS
        ))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch store settings: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(settings.unwrap_or_else(Self::defaults))
    }

    fn defaults() -> StoreSettings {
        StoreSettings {
            id: Uuid::nil(),
            whatsapp_varejo: DEFAULT_WHATSAPP_VAREJO.to_string(),
            whatsapp_revenda: DEFAULT_WHATSAPP_REVENDA.to_string(),
            instagram_url: None,
            facebook_url: None,
            updated_at: Utc::now(),
        }
    }

    /// Upsert the settings row
    pub async fn update(&self, dto: UpdateStoreSettingsDto) -> Result<StoreSettings> {
        let current = self.get().await?;

        let whatsapp_varejo = dto.whatsapp_varejo.unwrap_or(current.whatsapp_varejo);
        let whatsapp_revenda = dto.whatsapp_revenda.unwrap_or(current.whatsapp_revenda);
        let instagram_url = dto.instagram_url.or(current.instagram_url);
        let facebook_url = dto.facebook_url.or(current.facebook_url);

        let settings = if current.id.is_nil() {
            sqlx::query_as::<_, StoreSettings>(&format!(
                r#"
                INSERT INTO store_settings (whatsapp_varejo, whatsapp_revenda, instagram_url, facebook_url)
                VALUES ($1, $2, $3, $4)
                RETURNING {}
                "#,
                SELECT_COLUMNS
            ))
            .bind(&whatsapp_varejo)
            .bind(&whatsapp_revenda)
            .bind(&instagram_url)
            .bind(&facebook_url)
            .fetch_one(&self.pool)
            .await
        } else {
            sqlx::query_as::<_, StoreSettings>(&format!(
                r#"
                UPDATE store_settings
                SET whatsapp_varejo = $1,
                    whatsapp_revenda = $2,
                    instagram_url = $3,
                    facebook_url = $4,
                    updated_at = NOW()
                WHERE id = $5
                RETURNING {}
                "#,
                SELECT_COLUMNS
            ))
            .bind(&whatsapp_varejo)
            .bind(&whatsapp_revenda)
            .bind(&instagram_url)
            .bind(&facebook_url)
            .bind(current.id)
            .fetch_one(&self.pool)
            .await
        }
        .map_err(|e| {
            tracing::error!("Failed to save store settings: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!("Store settings saved");
        Ok(settings)
    }
}
