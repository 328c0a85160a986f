use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for a ready-built PC
#[derive(Debug, Clone, FromRow)]
pub struct ReadyPc {
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
}

/// Join row tying a ready PC to one of its component products
#[derive(Debug, Clone, FromRow)]
pub struct ReadyPcComponent {
    pub id: Uuid,
    pub ready_pc_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
}
