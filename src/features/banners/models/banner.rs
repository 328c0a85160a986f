use sqlx::FromRow;
use uuid::Uuid;

/// Database model for a carousel banner
#[derive(Debug, Clone, FromRow)]
pub struct Banner {
    pub id: Uuid,
    pub title: String,
    pub image_url: String,
    pub link_url: Option<String>,
    pub is_active: bool,
    pub order_position: i32,
}
