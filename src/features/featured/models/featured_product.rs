use sqlx::FromRow;
use uuid::Uuid;

/// Database model for a home-page featured product slot
#[derive(Debug, Clone, FromRow)]
pub struct FeaturedProduct {
    pub id: Uuid,
    pub product_id: Uuid,
    pub position: i32,
}
