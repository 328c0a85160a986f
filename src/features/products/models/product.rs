use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

use crate::features::profiles::models::Sector;

/// Database model for product
#[derive(Debug, Clone, FromRow)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price_varejo: Decimal,
    pub price_revenda: Decimal,
    pub image_url: Option<String>,
    pub category_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Price tier for the given customer sector
    pub fn price_for(&self, sector: Sector) -> Decimal {
        match sector {
            Sector::Varejo => self.price_varejo,
            Sector::Revenda => self.price_revenda,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_price_tier_selection() {
        let product = Product {
            id: Uuid::new_v4(),
            name: "SSD 1TB".to_string(),
            description: None,
            price_varejo: Decimal::new(49990, 2),
            price_revenda: Decimal::new(42990, 2),
            image_url: None,
            category_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        assert_eq!(product.price_for(Sector::Varejo), Decimal::new(49990, 2));
        assert_eq!(product.price_for(Sector::Revenda), Decimal::new(42990, 2));
    }
}
