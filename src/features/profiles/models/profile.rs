use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::shared::constants::{SECTOR_REVENDA, SECTOR_VAREJO};

/// Customer classification driving price tier and WhatsApp contact routing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Default)]
#[serde(rename_all = "lowercase")]
pub enum Sector {
    /// Retail
    #[default]
    Varejo,
    /// Wholesale / reseller
    Revenda,
}

impl Sector {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sector::Varejo => SECTOR_VAREJO,
            Sector::Revenda => SECTOR_REVENDA,
        }
    }

    /// Parse the stored sector value. Unknown values fall back to retail,
    /// the default new accounts are tagged with.
    pub fn parse(value: &str) -> Self {
        if value == SECTOR_REVENDA {
            Sector::Revenda
        } else {
            Sector::Varejo
        }
    }
}

/// Database model for the application-level profile row, one-to-one with a
/// provider identity. Created asynchronously by a provider-side trigger
/// after sign-up.
#[derive(Debug, Clone, FromRow)]
pub struct Profile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub email: String,
    pub phone: Option<String>,
    pub setor: String,
    pub is_admin: bool,
    pub is_blocked: bool,
    pub created_at: DateTime<Utc>,
}

impl Profile {
    pub fn sector(&self) -> Sector {
        Sector::parse(&self.setor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sector_round_trip() {
        assert_eq!(Sector::parse("varejo"), Sector::Varejo);
        assert_eq!(Sector::parse("revenda"), Sector::Revenda);
        assert_eq!(Sector::parse(Sector::Revenda.as_str()), Sector::Revenda);
    }

    #[test]
    fn test_unknown_sector_defaults_to_retail() {
        assert_eq!(Sector::parse("atacado"), Sector::Varejo);
        assert_eq!(Sector::parse(""), Sector::Varejo);
    }
}
