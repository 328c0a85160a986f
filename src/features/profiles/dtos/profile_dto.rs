use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::profiles::models::{Profile, Sector};

/// Response DTO for a profile row
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProfileResponseDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub email: String,
    pub phone: Option<String>,
    pub setor: Sector,
    pub is_admin: bool,
    pub is_blocked: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Profile> for ProfileResponseDto {
    fn from(p: Profile) -> Self {
        let setor = p.sector();
        Self {
            id: p.id,
            user_id: p.user_id,
            email: p.email,
            phone: p.phone,
            setor,
            is_admin: p.is_admin,
            is_blocked: p.is_blocked,
            created_at: p.created_at,
        }
    }
}

/// Request DTO for admin profile updates. Absent fields keep their value.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateProfileDto {
    pub phone: Option<String>,
    pub setor: Option<Sector>,
    pub is_admin: Option<bool>,
    pub is_blocked: Option<bool>,
}
