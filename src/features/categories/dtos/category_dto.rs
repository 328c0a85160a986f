use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::categories::models::Category;

/// Response DTO for category
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponseDto {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub show_in_explore: bool,
    pub icon_symbol: Option<String>,
}

impl From<Category> for CategoryResponseDto {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
            slug: c.slug,
            description: c.description,
            show_in_explore: c.show_in_explore,
            icon_symbol: c.icon_symbol,
        }
    }
}

/// Request DTO for creating a category.
///
/// When `slug` is absent it is derived from the name (lowercased,
/// diacritics stripped, hyphenated).
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryDto {
    #[validate(length(min = 1, max = 100, message = "Nome da categoria é obrigatório"))]
    pub name: String,

    pub slug: Option<String>,

    pub description: Option<String>,

    #[serde(default)]
    pub show_in_explore: bool,

    /// Symbol name rendered by the storefront's explore section
    pub icon_symbol: Option<String>,
}

/// Request DTO for updating a category. Absent fields keep their value.
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateCategoryDto {
    #[validate(length(min = 1, max = 100, message = "Nome da categoria é obrigatório"))]
    pub name: Option<String>,

    pub slug: Option<String>,

    pub description: Option<String>,

    pub show_in_explore: Option<bool>,

    pub icon_symbol: Option<String>,
}
