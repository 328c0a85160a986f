use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::categories::dtos::{
    CategoryResponseDto, CreateCategoryDto, UpdateCategoryDto,
};
use crate::features::categories::models::Category;
use crate::shared::slug::slugify;
use crate::shared::validation::SLUG_REGEX;

const SELECT_COLUMNS: &str =
    "id, name, slug, description, show_in_explore, icon_symbol, created_at";

/// Convert database errors into specific responses for slug collisions
fn handle_db_error(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        // Unique constraint violation (PostgreSQL error code 23505)
        if db_err.code() == Some(std::borrow::Cow::Borrowed("23505")) {
            return AppError::Conflict("Já existe uma categoria com este slug".to_string());
        }
    }
    AppError::Database(e)
}

/// Service for category operations
pub struct CategoryService {
    pool: PgPool,
}

impl CategoryService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Resolve the slug for a create/update: explicit slugs must already be
    /// valid, absent ones are derived from the name.
    fn resolve_slug(name: &str, slug: Option<String>) -> Result<String> {
        let slug = match slug.filter(|s| !s.trim().is_empty()) {
            Some(s) => s.trim().to_string(),
            None => slugify(name),
        };

        if !SLUG_REGEX.is_match(&slug) {
            return Err(AppError::Validation(
                "Slug inválido: use apenas letras minúsculas, números e hífens".to_string(),
            ));
        }

        Ok(slug)
    }

    /// List all categories, ordered by name
    pub async fn list(&self) -> Result<Vec<CategoryResponseDto>> {
        let categories = sqlx::query_as::<_, Category>(&format!(
            "SELECT {} FROM categories ORDER BY name", SELECT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list categories: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(categories.into_iter().map(Into::into).collect())
    }

    /// List the categories shown in the storefront's explore section
    pub async fn list_explore(&self) -> Result<Vec<CategoryResponseDto>> {
        let categories = sqlx::query_as::<_, Category>(&format!(
            "SELECT {} FROM categories WHERE show_in_explore = TRUE ORDER BY name",
            SELECT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list explore categories: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(categories.into_iter().map(Into::into).collect())
    }

    /// Get category by slug
    pub async fn get_by_slug(&self, slug: &str) -> Result<CategoryResponseDto> {
        let category = sqlx::query_as::<_, Category>(&format!(
            "SELECT {} FROM categories WHERE slug = $1", SELECT_COLUMNS
        ))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get category by slug: {:?}", e);
            AppError::Database(e)
        })?;

        category
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound(format!("Category '{}' not found", slug)))
    }

    /// Create a new category
    pub async fn create(&self, dto: CreateCategoryDto) -> Result<CategoryResponseDto> {
        let slug = Self::resolve_slug(&dto.name, dto.slug)?;

        let category = sqlx::query_as::<_, Category>(&format!(
            r#"
            INSERT INTO categories (name, slug, description, show_in_explore, icon_symbol)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            SELECT_COLUMNS
        ))
        .bind(&dto.name)
        .bind(&slug)
        .bind(dto.description.filter(|d| !d.is_empty()))
        .bind(dto.show_in_explore)
        .bind(&dto.icon_symbol)
        .fetch_one(&self.pool)
        .await
        .map_err(handle_db_error)?;

        tracing::info!("Category created: {} ({})", category.name, category.slug);
        Ok(category.into())
    }

    /// Update a category. A changed name without an explicit slug re-derives
    /// the slug from the new name.
    pub async fn update(&self, id: Uuid, dto: UpdateCategoryDto) -> Result<CategoryResponseDto> {
        let slug = match (&dto.name, dto.slug) {
            (_, Some(slug)) => Some(Self::resolve_slug(dto.name.as_deref().unwrap_or(""), Some(slug))?),
            (Some(name), None) => Some(Self::resolve_slug(name, None)?),
            (None, None) => None,
        };

        let category = sqlx::query_as::<_, Category>(&format!(
            r#"
            UPDATE categories
            SET name = COALESCE($1, name),
                slug = COALESCE($2, slug),
                description = COALESCE($3, description),
                show_in_explore = COALESCE($4, show_in_explore),
                icon_symbol = COALESCE($5, icon_symbol)
            WHERE id = $6
            RETURNING {}
            "#,
            SELECT_COLUMNS
        ))
        .bind(dto.name)
        .bind(slug)
        .bind(dto.description)
        .bind(dto.show_in_explore)
        .bind(dto.icon_symbol)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(handle_db_error)?
        .ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))?;

        Ok(category.into())
    }

    /// Delete a category
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete category: {:?}", e);
                AppError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Category {} not found", id)));
        }

        tracing::info!("Category deleted: {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_slug_derives_from_name() {
        assert_eq!(
            CategoryService::resolve_slug("Placas de Vídeo", None).unwrap(),
            "placas-de-video"
        );
    }

    #[test]
    fn test_resolve_slug_keeps_valid_explicit_slug() {
        assert_eq!(
            CategoryService::resolve_slug("Placas de Vídeo", Some("gpus".to_string())).unwrap(),
            "gpus"
        );
    }

    #[test]
    fn test_resolve_slug_rejects_invalid_explicit_slug() {
        let err = CategoryService::resolve_slug("Name", Some("Bad Slug!".to_string()));
        assert!(matches!(err, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_resolve_slug_blank_explicit_slug_falls_back_to_name() {
        assert_eq!(
            CategoryService::resolve_slug("Memória RAM", Some("  ".to_string())).unwrap(),
            "memoria-ram"
        );
    }
}
