use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::banners::dtos::{BannerResponseDto, CreateBannerDto, UpdateBannerDto};
use crate::features::banners::models::Banner;

const SELECT_COLUMNS: &str = "id, title, image_url, link_url, is_active, order_position";

/// Service for carousel banners
pub struct BannerService {
    pool: PgPool,
}

impl BannerService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Active banners in carousel order
    pub async fn list_active(&self) -> Result<Vec<BannerResponseDto>> {
        let banners = sqlx::query_as::<_, Banner>(&format!(
            "SELECT {} FROM banners WHERE is_active = TRUE ORDER BY order_position",
            SELECT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list banners: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(banners.into_iter().map(Into::into).collect())
    }

    /// All banners for the admin screen, carousel order first
    pub async fn list_all(&self) -> Result<Vec<BannerResponseDto>> {
        let banners = sqlx::query_as::<_, Banner>(&format!(
            "SELECT {} FROM banners ORDER BY order_position, title",
            SELECT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list banners: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(banners.into_iter().map(Into::into).collect())
    }

    /// Create a new banner
    pub async fn create(&self, dto: CreateBannerDto) -> Result<BannerResponseDto> {
        let banner = sqlx::query_as::<_, Banner>(&format!(
            r#"
            INSERT INTO banners (title, image_url, link_url, is_active, order_position)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            SELECT_COLUMNS
        ))
        .bind(&dto.title)
        .bind(&dto.image_url)
        .bind(dto.link_url.filter(|u| !u.is_empty()))
        .bind(dto.is_active)
        .bind(dto.order_position)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create banner: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!("Banner created: {} ({})", banner.title, banner.id);
        Ok(banner.into())
    }

    /// Update a banner (including activation and carousel position)
    pub async fn update(&self, id: Uuid, dto: UpdateBannerDto) -> Result<BannerResponseDto> {
        let banner = sqlx::query_as::<_, Banner>(&format!(
            r#"
            UPDATE banners
            SET title = COALESCE($1, title),
                image_url = COALESCE($2, image_url),
                link_url = COALESCE($3, link_url),
                is_active = COALESCE($4, is_active),
                order_position = COALESCE($5, order_position)
            WHERE id = $6
            RETURNING {}
            "#,
            SELECT_COLUMNS
        ))
        .bind(dto.title)
        .bind(dto.image_url)
        .bind(dto.link_url)
        .bind(dto.is_active)
        .bind(dto.order_position)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update banner: {:?}", e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound(format!("Banner {} not found", id)))?;

        Ok(banner.into())
    }

    /// Delete a banner
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM banners WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete banner: {:?}", e);
                AppError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Banner {} not found", id)));
        }

        tracing::info!("Banner deleted: {}", id);
        Ok(())
    }
}
