use std::collections::HashMap;
use std::sync::Arc;

use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::featured::dtos::{CreateFeaturedDto, FeaturedProductDto, UpdateFeaturedDto};
use crate::features::featured::models::FeaturedProduct;
use crate::features::products::services::ProductService;

const SELECT_COLUMNS: &str = "id, product_id, position";

/// Service for home-page featured products
pub struct FeaturedService {
    pool: PgPool,
    products: Arc<ProductService>,
}

impl FeaturedService {
    pub fn new(pool: PgPool, products: Arc<ProductService>) -> Self {
        Self { pool, products }
    }

    /// Featured products in position order, joined to product data.
    /// Slots whose product has been deleted are skipped.
    pub async fn list(&self) -> Result<Vec<FeaturedProductDto>> {
        let slots = sqlx::query_as::<_, FeaturedProduct>(&format!(
            "SELECT {} FROM featured_products ORDER BY position",
            SELECT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list featured products: {:?}", e);
            AppError::Database(e)
        })?;

        let product_ids: Vec<Uuid> = slots.iter().map(|s| s.product_id).collect();
        let products: HashMap<Uuid, _> = self
            .products
            .find_by_ids(&product_ids)
            .await?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();

        Ok(slots
            .into_iter()
            .filter_map(|slot| {
                products.get(&slot.product_id).cloned().map(|product| FeaturedProductDto {
                    id: slot.id,
                    position: slot.position,
                    product: product.into(),
                })
            })
            .collect())
    }

    /// Feature a product
    pub async fn create(&self, dto: CreateFeaturedDto) -> Result<FeaturedProduct> {
        let slot = sqlx::query_as::<_, FeaturedProduct>(&format!(
            r#"
            INSERT INTO featured_products (product_id, position)
            VALUES ($1, $2)
            RETURNING {}
            "#,
            SELECT_COLUMNS
        ))
        .bind(dto.product_id)
        .bind(dto.position)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.code() == Some(std::borrow::Cow::Borrowed("23505")) {
                    return AppError::Conflict("Produto já está em destaque".to_string());
                }
                if db_err.code() == Some(std::borrow::Cow::Borrowed("23503")) {
                    return AppError::BadRequest("Produto não existe".to_string());
                }
            }
            tracing::error!("Failed to feature product: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!("Product featured: {} at {}", slot.product_id, slot.position);
        Ok(slot)
    }

    /// Move a featured slot to another position
    pub async fn update(&self, id: Uuid, dto: UpdateFeaturedDto) -> Result<FeaturedProduct> {
        let slot = sqlx::query_as::<_, FeaturedProduct>(&format!(
            "UPDATE featured_products SET position = $1 WHERE id = $2 RETURNING {}",
            SELECT_COLUMNS
        ))
        .bind(dto.position)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to move featured product: {:?}", e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound(format!("Featured slot {} not found", id)))?;

        Ok(slot)
    }

    /// Remove a product from the featured list
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM featured_products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to remove featured product: {:?}", e);
                AppError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Featured slot {} not found", id)));
        }

        Ok(())
    }
}
