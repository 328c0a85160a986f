use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::products::dtos::{CreateProductDto, ProductResponseDto, UpdateProductDto};
use crate::features::products::models::Product;

const SELECT_COLUMNS: &str = "p.id, p.name, p.description, p.price_varejo, p.price_revenda, \
                              p.image_url, p.category_id, p.created_at, p.updated_at";

const RETURNING_COLUMNS: &str = "id, name, description, price_varejo, price_revenda, \
                                 image_url, category_id, created_at, updated_at";

/// Service for product operations
pub struct ProductService {
    pool: PgPool,
}

impl ProductService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List products for the storefront, optionally narrowed by a
    /// case-insensitive name search and/or a category slug, ordered by name.
    pub async fn list(
        &self,
        search: Option<&str>,
        categoria: Option<&str>,
    ) -> Result<Vec<ProductResponseDto>> {
        let search = search.map(str::trim).filter(|s| !s.is_empty());
        let categoria = categoria.map(str::trim).filter(|s| !s.is_empty());

        let products = sqlx::query_as::<_, Product>(&format!(
            r#"
            SELECT {}
            FROM products p
            LEFT JOIN categories c ON c.id = p.category_id
            WHERE ($1::text IS NULL OR p.name ILIKE '%' || $1 || '%')
              AND ($2::text IS NULL OR c.slug = $2)
            ORDER BY p.name
            "#,
            SELECT_COLUMNS
        ))
        .bind(search)
        .bind(categoria)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list products: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(products.into_iter().map(Into::into).collect())
    }

    /// Get product by id
    pub async fn get_by_id(&self, id: Uuid) -> Result<ProductResponseDto> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {} FROM products p WHERE p.id = $1",
            SELECT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get product: {:?}", e);
            AppError::Database(e)
        })?;

        product
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound(format!("Product {} not found", id)))
    }

    /// Fetch raw product rows by id set (ready-PC component assembly)
    pub async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Product>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {} FROM products p WHERE p.id = ANY($1)",
            SELECT_COLUMNS
        ))
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch products by ids: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(products)
    }

    /// Create a new product
    pub async fn create(&self, dto: CreateProductDto) -> Result<ProductResponseDto> {
        let product = sqlx::query_as::<_, Product>(&format!(
            r#"
            INSERT INTO products (name, description, price_varejo, price_revenda, image_url, category_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            RETURNING_COLUMNS
        ))
        .bind(&dto.name)
        .bind(dto.description.filter(|d| !d.is_empty()))
        .bind(dto.price_varejo)
        .bind(dto.price_revenda)
        .bind(dto.image_url.filter(|u| !u.is_empty()))
        .bind(dto.category_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create product: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!("Product created: {} ({})", product.name, product.id);
        Ok(product.into())
    }

    /// Update a product
    pub async fn update(&self, id: Uuid, dto: UpdateProductDto) -> Result<ProductResponseDto> {
        let product = sqlx::query_as::<_, Product>(&format!(
            r#"
            UPDATE products
            SET name = COALESCE($1, name),
                description = COALESCE($2, description),
                price_varejo = COALESCE($3, price_varejo),
                price_revenda = COALESCE($4, price_revenda),
                image_url = COALESCE($5, image_url),
                category_id = COALESCE($6, category_id),
                updated_at = NOW()
            WHERE id = $7
            RETURNING {}
            "#,
            RETURNING_COLUMNS
        ))
        .bind(dto.name)
        .bind(dto.description)
        .bind(dto.price_varejo)
        .bind(dto.price_revenda)
        .bind(dto.image_url)
        .bind(dto.category_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update product: {:?}", e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound(format!("Product {} not found", id)))?;

        Ok(product.into())
    }

    /// Delete a product
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete product: {:?}", e);
                AppError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Product {} not found", id)));
        }

        tracing::info!("Product deleted: {}", id);
        Ok(())
    }
}
