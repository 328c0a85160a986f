use std::collections::HashMap;
use std::sync::Arc;

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::products::models::Product;
use crate::features::products::services::ProductService;
use crate::features::ready_pcs::dtos::{
    ComponentInputDto, CreateReadyPcDto, ReadyPcComponentDto, ReadyPcResponseDto, UpdateReadyPcDto,
};
use crate::features::ready_pcs::models::{ReadyPc, ReadyPcComponent};

const PC_COLUMNS: &str = "id, name, description, image_url, game_image_url, price_varejo, \
                          price_revenda, specs, is_active, created_at";

const COMPONENT_COLUMNS: &str = "id, ready_pc_id, product_id, quantity";

/// Service for ready-built PCs.
///
/// Component lists are assembled in memory from separate queries (PCs,
/// join rows, products) rather than a SQL join.
pub struct ReadyPcService {
    pool: PgPool,
    products: Arc<ProductService>,
}

impl ReadyPcService {
    pub fn new(pool: PgPool, products: Arc<ProductService>) -> Self {
        Self { pool, products }
    }

    /// Active ready PCs with components, newest first (storefront)
    pub async fn list_active(&self) -> Result<Vec<ReadyPcResponseDto>> {
        self.list_where("WHERE is_active = TRUE").await
    }

    /// All ready PCs with components (admin screen)
    pub async fn list_all(&self) -> Result<Vec<ReadyPcResponseDto>> {
        self.list_where("").await
    }

    async fn list_where(&self, where_clause: &str) -> Result<Vec<ReadyPcResponseDto>> {
        let pcs = sqlx::query_as::<_, ReadyPc>(&format!(
            "SELECT {} FROM ready_pcs {} ORDER BY created_at DESC",
            PC_COLUMNS, where_clause
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list ready PCs: {:?}", e);
            AppError::Database(e)
        })?;

        if pcs.is_empty() {
            return Ok(Vec::new());
        }

        let pc_ids: Vec<Uuid> = pcs.iter().map(|pc| pc.id).collect();
        let components = sqlx::query_as::<_, ReadyPcComponent>(&format!(
            "SELECT {} FROM ready_pc_components WHERE ready_pc_id = ANY($1)",
            COMPONENT_COLUMNS
        ))
        .bind(&pc_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch ready PC components: {:?}", e);
            AppError::Database(e)
        })?;

        let product_ids: Vec<Uuid> = components.iter().map(|c| c.product_id).collect();
        let products = self.products.find_by_ids(&product_ids).await?;

        Ok(Self::assemble(pcs, components, products))
    }

    /// Get one ready PC with its components
    pub async fn get_by_id(&self, id: Uuid) -> Result<ReadyPcResponseDto> {
        let pc = sqlx::query_as::<_, ReadyPc>(&format!(
            "SELECT {} FROM ready_pcs WHERE id = $1",
            PC_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get ready PC: {:?}", e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound(format!("Ready PC {} not found", id)))?;

        let components = sqlx::query_as::<_, ReadyPcComponent>(&format!(
            "SELECT {} FROM ready_pc_components WHERE ready_pc_id = $1",
            COMPONENT_COLUMNS
        ))
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        let product_ids: Vec<Uuid> = components.iter().map(|c| c.product_id).collect();
        let products = self.products.find_by_ids(&product_ids).await?;

        Ok(Self::assemble(vec![pc], components, products)
            .into_iter()
            .next()
            .expect("assemble returns one dto per pc"))
    }

    /// Stitch PCs, join rows and product rows into response DTOs
    fn assemble(
        pcs: Vec<ReadyPc>,
        components: Vec<ReadyPcComponent>,
        products: Vec<Product>,
    ) -> Vec<ReadyPcResponseDto> {
        let products_by_id: HashMap<Uuid, Product> =
            products.into_iter().map(|p| (p.id, p)).collect();

        let mut components_by_pc: HashMap<Uuid, Vec<ReadyPcComponentDto>> = HashMap::new();
        for component in components {
            let product = products_by_id.get(&component.product_id).cloned();
            components_by_pc
                .entry(component.ready_pc_id)
                .or_default()
                .push(ReadyPcComponentDto {
                    id: component.id,
                    product_id: component.product_id,
                    quantity: component.quantity,
                    product: product.map(Into::into),
                });
        }

        pcs.into_iter()
            .map(|pc| {
                let components = components_by_pc.remove(&pc.id).unwrap_or_default();
                ReadyPcResponseDto::from_parts(pc, components)
            })
            .collect()
    }

    /// Retail price fallback: the sum of the selected components' retail
    /// prices, respecting quantities.
    fn default_retail_price(selection: &[ComponentInputDto], products: &[Product]) -> Decimal {
        let prices: HashMap<Uuid, Decimal> = products
            .iter()
            .map(|p| (p.id, p.price_varejo))
            .collect();

        selection
            .iter()
            .map(|c| {
                prices.get(&c.product_id).copied().unwrap_or_default()
                    * Decimal::from(c.quantity.max(0))
            })
            .sum()
    }

    /// Create a ready PC and its component rows
    pub async fn create(&self, dto: CreateReadyPcDto) -> Result<ReadyPcResponseDto> {
        let selection_products = self
            .products
            .find_by_ids(&dto.components.iter().map(|c| c.product_id).collect::<Vec<_>>())
            .await?;

        let price_varejo = match dto.price_varejo.filter(|p| !p.is_zero()) {
            Some(price) => price,
            None => Self::default_retail_price(&dto.components, &selection_products),
        };

        let pc = sqlx::query_as::<_, ReadyPc>(&format!(
            r#"
            INSERT INTO ready_pcs (name, description, image_url, game_image_url,
                                   price_varejo, price_revenda, specs, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {}
            "#,
            PC_COLUMNS
        ))
        .bind(&dto.name)
        .bind(&dto.description)
        .bind(dto.image_url.filter(|u| !u.is_empty()))
        .bind(dto.game_image_url.filter(|u| !u.is_empty()))
        .bind(price_varejo)
        .bind(dto.price_revenda)
        .bind(&dto.specs)
        .bind(dto.is_active)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create ready PC: {:?}", e);
            AppError::Database(e)
        })?;

        self.insert_components(pc.id, &dto.components).await?;

        tracing::info!("Ready PC created: {} ({})", pc.name, pc.id);
        self.get_by_id(pc.id).await
    }

    /// Update a ready PC; a present component list replaces the old set
    pub async fn update(&self, id: Uuid, dto: UpdateReadyPcDto) -> Result<ReadyPcResponseDto> {
        let updated = sqlx::query_as::<_, ReadyPc>(&format!(
            r#"
            UPDATE ready_pcs
            SET name = COALESCE($1, name),
                description = COALESCE($2, description),
                image_url = COALESCE($3, image_url),
                game_image_url = COALESCE($4, game_image_url),
                price_varejo = COALESCE($5, price_varejo),
                price_revenda = COALESCE($6, price_revenda),
                specs = COALESCE($7, specs),
                is_active = COALESCE($8, is_active)
            WHERE id = $9
            RETURNING {}
            "#,
            PC_COLUMNS
        ))
        .bind(dto.name)
        .bind(dto.description)
        .bind(dto.image_url)
        .bind(dto.game_image_url)
        .bind(dto.price_varejo)
        .bind(dto.price_revenda)
        .bind(dto.specs)
        .bind(dto.is_active)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update ready PC: {:?}", e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound(format!("Ready PC {} not found", id)))?;

        if let Some(components) = dto.components {
            // Replace the component set: remove the old rows, insert the new
            sqlx::query("DELETE FROM ready_pc_components WHERE ready_pc_id = $1")
                .bind(id)
                .execute(&self.pool)
                .await
                .map_err(AppError::Database)?;

            self.insert_components(id, &components).await?;
        }

        self.get_by_id(updated.id).await
    }

    async fn insert_components(&self, pc_id: Uuid, components: &[ComponentInputDto]) -> Result<()> {
        for component in components {
            sqlx::query(
                "INSERT INTO ready_pc_components (ready_pc_id, product_id, quantity) VALUES ($1, $2, $3)",
            )
            .bind(pc_id)
            .bind(component.product_id)
            .bind(component.quantity.max(1))
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to insert ready PC component: {:?}", e);
                AppError::Database(e)
            })?;
        }
        Ok(())
    }

    /// Delete a ready PC and its component rows
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM ready_pc_components WHERE ready_pc_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        let result = sqlx::query("DELETE FROM ready_pcs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete ready PC: {:?}", e);
                AppError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Ready PC {} not found", id)));
        }

        tracing::info!("Ready PC deleted: {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn product(price_varejo: Decimal) -> Product {
        Product {
            id: Uuid::new_v4(),
            name: "part".to_string(),
            description: None,
            price_varejo,
            price_revenda: price_varejo - Decimal::new(1000, 2),
            image_url: None,
            category_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn pc(id: Uuid) -> ReadyPc {
        ReadyPc {
            id,
            name: "PC Gamer".to_string(),
            description: String::new(),
            image_url: None,
            game_image_url: None,
            price_varejo: Decimal::new(500000, 2),
            price_revenda: Decimal::new(450000, 2),
            specs: String::new(),
            is_active: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_default_retail_price_sums_component_prices() {
        let cpu = product(Decimal::new(120000, 2));
        let gpu = product(Decimal::new(250000, 2));
        let ram = product(Decimal::new(30000, 2));

        let selection = vec![
            ComponentInputDto { product_id: cpu.id, quantity: 1 },
            ComponentInputDto { product_id: gpu.id, quantity: 1 },
            ComponentInputDto { product_id: ram.id, quantity: 2 },
        ];

        let total = ReadyPcService::default_retail_price(&selection, &[cpu, gpu, ram]);
        // 1200.00 + 2500.00 + 2 * 300.00
        assert_eq!(total, Decimal::new(430000, 2));
    }

    #[test]
    fn test_default_retail_price_ignores_unknown_products() {
        let cpu = product(Decimal::new(120000, 2));
        let selection = vec![
            ComponentInputDto { product_id: cpu.id, quantity: 1 },
            ComponentInputDto { product_id: Uuid::new_v4(), quantity: 3 },
        ];

        let total = ReadyPcService::default_retail_price(&selection, &[cpu]);
        assert_eq!(total, Decimal::new(120000, 2));
    }

    #[test]
    fn test_assemble_groups_components_per_pc() {
        let pc_a = pc(Uuid::new_v4());
        let pc_b = pc(Uuid::new_v4());
        let part = product(Decimal::new(50000, 2));
        let orphaned_product_id = Uuid::new_v4();

        let components = vec![
            ReadyPcComponent {
                id: Uuid::new_v4(),
                ready_pc_id: pc_a.id,
                product_id: part.id,
                quantity: 1,
            },
            ReadyPcComponent {
                id: Uuid::new_v4(),
                ready_pc_id: pc_a.id,
                product_id: orphaned_product_id,
                quantity: 1,
            },
        ];

        let assembled = ReadyPcService::assemble(
            vec![pc_a.clone(), pc_b.clone()],
            components,
            vec![part.clone()],
        );

        assert_eq!(assembled.len(), 2);

        let a = assembled.iter().find(|dto| dto.id == pc_a.id).unwrap();
        assert_eq!(a.components.len(), 2);
        // Deleted products leave the join row but no product payload
        let orphan = a
            .components
            .iter()
            .find(|c| c.product_id == orphaned_product_id)
            .unwrap();
        assert!(orphan.product.is_none());

        let b = assembled.iter().find(|dto| dto.id == pc_b.id).unwrap();
        assert!(b.components.is_empty());
    }
}
