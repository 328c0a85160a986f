use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::clients::dtos::{ClienteResponseDto, CreateClienteDto, UpdateClienteDto};
use crate::features::clients::models::Cliente;

const SELECT_COLUMNS: &str = "id, codigo, empresa_nome, endereco, cidade_estado, bairro, \
                              contato, cnpj_cpf, telefone, cep, insc_estadual_identidade, fax, \
                              is_active, created_at";

/// Normalize an optional text field: blank becomes NULL
fn clean(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Service for cliente records
pub struct ClienteService {
    pool: PgPool,
}

impl ClienteService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List clientes ordered by their sequential code, optionally narrowed
    /// by the back-office search box. The search is applied in memory over
    /// the full set, matching the listing the screen already holds.
    pub async fn list(&self, search: Option<&str>) -> Result<Vec<ClienteResponseDto>> {
        let clientes = sqlx::query_as::<_, Cliente>(&format!(
            "SELECT {} FROM clientes ORDER BY codigo",
            SELECT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list clientes: {:?}", e);
            AppError::Database(e)
        })?;

        let filtered = match search {
            Some(term) if !term.trim().is_empty() => clientes
                .into_iter()
                .filter(|c| Self::matches_search(c, term))
                .collect(),
            _ => clientes,
        };

        Ok(filtered.into_iter().map(Into::into).collect())
    }

    /// Case-insensitive substring match across company name, sequential
    /// code, tax id, contact name and phone.
    pub fn matches_search(cliente: &Cliente, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }

        let field_contains =
            |field: &Option<String>| field.as_deref().is_some_and(|f| f.to_lowercase().contains(&term));

        cliente.empresa_nome.to_lowercase().contains(&term)
            || cliente.codigo.to_string().contains(&term)
            || field_contains(&cliente.cnpj_cpf)
            || field_contains(&cliente.contato)
            || field_contains(&cliente.telefone)
    }

    /// Register a new cliente (active by default; codigo is assigned by the
    /// sequence)
    pub async fn create(&self, dto: CreateClienteDto) -> Result<ClienteResponseDto> {
        let cliente = sqlx::query_as::<_, Cliente>(&format!(
            r#"
            INSERT INTO clientes (empresa_nome, endereco, cidade_estado, bairro, contato,
                                  cnpj_cpf, telefone, cep, insc_estadual_identidade, fax, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, TRUE)
            RETURNING {}
            "#,
            SELECT_COLUMNS
        ))
        .bind(dto.empresa_nome.trim())
        .bind(clean(dto.endereco))
        .bind(clean(dto.cidade_estado))
        .bind(clean(dto.bairro))
        .bind(clean(dto.contato))
        .bind(clean(dto.cnpj_cpf))
        .bind(clean(dto.telefone))
        .bind(clean(dto.cep))
        .bind(clean(dto.insc_estadual_identidade))
        .bind(clean(dto.fax))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create cliente: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!(
            "Cliente created: {} (codigo {})",
            cliente.empresa_nome,
            cliente.codigo
        );
        Ok(cliente.into())
    }

    /// Update a cliente
    pub async fn update(&self, id: Uuid, dto: UpdateClienteDto) -> Result<ClienteResponseDto> {
        let cliente = sqlx::query_as::<_, Cliente>(&format!(
            r#"
            UPDATE clientes
            SET empresa_nome = COALESCE($1, empresa_nome),
                endereco = COALESCE($2, endereco),
                cidade_estado = COALESCE($3, cidade_estado),
                bairro = COALESCE($4, bairro),
                contato = COALESCE($5, contato),
                cnpj_cpf = COALESCE($6, cnpj_cpf),
                telefone = COALESCE($7, telefone),
                cep = COALESCE($8, cep),
                insc_estadual_identidade = COALESCE($9, insc_estadual_identidade),
                fax = COALESCE($10, fax)
            WHERE id = $11
            RETURNING {}
            "#,
            SELECT_COLUMNS
        ))
        .bind(dto.empresa_nome.map(|n| n.trim().to_string()))
        .bind(clean(dto.endereco))
        .bind(clean(dto.cidade_estado))
        .bind(clean(dto.bairro))
        .bind(clean(dto.contato))
        .bind(clean(dto.cnpj_cpf))
        .bind(clean(dto.telefone))
        .bind(clean(dto.cep))
        .bind(clean(dto.insc_estadual_identidade))
        .bind(clean(dto.fax))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update cliente: {:?}", e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound(format!("Cliente {} not found", id)))?;

        Ok(cliente.into())
    }

    /// Flip the active flag
    pub async fn toggle_active(&self, id: Uuid) -> Result<ClienteResponseDto> {
        let cliente = sqlx::query_as::<_, Cliente>(&format!(
            "UPDATE clientes SET is_active = NOT is_active WHERE id = $1 RETURNING {}",
            SELECT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to toggle cliente: {:?}", e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound(format!("Cliente {} not found", id)))?;

        Ok(cliente.into())
    }

    /// Delete a cliente
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM clientes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete cliente: {:?}", e);
                AppError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Cliente {} not found", id)));
        }

        tracing::info!("Cliente deleted: {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn cliente(codigo: i32, empresa: &str, telefone: Option<&str>, cnpj: Option<&str>) -> Cliente {
        Cliente {
            id: Uuid::new_v4(),
            codigo,
            empresa_nome: empresa.to_string(),
            endereco: None,
            cidade_estado: None,
            bairro: None,
            contato: Some("Carlos".to_string()),
            cnpj_cpf: cnpj.map(String::from),
            telefone: telefone.map(String::from),
            cep: None,
            insc_estadual_identidade: None,
            fax: None,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_phone_fragment_matches_only_phone_owners() {
        let with_phone = cliente(1, "Informatica Norte", Some("(85) 8907-0724"), None);
        let other = cliente(2, "Tech Sul", Some("(85) 3483-3373"), None);

        // Fragment of the first phone, digits only in the record being
        // formatted with punctuation would not match; use the stored form
        let with_plain_phone = cliente(3, "Loja Centro", Some("85890707245"), None);

        assert!(!ClienteService::matches_search(&other, "89070724"));
        assert!(ClienteService::matches_search(&with_plain_phone, "89070724"));
        assert!(!ClienteService::matches_search(&with_phone, "999"));
    }

    #[test]
    fn test_matches_name_code_tax_id_and_contact() {
        let c = cliente(42, "Kec Informática LTDA", None, Some("12.345.678/0001-90"));

        assert!(ClienteService::matches_search(&c, "kec"));
        assert!(ClienteService::matches_search(&c, "INFORMÁTICA"));
        assert!(ClienteService::matches_search(&c, "42"));
        assert!(ClienteService::matches_search(&c, "345.678"));
        assert!(ClienteService::matches_search(&c, "carlos"));
        assert!(!ClienteService::matches_search(&c, "acme"));
    }

    #[test]
    fn test_blank_search_matches_everything() {
        let c = cliente(1, "Empresa", None, None);
        assert!(ClienteService::matches_search(&c, ""));
        assert!(ClienteService::matches_search(&c, "  "));
    }
}
