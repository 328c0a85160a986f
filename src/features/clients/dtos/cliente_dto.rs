use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::clients::models::Cliente;

/// Response DTO for a cliente record
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ClienteResponseDto {
    pub id: Uuid,
    pub codigo: i32,
    pub empresa_nome: String,
    pub endereco: Option<String>,
    pub cidade_estado: Option<String>,
    pub bairro: Option<String>,
    pub contato: Option<String>,
    pub cnpj_cpf: Option<String>,
    pub telefone: Option<String>,
    pub cep: Option<String>,
    pub insc_estadual_identidade: Option<String>,
    pub fax: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Cliente> for ClienteResponseDto {
    fn from(c: Cliente) -> Self {
        Self {
            id: c.id,
            codigo: c.codigo,
            empresa_nome: c.empresa_nome,
            endereco: c.endereco,
            cidade_estado: c.cidade_estado,
            bairro: c.bairro,
            contato: c.contato,
            cnpj_cpf: c.cnpj_cpf,
            telefone: c.telefone,
            cep: c.cep,
            insc_estadual_identidade: c.insc_estadual_identidade,
            fax: c.fax,
            is_active: c.is_active,
            created_at: c.created_at,
        }
    }
}

/// Request DTO for registering a cliente. Empty optional fields are stored
/// as NULL.
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateClienteDto {
    #[validate(length(min = 1, max = 200, message = "Nome da empresa é obrigatório"))]
    pub empresa_nome: String,

    pub endereco: Option<String>,
    pub cidade_estado: Option<String>,
    pub bairro: Option<String>,
    pub contato: Option<String>,
    pub cnpj_cpf: Option<String>,
    pub telefone: Option<String>,
    pub cep: Option<String>,
    pub insc_estadual_identidade: Option<String>,
    pub fax: Option<String>,
}

/// Request DTO for updating a cliente. Absent fields keep their value.
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateClienteDto {
    #[validate(length(min = 1, max = 200, message = "Nome da empresa é obrigatório"))]
    pub empresa_nome: Option<String>,

    pub endereco: Option<String>,
    pub cidade_estado: Option<String>,
    pub bairro: Option<String>,
    pub contato: Option<String>,
    pub cnpj_cpf: Option<String>,
    pub telefone: Option<String>,
    pub cep: Option<String>,
    pub insc_estadual_identidade: Option<String>,
    pub fax: Option<String>,
}
