use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for a business contact of the store.
///
/// Independent from profiles: a cliente is an external company record, not a
/// site account. `codigo` is the sequential customer code the back office
/// sorts and searches by.
#[derive(Debug, Clone, FromRow)]
pub struct Cliente {
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
