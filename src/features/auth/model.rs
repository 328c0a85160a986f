use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Identity extracted from a validated provider access token.
///
/// Roles do not live in the token: administrative rights come from the
/// caller's `profiles` row (`is_admin` / `is_blocked`), resolved by the
/// admin middleware.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    /// Provider identity id (JWT `sub`)
    pub user_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}
