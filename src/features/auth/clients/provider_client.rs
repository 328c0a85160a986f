use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::config::ProviderConfig;
use crate::shared::constants::SECTOR_VAREJO;

/// Identity record returned by the hosted auth provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderIdentity {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub email_confirmed_at: Option<String>,
}

/// Token pair issued by the provider for an authenticated context
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderSession {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    pub user: ProviderIdentity,
}

/// Structured error codes the provider returns alongside its messages.
///
/// The mapping to user-facing text keys off these codes, never off message
/// substrings: provider wording changes must not silently break the mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderErrorCode {
    InvalidCredentials,
    EmailNotConfirmed,
    OverRateLimit,
    UserAlreadyExists,
    WeakPassword,
    InvalidEmail,
    Other(String),
}

impl ProviderErrorCode {
    pub fn from_code(code: &str) -> Self {
        match code {
            "invalid_credentials" => Self::InvalidCredentials,
            "email_not_confirmed" => Self::EmailNotConfirmed,
            "over_request_rate_limit" | "over_email_send_rate_limit" => Self::OverRateLimit,
            "user_already_exists" | "email_exists" => Self::UserAlreadyExists,
            "weak_password" => Self::WeakPassword,
            "validation_failed" | "email_address_invalid" => Self::InvalidEmail,
            other => Self::Other(other.to_string()),
        }
    }
}

/// Failure reported by the provider (or the transport to it)
#[derive(Debug, Clone, thiserror::Error)]
#[error("auth provider error ({status}): {message}")]
pub struct ProviderError {
    pub code: ProviderErrorCode,
    pub message: String,
    pub status: u16,
}

impl ProviderError {
    pub fn transport(message: String) -> Self {
        Self {
            code: ProviderErrorCode::Other("transport".to_string()),
            message,
            status: 0,
        }
    }
}

pub type ProviderResult<T> = std::result::Result<T, ProviderError>;

/// Error body shape of the provider's auth API
#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    #[serde(default)]
    error_code: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Serialize)]
struct SignUpMetadata<'a> {
    setor: &'a str,
    phone: &'a str,
}

#[derive(Debug, Serialize)]
struct SignUpRequest<'a> {
    email: &'a str,
    password: &'a str,
    data: SignUpMetadata<'a>,
}

#[derive(Debug, Serialize)]
struct PasswordGrantRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct SignUpResponse {
    // Sign-up returns the created identity; a session is only present when
    // email confirmation is disabled on the provider side.
    #[allow(dead_code)]
    id: Option<Uuid>,
    #[serde(default)]
    #[allow(dead_code)]
    session: Option<ProviderSession>,
}

/// REST client for the hosted auth provider.
///
/// Covers the auth surface the storefront needs: sign-up (with sector/phone
/// metadata and confirmation-email redirect), password sign-in, OAuth
/// redirect URL construction, token-bound session lookup and sign-out.
pub struct AuthProviderClient {
    config: ProviderConfig,
    http_client: reqwest::Client,
}

impl AuthProviderClient {
    pub fn new(config: ProviderConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    /// Register a new identity. New accounts default to the retail sector;
    /// the profile row itself is created by a provider-side trigger.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        phone: Option<&str>,
    ) -> ProviderResult<()> {
        let url = format!(
            "{}/signup?redirect_to={}",
            self.config.base_url,
            urlencoding::encode(&self.config.email_redirect_url)
        );

        let body = SignUpRequest {
            email,
            password,
            data: SignUpMetadata {
                setor: SECTOR_VAREJO,
                phone: phone.unwrap_or(""),
            },
        };

        tracing::debug!("Registering identity with auth provider: {}", email);

        let response = self
            .http_client
            .post(&url)
            .header("apikey", &self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to reach auth provider: {}", e);
                ProviderError::transport(format!("Failed to reach auth provider: {}", e))
            })?;

        let status = response.status();
        if status.is_success() {
            let _ = response.json::<SignUpResponse>().await;
            tracing::info!("Identity registered for {}", email);
            return Ok(());
        }

        Err(Self::error_from_response(status.as_u16(), response).await)
    }

    /// Sign in with email and password, returning the issued session
    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> ProviderResult<ProviderSession> {
        let url = format!("{}/token?grant_type=password", self.config.base_url);

        let body = PasswordGrantRequest { email, password };

        tracing::debug!("Password sign-in for {}", email);

        let response = self
            .http_client
            .post(&url)
            .header("apikey", &self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to reach auth provider: {}", e);
                ProviderError::transport(format!("Failed to reach auth provider: {}", e))
            })?;

        let status = response.status();
        if status.is_success() {
            return response.json::<ProviderSession>().await.map_err(|e| {
                tracing::error!("Failed to parse session response: {}", e);
                ProviderError::transport(format!("Failed to parse session response: {}", e))
            });
        }

        Err(Self::error_from_response(status.as_u16(), response).await)
    }

    /// Build the OAuth authorize redirect URL for the given provider.
    ///
    /// Success means the redirect can be initiated; authentication itself
    /// completes on the provider's side and lands back on the storefront.
    pub fn oauth_authorize_url(&self, oauth_provider: &str) -> String {
        format!(
            "{}/authorize?provider={}&redirect_to={}",
            self.config.base_url,
            urlencoding::encode(oauth_provider),
            urlencoding::encode(&self.config.email_redirect_url)
        )
    }

    /// Fetch the identity bound to an access token, if the token is active
    pub async fn session_identity(
        &self,
        access_token: &str,
    ) -> ProviderResult<Option<ProviderIdentity>> {
        let url = format!("{}/user", self.config.base_url);

        let response = self
            .http_client
            .get(&url)
            .header("apikey", &self.config.api_key)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| {
                ProviderError::transport(format!("Failed to reach auth provider: {}", e))
            })?;

        let status = response.status();
        if status.is_success() {
            let identity = response.json::<ProviderIdentity>().await.map_err(|e| {
                ProviderError::transport(format!("Failed to parse identity response: {}", e))
            })?;
            return Ok(Some(identity));
        }

        // An expired or revoked token is an anonymous state, not a failure
        if status.as_u16() == 401 || status.as_u16() == 403 {
            return Ok(None);
        }

        Err(Self::error_from_response(status.as_u16(), response).await)
    }

    /// Request invalidation of the session behind the given token.
    ///
    /// The caller's local state change is driven by the resulting
    /// `SignedOut` notification, not by this call's return value.
    pub async fn sign_out(&self, access_token: &str) -> ProviderResult<()> {
        let url = format!("{}/logout", self.config.base_url);

        let response = self
            .http_client
            .post(&url)
            .header("apikey", &self.config.api_key)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| {
                ProviderError::transport(format!("Failed to reach auth provider: {}", e))
            })?;

        let status = response.status();
        if status.is_success() || status.as_u16() == 401 {
            return Ok(());
        }

        Err(Self::error_from_response(status.as_u16(), response).await)
    }

    async fn error_from_response(status: u16, response: reqwest::Response) -> ProviderError {
        let body = response.text().await.unwrap_or_default();

        let (code, message) = match serde_json::from_str::<ProviderErrorBody>(&body) {
            Ok(parsed) => {
                let message = parsed
                    .msg
                    .or(parsed.message)
                    .unwrap_or_else(|| body.clone());
                let code = parsed
                    .error_code
                    .map(|c| ProviderErrorCode::from_code(&c))
                    .unwrap_or_else(|| ProviderErrorCode::Other(format!("http_{}", status)));
                (code, message)
            }
            Err(_) => (ProviderErrorCode::Other(format!("http_{}", status)), body),
        };

        tracing::warn!("Auth provider error: HTTP {} code={:?}", status, code);

        ProviderError {
            code,
            message,
            status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_parsing() {
        assert_eq!(
            ProviderErrorCode::from_code("invalid_credentials"),
            ProviderErrorCode::InvalidCredentials
        );
        assert_eq!(
            ProviderErrorCode::from_code("user_already_exists"),
            ProviderErrorCode::UserAlreadyExists
        );
        assert_eq!(
            ProviderErrorCode::from_code("over_request_rate_limit"),
            ProviderErrorCode::OverRateLimit
        );
        assert_eq!(
            ProviderErrorCode::from_code("something_new"),
            ProviderErrorCode::Other("something_new".to_string())
        );
    }

    #[test]
    fn test_oauth_authorize_url() {
        let client = AuthProviderClient::new(ProviderConfig {
            base_url: "https://auth.example.com/auth/v1".to_string(),
            api_key: "anon-key".to_string(),
            email_redirect_url: "https://store.example.com/".to_string(),
        });

        let url = client.oauth_authorize_url("google");
        assert!(url.starts_with("https://auth.example.com/auth/v1/authorize?provider=google"));
        assert!(url.contains("redirect_to=https%3A%2F%2Fstore.example.com%2F"));
    }
}
