//! Production [`SessionBackend`] wired to the hosted provider.
//!
//! Holds the session issued by the provider and publishes auth-change
//! notifications after its calls succeed, mirroring the provider's own
//! subscription behavior: consumers observe state through the holder, never
//! through these call results.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::features::auth::clients::{AuthProviderClient, ProviderResult, ProviderSession};
use crate::features::auth::events::{AuthEvent, AuthEventBus};
use crate::features::auth::session::SessionBackend;

#[allow(dead_code)]
pub struct ProviderSessionBackend {
    client: Arc<AuthProviderClient>,
    events: AuthEventBus,
    session: RwLock<Option<ProviderSession>>,
}

#[allow(dead_code)]
impl ProviderSessionBackend {
    pub fn new(client: Arc<AuthProviderClient>, events: AuthEventBus) -> Self {
        Self {
            client,
            events,
            session: RwLock::new(None),
        }
    }
}

#[async_trait]
impl SessionBackend for ProviderSessionBackend {
    async fn current_session(&self) -> ProviderResult<Option<ProviderSession>> {
        let stored = { self.session.read().await.clone() };

        let Some(session) = stored else {
            return Ok(None);
        };

        // Revalidate against the provider; a revoked token is anonymous,
        // not an error.
        match self.client.session_identity(&session.access_token).await? {
            Some(_) => Ok(Some(session)),
            None => {
                *self.session.write().await = None;
                Ok(None)
            }
        }
    }

    async fn sign_in(&self, email: &str, password: &str) -> ProviderResult<ProviderSession> {
        let session = self.client.sign_in_with_password(email, password).await?;

        *self.session.write().await = Some(session.clone());
        self.events.publish(AuthEvent::SignedIn, Some(session.clone()));

        Ok(session)
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        phone: Option<&str>,
    ) -> ProviderResult<()> {
        self.client.sign_up(email, password, phone).await
    }

    async fn sign_in_with_google(&self) -> ProviderResult<String> {
        Ok(self.client.oauth_authorize_url("google"))
    }

    async fn sign_out(&self) -> ProviderResult<()> {
        let stored = { self.session.write().await.take() };

        if let Some(session) = stored {
            self.client.sign_out(&session.access_token).await?;
        }

        self.events.publish(AuthEvent::SignedOut, None);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ProviderConfig;

    fn backend() -> (ProviderSessionBackend, tokio::sync::mpsc::UnboundedReceiver<crate::features::auth::events::AuthChange>) {
        let (events, rx) = AuthEventBus::channel();
        let client = Arc::new(AuthProviderClient::new(ProviderConfig {
            base_url: "https://auth.example.com/auth/v1".to_string(),
            api_key: "anon-key".to_string(),
            email_redirect_url: "https://store.example.com/".to_string(),
        }));
        (ProviderSessionBackend::new(client, events), rx)
    }

    #[tokio::test]
    async fn test_no_stored_session_is_anonymous_without_network() {
        let (backend, _rx) = backend();
        assert!(backend.current_session().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_sign_out_without_session_still_notifies() {
        let (backend, mut rx) = backend();

        backend.sign_out().await.unwrap();

        let change = rx.recv().await.unwrap();
        assert_eq!(change.event, AuthEvent::SignedOut);
        assert!(change.session.is_none());
    }

    #[tokio::test]
    async fn test_google_flow_yields_authorize_url() {
        let (backend, _rx) = backend();
        let url = backend.sign_in_with_google().await.unwrap();
        assert!(url.contains("provider=google"));
    }
}
