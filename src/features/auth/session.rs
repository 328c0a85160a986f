//! Process-wide session/profile state.
//!
//! [`SessionHolder`] is the single writer of the observable auth state; all
//! consumers read it through the watch channel returned by [`SessionHolder::subscribe`]
//! and must not mutate it directly. Sign-in/sign-up/sign-out results do not
//! update identity state themselves: the provider's auth-change stream does,
//! in delivery order.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{mpsc, watch};
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::auth::clients::{ProviderResult, ProviderSession};
use crate::features::auth::events::{AuthChange, AuthEvent};
use crate::features::auth::messages;
use crate::features::profiles::models::Profile;

/// Auth operations the holder needs from the hosted provider
#[allow(dead_code)]
#[async_trait]
pub trait SessionBackend: Send + Sync {
    /// Look up the currently persisted session, if any
    async fn current_session(&self) -> ProviderResult<Option<ProviderSession>>;

    async fn sign_in(&self, email: &str, password: &str) -> ProviderResult<ProviderSession>;

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        phone: Option<&str>,
    ) -> ProviderResult<()>;

    /// Initiate the OAuth redirect flow; Ok means the redirect was initiated
    async fn sign_in_with_google(&self) -> ProviderResult<String>;

    async fn sign_out(&self) -> ProviderResult<()>;
}

/// Single-attempt profile lookup. `Ok(None)` is the expected-absence case
/// (row not created yet); `Err` is a transient failure worth retrying.
#[async_trait]
pub trait ProfileSource: Send + Sync {
    async fn profile_by_user_id(&self, user_id: Uuid) -> Result<Option<Profile>>;
}

/// Bounded-retry policy for profile resolution
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    /// Fixed delay between attempts
    pub backoff: Duration,
    /// Grace period after a sign-in notification before the first fetch,
    /// giving the provider-side trigger time to materialize the row
    pub post_sign_in_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff: Duration::from_secs(1),
            post_sign_in_delay: Duration::from_millis(1500),
        }
    }
}

/// Authenticated identity tracked by the holder
#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: Uuid,
    pub email: Option<String>,
}

impl From<&ProviderSession> for Identity {
    fn from(session: &ProviderSession) -> Self {
        Self {
            id: session.user.id,
            email: session.user.email.clone(),
        }
    }
}

/// Observable auth state
#[allow(dead_code)]
#[derive(Debug, Clone, Default)]
pub struct SessionSnapshot {
    pub identity: Option<Identity>,
    pub session: Option<ProviderSession>,
    pub profile: Option<Profile>,
    pub is_loading: bool,
    pub is_initialized: bool,
    pub error: Option<String>,
}

/// Result of a holder operation: success flag plus optional user-facing
/// message (pt-BR on failure)
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct OpOutcome {
    pub success: bool,
    pub message: Option<String>,
}

#[allow(dead_code)]
impl OpOutcome {
    fn ok() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }
}

#[allow(dead_code)]
pub struct SessionHolder {
    backend: Arc<dyn SessionBackend>,
    profiles: Arc<dyn ProfileSource>,
    policy: RetryPolicy,
    state: watch::Sender<SessionSnapshot>,
    /// Liveness flag: once cleared, event processing stops
    alive: AtomicBool,
    /// Guards against concurrent double-initialization
    init_started: AtomicBool,
}

#[allow(dead_code)]
impl SessionHolder {
    pub fn new(
        backend: Arc<dyn SessionBackend>,
        profiles: Arc<dyn ProfileSource>,
        policy: RetryPolicy,
    ) -> Arc<Self> {
        let (state, _) = watch::channel(SessionSnapshot {
            is_loading: true,
            ..SessionSnapshot::default()
        });

        Arc::new(Self {
            backend,
            profiles,
            policy,
            state,
            alive: AtomicBool::new(true),
            init_started: AtomicBool::new(false),
        })
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.borrow().clone()
    }

    /// Stop applying event-driven updates (component teardown)
    pub fn shutdown(&self) {
        self.alive.store(false, Ordering::SeqCst);
    }

    fn update(&self, f: impl FnOnce(&mut SessionSnapshot)) {
        self.state.send_modify(f);
    }

    /// Resolve the initial session and profile.
    ///
    /// Never leaves the holder stuck: `is_initialized` becomes true with
    /// `is_loading` false on every path, including total failure, so
    /// dependent consumers can always decide between login and content.
    pub async fn initialize(&self) {
        if self.init_started.swap(true, Ordering::SeqCst) {
            return;
        }

        self.update(|s| {
            s.is_loading = true;
            s.error = None;
        });

        match self.backend.current_session().await {
            Ok(Some(session)) => {
                tracing::debug!("Session state: active");
                let profile = self.fetch_profile_with_retry(session.user.id).await;
                self.update(|s| {
                    s.identity = Some(Identity::from(&session));
                    s.session = Some(session);
                    s.profile = profile;
                    s.is_loading = false;
                    s.is_initialized = true;
                    s.error = None;
                });
            }
            Ok(None) => {
                tracing::debug!("Session state: none");
                self.update(|s| {
                    s.identity = None;
                    s.session = None;
                    s.profile = None;
                    s.is_loading = false;
                    s.is_initialized = true;
                    s.error = None;
                });
            }
            Err(e) => {
                tracing::error!("Auth initialization failed: {}", e);
                self.update(|s| {
                    s.identity = None;
                    s.session = None;
                    s.profile = None;
                    s.is_loading = false;
                    s.is_initialized = true;
                    s.error = Some(e.message.clone());
                });
            }
        }
    }

    /// Consume auth-change notifications until the stream closes or the
    /// holder shuts down. Notifications arriving before initialization has
    /// completed are dropped: the initial state is owned by `initialize`.
    pub async fn run(self: Arc<Self>, mut events: mpsc::UnboundedReceiver<AuthChange>) {
        while let Some(change) = events.recv().await {
            if !self.alive.load(Ordering::SeqCst) {
                break;
            }
            if !self.state.borrow().is_initialized {
                tracing::debug!("Dropping auth event before initialization: {:?}", change.event);
                continue;
            }
            self.handle_auth_change(change).await;
        }
    }

    /// Apply one auth-state notification
    pub async fn handle_auth_change(&self, change: AuthChange) {
        tracing::debug!(
            "Auth state changed: {:?} ({})",
            change.event,
            if change.session.is_some() {
                "session"
            } else {
                "no session"
            }
        );

        match (change.event, change.session) {
            (AuthEvent::SignedOut, _) | (_, None) => {
                self.update(|s| {
                    s.identity = None;
                    s.session = None;
                    s.profile = None;
                    s.is_loading = false;
                    s.error = None;
                });
            }
            (AuthEvent::SignedIn, Some(session)) => {
                self.update(|s| s.is_loading = true);

                // Give the provider-side trigger time to create the row
                tokio::time::sleep(self.policy.post_sign_in_delay).await;

                let profile = self.fetch_profile_with_retry(session.user.id).await;
                self.update(|s| {
                    s.identity = Some(Identity::from(&session));
                    s.session = Some(session);
                    s.profile = profile;
                    s.is_loading = false;
                    s.error = None;
                });
            }
            (AuthEvent::TokenRefreshed, Some(session)) => {
                self.update(|s| {
                    s.identity = Some(Identity::from(&session));
                    s.session = Some(session);
                    s.is_loading = false;
                    s.error = None;
                });
            }
        }
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> OpOutcome {
        self.update(|s| {
            s.is_loading = true;
            s.error = None;
        });

        let email = email.trim().to_lowercase();

        match self.backend.sign_in(&email, password).await {
            Ok(_session) => {
                // Identity/profile state arrives through the SignedIn
                // notification, not here.
                OpOutcome::ok()
            }
            Err(e) => {
                let message = messages::sign_in_message(&e.code);
                tracing::warn!("Sign in failed: {} ({:?})", e.message, e.code);
                self.update(|s| {
                    s.is_loading = false;
                    s.error = Some(message.to_string());
                });
                OpOutcome::fail(message)
            }
        }
    }

    pub async fn sign_up(&self, email: &str, password: &str, phone: Option<&str>) -> OpOutcome {
        self.update(|s| {
            s.is_loading = true;
            s.error = None;
        });

        // Rejected locally, before any provider call
        if password.len() < 6 {
            self.update(|s| {
                s.is_loading = false;
                s.error = Some(messages::PASSWORD_TOO_SHORT.to_string());
            });
            return OpOutcome::fail(messages::PASSWORD_TOO_SHORT);
        }

        let email = email.trim().to_lowercase();
        let phone = phone.map(str::trim).filter(|p| !p.is_empty());

        match self.backend.sign_up(&email, password, phone).await {
            Ok(()) => {
                self.update(|s| s.is_loading = false);
                OpOutcome::ok()
            }
            Err(e) => {
                let message = messages::sign_up_message(&e.code);
                tracing::warn!("Sign up failed: {} ({:?})", e.message, e.code);
                self.update(|s| {
                    s.is_loading = false;
                    s.error = Some(message.to_string());
                });
                OpOutcome::fail(message)
            }
        }
    }

    pub async fn sign_in_with_google(&self) -> OpOutcome {
        self.update(|s| {
            s.is_loading = true;
            s.error = None;
        });

        match self.backend.sign_in_with_google().await {
            Ok(_redirect_url) => OpOutcome::ok(),
            Err(e) => {
                tracing::warn!("Google sign in failed: {}", e.message);
                self.update(|s| {
                    s.is_loading = false;
                    s.error = Some(messages::OAUTH_FALLBACK.to_string());
                });
                OpOutcome::fail(messages::OAUTH_FALLBACK)
            }
        }
    }

    pub async fn sign_out(&self) -> OpOutcome {
        self.update(|s| {
            s.is_loading = true;
            s.error = None;
        });

        match self.backend.sign_out().await {
            // State is cleared by the SignedOut notification
            Ok(()) => OpOutcome::ok(),
            Err(e) => {
                tracing::warn!("Sign out failed: {}", e.message);
                self.update(|s| {
                    s.is_loading = false;
                    s.error = Some(messages::SIGN_OUT_FALLBACK.to_string());
                });
                OpOutcome::fail(messages::SIGN_OUT_FALLBACK)
            }
        }
    }

    pub fn clear_error(&self) {
        self.update(|s| s.error = None);
    }

    /// Re-run the profile fetch for the current identity; no-op otherwise
    pub async fn refetch_profile(&self) {
        let user_id = match self.state.borrow().identity {
            Some(ref identity) => identity.id,
            None => return,
        };

        let profile = self.fetch_profile_with_retry(user_id).await;
        self.update(|s| s.profile = profile);
    }

    /// Fetch the profile under the retry policy.
    ///
    /// Expected absence (`Ok(None)`) resolves immediately: the row simply
    /// has not been created yet. Transient failures are retried with the
    /// fixed backoff and degrade to absence once attempts are exhausted.
    async fn fetch_profile_with_retry(&self, user_id: Uuid) -> Option<Profile> {
        let mut remaining = self.policy.max_attempts;

        while remaining > 0 {
            tracing::debug!(
                "Fetching profile for {} ({} attempts left)",
                user_id,
                remaining
            );

            match self.profiles.profile_by_user_id(user_id).await {
                Ok(Some(profile)) => return Some(profile),
                Ok(None) => {
                    tracing::debug!("Profile not found - will be created by trigger");
                    return None;
                }
                Err(e) => {
                    remaining -= 1;
                    tracing::warn!("Profile fetch attempt failed: {}", e);
                    if remaining > 0 {
                        tokio::time::sleep(self.policy.backoff).await;
                    }
                }
            }
        }

        tracing::warn!("All profile fetch attempts failed for {}", user_id);
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::AppError;
    use crate::features::auth::clients::{
        ProviderError, ProviderErrorCode, ProviderIdentity, ProviderSession,
    };
    use chrono::Utc;
    use std::sync::atomic::AtomicUsize;

    fn test_policy() -> RetryPolicy {
        RetryPolicy {
            max_attempts: 3,
            backoff: Duration::from_millis(5),
            post_sign_in_delay: Duration::from_millis(5),
        }
    }

    fn session_for(user_id: Uuid) -> ProviderSession {
        ProviderSession {
            access_token: "token".to_string(),
            refresh_token: Some("refresh".to_string()),
            expires_in: Some(3600),
            user: ProviderIdentity {
                id: user_id,
                email: Some("user@example.com".to_string()),
                email_confirmed_at: None,
            },
        }
    }

    fn profile_for(user_id: Uuid) -> Profile {
        Profile {
            id: Uuid::new_v4(),
            user_id,
            email: "user@example.com".to_string(),
            phone: None,
            setor: "varejo".to_string(),
            is_admin: false,
            is_blocked: false,
            created_at: Utc::now(),
        }
    }

    #[derive(Default)]
    struct MockBackend {
        stored_session: Option<ProviderSession>,
        sign_in_result: Option<std::result::Result<ProviderSession, ProviderErrorCode>>,
        sign_up_calls: AtomicUsize,
        sign_up_error: Option<ProviderErrorCode>,
        last_sign_in_email: std::sync::Mutex<Option<String>>,
    }

    #[async_trait]
    impl SessionBackend for MockBackend {
        async fn current_session(&self) -> ProviderResult<Option<ProviderSession>> {
            Ok(self.stored_session.clone())
        }

        async fn sign_in(&self, email: &str, _password: &str) -> ProviderResult<ProviderSession> {
            *self.last_sign_in_email.lock().unwrap() = Some(email.to_string());
            match &self.sign_in_result {
                Some(Ok(session)) => Ok(session.clone()),
                Some(Err(code)) => Err(ProviderError {
                    code: code.clone(),
                    message: "provider rejected".to_string(),
                    status: 400,
                }),
                None => Err(ProviderError::transport("no stub".to_string())),
            }
        }

        async fn sign_up(
            &self,
            _email: &str,
            _password: &str,
            _phone: Option<&str>,
        ) -> ProviderResult<()> {
            self.sign_up_calls.fetch_add(1, Ordering::SeqCst);
            match &self.sign_up_error {
                Some(code) => Err(ProviderError {
                    code: code.clone(),
                    message: "provider rejected".to_string(),
                    status: 400,
                }),
                None => Ok(()),
            }
        }

        async fn sign_in_with_google(&self) -> ProviderResult<String> {
            Ok("https://auth.example.com/authorize?provider=google".to_string())
        }

        async fn sign_out(&self) -> ProviderResult<()> {
            Ok(())
        }
    }

    enum ProfileBehavior {
        Found(Profile),
        NotFound,
        AlwaysFails,
    }

    struct MockProfiles {
        behavior: ProfileBehavior,
        calls: AtomicUsize,
    }

    impl MockProfiles {
        fn new(behavior: ProfileBehavior) -> Self {
            Self {
                behavior,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ProfileSource for MockProfiles {
        async fn profile_by_user_id(&self, _user_id: Uuid) -> Result<Option<Profile>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.behavior {
                ProfileBehavior::Found(p) => Ok(Some(p.clone())),
                ProfileBehavior::NotFound => Ok(None),
                ProfileBehavior::AlwaysFails => {
                    Err(AppError::Internal("connection reset".to_string()))
                }
            }
        }
    }

    fn holder_with(
        backend: MockBackend,
        profiles: MockProfiles,
    ) -> (Arc<SessionHolder>, Arc<MockBackend>, Arc<MockProfiles>) {
        let backend = Arc::new(backend);
        let profiles = Arc::new(profiles);
        let holder = SessionHolder::new(backend.clone(), profiles.clone(), test_policy());
        (holder, backend, profiles)
    }

    #[tokio::test]
    async fn test_initialize_without_session_is_anonymous() {
        let (holder, _, _) = holder_with(
            MockBackend::default(),
            MockProfiles::new(ProfileBehavior::NotFound),
        );

        holder.initialize().await;

        let state = holder.snapshot();
        assert!(state.is_initialized);
        assert!(!state.is_loading);
        assert!(state.identity.is_none());
        assert!(state.profile.is_none());
        assert!(state.error.is_none());
    }

    #[tokio::test]
    async fn test_initialize_with_session_resolves_profile() {
        let user_id = Uuid::new_v4();
        let (holder, _, _) = holder_with(
            MockBackend {
                stored_session: Some(session_for(user_id)),
                ..MockBackend::default()
            },
            MockProfiles::new(ProfileBehavior::Found(profile_for(user_id))),
        );

        holder.initialize().await;

        let state = holder.snapshot();
        assert!(state.is_initialized);
        assert_eq!(state.identity.as_ref().unwrap().id, user_id);
        assert_eq!(state.profile.as_ref().unwrap().user_id, user_id);
    }

    #[tokio::test]
    async fn test_missing_profile_row_is_not_an_error() {
        let user_id = Uuid::new_v4();
        let (holder, _, profiles) = holder_with(
            MockBackend {
                stored_session: Some(session_for(user_id)),
                ..MockBackend::default()
            },
            MockProfiles::new(ProfileBehavior::NotFound),
        );

        holder.initialize().await;

        let state = holder.snapshot();
        assert!(state.is_initialized);
        assert!(!state.is_loading);
        assert!(state.identity.is_some());
        assert!(state.profile.is_none());
        assert!(state.error.is_none());
        // Expected absence resolves on the first attempt
        assert_eq!(profiles.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_transient_failures_exhaust_retries_and_degrade() {
        let user_id = Uuid::new_v4();
        let (holder, _, profiles) = holder_with(
            MockBackend {
                stored_session: Some(session_for(user_id)),
                ..MockBackend::default()
            },
            MockProfiles::new(ProfileBehavior::AlwaysFails),
        );

        holder.initialize().await;

        let state = holder.snapshot();
        // Never stuck: initialized with no profile, no recorded error
        assert!(state.is_initialized);
        assert!(!state.is_loading);
        assert!(state.profile.is_none());
        assert!(state.error.is_none());
        assert_eq!(profiles.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_sign_up_short_password_never_calls_provider() {
        let (holder, backend, _) = holder_with(
            MockBackend::default(),
            MockProfiles::new(ProfileBehavior::NotFound),
        );

        let outcome = holder.sign_up("user@example.com", "12345", None).await;

        assert!(!outcome.success);
        assert_eq!(outcome.message.as_deref(), Some(messages::PASSWORD_TOO_SHORT));
        assert_eq!(backend.sign_up_calls.load(Ordering::SeqCst), 0);

        let state = holder.snapshot();
        assert!(!state.is_loading);
        assert_eq!(state.error.as_deref(), Some(messages::PASSWORD_TOO_SHORT));
    }

    #[tokio::test]
    async fn test_sign_up_maps_duplicate_registration() {
        let (holder, backend, _) = holder_with(
            MockBackend {
                sign_up_error: Some(ProviderErrorCode::UserAlreadyExists),
                ..MockBackend::default()
            },
            MockProfiles::new(ProfileBehavior::NotFound),
        );

        let outcome = holder.sign_up("user@example.com", "123456", None).await;

        assert!(!outcome.success);
        assert_eq!(outcome.message.as_deref(), Some("Este email já está cadastrado"));
        assert_eq!(backend.sign_up_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_sign_in_maps_invalid_credentials() {
        let (holder, _, _) = holder_with(
            MockBackend {
                sign_in_result: Some(Err(ProviderErrorCode::InvalidCredentials)),
                ..MockBackend::default()
            },
            MockProfiles::new(ProfileBehavior::NotFound),
        );
        holder.initialize().await;

        let outcome = holder.sign_in("user@example.com", "wrong").await;

        assert!(!outcome.success);
        assert_eq!(outcome.message.as_deref(), Some("Email ou senha incorretos"));

        let state = holder.snapshot();
        assert!(!state.is_loading);
        assert_eq!(state.error.as_deref(), Some("Email ou senha incorretos"));
    }

    #[tokio::test]
    async fn test_sign_in_normalizes_email_and_defers_state_to_events() {
        let user_id = Uuid::new_v4();
        let (holder, backend, _) = holder_with(
            MockBackend {
                sign_in_result: Some(Ok(session_for(user_id))),
                ..MockBackend::default()
            },
            MockProfiles::new(ProfileBehavior::Found(profile_for(user_id))),
        );
        holder.initialize().await;

        let outcome = holder.sign_in("  User@Example.COM ", "secret").await;
        assert!(outcome.success);
        assert_eq!(
            backend.last_sign_in_email.lock().unwrap().as_deref(),
            Some("user@example.com")
        );

        // The call itself must not set identity; the notification does.
        assert!(holder.snapshot().identity.is_none());

        holder
            .handle_auth_change(AuthChange {
                event: AuthEvent::SignedIn,
                session: Some(session_for(user_id)),
            })
            .await;

        let state = holder.snapshot();
        assert_eq!(state.identity.as_ref().unwrap().id, user_id);
        assert!(state.profile.is_some());
        assert!(!state.is_loading);
    }

    #[tokio::test]
    async fn test_signed_out_clears_state() {
        let user_id = Uuid::new_v4();
        let (holder, _, _) = holder_with(
            MockBackend {
                stored_session: Some(session_for(user_id)),
                ..MockBackend::default()
            },
            MockProfiles::new(ProfileBehavior::Found(profile_for(user_id))),
        );
        holder.initialize().await;
        assert!(holder.snapshot().identity.is_some());

        holder
            .handle_auth_change(AuthChange {
                event: AuthEvent::SignedOut,
                session: None,
            })
            .await;

        let state = holder.snapshot();
        assert!(state.identity.is_none());
        assert!(state.session.is_none());
        assert!(state.profile.is_none());
        assert!(!state.is_loading);
    }

    #[tokio::test]
    async fn test_token_refresh_keeps_profile() {
        let user_id = Uuid::new_v4();
        let (holder, _, profiles) = holder_with(
            MockBackend {
                stored_session: Some(session_for(user_id)),
                ..MockBackend::default()
            },
            MockProfiles::new(ProfileBehavior::Found(profile_for(user_id))),
        );
        holder.initialize().await;
        let fetches_after_init = profiles.calls.load(Ordering::SeqCst);

        let mut refreshed = session_for(user_id);
        refreshed.access_token = "token-2".to_string();
        holder
            .handle_auth_change(AuthChange {
                event: AuthEvent::TokenRefreshed,
                session: Some(refreshed),
            })
            .await;

        let state = holder.snapshot();
        assert_eq!(
            state.session.as_ref().unwrap().access_token,
            "token-2".to_string()
        );
        assert!(state.profile.is_some());
        // Refresh must not re-fetch the profile
        assert_eq!(profiles.calls.load(Ordering::SeqCst), fetches_after_init);
    }

    #[tokio::test]
    async fn test_events_before_initialization_are_dropped() {
        let user_id = Uuid::new_v4();
        let (holder, _, _) = holder_with(
            MockBackend::default(),
            MockProfiles::new(ProfileBehavior::Found(profile_for(user_id))),
        );

        let (tx, rx) = mpsc::unbounded_channel();
        let loop_handle = tokio::spawn(holder.clone().run(rx));

        tx.send(AuthChange {
            event: AuthEvent::SignedIn,
            session: Some(session_for(user_id)),
        })
        .unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;

        // Not initialized yet: the event must not have been applied
        assert!(holder.snapshot().identity.is_none());

        holder.initialize().await;
        tx.send(AuthChange {
            event: AuthEvent::SignedIn,
            session: Some(session_for(user_id)),
        })
        .unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert!(holder.snapshot().identity.is_some());

        drop(tx);
        loop_handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_clear_error_and_refetch_profile() {
        let user_id = Uuid::new_v4();
        let (holder, _, profiles) = holder_with(
            MockBackend {
                stored_session: Some(session_for(user_id)),
                ..MockBackend::default()
            },
            MockProfiles::new(ProfileBehavior::Found(profile_for(user_id))),
        );
        holder.initialize().await;

        holder.update(|s| s.error = Some("boom".to_string()));
        holder.clear_error();
        assert!(holder.snapshot().error.is_none());

        let before = profiles.calls.load(Ordering::SeqCst);
        holder.refetch_profile().await;
        assert_eq!(profiles.calls.load(Ordering::SeqCst), before + 1);
    }

    #[tokio::test]
    async fn test_refetch_profile_without_identity_is_noop() {
        let (holder, _, profiles) = holder_with(
            MockBackend::default(),
            MockProfiles::new(ProfileBehavior::NotFound),
        );
        holder.initialize().await;

        holder.refetch_profile().await;
        assert_eq!(profiles.calls.load(Ordering::SeqCst), 0);
    }
}
