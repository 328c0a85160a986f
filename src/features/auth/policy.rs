//! Declarative route access checks over the session snapshot.
//!
//! The decision is recomputed on every relevant state change by the caller;
//! evaluation itself is pure.

use crate::features::auth::session::SessionSnapshot;

/// Path of the sign-in destination
#[allow(dead_code)]
pub const SIGN_IN_PATH: &str = "/auth";

/// Path of the home destination used for denials
#[allow(dead_code)]
pub const HOME_PATH: &str = "/";

/// Requirements a view declares for itself
#[allow(dead_code)]
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessPolicy {
    pub require_auth: bool,
    pub require_admin: bool,
}

/// Outcome of evaluating a policy against the current state
#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    /// State not settled yet (initializing, loading, or profile pending):
    /// make no decision and do not redirect
    Defer,
    /// View may render
    Allow,
    /// Visitor must sign in; `from` preserves the originating path for
    /// post-login return
    RedirectToSignIn { from: String },
    /// Authenticated but not allowed (not admin, or blocked). The caller may
    /// run its own unauthorized handler instead of the home redirect.
    Denied,
    /// Already authenticated on the sign-in page: leave it, returning to the
    /// preserved origin or home
    RedirectAway { to: String },
}

/// Derived booleans for synchronous use by views
#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessFlags {
    pub is_authenticated: bool,
    pub is_admin: bool,
    pub is_blocked: bool,
    pub is_loading: bool,
    pub can_access: bool,
}

#[allow(dead_code)]
impl AccessPolicy {
    pub fn evaluate(
        &self,
        state: &SessionSnapshot,
        current_path: &str,
        return_to: Option<&str>,
    ) -> AccessDecision {
        // No decision while the holder is still settling
        if state.is_loading || !state.is_initialized {
            return AccessDecision::Defer;
        }

        let has_identity = state.identity.is_some();

        if self.require_auth && !has_identity {
            return AccessDecision::RedirectToSignIn {
                from: current_path.to_string(),
            };
        }

        if self.require_admin {
            if !has_identity {
                return AccessDecision::RedirectToSignIn {
                    from: current_path.to_string(),
                };
            }

            // Identity present but profile not resolved yet: wait for it
            // rather than redirecting prematurely.
            let profile = match state.profile {
                Some(ref profile) => profile,
                None => return AccessDecision::Defer,
            };

            if !profile.is_admin || profile.is_blocked {
                return AccessDecision::Denied;
            }
        }

        if has_identity && current_path == SIGN_IN_PATH {
            return AccessDecision::RedirectAway {
                to: return_to.unwrap_or(HOME_PATH).to_string(),
            };
        }

        AccessDecision::Allow
    }

    pub fn flags(&self, state: &SessionSnapshot) -> AccessFlags {
        let has_identity = state.identity.is_some();
        let is_admin = matches!(
            state.profile,
            Some(ref p) if p.is_admin && !p.is_blocked
        ) && has_identity;
        let is_blocked = matches!(state.profile, Some(ref p) if p.is_blocked);
        let is_loading = state.is_loading || !state.is_initialized;

        let can_access = if is_loading {
            false
        } else if self.require_auth && !has_identity {
            false
        } else if self.require_admin {
            has_identity
                && matches!(state.profile, Some(ref p) if p.is_admin && !p.is_blocked)
        } else {
            true
        };

        AccessFlags {
            is_authenticated: has_identity,
            is_admin,
            is_blocked,
            is_loading,
            can_access,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::auth::session::Identity;
    use crate::features::profiles::models::Profile;
    use chrono::Utc;
    use uuid::Uuid;

    fn anonymous() -> SessionSnapshot {
        SessionSnapshot {
            is_initialized: true,
            ..SessionSnapshot::default()
        }
    }

    fn with_identity() -> SessionSnapshot {
        SessionSnapshot {
            identity: Some(Identity {
                id: Uuid::new_v4(),
                email: Some("user@example.com".to_string()),
            }),
            is_initialized: true,
            ..SessionSnapshot::default()
        }
    }

    fn profile(is_admin: bool, is_blocked: bool) -> Profile {
        Profile {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            email: "user@example.com".to_string(),
            phone: None,
            setor: "varejo".to_string(),
            is_admin,
            is_blocked,
            created_at: Utc::now(),
        }
    }

    const ADMIN_POLICY: AccessPolicy = AccessPolicy {
        require_auth: false,
        require_admin: true,
    };

    #[test]
    fn test_defers_until_initialized() {
        let policy = AccessPolicy {
            require_auth: true,
            require_admin: false,
        };
        let state = SessionSnapshot::default(); // uninitialized, loading

        assert_eq!(policy.evaluate(&state, "/admin", None), AccessDecision::Defer);
        assert!(!policy.flags(&state).can_access);
        assert!(policy.flags(&state).is_loading);
    }

    #[test]
    fn test_require_auth_redirects_with_origin() {
        let policy = AccessPolicy {
            require_auth: true,
            require_admin: false,
        };

        assert_eq!(
            policy.evaluate(&anonymous(), "/pc-builder", None),
            AccessDecision::RedirectToSignIn {
                from: "/pc-builder".to_string()
            }
        );
    }

    #[test]
    fn test_require_admin_without_identity_redirects_to_sign_in() {
        assert_eq!(
            ADMIN_POLICY.evaluate(&anonymous(), "/admin", None),
            AccessDecision::RedirectToSignIn {
                from: "/admin".to_string()
            }
        );
    }

    #[test]
    fn test_require_admin_defers_while_profile_pending() {
        // Identity present, profile not yet resolved: no redirect
        let state = with_identity();
        assert_eq!(
            ADMIN_POLICY.evaluate(&state, "/admin", None),
            AccessDecision::Defer
        );
    }

    #[test]
    fn test_require_admin_denies_non_admin() {
        let mut state = with_identity();
        state.profile = Some(profile(false, false));

        assert_eq!(
            ADMIN_POLICY.evaluate(&state, "/admin", None),
            AccessDecision::Denied
        );
    }

    #[test]
    fn test_blocked_profile_denied_regardless_of_admin() {
        let mut state = with_identity();
        state.profile = Some(profile(true, true));

        assert_eq!(
            ADMIN_POLICY.evaluate(&state, "/admin", None),
            AccessDecision::Denied
        );

        let flags = ADMIN_POLICY.flags(&state);
        assert!(flags.is_blocked);
        assert!(!flags.is_admin);
        assert!(!flags.can_access);
    }

    #[test]
    fn test_admin_allowed() {
        let mut state = with_identity();
        state.profile = Some(profile(true, false));

        assert_eq!(
            ADMIN_POLICY.evaluate(&state, "/admin", None),
            AccessDecision::Allow
        );

        let flags = ADMIN_POLICY.flags(&state);
        assert!(flags.is_admin);
        assert!(flags.can_access);
    }

    #[test]
    fn test_authenticated_visitor_leaves_sign_in_page() {
        let policy = AccessPolicy::default();
        let state = with_identity();

        assert_eq!(
            policy.evaluate(&state, SIGN_IN_PATH, Some("/produtos")),
            AccessDecision::RedirectAway {
                to: "/produtos".to_string()
            }
        );
        assert_eq!(
            policy.evaluate(&state, SIGN_IN_PATH, None),
            AccessDecision::RedirectAway {
                to: HOME_PATH.to_string()
            }
        );
    }

    #[test]
    fn test_anonymous_visitor_may_view_sign_in_page() {
        let policy = AccessPolicy::default();
        assert_eq!(
            policy.evaluate(&anonymous(), SIGN_IN_PATH, None),
            AccessDecision::Allow
        );
    }
}
