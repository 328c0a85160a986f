use tokio::sync::mpsc;

use crate::features::auth::clients::ProviderSession;

/// Notification kinds delivered by the provider's auth subscription
#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthEvent {
    SignedIn,
    SignedOut,
    TokenRefreshed,
}

/// One auth-state notification with its associated session (absent on
/// sign-out)
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct AuthChange {
    pub event: AuthEvent,
    pub session: Option<ProviderSession>,
}

/// Publisher side of the auth-state stream.
///
/// The provider integration publishes here after its calls succeed; the
/// session holder consumes the receiver in delivery order. Notifications are
/// never reordered or coalesced.
#[allow(dead_code)]
#[derive(Clone)]
pub struct AuthEventBus {
    tx: mpsc::UnboundedSender<AuthChange>,
}

#[allow(dead_code)]
impl AuthEventBus {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<AuthChange>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn publish(&self, event: AuthEvent, session: Option<ProviderSession>) {
        // Receiver gone means the holder shut down; nothing left to notify.
        let _ = self.tx.send(AuthChange { event, session });
    }
}
