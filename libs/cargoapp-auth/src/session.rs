//! Session state: replace-only store with change subscriptions.

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::watch;

/// An authenticated backend session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    pub access_token: String,
    pub refresh_token: String,
    /// Unix timestamp of token expiry, when the backend reports one.
    pub expires_at: Option<i64>,
}

/// Session lookup failed for a reason other than "signed out".
#[derive(Debug, Error)]
#[error("session lookup failed: {0}")]
pub struct SessionLookupError(pub String);

/// Source of the current session for callers that make authenticated calls.
///
/// `Ok(None)` means signed out; `Err` means the lookup itself failed.
pub trait SessionProvider: Send + Sync {
    fn session(
        &self,
    ) -> impl Future<Output = Result<Option<Session>, SessionLookupError>> + Send;
}

impl<T: SessionProvider> SessionProvider for Arc<T> {
    async fn session(&self) -> Result<Option<Session>, SessionLookupError> {
        (**self).session().await
    }
}

/// Holds at most one session, replaced wholesale.
///
/// Reads are lock-free; `subscribe` yields a channel that observes every
/// replacement (the auth-state-change stream).
pub struct SessionStore {
    current: ArcSwapOption<Session>,
    tx: watch::Sender<Option<Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self {
            current: ArcSwapOption::const_empty(),
            tx,
        }
    }

    /// Swap in a new session state and notify subscribers.
    pub fn replace(&self, session: Option<Session>) {
        self.current.store(session.clone().map(Arc::new));
        self.tx.send_replace(session);
    }

    pub fn clear(&self) {
        self.replace(None);
    }

    pub fn current(&self) -> Option<Arc<Session>> {
        self.current.load_full()
    }

    /// Subscribe to session replacements.
    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.tx.subscribe()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionProvider for SessionStore {
    async fn session(&self) -> Result<Option<Session>, SessionLookupError> {
        Ok(self.current().map(|s| (*s).clone()))
    }
}
