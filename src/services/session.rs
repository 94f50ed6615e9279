//! Session store — one gate context per browser session.
//!
//! ARCHITECTURE
//! ============
//! Browsers carry an opaque hex token in an HttpOnly cookie. The store maps
//! each token to a `SessionEntry` holding the gate's `SessionContext` and the
//! visitor's listings workspace. All mutation goes through `with_session`, so
//! the store is the single writer for every session.
//!
//! TRADE-OFFS
//! ==========
//! Entries live only in memory. A restart logs everyone out, which matches
//! the browser-session lifetime of the identity. Idle entries are dropped by
//! a periodic sweep rather than on every request.

use std::collections::HashMap;
use std::fmt::Write;
use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::Rng;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::gate::{AuthError, AuthForm, Identity, Role, SessionContext};
use crate::services::listings::ListingBook;

pub(crate) fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

/// Generate a cryptographically random 32-byte hex token.
#[must_use]
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    bytes_to_hex(&bytes)
}

// =============================================================================
// SESSION ENTRY
// =============================================================================

/// Everything the server holds for one browser session.
#[derive(Debug, Clone)]
pub struct SessionEntry {
    pub context: SessionContext,
    pub listings: ListingBook,
    last_seen: Instant,
}

impl SessionEntry {
    fn new(now: Instant) -> Self {
        Self { context: SessionContext::new(), listings: ListingBook::empty(), last_seen: now }
    }

    /// Complete auth and prepare the role's workspace.
    ///
    /// # Errors
    ///
    /// Propagates the gate's `AuthError`.
    pub fn complete_auth(&mut self, form: AuthForm) -> Result<Identity, AuthError> {
        let identity = self.context.complete_auth(form)?;
        self.listings = match identity.role {
            Role::AssetOwner => ListingBook::seeded(),
            Role::Retailer => ListingBook::empty(),
        };
        Ok(identity)
    }

    /// Log out and drop the workspace.
    pub fn logout(&mut self) {
        self.context.logout();
        self.listings = ListingBook::empty();
    }
}

// =============================================================================
// SESSION STORE
// =============================================================================

#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<String, SessionEntry>>>,
    idle_ttl: Duration,
}

impl SessionStore {
    #[must_use]
    pub fn new(idle_ttl: Duration) -> Self {
        Self { inner: Arc::new(RwLock::new(HashMap::new())), idle_ttl }
    }

    /// Create an anonymous session and return its token.
    pub async fn create(&self) -> String {
        let token = generate_token();
        self.inner
            .write()
            .await
            .insert(token.clone(), SessionEntry::new(Instant::now()));
        debug!("session created");
        token
    }

    /// Whether `token` names a live session.
    pub async fn contains(&self, token: &str) -> bool {
        let now = Instant::now();
        self.inner
            .read()
            .await
            .get(token)
            .is_some_and(|entry| !self.is_idle(entry, now))
    }

    /// Run `f` against the session's entry, refreshing its idle clock.
    ///
    /// Returns `None` when the token is unknown or the session went idle.
    pub async fn with_session<R>(&self, token: &str, f: impl FnOnce(&mut SessionEntry) -> R) -> Option<R> {
        self.with_session_at(token, Instant::now(), f).await
    }

    async fn with_session_at<R>(
        &self,
        token: &str,
        now: Instant,
        f: impl FnOnce(&mut SessionEntry) -> R,
    ) -> Option<R> {
        let mut sessions = self.inner.write().await;
        let idle = sessions.get(token).map(|entry| self.is_idle(entry, now))?;
        if idle {
            sessions.remove(token);
            return None;
        }
        let entry = sessions.get_mut(token)?;
        entry.last_seen = now;
        Some(f(entry))
    }

    /// Copy of the session's gate context, if the session is live.
    pub async fn context(&self, token: &str) -> Option<SessionContext> {
        self.with_session(token, |entry| entry.context.clone()).await
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Remove sessions idle longer than the TTL. Returns how many were dropped.
    pub async fn sweep_idle(&self) -> usize {
        self.sweep_idle_at(Instant::now()).await
    }

    async fn sweep_idle_at(&self, now: Instant) -> usize {
        let mut sessions = self.inner.write().await;
        let before = sessions.len();
        sessions.retain(|_, entry| !self.is_idle(entry, now));
        before - sessions.len()
    }

    fn is_idle(&self, entry: &SessionEntry, now: Instant) -> bool {
        now.saturating_duration_since(entry.last_seen) > self.idle_ttl
    }
}

/// Spawn the idle-session sweeper. Returns a handle for shutdown.
pub fn spawn_sweeper(store: SessionStore, interval: Duration) -> JoinHandle<()> {
    info!(interval_secs = interval.as_secs(), "session sweeper configured");
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            let dropped = store.sweep_idle().await;
            if dropped > 0 {
                let remaining = store.len().await;
                info!(dropped, remaining, "idle sessions swept");
            }
        }
    })
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
