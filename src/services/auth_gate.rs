use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::models::route::find_route;
use crate::services::auth_state::{AuthState, AuthStateCache, Lookup};

/// A pending navigation from one page to another.
#[derive(Debug, Clone, Deserialize)]
pub struct Navigation {
    pub to: String,
    pub from: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum GuardDecision {
    Proceed { target: String },
    Redirect { target: String },
    /// The wait was cancelled before any state was reported.
    Aborted,
}

/// Decides whether a navigation may enter a guarded route.
#[derive(Clone, Debug)]
pub struct AuthGate {
    cache: AuthStateCache,
    login_path: String,
    timeout: Duration,
}

impl AuthGate {
    pub fn new(cache: AuthStateCache, login_path: String, timeout: Duration) -> Self {
        Self {
            cache,
            login_path,
            timeout,
        }
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    /// Resolves a page navigation. Unguarded pages always proceed; unknown
    /// pages are an error.
    pub async fn check(
        &self,
        navigation: &Navigation,
        user_id: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<GuardDecision> {
        let route = find_route(&navigation.to)
            .ok_or_else(|| Error::NotFound(format!("Unknown route: {}", navigation.to)))?;
        if !route.guarded {
            return Ok(GuardDecision::Proceed {
                target: navigation.to.clone(),
            });
        }
        let decision = self.resolve(&navigation.to, user_id, cancel).await;
        debug!(
            to = %navigation.to,
            from = navigation.from.as_deref().unwrap_or("-"),
            ?decision,
            "navigation checked"
        );
        Ok(decision)
    }

    /// Resolves entry to a guarded target for `user_id`.
    ///
    /// A known state answers immediately. Otherwise the first state reported
    /// for the user decides; if none arrives within the timeout the caller is
    /// treated as signed out.
    pub async fn resolve(
        &self,
        target: &str,
        user_id: Option<&str>,
        cancel: &CancellationToken,
    ) -> GuardDecision {
        let Some(user_id) = user_id else {
            return self.redirect();
        };

        let rx = match self.cache.lookup(user_id) {
            Lookup::Known(state) => return self.decide(target, state),
            Lookup::Pending(rx) => rx,
        };
        let mut wait = PendingWait {
            cache: &self.cache,
            user_id,
            rx,
        };

        let decision = tokio::select! {
            reported = &mut wait.rx => match reported {
                Ok(state) => self.decide(target, state),
                Err(_) => self.redirect(),
            },
            _ = tokio::time::sleep(self.timeout) => {
                warn!(user_id, timeout_ms = self.timeout.as_millis() as u64, "no auth state reported in time");
                self.redirect()
            }
            _ = cancel.cancelled() => GuardDecision::Aborted,
        };
        decision
    }

    fn decide(&self, target: &str, state: AuthState) -> GuardDecision {
        match state {
            AuthState::SignedIn => GuardDecision::Proceed {
                target: target.to_string(),
            },
            AuthState::SignedOut | AuthState::Unknown => self.redirect(),
        }
    }

    fn redirect(&self) -> GuardDecision {
        GuardDecision::Redirect {
            target: self.login_path.clone(),
        }
    }
}

/// A registered waiter. Dropping it closes the receiver and prunes the
/// cache entry, also when the request future is dropped mid-wait.
struct PendingWait<'a> {
    cache: &'a AuthStateCache,
    user_id: &'a str,
    rx: oneshot::Receiver<AuthState>,
}

impl Drop for PendingWait<'_> {
    fn drop(&mut self) {
        self.rx.close();
        self.cache.prune(self.user_id);
    }
}
