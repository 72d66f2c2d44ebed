use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, oneshot};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    /// Nothing has been reported for this user yet.
    Unknown,
    SignedIn,
    SignedOut,
}

impl AuthState {
    pub fn is_known(&self) -> bool {
        !matches!(self, AuthState::Unknown)
    }
}

/// A sign-in or sign-out reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthEvent {
    pub user_id: String,
    pub signed_in: bool,
}

impl AuthEvent {
    pub fn state(&self) -> AuthState {
        if self.signed_in {
            AuthState::SignedIn
        } else {
            AuthState::SignedOut
        }
    }
}

/// Source of auth-state notifications. Each subscription receives every
/// event published after it was created, zero or more times per user.
pub trait AuthStateNotifier: Send + Sync {
    fn subscribe(&self) -> broadcast::Receiver<AuthEvent>;
}

/// In-process notifier fed by the identity provider's webhook.
#[derive(Clone, Debug)]
pub struct LocalAuthNotifier {
    tx: broadcast::Sender<AuthEvent>,
}

impl LocalAuthNotifier {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Returns the number of subscribers that received the event.
    pub fn publish(&self, event: AuthEvent) -> usize {
        match self.tx.send(event) {
            Ok(receivers) => receivers,
            Err(broadcast::error::SendError(event)) => {
                warn!(user_id = %event.user_id, "auth event published with no subscribers");
                0
            }
        }
    }
}

impl AuthStateNotifier for LocalAuthNotifier {
    fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.tx.subscribe()
    }
}

#[derive(Debug)]
struct Entry {
    state: AuthState,
    waiters: Vec<oneshot::Sender<AuthState>>,
}

impl Default for Entry {
    fn default() -> Self {
        Self {
            state: AuthState::Unknown,
            waiters: Vec::new(),
        }
    }
}

/// Result of reading the cache for one user.
#[derive(Debug)]
pub enum Lookup {
    Known(AuthState),
    /// Resolves with the first state reported after the lookup.
    Pending(oneshot::Receiver<AuthState>),
}

/// Process-wide auth state, keyed by user id.
#[derive(Clone, Debug, Default)]
pub struct AuthStateCache {
    entries: Arc<Mutex<HashMap<String, Entry>>>,
}

impl AuthStateCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Entry>> {
        self.entries.lock().expect("auth state cache mutex poisoned")
    }

    pub fn current(&self, user_id: &str) -> AuthState {
        self.lock()
            .get(user_id)
            .map(|entry| entry.state)
            .unwrap_or(AuthState::Unknown)
    }

    /// Reads the state for `user_id`, registering a one-shot waiter when
    /// nothing is known yet. Check and registration happen under one lock, so
    /// an event applied concurrently is never missed.
    pub fn lookup(&self, user_id: &str) -> Lookup {
        let mut entries = self.lock();
        let entry = entries.entry(user_id.to_string()).or_default();
        if entry.state.is_known() {
            return Lookup::Known(entry.state);
        }
        entry.waiters.retain(|waiter| !waiter.is_closed());
        let (tx, rx) = oneshot::channel();
        entry.waiters.push(tx);
        Lookup::Pending(rx)
    }

    /// Records the event and hands its state to every pending waiter. A
    /// waiter is resolved at most once, so later events cannot change an
    /// outcome that was already delivered.
    pub fn apply(&self, event: &AuthEvent) {
        let state = event.state();
        let mut entries = self.lock();
        let entry = entries.entry(event.user_id.clone()).or_default();
        entry.state = state;
        let waiters = std::mem::take(&mut entry.waiters);
        let resolved = waiters
            .into_iter()
            .filter_map(|waiter| waiter.send(state).ok())
            .count();
        debug!(user_id = %event.user_id, ?state, resolved, "auth state applied");
    }

    /// Number of live waiters for `user_id`.
    pub fn waiting(&self, user_id: &str) -> usize {
        self.lock()
            .get(user_id)
            .map(|entry| entry.waiters.iter().filter(|w| !w.is_closed()).count())
            .unwrap_or(0)
    }

    /// Number of users the cache holds an entry for.
    pub fn tracked_users(&self) -> usize {
        self.lock().len()
    }

    /// Drops abandoned waiters, and the whole entry if nothing is known and
    /// nobody is waiting any more.
    pub fn prune(&self, user_id: &str) {
        let mut entries = self.lock();
        let remove = match entries.get_mut(user_id) {
            Some(entry) => {
                entry.waiters.retain(|waiter| !waiter.is_closed());
                !entry.state.is_known() && entry.waiters.is_empty()
            }
            None => false,
        };
        if remove {
            entries.remove(user_id);
        }
    }

    /// Subscribes once to `notifier` and applies its events in arrival order
    /// until `shutdown` fires or the notifier closes.
    pub fn observe<N>(&self, notifier: &N, shutdown: CancellationToken) -> JoinHandle<()>
    where
        N: AuthStateNotifier + ?Sized,
    {
        let mut rx = notifier.subscribe();
        let cache = self.clone();
        tokio::spawn(async move {
            info!("auth state subscription started");
            loop {
                tokio::select! {
                    _ = shutdown.cancelled() => break,
                    received = rx.recv() => match received {
                        Ok(event) => cache.apply(&event),
                        Err(broadcast::error::RecvError::Lagged(skipped)) => {
                            warn!(skipped, "auth state subscription lagged");
                        }
                        Err(broadcast::error::RecvError::Closed) => break,
                    },
                }
            }
            info!("auth state subscription stopped");
        })
    }
}
