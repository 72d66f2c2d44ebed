pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::services::{
    auth_gate::AuthGate,
    auth_state::{AuthStateCache, LocalAuthNotifier},
    interview_service::InterviewService,
    interview_store::InterviewStore,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub auth_notifier: LocalAuthNotifier,
    pub auth_cache: AuthStateCache,
    pub auth_gate: AuthGate,
    pub interview_service: InterviewService,
    /// Cancelled on shutdown; stops the auth subscription and aborts pending
    /// guard waits.
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(config: Config, store: Arc<dyn InterviewStore>) -> Self {
        let auth_notifier = LocalAuthNotifier::new(256);
        let auth_cache = AuthStateCache::new();
        let auth_gate = AuthGate::new(
            auth_cache.clone(),
            config.login_path.clone(),
            config.auth_gate_timeout(),
        );
        let interview_service = InterviewService::new(store);

        Self {
            config: Arc::new(config),
            auth_notifier,
            auth_cache,
            auth_gate,
            interview_service,
            shutdown: CancellationToken::new(),
        }
    }

    /// Starts the single long-lived subscription that feeds the auth-state cache.
    pub fn start_auth_subscription(&self) -> JoinHandle<()> {
        self.auth_cache
            .observe(&self.auth_notifier, self.shutdown.child_token())
    }

    /// Token for one guard wait; it fires when the process shuts down.
    pub fn navigation_token(&self) -> CancellationToken {
        self.shutdown.child_token()
    }
}
