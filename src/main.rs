use std::net::SocketAddr;
use std::sync::Arc;

use interview_tracker::{
    config::{get_config, init_config},
    database::pool::{create_pool, run_migrations},
    routes,
    services::interview_store::{InterviewStore, MemoryInterviewStore, PgInterviewStore},
    AppState,
};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    init_config()?;
    let config = get_config()?;

    let store: Arc<dyn InterviewStore> = match &config.database_url {
        Some(url) => {
            let pool = create_pool(url).await?;
            run_migrations(&pool).await?;
            info!("Using PostgreSQL interview store");
            Arc::new(PgInterviewStore::new(pool))
        }
        None => {
            warn!("DATABASE_URL not set, interviews are kept in memory only");
            Arc::new(MemoryInterviewStore::new())
        }
    };

    let app_state = AppState::new(config.clone(), store);

    let shutdown = app_state.shutdown.clone();
    let subscription = app_state.start_auth_subscription();

    let app = routes::router(app_state);

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    {
        let shutdown = shutdown.clone();
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    tracing::error!(error = ?e, "failed to listen for shutdown signal");
                }
                info!("Shutting down");
                shutdown.cancel();
            })
            .await?;
    }

    shutdown.cancel();
    subscription.await?;

    Ok(())
}
