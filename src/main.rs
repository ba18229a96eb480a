use std::net::SocketAddr;
use std::sync::Arc;

use great_job_backend::{
    config::{get_config, init_config, StoreBackend},
    database::{
        memory::MemoryOfferStore, pool::create_pool, postgres::PgOfferStore,
        seed::seed_sample_data, store::OfferStore,
    },
    routes, telemetry, AppState,
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_config()?;
    let config = get_config()?;
    telemetry::init(config.log_format)?;

    let store: Arc<dyn OfferStore> = match config.store_backend {
        StoreBackend::Postgres => {
            let pool = create_pool(config).await?;
            sqlx::migrate!("./migrations").run(&pool).await?;
            if config.seed_sample_data {
                seed_sample_data(&pool).await?;
            }
            info!(
                max_connections = config.db_max_connections,
                "connected to postgres"
            );
            Arc::new(PgOfferStore::new(pool))
        }
        StoreBackend::Memory => {
            info!("using in-memory store with sample data");
            Arc::new(MemoryOfferStore::with_sample_data().await?)
        }
    };

    let app = routes::router(AppState::new(store))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = ?e, "failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = ?e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received");
}
