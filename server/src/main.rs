//! Autocatalog API server.
//!
//! Run from repo root: `cargo run -p autocatalog-server`

use autocatalog::{apply_migrations, app, create_pool, ensure_database_exists, load_from_env, AppState};
use tokio::{net::TcpListener, signal};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("autocatalog=info,tower_http=info")),
        )
        .init();

    let config = load_from_env()?;
    ensure_database_exists(&config.db.url).await?;
    let pool = create_pool(&config.db).await?;
    apply_migrations(&pool).await?;
    tracing::info!(env = %config.env, "database ready");

    let listener = TcpListener::bind(config.listen_addr()).await?;
    tracing::info!("autocatalog listening on http://{}", listener.local_addr()?);

    let router = app(AppState::new(pool.clone(), config));
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::warn!("received ctrl-c, shutting down"),
        _ = terminate => tracing::warn!("received SIGTERM, shutting down"),
    }
}
