use dotenvy::dotenv;
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use farmledger::bootstrap::ensure_default_admin;
use farmledger::router::init_router;
use farmledger::state::{AppState, init_app_state};

#[tokio::main]
async fn main() {
    dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                // axum logs rejections from built-in extractors with the
                // `axum::rejection` target at TRACE level.
                format!(
                    "{}=debug,tower_http=debug,axum::rejection=trace",
                    env!("CARGO_CRATE_NAME")
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let state = init_app_state();

    if let Err(e) = std::fs::create_dir_all(&state.upload_config.dir) {
        warn!(error = %e, "Failed to create upload directory");
    }

    // Store preparation is best-effort: a down database at startup is
    // logged and the server keeps running; requests fail individually
    // until it comes back.
    if let Err(e) = prepare_store(&state).await {
        warn!(error = %e, "Database not ready at startup; continuing");
    }

    let app = init_router(state);

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(4000);
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .expect("Failed to bind listen port");
    info!(port, "Server running");
    axum::serve(listener, app).await.expect("Server error");
}

async fn prepare_store(state: &AppState) -> anyhow::Result<()> {
    sqlx::migrate!().run(&state.db).await?;
    ensure_default_admin(&state.db).await.map_err(|e| e.error)?;
    Ok(())
}
