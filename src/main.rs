use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use drinks_api::auth::TokenVerifier;
use drinks_api::database::{DatabaseManager, DrinkRepository};
use drinks_api::{app, config, AppState};

#[derive(Parser)]
#[command(name = "drinks-api")]
#[command(about = "Drinks menu API server")]
#[command(version)]
struct Args {
    #[arg(long, help = "Port to listen on (overrides PORT)")]
    port: Option<u16>,

    #[arg(long, help = "sqlx SQLite URL (overrides DATABASE_URL)")]
    database_url: Option<String>,

    #[arg(long, help = "Keep existing drinks instead of recreating the table")]
    keep_data: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, AUTH0_DOMAIN, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    // Initialize configuration (this loads the config singleton)
    let mut config = config::config().clone();
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(url) = args.database_url {
        config.database.url = url;
    }
    if args.keep_data {
        config.database.reset_on_startup = false;
    }
    tracing::info!("Starting Drinks API in {:?} mode", config.environment);

    let pool = DatabaseManager::connect(&config.database).await?;
    if config.database.reset_on_startup {
        DatabaseManager::drop_and_create_all(&pool).await?;
    } else {
        DatabaseManager::create_all(&pool).await?;
    }

    let verifier = TokenVerifier::from_config(&config.auth).context("failed to set up token verification")?;
    tracing::info!("Accepting tokens issued by {}", verifier.issuer());

    let state = AppState::new(DrinkRepository::new(pool.clone()), verifier);
    let app = app(state, &config);

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Drinks API listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutting down");
}
