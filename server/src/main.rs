//! Accounts server: reads settings, picks a store, serves the API.
//!
//! Run from repo root: `cargo run -p accounts-server`
//! Without `DATABASE_URL` the server keeps everything in memory.

use accounts_api::{app, apply_migrations, ensure_database_exists, AppState, MemoryStore, PgStore, Settings};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::from_env()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("accounts_api=info,accounts_server=info,tower_http=info")
            }),
        )
        .init();

    let state = match &settings.database_url {
        Some(database_url) => {
            ensure_database_exists(database_url).await?;
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(settings.max_connections)
                .connect(database_url)
                .await?;
            apply_migrations(&pool).await?;
            tracing::info!("using PostgreSQL store");
            AppState::postgres(PgStore::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory store");
            AppState::in_memory(MemoryStore::new())
        }
    };

    let router = app(state, settings.body_limit);
    let listener = TcpListener::bind(settings.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router).await?;
    Ok(())
}
