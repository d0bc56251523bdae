use axum::http::HeaderValue;
use course_catalog::api;
use course_catalog::config::AppConfig;
use course_catalog::db;
use course_catalog::state::AppState;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "course_catalog=debug,tower_http=info".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;

    let pool = db::connect(&config.database_url, config.max_connections).await?;
    db::migrate(&pool).await?;

    let state = AppState { db: pool.clone() };
    let origin = HeaderValue::from_str(&config.allowed_origin)?;

    let app = api::app(state, origin);

    info!("listening on http://{}", config.bind_addr);
    info!("accepting cross-origin requests from {}", config.allowed_origin);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
