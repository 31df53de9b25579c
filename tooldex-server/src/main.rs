use tooldex_server::{AppState, Config, api};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tooldex_server=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env()?;

    tracing::info!("Starting tooldex-server (env: {})", config.environment);

    let state = AppState::new(&config)?;

    if state.assistant.is_none() {
        tracing::warn!(
            "Assistant backend disabled: set GOOGLE_CREDENTIALS_BASE64 and \
             GOOGLE_RAG_CORPUS to enable /api/chat"
        );
    }

    let app = api::create_router(state);

    let addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("tooldex-server HTTP listening on {addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
