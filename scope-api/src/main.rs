use scope_api::{config::read_config, router};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = read_config().expect("Failed to read configuration");
    let address = format!("{}:{}", config.application.host, config.application.port);

    let app = router::create(&config).expect("Failed to load reference datasets");

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .expect("Failed to bind address");
    tracing::info!("listening on {}", address);

    axum::serve(listener, app)
        .await
        .expect("Server stopped unexpectedly");
}
