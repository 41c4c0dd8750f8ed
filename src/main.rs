use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Init logging
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap();
    fmt().with_env_filter(filter).init();

    // Startup banner at info level so something always prints at default verbosity
    let rust_log = std::env::var("RUST_LOG").unwrap_or_else(|_| "<unset>".to_string());
    let http_port = std::env::var("PAZAR_HTTP_PORT").unwrap_or_else(|_| "5000".to_string());
    let has_secret = std::env::var("PAZAR_TOKEN_SECRET").is_ok();
    info!(
        target: "startup",
        "pazar starting: RUST_LOG='{}', http_port={}, token_secret_from_env={}",
        rust_log, http_port, has_secret
    );

    pazar::server::run().await
}
