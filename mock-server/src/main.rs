use pakk_mock_server::{Db, DEFAULT_API_ROOT};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let secret = std::env::var("PAKK_MOCK_SECRET").unwrap_or_else(|_| "secret".to_string());
    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(%addr, root = DEFAULT_API_ROOT, "listening");
    pakk_mock_server::run(listener, DEFAULT_API_ROOT, &format!("Bearer {secret}"), Db::default()).await
}
