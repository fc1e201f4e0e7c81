//! Standalone relay, no CLI wrapper.
//!
//! Defaults match `RelayConfig::default()`; PORT and STATIC_DIR override:
//!
//!     PORT=4000 cargo run -p throne-relay --example run_relay

use tracing_subscriber::EnvFilter;

use throne_relay::{run_server, RelayConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut config = RelayConfig::default();
    if let Ok(port) = std::env::var("PORT") {
        config.port = port.parse()?;
    }
    if let Ok(dir) = std::env::var("STATIC_DIR") {
        config.static_dir = dir;
    }

    run_server(config).await
}
