use anyhow::{anyhow, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use userauth_server::{run_server, ServerConfig};

fn init_tracing() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing().ok();
    let config = ServerConfig::from_env();

    info!(
        "userauth-server: db={} seed_count={} {}",
        config.db_path.display(),
        config.seed_count,
        if config.read_only {
            "(read-only mode; seeding disabled)"
        } else {
            "(writable)"
        }
    );
    info!("Available endpoints:");
    info!("  GET  /health - Liveness check");
    info!("  GET  /ready  - Storage reachability");
    info!("  POST /verify - Verify user credentials");
    info!("  GET  /seed   - Replace the user table with test users");

    run_server(config).await
}
