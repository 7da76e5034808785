use ct_server::bootstrap::{self, AppPaths};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional
    dotenvy::dotenv().ok();

    let paths = AppPaths::resolve()?;
    bootstrap::init_tracing_subscriber(&paths.logs_dir)?;
    info!(version = env!("CARGO_PKG_VERSION"), "Starting cliptrans");

    bootstrap::run(paths).await
}
