use offers_axum::{openapi, start_server};
use offers_sqlite::Db;
use offersd::{AppConfig, Cli, impls::OffersApp};
use std::fs::File;
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // By convention, we leverage `tracing` to instrument and log various
    // operations throughout this project.
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::import()?;

    // If requested, dump the schema and exit.
    if let Some(path) = &cli.schema {
        let schema = openapi::<OffersApp>();
        serde_json::to_writer_pretty(File::create(path)?, &schema)?;
        return Ok(());
    }

    let AppConfig { server, database } = AppConfig::load(&cli)?;
    tracing::info!(?server, ?database, "loaded configuration");

    let db = Db::open(&database).await?;
    let app = OffersApp { db };

    start_server(server, app).await?;

    Ok(())
}
