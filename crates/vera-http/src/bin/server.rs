//! vera-http server binary.
//!
//! Reads `config.toml` (or the path given with `--config`), selects the
//! registro backend from the `use_database` flag, and serves the JSON API
//! over HTTP.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use vera_core::{service::RegistroService, store::RegistroStore};
use vera_http::ServerConfig;
use vera_store_memory::MemoryStore;
use vera_store_mongo::MongoStore;

#[derive(Parser)]
#[command(author, version, about = "Vera employee registry server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("VERA"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  // Both backends satisfy the same store contract; pick one here, once.
  if server_cfg.use_database {
    let store =
      MongoStore::connect(&server_cfg.mongo_uri, &server_cfg.mongo_database)
        .await
        .context("failed to connect to MongoDB")?;
    tracing::info!(
      database = %server_cfg.mongo_database,
      "using the durable MongoDB backend"
    );
    serve(server_cfg, store).await
  } else {
    tracing::info!("using the transient in-memory backend");
    serve(server_cfg, MemoryStore::new()).await
  }
}

/// Serve the API over whichever backend was selected at startup.
async fn serve<R>(config: ServerConfig, store: R) -> anyhow::Result<()>
where
  R: RegistroStore + 'static,
{
  let service = RegistroService::new(Arc::new(store));
  let app = vera_http::router(service);
  let address = format!("{}:{}", config.host, config.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
