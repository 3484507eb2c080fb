use anyhow::{Context, Result};
use oasis_core::{AppConfig, Controller};
use oasis_memory::FileStore;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const CONFIG_FILE: &str = "config.yaml";

pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

pub fn config_path(data_dir: &Path, explicit: Option<&Path>) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(|| data_dir.join(CONFIG_FILE))
}

pub fn load_config(path: &Path) -> Result<AppConfig> {
    let mut config = AppConfig::load(path)
        .with_context(|| format!("Failed to load config from {}", path.display()))?;
    config.apply_env_overrides();
    config
        .validate()
        .with_context(|| format!("Invalid config in {}", path.display()))?;
    Ok(config)
}

/// Prepares the data directory and opens the controller over the file store.
pub async fn open_controller(data_dir: &Path, config: AppConfig) -> Result<Controller> {
    let store = FileStore::new(data_dir, config.storage_key.clone());
    store
        .initialize()
        .await
        .with_context(|| format!("Failed to create data directory {}", data_dir.display()))?;

    tracing::info!("Using state document {:?}", store.path());
    Ok(Controller::open(Arc::new(store), config).await)
}
