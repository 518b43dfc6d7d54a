//! remedia-daemon: the Remedia vault daemon.
//!
//! Single OS process running a Tokio async runtime. Owns the SQLite
//! store and enforces document retention on a fixed cadence.

mod config;
mod sweeper;

use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use crate::config::DaemonConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("remedia=info".parse()?),
        )
        .init();

    info!("Remedia daemon starting");

    // 1. Load config
    let config = DaemonConfig::load()?;
    let data_dir = config.data_dir();

    // Ensure data directory exists
    std::fs::create_dir_all(&data_dir)?;

    // 2. The vault key must parse before anything touches the store; a
    // daemon that cannot unseal content has no business accepting it.
    let key_b64 = config
        .encryption_key_b64()
        .context("no vault key: set security.encryption_key or REMEDIA_ENCRYPTION_KEY")?;
    let _vault_key = remedia_crypto::ContentKey::from_base64(&key_b64)
        .context("vault key is not valid base64 for a 256-bit key")?;

    // 3. Open database
    let db_path = data_dir.join("remedia.db");
    let conn = remedia_db::open(&db_path)?;
    let db = Arc::new(tokio::sync::Mutex::new(conn));

    let vault_policy = config.vault_policy();
    let code_policy = config.code_policy();
    info!(
        max_file_size_bytes = vault_policy.max_file_size_bytes,
        retention_days = vault_policy.retention_days,
        code_expiration_hours = code_policy.default_expiration_hours,
        code_max_uses = code_policy.default_max_uses,
        "policies loaded"
    );

    // 4. Run the retention sweeper until shutdown
    if config.retention.auto_delete_enabled {
        tokio::select! {
            _ = sweeper::run(db.clone(), config.retention.sweep_interval_minutes) => {}
            _ = tokio::signal::ctrl_c() => {
                info!("Ctrl-C received, shutting down");
            }
        }
    } else {
        info!("auto delete disabled, retention sweeper not started");
        tokio::signal::ctrl_c().await?;
        info!("Ctrl-C received, shutting down");
    }

    info!("Daemon stopped");
    Ok(())
}
