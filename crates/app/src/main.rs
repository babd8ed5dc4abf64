use anyhow::Context;
use serde_json::json;

use autoparts_app::{AppConfig, InventorySession, seed_file};
use autoparts_inventory::InventoryStore;

fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("invalid configuration")?;
    autoparts_observability::tracing::init(config.log_format);

    let parts = seed_file::initial_parts(config.seed_file.as_deref())?;
    let store = InventoryStore::with_parts(parts).context("invalid seed data")?;
    let session = InventorySession::new(store).with_recent_limit(config.recent_limit);

    tracing::info!(
        parts = session.parts().len(),
        recent_limit = config.recent_limit,
        "inventory session ready"
    );

    let snapshot = json!({
        "dashboard": session.dashboard(),
        "analytics": session.analytics(),
    });
    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    Ok(())
}
