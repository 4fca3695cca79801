//! Per-directory settings: `deckorator.toml` and the supplier database path.

use std::path::{Path, PathBuf};

use deckorator_types::config::{CONFIG_FILE_NAME, DeckoratorConfig};

/// Settings for the working directory `dir`.
///
/// Never fails. Without a `deckorator.toml` the built-in settings apply; a
/// file that cannot be read or does not deserialize is reported and ignored.
pub async fn load_config(dir: &Path) -> DeckoratorConfig {
    let path = dir.join(CONFIG_FILE_NAME);

    let text = match tokio::fs::read_to_string(&path).await {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no config file, using built-in settings");
            return DeckoratorConfig::default();
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "config file unreadable, ignoring it");
            return DeckoratorConfig::default();
        }
    };

    toml::from_str(&text).unwrap_or_else(|err| {
        tracing::warn!(path = %path.display(), error = %err, "config file invalid, ignoring it");
        DeckoratorConfig::default()
    })
}

/// Supplier database location, relative paths resolved against `dir`.
pub fn supplier_database_path(dir: &Path, config: &DeckoratorConfig) -> PathBuf {
    if config.supplier_database.is_absolute() {
        config.supplier_database.clone()
    } else {
        dir.join(&config.supplier_database)
    }
}
