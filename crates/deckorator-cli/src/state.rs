//! Application state for one working directory.
//!
//! AppState pins the session to the concrete infra implementations: the
//! local artifact repository, the loaded config and the supplier directory.

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use deckorator_infra::config::{load_config, supplier_database_path};
use deckorator_infra::filesystem::LocalArtifactRepository;
use deckorator_infra::supplier::load_supplier_directory;
use deckorator_types::config::DeckoratorConfig;
use deckorator_types::supplier::SupplierDirectory;

pub struct AppState {
    pub dir: PathBuf,
    pub config: DeckoratorConfig,
    pub suppliers: SupplierDirectory,
    pub repository: LocalArtifactRepository,
}

impl AppState {
    /// Load config and suppliers for `dir`, which must already exist.
    pub async fn init(dir: &Path) -> anyhow::Result<Self> {
        let metadata = tokio::fs::metadata(dir)
            .await
            .with_context(|| format!("Cannot access working directory {}", dir.display()))?;
        if !metadata.is_dir() {
            bail!("{} is not a directory", dir.display());
        }

        let config = load_config(dir).await;
        let suppliers = load_supplier_directory(&supplier_database_path(dir, &config)).await;
        tracing::debug!(areas = suppliers.len(), "supplier directory ready");

        let repository = LocalArtifactRepository::new(dir)
            .context("Failed to set up the artifact repository")?;

        Ok(Self {
            dir: dir.to_path_buf(),
            config,
            suppliers,
            repository,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn init_uses_defaults_in_empty_directory() {
        let dir = tempdir().unwrap();
        let state = AppState::init(dir.path()).await.unwrap();
        assert_eq!(state.config, DeckoratorConfig::default());
        assert_eq!(state.suppliers.len(), SupplierDirectory::builtin().len());
        assert_eq!(state.repository.dir(), dir.path());
    }

    #[tokio::test]
    async fn init_rejects_missing_directory() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(AppState::init(&missing).await.is_err());
    }
}
