//! Supplier database loader.
//!
//! The database is a JSON object keyed by zip code with a mandatory
//! `default` entry. When the file is missing or unusable the built-in table
//! is used instead.

use std::path::Path;

use deckorator_types::error::SupplierError;
use deckorator_types::supplier::SupplierDirectory;

pub fn parse_supplier_directory(json: &str) -> Result<SupplierDirectory, SupplierError> {
    serde_json::from_str(json).map_err(|e| SupplierError::Parse(e.to_string()))
}

/// Load the supplier database at `path`, falling back to
/// [`SupplierDirectory::builtin`].
pub async fn load_supplier_directory(path: &Path) -> SupplierDirectory {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No supplier database at {}, using built-in table", path.display());
            return SupplierDirectory::builtin();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using built-in table", path.display());
            return SupplierDirectory::builtin();
        }
    };

    match parse_supplier_directory(&content) {
        Ok(directory) => {
            tracing::debug!(entries = directory.len(), "loaded supplier database");
            directory
        }
        Err(err) => {
            tracing::warn!("{}: {err}, using built-in table", path.display());
            SupplierDirectory::builtin()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const DATABASE: &str = r#"{
        "10001": {"area": "Manhattan, New York", "suppliers": ["Gotham Lumber", "Midtown Hardware"]},
        "default": {"area": "Your local area", "suppliers": ["Home Depot"]}
    }"#;

    #[test]
    fn parse_valid_database() {
        let directory = parse_supplier_directory(DATABASE).unwrap();
        assert_eq!(directory.len(), 2);
        assert_eq!(
            directory.resolve("10001").suppliers,
            vec!["Gotham Lumber", "Midtown Hardware"]
        );
        assert_eq!(directory.resolve("22032").area, "Your local area");
    }

    #[test]
    fn parse_rejects_database_without_default() {
        let err = parse_supplier_directory(r#"{"10001": {"area": "NYC"}}"#).unwrap_err();
        assert!(matches!(err, SupplierError::Parse(msg) if msg.contains("default")));
    }

    #[tokio::test]
    async fn load_reads_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("suppliers_database.json");
        tokio::fs::write(&path, DATABASE).await.unwrap();

        let directory = load_supplier_directory(&path).await;
        assert_eq!(directory.resolve("10001").area, "Manhattan, New York");
    }

    #[tokio::test]
    async fn load_missing_or_invalid_file_uses_builtin() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("suppliers_database.json");
        assert_eq!(load_supplier_directory(&path).await, SupplierDirectory::builtin());

        tokio::fs::write(&path, "[1, 2, 3]").await.unwrap();
        assert_eq!(load_supplier_directory(&path).await, SupplierDirectory::builtin());
    }
}
