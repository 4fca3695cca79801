//! Local supplier lookup keyed by location (zip) code.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::SupplierError;

/// Key of the fallback entry every directory must contain.
pub const DEFAULT_SUPPLIER_KEY: &str = "default";

/// Suppliers serving one location code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplierEntry {
    pub area: String,
    #[serde(default)]
    pub suppliers: Vec<String>,
}

/// Location code -> supplier entry, guaranteed to hold a `default` entry.
///
/// Deserializes from the `suppliers_database.json` shape:
/// `{"22032": {"area": "...", "suppliers": [...]}, "default": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, SupplierEntry>", into = "BTreeMap<String, SupplierEntry>")]
pub struct SupplierDirectory {
    entries: BTreeMap<String, SupplierEntry>,
}

impl SupplierDirectory {
    pub fn new(entries: BTreeMap<String, SupplierEntry>) -> Result<Self, SupplierError> {
        if !entries.contains_key(DEFAULT_SUPPLIER_KEY) {
            return Err(SupplierError::MissingDefault);
        }
        Ok(Self { entries })
    }

    /// The table used when no supplier database file is present.
    pub fn builtin() -> Self {
        let entries = BTreeMap::from([
            (
                "22032".to_string(),
                SupplierEntry {
                    area: "Burke/Fairfax, Virginia".to_string(),
                    suppliers: vec![
                        "Home Depot Burke".to_string(),
                        "Lowe's Burke".to_string(),
                        "Superior Building Supply".to_string(),
                    ],
                },
            ),
            (
                DEFAULT_SUPPLIER_KEY.to_string(),
                SupplierEntry {
                    area: "Your local area".to_string(),
                    suppliers: vec![
                        "Home Depot".to_string(),
                        "Lowe's".to_string(),
                        "Local lumber yards".to_string(),
                    ],
                },
            ),
        ]);
        Self { entries }
    }

    /// Entry for `code`, or the `default` entry when the code is unknown.
    pub fn resolve(&self, code: &str) -> &SupplierEntry {
        self.entries
            .get(code.trim())
            .unwrap_or_else(|| self.default_entry())
    }

    pub fn default_entry(&self) -> &SupplierEntry {
        // Presence is checked by every constructor.
        &self.entries[DEFAULT_SUPPLIER_KEY]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for SupplierDirectory {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TryFrom<BTreeMap<String, SupplierEntry>> for SupplierDirectory {
    type Error = SupplierError;

    fn try_from(entries: BTreeMap<String, SupplierEntry>) -> Result<Self, Self::Error> {
        Self::new(entries)
    }
}

impl From<SupplierDirectory> for BTreeMap<String, SupplierEntry> {
    fn from(directory: SupplierDirectory) -> Self {
        directory.entries
    }
}
