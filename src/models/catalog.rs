//! Equipment catalog: what the school owns and how many of each

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    config::CatalogConfig,
    error::{AppError, AppResult},
};

/// One kind of equipment and the number of units owned
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EquipmentStock {
    /// Equipment kind label (e.g. "Notebook")
    pub name: String,
    /// Total units owned
    pub quantity: i32,
}

impl EquipmentStock {
    pub fn new(name: impl Into<String>, quantity: i32) -> Self {
        Self { name: name.into(), quantity }
    }
}

/// Immutable equipment catalog, built once at startup and shared by the
/// booking service.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<EquipmentStock>,
}

impl Catalog {
    pub fn new(entries: Vec<EquipmentStock>) -> AppResult<Self> {
        if entries.is_empty() {
            return Err(AppError::Config("equipment catalog is empty".to_string()));
        }
        for (i, entry) in entries.iter().enumerate() {
            if entry.name.trim().is_empty() {
                return Err(AppError::Config("equipment name must not be blank".to_string()));
            }
            if entry.quantity <= 0 {
                return Err(AppError::Config(format!(
                    "equipment '{}' must have a positive quantity",
                    entry.name
                )));
            }
            if entries[..i].iter().any(|e| e.name == entry.name) {
                return Err(AppError::Config(format!(
                    "equipment '{}' is listed twice",
                    entry.name
                )));
            }
        }
        Ok(Self { entries })
    }

    pub fn from_config(config: &CatalogConfig) -> AppResult<Self> {
        Self::new(config.equipment.clone())
    }

    /// Total units owned for a kind, `None` if the kind is not in the catalog
    pub fn limit(&self, kind: &str) -> Option<i32> {
        self.entries
            .iter()
            .find(|e| e.name == kind)
            .map(|e| e.quantity)
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.limit(kind).is_some()
    }

    /// Entries in configuration order
    pub fn entries(&self) -> &[EquipmentStock] {
        &self.entries
    }

    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog() {
        let catalog = Catalog::from_config(&CatalogConfig::default()).unwrap();
        assert_eq!(catalog.limit("Notebook"), Some(10));
        assert_eq!(catalog.limit("Speaker-Set"), Some(5));
        assert_eq!(catalog.limit("Projector"), None);
        assert!(!catalog.contains("notebook"));
    }

    #[test]
    fn test_rejects_invalid_entries() {
        assert!(Catalog::new(vec![]).is_err());
        assert!(Catalog::new(vec![EquipmentStock::new("Tablet", 0)]).is_err());
        assert!(Catalog::new(vec![EquipmentStock::new("  ", 3)]).is_err());
        assert!(Catalog::new(vec![
            EquipmentStock::new("Tablet", 3),
            EquipmentStock::new("Tablet", 4),
        ])
        .is_err());
    }

    #[test]
    fn test_kinds_keep_configuration_order() {
        let catalog = Catalog::new(vec![
            EquipmentStock::new("Tablet", 3),
            EquipmentStock::new("Camera", 1),
        ])
        .unwrap();
        assert_eq!(catalog.kinds().collect::<Vec<_>>(), vec!["Tablet", "Camera"]);
    }
}
