//! Catalog registry — museum key → shared catalog.
//!
//! Catalogs are handed out as [`SharedCatalog`] handles. Replacing or
//! removing a key only drops the registry's own handle: anyone still holding
//! the old catalog keeps a valid, independent instance.

use std::sync::Arc;

use hashbrown::HashMap;
use parking_lot::RwLock;
use tracing::debug;

use crate::catalog::ExhibitCatalog;
use crate::config::CatalogConfig;
use crate::export::RegistryDocument;
use crate::model::Exhibit;
use crate::{Error, Result};

/// Shared-ownership handle to a catalog.
///
/// The lock only gives holders a safe borrow discipline. Multi-step
/// mutations across separate lock acquisitions are not atomic.
pub type SharedCatalog = Arc<RwLock<ExhibitCatalog>>;

/// Keyed collection of catalogs, one per museum.
#[derive(Debug, Default)]
pub struct CatalogRegistry {
    catalogs: HashMap<String, SharedCatalog>,
    config: CatalogConfig,
}

impl CatalogRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry that builds every catalog under `config`.
    pub fn with_config(config: CatalogConfig) -> Self {
        Self { catalogs: HashMap::new(), config }
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Build a catalog and bind it to `key`, replacing any previous binding.
    pub fn add(
        &mut self,
        key: impl Into<String>,
        name: impl Into<String>,
        city: impl Into<String>,
        exhibits: impl IntoIterator<Item = Exhibit>,
    ) -> Result<SharedCatalog> {
        let catalog = ExhibitCatalog::with_config(name, city, exhibits, &self.config)?;
        Ok(self.insert(key, catalog))
    }

    /// Bind an already built catalog to `key`, replacing any previous binding.
    pub fn insert(&mut self, key: impl Into<String>, catalog: ExhibitCatalog) -> SharedCatalog {
        let key = key.into();
        let handle = Arc::new(RwLock::new(catalog));
        if self.catalogs.insert(key.clone(), Arc::clone(&handle)).is_some() {
            debug!(museum = %key, "catalog replaced");
        } else {
            debug!(museum = %key, "catalog added");
        }
        handle
    }

    pub fn get(&self, key: &str) -> Result<SharedCatalog> {
        self.catalogs
            .get(key)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("Museum '{key}'")))
    }

    /// Drop the binding for `key`, returning the registry's handle if any.
    pub fn remove(&mut self, key: &str) -> Option<SharedCatalog> {
        let removed = self.catalogs.remove(key);
        if removed.is_some() {
            debug!(museum = key, "catalog removed");
        }
        removed
    }

    pub fn contains(&self, key: &str) -> bool {
        self.catalogs.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.catalogs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalogs.is_empty()
    }

    /// Registered keys, sorted.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.catalogs.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Export every catalog, ordered by key.
    ///
    /// Takes a read lock on each catalog in turn, so it deadlocks if the
    /// calling thread still holds a `write()` guard on one of them.
    pub fn export_all(&self) -> RegistryDocument {
        let museums = self
            .keys()
            .into_iter()
            .filter_map(|key| self.catalogs.get(key))
            .map(|catalog| catalog.read().export())
            .collect();
        RegistryDocument { museums }
    }

    /// Rebuild a registry from an exported document. Each museum is keyed
    /// by its name; a later museum with the same name replaces an earlier one.
    ///
    /// Documents carry no registry keys, so a catalog added under a key other
    /// than its museum name comes back under the name.
    pub fn from_document(doc: &RegistryDocument, config: CatalogConfig) -> Result<Self> {
        let mut registry = Self::with_config(config);
        for museum in &doc.museums {
            let catalog = ExhibitCatalog::from_document(museum, &registry.config)?;
            registry.insert(museum.name.clone(), catalog);
        }
        Ok(registry)
    }

    pub fn from_json(json: &str, config: CatalogConfig) -> Result<Self> {
        Self::from_document(&RegistryDocument::from_json(json)?, config)
    }
}
