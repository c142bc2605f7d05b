//! Catalog data the order domain consumes: items, product types and their step lists.
//!
//! The lookup itself is a collaborator concern. [`Catalog`] is the seam; the
//! in-memory implementation backs tests and single-process callers.

use std::collections::BTreeMap;
use std::sync::RwLock;

use anyhow::anyhow;
use serde::{Deserialize, Serialize};

use orderflow_core::{ItemId, ProductTypeId, StepId};

/// A sellable item as known to the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: ItemId,
    pub name: String,
    pub product_type_id: ProductTypeId,
    pub image: Option<String>,
}

impl CatalogItem {
    /// A new item that has no concrete pipeline yet.
    pub fn generic(id: ItemId, name: impl Into<String>, image: Option<String>) -> Self {
        Self {
            id,
            name: name.into(),
            product_type_id: ProductTypeId::GENERIC,
            image,
        }
    }

    pub fn is_generic(&self) -> bool {
        self.product_type_id.is_generic()
    }

    pub fn with_product_type(&self, product_type_id: ProductTypeId) -> Self {
        Self {
            product_type_id,
            ..self.clone()
        }
    }
}

/// A named production pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductType {
    pub id: ProductTypeId,
    pub name: String,
    pub steps: Vec<StepId>,
}

impl ProductType {
    pub fn new(id: ProductTypeId, name: impl Into<String>, steps: Vec<StepId>) -> Self {
        Self {
            id,
            name: name.into(),
            steps,
        }
    }
}

/// Catalog lookup capability.
///
/// Backends may fail for reasons the domain cannot name (network, storage), so
/// every call returns an `anyhow::Result`; `Ok(None)` means "does not exist".
pub trait Catalog {
    fn find_item(&self, id: ItemId) -> anyhow::Result<Option<CatalogItem>>;

    fn find_product_type(&self, id: ProductTypeId) -> anyhow::Result<Option<ProductType>>;

    fn register_item(&self, item: CatalogItem) -> anyhow::Result<()>;

    fn item_exists(&self, id: ItemId) -> anyhow::Result<bool> {
        Ok(self.find_item(id)?.is_some())
    }
}

#[derive(Debug, Default)]
struct CatalogState {
    items: BTreeMap<ItemId, CatalogItem>,
    product_types: BTreeMap<ProductTypeId, ProductType>,
}

/// Thread-safe in-memory catalog.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    state: RwLock<CatalogState>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_product_type(mut self, product_type: ProductType) -> Self {
        if let Ok(state) = self.state.get_mut() {
            state.product_types.insert(product_type.id, product_type);
        }
        self
    }

    pub fn with_item(mut self, item: CatalogItem) -> Self {
        if let Ok(state) = self.state.get_mut() {
            state.items.insert(item.id, item);
        }
        self
    }
}

impl Catalog for InMemoryCatalog {
    fn find_item(&self, id: ItemId) -> anyhow::Result<Option<CatalogItem>> {
        let state = self
            .state
            .read()
            .map_err(|_| anyhow!("catalog lock poisoned"))?;
        Ok(state.items.get(&id).cloned())
    }

    fn find_product_type(&self, id: ProductTypeId) -> anyhow::Result<Option<ProductType>> {
        let state = self
            .state
            .read()
            .map_err(|_| anyhow!("catalog lock poisoned"))?;
        Ok(state.product_types.get(&id).cloned())
    }

    fn register_item(&self, item: CatalogItem) -> anyhow::Result<()> {
        let mut state = self
            .state
            .write()
            .map_err(|_| anyhow!("catalog lock poisoned"))?;
        state.items.insert(item.id, item);
        Ok(())
    }
}
