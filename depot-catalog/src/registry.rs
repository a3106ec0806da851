use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::category::{Category, CategoryRegistry};
use crate::product::ProductError;
use crate::warehouse::Warehouse;

pub const DEFAULT_WAREHOUSE: &str = "default";

/// Named warehouses, one instance per name.
pub struct WarehouseRegistry {
    warehouses: RwLock<HashMap<String, Arc<Warehouse>>>,
}

impl WarehouseRegistry {
    pub fn new() -> Self {
        Self {
            warehouses: RwLock::new(HashMap::new()),
        }
    }

    /// Return the warehouse registered under `name`, creating it on first use
    pub fn get_or_create(&self, name: &str) -> Arc<Warehouse> {
        if let Some(existing) = self
            .warehouses
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
        {
            return Arc::clone(existing);
        }

        let mut warehouses = self.warehouses.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(warehouses.entry(name.to_string()).or_insert_with(|| {
            tracing::info!("Created warehouse {}", name);
            Arc::new(Warehouse::new(name))
        }))
    }

    pub fn default_warehouse(&self) -> Arc<Warehouse> {
        self.get_or_create(DEFAULT_WAREHOUSE)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .warehouses
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }
}

impl Default for WarehouseRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Process-scoped registries, created once and passed around explicitly.
#[derive(Default)]
pub struct InventoryContext {
    pub categories: CategoryRegistry,
    pub warehouses: WarehouseRegistry,
}

impl InventoryContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(&self, name: &str) -> Result<Category, ProductError> {
        self.categories.category_of(name)
    }

    pub fn warehouse(&self, name: &str) -> Arc<Warehouse> {
        self.warehouses.get_or_create(name)
    }

    pub fn default_warehouse(&self) -> Arc<Warehouse> {
        self.warehouses.default_warehouse()
    }
}
