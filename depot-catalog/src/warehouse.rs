use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

use crate::category::Category;
use crate::product::{Product, ProductError};

/// Products keyed by id, iterated in insertion order.
#[derive(Default)]
struct Stock {
    /// Insertion sequence -> product
    products: BTreeMap<u64, Product>,
    index: HashMap<Uuid, u64>,
    next_seq: u64,
    /// Ids whose price was updated since the last `clear_changes`
    changed: HashSet<Uuid>,
}

/// In-memory warehouse.
///
/// All state sits behind one lock: mutations are exclusive and every
/// read copies a consistent point-in-time view.
pub struct Warehouse {
    name: String,
    stock: RwLock<Stock>,
}

impl Warehouse {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            stock: RwLock::new(Stock::default()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add a product, rejecting ids already present
    pub fn add(&self, product: Product) -> Result<(), WarehouseError> {
        let mut stock = self.write();
        if stock.index.contains_key(&product.id()) {
            return Err(WarehouseError::DuplicateIdentity(product.id()));
        }

        let seq = stock.next_seq;
        stock.next_seq += 1;
        stock.index.insert(product.id(), seq);
        tracing::debug!(warehouse = %self.name, product_id = %product.id(), "Added product {}", product.name());
        stock.products.insert(seq, product);
        Ok(())
    }

    pub fn get_by_id(&self, id: &Uuid) -> Option<Product> {
        let stock = self.read();
        stock.index.get(id).and_then(|seq| stock.products.get(seq)).cloned()
    }

    /// Remove a product. Missing ids are a no-op and return `false`.
    pub fn remove(&self, id: &Uuid) -> bool {
        let mut stock = self.write();
        let Some(seq) = stock.index.remove(id) else {
            return false;
        };
        stock.products.remove(&seq);
        stock.changed.remove(id);
        tracing::debug!(warehouse = %self.name, product_id = %id, "Removed product");
        true
    }

    /// Replace the price of a stocked product and mark it as changed
    pub fn update_price(&self, id: &Uuid, new_price: Decimal) -> Result<(), WarehouseError> {
        let mut stock = self.write();
        let seq = *stock.index.get(id).ok_or(WarehouseError::NotFound(*id))?;
        let product = stock
            .products
            .get_mut(&seq)
            .ok_or(WarehouseError::NotFound(*id))?;

        let old_price = product.price();
        product.set_price(new_price)?;
        stock.changed.insert(*id);

        tracing::info!(
            warehouse = %self.name,
            product_id = %id,
            "Price updated {} -> {}",
            old_price,
            new_price
        );
        Ok(())
    }

    /// Products whose price changed, in insertion order
    pub fn changed_products(&self) -> Vec<Product> {
        let stock = self.read();
        stock
            .products
            .values()
            .filter(|p| stock.changed.contains(&p.id()))
            .cloned()
            .collect()
    }

    pub fn is_changed(&self, id: &Uuid) -> bool {
        self.read().changed.contains(id)
    }

    pub fn clear_changes(&self) {
        self.write().changed.clear();
    }

    /// Owned copy of every product in insertion order.
    ///
    /// Later mutations of the warehouse are not visible through it.
    pub fn all_products(&self) -> Vec<Product> {
        self.read().products.values().cloned().collect()
    }

    pub fn shippable_products(&self) -> Vec<Product> {
        self.filtered(Product::is_shippable)
    }

    pub fn perishable_products(&self) -> Vec<Product> {
        self.filtered(Product::is_perishable)
    }

    pub fn grouped_by_category(&self) -> BTreeMap<Category, Vec<Product>> {
        let mut groups: BTreeMap<Category, Vec<Product>> = BTreeMap::new();
        for product in self.read().products.values() {
            groups
                .entry(product.category().clone())
                .or_default()
                .push(product.clone());
        }
        groups
    }

    pub fn len(&self) -> usize {
        self.read().products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().products.is_empty()
    }

    /// Drop every product and all change marks
    pub fn clear(&self) {
        let mut stock = self.write();
        let removed = stock.products.len();
        let next_seq = stock.next_seq;
        *stock = Stock {
            next_seq,
            ..Stock::default()
        };
        tracing::info!(warehouse = %self.name, "Cleared {} products", removed);
    }

    fn filtered(&self, keep: impl Fn(&Product) -> bool) -> Vec<Product> {
        self.read()
            .products
            .values()
            .filter(|p| keep(p))
            .cloned()
            .collect()
    }

    fn read(&self) -> RwLockReadGuard<'_, Stock> {
        self.stock.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Stock> {
        self.stock.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for Warehouse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Warehouse")
            .field("name", &self.name)
            .field("products", &self.len())
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WarehouseError {
    #[error("Product with id {0} already exists")]
    DuplicateIdentity(Uuid),

    #[error("Product not found: {0}")]
    NotFound(Uuid),

    #[error(transparent)]
    InvalidArgument(#[from] ProductError),
}
