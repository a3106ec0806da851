pub mod category;
pub mod product;
pub mod warehouse;
pub mod registry;

pub use category::{Category, CategoryRegistry};
pub use product::{
    ElectronicsDetails, FoodDetails, Perishable, Product, ProductError, ProductKind, Shippable,
    MAX_AMOUNT,
};
pub use warehouse::{Warehouse, WarehouseError};
pub use registry::{InventoryContext, WarehouseRegistry, DEFAULT_WAREHOUSE};
