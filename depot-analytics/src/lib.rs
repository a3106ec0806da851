pub mod reports;
pub mod pricing;
pub mod packing;
pub mod analyzer;

pub use reports::{InventoryStatistics, InventoryValidation, ShippingGroup};
pub use pricing::{discounted_price, expiry_multiplier};
pub use packing::pack_shipping_groups;
pub use analyzer::WarehouseAnalyzer;
