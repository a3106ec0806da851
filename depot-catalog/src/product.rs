use chrono::NaiveDate;
use depot_shared::round_money;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::category::Category;

/// Flat electronics shipping rate
const ELECTRONICS_BASE_SHIPPING: Decimal = Decimal::from_parts(79, 0, 0, false, 0);
/// Surcharge for electronics heavier than the threshold
const ELECTRONICS_HEAVY_SURCHARGE: Decimal = Decimal::from_parts(49, 0, 0, false, 0);
const ELECTRONICS_WEIGHT_THRESHOLD: Decimal = Decimal::from_parts(5, 0, 0, false, 0);
/// Food ships at a fixed rate per unit of weight
const FOOD_RATE_PER_WEIGHT: Decimal = Decimal::from_parts(50, 0, 0, false, 0);

/// Upper bound for prices and weights.
///
/// Keeps sums and products over a whole warehouse far inside `Decimal` range.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Capability of products that can be shipped.
pub trait Shippable {
    /// Non-negative shipping weight
    fn weight(&self) -> Decimal;

    /// Shipping cost rounded to two decimals, half up.
    fn calculate_shipping_cost(&self) -> Decimal;
}

/// Capability of products that expire.
pub trait Perishable {
    fn expiration_date(&self) -> NaiveDate;

    /// Expired once the expiration date is strictly before `today`.
    fn is_expired(&self, today: NaiveDate) -> bool {
        self.expiration_date() < today
    }
}

/// Product variants in the warehouse
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductKind {
    Electronics(ElectronicsDetails),
    Food(FoodDetails),
    /// No shipping or expiry traits
    General,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElectronicsDetails {
    warranty_months: u32,
    weight: Decimal,
}

impl ElectronicsDetails {
    pub fn warranty_months(&self) -> u32 {
        self.warranty_months
    }
}

impl Shippable for ElectronicsDetails {
    fn weight(&self) -> Decimal {
        self.weight
    }

    fn calculate_shipping_cost(&self) -> Decimal {
        let cost = if self.weight > ELECTRONICS_WEIGHT_THRESHOLD {
            ELECTRONICS_BASE_SHIPPING + ELECTRONICS_HEAVY_SURCHARGE
        } else {
            ELECTRONICS_BASE_SHIPPING
        };
        round_money(cost)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FoodDetails {
    expiration_date: NaiveDate,
    weight: Decimal,
}

impl Shippable for FoodDetails {
    fn weight(&self) -> Decimal {
        self.weight
    }

    fn calculate_shipping_cost(&self) -> Decimal {
        round_money(self.weight * FOOD_RATE_PER_WEIGHT)
    }
}

impl Perishable for FoodDetails {
    fn expiration_date(&self) -> NaiveDate {
        self.expiration_date
    }
}

/// A product stocked in a warehouse.
///
/// Identity, name and category are fixed at construction. The price can
/// only be changed through [`crate::Warehouse::update_price`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    id: Uuid,
    name: String,
    category: Category,
    price: Decimal,
    kind: ProductKind,
}

impl Product {
    pub fn electronics(
        id: Uuid,
        name: impl Into<String>,
        category: Category,
        price: Decimal,
        warranty_months: i32,
        weight: Decimal,
    ) -> Result<Self, ProductError> {
        let warranty_months = u32::try_from(warranty_months).map_err(|_| ProductError::InvalidArgument {
            field: "warranty_months",
            reason: format!("warranty months cannot be negative, got {}", warranty_months),
        })?;
        ensure_amount("weight", weight)?;

        Self::new(
            id,
            name,
            category,
            price,
            ProductKind::Electronics(ElectronicsDetails { warranty_months, weight }),
        )
    }

    pub fn food(
        id: Uuid,
        name: impl Into<String>,
        category: Category,
        price: Decimal,
        expiration_date: NaiveDate,
        weight: Decimal,
    ) -> Result<Self, ProductError> {
        ensure_amount("weight", weight)?;

        Self::new(
            id,
            name,
            category,
            price,
            ProductKind::Food(FoodDetails { expiration_date, weight }),
        )
    }

    pub fn general(
        id: Uuid,
        name: impl Into<String>,
        category: Category,
        price: Decimal,
    ) -> Result<Self, ProductError> {
        Self::new(id, name, category, price, ProductKind::General)
    }

    fn new(
        id: Uuid,
        name: impl Into<String>,
        category: Category,
        price: Decimal,
        kind: ProductKind,
    ) -> Result<Self, ProductError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ProductError::InvalidArgument {
                field: "name",
                reason: "product name can't be blank".to_string(),
            });
        }
        ensure_amount("price", price)?;

        Ok(Self { id, name, category, price, kind })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn kind(&self) -> &ProductKind {
        &self.kind
    }

    /// Human readable one-line summary
    pub fn product_details(&self) -> String {
        match &self.kind {
            ProductKind::Electronics(details) => format!(
                "Electronics: {}, Warranty: {} months",
                self.name, details.warranty_months
            ),
            ProductKind::Food(details) => {
                format!("Food: {}, Expires: {}", self.name, details.expiration_date)
            }
            ProductKind::General => format!("Product: {}", self.name),
        }
    }

    pub fn as_shippable(&self) -> Option<&dyn Shippable> {
        match &self.kind {
            ProductKind::Electronics(details) => Some(details),
            ProductKind::Food(details) => Some(details),
            ProductKind::General => None,
        }
    }

    pub fn as_perishable(&self) -> Option<&dyn Perishable> {
        match &self.kind {
            ProductKind::Food(details) => Some(details),
            ProductKind::Electronics(_) | ProductKind::General => None,
        }
    }

    pub fn is_shippable(&self) -> bool {
        self.as_shippable().is_some()
    }

    pub fn is_perishable(&self) -> bool {
        self.as_perishable().is_some()
    }

    /// Shipping weight, zero for products that don't ship
    pub fn shipping_weight(&self) -> Decimal {
        self.as_shippable().map_or(Decimal::ZERO, |s| s.weight())
    }

    pub(crate) fn set_price(&mut self, price: Decimal) -> Result<(), ProductError> {
        ensure_amount("price", price)?;
        self.price = price;
        Ok(())
    }
}

fn ensure_amount(field: &'static str, value: Decimal) -> Result<(), ProductError> {
    if value < Decimal::ZERO {
        return Err(ProductError::InvalidArgument {
            field,
            reason: format!("{} cannot be negative, got {}", field, value),
        });
    }
    if value > MAX_AMOUNT {
        return Err(ProductError::InvalidArgument {
            field,
            reason: format!("{} cannot exceed {}, got {}", field, MAX_AMOUNT, value),
        });
    }
    Ok(())
}

/// Product-related errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProductError {
    #[error("Invalid {field}: {reason}")]
    InvalidArgument {
        field: &'static str,
        reason: String,
    },
}
