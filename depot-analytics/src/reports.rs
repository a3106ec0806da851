use depot_catalog::Product;
use depot_core::AnalyticsConfig;
use rust_decimal::Decimal;
use serde::Serialize;

/// A batch of shippable products sent together
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShippingGroup {
    products: Vec<Product>,
    total_weight: Decimal,
    total_shipping_cost: Decimal,
}

impl ShippingGroup {
    /// Totals are computed once here; products without shipping traits add nothing.
    pub fn new(products: Vec<Product>) -> Self {
        let total_weight = products.iter().map(Product::shipping_weight).sum();
        let total_shipping_cost = products
            .iter()
            .filter_map(|p| p.as_shippable())
            .map(|s| s.calculate_shipping_cost())
            .sum();

        Self {
            products,
            total_weight,
            total_shipping_cost,
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn total_weight(&self) -> Decimal {
        self.total_weight
    }

    pub fn total_shipping_cost(&self) -> Decimal {
        self.total_shipping_cost
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// Outcome of the inventory constraint checks
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventoryValidation {
    high_value_percentage: f64,
    category_diversity: usize,
    high_value_warning: bool,
    minimum_diversity: bool,
}

impl InventoryValidation {
    /// Evaluate with the default thresholds (warning above 70%, at least 2 categories)
    pub fn new(high_value_percentage: f64, category_diversity: usize) -> Self {
        Self::evaluate(high_value_percentage, category_diversity, &AnalyticsConfig::default())
    }

    pub fn evaluate(high_value_percentage: f64, category_diversity: usize, config: &AnalyticsConfig) -> Self {
        Self {
            high_value_percentage,
            category_diversity,
            high_value_warning: high_value_percentage > config.high_value_warning_percentage,
            minimum_diversity: category_diversity >= config.minimum_category_diversity,
        }
    }

    pub fn high_value_percentage(&self) -> f64 {
        self.high_value_percentage
    }

    pub fn category_diversity(&self) -> usize {
        self.category_diversity
    }

    pub fn is_high_value_warning(&self) -> bool {
        self.high_value_warning
    }

    pub fn has_minimum_diversity(&self) -> bool {
        self.minimum_diversity
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventoryStatistics {
    pub total_products: usize,
    pub total_value: Decimal,
    pub average_price: Decimal,
    pub expired_count: usize,
    pub category_count: usize,
    pub most_expensive: Option<Product>,
    pub cheapest: Option<Product>,
}

impl InventoryStatistics {
    pub fn empty() -> Self {
        Self {
            total_products: 0,
            total_value: Decimal::ZERO,
            average_price: Decimal::ZERO,
            expired_count: 0,
            category_count: 0,
            most_expensive: None,
            cheapest: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use depot_catalog::Category;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    #[test]
    fn test_shipping_group_totals() {
        let category = Category::of("mixed").unwrap();
        let expires = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
        let group = ShippingGroup::new(vec![
            Product::electronics(Uuid::new_v4(), "Speaker", category.clone(), dec!(120), 12, dec!(6)).unwrap(),
            Product::food(Uuid::new_v4(), "Rice", category.clone(), dec!(4), expires, dec!(2.5)).unwrap(),
        ]);

        assert_eq!(group.len(), 2);
        assert_eq!(group.total_weight(), dec!(8.5));
        // 128.00 + 125.00
        assert_eq!(group.total_shipping_cost(), dec!(253.00));
    }

    #[test]
    fn test_validation_flags_use_strict_and_inclusive_bounds() {
        let at_limit = InventoryValidation::new(70.0, 2);
        assert!(!at_limit.is_high_value_warning());
        assert!(at_limit.has_minimum_diversity());

        let over = InventoryValidation::new(70.01, 1);
        assert!(over.is_high_value_warning());
        assert!(!over.has_minimum_diversity());
    }

    #[test]
    fn test_validation_honours_config() {
        let config = AnalyticsConfig {
            high_value_warning_percentage: 50.0,
            minimum_category_diversity: 3,
            ..AnalyticsConfig::default()
        };
        let validation = InventoryValidation::evaluate(60.0, 2, &config);

        assert!(validation.is_high_value_warning());
        assert!(!validation.has_minimum_diversity());
    }
}
