use chrono::{Days, NaiveDate};
use depot_catalog::{Category, Product, Warehouse};
use depot_core::AnalyticsConfig;
use depot_shared::{round_money, Clock, SystemClock};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;
use uuid::Uuid;

use crate::packing::pack_shipping_groups;
use crate::pricing::discounted_price;
use crate::reports::{InventoryStatistics, InventoryValidation, ShippingGroup};

/// Read-only queries over a warehouse.
///
/// Every query copies the warehouse once on entry and works on that copy,
/// so concurrent mutations never show up halfway through a calculation.
/// Queries never fail: no data means empty, zero or `None` results.
pub struct WarehouseAnalyzer {
    warehouse: Arc<Warehouse>,
    clock: Arc<dyn Clock>,
    config: AnalyticsConfig,
}

impl WarehouseAnalyzer {
    pub fn new(warehouse: Arc<Warehouse>) -> Self {
        Self::with_clock(warehouse, Arc::new(SystemClock), AnalyticsConfig::default())
    }

    pub fn with_clock(warehouse: Arc<Warehouse>, clock: Arc<dyn Clock>, config: AnalyticsConfig) -> Self {
        Self { warehouse, clock, config }
    }

    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    fn snapshot(&self) -> Vec<Product> {
        self.warehouse.all_products()
    }

    /// Products with `min <= price <= max`
    pub fn find_products_in_price_range(&self, min: Decimal, max: Decimal) -> Vec<Product> {
        self.snapshot()
            .into_iter()
            .filter(|p| p.price() >= min && p.price() <= max)
            .collect()
    }

    /// Perishables expiring between today and `today + days`, both inclusive.
    ///
    /// A negative `days` gives an empty window.
    pub fn find_products_expiring_within_days(&self, days: i64) -> Vec<Product> {
        let today = self.clock.today();
        let Ok(days) = u64::try_from(days) else {
            return Vec::new();
        };
        let end = today.checked_add_days(Days::new(days)).unwrap_or(NaiveDate::MAX);

        self.snapshot()
            .into_iter()
            .filter(|p| {
                p.as_perishable()
                    .map(|per| per.expiration_date())
                    .is_some_and(|date| date >= today && date <= end)
            })
            .collect()
    }

    /// Case-insensitive substring match on the name; an empty term matches everything
    pub fn search_products_by_name(&self, term: &str) -> Vec<Product> {
        let term = term.to_lowercase();
        self.snapshot()
            .into_iter()
            .filter(|p| p.name().to_lowercase().contains(&term))
            .collect()
    }

    /// Products priced strictly above `threshold`
    pub fn find_products_above_price(&self, threshold: Decimal) -> Vec<Product> {
        self.snapshot()
            .into_iter()
            .filter(|p| p.price() > threshold)
            .collect()
    }

    /// Average price per category, weighted by shipping weight.
    ///
    /// Only shippable products with a positive weight contribute to the
    /// weighted mean. A category where none do falls back to the plain mean.
    pub fn calculate_weighted_average_price_by_category(&self) -> BTreeMap<Category, Decimal> {
        let mut by_category: BTreeMap<Category, Vec<Product>> = BTreeMap::new();
        for product in self.snapshot() {
            by_category
                .entry(product.category().clone())
                .or_default()
                .push(product);
        }

        by_category
            .into_iter()
            .map(|(category, items)| {
                let (weighted_sum, weight_sum) = items
                    .iter()
                    .map(|p| (p.price(), p.shipping_weight()))
                    .filter(|(_, weight)| *weight > Decimal::ZERO)
                    .fold((Decimal::ZERO, Decimal::ZERO), |(sum, total), (price, weight)| {
                        (sum + price * weight, total + weight)
                    });

                let average = if weight_sum > Decimal::ZERO {
                    weighted_sum / weight_sum
                } else {
                    let sum: Decimal = items.iter().map(Product::price).sum();
                    sum / Decimal::from(items.len())
                };
                (category, round_money(average))
            })
            .collect()
    }

    /// Price outliers by the interquartile range rule.
    ///
    /// With prices sorted ascending, Q1 is the price at index `n / 4` and Q3
    /// the price at `3n / 4`. Products priced strictly below
    /// `Q1 - factor * IQR` or strictly above `Q3 + factor * IQR` are returned
    /// in ascending price order.
    pub fn find_price_outliers(&self, factor: Decimal) -> Vec<Product> {
        let mut sorted = self.snapshot();
        if sorted.is_empty() {
            return Vec::new();
        }
        sorted.sort_by(|a, b| a.price().cmp(&b.price()));

        let n = sorted.len();
        let q1 = sorted[n / 4].price();
        let q3 = sorted[(3 * n) / 4].price();
        let iqr = q3 - q1;
        // The factor is caller supplied and unbounded
        let spread = iqr.saturating_mul(factor);
        let lower = q1.saturating_sub(spread);
        let upper = q3.saturating_add(spread);

        let outliers: Vec<Product> = sorted
            .into_iter()
            .filter(|p| p.price() < lower || p.price() > upper)
            .collect();
        tracing::debug!(%q1, %q3, %lower, %upper, "Found {} price outliers out of {}", outliers.len(), n);
        outliers
    }

    /// [`Self::find_price_outliers`] with the configured default factor
    pub fn find_default_price_outliers(&self) -> Vec<Product> {
        self.find_price_outliers(self.config.default_outlier_factor)
    }

    /// Pack shippable products into groups of at most `max_weight_per_group`.
    ///
    /// See [`pack_shipping_groups`] for the exact heuristic.
    pub fn optimize_shipping_groups(&self, max_weight_per_group: Decimal) -> Vec<ShippingGroup> {
        let groups = pack_shipping_groups(self.warehouse.shippable_products(), max_weight_per_group);
        tracing::debug!(max_weight = %max_weight_per_group, "Packed products into {} shipping groups", groups.len());
        groups
    }

    /// Expiry-discounted price of every product, keyed by product id
    pub fn calculate_expiration_based_discounts(&self) -> HashMap<Uuid, Decimal> {
        let today = self.clock.today();
        self.snapshot()
            .iter()
            .map(|p| (p.id(), discounted_price(p, today)))
            .collect()
    }

    pub fn validate_inventory_constraints(&self) -> InventoryValidation {
        let items = self.snapshot();
        if items.is_empty() {
            return InventoryValidation::evaluate(0.0, 0, &self.config);
        }

        let high_value = items
            .iter()
            .filter(|p| p.price() >= self.config.high_value_threshold)
            .count();
        let percentage = (high_value as f64 * 100.0) / items.len() as f64;
        let diversity = distinct_categories(&items);

        let validation = InventoryValidation::evaluate(percentage, diversity, &self.config);
        if validation.is_high_value_warning() {
            tracing::warn!(
                warehouse = %self.warehouse.name(),
                "High value items make up {:.1}% of inventory",
                percentage
            );
        }
        validation
    }

    pub fn get_inventory_statistics(&self) -> InventoryStatistics {
        let items = self.snapshot();
        if items.is_empty() {
            return InventoryStatistics::empty();
        }

        let today = self.clock.today();
        let total_value: Decimal = items.iter().map(Product::price).sum();
        let average_price = round_money(total_value / Decimal::from(items.len()));
        let expired_count = items
            .iter()
            .filter(|p| p.as_perishable().is_some_and(|per| per.is_expired(today)))
            .count();

        // First product wins ties, so compare strictly
        let mut most_expensive = &items[0];
        let mut cheapest = &items[0];
        for product in &items[1..] {
            if product.price() > most_expensive.price() {
                most_expensive = product;
            }
            if product.price() < cheapest.price() {
                cheapest = product;
            }
        }

        InventoryStatistics {
            total_products: items.len(),
            total_value,
            average_price,
            expired_count,
            category_count: distinct_categories(&items),
            most_expensive: Some(most_expensive.clone()),
            cheapest: Some(cheapest.clone()),
        }
    }
}

fn distinct_categories(items: &[Product]) -> usize {
    items.iter().map(Product::category).collect::<HashSet<_>>().len()
}
