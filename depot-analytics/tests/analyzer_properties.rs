use depot_analytics::{pack_shipping_groups, WarehouseAnalyzer};
use depot_catalog::{Category, Product, Warehouse};
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;

/// Prices with up to two decimals in 0.00..=2000.00
fn arb_price() -> impl Strategy<Value = Decimal> {
    (0i64..=200_000).prop_map(|cents| Decimal::new(cents, 2))
}

/// Weights with one decimal in 0.0..=30.0
fn arb_weight() -> impl Strategy<Value = Decimal> {
    (0i64..=300).prop_map(|tenths| Decimal::new(tenths, 1))
}

fn arb_parcels() -> impl Strategy<Value = Vec<Product>> {
    prop::collection::vec((arb_price(), arb_weight()), 0..25).prop_map(|items| {
        let category = Category::of("parcels").unwrap();
        items
            .into_iter()
            .enumerate()
            .map(|(i, (price, weight))| {
                Product::electronics(Uuid::new_v4(), format!("parcel-{}", i), category.clone(), price, 12, weight).unwrap()
            })
            .collect()
    })
}

fn analyzer_with(products: &[Product]) -> WarehouseAnalyzer {
    let warehouse = Arc::new(Warehouse::new("props"));
    for product in products {
        warehouse.add(product.clone()).unwrap();
    }
    WarehouseAnalyzer::new(warehouse)
}

proptest! {
    /// Range query agrees with a brute-force filter
    #[test]
    fn test_price_range_matches_brute_force(
        products in arb_parcels(),
        a in arb_price(),
        b in arb_price()
    ) {
        let (min, max) = if a <= b { (a, b) } else { (b, a) };
        let analyzer = analyzer_with(&products);

        let found: Vec<Uuid> = analyzer.find_products_in_price_range(min, max).iter().map(Product::id).collect();
        let expected: Vec<Uuid> = products
            .iter()
            .filter(|p| p.price() >= min && p.price() <= max)
            .map(Product::id)
            .collect();

        prop_assert_eq!(found, expected);
    }

    /// Every group respects the limit and every parcel lands in exactly one group
    #[test]
    fn test_shipping_groups_partition_within_limit(
        products in arb_parcels(),
        max_weight in (300i64..=1000).prop_map(|tenths| Decimal::new(tenths, 1))
    ) {
        let groups = pack_shipping_groups(products.clone(), max_weight);

        let mut seen = HashSet::new();
        for group in &groups {
            prop_assert!(group.total_weight() <= max_weight);
            prop_assert!(!group.is_empty());
            for product in group.products() {
                prop_assert!(seen.insert(product.id()), "product packed twice");
            }
        }
        prop_assert_eq!(seen.len(), products.len());
    }

    /// Shrinking the limit never reduces the number of groups.
    ///
    /// First-fit decreasing is not monotone for arbitrary weight mixes, so
    /// this checks uniform weights where the group count is ceil(n / per_group).
    #[test]
    fn test_group_count_non_decreasing_as_limit_shrinks(
        count in 0usize..40,
        weight in arb_weight(),
        larger in (300i64..=1000).prop_map(|tenths| Decimal::new(tenths, 1)),
        shrink in (0i64..=700).prop_map(|tenths| Decimal::new(tenths, 1))
    ) {
        let smaller = (larger - shrink).max(Decimal::new(300, 1));
        let category = Category::of("parcels").unwrap();
        let products: Vec<Product> = (0..count)
            .map(|i| Product::electronics(Uuid::new_v4(), format!("parcel-{}", i), category.clone(), Decimal::ONE, 12, weight).unwrap())
            .collect();

        let wide = pack_shipping_groups(products.clone(), larger).len();
        let narrow = pack_shipping_groups(products, smaller).len();

        prop_assert!(narrow >= wide);
    }

    /// Shipping cost is non-negative with exactly two decimals
    #[test]
    fn test_shipping_cost_two_decimals(products in arb_parcels()) {
        for product in &products {
            let cost = product.as_shippable().unwrap().calculate_shipping_cost();
            prop_assert!(cost >= Decimal::ZERO);
            prop_assert_eq!(cost.scale(), 2);
            prop_assert_eq!(cost, product.as_shippable().unwrap().calculate_shipping_cost());
        }
    }
}
