use depot_catalog::Product;
use rust_decimal::Decimal;

use crate::reports::ShippingGroup;

/// Greedy first-fit decreasing packing of shippable products.
///
/// Products are taken heaviest first (ties keep their input order) and
/// dropped into the first group that still has room for them; a new group
/// is opened only when none fits. A product heavier than `max_weight`
/// always ends up alone in its own group. Products without shipping traits
/// are skipped.
pub fn pack_shipping_groups(products: Vec<Product>, max_weight: Decimal) -> Vec<ShippingGroup> {
    let mut items: Vec<Product> = products.into_iter().filter(Product::is_shippable).collect();
    items.sort_by(|a, b| b.shipping_weight().cmp(&a.shipping_weight()));

    let mut bins: Vec<(Decimal, Vec<Product>)> = Vec::new();
    for item in items {
        let weight = item.shipping_weight();
        match bins.iter_mut().find(|(load, _)| *load + weight <= max_weight) {
            Some((load, members)) => {
                *load += weight;
                members.push(item);
            }
            None => bins.push((weight, vec![item])),
        }
    }

    bins.into_iter()
        .map(|(_, members)| ShippingGroup::new(members))
        .collect()
}
