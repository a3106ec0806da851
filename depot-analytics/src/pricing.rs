use chrono::NaiveDate;
use depot_catalog::Product;
use depot_shared::round_money;
use rust_decimal::Decimal;

/// Share of the price charged for a perishable expiring in `days_until_expiration` days.
///
/// Already expired and far-off products keep the full price.
pub fn expiry_multiplier(days_until_expiration: i64) -> Decimal {
    match days_until_expiration {
        0 => Decimal::new(50, 2),
        1 => Decimal::new(70, 2),
        2..=3 => Decimal::new(85, 2),
        _ => Decimal::ONE,
    }
}

/// Price after the expiry discount.
///
/// Perishables are rounded to two decimals even at full price; other
/// products return their price untouched.
pub fn discounted_price(product: &Product, today: NaiveDate) -> Decimal {
    match product.as_perishable() {
        Some(perishable) => {
            let days = (perishable.expiration_date() - today).num_days();
            round_money(product.price() * expiry_multiplier(days))
        }
        None => product.price(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use depot_catalog::Category;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    fn yogurt(price: Decimal, days_from_today: i64) -> Product {
        let expires = today() + chrono::Duration::days(days_from_today);
        Product::food(Uuid::new_v4(), "Yogurt", Category::of("dairy").unwrap(), price, expires, dec!(0.2)).unwrap()
    }

    #[test]
    fn test_multiplier_tiers() {
        assert_eq!(expiry_multiplier(-1), Decimal::ONE);
        assert_eq!(expiry_multiplier(0), dec!(0.50));
        assert_eq!(expiry_multiplier(1), dec!(0.70));
        assert_eq!(expiry_multiplier(2), dec!(0.85));
        assert_eq!(expiry_multiplier(3), dec!(0.85));
        assert_eq!(expiry_multiplier(4), Decimal::ONE);
    }

    #[test]
    fn test_discounted_prices() {
        assert_eq!(discounted_price(&yogurt(dec!(100.00), 0), today()).to_string(), "50.00");
        assert_eq!(discounted_price(&yogurt(dec!(9.99), 1), today()).to_string(), "6.99");
        assert_eq!(discounted_price(&yogurt(dec!(10), 3), today()).to_string(), "8.50");
        assert_eq!(discounted_price(&yogurt(dec!(10), -1), today()).to_string(), "10.00");
        assert_eq!(discounted_price(&yogurt(dec!(10), 30), today()).to_string(), "10.00");
    }

    #[test]
    fn test_non_perishable_keeps_exact_price() {
        let cable = Product::electronics(Uuid::new_v4(), "Cable", Category::of("electronics").unwrap(), dec!(9.999), 6, dec!(0.1)).unwrap();
        assert_eq!(discounted_price(&cable, today()).to_string(), "9.999");
    }
}
