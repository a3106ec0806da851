use rust_decimal::{Decimal, RoundingStrategy};

/// Fractional digits kept on every rounded monetary amount.
pub const MONEY_SCALE: u32 = 2;

/// Round to two fractional digits, half away from zero.
///
/// The scale is always set to 2 so `5` comes back as `5.00`.
pub fn round_money(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(MONEY_SCALE);
    rounded
}
