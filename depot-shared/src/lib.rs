pub mod clock;
pub mod money;

pub use clock::{Clock, FixedClock, SystemClock};
pub use money::{round_money, MONEY_SCALE};
