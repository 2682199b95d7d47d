mod day;
mod models;
mod symbol;

pub use day::TradingDay;
pub use models::{PriceBar, PriceSeries};
pub use symbol::Symbol;
