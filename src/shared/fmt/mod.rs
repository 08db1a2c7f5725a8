//! Display formatting for prices, percentages and large market figures.

pub mod num;

pub use num::{format_compact, format_percent, format_price, group_thousands};
