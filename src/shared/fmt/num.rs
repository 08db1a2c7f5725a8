//! Number formatting utilities for human-readable display.
//!
//! All inputs are `f64` as delivered by the market data API. Prices get a
//! dollar sign and magnitude-aware precision, percentages get an explicit
//! sign, and market caps/volumes are abbreviated with K/M/B/T suffixes.

const THOUSAND: f64 = 1_000.0;
const MILLION: f64 = 1_000_000.0;
const BILLION: f64 = 1_000_000_000.0;
const TRILLION: f64 = 1_000_000_000_000.0;

/// Inserts comma separators into the integer part of an already formatted number.
pub fn group_thousands(formatted: &str) -> String {
    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match fraction {
        Some(f) => format!("{}{}.{}", sign, grouped, f),
        None => format!("{}{}", sign, grouped),
    }
}

/// Decimal places for a price: cents above $1, more significant digits below.
fn price_decimals(value: f64) -> usize {
    let abs_value = value.abs();
    if abs_value >= 1.0 || abs_value == 0.0 {
        return 2;
    }
    let exponent = abs_value.log10().floor().abs() as usize;
    (exponent + 3).min(8)
}

/// Formats a price as `$1,234.56`, `$0.05123`, or `-$12.00`.
pub fn format_price(value: f64) -> String {
    let decimals = price_decimals(value);
    let body = group_thousands(&format!("{:.1$}", value.abs(), decimals));
    if value < 0.0 {
        format!("-${}", body)
    } else {
        format!("${}", body)
    }
}

/// Formats a percent change as `+2.35%` / `-0.50%`; zero carries no sign.
pub fn format_percent(value: f64) -> String {
    let rounded = format!("{:.2}", value.abs());
    if rounded == "0.00" {
        return "0.00%".to_string();
    }
    let sign = if value > 0.0 { "+" } else { "-" };
    format!("{}{}%", sign, rounded)
}

/// Abbreviates a large figure (market cap, volume) with K/M/B/T suffixes.
pub fn format_compact(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let abs_value = value.abs();

    let (scaled, suffix) = if abs_value >= TRILLION {
        (abs_value / TRILLION, "T")
    } else if abs_value >= BILLION {
        (abs_value / BILLION, "B")
    } else if abs_value >= MILLION {
        (abs_value / MILLION, "M")
    } else if abs_value >= THOUSAND {
        (abs_value / THOUSAND, "K")
    } else {
        (abs_value, "")
    };

    format!("{}{:.2}{}", sign, scaled, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("0"), "0");
        assert_eq!(group_thousands("123"), "123");
        assert_eq!(group_thousands("1000"), "1,000");
        assert_eq!(group_thousands("123456"), "123,456");
        assert_eq!(group_thousands("1234567.89"), "1,234,567.89");
        assert_eq!(group_thousands("-1234.5"), "-1,234.5");
    }

    #[test]
    fn test_format_price_above_one_dollar() {
        assert_eq!(format_price(64_231.5), "$64,231.50");
        assert_eq!(format_price(1.0), "$1.00");
        assert_eq!(format_price(-1_234.5), "-$1,234.50");
    }

    #[test]
    fn test_format_price_below_one_dollar() {
        assert_eq!(format_price(0.05123), "$0.05123");
        assert_eq!(format_price(0.5), "$0.5000");
        assert_eq!(format_price(0.0), "$0.00");
    }

    #[test]
    fn test_format_price_caps_precision() {
        // 1e-9 would want 12 places; capped at 8.
        assert_eq!(format_price(0.000000001), "$0.00000000");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(2.3456), "+2.35%");
        assert_eq!(format_percent(-0.5), "-0.50%");
        assert_eq!(format_percent(0.0), "0.00%");
        assert_eq!(format_percent(-0.001), "0.00%");
    }

    #[test]
    fn test_format_compact() {
        assert_eq!(format_compact(999.0), "999.00");
        assert_eq!(format_compact(1_500.0), "1.50K");
        assert_eq!(format_compact(12_300_000.0), "12.30M");
        assert_eq!(format_compact(456_700_000_000.0), "456.70B");
        assert_eq!(format_compact(1_500_000_000_000.0), "1.50T");
        assert_eq!(format_compact(-1_500_000.0), "-1.50M");
    }
}
