// File: memberpoints-core/src/sheets/cleaning.rs

use std::str::FromStr;
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use rust_decimal::Decimal;
use tracing::{debug, warn};

/// Naive layouts tried after RFC 3339, in order.
const NAIVE_FORMATS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

pub fn safe_strip(value: &str) -> String {
    value.trim().to_string()
}

/// Parses a currency-like cell ("NT$1,200.50", " 300 ") into a decimal.
///
/// Everything but digits, '.' and '-' is dropped first. Empty input, more than
/// one decimal point, or anything else unparsable yields zero.
pub fn safe_decimal(value: &str) -> Decimal {
    let value = value.trim();
    if value.is_empty() {
        debug!("safe_decimal: empty value, using 0");
        return Decimal::ZERO;
    }

    let cleaned: String = value
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    if cleaned.is_empty() {
        debug!("safe_decimal: '{}' has no digits, using 0", value);
        return Decimal::ZERO;
    }
    if cleaned.matches('.').count() > 1 {
        warn!("safe_decimal: '{}' has more than one decimal point, using 0", cleaned);
        return Decimal::ZERO;
    }

    match Decimal::from_str(&cleaned) {
        Ok(d) => d,
        Err(e) => {
            warn!("safe_decimal: cannot parse '{}' ({}), using 0", value, e);
            Decimal::ZERO
        }
    }
}

/// Parses a free-form sales timestamp. Naive values are read in `tz`.
/// Returns `None` when nothing matches; the caller picks the fallback.
pub fn parse_sales_time(raw: &str, tz: Tz) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NAIVE_FORMATS.iter().find_map(|fmt| {
        let naive = NaiveDateTime::parse_from_str(raw, fmt).ok()?;
        tz.from_local_datetime(&naive)
            .earliest()
            .map(|local| local.with_timezone(&Utc))
    })
}
