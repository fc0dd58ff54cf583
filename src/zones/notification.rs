//! Notification payload construction.

use zonewatch_types::{NotificationPayload, ZoneSpec};

use super::Classification;

/// Build the payload published for a classification.
///
/// A matched zone reports its own state and methods, with a message derived
/// from its bounds when none is configured. No match reports `normal`.
pub fn build_payload(classification: Classification, zones: &[ZoneSpec]) -> NotificationPayload {
    match classification.zone_index().and_then(|index| zones.get(index)) {
        Some(zone) => NotificationPayload {
            state: zone.state,
            message: zone
                .custom_message()
                .map(str::to_string)
                .unwrap_or_else(|| range_message(zone)),
            method: zone.method.clone(),
        },
        None => NotificationPayload::normal(),
    }
}

/// `"<lower> < value < <upper>"` using the zone's configured bounds as-is.
fn range_message(zone: &ZoneSpec) -> String {
    format!(
        "{} < value < {}",
        format_bound(zone.lower),
        format_bound(zone.upper)
    )
}

fn format_bound(bound: Option<f64>) -> String {
    bound.map_or_else(|| "undefined".to_string(), format_number)
}

/// Render a number the way `Number.prototype.toString` does: plain
/// decimals for decimal exponents in `-6..=20`, exponent form outside them.
fn format_number(v: f64) -> String {
    if v.is_nan() {
        return "NaN".to_string();
    }
    if v == 0.0 {
        return "0".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let sign = if v < 0.0 { "-" } else { "" };
    // Shortest round-trip digits, e.g. "2.05e1"
    let scientific = format!("{:e}", v.abs());
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((&scientific, "0"));
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let k = digits.len() as i32;
    let n = exponent.parse::<i32>().unwrap_or(0) + 1;

    let body = if k <= n && n <= 21 {
        format!("{}{}", digits, "0".repeat((n - k) as usize))
    } else if 0 < n && n <= 21 {
        let (int, frac) = digits.split_at(n as usize);
        format!("{int}.{frac}")
    } else if -6 < n && n <= 0 {
        format!("0.{}{}", "0".repeat((-n) as usize), digits)
    } else {
        let exp_sign = if n > 0 { '+' } else { '-' };
        let (head, tail) = digits.split_at(1);
        if tail.is_empty() {
            format!("{head}e{exp_sign}{}", (n - 1).abs())
        } else {
            format!("{head}.{tail}e{exp_sign}{}", (n - 1).abs())
        }
    };
    format!("{sign}{body}")
}
