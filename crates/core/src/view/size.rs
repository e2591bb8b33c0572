//! Human-readable size parsing for the size sort.
//!
//! A heuristic, not a true semantic size: the first `number [unit]` match in
//! the string wins, the unit defaults to MB when absent, and anything
//! unparseable counts as 0 bytes. Kept bug-for-bug compatible with the
//! legacy client so existing collections sort the same way.

use once_cell::sync::Lazy;
use regex_lite::Regex;

static SIZE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+\.?\d*)\s*(GB|MB|KB|TB)?").unwrap());

const KB: f64 = 1024.0;
const MB: f64 = KB * 1024.0;
const GB: f64 = MB * 1024.0;
const TB: f64 = GB * 1024.0;

/// Parse a size string like "1.5 GB" into bytes. Returns 0 when unparseable.
pub fn parse_size_to_bytes(size: &str) -> f64 {
    let Some(caps) = SIZE_RE.captures(size) else {
        return 0.0;
    };

    let value: f64 = match caps[1].parse() {
        Ok(v) => v,
        Err(_) => return 0.0,
    };

    let unit = caps
        .get(2)
        .map(|m| m.as_str().to_ascii_uppercase())
        .unwrap_or_else(|| "MB".to_string());

    let multiplier = match unit.as_str() {
        "KB" => KB,
        "MB" => MB,
        "GB" => GB,
        "TB" => TB,
        _ => 1.0,
    };

    value * multiplier
}
