//! Byte quantity parsing and formatting.
//!
//! Quotas store memory limits in megabytes; users type them as `512M`,
//! `2G`, `1GB` and so on.

use regex::Regex;
use std::sync::OnceLock;

use crate::error::{CfError, Result};

const MEGABYTE: i64 = 1;
const GIGABYTE: i64 = 1024 * MEGABYTE;
const TERABYTE: i64 = 1024 * GIGABYTE;

/// Explanation appended to every rejected byte quantity.
pub const BYTE_QUANTITY_HINT: &str =
    "Byte quantity must be an integer with a unit of measurement like M, MB, G, or GB";

fn byte_quantity_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^\s*(\d+)\s*(M|MB|G|GB|T|TB)\s*$").expect("byte quantity regex is valid")
    })
}

/// Parse a byte quantity such as `50G` into megabytes.
///
/// # Example
///
/// ```
/// use cf::formatters::to_megabytes;
///
/// assert_eq!(to_megabytes("50G").unwrap(), 51200);
/// assert_eq!(to_megabytes("512mb").unwrap(), 512);
/// assert!(to_megabytes("12").is_err());
/// ```
pub fn to_megabytes(value: &str) -> Result<i64> {
    let invalid = || CfError::InvalidArgument {
        message: BYTE_QUANTITY_HINT.to_string(),
    };

    let caps = byte_quantity_regex().captures(value).ok_or_else(invalid)?;
    let amount: i64 = caps[1].parse().map_err(|_| invalid())?;
    let unit = match caps[2].to_ascii_uppercase().chars().next() {
        Some('T') => TERABYTE,
        Some('G') => GIGABYTE,
        _ => MEGABYTE,
    };

    amount.checked_mul(unit).ok_or_else(invalid)
}

/// Parse a memory flag value, naming the flag's role in the error.
///
/// `allow_unlimited` accepts `-1`, the Cloud Controller's "no limit".
pub fn parse_memory_limit(kind: &str, value: &str, allow_unlimited: bool) -> Result<i64> {
    if allow_unlimited && value.trim() == "-1" {
        return Ok(-1);
    }

    to_megabytes(value).map_err(|_| CfError::InvalidArgument {
        message: format!("Invalid {}: {}\n{}", kind, value, BYTE_QUANTITY_HINT),
    })
}

/// Render a megabyte count the way the Cloud Controller users expect.
///
/// # Example
///
/// ```
/// use cf::formatters::byte_size;
///
/// assert_eq!(byte_size(51200), "50G");
/// assert_eq!(byte_size(1536), "1.5G");
/// assert_eq!(byte_size(512), "512M");
/// assert_eq!(byte_size(0), "0");
/// ```
pub fn byte_size(megabytes: i64) -> String {
    let (unit, suffix) = if megabytes >= TERABYTE {
        (TERABYTE, "T")
    } else if megabytes >= GIGABYTE {
        (GIGABYTE, "G")
    } else if megabytes >= MEGABYTE {
        (MEGABYTE, "M")
    } else {
        return "0".to_string();
    };

    let value = format!("{:.1}", megabytes as f64 / unit as f64);
    let value = value.strip_suffix(".0").unwrap_or(&value);
    format!("{}{}", value, suffix)
}

/// Render a limit where `-1` means unlimited.
pub fn limit_or_unlimited(limit: i64) -> String {
    if limit == -1 {
        "unlimited".to_string()
    } else {
        limit.to_string()
    }
}

/// Render a memory limit where `-1` means unlimited.
pub fn memory_or_unlimited(megabytes: i64) -> String {
    if megabytes == -1 {
        "unlimited".to_string()
    } else {
        byte_size(megabytes)
    }
}
