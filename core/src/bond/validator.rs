// SPDX-License-Identifier: Apache-2.0

//! Validates a single bond option (name, value) pair against the
//! registry's grammar for that option.
//!
//! Grounded on the kernel bonding driver's `validate_int` / `validate_list`
//! / `validate_ip` / `nm_utils_hwaddr_valid` / `nm_utils_ifname_valid_kernel`
//! helpers and their dispatch in `nm_setting_bond_validate_option`.

use super::registry::{OptionKind, meta};

/// Returns whether `(name, value)` is a legal bond option pair. A
/// `None` value validates the name alone (used when only checking that
/// an option is recognised, e.g. before `remove_option`).
pub fn validate_option(name: &str, value: Option<&str>) -> bool {
    let Some(entry) = meta(name) else {
        return false;
    };
    let Some(value) = value else {
        return true;
    };
    match entry.kind {
        OptionKind::Int => validate_int(value, entry.min, entry.max),
        OptionKind::List => validate_list(value, entry.enum_values),
        OptionKind::IntOrList => {
            validate_int(value, entry.min, entry.max)
                || validate_list(value, entry.enum_values)
        }
        OptionKind::IpList => validate_ip_list(value),
        OptionKind::Mac => validate_mac(value),
        OptionKind::Ifname => validate_ifname(value),
    }
}

fn validate_int(value: &str, min: i64, max: i64) -> bool {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    match value.parse::<i64>() {
        Ok(n) => n >= min && n <= max,
        Err(_) => false,
    }
}

fn validate_list(value: &str, enum_values: &[&str]) -> bool {
    enum_values.contains(&value)
}

fn validate_ip_list(value: &str) -> bool {
    if value.is_empty() {
        return true;
    }
    value.split(',').all(|part| {
        !part.is_empty() && part.parse::<std::net::Ipv4Addr>().is_ok()
    })
}

/// Canonical colon-separated hex MAC address, case-insensitive.
pub fn validate_mac(value: &str) -> bool {
    let octets: Vec<&str> = value.split(':').collect();
    octets.len() == 6
        && octets
            .iter()
            .all(|o| o.len() == 2 && o.bytes().all(|b| b.is_ascii_hexdigit()))
}

/// Kernel interface name rules: non-empty, at most 15 bytes, no `/`, no
/// whitespace, no `:`, and not `.` or `..`.
pub fn validate_ifname(value: &str) -> bool {
    if value.is_empty() || value.len() > 15 {
        return false;
    }
    if value == "." || value == ".." {
        return false;
    }
    !value
        .bytes()
        .any(|b| b == b'/' || b == b':' || b.is_ascii_whitespace())
}
