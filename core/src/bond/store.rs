// SPDX-License-Identifier: Apache-2.0

//! Ordered bond option container with insertion-time side effects.
//!
//! Grounded on `nm_setting_bond_add_option` / `nm_setting_bond_remove_option`
//! / `nm_setting_bond_get_option_default` / `_get_option_sort` /
//! `options_equal_asym` in the kernel bonding driver's connection-profile
//! code: the MIIMON/ARP_INTERVAL mutual exclusion, the AD_ACTOR_SYSTEM
//! mode-dependent default, the MODE-first sort, and the INFERRABLE
//! comparison fallbacks all reproduce that logic.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::mode::BondMode;
use super::registry::meta;
use super::validator::validate_option;

/// Controls how two bond settings are compared for equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareFlags {
    /// Plain structural equality of the stored option maps.
    Exact,
    /// Tolerates drift the running kernel state may introduce: skips
    /// `fail_over_mac`/`active_slave`, and lets `num_grat_arp` /
    /// `num_unsol_na` stand in for each other.
    Inferrable,
}

/// A bond setting's option dictionary.
///
/// Serializes as a flat string-to-string map; the internal sort cache is
/// never part of the public shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BondSetting {
    options: BTreeMap<String, String>,
    #[serde(skip)]
    sorted_cache: std::cell::RefCell<Option<Vec<String>>>,
}

impl PartialEq for BondSetting {
    fn eq(&self, other: &Self) -> bool {
        self.options == other.options
    }
}

impl Eq for BondSetting {}

impl BondSetting {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `(name, value)`, validating first. Applies the
    /// MIIMON/ARP_INTERVAL mutual-exclusion side effects on success.
    pub fn add_option(
        &mut self,
        name: &str,
        value: &str,
    ) -> Result<(), crate::error::CoreError> {
        if !validate_option(name, Some(value)) {
            return Err(crate::error::CoreError::bond(
                crate::error::ErrorKind::InvalidOption,
                format!("invalid value '{value}' for option '{name}'"),
            ));
        }
        self.options.insert(name.to_string(), value.to_string());
        self.invalidate_cache();

        if name == "miimon" && value != "0" {
            if self.options.remove("arp_interval").is_some() {
                log::debug!("bond: miimon set, dropping arp_interval");
            }
            if self.options.remove("arp_ip_target").is_some() {
                log::debug!("bond: miimon set, dropping arp_ip_target");
            }
        } else if name == "arp_interval" && value != "0" {
            for dropped in ["miimon", "downdelay", "updelay"] {
                if self.options.remove(dropped).is_some() {
                    log::debug!("bond: arp_interval set, dropping {dropped}");
                }
            }
        }
        log::debug!("bond: option '{name}' set to '{value}'");
        Ok(())
    }

    /// Removes `name` if recognised and present. Returns whether a
    /// removal actually happened.
    pub fn remove_option(
        &mut self,
        name: &str,
    ) -> Result<bool, crate::error::CoreError> {
        if !validate_option(name, None) {
            return Err(crate::error::CoreError::bond(
                crate::error::ErrorKind::InvalidOption,
                format!("'{name}' is not a recognised bond option"),
            ));
        }
        let removed = self.options.remove(name).is_some();
        if removed {
            self.invalidate_cache();
            log::debug!("bond: option '{name}' removed");
        }
        Ok(removed)
    }

    pub fn option(&self, name: &str) -> Option<&str> {
        self.options.get(name).map(String::as_str)
    }

    pub fn num_options(&self) -> usize {
        self.options.len()
    }

    /// Replaces the whole option map in one step, bypassing the
    /// per-insert side effects, so callers reconstructing a setting
    /// from an external source can reach states the incremental API
    /// cannot. Every entry is still validated.
    pub fn load_from_map(
        &mut self,
        map: BTreeMap<String, String>,
    ) -> Result<(), crate::error::CoreError> {
        for (name, value) in &map {
            if !validate_option(name, Some(value)) {
                return Err(crate::error::CoreError::bond(
                    crate::error::ErrorKind::InvalidOption,
                    format!("invalid value '{value}' for option '{name}'"),
                ));
            }
        }
        self.options = map;
        self.invalidate_cache();
        Ok(())
    }

    /// Deterministic iteration order: `mode` first, then lexicographic.
    /// Stable across calls with no intervening mutation.
    pub fn iter_sorted(&self) -> Vec<(String, String)> {
        let mut cache = self.sorted_cache.borrow_mut();
        if cache.is_none() {
            let mut names: Vec<String> = self.options.keys().cloned().collect();
            names.sort_by(|a, b| match (a.as_str(), b.as_str()) {
                ("mode", "mode") => std::cmp::Ordering::Equal,
                ("mode", _) => std::cmp::Ordering::Less,
                (_, "mode") => std::cmp::Ordering::Greater,
                _ => a.cmp(b),
            });
            *cache = Some(names);
        }
        cache
            .as_ref()
            .unwrap()
            .iter()
            .map(|n| (n.clone(), self.options.get(n).cloned().unwrap()))
            .collect()
    }

    fn invalidate_cache(&mut self) {
        *self.sorted_cache.borrow_mut() = None;
    }

    /// The effective default for `name`, accounting for `ad_actor_system`'s
    /// mode-dependent default of `00:00:00:00:00:00` when the bond is in
    /// LACP mode, and `""` otherwise.
    pub fn option_default(&self, name: &str) -> Option<&'static str> {
        let entry = meta(name)?;
        if name == "ad_actor_system" {
            let mode = self
                .option("mode")
                .and_then(BondMode::parse)
                .unwrap_or(BondMode::BalanceRr);
            return Some(if mode == BondMode::Lacp {
                "00:00:00:00:00:00"
            } else {
                ""
            });
        }
        Some(entry.default_value)
    }

    /// Structural equality parametrised by [`CompareFlags`].
    pub fn options_equal(&self, other: &Self, flags: CompareFlags) -> bool {
        match flags {
            CompareFlags::Exact => self.options == other.options,
            CompareFlags::Inferrable => {
                self.options_equal_asym(other) && other.options_equal_asym(self)
            }
        }
    }

    fn options_equal_asym(&self, other: &Self) -> bool {
        const SKIPPED: [&str; 2] = ["fail_over_mac", "active_slave"];
        for name in self.options.keys() {
            if SKIPPED.contains(&name.as_str()) {
                continue;
            }
            let ours = self.effective_value(name);
            let theirs = other.effective_value(name);
            if ours != theirs {
                return false;
            }
        }
        true
    }

    /// The value `name` should be compared with under `Inferrable`
    /// equality: the stored value, falling back to the twin field
    /// (`num_grat_arp` <-> `num_unsol_na`), falling back to the default.
    fn effective_value(&self, name: &str) -> Option<String> {
        if let Some(v) = self.option(name) {
            return Some(v.to_string());
        }
        let twin = match name {
            "num_grat_arp" => Some("num_unsol_na"),
            "num_unsol_na" => Some("num_grat_arp"),
            _ => None,
        };
        if let Some(twin) = twin {
            if let Some(v) = self.option(twin) {
                return Some(v.to_string());
            }
        }
        self.option_default(name).map(|s| s.to_string())
    }
}
