// SPDX-License-Identifier: Apache-2.0

//! Shared connection model: setting groups, structural equality, and the
//! verify dispatch.
//!
//! Grounded on the `NipartstateInterface` trait's public-entrypoint /
//! `_specific`-hook split (`nmstate/iface_trait.rs`): `Connection::verify`
//! is the public entrypoint, each setting's own verifier is the hook.

use crate::bond::{BondSetting, CompareFlags, VerifyContext, VerifyOutcome, verify as verify_bond};
use crate::error::{CoreError, ErrorKind};
use crate::wifi::security::{Ieee8021XConfig, WirelessConfig, WirelessSecurityConfig};

/// A single named setting group held by a [`Connection`].
#[derive(Debug, Clone, PartialEq)]
pub enum Setting {
    Bond(BondSetting),
    Wireless(WirelessConfig),
    WirelessSecurity(WirelessSecurityConfig),
    Ieee8021X(Ieee8021XConfig),
    /// Presence-only marker: this crate does not model the infiniband
    /// setting's fields, only whether one is attached (needed by the
    /// bond verifier's cross-setting rule).
    InfiniBand,
}

/// An ordered bag of setting groups, keyed by group name (`"bond"`,
/// `"802-11-wireless"`, `"802-11-wireless-security"`, `"802-1x"`,
/// `"infiniband"`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Connection {
    settings: Vec<(String, Setting)>,
}

impl Connection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Setting> {
        self.settings.iter().find(|(n, _)| n == name).map(|(_, s)| s)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Setting> {
        self.settings
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, s)| s)
    }

    /// Inserts or replaces the setting stored under `name`.
    pub fn set(&mut self, name: &str, setting: Setting) {
        if let Some(entry) = self.settings.iter_mut().find(|(n, _)| n == name) {
            entry.1 = setting;
        } else {
            self.settings.push((name.to_string(), setting));
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<Setting> {
        let idx = self.settings.iter().position(|(n, _)| n == name)?;
        Some(self.settings.remove(idx).1)
    }

    pub fn bond(&self) -> Option<&BondSetting> {
        match self.get("bond") {
            Some(Setting::Bond(b)) => Some(b),
            _ => None,
        }
    }

    pub fn has_infiniband(&self) -> bool {
        matches!(self.get("infiniband"), Some(Setting::InfiniBand))
    }

    /// Verifies every setting this crate knows how to verify. Settings
    /// it does not model (e.g. a caller's own `connection`/`ipv4`
    /// groups) are ignored; their verification is the caller's
    /// responsibility.
    pub fn verify(&self, required_interface_name_ok: bool) -> Result<(), CoreError> {
        if let Some(bond) = self.bond() {
            let ctx = VerifyContext {
                has_infiniband: self.has_infiniband(),
                required_interface_name_ok,
            };
            match verify_bond(bond, ctx) {
                VerifyOutcome::Ok => {}
                VerifyOutcome::Normalizable(reason) => {
                    log::warn!("bond setting needs normalising: {reason:?}");
                    return Err(CoreError::bond(
                        ErrorKind::Normalizable,
                        format!("{reason:?}"),
                    ));
                }
                VerifyOutcome::Fatal(e) => return Err(e),
            }
        }
        Ok(())
    }

    /// Structural equality of the settings both connections share,
    /// parametrised by [`CompareFlags`] for the settings that support it
    /// (currently only `bond`). Other setting kinds always compare
    /// exactly.
    pub fn equal_under(&self, other: &Self, flags: CompareFlags) -> bool {
        if self.settings.len() != other.settings.len() {
            return false;
        }
        for (name, setting) in &self.settings {
            let Some(other_setting) = other.get(name) else {
                return false;
            };
            let equal = match (setting, other_setting) {
                (Setting::Bond(a), Setting::Bond(b)) => a.options_equal(b, flags),
                (a, b) => a == b,
            };
            if !equal {
                return false;
            }
        }
        true
    }
}
