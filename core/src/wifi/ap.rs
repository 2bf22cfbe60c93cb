// SPDX-License-Identifier: Apache-2.0

//! Structured representation of an access point's advertised security.
//!
//! Grounded on the WPA/RSN information-element flag constants exercised
//! throughout `test-wifi-ap-utils.c` (`NM_802_11_AP_SEC_*`): the bitset
//! shape and derived predicates below reproduce that flag model.

use serde::{Deserialize, Serialize};

/// Cipher/key-management bits carried by a WPA or RSN information
/// element. The same bit layout is used for both `wpa_flags` and
/// `rsn_flags`; which element they came from is tracked separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SecurityFlags(u16);

impl SecurityFlags {
    pub const PAIR_WEP40: SecurityFlags = SecurityFlags(1 << 0);
    pub const PAIR_WEP104: SecurityFlags = SecurityFlags(1 << 1);
    pub const PAIR_TKIP: SecurityFlags = SecurityFlags(1 << 2);
    pub const PAIR_CCMP: SecurityFlags = SecurityFlags(1 << 3);
    pub const GROUP_WEP40: SecurityFlags = SecurityFlags(1 << 4);
    pub const GROUP_WEP104: SecurityFlags = SecurityFlags(1 << 5);
    pub const GROUP_TKIP: SecurityFlags = SecurityFlags(1 << 6);
    pub const GROUP_CCMP: SecurityFlags = SecurityFlags(1 << 7);
    pub const KEY_MGMT_PSK: SecurityFlags = SecurityFlags(1 << 8);
    pub const KEY_MGMT_802_1X: SecurityFlags = SecurityFlags(1 << 9);

    pub const fn empty() -> Self {
        SecurityFlags(0)
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn contains(&self, other: SecurityFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

impl std::ops::BitOr for SecurityFlags {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        SecurityFlags(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for SecurityFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApMode {
    Infrastructure,
    Adhoc,
}

/// Immutable description of an access point's beacon, as far as the
/// connection completer needs it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApCapabilities {
    pub ssid: Vec<u8>,
    pub bssid: Option<[u8; 6]>,
    pub mode: ApMode,
    pub privacy: bool,
    pub wpa_flags: SecurityFlags,
    pub rsn_flags: SecurityFlags,
}

impl ApCapabilities {
    pub fn new(ssid: Vec<u8>, mode: ApMode, privacy: bool) -> Self {
        Self {
            ssid,
            bssid: None,
            mode,
            privacy,
            wpa_flags: SecurityFlags::empty(),
            rsn_flags: SecurityFlags::empty(),
        }
    }

    pub fn with_bssid(mut self, bssid: [u8; 6]) -> Self {
        self.bssid = Some(bssid);
        self
    }

    pub fn with_wpa_flags(mut self, flags: SecurityFlags) -> Self {
        self.wpa_flags = flags;
        self
    }

    pub fn with_rsn_flags(mut self, flags: SecurityFlags) -> Self {
        self.rsn_flags = flags;
        self
    }

    pub fn has_wpa(&self) -> bool {
        !self.wpa_flags.is_empty()
    }

    pub fn has_rsn(&self) -> bool {
        !self.rsn_flags.is_empty()
    }

    pub fn is_wpa_capable(&self) -> bool {
        self.has_wpa() || self.has_rsn()
    }
}

pub(crate) enum ApClass {
    Open,
    WepOrLeapOrDynWep,
    Wpa,
}

impl ApCapabilities {
    pub(crate) fn classify(&self) -> ApClass {
        if self.is_wpa_capable() {
            ApClass::Wpa
        } else if self.privacy {
            ApClass::WepOrLeapOrDynWep
        } else {
            ApClass::Open
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_ap_has_no_capability_flags() {
        let ap = ApCapabilities::new(b"test".to_vec(), ApMode::Infrastructure, false);
        assert!(!ap.has_wpa());
        assert!(!ap.has_rsn());
        assert!(!ap.is_wpa_capable());
    }

    #[test]
    fn wpa_capable_requires_either_ie() {
        let ap = ApCapabilities::new(b"test".to_vec(), ApMode::Infrastructure, true)
            .with_wpa_flags(SecurityFlags::KEY_MGMT_PSK | SecurityFlags::PAIR_TKIP);
        assert!(ap.has_wpa());
        assert!(!ap.has_rsn());
        assert!(ap.is_wpa_capable());
    }
}
