// SPDX-License-Identifier: Apache-2.0

//! The `802-11-wireless-security` and `802-1x` setting types consumed by
//! the connection completer.
//!
//! Grounded on `Ieee8021XConfig` (`state/ieee8021x.rs`) for field shape,
//! naming convention, and the `hide_secrets` pattern, adapted to the
//! key-mgmt/auth-alg vocabulary exercised by `test-wifi-ap-utils.c`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KeyMgmt {
    None,
    Ieee8021x,
    WpaNone,
    WpaPsk,
    WpaEap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuthAlg {
    Open,
    Shared,
    Leap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Proto {
    Wpa,
    Rsn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Cipher {
    Wep40,
    Wep104,
    Tkip,
    Ccmp,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
/// The wireless-security setting of a connection template. All fields
/// optional: a partially filled setting is what the completer is asked
/// to finish.
pub struct WirelessSecurityConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_mgmt: Option<KeyMgmt>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_alg: Option<AuthAlg>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leap_username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Replaced with a placeholder when querying; never logged in full.
    pub psk: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub proto: Vec<Proto>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub pairwise: Vec<Cipher>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub group: Vec<Cipher>,
}

impl WirelessSecurityConfig {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub struct Ieee8021XConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "eap-methods")]
    pub eap: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_cert: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ca_cert: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_key_password: Option<String>,
}

impl Ieee8021XConfig {
    /// Whether this 802.1X block carries enough to attempt dynamic WEP
    /// or WPA-EAP: at minimum a single EAP method.
    pub fn has_eap_method(&self) -> bool {
        self.eap.as_ref().is_some_and(|v| !v.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WifiMode {
    Infrastructure,
    Adhoc,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// The `802-11-wireless` setting being completed.
pub struct WirelessConfig {
    pub ssid: Vec<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bssid: Option<[u8; 6]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<WifiMode>,
}
