// SPDX-License-Identifier: Apache-2.0

//! Rule-based connection completer: given an AP's advertised
//! capabilities, completes or rejects a partial Wi-Fi connection
//! template.
//!
//! Grounded scenario-by-scenario on `test-wifi-ap-utils.c`: each branch
//! below cites the test function it reproduces.

use crate::error::{CoreError, ErrorKind};
use crate::wifi::ap::{ApCapabilities, ApClass};
use crate::wifi::security::{
    AuthAlg, Cipher, Ieee8021XConfig, KeyMgmt, WifiMode, WirelessConfig,
    WirelessSecurityConfig,
};

/// What the caller hands in: the AP observed, whether to pin the
/// connection to this specific BSSID, and the partially-filled settings
/// to complete.
pub struct CompletionInput<'a> {
    pub ap: &'a ApCapabilities,
    pub lock_bssid: bool,
    pub wireless: Option<WirelessConfig>,
    pub security: Option<WirelessSecurityConfig>,
    pub ieee8021x: Option<Ieee8021XConfig>,
}

/// Result of a successful completion: the settings to install on the
/// connection. A missing `security`/`ieee8021x` means that group should
/// be removed from the connection, not left untouched.
pub struct CompletionOutput {
    pub wireless: WirelessConfig,
    pub security: Option<WirelessSecurityConfig>,
    pub ieee8021x: Option<Ieee8021XConfig>,
}

/// Completes `input` against the AP's advertised security, or rejects it
/// with the precise taxonomy error from §7.
pub fn complete(input: CompletionInput<'_>) -> Result<CompletionOutput, CoreError> {
    let mut wireless = input.wireless.unwrap_or_default();
    wireless.ssid = input.ap.ssid.clone();
    wireless.bssid = if input.lock_bssid { input.ap.bssid } else { None };
    wireless.mode = Some(match input.ap.mode {
        crate::wifi::ap::ApMode::Infrastructure => WifiMode::Infrastructure,
        crate::wifi::ap::ApMode::Adhoc => WifiMode::Adhoc,
    });

    let security = input.security.filter(|s| !s.is_empty());
    let ieee8021x = input.ieee8021x;

    let (security, ieee8021x) = match input.ap.classify() {
        ApClass::Open => complete_open(security, ieee8021x)?,
        ApClass::WepOrLeapOrDynWep => complete_privacy(security, ieee8021x)?,
        ApClass::Wpa => complete_wpa(security, ieee8021x)?,
    };

    Ok(CompletionOutput {
        wireless,
        security,
        ieee8021x,
    })
}

fn invalid(msg: impl AsRef<str>) -> CoreError {
    CoreError::wsec(ErrorKind::WirelessSecurityInvalidProperty, msg)
}

/// `test_open_ap_empty_connection`, `test_open_ap_leap_connection_*`,
/// `test_open_ap_wep_connection`, `test_open_ap_wpa_*_connection_*`: an
/// open AP rejects any supplied security configuration outright.
fn complete_open(
    security: Option<WirelessSecurityConfig>,
    ieee8021x: Option<Ieee8021XConfig>,
) -> Result<(Option<WirelessSecurityConfig>, Option<Ieee8021XConfig>), CoreError> {
    if security.is_some() {
        return Err(invalid("an open access point does not support wireless security"));
    }
    if ieee8021x.is_some() {
        return Err(invalid("an open access point does not support 802.1X"));
    }
    Ok((None, None))
}

/// `test_priv_ap_*`: privacy-bit-only APs accept static WEP, LEAP, or
/// dynamic WEP, but nothing WPA-flavoured.
fn complete_privacy(
    security: Option<WirelessSecurityConfig>,
    ieee8021x: Option<Ieee8021XConfig>,
) -> Result<(Option<WirelessSecurityConfig>, Option<Ieee8021XConfig>), CoreError> {
    let Some(mut sec) = security else {
        // test_priv_ap_empty_connection: synthesize static WEP.
        return Ok((
            Some(WirelessSecurityConfig {
                key_mgmt: Some(KeyMgmt::None),
                ..Default::default()
            }),
            None,
        ));
    };

    match sec.key_mgmt {
        None | Some(KeyMgmt::None) => {
            sec.key_mgmt = Some(KeyMgmt::None);
            Ok((Some(sec), None))
        }
        Some(KeyMgmt::Ieee8021x) => {
            if sec.leap_username.is_some() {
                // test_priv_ap_leap_connection_1: LEAP inferred from a
                // username; there's no way to tell static/dynamic WEP
                // from LEAP off the beacon alone.
                if ieee8021x.is_some() {
                    return Err(invalid("LEAP does not use an 802.1X configuration"));
                }
                sec.auth_alg = Some(AuthAlg::Leap);
                Ok((Some(sec), None))
            } else {
                match sec.auth_alg {
                    Some(AuthAlg::Leap) => {
                        // test_priv_ap_leap_connection_2
                        Err(CoreError::wsec(
                            ErrorKind::WirelessSecurityLeapRequiresUsername,
                            "leap-username is required when auth-alg is leap",
                        ))
                    }
                    Some(AuthAlg::Shared) => {
                        // test_priv_ap_dynamic_wep_3
                        Err(invalid("dynamic WEP requires auth-alg=open, not shared"))
                    }
                    Some(AuthAlg::Open) | None => {
                        // test_priv_ap_dynamic_wep_1 / _2
                        let eap = ieee8021x.ok_or_else(|| {
                            CoreError::wsec(
                                ErrorKind::EapMissingProperty,
                                "dynamic WEP requires an 802.1X configuration",
                            )
                        })?;
                        if !eap.has_eap_method() {
                            return Err(CoreError::wsec(
                                ErrorKind::EapMissingProperty,
                                "802.1X configuration is missing an eap method",
                            ));
                        }
                        sec.key_mgmt = Some(KeyMgmt::Ieee8021x);
                        sec.auth_alg = Some(AuthAlg::Open);
                        sec.pairwise = vec![Cipher::Wep40, Cipher::Wep104];
                        sec.group = vec![Cipher::Wep40, Cipher::Wep104];
                        Ok((Some(sec), Some(eap)))
                    }
                }
            }
        }
        Some(KeyMgmt::WpaPsk) | Some(KeyMgmt::WpaEap) | Some(KeyMgmt::WpaNone) => {
            // test_priv_ap_wpa_psk_connection_*: AP isn't WPA-capable.
            Err(invalid("access point does not advertise WPA or RSN"))
        }
    }
}

/// `test_wpa_ap_*`: WPA/RSN-capable APs accept only `wpa-psk`/`wpa-eap`,
/// always with `auth-alg=open`.
fn complete_wpa(
    security: Option<WirelessSecurityConfig>,
    ieee8021x: Option<Ieee8021XConfig>,
) -> Result<(Option<WirelessSecurityConfig>, Option<Ieee8021XConfig>), CoreError> {
    let Some(mut sec) = security else {
        // test_wpa_ap_empty_connection
        return Ok((
            Some(WirelessSecurityConfig {
                key_mgmt: Some(KeyMgmt::WpaPsk),
                auth_alg: Some(AuthAlg::Open),
                ..Default::default()
            }),
            None,
        ));
    };

    match sec.key_mgmt {
        Some(KeyMgmt::None) | Some(KeyMgmt::Ieee8021x) | None => {
            // test_wpa_ap_leap_connection_*, test_wpa_ap_dynamic_wep_connection
            return Err(invalid(
                "WPA access points do not support LEAP, static, or dynamic WEP",
            ));
        }
        Some(KeyMgmt::WpaNone) => {
            return Err(invalid("wpa-none is not valid for an infrastructure access point"));
        }
        Some(KeyMgmt::WpaPsk) | Some(KeyMgmt::WpaEap) => {}
    }

    match sec.auth_alg {
        None => sec.auth_alg = Some(AuthAlg::Open),
        Some(AuthAlg::Open) => {}
        Some(AuthAlg::Shared) | Some(AuthAlg::Leap) => {
            // test_wpa_ap_wpa_psk_connection_*: auth-alg=shared rejected.
            return Err(invalid("WPA requires auth-alg=open"));
        }
    }

    let eap = match sec.key_mgmt {
        Some(KeyMgmt::WpaEap) => {
            let eap = ieee8021x.ok_or_else(|| {
                CoreError::wsec(
                    ErrorKind::EapMissingProperty,
                    "wpa-eap requires an 802.1X configuration",
                )
            })?;
            if !eap.has_eap_method() {
                return Err(CoreError::wsec(
                    ErrorKind::EapMissingProperty,
                    "802.1X configuration is missing an eap method",
                ));
            }
            Some(eap)
        }
        Some(KeyMgmt::WpaPsk) => {
            if sec.psk.is_none() {
                return Err(invalid("wpa-psk requires a psk"));
            }
            None
        }
        _ => None,
    };

    Ok((Some(sec), eap))
}
