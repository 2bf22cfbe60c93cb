// SPDX-License-Identifier: Apache-2.0

use crate::error::ErrorKind;
use crate::wifi::ap::{ApCapabilities, ApMode, SecurityFlags};
use crate::wifi::completer::{CompletionInput, complete};
use crate::wifi::security::{AuthAlg, Ieee8021XConfig, KeyMgmt, WirelessSecurityConfig};

fn bssid() -> [u8; 6] {
    [0x01, 0x02, 0x03, 0x04, 0x05, 0x06]
}

/// Scenario 1: open AP, empty input.
#[test]
fn scenario_open_ap_completion_from_empty() {
    let ap = ApCapabilities::new(b"blahblah".to_vec(), ApMode::Infrastructure, false)
        .with_bssid(bssid());
    let out = complete(CompletionInput {
        ap: &ap,
        lock_bssid: false,
        wireless: None,
        security: None,
        ieee8021x: None,
    })
    .unwrap();

    assert_eq!(out.wireless.ssid, b"blahblah");
    assert_eq!(out.wireless.bssid, None);
    assert!(out.security.is_none());
}

/// Scenario 2: privacy-only AP, empty input, synthesizes static WEP.
#[test]
fn scenario_wep_ap_empty_input() {
    let ap = ApCapabilities::new(b"blahblah".to_vec(), ApMode::Infrastructure, true)
        .with_bssid(bssid());
    let out = complete(CompletionInput {
        ap: &ap,
        lock_bssid: false,
        wireless: None,
        security: None,
        ieee8021x: None,
    })
    .unwrap();

    assert_eq!(out.wireless.bssid, None);
    assert_eq!(out.security.unwrap().key_mgmt, Some(KeyMgmt::None));
}

/// Scenario 3: dynamic-WEP completion against a privacy-only AP.
#[test]
fn scenario_dynamic_wep_completion() {
    let ap = ApCapabilities::new(b"blahblah".to_vec(), ApMode::Infrastructure, true);
    let out = complete(CompletionInput {
        ap: &ap,
        lock_bssid: false,
        wireless: None,
        security: Some(WirelessSecurityConfig {
            key_mgmt: Some(KeyMgmt::Ieee8021x),
            auth_alg: Some(AuthAlg::Open),
            ..Default::default()
        }),
        ieee8021x: Some(Ieee8021XConfig {
            eap: Some(vec!["peap".to_string()]),
            identity: Some("Bill Smith".to_string()),
            ..Default::default()
        }),
    })
    .unwrap();

    let sec = out.security.unwrap();
    assert_eq!(
        sec.pairwise,
        vec![crate::wifi::security::Cipher::Wep40, crate::wifi::security::Cipher::Wep104]
    );
    assert_eq!(
        sec.group,
        vec![crate::wifi::security::Cipher::Wep40, crate::wifi::security::Cipher::Wep104]
    );
}

/// Scenario 4: WPA AP, user supplied LEAP — rejected outright.
#[test]
fn scenario_wpa_ap_user_gave_leap() {
    let ap = ApCapabilities::new(b"blahblah".to_vec(), ApMode::Infrastructure, true)
        .with_wpa_flags(SecurityFlags::PAIR_TKIP | SecurityFlags::KEY_MGMT_PSK);
    let err = complete(CompletionInput {
        ap: &ap,
        lock_bssid: false,
        wireless: None,
        security: Some(WirelessSecurityConfig {
            key_mgmt: Some(KeyMgmt::Ieee8021x),
            leap_username: Some("Bill Smith".to_string()),
            ..Default::default()
        }),
        ieee8021x: None,
    })
    .unwrap_err();

    assert_eq!(err.kind, ErrorKind::WirelessSecurityInvalidProperty);
}

#[test]
fn lock_bssid_true_sets_bssid_false_leaves_it_unset() {
    let ap = ApCapabilities::new(b"net".to_vec(), ApMode::Infrastructure, false)
        .with_bssid(bssid());

    let locked = complete(CompletionInput {
        ap: &ap,
        lock_bssid: true,
        wireless: None,
        security: None,
        ieee8021x: None,
    })
    .unwrap();
    assert_eq!(locked.wireless.bssid, Some(bssid()));

    let unlocked = complete(CompletionInput {
        ap: &ap,
        lock_bssid: false,
        wireless: None,
        security: None,
        ieee8021x: None,
    })
    .unwrap();
    assert_eq!(unlocked.wireless.bssid, None);
}

#[test]
fn completion_of_open_ap_yields_a_connection_wifi_could_then_verify() {
    // For a fresh connection, completing against an open AP needs no
    // further security setup to be considered complete.
    let ap = ApCapabilities::new(b"net".to_vec(), ApMode::Infrastructure, false);
    let out = complete(CompletionInput {
        ap: &ap,
        lock_bssid: false,
        wireless: None,
        security: None,
        ieee8021x: None,
    })
    .unwrap();
    assert!(out.security.is_none());
    assert!(out.ieee8021x.is_none());
}
