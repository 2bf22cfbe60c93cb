// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;

use crate::bond::{BondSetting, CompareFlags, VerifyContext, VerifyOutcome, verify};
use crate::error::ErrorKind;

fn ctx() -> VerifyContext {
    VerifyContext {
        has_infiniband: false,
        required_interface_name_ok: true,
    }
}

#[test]
fn invariant_every_stored_option_validated_on_insert() {
    let mut s = BondSetting::new();
    assert!(s.add_option("use_carrier", "1").is_ok());
    assert!(s.add_option("use_carrier", "9").is_err());
    // The rejected write must not have landed.
    assert_eq!(s.option("use_carrier"), Some("1"));
}

#[test]
fn invariant_iteration_order_is_mode_first_then_lexicographic() {
    let mut s = BondSetting::new();
    s.add_option("use_carrier", "1").unwrap();
    s.add_option("mode", "balance-rr").unwrap();
    s.add_option("min_links", "2").unwrap();
    let names: Vec<String> = s.iter_sorted().into_iter().map(|(n, _)| n).collect();
    assert_eq!(names, vec!["mode", "min_links", "use_carrier"]);
}

#[test]
fn round_trip_through_string_map_is_exact() {
    let mut original = BondSetting::new();
    original.add_option("mode", "802.3ad").unwrap();
    original.add_option("lacp_rate", "fast").unwrap();

    let map: BTreeMap<String, String> = original
        .iter_sorted()
        .into_iter()
        .collect();
    let mut reconstructed = BondSetting::new();
    reconstructed.load_from_map(map).unwrap();

    assert!(original.options_equal(&reconstructed, CompareFlags::Exact));
}

/// Scenario 5: `miimon` and `arp_interval` can only both land as
/// positive via a bulk load — `add_option` alone always clears one when
/// the other is set non-zero.
#[test]
fn scenario_bulk_loaded_miimon_and_arp_interval_conflict_is_fatal() {
    let mut s = BondSetting::new();
    s.load_from_map(
        [
            ("mode".to_string(), "balance-rr".to_string()),
            ("miimon".to_string(), "100".to_string()),
            ("arp_interval".to_string(), "200".to_string()),
        ]
        .into_iter()
        .collect(),
    )
    .unwrap();

    match verify(&s, ctx()) {
        VerifyOutcome::Fatal(e) => assert_eq!(e.kind, ErrorKind::IncompatibleOptions),
        other => panic!("expected fatal incompatible-options, got {other:?}"),
    }
}

/// Scenario 6: `primary` is only valid under `active-backup`.
#[test]
fn scenario_primary_on_wrong_mode_then_fixed() {
    let mut s = BondSetting::new();
    s.add_option("mode", "balance-rr").unwrap();
    s.add_option("primary", "eth0").unwrap();
    match verify(&s, ctx()) {
        VerifyOutcome::Fatal(e) => assert_eq!(e.kind, ErrorKind::OptionRequiresOther),
        other => panic!("expected fatal option-requires-other, got {other:?}"),
    }

    s.add_option("mode", "active-backup").unwrap();
    assert_eq!(verify(&s, ctx()), VerifyOutcome::Ok);
}
