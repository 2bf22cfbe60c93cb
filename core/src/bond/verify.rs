// SPDX-License-Identifier: Apache-2.0

//! Whole-setting verification: cross-field rules, mode inference, and
//! normalisation signalling.
//!
//! Grounded on `nm_setting_bond_verify` in the kernel bonding driver's
//! connection-profile code: the ordered rule sequence below, and the
//! fatal/normalizable split partway through, reproduce that function's
//! structure step for step.

use super::mode::BondMode;
use super::registry::meta;
use super::store::BondSetting;
use super::validator::{validate_ifname, validate_option};
use crate::error::{CoreError, ErrorKind};

/// Extra context the verifier needs but that lives outside the bond
/// setting itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct VerifyContext {
    /// Whether the enclosing connection also carries an `infiniband`
    /// setting.
    pub has_infiniband: bool,
    /// Whether the enclosing connection's required-interface-name check
    /// already passed (that check lives outside this crate's model).
    pub required_interface_name_ok: bool,
}

/// Outcome of [`verify`]. `Normalizable` carries the reason so a caller
/// can drive the store's own rewrite helpers and retry.
#[derive(Debug, Clone, PartialEq)]
pub enum VerifyOutcome {
    Ok,
    Normalizable(NormalizeReason),
    Fatal(CoreError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizeReason {
    /// `mode` was supplied as its decimal index rather than its
    /// canonical name.
    ModeSpelling,
    /// At least one stored option is not supported in the resolved mode
    /// and should be dropped.
    UnsupportedForMode,
}

fn int_of(setting: &BondSetting, name: &str, absent: i64) -> i64 {
    setting
        .option(name)
        .and_then(|v| v.parse::<i64>().ok())
        .unwrap_or(absent)
}

/// Runs the full ordered verification pipeline against `setting`.
pub fn verify(setting: &BondSetting, ctx: VerifyContext) -> VerifyOutcome {
    // 1. Per-option validation.
    for (name, value) in setting.iter_sorted() {
        if !validate_option(&name, Some(&value)) {
            return VerifyOutcome::Fatal(CoreError::bond(
                ErrorKind::InvalidOption,
                format!("invalid value '{value}' for option '{name}'"),
            ));
        }
    }

    let miimon = int_of(setting, "miimon", 0);
    let arp_interval = int_of(setting, "arp_interval", 0);
    let num_grat_arp = setting.option("num_grat_arp");
    let num_unsol_na = setting.option("num_unsol_na");

    // 3. Monitor exclusivity.
    if miimon > 0 && arp_interval > 0 {
        return fatal(
            ErrorKind::IncompatibleOptions,
            "miimon and arp_interval cannot both be non-zero",
        );
    }

    // 4. Mode presence.
    let Some(mode_raw) = setting.option("mode") else {
        return fatal(ErrorKind::MissingMode, "mode is required");
    };

    // 5. Mode canonicalisation.
    let Some(mode) = BondMode::parse(mode_raw) else {
        return fatal(
            ErrorKind::InvalidOption,
            format!("'{mode_raw}' is not a known bond mode"),
        );
    };

    // 6. Mode/interval compatibility.
    if matches!(mode, BondMode::BalanceTlb | BondMode::BalanceAlb)
        && arp_interval > 0
    {
        return fatal(
            ErrorKind::IncompatibleOptions,
            format!("arp_interval is not usable with mode '{mode}'"),
        );
    }

    // 7. Primary applicability.
    if let Some(primary) = setting.option("primary") {
        if !validate_ifname(primary) || mode != BondMode::ActiveBackup {
            return fatal(
                ErrorKind::OptionRequiresOther,
                "primary requires mode=active-backup and a valid interface name",
            );
        }
    }

    // 8. InfiniBand compatibility.
    if ctx.has_infiniband && mode != BondMode::ActiveBackup {
        return fatal(
            ErrorKind::IncompatibleOptions,
            "an infiniband port requires mode=active-backup",
        );
    }

    // 9. Delay dependencies.
    if miimon == 0 {
        let updelay = int_of(setting, "updelay", 0);
        let downdelay = int_of(setting, "downdelay", 0);
        if updelay > 0 || downdelay > 0 {
            return fatal(
                ErrorKind::OptionRequiresOther,
                "updelay/downdelay require a non-zero miimon",
            );
        }
    }

    // 10. ARP target consistency.
    let arp_ip_target = setting.option("arp_ip_target");
    if arp_interval > 0 {
        match arp_ip_target {
            Some(t) if !t.is_empty() => {
                let all_valid = t
                    .split(',')
                    .all(|p| !p.is_empty() && p.parse::<std::net::Ipv4Addr>().is_ok());
                if !all_valid {
                    return fatal(
                        ErrorKind::OptionRequiresOther,
                        "arp_ip_target contains an invalid address",
                    );
                }
            }
            _ => {
                return fatal(
                    ErrorKind::OptionRequiresOther,
                    "arp_interval requires a non-empty arp_ip_target",
                );
            }
        }
    } else if arp_ip_target.is_some() {
        return fatal(
            ErrorKind::OptionRequiresOther,
            "arp_ip_target requires a non-zero arp_interval",
        );
    }

    // 11. LACP rate scope.
    if let Some(lacp_rate) = setting.option("lacp_rate") {
        if mode != BondMode::Lacp && lacp_rate != "slow" && lacp_rate != "0" {
            return fatal(
                ErrorKind::IncompatibleOptions,
                "lacp_rate is only meaningful with mode=802.3ad",
            );
        }
    }

    // 12. Gratuitous-ARP twin.
    if let (Some(g), Some(u)) = (num_grat_arp, num_unsol_na) {
        if g != u {
            return fatal(
                ErrorKind::IncompatibleOptions,
                "num_grat_arp and num_unsol_na must match when both are set",
            );
        }
    }

    // 13. Required interface name (delegated to the connection).
    if !ctx.required_interface_name_ok {
        return fatal(
            ErrorKind::OptionRequiresOther,
            "the connection must name a required interface",
        );
    }

    // 14. Mode spelling normalisation.
    if BondMode::is_integer_spelling(mode_raw) {
        return VerifyOutcome::Normalizable(NormalizeReason::ModeSpelling);
    }

    // 15. Per-mode option culling.
    for (name, _) in setting.iter_sorted() {
        if let Some(entry) = meta(&name) {
            if entry.unsupported_modes.contains(mode) {
                return VerifyOutcome::Normalizable(
                    NormalizeReason::UnsupportedForMode,
                );
            }
        }
    }

    VerifyOutcome::Ok
}

fn fatal(kind: ErrorKind, msg: impl AsRef<str>) -> VerifyOutcome {
    VerifyOutcome::Fatal(CoreError::bond(kind, msg))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx_ok() -> VerifyContext {
        VerifyContext {
            has_infiniband: false,
            required_interface_name_ok: true,
        }
    }

    #[test]
    fn missing_mode_is_fatal() {
        let setting = BondSetting::new();
        assert!(matches!(
            verify(&setting, ctx_ok()),
            VerifyOutcome::Fatal(e) if e.kind == ErrorKind::MissingMode
        ));
    }

    #[test]
    fn miimon_and_arp_interval_together_is_fatal() {
        let mut setting = BondSetting::new();
        setting.load_from_map(
            [
                ("mode".to_string(), "balance-rr".to_string()),
                ("miimon".to_string(), "100".to_string()),
                ("arp_interval".to_string(), "100".to_string()),
            ]
            .into_iter()
            .collect(),
        )
        .unwrap();
        assert!(matches!(
            verify(&setting, ctx_ok()),
            VerifyOutcome::Fatal(e) if e.kind == ErrorKind::IncompatibleOptions
        ));
    }

    #[test]
    fn well_formed_active_backup_is_ok() {
        let mut setting = BondSetting::new();
        setting.add_option("mode", "active-backup").unwrap();
        setting.add_option("primary", "eth0").unwrap();
        assert_eq!(verify(&setting, ctx_ok()), VerifyOutcome::Ok);
    }

    #[test]
    fn integer_mode_spelling_is_normalizable() {
        let mut setting = BondSetting::new();
        setting.add_option("mode", "1").unwrap();
        setting.add_option("primary", "eth0").unwrap();
        assert_eq!(
            verify(&setting, ctx_ok()),
            VerifyOutcome::Normalizable(NormalizeReason::ModeSpelling)
        );
    }

    #[test]
    fn option_unsupported_in_mode_is_normalizable() {
        let mut setting = BondSetting::new();
        setting.add_option("mode", "active-backup").unwrap();
        setting.add_option("packets_per_slave", "5").unwrap();
        assert_eq!(
            verify(&setting, ctx_ok()),
            VerifyOutcome::Normalizable(NormalizeReason::UnsupportedForMode)
        );
    }

    #[test]
    fn primary_without_active_backup_is_fatal() {
        let mut setting = BondSetting::new();
        setting.add_option("mode", "balance-rr").unwrap();
        setting.add_option("primary", "eth0").unwrap();
        assert!(matches!(
            verify(&setting, ctx_ok()),
            VerifyOutcome::Fatal(e) if e.kind == ErrorKind::OptionRequiresOther
        ));
    }

    #[test]
    fn infiniband_requires_active_backup() {
        let mut setting = BondSetting::new();
        setting.add_option("mode", "balance-rr").unwrap();
        let ctx = VerifyContext {
            has_infiniband: true,
            required_interface_name_ok: true,
        };
        assert!(matches!(
            verify(&setting, ctx),
            VerifyOutcome::Fatal(e) if e.kind == ErrorKind::IncompatibleOptions
        ));
    }

    #[test]
    fn arp_interval_requires_arp_ip_target() {
        let mut setting = BondSetting::new();
        setting.add_option("mode", "balance-rr").unwrap();
        setting.add_option("arp_interval", "100").unwrap();
        assert!(matches!(
            verify(&setting, ctx_ok()),
            VerifyOutcome::Fatal(e) if e.kind == ErrorKind::OptionRequiresOther
        ));
    }

    #[test]
    fn mismatched_grat_arp_twins_is_fatal() {
        let mut setting = BondSetting::new();
        setting.add_option("mode", "balance-rr").unwrap();
        setting.add_option("num_grat_arp", "3").unwrap();
        setting.add_option("num_unsol_na", "5").unwrap();
        assert!(matches!(
            verify(&setting, ctx_ok()),
            VerifyOutcome::Fatal(e) if e.kind == ErrorKind::IncompatibleOptions
        ));
    }
}
