// SPDX-License-Identifier: Apache-2.0

//! Static description of every option the bonding driver recognises:
//! value grammar, default, and per-mode applicability.
//!
//! Grounded on the kernel bonding driver's `valid_options_lst` /
//! `_bond_option_unsupp_mode` tables: the option list, defaults, bounds
//! and per-mode exclusions below reproduce that table exactly.

use super::mode::BondMode;

/// Value grammar a single option's string value is validated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    Int,
    List,
    IntOrList,
    IpList,
    Mac,
    Ifname,
}

/// Bitmask over [`BondMode`], one bit per mode index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModeMask(pub u8);

impl ModeMask {
    pub const NONE: ModeMask = ModeMask(0);

    pub const fn of(modes: &[BondMode]) -> Self {
        let mut bits = 0u8;
        let mut i = 0;
        while i < modes.len() {
            bits |= 1 << modes[i].index();
            i += 1;
        }
        ModeMask(bits)
    }

    /// All modes except the ones listed — used for the options whose
    /// driver table is expressed as "unsupported everywhere except X".
    pub const fn all_except(modes: &[BondMode]) -> Self {
        let allowed = Self::of(modes);
        ModeMask(!allowed.0 & 0b0111_1111)
    }

    pub fn contains(&self, mode: BondMode) -> bool {
        self.0 & (1 << mode.index()) != 0
    }
}

/// One row of the bond option registry.
#[derive(Debug, Clone, Copy)]
pub struct OptionEntry {
    pub name: &'static str,
    pub default_value: &'static str,
    pub kind: OptionKind,
    pub min: i64,
    pub max: i64,
    pub enum_values: &'static [&'static str],
    pub unsupported_modes: ModeMask,
}

macro_rules! entry {
    ($name:literal, $default:literal, $kind:expr) => {
        entry!($name, $default, $kind, 0, 0, &[], ModeMask::NONE)
    };
    ($name:literal, $default:literal, $kind:expr, $min:expr, $max:expr) => {
        entry!($name, $default, $kind, $min, $max, &[], ModeMask::NONE)
    };
    ($name:literal, $default:literal, $kind:expr, $min:expr, $max:expr, $enum:expr) => {
        entry!($name, $default, $kind, $min, $max, $enum, ModeMask::NONE)
    };
    ($name:literal, $default:literal, $kind:expr, $min:expr, $max:expr, $enum:expr, $unsupp:expr) => {
        OptionEntry {
            name: $name,
            default_value: $default,
            kind: $kind,
            min: $min,
            max: $max,
            enum_values: $enum,
            unsupported_modes: $unsupp,
        }
    };
}

use BondMode::*;
use OptionKind::*;

/// `G_MAXINT`: the upper bound the original driver table uses for its
/// unbounded-looking INT options. Not `u32::MAX` — those fields are
/// parsed as a signed `gint` in the original implementation.
const G_MAXINT: i64 = i32::MAX as i64;

pub static REGISTRY: &[OptionEntry] = &[
    entry!("mode", "balance-rr", IntOrList, 0, 6, &[
        "balance-rr", "active-backup", "balance-xor", "broadcast",
        "802.3ad", "balance-tlb", "balance-alb",
    ]),
    entry!("miimon", "100", Int, 0, G_MAXINT),
    entry!("downdelay", "0", Int, 0, G_MAXINT),
    entry!("updelay", "0", Int, 0, G_MAXINT),
    entry!(
        "arp_interval", "0", Int, 0, G_MAXINT, &[],
        ModeMask::of(&[Lacp, BalanceTlb, BalanceAlb])
    ),
    entry!(
        "arp_ip_target", "", IpList, 0, 0, &[],
        ModeMask::of(&[Lacp, BalanceTlb, BalanceAlb])
    ),
    entry!(
        "arp_validate", "none", IntOrList, 0, 6,
        &["none", "active", "backup", "all", "filter", "filter_active", "filter_backup"],
        ModeMask::of(&[Lacp, BalanceTlb, BalanceAlb])
    ),
    {
        const ALLOWED: &[BondMode] = &[ActiveBackup, BalanceTlb, BalanceAlb];
        entry!("primary", "", Ifname, 0, 0, &[], ModeMask::all_except(ALLOWED))
    },
    entry!("primary_reselect", "always", IntOrList, 0, 2, &["always", "better", "failure"]),
    entry!("fail_over_mac", "none", IntOrList, 0, 2, &["none", "active", "follow"]),
    entry!("use_carrier", "1", Int, 0, 1),
    entry!("ad_select", "stable", IntOrList, 0, 2, &["stable", "bandwidth", "count"]),
    entry!(
        "xmit_hash_policy", "layer2", IntOrList, 0, 4,
        &["layer2", "layer3+4", "layer2+3", "encap2+3", "encap3+4"]
    ),
    entry!("resend_igmp", "1", Int, 0, 255),
    {
        const ALLOWED: &[BondMode] = &[Lacp];
        entry!("lacp_rate", "slow", IntOrList, 0, 1, &["slow", "fast"], ModeMask::all_except(ALLOWED))
    },
    {
        const ALLOWED: &[BondMode] = &[ActiveBackup, BalanceTlb, BalanceAlb];
        entry!("active_slave", "", Ifname, 0, 0, &[], ModeMask::all_except(ALLOWED))
    },
    {
        const ALLOWED: &[BondMode] = &[Lacp];
        entry!("ad_actor_sys_prio", "65535", Int, 1, 65535, &[], ModeMask::all_except(ALLOWED))
    },
    {
        const ALLOWED: &[BondMode] = &[Lacp];
        entry!("ad_actor_system", "", Mac, 0, 0, &[], ModeMask::all_except(ALLOWED))
    },
    {
        const ALLOWED: &[BondMode] = &[Lacp];
        entry!("ad_user_port_key", "0", Int, 0, 1023, &[], ModeMask::all_except(ALLOWED))
    },
    entry!("all_slaves_active", "0", Int, 0, 1),
    entry!("arp_all_targets", "any", IntOrList, 0, 1, &["any", "all"]),
    entry!("min_links", "0", Int, 0, G_MAXINT),
    entry!("num_grat_arp", "1", Int, 0, 255),
    entry!("num_unsol_na", "1", Int, 0, 255),
    entry!(
        "packets_per_slave", "1", Int, 0, 65535, &[],
        ModeMask::all_except(&[BalanceRr])
    ),
    {
        const ALLOWED: &[BondMode] = &[BalanceTlb];
        entry!("tlb_dynamic_lb", "1", Int, 0, 1, &[], ModeMask::all_except(ALLOWED))
    },
    entry!("lp_interval", "1", Int, 1, G_MAXINT),
];

/// Looks up the registry entry for `name`, if recognised.
pub fn meta(name: &str) -> Option<&'static OptionEntry> {
    REGISTRY.iter().find(|e| e.name == name)
}

/// The registry's canonical ordering: the order options were declared
/// above, which is also the order the kernel driver documents them in.
pub fn valid_option_names() -> impl Iterator<Item = &'static str> {
    REGISTRY.iter().map(|e| e.name)
}
