// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

/// Bonding driver aggregation mode.
///
/// Deserializes from either its canonical kebab-case name or its legacy
/// decimal index (`#[serde(alias = "N")]`), mirroring how the kernel
/// bonding driver itself accepts either spelling for `mode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BondMode {
    /// Serialize to `balance-rr`. Deserialize from `0` or `balance-rr`.
    #[serde(alias = "0")]
    BalanceRr,
    /// Serialize to `active-backup`. Deserialize from `1` or `active-backup`.
    #[serde(alias = "1")]
    ActiveBackup,
    /// Serialize to `balance-xor`. Deserialize from `2` or `balance-xor`.
    #[serde(alias = "2")]
    BalanceXor,
    /// Serialize to `broadcast`. Deserialize from `3` or `broadcast`.
    #[serde(alias = "3")]
    Broadcast,
    /// Serialize to `802.3ad`. Deserialize from `4` or `802.3ad`.
    #[serde(rename = "802.3ad", alias = "4")]
    Lacp,
    /// Serialize to `balance-tlb`. Deserialize from `5` or `balance-tlb`.
    #[serde(alias = "5")]
    BalanceTlb,
    /// Serialize to `balance-alb`. Deserialize from `6` or `balance-alb`.
    #[serde(alias = "6")]
    BalanceAlb,
}

impl BondMode {
    pub const ALL: [BondMode; 7] = [
        BondMode::BalanceRr,
        BondMode::ActiveBackup,
        BondMode::BalanceXor,
        BondMode::Broadcast,
        BondMode::Lacp,
        BondMode::BalanceTlb,
        BondMode::BalanceAlb,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BondMode::BalanceRr => "balance-rr",
            BondMode::ActiveBackup => "active-backup",
            BondMode::BalanceXor => "balance-xor",
            BondMode::Broadcast => "broadcast",
            BondMode::Lacp => "802.3ad",
            BondMode::BalanceTlb => "balance-tlb",
            BondMode::BalanceAlb => "balance-alb",
        }
    }

    pub const fn index(&self) -> u8 {
        match self {
            BondMode::BalanceRr => 0,
            BondMode::ActiveBackup => 1,
            BondMode::BalanceXor => 2,
            BondMode::Broadcast => 3,
            BondMode::Lacp => 4,
            BondMode::BalanceTlb => 5,
            BondMode::BalanceAlb => 6,
        }
    }

    /// Parses either the canonical name or the decimal index. Returns
    /// `None` for anything else, including whitespace-padded variants.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| {
            m.as_str() == value || m.index().to_string() == value
        })
    }

    /// True if `value` is the integer spelling rather than the canonical
    /// text spelling. Used by the verifier to decide whether a
    /// `Normalizable` rewrite is owed to the caller.
    pub fn is_integer_spelling(value: &str) -> bool {
        value.parse::<u8>().is_ok()
    }
}

impl std::fmt::Display for BondMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
