// SPDX-License-Identifier: Apache-2.0

use nipcore_derive::JsonDisplay;
use serde::{Deserialize, Serialize};

/// Machine-readable failure category raised by the bond and Wi-Fi cores.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidOption,
    MissingMode,
    IncompatibleOptions,
    OptionRequiresOther,
    Normalizable,
    WirelessSecurityInvalidProperty,
    WirelessSecurityLeapRequiresUsername,
    EapMissingProperty,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Error envelope returned by every fallible operation in this crate.
///
/// `msg` is always prefixed with the owning setting group, e.g.
/// `"bond.options: "` or `"802-11-wireless-security: "`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonDisplay)]
pub struct CoreError {
    pub kind: ErrorKind,
    pub msg: String,
}

impl CoreError {
    pub fn new(kind: ErrorKind, msg: String) -> Self {
        Self { kind, msg }
    }

    pub(crate) fn bond(kind: ErrorKind, msg: impl AsRef<str>) -> Self {
        Self::new(kind, format!("bond.options: {}", msg.as_ref()))
    }

    pub(crate) fn wsec(kind: ErrorKind, msg: impl AsRef<str>) -> Self {
        Self::new(
            kind,
            format!("802-11-wireless-security: {}", msg.as_ref()),
        )
    }
}

impl std::error::Error for CoreError {}

pub type Result<T> = std::result::Result<T, CoreError>;
