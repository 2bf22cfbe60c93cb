// SPDX-License-Identifier: Apache-2.0

//! Larger end-to-end scenario tests, kept apart from the per-module
//! inline unit tests the same way `nmstate/unit_tests/` separates its
//! scenario fixtures from `ifaces/*.rs`'s own `#[cfg(test)]` blocks.

mod bond_scenarios;
mod wifi_scenarios;
