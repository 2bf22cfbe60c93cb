// SPDX-License-Identifier: Apache-2.0

//! The bond-setting schema/validator/verifier/store and the Wi-Fi
//! connection completer: two pure, synchronous decision engines with no
//! I/O, no daemon, and no persistence of their own.

pub mod bond;
pub mod connection;
pub mod error;
pub mod wifi;

#[cfg(test)]
mod unit_tests;

pub use connection::{Connection, Setting};
pub use error::{CoreError, ErrorKind, Result};
