// SPDX-License-Identifier: Apache-2.0

//! The AP capability model and the Wi-Fi connection completer.

pub mod ap;
pub mod completer;
pub mod security;

pub use ap::{ApCapabilities, ApMode, SecurityFlags};
pub use completer::{complete, CompletionInput, CompletionOutput};
