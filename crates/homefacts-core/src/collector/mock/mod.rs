//! Mock filesystem implementations for testing.
//!
//! This module provides `MockFs` and pre-built host scenarios for testing
//! collectors without touching the accounts of the machine running the tests.

mod filesystem;
mod scenarios;

pub use filesystem::{MOCK_PASSWD_PATH, MockFs};
pub use scenarios::{ALICE_RSA_KEY, BOB_DSA_KEY};
