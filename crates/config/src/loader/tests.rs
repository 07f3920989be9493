//! Tests for the configuration loader.
//!
//! Invariants:
//! - Tests that touch process-global state (env, cwd) hold `env_lock()` and
//!   run under `serial_test`.


use std::sync::Mutex;

/// Returns the global test lock for environment variable isolation.
pub fn env_lock() -> &'static Mutex<()> {
    crate::test_util::global_test_lock()
}
