//! Shared helpers for the integration tests.

#![allow(dead_code)]

use std::sync::Once;

use proptest::test_runner::Config as ProptestConfig;

static INIT_LOGGING: Once = Once::new();

/// Routes `log` output through the test harness. Set `RUST_LOG=spanstream=trace` to see the
/// cursor rejections of a failing test.
pub fn init_test_logging() {
    INIT_LOGGING.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

/// Proptest configuration with a fixed number of cases and no persisted failure files.
pub fn test_proptest_config(cases: u32) -> ProptestConfig {
    ProptestConfig {
        cases,
        failure_persistence: None,
        ..ProptestConfig::default()
    }
}

/// A buffer of `len` bytes holding `0, 1, 2, ...` (wrapping).
pub fn sequential(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 256) as u8).collect()
}
