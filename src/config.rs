//! Global configuration for TRAL runtime behavior.
//!
//! This module provides thread-safe global configuration that affects
//! parsing semantics without adding overhead to hot loops.

use std::sync::atomic::{AtomicBool, Ordering};

/// Global flag for lenient zero-length interval handling.
///
/// When enabled, zero-length intervals (start == end) encountered while
/// parsing are widened to 1 bp intervals (end = start + 1). When
/// disabled (the default), they are rejected as malformed input.
///
/// The core algorithms always require `start < end`; this flag only
/// changes what the parsing boundary does about violations.
static WIDEN_ZERO_LENGTH: AtomicBool = AtomicBool::new(false);

/// Enable or disable lenient zero-length interval handling.
///
/// Set once at startup before any parsing.
///
/// # Example
///
/// ```
/// use tral_genomics::config;
///
/// config::set_widen_zero_length(true);
/// // Parsing now turns `100 100` into `100 101` instead of failing.
/// config::set_widen_zero_length(false);
/// ```
#[inline]
pub fn set_widen_zero_length(enabled: bool) {
    WIDEN_ZERO_LENGTH.store(enabled, Ordering::Release);
}

/// Check whether lenient zero-length interval handling is enabled.
#[inline]
pub fn widen_zero_length() -> bool {
    WIDEN_ZERO_LENGTH.load(Ordering::Acquire)
}

/// Normalize an interval end position according to the global policy.
///
/// Returns `start + 1` when lenient mode is on and `start == end`,
/// otherwise the original end. Called during parsing, not in inner
/// loops.
#[inline]
pub fn normalize_end(start: i64, end: i64) -> i64 {
    if start == end && widen_zero_length() {
        start + 1
    } else {
        end
    }
}
