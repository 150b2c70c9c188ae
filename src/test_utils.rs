//! Helpers shared by the unit tests.

/// Tolerance for comparing derived `f32` lengths.
pub const EPSILON: f32 = 1e-6;

/// Asserts that two floats differ by less than [`EPSILON`].
#[track_caller]
pub fn assert_approx_eq(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < EPSILON,
        "expected {expected}, got {actual}"
    );
}
