//! Testing utilities for boundplot.
//!
//! This module provides common assertion helpers for comparing mapped
//! feature matrices and boundary coordinates in both unit tests and
//! integration tests.
//!
//! # Usage
//!
//! ```ignore
//! use boundplot::testing::{assert_features_eq, DEFAULT_TOLERANCE};
//! ```

use approx::AbsDiffEq;
use ndarray::ArrayView2;

// =============================================================================
// Constants
// =============================================================================

/// Default tolerance for floating point comparisons.
///
/// Feature expansion is plain f64 arithmetic on O(1) inputs, so expected
/// values match far tighter than this.
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

// =============================================================================
// Floating Point Assertions
// =============================================================================

/// Assert that two f64 values are approximately equal.
///
/// Uses absolute difference comparison with the given tolerance.
///
/// # Examples
///
/// ```
/// # use boundplot::assert_approx_eq;
/// assert_approx_eq!(1.0, 1.0001, 0.001);
/// ```
///
/// # Panics
///
/// Panics if the absolute difference exceeds tolerance.
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $tolerance:expr) => {{
        let left_val: f64 = $left;
        let right_val: f64 = $right;
        let tol: f64 = $tolerance;
        let diff = (left_val - right_val).abs();
        if diff > tol {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`\n right: `{:?}`\n  diff: `{:?}` > tolerance `{:?}`",
                left_val, right_val, diff, tol
            );
        }
    }};
    ($left:expr, $right:expr, $tolerance:expr, $($arg:tt)+) => {{
        let left_val: f64 = $left;
        let right_val: f64 = $right;
        let tol: f64 = $tolerance;
        let diff = (left_val - right_val).abs();
        if diff > tol {
            panic!(
                "assertion failed: `(left ≈ right)` - {}\n  left: `{:?}`\n right: `{:?}`\n  diff: `{:?}` > tolerance `{:?}`",
                format_args!($($arg)+), left_val, right_val, diff, tol
            );
        }
    }};
}

/// Assert that two slices of f64 values are approximately equal element-wise.
///
/// # Panics
///
/// Panics if lengths differ or any element differs by more than tolerance.
pub fn assert_slice_approx_eq(actual: &[f64], expected: &[f64], tolerance: f64, context: &str) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "{context}: length mismatch - got {}, expected {}",
        actual.len(),
        expected.len()
    );

    for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        let diff = (a - e).abs();
        assert!(
            diff <= tolerance,
            "{context}[{i}]: {a} ≠ {e} (diff={diff}, tolerance={tolerance})"
        );
    }
}

// =============================================================================
// Feature Matrix Assertions
// =============================================================================

/// Generate a git-style diff between expected and actual feature matrices.
///
/// Shows `-` lines for expected and `+` lines for actual, only for rows that differ.
fn diff_features(
    actual: ArrayView2<'_, f64>,
    expected: ArrayView2<'_, f64>,
    epsilon: f64,
) -> String {
    let mut result = String::new();
    let (rows, cols) = actual.dim();

    // Header for context
    result.push_str(&format!("Shape: ({rows}, {cols})\n"));
    result.push_str(&format!("Epsilon: {epsilon:.0e}\n\n"));

    if cols == 1 {
        // Single column, degree-zero expansion - show differing rows
        for (i, (act_row, exp_row)) in actual.outer_iter().zip(expected.outer_iter()).enumerate() {
            if !act_row[0].abs_diff_eq(&exp_row[0], epsilon) {
                let diff = act_row[0] - exp_row[0];
                result.push_str(&format!("[{i:3}] - {:>12.6}  (expected)\n", exp_row[0]));
                result.push_str(&format!(
                    "      + {:>12.6}  (actual, Δ={diff:+.2e})\n",
                    act_row[0]
                ));
            }
        }
    } else {
        // Show the entire row if any column differs
        for (i, (act_row, exp_row)) in actual.outer_iter().zip(expected.outer_iter()).enumerate() {
            let row_differs = act_row
                .iter()
                .zip(exp_row.iter())
                .any(|(a, e)| !a.abs_diff_eq(e, epsilon));

            if row_differs {
                result.push_str(&format!("[{i:3}] -"));
                for &val in exp_row {
                    result.push_str(&format!(" {val:>12.6}"));
                }
                result.push_str("  (expected)\n");

                result.push_str("      +");
                for &val in act_row {
                    result.push_str(&format!(" {val:>12.6}"));
                }
                result.push_str("  (actual)\n");

                result.push_str("      Δ");
                for (a, e) in act_row.iter().zip(exp_row.iter()) {
                    let delta = a - e;
                    if !a.abs_diff_eq(e, epsilon) {
                        result.push_str(&format!(" {delta:>+12.2e}"));
                    } else {
                        result.push_str(&format!(" {:>12}", "-"));
                    }
                }
                result.push('\n');
            }
        }
    }

    result
}

/// Assert that two feature matrices are approximately equal.
///
/// Uses the `approx` crate's `AbsDiffEq` trait for comparison.
/// On failure, shows a git-style diff of differing rows.
///
/// # Panics
///
/// Panics if shapes differ or if any value differs by more than the default tolerance.
pub fn assert_features_eq(
    actual: ArrayView2<'_, f64>,
    expected: ArrayView2<'_, f64>,
    context: &str,
) {
    assert_features_eq_eps(actual, expected, DEFAULT_TOLERANCE, context);
}

/// Assert that two feature matrices are approximately equal with custom epsilon.
///
/// # Panics
///
/// Panics if shapes differ or if any value differs by more than epsilon.
pub fn assert_features_eq_eps(
    actual: ArrayView2<'_, f64>,
    expected: ArrayView2<'_, f64>,
    epsilon: f64,
    context: &str,
) {
    // Check shape first
    if actual.dim() != expected.dim() {
        panic!(
            "\n{context}: shape mismatch\n- {:?}  (expected)\n+ {:?}  (actual)\n",
            expected.dim(),
            actual.dim()
        );
    }

    let diff_count = actual
        .iter()
        .zip(expected.iter())
        .filter(|(a, e)| !a.abs_diff_eq(e, epsilon))
        .count();

    if diff_count > 0 {
        let total = actual.len();
        let diff_output = diff_features(actual, expected, epsilon);

        panic!("\n{context}: {diff_count}/{total} values differ\n\n{diff_output}");
    }
}
