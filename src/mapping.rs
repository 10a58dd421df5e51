//! Polynomial feature expansion for a two-feature classifier.
//!
//! [`PolynomialMapping`] turns a raw feature pair into the monomial basis
//! {1, x1, x2, x1², x1·x2, x2², …} up to a total degree, which lets a linear
//! classifier fit nonlinear decision boundaries.
//!
//! # Example
//!
//! ```
//! use boundplot::PolynomialMapping;
//! use ndarray::array;
//!
//! let mapping = PolynomialMapping::new(2);
//! let expanded = mapping
//!     .map(array![1.0, 2.0].view(), array![3.0, 4.0].view())
//!     .unwrap();
//! assert_eq!(expanded.row(0).to_vec(), vec![1.0, 1.0, 3.0, 1.0, 3.0, 9.0]);
//! assert_eq!(expanded.row(1).to_vec(), vec![1.0, 2.0, 4.0, 4.0, 8.0, 16.0]);
//! ```

use ndarray::{Array1, Array2, ArrayView1};

// =============================================================================
// Errors
// =============================================================================

/// Errors produced by the feature mapping.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MappingError {
    /// The two inputs cannot be paired sample-by-sample.
    #[error("x1 and x2 must have equal length, got {left} and {right}")]
    LengthMismatch { left: usize, right: usize },
    /// No degree over two features produces the requested number of terms.
    #[error("no polynomial degree over two features produces {0} terms")]
    NoMatchingDegree(usize),
}

// =============================================================================
// Length Policy
// =============================================================================

/// How [`PolynomialMapping::map`] pairs inputs of different lengths.
///
/// Mismatched inputs are never handled silently: [`Strict`](Self::Strict)
/// rejects them, and [`BroadcastOne`](Self::BroadcastOne) only stretches a
/// length-1 input against the other input's length.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LengthPolicy {
    /// Reject any length mismatch. The default.
    #[default]
    Strict,
    /// Stretch a length-1 input to the other input's length; every other
    /// mismatch is still rejected.
    BroadcastOne,
}

// =============================================================================
// PolynomialMapping
// =============================================================================

/// Default total degree of the expansion.
pub const DEFAULT_DEGREE: u32 = 6;

/// Polynomial feature mapping over a feature pair.
///
/// Output columns are ordered by total degree: after the leading ones column,
/// for i in 1..=degree and j in 0..=i the column x1^(i-j) · x2^j follows.
/// The column count is (degree + 1)(degree + 2) / 2.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PolynomialMapping {
    /// Total degree of the expansion. Degree 0 produces only the ones column.
    pub degree: u32,
    /// Length handling for the vector entry point.
    pub length_policy: LengthPolicy,
}

impl Default for PolynomialMapping {
    fn default() -> Self {
        Self::new(DEFAULT_DEGREE)
    }
}

impl PolynomialMapping {
    /// Create a mapping of the given total degree with the strict length policy.
    pub fn new(degree: u32) -> Self {
        Self {
            degree,
            length_policy: LengthPolicy::Strict,
        }
    }

    /// Replace the length policy.
    pub fn with_length_policy(mut self, policy: LengthPolicy) -> Self {
        self.length_policy = policy;
        self
    }

    /// Recover the mapping whose output width is exactly `n_features`.
    ///
    /// This is how a parameter vector's length is turned back into a degree:
    /// a vector trained against a degree-6 expansion has 28 coefficients, so
    /// `from_feature_count(28)` yields the degree-6 mapping.
    ///
    /// # Errors
    ///
    /// [`MappingError::NoMatchingDegree`] when `n_features` is not a width
    /// any degree produces, so a mismatched parameter vector fails here
    /// instead of scoring the wrong feature space.
    pub fn from_feature_count(n_features: usize) -> Result<Self, MappingError> {
        let mut degree = 0u32;
        loop {
            let width = Self::new(degree).n_output_features();
            if width == n_features {
                return Ok(Self::new(degree));
            }
            if width > n_features {
                return Err(MappingError::NoMatchingDegree(n_features));
            }
            degree += 1;
        }
    }

    /// Number of output columns: (degree + 1)(degree + 2) / 2.
    #[inline]
    pub fn n_output_features(&self) -> usize {
        let d = self.degree as usize;
        (d + 1) * (d + 2) / 2
    }

    /// Expand a single feature pair into a flat vector of length
    /// [`n_output_features`](Self::n_output_features).
    ///
    /// The first element is always 1. `f64::powi` defines 0^0 as 1, so zero
    /// inputs keep the bias term intact and only the higher-order terms
    /// vanish.
    pub fn map_point(&self, x1: f64, x2: f64) -> Array1<f64> {
        let mut out = Array1::ones(self.n_output_features());
        let mut col = 1;
        for i in 1..=self.degree {
            for j in 0..=i {
                out[col] = x1.powi((i - j) as i32) * x2.powi(j as i32);
                col += 1;
            }
        }
        out
    }

    /// Expand paired feature vectors into an `m × n_output_features` matrix.
    ///
    /// Row k is the expansion of `(x1[k], x2[k])`; the first column is all
    /// ones. Input lengths are resolved by the mapping's [`LengthPolicy`].
    ///
    /// # Errors
    ///
    /// [`MappingError::LengthMismatch`] when the lengths cannot be paired
    /// under the configured policy.
    pub fn map(
        &self,
        x1: ArrayView1<'_, f64>,
        x2: ArrayView1<'_, f64>,
    ) -> Result<Array2<f64>, MappingError> {
        let n_samples = self.paired_len(x1.len(), x2.len())?;
        let mut out = Array2::ones((n_samples, self.n_output_features()));
        for row in 0..n_samples {
            let a = if x1.len() == 1 { x1[0] } else { x1[row] };
            let b = if x2.len() == 1 { x2[0] } else { x2[row] };
            let mut col = 1;
            for i in 1..=self.degree {
                for j in 0..=i {
                    out[[row, col]] = a.powi((i - j) as i32) * b.powi(j as i32);
                    col += 1;
                }
            }
        }
        Ok(out)
    }

    fn paired_len(&self, left: usize, right: usize) -> Result<usize, MappingError> {
        if left == right {
            return Ok(left);
        }
        match self.length_policy {
            LengthPolicy::Strict => Err(MappingError::LengthMismatch { left, right }),
            LengthPolicy::BroadcastOne if left == 1 => Ok(right),
            LengthPolicy::BroadcastOne if right == 1 => Ok(left),
            LengthPolicy::BroadcastOne => Err(MappingError::LengthMismatch { left, right }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_output_width_matches_formula() {
        for degree in 0..10u32 {
            let mapping = PolynomialMapping::new(degree);
            let d = degree as usize;
            assert_eq!(mapping.n_output_features(), (d + 1) * (d + 2) / 2);
        }
    }

    #[test]
    fn test_degree_zero_is_bias_only() {
        let expanded = PolynomialMapping::new(0).map_point(3.0, -2.0);
        assert_eq!(expanded.to_vec(), vec![1.0]);
    }

    #[test]
    fn test_map_point_degree_two_column_order() {
        let expanded = PolynomialMapping::new(2).map_point(2.0, 3.0);
        // 1, x1, x2, x1^2, x1*x2, x2^2
        assert_eq!(expanded.to_vec(), vec![1.0, 2.0, 3.0, 4.0, 6.0, 9.0]);
    }

    #[test]
    fn test_zeros_keep_only_the_bias() {
        let expanded = PolynomialMapping::new(4).map_point(0.0, 0.0);
        assert_eq!(expanded[0], 1.0);
        assert!(expanded.iter().skip(1).all(|&v| v == 0.0));
    }

    #[test]
    fn test_map_matches_map_point_per_row() {
        let mapping = PolynomialMapping::new(3);
        let x1 = array![0.5, -1.25, 2.0];
        let x2 = array![1.5, 0.25, -0.75];
        let expanded = mapping.map(x1.view(), x2.view()).unwrap();
        for row in 0..3 {
            let point = mapping.map_point(x1[row], x2[row]);
            assert_eq!(expanded.row(row).to_vec(), point.to_vec());
        }
    }

    #[test]
    fn test_empty_inputs_produce_empty_matrix() {
        let mapping = PolynomialMapping::new(2);
        let empty = Array1::<f64>::zeros(0);
        let expanded = mapping.map(empty.view(), empty.view()).unwrap();
        assert_eq!(expanded.shape(), &[0, 6]);
    }

    #[test]
    fn test_strict_policy_rejects_mismatch() {
        let err = PolynomialMapping::new(2)
            .map(array![1.0].view(), array![1.0, 2.0].view())
            .unwrap_err();
        assert_eq!(err, MappingError::LengthMismatch { left: 1, right: 2 });
    }

    #[test]
    fn test_broadcast_one_stretches_either_side() {
        let mapping = PolynomialMapping::new(1).with_length_policy(LengthPolicy::BroadcastOne);

        let expanded = mapping.map(array![2.0].view(), array![5.0, 6.0].view()).unwrap();
        assert_eq!(expanded.column(1).to_vec(), vec![2.0, 2.0]);

        let expanded = mapping.map(array![5.0, 6.0].view(), array![2.0].view()).unwrap();
        assert_eq!(expanded.column(2).to_vec(), vec![2.0, 2.0]);
    }

    #[test]
    fn test_broadcast_one_rejects_general_mismatch() {
        let mapping = PolynomialMapping::new(1).with_length_policy(LengthPolicy::BroadcastOne);
        let err = mapping
            .map(array![1.0, 2.0].view(), array![1.0, 2.0, 3.0].view())
            .unwrap_err();
        assert_eq!(err, MappingError::LengthMismatch { left: 2, right: 3 });
    }

    #[test]
    fn test_from_feature_count_inverts_the_width() {
        for degree in 0..8u32 {
            let width = PolynomialMapping::new(degree).n_output_features();
            let recovered = PolynomialMapping::from_feature_count(width).unwrap();
            assert_eq!(recovered.degree, degree);
        }
    }

    #[test]
    fn test_from_feature_count_rejects_non_triangular_widths() {
        for n in [0usize, 2, 4, 5, 7, 29] {
            let err = PolynomialMapping::from_feature_count(n).unwrap_err();
            assert_eq!(err, MappingError::NoMatchingDegree(n));
        }
    }
}
