//! Boundary geometry tests.
//!
//! Tests for canvas-free boundary computation including:
//! - Straight lines from three-coefficient parameter vectors
//! - Score grids and their transposed orientation
//! - Zero contour extraction on a known circle
//! - Shape validation for theta and the grid

use approx::assert_abs_diff_eq;
use boundplot::assert_approx_eq;
use boundplot::boundary::{DEFAULT_GRID_RANGE, DEFAULT_GRID_RESOLUTION};
use boundplot::{BoundaryError, BoundaryGrid, PolynomialMapping, line_boundary};
use ndarray::{Array1, array};
use rstest::rstest;

// =============================================================================
// Straight Line Tests
// =============================================================================

#[test]
fn unit_theta_gives_slope_one_intercept_minus_one() {
    // theta = [1, -1, 1] means y = -(-x + 1) / 1 = x - 1.
    let line = line_boundary(array![1.0, -1.0, 1.0].view(), 40.0, 80.0, 2.0).unwrap();

    assert_eq!(line.x, [38.0, 82.0]);
    assert_abs_diff_eq!(line.slope(), 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(line.intercept(), -1.0, epsilon = 1e-9);
}

/// Both endpoints score exactly zero under theta, so they sit on the boundary.
#[test]
fn endpoints_satisfy_the_line_equation() {
    let theta = array![-25.16, 0.206, 0.201];
    let line = line_boundary(theta.view(), 30.0, 100.0, 2.0).unwrap();

    assert_eq!(line.x, [28.0, 102.0]);
    for k in 0..2 {
        let score = theta[0] + theta[1] * line.x[k] + theta[2] * line.y[k];
        assert_approx_eq!(score, 0.0, 1e-9, "endpoint {k}");
    }
}

#[test]
fn vertical_boundary_is_rejected() {
    let err = line_boundary(array![1.0, 2.0, 0.0].view(), 30.0, 100.0, 2.0).unwrap_err();
    assert_eq!(err, BoundaryError::DegenerateLine);
}

#[test]
fn wrong_theta_length_is_rejected() {
    let err = line_boundary(array![1.0, 2.0].view(), 30.0, 100.0, 2.0).unwrap_err();
    assert_eq!(
        err,
        BoundaryError::ThetaLengthMismatch {
            expected: 3,
            actual: 2
        }
    );
}

// =============================================================================
// Score Grid Tests
// =============================================================================

#[test]
fn grid_has_default_shape_and_bounds() {
    let mapping = PolynomialMapping::default();
    let theta = Array1::<f64>::zeros(mapping.n_output_features());

    let grid = BoundaryGrid::evaluate(
        &mapping,
        theta.view(),
        DEFAULT_GRID_RANGE,
        DEFAULT_GRID_RESOLUTION,
    )
    .unwrap();

    assert_eq!(grid.u().len(), 50);
    assert_eq!(grid.v().len(), 50);
    assert_eq!(grid.scores().dim(), (50, 50));
    assert_abs_diff_eq!(grid.u()[0], -1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(grid.u()[49], 1.5, epsilon = 1e-9);
    assert_abs_diff_eq!(grid.v()[0], -1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(grid.v()[49], 1.5, epsilon = 1e-9);
}

/// The stored field is transposed: with score = x1, every row repeats the
/// horizontal axis.
#[test]
fn scores_are_transposed_rows_follow_v() {
    let theta = array![0.0, 1.0, 0.0, 0.0, 0.0, 0.0];
    let grid = BoundaryGrid::evaluate(&PolynomialMapping::new(2), theta.view(), (-1.0, 1.0), 5)
        .unwrap();

    let scores = grid.scores();
    let u = grid.u();
    for j in 0..5 {
        for i in 0..5 {
            assert_approx_eq!(scores[[j, i]], u[i], 1e-12, "row {j} col {i}");
        }
    }
}

#[test]
fn theta_length_is_validated() {
    let theta = Array1::<f64>::zeros(5);
    let err = BoundaryGrid::evaluate(&PolynomialMapping::new(2), theta.view(), (-1.0, 1.5), 50)
        .unwrap_err();

    assert_eq!(
        err,
        BoundaryError::ThetaLengthMismatch {
            expected: 6,
            actual: 5
        }
    );
}

#[rstest]
#[case(0)]
#[case(1)]
fn tiny_resolutions_are_rejected(#[case] resolution: usize) {
    let theta = Array1::<f64>::zeros(6);
    let err = BoundaryGrid::evaluate(
        &PolynomialMapping::new(2),
        theta.view(),
        (-1.0, 1.5),
        resolution,
    )
    .unwrap_err();

    assert_eq!(err, BoundaryError::GridResolution(resolution));
}

// =============================================================================
// Contour Tests
// =============================================================================

/// score = u^2 + v^2 - 0.5 over the degree-2 basis [1, u, v, u^2, uv, v^2].
fn circle_theta() -> Array1<f64> {
    array![-0.5, 0.0, 0.0, 1.0, 0.0, 1.0]
}

#[test]
fn contour_follows_the_circle() {
    let theta = circle_theta();
    let grid = BoundaryGrid::evaluate(&PolynomialMapping::new(2), theta.view(), (-1.0, 1.5), 50)
        .unwrap();

    let segments = grid.zero_contour();
    assert!(segments.len() > 50, "expected a dense contour, got {} segments", segments.len());

    let radius = 0.5f64.sqrt();
    for segment in &segments {
        for &(u, v) in segment {
            let r = (u * u + v * v).sqrt();
            assert_approx_eq!(r, radius, 0.05, "contour point ({u}, {v})");
        }
    }
}

#[test]
fn cells_split_by_score_sign() {
    let theta = circle_theta();
    let grid = BoundaryGrid::evaluate(&PolynomialMapping::new(2), theta.view(), (-1.0, 1.5), 50)
        .unwrap();

    let cells = grid.cells();
    assert_eq!(cells.len(), 49 * 49);

    let origin = cells
        .iter()
        .find(|cell| cell.u.0 <= 0.0 && 0.0 < cell.u.1 && cell.v.0 <= 0.0 && 0.0 < cell.v.1)
        .unwrap();
    assert!(!origin.positive, "inside the circle scores negative");

    let corner = cells.last().unwrap();
    assert!(corner.positive, "the far corner scores positive");
}
