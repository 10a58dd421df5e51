//! Decision boundary geometry, independent of any drawing backend.
//!
//! The linear branch of the boundary reduces to two line endpoints
//! ([`line_boundary`]). The polynomial branch is a score field sampled on a
//! uniform grid ([`BoundaryGrid`]), from which the zero level set is
//! extracted as line segments and the two sides as shading cells. Everything
//! here returns plain data so the numeric contracts are testable without a
//! rendering backend.

use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

use crate::mapping::{MappingError, PolynomialMapping};

// =============================================================================
// Errors
// =============================================================================

/// Errors produced while computing boundary geometry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoundaryError {
    /// theta cannot be paired with the feature space it is scored against.
    #[error("theta must have {expected} coefficients for this feature space, got {actual}")]
    ThetaLengthMismatch { expected: usize, actual: usize },
    /// theta[2] is zero, so the boundary has no height as a function of the
    /// first feature.
    #[error("theta[2] is zero; the decision boundary cannot be drawn as y over x")]
    DegenerateLine,
    /// Fewer than two samples per axis cannot form grid cells.
    #[error("grid resolution must be at least 2, got {0}")]
    GridResolution(usize),
    #[error(transparent)]
    Mapping(#[from] MappingError),
}

// =============================================================================
// Straight Line Boundary
// =============================================================================

/// Endpoints of a straight decision boundary.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineBoundary {
    /// Horizontal endpoint coordinates.
    pub x: [f64; 2],
    /// Vertical endpoint coordinates, one per entry of `x`.
    pub y: [f64; 2],
}

impl LineBoundary {
    /// Slope of the segment.
    pub fn slope(&self) -> f64 {
        (self.y[1] - self.y[0]) / (self.x[1] - self.x[0])
    }

    /// Vertical intercept of the segment's supporting line.
    pub fn intercept(&self) -> f64 {
        self.y[0] - self.slope() * self.x[0]
    }
}

/// Compute the straight boundary of a three-coefficient theta over the
/// feature extent `[x_min, x_max]`, widened by `margin` on both sides.
///
/// The boundary is the zero set of `theta[0] + theta[1]·x + theta[2]·y`,
/// i.e. `y = -(theta[1]·x + theta[0]) / theta[2]`.
///
/// # Errors
///
/// [`BoundaryError::ThetaLengthMismatch`] unless `theta` has exactly three
/// coefficients, and [`BoundaryError::DegenerateLine`] when `theta[2]` is
/// zero (the division would otherwise produce infinite endpoints).
pub fn line_boundary(
    theta: ArrayView1<'_, f64>,
    x_min: f64,
    x_max: f64,
    margin: f64,
) -> Result<LineBoundary, BoundaryError> {
    if theta.len() != 3 {
        return Err(BoundaryError::ThetaLengthMismatch {
            expected: 3,
            actual: theta.len(),
        });
    }
    if theta[2] == 0.0 {
        return Err(BoundaryError::DegenerateLine);
    }
    let x = [x_min - margin, x_max + margin];
    let y = x.map(|xi| -(theta[1] * xi + theta[0]) / theta[2]);
    Ok(LineBoundary { x, y })
}

// =============================================================================
// Grid Evaluation
// =============================================================================

/// Default evaluation range shared by both grid axes.
pub const DEFAULT_GRID_RANGE: (f64, f64) = (-1.0, 1.5);

/// Default number of samples per grid axis.
pub const DEFAULT_GRID_RESOLUTION: usize = 50;

/// Classifier score field sampled on a uniform grid.
///
/// Scores are kept transposed relative to evaluation order: rows follow the
/// vertical axis `v` and columns follow the horizontal axis `u`, the
/// orientation contour extraction works in.
#[derive(Clone, Debug)]
pub struct BoundaryGrid {
    u: Array1<f64>,
    v: Array1<f64>,
    scores: Array2<f64>,
}

/// One cell of the evaluation grid, tagged with the side of the boundary its
/// corner mean falls on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridCell {
    /// Horizontal extent `(lo, hi)`.
    pub u: (f64, f64),
    /// Vertical extent `(lo, hi)`.
    pub v: (f64, f64),
    /// Whether the corner mean scores strictly above zero.
    pub positive: bool,
}

impl BoundaryGrid {
    /// Sample `dot(mapping(u_i, v_j), theta)` on a `resolution × resolution`
    /// grid with both axes spanning `range`.
    ///
    /// # Errors
    ///
    /// [`BoundaryError::GridResolution`] for resolutions below 2 and
    /// [`BoundaryError::ThetaLengthMismatch`] when theta's length differs
    /// from the mapping's output width.
    pub fn evaluate(
        mapping: &PolynomialMapping,
        theta: ArrayView1<'_, f64>,
        range: (f64, f64),
        resolution: usize,
    ) -> Result<Self, BoundaryError> {
        if resolution < 2 {
            return Err(BoundaryError::GridResolution(resolution));
        }
        let expected = mapping.n_output_features();
        if theta.len() != expected {
            return Err(BoundaryError::ThetaLengthMismatch {
                expected,
                actual: theta.len(),
            });
        }

        let u = Array1::linspace(range.0, range.1, resolution);
        let v = Array1::linspace(range.0, range.1, resolution);
        let mut scores = Array2::zeros((resolution, resolution));
        for (i, &ui) in u.iter().enumerate() {
            for (j, &vj) in v.iter().enumerate() {
                scores[[i, j]] = mapping.map_point(ui, vj).dot(&theta);
            }
        }
        // Rows follow v from here on.
        let scores = scores.reversed_axes();

        Ok(Self { u, v, scores })
    }

    /// Horizontal sample coordinates.
    #[inline]
    pub fn u(&self) -> ArrayView1<'_, f64> {
        self.u.view()
    }

    /// Vertical sample coordinates.
    #[inline]
    pub fn v(&self) -> ArrayView1<'_, f64> {
        self.v.view()
    }

    /// Transposed score field, shape `[v.len(), u.len()]`.
    #[inline]
    pub fn scores(&self) -> ArrayView2<'_, f64> {
        self.scores.view()
    }

    /// Line segments of the zero level set, in data coordinates.
    ///
    /// Classic marching squares: each cell contributes zero, one, or two
    /// segments depending on which corners score positive. Crossing points
    /// are linearly interpolated along cell edges, and saddle cells are
    /// disambiguated by the corner mean. A score of exactly 0 counts as the
    /// non-positive side.
    pub fn zero_contour(&self) -> Vec<[(f64, f64); 2]> {
        let mut segments = Vec::new();
        for j in 0..self.v.len() - 1 {
            for i in 0..self.u.len() - 1 {
                self.cell_segments(i, j, &mut segments);
            }
        }
        segments
    }

    /// Shading cells for the filled two-sided contour, row by row.
    pub fn cells(&self) -> Vec<GridCell> {
        let mut cells = Vec::with_capacity((self.u.len() - 1) * (self.v.len() - 1));
        for j in 0..self.v.len() - 1 {
            for i in 0..self.u.len() - 1 {
                let mean = (self.scores[[j, i]]
                    + self.scores[[j, i + 1]]
                    + self.scores[[j + 1, i + 1]]
                    + self.scores[[j + 1, i]])
                    / 4.0;
                cells.push(GridCell {
                    u: (self.u[i], self.u[i + 1]),
                    v: (self.v[j], self.v[j + 1]),
                    positive: mean > 0.0,
                });
            }
        }
        cells
    }

    fn cell_segments(&self, i: usize, j: usize, out: &mut Vec<[(f64, f64); 2]>) {
        let (u0, u1) = (self.u[i], self.u[i + 1]);
        let (v0, v1) = (self.v[j], self.v[j + 1]);
        // Corner scores, named by position within the cell.
        let bl = self.scores[[j, i]];
        let br = self.scores[[j, i + 1]];
        let tr = self.scores[[j + 1, i + 1]];
        let tl = self.scores[[j + 1, i]];

        let bottom = || crossing((u0, v0), bl, (u1, v0), br);
        let right = || crossing((u1, v0), br, (u1, v1), tr);
        let top = || crossing((u0, v1), tl, (u1, v1), tr);
        let left = || crossing((u0, v0), bl, (u0, v1), tl);

        let case = usize::from(bl > 0.0)
            | usize::from(br > 0.0) << 1
            | usize::from(tr > 0.0) << 2
            | usize::from(tl > 0.0) << 3;

        match case {
            0 | 15 => {}
            1 | 14 => out.push([bottom(), left()]),
            2 | 13 => out.push([bottom(), right()]),
            3 | 12 => out.push([left(), right()]),
            4 | 11 => out.push([right(), top()]),
            6 | 9 => out.push([bottom(), top()]),
            7 | 8 => out.push([top(), left()]),
            5 | 10 => {
                // Saddle: the corner mean decides which diagonal the
                // positive region takes.
                let center_positive = (bl + br + tr + tl) / 4.0 > 0.0;
                let positive_on_bl = case == 5;
                if center_positive == positive_on_bl {
                    out.push([left(), top()]);
                    out.push([bottom(), right()]);
                } else {
                    out.push([bottom(), left()]);
                    out.push([right(), top()]);
                }
            }
            _ => unreachable!("marching squares case index is 4 bits"),
        }
    }
}

/// Linearly interpolated zero crossing between two corners whose scores fall
/// on opposite sides of zero.
fn crossing(a: (f64, f64), za: f64, b: (f64, f64), zb: f64) -> (f64, f64) {
    let t = za / (za - zb);
    (a.0 + t * (b.0 - a.0), a.1 + t * (b.1 - a.1))
}
