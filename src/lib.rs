//! boundplot: decision boundary plots for two-feature classifiers.
//!
//! Renders the classic logistic-regression exercise figure: a labeled
//! 2-class scatter with the classifier's decision boundary drawn over it,
//! either as a straight line or as the zero contour of a polynomial score
//! surface. The polynomial feature expansion behind the contour is exposed
//! on its own for building design matrices.
//!
//! # Key Types
//!
//! - [`PolynomialMapping`] - Two-feature polynomial expansion
//! - [`BoundaryPlotConfig`] - Rendering options with a validating builder
//! - [`ScatterPlot`] / [`ClassMarkers`] - Scatter rendering capability
//! - [`BoundaryGrid`] / [`LineBoundary`] - Boundary geometry without a canvas
//!
//! # Rendering
//!
//! Use `BoundaryPlotConfig::builder()` to configure, then
//! [`plot_decision_boundary`] with any `plotters` drawing area.
//! See the [`plot`] module for details.
//!
//! # Feature Expansion
//!
//! Use [`PolynomialMapping`] to expand two raw features into the polynomial
//! basis a trained parameter vector expects.
//! See the [`mapping`] module for details.

// Re-export approx traits for users who want to compare mapped features
pub use approx;

pub mod boundary;
pub mod mapping;
pub mod plot;
pub mod testing;

// =============================================================================
// Convenience Re-exports
// =============================================================================

// Feature expansion types
pub use mapping::{DEFAULT_DEGREE, LengthPolicy, MappingError, PolynomialMapping};

// Boundary geometry types
pub use boundary::{BoundaryError, BoundaryGrid, GridCell, LineBoundary, line_boundary};

// Rendering types (most users want these)
pub use plot::{
    BoundaryPlotConfig, Chart2D, ClassMarkers, ConfigError, PlotError, ScatterPlot,
    plot_decision_boundary,
};
