//! Decision boundary rendering on top of `plotters`.
//!
//! [`plot_decision_boundary`] draws the labeled 2-class scatter (delegated to
//! a [`ScatterPlot`] capability, [`ClassMarkers`] by default) and overlays
//! the boundary a parameter vector describes: a straight line when the
//! design matrix holds only the bias and the two raw features, a zero-level
//! contour between two shaded regions when it holds a polynomial expansion.
//!
//! All drawing goes through the [`DrawingArea`] the caller passes in; the
//! renderer keeps no canvas state of its own.

use bon::Builder;
use ndarray::{ArrayView1, ArrayView2, s};
use plotters::chart::SeriesLabelPosition;
use plotters::coord::Shift;
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;

use crate::boundary::{
    BoundaryError, BoundaryGrid, DEFAULT_GRID_RANGE, DEFAULT_GRID_RESOLUTION, line_boundary,
};
use crate::mapping::PolynomialMapping;

// Boundary overlay palette: css darkgrey stroke, two grey fill tones.
const CONTOUR_COLOR: RGBColor = RGBColor(169, 169, 169);
const FILL_BELOW: RGBColor = RGBColor(217, 217, 217);
const FILL_ABOVE: RGBColor = RGBColor(99, 99, 99);
const FILL_ALPHA: f64 = 0.4;

fn boundary_stroke() -> ShapeStyle {
    CONTOUR_COLOR.stroke_width(2)
}

// =============================================================================
// Errors
// =============================================================================

/// Errors from [`BoundaryPlotConfig`] validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// The named axis limits do not satisfy `lo < hi`.
    #[error("{axis} axis limits must satisfy lo < hi, got ({lo}, {hi})")]
    InvalidAxisLimits {
        axis: &'static str,
        lo: f64,
        hi: f64,
    },
    /// The shared grid range does not satisfy `lo < hi`.
    #[error("grid range must satisfy lo < hi, got ({lo}, {hi})")]
    InvalidGridRange { lo: f64, hi: f64 },
    /// The grid resolution allows fewer than two samples per axis.
    #[error("grid resolution must be at least 2, got {0}")]
    InvalidGridResolution(usize),
    /// The line margin is negative or not finite.
    #[error("line margin must be finite and >= 0, got {0}")]
    InvalidLineMargin(f64),
}

/// Errors from [`plot_decision_boundary`].
#[derive(Debug, thiserror::Error)]
pub enum PlotError<E: std::error::Error + Send + Sync + 'static> {
    /// The design matrix is missing the bias or a raw feature column.
    #[error("design matrix must have a bias column and two feature columns, got {0} columns")]
    DesignMatrixTooNarrow(usize),
    #[error("design matrix has no rows")]
    EmptyDesignMatrix,
    #[error("labels must pair with design matrix rows, got {n_labels} labels for {n_samples} rows")]
    LabelLengthMismatch { n_samples: usize, n_labels: usize },
    #[error(transparent)]
    Boundary(#[from] BoundaryError),
    /// The backend rejected a drawing primitive.
    #[error("drawing failed: {0}")]
    Draw(#[from] DrawingAreaErrorKind<E>),
}

// =============================================================================
// Configuration
// =============================================================================

/// Rendering options for [`plot_decision_boundary`].
///
/// The defaults reproduce the admission-exam exercise figures: [30, 100]
/// axis limits in the linear branch, a 50×50 evaluation grid over [−1, 1.5]
/// in the polynomial branch.
///
/// # Example
///
/// ```
/// use boundplot::BoundaryPlotConfig;
///
/// let config = BoundaryPlotConfig::builder()
///     .grid_resolution(80)
///     .boundary_label("p = 0.5")
///     .build()
///     .unwrap();
/// assert_eq!(config.x_limits, (30.0, 100.0));
/// ```
#[derive(Debug, Clone, Builder)]
#[builder(
    derive(Clone, Debug),
    finish_fn(vis = "", name = __build_internal)
)]
pub struct BoundaryPlotConfig {
    /// Horizontal axis limits for the linear branch.
    #[builder(default = (30.0, 100.0))]
    pub x_limits: (f64, f64),

    /// Vertical axis limits for the linear branch.
    #[builder(default = (30.0, 100.0))]
    pub y_limits: (f64, f64),

    /// Widening applied to the observed feature extent before drawing the
    /// straight boundary.
    #[builder(default = 2.0)]
    pub line_margin: f64,

    /// Range shared by both axes of the polynomial evaluation grid. The
    /// polynomial chart spans this range too, since it is the contour's
    /// extent.
    #[builder(default = DEFAULT_GRID_RANGE)]
    pub grid_range: (f64, f64),

    /// Samples per axis of the polynomial evaluation grid.
    #[builder(default = DEFAULT_GRID_RESOLUTION)]
    pub grid_resolution: usize,

    /// Legend entry for the boundary series.
    #[builder(default = String::from("Decision boundary"), into)]
    pub boundary_label: String,
}

/// Custom finishing function that validates the config.
impl<S: boundary_plot_config_builder::IsComplete> BoundaryPlotConfigBuilder<S> {
    /// Build and validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when axis limits or the grid range are empty,
    /// the grid resolution is below 2, or the line margin is negative.
    pub fn build(self) -> Result<BoundaryPlotConfig, ConfigError> {
        let config = self.__build_internal();
        config.validate()?;
        Ok(config)
    }
}

impl BoundaryPlotConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        for (axis, limits) in [("x", self.x_limits), ("y", self.y_limits)] {
            if !(limits.0 < limits.1) {
                return Err(ConfigError::InvalidAxisLimits {
                    axis,
                    lo: limits.0,
                    hi: limits.1,
                });
            }
        }
        if !(self.grid_range.0 < self.grid_range.1) {
            return Err(ConfigError::InvalidGridRange {
                lo: self.grid_range.0,
                hi: self.grid_range.1,
            });
        }
        if self.grid_resolution < 2 {
            return Err(ConfigError::InvalidGridResolution(self.grid_resolution));
        }
        if !self.line_margin.is_finite() || self.line_margin < 0.0 {
            return Err(ConfigError::InvalidLineMargin(self.line_margin));
        }
        Ok(())
    }
}

impl Default for BoundaryPlotConfig {
    fn default() -> Self {
        Self::builder().build().expect("default config is valid")
    }
}

// =============================================================================
// Scatter Capability
// =============================================================================

/// Chart context with `f64` data coordinates on both axes.
pub type Chart2D<'a, DB> = ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

/// Capability that renders the labeled 2-class scatter.
///
/// [`plot_decision_boundary`] calls this exactly once per render, passing
/// the two raw feature columns and the label vector. Implementations should
/// label the series they draw if they want legend entries; the renderer adds
/// the boundary entry and draws the combined legend afterwards.
pub trait ScatterPlot<DB: DrawingBackend> {
    /// Draw the scatter of `points` (one `(x, y)` row per sample) split by
    /// `labels` into the chart.
    fn draw(
        &mut self,
        chart: &mut Chart2D<'_, DB>,
        points: ArrayView2<'_, f64>,
        labels: ArrayView1<'_, f64>,
    ) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>>;
}

/// Built-in scatter capability: positives as crosses, negatives as filled
/// circles, both labeled for the legend.
///
/// Labels above 0.5 count as the positive class.
#[derive(Clone, Debug)]
pub struct ClassMarkers {
    /// Legend entry for the positive class.
    pub positive_label: String,
    /// Legend entry for the negative class.
    pub negative_label: String,
    /// Stroke color of the positive-class crosses.
    pub positive_color: RGBColor,
    /// Fill color of the negative-class circles.
    pub negative_color: RGBColor,
    /// Marker size in backend pixels.
    pub marker_size: i32,
}

impl Default for ClassMarkers {
    fn default() -> Self {
        Self {
            positive_label: "Accepted".into(),
            negative_label: "Not accepted".into(),
            positive_color: BLACK,
            // goldenrod
            negative_color: RGBColor(218, 165, 32),
            marker_size: 4,
        }
    }
}

impl<DB: DrawingBackend> ScatterPlot<DB> for ClassMarkers {
    fn draw(
        &mut self,
        chart: &mut Chart2D<'_, DB>,
        points: ArrayView2<'_, f64>,
        labels: ArrayView1<'_, f64>,
    ) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
        let class_points = |wanted: bool| {
            points
                .outer_iter()
                .zip(labels.iter())
                .filter(move |&(_, &label)| (label > 0.5) == wanted)
                .map(|(row, _)| (row[0], row[1]))
                .collect::<Vec<_>>()
        };

        let positive_color = self.positive_color;
        let size = self.marker_size;
        chart
            .draw_series(
                class_points(true)
                    .into_iter()
                    .map(|xy| Cross::new(xy, size, positive_color.stroke_width(1))),
            )?
            .label(self.positive_label.as_str())
            .legend(move |(x, y)| Cross::new((x + 10, y), 4, positive_color.stroke_width(1)));

        let negative_color = self.negative_color;
        chart
            .draw_series(
                class_points(false)
                    .into_iter()
                    .map(|xy| Circle::new(xy, size, negative_color.filled())),
            )?
            .label(self.negative_label.as_str())
            .legend(move |(x, y)| Circle::new((x + 10, y), 4, negative_color.filled()));

        Ok(())
    }
}

// =============================================================================
// Renderer
// =============================================================================

/// Render the labeled scatter and its decision boundary onto `area`.
///
/// The scatter capability receives columns 1 and 2 of `x` (the raw features;
/// column 0 is the bias) together with `y`. With exactly three design
/// columns the boundary is the straight line `theta` describes over the
/// observed feature extent; with more columns the degree is recovered from
/// `theta`'s length, the score field is sampled on the configured grid, and
/// the boundary is drawn as a zero contour between two shaded regions. The
/// area is presented before returning.
///
/// # Errors
///
/// Shape problems surface as [`PlotError`] variants before anything is
/// drawn; backend failures surface as [`PlotError::Draw`].
///
/// # Example
///
/// ```
/// use boundplot::{BoundaryPlotConfig, ClassMarkers, plot_decision_boundary};
/// use ndarray::array;
/// use plotters::prelude::*;
///
/// let x = array![
///     [1.0, 34.6, 78.0],
///     [1.0, 60.2, 86.3],
///     [1.0, 79.0, 75.3],
///     [1.0, 45.1, 56.3],
/// ];
/// let y = array![0.0, 1.0, 1.0, 0.0];
/// let theta = array![-25.16, 0.206, 0.201];
///
/// let mut svg = String::new();
/// {
///     let area = SVGBackend::with_string(&mut svg, (640, 480)).into_drawing_area();
///     area.fill(&WHITE).unwrap();
///     plot_decision_boundary(
///         &area,
///         &mut ClassMarkers::default(),
///         theta.view(),
///         x.view(),
///         y.view(),
///         &BoundaryPlotConfig::default(),
///     )
///     .unwrap();
/// }
/// assert!(svg.contains("Decision boundary"));
/// ```
pub fn plot_decision_boundary<DB, S>(
    area: &DrawingArea<DB, Shift>,
    scatter: &mut S,
    theta: ArrayView1<'_, f64>,
    x: ArrayView2<'_, f64>,
    y: ArrayView1<'_, f64>,
    config: &BoundaryPlotConfig,
) -> Result<(), PlotError<DB::ErrorType>>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
    S: ScatterPlot<DB> + ?Sized,
{
    if x.ncols() < 3 {
        return Err(PlotError::DesignMatrixTooNarrow(x.ncols()));
    }
    if x.nrows() == 0 {
        return Err(PlotError::EmptyDesignMatrix);
    }
    if y.len() != x.nrows() {
        return Err(PlotError::LabelLengthMismatch {
            n_samples: x.nrows(),
            n_labels: y.len(),
        });
    }

    let points = x.slice(s![.., 1..3]);

    if x.ncols() == 3 {
        draw_linear(area, scatter, theta, points, y, config)
    } else {
        draw_polynomial(area, scatter, theta, points, y, config)
    }
}

fn draw_linear<DB, S>(
    area: &DrawingArea<DB, Shift>,
    scatter: &mut S,
    theta: ArrayView1<'_, f64>,
    points: ArrayView2<'_, f64>,
    y: ArrayView1<'_, f64>,
    config: &BoundaryPlotConfig,
) -> Result<(), PlotError<DB::ErrorType>>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
    S: ScatterPlot<DB> + ?Sized,
{
    let (x_min, x_max) = column_extent(points.column(0));
    let line = line_boundary(theta, x_min, x_max, config.line_margin)?;

    let mut chart = ChartBuilder::on(area)
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(30)
        .build_cartesian_2d(
            config.x_limits.0..config.x_limits.1,
            config.y_limits.0..config.y_limits.1,
        )?;
    chart.configure_mesh().draw()?;

    scatter.draw(&mut chart, points, y)?;

    chart
        .draw_series(LineSeries::new(
            [(line.x[0], line.y[0]), (line.x[1], line.y[1])],
            boundary_stroke(),
        ))?
        .label(config.boundary_label.as_str())
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], boundary_stroke()));

    draw_legend(&mut chart)?;
    area.present()?;
    Ok(())
}

fn draw_polynomial<DB, S>(
    area: &DrawingArea<DB, Shift>,
    scatter: &mut S,
    theta: ArrayView1<'_, f64>,
    points: ArrayView2<'_, f64>,
    y: ArrayView1<'_, f64>,
    config: &BoundaryPlotConfig,
) -> Result<(), PlotError<DB::ErrorType>>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
    S: ScatterPlot<DB> + ?Sized,
{
    let mapping = PolynomialMapping::from_feature_count(theta.len()).map_err(BoundaryError::from)?;
    let grid = BoundaryGrid::evaluate(&mapping, theta, config.grid_range, config.grid_resolution)?;

    let (lo, hi) = config.grid_range;
    let mut chart = ChartBuilder::on(area)
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(30)
        .build_cartesian_2d(lo..hi, lo..hi)?;
    chart.configure_mesh().draw()?;

    scatter.draw(&mut chart, points, y)?;

    chart
        .draw_series(
            grid.zero_contour()
                .into_iter()
                .map(|segment| PathElement::new(segment.to_vec(), boundary_stroke())),
        )?
        .label(config.boundary_label.as_str())
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], boundary_stroke()));

    chart.draw_series(grid.cells().into_iter().map(|cell| {
        let tone = if cell.positive { FILL_ABOVE } else { FILL_BELOW };
        Rectangle::new(
            [(cell.u.0, cell.v.0), (cell.u.1, cell.v.1)],
            tone.mix(FILL_ALPHA).filled(),
        )
    }))?;

    draw_legend(&mut chart)?;
    area.present()?;
    Ok(())
}

fn draw_legend<'a, DB: DrawingBackend + 'a>(
    chart: &mut Chart2D<'a, DB>,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    Ok(())
}

fn column_extent(column: ArrayView1<'_, f64>) -> (f64, f64) {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for &value in column {
        lo = lo.min(value);
        hi = hi.max(value);
    }
    (lo, hi)
}
