//! Figure rendering via the plotters bitmap backend
//!
//! Each public function renders one complete figure to a PNG. The reference
//! layouts anchored annotation text at absolute data coordinates that only
//! suit the default readings; here anchors are derived from the evaluation
//! domain and the y-axis top so the figures stay legible for any sample set.

use crate::analysis::statistics::{SampleSummary, density_domain, round_to};
use crate::estimation::search::CandidateScore;
use crate::io::configuration::{
    AXIS_HEADROOM, CURVE_PADDING, DOMAIN_RESOLUTION, FINE_DOMAIN_RESOLUTION,
    POSTERIOR_DISPLAY_EXPONENT, POSTERIOR_FIGURE_PADDING, PRIOR_FIGURE_LIKELIHOOD_PADDING,
    PRIOR_FIGURE_PRIOR_PADDING, REFERENCE_LINE_FRACTION,
};
use crate::io::error::{EstimationError, Result};
use crate::math::probability::Normal;
use ndarray::Array1;
use plotters::chart::ChartContext;
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use std::error::Error;
use std::path::Path;

/// Pixel dimensions of a rendered figure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartDimensions {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

type DrawOutcome = std::result::Result<(), Box<dyn Error>>;
type FigureChart<'a, 'b> =
    ChartContext<'a, BitMapBackend<'b>, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

const SAMPLE_AXIS_LABEL: &str = "BG (mg/dl)";
const DENSITY_AXIS_LABEL: &str = "probability";
const ANNOTATION_FONT: (&str, u32) = ("sans-serif", 18);
/// Vertical gap between annotation rows as a fraction of the y-axis
const ANNOTATION_ROW_STEP: f64 = 0.07;
const SAMPLE_MARKER_SIZE: i32 = 4;
const SCATTER_MARKER_SIZE: i32 = 2;

/// Density curve with a reference line at the fitted mean and a
/// mean/standard-deviation annotation block
///
/// # Errors
///
/// Returns an error if the output directory cannot be created or the chart
/// backend fails.
pub fn render_fitted_curve(
    fit: &Normal,
    summary: &SampleSummary,
    path: &Path,
    dimensions: ChartDimensions,
) -> Result<()> {
    ensure_parent_dir(path)?;
    draw_fitted_curve(fit, summary, path, dimensions).map_err(|e| chart_error(path, e.as_ref()))
}

/// Density curve with a vertical line and marker at each observed sample
///
/// # Errors
///
/// Returns an error if the output directory cannot be created or the chart
/// backend fails.
pub fn render_sample_likelihood(
    fit: &Normal,
    summary: &SampleSummary,
    samples: &[f64],
    path: &Path,
    dimensions: ChartDimensions,
) -> Result<()> {
    ensure_parent_dir(path)?;
    draw_sample_likelihood(fit, summary, samples, path, dimensions)
        .map_err(|e| chart_error(path, e.as_ref()))
}

/// Scatter of likelihood scores over candidate means with the best candidate
/// marked and annotated
///
/// # Errors
///
/// Returns an error if the output directory cannot be created or the chart
/// backend fails.
pub fn render_likelihood_search(
    candidates: &[CandidateScore],
    best: CandidateScore,
    range: (f64, f64),
    path: &Path,
    dimensions: ChartDimensions,
) -> Result<()> {
    ensure_parent_dir(path)?;
    draw_likelihood_search(candidates, best, range, path, dimensions)
        .map_err(|e| chart_error(path, e.as_ref()))
}

/// Likelihood and prior density curves with labeled annotation blocks
///
/// # Errors
///
/// Returns an error if the output directory cannot be created or the chart
/// backend fails.
pub fn render_prior_likelihood(
    fit: &Normal,
    prior: &Normal,
    summary: &SampleSummary,
    path: &Path,
    dimensions: ChartDimensions,
) -> Result<()> {
    ensure_parent_dir(path)?;
    draw_prior_likelihood(fit, prior, summary, path, dimensions)
        .map_err(|e| chart_error(path, e.as_ref()))
}

/// Likelihood and prior curves, sample markers, and the flattened scatter of
/// posterior-like scores over candidate means
///
/// # Errors
///
/// Returns an error if the output directory cannot be created or the chart
/// backend fails.
pub fn render_posterior_search(
    fit: &Normal,
    prior: &Normal,
    summary: &SampleSummary,
    samples: &[f64],
    candidates: &[CandidateScore],
    best: CandidateScore,
    path: &Path,
    dimensions: ChartDimensions,
) -> Result<()> {
    ensure_parent_dir(path)?;
    draw_posterior_search(
        fit, prior, summary, samples, candidates, best, path, dimensions,
    )
    .map_err(|e| chart_error(path, e.as_ref()))
}

fn draw_fitted_curve(
    fit: &Normal,
    summary: &SampleSummary,
    path: &Path,
    dimensions: ChartDimensions,
) -> DrawOutcome {
    let lo = summary.min - CURVE_PADDING.0;
    let hi = summary.max + CURVE_PADDING.1;
    let domain = density_domain(lo, hi, DOMAIN_RESOLUTION);
    let y_top = fit.peak_density() * AXIS_HEADROOM;

    let root = BitMapBackend::new(path, (dimensions.width, dimensions.height)).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = figure_chart(&root, lo..hi, y_top, DENSITY_AXIS_LABEL)?;

    chart.draw_series(LineSeries::new(density_points(fit, &domain), &BLUE))?;
    chart.draw_series(std::iter::once(reference_line(
        round_to(fit.mean(), 2),
        y_top * REFERENCE_LINE_FRACTION,
    )))?;

    annotation_block(
        &mut chart,
        fraction_between(lo, hi, 0.02),
        y_top,
        0.89,
        &[
            (format!("mean = {}", round_to(summary.mean, 2)), BLUE),
            (format!("sd = {}", round_to(summary.std_dev, 2)), BLUE),
        ],
    )?;

    root.present()?;
    Ok(())
}

fn draw_sample_likelihood(
    fit: &Normal,
    summary: &SampleSummary,
    samples: &[f64],
    path: &Path,
    dimensions: ChartDimensions,
) -> DrawOutcome {
    let lo = summary.min - CURVE_PADDING.0;
    let hi = summary.max + CURVE_PADDING.1;
    let domain = density_domain(lo, hi, DOMAIN_RESOLUTION);
    let y_top = fit.peak_density() * AXIS_HEADROOM;

    let root = BitMapBackend::new(path, (dimensions.width, dimensions.height)).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = figure_chart(&root, lo..hi, y_top, DENSITY_AXIS_LABEL)?;

    chart.draw_series(LineSeries::new(density_points(fit, &domain), &BLUE))?;

    // Each sample's line rises exactly to the density curve
    for &sample in samples {
        let height = fit.pdf(sample);
        chart.draw_series(std::iter::once(PathElement::new(
            vec![(sample, 0.0), (sample, height)],
            BLUE,
        )))?;
    }
    chart.draw_series(samples.iter().map(|&sample| {
        Circle::new(
            (sample, fit.pdf(sample)),
            SAMPLE_MARKER_SIZE,
            RED.filled(),
        )
    }))?;

    root.present()?;
    Ok(())
}

fn draw_likelihood_search(
    candidates: &[CandidateScore],
    best: CandidateScore,
    range: (f64, f64),
    path: &Path,
    dimensions: ChartDimensions,
) -> DrawOutcome {
    let (lo, hi) = range;
    let y_top = best.score * AXIS_HEADROOM;

    let root = BitMapBackend::new(path, (dimensions.width, dimensions.height)).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = figure_chart(&root, lo..hi, y_top, "likelihood (sum)")?;

    chart.draw_series(
        candidates
            .iter()
            .map(|c| Circle::new((c.mean, c.score), SCATTER_MARKER_SIZE, BLUE.filled())),
    )?;
    chart.draw_series(std::iter::once(reference_line(
        round_to(best.mean, 2),
        y_top * REFERENCE_LINE_FRACTION,
    )))?;

    annotation_block(
        &mut chart,
        fraction_between(lo, hi, 0.05),
        y_top,
        0.93,
        &[
            (format!("max L = {}", round_to(best.score, 2)), BLUE),
            (format!("corr. BG = {}", round_to(best.mean, 2)), BLUE),
        ],
    )?;

    root.present()?;
    Ok(())
}

fn draw_prior_likelihood(
    fit: &Normal,
    prior: &Normal,
    summary: &SampleSummary,
    path: &Path,
    dimensions: ChartDimensions,
) -> DrawOutcome {
    let lo = summary.min - PRIOR_FIGURE_LIKELIHOOD_PADDING.0;
    let hi = summary.max + PRIOR_FIGURE_LIKELIHOOD_PADDING.1;
    let likelihood_domain = density_domain(lo, hi, DOMAIN_RESOLUTION);
    let prior_domain = density_domain(
        summary.min - PRIOR_FIGURE_PRIOR_PADDING.0,
        summary.max + PRIOR_FIGURE_PRIOR_PADDING.1,
        DOMAIN_RESOLUTION,
    );
    let y_top = prior.peak_density().max(fit.peak_density()) * AXIS_HEADROOM;

    let root = BitMapBackend::new(path, (dimensions.width, dimensions.height)).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = figure_chart(&root, lo..hi, y_top, DENSITY_AXIS_LABEL)?;

    chart.draw_series(LineSeries::new(density_points(fit, &likelihood_domain), &BLUE))?;
    chart.draw_series(LineSeries::new(density_points(prior, &prior_domain), &GREEN))?;

    annotation_block(
        &mut chart,
        fraction_between(lo, hi, 0.02),
        y_top,
        0.55,
        &[
            ("likelihood".to_string(), BLUE),
            (format!("mean = {}", fit.mean()), BLUE),
            (format!("sd = {}", fit.std_dev()), BLUE),
        ],
    )?;
    annotation_block(
        &mut chart,
        prior.mean() + 3.0,
        y_top,
        0.82,
        &[
            ("prior".to_string(), GREEN),
            (format!("mean = {}", prior.mean()), GREEN),
            (format!("sd = {}", prior.std_dev()), GREEN),
        ],
    )?;

    root.present()?;
    Ok(())
}

fn draw_posterior_search(
    fit: &Normal,
    prior: &Normal,
    summary: &SampleSummary,
    samples: &[f64],
    candidates: &[CandidateScore],
    best: CandidateScore,
    path: &Path,
    dimensions: ChartDimensions,
) -> DrawOutcome {
    let lo = summary.min - POSTERIOR_FIGURE_PADDING.0;
    let hi = summary.max + POSTERIOR_FIGURE_PADDING.1;
    let likelihood_domain = density_domain(lo, hi, FINE_DOMAIN_RESOLUTION);
    let prior_domain = density_domain(lo, hi, DOMAIN_RESOLUTION);
    let y_top = prior.peak_density().max(fit.peak_density()) * AXIS_HEADROOM;

    let root = BitMapBackend::new(path, (dimensions.width, dimensions.height)).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = figure_chart(&root, lo..hi, y_top, DENSITY_AXIS_LABEL)?;

    chart.draw_series(LineSeries::new(density_points(fit, &likelihood_domain), &BLUE))?;
    chart.draw_series(LineSeries::new(density_points(prior, &prior_domain), &GREEN))?;
    chart.draw_series(samples.iter().map(|&sample| {
        Circle::new(
            (sample, fit.pdf(sample)),
            SAMPLE_MARKER_SIZE,
            RED.filled(),
        )
    }))?;

    // Posterior scores span many orders of magnitude; the display exponent
    // flattens them onto the density scale
    chart.draw_series(candidates.iter().map(|c| {
        Circle::new(
            (c.mean, c.score.powf(POSTERIOR_DISPLAY_EXPONENT)),
            SCATTER_MARKER_SIZE,
            BLACK.filled(),
        )
    }))?;

    annotation_block(
        &mut chart,
        fraction_between(lo, hi, 0.11),
        y_top,
        0.51,
        &[
            ("likelihood".to_string(), BLUE),
            (format!("mean = {}", fit.mean().trunc()), BLUE),
        ],
    )?;
    annotation_block(
        &mut chart,
        prior.mean() + 3.0,
        y_top,
        0.82,
        &[
            ("prior".to_string(), GREEN),
            (format!("mean = {}", prior.mean()), GREEN),
        ],
    )?;
    annotation_block(
        &mut chart,
        fraction_between(lo, hi, 0.26),
        y_top,
        0.85,
        &[
            ("posterior^0.08".to_string(), BLACK),
            (format!("mean = {}", round_to(best.mean, 0)), BLACK),
        ],
    )?;

    root.present()?;
    Ok(())
}

fn figure_chart<'a, 'b>(
    root: &'a DrawingArea<BitMapBackend<'b>, plotters::coord::Shift>,
    x_range: std::ops::Range<f64>,
    y_top: f64,
    y_label: &str,
) -> std::result::Result<FigureChart<'a, 'b>, Box<dyn Error>> {
    let mut chart = ChartBuilder::on(root)
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range, 0.0..y_top)?;
    chart
        .configure_mesh()
        .x_desc(SAMPLE_AXIS_LABEL)
        .y_desc(y_label)
        .x_labels(9)
        .draw()?;
    Ok(chart)
}

fn density_points(normal: &Normal, domain: &Array1<f64>) -> Vec<(f64, f64)> {
    domain.iter().map(|&x| (x, normal.pdf(x))).collect()
}

fn reference_line(x: f64, top: f64) -> PathElement<(f64, f64)> {
    PathElement::new(vec![(x, 0.0), (x, top)], BLUE)
}

// Rows are stacked downward from `top_fraction` of the y-axis
fn annotation_block<DB: DrawingBackend>(
    chart: &mut ChartContext<'_, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
    anchor_x: f64,
    y_top: f64,
    top_fraction: f64,
    lines: &[(String, RGBColor)],
) -> std::result::Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    for (row, (label, color)) in lines.iter().enumerate() {
        let y = y_top * (ANNOTATION_ROW_STEP.mul_add(-(row as f64), top_fraction));
        chart.draw_series(std::iter::once(Text::new(
            label.clone(),
            (anchor_x, y),
            ANNOTATION_FONT.into_font().color(color),
        )))?;
    }
    Ok(())
}

fn fraction_between(lo: f64, hi: f64, fraction: f64) -> f64 {
    (hi - lo).mul_add(fraction, lo)
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| EstimationError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }
    Ok(())
}

fn chart_error(path: &Path, source: &dyn Error) -> EstimationError {
    EstimationError::ChartRender {
        path: path.to_path_buf(),
        reason: source.to_string(),
    }
}
