//! Command-line interface for batch rendering of estimation figures

use crate::analysis::statistics::{SampleSummary, round_to};
use crate::estimation::likelihood;
use crate::estimation::search::{CandidateScore, MeanSearch, Objective, SearchConfig};
use crate::io::chart::{self, ChartDimensions};
use crate::io::configuration::{
    ANIMATION_DIMENSIONS, ANIMATION_FRAME_DELAY_MS, DEFAULT_CHART_HEIGHT, DEFAULT_CHART_WIDTH,
    DEFAULT_SAMPLES, DEFAULT_SEED, LIKELIHOOD_SEARCH_ITERATIONS, LIKELIHOOD_SEARCH_PADDING,
    POSTERIOR_DISPLAY_EXPONENT, POSTERIOR_FIGURE_PADDING, POSTERIOR_SEARCH_ITERATIONS, PRIOR_MEAN,
    PRIOR_STD_DEV,
};
use crate::io::error::{EstimationError, Result, computation_error};
use crate::io::progress::ProgressManager;
use crate::io::visualization::SearchFrameCapture;
use crate::math::probability::Normal;
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};

/// The figures the tool can render
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FigureKind {
    /// Fitted density curve with mean/sd annotations
    FittedCurve,
    /// Density curve with a line and marker at each sample
    SampleLikelihood,
    /// Monte Carlo likelihood scatter over candidate means
    LikelihoodSearch,
    /// Likelihood and prior density curves
    PriorLikelihood,
    /// Posterior-like score scatter over likelihood and prior curves
    PosteriorSearch,
}

impl FigureKind {
    /// Every figure, in rendering order
    pub const ALL: [Self; 5] = [
        Self::FittedCurve,
        Self::SampleLikelihood,
        Self::LikelihoodSearch,
        Self::PriorLikelihood,
        Self::PosteriorSearch,
    ];

    /// Output file name for this figure
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::FittedCurve => "fitted_curve.png",
            Self::SampleLikelihood => "sample_likelihood.png",
            Self::LikelihoodSearch => "likelihood_search.png",
            Self::PriorLikelihood => "prior_likelihood.png",
            Self::PosteriorSearch => "posterior_search.png",
        }
    }

    /// Human-readable label used in progress output
    pub const fn label(self) -> &'static str {
        match self {
            Self::FittedCurve => "fitted curve",
            Self::SampleLikelihood => "sample likelihood",
            Self::LikelihoodSearch => "likelihood search",
            Self::PriorLikelihood => "prior vs likelihood",
            Self::PosteriorSearch => "posterior search",
        }
    }

    /// Animation file name, for the figures backed by a search
    pub const fn animation_file_name(self) -> Option<&'static str> {
        match self {
            Self::LikelihoodSearch => Some("likelihood_search.gif"),
            Self::PosteriorSearch => Some("posterior_search.gif"),
            _ => None,
        }
    }

    /// Default Monte Carlo budget, for the figures backed by a search
    pub const fn search_iterations(self) -> Option<usize> {
        match self {
            Self::LikelihoodSearch => Some(LIKELIHOOD_SEARCH_ITERATIONS),
            Self::PosteriorSearch => Some(POSTERIOR_SEARCH_ITERATIONS),
            _ => None,
        }
    }
}

#[derive(Parser)]
#[command(name = "glucofit")]
#[command(
    author,
    version,
    about = "Render maximum likelihood and MAP estimation figures for blood glucose samples"
)]
/// Command-line arguments for the figure renderer
pub struct Cli {
    /// Output directory for rendered figures
    #[arg(value_name = "OUTPUT", default_value = "figures")]
    pub output: PathBuf,

    /// Random seed for reproducible candidate draws
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Override the Monte Carlo iteration count of the search figures
    #[arg(short, long)]
    pub iterations: Option<usize>,

    /// Figures to render (defaults to all)
    #[arg(short, long, value_enum)]
    pub figure: Vec<FigureKind>,

    /// Read samples from a whitespace-separated text file
    #[arg(long, value_name = "FILE")]
    pub samples: Option<PathBuf>,

    /// Export search figures as animated GIFs
    #[arg(short, long)]
    pub visualize: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Render figures even if output exists
    #[arg(short, long)]
    pub no_skip: bool,

    /// Chart width in pixels
    #[arg(short = 'w', long, default_value_t = DEFAULT_CHART_WIDTH)]
    pub width: u32,

    /// Chart height in pixels
    #[arg(short = 'H', long, default_value_t = DEFAULT_CHART_HEIGHT)]
    pub height: u32,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Load readings from a whitespace-separated text file
///
/// # Errors
///
/// Returns an error if the file cannot be read or a token is not a number.
pub fn load_samples(path: &Path) -> Result<Vec<f64>> {
    let content = std::fs::read_to_string(path).map_err(|e| EstimationError::FileSystem {
        path: path.to_path_buf(),
        operation: "read samples",
        source: e,
    })?;

    let mut samples = Vec::new();
    for (line_index, line) in content.lines().enumerate() {
        for token in line.split_whitespace() {
            let value = token
                .parse::<f64>()
                .map_err(|_e| EstimationError::SampleParse {
                    path: path.to_path_buf(),
                    line: line_index + 1,
                    token: token.to_string(),
                })?;
            samples.push(value);
        }
    }
    Ok(samples)
}

/// Orchestrates batch rendering of figures with progress tracking
pub struct FigureProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FigureProcessor {
    /// Create a new figure processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Render the requested figures according to CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if sample loading, estimation, or rendering fails.
    pub fn process(&mut self) -> Result<()> {
        let samples = self.resolve_samples()?;
        let summary = SampleSummary::from_samples(&samples)?;

        let figures = self.collect_figures();
        if figures.is_empty() {
            return Ok(());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(figures.len());
        }

        for (index, figure) in figures.iter().enumerate() {
            self.render_figure(*figure, index, &samples, &summary)?;
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    fn resolve_samples(&self) -> Result<Vec<f64>> {
        match &self.cli.samples {
            Some(path) => load_samples(path),
            None => Ok(DEFAULT_SAMPLES.to_vec()),
        }
    }

    fn collect_figures(&self) -> Vec<FigureKind> {
        FigureKind::ALL
            .iter()
            .copied()
            .filter(|kind| self.cli.figure.is_empty() || self.cli.figure.contains(kind))
            .filter(|kind| self.should_render(*kind))
            .collect()
    }

    // Allow print for user feedback on skipped figures
    #[allow(clippy::print_stderr)]
    fn should_render(&self, figure: FigureKind) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = self.cli.output.join(figure.file_name());
        if output_path.exists() {
            if !self.cli.quiet {
                eprintln!("Skipping: {} (output exists)", output_path.display());
            }
            false
        } else {
            true
        }
    }

    fn render_figure(
        &mut self,
        figure: FigureKind,
        index: usize,
        samples: &[f64],
        summary: &SampleSummary,
    ) -> Result<()> {
        let output_path = self.cli.output.join(figure.file_name());
        let dimensions = ChartDimensions {
            width: self.cli.width,
            height: self.cli.height,
        };
        let iterations = figure
            .search_iterations()
            .map(|default| self.cli.iterations.unwrap_or(default));

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_figure(index, figure.label(), iterations.unwrap_or(1));
        }

        match figure {
            FigureKind::FittedCurve => {
                let fit = likelihood::fit(samples)?;
                chart::render_fitted_curve(&fit, summary, &output_path, dimensions)?;
            }
            FigureKind::SampleLikelihood => {
                let fit = Normal::new(round_to(summary.mean, 5), round_to(summary.std_dev, 5))?;
                chart::render_sample_likelihood(&fit, summary, samples, &output_path, dimensions)?;
            }
            FigureKind::LikelihoodSearch => {
                let config = SearchConfig {
                    iterations: iterations.unwrap_or(LIKELIHOOD_SEARCH_ITERATIONS),
                    seed: self.cli.seed,
                    lo: summary.min - LIKELIHOOD_SEARCH_PADDING.0,
                    hi: summary.max + LIKELIHOOD_SEARCH_PADDING.1,
                };
                let objective = Objective::DensitySum {
                    std_dev: round_to(summary.std_dev, 5),
                };
                let search = self.run_search(samples, objective, &config, index)?;
                let best = best_candidate(&search, "likelihood search")?;

                chart::render_likelihood_search(
                    search.candidates(),
                    best,
                    (config.lo, config.hi),
                    &output_path,
                    dimensions,
                )?;
                self.export_animation(figure, &search, (config.lo, config.hi))?;
            }
            FigureKind::PriorLikelihood => {
                let fit = Normal::new(round_to(summary.mean, 2), round_to(summary.std_dev, 2))?;
                let prior = Normal::new(PRIOR_MEAN, PRIOR_STD_DEV)?;
                chart::render_prior_likelihood(&fit, &prior, summary, &output_path, dimensions)?;
            }
            FigureKind::PosteriorSearch => {
                let fit = Normal::new(round_to(summary.mean, 2), round_to(summary.std_dev, 2))?;
                let prior = Normal::new(PRIOR_MEAN, PRIOR_STD_DEV)?;
                let config = SearchConfig {
                    iterations: iterations.unwrap_or(POSTERIOR_SEARCH_ITERATIONS),
                    seed: self.cli.seed,
                    lo: summary.min - POSTERIOR_FIGURE_PADDING.0,
                    hi: summary.max + POSTERIOR_FIGURE_PADDING.1,
                };
                let objective = Objective::PosteriorProduct {
                    prior_std_dev: PRIOR_STD_DEV,
                };
                let search = self.run_search(samples, objective, &config, index)?;
                let best = best_candidate(&search, "posterior search")?;

                chart::render_posterior_search(
                    &fit,
                    &prior,
                    summary,
                    samples,
                    search.candidates(),
                    best,
                    &output_path,
                    dimensions,
                )?;
                self.export_animation(figure, &search, (config.lo, config.hi))?;
            }
        }

        if let Some(ref pm) = self.progress_manager {
            pm.complete_figure(index);
        }

        Ok(())
    }

    fn run_search(
        &self,
        samples: &[f64],
        objective: Objective,
        config: &SearchConfig,
        index: usize,
    ) -> Result<MeanSearch> {
        let mut search = MeanSearch::new(samples, objective, config)?;
        for iteration in 1..=config.iterations {
            search.step()?;
            if let Some(ref pm) = self.progress_manager {
                pm.update_iteration(index, iteration);
            }
        }
        Ok(search)
    }

    fn export_animation(
        &self,
        figure: FigureKind,
        search: &MeanSearch,
        range: (f64, f64),
    ) -> Result<()> {
        if !self.cli.visualize {
            return Ok(());
        }
        let Some(file_name) = figure.animation_file_name() else {
            return Ok(());
        };

        // Posterior scores are flattened to the same display scale the
        // figure's scatter uses
        let (y_label, to_display): (&'static str, fn(f64) -> f64) = match figure {
            FigureKind::PosteriorSearch => ("posterior^0.08", |score| {
                score.powf(POSTERIOR_DISPLAY_EXPONENT)
            }),
            _ => ("likelihood (sum)", |score| score),
        };

        let mut capture = SearchFrameCapture::new(range, ANIMATION_DIMENSIONS, y_label);
        for candidate in search.candidates() {
            capture.record(candidate.mean, to_display(candidate.score));
        }
        capture.export_gif(
            &self.cli.output.join(file_name),
            ANIMATION_FRAME_DELAY_MS,
        )
    }
}

fn best_candidate(search: &MeanSearch, operation: &'static str) -> Result<CandidateScore> {
    search
        .best()
        .ok_or_else(|| computation_error(operation, &"no candidates were evaluated"))
}
