//! Estimation constants and runtime configuration defaults

/// Blood glucose readings (mg/dl) used when no sample file is given
pub const DEFAULT_SAMPLES: [f64; 7] = [172.0, 171.0, 166.0, 175.0, 170.0, 165.0, 160.0];

/// Mean of the clinical prior over the patient's BG level
pub const PRIOR_MEAN: f64 = 171.0;
/// Standard deviation of the clinical prior
pub const PRIOR_STD_DEV: f64 = 3.0;

/// Candidate means evaluated by the likelihood search
pub const LIKELIHOOD_SEARCH_ITERATIONS: usize = 1000;
/// Candidate means evaluated by the posterior search
pub const POSTERIOR_SEARCH_ITERATIONS: usize = 500;

/// Points in a standard density evaluation domain
pub const DOMAIN_RESOLUTION: usize = 50;
/// Points in the fine likelihood domain of the posterior figure
pub const FINE_DOMAIN_RESOLUTION: usize = 250;

// Domain paddings below the sample minimum / above the sample maximum,
// per figure, carried over from the reference layouts
/// Density curve domain padding (fitted-curve and sample-likelihood figures)
pub const CURVE_PADDING: (f64, f64) = (2.0, 3.0);
/// Candidate range padding for the likelihood search
pub const LIKELIHOOD_SEARCH_PADDING: (f64, f64) = (3.0, 3.0);
/// Likelihood domain padding in the prior-likelihood figure
pub const PRIOR_FIGURE_LIKELIHOOD_PADDING: (f64, f64) = (6.0, 7.0);
/// Prior domain padding in the prior-likelihood figure
pub const PRIOR_FIGURE_PRIOR_PADDING: (f64, f64) = (5.0, 6.0);
/// Domain and candidate range padding in the posterior figure
pub const POSTERIOR_FIGURE_PADDING: (f64, f64) = (5.0, 7.0);

/// Exponent flattening posterior scores for display
pub const POSTERIOR_DISPLAY_EXPONENT: f64 = 0.08;

/// Headroom factor above the tallest curve or score on the y-axis
pub const AXIS_HEADROOM: f64 = 1.1;
/// Height of estimate reference lines as a fraction of the y-axis
pub const REFERENCE_LINE_FRACTION: f64 = 0.94;

/// Fixed seed for reproducible candidate draws
pub const DEFAULT_SEED: u64 = 42;

/// Default chart width in pixels
pub const DEFAULT_CHART_WIDTH: u32 = 1000;
/// Default chart height in pixels
pub const DEFAULT_CHART_HEIGHT: u32 = 750;

/// Pixel dimensions of search animation frames
pub const ANIMATION_DIMENSIONS: (u32, u32) = (640, 480);
/// Upper bound on animation frame count; candidates are strided to fit
pub const ANIMATION_MAX_FRAMES: usize = 120;
/// Delay between animation frames
pub const ANIMATION_FRAME_DELAY_MS: u32 = 50;
/// Multiplier holding the final animation frame on screen
pub const ANIMATION_FINAL_HOLD: u32 = 25;
