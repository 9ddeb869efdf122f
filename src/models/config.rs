//! Engine configuration
//!
//! Every numeric constant of the engine lives here. Values are tunable
//! defaults; the page picks whatever feels smooth.

use serde::{Deserialize, Serialize};

/// Default deletion step budget
pub const DEFAULT_DELETE_STEPS: usize = 100;

/// Default typing step budget
pub const DEFAULT_TYPE_STEPS: usize = 128;

/// Smallest font size the fitter will ever return
pub const MIN_FONT_PX: u32 = 4;

/// Font size used when there is no text to fit
pub const FALLBACK_FONT_PX: u32 = 10;

/// Char width per px of font size when the probe gives nothing usable
pub const FALLBACK_CHAR_WIDTH_PER_PX: f64 = 0.6;

/// Line-height ratio when the container does not set one
pub const DEFAULT_LINE_HEIGHT_RATIO: f64 = 0.7;

/// Safety margin subtracted from each container dimension
pub const FIT_EPSILON_PX: f64 = 0.5;

/// Tunables for one transition engine
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    /// Step budget of the deletion phase
    pub delete_steps: usize,

    /// Step budget of the typing phase
    pub type_steps: usize,

    /// Lower clamp for fitted font sizes
    pub min_font_px: u32,

    /// Size used for empty candidate text
    pub fallback_font_px: u32,

    /// Used when the char-width probe fails
    pub fallback_char_width_per_px: f64,

    /// Used when neither the caller nor the container supplies one
    pub default_line_height_ratio: f64,

    /// Margin kept free on each axis so rounding never overflows
    pub fit_epsilon_px: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            delete_steps: DEFAULT_DELETE_STEPS,
            type_steps: DEFAULT_TYPE_STEPS,
            min_font_px: MIN_FONT_PX,
            fallback_font_px: FALLBACK_FONT_PX,
            fallback_char_width_per_px: FALLBACK_CHAR_WIDTH_PER_PX,
            default_line_height_ratio: DEFAULT_LINE_HEIGHT_RATIO,
            fit_epsilon_px: FIT_EPSILON_PX,
        }
    }
}

impl EngineConfig {
    /// Parse a (possibly partial) JSON config; missing fields keep defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config: EngineConfig = serde_json::from_str(json)?;
        Ok(config.sanitized())
    }

    /// Pull nonsense values back into range.
    ///
    /// Step budgets must be at least 1, ratios must be positive and finite,
    /// and the minimum font size must be at least 1px.
    pub fn sanitized(mut self) -> Self {
        let defaults = EngineConfig::default();

        self.delete_steps = self.delete_steps.max(1);
        self.type_steps = self.type_steps.max(1);
        self.min_font_px = self.min_font_px.max(1);
        self.fallback_font_px = self.fallback_font_px.max(self.min_font_px);

        if !(self.fallback_char_width_per_px.is_finite() && self.fallback_char_width_per_px > 0.0) {
            self.fallback_char_width_per_px = defaults.fallback_char_width_per_px;
        }
        if !(self.default_line_height_ratio.is_finite() && self.default_line_height_ratio > 0.0) {
            self.default_line_height_ratio = defaults.default_line_height_ratio;
        }
        if !(self.fit_epsilon_px.is_finite() && self.fit_epsilon_px >= 0.0) {
            self.fit_epsilon_px = defaults.fit_epsilon_px;
        }

        self
    }
}
