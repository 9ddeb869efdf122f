//! Font fitting
//!
//! Picks the largest integer font size that keeps a block of monospace text
//! inside its container on both axes. Width and height are independent
//! constraints and the smaller answer wins; the text is never stretched to
//! fill leftover space on the other axis.

use crate::models::{ContainerSize, EngineConfig};
use crate::text::TextMetrics;

/// Inputs of one fit computation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitRequest {
    pub container: ContainerSize,
    pub metrics: TextMetrics,
    pub char_width_per_px: f64,
    pub line_height_ratio: f64,
    pub max_font_px: u32,
}

/// Largest font size satisfying
/// `longest * char_width * F <= width` and `lines * line_height * F <= height`,
/// clamped to `[config.min_font_px, max_font_px]`.
///
/// Returns `None` when the container is not laid out yet. Empty text gets
/// the configured fallback size.
///
/// The result is a conservative lower bound on that largest size: a
/// `fit_epsilon_px` margin comes off each axis and each per-px extent is
/// floored at 1px, so short lines or narrow ratios can fit a little smaller
/// than the exact optimum.
pub fn fit_font_size(request: &FitRequest, config: &EngineConfig) -> Option<u32> {
    if !request.container.is_ready() {
        return None;
    }

    let min = config.min_font_px;
    let max = request.max_font_px.max(min);

    if request.metrics.is_empty() {
        return Some(config.fallback_font_px.clamp(min, max));
    }

    let char_width = positive_or(request.char_width_per_px, config.fallback_char_width_per_px);
    let line_height = positive_or(request.line_height_ratio, config.default_line_height_ratio);

    let width_per_px = (request.metrics.longest_line as f64 * char_width).max(1.0);
    let height_per_px = (request.metrics.line_count as f64 * line_height).max(1.0);

    let by_width = ((request.container.width - config.fit_epsilon_px) / width_per_px).floor();
    let by_height = ((request.container.height - config.fit_epsilon_px) / height_per_px).floor();

    let size = by_width.min(by_height).clamp(min as f64, max as f64);
    Some(size as u32)
}

fn positive_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        fallback
    }
}

/// Write-once cache for the measured char width ratio
///
/// The ratio depends on the font, not on the text, so it is probed once and
/// reused for every later fit.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CharWidthCache {
    ratio: Option<f64>,
}

impl CharWidthCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<f64> {
        self.ratio
    }

    /// Seed the cache with a known ratio. Non-positive values are ignored.
    pub fn set(&mut self, ratio: f64) {
        if ratio.is_finite() && ratio > 0.0 {
            self.ratio = Some(ratio);
        }
    }

    /// Cached ratio, probing once on first use.
    ///
    /// A probe that fails or reports a non-positive width caches `fallback`.
    pub fn get_or_probe<F>(&mut self, probe: F, fallback: f64) -> f64
    where
        F: FnOnce() -> Option<f64>,
    {
        if let Some(ratio) = self.ratio {
            return ratio;
        }

        let ratio = probe()
            .filter(|r| r.is_finite() && *r > 0.0)
            .unwrap_or(fallback);
        log::debug!("char width ratio measured: {:.4} px per px of font size", ratio);
        self.ratio = Some(ratio);
        ratio
    }
}
