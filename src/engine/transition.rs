//! Delete-then-type transition state machine
//!
//! Animates a rendered string toward a new target: the shared prefix stays,
//! the differing suffix of the old text is deleted, then the differing suffix
//! of the target is typed. Each phase has a fixed step budget, so longer text
//! moves in bigger chunks and every transition takes roughly the same number
//! of frames.
//!
//! The engine is driven from outside: the host calls [`TextTransitionEngine::tick`]
//! once per animation frame (or fixed timer tick) while
//! [`TextTransitionEngine::is_animating`] is true.

use crate::engine::font_fit::{fit_font_size, CharWidthCache, FitRequest};
use crate::engine::surface::{ContainerMeasure, TextSurface};
use crate::models::{ContainerSize, EngineConfig, TransitionMode, TransitionSnapshot};
use crate::text::{self, TextMetrics};

/// Owns the animated text of one rendered element
pub struct TextTransitionEngine<S: TextSurface> {
    surface: S,
    config: EngineConfig,

    displayed: String,
    /// Length of `displayed` in chars
    displayed_len: usize,
    target: String,
    /// Length of `target` in chars
    target_len: usize,

    mode: TransitionMode,
    step_index: usize,
    total_steps: usize,
    prefix_len: usize,
    chunk_len: usize,
    frames_consumed: usize,

    pending_font_size_px: Option<u32>,
    applied_font_size_px: Option<u32>,
    char_width: CharWidthCache,
}

impl<S: TextSurface> TextTransitionEngine<S> {
    /// Engine over an empty surface
    pub fn new(surface: S, config: EngineConfig) -> Self {
        Self::with_text(surface, config, "")
    }

    /// Engine over a surface that already shows `initial`.
    ///
    /// Nothing is written to the surface here.
    pub fn with_text(surface: S, config: EngineConfig, initial: &str) -> Self {
        let len = text::char_len(initial);
        Self {
            surface,
            config: config.sanitized(),
            displayed: initial.to_string(),
            displayed_len: len,
            target: initial.to_string(),
            target_len: len,
            mode: TransitionMode::Idle,
            step_index: 0,
            total_steps: 0,
            prefix_len: len,
            chunk_len: 0,
            frames_consumed: 0,
            pending_font_size_px: None,
            applied_font_size_px: None,
            char_width: CharWidthCache::new(),
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn displayed_text(&self) -> &str {
        &self.displayed
    }

    pub fn target_text(&self) -> &str {
        &self.target
    }

    pub fn mode(&self) -> TransitionMode {
        self.mode
    }

    pub fn is_animating(&self) -> bool {
        !self.mode.is_idle()
    }

    pub fn common_prefix_len(&self) -> usize {
        self.prefix_len
    }

    pub fn pending_font_size_px(&self) -> Option<u32> {
        self.pending_font_size_px
    }

    pub fn applied_font_size_px(&self) -> Option<u32> {
        self.applied_font_size_px
    }

    pub fn frames_consumed(&self) -> usize {
        self.frames_consumed
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Seed the char width ratio instead of probing for it
    pub fn set_char_width_per_px(&mut self, ratio: f64) {
        self.char_width.set(ratio);
    }

    pub fn snapshot(&self) -> TransitionSnapshot {
        TransitionSnapshot {
            mode: self.mode,
            displayed_text: self.displayed.clone(),
            target_text: self.target.clone(),
            step_index: self.step_index,
            total_steps: self.total_steps,
            common_prefix_len: self.prefix_len,
            chunk_len: self.chunk_len,
            pending_font_size_px: self.pending_font_size_px,
            applied_font_size_px: self.applied_font_size_px,
            frames_consumed: self.frames_consumed,
        }
    }

    // ------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------

    /// Start animating toward `target`.
    ///
    /// Any transition in flight is abandoned; the new one starts from
    /// whatever is on screen right now. Requesting the text that is already
    /// displayed settles the engine to idle without consuming a frame.
    pub fn request_transition(&mut self, target: &str) {
        self.frames_consumed = 0;

        if target == self.displayed {
            self.set_target(target);
            self.prefix_len = self.displayed_len;
            self.enter_idle();
            return;
        }

        self.set_target(target);
        self.prefix_len = text::common_prefix_len(&self.displayed, &self.target);

        log::debug!(
            "transition: {} -> {} chars, keeping {} shared",
            self.displayed_len,
            self.target_len,
            self.prefix_len
        );

        if self.displayed_len > self.prefix_len {
            self.begin_deleting();
        } else {
            self.begin_typing();
        }
    }

    /// Advance the active phase by one step.
    ///
    /// Returns true while more frames are needed. A tick while idle does
    /// nothing.
    pub fn tick(&mut self) -> bool {
        match self.mode {
            TransitionMode::Idle => return false,
            TransitionMode::Deleting => self.delete_step(),
            TransitionMode::Typing => self.type_step(),
        }
        self.is_animating()
    }

    /// Stop where we stand: the text on screen becomes the target.
    pub fn halt(&mut self) {
        if self.mode.is_idle() {
            return;
        }
        log::debug!("transition halted at {} chars ({})", self.displayed_len, self.mode);
        let shown = self.displayed.clone();
        self.set_target(&shown);
        self.enter_idle();
    }

    /// Jump straight to the end state.
    pub fn finish(&mut self) {
        if self.mode.is_idle() {
            return;
        }
        self.displayed.clone_from(&self.target);
        self.displayed_len = self.target_len;
        self.surface.set_text(&self.displayed);
        self.enter_idle();
    }

    fn set_target(&mut self, target: &str) {
        self.target.clear();
        self.target.push_str(target);
        self.target_len = text::char_len(target);
    }

    fn begin_deleting(&mut self) {
        self.mode = TransitionMode::Deleting;
        self.step_index = 0;
        self.total_steps = self.config.delete_steps;
        self.chunk_len = text::chunk_size(self.displayed_len - self.prefix_len, self.total_steps);
    }

    fn begin_typing(&mut self) {
        if self.displayed_len >= self.target_len {
            self.enter_idle();
            return;
        }
        self.mode = TransitionMode::Typing;
        self.step_index = 0;
        self.total_steps = self.config.type_steps;
        self.chunk_len = text::chunk_size(self.target_len - self.displayed_len, self.total_steps);
    }

    fn delete_step(&mut self) {
        self.frames_consumed += 1;
        self.step_index += 1;

        let mut keep = self
            .displayed_len
            .saturating_sub(self.chunk_len)
            .max(self.prefix_len);
        if self.step_index >= self.total_steps {
            keep = self.prefix_len;
        }

        self.truncate_displayed(keep);
        self.surface.set_text(&self.displayed);
        log::trace!("delete step {}/{}: {} chars", self.step_index, self.total_steps, keep);

        if keep <= self.prefix_len {
            self.begin_typing();
        }
    }

    fn type_step(&mut self) {
        self.frames_consumed += 1;
        self.step_index += 1;

        let mut next = (self.displayed_len + self.chunk_len).min(self.target_len);
        if self.step_index >= self.total_steps {
            next = self.target_len;
        }

        let added = text::char_slice(&self.target, self.displayed_len, next);
        self.displayed.push_str(added);
        self.displayed_len = next;
        self.surface.set_text(&self.displayed);
        log::trace!("type step {}/{}: {} chars", self.step_index, self.total_steps, next);

        if next >= self.target_len {
            self.enter_idle();
        }
    }

    fn truncate_displayed(&mut self, len: usize) {
        let offset = text::prefix::byte_offset(&self.displayed, len);
        self.displayed.truncate(offset);
        self.displayed_len = len.min(self.displayed_len);
    }

    fn enter_idle(&mut self) {
        if self.mode != TransitionMode::Idle {
            log::debug!("transition settled after {} frames", self.frames_consumed);
        }
        self.mode = TransitionMode::Idle;
        self.step_index = 0;
        self.total_steps = 0;
        self.chunk_len = 0;
        if let Some(px) = self.pending_font_size_px.take() {
            self.apply_font_size(px);
        }
    }

    // ------------------------------------------------------------------
    // Font sizing
    // ------------------------------------------------------------------

    /// Fit `candidate_text` into the container and apply (or defer) the size.
    ///
    /// Idle engines apply at once. While a transition is in flight the size
    /// is parked until the engine goes idle, so the animated text never jumps.
    /// Returns the computed size, or `None` when the container is not ready.
    pub fn update_container_metrics(
        &mut self,
        inner_width_px: f64,
        inner_height_px: f64,
        candidate_text: &str,
        max_font_px: u32,
        line_height_ratio: f64,
    ) -> Option<u32> {
        let size = self.compute_font_size(
            ContainerSize::new(inner_width_px, inner_height_px),
            candidate_text,
            max_font_px,
            line_height_ratio,
        )?;

        if self.mode.is_idle() {
            self.pending_font_size_px = None;
            self.apply_font_size(size);
        } else {
            self.pending_font_size_px = Some(size);
        }
        Some(size)
    }

    /// Measure the container and refit the current target.
    ///
    /// Skipped when the container is not mounted or there is no text yet.
    pub fn refit_with<M: ContainerMeasure>(&mut self, measure: &M, max_font_px: u32) -> Option<u32> {
        let candidate = if self.target.trim().is_empty() {
            self.displayed.clone()
        } else {
            self.target.clone()
        };
        if candidate.trim().is_empty() {
            return None;
        }

        let size = measure.inner_size()?;
        self.prime_char_width(measure);
        let line_height = measure
            .line_height_ratio()
            .unwrap_or(self.config.default_line_height_ratio);

        self.update_container_metrics(size.width, size.height, &candidate, max_font_px, line_height)
    }

    /// Size the container for `target`, then start the transition.
    ///
    /// When nothing is shown yet, or the same text is already settled on
    /// screen, the size applies at once; otherwise it waits for the
    /// transition to finish.
    pub fn request_fitted_transition<M: ContainerMeasure>(
        &mut self,
        target: &str,
        measure: &M,
        max_font_px: u32,
    ) {
        if let Some(container) = measure.inner_size() {
            self.prime_char_width(measure);
            let line_height = measure
                .line_height_ratio()
                .unwrap_or(self.config.default_line_height_ratio);

            if let Some(size) = self.compute_font_size(container, target, max_font_px, line_height) {
                let settled = self.mode.is_idle() && self.displayed == target;
                if self.displayed.is_empty() || settled {
                    self.pending_font_size_px = None;
                    self.apply_font_size(size);
                } else {
                    self.pending_font_size_px = Some(size);
                }
            }
        }

        self.request_transition(target);
    }

    fn prime_char_width<M: ContainerMeasure>(&mut self, measure: &M) {
        let fallback = self.config.fallback_char_width_per_px;
        self.char_width
            .get_or_probe(|| measure.probe_char_width_per_px(), fallback);
    }

    fn compute_font_size(
        &self,
        container: ContainerSize,
        candidate_text: &str,
        max_font_px: u32,
        line_height_ratio: f64,
    ) -> Option<u32> {
        let request = FitRequest {
            container,
            metrics: TextMetrics::measure(candidate_text),
            char_width_per_px: self
                .char_width
                .get()
                .unwrap_or(self.config.fallback_char_width_per_px),
            line_height_ratio,
            max_font_px,
        };
        let size = fit_font_size(&request, &self.config);
        if size.is_none() {
            log::debug!(
                "container not ready ({}x{}), font fit skipped",
                container.width,
                container.height
            );
        }
        size
    }

    fn apply_font_size(&mut self, px: u32) {
        if self.applied_font_size_px != Some(px) {
            self.surface.set_font_size_px(px);
            self.applied_font_size_px = Some(px);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::surface::{FixedMeasure, MemorySurface};

    fn engine_showing(text: &str) -> TextTransitionEngine<MemorySurface> {
        TextTransitionEngine::with_text(MemorySurface::showing(text), EngineConfig::default(), text)
    }

    fn run_to_idle(engine: &mut TextTransitionEngine<MemorySurface>) -> usize {
        let mut frames = 0;
        while engine.tick() {
            frames += 1;
            assert!(frames < 10_000, "engine never settled");
        }
        frames + 1
    }

    #[test]
    fn test_delete_one_then_type_one() {
        let mut engine = engine_showing("ABC");
        engine.request_transition("ABD");

        assert_eq!(engine.mode(), TransitionMode::Deleting);
        assert_eq!(engine.common_prefix_len(), 2);

        assert!(engine.tick());
        assert_eq!(engine.displayed_text(), "AB");
        assert_eq!(engine.mode(), TransitionMode::Typing);

        assert!(!engine.tick());
        assert_eq!(engine.displayed_text(), "ABD");
        assert_eq!(engine.mode(), TransitionMode::Idle);
        assert_eq!(engine.surface().text_history, vec!["AB", "ABD"]);
    }

    #[test]
    fn test_same_text_is_noop() {
        let mut engine = engine_showing("HELLO");
        engine.request_transition("HELLO");

        assert_eq!(engine.mode(), TransitionMode::Idle);
        assert_eq!(engine.displayed_text(), "HELLO");
        assert!(!engine.tick());
        assert_eq!(engine.frames_consumed(), 0);
        assert!(engine.surface().text_history.is_empty());
    }

    #[test]
    fn test_type_from_empty() {
        let mut engine = engine_showing("");
        engine.request_transition("XY");

        assert_eq!(engine.mode(), TransitionMode::Typing);
        assert!(engine.tick());
        assert_eq!(engine.displayed_text(), "X");
        assert!(!engine.tick());
        assert_eq!(engine.displayed_text(), "XY");
    }

    #[test]
    fn test_empty_target_deletes_everything() {
        let mut engine = engine_showing("gone");
        engine.request_transition("");
        run_to_idle(&mut engine);

        assert_eq!(engine.displayed_text(), "");
        assert_eq!(engine.mode(), TransitionMode::Idle);
    }

    #[test]
    fn test_chunks_scale_with_length() {
        let old = "x".repeat(1000);
        let mut engine = engine_showing(&old);
        engine.request_transition("");
        // ceil(1000 / 100) = 10 chars per step
        engine.tick();
        assert_eq!(engine.displayed_text().len(), 990);
        let frames = 1 + run_to_idle(&mut engine);
        assert_eq!(frames, 100);
    }

    #[test]
    fn test_step_budget_snaps_to_end() {
        let config = EngineConfig { delete_steps: 3, type_steps: 2, ..EngineConfig::default() };
        let mut engine = TextTransitionEngine::with_text(MemorySurface::new(), config, "abcdefg");
        engine.request_transition("abXYZW");

        // delete: 5 chars over 3 steps (chunk 2) -> 5, 3, 2
        engine.tick();
        assert_eq!(engine.displayed_text(), "abcde");
        engine.tick();
        assert_eq!(engine.displayed_text(), "abc");
        engine.tick();
        assert_eq!(engine.displayed_text(), "ab");
        assert_eq!(engine.mode(), TransitionMode::Typing);

        // type: 4 chars over 2 steps (chunk 2)
        engine.tick();
        assert_eq!(engine.displayed_text(), "abXY");
        assert!(!engine.tick());
        assert_eq!(engine.displayed_text(), "abXYZW");
    }

    #[test]
    fn test_interrupt_mid_deletion() {
        let config = EngineConfig { delete_steps: 3, ..EngineConfig::default() };
        let mut engine = TextTransitionEngine::with_text(MemorySurface::new(), config, "ABCDE");
        engine.request_transition("AB");
        engine.tick();
        assert_eq!(engine.displayed_text(), "ABCD");

        engine.request_transition("ABXY");
        assert_eq!(engine.common_prefix_len(), 2);
        assert_eq!(engine.mode(), TransitionMode::Deleting);
        run_to_idle(&mut engine);
        assert_eq!(engine.displayed_text(), "ABXY");
    }

    #[test]
    fn test_interrupt_mid_typing_keeps_typed_prefix() {
        let config = EngineConfig { type_steps: 4, ..EngineConfig::default() };
        let mut engine = TextTransitionEngine::with_text(MemorySurface::new(), config, "");
        engine.request_transition("ABCDEFGH");
        engine.tick();
        engine.tick();
        assert_eq!(engine.displayed_text(), "ABCD");

        engine.request_transition("ABCDWXYZ");
        assert_eq!(engine.mode(), TransitionMode::Typing);
        assert_eq!(engine.common_prefix_len(), 4);
        run_to_idle(&mut engine);
        assert_eq!(engine.displayed_text(), "ABCDWXYZ");
        assert!(engine.surface().text_history.iter().all(|t| t.starts_with("ABCD") || t.len() < 4));
    }

    #[test]
    fn test_multibyte_art_never_splits_chars() {
        let mut engine = engine_showing("╭──╮\n│◉◉│\n╰──╯");
        engine.request_transition("╭──╮\n│▲▲│\n└──┘");
        assert_eq!(engine.common_prefix_len(), 6);
        run_to_idle(&mut engine);
        assert_eq!(engine.displayed_text(), "╭──╮\n│▲▲│\n└──┘");
    }

    #[test]
    fn test_font_applies_immediately_when_idle() {
        let mut engine = engine_showing("hi");
        let size = engine.update_container_metrics(200.0, 100.0, "hi", 14, 0.7);
        assert_eq!(size, Some(14));
        assert_eq!(engine.surface().font_size_px, Some(14));
        assert_eq!(engine.pending_font_size_px(), None);
    }

    #[test]
    fn test_font_deferred_until_idle() {
        let mut engine = engine_showing("ABC");
        engine.request_transition("ABD");
        engine.update_container_metrics(200.0, 100.0, "ABD", 12, 0.7);

        assert_eq!(engine.pending_font_size_px(), Some(12));
        assert_eq!(engine.surface().font_size_px, None);

        engine.tick();
        assert_eq!(engine.surface().font_size_px, None);
        engine.tick();
        assert_eq!(engine.mode(), TransitionMode::Idle);
        assert_eq!(engine.surface().font_size_px, Some(12));
        assert_eq!(engine.pending_font_size_px(), None);
    }

    #[test]
    fn test_noop_request_flushes_pending_font() {
        let mut engine = engine_showing("ABC");
        engine.request_transition("ABD");
        engine.update_container_metrics(200.0, 100.0, "ABC", 9, 0.7);
        engine.request_transition("AB");
        // Deleting toward "AB"; now ask for what is on screen
        engine.request_transition("ABC");
        assert_eq!(engine.mode(), TransitionMode::Idle);
        assert_eq!(engine.surface().font_size_px, Some(9));
    }

    #[test]
    fn test_not_ready_container_is_ignored() {
        let mut engine = engine_showing("abc");
        assert_eq!(engine.update_container_metrics(0.0, 0.0, "abc", 14, 0.7), None);
        assert_eq!(engine.surface().font_size_px, None);
        assert_eq!(engine.pending_font_size_px(), None);
    }

    #[test]
    fn test_halt_keeps_text_on_screen() {
        let mut engine = engine_showing("");
        engine.request_transition(&"z".repeat(256));
        engine.tick();
        engine.halt();

        assert_eq!(engine.mode(), TransitionMode::Idle);
        assert_eq!(engine.displayed_text(), "zz");
        assert_eq!(engine.target_text(), "zz");
        assert!(!engine.tick());
    }

    #[test]
    fn test_finish_jumps_to_target() {
        let mut engine = engine_showing("old art");
        engine.request_transition("new art");
        engine.update_container_metrics(100.0, 100.0, "new art", 11, 0.7);
        engine.finish();

        assert_eq!(engine.displayed_text(), "new art");
        assert_eq!(engine.surface().text, "new art");
        assert_eq!(engine.surface().font_size_px, Some(11));
    }

    #[test]
    fn test_refit_uses_probe_once() {
        let measure = FixedMeasure {
            size: Some(ContainerSize::new(200.5, 500.0)),
            char_width_per_px: Some(0.5),
            line_height_ratio: None,
        };
        let mut engine = engine_showing(&"#".repeat(40));
        // floor(200 / 20) = 10
        assert_eq!(engine.refit_with(&measure, 64), Some(10));

        let other = FixedMeasure { char_width_per_px: Some(5.0), ..measure };
        assert_eq!(engine.refit_with(&other, 64), Some(10));
    }

    #[test]
    fn test_refit_skips_unmounted_or_empty() {
        let mounted = FixedMeasure {
            size: Some(ContainerSize::new(300.0, 300.0)),
            char_width_per_px: Some(0.6),
            line_height_ratio: Some(1.0),
        };
        let unmounted = FixedMeasure { size: None, ..mounted };

        let mut engine = engine_showing("art");
        assert_eq!(engine.refit_with(&unmounted, 14), None);

        let mut empty = engine_showing("");
        assert_eq!(empty.refit_with(&mounted, 14), None);
    }

    #[test]
    fn test_fitted_transition_first_show_applies_now() {
        let measure = FixedMeasure {
            size: Some(ContainerSize::new(100.5, 100.5)),
            char_width_per_px: Some(0.5),
            line_height_ratio: Some(1.0),
        };
        let mut engine = engine_showing("");
        engine.request_fitted_transition("0123456789", &measure, 64);

        // floor(100 / 5) = 20 by width, floor(100 / 1) by height
        assert_eq!(engine.surface().font_size_px, Some(20));
        assert_eq!(engine.mode(), TransitionMode::Typing);

        run_to_idle(&mut engine);
        let mut next = engine;
        next.request_fitted_transition("01234567890123456789", &measure, 64);
        assert_eq!(next.pending_font_size_px(), Some(10));
        assert_eq!(next.surface().font_size_px, Some(20));
        run_to_idle(&mut next);
        assert_eq!(next.surface().font_size_px, Some(10));
    }
}
