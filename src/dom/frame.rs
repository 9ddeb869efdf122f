//! Frame-driven animation loop
//!
//! One engine step per `requestAnimationFrame` callback. Starting a new
//! transition cancels the outstanding frame and schedules a fresh chain.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::dom::window;
use crate::engine::{ContainerMeasure, TextSurface, TextTransitionEngine};
use crate::models::TransitionSnapshot;

struct FrameState<S: TextSurface + 'static> {
    engine: TextTransitionEngine<S>,
    frame_id: Option<i32>,
    on_frame: Option<Closure<dyn FnMut()>>,
}

impl<S: TextSurface + 'static> FrameState<S> {
    fn schedule(&mut self) {
        if self.frame_id.is_some() {
            return;
        }
        let Some(callback) = self.on_frame.as_ref() else {
            return;
        };

        let scheduled = window().and_then(|w| {
            w.request_animation_frame(callback.as_ref().unchecked_ref())
                .map_err(Into::into)
        });
        match scheduled {
            Ok(id) => self.frame_id = Some(id),
            Err(e) => {
                // No frame scheduler: show the end state rather than stall
                log::warn!("requestAnimationFrame unavailable ({}), finishing transition", e);
                self.engine.finish();
            }
        }
    }

    fn cancel(&mut self) {
        if let Some(id) = self.frame_id.take() {
            if let Ok(w) = window() {
                if let Err(e) = w.cancel_animation_frame(id) {
                    log::warn!("cancelAnimationFrame failed: {:?}", e);
                }
            }
        }
    }

    fn on_frame(&mut self) {
        self.frame_id = None;
        if self.engine.tick() {
            self.schedule();
        }
    }
}

impl<S: TextSurface + 'static> Drop for FrameState<S> {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Shared handle to an engine and its frame loop
///
/// Clones share the same engine. The loop stops when the last handle drops.
pub struct FrameDriver<S: TextSurface + 'static> {
    state: Rc<RefCell<FrameState<S>>>,
}

impl<S: TextSurface + 'static> Clone for FrameDriver<S> {
    fn clone(&self) -> Self {
        Self { state: Rc::clone(&self.state) }
    }
}

impl<S: TextSurface + 'static> FrameDriver<S> {
    pub fn new(engine: TextTransitionEngine<S>) -> Self {
        let state = Rc::new(RefCell::new(FrameState {
            engine,
            frame_id: None,
            on_frame: None,
        }));

        let weak = Rc::downgrade(&state);
        let callback = Closure::<dyn FnMut()>::new(move || {
            if let Some(state) = weak.upgrade() {
                state.borrow_mut().on_frame();
            }
        });
        state.borrow_mut().on_frame = Some(callback);

        Self { state }
    }

    /// Start a transition and keep ticking it once per frame
    pub fn request_transition(&self, target: &str) {
        let mut state = self.state.borrow_mut();
        state.cancel();
        state.engine.request_transition(target);
        if state.engine.is_animating() {
            state.schedule();
        }
    }

    /// Size for `target` from live measurements, then transition to it
    pub fn request_fitted_transition<M: ContainerMeasure>(&self, target: &str, measure: &M, max_font_px: u32) {
        let mut state = self.state.borrow_mut();
        state.cancel();
        state.engine.request_fitted_transition(target, measure, max_font_px);
        if state.engine.is_animating() {
            state.schedule();
        }
    }

    pub fn update_container_metrics(
        &self,
        inner_width_px: f64,
        inner_height_px: f64,
        candidate_text: &str,
        max_font_px: u32,
        line_height_ratio: f64,
    ) -> Option<u32> {
        self.state.borrow_mut().engine.update_container_metrics(
            inner_width_px,
            inner_height_px,
            candidate_text,
            max_font_px,
            line_height_ratio,
        )
    }

    pub fn refit<M: ContainerMeasure>(&self, measure: &M, max_font_px: u32) -> Option<u32> {
        self.state.borrow_mut().engine.refit_with(measure, max_font_px)
    }

    /// Stop the loop and leave the current text on screen
    pub fn halt(&self) {
        let mut state = self.state.borrow_mut();
        state.cancel();
        state.engine.halt();
    }

    /// Stop the loop and show the target immediately
    pub fn finish(&self) {
        let mut state = self.state.borrow_mut();
        state.cancel();
        state.engine.finish();
    }

    pub fn is_animating(&self) -> bool {
        self.state.borrow().engine.is_animating()
    }

    /// True while a frame callback is queued
    pub fn has_pending_frame(&self) -> bool {
        self.state.borrow().frame_id.is_some()
    }

    pub fn snapshot(&self) -> TransitionSnapshot {
        self.state.borrow().engine.snapshot()
    }

    /// Borrow the engine for read-only queries
    pub fn engine(&self) -> Ref<'_, TextTransitionEngine<S>> {
        Ref::map(self.state.borrow(), |s| &s.engine)
    }
}
