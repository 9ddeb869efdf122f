//! `AsciiTransition` JavaScript class
//!
//! Binds one engine to one `<pre>`-like element. The page decides when to
//! call it (panel change, scroll, resize); this class only animates and
//! sizes text.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::ResizeObserver;

use crate::api::helpers::{config_from_js, js_error, serialize};
use crate::dom::{html_element_by_id, DomMeasure, ElementSurface, FrameDriver};
use crate::engine::TextTransitionEngine;
use crate::models::EngineConfig;

/// Keeps a ResizeObserver and its callback alive together
struct ResizeWatch {
    observer: ResizeObserver,
    _callback: Closure<dyn FnMut(js_sys::Array)>,
}

impl Drop for ResizeWatch {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

#[wasm_bindgen]
pub struct AsciiTransition {
    driver: FrameDriver<ElementSurface>,
    measure: DomMeasure,
    resize: Option<ResizeWatch>,
}

impl AsciiTransition {
    fn attach(element_id: &str, container_id: Option<String>, config: EngineConfig) -> Result<Self, JsValue> {
        let element = html_element_by_id(element_id).map_err(js_error)?;
        let measure = match container_id {
            Some(id) => DomMeasure::with_probe_host(html_element_by_id(&id).map_err(js_error)?, element.clone()),
            None => DomMeasure::new(element.clone()),
        };

        let surface = ElementSurface::new(element);
        let initial = surface.current_text();
        let engine = TextTransitionEngine::with_text(surface, config, &initial);

        log::info!("ascii transition attached to #{}", element_id);
        Ok(Self {
            driver: FrameDriver::new(engine),
            measure,
            resize: None,
        })
    }
}

#[wasm_bindgen]
impl AsciiTransition {
    /// Attach to `elementId`. When `containerId` is given, sizes are measured
    /// on that element instead of the text element itself.
    #[wasm_bindgen(constructor)]
    pub fn new(element_id: &str, container_id: Option<String>) -> Result<AsciiTransition, JsValue> {
        Self::attach(element_id, container_id, EngineConfig::default())
    }

    /// Like the constructor, with an `EngineConfig` object or JSON string
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(
        element_id: &str,
        container_id: Option<String>,
        config: JsValue,
    ) -> Result<AsciiTransition, JsValue> {
        let config = config_from_js(config).map_err(js_error)?;
        Self::attach(element_id, container_id, config)
    }

    #[wasm_bindgen(js_name = requestTransition)]
    pub fn request_transition(&self, target: &str) {
        self.driver.request_transition(target);
    }

    /// Measure the container, size for `target`, then transition to it
    #[wasm_bindgen(js_name = transitionFitted)]
    pub fn transition_fitted(&self, target: &str, max_font_px: u32) {
        self.driver.request_fitted_transition(target, &self.measure, max_font_px);
    }

    /// Returns the computed size, or `undefined` if the container is not ready
    #[wasm_bindgen(js_name = updateContainerMetrics)]
    pub fn update_container_metrics(
        &self,
        inner_width_px: f64,
        inner_height_px: f64,
        candidate_text: &str,
        max_font_px: u32,
        line_height_ratio: f64,
    ) -> Option<u32> {
        self.driver.update_container_metrics(
            inner_width_px,
            inner_height_px,
            candidate_text,
            max_font_px,
            line_height_ratio,
        )
    }

    /// Re-measure the container and fit the current target
    pub fn refit(&self, max_font_px: u32) -> Option<u32> {
        self.driver.refit(&self.measure, max_font_px)
    }

    /// Refit on every container resize until this object is freed
    #[wasm_bindgen(js_name = observeResize)]
    pub fn observe_resize(&mut self, max_font_px: u32) -> Result<(), JsValue> {
        let driver = self.driver.clone();
        let measure = self.measure.clone();
        let callback = Closure::<dyn FnMut(js_sys::Array)>::new(move |_entries: js_sys::Array| {
            driver.refit(&measure, max_font_px);
        });

        let observer = ResizeObserver::new(callback.as_ref().unchecked_ref())?;
        observer.observe(self.measure.container());

        // Replacing an older watch disconnects it
        self.resize = Some(ResizeWatch { observer, _callback: callback });
        Ok(())
    }

    /// Stop animating and keep whatever is on screen
    pub fn halt(&self) {
        self.driver.halt();
    }

    /// Stop animating and show the target now
    pub fn finish(&self) {
        self.driver.finish();
    }

    #[wasm_bindgen(js_name = isAnimating)]
    pub fn is_animating(&self) -> bool {
        self.driver.is_animating()
    }

    #[wasm_bindgen(js_name = displayedText)]
    pub fn displayed_text(&self) -> String {
        self.driver.engine().displayed_text().to_string()
    }

    /// 0 = idle, 1 = deleting, 2 = typing
    pub fn mode(&self) -> u8 {
        self.driver.engine().mode() as u8
    }

    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        serialize(&self.driver.snapshot(), "Failed to serialize transition snapshot")
    }
}
