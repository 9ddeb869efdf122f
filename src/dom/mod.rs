//! Browser bindings
//!
//! `web-sys` implementations of the engine seams, plus the
//! `requestAnimationFrame` driver that ticks the engine.

pub mod error;
pub mod frame;
pub mod measure;
pub mod surface;

pub use error::DomError;
pub use frame::FrameDriver;
pub use measure::DomMeasure;
pub use surface::ElementSurface;

use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, Window};

pub fn window() -> Result<Window, DomError> {
    web_sys::window().ok_or(DomError::NoWindow)
}

pub fn document() -> Result<Document, DomError> {
    window()?.document().ok_or(DomError::NoDocument)
}

/// Look up an element by id and view it as an `HtmlElement`
pub fn html_element_by_id(id: &str) -> Result<HtmlElement, DomError> {
    document()?
        .get_element_by_id(id)
        .ok_or_else(|| DomError::ElementNotFound(id.to_string()))?
        .dyn_into::<HtmlElement>()
        .map_err(|_| DomError::NotHtmlElement(id.to_string()))
}
