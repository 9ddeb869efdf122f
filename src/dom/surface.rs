//! Render surface backed by a DOM element

use web_sys::HtmlElement;

use crate::engine::TextSurface;

/// Writes text content and the `font-size` style of one element
#[derive(Debug, Clone)]
pub struct ElementSurface {
    element: HtmlElement,
}

impl ElementSurface {
    pub fn new(element: HtmlElement) -> Self {
        Self { element }
    }

    /// Text the element currently shows
    pub fn current_text(&self) -> String {
        self.element.text_content().unwrap_or_default()
    }
}

impl TextSurface for ElementSurface {
    fn set_text(&mut self, text: &str) {
        self.element.set_text_content(Some(text));
    }

    fn set_font_size_px(&mut self, px: u32) {
        if let Err(e) = self
            .element
            .style()
            .set_property("font-size", &format!("{}px", px))
        {
            log::warn!("failed to set font-size: {:?}", e);
        }
    }
}
