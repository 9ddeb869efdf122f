//! Seams between the engine and its host
//!
//! The engine never touches a UI toolkit directly. It writes through a
//! [`TextSurface`] and asks a [`ContainerMeasure`] for layout facts.

use crate::models::ContainerSize;

/// Something that shows text and has a font size
pub trait TextSurface {
    /// Replace the rendered text
    fn set_text(&mut self, text: &str);

    /// Change the rendered font size, in pixels
    fn set_font_size_px(&mut self, px: u32);
}

/// Layout queries against the container the text lives in
pub trait ContainerMeasure {
    /// Padding-excluded inner size, or `None` when the container is not
    /// mounted yet
    fn inner_size(&self) -> Option<ContainerSize>;

    /// Rendered width of one character per pixel of font size
    fn probe_char_width_per_px(&self) -> Option<f64>;

    /// Line-height ratio the container asks for, if it sets one
    fn line_height_ratio(&self) -> Option<f64> {
        None
    }
}

/// In-memory surface for headless hosts and tests
///
/// Records every write so callers can replay what the screen went through.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemorySurface {
    pub text: String,
    pub font_size_px: Option<u32>,
    /// Every text the engine pushed, in order
    pub text_history: Vec<String>,
    /// Every font size the engine pushed, in order
    pub font_history: Vec<u32>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Surface that already shows `text`
    pub fn showing(text: &str) -> Self {
        Self {
            text: text.to_string(),
            ..Self::default()
        }
    }
}

impl TextSurface for MemorySurface {
    fn set_text(&mut self, text: &str) {
        self.text.clear();
        self.text.push_str(text);
        self.text_history.push(text.to_string());
    }

    fn set_font_size_px(&mut self, px: u32) {
        self.font_size_px = Some(px);
        self.font_history.push(px);
    }
}

/// Fixed measurements, for hosts that already know their geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedMeasure {
    pub size: Option<ContainerSize>,
    pub char_width_per_px: Option<f64>,
    pub line_height_ratio: Option<f64>,
}

impl ContainerMeasure for FixedMeasure {
    fn inner_size(&self) -> Option<ContainerSize> {
        self.size
    }

    fn probe_char_width_per_px(&self) -> Option<f64> {
        self.char_width_per_px
    }

    fn line_height_ratio(&self) -> Option<f64> {
        self.line_height_ratio
    }
}
