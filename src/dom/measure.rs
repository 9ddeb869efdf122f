//! Container measurement through the DOM

use wasm_bindgen::JsCast;
use web_sys::{CssStyleDeclaration, HtmlElement};

use crate::dom::{document, window, DomError};
use crate::engine::ContainerMeasure;
use crate::models::ContainerSize;

/// CSS custom property a container can set to override the line-height ratio
pub const LINE_HEIGHT_VAR: &str = "--ascii-line-height";

/// Font size the char width probe renders at
const PROBE_FONT_PX: f64 = 100.0;

/// Monospace stack used by the probe
const PROBE_FONT_FAMILY: &str = "MS UI Gothic, monospace";

/// Measures a container element.
///
/// Sizes always come from `container` with its padding removed. The char
/// width probe is rendered inside `probe_host`, normally the text element, so
/// it picks up the text's font.
#[derive(Debug, Clone)]
pub struct DomMeasure {
    container: HtmlElement,
    probe_host: HtmlElement,
}

impl DomMeasure {
    pub fn new(container: HtmlElement) -> Self {
        Self { probe_host: container.clone(), container }
    }

    /// Measure `container`, probing char width inside `text`
    pub fn with_probe_host(container: HtmlElement, text: HtmlElement) -> Self {
        Self { container, probe_host: text }
    }

    pub fn container(&self) -> &HtmlElement {
        &self.container
    }

    fn computed_style(element: &HtmlElement) -> Option<CssStyleDeclaration> {
        window().ok()?.get_computed_style(element).ok().flatten()
    }

    fn probe(&self) -> Result<f64, DomError> {
        let probe = document()?
            .create_element("div")?
            .dyn_into::<HtmlElement>()
            .map_err(|_| DomError::Js("probe is not an HTML element".into()))?;

        let style = probe.style();
        for (name, value) in [
            ("position", "absolute"),
            ("visibility", "hidden"),
            ("white-space", "nowrap"),
            ("left", "-9999px"),
            ("top", "0"),
            ("font-family", PROBE_FONT_FAMILY),
            ("font-size", "100px"),
            ("line-height", "100px"),
            ("width", "1ch"),
        ] {
            style.set_property(name, value)?;
        }
        probe.set_text_content(Some("0"));

        self.probe_host.append_child(&probe)?;
        let width = probe.get_bounding_client_rect().width();
        probe.remove();

        Ok(width / PROBE_FONT_PX)
    }
}

impl ContainerMeasure for DomMeasure {
    fn inner_size(&self) -> Option<ContainerSize> {
        let element = &self.container;
        if !element.is_connected() {
            return None;
        }

        let (pad_l, pad_r, pad_t, pad_b) = match Self::computed_style(element) {
            Some(cs) => (
                px_property(&cs, "padding-left"),
                px_property(&cs, "padding-right"),
                px_property(&cs, "padding-top"),
                px_property(&cs, "padding-bottom"),
            ),
            None => (0.0, 0.0, 0.0, 0.0),
        };

        let width = (element.client_width() as f64 - pad_l - pad_r).max(0.0);
        let height = (element.client_height() as f64 - pad_t - pad_b).max(0.0);
        Some(ContainerSize::new(width, height))
    }

    fn probe_char_width_per_px(&self) -> Option<f64> {
        match self.probe() {
            Ok(ratio) => Some(ratio),
            Err(e) => {
                log::warn!("char width probe failed: {}", e);
                None
            }
        }
    }

    fn line_height_ratio(&self) -> Option<f64> {
        let cs = Self::computed_style(&self.container)?;
        let raw = cs.get_property_value(LINE_HEIGHT_VAR).ok()?;
        parse_ratio(&raw)
    }
}

fn px_property(style: &CssStyleDeclaration, name: &str) -> f64 {
    style
        .get_property_value(name)
        .ok()
        .and_then(|v| parse_px(&v))
        .unwrap_or(0.0)
}

/// Parse a computed CSS length such as `"12.5px"`
pub fn parse_px(value: &str) -> Option<f64> {
    let value = value.trim();
    let number = value.strip_suffix("px").unwrap_or(value).trim();
    number.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a unitless positive ratio such as `" 1.05"`
pub fn parse_ratio(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_px() {
        assert_eq!(parse_px("12px"), Some(12.0));
        assert_eq!(parse_px(" 12.5px "), Some(12.5));
        assert_eq!(parse_px("0"), Some(0.0));
        assert_eq!(parse_px(""), None);
        assert_eq!(parse_px("auto"), None);
    }

    #[test]
    fn test_parse_ratio() {
        assert_eq!(parse_ratio(" 1.05"), Some(1.05));
        assert_eq!(parse_ratio("0"), None);
        assert_eq!(parse_ratio(""), None);
        assert_eq!(parse_ratio("normal"), None);
    }
}
