//! DOM helpers: viewport geometry and the text selection lock.

use log::warn;
use std::fmt;
use tap_titan::Coordinate;
use wasm_bindgen::JsValue;
use web_sys::Element;

/// DOM access error types
#[derive(Debug)]
pub enum DomError {
    NoWindow,
    NoBody,
    ViewportUnavailable,
    Style(String),
}

impl fmt::Display for DomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomError::NoWindow => write!(f, "No global window"),
            DomError::NoBody => write!(f, "Document has no body"),
            DomError::ViewportUnavailable => write!(f, "Viewport size is not a number"),
            DomError::Style(msg) => write!(f, "Failed to update body style: {}", msg),
        }
    }
}

impl std::error::Error for DomError {}

fn js_number(value: Result<JsValue, JsValue>) -> Result<f64, DomError> {
    value
        .ok()
        .and_then(|v| v.as_f64())
        .ok_or(DomError::ViewportUnavailable)
}

/// Center of the visible viewport.
pub fn viewport_center() -> Result<Coordinate, DomError> {
    let window = web_sys::window().ok_or(DomError::NoWindow)?;
    let width = js_number(window.inner_width())?;
    let height = js_number(window.inner_height())?;
    Ok(Coordinate::center_of(width, height))
}

/// Viewport center, or the origin when the viewport cannot be measured.
pub fn viewport_center_or_origin() -> Coordinate {
    viewport_center().unwrap_or_else(|e| {
        warn!("Falling back to origin: {}", e);
        Coordinate::ORIGIN
    })
}

/// Center of an element's bounding box in viewport space.
pub fn element_center(element: &Element) -> Coordinate {
    let rect = element.get_bounding_client_rect();
    Coordinate::new(
        rect.left() + rect.width() / 2.0,
        rect.top() + rect.height() / 2.0,
    )
}

/// Enable or suppress text selection on the whole document.
pub fn set_text_selection(enabled: bool) -> Result<(), DomError> {
    let body = gloo_utils::document().body().ok_or(DomError::NoBody)?;
    let value = if enabled { "" } else { "none" };
    body.style()
        .set_property("user-select", value)
        .map_err(|e| DomError::Style(format!("{:?}", e)))
}

/// Like [`set_text_selection`], logging instead of failing.
pub fn set_text_selection_or_warn(enabled: bool) {
    if let Err(e) = set_text_selection(enabled) {
        warn!("{}", e);
    }
}
