//! ASCII Transition WASM Module
//!
//! Animates a text box between two strings (ASCII art or prose) by keeping
//! their common prefix, deleting the old suffix and typing the new one, and
//! sizes the font so the text fits its container.
//!
//! The engine in [`engine`] is plain Rust and runs anywhere; [`dom`] and
//! [`api`] bind it to the browser.

pub mod api;
pub mod dom;
pub mod engine;
pub mod models;
pub mod text;

// Re-export commonly used types
pub use engine::{ContainerMeasure, MemorySurface, TextSurface, TextTransitionEngine};
pub use models::{ContainerSize, EngineConfig, TransitionMode, TransitionSnapshot};
pub use api::AsciiTransition;

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    init_logging();

    log::info!("ASCII transition WASM module initialized");
}

#[cfg(feature = "console_log")]
fn init_logging() {
    if console_log::init_with_level(log::Level::Debug).is_err() {
        // The host page installed a logger first
        log::debug!("logger already initialized");
    }
}

#[cfg(not(feature = "console_log"))]
fn init_logging() {}
