//! Transition engine
//!
//! Pure Rust, no DOM. The host supplies a [`TextSurface`] to draw into and,
//! optionally, a [`ContainerMeasure`] for layout queries.
//!
//! ## Modules
//!
//! - `transition`: Delete-then-type state machine
//! - `font_fit`: Largest-fitting font size and the char width cache
//! - `surface`: Host seams plus in-memory implementations

pub mod font_fit;
pub mod surface;
pub mod transition;

pub use font_fit::{fit_font_size, CharWidthCache, FitRequest};
pub use surface::{ContainerMeasure, FixedMeasure, MemorySurface, TextSurface};
pub use transition::TextTransitionEngine;
