//! Transition engine WASM API
//!
//! JavaScript-facing surface of the crate.
//!
//! # Module Structure
//!
//! - `helpers`: Serialization, config loading and error conversion
//! - `transition`: The `AsciiTransition` class

pub mod helpers;
pub mod transition;

pub use transition::AsciiTransition;
