//! Models module for the transition engine
//!
//! Plain data: the animation phase, the engine configuration and the
//! measured container geometry.

pub mod config;
pub mod container;
pub mod transition;

// Re-export commonly used types
pub use config::*;
pub use container::ContainerSize;
pub use transition::{TransitionMode, TransitionSnapshot};
