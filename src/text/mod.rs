//! Plain text helpers
//!
//! Char-based prefix diffing, slicing and line metrics. No knowledge of the
//! DOM or of the animation state machine.
//!
//! ## Modules
//!
//! - `prefix`: Common-prefix computation and char-indexed slicing
//! - `metrics`: Longest line / line count of a text block

pub mod prefix;
pub mod metrics;

// Re-exports for convenience
pub use prefix::{common_prefix_len, char_len, char_slice, chunk_size};
pub use metrics::TextMetrics;
