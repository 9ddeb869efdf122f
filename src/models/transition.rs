//! Transition phase and read-only state snapshot

use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};

/// Phase of the delete-then-type animation
///
/// Serialized as a number so JavaScript can switch on it cheaply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize_repr, Deserialize_repr)]
#[repr(u8)]
pub enum TransitionMode {
    /// Nothing in flight; displayed text equals the target
    #[default]
    Idle = 0,
    /// Removing the differing suffix of the old text
    Deleting = 1,
    /// Appending the differing suffix of the target
    Typing = 2,
}

impl TransitionMode {
    pub fn is_idle(self) -> bool {
        self == TransitionMode::Idle
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TransitionMode::Idle => "idle",
            TransitionMode::Deleting => "deleting",
            TransitionMode::Typing => "typing",
        }
    }
}

impl std::fmt::Display for TransitionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Serializable view of the engine state
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransitionSnapshot {
    pub mode: TransitionMode,

    /// Text currently on screen
    pub displayed_text: String,

    /// Text the engine is converging toward
    pub target_text: String,

    /// Steps taken in the active phase
    pub step_index: usize,

    /// Step budget of the active phase
    pub total_steps: usize,

    /// Chars shared between the text at transition start and the target
    pub common_prefix_len: usize,

    /// Chars moved per step in the active phase
    pub chunk_len: usize,

    /// Font size waiting for the transition to finish
    pub pending_font_size_px: Option<u32>,

    /// Font size last pushed to the surface
    pub applied_font_size_px: Option<u32>,

    /// Frames spent on the current (or last) transition
    pub frames_consumed: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_serializes_as_number() {
        assert_eq!(serde_json::to_string(&TransitionMode::Idle).unwrap(), "0");
        assert_eq!(serde_json::to_string(&TransitionMode::Typing).unwrap(), "2");
        let mode: TransitionMode = serde_json::from_str("1").unwrap();
        assert_eq!(mode, TransitionMode::Deleting);
    }

    #[test]
    fn test_snapshot_uses_camel_case() {
        let snap = TransitionSnapshot {
            mode: TransitionMode::Idle,
            displayed_text: "AB".into(),
            target_text: "AB".into(),
            step_index: 0,
            total_steps: 0,
            common_prefix_len: 2,
            chunk_len: 0,
            pending_font_size_px: None,
            applied_font_size_px: Some(12),
            frames_consumed: 0,
        };
        let json = serde_json::to_value(&snap).unwrap();
        assert_eq!(json["displayedText"], "AB");
        assert_eq!(json["appliedFontSizePx"], 12);
        assert!(json["pendingFontSizePx"].is_null());
    }
}
