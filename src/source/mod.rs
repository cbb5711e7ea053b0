//! Hand-pose input for the recognizer.
//!
//! Landmark detection itself happens outside this crate. This module defines
//! the per-frame contract with that detector and a reader that replays
//! recorded detector output.

pub mod jsonl;
pub mod types;

// Re-export commonly used types
pub use jsonl::{FrameReader, SourceError};
pub use types::{HandFrame, HandLandmarks, Joint, LANDMARK_COUNT};
