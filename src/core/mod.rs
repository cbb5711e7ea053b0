//! Core recognition pipeline.
//!
//! This module contains:
//! - Joint-angle feature extraction
//! - Reference dataset loading and k-NN classification
//! - Debouncing of per-frame labels into gesture events
//! - Jamo composition and the per-frame session driver

pub mod classifier;
pub mod compose;
pub mod dataset;
pub mod debounce;
pub mod features;
pub mod gesture;
pub mod hangul;
pub mod session;

// Re-export commonly used types
pub use classifier::{ClassifierError, GestureClassifier, DEFAULT_K};
pub use compose::{CompositionEngine, CompositionState, Mutation};
pub use dataset::{DatasetError, ReferenceSample, ReferenceSet};
pub use debounce::{DebounceSettings, GestureDebouncer, GestureEvent, PendingConsonant};
pub use features::{extract_angles, AngleVector, FeatureError, ANGLE_COUNT};
pub use gesture::{GestureCategory, GestureLabel};
pub use session::{DebugInfo, FrameOutcome, RenderState, Session};
