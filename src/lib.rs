//! Hangul Sign - Korean fingerspelling recognition from hand landmarks.
//!
//! This library turns a stream of hand-pose frames (21 3D landmarks per
//! frame, as produced by an external hand tracker) into Hangul text. Each
//! frame's pose is classified into one of 22 gestures, and accepted gestures
//! drive a jamo composition engine.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                           Hangul Sign                            │
//! ├──────────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐   ┌───────────┐   ┌────────────┐   ┌───────────┐  │
//! │  │  Frames   │──▶│  Angles   │──▶│   k-NN     │──▶│ Debouncer │  │
//! │  │ (source)  │   │ (15 dims) │   │ classifier │   │ hold/tense│  │
//! │  └───────────┘   └───────────┘   └────────────┘   └───────────┘  │
//! │                                                         │        │
//! │                                                         ▼        │
//! │  ┌───────────┐                                   ┌───────────┐   │
//! │  │  Session  │◀──────────────────────────────────│Composition│   │
//! │  │   stats   │                                   │  engine   │   │
//! │  └───────────┘                                   └───────────┘   │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use chrono::Utc;
//! use hangul_sign::{Config, GestureClassifier, HandFrame, ReferenceSet, Session};
//!
//! let config = Config::load().expect("Failed to load config");
//! let reference = ReferenceSet::load(&config.dataset_path).expect("Failed to load dataset");
//! let classifier = GestureClassifier::new(reference, config.k).expect("Empty dataset");
//! let mut session = Session::new(&config, classifier, Utc::now());
//!
//! // Frames come from a hand tracker; `None` landmarks mean no hand.
//! let frame = HandFrame::empty_at(Utc::now());
//! session.tick(&frame);
//! println!("{}", session.render_state(Utc::now()).preview);
//! ```

pub mod config;
pub mod core;
pub mod source;
pub mod stats;

// Re-export key types at crate root for convenience
pub use config::{Config, ConfigError};
pub use crate::core::{
    extract_angles, hangul, CompositionEngine, CompositionState, FrameOutcome, GestureClassifier,
    GestureEvent, GestureLabel, Mutation, ReferenceSet, RenderState, Session,
};
pub use source::{FrameReader, HandFrame, HandLandmarks, Joint};
pub use stats::{SessionStats, SharedStats, StatsSnapshot};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
