//! Per-frame orchestration.
//!
//! A [`Session`] owns every piece of mutable recognition state and runs
//! extraction, classification, debouncing and composition for one frame at a
//! time. It performs no I/O; callers feed frames in and read a
//! [`RenderState`] back out for display.

use crate::config::Config;
use crate::core::classifier::GestureClassifier;
use crate::core::compose::{CompositionEngine, CompositionState, Mutation};
use crate::core::debounce::{GestureDebouncer, GestureEvent};
use crate::core::features::{extract_angles, FeatureError};
use crate::core::gesture::GestureLabel;
use crate::source::types::HandFrame;
use crate::stats::{create_shared_stats, SharedStats};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Result of processing one frame.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameOutcome {
    /// No hand in the frame; state unchanged.
    NoHand,
    /// Landmarks could not be turned into features; state unchanged.
    Skipped(FeatureError),
    /// The hand was classified. `event` is set when the debouncer accepted
    /// the label, and `mutation` describes what that did to the text.
    Classified {
        label: GestureLabel,
        event: Option<GestureEvent>,
        mutation: Option<Mutation>,
    },
}

impl FrameOutcome {
    pub fn event(&self) -> Option<GestureEvent> {
        match self {
            FrameOutcome::Classified { event, .. } => *event,
            _ => None,
        }
    }
}

/// Debug overlay values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebugInfo {
    /// Most recently accepted gesture
    pub last_label: Option<GestureLabel>,
    /// Consonant waiting for a possible tensing repeat
    pub pending_consonant: Option<GestureLabel>,
    pub seconds_since_pending: Option<f64>,
    pub seconds_since_accepted: f64,
}

/// Everything a renderer needs to draw the current text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderState {
    pub session_id: Uuid,
    pub sentence: String,
    pub jamo_buffer: String,
    /// Sentence plus the buffer composed as if committed now
    pub preview: String,
    pub debug: DebugInfo,
}

/// Owns the recognition pipeline for one signer.
pub struct Session {
    id: Uuid,
    classifier: GestureClassifier,
    debouncer: GestureDebouncer,
    engine: CompositionEngine,
    stats: SharedStats,
}

impl Session {
    /// Create a session. The hold interval starts counting at `started_at`.
    pub fn new(config: &Config, classifier: GestureClassifier, started_at: DateTime<Utc>) -> Self {
        Self::with_stats(config, classifier, started_at, create_shared_stats())
    }

    /// Create a session that records into existing statistics.
    pub fn with_stats(
        config: &Config,
        classifier: GestureClassifier,
        started_at: DateTime<Utc>,
        stats: SharedStats,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            classifier,
            debouncer: GestureDebouncer::new(config.debounce_settings(), started_at),
            engine: CompositionEngine::new(),
            stats,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn stats(&self) -> &SharedStats {
        &self.stats
    }

    pub fn composition(&self) -> &CompositionState {
        self.engine.state()
    }

    pub fn debouncer(&self) -> &GestureDebouncer {
        &self.debouncer
    }

    /// Process one frame. The frame timestamp is the clock for every timing
    /// decision made during this tick; unstamped frames use the current time.
    pub fn tick(&mut self, frame: &HandFrame) -> FrameOutcome {
        let now = frame.timestamp_or(Utc::now());
        self.stats.record_frame(frame.has_hand());

        let Some(landmarks) = frame.landmarks.as_ref() else {
            return FrameOutcome::NoHand;
        };

        let angles = match extract_angles(landmarks) {
            Ok(angles) => angles,
            Err(e) => {
                tracing::warn!("Skipping frame at {}: {}", now, e);
                self.stats.record_degenerate_frame();
                return FrameOutcome::Skipped(e);
            }
        };

        let label = self.classifier.classify(&angles);
        tracing::trace!("Frame classified as {}", label.name());

        let event = self.debouncer.observe(label, now);
        let mutation = event.map(|e| self.apply(e));

        FrameOutcome::Classified {
            label,
            event,
            mutation,
        }
    }

    fn apply(&mut self, event: GestureEvent) -> Mutation {
        self.stats.record_gesture_accepted();
        let mutation = self.engine.apply(event);
        match mutation {
            Mutation::Tensed { .. } => self.stats.record_tense_merge(),
            Mutation::Committed { .. } => self.stats.record_commit(),
            Mutation::Cleared => self.stats.record_clear(),
            _ => {}
        }
        mutation
    }

    /// Current text and debug values as of `now`.
    pub fn render_state(&self, now: DateTime<Utc>) -> RenderState {
        let state = self.engine.state();
        RenderState {
            session_id: self.id,
            sentence: state.sentence.clone(),
            jamo_buffer: state.jamo_buffer.clone(),
            preview: self.engine.preview(),
            debug: DebugInfo {
                last_label: self.debouncer.last_label(),
                pending_consonant: self.debouncer.pending().map(|p| p.label),
                seconds_since_pending: self.debouncer.seconds_since_pending(now),
                seconds_since_accepted: self.debouncer.seconds_since_accepted(now),
            },
        }
    }
}
