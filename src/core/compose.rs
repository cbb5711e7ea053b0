//! Text composition driven by accepted gesture events.
//!
//! The engine keeps two strings: the committed sentence and the jamo typed
//! since the last commit. A NEXT gesture composes the jamo buffer into
//! syllable blocks and appends them to the sentence.

use crate::core::debounce::GestureEvent;
use crate::core::gesture::GestureLabel;
use crate::core::hangul;
use serde::{Deserialize, Serialize};

/// The text produced so far.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositionState {
    /// Committed syllables and spaces
    pub sentence: String,
    /// Jamo typed since the last commit, not yet composed
    pub jamo_buffer: String,
}

/// What an event did to the composition state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Mutation {
    /// A jamo was appended to the buffer.
    Appended { jamo: char },
    /// The last buffered jamo was replaced by its tensed form.
    Tensed { jamo: char },
    /// A space was appended to the sentence.
    Spaced,
    /// The buffer was composed and appended to the sentence.
    Committed { text: String },
    /// Both sentence and buffer were reset.
    Cleared,
    /// The event had no effect.
    Ignored,
}

/// Applies gesture events to a [`CompositionState`].
#[derive(Debug, Clone, Default)]
pub struct CompositionEngine {
    state: CompositionState,
}

impl CompositionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &CompositionState {
        &self.state
    }

    pub fn sentence(&self) -> &str {
        &self.state.sentence
    }

    pub fn jamo_buffer(&self) -> &str {
        &self.state.jamo_buffer
    }

    /// Sentence followed by the buffer as it would read if committed now.
    pub fn preview(&self) -> String {
        let mut text = self.state.sentence.clone();
        text.push_str(&hangul::compose(&self.state.jamo_buffer));
        text
    }

    /// Apply one accepted gesture.
    pub fn apply(&mut self, event: GestureEvent) -> Mutation {
        let mutation = match event {
            GestureEvent::Consonant(label) => self.append(label),
            GestureEvent::Tense(label) => self.tense(label),
            GestureEvent::Other(GestureLabel::Space) => {
                self.state.sentence.push(' ');
                Mutation::Spaced
            }
            GestureEvent::Other(GestureLabel::Clear) => {
                self.clear();
                Mutation::Cleared
            }
            GestureEvent::Other(GestureLabel::Next) => self.commit(),
            GestureEvent::Other(label) => self.append(label),
        };

        match &mutation {
            Mutation::Committed { text } => tracing::info!("Committed \"{}\"", text),
            Mutation::Cleared => tracing::info!("Cleared sentence and jamo buffer"),
            Mutation::Ignored => tracing::debug!("Ignored {:?}", event),
            other => tracing::debug!("{:?}", other),
        }
        mutation
    }

    /// Reset both sentence and buffer.
    pub fn clear(&mut self) {
        self.state = CompositionState::default();
    }

    fn append(&mut self, label: GestureLabel) -> Mutation {
        match label.jamo() {
            Some(jamo) => {
                self.state.jamo_buffer.push(jamo);
                Mutation::Appended { jamo }
            }
            None => Mutation::Ignored,
        }
    }

    fn tense(&mut self, label: GestureLabel) -> Mutation {
        let Some(jamo) = label.tensed_jamo() else {
            return Mutation::Ignored;
        };
        // a tense event always follows its plain consonant; an empty buffer
        // means that consonant was cleared or committed in between
        if self.state.jamo_buffer.pop().is_none() {
            return Mutation::Ignored;
        }
        self.state.jamo_buffer.push(jamo);
        Mutation::Tensed { jamo }
    }

    fn commit(&mut self) -> Mutation {
        let text = hangul::compose(&std::mem::take(&mut self.state.jamo_buffer));
        self.state.sentence.push_str(&text);
        Mutation::Committed { text }
    }
}
