//! Turns per-frame classifications into discrete gesture events.
//!
//! A classifier runs on every frame, so a held hand shape produces the same
//! label dozens of times per second. The debouncer accepts at most one label
//! per hold interval and recognizes a repeated tensable consonant within the
//! tense window as a request to double it.

use crate::core::gesture::GestureLabel;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// An accepted gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "label", rename_all = "snake_case")]
pub enum GestureEvent {
    /// A tensable consonant accepted as a plain consonant.
    Consonant(GestureLabel),
    /// The same tensable consonant accepted again within the tense window.
    Tense(GestureLabel),
    /// Any other accepted gesture: vowels, the remaining consonants and
    /// controls.
    Other(GestureLabel),
}

impl GestureEvent {
    pub fn label(&self) -> GestureLabel {
        match self {
            GestureEvent::Consonant(l) | GestureEvent::Tense(l) | GestureEvent::Other(l) => *l,
        }
    }
}

/// Timing parameters for the debouncer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceSettings {
    /// Minimum time between two accepted gestures
    pub hold_interval: Duration,
    /// Window in which a repeated consonant is tensed
    pub tense_window: Duration,
}

impl Default for DebounceSettings {
    fn default() -> Self {
        Self {
            hold_interval: Duration::milliseconds(2000),
            tense_window: Duration::milliseconds(1500),
        }
    }
}

/// Consonant that may still be tensed by a repeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingConsonant {
    pub label: GestureLabel,
    pub accepted_at: DateTime<Utc>,
}

/// Dwell gate and tense detector.
#[derive(Debug, Clone)]
pub struct GestureDebouncer {
    settings: DebounceSettings,
    last_accepted: DateTime<Utc>,
    last_label: Option<GestureLabel>,
    pending: Option<PendingConsonant>,
}

impl GestureDebouncer {
    /// Create a debouncer. The first gesture is accepted one hold interval
    /// after `started_at`.
    pub fn new(settings: DebounceSettings, started_at: DateTime<Utc>) -> Self {
        Self {
            settings,
            last_accepted: started_at,
            last_label: None,
            pending: None,
        }
    }

    /// Feed one classified frame.
    pub fn observe(&mut self, label: GestureLabel, now: DateTime<Utc>) -> Option<GestureEvent> {
        if now - self.last_accepted < self.settings.hold_interval {
            return None;
        }

        let event = if label.is_tensable() {
            match self.pending {
                Some(p) if p.label == label && now - p.accepted_at < self.settings.tense_window => {
                    self.pending = None;
                    GestureEvent::Tense(label)
                }
                // a different consonant replaces the pending candidate
                _ => {
                    self.pending = Some(PendingConsonant {
                        label,
                        accepted_at: now,
                    });
                    GestureEvent::Consonant(label)
                }
            }
        } else {
            self.pending = None;
            GestureEvent::Other(label)
        };

        self.last_accepted = now;
        self.last_label = Some(label);
        tracing::debug!("Accepted gesture {} as {:?}", label.name(), event);
        Some(event)
    }

    pub fn last_label(&self) -> Option<GestureLabel> {
        self.last_label
    }

    pub fn pending(&self) -> Option<PendingConsonant> {
        self.pending
    }

    /// Seconds elapsed since the last accepted gesture.
    pub fn seconds_since_accepted(&self, now: DateTime<Utc>) -> f64 {
        seconds(now - self.last_accepted)
    }

    /// Seconds elapsed since the pending consonant was accepted.
    pub fn seconds_since_pending(&self, now: DateTime<Utc>) -> Option<f64> {
        self.pending.map(|p| seconds(now - p.accepted_at))
    }
}

fn seconds(d: Duration) -> f64 {
    d.num_milliseconds() as f64 / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(t0: DateTime<Utc>, ms: i64) -> DateTime<Utc> {
        t0 + Duration::milliseconds(ms)
    }

    fn fast_settings() -> DebounceSettings {
        DebounceSettings {
            hold_interval: Duration::milliseconds(1000),
            tense_window: Duration::milliseconds(1500),
        }
    }

    #[test]
    fn test_hold_gate_from_start() {
        let t0 = Utc::now();
        let mut d = GestureDebouncer::new(DebounceSettings::default(), t0);

        assert_eq!(d.observe(GestureLabel::A, at(t0, 500)), None);
        assert_eq!(d.observe(GestureLabel::A, at(t0, 1999)), None);
        assert_eq!(
            d.observe(GestureLabel::A, at(t0, 2000)),
            Some(GestureEvent::Other(GestureLabel::A))
        );
    }

    #[test]
    fn test_one_event_per_hold_window() {
        let t0 = Utc::now();
        let mut d = GestureDebouncer::new(DebounceSettings::default(), t0);

        // 30 fps for ten seconds
        let events: Vec<_> = (0..300)
            .filter_map(|frame| d.observe(GestureLabel::O, at(t0, frame * 33)))
            .collect();

        assert_eq!(events.len(), 4);
        assert!(events.iter().all(|e| *e == GestureEvent::Other(GestureLabel::O)));
    }

    #[test]
    fn test_repeat_within_window_tenses() {
        let t0 = Utc::now();
        let mut d = GestureDebouncer::new(fast_settings(), t0);

        assert_eq!(
            d.observe(GestureLabel::Giyeok, at(t0, 1000)),
            Some(GestureEvent::Consonant(GestureLabel::Giyeok))
        );
        assert_eq!(d.pending().map(|p| p.label), Some(GestureLabel::Giyeok));
        assert_eq!(
            d.observe(GestureLabel::Giyeok, at(t0, 2200)),
            Some(GestureEvent::Tense(GestureLabel::Giyeok))
        );
        assert!(d.pending().is_none());

        // a third repeat starts over as a plain consonant
        assert_eq!(
            d.observe(GestureLabel::Giyeok, at(t0, 3300)),
            Some(GestureEvent::Consonant(GestureLabel::Giyeok))
        );
    }

    #[test]
    fn test_repeat_outside_window_is_plain() {
        let t0 = Utc::now();
        let mut d = GestureDebouncer::new(fast_settings(), t0);

        d.observe(GestureLabel::Siot, at(t0, 1000));
        assert_eq!(
            d.observe(GestureLabel::Siot, at(t0, 2600)),
            Some(GestureEvent::Consonant(GestureLabel::Siot))
        );
    }

    #[test]
    fn test_default_hold_makes_tensing_unreachable() {
        let t0 = Utc::now();
        let mut d = GestureDebouncer::new(DebounceSettings::default(), t0);

        d.observe(GestureLabel::Bieup, at(t0, 2000));
        assert_eq!(d.observe(GestureLabel::Bieup, at(t0, 3000)), None);
        assert_eq!(
            d.observe(GestureLabel::Bieup, at(t0, 4000)),
            Some(GestureEvent::Consonant(GestureLabel::Bieup))
        );
    }

    #[test]
    fn test_different_consonant_replaces_pending() {
        let t0 = Utc::now();
        let mut d = GestureDebouncer::new(fast_settings(), t0);

        d.observe(GestureLabel::Giyeok, at(t0, 1000));
        assert_eq!(
            d.observe(GestureLabel::Digeut, at(t0, 2000)),
            Some(GestureEvent::Consonant(GestureLabel::Digeut))
        );
        assert_eq!(d.pending().map(|p| p.label), Some(GestureLabel::Digeut));
        assert_eq!(
            d.observe(GestureLabel::Giyeok, at(t0, 3000)),
            Some(GestureEvent::Consonant(GestureLabel::Giyeok))
        );
    }

    #[test]
    fn test_other_gesture_cancels_pending() {
        let t0 = Utc::now();
        let mut d = GestureDebouncer::new(fast_settings(), t0);

        d.observe(GestureLabel::Jieut, at(t0, 1000));
        assert_eq!(
            d.observe(GestureLabel::Nieun, at(t0, 2000)),
            Some(GestureEvent::Other(GestureLabel::Nieun))
        );
        assert!(d.pending().is_none());
        assert_eq!(d.seconds_since_pending(at(t0, 2100)), None);
        assert_eq!(d.last_label(), Some(GestureLabel::Nieun));
        assert!((d.seconds_since_accepted(at(t0, 2500)) - 0.5).abs() < 1e-9);
    }
}
