//! Per-run processing statistics.
//!
//! Counters are atomics so the frame reader thread and the session loop can
//! both record into one shared instance.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Counters for one recognition run.
#[derive(Debug)]
pub struct SessionStats {
    /// Frames handed to the session
    frames: AtomicU64,
    /// Frames that contained a hand
    hands_detected: AtomicU64,
    /// Frames skipped because of degenerate landmarks
    degenerate_frames: AtomicU64,
    /// Source lines that could not be parsed
    rejected_lines: AtomicU64,
    /// Gestures that passed the debouncer
    gestures_accepted: AtomicU64,
    /// Consonants doubled into their tensed form
    tense_merges: AtomicU64,
    /// NEXT gestures that committed the buffer
    commits: AtomicU64,
    /// CLEAR gestures
    clears: AtomicU64,
    started_at: DateTime<Utc>,
}

impl SessionStats {
    pub fn new() -> Self {
        Self {
            frames: AtomicU64::new(0),
            hands_detected: AtomicU64::new(0),
            degenerate_frames: AtomicU64::new(0),
            rejected_lines: AtomicU64::new(0),
            gestures_accepted: AtomicU64::new(0),
            tense_merges: AtomicU64::new(0),
            commits: AtomicU64::new(0),
            clears: AtomicU64::new(0),
            started_at: Utc::now(),
        }
    }

    pub fn record_frame(&self, has_hand: bool) {
        self.frames.fetch_add(1, Ordering::Relaxed);
        if has_hand {
            self.hands_detected.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_degenerate_frame(&self) {
        self.degenerate_frames.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_rejected_line(&self) {
        self.rejected_lines.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_gesture_accepted(&self) {
        self.gestures_accepted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_tense_merge(&self) {
        self.tense_merges.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_commit(&self) {
        self.commits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_clear(&self) {
        self.clears.fetch_add(1, Ordering::Relaxed);
    }

    /// Get the current statistics.
    pub fn stats(&self) -> StatsSnapshot {
        StatsSnapshot {
            frames: self.frames.load(Ordering::Relaxed),
            hands_detected: self.hands_detected.load(Ordering::Relaxed),
            degenerate_frames: self.degenerate_frames.load(Ordering::Relaxed),
            rejected_lines: self.rejected_lines.load(Ordering::Relaxed),
            gestures_accepted: self.gestures_accepted.load(Ordering::Relaxed),
            tense_merges: self.tense_merges.load(Ordering::Relaxed),
            commits: self.commits.load(Ordering::Relaxed),
            clears: self.clears.load(Ordering::Relaxed),
            started_at: self.started_at,
            duration_secs: (Utc::now() - self.started_at).num_seconds().max(0) as u64,
        }
    }

    /// Get a summary string for display.
    pub fn summary(&self) -> String {
        let stats = self.stats();
        format!(
            "Session Statistics:\n\
             - Frames processed: {}\n\
             - Frames with a hand: {}\n\
             - Degenerate frames skipped: {}\n\
             - Input lines rejected: {}\n\
             - Gestures accepted: {}\n\
             - Tensed consonants: {}\n\
             - Commits: {}\n\
             - Clears: {}\n\
             - Duration: {} seconds",
            stats.frames,
            stats.hands_detected,
            stats.degenerate_frames,
            stats.rejected_lines,
            stats.gestures_accepted,
            stats.tense_merges,
            stats.commits,
            stats.clears,
            stats.duration_secs
        )
    }

    /// Reset all counters.
    pub fn reset(&self) {
        for counter in [
            &self.frames,
            &self.hands_detected,
            &self.degenerate_frames,
            &self.rejected_lines,
            &self.gestures_accepted,
            &self.tense_merges,
            &self.commits,
            &self.clears,
        ] {
            counter.store(0, Ordering::Relaxed);
        }
    }
}

impl Default for SessionStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of session statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub frames: u64,
    pub hands_detected: u64,
    pub degenerate_frames: u64,
    pub rejected_lines: u64,
    pub gestures_accepted: u64,
    pub tense_merges: u64,
    pub commits: u64,
    pub clears: u64,
    pub started_at: DateTime<Utc>,
    pub duration_secs: u64,
}

/// Thread-safe shared statistics.
pub type SharedStats = Arc<SessionStats>;

pub fn create_shared_stats() -> SharedStats {
    Arc::new(SessionStats::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_counting() {
        let stats = SessionStats::new();

        stats.record_frame(true);
        stats.record_frame(false);
        stats.record_frame(true);
        stats.record_degenerate_frame();

        let snapshot = stats.stats();
        assert_eq!(snapshot.frames, 3);
        assert_eq!(snapshot.hands_detected, 2);
        assert_eq!(snapshot.degenerate_frames, 1);
    }

    #[test]
    fn test_reset() {
        let stats = SessionStats::new();
        stats.record_gesture_accepted();
        stats.record_commit();
        stats.record_rejected_line();
        stats.reset();

        let snapshot = stats.stats();
        assert_eq!(snapshot.gestures_accepted, 0);
        assert_eq!(snapshot.commits, 0);
        assert_eq!(snapshot.rejected_lines, 0);
    }

    #[test]
    fn test_summary_format() {
        let stats = SessionStats::new();
        stats.record_tense_merge();
        let summary = stats.summary();

        assert!(summary.contains("Frames processed: 0"));
        assert!(summary.contains("Tensed consonants: 1"));
    }

    #[test]
    fn test_shared_across_threads() {
        let stats = create_shared_stats();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let s = Arc::clone(&stats);
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        s.record_rejected_line();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(stats.stats().rejected_lines, 400);
    }
}
