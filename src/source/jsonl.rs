//! Replay of recorded hand-pose frames from JSON Lines.
//!
//! Each line holds one [`HandFrame`]. A reader thread parses lines and pushes
//! frames into a bounded channel; the session loop drains the channel on its
//! own thread. Lines that fail to parse are logged and skipped.

use crate::source::types::HandFrame;
use crate::stats::SharedStats;
use crossbeam_channel::{bounded, Receiver, Sender};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use thiserror::Error;

/// Errors that can occur while reading frames.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Frame reader is already running")]
    AlreadyRunning,
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Reads frames from a line-oriented JSON stream on a background thread.
pub struct FrameReader {
    /// Held until the reader thread takes it over
    sender: Option<Sender<HandFrame>>,
    receiver: Receiver<HandFrame>,
    running: Arc<AtomicBool>,
    stats: SharedStats,
    handle: Option<JoinHandle<()>>,
}

impl FrameReader {
    /// Create a reader with the given channel capacity.
    pub fn new(capacity: usize, stats: SharedStats) -> Self {
        let (sender, receiver) = bounded(capacity.max(1));
        Self {
            sender: Some(sender),
            receiver,
            running: Arc::new(AtomicBool::new(false)),
            stats,
            handle: None,
        }
    }

    /// Start reading from a file.
    pub fn start_file(&mut self, path: &Path) -> Result<(), SourceError> {
        let file = File::open(path)?;
        self.start(BufReader::new(file))
    }

    /// Start reading from standard input.
    pub fn start_stdin(&mut self) -> Result<(), SourceError> {
        self.start(BufReader::new(io::stdin()))
    }

    /// Start reading from any buffered reader. A reader can be started
    /// only once.
    ///
    /// The channel disconnects once the input is exhausted or [`stop`]
    /// is called.
    ///
    /// [`stop`]: FrameReader::stop
    pub fn start<R>(&mut self, input: R) -> Result<(), SourceError>
    where
        R: BufRead + Send + 'static,
    {
        let sender = self.sender.take().ok_or(SourceError::AlreadyRunning)?;
        self.running.store(true, Ordering::SeqCst);

        let running = Arc::clone(&self.running);
        let stats = Arc::clone(&self.stats);

        self.handle = Some(thread::spawn(move || {
            read_frames(input, &sender, &running, &stats);
            running.store(false, Ordering::SeqCst);
        }));

        Ok(())
    }

    /// Ask the reader thread to stop after its current line.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
    }

    /// Wait for the reader thread to exit.
    pub fn join(&mut self) {
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::error!("Frame reader thread panicked");
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Get the receiver for frames.
    pub fn receiver(&self) -> &Receiver<HandFrame> {
        &self.receiver
    }
}

impl Drop for FrameReader {
    fn drop(&mut self) {
        self.stop();
    }
}

fn read_frames<R: BufRead>(
    input: R,
    sender: &Sender<HandFrame>,
    running: &AtomicBool,
    stats: &SharedStats,
) {
    for (idx, line) in input.lines().enumerate() {
        if !running.load(Ordering::SeqCst) {
            break;
        }
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                tracing::error!("Frame input failed at line {}: {}", idx + 1, e);
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<HandFrame>(&line) {
            Ok(frame) => {
                if sender.send(frame).is_err() {
                    // receiver dropped
                    break;
                }
            }
            Err(e) => {
                tracing::warn!("Skipping malformed frame on line {}: {}", idx + 1, e);
                stats.record_rejected_line();
            }
        }
    }
    tracing::debug!("Frame reader finished");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::create_shared_stats;
    use std::io::{Cursor, Write};
    use std::time::Duration;

    fn hand_line(ts: &str) -> String {
        let joints: Vec<String> = (0..21)
            .map(|i| format!(r#"{{"x":{}.0,"y":{}.5,"z":0.0}}"#, i, i))
            .collect();
        format!(
            r#"{{"timestamp":"{ts}","landmarks":[{}]}}"#,
            joints.join(",")
        )
    }

    fn drain(reader: &FrameReader) -> Vec<HandFrame> {
        let mut frames = Vec::new();
        while let Ok(frame) = reader.receiver().recv_timeout(Duration::from_secs(2)) {
            frames.push(frame);
        }
        frames
    }

    #[test]
    fn test_reads_frames_and_skips_bad_lines() {
        let input = format!(
            "{}\n\nnot json\n{{\"timestamp\":\"2024-05-01T10:00:01Z\",\"landmarks\":null}}\n{}\n",
            hand_line("2024-05-01T10:00:00Z"),
            r#"{"landmarks":[{"x":1.0,"y":1.0,"z":1.0}]}"#
        );
        let stats = create_shared_stats();
        let mut reader = FrameReader::new(16, Arc::clone(&stats));
        reader.start(Cursor::new(input)).unwrap();

        let frames = drain(&reader);
        assert_eq!(frames.len(), 2);
        assert!(frames[0].has_hand());
        assert!(!frames[1].has_hand());
        assert_eq!(stats.stats().rejected_lines, 2);
    }

    #[test]
    fn test_start_twice_fails() {
        let mut reader = FrameReader::new(4, create_shared_stats());
        reader.start(Cursor::new(String::new())).unwrap();
        assert!(matches!(
            reader.start(Cursor::new(String::new())),
            Err(SourceError::AlreadyRunning)
        ));
    }

    #[test]
    fn test_reads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{}", hand_line("2024-05-01T10:00:00Z")).unwrap();
        writeln!(file, "{}", hand_line("2024-05-01T10:00:00.033Z")).unwrap();

        let mut reader = FrameReader::new(4, create_shared_stats());
        reader.start_file(file.path()).unwrap();
        assert_eq!(drain(&reader).len(), 2);
        reader.join();
        assert!(!reader.is_running());
    }

    #[test]
    fn test_missing_file() {
        let mut reader = FrameReader::new(4, create_shared_stats());
        let result = reader.start_file(Path::new("/nonexistent/frames.jsonl"));
        assert!(matches!(result, Err(SourceError::Io(_))));
        assert!(!reader.is_running());
    }
}
