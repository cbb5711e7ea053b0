//! Frame types delivered by a hand-pose source.
//!
//! A frame carries either one hand's 21 landmarks or nothing at all. Joint
//! ordering follows the usual hand-landmark layout: the wrist first, then
//! four joints per finger from base to tip.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_DIP: usize = 7;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_DIP: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

/// Number of landmarks per hand.
pub const LANDMARK_COUNT: usize = 21;

/// A single 3D hand landmark.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Joint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Joint {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// The 21 ordered landmarks of one detected hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Joint>", into = "Vec<Joint>")]
pub struct HandLandmarks([Joint; LANDMARK_COUNT]);

impl HandLandmarks {
    pub fn new(joints: [Joint; LANDMARK_COUNT]) -> Self {
        Self(joints)
    }

    pub fn joints(&self) -> &[Joint; LANDMARK_COUNT] {
        &self.0
    }

    pub fn joint(&self, index: usize) -> Option<&Joint> {
        self.0.get(index)
    }
}

impl TryFrom<Vec<Joint>> for HandLandmarks {
    type Error = String;

    fn try_from(joints: Vec<Joint>) -> Result<Self, Self::Error> {
        let len = joints.len();
        let array: [Joint; LANDMARK_COUNT] = joints
            .try_into()
            .map_err(|_| format!("expected {LANDMARK_COUNT} landmarks, got {len}"))?;
        Ok(Self(array))
    }
}

impl From<HandLandmarks> for Vec<Joint> {
    fn from(landmarks: HandLandmarks) -> Self {
        landmarks.0.to_vec()
    }
}

/// One tick of input: a timestamp and at most one hand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandFrame {
    /// Capture time of the frame. Frames without one are timed when the
    /// session processes them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    /// Landmarks of the detected hand, `None` when no hand was found
    #[serde(default)]
    pub landmarks: Option<HandLandmarks>,
}

impl HandFrame {
    pub fn hand_at(landmarks: HandLandmarks, timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp: Some(timestamp),
            landmarks: Some(landmarks),
        }
    }

    /// A frame in which no hand was detected.
    pub fn empty_at(timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp: Some(timestamp),
            landmarks: None,
        }
    }

    /// Capture time, or `now` for an unstamped frame.
    pub fn timestamp_or(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        self.timestamp.unwrap_or(now)
    }

    pub fn has_hand(&self) -> bool {
        self.landmarks.is_some()
    }
}
