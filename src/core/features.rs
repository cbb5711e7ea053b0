//! Joint-angle features computed from hand landmarks.
//!
//! Each finger segment becomes a unit vector, and the feature vector is the
//! angle between consecutive segments of the same finger. Normalizing every
//! segment independently removes hand position and size from the features.

use crate::source::types::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of angles in a feature vector.
pub const ANGLE_COUNT: usize = 15;

/// Number of bone segments measured per hand.
pub const EDGE_COUNT: usize = 20;

/// Start joint of each segment. Segment `i` ends at joint `i + 1`.
#[rustfmt::skip]
const EDGE_PARENTS: [usize; EDGE_COUNT] = [
    WRIST, THUMB_CMC, THUMB_MCP, THUMB_IP,
    WRIST, INDEX_MCP, INDEX_PIP, INDEX_DIP,
    WRIST, MIDDLE_MCP, MIDDLE_PIP, MIDDLE_DIP,
    WRIST, RING_MCP, RING_PIP, RING_DIP,
    WRIST, PINKY_MCP, PINKY_PIP, PINKY_DIP,
];

/// First segment of each measured pair. The second is always the next
/// segment along the same finger.
const ANGLE_PAIRS: [usize; ANGLE_COUNT] = [0, 1, 2, 4, 5, 6, 8, 9, 10, 12, 13, 14, 16, 17, 18];

/// Feature extraction failures.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeatureError {
    /// Two landmarks of a segment coincide, or a coordinate is not finite.
    #[error("degenerate landmark input: segment {edge} ({from} -> {to}) has no direction")]
    DegenerateInput { edge: usize, from: usize, to: usize },
}

/// Fifteen inter-segment angles in degrees, each in `[0, 180]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngleVector([f64; ANGLE_COUNT]);

impl AngleVector {
    pub fn new(angles: [f64; ANGLE_COUNT]) -> Self {
        Self(angles)
    }

    pub fn as_array(&self) -> &[f64; ANGLE_COUNT] {
        &self.0
    }

    /// Squared Euclidean distance to another vector.
    pub fn distance_squared(&self, other: &AngleVector) -> f64 {
        self.0
            .iter()
            .zip(other.0.iter())
            .map(|(a, b)| (a - b) * (a - b))
            .sum()
    }

    pub fn distance(&self, other: &AngleVector) -> f64 {
        self.distance_squared(other).sqrt()
    }
}

impl TryFrom<&[f64]> for AngleVector {
    type Error = usize;

    /// Fails with the actual length when it is not [`ANGLE_COUNT`].
    fn try_from(values: &[f64]) -> Result<Self, Self::Error> {
        let array: [f64; ANGLE_COUNT] = values.try_into().map_err(|_| values.len())?;
        Ok(Self(array))
    }
}

/// Compute the angle feature vector for one hand.
pub fn extract_angles(landmarks: &HandLandmarks) -> Result<AngleVector, FeatureError> {
    let joints = landmarks.joints();

    let mut edges = [[0.0f64; 3]; EDGE_COUNT];
    for (edge, &from) in EDGE_PARENTS.iter().enumerate() {
        let to = edge + 1;
        edges[edge] = unit_vector(&joints[from], &joints[to])
            .ok_or(FeatureError::DegenerateInput { edge, from, to })?;
    }

    let mut angles = [0.0f64; ANGLE_COUNT];
    for (slot, &first) in ANGLE_PAIRS.iter().enumerate() {
        angles[slot] = angle_between(&edges[first], &edges[first + 1]);
    }

    Ok(AngleVector(angles))
}

/// Direction from `a` to `b`, or `None` when it is undefined.
fn unit_vector(a: &Joint, b: &Joint) -> Option<[f64; 3]> {
    if !a.is_finite() || !b.is_finite() {
        return None;
    }
    let d = [b.x - a.x, b.y - a.y, b.z - a.z];
    let norm = (d[0] * d[0] + d[1] * d[1] + d[2] * d[2]).sqrt();
    if norm <= f64::EPSILON {
        return None;
    }
    Some([d[0] / norm, d[1] / norm, d[2] / norm])
}

/// Angle between two unit vectors in degrees.
fn angle_between(u: &[f64; 3], v: &[f64; 3]) -> f64 {
    // rounding can push the dot product just past ±1
    let dot = (u[0] * v[0] + u[1] * v[1] + u[2] * v[2]).clamp(-1.0, 1.0);
    dot.acos().to_degrees()
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::source::types::LANDMARK_COUNT;

    /// A hand with all five fingers pointing straight up from the wrist,
    /// spread out along x.
    pub fn open_hand() -> HandLandmarks {
        let mut joints = [Joint::default(); LANDMARK_COUNT];
        for finger in 0..5 {
            let x = finger as f64 * 0.5 - 1.0;
            for segment in 0..4 {
                let idx = 1 + finger * 4 + segment;
                joints[idx] = Joint::new(x, 1.0 + segment as f64, 0.0);
            }
        }
        HandLandmarks::new(joints)
    }

    /// Like [`open_hand`] but every finger folds 90 degrees at its second
    /// joint, pointing along +z from there.
    pub fn bent_hand() -> HandLandmarks {
        let mut joints = *open_hand().joints();
        for finger in 0..5 {
            let base = 1 + finger * 4;
            let bend = joints[base + 1];
            joints[base + 2] = Joint::new(bend.x, bend.y, 1.0);
            joints[base + 3] = Joint::new(bend.x, bend.y, 2.0);
        }
        HandLandmarks::new(joints)
    }

    /// Like [`open_hand`] but the index fingertip folds straight back onto
    /// its middle joint, so the last two index segments are antiparallel.
    pub fn folded_hand() -> HandLandmarks {
        let mut joints = *open_hand().joints();
        joints[INDEX_TIP] = joints[INDEX_PIP];
        HandLandmarks::new(joints)
    }
}
