//! k-nearest-neighbour gesture classification.

use crate::core::dataset::{ReferenceSample, ReferenceSet};
use crate::core::features::AngleVector;
use crate::core::gesture::GestureLabel;
use thiserror::Error;

/// Default neighbour count.
pub const DEFAULT_K: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifierError {
    #[error("reference set is empty; no classification is possible")]
    EmptyReferenceSet,
    #[error("neighbour count must be at least 1")]
    InvalidK,
}

/// Majority-vote classifier over a fixed reference set.
///
/// Neighbours are ranked by Euclidean distance. Equal distances keep the
/// dataset order, and a tied vote goes to the lowest label id, so the result
/// is fully determined by the input vector and the reference set.
#[derive(Debug, Clone)]
pub struct GestureClassifier {
    reference: ReferenceSet,
    k: usize,
}

impl GestureClassifier {
    pub fn new(reference: ReferenceSet, k: usize) -> Result<Self, ClassifierError> {
        if reference.is_empty() {
            return Err(ClassifierError::EmptyReferenceSet);
        }
        if k == 0 {
            return Err(ClassifierError::InvalidK);
        }
        Ok(Self { reference, k })
    }

    /// Build a classifier directly from samples.
    pub fn from_samples(samples: Vec<ReferenceSample>, k: usize) -> Result<Self, ClassifierError> {
        let reference =
            ReferenceSet::new(samples).map_err(|_| ClassifierError::EmptyReferenceSet)?;
        Self::new(reference, k)
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn reference(&self) -> &ReferenceSet {
        &self.reference
    }

    /// Classify one feature vector.
    pub fn classify(&self, angles: &AngleVector) -> GestureLabel {
        let mut ranked: Vec<(f64, GestureLabel)> = self
            .reference
            .samples()
            .iter()
            .map(|s| (s.angles.distance_squared(angles), s.label))
            .collect();
        ranked.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut votes = [0usize; GestureLabel::COUNT];
        for (_, label) in ranked.iter().take(self.k) {
            votes[label.id() as usize] += 1;
        }

        // strict comparison keeps the lowest id on ties
        let mut best = ranked[0].1;
        let mut best_count = 0;
        for label in GestureLabel::ALL {
            let count = votes[label.id() as usize];
            if count > best_count {
                best = label;
                best_count = count;
            }
        }
        best
    }
}
