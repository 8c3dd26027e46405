//! Accepted-state history and per-run statistics.

use super::types::Dataset;

/// An accepted state.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sample {
    /// Step at which the state was accepted.
    pub iteration: usize,

    /// The accepted arrangement.
    pub order: Dataset,

    /// Fitness of `order`.
    pub performance: f64,
}

/// Append-only log of accepted samples, in acceptance order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunHistory {
    samples: Vec<Sample>,
}

impl RunHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a sample. Iterations must be strictly increasing.
    pub(crate) fn push(&mut self, sample: Sample) {
        debug_assert!(
            self.samples
                .last()
                .is_none_or(|last| last.iteration < sample.iteration),
            "history iterations must be strictly increasing"
        );
        self.samples.push(sample);
    }

    pub(crate) fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    pub fn as_slice(&self) -> &[Sample] {
        &self.samples
    }

    /// The most recently accepted sample.
    pub fn last(&self) -> Option<&Sample> {
        self.samples.last()
    }

    /// The sample with the lowest performance; the earliest wins ties.
    pub fn best(&self) -> Option<&Sample> {
        self.samples
            .iter()
            .reduce(|best, s| if s.performance < best.performance { s } else { best })
    }

    /// Performance trace in acceptance order.
    pub fn performances(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.performance).collect()
    }
}

impl<'a> IntoIterator for &'a RunHistory {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

/// Counters for the most recent run.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunStats {
    /// Steps executed.
    pub iterations: usize,

    /// Accepted candidates, including escapes.
    pub accepted_moves: usize,

    /// Candidates accepted because they did not worsen the score.
    pub improving_moves: usize,

    /// Worse candidates accepted by the temperature draw.
    pub escapes: usize,

    /// Fitness of the starting arrangement.
    pub initial_performance: f64,

    /// Fitness of the returned arrangement.
    pub final_performance: f64,

    /// Temperature at the last executed step.
    pub final_temperature: f64,
}
