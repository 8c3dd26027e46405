//! Euclidean path-length objectives.

use super::types::{Dataset, Fitness};

/// Open-path length: the sum of distances between consecutive rows.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearEuclidean;

impl Fitness for LinearEuclidean {
    fn performance(&self, data: &Dataset) -> f64 {
        data.rows()
            .zip(data.rows().skip(1))
            .map(|(a, b)| distance(a, b))
            .sum()
    }
}

/// Closed-tour length: the open path plus the segment from the last row
/// back to the first.
#[derive(Debug, Clone, Copy, Default)]
pub struct CircularEuclidean;

impl Fitness for CircularEuclidean {
    fn performance(&self, data: &Dataset) -> f64 {
        let n = data.len();
        (0..n)
            .map(|i| distance(data.row(i), data.row((i + n - 1) % n)))
            .sum()
    }
}

fn distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}
