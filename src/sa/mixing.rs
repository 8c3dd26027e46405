//! Index perturbation operators.
//!
//! Both operators mutate an index slice in place and only move existing
//! values between positions, so a permutation stays a permutation.
//!
//! - [`swap`]: exchange two distinct random positions
//! - [`n_opt`]: cyclically rotate the values at `n` distinct random positions

use rand::seq::index;
use rand::Rng;

use crate::error::{AnnealError, Result};

/// A strategy for perturbing the working index array once per step.
pub trait Mixing {
    /// Perturbs `indices` in place. `max_n` is the caller's upper bound on
    /// perturbation size, at least 2.
    fn mix<R: Rng + ?Sized>(&self, indices: &mut [usize], max_n: usize, rng: &mut R)
        -> Result<()>;

    /// Fewest positions [`mix`](Self::mix) needs when called with `max_n`.
    fn min_len(&self, max_n: usize) -> usize {
        max_n
    }
}

/// Rotates a random number of positions, drawn uniformly from `[2, max_n]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NOpt;

impl Mixing for NOpt {
    fn mix<R: Rng + ?Sized>(
        &self,
        indices: &mut [usize],
        max_n: usize,
        rng: &mut R,
    ) -> Result<()> {
        if max_n < 2 {
            return Err(AnnealError::ShuffleTooSmall { n: max_n });
        }
        let n = rng.random_range(2..=max_n);
        n_opt(indices, n, rng)
    }
}

/// Swaps a single pair of positions per step, ignoring `max_n`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Swap;

impl Mixing for Swap {
    fn mix<R: Rng + ?Sized>(
        &self,
        indices: &mut [usize],
        _max_n: usize,
        rng: &mut R,
    ) -> Result<()> {
        swap(indices, rng)
    }

    fn min_len(&self, _max_n: usize) -> usize {
        2
    }
}

/// Exchanges two distinct positions chosen uniformly without replacement.
///
/// # Complexity
/// O(1)
pub fn swap<R: Rng + ?Sized>(indices: &mut [usize], rng: &mut R) -> Result<()> {
    check_size(2, indices.len())?;
    let picked = index::sample(rng, indices.len(), 2);
    indices.swap(picked.index(0), picked.index(1));
    Ok(())
}

/// Picks `n` distinct positions uniformly without replacement and rotates
/// their values by one in draw order: the `i`-th drawn position receives
/// the value previously held by the `(i - 1)`-th, and the first receives
/// the last.
///
/// With `n == 2` this is a swap.
///
/// # Complexity
/// O(n)
pub fn n_opt<R: Rng + ?Sized>(indices: &mut [usize], n: usize, rng: &mut R) -> Result<()> {
    check_size(n, indices.len())?;
    let positions = index::sample(rng, indices.len(), n).into_vec();
    rotate_positions(indices, &positions);
    Ok(())
}

/// Rotates the values at `positions` forward by one, in the given order.
fn rotate_positions(indices: &mut [usize], positions: &[usize]) {
    let n = positions.len();
    if n < 2 {
        return;
    }
    let values: Vec<usize> = positions.iter().map(|&p| indices[p]).collect();
    for (i, &p) in positions.iter().enumerate() {
        indices[p] = values[(i + n - 1) % n];
    }
}

fn check_size(n: usize, len: usize) -> Result<()> {
    if n < 2 {
        return Err(AnnealError::ShuffleTooSmall { n });
    }
    if n > len {
        return Err(AnnealError::ShuffleTooLarge { n, len });
    }
    Ok(())
}
